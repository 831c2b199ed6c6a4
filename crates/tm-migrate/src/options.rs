//! Per-call options

use crate::event::Event;
use crossbeam_channel::Sender;

/// Toggles for one migration operation
///
/// Options are consumed by the operation. An event sender handed over with
/// [`with_events`](Self::with_events) is dropped when the operation
/// returns, which disconnects the receiver once no other sender clones
/// exist. Keep a clone to leave the channel open across several calls.
#[derive(Debug, Clone, Default)]
pub struct Options {
    pub(crate) allow_missing: bool,
    pub(crate) apply_up_by_one: bool,
    pub(crate) no_versioning: bool,
    pub(crate) no_output: bool,
    pub(crate) sequential_only: bool,
    pub(crate) events: Option<Sender<Event>>,
}

impl Options {
    /// Default options: strict ordering, versioned, output on, no sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply out-of-order migrations instead of failing
    pub fn allow_missing(mut self, allow: bool) -> Self {
        self.allow_missing = allow;
        self
    }

    /// Run without reading or writing the ledger
    pub fn no_versioning(mut self, enabled: bool) -> Self {
        self.no_versioning = enabled;
        self
    }

    /// Suppress all logger output for this call
    pub fn no_output(mut self, enabled: bool) -> Self {
        self.no_output = enabled;
        self
    }

    /// Refuse to run when timestamp-numbered migrations are present
    pub fn sequential_only(mut self, enabled: bool) -> Self {
        self.sequential_only = enabled;
        self
    }

    /// Deliver progress events to `sender`
    pub fn with_events(mut self, sender: Sender<Event>) -> Self {
        self.events = Some(sender);
        self
    }

    pub(crate) fn up_by_one(mut self) -> Self {
        self.apply_up_by_one = true;
        self
    }

    /// Send one event; blocks until a rendezvous receiver takes it
    pub(crate) fn send(&self, event: impl Into<Event>) {
        let Some(sender) = &self.events else {
            return;
        };
        if sender.send(event.into()).is_err() {
            log::debug!("Event receiver disconnected; event dropped");
        }
    }
}
