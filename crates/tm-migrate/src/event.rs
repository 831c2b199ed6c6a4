//! Progress events
//!
//! Events are value snapshots delivered to an optional sink in the order the
//! effects happen. Apply events come in pairs around one migration: the
//! `applied == false` event before it runs and the `applied == true` event
//! after it commits. A failed migration only produces the first.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::Path;

/// Status text for a migration that has not been applied
pub const PENDING: &str = "pending";

/// Status text for migrations listed without the ledger
pub const NO_VERSIONING: &str = "no versioning";

/// `Mon Jan  2 15:04:05 2006`
const ANSIC_FORMAT: &str = "%a %b %e %H:%M:%S %Y";

/// Number of migrations a run is about to apply or revert
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionCountEvent {
    /// Version the run starts from
    pub version: i64,
    /// Source of that version, empty for version 0
    pub source: String,
    /// Migrations remaining in the run
    pub total_versions_left: usize,
}

/// One side of a single migration being applied or reverted
#[derive(Debug, Clone, Serialize)]
pub struct VersionApplyEvent {
    /// Version before the step
    pub from: i64,
    /// Source of `from`, empty for version 0
    pub from_source: String,
    /// Version after the step
    pub to: i64,
    /// Source of `to`, empty for version 0
    pub to_source: String,
    /// Wall-clock time the event was produced
    pub applied_at: DateTime<Utc>,
    /// `false` before the migration runs, `true` after it commits
    pub applied: bool,
    /// Whether this is a revert
    pub down: bool,
    /// Whether the ledger is written
    pub versioned: bool,
}

impl PartialEq for VersionApplyEvent {
    // applied_at is wall-clock and never compared
    fn eq(&self, other: &Self) -> bool {
        self.from == other.from
            && self.from_source == other.from_source
            && self.to == other.to
            && self.to_source == other.to_source
            && self.applied == other.applied
            && self.down == other.down
            && self.versioned == other.versioned
    }
}

/// Applied state of one migration
#[derive(Debug, Clone, Serialize)]
pub struct StatusEvent {
    /// Full source path; see [`script`](Self::script) for the file name
    pub source: String,
    /// Migration version
    pub version: i64,
    /// Whether the state was read from the ledger
    pub versioned: bool,
    /// When the migration was applied, `None` if pending
    pub applied_at: Option<DateTime<Utc>>,
}

impl StatusEvent {
    /// `pending`, or the applied time in ANSI C format
    pub fn applied_string(&self) -> String {
        match self.applied_at {
            Some(at) => at.format(ANSIC_FORMAT).to_string(),
            None => PENDING.to_string(),
        }
    }

    /// Base file name of the source
    pub fn script(&self) -> String {
        Path::new(&self.source)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.source.clone())
    }
}

impl PartialEq for StatusEvent {
    // applied_at is compared by presence only
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
            && self.version == other.version
            && self.versioned == other.versioned
            && self.applied_at.is_some() == other.applied_at.is_some()
    }
}

impl std::fmt::Display for StatusEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if !self.versioned {
            return write!(f, "{NO_VERSIONING}");
        }
        write!(f, "{}", self.applied_string())
    }
}

/// Progress event delivered to a sink
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// Run size announcement
    VersionCount(VersionCountEvent),
    /// Before/after one migration
    VersionApply(VersionApplyEvent),
    /// One row of a status listing
    Status(StatusEvent),
}

impl From<VersionCountEvent> for Event {
    fn from(e: VersionCountEvent) -> Self {
        Event::VersionCount(e)
    }
}

impl From<VersionApplyEvent> for Event {
    fn from(e: VersionApplyEvent) -> Self {
        Event::VersionApply(e)
    }
}

impl From<StatusEvent> for Event {
    fn from(e: StatusEvent) -> Self {
        Event::Status(e)
    }
}

/// Compare two optional events; two `None`s are equal
pub fn are_events_equal(a: Option<&Event>, b: Option<&Event>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

#[cfg(test)]
#[path = "event_test.rs"]
mod tests;
