//! Run an operation while draining its events on the calling thread

use crate::event::Event;
use crossbeam_channel::{bounded, Sender};

/// Run `produce` on a scoped thread and feed every event it sends to
/// `consume` until the sender side is dropped.
///
/// The channel is unbuffered, so the producer blocks on each event until
/// `consume` has taken it. `produce` owns the only sender; the channel
/// closes as soon as it returns. A panic in `produce` is resumed here.
pub fn observe<T, P, C>(produce: P, mut consume: C) -> T
where
    T: Send,
    P: FnOnce(Sender<Event>) -> T + Send,
    C: FnMut(Event),
{
    let (tx, rx) = bounded(0);
    std::thread::scope(|scope| {
        let handle = scope.spawn(move || produce(tx));
        for event in rx.iter() {
            consume(event);
        }
        match handle.join() {
            Ok(value) => value,
            Err(panic) => std::panic::resume_unwind(panic),
        }
    })
}
