//! Boolean-result surface over [`Queue`].
//!
//! Every function accepts a queue that may not exist (`None`) and reports
//! failure as `false` or a no-op instead of an error, leaving the queue as it
//! was. Hosts that keep a `Option<Queue>` slot call these with
//! `slot.as_mut()` / `slot.as_ref()`.

use tracing::debug;

use crate::error::QueueError;
use crate::queue::Queue;

/// Creates an empty queue.
///
/// The queue record itself lives wherever the caller stores it, so this
/// never reports "no queue".
pub fn new() -> Option<Queue> {
    Some(Queue::new())
}

/// Destroys `q` and every node still in it. No-op for `None`.
pub fn free(q: Option<Queue>) {
    if let Some(q) = q {
        q.free();
    }
}

pub fn insert_head(q: Option<&mut Queue>, s: &str) -> bool {
    match q {
        Some(q) => q.insert_head(s).is_ok(),
        None => absent("insert_head"),
    }
}

pub fn insert_tail(q: Option<&mut Queue>, s: &str) -> bool {
    match q {
        Some(q) => q.insert_tail(s).is_ok(),
        None => absent("insert_tail"),
    }
}

/// Removes the head element, copying it into `out` when supplied.
///
/// `out.len()` is the buffer capacity including the terminator. Returns
/// `false` without removing anything if the queue is absent or empty, or if
/// `out` has zero capacity.
pub fn remove_head(q: Option<&mut Queue>, out: Option<&mut [u8]>) -> bool {
    let q = match q {
        Some(q) => q,
        None => return absent("remove_head"),
    };

    match out {
        Some(buf) => q.remove_head_into(buf).is_ok(),
        None => q.pop_head().is_ok(),
    }
}

/// Element count, or 0 for an absent queue.
pub fn size(q: Option<&Queue>) -> usize {
    q.map_or(0, Queue::len)
}

pub fn reverse(q: Option<&mut Queue>) {
    match q {
        Some(q) => q.reverse(),
        None => {
            absent("reverse");
        }
    }
}

pub fn sort(q: Option<&mut Queue>) {
    match q {
        Some(q) => q.sort(),
        None => {
            absent("sort");
        }
    }
}

fn absent(op: &'static str) -> bool {
    debug!(op, err = %QueueError::InvalidHandle, "rejected");
    false
}
