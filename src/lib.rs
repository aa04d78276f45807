//! A string queue backed by a singly linked list.
//!
//! [`Queue`] is the typed API; [`handle`] wraps it in the boolean-result form
//! where any operation may be handed a queue that does not exist.

pub mod config;
pub mod error;
pub mod handle;
pub mod queue;

pub use config::QueueConfig;
pub use error::{Allocation, QueueError, Result};
pub use queue::{Iter, Queue};

#[cfg(test)]
pub(crate) fn init_test_logging() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

#[cfg(test)]
const SOME_ELEMS: i32 = 10;
#[cfg(test)]
const MANY_ELEMS: i32 = 100_000;
#[cfg(test)]
const NUM_THREADS: i32 = 4;
#[cfg(test)]
const ELEMS_PER_THREAD: i32 = MANY_ELEMS / NUM_THREADS;

#[cfg(test)]
mod seq {
    use super::*;

    fn contents(queue: &Queue) -> Vec<&str> {
        queue.iter().collect()
    }

    #[test]
    fn insert_tail() {
        init_test_logging();
        let mut queue = Queue::new();

        // Insert `num_elems` elements
        for elem in 0..SOME_ELEMS {
            queue.insert_tail(&elem.to_string()).unwrap();
        }
        assert_eq!(queue.len(), SOME_ELEMS as usize);
    }

    #[test]
    fn checked_flush() {
        let mut queue = Queue::new();

        for elem in 0..SOME_ELEMS {
            queue.insert_tail(&elem.to_string()).unwrap();
        }

        // FIFO when only `insert_tail` is used
        for elem in 0..SOME_ELEMS {
            assert_eq!(elem.to_string(), queue.pop_head().unwrap());
        }
        assert!(queue.is_empty());
    }

    #[test]
    fn checked_stack() {
        let mut queue = Queue::new();

        for elem in 0..SOME_ELEMS {
            queue.insert_head(&elem.to_string()).unwrap();
        }

        // LIFO at the head
        for elem in (0..SOME_ELEMS).rev() {
            assert_eq!(elem.to_string(), queue.pop_head().unwrap());
        }
    }

    #[test]
    fn stress_checked_flush() {
        let mut queue = Queue::new();

        for elem in 0..MANY_ELEMS {
            queue.insert_tail(&elem.to_string()).unwrap();
        }

        for elem in 0..MANY_ELEMS {
            assert_eq!(elem.to_string(), queue.pop_head().unwrap());
        }

        // Overreaching!
        assert_eq!(queue.pop_head(), Err(QueueError::EmptyQueue));
        assert_eq!(queue.len(), 0);
    }

    #[test]
    fn size_tracks_successful_calls() {
        let mut queue = Queue::with_config(QueueConfig::unlimited().with_max_nodes(5));
        let mut expected = 0usize;

        for elem in 0..20 {
            let text = elem.to_string();
            let inserted = if elem % 3 == 0 {
                queue.insert_head(&text)
            } else {
                queue.insert_tail(&text)
            };
            if inserted.is_ok() {
                expected += 1;
            }
            if elem % 4 == 0 && queue.pop_head().is_ok() {
                expected -= 1;
            }
            assert_eq!(queue.len(), expected);
        }
    }

    #[test]
    fn insert_then_remove_restores() {
        let mut queue = Queue::new();
        queue.insert_tail("a").unwrap();
        queue.insert_tail("b").unwrap();

        for text in &["", "x", "a much longer string with spaces"] {
            queue.insert_head(text).unwrap();
            assert_eq!(queue.pop_head().unwrap(), *text);
            assert_eq!(contents(&queue), vec!["a", "b"]);
        }
    }

    #[test]
    fn mixed_ends() {
        let mut queue = Queue::new();
        queue.insert_tail("a").unwrap();
        queue.insert_tail("b").unwrap();
        queue.insert_head("z").unwrap();

        assert_eq!(contents(&queue), vec!["z", "a", "b"]);
        assert_eq!(queue.len(), 3);
    }

    #[test]
    fn reverse_is_involution() {
        let mut queue = Queue::new();
        for elem in 0..SOME_ELEMS {
            queue.insert_tail(&elem.to_string()).unwrap();
        }
        let before: Vec<String> = queue.iter().map(str::to_owned).collect();

        queue.reverse();
        let mut reversed = before.clone();
        reversed.reverse();
        assert_eq!(contents(&queue), reversed);
        assert_eq!(queue.len(), SOME_ELEMS as usize);

        queue.reverse();
        assert_eq!(contents(&queue), before);
    }

    #[test]
    fn sort_then_drain() {
        let mut queue = Queue::new();
        for fruit in &["banana", "apple", "cherry"] {
            queue.insert_tail(fruit).unwrap();
        }

        queue.sort();
        assert_eq!(queue.len(), 3);

        let mut buf = [0u8; 16];
        let copied = queue.remove_head_into(&mut buf).unwrap();
        assert_eq!(&buf[..=copied], b"apple\0");
        assert_eq!(queue.pop_head().unwrap(), "banana");
        assert_eq!(queue.pop_head().unwrap(), "cherry");
    }

    #[test]
    fn stress_reverse_sort() {
        let mut queue = Queue::new();
        for elem in 0..MANY_ELEMS {
            queue.insert_tail(&format!("{:08}", elem)).unwrap();
        }

        queue.reverse();
        assert_eq!(queue.front(), Some(format!("{:08}", MANY_ELEMS - 1).as_str()));

        queue.sort();
        for elem in 0..MANY_ELEMS {
            assert_eq!(format!("{:08}", elem), queue.pop_head().unwrap());
        }
    }
}
