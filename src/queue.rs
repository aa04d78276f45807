use std::fmt;
use std::mem;

use tracing::{debug, trace};

use crate::config::QueueConfig;
use crate::error::{Allocation, QueueError, Result};

type NodeId = usize;

// A slot in the arena. Live slots are reachable from `head`; released slots
// hold an empty string and use `next` as the free-list link.
struct Node {
    value: String,
    next: Option<NodeId>,
}

/// A FIFO/LIFO string container backed by a singly linked list.
///
/// Nodes are stored in a growable table and linked by index. Each node owns
/// an independent copy of the text it was given. Removing a node drops its
/// text and puts the slot on a free list for the next insertion.
pub struct Queue {
    nodes: Vec<Node>,
    free: Option<NodeId>,
    head: Option<NodeId>,
    tail: Option<NodeId>,
    len: usize,
    bytes: usize,
    config: QueueConfig,
}

impl Queue {
    pub fn new() -> Queue {
        Queue::with_config(QueueConfig::default())
    }

    pub fn with_config(config: QueueConfig) -> Queue {
        Queue {
            nodes: Vec::new(),
            free: None,
            head: None,
            tail: None,
            len: 0,
            bytes: 0,
            config,
        }
    }

    pub fn config(&self) -> &QueueConfig {
        &self.config
    }

    /// Number of elements. O(1).
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Total bytes of text currently owned by the queue.
    pub fn stored_bytes(&self) -> usize {
        self.bytes
    }

    pub fn front(&self) -> Option<&str> {
        self.head.map(|id| self.nodes[id].value.as_str())
    }

    pub fn back(&self) -> Option<&str> {
        self.tail.map(|id| self.nodes[id].value.as_str())
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter {
            queue: self,
            next: self.head,
            remaining: self.len,
        }
    }

    /// Copies `s` into a new node linked before the current head.
    ///
    /// On failure the queue is left exactly as it was.
    pub fn insert_head(&mut self, s: &str) -> Result<()> {
        let id = self.make_node(s, "insert_head")?;

        self.nodes[id].next = self.head;
        self.head = Some(id);
        if self.tail.is_none() {
            self.tail = Some(id);
        }
        self.len += 1;
        self.bytes += s.len();

        trace!(len = self.len, "insert_head");
        Ok(())
    }

    /// Copies `s` into a new node linked after the current tail.
    ///
    /// On failure the queue is left exactly as it was.
    pub fn insert_tail(&mut self, s: &str) -> Result<()> {
        let id = self.make_node(s, "insert_tail")?;

        match self.tail {
            Some(tail) => self.nodes[tail].next = Some(id),
            None => self.head = Some(id),
        }
        self.tail = Some(id);
        self.len += 1;
        self.bytes += s.len();

        trace!(len = self.len, "insert_tail");
        Ok(())
    }

    /// Removes the head node and hands its text back to the caller.
    pub fn pop_head(&mut self) -> Result<String> {
        let id = match self.head {
            Some(id) => id,
            None => {
                debug!("remove_head on empty queue");
                return Err(QueueError::EmptyQueue);
            }
        };

        let (value, next) = self.release(id);
        self.head = next;
        if next.is_none() {
            self.tail = None;
        }
        self.len -= 1;
        self.bytes -= value.len();

        trace!(len = self.len, "remove_head");
        Ok(value)
    }

    /// Removes the head node, copying its text into `buf`.
    ///
    /// At most `buf.len() - 1` bytes are copied and a NUL terminator is
    /// written right after them; longer text is truncated silently. Returns
    /// the number of text bytes copied. A zero-length `buf` is rejected
    /// before anything is removed.
    pub fn remove_head_into(&mut self, buf: &mut [u8]) -> Result<usize> {
        if self.head.is_none() {
            debug!("remove_head on empty queue");
            return Err(QueueError::EmptyQueue);
        }
        if buf.is_empty() {
            debug!("remove_head with zero-capacity buffer");
            return Err(QueueError::ZeroCapacity);
        }

        let value = self.pop_head()?;
        let copied = value.len().min(buf.len() - 1);
        buf[..copied].copy_from_slice(&value.as_bytes()[..copied]);
        buf[copied] = 0;
        Ok(copied)
    }

    /// Reverses the order of the elements by rewriting links in one pass.
    pub fn reverse(&mut self) {
        let mut prev = None;
        let mut cur = self.head;
        while let Some(id) = cur {
            cur = mem::replace(&mut self.nodes[id].next, prev);
            prev = Some(id);
        }
        mem::swap(&mut self.head, &mut self.tail);

        trace!(len = self.len, "reverse");
    }

    /// Sorts the elements in ascending byte-wise order. Stable.
    ///
    /// Bottom-up merge sort over the links: runs of `width` nodes are merged
    /// pairwise, doubling `width` until one run remains. O(n log n) and no
    /// node is allocated or released.
    pub fn sort(&mut self) {
        if self.len < 2 {
            return;
        }

        let mut list = self.head;
        let mut width: usize = 1;
        loop {
            let mut p = list;
            let mut tail: Option<NodeId> = None;
            let mut merges = 0;
            list = None;

            while p.is_some() {
                merges += 1;

                // Step `q` past the left run of up to `width` nodes.
                let mut q = p;
                let mut psize = 0;
                while psize < width {
                    psize += 1;
                    q = q.and_then(|id| self.nodes[id].next);
                    if q.is_none() {
                        break;
                    }
                }
                let mut qsize = width;

                while psize > 0 || (qsize > 0 && q.is_some()) {
                    let take_left = match (p, q) {
                        (Some(_), _) if psize > 0 && (qsize == 0 || q.is_none()) => true,
                        (Some(a), Some(b)) if psize > 0 => {
                            self.nodes[a].value <= self.nodes[b].value
                        }
                        _ => false,
                    };

                    let picked = if take_left {
                        let picked = p;
                        p = p.and_then(|id| self.nodes[id].next);
                        psize -= 1;
                        picked
                    } else {
                        let picked = q;
                        q = q.and_then(|id| self.nodes[id].next);
                        qsize -= 1;
                        picked
                    };

                    let id = match picked {
                        Some(id) => id,
                        None => break,
                    };
                    match tail {
                        Some(t) => self.nodes[t].next = Some(id),
                        None => list = Some(id),
                    }
                    tail = Some(id);
                }

                p = q;
            }

            if let Some(t) = tail {
                self.nodes[t].next = None;
            }
            if merges <= 1 {
                self.head = list;
                self.tail = tail;
                break;
            }
            width *= 2;
        }

        trace!(len = self.len, "sort");
    }

    /// Releases every node head to tail and empties the arena.
    pub fn clear(&mut self) -> usize {
        let released = self.len;
        while self.pop_head().is_ok() {}
        self.nodes = Vec::new();
        self.free = None;
        released
    }

    /// Destroys the queue and every node still in it.
    pub fn free(mut self) {
        let released = self.clear();
        debug!(released, "queue freed");
    }

    fn make_node(&mut self, s: &str, op: &'static str) -> Result<NodeId> {
        self.admit(s.len())
            .and_then(|()| copy_text(s))
            .and_then(|value| self.alloc_node(value))
            .map_err(|err| {
                debug!(op, %err, len = self.len, "insertion rejected");
                err
            })
    }

    fn admit(&self, extra: usize) -> Result<()> {
        if !self.config.admits_node(self.len) {
            return Err(QueueError::alloc(Allocation::Node));
        }
        if !self.config.admits_bytes(self.bytes, extra) {
            return Err(QueueError::alloc(Allocation::StringCopy));
        }
        Ok(())
    }

    fn alloc_node(&mut self, value: String) -> Result<NodeId> {
        if let Some(id) = self.free {
            let slot = &mut self.nodes[id];
            self.free = slot.next;
            slot.value = value;
            slot.next = None;
            return Ok(id);
        }

        self.nodes
            .try_reserve(1)
            .map_err(|_| QueueError::alloc(Allocation::Node))?;
        self.nodes.push(Node { value, next: None });
        Ok(self.nodes.len() - 1)
    }

    fn release(&mut self, id: NodeId) -> (String, Option<NodeId>) {
        let slot = &mut self.nodes[id];
        let value = mem::take(&mut slot.value);
        let next = mem::replace(&mut slot.next, self.free);
        self.free = Some(id);
        (value, next)
    }
}

fn copy_text(s: &str) -> Result<String> {
    let mut value = String::new();
    value
        .try_reserve_exact(s.len())
        .map_err(|_| QueueError::alloc(Allocation::StringCopy))?;
    value.push_str(s);
    Ok(value)
}

impl Default for Queue {
    fn default() -> Self {
        Queue::new()
    }
}

impl fmt::Debug for Queue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Head-to-tail iterator over the text stored in a [`Queue`].
pub struct Iter<'a> {
    queue: &'a Queue,
    next: Option<NodeId>,
    remaining: usize,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let id = self.next?;
        let queue = self.queue;
        let node = &queue.nodes[id];
        self.next = node.next;
        self.remaining -= 1;
        Some(node.value.as_str())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a Queue {
    type Item = &'a str;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}
