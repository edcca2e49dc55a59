//! FIFO-backed frontier (spec §3, §4.2).
//!
//! Grounded on `examples/original_source/include/datastructures.h` (`struct queue_t`,
//! `frontier_type_t`): a power-of-two ring buffer with monotonically increasing 64-bit
//! cursors. The original's four backend variants are kept as an enum so `init` can
//! surface `Unsupported` for the three undefined ones, exactly as spec §4.2 requires.

use crate::error::ErrorKind;

/// Ring buffer capacity. Must be a power of two (the mask trick below depends on it).
pub const CAPACITY: usize = 1024;
const MASK: u64 = (CAPACITY - 1) as u64;

/// Backend selector for `Frontier::init`. Only `Fifo` is implemented; the rest are
/// declared-but-unimplemented per spec §3 ("Priority-queue and disjoint-set backends are
/// declared but unimplemented").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontierBackend {
    Fifo,
    PriorityQueue,
    BucketQueue,
    DisjointSet,
}

/// A FIFO of node IDs representing one level of a traversal. No iteration-order
/// guarantee beyond FIFO, and no deduplication — callers must prevent revisits using
/// external state (spec §4.2).
#[derive(Debug, Clone)]
pub struct Frontier {
    backend: FrontierBackend,
    data: Box<[i32; CAPACITY]>,
    front: u64,
    back: u64,
}

impl Default for Frontier {
    fn default() -> Self {
        Self::new()
    }
}

impl Frontier {
    /// A fresh, empty FIFO frontier.
    pub fn new() -> Self {
        Frontier {
            backend: FrontierBackend::Fifo,
            data: Box::new([0; CAPACITY]),
            front: 0,
            back: 0,
        }
    }

    /// Reset cursors and switch backend. Only `Fifo` is defined.
    pub fn init(&mut self, backend: FrontierBackend) -> Result<(), ErrorKind> {
        if backend != FrontierBackend::Fifo {
            return Err(ErrorKind::Unsupported);
        }
        self.backend = backend;
        self.front = 0;
        self.back = 0;
        Ok(())
    }

    pub fn len(&self) -> usize {
        (self.back - self.front) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.front == self.back
    }

    pub fn is_full(&self) -> bool {
        self.back - self.front == CAPACITY as u64
    }

    /// Append at `back`. Errors if the ring is full.
    pub fn push(&mut self, node: i32) -> Result<(), ErrorKind> {
        if self.is_full() {
            return Err(ErrorKind::FrontierFull);
        }
        self.data[(self.back & MASK) as usize] = node;
        self.back += 1;
        Ok(())
    }

    /// Remove from `front`. Errors if the ring is empty.
    pub fn pop(&mut self) -> Result<i32, ErrorKind> {
        if self.is_empty() {
            return Err(ErrorKind::FrontierEmpty);
        }
        let node = self.data[(self.front & MASK) as usize];
        self.front += 1;
        Ok(node)
    }
}
