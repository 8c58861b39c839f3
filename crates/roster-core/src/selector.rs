//! Random index sources used to pick a user.
//!
//! The manager never calls the system RNG directly; it asks a [`Selector`]
//! for an index. Production code uses a `StdRng`, tests and scripted demos
//! use [`ScriptedSelector`] to fix the outcome.

use std::collections::VecDeque;

use rand::Rng;
use rand::rngs::StdRng;

/// A source of indices into a non-empty sequence.
pub trait Selector {
    /// Return an index in `0..len`. `len` is always greater than zero.
    fn select_index(&mut self, len: usize) -> usize;
}

impl Selector for StdRng {
    fn select_index(&mut self, len: usize) -> usize {
        self.random_range(0..len)
    }
}

/// Replays a fixed sequence of indices.
///
/// Each queued index is reduced modulo `len`, so any script is valid for any
/// roster size. Once the queue is exhausted it keeps returning 0.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSelector {
    queue: VecDeque<usize>,
}

impl ScriptedSelector {
    /// Create a selector that replays `indices` in order.
    pub fn new(indices: impl IntoIterator<Item = usize>) -> Self {
        Self {
            queue: indices.into_iter().collect(),
        }
    }

    /// Queue another index.
    pub fn push(&mut self, index: usize) {
        self.queue.push_back(index);
    }

    /// Number of indices still queued.
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl Selector for ScriptedSelector {
    fn select_index(&mut self, len: usize) -> usize {
        self.queue.pop_front().map(|i| i % len).unwrap_or(0)
    }
}
