//! Fixed-capacity rolling history of one loss.

use std::collections::VecDeque;

// Upper bound on the up-front allocation; larger windows grow on demand
const MAX_PREALLOCATED: usize = 1024;

/// The most recent `capacity` values of a loss, oldest first.
///
/// Pushing into a full window evicts exactly one value, the oldest, so the
/// window never holds more than `capacity` entries.
#[derive(Debug, Clone)]
pub struct LossWindow {
    values: VecDeque<f64>,
    capacity: usize,
}

impl LossWindow {
    pub fn new(capacity: usize) -> Self {
        Self {
            values: VecDeque::with_capacity(capacity.min(MAX_PREALLOCATED)),
            capacity,
        }
    }

    pub fn push(&mut self, value: f64) {
        if self.capacity == 0 {
            return;
        }

        if self.values.len() >= self.capacity {
            self.values.pop_front();
        }
        self.values.push_back(value);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns true once the warm-up is over and conditions may be evaluated.
    pub fn is_full(&self) -> bool {
        self.capacity > 0 && self.values.len() >= self.capacity
    }

    pub fn max(&self) -> Option<f64> {
        self.values.iter().copied().reduce(f64::max)
    }

    pub fn min(&self) -> Option<f64> {
        self.values.iter().copied().reduce(f64::min)
    }

    /// Distance between the largest and smallest value in the window.
    pub fn spread(&self) -> Option<f64> {
        Some((self.max()? - self.min()?).abs())
    }

    pub fn latest(&self) -> Option<f64> {
        self.values.back().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().copied()
    }
}
