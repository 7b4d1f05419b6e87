use std::collections::VecDeque;

/// Fixed-capacity window over the most recent samples with a running sum.
///
/// Pushing into a full window evicts the oldest sample, so the mean is
/// available in constant time per step.
pub struct RunningWindow {
    capacity: usize,
    data: VecDeque<f64>,
    sum: f64,
}

impl RunningWindow {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            data: VecDeque::with_capacity(capacity),
            sum: 0.0,
        }
    }

    /// Add a sample, returning the one evicted to make room (if any).
    pub fn push(&mut self, value: f64) -> Option<f64> {
        let evicted = if self.is_full() {
            self.data.pop_front()
        } else {
            None
        };
        if let Some(old) = evicted {
            self.sum -= old;
        }
        self.data.push_back(value);
        self.sum += value;
        evicted
    }

    /// Mean of the samples currently held, `None` when empty.
    pub fn mean(&self) -> Option<f64> {
        if self.data.is_empty() {
            None
        } else {
            Some(self.sum / self.data.len() as f64)
        }
    }

    fn is_full(&self) -> bool {
        self.data.len() >= self.capacity
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
