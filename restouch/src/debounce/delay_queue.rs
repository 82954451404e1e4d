use heapless::Deque;
use restouch_types::ScreenPoint;

use crate::SAMPLE_QUEUE_DEPTH;

/// Ring of the most recent positions taken while the pen is down.
///
/// Positions leave the queue `SAMPLE_QUEUE_DEPTH` samples after they entered it, so the samples
/// taken while the pen is being lifted are still queued when the release is detected.
pub struct SampleDelayQueue {
    samples: Deque<ScreenPoint, SAMPLE_QUEUE_DEPTH>,
}

impl Default for SampleDelayQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl SampleDelayQueue {
    pub const fn new() -> Self {
        Self { samples: Deque::new() }
    }

    /// Drop all queued samples and start pre-filling with `first`.
    pub fn restart(&mut self, first: ScreenPoint) {
        self.samples.clear();
        // The queue is empty, so the push can't fail
        let _ = self.samples.push_back(first);
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    /// The queue holds a full delay line.
    pub fn is_primed(&self) -> bool {
        self.samples.is_full()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn oldest(&self) -> Option<ScreenPoint> {
        self.samples.front().copied()
    }

    /// Queue `sample`. Once primed, the oldest sample is evicted and returned.
    pub fn push(&mut self, sample: ScreenPoint) -> Option<ScreenPoint> {
        let evicted = if self.samples.is_full() {
            self.samples.pop_front()
        } else {
            None
        };
        let _ = self.samples.push_back(sample);
        evicted
    }
}
