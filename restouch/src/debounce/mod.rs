//! Pen-state debouncing.
//!
//! A pen state change is accepted only after the same contact verdict has been seen on
//! [`DEBOUNCE_COUNT`] consecutive samples. Accepted presses are reported through a
//! [`SampleDelayQueue`], so every event lags the sample it carries by a fixed number of cycles.
mod delay_queue;

pub use delay_queue::SampleDelayQueue;
use restouch_types::{ScreenPoint, TouchEvent};

use crate::DEBOUNCE_COUNT;

/// Debounced pen state.
///
/// The payload of the transitioning states counts the consecutive samples that disagree with
/// the last accepted state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PenState {
    Up,
    TransitioningDown(u8),
    Down,
    TransitioningUp(u8),
}

pub struct PenDebouncer {
    state: PenState,
    queue: SampleDelayQueue,
    /// The `Down` event of the current press has been emitted
    down_sent: bool,
}

impl Default for PenDebouncer {
    fn default() -> Self {
        Self::new()
    }
}

impl PenDebouncer {
    pub const fn new() -> Self {
        Self {
            state: PenState::Up,
            queue: SampleDelayQueue::new(),
            down_sent: false,
        }
    }

    pub fn state(&self) -> PenState {
        self.state
    }

    /// A press has been accepted and not yet released.
    pub fn is_pressed(&self) -> bool {
        matches!(self.state, PenState::Down | PenState::TransitioningUp(_))
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Feed one sample and its contact verdict.
    ///
    /// Returns at most one event per sample.
    pub fn update(&mut self, point: ScreenPoint, contact: bool) -> Option<TouchEvent> {
        if contact {
            match self.state {
                PenState::Up => self.count_press(1, point),
                PenState::TransitioningDown(n) => self.count_press(n + 1, point),
                PenState::TransitioningUp(n) => {
                    // Contact came back before the release was confirmed
                    self.state = if n <= 1 {
                        PenState::Down
                    } else {
                        PenState::TransitioningUp(n - 1)
                    };
                    None
                }
                PenState::Down => self.track(point),
            }
        } else {
            match self.state {
                PenState::Up => None,
                PenState::TransitioningDown(n) => {
                    self.state = if n <= 1 {
                        PenState::Up
                    } else {
                        PenState::TransitioningDown(n - 1)
                    };
                    None
                }
                PenState::Down => self.count_release(1),
                PenState::TransitioningUp(n) => self.count_release(n + 1),
            }
        }
    }

    fn count_press(&mut self, count: u8, point: ScreenPoint) -> Option<TouchEvent> {
        if count < DEBOUNCE_COUNT {
            self.state = PenState::TransitioningDown(count);
            return None;
        }

        debug!("Pen down at {:?}", point);
        self.state = PenState::Down;
        self.down_sent = false;
        self.queue.restart(point);
        None
    }

    fn count_release(&mut self, count: u8) -> Option<TouchEvent> {
        if count < DEBOUNCE_COUNT {
            self.state = PenState::TransitioningUp(count);
            return None;
        }

        debug!("Pen up");
        self.state = PenState::Up;
        let event = if self.down_sent {
            self.queue.oldest().map(TouchEvent::up)
        } else {
            // Released before the delay line filled, nothing has been reported for this press
            debug!("Pen released during pre-fill, press dropped");
            None
        };
        self.down_sent = false;
        self.queue.clear();
        event
    }

    fn track(&mut self, point: ScreenPoint) -> Option<TouchEvent> {
        if self.down_sent {
            return self.queue.push(point).map(TouchEvent::moved);
        }

        if self.queue.is_primed() {
            self.down_sent = true;
            self.queue.push(point).map(TouchEvent::down)
        } else {
            self.queue.push(point);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use heapless::Vec;
    use restouch_types::PointerMessage;

    use super::*;

    fn p(v: i32) -> ScreenPoint {
        ScreenPoint::new(v, v + 1000)
    }

    fn feed(debouncer: &mut PenDebouncer, samples: &[(i32, bool)]) -> Vec<TouchEvent, 32> {
        let mut events = Vec::new();
        for &(v, contact) in samples {
            if let Some(event) = debouncer.update(p(v), contact) {
                events.push(event).unwrap();
            }
        }
        events
    }

    #[test]
    fn test_press_needs_three_samples() {
        let mut debouncer = PenDebouncer::new();
        debouncer.update(p(1), true);
        assert_eq!(debouncer.state(), PenState::TransitioningDown(1));
        debouncer.update(p(2), true);
        assert_eq!(debouncer.state(), PenState::TransitioningDown(2));
        debouncer.update(p(3), true);
        assert_eq!(debouncer.state(), PenState::Down);
        assert!(debouncer.is_pressed());
    }

    #[test]
    fn test_transient_contact_is_rejected() {
        let mut debouncer = PenDebouncer::new();
        let events = feed(
            &mut debouncer,
            &[(1, true), (2, true), (0, false), (0, false), (3, true), (0, false), (0, false)],
        );
        assert!(events.is_empty());
        assert_eq!(debouncer.state(), PenState::Up);
    }

    #[test]
    fn test_full_press_sequence() {
        let mut debouncer = PenDebouncer::new();
        let events = feed(
            &mut debouncer,
            &[
                // Debounce, the third sample is the first queued one
                (1, true),
                (2, true),
                (3, true),
                // Pre-fill
                (4, true),
                (5, true),
                (6, true),
                // Steady state
                (7, true),
                (8, true),
                (9, true),
                (10, true),
                (11, true),
                // Release
                (0, false),
                (0, false),
                (0, false),
            ],
        );

        assert_eq!(
            events.as_slice(),
            &[
                TouchEvent::down(p(3)),
                TouchEvent::moved(p(4)),
                TouchEvent::moved(p(5)),
                TouchEvent::moved(p(6)),
                TouchEvent::moved(p(7)),
                TouchEvent::up(p(8)),
            ]
        );
        assert_eq!(debouncer.state(), PenState::Up);
    }

    #[test]
    fn test_release_during_prefill_emits_nothing() {
        let mut debouncer = PenDebouncer::new();
        let events = feed(
            &mut debouncer,
            &[(1, true), (2, true), (3, true), (4, true), (0, false), (0, false), (0, false)],
        );
        assert!(events.is_empty());
        assert_eq!(debouncer.state(), PenState::Up);

        // The next press starts from scratch
        let events = feed(
            &mut debouncer,
            &[(10, true), (11, true), (12, true), (13, true), (14, true), (15, true), (16, true)],
        );
        assert_eq!(events.as_slice(), &[TouchEvent::down(p(12))]);
    }

    #[test]
    fn test_short_dropout_does_not_release() {
        let mut debouncer = PenDebouncer::new();
        let mut samples: Vec<(i32, bool), 32> = Vec::new();
        for v in 1..=8 {
            samples.push((v, true)).unwrap();
        }
        samples.extend_from_slice(&[(0, false), (0, false)]).unwrap();
        assert!(matches!(feed(&mut debouncer, &samples).as_slice(), [_, _]));
        assert_eq!(debouncer.state(), PenState::TransitioningUp(2));

        // Contact is back, counting down to `Down` again without queueing
        let events = feed(&mut debouncer, &[(20, true), (21, true), (22, true)]);
        assert_eq!(debouncer.state(), PenState::Down);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].message, PointerMessage::Move);
    }

    #[test]
    fn test_every_press_is_bounded_by_down_and_up() {
        let mut debouncer = PenDebouncer::new();
        let mut downs = 0;
        let mut ups = 0;
        let mut pressed = false;
        // Two presses separated by noise
        let pattern = [
            true, true, false, true, true, true, true, true, true, true, true, false, true, false, false, false,
            true, false, false, true, true, true, true, true, true, true, false, false, false,
        ];
        for (i, contact) in pattern.iter().enumerate() {
            if let Some(event) = debouncer.update(p(i as i32), *contact) {
                match event.message {
                    PointerMessage::Down => {
                        assert!(!pressed);
                        pressed = true;
                        downs += 1;
                    }
                    PointerMessage::Move => assert!(pressed),
                    PointerMessage::Up => {
                        assert!(pressed);
                        pressed = false;
                        ups += 1;
                    }
                }
            }
        }
        assert!(!pressed);
        assert_eq!(downs, 2);
        assert_eq!(downs, ups);
    }
}
