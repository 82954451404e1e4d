//! Pointer events for single-touch panels
use postcard::experimental::max_size::MaxSize;
use serde::{Deserialize, Serialize};

use crate::point::ScreenPoint;

/// Kind of pointer message delivered to the event handler
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, MaxSize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PointerMessage {
    /// Debounced press
    Down,
    /// Movement while pressed
    Move,
    /// Debounced release
    Up,
}

/// A debounced touch event.
///
/// `point` is in screen pixels, or in raw sensor units while the press is being
/// captured for calibration.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, MaxSize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TouchEvent {
    pub message: PointerMessage,
    pub point: ScreenPoint,
}

impl TouchEvent {
    pub const fn new(message: PointerMessage, point: ScreenPoint) -> Self {
        Self { message, point }
    }

    pub const fn down(point: ScreenPoint) -> Self {
        Self::new(PointerMessage::Down, point)
    }

    pub const fn moved(point: ScreenPoint) -> Self {
        Self::new(PointerMessage::Move, point)
    }

    pub const fn up(point: ScreenPoint) -> Self {
        Self::new(PointerMessage::Up, point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_fits_max_size() {
        let event = TouchEvent::moved(ScreenPoint::new(-12, i32::MAX));
        let mut buf = [0u8; TouchEvent::POSTCARD_MAX_SIZE];
        let used = postcard::to_slice(&event, &mut buf).unwrap();
        assert!(used.len() <= TouchEvent::POSTCARD_MAX_SIZE);

        let decoded: TouchEvent = postcard::from_bytes(used).unwrap();
        assert_eq!(decoded, event);
    }
}
