//! Sensor-space and screen-space coordinates.
use postcard::experimental::max_size::MaxSize;
use serde::{Deserialize, Serialize};

/// One unscaled reading pair from the touch sensor's ADC, in sensor units.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, MaxSize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawSample {
    pub x: u16,
    pub y: u16,
}

impl RawSample {
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }
}

/// A position on the display, in pixels.
///
/// Touches outside the calibrated area can map to negative or out-of-panel coordinates.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, MaxSize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScreenPoint {
    pub x: i32,
    pub y: i32,
}

impl ScreenPoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<RawSample> for ScreenPoint {
    /// Reinterpret a raw sample as a point without any calibration.
    fn from(raw: RawSample) -> Self {
        Self {
            x: raw.x as i32,
            y: raw.y as i32,
        }
    }
}
