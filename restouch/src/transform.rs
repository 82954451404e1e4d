//! Raw sensor coordinates to screen pixels.
use restouch_types::{RawSample, ScreenPoint};

use crate::calibration::CalibrationParameterSet;

impl CalibrationParameterSet {
    /// Apply the affine map to a raw sample.
    ///
    /// The division truncates toward zero. Returns `None` for a set with a zero divisor, or when
    /// the result doesn't fit a screen coordinate.
    pub fn transform(&self, raw: RawSample) -> Option<ScreenPoint> {
        // Every product of an i64 coefficient and a u16 reading fits in i128
        let (rx, ry) = (raw.x as i128, raw.y as i128);
        let divisor = self.divisor as i128;
        let x = (self.a as i128 * rx + self.b as i128 * ry + self.c as i128).checked_div(divisor)?;
        let y = (self.d as i128 * rx + self.e as i128 * ry + self.f as i128).checked_div(divisor)?;
        Some(ScreenPoint::new(i32::try_from(x).ok()?, i32::try_from(y).ok()?))
    }
}

/// Map a sample for the debouncer.
///
/// While a calibration point is being captured the raw values go through unchanged, so the
/// captured position can be paired with its requested target.
pub(crate) fn map_sample(params: &CalibrationParameterSet, raw: RawSample, capturing: bool) -> Option<ScreenPoint> {
    if capturing {
        Some(ScreenPoint::from(raw))
    } else {
        params.transform(raw)
    }
}
