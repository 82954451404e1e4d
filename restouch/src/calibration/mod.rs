//! Three-point affine calibration.
//!
//! The map from raw sensor coordinates to screen pixels is
//!
//! ```text
//! screen_x = (raw_x * A + raw_y * B + C) / divisor
//! screen_y = (raw_x * D + raw_y * E + F) / divisor
//! ```
//!
//! Three raw/screen correspondences fix all six coefficients, including the skew between the
//! sensor and the panel. Both outputs are solved as independent 3x3 linear systems by Cramer's
//! rule and share the determinant of the raw points as their divisor.
mod capture;
mod factory;
#[cfg(feature = "display")]
mod wizard;

pub use capture::{CalibrationCapture, Calibrator};
pub use factory::{HardwareVariant, Orientation};
use restouch_types::{RawSample, ScreenPoint};
#[cfg(feature = "display")]
pub use wizard::{DEFAULT_CALIBRATION_TARGETS, run_calibration_wizard};

/// Errors of the calibration engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CalibrationError {
    /// The raw points are collinear or coincide, the divisor would be zero
    Degenerate,
    /// No press was captured before the timeout
    NoInput,
    /// Point index outside `0..CALIBRATION_POINTS`
    InvalidPointIndex(usize),
    /// Solving was requested before this point was captured
    MissingPoint(usize),
    /// Drawing a calibration target failed
    Display,
    /// A coefficient of the solved map doesn't fit the parameter set
    Overflow,
}

/// Affine map from sensor units to screen pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CalibrationParameterSet {
    pub a: i64,
    pub b: i64,
    pub c: i64,
    pub d: i64,
    pub e: i64,
    pub f: i64,
    pub divisor: i64,
}

/// A requested screen point and the raw sample observed when it was touched
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CalibrationPair {
    pub screen: ScreenPoint,
    pub raw: RawSample,
}

impl CalibrationPair {
    pub const fn new(screen: ScreenPoint, raw: RawSample) -> Self {
        Self { screen, raw }
    }
}

impl CalibrationParameterSet {
    /// Maps every raw sample to itself.
    pub const IDENTITY: Self = Self {
        a: 1,
        b: 0,
        c: 0,
        d: 0,
        e: 1,
        f: 0,
        divisor: 1,
    };

    pub const fn is_valid(&self) -> bool {
        self.divisor != 0
    }

    /// Solve the affine map through three correspondences.
    pub fn from_points(points: &[CalibrationPair; crate::CALIBRATION_POINTS]) -> Result<Self, CalibrationError> {
        let [p0, p1, p2] = points;
        // Wide enough for every product below, even with extreme screen coordinates
        let (rx0, ry0) = (p0.raw.x as i128, p0.raw.y as i128);
        let (rx1, ry1) = (p1.raw.x as i128, p1.raw.y as i128);
        let (rx2, ry2) = (p2.raw.x as i128, p2.raw.y as i128);
        let (sx0, sy0) = (p0.screen.x as i128, p0.screen.y as i128);
        let (sx1, sy1) = (p1.screen.x as i128, p1.screen.y as i128);
        let (sx2, sy2) = (p2.screen.x as i128, p2.screen.y as i128);

        let divisor = (rx0 - rx2) * (ry1 - ry2) - (rx1 - rx2) * (ry0 - ry2);
        if divisor == 0 {
            return Err(CalibrationError::Degenerate);
        }

        // Same expansion for both screen axes
        let solve = |s0: i128, s1: i128, s2: i128| {
            let a = (s0 - s2) * (ry1 - ry2) - (s1 - s2) * (ry0 - ry2);
            let b = (rx0 - rx2) * (s1 - s2) - (s0 - s2) * (rx1 - rx2);
            let c = (rx2 * s1 - rx1 * s2) * ry0 + (rx0 * s2 - rx2 * s0) * ry1 + (rx1 * s0 - rx0 * s1) * ry2;
            (a, b, c)
        };
        let (a, b, c) = solve(sx0, sx1, sx2);
        let (d, e, f) = solve(sy0, sy1, sy2);

        let narrow = |v: i128| i64::try_from(v).map_err(|_| CalibrationError::Overflow);
        Ok(Self {
            a: narrow(a)?,
            b: narrow(b)?,
            c: narrow(c)?,
            d: narrow(d)?,
            e: narrow(e)?,
            f: narrow(f)?,
            divisor: narrow(divisor)?,
        })
    }
}
