//! Interactive calibration screen.
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Circle, PrimitiveStyle};
use restouch_types::ScreenPoint;

use super::{CalibrationError, CalibrationParameterSet, Calibrator};
use crate::CALIBRATION_POINTS;

/// Target positions on a 320x240 landscape panel, spread so the raw points are far from collinear
pub const DEFAULT_CALIBRATION_TARGETS: [ScreenPoint; CALIBRATION_POINTS] =
    [ScreenPoint::new(32, 24), ScreenPoint::new(280, 200), ScreenPoint::new(200, 40)];

const TARGET_DIAMETER: u32 = 21;

/// Draw each target in turn, wait for it to be touched, then solve and install the calibration.
///
/// A target is erased with `background` once it has been captured.
pub async fn run_calibration_wizard<D>(
    calibrator: &mut Calibrator<'_>,
    display: &mut D,
    targets: &[ScreenPoint; CALIBRATION_POINTS],
    foreground: D::Color,
    background: D::Color,
) -> Result<CalibrationParameterSet, CalibrationError>
where
    D: DrawTarget,
{
    info!("Starting touch calibration");
    calibrator.clear_points();
    for (index, target) in targets.iter().enumerate() {
        draw_target(display, *target, foreground)?;
        let captured = calibrator.begin_capture(target.x, target.y, index).await;
        draw_target(display, *target, background)?;
        captured?;
    }
    calibrator.solve_calibration()
}

fn draw_target<D: DrawTarget>(display: &mut D, at: ScreenPoint, color: D::Color) -> Result<(), CalibrationError> {
    Circle::with_center(Point::new(at.x, at.y), TARGET_DIAMETER)
        .into_styled(PrimitiveStyle::with_stroke(color, 1))
        .draw(display)
        .map_err(|_| CalibrationError::Display)
}
