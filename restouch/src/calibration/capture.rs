use embassy_time::{Duration, with_timeout};
use restouch_types::{RawSample, ScreenPoint};

use super::{CalibrationError, CalibrationPair, CalibrationParameterSet};
use crate::CALIBRATION_POINTS;
use crate::config::TouchConfig;
use crate::driver::TouchShared;

/// Correspondences collected for one calibration run
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CalibrationCapture {
    points: [Option<CalibrationPair>; CALIBRATION_POINTS],
}

impl CalibrationCapture {
    pub const fn new() -> Self {
        Self {
            points: [None; CALIBRATION_POINTS],
        }
    }

    pub fn record(&mut self, index: usize, pair: CalibrationPair) -> Result<(), CalibrationError> {
        let slot = self
            .points
            .get_mut(index)
            .ok_or(CalibrationError::InvalidPointIndex(index))?;
        *slot = Some(pair);
        Ok(())
    }

    pub fn get(&self, index: usize) -> Option<CalibrationPair> {
        self.points.get(index).copied().flatten()
    }

    pub fn clear(&mut self) {
        self.points = [None; CALIBRATION_POINTS];
    }

    /// All three pairs, or the first slot that is still empty.
    pub fn pairs(&self) -> Result<[CalibrationPair; CALIBRATION_POINTS], CalibrationError> {
        let mut pairs = [CalibrationPair::new(ScreenPoint::default(), RawSample::default()); CALIBRATION_POINTS];
        for (i, (pair, slot)) in pairs.iter_mut().zip(self.points.iter()).enumerate() {
            *pair = slot.ok_or(CalibrationError::MissingPoint(i))?;
        }
        Ok(pairs)
    }
}

/// Foreground side of the calibration.
///
/// Each [`Calibrator::begin_capture`] call waits for the user to press and release the panel,
/// [`Calibrator::solve_calibration`] turns the three captured points into the active calibration.
pub struct Calibrator<'a> {
    shared: &'a TouchShared,
    capture: CalibrationCapture,
    timeout: Option<Duration>,
}

impl<'a> Calibrator<'a> {
    pub fn new(shared: &'a TouchShared, config: &TouchConfig) -> Self {
        Self {
            shared,
            capture: CalibrationCapture::new(),
            timeout: config.calibration_timeout,
        }
    }

    pub fn set_timeout(&mut self, timeout: Option<Duration>) {
        self.timeout = timeout;
    }

    pub fn capture(&self) -> &CalibrationCapture {
        &self.capture
    }

    /// Forget every captured point, starting a new calibration sequence.
    pub fn clear_points(&mut self) {
        self.capture.clear();
    }

    /// Wait for the next full press on the panel and store its raw position against the screen
    /// point `(screen_x, screen_y)`.
    ///
    /// The press is not reported to the event handler. Returns the captured raw sample.
    pub async fn begin_capture(
        &mut self,
        screen_x: i32,
        screen_y: i32,
        point_index: usize,
    ) -> Result<RawSample, CalibrationError> {
        if point_index >= CALIBRATION_POINTS {
            return Err(CalibrationError::InvalidPointIndex(point_index));
        }

        debug!("Waiting for calibration point {} at ({}, {})", point_index, screen_x, screen_y);
        self.shared.arm_capture();
        let raw = match self.timeout {
            Some(timeout) => match with_timeout(timeout, self.shared.wait_capture()).await {
                Ok(raw) => raw,
                Err(_) => {
                    self.shared.disarm_capture();
                    warn!("No press for calibration point {} within {} ms", point_index, timeout.as_millis());
                    return Err(CalibrationError::NoInput);
                }
            },
            None => self.shared.wait_capture().await,
        };

        self.record_point(point_index, ScreenPoint::new(screen_x, screen_y), raw)?;
        Ok(raw)
    }

    /// Store a known correspondence without waiting for a press.
    pub fn record_point(&mut self, point_index: usize, screen: ScreenPoint, raw: RawSample) -> Result<(), CalibrationError> {
        self.capture.record(point_index, CalibrationPair::new(screen, raw))
    }

    /// Solve the calibration from the captured points and make it the active one.
    ///
    /// The points are discarded once the new calibration is installed. On error the active
    /// calibration and the points are left unchanged.
    pub fn solve_calibration(&mut self) -> Result<CalibrationParameterSet, CalibrationError> {
        let pairs = self.capture.pairs()?;
        let parameters = match CalibrationParameterSet::from_points(&pairs) {
            Ok(parameters) => parameters,
            Err(e) => {
                warn!("Calibration points are degenerate, keeping the current calibration");
                return Err(e);
            }
        };
        self.shared.set_parameters(parameters)?;
        self.capture.clear();
        info!("New calibration installed: {:?}", parameters);
        Ok(parameters)
    }
}
