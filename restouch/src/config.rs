use embassy_time::Duration;

use crate::DEFAULT_TOUCH_MIN;
use crate::calibration::{CalibrationParameterSet, HardwareVariant, Orientation};

/// Configurations for the touch driver
#[derive(Clone, Copy, Debug)]
pub struct TouchConfig {
    /// Lowest raw reading on both axes that counts as contact
    pub touch_min: u16,
    pub orientation: Orientation,
    pub variant: HardwareVariant,
    /// Interval of [`TouchDriver::run`](crate::driver::TouchDriver::run), one conversion per tick
    pub sample_period: Duration,
    /// Give up a calibration capture after this long, `None` waits forever
    pub calibration_timeout: Option<Duration>,
}

impl Default for TouchConfig {
    fn default() -> Self {
        Self {
            touch_min: DEFAULT_TOUCH_MIN,
            orientation: Orientation::default(),
            variant: HardwareVariant::default(),
            sample_period: Duration::from_millis(1),
            calibration_timeout: None,
        }
    }
}

impl TouchConfig {
    /// Config for a panel on `variant` hardware, with the variant's contact threshold.
    pub fn for_variant(variant: HardwareVariant, orientation: Orientation) -> Self {
        Self {
            touch_min: variant.touch_min(),
            orientation,
            variant,
            ..Default::default()
        }
    }

    /// Factory calibration for the configured hardware.
    pub fn factory_parameters(&self) -> CalibrationParameterSet {
        CalibrationParameterSet::factory(self.variant, self.orientation)
    }
}
