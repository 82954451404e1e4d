//! Acquisition cycle of a four-wire resistive panel.
//!
//! Each axis measurement switches the electrode excitation, and the first conversion after a
//! switch is taken before the panel voltage has settled. The sampler therefore runs two
//! conversions per axis and keeps the second one:
//!
//! ```text
//! Init -> SkipX -> ReadX -> SkipY -> ReadY -+
//!           ^                               |
//!           +-------------------------------+
//! ```
//!
//! `ReadY` shares its electrode setup with `Init`, which is where a completed pair is handed out.
use restouch_types::RawSample;

use crate::sensor::{Axis, Drive, TouchSensor};

/// Step of the acquisition cycle, named after the conversion the next interrupt delivers
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SamplerState {
    Init,
    SkipX,
    ReadX,
    SkipY,
    ReadY,
}

pub struct AnalogSampler {
    state: SamplerState,
    x: u16,
    y: u16,
}

impl Default for AnalogSampler {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalogSampler {
    pub const fn new() -> Self {
        Self {
            state: SamplerState::Init,
            x: 0,
            y: 0,
        }
    }

    pub fn state(&self) -> SamplerState {
        self.state
    }

    /// Restart the cycle from `Init`, dropping any half-read pair.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Advance the cycle by one conversion.
    ///
    /// Returns the raw pair when this call completes a cycle.
    pub fn step<S: TouchSensor>(&mut self, sensor: &mut S) -> Option<RawSample> {
        match self.state {
            SamplerState::SkipX => {
                // Settling conversion
                sensor.read_converted_sample();
                sensor.configure_electrode_drive(Axis::X, Drive::Sense);
                self.state = SamplerState::ReadX;
                None
            }
            SamplerState::ReadX => {
                self.x = sensor.read_converted_sample();
                sensor.configure_electrode_drive(Axis::Y, Drive::Excite);
                sensor.select_channel(Axis::Y);
                self.state = SamplerState::SkipY;
                None
            }
            SamplerState::SkipY => {
                sensor.read_converted_sample();
                sensor.configure_electrode_drive(Axis::Y, Drive::Sense);
                self.state = SamplerState::ReadY;
                None
            }
            SamplerState::ReadY | SamplerState::Init => {
                let sample = if self.state == SamplerState::ReadY {
                    self.y = sensor.read_converted_sample();
                    Some(RawSample::new(self.x, self.y))
                } else {
                    None
                };
                sensor.configure_electrode_drive(Axis::X, Drive::Excite);
                sensor.select_channel(Axis::X);
                self.state = SamplerState::SkipX;
                sample
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use heapless::Vec;

    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Call {
        Drive(Axis, Drive),
        Select(Axis),
        Read,
    }

    /// Returns 100 + n for the n-th conversion and records every call.
    struct RecordingSensor {
        calls: Vec<Call, 128>,
        conversions: u16,
    }

    impl RecordingSensor {
        fn new() -> Self {
            Self {
                calls: Vec::new(),
                conversions: 0,
            }
        }
    }

    impl TouchSensor for RecordingSensor {
        fn configure_electrode_drive(&mut self, axis: Axis, drive: Drive) {
            self.calls.push(Call::Drive(axis, drive)).unwrap();
        }

        fn select_channel(&mut self, axis: Axis) {
            self.calls.push(Call::Select(axis)).unwrap();
        }

        fn read_converted_sample(&mut self) -> u16 {
            self.calls.push(Call::Read).unwrap();
            self.conversions += 1;
            100 + self.conversions
        }
    }

    #[test]
    fn test_first_step_only_configures() {
        let mut sampler = AnalogSampler::new();
        let mut sensor = RecordingSensor::new();

        assert_eq!(sampler.step(&mut sensor), None);
        assert_eq!(sampler.state(), SamplerState::SkipX);
        assert_eq!(
            sensor.calls.as_slice(),
            &[Call::Drive(Axis::X, Drive::Excite), Call::Select(Axis::X)]
        );
    }

    #[test]
    fn test_cycle_discards_settling_conversions() {
        let mut sampler = AnalogSampler::new();
        let mut sensor = RecordingSensor::new();

        // Init, SkipX, ReadX, SkipY
        for _ in 0..4 {
            assert_eq!(sampler.step(&mut sensor), None);
        }
        assert_eq!(sampler.state(), SamplerState::ReadY);

        // Conversions: 101 skipped, 102 = x, 103 skipped, 104 = y
        assert_eq!(sampler.step(&mut sensor), Some(RawSample::new(102, 104)));
        assert_eq!(sampler.state(), SamplerState::SkipX);

        assert_eq!(
            sensor.calls.as_slice(),
            &[
                Call::Drive(Axis::X, Drive::Excite),
                Call::Select(Axis::X),
                Call::Read,
                Call::Drive(Axis::X, Drive::Sense),
                Call::Read,
                Call::Drive(Axis::Y, Drive::Excite),
                Call::Select(Axis::Y),
                Call::Read,
                Call::Drive(Axis::Y, Drive::Sense),
                Call::Read,
                Call::Drive(Axis::X, Drive::Excite),
                Call::Select(Axis::X),
            ]
        );
    }

    #[test]
    fn test_one_pair_per_four_conversions() {
        let mut sampler = AnalogSampler::new();
        let mut sensor = RecordingSensor::new();
        sampler.step(&mut sensor);

        let mut pairs = 0;
        for _ in 0..40 {
            if sampler.step(&mut sensor).is_some() {
                pairs += 1;
            }
        }
        assert_eq!(pairs, 10);
        assert_eq!(sensor.conversions, 40);
    }

    #[test]
    fn test_reset_drops_partial_pair() {
        let mut sampler = AnalogSampler::new();
        let mut sensor = RecordingSensor::new();
        for _ in 0..3 {
            sampler.step(&mut sensor);
        }
        sampler.reset();
        assert_eq!(sampler.state(), SamplerState::Init);
        assert_eq!(sampler.step(&mut sensor), None);
    }
}
