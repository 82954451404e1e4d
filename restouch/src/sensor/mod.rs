//! The analog front end of a resistive touch panel.
//!
//! The driver never touches the peripherals directly. It sequences them through
//! [`TouchSensor`], one call batch per sample-ready interrupt.

mod four_wire;

pub use four_wire::{AdcChannel, ElectrodePin, FourWireSensor};

/// Panel axis
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    /// The plate that is sampled while this axis is being measured.
    pub fn sense_plate(self) -> Axis {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::X,
        }
    }
}

/// Electrode configuration used when measuring an axis
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Drive {
    /// Put a voltage gradient across the axis plate and ground both electrodes of the other
    /// plate, discharging it so a released panel reads low.
    Excite,
    /// Release the electrodes of the other plate so the converter can sample it.
    Sense,
}

/// Peripheral capability consumed by the sampler.
pub trait TouchSensor {
    /// Configure the four electrodes for measuring `axis`.
    fn configure_electrode_drive(&mut self, axis: Axis, drive: Drive);

    /// Route the converter to the electrode carrying the `axis` position.
    fn select_channel(&mut self, axis: Axis);

    /// Read the latest conversion.
    ///
    /// There is no error path: a failed conversion must read as a value below the contact
    /// threshold.
    fn read_converted_sample(&mut self) -> u16;
}
