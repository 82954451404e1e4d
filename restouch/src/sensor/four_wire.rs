use embedded_hal::digital::OutputPin;

use super::{Axis, Drive, TouchSensor};

/// Panel electrode pin that can be switched between a driven output and an analog input.
pub trait ElectrodePin: OutputPin {
    fn set_as_output(&mut self);

    /// Disconnect the digital driver so the pin can be sampled by the ADC.
    fn set_as_analog(&mut self);
}

/// ADC channel wired to the panel's sense electrodes.
pub trait AdcChannel {
    type Error;

    /// Route the next conversion to the electrode that carries the `axis` position.
    fn select(&mut self, axis: Axis);

    fn read(&mut self) -> Result<u16, Self::Error>;
}

/// Four-wire resistive panel on four GPIO electrodes and one ADC.
pub struct FourWireSensor<XP, XN, YP, YN, ADC>
where
    XP: ElectrodePin,
    XN: ElectrodePin,
    YP: ElectrodePin,
    YN: ElectrodePin,
    ADC: AdcChannel,
{
    xp: XP,
    xn: XN,
    yp: YP,
    yn: YN,
    adc: ADC,
}

impl<XP, XN, YP, YN, ADC> FourWireSensor<XP, XN, YP, YN, ADC>
where
    XP: ElectrodePin,
    XN: ElectrodePin,
    YP: ElectrodePin,
    YN: ElectrodePin,
    ADC: AdcChannel,
{
    pub fn new(xp: XP, xn: XN, yp: YP, yn: YN, adc: ADC) -> Self {
        Self { xp, xn, yp, yn, adc }
    }

    /// Release the pins and the converter.
    pub fn release(self) -> (XP, XN, YP, YN, ADC) {
        (self.xp, self.xn, self.yp, self.yn, self.adc)
    }

    fn excite(&mut self, axis: Axis) {
        self.xp.set_as_output();
        self.xn.set_as_output();
        self.yp.set_as_output();
        self.yn.set_as_output();

        // Only the positive electrode of the excited plate is high
        match axis {
            Axis::X => {
                self.xp.set_high().ok();
                self.yp.set_low().ok();
            }
            Axis::Y => {
                self.xp.set_low().ok();
                self.yp.set_high().ok();
            }
        }
        self.xn.set_low().ok();
        self.yn.set_low().ok();
    }

    fn float_sense_plate(&mut self, axis: Axis) {
        match axis.sense_plate() {
            Axis::X => {
                self.xp.set_as_analog();
                self.xn.set_as_analog();
            }
            Axis::Y => {
                self.yp.set_as_analog();
                self.yn.set_as_analog();
            }
        }
    }
}

impl<XP, XN, YP, YN, ADC> TouchSensor for FourWireSensor<XP, XN, YP, YN, ADC>
where
    XP: ElectrodePin,
    XN: ElectrodePin,
    YP: ElectrodePin,
    YN: ElectrodePin,
    ADC: AdcChannel,
{
    fn configure_electrode_drive(&mut self, axis: Axis, drive: Drive) {
        match drive {
            Drive::Excite => self.excite(axis),
            Drive::Sense => self.float_sense_plate(axis),
        }
    }

    fn select_channel(&mut self, axis: Axis) {
        self.adc.select(axis);
    }

    fn read_converted_sample(&mut self) -> u16 {
        match self.adc.read() {
            Ok(value) => value,
            Err(_) => {
                warn!("Touch ADC conversion failed, reading as no contact");
                0
            }
        }
    }
}
