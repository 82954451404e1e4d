use core::cell::Cell;

use heapless::Vec;
use restouch::sampler::SamplerState;
use restouch::sensor::{Axis, Drive, TouchSensor};
use restouch::{RawSample, TouchDriver, TouchEvent};

// Init logger for tests
#[ctor::ctor]
pub fn init_log() {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .is_test(true)
        .try_init();
}

/// Resistive panel model.
///
/// While touched, the converter reads the touch position of the selected axis. A released panel
/// reads zero since the excitation grounds the sensed plate.
pub struct PanelSensor<'a> {
    touch: &'a Cell<Option<RawSample>>,
    channel: Axis,
}

impl<'a> PanelSensor<'a> {
    pub fn new(touch: &'a Cell<Option<RawSample>>) -> Self {
        Self { touch, channel: Axis::X }
    }
}

impl TouchSensor for PanelSensor<'_> {
    fn configure_electrode_drive(&mut self, _axis: Axis, _drive: Drive) {}

    fn select_channel(&mut self, axis: Axis) {
        self.channel = axis;
    }

    fn read_converted_sample(&mut self) -> u16 {
        match (self.touch.get(), self.channel) {
            (Some(raw), Axis::X) => raw.x,
            (Some(raw), Axis::Y) => raw.y,
            (None, _) => 0,
        }
    }
}

/// Run the sampler for `samples` complete acquisition cycles.
pub fn run_cycles<S: TouchSensor>(driver: &mut TouchDriver<'_, S>, samples: usize) {
    if driver.sampler_state() == SamplerState::Init {
        // Electrode setup only
        driver.on_sample_ready();
    }
    for _ in 0..samples * 4 {
        driver.on_sample_ready();
    }
}

/// Touch the panel at `raw` for `hold` cycles, then release it for `release` cycles.
pub fn tap<S: TouchSensor>(
    driver: &mut TouchDriver<'_, S>,
    panel: &Cell<Option<RawSample>>,
    raw: RawSample,
    hold: usize,
    release: usize,
) {
    panel.set(Some(raw));
    run_cycles(driver, hold);
    panel.set(None);
    run_cycles(driver, release);
}

pub type EventLog = Vec<TouchEvent, 64>;
