//! The touch driver, run from the sampling context.
use core::cell::Cell;
use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::signal::Signal;
use embassy_time::{Duration, Ticker};
use restouch_types::{PointerMessage, RawSample, ScreenPoint, TouchEvent};

use crate::RawMutex;
use crate::calibration::{CalibrationError, CalibrationParameterSet};
use crate::config::TouchConfig;
use crate::debounce::{PenDebouncer, PenState};
use crate::event::TouchEventHandler;
use crate::sampler::{AnalogSampler, SamplerState};
use crate::sensor::TouchSensor;
use crate::transform::map_sample;

/// State shared between the sampling context and the calibration task.
///
/// Can be placed in a `static`:
///
/// ```ignore
/// static TOUCH: TouchShared = TouchShared::new(CalibrationParameterSet::factory(
///     HardwareVariant::Standard,
///     Orientation::Landscape,
/// ));
/// ```
pub struct TouchShared {
    /// The next accepted press is captured for calibration
    capture_armed: AtomicBool,
    /// Bumped every time a capture is armed, so a press latched for an abandoned capture can't
    /// complete a later one
    capture_generation: AtomicU32,
    captured: Signal<RawMutex, RawSample>,
    parameters: Mutex<RawMutex, Cell<CalibrationParameterSet>>,
}

impl TouchShared {
    pub const fn new(parameters: CalibrationParameterSet) -> Self {
        Self {
            capture_armed: AtomicBool::new(false),
            capture_generation: AtomicU32::new(0),
            captured: Signal::new(),
            parameters: Mutex::new(Cell::new(parameters)),
        }
    }

    /// The active calibration.
    pub fn parameters(&self) -> CalibrationParameterSet {
        self.parameters.lock(|p| p.get())
    }

    /// Replace the active calibration. A set with a zero divisor is rejected.
    pub fn set_parameters(&self, parameters: CalibrationParameterSet) -> Result<(), CalibrationError> {
        if !parameters.is_valid() {
            return Err(CalibrationError::Degenerate);
        }
        self.parameters.lock(|p| p.set(parameters));
        Ok(())
    }

    pub fn is_capture_armed(&self) -> bool {
        self.capture_armed.load(Ordering::Acquire)
    }

    pub(crate) fn arm_capture(&self) {
        // Drop a capture that completed after its waiter gave up
        self.captured.reset();
        // Only the calibration task arms, so load + store is enough
        let generation = self.capture_generation.load(Ordering::Relaxed).wrapping_add(1);
        self.capture_generation.store(generation, Ordering::Release);
        self.capture_armed.store(true, Ordering::Release);
    }

    pub(crate) fn disarm_capture(&self) {
        self.capture_armed.store(false, Ordering::Release);
    }

    pub(crate) async fn wait_capture(&self) -> RawSample {
        self.captured.wait().await
    }

    /// Generation of the capture that is currently armed.
    fn armed_generation(&self) -> Option<u32> {
        if self.is_capture_armed() {
            Some(self.capture_generation.load(Ordering::Acquire))
        } else {
            None
        }
    }

    /// Hand `raw` to the waiting calibration task if capture `generation` is still armed.
    fn complete_capture(&self, generation: u32, raw: RawSample) -> bool {
        if self.armed_generation() != Some(generation) {
            return false;
        }
        // The point must be visible before the flag drops
        self.captured.signal(raw);
        self.capture_armed.store(false, Ordering::Release);
        true
    }
}

impl Default for TouchShared {
    fn default() -> Self {
        Self::new(CalibrationParameterSet::default())
    }
}

/// Where the events of the current press go, decided when the press starts
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PressRoute {
    Handler,
    /// Captured for the calibration armed as this generation
    Capture(u32),
    /// The capture this press was latched for was abandoned
    Discard,
}

/// Resistive touch panel driver.
///
/// Owns the sensor and all per-press state. Call [`TouchDriver::on_sample_ready`] from the
/// sample-ready interrupt, or let [`TouchDriver::run`] poll it from a ticker.
pub struct TouchDriver<'a, S: TouchSensor> {
    sensor: S,
    sampler: AnalogSampler,
    debouncer: PenDebouncer,
    shared: &'a TouchShared,
    handler: Option<&'a mut dyn TouchEventHandler>,
    touch_min: u16,
    sample_period: Duration,
    route: PressRoute,
}

impl<'a, S: TouchSensor> TouchDriver<'a, S> {
    pub fn new(sensor: S, shared: &'a TouchShared, config: &TouchConfig) -> Self {
        Self {
            sensor,
            sampler: AnalogSampler::new(),
            debouncer: PenDebouncer::new(),
            shared,
            handler: None,
            touch_min: config.touch_min,
            sample_period: config.sample_period,
            route: PressRoute::Handler,
        }
    }

    /// Register the event handler, replacing the previous one.
    pub fn set_event_handler(&mut self, handler: &'a mut dyn TouchEventHandler) {
        self.handler = Some(handler);
    }

    pub fn clear_event_handler(&mut self) {
        self.handler = None;
    }

    /// Lowest raw reading on both axes that counts as contact.
    pub fn set_touch_min(&mut self, touch_min: u16) {
        self.touch_min = touch_min;
    }

    pub fn touch_min(&self) -> u16 {
        self.touch_min
    }

    pub fn pen_state(&self) -> PenState {
        self.debouncer.state()
    }

    pub fn sampler_state(&self) -> SamplerState {
        self.sampler.state()
    }

    pub fn shared(&self) -> &'a TouchShared {
        self.shared
    }

    /// Give the sensor back, dropping the driver.
    pub fn release(self) -> S {
        self.sensor
    }

    /// Advance the acquisition by one conversion. Never blocks.
    pub fn on_sample_ready(&mut self) {
        if let Some(raw) = self.sampler.step(&mut self.sensor) {
            self.process_sample(raw);
        }
    }

    /// Threshold, transform and debounce one raw pair, then deliver the resulting event.
    pub fn process_sample(&mut self, raw: RawSample) {
        let mut contact = raw.x >= self.touch_min && raw.y >= self.touch_min;

        // Capture mode only changes between presses
        if !self.debouncer.is_pressed() {
            self.route = match self.shared.armed_generation() {
                Some(generation) => PressRoute::Capture(generation),
                None => PressRoute::Handler,
            };
        }

        let parameters = self.shared.parameters();
        let capturing = self.route != PressRoute::Handler;
        let point = match map_sample(&parameters, raw, capturing) {
            Some(point) => point,
            None => {
                // Off the representable screen, same as no contact
                if contact {
                    warn!("Sample {:?} maps outside the screen range", raw);
                }
                contact = false;
                ScreenPoint::default()
            }
        };

        let Some(event) = self.debouncer.update(point, contact) else {
            return;
        };

        match self.route {
            PressRoute::Handler => self.dispatch(event),
            PressRoute::Capture(generation) => {
                if self.shared.armed_generation() != Some(generation) {
                    debug!("Calibration capture abandoned, dropping the rest of the press");
                    self.route = PressRoute::Discard;
                } else if event.message == PointerMessage::Up {
                    // Passthrough coordinates are raw sensor units
                    let captured = RawSample::new(event.point.x as u16, event.point.y as u16);
                    if self.shared.complete_capture(generation, captured) {
                        debug!("Calibration press captured at {:?}", captured);
                    }
                }
            }
            PressRoute::Discard => {}
        }
    }

    fn dispatch(&mut self, event: TouchEvent) {
        trace!("Touch event: {:?}", event);
        if let Some(handler) = self.handler.as_mut() {
            handler.on_event(event);
        }
    }

    /// Poll the sampler every `sample_period`.
    ///
    /// For targets without a sample-ready interrupt.
    pub async fn run(&mut self) -> ! {
        info!("Touch driver running, sample period {} us", self.sample_period.as_micros());
        let mut ticker = Ticker::every(self.sample_period);
        loop {
            ticker.next().await;
            self.on_sample_ready();
        }
    }
}
