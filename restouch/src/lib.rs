//! ## Feature flags
#![doc = document_features::document_features!()]
#![no_std]

// This mod MUST go first, so that the others see its macros.
pub(crate) mod fmt;

pub mod calibration;
pub mod channel;
pub mod config;
pub mod debounce;
pub mod driver;
pub mod event;
pub mod sampler;
pub mod sensor;
pub mod transform;

pub use calibration::{CalibrationError, CalibrationParameterSet, Calibrator, HardwareVariant, Orientation};
pub use config::TouchConfig;
pub use driver::{TouchDriver, TouchShared};
pub use event::TouchEventHandler;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
pub use restouch_types::{PointerMessage, RawSample, ScreenPoint, TouchEvent};
pub use {embassy_futures, embassy_sync, embassy_time, heapless, restouch_types};

/// Lowest raw reading on both axes that counts as contact
pub const DEFAULT_TOUCH_MIN: u16 = 150;
/// Consecutive samples with the same verdict needed to change the pen state
pub const DEBOUNCE_COUNT: u8 = 3;
/// Samples held back while the pen is down
pub const SAMPLE_QUEUE_DEPTH: usize = 4;
/// Correspondences needed to solve a calibration
pub const CALIBRATION_POINTS: usize = 3;
/// Capacity of `TOUCH_EVENT_CHANNEL`
pub const TOUCH_EVENT_CHANNEL_SIZE: usize = 16;

pub type RawMutex = CriticalSectionRawMutex;
