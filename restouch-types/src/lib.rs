//! # restouch types
//!
//! Plain data types shared between the restouch driver and host-side tooling.
//!
//! ## Modules
//!
//! - [`point`] - Raw sensor samples and screen coordinates
//! - [`event`] - Pointer events emitted by the touch driver

#![no_std]

pub mod event;
pub mod point;

pub use event::{PointerMessage, TouchEvent};
pub use point::{RawSample, ScreenPoint};
