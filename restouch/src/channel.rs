//! Exposed channels which can be used to share touch events across tasks

use embassy_sync::channel::Channel;
pub use embassy_sync::{blocking_mutex, channel, signal};
use restouch_types::TouchEvent;

use crate::{RawMutex, TOUCH_EVENT_CHANNEL_SIZE};

/// Channel for debounced touch events.
///
/// Register `TOUCH_EVENT_CHANNEL.sender()` as the driver's event handler to consume events from
/// an async task.
pub static TOUCH_EVENT_CHANNEL: Channel<RawMutex, TouchEvent, TOUCH_EVENT_CHANNEL_SIZE> = Channel::new();
