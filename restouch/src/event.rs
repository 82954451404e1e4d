//! Delivery of touch events.
use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::channel::Sender;
pub use restouch_types::{PointerMessage, TouchEvent};

/// Receiver of debounced touch events.
///
/// Called synchronously from the sampling context, so implementations must not block.
pub trait TouchEventHandler {
    fn on_event(&mut self, event: TouchEvent);
}

impl<F: FnMut(TouchEvent)> TouchEventHandler for F {
    fn on_event(&mut self, event: TouchEvent) {
        self(event)
    }
}

/// Forward events to a channel, dropping them when the channel is full.
impl<M: RawMutex, const N: usize> TouchEventHandler for Sender<'_, M, TouchEvent, N> {
    fn on_event(&mut self, event: TouchEvent) {
        if self.try_send(event).is_err() {
            warn!("Touch event channel full, dropping {:?}", event);
        }
    }
}

/// Handler that discards every event
pub struct NoopHandler;

impl TouchEventHandler for NoopHandler {
    fn on_event(&mut self, _event: TouchEvent) {}
}
