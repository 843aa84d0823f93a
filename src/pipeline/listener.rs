//! Gesture listener contract and a channel-backed implementation.

use crossbeam::channel::{Receiver, Sender};

use crate::input::{GestureType, PointerEvent};

/// Receiver of recognizer decisions.
///
/// Hooks are called on the pipeline worker while a sample or timer is being
/// processed, so implementations should return quickly.
pub trait GestureListener: Send + Sync {
    /// A swipe has started.
    fn on_started(&self);

    /// A gesture was recognized.
    fn on_completed(&self, gesture: GestureType);

    /// The interaction was abandoned. `event` is the last sample seen.
    fn on_cancelled(&self, event: &PointerEvent);

    /// A double tap was recognized. `event` is the closing up.
    fn on_double_tap(&self, event: &PointerEvent);

    /// The finger stayed down past the long-press timeout. `event` is the down.
    fn on_long_press(&self, _event: &PointerEvent) {}
}

/// A recognizer decision as a value.
#[derive(Debug, Clone, PartialEq)]
pub enum GestureEvent {
    /// A swipe started
    Started,
    /// A gesture completed
    Completed(GestureType),
    /// Interaction cancelled, with the last sample
    Cancelled(PointerEvent),
    /// Double tap, with the closing up
    DoubleTap(PointerEvent),
    /// Long press, with the down
    LongPress(PointerEvent),
}

impl std::fmt::Display for GestureEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GestureEvent::Started => write!(f, "started"),
            GestureEvent::Completed(gesture) => write!(f, "completed {}", gesture),
            GestureEvent::Cancelled(event) => write!(f, "cancelled at {}us", event.action_time()),
            GestureEvent::DoubleTap(event) => write!(f, "double tap at {}us", event.action_time()),
            GestureEvent::LongPress(event) => write!(f, "long press at {}us", event.action_time()),
        }
    }
}

/// Listener that sends every decision over a crossbeam channel.
#[derive(Debug, Clone)]
pub struct ChannelGestureListener {
    tx: Sender<GestureEvent>,
}

impl ChannelGestureListener {
    /// Create a listener and the receiver its events arrive on.
    pub fn new() -> (Self, Receiver<GestureEvent>) {
        let (tx, rx) = crossbeam::channel::unbounded();
        (Self { tx }, rx)
    }

    fn send(&self, event: GestureEvent) {
        if self.tx.send(event).is_err() {
            tracing::debug!("Gesture receiver dropped");
        }
    }
}

impl GestureListener for ChannelGestureListener {
    fn on_started(&self) {
        self.send(GestureEvent::Started);
    }

    fn on_completed(&self, gesture: GestureType) {
        self.send(GestureEvent::Completed(gesture));
    }

    fn on_cancelled(&self, event: &PointerEvent) {
        self.send(GestureEvent::Cancelled(event.clone()));
    }

    fn on_double_tap(&self, event: &PointerEvent) {
        self.send(GestureEvent::DoubleTap(event.clone()));
    }

    fn on_long_press(&self, event: &PointerEvent) {
        self.send(GestureEvent::LongPress(event.clone()));
    }
}
