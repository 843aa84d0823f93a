//! Terminal stage delivering forwarded events to the outside.

use crossbeam::channel::{Receiver, Sender};

use super::transmission::{EventTransmission, Link};
use crate::accessibility::AccessibilityEventInfo;
use crate::input::{KeyEvent, PointerEvent};

/// An event that left the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum ForwardedEvent {
    /// Pointer sample
    Pointer(PointerEvent),
    /// Key event
    Key(KeyEvent),
    /// Accessibility event
    Accessibility(AccessibilityEventInfo),
}

/// Output stage sending everything it receives over a crossbeam channel.
#[derive(Debug)]
pub struct ChannelSink {
    link: Link,
    tx: Sender<ForwardedEvent>,
}

impl ChannelSink {
    /// Create a sink and the receiver forwarded events arrive on.
    pub fn new() -> (Self, Receiver<ForwardedEvent>) {
        let (tx, rx) = crossbeam::channel::unbounded();
        (
            Self {
                link: Link::new(),
                tx,
            },
            rx,
        )
    }

    fn send(&self, event: ForwardedEvent) {
        if self.tx.send(event).is_err() {
            tracing::debug!("Forwarded event receiver dropped");
        }
    }
}

impl EventTransmission for ChannelSink {
    fn name(&self) -> &'static str {
        "sink"
    }

    fn link(&self) -> &Link {
        &self.link
    }

    fn link_mut(&mut self) -> &mut Link {
        &mut self.link
    }

    fn on_pointer_event(&mut self, event: PointerEvent) -> bool {
        self.send(ForwardedEvent::Pointer(event));
        true
    }

    fn on_key_event(&mut self, event: KeyEvent) -> bool {
        self.send(ForwardedEvent::Key(event));
        true
    }

    fn on_accessibility_event(&mut self, event: AccessibilityEventInfo) {
        self.send(ForwardedEvent::Accessibility(event));
    }
}
