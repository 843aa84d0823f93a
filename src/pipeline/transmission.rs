//! Event transmission link.
//!
//! Every pipeline stage implements [`EventTransmission`]. Each stage owns its
//! successor through a [`Link`]; the default hooks forward unchanged.

use crate::accessibility::AccessibilityEventInfo;
use crate::input::{KeyEvent, PointerEvent, SourceType};

/// Owned successor slot of a stage.
#[derive(Default)]
pub struct Link {
    next: Option<Box<dyn EventTransmission>>,
}

impl std::fmt::Debug for Link {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Link")
            .field("next", &self.next.as_ref().map(|n| n.name()))
            .finish()
    }
}

impl Link {
    /// Create an empty link.
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the successor, returning the previous one.
    pub fn set_next(&mut self, next: Box<dyn EventTransmission>) -> Option<Box<dyn EventTransmission>> {
        self.next.replace(next)
    }

    /// Successor, if any.
    pub fn next(&self) -> Option<&dyn EventTransmission> {
        self.next.as_deref()
    }

    /// Mutable successor, if any.
    pub fn next_mut(&mut self) -> Option<&mut (dyn EventTransmission + 'static)> {
        self.next.as_deref_mut()
    }

    /// Forward a pointer sample. Returns `false` when there is no successor.
    pub fn forward_pointer(&mut self, event: PointerEvent) -> bool {
        match self.next.as_deref_mut() {
            Some(next) => next.on_pointer_event(event),
            None => false,
        }
    }

    /// Forward a key event. Returns `false` when there is no successor.
    pub fn forward_key(&mut self, event: KeyEvent) -> bool {
        match self.next.as_deref_mut() {
            Some(next) => next.on_key_event(event),
            None => false,
        }
    }

    /// Forward an accessibility event.
    pub fn forward_accessibility(&mut self, event: AccessibilityEventInfo) {
        if let Some(next) = self.next.as_deref_mut() {
            next.on_accessibility_event(event);
        }
    }

    /// Forward a clock advance.
    pub fn forward_time(&mut self, now_us: u64) {
        if let Some(next) = self.next.as_deref_mut() {
            next.on_time_advanced(now_us);
        }
    }

    /// Earliest deadline of the stages after this link.
    pub fn next_deadline(&self) -> Option<u64> {
        self.next.as_deref().and_then(|n| n.next_deadline())
    }

    /// Forward a clear request.
    pub fn forward_clear(&mut self, source: SourceType) {
        if let Some(next) = self.next.as_deref_mut() {
            next.clear_events(source);
        }
    }

    /// Forward a destroy request.
    pub fn forward_destroy(&mut self) {
        if let Some(next) = self.next.as_deref_mut() {
            next.destroy_events();
        }
    }
}

/// A stage of the event pipeline.
///
/// Returning `true` from a sample hook means the stage took responsibility for
/// the sample; `false` means it was forwarded by default.
pub trait EventTransmission: Send {
    /// Stage name used in logs.
    fn name(&self) -> &'static str;

    /// Successor slot.
    fn link(&self) -> &Link;

    /// Mutable successor slot.
    fn link_mut(&mut self) -> &mut Link;

    /// Handle a pointer sample.
    fn on_pointer_event(&mut self, event: PointerEvent) -> bool {
        self.link_mut().forward_pointer(event);
        false
    }

    /// Handle a key event.
    fn on_key_event(&mut self, event: KeyEvent) -> bool {
        self.link_mut().forward_key(event);
        false
    }

    /// Handle an accessibility event.
    fn on_accessibility_event(&mut self, event: AccessibilityEventInfo) {
        self.link_mut().forward_accessibility(event);
    }

    /// The pipeline clock reached `now_us`; fire due timers.
    fn on_time_advanced(&mut self, now_us: u64) {
        self.link_mut().forward_time(now_us);
    }

    /// Earliest timer deadline of this stage and its successors.
    fn next_deadline(&self) -> Option<u64> {
        self.link().next_deadline()
    }

    /// Drop in-flight state for samples of `source`.
    fn clear_events(&mut self, source: SourceType) {
        self.link_mut().forward_clear(source);
    }

    /// Release all state and cancel timers.
    fn destroy_events(&mut self) {
        self.link_mut().forward_destroy();
    }

    /// Install the successor of this stage.
    fn set_next(&mut self, next: Box<dyn EventTransmission>) {
        self.link_mut().set_next(next);
    }
}

/// Stage that forwards everything unchanged.
#[derive(Debug, Default)]
pub struct PassThrough {
    link: Link,
}

impl PassThrough {
    /// Create a pass-through stage.
    pub fn new() -> Self {
        Self::default()
    }
}

impl EventTransmission for PassThrough {
    fn name(&self) -> &'static str {
        "pass-through"
    }

    fn link(&self) -> &Link {
        &self.link
    }

    fn link_mut(&mut self) -> &mut Link {
        &mut self.link
    }
}
