//! Accessibility events passed along the pipeline.

use serde::{Deserialize, Serialize};

use crate::input::GestureType;

/// Accessibility event types.
///
/// Codes match the accessibility framework's event type bit flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u32)]
pub enum EventType {
    Invalid = 0,
    ViewClicked = 0x0000_0001,
    ViewLongClicked = 0x0000_0002,
    ViewSelected = 0x0000_0004,
    ViewFocused = 0x0000_0008,
    ViewTextUpdate = 0x0000_0010,
    PageStateUpdate = 0x0000_0020,
    NotificationUpdate = 0x0000_0040,
    ViewHoverEnter = 0x0000_0080,
    ViewHoverExit = 0x0000_0100,
    TouchGuideGestureBegin = 0x0000_0200,
    TouchGuideGestureEnd = 0x0000_0400,
    PageContentUpdate = 0x0000_0800,
    ViewScrolled = 0x0000_1000,
    ViewTextSelectionUpdate = 0x0000_2000,
    PublicNotice = 0x0000_4000,
    ViewAccessibilityFocused = 0x0000_8000,
    ViewAccessibilityFocusCleared = 0x0001_0000,
    ViewTextMoveUnit = 0x0002_0000,
    TouchGuideBegin = 0x0004_0000,
    TouchGuideEnd = 0x0008_0000,
    TouchBegin = 0x0010_0000,
    TouchEnd = 0x0020_0000,
    WindowUpdate = 0x0040_0000,
    Interrupt = 0x0080_0000,
    Gesture = 0x0100_0000,
}

impl EventType {
    /// Bit flag of this event type.
    pub fn code(self) -> u32 {
        self as u32
    }
}

/// An accessibility event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessibilityEventInfo {
    /// Event type
    pub event_type: EventType,
    /// Gesture id for `EventType::Gesture`
    pub gesture_type: GestureType,
    /// Timestamp in microseconds
    pub timestamp: u64,
}

impl AccessibilityEventInfo {
    /// Create an event of the given type.
    pub fn new(event_type: EventType, timestamp: u64) -> Self {
        Self {
            event_type,
            gesture_type: GestureType::Invalid,
            timestamp,
        }
    }

    /// Create a gesture event.
    pub fn gesture(gesture_type: GestureType, timestamp: u64) -> Self {
        Self {
            event_type: EventType::Gesture,
            gesture_type,
            timestamp,
        }
    }
}
