//! Pointer samples as delivered by the upstream input source.
//!
//! A sample describes one action of one pointer (the acting pointer) and carries
//! the current position of every pointer in contact at that instant.

use serde::{Deserialize, Serialize};

use super::geometry::Point;

/// Pointer action types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerAction {
    /// A pointer made contact
    Down,
    /// A pointer in contact moved
    Move,
    /// A pointer lifted
    Up,
    /// The input source aborted the stream
    Cancel,
}

impl std::fmt::Display for PointerAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PointerAction::Down => write!(f, "down"),
            PointerAction::Move => write!(f, "move"),
            PointerAction::Up => write!(f, "up"),
            PointerAction::Cancel => write!(f, "cancel"),
        }
    }
}

/// Device class that produced a sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    /// Direct touch screen
    #[default]
    Touchscreen,
    /// Mouse
    Mouse,
    /// Indirect touch pad
    Touchpad,
    /// Joystick or game pad
    Joystick,
}

/// Position of one pointer within a sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerItem {
    /// Pointer id, stable for the duration of contact
    pub id: i32,
    /// Display X coordinate
    pub display_x: f32,
    /// Display Y coordinate
    pub display_y: f32,
}

impl PointerItem {
    /// Create a new pointer item.
    pub fn new(id: i32, display_x: f32, display_y: f32) -> Self {
        Self {
            id,
            display_x,
            display_y,
        }
    }

    /// Position as a point.
    pub fn position(&self) -> Point {
        Point::new(self.display_x, self.display_y)
    }
}

/// One observed touch-contact frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    /// Id of the pointer this action refers to
    pointer_id: i32,
    /// Action of the acting pointer
    action: PointerAction,
    /// Device class
    #[serde(default)]
    source: SourceType,
    /// Monotonic timestamp in microseconds
    action_time: u64,
    /// Every pointer in contact, including the acting one
    items: Vec<PointerItem>,
}

impl PointerEvent {
    /// Create a sample with no pointer items.
    pub fn new(pointer_id: i32, action: PointerAction, source: SourceType, action_time: u64) -> Self {
        Self {
            pointer_id,
            action,
            source,
            action_time,
            items: Vec::new(),
        }
    }

    /// Create a single-finger touchscreen sample.
    pub fn touch(action: PointerAction, x: f32, y: f32, action_time: u64) -> Self {
        Self::new(0, action, SourceType::Touchscreen, action_time).with_item(PointerItem::new(0, x, y))
    }

    /// Add a pointer item.
    pub fn with_item(mut self, item: PointerItem) -> Self {
        self.add_item(item);
        self
    }

    /// Add a pointer item, replacing an existing item with the same id.
    pub fn add_item(&mut self, item: PointerItem) {
        match self.items.iter_mut().find(|i| i.id == item.id) {
            Some(existing) => *existing = item,
            None => self.items.push(item),
        }
    }

    /// Id of the acting pointer.
    pub fn pointer_id(&self) -> i32 {
        self.pointer_id
    }

    /// Action of the acting pointer.
    pub fn action(&self) -> PointerAction {
        self.action
    }

    /// Rewrite the action, used when a stage synthesizes a down from a later sample.
    pub fn set_action(&mut self, action: PointerAction) {
        self.action = action;
    }

    /// Source device class.
    pub fn source(&self) -> SourceType {
        self.source
    }

    /// Timestamp in microseconds.
    pub fn action_time(&self) -> u64 {
        self.action_time
    }

    /// Rewrite the timestamp.
    pub fn set_action_time(&mut self, action_time: u64) {
        self.action_time = action_time;
    }

    /// Number of pointers in contact.
    pub fn pointer_count(&self) -> usize {
        self.items.len()
    }

    /// All pointer items.
    pub fn items(&self) -> &[PointerItem] {
        &self.items
    }

    /// Item for the given pointer id.
    pub fn pointer_item(&self, id: i32) -> Option<&PointerItem> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Item for the acting pointer. `None` marks a malformed sample.
    pub fn acting_item(&self) -> Option<&PointerItem> {
        self.pointer_item(self.pointer_id)
    }

    /// Position of the acting pointer.
    pub fn position(&self) -> Option<Point> {
        self.acting_item().map(PointerItem::position)
    }
}
