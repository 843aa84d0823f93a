//! Key events travelling through the pipeline.
//!
//! No stage interprets keys; they are carried so every stage exposes the
//! same hooks and key traffic reaches the output unchanged.

use serde::{Deserialize, Serialize};

/// Key action types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyAction {
    /// Key pressed
    Down,
    /// Key released
    Up,
    /// Key stream aborted
    Cancel,
}

/// A key event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
    /// Platform key code
    pub key_code: i32,
    /// Action
    pub action: KeyAction,
    /// Monotonic timestamp in microseconds
    pub action_time: u64,
}

impl KeyEvent {
    /// Create a new key event.
    pub fn new(key_code: i32, action: KeyAction, action_time: u64) -> Self {
        Self {
            key_code,
            action,
            action_time,
        }
    }
}
