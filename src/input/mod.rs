//! Input data model: pointer samples, key events, geometry and gesture ids.

pub mod geometry;
pub mod gestures;
pub mod keyboard;
pub mod touch;

// Re-export types
pub use geometry::Point;
pub use gestures::{GestureType, SwipeDirection};
pub use keyboard::{KeyAction, KeyEvent};
pub use touch::{PointerAction, PointerEvent, PointerItem, SourceType};
