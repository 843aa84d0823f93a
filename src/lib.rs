//! A11y Touch - Accessibility touch-event interpretation
//!
//! Turns a raw stream of touch-pointer samples into accessibility gestures.
//! Samples pass through a click-timing filter (click response delay and
//! repeat-click suppression) and a one-finger gesture recognizer (tap, double
//! tap, long press, directional and two-segment swipes).

pub mod accessibility;
pub mod input;
pub mod pipeline;
pub mod storage;

// Re-export commonly used types
pub use accessibility::{DisplayMetrics, DisplayMetricsProvider};
pub use input::{GestureType, PointerAction, PointerEvent, PointerItem, SourceType};
pub use pipeline::{GestureListener, Pipeline, PipelineBuilder, PipelineError, PipelineWorker};
pub use storage::config::AppConfig;
