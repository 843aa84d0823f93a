//! Accessibility collaborators of the touch pipeline.
//!
//! This module provides:
//! - Accessibility event info carried through the pipeline
//! - Display metrics and the pixel thresholds derived from them

pub mod display;
pub mod event;

// Re-export primary types
pub use display::{DisplayMetrics, DisplayMetricsProvider, GestureThresholds};
pub use event::{AccessibilityEventInfo, EventType};
