//! Gesture path synthesis.
//!
//! Turns a polyline and a duration into the pointer samples a finger tracing
//! it would produce. Used to replay scripted gestures through a pipeline.

use serde::{Deserialize, Serialize};

use crate::input::geometry::Point;
use crate::input::{PointerAction, PointerEvent};

/// A scripted one-finger gesture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GestureInjectPath {
    /// Positions visited, in order
    pub positions: Vec<Point>,
    /// Time from first to last position in microseconds
    pub duration_us: u64,
    /// Timestamp of the first sample in microseconds
    #[serde(default)]
    pub start_time: u64,
}

impl GestureInjectPath {
    /// Create a path starting at time zero.
    pub fn new(positions: Vec<Point>, duration_us: u64) -> Self {
        Self {
            positions,
            duration_us,
            start_time: 0,
        }
    }

    /// Set the start timestamp.
    pub fn with_start_time(mut self, start_time: u64) -> Self {
        self.start_time = start_time;
        self
    }

    /// Timestamp of the last sample.
    pub fn end_time(&self) -> u64 {
        self.start_time.saturating_add(self.duration_us)
    }

    /// Synthesize the pointer samples for this path.
    ///
    /// A single position yields a tap: a down at the start time and an up at
    /// the end time. Longer paths yield a down at the first position, one
    /// evenly timed move per later position and an up at the last position.
    pub fn to_events(&self) -> Vec<PointerEvent> {
        let Some((&first, rest)) = self.positions.split_first() else {
            return Vec::new();
        };

        let mut events = Vec::with_capacity(self.positions.len() + 1);
        events.push(PointerEvent::touch(PointerAction::Down, first.x, first.y, self.start_time));

        let steps = rest.len() as u64;
        for (i, point) in rest.iter().enumerate() {
            let offset = if steps == 0 {
                0
            } else {
                (u128::from(self.duration_us) * (i as u128 + 1) / u128::from(steps)) as u64
            };
            events.push(PointerEvent::touch(
                PointerAction::Move,
                point.x,
                point.y,
                self.start_time.saturating_add(offset),
            ));
        }

        let last = rest.last().copied().unwrap_or(first);
        events.push(PointerEvent::touch(PointerAction::Up, last.x, last.y, self.end_time()));
        events
    }
}
