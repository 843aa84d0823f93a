//! One-finger gesture recognizer.
//!
//! Classifies an interaction (down to up) as a tap, double tap, long press or
//! swipe. Samples the recognizer takes ownership of are reported through the
//! [`GestureListener`] instead of being forwarded.
//!
//! Two layers run on every sample:
//! - the tap layer (tap, double tap, long press), driven by the single-tap and
//!   long-press timers
//! - the swipe layer, which records the route once the finger crosses the
//!   gesture threshold and classifies it on up

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::listener::GestureListener;
use super::segmentation::recognize_route;
use super::timer::TimerQueue;
use super::transmission::{EventTransmission, Link};
use crate::accessibility::{DisplayMetrics, GestureThresholds};
use crate::input::geometry::{distance, distance_squared, moved_at_least, Point};
use crate::input::{GestureType, PointerAction, PointerEvent, SourceType};
use crate::storage::GestureSettings;

/// Deferred timers owned by the recognizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GestureTimer {
    /// Fires when the finger has been held long enough for a long press
    LongPress,
    /// Fires when no second tap arrived in time
    SingleTap,
}

/// Gesture recognizer stage.
pub struct GestureRecognizer {
    link: Link,
    listener: Arc<dyn GestureListener>,
    settings: GestureSettings,
    thresholds: GestureThresholds,
    timers: TimerQueue<GestureTimer>,

    /// An interaction is being recognized
    recognizing: bool,
    /// The finger crossed the gesture threshold; this is a swipe
    gesture_started: bool,
    /// The long-press timer fired for the current touch
    long_pressed: bool,
    /// The current down is the second tap of a double tap
    double_tap_detecting: bool,
    /// A double tap resolves on the next up
    double_tap_active: bool,
    /// A down started the tap layer
    tap_down: bool,
    /// The finger is still down
    continue_down: bool,
    /// The previous interaction ended as a candidate first tap
    first_tap_up: bool,

    /// A classification was reported for the current interaction
    classified: bool,
    /// A cancellation was reported for the current interaction
    cancelled: bool,

    pointer_route: Vec<Point>,
    start_point: Point,
    previous_point: Point,
    start_time: u64,
    current_down: Option<PointerEvent>,
    prior_up: Option<PointerEvent>,
}

impl std::fmt::Debug for GestureRecognizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GestureRecognizer")
            .field("recognizing", &self.recognizing)
            .field("gesture_started", &self.gesture_started)
            .field("long_pressed", &self.long_pressed)
            .field("double_tap_active", &self.double_tap_active)
            .field("first_tap_up", &self.first_tap_up)
            .field("route_len", &self.pointer_route.len())
            .field("timers", &self.timers)
            .finish()
    }
}

impl GestureRecognizer {
    /// Create a recognizer.
    pub fn new(listener: Arc<dyn GestureListener>, settings: GestureSettings, metrics: Option<DisplayMetrics>) -> Self {
        let thresholds = GestureThresholds::new(metrics, settings.double_tap_slop_dp, settings.route_step_inches);
        tracing::debug!(
            gesture_threshold = thresholds.gesture_threshold,
            min_step = thresholds.min_step_x,
            slop_squared = thresholds.double_tap_slop_squared,
            "Gesture recognizer created"
        );

        Self {
            link: Link::new(),
            listener,
            settings,
            thresholds,
            timers: TimerQueue::new(),
            recognizing: false,
            gesture_started: false,
            long_pressed: false,
            double_tap_detecting: false,
            double_tap_active: false,
            tap_down: false,
            continue_down: false,
            first_tap_up: false,
            classified: false,
            cancelled: false,
            pointer_route: Vec::new(),
            start_point: Point::ZERO,
            previous_point: Point::ZERO,
            start_time: 0,
            current_down: None,
            prior_up: None,
        }
    }

    /// Thresholds in use.
    pub fn thresholds(&self) -> &GestureThresholds {
        &self.thresholds
    }

    /// Whether an interaction is being recognized.
    pub fn is_recognizing(&self) -> bool {
        self.recognizing
    }

    /// Whether the current interaction has become a swipe.
    pub fn is_gesture_started(&self) -> bool {
        self.gesture_started
    }

    /// Recorded route of the current interaction.
    pub fn pointer_route(&self) -> &[Point] {
        &self.pointer_route
    }

    /// Whether `timer` is armed.
    pub fn is_timer_pending(&self, timer: GestureTimer) -> bool {
        self.timers.is_pending(timer)
    }

    /// Arm the long-press timer relative to `now`, replacing a pending one.
    pub fn arm_long_press(&mut self, now: u64) {
        self.timers
            .schedule(GestureTimer::LongPress, now.saturating_add(self.settings.long_press_timeout_us));
    }

    fn arm_single_tap(&mut self, now: u64) {
        self.timers
            .schedule(GestureTimer::SingleTap, now.saturating_add(self.settings.double_tap_timeout_us));
    }

    fn complete(&mut self, gesture: GestureType) {
        if self.classified {
            return;
        }
        self.classified = true;
        tracing::debug!(%gesture, "Gesture recognized");
        self.listener.on_completed(gesture);
    }

    fn report_cancelled(&mut self, event: &PointerEvent) {
        if self.cancelled || self.classified {
            return;
        }
        self.cancelled = true;
        tracing::debug!(time = event.action_time(), "Gesture cancelled");
        self.listener.on_cancelled(event);
    }

    fn report_double_tap(&mut self, event: &PointerEvent) {
        if self.classified {
            return;
        }
        self.classified = true;
        tracing::debug!(time = event.action_time(), "Double tap recognized");
        self.listener.on_double_tap(event);
    }

    /// Reset the interaction and both tap-layer timers.
    ///
    /// The current down and prior up anchors are kept.
    fn clear(&mut self) {
        self.first_tap_up = false;
        self.double_tap_active = false;
        self.gesture_started = false;
        self.recognizing = false;
        self.pointer_route.clear();
        self.continue_down = false;
        self.cancel_standard();
    }

    fn cancel_standard(&mut self) {
        self.timers.cancel(GestureTimer::LongPress);
        self.timers.cancel(GestureTimer::SingleTap);
        self.long_pressed = false;
        self.double_tap_detecting = false;
        self.tap_down = false;
        self.double_tap_active = false;
    }

    fn is_double_tap(&self, event: &PointerEvent, position: Point) -> bool {
        let (Some(down), Some(up)) = (&self.current_down, &self.prior_up) else {
            return false;
        };
        if !self.first_tap_up {
            return false;
        }

        let gap = event.action_time().saturating_sub(up.action_time());
        if gap < self.settings.min_double_tap_interval_us || gap > self.settings.double_tap_timeout_us {
            tracing::debug!(gap, "Tap gap outside double tap window");
            return false;
        }

        match down.position() {
            Some(first) => distance_squared(first, position) < self.thresholds.double_tap_slop_squared,
            None => false,
        }
    }

    fn handle_down(&mut self, event: &PointerEvent) -> bool {
        if self.double_tap_active && self.long_pressed {
            tracing::debug!("Down during double tap hold ignored");
            return true;
        }

        if event.pointer_count() > 1 {
            tracing::debug!(pointers = event.pointer_count(), "Multi-finger down, recognition aborted");
            self.clear();
            return false;
        }

        let Some(position) = event.position() else {
            tracing::warn!(pointer_id = event.pointer_id(), "Acting pointer item missing on down");
            return false;
        };
        let now = event.action_time();

        if self.is_double_tap(event, position) {
            tracing::debug!("Second tap of a double tap");
            self.double_tap_detecting = true;
            self.double_tap_active = true;
            self.timers.cancel(GestureTimer::SingleTap);
        } else {
            if self.timers.is_pending(GestureTimer::SingleTap) && self.first_tap_up && !self.continue_down {
                self.complete(GestureType::Tap);
            }
            self.double_tap_active = false;
            self.first_tap_up = false;
            self.arm_single_tap(now);
        }

        self.current_down = Some(event.clone());
        self.tap_down = true;
        self.continue_down = true;
        self.long_pressed = false;
        self.classified = false;
        self.cancelled = false;
        self.arm_long_press(now);

        self.recognizing = true;
        self.gesture_started = false;
        self.pointer_route.clear();
        self.pointer_route.push(position);
        self.start_point = position;
        self.previous_point = position;
        self.start_time = now;
        false
    }

    fn handle_move(&mut self, event: &PointerEvent) -> bool {
        if self.double_tap_active && self.long_pressed {
            return false;
        }
        if !self.recognizing {
            return false;
        }

        let Some(position) = event.position() else {
            tracing::warn!(pointer_id = event.pointer_id(), "Acting pointer item missing on move");
            return false;
        };
        let now = event.action_time();
        let offset = distance(self.start_point, position);

        if self.double_tap_active && offset > self.settings.touch_slop_px {
            tracing::debug!(offset, "Double tap cancelled by movement");
            self.double_tap_active = false;
            self.first_tap_up = false;
            self.report_cancelled(event);
        }

        if offset > self.thresholds.gesture_threshold {
            self.start_point = position;
            self.start_time = now;
            self.first_tap_up = false;
            self.double_tap_active = false;
            self.timers.cancel(GestureTimer::SingleTap);
            self.timers.cancel(GestureTimer::LongPress);
            if !self.gesture_started {
                self.gesture_started = true;
                tracing::debug!(offset, "Swipe started");
                self.listener.on_started();
                return true;
            }
        } else if !self.first_tap_up {
            let elapsed = now.saturating_sub(self.start_time);
            let timeout = if self.gesture_started {
                self.settings.gesture_started_timeout_us
            } else {
                self.settings.gesture_not_started_timeout_us
            };
            if elapsed > timeout {
                tracing::debug!(elapsed, timeout, "Gesture timed out");
                self.report_cancelled(event);
                self.cancel_standard();
                self.first_tap_up = false;
                self.recognizing = false;
                self.gesture_started = false;
                self.pointer_route.clear();
                return true;
            }
        }

        if moved_at_least(self.previous_point, position, self.thresholds.min_step_x, self.thresholds.min_step_y) {
            self.pointer_route.push(position);
            self.previous_point = position;
        }
        self.gesture_started
    }

    fn handle_up(&mut self, event: &PointerEvent) -> bool {
        if event.pointer_count() != 1 {
            return false;
        }

        // Abandoned or reset interaction: the up only releases the finger
        if !self.recognizing {
            self.continue_down = false;
            self.timers.cancel(GestureTimer::LongPress);
            return false;
        }

        if self.double_tap_active {
            if self.long_pressed {
                tracing::debug!("Double tap hold released");
                self.clear();
                return false;
            }
            self.clear();
            self.report_double_tap(event);
            return true;
        }

        if self.gesture_started {
            if let Some(position) = event.position() {
                if moved_at_least(self.previous_point, position, self.thresholds.min_step_x, self.thresholds.min_step_y) {
                    self.pointer_route.push(position);
                }
            }
            match recognize_route(&self.pointer_route) {
                Some(gesture) => self.complete(gesture),
                None => self.report_cancelled(event),
            }
            self.clear();
            return true;
        }

        self.standard_up(event);
        false
    }

    /// Tap-layer bookkeeping for a single-finger up that ended no swipe or double tap.
    fn standard_up(&mut self, event: &PointerEvent) {
        self.continue_down = false;
        if self.long_pressed {
            self.timers.cancel(GestureTimer::SingleTap);
            self.long_pressed = false;
        } else if !self.double_tap_detecting && self.tap_down {
            self.first_tap_up = true;
            if !self.timers.is_pending(GestureTimer::SingleTap) && !self.classified {
                self.arm_single_tap(event.action_time());
            }
        }
        self.prior_up = Some(event.clone());
        self.double_tap_detecting = false;
        self.timers.cancel(GestureTimer::LongPress);
        self.recognizing = false;
        self.pointer_route.clear();
    }

    fn handle_cancel(&mut self, event: &PointerEvent) -> bool {
        self.clear();
        self.report_cancelled(event);
        false
    }

    fn fire(&mut self, timer: GestureTimer) {
        match timer {
            GestureTimer::SingleTap => {
                if !self.continue_down && self.first_tap_up && !self.classified {
                    self.complete(GestureType::Tap);
                    self.clear();
                }
            }
            GestureTimer::LongPress => {
                if self.continue_down && !self.gesture_started && !self.classified {
                    self.timers.cancel(GestureTimer::SingleTap);
                    self.long_pressed = true;
                    self.classified = true;
                    if let Some(down) = &self.current_down {
                        tracing::debug!(time = down.action_time(), "Long press recognized");
                        self.listener.on_long_press(down);
                    }
                }
            }
        }
    }

    fn handle(&mut self, event: &PointerEvent) -> bool {
        match event.action() {
            PointerAction::Down => self.handle_down(event),
            PointerAction::Move => self.handle_move(event),
            PointerAction::Up => self.handle_up(event),
            PointerAction::Cancel => self.handle_cancel(event),
        }
    }
}

impl EventTransmission for GestureRecognizer {
    fn name(&self) -> &'static str {
        "gesture-recognizer"
    }

    fn link(&self) -> &Link {
        &self.link
    }

    fn link_mut(&mut self) -> &mut Link {
        &mut self.link
    }

    fn on_pointer_event(&mut self, event: PointerEvent) -> bool {
        if event.source() != SourceType::Touchscreen {
            self.link.forward_pointer(event);
            return false;
        }

        let handled = self.handle(&event);
        if !handled {
            self.link.forward_pointer(event);
        }
        handled
    }

    fn on_time_advanced(&mut self, now_us: u64) {
        while let Some((timer, _)) = self.timers.pop_due(now_us) {
            self.fire(timer);
        }
        self.link.forward_time(now_us);
    }

    fn next_deadline(&self) -> Option<u64> {
        match (self.timers.next_deadline(), self.link.next_deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    fn clear_events(&mut self, source: SourceType) {
        if source == SourceType::Touchscreen {
            self.clear();
        }
        self.link.forward_clear(source);
    }

    fn destroy_events(&mut self) {
        self.timers.cancel_all();
        self.clear();
        self.current_down = None;
        self.prior_up = None;
        self.link.forward_destroy();
    }
}
