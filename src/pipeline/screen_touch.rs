//! Screen-touch filter.
//!
//! Applies the click response delay and ignore-repeat-click preferences to
//! single-finger touchscreen samples before they reach gesture recognition.
//!
//! - Response delay: a down is held back until the finger either moves past
//!   the threshold or stays down for the configured delay.
//! - Ignore repeat click: a touch that starts too soon after the previous
//!   forwarded up is dropped entirely.

use serde::{Deserialize, Serialize};

use super::transmission::{EventTransmission, Link};
use crate::accessibility::display::screen_touch_threshold;
use crate::accessibility::DisplayMetrics;
use crate::input::geometry::{distance, Point};
use crate::input::{PointerAction, PointerEvent, SourceType};
use crate::storage::ScreenTouchSettings;

/// Microseconds per millisecond.
const US_PER_MS: u64 = 1000;

/// Active filter policy, fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScreenTouchPolicy {
    /// Pass everything through
    None,
    /// Click response delay only
    DelayOnly,
    /// Ignore repeat click only
    IgnoreRepeatOnly,
    /// Both, with the repeat decision gating the delay
    Both,
}

impl ScreenTouchPolicy {
    /// Derive the policy from user settings.
    pub fn from_settings(settings: &ScreenTouchSettings) -> Self {
        let delay = settings.click_response_delay.millis() > 0;
        match (delay, settings.ignore_repeat_click) {
            (true, true) => ScreenTouchPolicy::Both,
            (true, false) => ScreenTouchPolicy::DelayOnly,
            (false, true) => ScreenTouchPolicy::IgnoreRepeatOnly,
            (false, false) => ScreenTouchPolicy::None,
        }
    }
}

impl std::fmt::Display for ScreenTouchPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScreenTouchPolicy::None => write!(f, "none"),
            ScreenTouchPolicy::DelayOnly => write!(f, "delay-only"),
            ScreenTouchPolicy::IgnoreRepeatOnly => write!(f, "ignore-repeat-only"),
            ScreenTouchPolicy::Both => write!(f, "both"),
        }
    }
}

/// Filter stage for click response delay and repeat-click suppression.
#[derive(Debug)]
pub struct ScreenTouchFilter {
    link: Link,
    policy: ScreenTouchPolicy,
    /// Response delay in microseconds
    delay_us: u64,
    /// Repeat-click window in milliseconds
    ignore_window_ms: u64,
    /// Move distance that releases a held touch
    threshold: f32,
    /// Time of the held down
    start_time: u64,
    /// Position of the held down
    start_point: Point,
    /// The held down itself, until a down has been forwarded for it
    held_down: Option<PointerEvent>,
    /// Finger moved past the threshold; the rest of the touch passes through
    moved_beyond_threshold: bool,
    /// Time of the last forwarded up
    last_up_time: Option<u64>,
    /// The current touch is being suppressed
    intercepting_click: bool,
}

impl ScreenTouchFilter {
    /// Create a filter from settings and the default display's metrics.
    pub fn new(settings: &ScreenTouchSettings, metrics: Option<DisplayMetrics>) -> Self {
        let policy = ScreenTouchPolicy::from_settings(settings);
        let threshold = screen_touch_threshold(metrics);
        tracing::debug!(%policy, threshold, "Screen touch filter created");

        Self {
            link: Link::new(),
            policy,
            delay_us: settings.click_response_delay.millis() * US_PER_MS,
            ignore_window_ms: settings.ignore_repeat_click_time.millis(),
            threshold,
            start_time: 0,
            start_point: Point::ZERO,
            held_down: None,
            moved_beyond_threshold: false,
            last_up_time: None,
            intercepting_click: false,
        }
    }

    /// Active policy.
    pub fn policy(&self) -> ScreenTouchPolicy {
        self.policy
    }

    /// Move distance that releases a held touch.
    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Reset per-touch state. The last up time survives.
    fn clear(&mut self) {
        self.moved_beyond_threshold = false;
        self.intercepting_click = false;
        self.held_down = None;
        self.start_point = Point::ZERO;
    }

    fn forward(&mut self, event: PointerEvent) {
        self.link.forward_pointer(event);
    }

    fn delay_elapsed(&self, now: u64) -> bool {
        now >= self.start_time.saturating_add(self.delay_us)
    }

    fn is_repeat_click(&self, down_time: u64) -> bool {
        match self.last_up_time {
            Some(last_up) => down_time.saturating_sub(last_up) / US_PER_MS < self.ignore_window_ms,
            None => false,
        }
    }

    fn delay_down(&mut self, event: PointerEvent, position: Point) {
        self.start_time = event.action_time();
        self.start_point = position;
        self.moved_beyond_threshold = false;
        self.held_down = Some(event);
    }

    fn delay_move(&mut self, mut event: PointerEvent, position: Point) {
        if self.moved_beyond_threshold {
            self.forward(event);
            return;
        }

        if distance(self.start_point, position) > self.threshold {
            tracing::debug!("Touch moved past threshold, releasing as down");
            event.set_action(PointerAction::Down);
            self.held_down = None;
            self.moved_beyond_threshold = true;
            self.forward(event);
            return;
        }

        if !self.delay_elapsed(event.action_time()) {
            return;
        }

        if self.held_down.take().is_some() {
            tracing::debug!("Click response delay elapsed, releasing down");
            let mut down = event.clone();
            down.set_action(PointerAction::Down);
            self.forward(down);
        }
        self.forward(event);
    }

    fn delay_up(&mut self, event: PointerEvent) {
        if self.moved_beyond_threshold {
            self.forward(event);
            return;
        }

        if !self.delay_elapsed(event.action_time()) {
            if self.held_down.take().is_some() {
                tracing::debug!("Touch released before click response delay, dropped");
                return;
            }
            self.forward(event);
            return;
        }

        if let Some(down) = self.held_down.take() {
            self.forward(down);
        }
        self.forward(event);
    }

    fn handle_delay(&mut self, event: PointerEvent, position: Point) {
        match event.action() {
            PointerAction::Down => self.delay_down(event, position),
            PointerAction::Move => self.delay_move(event, position),
            PointerAction::Up => self.delay_up(event),
            PointerAction::Cancel => self.forward(event),
        }
    }

    fn handle_ignore_repeat(&mut self, event: PointerEvent) {
        match event.action() {
            PointerAction::Down => {
                self.intercepting_click = self.is_repeat_click(event.action_time());
                if self.intercepting_click {
                    tracing::debug!("Repeat click suppressed");
                } else {
                    self.forward(event);
                }
            }
            PointerAction::Move => {
                if !self.intercepting_click {
                    self.forward(event);
                }
            }
            PointerAction::Up => {
                if self.intercepting_click {
                    self.intercepting_click = false;
                } else {
                    self.last_up_time = Some(event.action_time());
                    self.forward(event);
                }
            }
            PointerAction::Cancel => self.forward(event),
        }
    }

    fn handle_both(&mut self, event: PointerEvent, position: Point) {
        match event.action() {
            PointerAction::Down => {
                self.intercepting_click = self.is_repeat_click(event.action_time());
                if self.intercepting_click {
                    tracing::debug!("Repeat click suppressed");
                } else {
                    self.delay_down(event, position);
                }
            }
            PointerAction::Move => {
                if !self.intercepting_click {
                    self.delay_move(event, position);
                }
            }
            PointerAction::Up => {
                if self.intercepting_click {
                    self.intercepting_click = false;
                } else {
                    self.last_up_time = Some(event.action_time());
                    self.delay_up(event);
                }
            }
            PointerAction::Cancel => self.forward(event),
        }
    }
}

impl EventTransmission for ScreenTouchFilter {
    fn name(&self) -> &'static str {
        "screen-touch"
    }

    fn link(&self) -> &Link {
        &self.link
    }

    fn link_mut(&mut self) -> &mut Link {
        &mut self.link
    }

    fn on_pointer_event(&mut self, event: PointerEvent) -> bool {
        if event.source() != SourceType::Touchscreen {
            self.forward(event);
            return false;
        }

        if event.action() == PointerAction::Cancel {
            self.clear();
            self.forward(event);
            return true;
        }

        if self.policy == ScreenTouchPolicy::None || event.pointer_count() > 1 {
            self.forward(event);
            return true;
        }

        let Some(position) = event.position() else {
            tracing::warn!(pointer_id = event.pointer_id(), "Acting pointer item missing");
            self.forward(event);
            return false;
        };

        match self.policy {
            ScreenTouchPolicy::DelayOnly => self.handle_delay(event, position),
            ScreenTouchPolicy::IgnoreRepeatOnly => self.handle_ignore_repeat(event),
            ScreenTouchPolicy::Both => self.handle_both(event, position),
            ScreenTouchPolicy::None => self.forward(event),
        }
        true
    }

    fn clear_events(&mut self, source: SourceType) {
        if source == SourceType::Touchscreen {
            self.clear();
        }
        self.link.forward_clear(source);
    }

    fn destroy_events(&mut self) {
        self.clear();
        self.last_up_time = None;
        self.link.forward_destroy();
    }
}
