//! Touch event pipeline.
//!
//! Samples flow through a fixed chain of stages:
//! screen-touch filter, gesture recognizer, then an optional output stage.
//! The pipeline keeps a virtual clock driven by sample timestamps and fires
//! recognizer timers as the clock passes their deadlines.

pub mod inject;
pub mod listener;
pub mod recognizer;
pub mod screen_touch;
pub mod segmentation;
pub mod sink;
pub mod timer;
pub mod transmission;
pub mod worker;

use std::sync::Arc;

use crate::accessibility::{AccessibilityEventInfo, DisplayMetrics, DisplayMetricsProvider};
use crate::input::{KeyEvent, PointerEvent, SourceType};
use crate::storage::{AppConfig, ConfigError, GestureSettings, ScreenTouchSettings};

// Re-export primary types
pub use inject::GestureInjectPath;
pub use listener::{ChannelGestureListener, GestureEvent, GestureListener};
pub use recognizer::{GestureRecognizer, GestureTimer};
pub use screen_touch::{ScreenTouchFilter, ScreenTouchPolicy};
pub use sink::{ChannelSink, ForwardedEvent};
pub use timer::TimerQueue;
pub use transmission::{EventTransmission, Link, PassThrough};
pub use worker::PipelineWorker;

/// Pipeline errors.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("No gesture listener registered")]
    MissingListener,

    #[error("Pipeline worker has shut down")]
    WorkerClosed,

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// A built event pipeline.
pub struct Pipeline {
    head: Box<dyn EventTransmission>,
    clock: u64,
    destroyed: bool,
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("head", &self.head.name())
            .field("clock", &self.clock)
            .field("destroyed", &self.destroyed)
            .finish()
    }
}

impl Pipeline {
    /// Start building a pipeline.
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::default()
    }

    /// Current virtual time in microseconds.
    pub fn now(&self) -> u64 {
        self.clock
    }

    /// Earliest pending timer deadline.
    pub fn next_deadline(&self) -> Option<u64> {
        self.head.next_deadline()
    }

    /// Feed a pointer sample.
    ///
    /// Timers due strictly before the sample fire first. A timer due at the
    /// sample's own timestamp fires after it.
    pub fn on_pointer_event(&mut self, event: PointerEvent) -> bool {
        let time = event.action_time();
        if let Some(deadline) = self.head.next_deadline() {
            if deadline < time {
                self.advance_to(time - 1);
            }
        }
        self.clock = self.clock.max(time);
        self.head.on_pointer_event(event)
    }

    /// Feed a key event.
    pub fn on_key_event(&mut self, event: KeyEvent) -> bool {
        self.head.on_key_event(event)
    }

    /// Feed an accessibility event.
    pub fn on_accessibility_event(&mut self, event: AccessibilityEventInfo) {
        self.head.on_accessibility_event(event);
    }

    /// Advance the clock to `now_us`, firing every timer due by then.
    ///
    /// The clock never moves backwards.
    pub fn advance_to(&mut self, now_us: u64) {
        self.clock = self.clock.max(now_us);
        self.head.on_time_advanced(self.clock);
    }

    /// Fire every pending timer, advancing the clock as far as needed.
    pub fn flush_timers(&mut self) {
        while let Some(deadline) = self.head.next_deadline() {
            self.advance_to(deadline);
        }
    }

    /// Drop in-flight state for `source`.
    pub fn clear_events(&mut self, source: SourceType) {
        self.head.clear_events(source);
    }

    /// Cancel all timers and release state. Safe to call more than once.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;
        tracing::info!("Destroying touch pipeline");
        self.head.destroy_events();
    }
}

impl Drop for Pipeline {
    fn drop(&mut self) {
        self.destroy();
    }
}

/// Builder for [`Pipeline`].
#[derive(Default)]
pub struct PipelineBuilder {
    config: AppConfig,
    metrics: Option<DisplayMetrics>,
    listener: Option<Arc<dyn GestureListener>>,
    output: Option<Box<dyn EventTransmission>>,
}

impl PipelineBuilder {
    /// Use the given configuration.
    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    /// Use the given screen-touch settings.
    pub fn with_screen_touch(mut self, settings: ScreenTouchSettings) -> Self {
        self.config.screen_touch = settings;
        self
    }

    /// Use the given gesture settings.
    pub fn with_gesture_settings(mut self, settings: GestureSettings) -> Self {
        self.config.gesture = settings;
        self
    }

    /// Take display metrics from a provider, overriding configured metrics.
    pub fn with_display(mut self, provider: &dyn DisplayMetricsProvider) -> Self {
        self.metrics = provider.default_display();
        self
    }

    /// Register the gesture listener.
    pub fn with_listener(self, listener: impl GestureListener + 'static) -> Self {
        self.with_shared_listener(Arc::new(listener))
    }

    /// Register a shared gesture listener.
    pub fn with_shared_listener(mut self, listener: Arc<dyn GestureListener>) -> Self {
        self.listener = Some(listener);
        self
    }

    /// Install the stage that receives everything the recognizer forwards.
    pub fn with_output(mut self, output: impl EventTransmission + 'static) -> Self {
        self.output = Some(Box::new(output));
        self
    }

    /// Build the pipeline.
    pub fn build(self) -> Result<Pipeline, PipelineError> {
        let listener = self.listener.ok_or(PipelineError::MissingListener)?;
        self.config.gesture.validate()?;

        let metrics = self.metrics.or(self.config.display);
        if metrics.is_none() {
            tracing::warn!("Building pipeline without display metrics");
        }

        let mut recognizer = GestureRecognizer::new(listener, self.config.gesture.clone(), metrics);
        if let Some(output) = self.output {
            recognizer.set_next(output);
        }

        let mut filter = ScreenTouchFilter::new(&self.config.screen_touch, metrics);
        tracing::info!(policy = %filter.policy(), "Touch pipeline built");
        filter.set_next(Box::new(recognizer));

        Ok(Pipeline {
            head: Box::new(filter),
            clock: 0,
            destroyed: false,
        })
    }
}
