//! Storage module for configuration.

pub mod config;

pub use config::{
    AppConfig, ClickResponseDelay, ConfigError, GestureSettings, IgnoreRepeatClickTime, ScreenTouchSettings,
};
