//! Pipeline configuration.
//!
//! Settings are stored as TOML. Every section has defaults, so a partial file
//! (or no file at all) yields a usable configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::accessibility::DisplayMetrics;

/// Click response delay preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClickResponseDelay {
    /// No delay
    #[default]
    Short,
    /// 300 ms
    Medium,
    /// 600 ms
    Long,
}

impl ClickResponseDelay {
    /// Delay in milliseconds.
    pub fn millis(self) -> u64 {
        match self {
            ClickResponseDelay::Short => 0,
            ClickResponseDelay::Medium => 300,
            ClickResponseDelay::Long => 600,
        }
    }
}

impl std::fmt::Display for ClickResponseDelay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClickResponseDelay::Short => write!(f, "Short"),
            ClickResponseDelay::Medium => write!(f, "Medium"),
            ClickResponseDelay::Long => write!(f, "Long"),
        }
    }
}

/// Window within which a repeated click is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IgnoreRepeatClickTime {
    /// 100 ms
    #[default]
    Shortest,
    /// 400 ms
    Short,
    /// 700 ms
    Medium,
    /// 1000 ms
    Long,
    /// 1300 ms
    Longest,
}

impl IgnoreRepeatClickTime {
    /// Window in milliseconds.
    pub fn millis(self) -> u64 {
        match self {
            IgnoreRepeatClickTime::Shortest => 100,
            IgnoreRepeatClickTime::Short => 400,
            IgnoreRepeatClickTime::Medium => 700,
            IgnoreRepeatClickTime::Long => 1000,
            IgnoreRepeatClickTime::Longest => 1300,
        }
    }
}

impl std::fmt::Display for IgnoreRepeatClickTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}ms", self.millis())
    }
}

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Screen-touch filter settings
    pub screen_touch: ScreenTouchSettings,
    /// Gesture recognizer settings
    pub gesture: GestureSettings,
    /// Fixed display metrics, used when no display provider is available
    pub display: Option<DisplayMetrics>,
}

/// Screen-touch filter settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenTouchSettings {
    /// Hold time before a touch is treated as a click
    pub click_response_delay: ClickResponseDelay,
    /// Suppress touches that follow the previous one too closely
    pub ignore_repeat_click: bool,
    /// Suppression window
    pub ignore_repeat_click_time: IgnoreRepeatClickTime,
}

/// Gesture recognizer settings. Durations are in microseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureSettings {
    /// Longest gap between a tap and the next down that still forms a double tap
    pub double_tap_timeout_us: u64,
    /// Shortest gap between a tap and the next down that forms a double tap
    pub min_double_tap_interval_us: u64,
    /// Hold time before a long press
    pub long_press_timeout_us: u64,
    /// Time allowed to cross the gesture threshold before the touch is abandoned
    pub gesture_not_started_timeout_us: u64,
    /// Time allowed between threshold crossings once a swipe started
    pub gesture_started_timeout_us: u64,
    /// Double-tap slop in device-independent pixels
    pub double_tap_slop_dp: f32,
    /// Movement in pixels that cancels a double tap in progress
    pub touch_slop_px: f32,
    /// Minimum route sampling step in inches
    pub route_step_inches: f32,
}

impl Default for GestureSettings {
    fn default() -> Self {
        Self {
            double_tap_timeout_us: 300_000,
            min_double_tap_interval_us: 40_000,
            long_press_timeout_us: 300_000,
            gesture_not_started_timeout_us: 200_000,
            gesture_started_timeout_us: 300_000,
            double_tap_slop_dp: 100.0,
            touch_slop_px: 8.0,
            route_step_inches: 0.1,
        }
    }
}

impl GestureSettings {
    /// Check the settings for values the recognizer cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_double_tap_interval_us > self.double_tap_timeout_us {
            return Err(ConfigError::InvalidValue(format!(
                "min_double_tap_interval_us ({}) exceeds double_tap_timeout_us ({})",
                self.min_double_tap_interval_us, self.double_tap_timeout_us
            )));
        }

        let timeouts = [
            ("double_tap_timeout_us", self.double_tap_timeout_us),
            ("long_press_timeout_us", self.long_press_timeout_us),
            ("gesture_not_started_timeout_us", self.gesture_not_started_timeout_us),
            ("gesture_started_timeout_us", self.gesture_started_timeout_us),
        ];
        if let Some((name, _)) = timeouts.iter().find(|(_, value)| *value == 0) {
            return Err(ConfigError::InvalidValue(format!("{} must be non-zero", name)));
        }

        if !(self.double_tap_slop_dp >= 0.0 && self.touch_slop_px >= 0.0 && self.route_step_inches >= 0.0) {
            return Err(ConfigError::InvalidValue("slop and step values must be non-negative".to_string()));
        }

        Ok(())
    }
}

/// Get the application data directory.
pub fn get_data_dir() -> PathBuf {
    directories::ProjectDirs::from("org", "a11y", "A11yTouch")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Get the configuration file path.
pub fn get_config_path() -> PathBuf {
    get_data_dir().join("config.toml")
}

/// Load configuration from the default path.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from(&get_config_path())
}

/// Load configuration from `path`, using defaults when the file does not exist.
pub fn load_config_from(path: &Path) -> Result<AppConfig, ConfigError> {
    if !path.exists() {
        tracing::info!("No config at {}, using defaults", path.display());
        return Ok(AppConfig::default());
    }

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;

    let config: AppConfig = toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    config.gesture.validate()?;

    Ok(config)
}

/// Save configuration to the default path.
pub fn save_config(config: &AppConfig) -> Result<(), ConfigError> {
    save_config_to(config, &get_config_path())
}

/// Save configuration to `path`.
pub fn save_config_to(config: &AppConfig, path: &Path) -> Result<(), ConfigError> {
    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| ConfigError::IoError(e.to_string()))?;
    }

    let content = toml::to_string_pretty(config).map_err(|e| ConfigError::SerializeError(e.to_string()))?;

    std::fs::write(path, content).map_err(|e| ConfigError::IoError(e.to_string()))?;

    Ok(())
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Serialize error: {0}")]
    SerializeError(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),
}
