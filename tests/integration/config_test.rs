//! Integration tests for configuration files driving pipeline construction.

use a11y_touch::accessibility::DisplayMetrics;
use a11y_touch::pipeline::{ChannelGestureListener, ScreenTouchFilter, ScreenTouchPolicy};
use a11y_touch::storage::config::{load_config_from, save_config_to};
use a11y_touch::storage::{
    AppConfig, ClickResponseDelay, ConfigError, GestureSettings, IgnoreRepeatClickTime, ScreenTouchSettings,
};
use a11y_touch::Pipeline;
use tempfile::tempdir;

#[test]
fn test_config_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    let config = AppConfig {
        screen_touch: ScreenTouchSettings {
            click_response_delay: ClickResponseDelay::Long,
            ignore_repeat_click: true,
            ignore_repeat_click_time: IgnoreRepeatClickTime::Longest,
        },
        gesture: GestureSettings {
            long_press_timeout_us: 500_000,
            ..Default::default()
        },
        display: Some(DisplayMetrics::new(1080, 2340, 480.0, 3.0)),
    };

    save_config_to(&config, &path).unwrap();
    let loaded = load_config_from(&path).unwrap();

    assert_eq!(loaded, config);
}

#[test]
fn test_missing_file_gives_defaults() {
    let dir = tempdir().unwrap();
    let loaded = load_config_from(&dir.path().join("absent.toml")).unwrap();

    assert_eq!(loaded, AppConfig::default());
}

#[test]
fn test_malformed_file_is_parse_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[screen_touch]\nclick_response_delay = \"sometimes\"\n").unwrap();

    assert!(matches!(load_config_from(&path), Err(ConfigError::ParseError(_))));
}

#[test]
fn test_invalid_gesture_settings_rejected_on_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        "[gesture]\nmin_double_tap_interval_us = 500000\ndouble_tap_timeout_us = 300000\n",
    )
    .unwrap();

    assert!(matches!(load_config_from(&path), Err(ConfigError::InvalidValue(_))));
}

#[test]
fn test_loaded_config_selects_policy() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[screen_touch]\nignore_repeat_click = true\n").unwrap();

    let config = load_config_from(&path).unwrap();
    let filter = ScreenTouchFilter::new(&config.screen_touch, config.display);
    assert_eq!(filter.policy(), ScreenTouchPolicy::IgnoreRepeatOnly);

    let (listener, _rx) = ChannelGestureListener::new();
    let pipeline = Pipeline::builder().with_config(config).with_listener(listener).build();
    assert!(pipeline.is_ok());
}
