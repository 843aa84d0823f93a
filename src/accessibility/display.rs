//! Display metrics and the pixel thresholds derived from them.

use serde::{Deserialize, Serialize};

/// Millimetres per inch.
const MM_PER_INCH: f32 = 25.4;

/// Swipe start distance in millimetres.
const GESTURE_THRESHOLD_MM: f32 = 10.0;

/// Screen-touch move threshold as a divisor of the display width in millimetre units.
const DISPLAY_WIDTH_RATIO: f32 = 150.0;

/// Threshold used for every pixel distance when no display is known.
const FALLBACK_PIXELS: f32 = 1.0;

/// Metrics of the default display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DisplayMetrics {
    /// Width in device pixels
    pub width: u32,
    /// Height in device pixels
    pub height: u32,
    /// Dots per inch
    pub dpi: f32,
    /// Device pixels per device-independent pixel
    pub virtual_pixel_ratio: f32,
}

impl DisplayMetrics {
    /// Create display metrics.
    pub fn new(width: u32, height: u32, dpi: f32, virtual_pixel_ratio: f32) -> Self {
        Self {
            width,
            height,
            dpi,
            virtual_pixel_ratio,
        }
    }
}

/// Source of display metrics, injected at pipeline construction.
pub trait DisplayMetricsProvider {
    /// Metrics of the default display, if one is available.
    fn default_display(&self) -> Option<DisplayMetrics>;
}

impl DisplayMetricsProvider for DisplayMetrics {
    fn default_display(&self) -> Option<DisplayMetrics> {
        Some(*self)
    }
}

impl DisplayMetricsProvider for Option<DisplayMetrics> {
    fn default_display(&self) -> Option<DisplayMetrics> {
        *self
    }
}

/// Pixel thresholds used by the gesture recognizer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureThresholds {
    /// Displacement from the anchor that starts or extends a swipe
    pub gesture_threshold: f32,
    /// Minimum X step between recorded route points
    pub min_step_x: f32,
    /// Minimum Y step between recorded route points
    pub min_step_y: f32,
    /// Squared distance under which two downs count as the same place
    pub double_tap_slop_squared: f32,
}

impl GestureThresholds {
    /// Derive thresholds from display metrics, falling back to one device pixel.
    ///
    /// `double_tap_slop_dp` is scaled by the virtual pixel ratio and rounded;
    /// `route_step_inches` is scaled by the DPI.
    pub fn new(metrics: Option<DisplayMetrics>, double_tap_slop_dp: f32, route_step_inches: f32) -> Self {
        match metrics {
            Some(display) => {
                let step = (display.dpi * route_step_inches).max(FALLBACK_PIXELS);
                Self {
                    gesture_threshold: display.dpi / MM_PER_INCH * GESTURE_THRESHOLD_MM,
                    min_step_x: step,
                    min_step_y: step,
                    double_tap_slop_squared: scaled_slop_squared(display.virtual_pixel_ratio, double_tap_slop_dp),
                }
            }
            None => {
                tracing::warn!("No display metrics available, using 1px gesture thresholds");
                Self {
                    gesture_threshold: FALLBACK_PIXELS,
                    min_step_x: FALLBACK_PIXELS,
                    min_step_y: FALLBACK_PIXELS,
                    double_tap_slop_squared: scaled_slop_squared(1.0, double_tap_slop_dp),
                }
            }
        }
    }
}

fn scaled_slop_squared(pixel_ratio: f32, slop_dp: f32) -> f32 {
    let slop = (pixel_ratio * slop_dp + 0.5).trunc();
    slop * slop
}

/// Move distance beyond which the screen-touch filter treats a touch as a drag.
pub fn screen_touch_threshold(metrics: Option<DisplayMetrics>) -> f32 {
    match metrics {
        Some(display) => {
            display.width as f32 / MM_PER_INCH * GESTURE_THRESHOLD_MM / DISPLAY_WIDTH_RATIO
        }
        None => {
            tracing::warn!("No display metrics available, using 1px screen touch threshold");
            FALLBACK_PIXELS
        }
    }
}
