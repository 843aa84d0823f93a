//! Geometry helpers shared by the pipeline stages.

/// A 2-D point in display pixels.
pub type Point = glam::Vec2;

/// Length below which a vector is treated as zero.
pub const EPSILON: f32 = 0.0001;

/// Euclidean distance between two points.
pub fn distance(a: Point, b: Point) -> f32 {
    (b - a).length()
}

/// Squared distance between two points.
pub fn distance_squared(a: Point, b: Point) -> f32 {
    (b - a).length_squared()
}

/// Unit vector of `v`, or zero when `v` is shorter than [`EPSILON`].
pub fn unit_or_zero(v: glam::Vec2) -> glam::Vec2 {
    let length = v.length();
    if length > EPSILON {
        v / length
    } else {
        glam::Vec2::ZERO
    }
}

/// Whether `to` is at least `min_x` or `min_y` away from `from` along either axis.
pub fn moved_at_least(from: Point, to: Point, min_x: f32, min_y: f32) -> bool {
    (to.x - from.x).abs() >= min_x || (to.y - from.y).abs() >= min_y
}
