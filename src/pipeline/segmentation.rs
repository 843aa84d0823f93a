//! Swipe path segmentation and classification.
//!
//! A recorded route is reduced to its turning points: the running average of
//! unit direction vectors since the last turning point predicts where the path
//! is heading, and a new segment starts once the next point heads away from
//! that direction by more than the cosine threshold allows.

use crate::input::geometry::{unit_or_zero, Point, EPSILON};
use crate::input::{GestureType, SwipeDirection};

/// Cosine of the largest angle still treated as the same direction (90°).
pub const DIRECTION_COSINE_THRESHOLD: f32 = 0.0;

/// Reduce `route` to the points where its direction changes.
///
/// The first and last route points are always kept. An empty route stays empty.
pub fn reduce_path(route: &[Point]) -> Vec<Point> {
    let Some((&first, rest)) = route.split_first() else {
        return Vec::new();
    };

    let mut path = vec![first];
    let mut segment_start = first;
    let mut direction_sum = Point::ZERO;
    let mut samples = 0usize;
    let mut segment_length = 0.0f32;

    for &next in rest {
        if samples > 0 {
            let average = direction_sum / samples as f32;
            let turning_point = segment_start + average * segment_length;
            let heading = unit_or_zero(next - turning_point);
            if average.dot(heading) < DIRECTION_COSINE_THRESHOLD {
                path.push(turning_point);
                segment_start = turning_point;
                direction_sum = Point::ZERO;
                samples = 0;
            }
        }

        let offset = next - segment_start;
        segment_length = offset.length();
        samples += 1;
        if segment_length > EPSILON {
            direction_sum += offset / segment_length;
        }
    }

    if let Some(&last) = rest.last() {
        path.push(last);
    }
    path
}

/// Classify a reduced path as a swipe.
///
/// Two points give a compass swipe and three a compound swipe. Anything else
/// is not a recognizable swipe.
pub fn classify_path(path: &[Point]) -> Option<GestureType> {
    match path {
        [from, to] => Some(GestureType::swipe(SwipeDirection::between(*from, *to))),
        [a, b, c] => Some(GestureType::compound_swipe(
            SwipeDirection::between(*a, *b),
            SwipeDirection::between(*b, *c),
        )),
        _ => None,
    }
}

/// Reduce and classify a recorded route.
pub fn recognize_route(route: &[Point]) -> Option<GestureType> {
    if route.len() < 2 {
        return None;
    }
    let path = reduce_path(route);
    tracing::debug!(points = route.len(), turning_points = path.len(), "Route reduced");
    classify_path(&path)
}
