//! Unit tests for swipe path segmentation and direction classification.

use a11y_touch::input::geometry::Point;
use a11y_touch::input::{GestureType, SwipeDirection};
use a11y_touch::pipeline::segmentation::{classify_path, recognize_route, reduce_path};

fn route(points: &[(f32, f32)]) -> Vec<Point> {
    points.iter().map(|&(x, y)| Point::new(x, y)).collect()
}

#[test]
fn test_right_then_up_route() {
    let route = route(&[
        (0.0, 0.0),
        (100.0, 0.0),
        (200.0, 0.0),
        (300.0, 0.0),
        (295.0, -100.0),
        (290.0, -200.0),
        (285.0, -300.0),
        (280.0, -400.0),
        (275.0, -500.0),
    ]);

    let path = reduce_path(&route);
    assert_eq!(path.len(), 3);
    assert_eq!(path[0], Point::new(0.0, 0.0));
    assert_eq!(path[1], Point::new(300.0, 0.0));
    assert_eq!(path[2], Point::new(275.0, -500.0));

    // Same input, same answer
    for _ in 0..3 {
        assert_eq!(recognize_route(&route), Some(GestureType::SwipeRightThenUp));
    }
}

#[test]
fn test_pure_left_route() {
    let route = route(&[(400.0, 50.0), (300.0, 52.0), (200.0, 49.0), (100.0, 51.0)]);
    assert_eq!(recognize_route(&route), Some(GestureType::SwipeLeft));
}

#[test]
fn test_down_then_left_route() {
    let route = route(&[(200.0, 0.0), (200.0, 100.0), (200.0, 200.0), (100.0, 195.0), (0.0, 190.0)]);
    assert_eq!(recognize_route(&route), Some(GestureType::SwipeDownThenLeft));
}

#[test]
fn test_three_segments_are_not_a_swipe() {
    let route = route(&[
        (0.0, 0.0),
        (100.0, 0.0),
        (200.0, 0.0),
        (195.0, 100.0),
        (190.0, 200.0),
        (90.0, 190.0),
        (-10.0, 180.0),
    ]);

    assert_eq!(reduce_path(&route).len(), 4);
    assert_eq!(recognize_route(&route), None);
}

#[test]
fn test_single_point_route_is_not_a_swipe() {
    assert_eq!(recognize_route(&route(&[(10.0, 10.0)])), None);
    assert_eq!(recognize_route(&[]), None);
}

#[test]
fn test_compound_table_diagonal_is_single_swipe() {
    for direction in [
        SwipeDirection::Up,
        SwipeDirection::Down,
        SwipeDirection::Left,
        SwipeDirection::Right,
    ] {
        assert_eq!(
            GestureType::compound_swipe(direction, direction),
            GestureType::swipe(direction)
        );
    }
    assert_eq!(
        GestureType::compound_swipe(SwipeDirection::Left, SwipeDirection::Down),
        GestureType::SwipeLeftThenDown
    );
}

#[test]
fn test_classify_two_points() {
    let path = route(&[(0.0, 0.0), (0.0, -80.0)]);
    assert_eq!(classify_path(&path), Some(GestureType::SwipeUp));
}
