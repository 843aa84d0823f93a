//! Unit tests for gesture recognizer properties.

use std::sync::Arc;

use a11y_touch::accessibility::DisplayMetrics;
use a11y_touch::input::{GestureType, PointerAction, PointerEvent, SourceType};
use a11y_touch::pipeline::{ChannelGestureListener, EventTransmission, GestureEvent, GestureRecognizer, GestureTimer};
use a11y_touch::storage::GestureSettings;
use crossbeam::channel::Receiver;

/// Recognizer on a 160 DPI display: gesture threshold ~63px, route step 16px.
fn recognizer() -> (GestureRecognizer, Receiver<GestureEvent>) {
    let (listener, rx) = ChannelGestureListener::new();
    let metrics = DisplayMetrics::new(1080, 2340, 160.0, 1.0);
    (
        GestureRecognizer::new(Arc::new(listener), GestureSettings::default(), Some(metrics)),
        rx,
    )
}

/// Deliver a sample the way the pipeline does: timers due before it fire first.
fn feed(r: &mut GestureRecognizer, action: PointerAction, x: f32, y: f32, t: u64) -> bool {
    r.on_time_advanced(t.saturating_sub(1));
    r.on_pointer_event(PointerEvent::touch(action, x, y, t))
}

fn tap(r: &mut GestureRecognizer, x: f32, y: f32, down: u64, up: u64) {
    feed(r, PointerAction::Down, x, y, down);
    feed(r, PointerAction::Up, x, y, up);
}

#[test]
fn test_taps_beyond_interval_are_independent() {
    let (mut r, rx) = recognizer();

    tap(&mut r, 100.0, 100.0, 0, 50_000);
    tap(&mut r, 100.0, 100.0, 500_000, 550_000);
    tap(&mut r, 100.0, 100.0, 1_000_000, 1_050_000);
    r.on_time_advanced(2_000_000);

    let events: Vec<_> = rx.try_iter().collect();
    assert_eq!(events, vec![GestureEvent::Completed(GestureType::Tap); 3]);
}

#[test]
fn test_taps_closer_than_minimum_interval_are_independent() {
    let (mut r, rx) = recognizer();

    tap(&mut r, 100.0, 100.0, 0, 10_000);
    tap(&mut r, 100.0, 100.0, 30_000, 60_000);
    r.on_time_advanced(2_000_000);

    let events: Vec<_> = rx.try_iter().collect();
    assert_eq!(events, vec![GestureEvent::Completed(GestureType::Tap); 2]);
}

#[test]
fn test_double_tap_reported_once() {
    let (mut r, rx) = recognizer();

    tap(&mut r, 100.0, 100.0, 0, 40_000);
    feed(&mut r, PointerAction::Down, 110.0, 95.0, 120_000);
    assert!(feed(&mut r, PointerAction::Up, 110.0, 95.0, 160_000));
    r.on_time_advanced(2_000_000);

    let events: Vec<_> = rx.try_iter().collect();
    assert_eq!(events.len(), 1);
    match &events[0] {
        GestureEvent::DoubleTap(up) => assert_eq!(up.action_time(), 160_000),
        other => panic!("expected double tap, got {:?}", other),
    }
}

#[test]
fn test_second_tap_outside_slop_is_not_double() {
    let (mut r, rx) = recognizer();

    tap(&mut r, 100.0, 100.0, 0, 40_000);
    tap(&mut r, 400.0, 100.0, 120_000, 160_000);
    r.on_time_advanced(2_000_000);

    let events: Vec<_> = rx.try_iter().collect();
    assert_eq!(events, vec![GestureEvent::Completed(GestureType::Tap); 2]);
}

#[test]
fn test_long_press_rearm_reports_once() {
    let (mut r, rx) = recognizer();

    feed(&mut r, PointerAction::Down, 100.0, 100.0, 0);
    r.arm_long_press(10_000);
    r.arm_long_press(10_000);
    assert!(r.is_timer_pending(GestureTimer::LongPress));

    r.on_time_advanced(300_000);
    assert!(rx.try_recv().is_err());

    r.on_time_advanced(310_000);
    r.on_time_advanced(1_000_000);

    let events: Vec<_> = rx.try_iter().collect();
    assert_eq!(events.len(), 1);
    assert!(matches!(events[0], GestureEvent::LongPress(_)));
}

#[test]
fn test_double_tap_reversal_cancels_once() {
    let (mut r, rx) = recognizer();

    tap(&mut r, 100.0, 100.0, 0, 40_000);
    feed(&mut r, PointerAction::Down, 100.0, 100.0, 120_000);
    feed(&mut r, PointerAction::Move, 120.0, 100.0, 130_000);
    feed(&mut r, PointerAction::Move, 90.0, 100.0, 140_000);
    feed(&mut r, PointerAction::Up, 90.0, 100.0, 150_000);
    r.on_time_advanced(2_000_000);

    let events: Vec<_> = rx.try_iter().collect();
    assert_eq!(events.len(), 1);
    assert!(matches!(events[0], GestureEvent::Cancelled(_)));
}

#[test]
fn test_not_started_timeout_boundary() {
    let (mut r, rx) = recognizer();

    feed(&mut r, PointerAction::Down, 100.0, 100.0, 0);
    // Exactly at the timeout: still recognizing
    assert!(!feed(&mut r, PointerAction::Move, 102.0, 100.0, 200_000));
    assert!(r.is_recognizing());
    assert!(rx.try_recv().is_err());

    // One microsecond past: abandoned
    assert!(feed(&mut r, PointerAction::Move, 103.0, 100.0, 200_001));
    assert!(!r.is_recognizing());
    assert!(r.pointer_route().is_empty());
    assert!(matches!(rx.try_recv().ok(), Some(GestureEvent::Cancelled(_))));
}

#[test]
fn test_timed_out_touch_reports_only_cancel() {
    let (mut r, rx) = recognizer();

    feed(&mut r, PointerAction::Down, 100.0, 100.0, 0);
    assert!(feed(&mut r, PointerAction::Move, 103.0, 100.0, 250_000));
    assert!(!feed(&mut r, PointerAction::Up, 103.0, 100.0, 280_000));
    r.on_time_advanced(2_000_000);

    let events: Vec<_> = rx.try_iter().collect();
    assert_eq!(events.len(), 1);
    assert!(matches!(events[0], GestureEvent::Cancelled(_)));
    assert_eq!(r.next_deadline(), None);
}

#[test]
fn test_timed_out_touch_held_is_not_long_press() {
    let (mut r, rx) = recognizer();

    feed(&mut r, PointerAction::Down, 100.0, 100.0, 0);
    feed(&mut r, PointerAction::Move, 103.0, 100.0, 250_000);
    r.on_time_advanced(1_000_000);
    feed(&mut r, PointerAction::Up, 103.0, 100.0, 1_200_000);
    r.on_time_advanced(3_000_000);

    let events: Vec<_> = rx.try_iter().collect();
    assert_eq!(events.len(), 1);
    assert!(matches!(events[0], GestureEvent::Cancelled(_)));
}

#[test]
fn test_tap_after_timed_out_touch() {
    let (mut r, rx) = recognizer();

    feed(&mut r, PointerAction::Down, 100.0, 100.0, 0);
    feed(&mut r, PointerAction::Move, 103.0, 100.0, 250_000);
    feed(&mut r, PointerAction::Up, 103.0, 100.0, 280_000);
    tap(&mut r, 100.0, 100.0, 1_000_000, 1_050_000);
    r.on_time_advanced(3_000_000);

    let events: Vec<_> = rx.try_iter().collect();
    assert_eq!(events.len(), 2);
    assert!(matches!(events[0], GestureEvent::Cancelled(_)));
    assert_eq!(events[1], GestureEvent::Completed(GestureType::Tap));
}

#[test]
fn test_missing_pointer_item_keeps_state() {
    let (mut r, rx) = recognizer();
    let malformed = |action, t| PointerEvent::new(0, action, SourceType::Touchscreen, t);

    feed(&mut r, PointerAction::Down, 100.0, 100.0, 0);
    assert!(feed(&mut r, PointerAction::Move, 100.0, 300.0, 10_000));
    assert_eq!(rx.try_recv().ok(), Some(GestureEvent::Started));
    let route = r.pointer_route().to_vec();

    // Move without its acting item during a swipe
    assert!(!r.on_pointer_event(malformed(PointerAction::Move, 15_000)));
    assert!(r.is_recognizing());
    assert!(r.is_gesture_started());
    assert_eq!(r.pointer_route(), route.as_slice());
    assert!(rx.try_recv().is_err());

    assert!(feed(&mut r, PointerAction::Up, 100.0, 400.0, 20_000));
    assert_eq!(rx.try_recv().ok(), Some(GestureEvent::Completed(GestureType::SwipeDown)));

    // Down without its acting item while idle
    r.on_time_advanced(999_999);
    assert!(!r.on_pointer_event(malformed(PointerAction::Down, 1_000_000)));
    assert!(!r.is_recognizing());
    assert!(r.pointer_route().is_empty());
    assert_eq!(r.next_deadline(), None);
    assert!(rx.try_recv().is_err());

    tap(&mut r, 100.0, 100.0, 1_100_000, 1_150_000);
    r.on_time_advanced(3_000_000);
    assert_eq!(rx.try_recv().ok(), Some(GestureEvent::Completed(GestureType::Tap)));
    assert!(rx.try_recv().is_err());
}

#[test]
fn test_started_timeout_boundary() {
    let (mut r, rx) = recognizer();

    feed(&mut r, PointerAction::Down, 100.0, 100.0, 0);
    assert!(feed(&mut r, PointerAction::Move, 200.0, 100.0, 10_000));
    assert_eq!(rx.try_recv().ok(), Some(GestureEvent::Started));

    assert!(feed(&mut r, PointerAction::Move, 210.0, 100.0, 310_000));
    assert!(r.is_recognizing());

    feed(&mut r, PointerAction::Move, 220.0, 100.0, 310_001);
    assert!(!r.is_recognizing());
    assert!(matches!(rx.try_recv().ok(), Some(GestureEvent::Cancelled(_))));
}

#[test]
fn test_route_sampling_respects_min_step() {
    let (mut r, _rx) = recognizer();

    feed(&mut r, PointerAction::Down, 100.0, 100.0, 0);
    feed(&mut r, PointerAction::Move, 105.0, 100.0, 5_000);
    feed(&mut r, PointerAction::Move, 110.0, 100.0, 10_000);
    feed(&mut r, PointerAction::Move, 120.0, 100.0, 15_000);

    assert_eq!(r.pointer_route().len(), 2);
    assert_eq!(r.pointer_route()[1].x, 120.0);
}

#[test]
fn test_timer_after_swipe_is_noop() {
    let (mut r, rx) = recognizer();

    feed(&mut r, PointerAction::Down, 100.0, 100.0, 0);
    feed(&mut r, PointerAction::Move, 100.0, 300.0, 10_000);
    feed(&mut r, PointerAction::Up, 100.0, 400.0, 20_000);
    r.on_time_advanced(5_000_000);

    let events: Vec<_> = rx.try_iter().collect();
    assert_eq!(events, vec![GestureEvent::Started, GestureEvent::Completed(GestureType::SwipeDown)]);
    assert_eq!(r.next_deadline(), None);
}

#[test]
fn test_double_tap_hold_passes_moves_through() {
    let (mut r, rx) = recognizer();

    tap(&mut r, 100.0, 100.0, 0, 40_000);
    feed(&mut r, PointerAction::Down, 100.0, 100.0, 120_000);
    r.on_time_advanced(420_000);
    assert!(matches!(rx.try_recv().ok(), Some(GestureEvent::LongPress(_))));

    // Drag after the hold is not recognized
    assert!(!feed(&mut r, PointerAction::Move, 400.0, 100.0, 450_000));
    assert!(feed(&mut r, PointerAction::Down, 100.0, 100.0, 460_000));
    assert!(!feed(&mut r, PointerAction::Up, 400.0, 100.0, 500_000));
    r.on_time_advanced(2_000_000);

    assert!(rx.try_recv().is_err());
}
