//! Integration tests for the serial pipeline worker.
//!
//! Time is paused, so timer deadlines are reached deterministically.

use std::time::Duration;

use a11y_touch::accessibility::DisplayMetrics;
use a11y_touch::input::{GestureType, Point, PointerAction, PointerEvent, SourceType};
use a11y_touch::pipeline::{ChannelGestureListener, GestureEvent, GestureInjectPath, PipelineWorker};
use a11y_touch::Pipeline;

fn worker() -> (PipelineWorker, crossbeam::channel::Receiver<GestureEvent>) {
    let (listener, rx) = ChannelGestureListener::new();
    let pipeline = Pipeline::builder()
        .with_listener(listener)
        .with_display(&DisplayMetrics::new(1080, 2340, 160.0, 1.0))
        .build()
        .unwrap();
    (PipelineWorker::spawn(pipeline), rx)
}

#[tokio::test(start_paused = true)]
async fn test_long_press_fires_while_finger_down() {
    let (worker, rx) = worker();

    worker
        .submit(PointerEvent::touch(PointerAction::Down, 50.0, 50.0, worker.now_us()))
        .unwrap();
    tokio::time::sleep(Duration::from_millis(250)).await;
    assert!(rx.try_recv().is_err());

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(matches!(rx.try_recv().ok(), Some(GestureEvent::LongPress(_))));

    worker.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_swipe_through_worker() {
    let (worker, rx) = worker();

    let path = GestureInjectPath::new(vec![Point::new(100.0, 500.0), Point::new(100.0, 100.0)], 30_000)
        .with_start_time(worker.now_us());
    for event in path.to_events() {
        worker.submit(event).unwrap();
    }

    tokio::time::sleep(Duration::from_millis(50)).await;
    let events: Vec<_> = rx.try_iter().collect();
    assert_eq!(events, vec![GestureEvent::Started, GestureEvent::Completed(GestureType::SwipeUp)]);

    worker.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_shutdown_cancels_pending_timers() {
    let (worker, rx) = worker();

    worker
        .submit(PointerEvent::touch(PointerAction::Down, 50.0, 50.0, worker.now_us()))
        .unwrap();
    tokio::time::sleep(Duration::from_millis(10)).await;
    worker.shutdown().await.unwrap();

    tokio::time::sleep(Duration::from_secs(1)).await;
    assert!(rx.try_recv().is_err());
}

#[tokio::test(start_paused = true)]
async fn test_clear_aborts_pending_tap() {
    let (worker, rx) = worker();

    let t = worker.now_us();
    worker.submit(PointerEvent::touch(PointerAction::Down, 50.0, 50.0, t)).unwrap();
    worker.submit(PointerEvent::touch(PointerAction::Up, 50.0, 50.0, t + 20_000)).unwrap();
    worker.clear_events(SourceType::Touchscreen).unwrap();

    tokio::time::sleep(Duration::from_secs(1)).await;
    assert!(rx.try_recv().is_err());

    worker.shutdown().await.unwrap();
}
