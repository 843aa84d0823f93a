//! Serial pipeline worker.
//!
//! A single tokio task owns the pipeline. Samples and timer expiries are
//! handled on that task only, so they never race. The worker's clock starts
//! at zero when it is spawned; samples should be stamped with
//! [`PipelineWorker::now_us`].

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use super::{Pipeline, PipelineError};
use crate::accessibility::AccessibilityEventInfo;
use crate::input::{KeyEvent, PointerEvent, SourceType};

/// Work items for the worker task.
#[derive(Debug)]
enum Command {
    Pointer(PointerEvent),
    Key(KeyEvent),
    Accessibility(AccessibilityEventInfo),
    Clear(SourceType),
    Shutdown,
}

/// Handle to a running pipeline worker.
#[derive(Debug)]
pub struct PipelineWorker {
    tx: mpsc::UnboundedSender<Command>,
    handle: JoinHandle<()>,
    origin: Instant,
}

impl PipelineWorker {
    /// Spawn a worker owning `pipeline`. Must be called within a tokio runtime.
    pub fn spawn(pipeline: Pipeline) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let origin = Instant::now();
        let handle = tokio::spawn(run(pipeline, rx, origin));
        tracing::info!("Pipeline worker started");

        Self { tx, handle, origin }
    }

    /// Microseconds since the worker started.
    pub fn now_us(&self) -> u64 {
        elapsed_us(self.origin)
    }

    /// Queue a pointer sample.
    pub fn submit(&self, event: PointerEvent) -> Result<(), PipelineError> {
        self.send(Command::Pointer(event))
    }

    /// Queue a key event.
    pub fn submit_key(&self, event: KeyEvent) -> Result<(), PipelineError> {
        self.send(Command::Key(event))
    }

    /// Queue an accessibility event.
    pub fn submit_accessibility(&self, event: AccessibilityEventInfo) -> Result<(), PipelineError> {
        self.send(Command::Accessibility(event))
    }

    /// Queue a clear request for `source`.
    pub fn clear_events(&self, source: SourceType) -> Result<(), PipelineError> {
        self.send(Command::Clear(source))
    }

    /// Stop the worker after queued work, cancelling pending timers.
    pub async fn shutdown(self) -> Result<(), PipelineError> {
        // The task may already be gone; joining reports that.
        let _ = self.tx.send(Command::Shutdown);
        self.handle.await.map_err(|e| {
            tracing::warn!("Pipeline worker failed: {}", e);
            PipelineError::WorkerClosed
        })
    }

    fn send(&self, command: Command) -> Result<(), PipelineError> {
        self.tx.send(command).map_err(|_| PipelineError::WorkerClosed)
    }
}

fn elapsed_us(origin: Instant) -> u64 {
    u64::try_from(origin.elapsed().as_micros()).unwrap_or(u64::MAX)
}

async fn run(mut pipeline: Pipeline, mut rx: mpsc::UnboundedReceiver<Command>, origin: Instant) {
    loop {
        let deadline = pipeline.next_deadline();
        let wake_at = deadline
            .map(|d| origin + Duration::from_micros(d))
            .unwrap_or_else(Instant::now);

        tokio::select! {
            command = rx.recv() => match command {
                Some(Command::Pointer(event)) => {
                    pipeline.on_pointer_event(event);
                }
                Some(Command::Key(event)) => {
                    pipeline.on_key_event(event);
                }
                Some(Command::Accessibility(event)) => {
                    pipeline.on_accessibility_event(event);
                }
                Some(Command::Clear(source)) => {
                    pipeline.clear_events(source);
                }
                Some(Command::Shutdown) | None => break,
            },
            _ = tokio::time::sleep_until(wake_at), if deadline.is_some() => {
                let now = elapsed_us(origin).max(deadline.unwrap_or(0));
                pipeline.advance_to(now);
            }
        }
    }

    pipeline.destroy();
    tracing::info!("Pipeline worker stopped");
}
