//! A11y Touch - gesture replay tool
//!
//! Feeds recorded pointer samples (or scripted gesture paths) through a
//! pipeline built from a configuration file and prints what comes out.
//!
//! Usage: `a11y-touch <config.toml|-> <samples.json>`

use std::path::Path;

use a11y_touch::pipeline::{ChannelGestureListener, ChannelSink, ForwardedEvent, GestureEvent, GestureInjectPath};
use a11y_touch::storage::config::load_config_from;
use a11y_touch::{AppConfig, Pipeline, PointerEvent};
use anyhow::{bail, Context};
use crossbeam::channel::Receiver;
use serde::Deserialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Replay input: recorded samples or scripted paths.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ReplayInput {
    Samples(Vec<PointerEvent>),
    Paths(Vec<GestureInjectPath>),
}

impl ReplayInput {
    fn into_samples(self) -> Vec<PointerEvent> {
        match self {
            ReplayInput::Samples(samples) => samples,
            ReplayInput::Paths(paths) => paths.iter().flat_map(GestureInjectPath::to_events).collect(),
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting a11y-touch v{}", env!("CARGO_PKG_VERSION"));

    let args: Vec<String> = std::env::args().collect();
    if args.len() != 3 {
        bail!("usage: a11y-touch <config.toml|-> <samples.json>");
    }

    let config = if args[1] == "-" {
        AppConfig::default()
    } else {
        load_config_from(Path::new(&args[1])).with_context(|| format!("loading config {}", args[1]))?
    };

    let content = std::fs::read_to_string(&args[2]).with_context(|| format!("reading {}", args[2]))?;
    let input: ReplayInput = serde_json::from_str(&content).with_context(|| format!("parsing {}", args[2]))?;
    let samples = input.into_samples();
    tracing::info!(samples = samples.len(), "Replaying samples");

    let (listener, gestures) = ChannelGestureListener::new();
    let (sink, forwarded) = ChannelSink::new();
    let mut pipeline = Pipeline::builder()
        .with_config(config)
        .with_listener(listener)
        .with_output(sink)
        .build()
        .context("building pipeline")?;

    for sample in samples {
        let handled = pipeline.on_pointer_event(sample);
        tracing::debug!(handled, "Sample processed");
        report(pipeline.now(), &gestures, &forwarded);
    }

    pipeline.flush_timers();
    report(pipeline.now(), &gestures, &forwarded);
    pipeline.destroy();

    Ok(())
}

fn report(now: u64, gestures: &Receiver<GestureEvent>, forwarded: &Receiver<ForwardedEvent>) {
    for event in forwarded.try_iter() {
        if let ForwardedEvent::Pointer(sample) = event {
            println!("{:>10}us forwarded {}", sample.action_time(), sample.action());
        }
    }
    for gesture in gestures.try_iter() {
        println!("{:>10}us gesture {}", now, gesture);
    }
}
