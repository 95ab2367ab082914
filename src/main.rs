//! Entry point for the scripted replay session.
//!
//! Responsibilities here are intentionally minimal:
//! - Parse command-line arguments.
//! - Load user configuration from `conf/config.toml`.
//! - Load the recording metadata and mount the player over a simulated replay.
//! - Run the scripted steps in virtual time, printing UI events as JSON lines.

use anyhow::{Context, Result, anyhow};
use rehearseur::annotations::AnnotationStore;
use rehearseur::config::load_config;
use rehearseur::player::{Message, Player};
use rehearseur::recording::load_recording;
use rehearseur::runtime::VirtualRuntime;
use rehearseur::simulation::SimulatedReplay;
use std::env;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, error, info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*, reload};

type ReloadHandle = reload::Handle<EnvFilter, tracing_subscriber::Registry>;

const DEFAULT_SCRIPT: &[&str] = &["play", "wait=30000"];

fn main() {
    let reload_handle = init_tracing();
    if let Err(err) = run(&reload_handle) {
        error!("{err:?}");
        std::process::exit(1);
    }
}

fn run(reload_handle: &ReloadHandle) -> Result<()> {
    let (recording_path, steps) = parse_args()?;
    let config = load_config(Path::new("conf/config.toml"));
    set_log_level(reload_handle, config.log_level.as_filter_str());
    info!(
        path = %recording_path.display(),
        level = %config.log_level,
        steps = steps.len(),
        "Starting scripted replay session"
    );

    let recording = load_recording(&recording_path)?;
    let replay = SimulatedReplay::from_recording(&recording);
    let player = Player::new(recording, config);
    let mut runtime = VirtualRuntime::new(player, replay);
    print_events(&mut runtime)?;

    for step in steps {
        info!(?step, at_ms = runtime.now_ms(), "Running script step");
        step.apply(&mut runtime);
        print_events(&mut runtime)?;
    }
    Ok(())
}

/// One scripted user action.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Step {
    Play,
    Wait(u64),
    Key(String),
    Toc(String),
    Next,
    Prev,
    Dismiss,
    Seek(u64),
}

impl FromStr for Step {
    type Err = anyhow::Error;

    fn from_str(raw: &str) -> Result<Self> {
        let (name, value) = match raw.split_once('=') {
            Some((name, value)) => (name.trim(), Some(value.trim())),
            None => (raw.trim(), None),
        };
        let millis = |value: Option<&str>| -> Result<u64> {
            let value = value.ok_or_else(|| anyhow!("Step '{raw}' needs a value"))?;
            value
                .parse()
                .with_context(|| format!("Step '{raw}' expects milliseconds"))
        };
        let text = |value: Option<&str>| -> Result<String> {
            value
                .filter(|value| !value.is_empty())
                .map(str::to_string)
                .ok_or_else(|| anyhow!("Step '{raw}' needs a value"))
        };
        match name {
            "play" => Ok(Step::Play),
            "wait" => Ok(Step::Wait(millis(value)?)),
            "key" => Ok(Step::Key(text(value)?)),
            "toc" => Ok(Step::Toc(text(value)?)),
            "next" => Ok(Step::Next),
            "prev" => Ok(Step::Prev),
            "dismiss" => Ok(Step::Dismiss),
            "seek" => Ok(Step::Seek(millis(value)?)),
            other => Err(anyhow!("Unknown script step: {other}")),
        }
    }
}

impl Step {
    fn apply(self, runtime: &mut VirtualRuntime<SimulatedReplay>) {
        match self {
            Step::Play => runtime.dispatch(Message::Play),
            Step::Wait(ms) => runtime.run_for(ms),
            Step::Key(key) => {
                if runtime.press(&key).is_none() {
                    warn!(%key, "Key is not bound");
                }
            }
            Step::Toc(query) => {
                let id = toc_target(runtime.player().store(), &query);
                runtime.dispatch(Message::SelectTocItem { id });
            }
            Step::Next => runtime.dispatch(Message::NextBookmark),
            Step::Prev => runtime.dispatch(Message::PreviousBookmark),
            Step::Dismiss => runtime.dispatch(Message::DismissOverlay),
            Step::Seek(ms) => runtime.scrub_to(ms),
        }
    }
}

/// `toc=` names an annotation by id, or by title when no id matches.
fn toc_target(store: &AnnotationStore, query: &str) -> String {
    if store.by_id(query).is_some() {
        return query.to_string();
    }
    match store.find_by_title(query) {
        Some(annotation) => {
            debug!(%query, annotation = %annotation.id, "TOC step matched by title");
            annotation.id.clone()
        }
        None => query.to_string(),
    }
}

fn print_events(runtime: &mut VirtualRuntime<SimulatedReplay>) -> Result<()> {
    for event in runtime.take_events() {
        let line = serde_json::to_string(&event).context("Failed to encode UI event")?;
        println!("{line}");
    }
    Ok(())
}

fn parse_args() -> Result<(PathBuf, Vec<Step>)> {
    let mut args = env::args().skip(1);
    let path = args
        .next()
        .ok_or_else(|| anyhow!("Usage: rehearseur <recording.json> [step ...]"))?;

    let path = PathBuf::from(path);
    if !path.exists() {
        return Err(anyhow!("File not found: {}", path.as_path().display()));
    }

    let raw_steps: Vec<String> = args.collect();
    let steps = if raw_steps.is_empty() {
        DEFAULT_SCRIPT
            .iter()
            .map(|step| step.parse())
            .collect::<Result<Vec<Step>>>()?
    } else {
        raw_steps
            .iter()
            .map(|step| step.parse())
            .collect::<Result<Vec<Step>>>()?
    };
    Ok((path, steps))
}

fn init_tracing() -> ReloadHandle {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    let (filter_layer, handle) = reload::Layer::new(env_filter);
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_filter(filter_layer),
        )
        .init();
    warn!("Logging initialized; override level with config.log_level or RUST_LOG");
    handle
}

fn set_log_level(handle: &ReloadHandle, level: &str) {
    let parsed = EnvFilter::builder()
        .parse(level)
        .unwrap_or_else(|_| EnvFilter::new("debug"));
    if let Err(err) = handle.modify(|filter| *filter = parsed.clone()) {
        warn!(%level, "Failed to update log level from config: {err}");
    } else {
        info!(%level, "Log level set from config");
    }
}
