//! Recording metadata loading.
//!
//! A recording ships its annotations either as a bare JSON array or wrapped
//! in an object that also carries the timeline duration.

use crate::annotations::{AnnotationStore, RawAnnotation};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::info;

/// Annotations plus the timeline length they are laid out on.
#[derive(Debug, Clone)]
pub struct Recording {
    pub store: AnnotationStore,
    pub duration_ms: u64,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RecordingPayload {
    Bare(Vec<RawAnnotation>),
    Wrapped {
        #[serde(default, rename = "durationMs", alias = "duration")]
        duration_ms: Option<u64>,
        #[serde(default)]
        annotations: Vec<RawAnnotation>,
    },
}

pub fn parse_recording(contents: &str) -> Result<Recording> {
    let payload: RecordingPayload =
        serde_json::from_str(contents).context("Recording metadata is not valid JSON")?;
    let (raw, declared_ms) = match payload {
        RecordingPayload::Bare(raw) => (raw, None),
        RecordingPayload::Wrapped {
            duration_ms,
            annotations,
        } => (annotations, duration_ms),
    };
    let store = AnnotationStore::load(raw).context("Recording annotations are invalid")?;
    let duration_ms = declared_ms
        .unwrap_or(0)
        .max(store.last_timestamp_ms());
    Ok(Recording { store, duration_ms })
}

pub fn load_recording(path: &Path) -> Result<Recording> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read recording {}", path.display()))?;
    let recording = parse_recording(&contents)
        .with_context(|| format!("Failed to load recording {}", path.display()))?;
    info!(
        path = %path.display(),
        annotations = recording.store.len(),
        duration_ms = recording.duration_ms,
        "Loaded recording metadata"
    );
    Ok(recording)
}
