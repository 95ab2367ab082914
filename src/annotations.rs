//! Frozen, time-ordered annotation store.
//!
//! Records arrive as loosely typed recording metadata (`RawAnnotation`) and
//! are validated once. After `load` nothing is mutated, so lookups are plain
//! binary searches over the `(timestamp_ms, id)` order.

use crate::error::StoreError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use unicode_normalization::UnicodeNormalization;

/// One point-in-time marker of a recording.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Annotation {
    pub id: String,
    pub timestamp_ms: u64,
    pub title: String,
    pub target_selector: Option<String>,
    pub autopause: bool,
    pub overlay_content: Option<String>,
}

impl Annotation {
    /// Whether landing on this annotation should open a contextual overlay.
    pub fn wants_overlay(&self) -> bool {
        self.overlay_content.is_some() || self.autopause
    }
}

/// Annotation record as found in the recording payload.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAnnotation {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default, alias = "timestamp")]
    pub timestamp_ms: Option<Value>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, alias = "selector")]
    pub target_selector: Option<String>,
    #[serde(default)]
    pub autopause: bool,
    #[serde(default, alias = "content", alias = "description")]
    pub overlay_content: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct AnnotationStore {
    sorted: Vec<Annotation>,
}

impl AnnotationStore {
    pub fn load(raw: Vec<RawAnnotation>) -> Result<Self, StoreError> {
        let mut seen = HashSet::with_capacity(raw.len());
        let mut sorted = Vec::with_capacity(raw.len());

        for (index, record) in raw.into_iter().enumerate() {
            let id = record
                .id
                .map(|id| id.trim().to_string())
                .filter(|id| !id.is_empty())
                .ok_or_else(|| StoreError::InvalidAnnotationData {
                    index,
                    reason: "missing or empty id".to_string(),
                })?;
            let timestamp_ms = record
                .timestamp_ms
                .as_ref()
                .ok_or_else(|| StoreError::InvalidAnnotationData {
                    index,
                    reason: format!("annotation '{id}' has no timestampMs"),
                })
                .and_then(|value| {
                    resolve_timestamp(value).ok_or_else(|| StoreError::InvalidAnnotationData {
                        index,
                        reason: format!("annotation '{id}' has unusable timestampMs {value}"),
                    })
                })?;
            if !seen.insert(id.clone()) {
                return Err(StoreError::DuplicateAnnotationId { id });
            }

            let title = record
                .title
                .map(|title| title.trim().to_string())
                .filter(|title| !title.is_empty())
                .unwrap_or_else(|| id.clone());
            sorted.push(Annotation {
                id,
                timestamp_ms,
                title,
                target_selector: record
                    .target_selector
                    .map(|selector| selector.trim().to_string())
                    .filter(|selector| !selector.is_empty()),
                autopause: record.autopause,
                overlay_content: record.overlay_content,
            });
        }

        sorted.sort_by(|a, b| {
            a.timestamp_ms
                .cmp(&b.timestamp_ms)
                .then_with(|| a.id.cmp(&b.id))
        });
        tracing::debug!(annotations = sorted.len(), "Built annotation store");
        Ok(Self { sorted })
    }

    pub fn sorted_all(&self) -> &[Annotation] {
        &self.sorted
    }

    pub fn len(&self) -> usize {
        self.sorted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sorted.is_empty()
    }

    pub fn by_id(&self, id: &str) -> Option<&Annotation> {
        self.sorted.iter().find(|annotation| annotation.id == id)
    }

    /// Index of the last annotation whose timestamp is `<= ms`.
    pub fn index_at_or_before(&self, ms: u64) -> Option<usize> {
        self.sorted
            .partition_point(|annotation| annotation.timestamp_ms <= ms)
            .checked_sub(1)
    }

    /// Earliest annotation strictly after `ms`; equal timestamps resolve by id.
    pub fn next_after(&self, ms: u64) -> Option<&Annotation> {
        let idx = self
            .sorted
            .partition_point(|annotation| annotation.timestamp_ms <= ms);
        self.sorted.get(idx)
    }

    /// Latest timestamp strictly before `ms`; equal timestamps resolve by id.
    pub fn last_before(&self, ms: u64) -> Option<&Annotation> {
        let end = self
            .sorted
            .partition_point(|annotation| annotation.timestamp_ms < ms);
        let latest = self.sorted.get(end.checked_sub(1)?)?.timestamp_ms;
        let start = self
            .sorted
            .partition_point(|annotation| annotation.timestamp_ms < latest);
        self.sorted.get(start)
    }

    /// Earliest autopause annotation ordered after the cursor `(after_ms, after_id)`
    /// with a timestamp no later than `upto_ms`. Without `after_id` the cursor
    /// sits past every annotation at `after_ms`.
    pub fn first_autopause_after<'a>(
        &'a self,
        after_ms: u64,
        after_id: Option<&str>,
        upto_ms: u64,
    ) -> Option<&'a Annotation> {
        let start = match after_id {
            Some(id) => self.sorted.partition_point(|annotation| {
                (annotation.timestamp_ms, annotation.id.as_str()) <= (after_ms, id)
            }),
            None => self
                .sorted
                .partition_point(|annotation| annotation.timestamp_ms <= after_ms),
        };
        self.sorted[start..]
            .iter()
            .take_while(|annotation| annotation.timestamp_ms <= upto_ms)
            .find(|annotation| annotation.autopause)
    }

    /// Title lookup: exact match first, then case-insensitive substring.
    pub fn find_by_title(&self, query: &str) -> Option<&Annotation> {
        let needle = normalize_title(query);
        if needle.is_empty() {
            return None;
        }
        self.sorted
            .iter()
            .find(|annotation| normalize_title(&annotation.title) == needle)
            .or_else(|| {
                let needle = needle.to_lowercase();
                self.sorted.iter().find(|annotation| {
                    normalize_title(&annotation.title)
                        .to_lowercase()
                        .contains(&needle)
                })
            })
    }

    /// Latest timestamp in the store, used when the payload has no duration.
    pub fn last_timestamp_ms(&self) -> u64 {
        self.sorted
            .last()
            .map(|annotation| annotation.timestamp_ms)
            .unwrap_or(0)
    }
}

fn normalize_title(text: &str) -> String {
    text.nfkc()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn resolve_timestamp(value: &Value) -> Option<u64> {
    match value {
        Value::Number(number) => number
            .as_u64()
            .or_else(|| number.as_f64().and_then(float_millis)),
        Value::String(text) => {
            let text = text.trim();
            text.parse::<u64>()
                .ok()
                .or_else(|| text.parse::<f64>().ok().and_then(float_millis))
        }
        _ => None,
    }
}

fn float_millis(value: f64) -> Option<u64> {
    if value.is_finite() && value >= 0.0 && value <= u64::MAX as f64 {
        Some(value.round() as u64)
    } else {
        None
    }
}
