use super::messages::Message;
use crate::document::ElementHandle;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use ts_rs::TS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum Direction {
    Forward,
    Backward,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Direction::Forward => "after",
            Direction::Backward => "before",
        };
        write!(f, "{}", label)
    }
}

/// Notifications for the UI layer.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(tag = "type", rename_all = "camelCase")]
#[ts(export)]
pub enum UiEvent {
    AnnotationsLoaded {
        annotations: Vec<TocItem>,
        markers: Vec<MarkerView>,
    },
    ActiveAnnotationChanged {
        id: Option<String>,
    },
    OverlayStateChanged {
        state: OverlayView,
    },
    NoMoreBookmarks {
        direction: Direction,
    },
    AnchorNotFound {
        id: String,
    },
    TocToggled {
        open: bool,
    },
    PlaybackToggled {
        playing: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(tag = "phase", rename_all = "camelCase")]
#[ts(export)]
pub enum OverlayView {
    Hidden,
    PendingAnchor {
        #[serde(rename = "annotationId")]
        annotation_id: String,
    },
    Shown {
        #[serde(rename = "annotationId")]
        annotation_id: String,
        title: String,
        content: Option<String>,
        /// `None` places the popover without an anchor element.
        anchor: Option<ElementHandle>,
    },
}

impl OverlayView {
    pub fn is_shown(&self) -> bool {
        matches!(self, OverlayView::Shown { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct TocItem {
    pub id: String,
    pub title: String,
    #[ts(type = "number")]
    pub timestamp_ms: u64,
    pub autopause: bool,
    pub active: bool,
}

/// Progress-bar marker; `position_pct` is relative to the recording duration.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct MarkerView {
    pub id: String,
    pub title: String,
    pub position_pct: f64,
    pub autopause: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PlayerSnapshot {
    #[ts(type = "number | null")]
    pub current_time_ms: Option<u64>,
    #[ts(type = "number")]
    pub duration_ms: u64,
    pub playing: bool,
    pub active_annotation_id: Option<String>,
    pub toc_open: bool,
    pub overlay: OverlayView,
    pub toc: Vec<TocItem>,
    pub markers: Vec<MarkerView>,
}

/// Work handed back to the host after a dispatch.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Notify(UiEvent),
    /// Deliver `message` back to `Player::update` after `delay`.
    After { delay: Duration, message: Message },
}
