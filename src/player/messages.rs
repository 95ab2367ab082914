use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Inputs accepted by `Player::update`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Message {
    /// Clock polling; the host sends it while `Player::wants_ticks` holds.
    Tick,
    KeyPressed(KeyInput),
    TogglePlayPause,
    Play,
    Pause,
    NextBookmark,
    PreviousBookmark,
    GotoAnnotation {
        id: String,
    },
    SelectTocItem {
        id: String,
    },
    ToggleToc,
    DismissOverlay,
    /// The user scrubbed the timeline outside of bookmark navigation.
    Seeked {
        #[serde(rename = "positionMs")]
        position_ms: u64,
    },
    RetryAnchor {
        #[serde(rename = "annotationId")]
        annotation_id: String,
        generation: u64,
        attempt: u32,
    },
}

/// Raw keyboard input as reported by the page (`KeyboardEvent.key`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct KeyInput {
    pub key: String,
    #[serde(default)]
    pub modifiers: Modifiers,
    /// Focus is inside a text input or other editable control.
    #[serde(default)]
    pub editable_focus: bool,
}

impl KeyInput {
    pub fn key(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            modifiers: Modifiers::default(),
            editable_focus: false,
        }
    }

    pub fn in_editable(mut self) -> Self {
        self.editable_focus = true;
        self
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Modifiers {
    #[serde(default)]
    pub ctrl: bool,
    #[serde(default)]
    pub alt: bool,
    #[serde(default)]
    pub shift: bool,
    #[serde(default)]
    pub meta: bool,
}

impl Modifiers {
    pub const CTRL: Modifiers = Modifiers {
        ctrl: true,
        alt: false,
        shift: false,
        meta: false,
    };
    pub const SHIFT: Modifiers = Modifiers {
        ctrl: false,
        alt: false,
        shift: true,
        meta: false,
    };
}

impl std::ops::BitOr for Modifiers {
    type Output = Modifiers;

    fn bitor(self, rhs: Self) -> Self::Output {
        Modifiers {
            ctrl: self.ctrl || rhs.ctrl,
            alt: self.alt || rhs.alt,
            shift: self.shift || rhs.shift,
            meta: self.meta || rhs.meta,
        }
    }
}
