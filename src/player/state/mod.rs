mod autopause;
mod overlay;

pub use autopause::AutopauseState;
pub use overlay::{OverlayPhase, OverlayState};

/// Bookmark navigator phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavPhase {
    Idle,
    /// A seek was issued and the engine has not reported ready since.
    Seeking {
        annotation_id: String,
        target_ms: u64,
    },
    AtBookmark {
        annotation_id: String,
    },
}

/// Read-only view of the overlay slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayRef<'a> {
    pub annotation_id: &'a str,
    pub visible: bool,
}

/// Mutable session state; owned by the `Player`, read through accessors.
pub struct NavigationState {
    pub(in crate::player) active_annotation_id: Option<String>,
    pub(in crate::player) toc_open: bool,
    pub(in crate::player) phase: NavPhase,
    pub(in crate::player) overlay: OverlayState,
    pub(in crate::player) autopause: AutopauseState,
    pub(in crate::player) last_known_ms: u64,
}

impl NavigationState {
    pub(in crate::player) fn new(toc_open: bool) -> Self {
        Self {
            active_annotation_id: None,
            toc_open,
            phase: NavPhase::Idle,
            overlay: OverlayState::new(),
            autopause: AutopauseState::new(),
            last_known_ms: 0,
        }
    }

    pub fn active_annotation_id(&self) -> Option<&str> {
        self.active_annotation_id.as_deref()
    }

    pub fn toc_open(&self) -> bool {
        self.toc_open
    }

    pub fn phase(&self) -> &NavPhase {
        &self.phase
    }

    pub fn overlay_phase(&self) -> &OverlayPhase {
        &self.overlay.phase
    }

    pub fn overlay(&self) -> Option<OverlayRef<'_>> {
        self.overlay.annotation_id().map(|annotation_id| OverlayRef {
            annotation_id,
            visible: self.overlay.is_shown(),
        })
    }

    pub fn awaiting_autopause_ack(&self) -> Option<&str> {
        self.autopause.unacknowledged.as_deref()
    }

    /// Position used as the origin for relative navigation.
    pub(in crate::player) fn reference_position(&self, observed_ms: Option<u64>) -> u64 {
        match &self.phase {
            NavPhase::Seeking { target_ms, .. } => *target_ms,
            _ => observed_ms.unwrap_or(self.last_known_ms),
        }
    }
}
