use crate::document::ElementHandle;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlayPhase {
    Hidden,
    /// Selector not resolvable yet; `attempt` counts resolutions made so far.
    PendingAnchor {
        annotation_id: String,
        generation: u64,
        attempt: u32,
    },
    /// `anchor` is `None` for phantom placement (annotation without selector).
    Shown {
        annotation_id: String,
        anchor: Option<ElementHandle>,
    },
}

pub struct OverlayState {
    pub(in crate::player) phase: OverlayPhase,
    pub(in crate::player) generation: u64,
}

impl OverlayState {
    pub(in crate::player) fn new() -> Self {
        Self {
            phase: OverlayPhase::Hidden,
            generation: 0,
        }
    }

    /// Invalidates any in-flight anchor resolution.
    pub(in crate::player) fn bump_generation(&mut self) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        self.generation
    }

    pub(in crate::player) fn is_shown(&self) -> bool {
        matches!(self.phase, OverlayPhase::Shown { .. })
    }

    pub(in crate::player) fn is_hidden(&self) -> bool {
        matches!(self.phase, OverlayPhase::Hidden)
    }

    pub(in crate::player) fn is_pending_for(&self, id: &str, generation: u64) -> bool {
        match &self.phase {
            OverlayPhase::PendingAnchor {
                annotation_id,
                generation: pending,
                ..
            } => annotation_id == id && *pending == generation && generation == self.generation,
            _ => false,
        }
    }

    pub(in crate::player) fn annotation_id(&self) -> Option<&str> {
        match &self.phase {
            OverlayPhase::Hidden => None,
            OverlayPhase::PendingAnchor { annotation_id, .. }
            | OverlayPhase::Shown { annotation_id, .. } => Some(annotation_id),
        }
    }
}
