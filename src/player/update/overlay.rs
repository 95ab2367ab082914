use super::super::Player;
use super::super::events::{OverlayView, UiEvent};
use super::super::state::OverlayPhase;
use super::Effect;
use crate::document::ElementHandle;
use crate::error::OverlayError;
use tracing::{debug, info, warn};

impl Player {
    /// Open the overlay for `id`, replacing whatever overlay is up.
    pub(in crate::player) fn request_overlay(&mut self, id: &str, effects: &mut Vec<Effect>) {
        if self.state.overlay.annotation_id() == Some(id) {
            debug!(annotation = %id, "Overlay already requested");
            return;
        }
        let Some(selector) = self
            .store
            .by_id(id)
            .map(|annotation| annotation.target_selector.clone())
        else {
            return;
        };

        self.clear_overlay(effects);
        let generation = self.state.overlay.bump_generation();

        if selector.is_none() {
            info!(annotation = %id, "Showing overlay without anchor");
            self.state.overlay.phase = OverlayPhase::Shown {
                annotation_id: id.to_string(),
                anchor: None,
            };
            self.notify_overlay(effects);
            return;
        }

        self.state.overlay.phase = OverlayPhase::PendingAnchor {
            annotation_id: id.to_string(),
            generation,
            attempt: 0,
        };
        self.notify_overlay(effects);
        effects.push(Effect::ResolveAnchor {
            annotation_id: id.to_string(),
            generation,
            attempt: 1,
        });
    }

    /// Hide any overlay and invalidate in-flight resolutions.
    pub(in crate::player) fn clear_overlay(&mut self, effects: &mut Vec<Effect>) {
        if self.state.overlay.is_hidden() {
            return;
        }
        self.state.overlay.bump_generation();
        self.state.overlay.phase = OverlayPhase::Hidden;
        self.notify_overlay(effects);
    }

    /// Returns false unless an overlay was actually shown.
    pub(in crate::player) fn handle_dismiss_overlay(&mut self, effects: &mut Vec<Effect>) -> bool {
        if !self.state.overlay.is_shown() {
            return false;
        }
        if let Some(id) = self.state.autopause.acknowledge() {
            debug!(annotation = %id, "Autopause acknowledged by dismissal");
        }
        info!(annotation = ?self.state.overlay.annotation_id(), "Overlay dismissed");
        self.clear_overlay(effects);
        true
    }

    pub(in crate::player) fn handle_retry_anchor(
        &mut self,
        annotation_id: String,
        generation: u64,
        attempt: u32,
        effects: &mut Vec<Effect>,
    ) {
        if !self.state.overlay.is_pending_for(&annotation_id, generation) {
            debug!(annotation = %annotation_id, generation, "Dropping stale anchor retry");
            return;
        }
        effects.push(Effect::ResolveAnchor {
            annotation_id,
            generation,
            attempt,
        });
    }

    /// Record the outcome of one resolution attempt.
    pub(in crate::player) fn on_anchor_attempt(
        &mut self,
        annotation_id: String,
        generation: u64,
        attempt: u32,
        resolved: Option<ElementHandle>,
        effects: &mut Vec<Effect>,
    ) {
        if !self.state.overlay.is_pending_for(&annotation_id, generation) {
            debug!(annotation = %annotation_id, generation, "Discarding superseded anchor");
            return;
        }
        match resolved {
            Some(anchor) => {
                info!(annotation = %annotation_id, attempt, anchor = %anchor.0, "Overlay anchored");
                self.state.overlay.phase = OverlayPhase::Shown {
                    annotation_id,
                    anchor: Some(anchor),
                };
                self.notify_overlay(effects);
            }
            None if attempt >= self.config.anchor_retry_attempts => {
                let err = OverlayError::AnchorNotFound {
                    id: annotation_id.clone(),
                    attempts: attempt,
                };
                warn!(%err, "Giving up on overlay anchor");
                self.state.overlay.bump_generation();
                self.state.overlay.phase = OverlayPhase::Hidden;
                effects.push(Effect::Notify(UiEvent::AnchorNotFound { id: annotation_id }));
                self.notify_overlay(effects);
            }
            None => {
                debug!(annotation = %annotation_id, attempt, "Anchor not resolvable yet");
                self.state.overlay.phase = OverlayPhase::PendingAnchor {
                    annotation_id: annotation_id.clone(),
                    generation,
                    attempt,
                };
                effects.push(Effect::ScheduleAnchorRetry {
                    annotation_id,
                    generation,
                    attempt: attempt + 1,
                });
            }
        }
    }

    pub(in crate::player) fn overlay_view(&self) -> OverlayView {
        match &self.state.overlay.phase {
            OverlayPhase::Hidden => OverlayView::Hidden,
            OverlayPhase::PendingAnchor { annotation_id, .. } => OverlayView::PendingAnchor {
                annotation_id: annotation_id.clone(),
            },
            OverlayPhase::Shown {
                annotation_id,
                anchor,
            } => {
                let annotation = self.store.by_id(annotation_id);
                OverlayView::Shown {
                    annotation_id: annotation_id.clone(),
                    title: annotation
                        .map(|a| a.title.clone())
                        .unwrap_or_else(|| annotation_id.clone()),
                    content: annotation.and_then(|a| a.overlay_content.clone()),
                    anchor: anchor.clone(),
                }
            }
        }
    }

    fn notify_overlay(&self, effects: &mut Vec<Effect>) {
        effects.push(Effect::Notify(UiEvent::OverlayStateChanged {
            state: self.overlay_view(),
        }));
    }
}
