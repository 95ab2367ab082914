use super::super::Player;
use super::super::events::{Direction, UiEvent};
use super::super::state::NavPhase;
use super::Effect;
use crate::clock::ClockReading;
use crate::error::NavigationError;
use tracing::{info, warn};

impl Player {
    pub(in crate::player) fn handle_next(
        &mut self,
        reading: ClockReading,
        effects: &mut Vec<Effect>,
    ) -> Result<String, NavigationError> {
        let origin = self.state.reference_position(reading.position_ms);
        let Some(target) = self.store.next_after(origin).map(|a| a.id.clone()) else {
            return Err(self.report_boundary(Direction::Forward, origin, effects));
        };
        self.navigate_to(&target, reading, effects);
        Ok(target)
    }

    pub(in crate::player) fn handle_previous(
        &mut self,
        reading: ClockReading,
        effects: &mut Vec<Effect>,
    ) -> Result<String, NavigationError> {
        let origin = self.state.reference_position(reading.position_ms);
        let mut candidate = self.store.last_before(origin);

        // Sitting just past the active bookmark: step over it instead of replaying it.
        if let Some(annotation) = candidate {
            let on_active = self.state.active_annotation_id.as_deref() == Some(annotation.id.as_str());
            let within = origin.saturating_sub(annotation.timestamp_ms)
                <= self.config.previous_snap_tolerance_ms;
            if on_active && within {
                candidate = self.store.last_before(annotation.timestamp_ms);
            }
        }

        let Some(target) = candidate.map(|a| a.id.clone()) else {
            return Err(self.report_boundary(Direction::Backward, origin, effects));
        };
        self.navigate_to(&target, reading, effects);
        Ok(target)
    }

    pub(in crate::player) fn handle_goto(
        &mut self,
        id: &str,
        reading: ClockReading,
        effects: &mut Vec<Effect>,
    ) -> Result<String, NavigationError> {
        if self.store.by_id(id).is_none() {
            warn!(annotation = %id, "Navigation to unknown annotation");
            return Err(NavigationError::UnknownAnnotationId { id: id.to_string() });
        }
        self.navigate_to(id, reading, effects);
        Ok(id.to_string())
    }

    /// Pause, seek and make `id` the active annotation. `id` must exist.
    fn navigate_to(&mut self, id: &str, reading: ClockReading, effects: &mut Vec<Effect>) {
        let Some(annotation) = self.store.by_id(id) else {
            return;
        };
        let target_ms = annotation.timestamp_ms;
        let wants_overlay = annotation.wants_overlay();

        if let NavPhase::Seeking {
            annotation_id: superseded,
            ..
        } = &self.state.phase
        {
            info!(superseded = %superseded, annotation = %id, "Superseding in-flight seek");
        }
        info!(annotation = %id, target_ms, "Navigating to bookmark");

        if reading.playing {
            effects.push(Effect::PauseClock);
            effects.push(Effect::Notify(UiEvent::PlaybackToggled { playing: false }));
        }
        effects.push(Effect::SeekClock(target_ms));

        self.state.autopause.rearm_at(target_ms);
        self.state.last_known_ms = target_ms;
        self.state.phase = NavPhase::Seeking {
            annotation_id: id.to_string(),
            target_ms,
        };
        self.set_active(Some(id.to_string()), effects);

        self.clear_overlay(effects);
        if wants_overlay {
            self.request_overlay(id, effects);
        }
    }

    pub(in crate::player) fn set_active(&mut self, id: Option<String>, effects: &mut Vec<Effect>) {
        if self.state.active_annotation_id == id {
            return;
        }
        self.state.active_annotation_id = id.clone();
        effects.push(Effect::Notify(UiEvent::ActiveAnnotationChanged { id }));
    }

    fn report_boundary(
        &mut self,
        direction: Direction,
        origin: u64,
        effects: &mut Vec<Effect>,
    ) -> NavigationError {
        info!(%direction, position_ms = origin, "No more bookmarks");
        effects.push(Effect::Notify(UiEvent::NoMoreBookmarks { direction }));
        NavigationError::NoMoreBookmarks { direction }
    }
}
