use super::super::Player;
use super::super::events::UiEvent;
use super::super::state::NavPhase;
use super::Effect;
use crate::clock::ClockReading;
use tracing::{debug, info};

impl Player {
    /// Crossing detection from the `(last_checked_ms, fired_id)` cursor up to `now`.
    pub(in crate::player) fn handle_tick(&mut self, reading: ClockReading, effects: &mut Vec<Effect>) {
        let Some(now) = reading.position_ms else {
            return;
        };
        self.state.last_known_ms = now;
        let last_checked = self.state.autopause.last_checked_ms;

        if now < last_checked {
            debug!(now, last_checked, "Clock moved backwards; re-arming autopause");
            self.state.autopause.sync_to(now);
            return;
        }
        if !reading.playing {
            self.state.autopause.sync_to(now);
            return;
        }

        let fired = self.state.autopause.fired_id.as_deref();
        let unacknowledged = self.state.autopause.unacknowledged.as_deref();
        let mut candidate = self.store.first_autopause_after(last_checked, fired, now);
        while let Some(skipped) = candidate.filter(|c| Some(c.id.as_str()) == unacknowledged) {
            candidate = self
                .store
                .first_autopause_after(skipped.timestamp_ms, Some(&skipped.id), now);
        }
        let Some(crossed) = candidate else {
            self.state.autopause.sync_to(now);
            return;
        };
        let id = crossed.id.clone();
        let timestamp_ms = crossed.timestamp_ms;

        info!(
            annotation = %id,
            timestamp_ms,
            overshoot_ms = now - timestamp_ms,
            "Autopause reached"
        );
        effects.push(Effect::PauseClock);
        effects.push(Effect::Notify(UiEvent::PlaybackToggled { playing: false }));
        if now > timestamp_ms {
            effects.push(Effect::SeekClock(timestamp_ms));
            self.state.phase = NavPhase::Seeking {
                annotation_id: id.clone(),
                target_ms: timestamp_ms,
            };
        } else {
            self.state.phase = NavPhase::AtBookmark {
                annotation_id: id.clone(),
            };
        }
        self.state.autopause.mark_fired(timestamp_ms, id.clone());
        self.state.last_known_ms = timestamp_ms;
        self.set_active(Some(id.clone()), effects);

        if self.config.overlay_on_autopause {
            self.request_overlay(&id, effects);
        }
    }

    /// Complete a pending seek once the engine reports ready.
    pub(in crate::player) fn settle_seek(&mut self, reading: ClockReading) {
        let NavPhase::Seeking { annotation_id, .. } = &self.state.phase else {
            return;
        };
        let Some(position_ms) = reading.position_ms else {
            return;
        };
        debug!(annotation = %annotation_id, position_ms, "Seek settled");
        self.state.last_known_ms = position_ms;
        self.state.phase = if reading.playing {
            NavPhase::Idle
        } else {
            NavPhase::AtBookmark {
                annotation_id: annotation_id.clone(),
            }
        };
    }
}
