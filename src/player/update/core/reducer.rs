use super::super::super::Player;
use super::super::super::events::UiEvent;
use super::super::super::messages::Message;
use super::super::super::state::NavPhase;
use super::super::Effect;
use crate::clock::ClockReading;
use tracing::{debug, info};

impl Player {
    pub(in crate::player) fn reduce(
        &mut self,
        message: Message,
        reading: ClockReading,
        effects: &mut Vec<Effect>,
    ) {
        match message {
            Message::Tick => self.handle_tick(reading, effects),
            Message::KeyPressed(input) => {
                if let Some(routed) = self.shortcut_message_for_key(&input) {
                    self.reduce(routed, reading, effects);
                }
            }
            Message::TogglePlayPause => self.handle_toggle_play_pause(reading, effects),
            Message::Play => self.handle_play(reading, effects),
            Message::Pause => self.handle_pause(reading, effects),
            Message::NextBookmark => {
                if let Err(err) = self.handle_next(reading, effects) {
                    debug!(%err, "Next bookmark not taken");
                }
            }
            Message::PreviousBookmark => {
                if let Err(err) = self.handle_previous(reading, effects) {
                    debug!(%err, "Previous bookmark not taken");
                }
            }
            Message::GotoAnnotation { id } | Message::SelectTocItem { id } => {
                if let Err(err) = self.handle_goto(&id, reading, effects) {
                    debug!(%err, "Direct navigation rejected");
                }
            }
            Message::ToggleToc => self.handle_toggle_toc(effects),
            Message::DismissOverlay => {
                self.handle_dismiss_overlay(effects);
            }
            Message::Seeked { position_ms } => self.handle_seeked(position_ms, effects),
            Message::RetryAnchor {
                annotation_id,
                generation,
                attempt,
            } => self.handle_retry_anchor(annotation_id, generation, attempt, effects),
        }
    }

    pub(in crate::player) fn handle_toggle_play_pause(
        &mut self,
        reading: ClockReading,
        effects: &mut Vec<Effect>,
    ) {
        if reading.playing {
            self.handle_pause(reading, effects);
        } else {
            self.handle_play(reading, effects);
        }
    }

    pub(in crate::player) fn handle_play(&mut self, reading: ClockReading, effects: &mut Vec<Effect>) {
        if reading.playing {
            return;
        }
        if let Some(id) = self.state.autopause.acknowledge() {
            debug!(annotation = %id, "Autopause acknowledged by play");
        }
        if let Some(position_ms) = reading.position_ms {
            self.state.autopause.sync_to(position_ms);
            self.state.last_known_ms = position_ms;
        }
        self.clear_overlay(effects);
        if matches!(self.state.phase, NavPhase::AtBookmark { .. }) {
            self.state.phase = NavPhase::Idle;
        }
        info!(position_ms = ?reading.position_ms, "Resuming playback");
        effects.push(Effect::PlayClock);
        effects.push(Effect::Notify(UiEvent::PlaybackToggled { playing: true }));
    }

    pub(in crate::player) fn handle_pause(&mut self, reading: ClockReading, effects: &mut Vec<Effect>) {
        if !reading.playing {
            return;
        }
        info!(position_ms = ?reading.position_ms, "Pausing playback");
        effects.push(Effect::PauseClock);
        effects.push(Effect::Notify(UiEvent::PlaybackToggled { playing: false }));
    }

    pub(in crate::player) fn handle_toggle_toc(&mut self, effects: &mut Vec<Effect>) {
        self.state.toc_open = !self.state.toc_open;
        debug!(open = self.state.toc_open, "Toggled table of contents");
        effects.push(Effect::Notify(UiEvent::TocToggled {
            open: self.state.toc_open,
        }));
    }

    pub(in crate::player) fn handle_seeked(&mut self, position_ms: u64, effects: &mut Vec<Effect>) {
        info!(position_ms, "Timeline scrubbed");
        self.clear_overlay(effects);
        self.state.autopause.rearm_at(position_ms);
        self.state.last_known_ms = position_ms;
        self.state.phase = NavPhase::Idle;
    }
}
