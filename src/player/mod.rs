//! Annotation-driven navigation core of the replay player.
//!
//! `Player` owns the `NavigationState` and reacts to `Message`s. Every
//! dispatch samples the borrowed replay engine once, runs a reducer that
//! records `Effect`s, then applies those effects to the engine. Anything the
//! host must do afterwards (notify the UI, re-deliver a message later) is
//! queued as a `Command` and collected with `drain`.

mod events;
mod messages;
mod state;
mod update;

#[cfg(test)]
mod tests;

pub use events::{Command, Direction, MarkerView, OverlayView, PlayerSnapshot, TocItem, UiEvent};
pub use messages::{KeyInput, Message, Modifiers};
pub use state::{NavPhase, NavigationState, OverlayPhase, OverlayRef};

use crate::annotations::AnnotationStore;
use crate::clock::ClockReading;
use crate::config::AppConfig;
use crate::document::ReplayEngine;
use crate::error::NavigationError;
use crate::recording::Recording;
use tracing::info;
use update::Effect;

pub struct Player {
    pub(in crate::player) store: AnnotationStore,
    pub(in crate::player) duration_ms: u64,
    pub(in crate::player) config: AppConfig,
    pub(in crate::player) state: NavigationState,
    pub(in crate::player) outbox: Vec<Command>,
}

impl Player {
    /// Mount the player for a loaded recording.
    pub fn new(recording: Recording, config: AppConfig) -> Self {
        let Recording { store, duration_ms } = recording;
        let mut player = Self {
            store,
            duration_ms,
            state: NavigationState::new(config.toc_open_on_start),
            config,
            outbox: Vec::new(),
        };
        info!(
            annotations = player.store.len(),
            duration_ms = player.duration_ms,
            "Mounted replay navigation"
        );
        player.outbox.push(Command::Notify(UiEvent::AnnotationsLoaded {
            annotations: player.toc_items(),
            markers: player.markers(),
        }));
        player
    }

    pub fn store(&self) -> &AnnotationStore {
        &self.store
    }

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Hand over queued notifications and delayed messages.
    pub fn drain(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.outbox)
    }

    /// Whether the host should keep delivering `Message::Tick`.
    pub fn wants_ticks(&self, replay: &dyn ReplayEngine) -> bool {
        replay.is_playing() || matches!(self.state.phase, NavPhase::Seeking { .. })
    }

    pub fn update(&mut self, message: Message, replay: &mut dyn ReplayEngine) {
        self.dispatch(replay, |player, reading, effects| {
            player.reduce(message, reading, effects)
        });
    }

    pub fn next(&mut self, replay: &mut dyn ReplayEngine) -> Result<String, NavigationError> {
        self.dispatch(replay, |player, reading, effects| {
            player.handle_next(reading, effects)
        })
    }

    pub fn previous(&mut self, replay: &mut dyn ReplayEngine) -> Result<String, NavigationError> {
        self.dispatch(replay, |player, reading, effects| {
            player.handle_previous(reading, effects)
        })
    }

    pub fn goto_id(
        &mut self,
        id: &str,
        replay: &mut dyn ReplayEngine,
    ) -> Result<String, NavigationError> {
        self.dispatch(replay, |player, reading, effects| {
            player.handle_goto(id, reading, effects)
        })
    }

    /// TOC activation; the panel's open state is left alone.
    pub fn select_toc_item(
        &mut self,
        id: &str,
        replay: &mut dyn ReplayEngine,
    ) -> Result<String, NavigationError> {
        self.goto_id(id, replay)
    }

    pub fn toggle_toc(&mut self) -> bool {
        let mut effects = Vec::new();
        self.handle_toggle_toc(&mut effects);
        self.queue_notifications(effects);
        self.state.toc_open
    }

    /// Returns true when a shown overlay was dismissed.
    pub fn dismiss_overlay(&mut self) -> bool {
        let mut effects = Vec::new();
        let dismissed = self.handle_dismiss_overlay(&mut effects);
        self.queue_notifications(effects);
        dismissed
    }

    /// Route a key press; returns the message it was mapped to, if any.
    pub fn handle_key(
        &mut self,
        input: &KeyInput,
        replay: &mut dyn ReplayEngine,
    ) -> Option<Message> {
        let routed = self.shortcut_message_for_key(input)?;
        self.update(routed.clone(), replay);
        Some(routed)
    }

    pub fn snapshot(&self, replay: &dyn ReplayEngine) -> PlayerSnapshot {
        let reading = ClockReading::sample(replay);
        PlayerSnapshot {
            current_time_ms: reading.position_ms,
            duration_ms: self.duration_ms,
            playing: reading.playing,
            active_annotation_id: self.state.active_annotation_id.clone(),
            toc_open: self.state.toc_open,
            overlay: self.overlay_view(),
            toc: self.toc_items(),
            markers: self.markers(),
        }
    }

    pub fn toc_items(&self) -> Vec<TocItem> {
        let active = self.state.active_annotation_id.as_deref();
        self.store
            .sorted_all()
            .iter()
            .map(|annotation| TocItem {
                id: annotation.id.clone(),
                title: annotation.title.clone(),
                timestamp_ms: annotation.timestamp_ms,
                autopause: annotation.autopause,
                active: active == Some(annotation.id.as_str()),
            })
            .collect()
    }

    pub fn markers(&self) -> Vec<MarkerView> {
        let duration = self.duration_ms.max(1) as f64;
        self.store
            .sorted_all()
            .iter()
            .map(|annotation| MarkerView {
                id: annotation.id.clone(),
                title: annotation.title.clone(),
                position_pct: ((annotation.timestamp_ms as f64 / duration) * 100.0).clamp(0.0, 100.0),
                autopause: annotation.autopause,
            })
            .collect()
    }

    fn dispatch<T>(
        &mut self,
        replay: &mut dyn ReplayEngine,
        handler: impl FnOnce(&mut Self, ClockReading, &mut Vec<Effect>) -> T,
    ) -> T {
        let reading = ClockReading::sample(&*replay);
        let mut effects = Vec::new();
        let result = handler(self, reading, &mut effects);
        self.run_effects(effects, replay);
        self.settle_seek(ClockReading::sample(&*replay));
        result
    }

    /// For handlers that never touch the clock.
    fn queue_notifications(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            if let Effect::Notify(event) = effect {
                self.outbox.push(Command::Notify(event));
            }
        }
    }
}
