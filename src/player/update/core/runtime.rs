use super::super::super::Player;
use super::super::super::events::Command;
use super::super::super::messages::Message;
use super::super::Effect;
use crate::document::ReplayEngine;
use std::collections::VecDeque;
use tracing::{debug, trace};

impl Player {
    /// Apply effects in order; effects produced along the way run after them.
    pub(in crate::player) fn run_effects(
        &mut self,
        effects: Vec<Effect>,
        replay: &mut dyn ReplayEngine,
    ) {
        let mut queue: VecDeque<Effect> = effects.into();
        while let Some(effect) = queue.pop_front() {
            let mut follow_up = Vec::new();
            self.run_effect(effect, replay, &mut follow_up);
            queue.extend(follow_up);
        }
    }

    fn run_effect(
        &mut self,
        effect: Effect,
        replay: &mut dyn ReplayEngine,
        follow_up: &mut Vec<Effect>,
    ) {
        match effect {
            Effect::PauseClock => replay.pause(),
            Effect::PlayClock => replay.play(),
            Effect::SeekClock(ms) => {
                trace!(target_ms = ms, "Seeking replay clock");
                replay.seek(ms);
            }
            Effect::ResolveAnchor {
                annotation_id,
                generation,
                attempt,
            } => {
                let resolved = if replay.is_ready() {
                    self.store
                        .by_id(&annotation_id)
                        .and_then(|annotation| annotation.target_selector.as_deref())
                        .and_then(|selector| replay.resolve(selector))
                } else {
                    debug!(annotation = %annotation_id, attempt, "Replay not ready for anchor lookup");
                    None
                };
                self.on_anchor_attempt(annotation_id, generation, attempt, resolved, follow_up);
            }
            Effect::ScheduleAnchorRetry {
                annotation_id,
                generation,
                attempt,
            } => {
                self.outbox.push(Command::After {
                    delay: self.config.anchor_retry_interval(),
                    message: Message::RetryAnchor {
                        annotation_id,
                        generation,
                        attempt,
                    },
                });
            }
            Effect::Notify(event) => self.outbox.push(Command::Notify(event)),
        }
    }
}
