//! Deterministic virtual-time host for a `Player`.
//!
//! Plays the role a UI event loop has in production: it delivers ticks while
//! the player asks for them, re-delivers delayed messages when they come due,
//! and collects UI notifications in order.

use crate::document::ReplayEngine;
use crate::player::{Command, KeyInput, Message, Player, UiEvent};
use crate::simulation::SimulatedReplay;
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use tracing::trace;

/// A replay engine whose time only moves when told to.
pub trait VirtualClock: ReplayEngine {
    fn elapse(&mut self, ms: u64);
}

impl VirtualClock for SimulatedReplay {
    fn elapse(&mut self, ms: u64) {
        SimulatedReplay::elapse(self, ms);
    }
}

#[derive(Debug)]
struct Scheduled {
    due_ms: u64,
    seq: u64,
    message: Message,
}

impl PartialEq for Scheduled {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Scheduled {}

impl PartialOrd for Scheduled {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Scheduled {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.due_ms, self.seq).cmp(&(other.due_ms, other.seq))
    }
}

pub struct VirtualRuntime<E: VirtualClock> {
    player: Player,
    engine: E,
    now_ms: u64,
    next_seq: u64,
    timers: BinaryHeap<Reverse<Scheduled>>,
    events: Vec<UiEvent>,
}

impl<E: VirtualClock> VirtualRuntime<E> {
    pub fn new(player: Player, engine: E) -> Self {
        let mut runtime = Self {
            player,
            engine,
            now_ms: 0,
            next_seq: 0,
            timers: BinaryHeap::new(),
            events: Vec::new(),
        };
        runtime.collect();
        runtime
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    /// Virtual time elapsed since the runtime started.
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn dispatch(&mut self, message: Message) {
        self.player.update(message, &mut self.engine);
        self.collect();
    }

    /// Route a `KeyboardEvent.key` value through the player's bindings.
    pub fn press(&mut self, key: &str) -> Option<Message> {
        let routed = self.player.handle_key(&KeyInput::key(key), &mut self.engine);
        self.collect();
        routed
    }

    /// Scrub the timeline the way a user dragging the progress bar would.
    pub fn scrub_to(&mut self, position_ms: u64) {
        self.engine.seek(position_ms);
        self.dispatch(Message::Seeked { position_ms });
    }

    /// Run the event loop for `duration_ms` of virtual time.
    pub fn run_for(&mut self, duration_ms: u64) {
        let end = self.now_ms.saturating_add(duration_ms);
        let tick = self.player.config().tick_interval_ms.max(1);
        while self.now_ms < end {
            let next_tick = self.now_ms.saturating_add(tick).min(end);
            let step_to = match self.timers.peek() {
                Some(Reverse(timer)) if timer.due_ms < next_tick => timer.due_ms.max(self.now_ms),
                _ => next_tick,
            };
            self.advance_to(step_to);
            self.fire_due_timers();
            if step_to == next_tick && self.player.wants_ticks(&self.engine) {
                self.dispatch(Message::Tick);
            }
        }
        self.fire_due_timers();
    }

    /// Hand over the notifications collected so far.
    pub fn take_events(&mut self) -> Vec<UiEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    fn advance_to(&mut self, target_ms: u64) {
        if target_ms > self.now_ms {
            self.engine.elapse(target_ms - self.now_ms);
            self.now_ms = target_ms;
        }
    }

    fn fire_due_timers(&mut self) {
        while self
            .timers
            .peek()
            .is_some_and(|Reverse(timer)| timer.due_ms <= self.now_ms)
        {
            if let Some(Reverse(timer)) = self.timers.pop() {
                trace!(due_ms = timer.due_ms, message = ?timer.message, "Delivering delayed message");
                self.dispatch(timer.message);
            }
        }
    }

    fn collect(&mut self) {
        for command in self.player.drain() {
            match command {
                Command::Notify(event) => self.events.push(event),
                Command::After { delay, message } => {
                    let delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
                    self.timers.push(Reverse(Scheduled {
                        due_ms: self.now_ms.saturating_add(delay_ms),
                        seq: self.next_seq,
                        message,
                    }));
                    self.next_seq += 1;
                }
            }
        }
    }
}
