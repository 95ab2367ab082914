//! Playback clock seam.
//!
//! The replay engine owns the timeline. The player only borrows it for the
//! duration of one `update` call and never trusts `current_time_ms` while the
//! engine reports that it is still settling after a seek.

pub trait PlaybackClock {
    /// False while the engine is still painting the frame for a pending seek.
    fn is_ready(&self) -> bool {
        true
    }
    fn current_time_ms(&self) -> u64;
    fn is_playing(&self) -> bool;
    fn play(&mut self);
    fn pause(&mut self);
    fn seek(&mut self, ms: u64);
}

/// Clock state sampled once at the start of a dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockReading {
    /// `None` while the clock is not ready.
    pub position_ms: Option<u64>,
    pub playing: bool,
}

impl ClockReading {
    pub fn sample<C: PlaybackClock + ?Sized>(clock: &C) -> Self {
        Self {
            position_ms: clock.is_ready().then(|| clock.current_time_ms()),
            playing: clock.is_playing(),
        }
    }
}
