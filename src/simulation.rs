//! In-memory replay engine.
//!
//! `SimulatedReplay` stands in for the browser-side replay engine: it keeps a
//! virtual timeline, takes `seek_latency_ms` of virtual time to repaint after
//! every seek, and exposes elements only while the timeline is inside their
//! window.

use crate::clock::PlaybackClock;
use crate::document::{AnchorResolver, ElementHandle};
use crate::recording::Recording;
use tracing::trace;

#[derive(Debug, Clone, PartialEq, Eq)]
struct ElementWindow {
    selector: String,
    from_ms: u64,
    until_ms: Option<u64>,
}

impl ElementWindow {
    fn contains(&self, position_ms: u64) -> bool {
        position_ms >= self.from_ms && self.until_ms.is_none_or(|until| position_ms < until)
    }
}

#[derive(Debug, Clone)]
pub struct SimulatedReplay {
    position_ms: u64,
    duration_ms: u64,
    playing: bool,
    seek_latency_ms: u64,
    settling_ms: Option<u64>,
    elements: Vec<ElementWindow>,
    seeks: Vec<u64>,
}

impl SimulatedReplay {
    pub fn new(duration_ms: u64) -> Self {
        Self {
            position_ms: 0,
            duration_ms,
            playing: false,
            seek_latency_ms: 0,
            settling_ms: None,
            elements: Vec::new(),
            seeks: Vec::new(),
        }
    }

    /// Every annotated selector becomes resolvable from its annotation onwards.
    pub fn from_recording(recording: &Recording) -> Self {
        let mut replay = Self::new(recording.duration_ms);
        for annotation in recording.store.sorted_all() {
            if let Some(selector) = &annotation.target_selector {
                replay = replay.with_element(selector.clone(), annotation.timestamp_ms, None);
            }
        }
        replay
    }

    pub fn with_seek_latency(mut self, latency_ms: u64) -> Self {
        self.seek_latency_ms = latency_ms;
        self
    }

    pub fn with_element(
        mut self,
        selector: impl Into<String>,
        from_ms: u64,
        until_ms: Option<u64>,
    ) -> Self {
        self.elements.push(ElementWindow {
            selector: selector.into(),
            from_ms,
            until_ms,
        });
        self
    }

    pub fn remove_element(&mut self, selector: &str) {
        self.elements.retain(|element| element.selector != selector);
    }

    /// Advance virtual time. A pending repaint consumes time first.
    pub fn elapse(&mut self, ms: u64) {
        let mut remaining = ms;
        if let Some(settling) = self.settling_ms {
            if remaining < settling {
                self.settling_ms = Some(settling - remaining);
                return;
            }
            remaining -= settling;
            self.settling_ms = None;
            trace!(position_ms = self.position_ms, "Replay frame settled");
        }
        if self.playing {
            self.position_ms = self.position_ms.saturating_add(remaining);
            if self.position_ms >= self.duration_ms {
                self.position_ms = self.duration_ms;
                self.playing = false;
            }
        }
    }

    /// Seek targets in the order they were issued.
    pub fn seek_log(&self) -> &[u64] {
        &self.seeks
    }

    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }
}

impl PlaybackClock for SimulatedReplay {
    fn is_ready(&self) -> bool {
        self.settling_ms.is_none()
    }

    fn current_time_ms(&self) -> u64 {
        self.position_ms
    }

    fn is_playing(&self) -> bool {
        self.playing
    }

    fn play(&mut self) {
        if self.position_ms < self.duration_ms {
            self.playing = true;
        }
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn seek(&mut self, ms: u64) {
        self.position_ms = ms.min(self.duration_ms);
        self.seeks.push(self.position_ms);
        self.settling_ms = (self.seek_latency_ms > 0).then_some(self.seek_latency_ms);
    }
}

impl AnchorResolver for SimulatedReplay {
    fn resolve(&self, selector: &str) -> Option<ElementHandle> {
        if !self.is_ready() {
            return None;
        }
        self.elements
            .iter()
            .find(|element| element.selector == selector && element.contains(self.position_ms))
            .map(|element| ElementHandle(element.selector.clone()))
    }
}
