//! Replayed-document capability.
//!
//! The replayed DOM lives inside the engine's frame and is populated
//! asynchronously, so it is only ever queried through `AnchorResolver`.

use crate::clock::PlaybackClock;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Opaque reference to an element in the replayed document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ElementHandle(pub String);

pub trait AnchorResolver {
    fn resolve(&self, selector: &str) -> Option<ElementHandle>;
}

/// Everything the player needs from the external replay engine.
pub trait ReplayEngine: PlaybackClock + AnchorResolver {}

impl<T: PlaybackClock + AnchorResolver> ReplayEngine for T {}
