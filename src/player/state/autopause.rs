/// Crossing bookkeeping for the autopause controller.
///
/// `(last_checked_ms, fired_id)` is a cursor in the store's `(timestamp_ms, id)`
/// order: with `fired_id` set, later annotations at the same instant are still
/// ahead of it.
pub struct AutopauseState {
    pub(in crate::player) last_checked_ms: u64,
    pub(in crate::player) fired_id: Option<String>,
    /// Autopause that paused playback and has not been acknowledged yet.
    pub(in crate::player) unacknowledged: Option<String>,
}

impl AutopauseState {
    pub(in crate::player) fn new() -> Self {
        Self {
            last_checked_ms: 0,
            fired_id: None,
            unacknowledged: None,
        }
    }

    /// Re-arm from `position_ms` without firing anything crossed on the way.
    pub(in crate::player) fn rearm_at(&mut self, position_ms: u64) {
        self.last_checked_ms = position_ms;
        self.fired_id = None;
        self.unacknowledged = None;
    }

    /// Move the cursor to `position_ms`; staying put keeps the fired id.
    pub(in crate::player) fn sync_to(&mut self, position_ms: u64) {
        if position_ms != self.last_checked_ms {
            self.last_checked_ms = position_ms;
            self.fired_id = None;
        }
    }

    pub(in crate::player) fn mark_fired(&mut self, timestamp_ms: u64, id: String) {
        self.last_checked_ms = timestamp_ms;
        self.fired_id = Some(id.clone());
        self.unacknowledged = Some(id);
    }

    pub(in crate::player) fn acknowledge(&mut self) -> Option<String> {
        self.unacknowledged.take()
    }
}
