use super::events::UiEvent;

mod autopause;
mod core;
mod navigation;
mod overlay;

/// Describes work that must be performed outside the pure reducer.
#[derive(Debug)]
pub(super) enum Effect {
    PauseClock,
    PlayClock,
    SeekClock(u64),
    ResolveAnchor {
        annotation_id: String,
        generation: u64,
        attempt: u32,
    },
    ScheduleAnchorRetry {
        annotation_id: String,
        generation: u64,
        attempt: u32,
    },
    Notify(UiEvent),
}
