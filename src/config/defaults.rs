pub(crate) fn default_tick_interval_ms() -> u64 {
    50
}

pub(crate) fn default_previous_snap_tolerance_ms() -> u64 {
    250
}

pub(crate) fn default_anchor_retry_interval_ms() -> u64 {
    200
}

pub(crate) fn default_anchor_retry_attempts() -> u32 {
    10
}

pub(crate) fn default_overlay_on_autopause() -> bool {
    true
}

pub(crate) fn default_log_level() -> crate::config::LogLevel {
    crate::config::LogLevel::Debug
}

pub(crate) fn default_key_toggle_play_pause() -> String {
    "space".to_string()
}

pub(crate) fn default_key_next_bookmark() -> String {
    "arrowright".to_string()
}

pub(crate) fn default_key_prev_bookmark() -> String {
    "arrowleft".to_string()
}

pub(crate) fn default_key_toggle_toc() -> String {
    "t".to_string()
}

pub(crate) fn default_key_dismiss_overlay() -> String {
    "escape".to_string()
}
