use serde::Deserialize;
use std::time::Duration;

/// Flat runtime configuration; the on-disk layout lives in `tables.rs`.
#[derive(Debug, Clone, Deserialize, serde::Serialize, PartialEq)]
pub struct AppConfig {
    #[serde(default = "crate::config::defaults::default_tick_interval_ms")]
    pub tick_interval_ms: u64,
    #[serde(default = "crate::config::defaults::default_previous_snap_tolerance_ms")]
    pub previous_snap_tolerance_ms: u64,
    #[serde(default = "crate::config::defaults::default_anchor_retry_interval_ms")]
    pub anchor_retry_interval_ms: u64,
    #[serde(default = "crate::config::defaults::default_anchor_retry_attempts")]
    pub anchor_retry_attempts: u32,
    #[serde(default = "crate::config::defaults::default_overlay_on_autopause")]
    pub overlay_on_autopause: bool,
    #[serde(default)]
    pub toc_open_on_start: bool,
    #[serde(default = "crate::config::defaults::default_log_level")]
    pub log_level: LogLevel,
    #[serde(default = "crate::config::defaults::default_key_toggle_play_pause")]
    pub key_toggle_play_pause: String,
    #[serde(default = "crate::config::defaults::default_key_next_bookmark")]
    pub key_next_bookmark: String,
    #[serde(default = "crate::config::defaults::default_key_prev_bookmark")]
    pub key_prev_bookmark: String,
    #[serde(default = "crate::config::defaults::default_key_toggle_toc")]
    pub key_toggle_toc: String,
    #[serde(default = "crate::config::defaults::default_key_dismiss_overlay")]
    pub key_dismiss_overlay: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            tick_interval_ms: crate::config::defaults::default_tick_interval_ms(),
            previous_snap_tolerance_ms: crate::config::defaults::default_previous_snap_tolerance_ms(),
            anchor_retry_interval_ms: crate::config::defaults::default_anchor_retry_interval_ms(),
            anchor_retry_attempts: crate::config::defaults::default_anchor_retry_attempts(),
            overlay_on_autopause: crate::config::defaults::default_overlay_on_autopause(),
            toc_open_on_start: false,
            log_level: crate::config::defaults::default_log_level(),
            key_toggle_play_pause: crate::config::defaults::default_key_toggle_play_pause(),
            key_next_bookmark: crate::config::defaults::default_key_next_bookmark(),
            key_prev_bookmark: crate::config::defaults::default_key_prev_bookmark(),
            key_toggle_toc: crate::config::defaults::default_key_toggle_toc(),
            key_dismiss_overlay: crate::config::defaults::default_key_dismiss_overlay(),
        }
    }
}

impl AppConfig {
    pub fn anchor_retry_interval(&self) -> Duration {
        Duration::from_millis(self.anchor_retry_interval_ms)
    }

    /// Keep runtime values in bounds regardless of where they came from.
    pub(crate) fn clamped(mut self) -> Self {
        self.tick_interval_ms = self.tick_interval_ms.clamp(1, 1_000);
        self.anchor_retry_interval_ms = self.anchor_retry_interval_ms.clamp(1, 10_000);
        self.anchor_retry_attempts = self.anchor_retry_attempts.clamp(1, 100);
        self
    }
}

/// Supported logging verbosity levels.
#[derive(Debug, Clone, Copy, Deserialize, serde::Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

impl LogLevel {
    pub fn as_filter_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}
