use super::defaults;
use super::models::{AppConfig, LogLevel};
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize, serde::Serialize)]
pub(super) struct ConfigTables {
    #[serde(default)]
    playback: PlaybackConfig,
    #[serde(default)]
    navigation: NavigationConfig,
    #[serde(default)]
    overlay: OverlayConfig,
    #[serde(default)]
    ui: UiConfig,
    #[serde(default)]
    keys: KeysConfig,
    #[serde(default)]
    logging: LoggingConfig,
}

impl From<ConfigTables> for AppConfig {
    fn from(tables: ConfigTables) -> Self {
        AppConfig {
            tick_interval_ms: tables.playback.tick_interval_ms,
            previous_snap_tolerance_ms: tables.navigation.previous_snap_tolerance_ms,
            anchor_retry_interval_ms: tables.overlay.anchor_retry_interval_ms,
            anchor_retry_attempts: tables.overlay.anchor_retry_attempts,
            overlay_on_autopause: tables.overlay.overlay_on_autopause,
            toc_open_on_start: tables.ui.toc_open_on_start,
            log_level: tables.logging.log_level,
            key_toggle_play_pause: tables.keys.toggle_play_pause,
            key_next_bookmark: tables.keys.next_bookmark,
            key_prev_bookmark: tables.keys.prev_bookmark,
            key_toggle_toc: tables.keys.toggle_toc,
            key_dismiss_overlay: tables.keys.dismiss_overlay,
        }
    }
}

impl From<&AppConfig> for ConfigTables {
    fn from(config: &AppConfig) -> Self {
        ConfigTables {
            playback: PlaybackConfig {
                tick_interval_ms: config.tick_interval_ms,
            },
            navigation: NavigationConfig {
                previous_snap_tolerance_ms: config.previous_snap_tolerance_ms,
            },
            overlay: OverlayConfig {
                anchor_retry_interval_ms: config.anchor_retry_interval_ms,
                anchor_retry_attempts: config.anchor_retry_attempts,
                overlay_on_autopause: config.overlay_on_autopause,
            },
            ui: UiConfig {
                toc_open_on_start: config.toc_open_on_start,
            },
            keys: KeysConfig {
                toggle_play_pause: config.key_toggle_play_pause.clone(),
                next_bookmark: config.key_next_bookmark.clone(),
                prev_bookmark: config.key_prev_bookmark.clone(),
                toggle_toc: config.key_toggle_toc.clone(),
                dismiss_overlay: config.key_dismiss_overlay.clone(),
            },
            logging: LoggingConfig {
                log_level: config.log_level,
            },
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct PlaybackConfig {
    #[serde(default = "defaults::default_tick_interval_ms")]
    tick_interval_ms: u64,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        PlaybackConfig {
            tick_interval_ms: defaults::default_tick_interval_ms(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct NavigationConfig {
    #[serde(default = "defaults::default_previous_snap_tolerance_ms")]
    previous_snap_tolerance_ms: u64,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        NavigationConfig {
            previous_snap_tolerance_ms: defaults::default_previous_snap_tolerance_ms(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct OverlayConfig {
    #[serde(default = "defaults::default_anchor_retry_interval_ms")]
    anchor_retry_interval_ms: u64,
    #[serde(default = "defaults::default_anchor_retry_attempts")]
    anchor_retry_attempts: u32,
    #[serde(default = "defaults::default_overlay_on_autopause")]
    overlay_on_autopause: bool,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        OverlayConfig {
            anchor_retry_interval_ms: defaults::default_anchor_retry_interval_ms(),
            anchor_retry_attempts: defaults::default_anchor_retry_attempts(),
            overlay_on_autopause: defaults::default_overlay_on_autopause(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, serde::Serialize)]
struct UiConfig {
    #[serde(default)]
    toc_open_on_start: bool,
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct KeysConfig {
    #[serde(default = "defaults::default_key_toggle_play_pause")]
    toggle_play_pause: String,
    #[serde(default = "defaults::default_key_next_bookmark")]
    next_bookmark: String,
    #[serde(default = "defaults::default_key_prev_bookmark")]
    prev_bookmark: String,
    #[serde(default = "defaults::default_key_toggle_toc")]
    toggle_toc: String,
    #[serde(default = "defaults::default_key_dismiss_overlay")]
    dismiss_overlay: String,
}

impl Default for KeysConfig {
    fn default() -> Self {
        KeysConfig {
            toggle_play_pause: defaults::default_key_toggle_play_pause(),
            next_bookmark: defaults::default_key_next_bookmark(),
            prev_bookmark: defaults::default_key_prev_bookmark(),
            toggle_toc: defaults::default_key_toggle_toc(),
            dismiss_overlay: defaults::default_key_dismiss_overlay(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct LoggingConfig {
    #[serde(default = "defaults::default_log_level")]
    log_level: LogLevel,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            log_level: defaults::default_log_level(),
        }
    }
}
