use super::super::super::Player;
use super::super::super::messages::{KeyInput, Message, Modifiers};
use tracing::trace;

impl Player {
    pub(in crate::player) fn shortcut_message_for_key(&self, input: &KeyInput) -> Option<Message> {
        if input.editable_focus {
            trace!(key = %input.key, "Ignoring key inside editable control");
            return None;
        }
        let pressed = Self::normalize_pressed_key(&input.key)?;
        let modifiers = input.modifiers;

        if Self::shortcut_matches(
            &self.config.key_toggle_play_pause,
            "space",
            &pressed,
            modifiers,
        ) {
            // A visible popover takes the play/pause key as its "continue" action.
            if self.state.overlay.is_shown() {
                Some(Message::DismissOverlay)
            } else {
                Some(Message::TogglePlayPause)
            }
        } else if Self::shortcut_matches(
            &self.config.key_next_bookmark,
            "arrowright",
            &pressed,
            modifiers,
        ) {
            Some(Message::NextBookmark)
        } else if Self::shortcut_matches(
            &self.config.key_prev_bookmark,
            "arrowleft",
            &pressed,
            modifiers,
        ) {
            Some(Message::PreviousBookmark)
        } else if Self::shortcut_matches(&self.config.key_toggle_toc, "t", &pressed, modifiers) {
            Some(Message::ToggleToc)
        } else if Self::shortcut_matches(
            &self.config.key_dismiss_overlay,
            "escape",
            &pressed,
            modifiers,
        ) {
            Some(Message::DismissOverlay)
        } else {
            None
        }
    }

    pub(in crate::player) fn shortcut_matches(
        raw: &str,
        fallback: &str,
        pressed: &str,
        modifiers: Modifiers,
    ) -> bool {
        let normalized = Self::normalize_shortcut_token(raw, fallback);

        let mut required_ctrl = false;
        let mut required_alt = false;
        let mut required_meta = false;
        let mut required_shift = false;
        let mut required_key: Option<&str> = None;

        for token in normalized
            .split('+')
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            match token {
                "ctrl" | "control" => required_ctrl = true,
                "alt" | "option" => required_alt = true,
                "logo" | "meta" | "super" | "cmd" | "command" => required_meta = true,
                "shift" => required_shift = true,
                key => required_key = Some(key),
            }
        }

        let required_key = required_key.unwrap_or(fallback);
        if pressed != required_key {
            return false;
        }

        modifiers.ctrl == required_ctrl
            && modifiers.alt == required_alt
            && modifiers.meta == required_meta
            && modifiers.shift == required_shift
    }

    pub(in crate::player) fn normalize_shortcut_token(raw: &str, fallback: &str) -> String {
        let normalized = raw.trim().to_ascii_lowercase();
        if normalized.is_empty() {
            return fallback.to_string();
        }
        normalized
            .split('+')
            .map(|token| Self::canonical_key_name(token.trim()))
            .collect::<Vec<_>>()
            .join("+")
    }

    /// Map a `KeyboardEvent.key` value onto the shortcut vocabulary.
    fn normalize_pressed_key(key: &str) -> Option<String> {
        if key == " " {
            return Some("space".to_string());
        }
        let trimmed = key.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self::canonical_key_name(&trimmed.to_lowercase()).to_string())
    }

    fn canonical_key_name(token: &str) -> &str {
        match token {
            "spacebar" => "space",
            "esc" => "escape",
            "right" => "arrowright",
            "left" => "arrowleft",
            other => other,
        }
    }
}
