// Pure normalization of raw settings (no I/O)

use super::types::{
    DEFAULT_QUICKSAVE_PREFIX, KeyCode, MAX_QUICKSAVES, MIN_QUICKSAVES, QUICKLOAD_KEY_CHOICES, QuicksaveConfig,
    QuicksaveSettings,
};
use regex::Regex;
use std::sync::LazyLock;

static PREFIX_DISALLOWED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\-. ]").expect("static prefix pattern"));

/// Strip every character outside `[\w\-. ]` from a configured prefix
pub fn sanitize_prefix(prefix: &str) -> String {
    PREFIX_DISALLOWED.replace_all(prefix, "").into_owned()
}

/// Sanitized prefix, or the default one when nothing usable is left
///
/// A single-slot rotation names its save after the bare prefix, so an empty
/// prefix would produce an empty save name.
pub fn save_prefix(prefix: &str) -> String {
    let sanitized = sanitize_prefix(prefix);
    if sanitized.is_empty() {
        DEFAULT_QUICKSAVE_PREFIX.to_string()
    } else {
        sanitized
    }
}

/// Clamp a configured slot count into 1..=50
pub fn clamp_max_slots(max_quicksaves: i32) -> u32 {
    max_quicksaves.clamp(MIN_QUICKSAVES as i32, MAX_QUICKSAVES as i32) as u32
}

/// Restrict a key to the offered choices, falling back to F10
pub fn restrict_quickload_key(key: KeyCode) -> KeyCode {
    if QUICKLOAD_KEY_CHOICES.contains(&key) {
        key
    } else {
        KeyCode::F10
    }
}

impl QuicksaveConfig {
    pub fn from_settings(settings: &QuicksaveSettings) -> Self {
        QuicksaveConfig {
            max_slots: clamp_max_slots(settings.max_quicksaves),
            prefix: save_prefix(&settings.quicksave_prefix),
            per_identity_saves: settings.per_character_saves,
            quickload_key: settings.quickload_key,
        }
    }
}
