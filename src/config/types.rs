use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_QUICKSAVES: i32 = 3;
pub const DEFAULT_QUICKSAVE_PREFIX: &str = "quicksave_";
pub const MIN_QUICKSAVES: u32 = 1;
pub const MAX_QUICKSAVES: u32 = 50;

/// Host key code used to trigger a quickload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyCode(pub i32);

impl KeyCode {
    pub const PAGE_UP: KeyCode = KeyCode(33);
    pub const PAGE_DOWN: KeyCode = KeyCode(34);
    pub const END: KeyCode = KeyCode(35);
    pub const HOME: KeyCode = KeyCode(36);
    pub const INSERT: KeyCode = KeyCode(45);
    pub const DELETE: KeyCode = KeyCode(46);
    pub const F9: KeyCode = KeyCode(67);
    pub const F10: KeyCode = KeyCode(68);
    pub const F11: KeyCode = KeyCode(69);
    pub const F12: KeyCode = KeyCode(70);
}

impl Default for KeyCode {
    fn default() -> Self {
        KeyCode::F10
    }
}

/// Keys offered by the live settings source, default first
pub const QUICKLOAD_KEY_CHOICES: [KeyCode; 10] = [
    KeyCode::F10,
    KeyCode::F9,
    KeyCode::F11,
    KeyCode::F12,
    KeyCode::HOME,
    KeyCode::END,
    KeyCode::INSERT,
    KeyCode::DELETE,
    KeyCode::PAGE_UP,
    KeyCode::PAGE_DOWN,
];

/// Persisted settings document, as written to settings.json
///
/// Values are raw: the prefix may contain characters that are not allowed in
/// save names and the slot count may be out of range. Use
/// [`QuicksaveConfig::from_settings`] to get the normalized view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct QuicksaveSettings {
    #[serde(default = "default_max_quicksaves")]
    pub max_quicksaves: i32,
    #[serde(default = "default_quicksave_prefix")]
    pub quicksave_prefix: String,
    #[serde(default)]
    pub quickload_key: KeyCode,
    #[serde(default = "default_true")]
    pub per_character_saves: bool,
}

fn default_max_quicksaves() -> i32 {
    DEFAULT_MAX_QUICKSAVES
}

fn default_quicksave_prefix() -> String {
    DEFAULT_QUICKSAVE_PREFIX.to_string()
}

fn default_true() -> bool {
    true
}

impl Default for QuicksaveSettings {
    fn default() -> Self {
        QuicksaveSettings {
            max_quicksaves: DEFAULT_MAX_QUICKSAVES,
            quicksave_prefix: DEFAULT_QUICKSAVE_PREFIX.to_string(),
            quickload_key: KeyCode::F10,
            per_character_saves: true,
        }
    }
}

/// Normalized configuration read by the rotation core
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuicksaveConfig {
    /// Size of the rotation, always within 1..=50
    pub max_slots: u32,
    /// Sanitized filename fragment
    pub prefix: String,
    pub per_identity_saves: bool,
    pub quickload_key: KeyCode,
}

impl QuicksaveConfig {
    /// Whether names carry a numeric slot suffix at all
    pub fn multiple_slots(&self) -> bool {
        self.max_slots > 1
    }
}

impl Default for QuicksaveConfig {
    fn default() -> Self {
        QuicksaveConfig::from_settings(&QuicksaveSettings::default())
    }
}
