pub mod operations;
mod provider;
pub mod pure;
pub mod types;

// Re-export types
pub use types::{KeyCode, QUICKLOAD_KEY_CHOICES, QuicksaveConfig, QuicksaveSettings};

// Re-export operations
pub use operations::{load_settings_file, save_settings_file};

pub use provider::{ConfigProvider, FileSettings, LayeredConfig, SettingsSource};
pub use pure::{save_prefix, sanitize_prefix};
