//! Configuration providers
//!
//! The core reads its settings through [`ConfigProvider`]. [`LayeredConfig`]
//! prefers a live, externally editable source and falls back to the settings
//! file; the choice is made on first use and kept for the provider's lifetime.

use super::operations::load_settings_file;
use super::pure::restrict_quickload_key;
use super::types::{QuicksaveConfig, QuicksaveSettings};
use crate::error::{ConfigError, QuicksaveResult};

use std::path::PathBuf;
use std::sync::OnceLock;

/// Read-only configuration handed to the rotation core
pub trait ConfigProvider: Send + Sync {
    fn current(&self) -> QuicksaveConfig;
}

impl ConfigProvider for QuicksaveConfig {
    fn current(&self) -> QuicksaveConfig {
        self.clone()
    }
}

/// A place raw settings can be read from
pub trait SettingsSource: Send + Sync {
    /// Source name for logs
    fn name(&self) -> &str;

    fn read(&self) -> Result<QuicksaveSettings, ConfigError>;
}

/// Settings file source; the document is read once and cached
pub struct FileSettings {
    path: PathBuf,
    cached: OnceLock<QuicksaveSettings>,
}

impl FileSettings {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cached: OnceLock::new(),
        }
    }
}

impl SettingsSource for FileSettings {
    fn name(&self) -> &str {
        "settings file"
    }

    fn read(&self) -> Result<QuicksaveSettings, ConfigError> {
        if let Some(settings) = self.cached.get() {
            return Ok(settings.clone());
        }
        let settings = load_settings_file(&self.path)?;
        Ok(self.cached.get_or_init(|| settings).clone())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Choice {
    Live,
    File,
}

/// Live settings when present, else the settings file
pub struct LayeredConfig {
    live: Option<Box<dyn SettingsSource>>,
    file: Box<dyn SettingsSource>,
    choice: OnceLock<Choice>,
}

impl LayeredConfig {
    pub fn new(live: Option<Box<dyn SettingsSource>>, file: Box<dyn SettingsSource>) -> Self {
        Self {
            live,
            file,
            choice: OnceLock::new(),
        }
    }

    /// File-only provider
    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Self::new(None, Box::new(FileSettings::new(path)))
    }

    fn choose(&self) -> Choice {
        *self.choice.get_or_init(|| match &self.live {
            Some(live) => match live.read() {
                Ok(_) => {
                    tracing::info!(source = live.name(), "using live settings");
                    Choice::Live
                }
                Err(e) => {
                    tracing::warn!(source = live.name(), error = %e, "live settings unreadable, using settings file");
                    Choice::File
                }
            },
            None => Choice::File,
        })
    }

    fn read_chosen(&self) -> Result<QuicksaveSettings, ConfigError> {
        match (self.choose(), &self.live) {
            (Choice::Live, Some(live)) => {
                let mut settings = live.read()?;
                settings.quickload_key = restrict_quickload_key(settings.quickload_key);
                Ok(settings)
            }
            _ => self.file.read(),
        }
    }

    /// Normalized configuration from the chosen source, or why it is unavailable
    pub fn try_current(&self) -> QuicksaveResult<QuicksaveConfig> {
        let settings = self.read_chosen()?;
        Ok(QuicksaveConfig::from_settings(&settings))
    }
}

impl ConfigProvider for LayeredConfig {
    fn current(&self) -> QuicksaveConfig {
        match self.try_current() {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(error = %e, "configuration unavailable, using defaults");
                QuicksaveConfig::default()
            }
        }
    }
}
