use crate::config::types::QuicksaveSettings;
use crate::error::ConfigError;

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Read the settings document, writing the defaults first if it is absent
pub fn load_settings_file(path: &Path) -> Result<QuicksaveSettings, ConfigError> {
    if !path.exists() {
        tracing::info!(path = %path.display(), "settings file missing, writing defaults");
        save_settings_file(path, &QuicksaveSettings::default())?;
    }

    let file = File::open(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

pub fn save_settings_file(path: &Path, settings: &QuicksaveSettings) -> Result<(), ConfigError> {
    let io_err = |source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }
    let file = File::create(path).map_err(io_err)?;
    serde_json::to_writer_pretty(file, settings).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
