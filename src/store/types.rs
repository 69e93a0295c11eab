//! Save store type definitions

use std::collections::BTreeMap;
use std::time::SystemTime;

/// Metadata key naming the save a load result belongs to
pub const META_SAVE_NAME: &str = "save_name";

/// One save file as seen in a store listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveFileRecord {
    /// File name without directory or extension
    pub name: String,
    pub last_modified: SystemTime,
}

impl SaveFileRecord {
    pub fn new(name: impl Into<String>, last_modified: SystemTime) -> Self {
        Self {
            name: name.into(),
            last_modified,
        }
    }
}

/// Opaque metadata attached to a loaded save
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaveMetadata(pub BTreeMap<String, String>);

impl SaveMetadata {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn save_name(&self) -> Option<&str> {
        self.get(META_SAVE_NAME)
    }
}

/// Raw result of asking the store to load a save
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadResult {
    pub successful: bool,
    /// Failure messages in the order the store reported them
    pub errors: Vec<String>,
    pub metadata: SaveMetadata,
}

impl LoadResult {
    pub fn success(metadata: SaveMetadata) -> Self {
        Self {
            successful: true,
            errors: Vec::new(),
            metadata,
        }
    }

    pub fn failure(errors: Vec<String>) -> Self {
        Self {
            successful: false,
            errors,
            metadata: SaveMetadata::default(),
        }
    }

    /// Split into a loaded save or its (never empty) error messages
    ///
    /// `requested_name` is used when the metadata does not name the save.
    pub fn into_loaded(self, requested_name: &str) -> Result<LoadedSave, Vec<String>> {
        if !self.successful {
            if self.errors.is_empty() {
                return Err(vec![format!("Save '{requested_name}' could not be loaded.")]);
            }
            return Err(self.errors);
        }

        let save_name = self
            .metadata
            .save_name()
            .map(str::to_string)
            .unwrap_or_else(|| requested_name.to_string());
        Ok(LoadedSave {
            save_name,
            metadata: self.metadata,
        })
    }
}

/// A successfully loaded save waiting to be applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedSave {
    pub save_name: String,
    pub metadata: SaveMetadata,
}
