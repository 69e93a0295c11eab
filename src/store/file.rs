//! Directory-backed save store
//!
//! Each save is a `<name>.sav` JSON document. Game state itself is out of
//! scope; the document records who saved and when, which is what the
//! rotation and quickload paths need.

use super::SaveStore;
use super::types::{LoadResult, META_SAVE_NAME, SaveFileRecord, SaveMetadata};
use crate::error::StoreError;

use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

pub const SAVE_EXTENSION: &str = "sav";
pub const SAVE_FORMAT_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SaveDocument {
    version: u32,
    save_name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    identity: String,
    created_unix: u64,
}

pub struct FileSaveStore {
    dir: PathBuf,
    identity: String,
}

impl FileSaveStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            identity: String::new(),
        }
    }

    /// Identity label written into new save documents
    pub fn set_identity(&mut self, identity: impl Into<String>) {
        self.identity = identity.into();
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File for `name` directly inside the save directory
    ///
    /// Names that are empty or would leave the directory are rejected, since
    /// the listing could never report them back.
    pub fn save_path(&self, name: &str) -> Result<PathBuf, StoreError> {
        let file_name = format!("{name}.{SAVE_EXTENSION}");
        let mut components = Path::new(&file_name).components();
        let single_file = matches!(
            (components.next(), components.next()),
            (Some(Component::Normal(_)), None)
        );
        if name.is_empty() || !single_file {
            return Err(StoreError::InvalidName(name.to_string()));
        }
        Ok(self.dir.join(file_name))
    }
}

impl SaveStore for FileSaveStore {
    fn list_save_records(&self) -> Result<Vec<SaveFileRecord>, StoreError> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let mut out = Vec::new();
        let walk = walkdir::WalkDir::new(&self.dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(false);

        for entry in walk {
            let entry = entry.map_err(|e| StoreError::Listing(e.to_string()))?;
            let path = entry.path();
            if !entry.file_type().is_file()
                || path.extension().and_then(|e| e.to_str()) != Some(SAVE_EXTENSION)
            {
                continue;
            }
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let modified = entry
                .metadata()
                .map_err(|e| StoreError::Listing(e.to_string()))?
                .modified()?;
            out.push(SaveFileRecord::new(name, modified));
        }

        // Newest first, like the host's own save list
        out.sort_by(|a, b| {
            b.last_modified
                .cmp(&a.last_modified)
                .then_with(|| a.name.cmp(&b.name))
        });
        Ok(out)
    }

    fn save(&mut self, name: &str) -> Result<(), StoreError> {
        let path = self.save_path(name)?;
        std::fs::create_dir_all(&self.dir)?;

        let created_unix = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        let doc = SaveDocument {
            version: SAVE_FORMAT_VERSION,
            save_name: name.to_string(),
            identity: self.identity.clone(),
            created_unix,
        };

        std::fs::write(&path, serde_json::to_string_pretty(&doc)?)?;
        tracing::info!(path = %path.display(), "save written");
        Ok(())
    }

    fn load(&self, name: &str) -> Result<LoadResult, StoreError> {
        let path = self.save_path(name)?;
        if !path.exists() {
            return Err(StoreError::NotFound(name.to_string()));
        }

        let json = std::fs::read_to_string(&path)?;
        let doc: SaveDocument = match serde_json::from_str(&json) {
            Ok(doc) => doc,
            Err(e) => {
                return Ok(LoadResult::failure(vec![format!(
                    "Save '{name}' is corrupt: {e}"
                )]));
            }
        };
        if doc.version > SAVE_FORMAT_VERSION {
            return Ok(LoadResult::failure(vec![format!(
                "Save '{name}' has version {} but only {} is supported.",
                doc.version, SAVE_FORMAT_VERSION
            )]));
        }

        let mut metadata = SaveMetadata::default();
        metadata.insert(META_SAVE_NAME, doc.save_name);
        if !doc.identity.is_empty() {
            metadata.insert("identity", doc.identity);
        }
        metadata.insert("created_unix", doc.created_unix.to_string());
        Ok(LoadResult::success(metadata))
    }
}
