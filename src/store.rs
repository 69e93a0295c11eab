//! Save store abstraction
//!
//! The host's save/load engine is reached only through [`SaveStore`].
//!
//! ## Module Structure
//! - `types.rs`: SaveFileRecord, LoadResult, SaveMetadata, LoadedSave
//! - `selector.rs`: latest-quicksave selection
//! - `file.rs`: directory-backed store used by the command-line driver

mod file;
mod selector;
mod types;

use crate::error::StoreError;

pub use file::{FileSaveStore, SAVE_EXTENSION};
pub use selector::{find_latest, latest_matching};
pub use types::{LoadResult, LoadedSave, META_SAVE_NAME, SaveFileRecord, SaveMetadata};

/// Save/load capability of the host
pub trait SaveStore {
    /// Every save the host knows about, in the host's listing order
    fn list_save_records(&self) -> Result<Vec<SaveFileRecord>, StoreError>;

    fn save(&mut self, name: &str) -> Result<(), StoreError>;

    fn load(&self, name: &str) -> Result<LoadResult, StoreError>;
}
