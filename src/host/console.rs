//! Command-line host over a save directory
//!
//! Always in its top-level mode, never inside a sub-activity. Notifications
//! are printed; the last applied save is remembered.

use super::{HostMode, IdentityProvider, LoadApplier, Notifier, Severity, compose_identity_label};
use crate::error::StoreError;
use crate::store::{FileSaveStore, LoadResult, LoadedSave, SaveFileRecord, SaveStore};

pub struct ConsoleHost {
    store: FileSaveStore,
    identity: String,
    applied: Option<LoadedSave>,
}

impl ConsoleHost {
    pub fn new(mut store: FileSaveStore, identity: impl Into<String>) -> Self {
        let identity = identity.into();
        store.set_identity(identity.clone());
        Self {
            store,
            identity,
            applied: None,
        }
    }

    /// Host whose identity is "{player} {affiliation}"
    pub fn for_player(
        store: FileSaveStore,
        player: Option<&str>,
        affiliation: Option<&str>,
    ) -> Self {
        Self::new(store, compose_identity_label(player, affiliation))
    }

    pub fn store(&self) -> &FileSaveStore {
        &self.store
    }

    pub fn applied(&self) -> Option<&LoadedSave> {
        self.applied.as_ref()
    }
}

impl SaveStore for ConsoleHost {
    fn list_save_records(&self) -> Result<Vec<SaveFileRecord>, StoreError> {
        self.store.list_save_records()
    }

    fn save(&mut self, name: &str) -> Result<(), StoreError> {
        self.store.save(name)
    }

    fn load(&self, name: &str) -> Result<LoadResult, StoreError> {
        self.store.load(name)
    }
}

impl IdentityProvider for ConsoleHost {
    fn current_identity_label(&self) -> String {
        self.identity.clone()
    }
}

impl HostMode for ConsoleHost {
    fn is_safe_to_apply_load(&self) -> bool {
        true
    }

    fn has_foreground_sub_activity(&self) -> bool {
        false
    }

    fn supports_loading_now(&self) -> bool {
        true
    }

    fn leave_foreground_sub_activity(&mut self) {}
}

impl LoadApplier for ConsoleHost {
    fn apply_load(&mut self, save: &LoadedSave) -> Result<(), String> {
        println!("[quicksave] Loaded {}", save.save_name);
        self.applied = Some(save.clone());
        Ok(())
    }
}

impl Notifier for ConsoleHost {
    fn display(&mut self, message: &str, severity: Severity) {
        match severity {
            Severity::Info => println!("[quicksave] {}", message),
            Severity::Warning => println!("[quicksave] Warning: {}", message),
            Severity::Error => eprintln!("[quicksave] Error: {}", message),
        }
    }
}
