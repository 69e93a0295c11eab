//! Deferred load application
//!
//! A quickload is loaded eagerly but applied only on a host tick where the
//! host is in its safe top-level mode. States: idle, pending, and applying
//! (transient, inside [`DeferredLoadController::tick`]). Each pending save is
//! applied at most once; a conflict or failed apply drops it without retry.

use crate::error::QuicksaveError;
use crate::host::{HostMode, LoadApplier, Notifier, Severity};
use crate::store::LoadedSave;

pub const MSG_APPLY_CONFLICT: &str = "Mission is not null, failed to quickload!";

#[derive(Debug, Default)]
enum PendingLoad {
    #[default]
    Idle,
    Pending(LoadedSave),
}

/// What a tick did
#[derive(Debug)]
pub enum TickOutcome {
    /// Nothing pending
    Idle,
    /// A save is pending but the host is not in its safe mode yet
    Waiting,
    /// The pending save was handed to the host
    Applied(String),
    /// The pending save was dropped
    Failed(QuicksaveError),
}

#[derive(Debug, Default)]
pub struct DeferredLoadController {
    pending: PendingLoad,
}

impl DeferredLoadController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hold a loaded save until a safe tick, replacing any older one
    pub fn submit(&mut self, save: LoadedSave) {
        if let PendingLoad::Pending(old) = &self.pending {
            tracing::debug!(superseded = %old.save_name, "pending quickload replaced");
        }
        tracing::info!(save = %save.save_name, "quickload pending");
        self.pending = PendingLoad::Pending(save);
    }

    /// Drop the pending save, if any; true when something was dropped
    pub fn clear(&mut self) -> bool {
        matches!(
            std::mem::take(&mut self.pending),
            PendingLoad::Pending(_)
        )
    }

    pub fn pending(&self) -> Option<&LoadedSave> {
        match &self.pending {
            PendingLoad::Pending(save) => Some(save),
            PendingLoad::Idle => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending().is_some()
    }

    /// Per-tick hook: apply the pending save once the host allows it
    pub fn tick<H>(&mut self, host: &mut H) -> TickOutcome
    where
        H: HostMode + LoadApplier + Notifier + ?Sized,
    {
        if !self.is_pending() {
            return TickOutcome::Idle;
        }
        if !host.is_safe_to_apply_load() {
            return TickOutcome::Waiting;
        }

        // Applying: the save leaves the controller before the host sees it
        let PendingLoad::Pending(save) = std::mem::take(&mut self.pending) else {
            return TickOutcome::Idle;
        };

        if host.has_foreground_sub_activity() {
            tracing::warn!(save = %save.save_name, "sub-activity still running, quickload dropped");
            host.display(MSG_APPLY_CONFLICT, Severity::Error);
            return TickOutcome::Failed(QuicksaveError::UnsafeApplyConflict);
        }

        match host.apply_load(&save) {
            Ok(()) => {
                tracing::info!(save = %save.save_name, "quickload applied");
                TickOutcome::Applied(save.save_name)
            }
            Err(e) => {
                tracing::warn!(save = %save.save_name, error = %e, "quickload apply failed");
                host.display(&format!("Quickload failed: {e}"), Severity::Error);
                TickOutcome::Failed(QuicksaveError::LoadApplyFailed(e))
            }
        }
    }
}
