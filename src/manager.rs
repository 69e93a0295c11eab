//! Quicksave orchestration
//!
//! [`QuicksaveManager`] owns the rotation counter and the deferred loader and
//! reads configuration through a [`ConfigProvider`]. The host drives it
//! through callbacks: save name generation before its own save, save
//! completion, identity changes, quickload requests and the per-frame tick.

mod shared;
#[cfg(test)]
mod tests;

use crate::config::{ConfigProvider, KeyCode, QuicksaveConfig};
use crate::deferred::{DeferredLoadController, TickOutcome};
use crate::error::QuicksaveError;
use crate::host::{Host, Severity};
use crate::naming::{build_name, build_pattern};
use crate::rotation::RotationCounter;
use crate::store::{LoadResult, LoadedSave, SaveFileRecord, find_latest};

pub use shared::SharedQuicksaveManager;

pub const MSG_QUICKSAVED: &str = "Quicksaved.";
pub const MSG_NOT_AVAILABLE: &str = "Quickload is not available right now.";
pub const MSG_NO_QUICKSAVES: &str = "No quicksaves available.";
pub const MSG_UNABLE_TO_LOAD: &str = "Unable to load quicksave:";

/// What a quickload request did
#[derive(Debug)]
pub enum QuickloadOutcome {
    /// Host is not in a running, save-capable game
    NotAvailable,
    /// No save matched the rotation (also after a listing failure)
    NoQuicksaves,
    /// The store returned an unsuccessful load result
    Failed(QuicksaveError),
    /// The save is loaded and waits for a safe tick
    Pending(String),
}

/// Handle for one attached host session
#[derive(Debug, PartialEq, Eq)]
pub struct Subscription {
    id: u64,
}

impl Subscription {
    pub fn id(&self) -> u64 {
        self.id
    }
}

pub struct QuicksaveManager {
    config: Box<dyn ConfigProvider>,
    counter: RotationCounter,
    loader: DeferredLoadController,
    session: Option<u64>,
    next_session: u64,
}

impl QuicksaveManager {
    pub fn new(config: Box<dyn ConfigProvider>) -> Self {
        Self {
            config,
            counter: RotationCounter::new(),
            loader: DeferredLoadController::new(),
            session: None,
            next_session: 1,
        }
    }

    pub fn config(&self) -> QuicksaveConfig {
        self.config.current()
    }

    pub fn counter(&self) -> &RotationCounter {
        &self.counter
    }

    pub fn pending_load(&self) -> Option<&LoadedSave> {
        self.loader.pending()
    }

    // ============= SESSION =============

    /// Start listening to host session events
    ///
    /// Replaces any earlier session; the rotation is re-derived on next use.
    pub fn attach(&mut self) -> Subscription {
        let id = self.next_session;
        self.next_session += 1;
        self.session = Some(id);
        self.counter.mark_stale();
        tracing::info!(session = id, "quicksave session attached");
        Subscription { id }
    }

    /// Stop listening; a pending quickload of this session is dropped
    pub fn detach(&mut self, subscription: Subscription) {
        if self.session != Some(subscription.id) {
            tracing::debug!(session = subscription.id, "detach of inactive session ignored");
            return;
        }
        self.session = None;
        if self.loader.clear() {
            tracing::info!(session = subscription.id, "pending quickload dropped on detach");
        }
        tracing::info!(session = subscription.id, "quicksave session detached");
    }

    pub fn is_attached(&self) -> bool {
        self.session.is_some()
    }

    // ============= SAVING =============

    /// Name for the host's next quicksave; the counter is not advanced
    pub fn generate_next_save_name<H>(&mut self, host: &H) -> String
    where
        H: Host + ?Sized,
    {
        let config = self.config.current();
        let identity = host.current_identity_label();

        if self.counter.is_stale() {
            match build_pattern(&config, &identity) {
                Ok(matcher) => {
                    self.counter.recompute_from(host, &matcher);
                }
                Err(e) => {
                    tracing::warn!(error = %e, "cannot build quicksave pattern, rotation restarts at slot 1");
                    self.counter.reset();
                }
            }
        }

        let slot = self.counter.current(config.max_slots);
        let name = build_name(&config, &identity, slot);
        tracing::debug!(name = %name, slot, "next quicksave name");
        name
    }

    /// Host confirmed the quicksave was written
    pub fn on_save_completed<H>(&mut self, host: &mut H)
    where
        H: Host + ?Sized,
    {
        let config = self.config.current();
        self.counter.advance(config.max_slots);
        host.display(MSG_QUICKSAVED, Severity::Info);
    }

    /// Generate a name, save through the store and advance on success
    pub fn quicksave<H>(&mut self, host: &mut H) -> Result<String, QuicksaveError>
    where
        H: Host + ?Sized,
    {
        let name = self.generate_next_save_name(&*host);
        if let Err(e) = host.save(&name) {
            tracing::warn!(name = %name, error = %e, "quicksave failed");
            host.display(&format!("Quicksave failed: {e}"), Severity::Error);
            return Err(e.into());
        }
        self.on_save_completed(host);
        Ok(name)
    }

    /// The active player changed; numbering restarts for the new identity
    pub fn on_identity_changed(&mut self) {
        if !self.is_attached() {
            tracing::debug!("identity change outside a session ignored");
            return;
        }
        self.counter.reset();
        self.counter.mark_stale();
        tracing::info!("identity changed, rotation reset");
    }

    // ============= LOADING =============

    /// Find the latest quicksave, load it and queue it for a safe tick
    pub fn request_quickload<H>(&mut self, host: &mut H) -> QuickloadOutcome
    where
        H: Host + ?Sized,
    {
        if !host.supports_loading_now() {
            host.display(MSG_NOT_AVAILABLE, Severity::Warning);
            return QuickloadOutcome::NotAvailable;
        }

        let config = self.config.current();
        let identity = host.current_identity_label();

        let latest = Self::load_latest(&config, &identity, &*host);

        // A new request supersedes whatever was still pending
        self.loader.clear();

        let (record, result) = match latest {
            Ok(Some(found)) => found,
            Ok(None) => {
                host.display(MSG_NO_QUICKSAVES, Severity::Info);
                return QuickloadOutcome::NoQuicksaves;
            }
            Err(e) => {
                tracing::warn!(error = %e, "quickload lookup failed");
                host.display(&format!("Failed to quickload: {e}"), Severity::Error);
                host.display(MSG_NO_QUICKSAVES, Severity::Info);
                return QuickloadOutcome::NoQuicksaves;
            }
        };

        match result.into_loaded(&record.name) {
            Ok(save) => {
                let name = save.save_name.clone();
                self.loader.submit(save);
                if host.has_foreground_sub_activity() {
                    tracing::info!("leaving running sub-activity for quickload");
                    host.leave_foreground_sub_activity();
                }
                QuickloadOutcome::Pending(name)
            }
            Err(errors) => {
                tracing::warn!(save = %record.name, errors = errors.len(), "quicksave load unsuccessful");
                host.display(MSG_UNABLE_TO_LOAD, Severity::Warning);
                for message in &errors {
                    host.display(message, Severity::Error);
                }
                QuickloadOutcome::Failed(QuicksaveError::LoadUnsuccessful(errors))
            }
        }
    }

    fn load_latest<H>(
        config: &QuicksaveConfig,
        identity: &str,
        host: &H,
    ) -> Result<Option<(SaveFileRecord, LoadResult)>, QuicksaveError>
    where
        H: Host + ?Sized,
    {
        let matcher = build_pattern(config, identity)?;
        let Some(record) = find_latest(host, &matcher)? else {
            return Ok(None);
        };
        let result = host.load(&record.name)?;
        Ok(Some((record, result)))
    }

    /// Quickload when `key` is the configured quickload key
    pub fn on_key_pressed<H>(&mut self, key: KeyCode, host: &mut H) -> Option<QuickloadOutcome>
    where
        H: Host + ?Sized,
    {
        if key != self.config.current().quickload_key {
            return None;
        }
        Some(self.request_quickload(host))
    }

    /// Per-frame hook
    pub fn on_tick<H>(&mut self, host: &mut H) -> TickOutcome
    where
        H: Host + ?Sized,
    {
        self.loader.tick(host)
    }
}
