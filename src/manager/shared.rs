// Cloneable manager handle for hosts that call back from several threads.
// One mutex guards the counter and the pending load together; it is held for
// the whole of each operation.

use super::{QuickloadOutcome, QuicksaveManager, Subscription};
use crate::config::KeyCode;
use crate::deferred::TickOutcome;
use crate::error::QuicksaveError;
use crate::host::Host;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Clone)]
pub struct SharedQuicksaveManager {
    inner: Arc<Mutex<QuicksaveManager>>,
}

impl SharedQuicksaveManager {
    pub fn new(manager: QuicksaveManager) -> Self {
        Self {
            inner: Arc::new(Mutex::new(manager)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, QuicksaveManager> {
        // State stays consistent between operations, so a poisoned lock is usable
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run `f` with exclusive access to the manager
    pub fn with<R>(&self, f: impl FnOnce(&mut QuicksaveManager) -> R) -> R {
        f(&mut self.lock())
    }

    pub fn attach(&self) -> Subscription {
        self.lock().attach()
    }

    pub fn detach(&self, subscription: Subscription) {
        self.lock().detach(subscription)
    }

    pub fn generate_next_save_name<H: Host + ?Sized>(&self, host: &H) -> String {
        self.lock().generate_next_save_name(host)
    }

    pub fn on_save_completed<H: Host + ?Sized>(&self, host: &mut H) {
        self.lock().on_save_completed(host)
    }

    pub fn quicksave<H: Host + ?Sized>(&self, host: &mut H) -> Result<String, QuicksaveError> {
        self.lock().quicksave(host)
    }

    pub fn on_identity_changed(&self) {
        self.lock().on_identity_changed()
    }

    pub fn request_quickload<H: Host + ?Sized>(&self, host: &mut H) -> QuickloadOutcome {
        self.lock().request_quickload(host)
    }

    pub fn on_key_pressed<H: Host + ?Sized>(
        &self,
        key: KeyCode,
        host: &mut H,
    ) -> Option<QuickloadOutcome> {
        self.lock().on_key_pressed(key, host)
    }

    pub fn on_tick<H: Host + ?Sized>(&self, host: &mut H) -> TickOutcome {
        self.lock().on_tick(host)
    }
}
