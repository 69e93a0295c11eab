//! Rotating quicksave slots with deferred quickload
//!
//! Quicksaves rotate through a bounded pool of names, optionally scoped to
//! the active player identity. A quickload finds the most recently modified
//! save of the pool, loads it, and applies it on the first host tick where
//! that is safe.

pub mod config;
pub mod deferred;
pub mod error;
pub mod host;
pub mod manager;
pub mod naming;
pub mod paths;
pub mod rotation;
pub mod store;

pub use config::{ConfigProvider, KeyCode, LayeredConfig, QuicksaveConfig, QuicksaveSettings};
pub use deferred::{DeferredLoadController, TickOutcome};
pub use error::{ConfigError, QuicksaveError, QuicksaveResult, StoreError};
pub use host::{ConsoleHost, Host, Severity};
pub use manager::{QuickloadOutcome, QuicksaveManager, SharedQuicksaveManager, Subscription};
pub use rotation::RotationCounter;
pub use store::{FileSaveStore, LoadResult, LoadedSave, SaveFileRecord, SaveStore};
