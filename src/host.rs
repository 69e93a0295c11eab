//! Host capabilities consumed by the quicksave core
//!
//! The host application provides its save engine, the active player identity,
//! its current mode, the final load-apply step and a message display. A type
//! implementing all of them is a [`Host`].

mod console;

use crate::store::{LoadedSave, SaveStore};

pub use console::ConsoleHost;

/// Label of the currently active player, used to partition saves
pub trait IdentityProvider {
    /// Empty when there is no active player context
    fn current_identity_label(&self) -> String;
}

/// What the host is doing right now
pub trait HostMode {
    /// Host is in its top-level mode where a loaded game may be applied
    fn is_safe_to_apply_load(&self) -> bool;

    /// A mission, battle or similar sub-activity is in progress
    fn has_foreground_sub_activity(&self) -> bool;

    /// A running, save-capable game is active
    fn supports_loading_now(&self) -> bool;

    /// Ask the host to leave the running sub-activity (retreat)
    fn leave_foreground_sub_activity(&mut self);
}

/// Final step handing a loaded save to the host
pub trait LoadApplier {
    fn apply_load(&mut self, save: &LoadedSave) -> Result<(), String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// Fire-and-forget user-visible messages
pub trait Notifier {
    fn display(&mut self, message: &str, severity: Severity);
}

/// Everything the quicksave manager needs from its host
pub trait Host: SaveStore + IdentityProvider + HostMode + LoadApplier + Notifier {}

impl<T> Host for T where T: SaveStore + IdentityProvider + HostMode + LoadApplier + Notifier {}

/// "{player} {affiliation}", just the player, or empty without a player
pub fn compose_identity_label(player: Option<&str>, affiliation: Option<&str>) -> String {
    let player = player.map(str::trim).filter(|p| !p.is_empty());
    let affiliation = affiliation.map(str::trim).filter(|a| !a.is_empty());
    match (player, affiliation) {
        (Some(p), Some(a)) => format!("{p} {a}"),
        (Some(p), None) => p.to_string(),
        (None, _) => String::new(),
    }
}
