//! Quicksave naming
//!
//! Pure, deterministic policy turning configuration, the active identity and
//! a slot index into a save name, plus the [`Matcher`] recognizing those
//! names on disk.

mod matcher;
mod policy;

pub use matcher::Matcher;
pub use policy::{build_name, build_pattern};
