//! Rotation counter
//!
//! Tracks the slot the next quicksave goes into. The value is re-derived from
//! the store listing when stale (first use, identity change, new session) and
//! advanced only after the host confirms a save.

use crate::naming::Matcher;
use crate::store::SaveStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotationCounter {
    next_index: u32,
    stale: bool,
}

impl Default for RotationCounter {
    fn default() -> Self {
        Self {
            next_index: 1,
            stale: true,
        }
    }
}

impl RotationCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw next index; may exceed the slot count until [`Self::current`] wraps it
    pub fn next_index(&self) -> u32 {
        self.next_index
    }

    pub fn is_stale(&self) -> bool {
        self.stale
    }

    pub fn mark_stale(&mut self) {
        self.stale = true;
    }

    /// Next index for a rotation of `max_slots`, wrapping to 1 when out of range
    pub fn current(&mut self, max_slots: u32) -> u32 {
        if self.next_index == 0 || self.next_index > max_slots {
            self.next_index = 1;
        }
        self.next_index
    }

    /// Derive the next index from existing save names
    ///
    /// Uses the *first* matching name in the order given, not the highest
    /// slot. Stores that list newest first make this "one past the latest
    /// quicksave"; any other order makes the result depend on that order.
    pub fn recompute<'a, I>(&mut self, names: I, matcher: &Matcher) -> u32
    where
        I: IntoIterator<Item = &'a str>,
    {
        self.next_index = names
            .into_iter()
            .find(|name| matcher.matches(name))
            .and_then(|name| matcher.extract_slot_number(name))
            .map_or(1, |slot| slot + 1);
        self.stale = false;
        tracing::debug!(next_index = self.next_index, "rotation counter recomputed");
        self.next_index
    }

    /// Recompute from a store listing; a failing listing resets to 1
    pub fn recompute_from<S>(&mut self, store: &S, matcher: &Matcher) -> u32
    where
        S: SaveStore + ?Sized,
    {
        match store.list_save_records() {
            Ok(records) => self.recompute(records.iter().map(|r| r.name.as_str()), matcher),
            Err(e) => {
                tracing::warn!(error = %e, "cannot list saves, rotation restarts at slot 1");
                self.next_index = 1;
                self.stale = false;
                self.next_index
            }
        }
    }

    /// Move to the next slot after a successful save
    pub fn advance(&mut self, max_slots: u32) {
        self.next_index = if self.next_index >= max_slots {
            1
        } else {
            self.next_index + 1
        };
        tracing::debug!(next_index = self.next_index, "rotation counter advanced");
    }

    /// Back to slot 1, e.g. when the active identity changes
    pub fn reset(&mut self) {
        self.next_index = 1;
        tracing::debug!(next_index = self.next_index, "rotation counter reset");
    }
}
