//! Rotation-member recognition
//!
//! A [`Matcher`] answers two questions about a save name: is it one of ours,
//! and which slot does it occupy.

use regex::Regex;

#[derive(Debug, Clone)]
pub struct Matcher {
    re: Regex,
}

impl Matcher {
    pub(super) fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            re: Regex::new(pattern)?,
        })
    }

    pub fn matches(&self, name: &str) -> bool {
        self.re.is_match(name)
    }

    /// Slot number of a matching name; None when the name does not match or
    /// the pattern has no numeric suffix (single-slot rotation)
    pub fn extract_slot_number(&self, name: &str) -> Option<u32> {
        self.re
            .captures(name)?
            .get(1)
            .and_then(|m| m.as_str().parse::<u32>().ok())
    }

    pub fn pattern(&self) -> &str {
        self.re.as_str()
    }
}
