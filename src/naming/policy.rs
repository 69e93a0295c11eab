// Pure naming policy: save names and the pattern that recognizes them

use super::matcher::Matcher;
use crate::config::QuicksaveConfig;

/// Leading "{identity} " segment, or nothing when saves are not partitioned
fn identity_segment<'a>(config: &QuicksaveConfig, identity: &'a str) -> Option<&'a str> {
    if config.per_identity_saves && !identity.is_empty() {
        Some(identity)
    } else {
        None
    }
}

/// Name for `slot_index`: "{identity} {prefix}{slot:03}"
pub fn build_name(config: &QuicksaveConfig, identity: &str, slot_index: u32) -> String {
    let mut name = String::new();
    if let Some(identity) = identity_segment(config, identity) {
        name.push_str(identity);
        name.push(' ');
    }
    name.push_str(&config.prefix);
    if config.multiple_slots() {
        name.push_str(&format!("{:03}", slot_index));
    }
    name
}

/// Pattern accepting exactly the names [`build_name`] produces
///
/// Identity and prefix are matched literally. With more than one slot the
/// three-digit suffix is captured; any three digits are accepted so saves
/// left over from a larger rotation still count as quicksaves.
pub fn build_pattern(config: &QuicksaveConfig, identity: &str) -> Result<Matcher, regex::Error> {
    let identity = identity_segment(config, identity)
        .map(|id| format!("{} ", regex::escape(id)))
        .unwrap_or_default();
    let prefix = regex::escape(&config.prefix);
    let slot = if config.multiple_slots() {
        "([0-9]{3})"
    } else {
        ""
    };

    Matcher::new(&format!("^{identity}{prefix}{slot}$"))
}
