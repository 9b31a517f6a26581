//! Helpers over textual domain names.
//!
//! Names are compared in normalised form: ASCII lower-case, surrounding
//! whitespace and the trailing root dot removed.

use crate::limits::MAX_DOMAIN_LEVELS;
use crate::resolve_error::ResolveError;

pub fn normalize(name: &str) -> String {
    name.trim().trim_end_matches('.').to_ascii_lowercase()
}

/// Non-empty labels of `name`, left to right.
pub fn labels(name: &str) -> Vec<&str> {
    name.split('.').filter(|label| !label.is_empty()).collect()
}

/// Fails with `DOMAIN_TOO_LONG` when `name` has more than `MAX_DOMAIN_LEVELS` labels.
pub fn check_depth(name: &str) -> Result<(), ResolveError> {
    let levels = labels(name).len();
    if levels > MAX_DOMAIN_LEVELS {
        return Err(ResolveError::domain_too_long(name, levels, MAX_DOMAIN_LEVELS));
    }
    Ok(())
}

/// `a.b.example.com` → `a.b.example.com`, `b.example.com`, `example.com`, `com`.
pub fn suffixes_most_specific_first(name: &str) -> Vec<String> {
    let labels = labels(name);
    (0..labels.len()).map(|i| labels[i..].join(".")).collect()
}

/// `a.b.example.com` → `com`, `example.com`, `b.example.com`, `a.b.example.com`.
pub fn suffixes_least_specific_first(name: &str) -> Vec<String> {
    let mut zones = suffixes_most_specific_first(name);
    zones.reverse();
    zones
}

/// Whether two names are equal once normalised.
pub fn same_name(a: &str, b: &str) -> bool {
    normalize(a) == normalize(b)
}
