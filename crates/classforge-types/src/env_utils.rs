//! Environment variable parsing utilities.
//!
//! Small helpers so configuration layers don't repeat the
//! `std::env::var(..).ok().and_then(..)` dance.
//!
//! # Example
//!
//! ```
//! use classforge_types::env_utils::{env_flag, env_path};
//!
//! let parallel: Option<bool> = env_flag("CLASSFORGE_EXAMPLE_PARALLEL");
//! let mappings = env_path("CLASSFORGE_EXAMPLE_MAPPINGS");
//! # let _ = (parallel, mappings);
//! ```

use std::path::PathBuf;

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Tri-state boolean: `Some(true)` for truthy values, `Some(false)` for
/// `0/false/no/off`, `None` when unset or unrecognized.
///
/// Used for overrides, where "unset" must leave the configured value alone.
pub fn env_flag(key: &str) -> Option<bool> {
    std::env::var(key).ok().as_deref().and_then(parse_flag)
}

/// Non-empty environment variable as a path.
pub fn env_path(key: &str) -> Option<PathBuf> {
    std::env::var_os(key)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}
