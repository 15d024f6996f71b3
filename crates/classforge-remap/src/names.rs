//! Internal class name helpers.
//!
//! Class names inside a class file come in a few shapes depending on where
//! they appear:
//! - Internal name: "a/b/Outer$Inner"
//! - Object descriptor: "La/b/Outer$Inner;"
//! - Array descriptor (as a member owner): "[La/b/Outer;", "[I"
//!
//! Symbol tables are keyed by internal name, so everything is normalized to
//! that form before lookup.

use classforge_types::descriptor::{object_internal_name, strip_array};

/// Internal name to look a member owner up by.
///
/// Owners of member references are usually internal names, but calls such as
/// `[La/B;.clone()` carry an array descriptor. Arrays of objects resolve to
/// their element class; arrays of primitives have no owner class.
///
/// # Examples
///
/// ```
/// use classforge_remap::names::member_owner;
///
/// assert_eq!(member_owner("a/B"), Some("a/B"));
/// assert_eq!(member_owner("[[La/B;"), Some("a/B"));
/// assert_eq!(member_owner("La/B;"), Some("a/B"));
/// assert_eq!(member_owner("[I"), None);
/// ```
pub fn member_owner(owner: &str) -> Option<&str> {
    let (dims, element) = strip_array(owner);
    match object_internal_name(element) {
        Some(name) => Some(name),
        None if dims == 0 && !element.is_empty() => Some(element),
        None => None,
    }
}

/// Simple name of an inner class after renaming.
///
/// When the class keeps its name the declared simple name is kept as is.
/// Otherwise the simple name is whatever follows the last `$` of the renamed
/// binary name, with the numeric prefix of local classes (`Outer$1Local`)
/// removed. Renamed names without a `$` fall back to the last path segment.
pub fn inner_simple_name(original: &str, renamed: &str, declared: &str) -> String {
    if original == renamed {
        return declared.to_string();
    }
    match renamed.rfind('$') {
        Some(idx) => {
            let tail = renamed[idx + 1..].trim_start_matches(|c: char| c.is_ascii_digit());
            if tail.is_empty() {
                declared.to_string()
            } else {
                tail.to_string()
            }
        }
        None => renamed.rsplit('/').next().unwrap_or(renamed).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_owner() {
        assert_eq!(member_owner("java/lang/Object"), Some("java/lang/Object"));
        assert_eq!(member_owner("[Ljava/lang/String;"), Some("java/lang/String"));
        assert_eq!(member_owner("[[J"), None);
        assert_eq!(member_owner(""), None);
    }

    #[test]
    fn test_inner_simple_name_unchanged_class() {
        assert_eq!(inner_simple_name("a/Outer$In", "a/Outer$In", "In"), "In");
    }

    #[test]
    fn test_inner_simple_name_renamed() {
        assert_eq!(inner_simple_name("a/b$c", "net/Outer$Entry", "c"), "Entry");
        assert_eq!(inner_simple_name("a/b$1c", "net/Outer$1Local", "c"), "Local");
        assert_eq!(inner_simple_name("a/b$c", "net/Standalone", "c"), "Standalone");
    }

    #[test]
    fn test_inner_simple_name_anonymous_keeps_declared() {
        assert_eq!(inner_simple_name("a/b$1", "net/Outer$1", "x"), "x");
    }
}
