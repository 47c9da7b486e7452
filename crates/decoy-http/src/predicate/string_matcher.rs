//! Regex-or-equality string matching.

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use regex::Regex;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Characters whose presence turns a pattern string into a regular expression.
const REGEX_MARKERS: [char; 9] = ['+', '.', '*', '[', '{', '^', '|', '$', '?'];

/// Upper bound on cached compiled patterns; the cache is dropped wholesale when full.
const REGEX_CACHE_LIMIT: usize = 1024;

/// Compiled patterns keyed by their source text. `None` marks a pattern that
/// failed to compile and is therefore compared literally.
static REGEX_CACHE: Lazy<RwLock<HashMap<String, Option<Arc<Regex>>>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// Whether `pattern` is matched as a regular expression.
pub fn is_regex_pattern(pattern: &str) -> bool {
    pattern.contains(REGEX_MARKERS)
}

/// Match `actual` against `pattern`.
///
/// Regex patterns must match the entire actual string. Patterns without any
/// regex marker, or that fail to compile, require exact equality.
pub fn string_matches(pattern: &str, actual: &str) -> bool {
    if !is_regex_pattern(pattern) {
        return pattern == actual;
    }
    match compiled(pattern) {
        Some(regex) => regex.is_match(actual),
        None => pattern == actual,
    }
}

fn compiled(pattern: &str) -> Option<Arc<Regex>> {
    if let Some(cached) = REGEX_CACHE.read().get(pattern) {
        return cached.clone();
    }

    let regex = match Regex::new(&format!("^(?:{pattern})$")) {
        Ok(regex) => Some(Arc::new(regex)),
        Err(e) => {
            debug!(pattern = pattern, "Pattern is not a valid regex, comparing literally: {}", e);
            None
        }
    };

    let mut cache = REGEX_CACHE.write();
    if cache.len() >= REGEX_CACHE_LIMIT {
        cache.clear();
    }
    cache.insert(pattern.to_string(), regex.clone());
    regex
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_pattern_requires_equality() {
        assert!(string_matches("abc", "abc"));
        assert!(!string_matches("abc", "abcd"));
        assert!(!string_matches("abc", "ABC"));
    }

    #[test]
    fn test_regex_pattern_is_full_match() {
        assert!(string_matches("abc.*", "abcd"));
        assert!(string_matches("abc.*", "abc"));
        assert!(!string_matches("bc.*", "abcd"));
        assert!(!string_matches("/users/[0-9]+", "/users/42/orders"));
        assert!(string_matches("/users/[0-9]+", "/users/42"));
    }

    #[test]
    fn test_every_marker_triggers_regex() {
        for marker in REGEX_MARKERS {
            assert!(is_regex_pattern(&format!("a{marker}b")), "marker {marker}");
        }
        assert!(!is_regex_pattern("/plain/path-with_chars"));
    }

    #[test]
    fn test_anchors_in_pattern() {
        assert!(string_matches("^GET|POST$", "GET"));
        assert!(string_matches("^GET|POST$", "POST"));
        assert!(!string_matches("^GET|POST$", "PUT"));
    }

    #[test]
    fn test_invalid_regex_falls_back_to_equality() {
        assert!(string_matches("a[b", "a[b"));
        assert!(!string_matches("a[b", "ab"));
    }

    #[test]
    fn test_dot_is_wildcard() {
        // "1.0" is a regex, so "110" matches
        assert!(string_matches("1.0", "110"));
        assert!(string_matches("1.0", "1.0"));
    }
}
