//! Pattern counting over fetched page bodies.

use regex::Regex;

/// Count non-overlapping matches of `pattern` in `text`.
pub fn count_matches(pattern: &Regex, text: &str) -> usize {
    pattern.find_iter(text).count()
}
