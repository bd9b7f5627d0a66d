//! Backslash escape stripping.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;

static ESCAPED_CHARACTER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\(.)").expect("escape pattern"));

/// Replaces every `\X` with `X` in a fully assembled output line.
///
/// This runs after every other substitution: the earlier passes refuse
/// matches whose delimiter is preceded by a backslash, which only works
/// while the backslash is still present.
pub fn strip_escapes(line: &str) -> Cow<'_, str> {
    ESCAPED_CHARACTER.replace_all(line, "$1")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_the_backslash_only() {
        assert_eq!(strip_escapes(r"\*text\*"), "*text*");
        assert_eq!(strip_escapes(r"\# heading"), "# heading");
        assert_eq!(strip_escapes("no escapes"), "no escapes");
    }

    #[test]
    fn every_pair_is_consumed_once() {
        assert_eq!(strip_escapes(r"\a\b\c"), "abc");
        assert_eq!(strip_escapes(r"\\*"), r"\*");
        assert_eq!(strip_escapes(r"trailing \"), r"trailing \");
    }
}
