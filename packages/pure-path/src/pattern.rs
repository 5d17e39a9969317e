//! Shell-style wildcard matching for single path components.

use std::ffi::OsStr;
use std::os::unix::ffi::OsStrExt;

use regex::bytes::Regex;

use crate::PathError;

/// One character, or a lone byte that is not part of valid UTF-8.
const ANY: &str = r"(?:(?s:.)|(?-u:[\x80-\xFF]))";

/// A raw high byte, for alternatives that must also accept non-UTF-8 names.
const RAW_BYTE: &str = r"(?-u:[\x80-\xFF])";

/// A compiled wildcard pattern for one path component.
///
/// - `*` matches any run of characters, including none
/// - `?` matches exactly one character
/// - `[abc]` and `[a-z]` match one character from the set, `[!...]` negates
/// - Anything else, `/` excepted, matches itself
///
/// Matching is case-sensitive and leading dots are not special: `*` matches
/// `.hidden`. A `[` without a closing `]` is an ordinary character.
#[derive(Clone, Debug)]
pub struct Pattern {
    source: String,
    regex: Regex,
}

impl Pattern {
    /// Compile a component pattern.
    pub fn new(pattern: &str) -> Result<Self, PathError> {
        let regex = Regex::new(&translate(pattern)).map_err(|e| PathError::InvalidPattern {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })?;

        Ok(Self {
            source: pattern.to_string(),
            regex,
        })
    }

    /// The pattern as written.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Check whether a single component matches.
    pub fn is_match(&self, name: impl AsRef<OsStr>) -> bool {
        self.regex.is_match(name.as_ref().as_bytes())
    }

    /// Check whether `s` uses any wildcard syntax at all.
    ///
    /// Components without wildcards can be looked up directly instead of
    /// being matched against a directory listing.
    pub fn has_wildcards(s: &str) -> bool {
        s.contains(|c| matches!(c, '*' | '?' | '['))
    }
}

fn translate(pattern: &str) -> String {
    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::from("^(?:");
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        i += 1;
        match c {
            '*' => {
                while chars.get(i) == Some(&'*') {
                    i += 1;
                }
                out.push_str(ANY);
                out.push('*');
            }
            '?' => out.push_str(ANY),
            '[' => match class_end(&chars, i) {
                Some(end) => {
                    out.push_str(&translate_class(&chars[i..end]));
                    i = end + 1;
                }
                None => out.push_str(r"\["),
            },
            c => out.push_str(&escape(c)),
        }
    }

    out.push_str(")$");
    out
}

/// Index of the `]` closing a class whose body starts at `start`.
///
/// A `]` directly after `[` or `[!` belongs to the set.
fn class_end(chars: &[char], start: usize) -> Option<usize> {
    let mut j = start;
    if chars.get(j) == Some(&'!') {
        j += 1;
    }
    if chars.get(j) == Some(&']') {
        j += 1;
    }
    while j < chars.len() && chars[j] != ']' {
        j += 1;
    }
    (j < chars.len()).then_some(j)
}

fn translate_class(body: &[char]) -> String {
    let (negated, body) = match body.split_first() {
        Some(('!', rest)) => (true, rest),
        _ => (false, body),
    };

    let mut class = String::from("[");
    if negated {
        class.push('^');
    }
    for (k, &c) in body.iter().enumerate() {
        // `-` only forms a range between two members.
        if c == '-' && k > 0 && k + 1 < body.len() {
            class.push('-');
        } else {
            class.push_str(&escape(c));
        }
    }
    class.push(']');

    // A byte outside UTF-8 is never a member, so a negated set takes it.
    if negated {
        format!("(?:{}|{})", class, RAW_BYTE)
    } else {
        class
    }
}

fn escape(c: char) -> String {
    regex::escape(c.encode_utf8(&mut [0; 4]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsStr;

    fn matches(pattern: &str, name: &str) -> bool {
        Pattern::new(pattern).unwrap().is_match(name)
    }

    #[test]
    fn star_matches_any_run() {
        assert!(matches("*.py", "setup.py"));
        assert!(matches("*.py", ".py"));
        assert!(!matches("*.py", "setup.pyc"));
        assert!(matches("a**b", "axxb"));
        assert!(matches("a**b", "ab"));
    }

    #[test]
    fn star_matches_hidden_names() {
        assert!(matches("*", ".bashrc"));
    }

    #[test]
    fn question_mark_is_one_character() {
        assert!(matches("?.txt", "a.txt"));
        assert!(matches("?.txt", "é.txt"));
        assert!(!matches("?.txt", "ab.txt"));
        assert!(!matches("?.txt", ".txt"));
    }

    #[test]
    fn classes_and_ranges() {
        assert!(matches("[abc]x", "bx"));
        assert!(!matches("[abc]x", "dx"));
        assert!(matches("[a-c]", "b"));
        assert!(!matches("[a-c]", "-"));
        assert!(matches("[a-]", "-"));
        assert!(matches("[]]", "]"));
    }

    #[test]
    fn negated_classes() {
        assert!(matches("[!abc]x", "dx"));
        assert!(!matches("[!abc]x", "ax"));
    }

    #[test]
    fn unclosed_bracket_is_literal() {
        assert!(matches("[unclosed", "[unclosed"));
        assert!(!matches("[unclosed", "u"));
    }

    #[test]
    fn regex_metacharacters_are_literal() {
        assert!(matches("a.b", "a.b"));
        assert!(!matches("a.b", "axb"));
        assert!(matches("(x)+$", "(x)+$"));
    }

    #[test]
    fn star_matches_non_utf8_names() {
        use std::os::unix::ffi::OsStrExt;

        let name = OsStr::from_bytes(b"\xffname");
        assert!(Pattern::new("*").unwrap().is_match(name));
        assert!(Pattern::new("?name").unwrap().is_match(name));
    }

    #[test]
    fn negated_class_matches_non_utf8_bytes() {
        use std::os::unix::ffi::OsStrExt;

        let name = OsStr::from_bytes(b"\xffx");
        assert!(Pattern::new("[!a]x").unwrap().is_match(name));
        assert!(Pattern::new("[!.]*").unwrap().is_match(name));
        assert!(!Pattern::new("[a]x").unwrap().is_match(name));
        assert!(!Pattern::new("[!a]x").unwrap().is_match("ax"));
    }

    #[test]
    fn reversed_range_is_rejected() {
        let err = Pattern::new("[z-a]").unwrap_err();
        assert!(matches!(err, PathError::InvalidPattern { .. }));
    }

    #[test]
    fn wildcard_detection() {
        assert!(Pattern::has_wildcards("*.txt"));
        assert!(Pattern::has_wildcards("file?"));
        assert!(Pattern::has_wildcards("[ab]"));
        assert!(!Pattern::has_wildcards("plain.txt"));
    }

    #[test]
    fn keeps_source() {
        assert_eq!(Pattern::new("*.rs").unwrap().as_str(), "*.rs");
    }
}
