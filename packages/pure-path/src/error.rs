//! Errors raised by pure path operations.

use thiserror::Error;

/// Errors from parsing or rewriting a path.
///
/// Path strings are carried lossily converted to UTF-8 for display.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    /// The input contains a NUL byte, which no POSIX path can hold.
    #[error("path contains a NUL byte at position {position}")]
    ContainsNul { position: usize },

    /// The operation needs a final component and the path has none.
    #[error("{path:?} has an empty name")]
    EmptyName { path: String },

    /// A replacement name is empty, `.`, or contains a separator.
    #[error("invalid name {name:?}")]
    InvalidName { name: String },

    /// A replacement suffix does not start with `.` or contains a separator.
    #[error("invalid suffix {suffix:?}")]
    InvalidSuffix { suffix: String },

    /// The path does not live under the given base.
    #[error("{path:?} is not in the subpath of {base:?}")]
    NotRelative { path: String, base: String },

    /// A match pattern has no components.
    #[error("empty pattern")]
    EmptyPattern,

    /// A match pattern could not be compiled.
    #[error("invalid pattern {pattern:?}: {message}")]
    InvalidPattern { pattern: String, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nul_position_in_message() {
        let err = PathError::ContainsNul { position: 3 };
        assert_eq!(err.to_string(), "path contains a NUL byte at position 3");
    }

    #[test]
    fn not_relative_names_both_paths() {
        let err = PathError::NotRelative {
            path: "/a/b".to_string(),
            base: "/c".to_string(),
        };
        let display = err.to_string();
        assert!(display.contains("/a/b"));
        assert!(display.contains("/c"));
    }

    #[test]
    fn path_error_is_error() {
        let err: Box<dyn std::error::Error> = Box::new(PathError::EmptyPattern);
        assert_eq!(err.to_string(), "empty pattern");
    }
}
