//! Relative wildcard search below a directory.
//!
//! A pattern is split on `/` into segments. Each segment narrows the set of
//! candidate paths one level at a time:
//! - a plain name is looked up directly
//! - a wildcard name is matched against the directory listing
//! - `**` expands to the directory itself and every directory below it
//!
//! A trailing `/` keeps only directories. Symlinked directories are not
//! entered by `**`, and directories that cannot be read are skipped.

use std::collections::HashSet;
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use aiopath_pure::Pattern;
use walkdir::WalkDir;

use crate::blocking;

#[derive(Debug)]
enum Segment {
    Literal(OsString),
    Wildcard(Pattern),
    Recursive,
}

#[derive(Debug)]
struct Selector {
    segments: Vec<Segment>,
    dir_only: bool,
}

fn invalid(message: impl Into<String>) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidInput, message.into())
}

impl Selector {
    fn parse(pattern: &str) -> io::Result<Self> {
        if pattern.starts_with('/') {
            return Err(invalid("non-relative patterns are unsupported"));
        }

        let mut segments = Vec::new();
        for piece in pattern.split('/') {
            if piece.is_empty() || piece == "." {
                continue;
            }
            let segment = if piece == "**" {
                Segment::Recursive
            } else if piece.contains("**") {
                return Err(invalid(format!(
                    "invalid pattern {:?}: '**' can only be an entire path component",
                    pattern
                )));
            } else if Pattern::has_wildcards(piece) {
                Segment::Wildcard(Pattern::new(piece).map_err(|e| invalid(e.to_string()))?)
            } else {
                Segment::Literal(OsString::from(piece))
            };
            segments.push(segment);
        }

        if segments.is_empty() {
            return Err(invalid(format!("unacceptable pattern: {:?}", pattern)));
        }

        Ok(Self {
            segments,
            dir_only: pattern.ends_with('/'),
        })
    }

    /// Whether matches for segment `index` must be directories.
    fn wants_dir(&self, index: usize) -> bool {
        index + 1 < self.segments.len() || self.dir_only
    }
}

/// The path to hand to the OS for a candidate. The empty path stands for
/// the current directory.
fn on_disk(path: &Path) -> &Path {
    if path.as_os_str().is_empty() {
        Path::new(".")
    } else {
        path
    }
}

fn is_dir(path: &Path) -> bool {
    blocking::is_dir(on_disk(path)).unwrap_or(false)
}

fn select_literal(dir: &Path, name: &OsString, want_dir: bool, out: &mut Vec<PathBuf>) {
    let child = dir.join(name);
    let found = if want_dir {
        is_dir(&child)
    } else {
        blocking::exists(&child, true).unwrap_or(false)
    };
    if found {
        out.push(child);
    }
}

fn select_wildcard(dir: &Path, pattern: &Pattern, want_dir: bool, out: &mut Vec<PathBuf>) {
    let entries = match fs::read_dir(on_disk(dir)) {
        Ok(entries) => entries,
        Err(err) => {
            log::debug!("glob: skipping {}: {}", on_disk(dir).display(), err);
            return;
        }
    };

    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                log::debug!("glob: skipping entry in {}: {}", on_disk(dir).display(), err);
                continue;
            }
        };
        let name = entry.file_name();
        if !pattern.is_match(&name) {
            continue;
        }
        let child = dir.join(&name);
        if !want_dir || is_dir(&child) {
            out.push(child);
        }
    }
}

fn select_recursive(dir: &Path, out: &mut Vec<PathBuf>) {
    let root = on_disk(dir);
    out.push(dir.to_path_buf());

    for entry in WalkDir::new(root).min_depth(1).follow_links(false) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                log::debug!("glob: skipping unreadable entry: {}", err);
                continue;
            }
        };
        if !entry.file_type().is_dir() {
            continue;
        }
        if let Ok(rel) = entry.path().strip_prefix(root) {
            out.push(dir.join(rel));
        }
    }
}

/// Find every path below `base` matching the relative `pattern`.
///
/// Results are unique and in discovery order, each prefixed with `base`.
/// A base of `.` yields bare relative paths.
pub(crate) fn glob(base: &Path, pattern: &str) -> io::Result<Vec<PathBuf>> {
    let selector = Selector::parse(pattern)?;
    log::trace!("glob {:?} under {}", pattern, base.display());

    let start = if base == Path::new(".") {
        PathBuf::new()
    } else {
        base.to_path_buf()
    };
    if !is_dir(&start) {
        return Ok(Vec::new());
    }

    let mut current = vec![start];
    for (index, segment) in selector.segments.iter().enumerate() {
        let want_dir = selector.wants_dir(index);
        let mut next = Vec::new();
        for dir in &current {
            match segment {
                Segment::Literal(name) => select_literal(dir, name, want_dir, &mut next),
                Segment::Wildcard(pattern) => select_wildcard(dir, pattern, want_dir, &mut next),
                Segment::Recursive => select_recursive(dir, &mut next),
            }
        }
        current = next;
        if current.is_empty() {
            break;
        }
    }

    let mut seen = HashSet::new();
    Ok(current
        .into_iter()
        .map(|p| if p.as_os_str().is_empty() { PathBuf::from(".") } else { p })
        .filter(|p| seen.insert(p.clone()))
        .collect())
}

/// [`glob`] with the pattern applied at every depth.
pub(crate) fn rglob(base: &Path, pattern: &str) -> io::Result<Vec<PathBuf>> {
    if pattern.starts_with('/') {
        return Err(invalid("non-relative patterns are unsupported"));
    }
    glob(base, &format!("**/{}", pattern))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn tree() -> TempDir {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("src/nested")).unwrap();
        fs::create_dir_all(root.join("docs")).unwrap();
        fs::write(root.join("setup.py"), b"").unwrap();
        fs::write(root.join(".hidden.py"), b"").unwrap();
        fs::write(root.join("README"), b"").unwrap();
        fs::write(root.join("src/lib.py"), b"").unwrap();
        fs::write(root.join("src/nested/deep.py"), b"").unwrap();
        fs::write(root.join("docs/index.md"), b"").unwrap();
        dir
    }

    fn names(base: &Path, found: Vec<PathBuf>) -> Vec<String> {
        let mut names: Vec<String> = found
            .iter()
            .map(|p| p.strip_prefix(base).unwrap().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn wildcard_in_one_directory() {
        let dir = tree();
        let found = glob(dir.path(), "*.py").unwrap();
        assert_eq!(names(dir.path(), found), [".hidden.py", "setup.py"]);
    }

    #[test]
    fn literal_and_wildcard_segments() {
        let dir = tree();
        let found = glob(dir.path(), "src/*.py").unwrap();
        assert_eq!(names(dir.path(), found), ["src/lib.py"]);

        let found = glob(dir.path(), "README").unwrap();
        assert_eq!(names(dir.path(), found), ["README"]);

        assert!(glob(dir.path(), "missing").unwrap().is_empty());
    }

    #[test]
    fn recursive_segment() {
        let dir = tree();
        let found = glob(dir.path(), "**/*.py").unwrap();
        assert_eq!(
            names(dir.path(), found),
            [".hidden.py", "setup.py", "src/lib.py", "src/nested/deep.py"]
        );
    }

    #[test]
    fn bare_recursive_lists_directories() {
        let dir = tree();
        let found = glob(dir.path(), "**").unwrap();
        assert_eq!(names(dir.path(), found), ["", "docs", "src", "src/nested"]);
    }

    #[test]
    fn trailing_slash_keeps_directories() {
        let dir = tree();
        let found = glob(dir.path(), "*/").unwrap();
        assert_eq!(names(dir.path(), found), ["docs", "src"]);
    }

    #[test]
    fn recursive_does_not_enter_symlinked_directories() {
        let dir = tree();
        std::os::unix::fs::symlink(dir.path().join("src"), dir.path().join("link")).unwrap();

        let found = glob(dir.path(), "**/deep.py").unwrap();
        assert_eq!(names(dir.path(), found), ["src/nested/deep.py"]);
    }

    #[test]
    fn results_are_unique() {
        let dir = tree();
        let found = glob(dir.path(), "**/**/lib.py").unwrap();
        assert_eq!(names(dir.path(), found), ["src/lib.py"]);
    }

    #[test]
    fn rglob_matches_at_every_depth() {
        let dir = tree();
        let found = rglob(dir.path(), "*.md").unwrap();
        assert_eq!(names(dir.path(), found), ["docs/index.md"]);
    }

    #[test]
    fn rejects_absolute_and_empty_patterns() {
        let dir = tree();
        for pattern in ["/etc/*", "", ".", "./"] {
            let err = glob(dir.path(), pattern).unwrap_err();
            assert_eq!(err.kind(), io::ErrorKind::InvalidInput, "{:?}", pattern);
        }
        let err = glob(dir.path(), "/abs").unwrap_err();
        assert_eq!(err.to_string(), "non-relative patterns are unsupported");
        assert!(rglob(dir.path(), "/abs").is_err());
    }

    #[test]
    fn rejects_partial_double_star() {
        let dir = tree();
        let err = glob(dir.path(), "a**/x").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn missing_base_finds_nothing() {
        let dir = tree();
        assert!(glob(&dir.path().join("nope"), "*").unwrap().is_empty());
    }

    #[test]
    fn negated_class_finds_non_utf8_names() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = TempDir::new().unwrap();
        let odd = dir.path().join(OsStr::from_bytes(b"\xffname"));
        fs::write(&odd, b"").unwrap();
        fs::write(dir.path().join(".dot"), b"").unwrap();

        assert_eq!(glob(dir.path(), "[!.]*").unwrap(), [odd]);
    }
}
