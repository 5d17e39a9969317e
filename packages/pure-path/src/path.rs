//! The pure POSIX path value.

use std::cmp::Ordering;
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::os::unix::ffi::{OsStrExt, OsStringExt};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::{PathError, Pattern};

const SEP: u8 = b'/';

/// A normalized POSIX path with no filesystem access.
///
/// # Normal form
///
/// - A leading `//` (exactly two slashes) is kept as the root; one slash or
///   three and more collapse to `/`
/// - Repeated separators, `.` components and a trailing separator are dropped
/// - `..` is kept as-is, since resolving it needs the filesystem
/// - The empty path is written `.`
///
/// Equality and hashing use the normalized string; ordering compares the
/// `/`-separated pieces of that string one by one.
#[derive(Clone)]
pub struct PurePosixPath {
    repr: OsString,
    /// Length of the root prefix of `repr`: 0, 1 or 2.
    root: usize,
}

impl PurePosixPath {
    /// Parse and normalize a path.
    ///
    /// Fails only if the input contains a NUL byte.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use aiopath_pure::PurePosixPath;
    ///
    /// let p = PurePosixPath::parse("foo//bar/./baz/").unwrap();
    /// assert_eq!(p.to_string(), "foo/bar/baz");
    ///
    /// assert_eq!(PurePosixPath::parse("").unwrap().to_string(), ".");
    /// assert!(PurePosixPath::parse("nul\0byte").is_err());
    /// ```
    pub fn parse(path: impl AsRef<OsStr>) -> Result<Self, PathError> {
        let bytes = path.as_ref().as_bytes();
        if let Some(position) = bytes.iter().position(|&b| b == 0) {
            return Err(PathError::ContainsNul { position });
        }

        let root = if bytes.starts_with(b"//") && !bytes.starts_with(b"///") {
            2
        } else if bytes.starts_with(b"/") {
            1
        } else {
            0
        };

        Ok(Self::from_parts(root, split_parts(bytes)))
    }

    /// Assemble a path from an already validated root length and parts.
    fn from_parts<'a>(root: usize, parts: impl IntoIterator<Item = &'a [u8]>) -> Self {
        let mut repr = vec![SEP; root];
        for (i, part) in parts.into_iter().enumerate() {
            if i > 0 {
                repr.push(SEP);
            }
            repr.extend_from_slice(part);
        }
        if repr.is_empty() {
            repr.push(b'.');
        }

        Self {
            repr: OsString::from_vec(repr),
            root,
        }
    }

    /// Components after the root.
    fn tail(&self) -> impl DoubleEndedIterator<Item = &[u8]> + '_ {
        split_parts(&self.repr.as_bytes()[self.root..])
    }

    fn tail_len(&self) -> usize {
        self.tail().count()
    }

    /// The path as an OS string.
    pub fn as_os_str(&self) -> &OsStr {
        &self.repr
    }

    /// The path as a std path, for handing to I/O APIs.
    pub fn as_path(&self) -> &Path {
        Path::new(&self.repr)
    }

    /// The path as `&str`, if it is valid UTF-8.
    pub fn to_str(&self) -> Option<&str> {
        self.repr.to_str()
    }

    /// The path as a string, with invalid UTF-8 replaced.
    pub fn to_string_lossy(&self) -> std::borrow::Cow<'_, str> {
        self.repr.to_string_lossy()
    }

    /// Consume the path, returning its OS string.
    pub fn into_os_string(self) -> OsString {
        self.repr
    }

    /// The root: `""`, `"/"` or `"//"`.
    ///
    /// POSIX paths have no drive, so this is also the anchor.
    pub fn anchor(&self) -> &OsStr {
        self.root()
    }

    /// The leading separators: `""`, `"/"` or `"//"`.
    pub fn root(&self) -> &OsStr {
        OsStr::from_bytes(&self.repr.as_bytes()[..self.root])
    }

    /// Check whether the path has a root.
    pub fn is_absolute(&self) -> bool {
        self.root > 0
    }

    /// The anchor (if any) followed by each component.
    ///
    /// ```rust
    /// use aiopath_pure::path;
    ///
    /// let binding = path!("/usr/bin/python3");
    /// let parts = binding.parts();
    /// assert_eq!(parts, ["/", "usr", "bin", "python3"]);
    /// ```
    pub fn parts(&self) -> Vec<&OsStr> {
        let anchor = (self.root > 0).then(|| self.anchor());
        anchor
            .into_iter()
            .chain(self.tail().map(OsStr::from_bytes))
            .collect()
    }

    /// The final component, or `""` if there is none.
    pub fn name(&self) -> &OsStr {
        self.tail()
            .next_back()
            .map(OsStr::from_bytes)
            .unwrap_or_else(|| OsStr::new(""))
    }

    /// Position of the dot that starts the final suffix, if there is one.
    ///
    /// A leading dot (`.bashrc`) or a trailing dot (`name.`) does not count.
    fn suffix_start(name: &[u8]) -> Option<usize> {
        name.iter()
            .rposition(|&b| b == b'.')
            .filter(|&i| i > 0 && i + 1 < name.len())
    }

    /// The final component's last extension, dot included, or `""`.
    pub fn suffix(&self) -> &OsStr {
        let name = self.name().as_bytes();
        match Self::suffix_start(name) {
            Some(i) => OsStr::from_bytes(&name[i..]),
            None => OsStr::new(""),
        }
    }

    /// All of the final component's extensions, in order.
    ///
    /// ```rust
    /// use aiopath_pure::path;
    ///
    /// assert_eq!(path!("archive.tar.gz").suffixes(), [".tar", ".gz"]);
    /// assert!(path!("name.").suffixes().is_empty());
    /// ```
    pub fn suffixes(&self) -> Vec<OsString> {
        let name = self.name().as_bytes();
        if name.ends_with(b".") {
            return Vec::new();
        }

        let start = name.iter().position(|&b| b != b'.').unwrap_or(name.len());
        name[start..]
            .split(|&b| b == b'.')
            .skip(1)
            .map(|ext| {
                let mut suffix = vec![b'.'];
                suffix.extend_from_slice(ext);
                OsString::from_vec(suffix)
            })
            .collect()
    }

    /// The final component without its last extension.
    pub fn stem(&self) -> &OsStr {
        let name = self.name().as_bytes();
        match Self::suffix_start(name) {
            Some(i) => OsStr::from_bytes(&name[..i]),
            None => OsStr::from_bytes(name),
        }
    }

    /// The logical parent.
    ///
    /// The parent of a bare anchor or of `.` is the path itself.
    #[must_use]
    pub fn parent(&self) -> Self {
        let count = self.tail_len();
        if count == 0 {
            return self.clone();
        }
        Self::from_parts(self.root, self.tail().take(count - 1))
    }

    /// Every logical ancestor, nearest first, ending at the anchor or `.`.
    pub fn parents(&self) -> impl Iterator<Item = PurePosixPath> {
        let first = (self.tail_len() > 0).then(|| self.parent());
        std::iter::successors(first, |p| (p.tail_len() > 0).then(|| p.parent()))
    }

    /// Append a path given as a string.
    ///
    /// An absolute argument replaces `self` entirely. Fails only if `other`
    /// contains a NUL byte.
    pub fn join(&self, other: impl AsRef<OsStr>) -> Result<Self, PathError> {
        Ok(self.join_path(&Self::parse(other)?))
    }

    /// Append an already parsed path.
    #[must_use]
    pub fn join_path(&self, other: &PurePosixPath) -> Self {
        if other.is_absolute() {
            return other.clone();
        }
        Self::from_parts(self.root, self.tail().chain(other.tail()))
    }

    /// Replace the final component.
    ///
    /// ```rust
    /// use aiopath_pure::path;
    ///
    /// assert_eq!(path!("a/b.txt").with_name("c.md").unwrap(), path!("a/c.md"));
    /// assert!(path!("/").with_name("x").is_err());
    /// ```
    pub fn with_name(&self, name: impl AsRef<OsStr>) -> Result<Self, PathError> {
        let name = name.as_ref().as_bytes();
        let count = self.tail_len();
        if count == 0 {
            return Err(PathError::EmptyName {
                path: self.to_string_lossy().into_owned(),
            });
        }
        if let Some(position) = name.iter().position(|&b| b == 0) {
            return Err(PathError::ContainsNul { position });
        }
        if name.is_empty() || name == b"." || name.contains(&SEP) {
            return Err(PathError::InvalidName {
                name: String::from_utf8_lossy(name).into_owned(),
            });
        }

        Ok(Self::from_parts(
            self.root,
            self.tail().take(count - 1).chain(std::iter::once(name)),
        ))
    }

    /// Replace the final component's stem, keeping its suffix.
    pub fn with_stem(&self, stem: impl AsRef<OsStr>) -> Result<Self, PathError> {
        let stem = stem.as_ref();
        let suffix = self.suffix();
        if suffix.is_empty() {
            return self.with_name(stem);
        }
        if stem.is_empty() {
            return Err(PathError::InvalidName {
                name: suffix.to_string_lossy().into_owned(),
            });
        }

        let mut name = stem.to_os_string();
        name.push(suffix);
        self.with_name(name)
    }

    /// Replace (or add, or with `""` remove) the final suffix.
    pub fn with_suffix(&self, suffix: impl AsRef<OsStr>) -> Result<Self, PathError> {
        let suffix = suffix.as_ref().as_bytes();
        let invalid = suffix.contains(&SEP)
            || suffix.contains(&0)
            || (!suffix.is_empty() && !suffix.starts_with(b"."))
            || suffix == b".";
        if invalid {
            return Err(PathError::InvalidSuffix {
                suffix: String::from_utf8_lossy(suffix).into_owned(),
            });
        }

        let stem = self.stem().as_bytes();
        if self.name().is_empty() {
            return Err(PathError::EmptyName {
                path: self.to_string_lossy().into_owned(),
            });
        }

        let mut name = stem.to_vec();
        name.extend_from_slice(suffix);
        self.with_name(OsString::from_vec(name))
    }

    /// Check whether `base` is this path or one of its ancestors.
    pub fn is_relative_to(&self, base: &PurePosixPath) -> bool {
        self.strip_base(base).is_some()
    }

    fn strip_base<'a>(&'a self, base: &PurePosixPath) -> Option<Vec<&'a [u8]>> {
        if self.anchor() != base.anchor() {
            return None;
        }

        let mut own = self.tail();
        for part in base.tail() {
            if own.next() != Some(part) {
                return None;
            }
        }
        Some(own.collect())
    }

    /// The path relative to `base`.
    ///
    /// Fails unless `base` is this path or one of its ancestors; no `..`
    /// components are ever introduced.
    pub fn relative_to(&self, base: &PurePosixPath) -> Result<Self, PathError> {
        match self.strip_base(base) {
            Some(rest) => Ok(Self::from_parts(0, rest)),
            None => Err(PathError::NotRelative {
                path: self.to_string_lossy().into_owned(),
                base: base.to_string_lossy().into_owned(),
            }),
        }
    }

    /// Match against a wildcard pattern, component by component.
    ///
    /// A relative pattern is matched against the trailing components; an
    /// absolute one must match the whole path.
    ///
    /// ```rust
    /// use aiopath_pure::path;
    ///
    /// let p = path!("/a/b/c.py");
    /// assert!(p.matches("*.py").unwrap());
    /// assert!(p.matches("b/*.py").unwrap());
    /// assert!(!p.matches("/*.py").unwrap());
    /// ```
    pub fn matches(&self, pattern: &str) -> Result<bool, PathError> {
        let pattern_path = Self::parse(pattern)?;
        let wanted: Vec<&[u8]> = pattern_path.tail().collect();
        if !pattern_path.is_absolute() && wanted.is_empty() {
            return Err(PathError::EmptyPattern);
        }

        let own: Vec<&[u8]> = self.tail().collect();
        if pattern_path.is_absolute() {
            if pattern_path.anchor() != self.anchor() || wanted.len() != own.len() {
                return Ok(false);
            }
        } else if wanted.len() > own.len() {
            return Ok(false);
        }

        for (part, pat) in own.iter().rev().zip(wanted.iter().rev()) {
            let pattern = Pattern::new(&String::from_utf8_lossy(pat))?;
            if !pattern.is_match(OsStr::from_bytes(part)) {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

/// Split on separators, dropping empty and `.` components.
fn split_parts(bytes: &[u8]) -> impl DoubleEndedIterator<Item = &[u8]> {
    bytes
        .split(|&b| b == SEP)
        .filter(|part| !part.is_empty() && *part != b".")
}

impl Default for PurePosixPath {
    fn default() -> Self {
        Self::from_parts(0, std::iter::empty())
    }
}

impl PartialEq for PurePosixPath {
    fn eq(&self, other: &Self) -> bool {
        self.repr == other.repr
    }
}

impl Eq for PurePosixPath {}

impl Hash for PurePosixPath {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.repr.hash(state);
    }
}

impl PartialOrd for PurePosixPath {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PurePosixPath {
    fn cmp(&self, other: &Self) -> Ordering {
        let own = self.repr.as_bytes().split(|&b| b == SEP);
        own.cmp(other.repr.as_bytes().split(|&b| b == SEP))
    }
}

impl fmt::Display for PurePosixPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.repr.to_string_lossy())
    }
}

impl fmt::Debug for PurePosixPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PurePosixPath").field(&self.repr).finish()
    }
}

impl AsRef<OsStr> for PurePosixPath {
    fn as_ref(&self) -> &OsStr {
        &self.repr
    }
}

impl AsRef<Path> for PurePosixPath {
    fn as_ref(&self) -> &Path {
        self.as_path()
    }
}

impl AsRef<PurePosixPath> for PurePosixPath {
    fn as_ref(&self) -> &PurePosixPath {
        self
    }
}

impl FromStr for PurePosixPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for PurePosixPath {
    type Error = PathError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl TryFrom<String> for PurePosixPath {
    type Error = PathError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl TryFrom<&Path> for PurePosixPath {
    type Error = PathError;

    fn try_from(p: &Path) -> Result<Self, Self::Error> {
        Self::parse(p)
    }
}

impl TryFrom<PathBuf> for PurePosixPath {
    type Error = PathError;

    fn try_from(p: PathBuf) -> Result<Self, Self::Error> {
        Self::parse(p)
    }
}

impl From<PurePosixPath> for PathBuf {
    fn from(p: PurePosixPath) -> Self {
        PathBuf::from(p.repr)
    }
}

impl From<PurePosixPath> for OsString {
    fn from(p: PurePosixPath) -> Self {
        p.repr
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for PurePosixPath {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.to_str() {
            Some(s) => serializer.serialize_str(s),
            None => Err(serde::ser::Error::custom(
                "path contains invalid UTF-8 characters",
            )),
        }
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for PurePosixPath {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(s).map_err(serde::de::Error::custom)
    }
}

/// Macro for path literals.
///
/// # Example
///
/// ```rust
/// use aiopath_pure::path;
///
/// let p = path!("/etc/hosts");
/// assert_eq!(p.name(), "hosts");
/// ```
#[macro_export]
macro_rules! path {
    ($s:expr) => {
        $crate::PurePosixPath::parse($s).expect("invalid path literal")
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path;
    use std::collections::HashSet;

    fn s(p: &PurePosixPath) -> String {
        p.to_string()
    }

    #[test]
    fn parse_normalizes() {
        assert_eq!(s(&path!("a//b/./c/")), "a/b/c");
        assert_eq!(s(&path!("")), ".");
        assert_eq!(s(&path!(".")), ".");
        assert_eq!(s(&path!("./")), ".");
        assert_eq!(s(&path!("/")), "/");
        assert_eq!(s(&path!("///a")), "/a");
        assert_eq!(s(&path!("a/../b")), "a/../b");
    }

    #[test]
    fn double_slash_root_is_preserved() {
        assert_eq!(s(&path!("//a/b")), "//a/b");
        assert_eq!(s(&path!("//")), "//");
        assert_ne!(path!("//a"), path!("/a"));
        assert_eq!(path!("//a").anchor(), "//");
        assert_eq!(path!("/a").root(), "/");
        assert_eq!(path!("a").root(), "");
    }

    #[test]
    fn nul_is_rejected() {
        assert_eq!(
            PurePosixPath::parse("a\0b").unwrap_err(),
            PathError::ContainsNul { position: 1 }
        );
    }

    #[test]
    fn non_utf8_is_accepted() {
        let p = PurePosixPath::parse(OsStr::from_bytes(b"/tmp/\xff")).unwrap();
        assert_eq!(p.to_str(), None);
        assert_eq!(p.name().as_bytes(), b"\xff");
    }

    #[test]
    fn string_form_matches_std_for_normal_paths() {
        for input in ["/tmp/x/y", "relative/file.txt", "/", "a/b/c", "/a/../b"] {
            assert_eq!(path!(input).as_path(), Path::new(input));
        }
    }

    #[test]
    fn parent_and_name() {
        let p = path!("/tmp/x/y");
        assert_eq!(s(&p.parent()), "/tmp/x");
        assert_eq!(p.name(), "y");

        assert_eq!(path!("/").parent(), path!("/"));
        assert_eq!(path!(".").parent(), path!("."));
        assert_eq!(path!("a").parent(), path!("."));
        assert_eq!(path!("/").name(), "");
    }

    #[test]
    fn parents_walk_to_anchor() {
        let parents: Vec<String> = path!("/a/b/c").parents().map(|p| p.to_string()).collect();
        assert_eq!(parents, ["/a/b", "/a", "/"]);

        let parents: Vec<String> = path!("a/b").parents().map(|p| p.to_string()).collect();
        assert_eq!(parents, ["a", "."]);

        assert_eq!(path!("/").parents().count(), 0);
    }

    #[test]
    fn parts_include_anchor() {
        assert_eq!(path!("/usr/bin").parts(), ["/", "usr", "bin"]);
        assert_eq!(path!("usr/bin").parts(), ["usr", "bin"]);
        assert!(path!(".").parts().is_empty());
    }

    #[test]
    fn suffix_and_stem() {
        let p = path!("/a/b.tar.gz");
        assert_eq!(p.name(), "b.tar.gz");
        assert_eq!(p.suffix(), ".gz");
        assert_eq!(p.stem(), "b.tar");
        assert_eq!(p.suffixes(), [".tar", ".gz"]);

        assert_eq!(path!(".bashrc").suffix(), "");
        assert_eq!(path!(".bashrc").stem(), ".bashrc");
        assert_eq!(path!("name.").suffix(), "");
        assert_eq!(path!("..a.b").suffixes(), [".b"]);
    }

    #[test]
    fn join_relative_and_absolute() {
        let base = path!("/srv");
        assert_eq!(s(&base.join("www/index.html").unwrap()), "/srv/www/index.html");
        assert_eq!(s(&base.join("/etc").unwrap()), "/etc");
        assert_eq!(base.join("").unwrap(), base);
        assert_eq!(s(&path!(".").join("a").unwrap()), "a");
        assert!(base.join("bad\0").is_err());
    }

    #[test]
    fn with_name_validates() {
        assert_eq!(s(&path!("a/b.txt").with_name("c.md").unwrap()), "a/c.md");
        assert!(matches!(
            path!("/").with_name("x"),
            Err(PathError::EmptyName { .. })
        ));
        assert!(matches!(
            path!("a/b").with_name("x/y"),
            Err(PathError::InvalidName { .. })
        ));
        assert!(matches!(
            path!("a/b").with_name(""),
            Err(PathError::InvalidName { .. })
        ));
        assert!(matches!(
            path!("a/b").with_name("."),
            Err(PathError::InvalidName { .. })
        ));
    }

    #[test]
    fn with_suffix_and_stem() {
        assert_eq!(s(&path!("a/b.txt").with_suffix(".md").unwrap()), "a/b.md");
        assert_eq!(s(&path!("a/b").with_suffix(".md").unwrap()), "a/b.md");
        assert_eq!(s(&path!("a/b.txt").with_suffix("").unwrap()), "a/b");
        assert!(matches!(
            path!("a/b").with_suffix("md"),
            Err(PathError::InvalidSuffix { .. })
        ));
        assert!(matches!(
            path!("a/b").with_suffix("."),
            Err(PathError::InvalidSuffix { .. })
        ));
        assert!(matches!(
            path!("/").with_suffix(".md"),
            Err(PathError::EmptyName { .. })
        ));

        assert_eq!(s(&path!("a/b.txt").with_stem("c").unwrap()), "a/c.txt");
        assert_eq!(s(&path!("a/b").with_stem("c").unwrap()), "a/c");
    }

    #[test]
    fn relative_to() {
        let p = path!("/a/b/c");
        assert_eq!(s(&p.relative_to(&path!("/a")).unwrap()), "b/c");
        assert_eq!(s(&p.relative_to(&p).unwrap()), ".");
        assert!(p.is_relative_to(&path!("/")));
        assert!(!p.is_relative_to(&path!("/a/bb")));
        assert!(matches!(
            p.relative_to(&path!("/c")),
            Err(PathError::NotRelative { .. })
        ));
        assert!(path!("a/b").relative_to(&path!("/a")).is_err());
        assert_eq!(s(&path!("a/b").relative_to(&path!(".")).unwrap()), "a/b");
    }

    #[test]
    fn matches_from_the_right() {
        let p = path!("/a/b/c.py");
        assert!(p.matches("*.py").unwrap());
        assert!(p.matches("b/*.py").unwrap());
        assert!(!p.matches("a/*.py").unwrap());
        assert!(p.matches("/*/*/*.py").unwrap());
        assert!(!p.matches("/a/*.py").unwrap());
        assert!(!path!("c.py").matches("x/c.py").unwrap());
        assert_eq!(p.matches(""), Err(PathError::EmptyPattern));
    }

    #[test]
    fn equality_and_hash_use_normal_form() {
        assert_eq!(path!("a//b/"), path!("a/b"));

        let mut set = HashSet::new();
        set.insert(path!("foo"));
        set.insert(path!("./foo"));
        set.insert(path!("bar"));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn ordering_compares_pieces() {
        assert!(path!("a/b") < path!("a/c"));
        assert!(path!("a") < path!("a/b"));
        assert!(path!("a/b") < path!("a.b"));
        assert!(path!("/z") < path!("a"));

        let mut paths = vec![path!("b"), path!("a/c"), path!("a/b")];
        paths.sort();
        assert_eq!(paths, [path!("a/b"), path!("a/c"), path!("b")]);
    }

    #[test]
    fn conversions() {
        let p: PurePosixPath = "x/y".parse().unwrap();
        assert_eq!(PurePosixPath::try_from("x/y").unwrap(), p);
        assert_eq!(PurePosixPath::try_from(PathBuf::from("x//y")).unwrap(), p);
        assert_eq!(PathBuf::from(p.clone()), PathBuf::from("x/y"));
        assert_eq!(PurePosixPath::default(), path!("."));
    }

    #[test]
    fn debug_and_display() {
        let p = path!("/etc/hosts");
        assert_eq!(format!("{}", p), "/etc/hosts");
        assert!(format!("{:?}", p).contains("PurePosixPath"));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_uses_string_form() {
        let p = path!("/var//log/");
        assert_eq!(serde_json::to_string(&p).unwrap(), "\"/var/log\"");

        let back: PurePosixPath = serde_json::from_str("\"a/./b\"").unwrap();
        assert_eq!(back, path!("a/b"));

        assert!(serde_json::from_str::<PurePosixPath>("\"a\\u0000b\"").is_err());
    }
}
