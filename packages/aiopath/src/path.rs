//! The async path value.

use std::cmp::Ordering;
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use aiopath_offload::Offloader;
use aiopath_pure::{PathError, PurePosixPath};

use crate::{blocking, Result};

/// A POSIX path with awaitable filesystem operations.
///
/// The value carries two views of the same path: the normalized
/// [`PurePosixPath`] used for all string algebra, and a std [`PathBuf`]
/// handed to the blocking calls. Both always agree.
///
/// Every operation that touches the filesystem runs on the path's
/// [`Offloader`] (see [`PathIo`](crate::PathIo)). Paths produced from this
/// one share its offloader. Equality, ordering and hashing look only at the
/// path itself.
#[derive(Clone)]
pub struct AsyncPath {
    pure: PurePosixPath,
    sync: PathBuf,
    offloader: Offloader,
}

impl AsyncPath {
    /// Parse a path. Fails only if it contains a NUL byte.
    pub fn new(path: impl AsRef<OsStr>) -> Result<Self, PathError> {
        Ok(Self::from_pure(PurePosixPath::parse(path)?))
    }

    /// Wrap an already parsed path, using the default offloader.
    pub fn from_pure(pure: PurePosixPath) -> Self {
        let sync = PathBuf::from(pure.as_os_str());
        Self {
            pure,
            sync,
            offloader: Offloader::default(),
        }
    }

    /// Use `offloader` for this path's I/O and for every path derived from it.
    #[must_use]
    pub fn with_offloader(mut self, offloader: Offloader) -> Self {
        self.offloader = offloader;
        self
    }

    pub fn offloader(&self) -> &Offloader {
        &self.offloader
    }

    pub fn as_pure(&self) -> &PurePosixPath {
        &self.pure
    }

    pub fn as_path(&self) -> &Path {
        &self.sync
    }

    pub fn as_os_str(&self) -> &OsStr {
        self.pure.as_os_str()
    }

    pub fn to_str(&self) -> Option<&str> {
        self.pure.to_str()
    }

    pub fn into_pure(self) -> PurePosixPath {
        self.pure
    }

    /// The current working directory.
    pub async fn cwd() -> Result<Self> {
        let offloader = Offloader::default();
        let dir = offloader.run(std::env::current_dir).await??;
        Ok(Self::new(dir)?.with_offloader(offloader))
    }

    /// The current user's home directory.
    pub async fn home() -> Result<Self> {
        let offloader = Offloader::default();
        let dir = offloader.run(blocking::home_dir).await??;
        Ok(Self::new(dir)?.with_offloader(offloader))
    }

    /// A sibling value sharing this path's offloader.
    pub(crate) fn derive(&self, pure: PurePosixPath) -> Self {
        Self::from_pure(pure).with_offloader(self.offloader.clone())
    }

    /// Wrap a path that came back from the OS.
    pub(crate) fn derive_os(&self, path: impl AsRef<OsStr>) -> Result<Self> {
        Ok(self.derive(PurePosixPath::parse(path)?))
    }

    /// Run `f` on this path through the offloader.
    pub(crate) async fn offload<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Path) -> io::Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let path = self.sync.clone();
        let value = self.offloader.run(move || f(&path)).await??;
        Ok(value)
    }

    // Path algebra. Nothing below touches the filesystem.

    pub fn parts(&self) -> Vec<&OsStr> {
        self.pure.parts()
    }

    pub fn anchor(&self) -> &OsStr {
        self.pure.anchor()
    }

    pub fn is_absolute(&self) -> bool {
        self.pure.is_absolute()
    }

    pub fn name(&self) -> &OsStr {
        self.pure.name()
    }

    pub fn suffix(&self) -> &OsStr {
        self.pure.suffix()
    }

    pub fn suffixes(&self) -> Vec<OsString> {
        self.pure.suffixes()
    }

    pub fn stem(&self) -> &OsStr {
        self.pure.stem()
    }

    #[must_use]
    pub fn parent(&self) -> Self {
        self.derive(self.pure.parent())
    }

    /// Every logical ancestor, nearest first.
    pub fn parents(&self) -> impl Iterator<Item = AsyncPath> + '_ {
        self.pure.parents().map(move |p| self.derive(p))
    }

    pub fn join(&self, other: impl AsRef<OsStr>) -> Result<Self, PathError> {
        Ok(self.derive(self.pure.join(other)?))
    }

    #[must_use]
    pub fn join_path(&self, other: impl AsRef<PurePosixPath>) -> Self {
        self.derive(self.pure.join_path(other.as_ref()))
    }

    pub fn with_name(&self, name: impl AsRef<OsStr>) -> Result<Self, PathError> {
        Ok(self.derive(self.pure.with_name(name)?))
    }

    pub fn with_stem(&self, stem: impl AsRef<OsStr>) -> Result<Self, PathError> {
        Ok(self.derive(self.pure.with_stem(stem)?))
    }

    pub fn with_suffix(&self, suffix: impl AsRef<OsStr>) -> Result<Self, PathError> {
        Ok(self.derive(self.pure.with_suffix(suffix)?))
    }

    pub fn is_relative_to(&self, base: impl AsRef<PurePosixPath>) -> bool {
        self.pure.is_relative_to(base.as_ref())
    }

    pub fn relative_to(&self, base: impl AsRef<PurePosixPath>) -> Result<Self, PathError> {
        Ok(self.derive(self.pure.relative_to(base.as_ref())?))
    }

    /// Match against a right-anchored wildcard pattern.
    pub fn matches(&self, pattern: &str) -> Result<bool, PathError> {
        self.pure.matches(pattern)
    }
}

impl PartialEq for AsyncPath {
    fn eq(&self, other: &Self) -> bool {
        self.pure == other.pure
    }
}

impl Eq for AsyncPath {}

impl PartialEq<PurePosixPath> for AsyncPath {
    fn eq(&self, other: &PurePosixPath) -> bool {
        &self.pure == other
    }
}

impl Hash for AsyncPath {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.pure.hash(state);
    }
}

impl PartialOrd for AsyncPath {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for AsyncPath {
    fn cmp(&self, other: &Self) -> Ordering {
        self.pure.cmp(&other.pure)
    }
}

impl fmt::Display for AsyncPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.pure, f)
    }
}

impl fmt::Debug for AsyncPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AsyncPath").field(&self.pure.as_os_str()).finish()
    }
}

impl AsRef<OsStr> for AsyncPath {
    fn as_ref(&self) -> &OsStr {
        self.as_os_str()
    }
}

impl AsRef<Path> for AsyncPath {
    fn as_ref(&self) -> &Path {
        &self.sync
    }
}

impl AsRef<PurePosixPath> for AsyncPath {
    fn as_ref(&self) -> &PurePosixPath {
        &self.pure
    }
}

impl From<PurePosixPath> for AsyncPath {
    fn from(pure: PurePosixPath) -> Self {
        Self::from_pure(pure)
    }
}

impl From<AsyncPath> for PurePosixPath {
    fn from(p: AsyncPath) -> Self {
        p.pure
    }
}

impl From<AsyncPath> for PathBuf {
    fn from(p: AsyncPath) -> Self {
        p.sync
    }
}

impl FromStr for AsyncPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<&str> for AsyncPath {
    type Error = PathError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl TryFrom<String> for AsyncPath {
    type Error = PathError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl TryFrom<&Path> for AsyncPath {
    type Error = PathError;

    fn try_from(p: &Path) -> Result<Self, Self::Error> {
        Self::new(p)
    }
}

impl TryFrom<PathBuf> for AsyncPath {
    type Error = PathError;

    fn try_from(p: PathBuf) -> Result<Self, Self::Error> {
        Self::new(p)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for AsyncPath {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serde::Serialize::serialize(&self.pure, serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for AsyncPath {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        <PurePosixPath as serde::Deserialize>::deserialize(deserializer).map(Self::from_pure)
    }
}
