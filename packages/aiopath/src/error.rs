//! Error type for async path operations.

use std::io;

use aiopath_offload::OffloadError;
use aiopath_pure::PathError;
use thiserror::Error;

/// Errors from [`AsyncPath`](crate::AsyncPath) operations.
///
/// Filesystem failures arrive as [`Error::Io`] exactly as the blocking call
/// produced them, so callers can branch on [`Error::kind`] or inspect the
/// raw OS error.
#[derive(Debug, Error)]
pub enum Error {
    /// The blocking filesystem call failed.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// The worker context could not run the call.
    #[error("offload failed: {0}")]
    Offload(#[from] OffloadError),

    /// A path could not be constructed.
    #[error("invalid path: {0}")]
    Path(#[from] PathError),
}

impl Error {
    /// The I/O error kind callers usually branch on.
    ///
    /// Path construction errors report `InvalidInput`; executor failures
    /// report `Other`.
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            Error::Io(e) => e.kind(),
            Error::Path(_) => io::ErrorKind::InvalidInput,
            Error::Offload(_) => io::ErrorKind::Other,
        }
    }

    /// The underlying I/O error, if the filesystem call itself failed.
    pub fn as_io(&self) -> Option<&io::Error> {
        match self {
            Error::Io(e) => Some(e),
            _ => None,
        }
    }

    /// The raw OS error number, if there is one.
    pub fn raw_os_error(&self) -> Option<i32> {
        self.as_io().and_then(io::Error::raw_os_error)
    }
}

impl From<Error> for io::Error {
    fn from(e: Error) -> Self {
        match e {
            Error::Io(e) => e,
            other => io::Error::new(other.kind(), other),
        }
    }
}

/// Result type alias for async path operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as StdError;

    #[test]
    fn io_errors_are_transparent() {
        let e = Error::from(io::Error::new(io::ErrorKind::NotFound, "gone"));
        assert_eq!(e.to_string(), "gone");
        assert_eq!(e.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn raw_os_error_is_preserved() {
        let e = Error::from(io::Error::from_raw_os_error(libc::EXDEV));
        assert_eq!(e.raw_os_error(), Some(libc::EXDEV));
        assert_eq!(e.kind(), io::Error::from_raw_os_error(libc::EXDEV).kind());
    }

    #[test]
    fn path_errors_are_invalid_input() {
        let e = Error::from(PathError::ContainsNul { position: 0 });
        assert_eq!(e.kind(), io::ErrorKind::InvalidInput);
        assert!(e.to_string().starts_with("invalid path"));
        assert!(e.as_io().is_none());
    }

    #[test]
    fn offload_errors_keep_source() {
        let e = Error::from(OffloadError::NoRuntime);
        assert_eq!(e.kind(), io::ErrorKind::Other);
        assert!(StdError::source(&e).is_some());
    }

    #[test]
    fn converts_back_into_io_error() {
        let original = io::Error::new(io::ErrorKind::PermissionDenied, "nope");
        let back: io::Error = Error::from(original).into();
        assert_eq!(back.kind(), io::ErrorKind::PermissionDenied);
        assert_eq!(back.to_string(), "nope");

        let wrapped: io::Error = Error::from(OffloadError::WorkerLost).into();
        assert_eq!(wrapped.kind(), io::ErrorKind::Other);
        assert!(wrapped.to_string().contains("offload failed"));
    }
}
