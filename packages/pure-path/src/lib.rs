//! Pure POSIX paths: string and component algebra with no I/O.
//!
//! [`PurePosixPath`] is the path value the async facade is built around.
//! Nothing in this crate touches the filesystem, so every operation is
//! synchronous and cheap:
//! - Parsing normalizes separators and `.` components
//! - `join`, `parent`, `name`, `suffix` and friends build new values
//! - Equality, hashing and ordering work on the normalized form
//!
//! # Example
//!
//! ```rust
//! use aiopath_pure::{path, PurePosixPath};
//!
//! let p = path!("/tmp//x/./y/");
//! assert_eq!(p.to_string(), "/tmp/x/y");
//! assert_eq!(p.parent(), path!("/tmp/x"));
//! assert_eq!(p.join("z.txt").unwrap().suffix(), ".txt");
//! ```

mod error;
mod path;
mod pattern;

pub use error::PathError;
pub use path::PurePosixPath;
pub use pattern::Pattern;
