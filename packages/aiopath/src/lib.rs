//! Async filesystem paths for POSIX systems.
//!
//! [`AsyncPath`] pairs a normalized [`PurePosixPath`] with awaitable I/O.
//! Path algebra (join, parent, suffix, ...) is synchronous and never touches
//! the disk. Filesystem operations come from the [`PathIo`] trait; each one
//! runs a blocking call on a worker through an [`Offloader`], so the async
//! scheduler is never stalled by the filesystem.
//!
//! # Example
//!
//! ```rust
//! use aiopath::{AsyncPath, MkdirOptions, PathIo};
//!
//! # #[tokio::main]
//! # async fn main() -> aiopath::Result<()> {
//! let dir = tempfile::tempdir()?;
//! let root = AsyncPath::new(dir.path())?;
//!
//! let notes = root.join("notes")?;
//! notes.mkdir(MkdirOptions::new()).await?;
//!
//! let todo = notes.join("todo.txt")?;
//! todo.write_text("buy milk".to_string()).await?;
//!
//! assert_eq!(todo.read_text().await?, "buy milk");
//! assert_eq!(root.glob("**/*.txt").await?, [todo.as_path()]);
//! # Ok(())
//! # }
//! ```
//!
//! # Offloading
//!
//! By default calls go to tokio's blocking pool, which requires a tokio
//! runtime. Give a path another [`Offloader`] with
//! [`AsyncPath::with_offloader`] to change that; every path derived from it
//! inherits the choice.

mod blocking;
mod error;
mod glob;
mod io;
mod iterdir;
mod path;

pub use blocking::MkdirOptions;
pub use error::{Error, Result};
pub use io::PathIo;
pub use iterdir::IterDir;
pub use path::AsyncPath;

pub use aiopath_offload::{
    run_blocking, Executor, Job, OffloadError, Offloaded, Offloader, ThreadConfig, ThreadPerCall,
    TokioBlocking,
};
pub use aiopath_pure::{PathError, Pattern, PurePosixPath};
