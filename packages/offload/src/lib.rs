//! Offload bridge: awaitable execution of blocking calls.
//!
//! Filesystem system calls block the calling thread. This crate moves such a
//! call onto a worker context owned by an [`Executor`] and hands the caller an
//! [`Offloaded`] future that resolves to exactly what the call returned:
//! - Return values (including `Err` values) pass through untouched
//! - A panic on the worker is resumed in the awaiting task
//! - Executor failures surface as [`OffloadError`]
//!
//! The bridge adds no bound, queue or ordering of its own. How many calls run
//! at once is entirely the executor's policy.
//!
//! # Cancellation
//!
//! Dropping an [`Offloaded`] future detaches the caller from the result. The
//! call itself has already been handed to the worker and keeps running to
//! completion; cancellation is best-effort only.
//!
//! # Example
//!
//! ```rust
//! use aiopath_offload::run_blocking;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let len = run_blocking(|| std::fs::read_dir(".").map(|d| d.count()))
//!     .await
//!     .expect("no executor available");
//! assert!(len.is_ok());
//! # }
//! ```

mod error;
mod executor;
mod offloaded;

pub use error::OffloadError;
pub use executor::{Executor, Job, ThreadConfig, ThreadPerCall, TokioBlocking};
pub use offloaded::{run_blocking, Offloaded, Offloader};
