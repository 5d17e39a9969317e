//! Worker contexts that blocking calls are submitted to.
//!
//! [`Executor`] is the seam between the bridge and whatever actually runs the
//! work. Two implementations ship with the crate; tests and embedders can
//! provide their own.

use std::sync::Arc;
use std::thread;

use tokio::runtime::Handle;

use crate::OffloadError;

/// A type-erased unit of blocking work.
pub type Job = Box<dyn FnOnce() + Send + 'static>;

/// Something that can run a [`Job`] away from the caller's scheduler.
///
/// Implementations own the capacity and scheduling policy. `submit` must not
/// run the job inline on the calling thread in production executors, since
/// that would block the caller's scheduler for the duration of the call.
///
/// # Object Safety
///
/// This trait is object-safe: [`Offloader`](crate::Offloader) stores it as
/// `Arc<dyn Executor>`.
pub trait Executor: Send + Sync {
    /// Hand `job` to a worker.
    ///
    /// Returning `Ok` means the executor accepted the job. It does not
    /// promise the job will run: an executor that shuts down may drop it,
    /// which the awaiting side observes as [`OffloadError::WorkerLost`].
    fn submit(&self, job: Job) -> Result<(), OffloadError>;
}

impl<T: Executor + ?Sized> Executor for Arc<T> {
    fn submit(&self, job: Job) -> Result<(), OffloadError> {
        (**self).submit(job)
    }
}

impl<T: Executor + ?Sized> Executor for Box<T> {
    fn submit(&self, job: Job) -> Result<(), OffloadError> {
        self.as_ref().submit(job)
    }
}

/// Runs jobs on tokio's blocking thread pool.
///
/// Without an explicit handle the runtime is looked up at submission time,
/// so the offloaded call must be started from within a tokio context.
#[derive(Clone, Debug, Default)]
pub struct TokioBlocking {
    handle: Option<Handle>,
}

impl TokioBlocking {
    /// Use whichever runtime is current when a job is submitted.
    pub fn new() -> Self {
        Self::default()
    }

    /// Always submit to the runtime behind `handle`.
    ///
    /// Lets threads outside the runtime offload work onto it.
    pub fn with_handle(handle: Handle) -> Self {
        Self {
            handle: Some(handle),
        }
    }
}

impl Executor for TokioBlocking {
    fn submit(&self, job: Job) -> Result<(), OffloadError> {
        let handle = match &self.handle {
            Some(handle) => handle.clone(),
            None => Handle::try_current().map_err(|_| OffloadError::NoRuntime)?,
        };

        // The result travels over the call's own channel, so the join handle
        // is not needed.
        drop(handle.spawn_blocking(job));
        Ok(())
    }
}

/// Configuration for [`ThreadPerCall`].
#[derive(Debug, Clone)]
pub struct ThreadConfig {
    /// Name given to every worker thread.
    pub name: String,

    /// Stack size for worker threads; the platform default when `None`.
    pub stack_size: Option<usize>,
}

impl Default for ThreadConfig {
    fn default() -> Self {
        Self {
            name: "aiopath-blocking".to_string(),
            stack_size: None,
        }
    }
}

/// Starts a fresh OS thread for every job.
///
/// Needs no async runtime at all, which makes it usable with any executor
/// that can poll a future.
#[derive(Debug, Clone, Default)]
pub struct ThreadPerCall {
    config: ThreadConfig,
}

impl ThreadPerCall {
    pub fn new(config: ThreadConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ThreadConfig {
        &self.config
    }
}

impl Executor for ThreadPerCall {
    fn submit(&self, job: Job) -> Result<(), OffloadError> {
        let mut builder = thread::Builder::new().name(self.config.name.clone());
        if let Some(size) = self.config.stack_size {
            builder = builder.stack_size(size);
        }

        builder.spawn(job).map(drop).map_err(OffloadError::Spawn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use std::time::Duration;

    fn recv<T>(rx: &mpsc::Receiver<T>) -> T {
        rx.recv_timeout(Duration::from_secs(5))
            .expect("job never ran")
    }

    #[test]
    fn tokio_blocking_without_runtime_fails() {
        let result = TokioBlocking::new().submit(Box::new(|| {}));
        assert!(matches!(result, Err(OffloadError::NoRuntime)));
    }

    #[test]
    fn tokio_blocking_with_handle_runs_outside_runtime() {
        let rt = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .build()
            .unwrap();
        let executor = TokioBlocking::with_handle(rt.handle().clone());

        let (tx, rx) = mpsc::channel();
        executor
            .submit(Box::new(move || tx.send(7).unwrap()))
            .unwrap();
        assert_eq!(recv(&rx), 7);
    }

    #[tokio::test]
    async fn tokio_blocking_uses_current_runtime() {
        let (tx, rx) = mpsc::channel();
        TokioBlocking::new()
            .submit(Box::new(move || tx.send("ran").unwrap()))
            .unwrap();

        let got = tokio::task::spawn_blocking(move || recv(&rx)).await.unwrap();
        assert_eq!(got, "ran");
    }

    #[test]
    fn thread_per_call_names_its_threads() {
        let executor = ThreadPerCall::new(ThreadConfig {
            name: "fs-worker".to_string(),
            stack_size: Some(256 * 1024),
        });

        let (tx, rx) = mpsc::channel();
        executor
            .submit(Box::new(move || {
                tx.send(thread::current().name().map(str::to_owned)).unwrap()
            }))
            .unwrap();
        assert_eq!(recv(&rx).as_deref(), Some("fs-worker"));
    }

    #[test]
    fn thread_config_default_name() {
        assert_eq!(ThreadPerCall::default().config().name, "aiopath-blocking");
        assert_eq!(ThreadConfig::default().stack_size, None);
    }

    #[test]
    fn boxed_and_shared_executors_delegate() {
        let boxed: Box<dyn Executor> = Box::new(ThreadPerCall::default());
        let shared: Arc<dyn Executor> = Arc::new(ThreadPerCall::default());

        let (tx, rx) = mpsc::channel();
        let tx2 = tx.clone();
        boxed.submit(Box::new(move || tx.send(1).unwrap())).unwrap();
        shared.submit(Box::new(move || tx2.send(2).unwrap())).unwrap();

        let mut got = vec![recv(&rx), recv(&rx)];
        got.sort();
        assert_eq!(got, vec![1, 2]);
    }
}
