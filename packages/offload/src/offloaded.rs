//! The offloaded call and the handle that issues it.

use std::fmt;
use std::future::Future;
use std::panic::{self, AssertUnwindSafe};
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use lazy_static::lazy_static;
use tokio::sync::oneshot;

use crate::{Executor, Job, OffloadError, TokioBlocking};

lazy_static! {
    static ref DEFAULT_OFFLOADER: Offloader = Offloader::new(TokioBlocking::new());
}

/// What the worker sends back: the call's value, or its panic payload.
type Outcome<T> = std::thread::Result<T>;

/// Submits blocking calls to an [`Executor`].
///
/// Cloning is cheap; clones share the executor. The default offloader uses
/// tokio's blocking pool through [`TokioBlocking`].
#[derive(Clone)]
pub struct Offloader {
    executor: Arc<dyn Executor>,
}

impl Offloader {
    /// Create an offloader that submits to `executor`.
    pub fn new(executor: impl Executor + 'static) -> Self {
        Self {
            executor: Arc::new(executor),
        }
    }

    /// Create an offloader around an already shared executor.
    pub fn from_shared(executor: Arc<dyn Executor>) -> Self {
        Self { executor }
    }

    /// Start `f` on the executor and return a future for its result.
    ///
    /// Submission happens here, before the returned future is first polled.
    /// The future resolves to whatever `f` returned. If `f` panics, the panic
    /// is resumed in the task that awaits the future.
    pub fn run<F, T>(&self, f: F) -> Offloaded<T>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        let (tx, rx) = oneshot::channel::<Outcome<T>>();

        let job: Job = Box::new(move || {
            let outcome = panic::catch_unwind(AssertUnwindSafe(f));
            if tx.send(outcome).is_err() {
                log::trace!("offloaded call finished after its caller went away");
            }
        });

        log::trace!("submitting offloaded call");
        let state = match self.executor.submit(job) {
            Ok(()) => State::Pending(rx),
            Err(err) => {
                log::debug!("executor rejected offloaded call: {}", err);
                State::Rejected(err)
            }
        };

        Offloaded { state }
    }
}

impl Default for Offloader {
    fn default() -> Self {
        DEFAULT_OFFLOADER.clone()
    }
}

impl fmt::Debug for Offloader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Offloader").finish_non_exhaustive()
    }
}

/// Run `f` through the default [`Offloader`].
pub fn run_blocking<F, T>(f: F) -> Offloaded<T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    DEFAULT_OFFLOADER.run(f)
}

/// A blocking call in flight on a worker.
///
/// Resolves exactly once. Dropping it only detaches the caller; the worker
/// still runs the call to completion.
#[must_use = "the call runs regardless, but its result is lost unless awaited"]
pub struct Offloaded<T> {
    state: State<T>,
}

enum State<T> {
    Pending(oneshot::Receiver<Outcome<T>>),
    Rejected(OffloadError),
    Done,
}

impl<T> Future for Offloaded<T> {
    type Output = Result<T, OffloadError>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();

        match std::mem::replace(&mut this.state, State::Done) {
            State::Pending(mut rx) => match Pin::new(&mut rx).poll(cx) {
                Poll::Pending => {
                    this.state = State::Pending(rx);
                    Poll::Pending
                }
                Poll::Ready(Ok(Ok(value))) => {
                    log::trace!("offloaded call completed");
                    Poll::Ready(Ok(value))
                }
                Poll::Ready(Ok(Err(payload))) => panic::resume_unwind(payload),
                Poll::Ready(Err(_)) => {
                    log::debug!("worker dropped offloaded call without a result");
                    Poll::Ready(Err(OffloadError::WorkerLost))
                }
            },
            State::Rejected(err) => Poll::Ready(Err(err)),
            State::Done => panic!("`Offloaded` polled after completion"),
        }
    }
}

impl<T> fmt::Debug for Offloaded<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match self.state {
            State::Pending(_) => "pending",
            State::Rejected(_) => "rejected",
            State::Done => "done",
        };
        f.debug_struct("Offloaded").field("state", &state).finish()
    }
}
