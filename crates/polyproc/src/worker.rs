//! A single background worker with a FIFO job queue.
//!
//! A presentation shell submits each user-triggered operation as a job, keeps
//! the returned [`Ticket`], and hands the result to whichever thread owns the
//! display once it is ready. Jobs run one at a time in submission order and
//! cannot be cancelled.

use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::{channel, Receiver, Sender, TryRecvError};
use std::thread::{self, JoinHandle};

use thiserror::Error;
use tracing::{debug, warn};

type Job = Box<dyn FnOnce() + Send + 'static>;

/// Errors reported by [`Worker`] and [`Ticket`].
#[derive(Debug, Error)]
pub enum WorkerError {
    /// The worker thread could not be started.
    #[error("failed to spawn worker thread: {0}")]
    Spawn(#[from] io::Error),

    /// The queue is closed; the job was never run.
    #[error("worker queue is closed")]
    Closed,

    /// The job panicked before producing a result.
    #[error("job panicked")]
    JobPanicked,
}

/// Handle to the result of a submitted job.
#[derive(Debug)]
pub struct Ticket<T> {
    rx: Receiver<Result<T, WorkerError>>,
}

impl<T> Ticket<T> {
    /// Blocks until the job has finished.
    ///
    /// # Errors
    ///
    /// Returns [`WorkerError::JobPanicked`] if the job panicked and
    /// [`WorkerError::Closed`] if it was dropped without running.
    pub fn wait(self) -> Result<T, WorkerError> {
        self.rx.recv().unwrap_or(Err(WorkerError::Closed))
    }

    /// Returns the result if the job has finished, without blocking.
    ///
    /// The result can be taken once; later calls report [`WorkerError::Closed`].
    pub fn try_take(&self) -> Option<Result<T, WorkerError>> {
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(WorkerError::Closed)),
        }
    }
}

/// One background thread draining a job queue.
#[derive(Debug)]
pub struct Worker {
    name: String,
    sender: Option<Sender<Job>>,
    handle: Option<JoinHandle<()>>,
}

impl Worker {
    /// Starts a worker thread with the given name.
    ///
    /// # Errors
    ///
    /// Returns [`WorkerError::Spawn`] if the OS refuses to create the thread.
    pub fn spawn(name: impl Into<String>) -> Result<Self, WorkerError> {
        let name = name.into();
        let (sender, receiver) = channel::<Job>();

        let thread_name = name.clone();
        let handle = thread::Builder::new().name(name.clone()).spawn(move || {
            debug!(worker = %thread_name, "worker started");
            for job in receiver {
                job();
            }
            debug!(worker = %thread_name, "worker stopped");
        })?;

        Ok(Self {
            name,
            sender: Some(sender),
            handle: Some(handle),
        })
    }

    /// The worker's thread name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Queues `job` and returns a ticket for its result.
    ///
    /// A panicking job is reported through its ticket; the worker keeps
    /// serving later jobs.
    ///
    /// # Errors
    ///
    /// Returns [`WorkerError::Closed`] if the worker has shut down.
    pub fn submit<T, F>(&self, job: F) -> Result<Ticket<T>, WorkerError>
    where
        T: Send + 'static,
        F: FnOnce() -> T + Send + 'static,
    {
        let sender = self.sender.as_ref().ok_or(WorkerError::Closed)?;
        let (tx, rx) = channel();
        let worker = self.name.clone();

        let wrapped: Job = Box::new(move || {
            let outcome = panic::catch_unwind(AssertUnwindSafe(job)).map_err(|_| {
                warn!(%worker, "job panicked");
                WorkerError::JobPanicked
            });
            // The caller may have dropped the ticket.
            let _ = tx.send(outcome);
        });

        sender.send(wrapped).map_err(|_| WorkerError::Closed)?;
        Ok(Ticket { rx })
    }

    /// Closes the queue and waits for the queued jobs to finish.
    pub fn shutdown(mut self) {
        self.close();
    }

    fn close(&mut self) {
        drop(self.sender.take());
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!(worker = %self.name, "worker thread terminated abnormally");
            }
        }
    }
}

impl Drop for Worker {
    fn drop(&mut self) {
        self.close();
    }
}
