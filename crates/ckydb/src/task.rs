//! Periodic background worker.
//!
//! Runs a closure on its own thread at a fixed interval. The shutdown
//! channel doubles as the tick timer: the worker sleeps in
//! `recv_timeout(interval)` and a timeout means "do the work", while a
//! message (or a dropped sender) means "stop".

use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::DbError;

/// A repeating background task with explicit start/stop control.
pub(crate) struct Task {
    interval: Duration,
    worker: Option<Worker>,
}

struct Worker {
    stop_tx: Sender<()>,
    thread: JoinHandle<()>,
}

impl Task {
    pub(crate) fn new(interval: Duration) -> Self {
        Self {
            interval,
            worker: None,
        }
    }

    pub(crate) fn is_running(&self) -> bool {
        self.worker.is_some()
    }

    /// Spawns the worker thread running `work` every interval.
    ///
    /// # Errors
    ///
    /// [`DbError::AlreadyRunning`] if the task is already started;
    /// [`DbError::Io`] if the thread cannot be spawned.
    pub(crate) fn start<F>(&mut self, name: &str, work: F) -> Result<(), DbError>
    where
        F: Fn() + Send + 'static,
    {
        if self.worker.is_some() {
            return Err(DbError::AlreadyRunning);
        }

        let (stop_tx, stop_rx) = mpsc::channel();
        let interval = self.interval;
        let thread = thread::Builder::new()
            .name(name.to_string())
            .spawn(move || loop {
                match stop_rx.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => work(),
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            })?;

        self.worker = Some(Worker { stop_tx, thread });
        Ok(())
    }

    /// Signals the worker to stop and waits for it to finish.
    ///
    /// # Errors
    ///
    /// [`DbError::NotRunning`] if the task is not started.
    pub(crate) fn stop(&mut self) -> Result<(), DbError> {
        let worker = self.worker.take().ok_or(DbError::NotRunning)?;
        let _ = worker.stop_tx.send(());
        let _ = worker.thread.join();
        Ok(())
    }
}
