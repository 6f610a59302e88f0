//! # ckydb - an embedded, memory-first, persistent key-value store
//!
//! String keys, string values, microsecond-scale reads from memory, and
//! per-operation durability on commodity filesystems. The heavy lifting
//! lives in the [`store`] crate; this crate is the public face: a
//! [`connect`] function, the [`Ckydb`] handle, and the background task
//! that vacuums tombstoned records on an interval.
//!
//! ## Example
//!
//! ```rust,no_run
//! let mut db = ckydb::connect("data/ckydb", 1024.0, 60.0).unwrap();
//!
//! db.set("name", "Alice").unwrap();
//! assert_eq!(db.get("name").unwrap(), "Alice");
//!
//! db.delete("name").unwrap();
//! assert!(db.get("name").is_err());
//!
//! db.close().unwrap();
//! ```
//!
//! ## Known limitation
//!
//! Keys and values are stored verbatim in a separator-delimited format
//! with no escaping; text containing the separator strings
//! (`"$%#@*&^&"` or `"><?&(^#"`) produces undefined record boundaries.

mod error;
mod task;

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tracing::warn;

pub use error::DbError;
pub use store::{Store, StoreError};

use task::Task;

/// Connects to the database at `db_path`, loading it from disk and
/// starting the background vacuum task.
///
/// `max_file_size_kb` caps the size of every database file (make sure it
/// fits in memory); `vacuum_interval_sec` is the period between vacuum
/// cycles.
///
/// # Errors
///
/// [`DbError::Store`] if loading fails, [`DbError::Io`] if the worker
/// thread cannot be spawned.
pub fn connect<P: AsRef<Path>>(
    db_path: P,
    max_file_size_kb: f64,
    vacuum_interval_sec: f64,
) -> Result<Ckydb, DbError> {
    let store = Arc::new(Store::open(db_path, max_file_size_kb)?);
    let mut db = Ckydb {
        store,
        vacuum_task: Task::new(Duration::from_secs_f64(vacuum_interval_sec)),
    };
    db.open()?;
    Ok(db)
}

/// Handle to an open ckydb database.
///
/// All data operations delegate to the shared [`Store`], which is safe
/// for concurrent use; the handle itself additionally owns the periodic
/// vacuum worker, so `open`/`close` take `&mut self`.
pub struct Ckydb {
    store: Arc<Store>,
    vacuum_task: Task,
}

impl Ckydb {
    /// Starts the background vacuum task. A no-op if already open.
    pub fn open(&mut self) -> Result<(), DbError> {
        if self.vacuum_task.is_running() {
            return Ok(());
        }

        let store = Arc::clone(&self.store);
        self.vacuum_task.start("ckydb-vacuum", move || {
            if let Err(err) = store.vacuum() {
                warn!(error = %err, "background vacuum failed; retrying next tick");
            }
        })
    }

    /// Stops the background vacuum task. A no-op if already closed.
    pub fn close(&mut self) -> Result<(), DbError> {
        if !self.vacuum_task.is_running() {
            return Ok(());
        }
        self.vacuum_task.stop()
    }

    /// Adds or updates the value for `key`.
    pub fn set(&self, key: &str, value: &str) -> Result<(), DbError> {
        self.store.set(key, value).map_err(Into::into)
    }

    /// Retrieves the value for `key`.
    pub fn get(&self, key: &str) -> Result<String, DbError> {
        self.store.get(key).map_err(Into::into)
    }

    /// Removes `key`; its value is physically reclaimed by the next
    /// vacuum cycle.
    pub fn delete(&self, key: &str) -> Result<(), DbError> {
        self.store.delete(key).map_err(Into::into)
    }

    /// Resets the database, removing everything on disk.
    pub fn clear(&self) -> Result<(), DbError> {
        self.store.clear().map_err(Into::into)
    }

    /// Runs a vacuum cycle immediately, without waiting for the next
    /// scheduled tick.
    pub fn vacuum(&self) -> Result<(), DbError> {
        self.store.vacuum().map_err(Into::into)
    }

    /// The underlying storage engine, e.g. for stats inspection.
    #[must_use]
    pub fn store(&self) -> &Store {
        &self.store
    }
}

impl Drop for Ckydb {
    fn drop(&mut self) {
        let _ = self.close();
    }
}
