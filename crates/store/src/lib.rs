//! # Store - the ckydb storage engine
//!
//! The central orchestrator that ties the [`codec`], [`memtable`] and
//! [`cache`] crates into a complete memory-first, persistent key-value
//! store.
//!
//! ## Architecture
//!
//! ```text
//! Client
//!   |
//!   v
//! ┌───────────────────────────────────────────────────┐
//! │                     STORE                         │
//! │                                                   │
//! │ write.rs → index append → memtable/cache update   │
//! │              |            + whole-file persist    │
//! │              |                                    │
//! │              |  (log >= max_file_size_kb?)        │
//! │              |            yes                     │
//! │              v                                    │
//! │         rollover → <stem>.log becomes <stem>.cky  │
//! │                                                   │
//! │ read.rs  → index → memtable (hot)                 │
//! │                  → cache    (cold, load-on-miss)  │
//! │                                                   │
//! │ vacuum.rs → rewrite .log/.cky files dropping      │
//! │             every key listed in delete.del        │
//! └───────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Responsibilities
//!
//! | Module       | Purpose                                              |
//! |--------------|------------------------------------------------------|
//! | [`lib.rs`]   | `Store` struct, constructor, accessors, `Debug`      |
//! | [`index`]    | user key → timestamped key map + `.idx` persistence  |
//! | [`load`]     | cold-start path: files, pending vacuum, reload       |
//! | [`write`]    | `set()`, `delete()`, `clear()`, log rollover         |
//! | [`read`]     | `get()`, sealed-file window location                 |
//! | [`vacuum`]   | physical removal of tombstoned records               |
//!
//! ## On-disk layout
//!
//! All files live flat in the database directory:
//!
//! ```text
//! index.idx      user key -> timestamped key records
//! delete.del     timestamped keys awaiting physical removal
//! <nanos>.log    the one open log (mirrors the memtable)
//! <nanos>.cky    sealed data files produced by rollover
//! ```
//!
//! ## Locking
//!
//! Three locks coordinate parallel callers; `Store` methods all take
//! `&self`:
//!
//! - **mutation** — serialises `set`, `delete`, `clear` and the public
//!   `vacuum` entry against each other. Held for the whole call.
//! - **cache** — guards the cold window. Held across miss-detection,
//!   file load and the subsequent read or write, so a cold `get` is
//!   atomic with respect to other cold operations.
//! - **deletion log** — guards `delete.del` appends against the vacuum
//!   rewrite-and-truncate pass.
//!
//! Lock order where held together: mutation, then cache, then the
//! deletion-log lock. The memtable and the current log stem are published
//! in a single `RwLock` cell so hot readers observe both consistently
//! without taking the mutation lock.

mod error;
mod index;
mod load;
mod read;
mod vacuum;
mod write;

use std::fmt;
use std::path::{Path, PathBuf};

use cache::Cache;
use memtable::Memtable;
use parking_lot::{Mutex, RwLock};

pub use error::{Result, StoreError};

use index::Index;

/// Name of the index file within the database directory.
pub const INDEX_FILENAME: &str = "index.idx";

/// Name of the deletion-log file within the database directory.
pub const DEL_FILENAME: &str = "delete.del";

/// Extension of the one open log file.
pub const LOG_EXT: &str = "log";

/// Extension of sealed data files.
pub const DATA_EXT: &str = "cky";

/// The current log: the memtable together with the timestamp stem and
/// path of the `.log` file it mirrors. Kept in one cell so that readers
/// never observe a memtable paired with the wrong stem.
pub(crate) struct HotLog {
    pub(crate) memtable: Memtable,
    pub(crate) log_stem: String,
    pub(crate) log_path: PathBuf,
}

/// The ckydb storage engine.
///
/// # Write path
///
/// 1. Resolve the user key through the index, minting a new timestamped
///    key (and appending it to `index.idx`) on first sight.
/// 2. Route by timestamp: keys at or after the current log stem go to the
///    memtable and the `.log` file; older keys go through the cache to
///    their sealed `.cky` file. Persistence re-encodes the whole table.
/// 3. Roll the log into a sealed data file once it reaches
///    `max_file_size_kb`.
/// 4. Publish the key in the in-memory index last, so readers never see a
///    key whose value is not yet durable.
///
/// # Read path
///
/// 1. Look the user key up in the in-memory index; a miss is `NotFound`.
/// 2. Timestamped keys at or after the current log stem are served from
///    the memtable; older ones from the cache, loading the containing
///    sealed file on a window miss.
///
/// # Recovery
///
/// [`Store::open`] creates the directory and bookkeeping files if absent,
/// honours any deletions still pending in `delete.del`, then loads the
/// index and the current log back into memory.
pub struct Store {
    db_path: PathBuf,
    max_file_size_kb: f64,
    index: Index,
    del_path: PathBuf,
    mutation: Mutex<()>,
    del_lock: Mutex<()>,
    hot: RwLock<HotLog>,
    sealed: RwLock<Vec<String>>,
    cache: Mutex<Cache>,
}

impl Store {
    /// Opens (or creates) the store rooted at `db_path` and loads it from
    /// disk.
    ///
    /// `max_file_size_kb` is the size at which the current log rolls over
    /// into a sealed data file; every file the engine writes stays below
    /// roughly this size, so it should fit comfortably in memory.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] on filesystem failures and
    /// [`StoreError::Corrupted`] if an existing file fails to decode.
    pub fn open<P: AsRef<Path>>(db_path: P, max_file_size_kb: f64) -> Result<Self> {
        let db_path = db_path.as_ref().to_path_buf();
        let store = Self {
            index: Index::new(db_path.join(INDEX_FILENAME)),
            del_path: db_path.join(DEL_FILENAME),
            db_path,
            max_file_size_kb,
            mutation: Mutex::new(()),
            del_lock: Mutex::new(()),
            hot: RwLock::new(HotLog {
                memtable: Memtable::new(),
                log_stem: String::new(),
                log_path: PathBuf::new(),
            }),
            sealed: RwLock::new(Vec::new()),
            cache: Mutex::new(Cache::new()),
        };

        store.load_from_disk()?;
        Ok(store)
    }

    /// Re-materialises every in-memory structure from disk.
    ///
    /// Runs the same path as [`Store::open`]; useful after external
    /// manipulation of the database directory.
    pub fn load(&self) -> Result<()> {
        let _mutation = self.mutation.lock();
        self.load_from_disk()
    }

    /// Root directory of this store.
    #[must_use]
    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// The configured rollover threshold in kilobytes.
    #[must_use]
    pub fn max_file_size_kb(&self) -> f64 {
        self.max_file_size_kb
    }

    /// Timestamp stem of the current log file.
    #[must_use]
    pub fn current_log_stem(&self) -> String {
        self.hot.read().log_stem.clone()
    }

    /// Number of sealed `.cky` data files.
    #[must_use]
    pub fn data_file_count(&self) -> usize {
        self.sealed.read().len()
    }

    /// Number of user keys currently visible.
    #[must_use]
    pub fn key_count(&self) -> usize {
        self.index.len()
    }

    /// Number of entries in the memtable.
    #[must_use]
    pub fn memtable_len(&self) -> usize {
        self.hot.read().memtable.len()
    }

    pub(crate) fn data_file_path(&self, stem: &str) -> PathBuf {
        self.db_path.join(format!("{stem}.{DATA_EXT}"))
    }

    pub(crate) fn log_file_path(&self, stem: &str) -> PathBuf {
        self.db_path.join(format!("{stem}.{LOG_EXT}"))
    }
}

impl fmt::Debug for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hot = self.hot.read();
        let cache = self.cache.lock();
        f.debug_struct("Store")
            .field("db_path", &self.db_path)
            .field("max_file_size_kb", &self.max_file_size_kb)
            .field("keys", &self.index.len())
            .field("current_log_stem", &hot.log_stem)
            .field("memtable_entries", &hot.memtable.len())
            .field("data_files", &self.sealed.read().len())
            .field("cache_window", &(cache.start(), cache.end()))
            .field("cache_entries", &cache.len())
            .finish()
    }
}

#[cfg(test)]
mod tests;
