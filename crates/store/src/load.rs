//! Cold-start path: directory and file creation, pending-deletion
//! replay, and reloading of every in-memory structure from disk.

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use memtable::Memtable;
use tracing::debug;

use crate::error::Result;
use crate::{Store, DATA_EXT, LOG_EXT};

/// Current wall-clock time as a nanosecond string, the stem for new log
/// files and the prefix for new timestamped keys.
pub(crate) fn now_nanos() -> Result<String> {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|err| std::io::Error::new(std::io::ErrorKind::Other, err))?
        .as_nanos();
    Ok(nanos.to_string())
}

/// Returns the stem of `name` if it carries the given extension, exactly.
fn stem_for_ext(name: &str, ext: &str) -> Option<String> {
    let path = Path::new(name);
    if path.extension().map(|e| e == ext).unwrap_or(false) {
        path.file_stem()
            .and_then(|s| s.to_str())
            .map(str::to_string)
    } else {
        None
    }
}

impl Store {
    /// Loads the store from disk.
    ///
    /// 1. Create the database directory (idempotent).
    /// 2. Create `index.idx`, `delete.del`, and — if no `.log` exists —
    ///    a fresh log named by the current nanosecond timestamp.
    /// 3. Run the vacuum file pass to honour deletions pending from a
    ///    previous session.
    /// 4. Scan the directory once for the current log stem and the sealed
    ///    data file stems (sorted ascending).
    /// 5. Decode `index.idx` into the index and the current log into the
    ///    memtable; reset the cache to its sentinel.
    ///
    /// Callers must either hold the mutation lock or have exclusive
    /// access to the store (construction, `clear`).
    pub(crate) fn load_from_disk(&self) -> Result<()> {
        std::fs::create_dir_all(&self.db_path)?;
        codec::io::create_file_if_missing(self.index.path())?;
        codec::io::create_file_if_missing(&self.del_path)?;
        self.create_log_if_missing()?;

        self.vacuum_files()?;

        let mut sealed = Vec::new();
        let mut log_stem = None;
        for name in codec::io::list_file_names(&self.db_path)? {
            if let Some(stem) = stem_for_ext(&name, LOG_EXT) {
                log_stem = Some(stem);
            } else if let Some(stem) = stem_for_ext(&name, DATA_EXT) {
                sealed.push(stem);
            }
        }
        sealed.sort();

        // A log was just created above if none existed.
        let log_stem = log_stem
            .ok_or_else(|| crate::StoreError::corrupted("no .log file in database directory"))?;
        let log_path = self.log_file_path(&log_stem);

        self.index.load()?;

        let log_content = codec::io::read_file(&log_path)?;
        let memtable = Memtable::from_pairs(codec::decode_pairs(&log_content)?);

        {
            let mut hot = self.hot.write();
            hot.memtable = memtable;
            hot.log_stem = log_stem;
            hot.log_path = log_path;
        }
        *self.sealed.write() = sealed;
        self.cache.lock().reset();

        debug!(
            db_path = %self.db_path.display(),
            keys = self.index.len(),
            "store loaded from disk"
        );
        Ok(())
    }

    /// Ensures exactly one `.log` file exists, creating a fresh one named
    /// by the current nanosecond timestamp when none does.
    fn create_log_if_missing(&self) -> Result<()> {
        let has_log = codec::io::list_file_names(&self.db_path)?
            .iter()
            .any(|name| stem_for_ext(name, LOG_EXT).is_some());
        if !has_log {
            self.create_new_log()?;
        }
        Ok(())
    }

    /// Creates an empty log file named by the current nanosecond
    /// timestamp and returns its stem and path. The caller is responsible
    /// for updating the hot state.
    pub(crate) fn create_new_log(&self) -> Result<(String, std::path::PathBuf)> {
        let stem = now_nanos()?;
        let path = self.log_file_path(&stem);
        codec::io::create_file_if_missing(&path)?;
        Ok((stem, path))
    }
}
