//! Write path: `set()`, `delete()`, `clear()`, and log rollover.
//!
//! Every mutation runs under the mutation lock for its full duration.
//! Persistence is whole-file: a write re-encodes the entire memtable (or
//! cached data file) and overwrites the file, so the on-disk state after
//! a successful call always equals the in-memory state. On a failed
//! persist the pre-write file contents are restored best-effort and the
//! in-memory structures are left untouched.

use tracing::debug;

use crate::error::{Result, StoreError};
use crate::load::now_nanos;
use crate::Store;

impl Store {
    /// Adds or updates the value for `key`.
    ///
    /// A first-seen key mints a fresh timestamped key
    /// (`"<nanos>-<key>"`), appends it to `index.idx` up front, and
    /// publishes it in the in-memory index only after the value write
    /// succeeds — readers never observe a key whose value is not on disk.
    /// An update reuses the existing timestamped key and leaves the index
    /// alone.
    ///
    /// The value is routed by timestamp: keys at or after the current log
    /// stem go to the memtable and the `.log` file (possibly triggering
    /// rollover), older keys go through the cache to their sealed data
    /// file.
    ///
    /// # Errors
    ///
    /// [`StoreError::Io`] or [`StoreError::Corrupted`]; the store is
    /// rolled back to its pre-call state best-effort before returning.
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let _mutation = self.mutation.lock();

        let (timestamped_key, is_new) = match self.index.lookup(key) {
            Some(existing) => (existing, false),
            None => (format!("{}-{}", now_nanos()?, key), true),
        };

        if is_new {
            self.index.append_record(key, &timestamped_key)?;
        }

        match self.save_value(&timestamped_key, value) {
            Ok(()) => {
                if is_new {
                    self.index.publish(key, &timestamped_key);
                }
                Ok(())
            }
            Err(err) => {
                if is_new {
                    // Unwind the index append; the value write already
                    // restored the data file it touched.
                    let _ = self.index.strip_record(key);
                }
                Err(err)
            }
        }
    }

    /// Removes `key` from the store.
    ///
    /// The value bytes stay in their `.log`/`.cky` file until the next
    /// vacuum; this call only strips the index record, appends the
    /// timestamped key to `delete.del`, and finally hides the key from
    /// the in-memory index. The index is updated last so readers never
    /// see a key that is no longer durably visible.
    ///
    /// # Errors
    ///
    /// [`StoreError::NotFound`] if the key is absent; [`StoreError::Io`]
    /// on file failures (in which case the on-disk index and the
    /// in-memory index may transiently disagree — the key stays visible).
    pub fn delete(&self, key: &str) -> Result<()> {
        let _mutation = self.mutation.lock();

        let timestamped_key = self
            .index
            .lookup(key)
            .ok_or_else(|| StoreError::not_found(key))?;

        self.index.strip_record(key)?;

        {
            let _del = self.del_lock.lock();
            codec::io::append_to_file(&self.del_path, &codec::encode_token(&timestamped_key))?;
        }

        self.index.forget(key);
        Ok(())
    }

    /// Resets the store, removing everything on disk, then reloads.
    ///
    /// The in-memory index is emptied first so no reader can chase a
    /// timestamped key into a vanishing file.
    pub fn clear(&self) -> Result<()> {
        let _mutation = self.mutation.lock();

        self.index.reset();
        codec::io::remove_tree(&self.db_path)?;
        debug!(db_path = %self.db_path.display(), "cleared database directory");
        self.load_from_disk()
    }

    /// Routes a value write by comparing the timestamped key against the
    /// current log stem.
    fn save_value(&self, timestamped_key: &str, value: &str) -> Result<()> {
        let is_hot = {
            let hot = self.hot.read();
            timestamped_key >= hot.log_stem.as_str()
        };

        if is_hot {
            self.save_to_memtable(timestamped_key, value)
        } else {
            self.save_to_cache(timestamped_key, value)
        }
    }

    /// Persists the memtable plus the new entry to the current log, then
    /// applies the entry in memory and evaluates rollover.
    fn save_to_memtable(&self, timestamped_key: &str, value: &str) -> Result<()> {
        let (mut staged, log_path, pre_image) = {
            let hot = self.hot.read();
            (
                hot.memtable.clone(),
                hot.log_path.clone(),
                codec::encode_pairs(hot.memtable.iter()),
            )
        };
        staged.insert(timestamped_key.to_string(), value.to_string());

        if let Err(err) = codec::io::write_file(&log_path, &codec::encode_pairs(staged.iter())) {
            let _ = codec::io::write_file(&log_path, &pre_image);
            return Err(err.into());
        }

        self.hot
            .write()
            .memtable
            .insert(timestamped_key.to_string(), value.to_string());

        self.roll_log_if_too_big()
    }

    /// Persists the cache plus the new entry back to its sealed data
    /// file, loading the containing file first on a window miss. The
    /// cache lock is held for the whole sequence.
    fn save_to_cache(&self, timestamped_key: &str, value: &str) -> Result<()> {
        let mut cache = self.cache.lock();
        if !cache.contains(timestamped_key) {
            let (start, end) = self.locate_window(timestamped_key)?;
            let content = codec::io::read_file(self.data_file_path(&start))?;
            cache.load(start, end, codec::decode_pairs(&content)?);
        }

        let path = self.data_file_path(cache.start());
        let pre_image = codec::encode_pairs(cache.iter());
        let mut staged = cache.clone();
        staged.put(timestamped_key.to_string(), value.to_string());

        if let Err(err) = codec::io::write_file(&path, &codec::encode_pairs(staged.iter())) {
            let _ = codec::io::write_file(&path, &pre_image);
            return Err(err.into());
        }

        cache.put(timestamped_key.to_string(), value.to_string());
        Ok(())
    }

    /// Seals the current log once it reaches `max_file_size_kb`.
    ///
    /// # Steps
    ///
    /// 1. Rename `<stem>.log` to `<stem>.cky` (atomic).
    /// 2. Add the stem to the sealed list, keeping it sorted.
    /// 3. Create a fresh log named by the current nanosecond timestamp
    ///    and swap it into the hot state with an empty memtable.
    ///
    /// The sealed list is updated before the hot state so a concurrent
    /// cold reader can always locate the just-sealed file.
    fn roll_log_if_too_big(&self) -> Result<()> {
        let (log_stem, log_path) = {
            let hot = self.hot.read();
            (hot.log_stem.clone(), hot.log_path.clone())
        };

        let size_kb = codec::io::file_size_kb(&log_path)?;
        if size_kb < self.max_file_size_kb {
            return Ok(());
        }

        codec::io::rename_file(&log_path, self.data_file_path(&log_stem))?;
        debug!(stem = %log_stem, size_kb, "rolled the current log into a sealed data file");

        {
            let mut sealed = self.sealed.write();
            sealed.push(log_stem);
            sealed.sort();
        }

        let (new_stem, new_path) = self.create_new_log()?;
        let mut hot = self.hot.write();
        hot.memtable.clear();
        hot.log_stem = new_stem;
        hot.log_path = new_path;
        Ok(())
    }
}
