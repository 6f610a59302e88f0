//! Read path: `get()` and sealed-file window location.
//!
//! Point lookups resolve the user key through the index, then route by
//! timestamp: keys at or after the current log stem are served from the
//! memtable under a brief read lock; older keys go through the cache,
//! loading the containing sealed file on a window miss. The cache lock is
//! held from miss-detection through the read, so concurrent cold readers
//! always observe a fully loaded window.

use crate::error::{Result, StoreError};
use crate::Store;

impl Store {
    /// Retrieves the value for `key`.
    ///
    /// # Errors
    ///
    /// - [`StoreError::NotFound`] if the key is absent from the index.
    /// - [`StoreError::Corrupted`] if the index points at a timestamped
    ///   key that its memtable or data file does not contain.
    /// - [`StoreError::Io`] if loading a sealed file fails.
    pub fn get(&self, key: &str) -> Result<String> {
        let timestamped_key = self
            .index
            .lookup(key)
            .ok_or_else(|| StoreError::not_found(key))?;

        // Hot branch: the key lives in the current log's memtable.
        {
            let hot = self.hot.read();
            if timestamped_key.as_str() >= hot.log_stem.as_str() {
                return hot.memtable.get(&timestamped_key).cloned().ok_or_else(|| {
                    StoreError::corrupted(format!(
                        "{timestamped_key} is indexed but missing from the memtable"
                    ))
                });
            }
        }

        // Cold branch: serve from the cache, loading its window first if
        // the key falls outside it.
        let mut cache = self.cache.lock();
        if !cache.contains(&timestamped_key) {
            let (start, end) = self.locate_window(&timestamped_key)?;
            let content = codec::io::read_file(self.data_file_path(&start))?;
            cache.load(start, end, codec::decode_pairs(&content)?);
        }

        cache.get(&timestamped_key).cloned().ok_or_else(|| {
            StoreError::corrupted(format!(
                "{timestamped_key} is indexed but missing from its data file"
            ))
        })
    }

    /// Finds the sealed file containing `timestamped_key` and its window.
    ///
    /// Walks the sorted sequence of data-file stems followed by the
    /// current log stem and returns the pair `(stem, next stem)` of the
    /// first window whose upper bound exceeds the key. Every timestamped
    /// key issued by this engine is at or after the stem of the file that
    /// was the open log at its creation, so a key below every stem means
    /// the directory and the index disagree.
    pub(crate) fn locate_window(&self, timestamped_key: &str) -> Result<(String, String)> {
        let mut stems = self.sealed.read().clone();
        stems.push(self.hot.read().log_stem.clone());

        for i in 1..stems.len() {
            if stems[i].as_str() > timestamped_key {
                return Ok((stems[i - 1].clone(), stems[i].clone()));
            }
        }

        Err(StoreError::corrupted(format!(
            "no data file contains {timestamped_key}"
        )))
    }
}
