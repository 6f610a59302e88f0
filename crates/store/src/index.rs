//! # Index - user key to timestamped key mapping
//!
//! The index answers "which timestamped key currently stands for this
//! user key" and is the single source of visibility: a user key exists
//! exactly when the in-memory map holds it.
//!
//! ## File format
//!
//! `index.idx` is a flat record file:
//!
//! ```text
//! <user key> KV <timestamped key> TOKEN
//! ```
//!
//! New keys are appended; removals rewrite the file with the key's record
//! omitted, preserving the order of everything else. The in-memory map is
//! a faithful projection of the file after every successful operation.
//!
//! ## Split file/memory steps
//!
//! The store orders durability against visibility differently per
//! operation (`set` publishes the key in memory last, `delete` forgets it
//! in memory last), so the file step and the memory step are separate
//! methods: [`Index::append_record`] / [`Index::strip_record`] touch the
//! file, [`Index::publish`] / [`Index::forget`] touch the map.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;

use crate::error::Result;
use crate::vacuum::strip_keys_from_file;

pub(crate) struct Index {
    path: PathBuf,
    map: RwLock<HashMap<String, String>>,
}

impl Index {
    pub(crate) fn new(path: PathBuf) -> Self {
        Self {
            path,
            map: RwLock::new(HashMap::new()),
        }
    }

    /// Replaces the in-memory map with the decoded contents of the index
    /// file.
    pub(crate) fn load(&self) -> Result<()> {
        let content = codec::io::read_file(&self.path)?;
        let pairs = codec::decode_pairs(&content)?;
        *self.map.write() = pairs.into_iter().collect();
        Ok(())
    }

    /// Empties the in-memory map. The file is removed separately as part
    /// of clearing the whole database directory.
    pub(crate) fn reset(&self) {
        self.map.write().clear();
    }

    /// Returns the timestamped key for `key`, if the key is visible.
    pub(crate) fn lookup(&self, key: &str) -> Option<String> {
        self.map.read().get(key).cloned()
    }

    /// Appends a `(key, timestamped key)` record to the index file. The
    /// in-memory map is untouched; callers publish separately once the
    /// value is durable.
    pub(crate) fn append_record(&self, key: &str, timestamped_key: &str) -> Result<()> {
        let record = codec::encode_pair(key, timestamped_key);
        codec::io::append_to_file(&self.path, &record)?;
        Ok(())
    }

    /// Makes `key` visible to readers.
    pub(crate) fn publish(&self, key: &str, timestamped_key: &str) {
        self.map
            .write()
            .insert(key.to_string(), timestamped_key.to_string());
    }

    /// Rewrites the index file with the record for `key` omitted. The
    /// in-memory map is untouched.
    pub(crate) fn strip_record(&self, key: &str) -> Result<()> {
        let keys = [key.to_string()];
        strip_keys_from_file(&self.path, &keys)?;
        Ok(())
    }

    /// Removes `key` from the in-memory map, hiding it from readers.
    pub(crate) fn forget(&self, key: &str) {
        self.map.write().remove(key);
    }

    pub(crate) fn len(&self) -> usize {
        self.map.read().len()
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }
}
