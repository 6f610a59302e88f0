//! Vacuum: physical removal of tombstoned records.
//!
//! `delete()` only unlinks a key from the index and notes its timestamped
//! key in `delete.del`; the value bytes stay behind in their `.log` or
//! `.cky` file. The vacuum pass rewrites those files with every noted
//! record dropped, then truncates `delete.del`. It never touches the
//! in-memory index, memtable or cache — a later cold read simply loads a
//! smaller file.

use std::io;
use std::path::Path;

use tracing::debug;

use crate::error::Result;
use crate::{Store, DEL_FILENAME, INDEX_FILENAME};

impl Store {
    /// Physically removes every record whose timestamped key is listed in
    /// `delete.del`, then truncates `delete.del`.
    ///
    /// Takes the mutation lock for the whole pass so the whole-file
    /// rewrites never interleave with a concurrent `set`'s persist, then
    /// the deletion-log lock so no `delete` can append while the file is
    /// being consumed. A second concurrent invocation waits.
    pub fn vacuum(&self) -> Result<()> {
        let _mutation = self.mutation.lock();
        self.vacuum_files()
    }

    /// The file pass of [`Store::vacuum`], serialised only on the
    /// deletion-log lock. Also invoked during load, where the caller
    /// already has exclusive access to the store.
    pub(crate) fn vacuum_files(&self) -> Result<()> {
        let _del = self.del_lock.lock();

        let del_content = codec::io::read_file(&self.del_path)?;
        let doomed = codec::decode_tokens(&del_content);
        if doomed.is_empty() {
            return Ok(());
        }

        for name in codec::io::list_file_names(&self.db_path)? {
            if name == INDEX_FILENAME || name == DEL_FILENAME {
                continue;
            }
            strip_keys_from_file(&self.db_path.join(&name), &doomed)?;
        }

        codec::io::write_file(&self.del_path, "")?;
        debug!(removed = doomed.len(), "vacuum dropped tombstoned records");
        Ok(())
    }
}

/// Rewrites the record file at `path` with every record whose key half
/// matches one of `keys` removed.
///
/// Records are matched by prefix (`<key><KV separator>`) rather than
/// decoded, so records the file format cannot parse pass through
/// untouched and the relative order of survivors is preserved.
pub(crate) fn strip_keys_from_file(path: &Path, keys: &[String]) -> io::Result<()> {
    let content = codec::io::read_file(path)?;
    let records = codec::decode_tokens(&content);

    let prefixes: Vec<String> = keys
        .iter()
        .map(|key| format!("{key}{}", codec::KEY_VALUE_SEPARATOR))
        .collect();

    let survivors: String = records
        .into_iter()
        .filter(|record| !prefixes.iter().any(|prefix| record.starts_with(prefix)))
        .map(|record| codec::encode_token(&record))
        .collect();

    codec::io::write_file(path, &survivors)
}
