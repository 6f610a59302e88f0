//! Filesystem primitives for the store.
//!
//! Whole files are the unit of work: the store persists by overwriting a
//! file in full and recovers by reading one in full. Appends are used only
//! for the index and deletion-log files.

use std::fs::{self, OpenOptions};
use std::io::{self, ErrorKind, Write};
use std::path::Path;

/// Reads the entire file at `path` into a string.
pub fn read_file<P: AsRef<Path>>(path: P) -> io::Result<String> {
    fs::read_to_string(path)
}

/// Overwrites the file at `path` with `content`, creating it if absent.
pub fn write_file<P: AsRef<Path>>(path: P, content: &str) -> io::Result<()> {
    fs::write(path, content)
}

/// Appends `content` to the file at `path`, creating it if absent.
pub fn append_to_file<P: AsRef<Path>>(path: P, content: &str) -> io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(content.as_bytes())
}

/// Creates an empty file at `path` if none exists; an existing file is
/// left untouched.
pub fn create_file_if_missing<P: AsRef<Path>>(path: P) -> io::Result<()> {
    match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(_) => Ok(()),
        Err(err) if err.kind() == ErrorKind::AlreadyExists => Ok(()),
        Err(err) => Err(err),
    }
}

/// Renames `from` to `to` (atomic within one filesystem).
pub fn rename_file<P: AsRef<Path>, Q: AsRef<Path>>(from: P, to: Q) -> io::Result<()> {
    fs::rename(from, to)
}

/// Recursively removes `path` and everything below it. A missing path is
/// not an error.
pub fn remove_tree<P: AsRef<Path>>(path: P) -> io::Result<()> {
    match fs::remove_dir_all(path) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
        Err(err) => Err(err),
    }
}

/// Returns the file names (not paths) of every entry in `dir`.
///
/// Entries whose names are not valid UTF-8 are skipped; ckydb never
/// creates such names.
pub fn list_file_names<P: AsRef<Path>>(dir: P) -> io::Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if let Ok(name) = entry.file_name().into_string() {
            names.push(name);
        }
    }
    Ok(names)
}

/// Returns the size of the file at `path` in kilobytes.
pub fn file_size_kb<P: AsRef<Path>>(path: P) -> io::Result<f64> {
    let bytes = fs::metadata(path)?.len();
    Ok(bytes as f64 / 1024.0)
}
