use std::fs;

use super::helpers::{open_store, seed_sample_db};
use crate::StoreError;
use codec::encode_pair;
use tempfile::tempdir;

#[test]
fn get_missing_key_is_not_found() {
    let dir = tempdir().unwrap();
    let store = open_store(dir.path());

    match store.get("nope") {
        Err(StoreError::NotFound { key }) => assert_eq!(key, "nope"),
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[test]
fn get_newly_set_key_hits_the_memtable() {
    let dir = tempdir().unwrap();
    let store = open_store(dir.path());
    store.set("hello", "world").unwrap();

    // Remove every file; a hot read must not touch the disk.
    fs::remove_dir_all(dir.path()).unwrap();

    assert_eq!(store.get("hello").unwrap(), "world");
}

#[test]
fn get_old_key_loads_its_sealed_file() {
    let dir = tempdir().unwrap();
    seed_sample_db(dir.path());
    let store = open_store(dir.path());

    assert_eq!(store.get("cow").unwrap(), "500 months");
    assert_eq!(store.get("dog").unwrap(), "23 months");
}

#[test]
fn get_old_key_again_is_served_from_the_cache() {
    let dir = tempdir().unwrap();
    seed_sample_db(dir.path());
    let store = open_store(dir.path());

    assert_eq!(store.get("cow").unwrap(), "500 months");

    // Remove the files; the cached window must keep answering.
    fs::remove_dir_all(dir.path()).unwrap();

    assert_eq!(store.get("cow").unwrap(), "500 months");
}

#[test]
fn get_key_from_seeded_log_hits_the_memtable() {
    let dir = tempdir().unwrap();
    seed_sample_db(dir.path());
    let store = open_store(dir.path());

    assert_eq!(store.get("goat").unwrap(), "678 months");
    assert_eq!(store.get("hen").unwrap(), "567 months");
    assert_eq!(store.get("pig").unwrap(), "70 months");
}

#[test]
fn reads_do_not_mutate_visible_state() {
    let dir = tempdir().unwrap();
    seed_sample_db(dir.path());
    let store = open_store(dir.path());

    let before = store.key_count();
    let _ = store.get("cow");
    let _ = store.get("ghost");
    assert_eq!(store.key_count(), before);
}

// --------------------- corruption detection ---------------------

#[test]
fn indexed_key_missing_from_memtable_is_corrupted() {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path()).unwrap();

    // The log is empty but the index claims a key newer than the log stem.
    fs::write(dir.path().join("1655375171402014000.log"), "").unwrap();
    fs::write(
        dir.path().join("index.idx"),
        encode_pair("ghost", "1655404770518678-ghost"),
    )
    .unwrap();
    fs::write(dir.path().join("delete.del"), "").unwrap();

    let store = open_store(dir.path());
    assert!(matches!(
        store.get("ghost"),
        Err(StoreError::Corrupted { .. })
    ));
}

#[test]
fn indexed_key_missing_from_its_data_file_is_corrupted() {
    let dir = tempdir().unwrap();
    seed_sample_db(dir.path());

    // Claim a key inside the first sealed window that the file lacks.
    let mut idx = fs::read_to_string(dir.path().join("index.idx")).unwrap();
    idx.push_str(&encode_pair("ghost", "1655375120328185500-ghost"));
    fs::write(dir.path().join("index.idx"), idx).unwrap();

    let store = open_store(dir.path());
    assert!(matches!(
        store.get("ghost"),
        Err(StoreError::Corrupted { .. })
    ));
}

#[test]
fn indexed_key_below_every_file_window_is_corrupted() {
    let dir = tempdir().unwrap();
    seed_sample_db(dir.path());

    // A timestamped key older than the oldest data file cannot exist.
    let mut idx = fs::read_to_string(dir.path().join("index.idx")).unwrap();
    idx.push_str(&encode_pair("relic", "0000000000000000000-relic"));
    fs::write(dir.path().join("index.idx"), idx).unwrap();

    let store = open_store(dir.path());
    assert!(matches!(
        store.get("relic"),
        Err(StoreError::Corrupted { .. })
    ));
}

// --------------------- window routing ---------------------

#[test]
fn keys_from_different_sealed_files_load_their_own_windows() {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path()).unwrap();

    fs::write(
        dir.path().join("1655375120328185000.cky"),
        encode_pair("1655375120328185000-cow", "500 months"),
    )
    .unwrap();
    fs::write(
        dir.path().join("1655375120328186000.cky"),
        encode_pair("1655375120328186000-bar", "foo"),
    )
    .unwrap();
    fs::write(dir.path().join("1655375171402014000.log"), "").unwrap();
    let index = [
        encode_pair("cow", "1655375120328185000-cow"),
        encode_pair("bar", "1655375120328186000-bar"),
    ]
    .concat();
    fs::write(dir.path().join("index.idx"), index).unwrap();
    fs::write(dir.path().join("delete.del"), "").unwrap();

    let store = open_store(dir.path());

    // Each read swaps the cache onto a different sealed file.
    assert_eq!(store.get("cow").unwrap(), "500 months");
    assert_eq!(store.get("bar").unwrap(), "foo");
    assert_eq!(store.get("cow").unwrap(), "500 months");
}

#[test]
fn vacuumed_pending_deletion_never_resurfaces() {
    let dir = tempdir().unwrap();
    seed_sample_db(dir.path());
    let store = open_store(dir.path());

    // `foo` and `bar` were pending deletion when the store loaded; their
    // index records are already gone from the seeded index.
    assert!(matches!(store.get("foo"), Err(StoreError::NotFound { .. })));
    assert!(matches!(store.get("bar"), Err(StoreError::NotFound { .. })));

    // And their bytes are gone from the files.
    let log = fs::read_to_string(dir.path().join("1655375171402014000.log")).unwrap();
    assert!(!log.contains("-foo"));
    let second = fs::read_to_string(dir.path().join("1655375120328186000.cky")).unwrap();
    assert!(!second.contains("-bar"));
}
