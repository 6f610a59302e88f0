use std::fs;
use std::path::Path;

use codec::{encode_pair, encode_token};

use crate::Store;

/// Opens a store with a threshold high enough that nothing rolls over.
pub fn open_store(dir: &Path) -> Store {
    Store::open(dir, 1024.0).unwrap()
}

/// Seeds `db_path` with a small pre-built database: two sealed data
/// files, a log, an index covering the live keys, and two pending
/// deletions (`foo` in the log, `bar` alone in the second data file).
pub fn seed_sample_db(db_path: &Path) {
    fs::create_dir_all(db_path).unwrap();

    let first_cky = [
        encode_pair("1655375120328185000-cow", "500 months"),
        encode_pair("1655375120328185100-dog", "23 months"),
    ]
    .concat();
    fs::write(db_path.join("1655375120328185000.cky"), first_cky).unwrap();

    let second_cky = encode_pair("1655375171402014000-bar", "foo");
    fs::write(db_path.join("1655375120328186000.cky"), second_cky).unwrap();

    let log = [
        encode_pair("1655404770518678-goat", "678 months"),
        encode_pair("1655404670510698-hen", "567 months"),
        encode_pair("1655404770534578-pig", "70 months"),
        encode_pair("1655403775538278-fish", "8990 months"),
        encode_pair("1655403795838278-foo", "890 months"),
    ]
    .concat();
    fs::write(db_path.join("1655375171402014000.log"), log).unwrap();

    let del = [
        encode_token("1655403795838278-foo"),
        encode_token("1655375171402014000-bar"),
    ]
    .concat();
    fs::write(db_path.join("delete.del"), del).unwrap();

    let index = [
        encode_pair("cow", "1655375120328185000-cow"),
        encode_pair("dog", "1655375120328185100-dog"),
        encode_pair("goat", "1655404770518678-goat"),
        encode_pair("hen", "1655404670510698-hen"),
        encode_pair("pig", "1655404770534578-pig"),
        encode_pair("fish", "1655403775538278-fish"),
    ]
    .concat();
    fs::write(db_path.join("index.idx"), index).unwrap();
}

/// Reads the concatenated contents of every file in `dir` carrying the
/// exact extension `ext`.
pub fn read_files_with_ext(dir: &Path, ext: &str) -> Vec<String> {
    let mut contents = Vec::new();
    for entry in fs::read_dir(dir).unwrap() {
        let path = entry.unwrap().path();
        if path.extension().map(|e| e == ext).unwrap_or(false) {
            contents.push(fs::read_to_string(path).unwrap());
        }
    }
    contents
}

/// Counts files in `dir` carrying the exact extension `ext`.
pub fn count_files_with_ext(dir: &Path, ext: &str) -> usize {
    fs::read_dir(dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| {
            e.path()
                .extension()
                .and_then(|s| s.to_str())
                .map(|e| e == ext)
                .unwrap_or(false)
        })
        .count()
}
