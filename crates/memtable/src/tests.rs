use super::*;

// -------------------- Basic CRUD --------------------

#[test]
fn insert_and_get_single_key() {
    let mut m = Memtable::new();
    m.insert("1655404770518678-goat".to_string(), "678 months".to_string());
    assert_eq!(m.len(), 1);
    assert_eq!(m.get("1655404770518678-goat").unwrap(), "678 months");
}

#[test]
fn insert_overwrites_and_returns_old_value() {
    let mut m = Memtable::new();
    m.insert("k".to_string(), "v1".to_string());
    let old = m.insert("k".to_string(), "v2".to_string());
    assert_eq!(old, Some("v1".to_string()));
    assert_eq!(m.get("k").unwrap(), "v2");
    assert_eq!(m.len(), 1);
}

#[test]
fn get_missing_key_returns_none() {
    let m = Memtable::new();
    assert!(m.get("nonexistent").is_none());
}

#[test]
fn remove_returns_old_value() {
    let mut m = Memtable::new();
    m.insert("k".to_string(), "v".to_string());
    assert_eq!(m.remove("k"), Some("v".to_string()));
    assert_eq!(m.remove("k"), None);
    assert!(m.is_empty());
}

#[test]
fn clear_empties_the_table() {
    let mut m = Memtable::new();
    m.insert("a".to_string(), "1".to_string());
    m.insert("b".to_string(), "2".to_string());
    m.clear();
    assert!(m.is_empty());
    assert!(m.get("a").is_none());
}

// -------------------- Construction / iteration --------------------

#[test]
fn from_pairs_keeps_last_value_for_duplicate_key() {
    let m = Memtable::from_pairs(vec![
        ("k".to_string(), "first".to_string()),
        ("k".to_string(), "second".to_string()),
    ]);
    assert_eq!(m.len(), 1);
    assert_eq!(m.get("k").unwrap(), "second");
}

#[test]
fn iter_yields_keys_in_lexicographic_order() {
    let mut m = Memtable::new();
    m.insert("1655404770534578-pig".to_string(), "70 months".to_string());
    m.insert("1655404670510698-hen".to_string(), "567 months".to_string());
    m.insert("1655404770518678-goat".to_string(), "678 months".to_string());

    let keys: Vec<&String> = m.iter().map(|(k, _)| k).collect();
    assert_eq!(
        keys,
        vec![
            "1655404670510698-hen",
            "1655404770518678-goat",
            "1655404770534578-pig",
        ]
    );
}

#[test]
fn contains_reflects_membership() {
    let mut m = Memtable::new();
    assert!(!m.contains("k"));
    m.insert("k".to_string(), "v".to_string());
    assert!(m.contains("k"));
}

// -------------------- Load test --------------------

#[test]
fn write_load_100k_overwrites() {
    let mut m = Memtable::new();
    for i in 0..100_000u64 {
        let key = format!("16554047705345{:02}-k", i % 100);
        m.insert(key, "x".repeat(16));
    }
    assert_eq!(m.len(), 100);
}
