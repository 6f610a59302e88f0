use std::collections::BTreeMap;

/// In-memory mirror of exactly one sealed data file.
///
/// Holds the decoded contents of the `.cky` file whose timestamp stem is
/// `start`, together with the half-open window `[start, end)` of
/// timestamped keys that file can contain. `end` is the stem of the next
/// data file in sorted order, or the current log's stem when the cached
/// file is the newest sealed one.
///
/// A timestamped key `k` belongs to this cache iff `start <= k < end`
/// (plain lexicographic comparison — timestamp stems and timestamped keys
/// share the same fixed-width nanosecond prefix).
///
/// The freshly-constructed cache uses the sentinel window `["0", "0")`,
/// which contains no real key, so the first cold read always misses and
/// loads from disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cache {
    map: BTreeMap<String, String>,
    start: String,
    end: String,
}

impl Cache {
    /// Creates the sentinel cache: empty window, empty map.
    pub fn new() -> Self {
        Self {
            map: BTreeMap::new(),
            start: "0".to_string(),
            end: "0".to_string(),
        }
    }

    /// Replaces the window and contents in one step.
    pub fn load(&mut self, start: String, end: String, pairs: Vec<(String, String)>) {
        self.map = pairs.into_iter().collect();
        self.start = start;
        self.end = end;
    }

    /// Resets back to the sentinel state.
    pub fn reset(&mut self) {
        self.map.clear();
        self.start = "0".to_string();
        self.end = "0".to_string();
    }

    /// Whether `timestamped_key` falls inside the cached window.
    pub fn contains(&self, timestamped_key: &str) -> bool {
        self.start.as_str() <= timestamped_key && timestamped_key < self.end.as_str()
    }

    pub fn get(&self, timestamped_key: &str) -> Option<&String> {
        self.map.get(timestamped_key)
    }

    /// Inserts or overwrites a value, returning the previous one if any.
    pub fn put(&mut self, timestamped_key: String, value: String) -> Option<String> {
        self.map.insert(timestamped_key, value)
    }

    /// Removes an entry, returning its value if it was present.
    pub fn remove(&mut self, timestamped_key: &str) -> Option<String> {
        self.map.remove(timestamped_key)
    }

    /// Timestamp stem of the cached data file.
    pub fn start(&self) -> &str {
        &self.start
    }

    /// Exclusive upper bound of the cached window.
    pub fn end(&self) -> &str {
        &self.end
    }

    /// Ordered iterator over `(timestamped key, value)` entries.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.map.iter()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl Default for Cache {
    fn default() -> Self {
        Self::new()
    }
}
