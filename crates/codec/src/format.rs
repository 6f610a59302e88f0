use thiserror::Error;

/// Record terminator. Every record on disk ends with this string.
pub const TOKEN_SEPARATOR: &str = "$%#@*&^&";

/// Key-value separator within a record of a `.idx`, `.log` or `.cky` file.
pub const KEY_VALUE_SEPARATOR: &str = "><?&(^#";

/// Errors produced while decoding a ckydb file.
#[derive(Debug, Error)]
pub enum CodecError {
    /// An underlying I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A record did not split into exactly a key half and a value half.
    #[error("record not split into key and value: {record:?}")]
    Corrupt {
        /// The offending record text, for diagnostics.
        record: String,
    },
}

/// Splits `content` into records, tolerating a trailing terminator.
///
/// Empty content (or content that is nothing but terminators) yields an
/// empty vector.
pub fn decode_tokens(content: &str) -> Vec<String> {
    let trimmed = content.trim_end_matches(TOKEN_SEPARATOR);
    if trimmed.is_empty() {
        return Vec::new();
    }

    trimmed.split(TOKEN_SEPARATOR).map(String::from).collect()
}

/// Decodes a key-carrying file into `(key, value)` pairs in file order.
///
/// # Errors
///
/// Returns [`CodecError::Corrupt`] if any record does not contain exactly
/// one [`KEY_VALUE_SEPARATOR`].
pub fn decode_pairs(content: &str) -> Result<Vec<(String, String)>, CodecError> {
    let records = decode_tokens(content);
    let mut pairs = Vec::with_capacity(records.len());

    for record in records {
        let halves: Vec<&str> = record.split(KEY_VALUE_SEPARATOR).collect();
        if halves.len() != 2 {
            return Err(CodecError::Corrupt { record });
        }
        pairs.push((halves[0].to_string(), halves[1].to_string()));
    }

    Ok(pairs)
}

/// Encodes a single `(key, value)` record, terminator included.
pub fn encode_pair(key: &str, value: &str) -> String {
    format!("{key}{KEY_VALUE_SEPARATOR}{value}{TOKEN_SEPARATOR}")
}

/// Encodes a single bare token record, terminator included.
pub fn encode_token(token: &str) -> String {
    format!("{token}{TOKEN_SEPARATOR}")
}

/// Encodes `(key, value)` pairs in iteration order.
///
/// The inverse of [`decode_pairs`]: decoding the result yields the same
/// pairs in the same order.
pub fn encode_pairs<I, K, V>(pairs: I) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut out = String::new();
    for (key, value) in pairs {
        out.push_str(key.as_ref());
        out.push_str(KEY_VALUE_SEPARATOR);
        out.push_str(value.as_ref());
        out.push_str(TOKEN_SEPARATOR);
    }
    out
}
