//! # Codec — the ckydb on-disk record format
//!
//! Every ckydb file is a flat sequence of records separated by a literal
//! token string. Key-carrying files (`.idx`, `.log`, `.cky`) additionally
//! split each record into a key half and a value half:
//!
//! ```text
//! .idx / .log / .cky:   ( <key> KV <value> TOKEN )*
//! .del:                 ( <timestamped-key> TOKEN )*
//!
//! TOKEN = "$%#@*&^&"    record terminator
//! KV    = "><?&(^#"     key-value separator
//! ```
//!
//! A trailing `TOKEN` (or none at all) is accepted on decode. No escaping
//! is performed — keys and values containing either separator produce
//! undefined record boundaries, which is a documented limitation of the
//! format rather than something the decoder can detect.
//!
//! Decoding returns records in file order so that re-encoding a decoded
//! file reproduces it byte for byte (up to the trailing terminator).
//!
//! The [`io`] module carries the handful of filesystem primitives the
//! store needs: whole-file overwrite, append, create-if-missing, rename,
//! directory listing, and size queries. Files are opened per call and
//! closed on scope exit.

mod format;
pub mod io;

pub use format::{
    decode_pairs, decode_tokens, encode_pair, encode_pairs, encode_token, CodecError,
    KEY_VALUE_SEPARATOR, TOKEN_SEPARATOR,
};
