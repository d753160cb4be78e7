//!
//! Compact codec for compiled tables.
//!
//! A token is built in three steps:
//! 1. the table is written in a canonical JSON form (paths sorted, each
//!    entry `{"methods": [..], "ids": [..]}` with sorted members),
//! 2. the JSON is compressed (zlib or gzip framing),
//! 3. the compressed bytes are encoded as URL-safe base64 without padding.
//!
//! Decoding reverses each step and fails with a [`DecodeError`] rather than
//! returning a partial table. Structurally equal tables always produce the
//! same token for a given codec.
//!
//! Tokens carry no integrity protection. Anything handed to an untrusted
//! party must be protected by the caller, e.g. inside a signed token.

use std::collections::hash_map::Entry;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;
use std::io::Read;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use serde::de::{self, Deserialize, Deserializer, MapAccess, Visitor};

use crate::error::{DecodeError, EncodeError};
use crate::primitives::{CompiledEntry, CompiledTable};

/// Default cap on the decompressed size of a token.
pub const DEFAULT_MAX_DECODED_BYTES: usize = 8 * 1024 * 1024;

/// Default compression level (zlib scale, 0-9).
pub const DEFAULT_LEVEL: u32 = 6;

/// Trait for codecs that turn a [`CompiledTable`] into a transport-safe token and back.
///
/// Implementations must satisfy `decode(encode(t)) == t` for every table `t`.
pub trait TableCodec: Send + Sync + std::fmt::Debug {
    /// Serializes, compresses, and text-encodes `table`.
    fn encode(&self, table: &CompiledTable) -> Result<String, EncodeError>;

    /// Reverses [`encode`](TableCodec::encode).
    ///
    /// # Returns
    /// The reconstructed table, or a `DecodeError` naming the stage that failed.
    fn decode(&self, token: &str) -> Result<CompiledTable, DecodeError>;
}

// Module for the zlib codec (default)
pub mod zlib;

pub use zlib::ZlibCodec;

// Module for the gzip codec
pub mod gzip;

pub use gzip::GzipCodec;

/// Encodes `table` with the default [`ZlibCodec`].
pub fn encode(table: &CompiledTable) -> Result<String, EncodeError> {
    ZlibCodec::default().encode(table)
}

/// Decodes a token produced by [`encode`].
pub fn decode(token: &str) -> Result<CompiledTable, DecodeError> {
    ZlibCodec::default().decode(token)
}

// --- Canonical representation -------------------------------------------------

#[derive(serde::Serialize)]
struct CanonicalEntryRef<'a> {
    methods: Vec<&'a str>,
    ids: Vec<&'a str>,
}

#[derive(serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct CanonicalEntry {
    #[serde(deserialize_with = "unique_members")]
    methods: HashSet<String>,
    #[serde(deserialize_with = "unique_members")]
    ids: HashSet<String>,
}

/// A list that must not name the same member twice.
fn unique_members<'de, D: Deserializer<'de>>(deserializer: D) -> Result<HashSet<String>, D::Error> {
    let members = Vec::<String>::deserialize(deserializer)?;
    let count = members.len();
    let set: HashSet<String> = members.into_iter().collect();
    if set.len() != count {
        return Err(de::Error::custom("list repeats a member"));
    }
    Ok(set)
}

/// Path map of a token. Each path appears once.
struct CanonicalTable(HashMap<String, CompiledEntry>);

impl<'de> Deserialize<'de> for CanonicalTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TableVisitor;

        impl<'de> Visitor<'de> for TableVisitor {
            type Value = CanonicalTable;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map from paths to {methods, ids} entries")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut entries = HashMap::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((path, entry)) = map.next_entry::<String, CanonicalEntry>()? {
                    match entries.entry(path) {
                        Entry::Occupied(slot) => {
                            return Err(de::Error::custom(format_args!(
                                "duplicate path `{}`",
                                slot.key()
                            )));
                        }
                        Entry::Vacant(slot) => {
                            slot.insert(CompiledEntry::new(entry.methods, entry.ids));
                        }
                    }
                }
                Ok(CanonicalTable(entries))
            }
        }

        deserializer.deserialize_map(TableVisitor)
    }
}

fn sorted(set: &HashSet<String>) -> Vec<&str> {
    let mut items: Vec<&str> = set.iter().map(String::as_str).collect();
    items.sort_unstable();
    items
}

pub(crate) fn to_canonical_json(table: &CompiledTable) -> Result<Vec<u8>, serde_json::Error> {
    let canonical: BTreeMap<&str, CanonicalEntryRef<'_>> = table
        .iter()
        .map(|(path, entry)| {
            (
                path,
                CanonicalEntryRef {
                    methods: sorted(entry.methods()),
                    ids: sorted(entry.ids()),
                },
            )
        })
        .collect();
    serde_json::to_vec(&canonical)
}

pub(crate) fn from_canonical_json(bytes: &[u8]) -> Result<CompiledTable, serde_json::Error> {
    let CanonicalTable(entries) = serde_json::from_slice(bytes)?;
    Ok(CompiledTable::from_entries(entries))
}

// --- Transport alphabet ---------------------------------------------------------

pub(crate) fn to_transport(bytes: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}

pub(crate) fn from_transport(token: &str) -> Result<Vec<u8>, DecodeError> {
    Ok(URL_SAFE_NO_PAD.decode(token)?)
}

/// Reads a decompressing reader to the end, refusing to go past `limit` bytes.
pub(crate) fn read_limited<R: Read>(reader: R, limit: usize) -> Result<Vec<u8>, DecodeError> {
    let mut out = Vec::new();
    reader
        .take((limit as u64).saturating_add(1))
        .read_to_end(&mut out)
        .map_err(DecodeError::Decompress)?;
    if out.len() > limit {
        return Err(DecodeError::TooLarge { limit });
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::compile;
    use crate::types::{RawEntry, RawGrants};

    fn sample() -> CompiledTable {
        let mut raw = RawGrants::new();
        raw.insert(
            "gw/devices".to_string(),
            RawEntry::methods(["GET", "DELETE"]).with_ids(["id2", "id1"]).into(),
        );
        raw.insert("gw/geofences".to_string(), RawEntry::methods(["GET"]).into());
        compile(&raw)
    }

    #[test]
    fn test_canonical_json_is_sorted() {
        let json = to_canonical_json(&sample()).unwrap();
        assert_eq!(
            String::from_utf8(json).unwrap(),
            r#"{"gw/devices":{"methods":["DELETE","GET"],"ids":["id1","id2"]},"gw/geofences":{"methods":["GET"],"ids":[]}}"#
        );
    }

    #[test]
    fn test_canonical_json_round_trip() {
        let table = sample();
        let json = to_canonical_json(&table).unwrap();
        assert_eq!(from_canonical_json(&json).unwrap(), table);
    }

    #[test]
    fn test_canonical_json_rejects_other_shapes() {
        for bad in [
            r#"[]"#,
            r#"{"gw/devices":["GET"]}"#,
            r#"{"gw/devices":{"methods":["GET"]}}"#,
            r#"{"gw/devices":{"methods":["GET"],"ids":[],"extra":1}}"#,
            r#"{"gw/devices":{"methods":[1],"ids":[]}}"#,
            r#"{"gw/devices":{"methods":[],"ids":[]}} trailing"#,
        ] {
            assert!(from_canonical_json(bad.as_bytes()).is_err(), "accepted {bad}");
        }
    }

    #[test]
    fn test_canonical_json_rejects_duplicate_paths() {
        // The later, unrestricted entry must not replace the restricted one.
        let json = br#"{"p":{"methods":["GET"],"ids":["a"]},"p":{"methods":["GET"],"ids":[]}}"#;
        let err = from_canonical_json(json).unwrap_err();
        assert!(err.to_string().contains("duplicate path `p`"), "{err}");
    }

    #[test]
    fn test_canonical_json_rejects_repeated_members() {
        for bad in [
            r#"{"p":{"methods":["GET","GET"],"ids":[]}}"#,
            r#"{"p":{"methods":["GET"],"ids":["a","b","a"]}}"#,
        ] {
            assert!(from_canonical_json(bad.as_bytes()).is_err(), "accepted {bad}");
        }
    }

    #[test]
    fn test_free_functions_use_zlib() {
        let table = sample();
        let token = encode(&table).unwrap();
        assert_eq!(token, ZlibCodec::default().encode(&table).unwrap());
        assert_eq!(decode(&token).unwrap(), table);
    }

    #[test]
    fn test_transport_rejects_foreign_alphabet() {
        assert!(matches!(from_transport("abc+/"), Err(DecodeError::Transport(_))));
        assert!(matches!(from_transport("abcd=="), Err(DecodeError::Transport(_))));
        assert!(matches!(from_transport("a b"), Err(DecodeError::Transport(_))));
    }

    #[test]
    fn test_read_limited_enforces_limit() {
        let data = vec![b'x'; 64];
        assert_eq!(read_limited(&data[..], 64).unwrap().len(), 64);
        assert!(matches!(
            read_limited(&data[..], 63),
            Err(DecodeError::TooLarge { limit: 63 })
        ));
    }
}
