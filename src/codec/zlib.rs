//!
//! Zlib implementation of [`TableCodec`]: DEFLATE with an Adler-32 trailer.

use std::io::Write;

use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;

use super::{
    from_canonical_json, from_transport, read_limited, to_canonical_json, to_transport, TableCodec,
    DEFAULT_LEVEL, DEFAULT_MAX_DECODED_BYTES,
};
use crate::error::{DecodeError, EncodeError};
use crate::primitives::CompiledTable;

/// Default codec. Produces the smallest tokens of the bundled codecs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZlibCodec {
    level: Compression,
    max_decoded_bytes: usize,
}

impl ZlibCodec {
    /// `level` is on the usual 0 (store) to 9 (best) scale.
    pub fn new(level: u32, max_decoded_bytes: usize) -> Self {
        ZlibCodec {
            level: Compression::new(level),
            max_decoded_bytes,
        }
    }

    pub fn max_decoded_bytes(&self) -> usize {
        self.max_decoded_bytes
    }
}

impl Default for ZlibCodec {
    fn default() -> Self {
        ZlibCodec::new(DEFAULT_LEVEL, DEFAULT_MAX_DECODED_BYTES)
    }
}

impl TableCodec for ZlibCodec {
    fn encode(&self, table: &CompiledTable) -> Result<String, EncodeError> {
        let json = to_canonical_json(table)?;
        let mut encoder = ZlibEncoder::new(Vec::with_capacity(json.len() / 2), self.level);
        encoder.write_all(&json)?;
        let compressed = encoder.finish()?;
        let token = to_transport(&compressed);
        tracing::debug!(
            codec = "zlib",
            json_bytes = json.len(),
            token_bytes = token.len(),
            "Encoded ACL table"
        );
        Ok(token)
    }

    fn decode(&self, token: &str) -> Result<CompiledTable, DecodeError> {
        let compressed = from_transport(token)?;
        let json = read_limited(ZlibDecoder::new(&compressed[..]), self.max_decoded_bytes)?;
        Ok(from_canonical_json(&json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::compile;
    use crate::types::{RawEntry, RawGrants};

    fn device_table(ids: usize) -> CompiledTable {
        let mut raw = RawGrants::new();
        raw.insert(
            "gw/devices".to_string(),
            RawEntry::methods(["GET", "POST", "PUT", "DELETE"])
                .with_ids((0..ids).map(|i| format!("60050{:02}", i)))
                .into(),
        );
        raw.insert("mqtt".to_string(), RawEntry::methods(["subscribe", "publish"]).into());
        compile(&raw)
    }

    #[test]
    fn test_round_trip() {
        let codec = ZlibCodec::default();
        let table = device_table(40);
        let token = codec.encode(&table).unwrap();
        assert_eq!(codec.decode(&token).unwrap(), table);
    }

    #[test]
    fn test_token_is_smaller_than_canonical_json() {
        let table = device_table(80);
        let json = to_canonical_json(&table).unwrap();
        let token = ZlibCodec::default().encode(&table).unwrap();
        assert!(token.len() < json.len(), "{} >= {}", token.len(), json.len());
    }

    #[test]
    fn test_every_level_round_trips() {
        let table = device_table(10);
        for level in 0..=9 {
            let codec = ZlibCodec::new(level, DEFAULT_MAX_DECODED_BYTES);
            assert_eq!(codec.decode(&codec.encode(&table).unwrap()).unwrap(), table);
        }
    }

    #[test]
    fn test_corrupt_payload_is_rejected() {
        let codec = ZlibCodec::default();
        let mut bytes = from_transport(&codec.encode(&device_table(20)).unwrap()).unwrap();
        // Clobber the zlib header so the stream cannot be parsed.
        bytes[0] = 0xFF;
        bytes[1] = 0xFF;
        let result = codec.decode(&to_transport(&bytes));
        assert!(matches!(result, Err(DecodeError::Decompress(_))), "{result:?}");
    }

    #[test]
    fn test_truncated_payload_is_rejected() {
        let codec = ZlibCodec::default();
        let token = codec.encode(&device_table(20)).unwrap();
        let bytes = from_transport(&token).unwrap();
        let truncated = to_transport(&bytes[..bytes.len() / 2]);
        assert!(codec.decode(&truncated).is_err());
    }

    #[test]
    fn test_decoded_size_limit() {
        let table = device_table(50);
        let token = ZlibCodec::default().encode(&table).unwrap();
        let tight = ZlibCodec::new(DEFAULT_LEVEL, 16);
        assert!(matches!(tight.decode(&token), Err(DecodeError::TooLarge { limit: 16 })));
    }

    #[test]
    fn test_uncompressed_json_is_not_a_token() {
        let json = to_canonical_json(&device_table(2)).unwrap();
        let result = ZlibCodec::default().decode(&to_transport(&json));
        assert!(matches!(result, Err(DecodeError::Decompress(_))), "{result:?}");
    }
}
