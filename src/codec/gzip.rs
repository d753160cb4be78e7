//!
//! Gzip implementation of [`TableCodec`].
//!
//! Same canonical payload as [`ZlibCodec`](super::ZlibCodec), wrapped in
//! gzip framing (10-byte header, CRC-32 and length trailer). Use it to
//! exchange tokens with services that compress ACLs with a stock gzip
//! stream. Tokens from the two codecs are not interchangeable.

use std::io::Write;

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;

use super::{
    from_canonical_json, from_transport, read_limited, to_canonical_json, to_transport, TableCodec,
    DEFAULT_LEVEL, DEFAULT_MAX_DECODED_BYTES,
};
use crate::error::{DecodeError, EncodeError};
use crate::primitives::CompiledTable;

/// Codec for peers that expect a stock gzip stream. Its framing costs 12 bytes
/// more than [`ZlibCodec`](super::ZlibCodec) before base64.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GzipCodec {
    level: Compression,
    max_decoded_bytes: usize,
}

impl GzipCodec {
    /// `level` uses the same 0 to 9 scale as zlib. Decoding gives up with
    /// [`DecodeError::TooLarge`] past `max_decoded_bytes` of JSON.
    pub fn new(level: u32, max_decoded_bytes: usize) -> Self {
        GzipCodec {
            level: Compression::new(level),
            max_decoded_bytes,
        }
    }

    pub fn max_decoded_bytes(&self) -> usize {
        self.max_decoded_bytes
    }
}

impl Default for GzipCodec {
    fn default() -> Self {
        GzipCodec::new(DEFAULT_LEVEL, DEFAULT_MAX_DECODED_BYTES)
    }
}

impl TableCodec for GzipCodec {
    fn encode(&self, table: &CompiledTable) -> Result<String, EncodeError> {
        let json = to_canonical_json(table)?;
        let mut encoder = GzEncoder::new(Vec::with_capacity(json.len() / 2), self.level);
        encoder.write_all(&json)?;
        let compressed = encoder.finish()?;
        let token = to_transport(&compressed);
        tracing::debug!(
            codec = "gzip",
            json_bytes = json.len(),
            token_bytes = token.len(),
            "Encoded ACL table"
        );
        Ok(token)
    }

    fn decode(&self, token: &str) -> Result<CompiledTable, DecodeError> {
        let compressed = from_transport(token)?;
        let json = read_limited(GzDecoder::new(&compressed[..]), self.max_decoded_bytes)?;
        Ok(from_canonical_json(&json)?)
    }
}
