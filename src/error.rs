//!
//! Error types for the ACL engine.
//!
//! Access checks and compilation never fail; only the token codec and
//! configuration loading produce errors.

/// A token could not be turned back into a table.
///
/// Callers must treat the identity as having no usable table and deny,
/// then rebuild from the grant source.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The token contains characters outside the URL-safe base64 alphabet.
    #[error("Token is not valid URL-safe base64: {0}")]
    Transport(#[from] base64::DecodeError),
    /// The compressed payload is corrupt or truncated.
    #[error("Token payload failed to decompress: {0}")]
    Decompress(#[source] std::io::Error),
    /// The decompressed payload exceeds the codec's size limit.
    #[error("Decompressed token exceeds {limit} bytes")]
    TooLarge { limit: usize },
    /// The payload decompressed but is not a canonical table.
    #[error("Token payload is not a valid ACL table: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// A table could not be turned into a token.
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error("Failed to serialize ACL table: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("Failed to compress ACL table: {0}")]
    Compress(#[from] std::io::Error),
}

/// Invalid engine configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Compression level {0} is out of range (0-9)")]
    InvalidLevel(u32),
    #[error("max_decoded_bytes must be greater than zero")]
    ZeroDecodeLimit,
}
