//! Engine configuration.
//!
//! Every field has a default, so an empty document (`{}`) is a valid
//! configuration. Example:
//!
//! ```json
//! {
//!   "codec": { "format": "gzip", "level": 9, "max_decoded_bytes": 1048576 },
//!   "logging": { "level": "debug", "json": true }
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::codec::{GzipCodec, TableCodec, ZlibCodec, DEFAULT_LEVEL, DEFAULT_MAX_DECODED_BYTES};
use crate::error::{ConfigError, DecodeError, EncodeError};
use crate::primitives::CompiledTable;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct AclConfig {
    #[serde(default)]
    pub codec: CodecSettings,

    #[serde(default)]
    pub logging: LoggingSettings,
}

impl AclConfig {
    /// Parses and validates a JSON configuration document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: AclConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.codec.validate()
    }
}

/// Token compression framing.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CodecFormat {
    #[default]
    Zlib,
    Gzip,
}

/// Token codec settings.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct CodecSettings {
    #[serde(default)]
    pub format: CodecFormat,

    /// Compression level, 0 (store) to 9 (best).
    #[serde(default = "default_level")]
    pub level: u32,

    /// Tokens that inflate past this many bytes are rejected.
    #[serde(default = "default_max_decoded_bytes")]
    pub max_decoded_bytes: usize,
}

impl Default for CodecSettings {
    fn default() -> Self {
        Self {
            format: CodecFormat::default(),
            level: default_level(),
            max_decoded_bytes: default_max_decoded_bytes(),
        }
    }
}

fn default_level() -> u32 {
    DEFAULT_LEVEL
}

fn default_max_decoded_bytes() -> usize {
    DEFAULT_MAX_DECODED_BYTES
}

impl CodecSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.level > 9 {
            return Err(ConfigError::InvalidLevel(self.level));
        }
        if self.max_decoded_bytes == 0 {
            return Err(ConfigError::ZeroDecodeLimit);
        }
        Ok(())
    }

    /// Builds the configured codec.
    pub fn codec(&self) -> Result<ConfiguredCodec, ConfigError> {
        self.validate()?;
        Ok(match self.format {
            CodecFormat::Zlib => ConfiguredCodec::Zlib(ZlibCodec::new(self.level, self.max_decoded_bytes)),
            CodecFormat::Gzip => ConfiguredCodec::Gzip(GzipCodec::new(self.level, self.max_decoded_bytes)),
        })
    }
}

/// A codec picked at runtime from [`CodecSettings`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfiguredCodec {
    Zlib(ZlibCodec),
    Gzip(GzipCodec),
}

impl Default for ConfiguredCodec {
    fn default() -> Self {
        ConfiguredCodec::Zlib(ZlibCodec::default())
    }
}

impl TableCodec for ConfiguredCodec {
    fn encode(&self, table: &CompiledTable) -> Result<String, EncodeError> {
        match self {
            ConfiguredCodec::Zlib(codec) => codec.encode(table),
            ConfiguredCodec::Gzip(codec) => codec.encode(table),
        }
    }

    fn decode(&self, token: &str) -> Result<CompiledTable, DecodeError> {
        match self {
            ConfiguredCodec::Zlib(codec) => codec.decode(token),
            ConfiguredCodec::Gzip(codec) => codec.decode(token),
        }
    }
}

/// Log output settings, used by `telemetry::init_logging`.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct LoggingSettings {
    /// Default filter directive when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable text.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
