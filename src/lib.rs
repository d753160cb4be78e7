#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![deny(deprecated)]

//!
//! ACL-Core is a per-identity access control engine.
//!
//! It compiles the raw grant list of one identity into an immutable,
//! set-based table, answers `(path, method, item ids)` access checks against
//! that table, and packs the table into a compact, URL-safe token so it can
//! be cached or shipped across a process boundary without asking the grant
//! directory again.
//!
//! ```
//! use acl_core::{compile, has_access, codec, RawEntry, RawGrants};
//!
//! let mut grants = RawGrants::new();
//! grants.insert(
//!     "gw/devices".to_string(),
//!     RawEntry::methods(["GET", "DELETE"]).with_ids(["id1", "id2"]).into(),
//! );
//! let table = compile(&grants);
//!
//! assert!(has_access(&table, "gw/devices", "DELETE", &["id1", "id2"]));
//! assert!(!has_access(&table, "gw/devices", "GET", &["id1", "id3"]));
//!
//! let token = codec::encode(&table).unwrap();
//! assert_eq!(codec::decode(&token).unwrap(), table);
//! ```

// Module for raw grant types supplied by grant sources.
pub mod types;

// Module for the compiled table and its entries.
pub mod primitives;

// Re-export the compiled types at the crate root.
pub use primitives::*;

// Module for the table compiler.
pub mod compiler;

// Module for access decisions.
pub mod access;

// Module for the token codec.
pub mod codec;

// Module for error types.
pub mod error;

// Module for the grant source abstraction.
pub mod grants;

// Module for the per-identity session facade.
pub mod manager;

// Module for engine configuration.
pub mod config;

#[cfg(feature = "tracing-subscriber")]
pub mod telemetry;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use access::{evaluate, has_access, Decision};
pub use codec::TableCodec;
pub use compiler::{compile, compile_with_report, MalformedGrant};
pub use error::{ConfigError, DecodeError, EncodeError};
pub use grants::{GrantSource, StaticGrantSource};
pub use manager::AclManager;
pub use types::{RawEntry, RawGrant, RawGrants};
