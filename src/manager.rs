//!
//! Per-identity ACL session.
//!
//! An `AclManager` owns the compiled table for one identity for the length
//! of a request or session context. It is built either from a
//! [`GrantSource`] or from a token produced by an earlier manager.

use crate::access::{evaluate, Decision};
use crate::codec::{TableCodec, ZlibCodec};
use crate::compiler::compile;
use crate::error::{DecodeError, EncodeError};
use crate::grants::GrantSource;
use crate::primitives::CompiledTable;

/// Compiled ACL for one identity, plus the codec used to transport it.
#[derive(Debug, Clone)]
pub struct AclManager<C: TableCodec = ZlibCodec> {
    identity: String,
    table: CompiledTable,
    codec: C,
}

impl AclManager<ZlibCodec> {
    /// Fetches and compiles the grants for `identity` using the default codec.
    pub fn for_identity<G: GrantSource + ?Sized>(source: &G, identity: &str) -> Self {
        Self::with_codec(source, identity, ZlibCodec::default())
    }
}

impl<C: TableCodec> AclManager<C> {
    /// Fetches and compiles the grants for `identity`.
    pub fn with_codec<G: GrantSource + ?Sized>(source: &G, identity: &str, codec: C) -> Self {
        let table = compile(&source.fetch_grants(identity));
        tracing::debug!(identity, paths = table.len(), "Built ACL from grant source");
        AclManager {
            identity: identity.to_string(),
            table,
            codec,
        }
    }

    /// Rehydrates a manager from a token.
    ///
    /// A `DecodeError` means there is no usable table for `identity`; the
    /// caller must deny or rebuild from the grant source.
    pub fn from_token(identity: &str, token: &str, codec: C) -> Result<Self, DecodeError> {
        let table = codec.decode(token)?;
        tracing::debug!(identity, paths = table.len(), "Restored ACL from token");
        Ok(AclManager {
            identity: identity.to_string(),
            table,
            codec,
        })
    }

    /// Uses `token` when it decodes, otherwise rebuilds from `source`.
    ///
    /// A bad token is never interpreted partially. It is logged and
    /// discarded, and the grants are fetched again.
    pub fn restore_or_fetch<G: GrantSource + ?Sized>(
        source: &G,
        identity: &str,
        token: Option<&str>,
        codec: C,
    ) -> Self {
        let Some(token) = token else {
            return Self::with_codec(source, identity, codec);
        };
        match codec.decode(token) {
            Ok(table) => AclManager {
                identity: identity.to_string(),
                table,
                codec,
            },
            Err(err) => {
                tracing::warn!(identity, error = %err, "Discarding undecodable ACL token");
                Self::with_codec(source, identity, codec)
            }
        }
    }

    pub fn identity(&self) -> &str {
        &self.identity
    }

    pub fn table(&self) -> &CompiledTable {
        &self.table
    }

    pub fn codec(&self) -> &C {
        &self.codec
    }

    /// Returns the decision for `(path, method, requested_ids)`.
    pub fn evaluate<S: AsRef<str>>(&self, path: &str, method: &str, requested_ids: &[S]) -> Decision {
        let decision = evaluate(&self.table, path, method, requested_ids);
        tracing::trace!(
            identity = %self.identity,
            path,
            method,
            ids = requested_ids.len(),
            ?decision,
            "ACL check"
        );
        decision
    }

    /// `true` when the identity may perform `method` on `path` for every requested id.
    pub fn has_access<S: AsRef<str>>(&self, path: &str, method: &str, requested_ids: &[S]) -> bool {
        self.evaluate(path, method, requested_ids).is_allowed()
    }

    /// Encodes the table for caching or transport.
    pub fn to_token(&self) -> Result<String, EncodeError> {
        self.codec.encode(&self.table)
    }

    pub fn into_table(self) -> CompiledTable {
        self.table
    }
}
