//! Grant source abstraction.
//!
//! A `GrantSource` is the external directory that knows which paths an
//! identity may touch. The engine only reads from it; it never caches,
//! validates, or mutates what it gets back. Fetching may block (database,
//! remote call) and any timeout or retry policy belongs to the
//! implementation, not to the engine.
//!
//! `StaticGrantSource` keeps everything in memory and is suitable for tests,
//! fixed deployments, or grants loaded from a configuration file.

use std::collections::HashMap;

use crate::types::{RawGrant, RawGrants};

/// Trait implemented by grant directories.
pub trait GrantSource: Send + Sync {
    /// Returns the raw grants for `identity`.
    ///
    /// Unknown identities get an empty map, which compiles to a table that
    /// denies everything.
    fn fetch_grants(&self, identity: &str) -> RawGrants;
}

/// In-memory grant directory keyed by identity.
#[derive(Debug, Clone, Default, PartialEq, serde::Deserialize)]
#[serde(transparent)]
pub struct StaticGrantSource {
    identities: HashMap<String, RawGrants>,
}

impl StaticGrantSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses `{"<identity>": {"<path>": {"methods": [..], "ids": [..]}}}`.
    ///
    /// Per-path values that are not grant entries are kept as malformed
    /// grants and compile to deny-all; only a document that is not a map of
    /// maps fails to load.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with_identity(mut self, identity: impl Into<String>, grants: RawGrants) -> Self {
        self.insert(identity, grants);
        self
    }

    /// Replaces all grants for `identity`.
    pub fn insert(&mut self, identity: impl Into<String>, grants: RawGrants) -> Option<RawGrants> {
        self.identities.insert(identity.into(), grants)
    }

    /// Adds or replaces a single path grant for `identity`.
    pub fn grant(&mut self, identity: &str, path: impl Into<String>, grant: impl Into<RawGrant>) {
        self.identities
            .entry(identity.to_string())
            .or_default()
            .insert(path.into(), grant.into());
    }

    pub fn identity_count(&self) -> usize {
        self.identities.len()
    }
}

impl GrantSource for StaticGrantSource {
    fn fetch_grants(&self, identity: &str) -> RawGrants {
        match self.identities.get(identity) {
            Some(grants) => grants.clone(),
            None => {
                tracing::debug!(identity, "No grants registered for identity");
                RawGrants::new()
            }
        }
    }
}

impl<G: GrantSource + ?Sized> GrantSource for &G {
    fn fetch_grants(&self, identity: &str) -> RawGrants {
        (**self).fetch_grants(identity)
    }
}

impl<G: GrantSource + ?Sized> GrantSource for std::sync::Arc<G> {
    fn fetch_grants(&self, identity: &str) -> RawGrants {
        (**self).fetch_grants(identity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RawEntry;

    #[test]
    fn test_unknown_identity_gets_empty_grants() {
        let source = StaticGrantSource::new();
        assert!(source.fetch_grants("nobody").is_empty());
    }

    #[test]
    fn test_grant_and_insert() {
        let mut source = StaticGrantSource::new();
        source.grant("user_1", "mqtt", RawEntry::methods(["subscribe"]));
        source.grant("user_1", "gw/pois", RawEntry::methods(["GET"]));
        assert_eq!(source.fetch_grants("user_1").len(), 2);

        let previous = source.insert("user_1", RawGrants::new());
        assert_eq!(previous.map(|g| g.len()), Some(2));
        assert!(source.fetch_grants("user_1").is_empty());
        assert_eq!(source.identity_count(), 1);
    }

    #[test]
    fn test_from_json_str() {
        let source = StaticGrantSource::from_json_str(
            r#"{
                "user_123": {
                    "mqtt": { "methods": ["subscribe", "publish"] },
                    "gw/devices": { "methods": ["GET"], "ids": ["6005021"] },
                    "gw/broken": "GET"
                },
                "user_456": {}
            }"#,
        )
        .unwrap();

        let grants = source.fetch_grants("user_123");
        assert_eq!(grants.len(), 3);
        assert!(matches!(grants["gw/broken"], RawGrant::Malformed(_)));
        assert!(source.fetch_grants("user_456").is_empty());
    }

    #[test]
    fn test_from_json_str_rejects_non_maps() {
        assert!(StaticGrantSource::from_json_str(r#"["user_123"]"#).is_err());
        assert!(StaticGrantSource::from_json_str(r#"{"user_123": []}"#).is_err());
    }

    #[test]
    fn test_shared_sources() {
        let source = std::sync::Arc::new(
            StaticGrantSource::new().with_identity("u", RawGrants::new()),
        );
        fn fetch(source: impl GrantSource) -> usize {
            source.fetch_grants("u").len()
        }
        assert_eq!(fetch(source.clone()), 0);
        assert_eq!(fetch(&*source), 0);
    }
}
