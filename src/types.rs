//!
//! Raw grant types, as handed over by a [`GrantSource`](crate::grants::GrantSource).
//!
//! These are the uncompiled, list-based shapes. They are turned into the
//! set-based [`CompiledTable`](crate::primitives::CompiledTable) by
//! [`compiler::compile`](crate::compiler::compile).

use std::collections::HashMap;

/// Raw permission description for one resource path.
///
/// `methods: None` compiles to an empty method set, which denies every
/// request for the path. `ids: None` means no item-level restriction.
/// Duplicates are allowed; order is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RawEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub methods: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ids: Option<Vec<String>>,
}

impl RawEntry {
    /// Entry allowing `methods` on any item.
    pub fn methods<I, S>(methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        RawEntry {
            methods: Some(methods.into_iter().map(Into::into).collect()),
            ids: None,
        }
    }

    /// Restricts the entry to the given item ids.
    pub fn with_ids<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ids = Some(ids.into_iter().map(Into::into).collect());
        self
    }
}

/// What a grant source supplies for one path.
///
/// Anything that does not deserialize as a [`RawEntry`] is kept verbatim as
/// `Malformed` so a single bad record cannot poison the whole grant map.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum RawGrant {
    Entry(RawEntry),
    Malformed(serde_json::Value),
}

impl From<RawEntry> for RawGrant {
    fn from(entry: RawEntry) -> Self {
        RawGrant::Entry(entry)
    }
}

/// Resource path -> raw grant, for a single identity.
pub type RawGrants = HashMap<String, RawGrant>;
