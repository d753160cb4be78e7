//!
//! Table compiler: raw grants -> [`CompiledTable`].
//!
//! Compilation is total. A path whose grant is not a recognisable entry
//! compiles to an entry with no methods and no ids, which denies every
//! request for that path and leaves every other path untouched. It never
//! degrades to "unrestricted ids".
//!
//! Paths and method names are taken verbatim. No case folding or path
//! normalisation happens here, so callers must query with the exact
//! strings the grants were authored with.

use std::collections::{HashMap, HashSet};

use crate::primitives::{CompiledEntry, CompiledTable};
use crate::types::{RawEntry, RawGrant, RawGrants};

/// A grant that could not be interpreted and was compiled to deny-all.
#[derive(Debug, Clone, PartialEq)]
pub struct MalformedGrant {
    pub path: String,
    pub value: serde_json::Value,
}

/// Compiles `raw` into a lookup table, logging each malformed path.
pub fn compile(raw: &RawGrants) -> CompiledTable {
    let (table, malformed) = compile_with_report(raw);
    for grant in &malformed {
        tracing::warn!(
            path = %grant.path,
            value = %grant.value,
            "Malformed grant compiled to deny-all"
        );
    }
    table
}

/// Like [`compile`], but hands the malformed grants back instead of logging them.
pub fn compile_with_report(raw: &RawGrants) -> (CompiledTable, Vec<MalformedGrant>) {
    let mut entries = HashMap::with_capacity(raw.len());
    let mut malformed = Vec::new();

    for (path, grant) in raw {
        let entry = match grant {
            RawGrant::Entry(entry) => compile_entry(entry),
            RawGrant::Malformed(value) => {
                malformed.push(MalformedGrant {
                    path: path.clone(),
                    value: value.clone(),
                });
                CompiledEntry::default()
            }
        };
        entries.insert(path.clone(), entry);
    }

    let table = CompiledTable::from_entries(entries);
    tracing::debug!(
        paths = table.len(),
        ids = table.id_count(),
        malformed = malformed.len(),
        "Compiled ACL table"
    );
    (table, malformed)
}

fn compile_entry(entry: &RawEntry) -> CompiledEntry {
    CompiledEntry::new(to_set(entry.methods.as_deref()), to_set(entry.ids.as_deref()))
}

fn to_set(items: Option<&[String]>) -> HashSet<String> {
    items.unwrap_or_default().iter().cloned().collect()
}
