use std::collections::{HashMap, HashSet};

// --- Compiled Entry ----------------------------------------------------------

/// Set-based permissions for one resource path.
///
/// An empty `ids` set means the path is unrestricted at the item level.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompiledEntry {
    methods: HashSet<String>,
    ids: HashSet<String>,
}

impl CompiledEntry {
    pub(crate) fn new(methods: HashSet<String>, ids: HashSet<String>) -> Self {
        CompiledEntry { methods, ids }
    }

    pub fn methods(&self) -> &HashSet<String> {
        &self.methods
    }

    pub fn ids(&self) -> &HashSet<String> {
        &self.ids
    }

    pub fn allows_method(&self, method: &str) -> bool {
        self.methods.contains(method)
    }

    /// True when no item-level restriction applies.
    pub fn is_unrestricted(&self) -> bool {
        self.ids.is_empty()
    }
}

// --- Compiled Table ----------------------------------------------------------

/// Immutable authorization table for one identity.
///
/// Keys are resource paths matched exactly. Built by the compiler or the
/// codec and never modified afterwards; a changed grant means a new table.
/// Equality is structural and ignores iteration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompiledTable(HashMap<String, CompiledEntry>);

impl CompiledTable {
    pub(crate) fn from_entries(entries: HashMap<String, CompiledEntry>) -> Self {
        CompiledTable(entries)
    }

    pub fn get(&self, path: &str) -> Option<&CompiledEntry> {
        self.0.get(path)
    }

    pub fn contains_path(&self, path: &str) -> bool {
        self.0.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CompiledEntry)> {
        self.0.iter().map(|(path, entry)| (path.as_str(), entry))
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Total number of allowed item ids across all paths.
    pub fn id_count(&self) -> usize {
        self.0.values().map(|entry| entry.ids.len()).sum()
    }
}
