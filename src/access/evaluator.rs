//!
//! Access evaluator for compiled ACL tables.

use crate::primitives::CompiledTable;

/// Outcome of an access check, with the reason for a deny.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Decision {
    Allow,
    /// The path has no grant in the table.
    UnknownResource,
    /// The path is granted but not for this method.
    MethodNotAllowed,
    /// At least one requested item id is outside the granted id set.
    ItemsNotAllowed,
}

impl Decision {
    #[inline]
    pub fn is_allowed(self) -> bool {
        matches!(self, Decision::Allow)
    }
}

/// Evaluates `(path, method, requested_ids)` against `table`.
///
/// Checks run in order and stop at the first failure:
/// 1. `path` must be a key of the table.
/// 2. `method` must be in the entry's method set.
/// 3. An entry with no ids allows any item.
/// 4. Otherwise every requested id must be in the entry's id set. There is
///    no partial allow: one foreign id denies the whole batch. An empty
///    request is allowed.
///
/// # Arguments
/// * `table` - The compiled table for the calling identity.
/// * `path` - Resource path, matched exactly.
/// * `method` - Method name, matched exactly (case-sensitive).
/// * `requested_ids` - Item ids the request touches.
///
/// # Returns
/// [`Decision::Allow`] or the reason the request is denied.
pub fn evaluate<S: AsRef<str>>(
    table: &CompiledTable,
    path: &str,
    method: &str,
    requested_ids: &[S],
) -> Decision {
    let Some(entry) = table.get(path) else {
        return Decision::UnknownResource;
    };
    if !entry.allows_method(method) {
        return Decision::MethodNotAllowed;
    }
    if entry.is_unrestricted() {
        return Decision::Allow;
    }
    let ids = entry.ids();
    if requested_ids.iter().all(|id| ids.contains(id.as_ref())) {
        Decision::Allow
    } else {
        Decision::ItemsNotAllowed
    }
}

/// Returns `true` only if `table` grants `method` on `path` for every id in `requested_ids`.
///
/// See [`evaluate`] for the rules.
#[inline]
pub fn has_access<S: AsRef<str>>(
    table: &CompiledTable,
    path: &str,
    method: &str,
    requested_ids: &[S],
) -> bool {
    evaluate(table, path, method, requested_ids).is_allowed()
}

impl CompiledTable {
    /// Method form of [`has_access`].
    pub fn has_access<S: AsRef<str>>(&self, path: &str, method: &str, requested_ids: &[S]) -> bool {
        has_access(self, path, method, requested_ids)
    }

    /// Method form of [`evaluate`].
    pub fn evaluate<S: AsRef<str>>(&self, path: &str, method: &str, requested_ids: &[S]) -> Decision {
        evaluate(self, path, method, requested_ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::compile;
    use crate::types::{RawEntry, RawGrants};

    const NONE: &[&str] = &[];

    fn table() -> CompiledTable {
        let mut raw = RawGrants::new();
        raw.insert(
            "gw/devices".to_string(),
            RawEntry::methods(["GET", "DELETE"]).with_ids(["a", "b", "c"]).into(),
        );
        raw.insert("gw/geofences".to_string(), RawEntry::methods(["GET"]).into());
        raw.insert("gw/calcs".to_string(), RawEntry::default().into());
        compile(&raw)
    }

    #[test]
    fn test_unknown_path_denies() {
        let t = table();
        assert_eq!(evaluate(&t, "unlisted/path", "GET", NONE), Decision::UnknownResource);
        assert!(!has_access(&t, "gw/devices/", "GET", NONE));
    }

    #[test]
    fn test_method_gate() {
        let t = table();
        assert_eq!(evaluate(&t, "gw/devices", "POST", &["a"]), Decision::MethodNotAllowed);
        assert_eq!(evaluate(&t, "gw/devices", "get", NONE), Decision::MethodNotAllowed);
        assert!(!has_access(&t, "gw/calcs", "GET", NONE));
    }

    #[test]
    fn test_unrestricted_ids() {
        let t = table();
        assert!(has_access(&t, "gw/geofences", "GET", NONE));
        assert!(has_access(&t, "gw/geofences", "GET", &["anything", "at", "all"]));
    }

    #[test]
    fn test_subset_is_all_or_nothing() {
        let t = table();
        assert!(has_access(&t, "gw/devices", "GET", &["a", "b"]));
        assert!(has_access(&t, "gw/devices", "DELETE", &["c", "c"]));
        assert_eq!(evaluate(&t, "gw/devices", "GET", &["a", "z"]), Decision::ItemsNotAllowed);
    }

    #[test]
    fn test_empty_request_on_restricted_entry_is_allowed() {
        let t = table();
        assert!(has_access(&t, "gw/devices", "GET", NONE));
    }

    #[test]
    fn test_accepts_owned_ids() {
        let t = table();
        let ids: Vec<String> = vec!["a".into(), "c".into()];
        assert!(t.has_access("gw/devices", "GET", &ids));
        assert_eq!(t.evaluate("gw/devices", "GET", &ids), Decision::Allow);
    }

    #[test]
    fn test_empty_table_denies_everything() {
        let t = CompiledTable::default();
        assert!(!has_access(&t, "gw/devices", "GET", NONE));
        assert!(!has_access(&t, "", "", NONE));
    }
}
