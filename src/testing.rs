//! Fixtures for tests, benchmarks, and fuzz targets.
//!
//! Enabled by the `test-utils` feature.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::grants::StaticGrantSource;
use crate::types::{RawEntry, RawGrant, RawGrants};

/// Identity used by [`directory`].
pub const DEMO_IDENTITY: &str = "user_123";

/// Grants of the demo identity: full method lists, no item restrictions.
pub fn demo_grants() -> RawGrants {
    let mut grants = RawGrants::new();
    grants.insert("mqtt".into(), RawEntry::methods(["subscribe", "publish"]).into());
    grants.insert("gw/devices".into(), RawEntry::methods(["GET", "POST", "PUT", "DELETE"]).into());
    grants.insert(
        "gw/geofences".into(),
        RawEntry::methods(["GET", "POST", "PUT", "DELETE", "PATCH"]).into(),
    );
    grants.insert(
        "gw/calcs".into(),
        RawEntry::methods(["GET", "POST", "PUT", "DELETE", "PATCH", "OPTIONS"]).into(),
    );
    grants.insert(
        "gw/pois".into(),
        RawEntry::methods(["GET", "POST", "PUT", "DELETE", "PATCH", "OPTIONS"]).into(),
    );
    grants
}

/// Directory containing only [`DEMO_IDENTITY`].
pub fn directory() -> StaticGrantSource {
    StaticGrantSource::new().with_identity(DEMO_IDENTITY, demo_grants())
}

/// Two-path gateway grants: restricted devices, unrestricted geofences.
pub fn gateway_grants() -> RawGrants {
    let mut grants = RawGrants::new();
    grants.insert(
        "gw/devices".into(),
        RawEntry::methods(["GET", "DELETE"]).with_ids(["id1", "id2"]).into(),
    );
    grants.insert("gw/geofences".into(), RawEntry::methods(["GET"]).into());
    grants
}

/// Seven-digit device ids counting up from 6005000.
pub fn device_ids(count: usize) -> Vec<String> {
    (0..count).map(|i| (6_005_000 + i).to_string()).collect()
}

/// Deterministic 32-character hex ids that look like opaque object ids.
pub fn opaque_ids(count: usize, seed: u64) -> Vec<String> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count).map(|_| format!("{:032x}", rng.gen::<u128>())).collect()
}

/// Grants with `paths` restricted paths of `ids_per_path` opaque ids each.
pub fn large_grants(paths: usize, ids_per_path: usize) -> RawGrants {
    (0..paths)
        .map(|p| {
            let entry = RawEntry::methods(["GET", "POST", "PUT", "DELETE"])
                .with_ids(opaque_ids(ids_per_path, p as u64));
            (format!("gw/resource-{p}"), RawGrant::from(entry))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opaque_ids_are_deterministic_and_distinct() {
        let a = opaque_ids(50, 7);
        assert_eq!(a, opaque_ids(50, 7));
        assert_ne!(a, opaque_ids(50, 8));
        let unique: std::collections::HashSet<_> = a.iter().collect();
        assert_eq!(unique.len(), 50);
        assert!(a.iter().all(|id| id.len() == 32));
    }

    #[test]
    fn test_device_ids() {
        assert_eq!(device_ids(3), vec!["6005000", "6005001", "6005002"]);
    }
}
