//! Property tests for tag derivation, diffing and ordering

use equilibrium_core::sort::compare_tags;
use equilibrium_core::tags::{is_mutable_tag, is_semantic_version};
use equilibrium_core::types::{Digest, SemanticTagMap, SemanticVersion, TagDigestMap};
use equilibrium_core::{DiffStatus, RegistryDiffer, RemediationAction, VersionTagDeriver};
use proptest::prelude::*;
use std::cmp::Ordering;
use std::collections::BTreeSet;

fn digest_strategy() -> impl Strategy<Value = Digest> {
    // A small alphabet so that digests collide often
    (0u8..6).prop_map(|n| Digest::parse(format!("sha256:{:064x}", n)).unwrap())
}

fn semantic_map_strategy() -> impl Strategy<Value = SemanticTagMap> {
    prop::collection::btree_map(
        (0u64..4, 0u64..5, 0u64..8).prop_map(|(a, b, c)| SemanticVersion::new(a, b, c)),
        digest_strategy(),
        0..24,
    )
}

fn mutable_tag_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("latest".to_string()),
        (0u64..4).prop_map(|m| m.to_string()),
        (0u64..4, 0u64..4).prop_map(|(m, n)| format!("{}.{}", m, n)),
    ]
}

/// Mutable tags plus zero-padded spellings that parse to the same version
fn padded_tag_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        mutable_tag_strategy(),
        (0u64..4).prop_map(|m| format!("0{}", m)),
        (0u64..4, 0u64..4).prop_map(|(m, n)| format!("{}.0{}", m, n)),
    ]
}

fn tag_map_strategy() -> impl Strategy<Value = TagDigestMap> {
    prop::collection::btree_map(mutable_tag_strategy(), digest_strategy(), 0..12)
}

proptest! {
    #[test]
    fn derive_is_idempotent(semantic in semantic_map_strategy()) {
        prop_assert_eq!(
            VersionTagDeriver::derive_virtual_tags(&semantic),
            VersionTagDeriver::derive_virtual_tags(&semantic)
        );
    }

    #[test]
    fn derived_key_sets_match(semantic in semantic_map_strategy()) {
        let result = VersionTagDeriver::derive_virtual_tags(&semantic);
        let digest_keys: Vec<&String> = result.digests.keys().collect();
        let version_keys: Vec<&String> = result.canonical_versions.keys().collect();
        prop_assert_eq!(digest_keys, version_keys);
    }

    #[test]
    fn derived_digests_follow_canonical_versions(semantic in semantic_map_strategy()) {
        let result = VersionTagDeriver::derive_virtual_tags(&semantic);
        for (tag, version) in &result.canonical_versions {
            prop_assert_eq!(Some(&result.digests[tag]), semantic.get(version));
        }
    }

    #[test]
    fn latest_is_maximum(semantic in semantic_map_strategy()) {
        let result = VersionTagDeriver::derive_virtual_tags(&semantic);
        match semantic.keys().max() {
            Some(max) => prop_assert_eq!(result.canonical_versions.get("latest"), Some(max)),
            None => prop_assert!(result.digests.is_empty()),
        }
    }

    #[test]
    fn major_and_minor_are_maximum(semantic in semantic_map_strategy()) {
        let result = VersionTagDeriver::derive_virtual_tags(&semantic);

        for version in semantic.keys() {
            let best_major = semantic
                .keys()
                .filter(|v| v.major() == version.major())
                .max();
            prop_assert_eq!(result.canonical_versions.get(&version.major_tag()), best_major);

            let best_minor = semantic
                .keys()
                .filter(|v| v.major() == version.major() && v.minor() == version.minor())
                .max();
            prop_assert_eq!(result.canonical_versions.get(&version.minor_tag()), best_minor);
        }

        // Every derived tag is latest, or an observed major or minor
        let expected_len = usize::from(!semantic.is_empty())
            + semantic.keys().map(|v| v.major()).collect::<BTreeSet<_>>().len()
            + semantic.keys().map(|v| (v.major(), v.minor())).collect::<BTreeSet<_>>().len();
        prop_assert_eq!(result.len(), expected_len);
    }

    #[test]
    fn diff_partitions_both_sides(expected in tag_map_strategy(), actual in tag_map_strategy()) {
        let result = RegistryDiffer::diff(&expected, &actual);

        for (tag, digest) in &expected {
            let missing = result.missing_tags.contains_key(tag);
            let mismatched = result.mismatched_tags.contains_key(tag);
            let common = actual.get(tag) == Some(digest);
            prop_assert_eq!(usize::from(missing) + usize::from(mismatched) + usize::from(common), 1);
        }

        for (tag, digest) in &actual {
            let unexpected = result.unexpected_tags.contains_key(tag);
            let mismatched = result.mismatched_tags.contains_key(tag);
            let common = expected.get(tag) == Some(digest);
            prop_assert_eq!(usize::from(unexpected) + usize::from(mismatched) + usize::from(common), 1);
        }

        prop_assert_eq!(result.status == DiffStatus::Perfect, expected == actual);
        prop_assert_eq!(
            result.remediation_plan.len(),
            result.missing_tags.len() + result.mismatched_tags.len() + result.unexpected_tags.len()
        );
    }

    #[test]
    fn mismatch_dominates_missing(
        base in tag_map_strategy(),
        missing in mutable_tag_strategy(),
    ) {
        let mut expected = base.clone();
        let mut actual = base;
        let d1 = Digest::parse(format!("sha256:{:064x}", 100)).unwrap();
        let d2 = Digest::parse(format!("sha256:{:064x}", 200)).unwrap();

        // One tag in both with different digests, one tag only in expected
        let clash = if missing == "latest" { "0.0" } else { "latest" };
        expected.insert(clash.to_string(), d1.clone());
        actual.insert(clash.to_string(), d2);
        expected.insert(missing.clone(), d1);
        actual.remove(&missing);

        prop_assert_eq!(RegistryDiffer::diff(&expected, &actual).status, DiffStatus::Mismatched);
    }

    #[test]
    fn plan_groups_are_ordered(expected in tag_map_strategy(), actual in tag_map_strategy()) {
        let plan = RegistryDiffer::diff(&expected, &actual).remediation_plan;
        let rank = |action: &RemediationAction| match action {
            RemediationAction::CreateTag { .. } => 0,
            RemediationAction::UpdateTag { .. } => 1,
            RemediationAction::RemoveTag { .. } => 2,
        };

        for pair in plan.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            prop_assert!(rank(a) <= rank(b));
            if rank(a) == rank(b) {
                prop_assert_eq!(compare_tags(a.tag(), b.tag()), Ordering::Less);
            }
        }
    }

    #[test]
    fn classification_is_exclusive(tag in "[0-9a-z.]{1,8}") {
        prop_assert!(!(is_semantic_version(&tag) && is_mutable_tag(&tag)));
    }

    #[test]
    fn tag_order_is_total(a in padded_tag_strategy(), b in padded_tag_strategy()) {
        prop_assert_eq!(compare_tags(&a, &b), compare_tags(&b, &a).reverse());
        prop_assert_eq!(compare_tags(&a, &b) == Ordering::Equal, a == b);
    }
}
