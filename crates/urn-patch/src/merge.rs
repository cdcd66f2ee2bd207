//! Order-preserving, duplicate-free region merge.

use urn_model::RegionId;

/// True when `existing` lists every id in `regions`.
///
/// A missing list only contains the empty set.
pub fn contains_all(existing: Option<&[RegionId]>, regions: &[RegionId]) -> bool {
    match existing {
        Some(existing) => regions.iter().all(|region| existing.contains(region)),
        None => regions.is_empty(),
    }
}

/// Append the ids of `regions` missing from `existing`, in `regions` order.
///
/// Existing entries are never moved or removed. Returns how many ids were
/// appended.
pub fn add_missing_regions(existing: &mut Vec<RegionId>, regions: &[RegionId]) -> usize {
    let before = existing.len();
    for region in regions {
        if !existing.contains(region) {
            existing.push(region.clone());
        }
    }
    existing.len() - before
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;
    use urn_model::FormKey;

    fn id(value: u32) -> RegionId {
        FormKey::new(value, "Skyrim.esm").unwrap()
    }

    #[test]
    fn missing_list_is_superset_only_of_nothing() {
        assert!(contains_all(None, &[]));
        assert!(!contains_all(None, &[id(1)]));
        assert!(contains_all(Some(&[id(2), id(1)][..]), &[id(1)]));
        assert!(!contains_all(Some(&[id(2)][..]), &[id(1), id(2)]));
    }

    #[test]
    fn appends_after_manual_entries() {
        let mut existing = vec![id(9), id(2)];
        let added = add_missing_regions(&mut existing, &[id(1), id(2), id(3)]);
        assert_eq!(added, 2);
        assert_eq!(existing, vec![id(9), id(2), id(1), id(3)]);
    }

    fn ids() -> impl Strategy<Value = Vec<RegionId>> {
        prop::collection::vec(0u32..12, 0..8)
            .prop_map(|values| values.into_iter().map(id).collect())
    }

    fn unique_ids() -> impl Strategy<Value = Vec<RegionId>> {
        ids().prop_map(|values| {
            let mut seen = HashSet::new();
            values
                .into_iter()
                .filter(|value| seen.insert(value.clone()))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn merge_is_idempotent(existing in ids(), regions in unique_ids()) {
            let mut once = existing.clone();
            add_missing_regions(&mut once, &regions);
            let mut twice = once.clone();
            let added = add_missing_regions(&mut twice, &regions);
            prop_assert_eq!(added, 0);
            prop_assert_eq!(&twice, &once);
            prop_assert!(contains_all(Some(once.as_slice()), &regions));
        }

        #[test]
        fn merge_keeps_prefix_and_order(existing in ids(), regions in unique_ids()) {
            let mut merged = existing.clone();
            add_missing_regions(&mut merged, &regions);
            prop_assert_eq!(&merged[..existing.len()], existing.as_slice());
            let appended: Vec<RegionId> = regions
                .iter()
                .filter(|region| !existing.contains(region))
                .cloned()
                .collect();
            prop_assert_eq!(&merged[existing.len()..], appended.as_slice());
        }

        #[test]
        fn merge_adds_no_duplicates(existing in unique_ids(), regions in unique_ids()) {
            let mut merged = existing;
            add_missing_regions(&mut merged, &regions);
            let unique: HashSet<_> = merged.iter().collect();
            prop_assert_eq!(unique.len(), merged.len());
        }
    }
}
