//! Integration tests for region index construction and lookup.

use std::collections::HashSet;

use proptest::prelude::*;
use urn_index::{RegionIndex, RegionIndexBuilder};
use urn_model::{
    Coverage, CoverageArea, FormKey, GridBounds, GridPoint, RegionDefinition, Worldspace,
};

fn key(id: u32) -> FormKey {
    FormKey::new(id, "Skyrim.esm").unwrap()
}

fn region(id: u32, areas: Vec<CoverageArea>) -> RegionDefinition {
    RegionDefinition {
        key: key(id),
        editor_id: None,
        areas,
    }
}

/// Disc of grid points within `radius` of `center`.
struct Disc {
    center: GridPoint,
    radius: i32,
}

impl Coverage for Disc {
    fn extent(&self) -> Option<GridBounds> {
        (self.radius >= 0).then(|| {
            GridBounds::new(
                GridPoint::new(self.center.x - self.radius, self.center.y - self.radius),
                GridPoint::new(self.center.x + self.radius, self.center.y + self.radius),
            )
        })
    }

    fn contains(&self, point: GridPoint) -> bool {
        let dx = i64::from(point.x - self.center.x);
        let dy = i64::from(point.y - self.center.y);
        dx * dx + dy * dy <= i64::from(self.radius) * i64::from(self.radius)
    }
}

#[test]
fn lookup_follows_region_listing_order() {
    let tundra = region(0x10, vec![CoverageArea::rect((0, 0), (4, 4))]);
    let forest = region(0x20, vec![CoverageArea::points([(2, 2), (9, 9)])]);
    let river = region(0x30, vec![CoverageArea::polygon([(2, 0), (2, 4), (3, 4), (3, 0)])]);

    let index = RegionIndex::build([&tundra, &forest, &river]);
    assert_eq!(
        index.lookup(GridPoint::new(2, 2)),
        &[key(0x10), key(0x20), key(0x30)]
    );
    assert_eq!(index.lookup(GridPoint::new(9, 9)), &[key(0x20)]);
    assert_eq!(index.lookup(GridPoint::new(0, 0)), &[key(0x10)]);

    let reversed = RegionIndex::build([&river, &forest, &tundra]);
    assert_eq!(
        reversed.lookup(GridPoint::new(2, 2)),
        &[key(0x30), key(0x20), key(0x10)]
    );
}

#[test]
fn repeated_region_definition_is_not_duplicated() {
    let forest = region(0x20, vec![CoverageArea::rect((0, 0), (1, 1))]);
    let again = region(0x20, vec![CoverageArea::rect((1, 1), (2, 2))]);
    let index = RegionIndex::build([&forest, &again]);
    assert_eq!(index.lookup(GridPoint::new(1, 1)), &[key(0x20)]);
    assert_eq!(index.points_for(&key(0x20)), 7);
    assert_eq!(index.regions(), &[key(0x20)]);
}

#[test]
fn builder_accepts_custom_shapes() {
    let mut builder = RegionIndexBuilder::new();
    let added = builder.add_area(
        &key(0x40),
        &Disc {
            center: GridPoint::new(0, 0),
            radius: 1,
        },
    );
    assert_eq!(added, 5);
    let index = builder.build();
    assert_eq!(index.lookup(GridPoint::new(0, 1)), &[key(0x40)]);
    assert!(index.lookup(GridPoint::new(1, 1)).is_empty());
}

#[test]
fn worldspace_bounds_clip_only_when_requested() {
    let worldspace = Worldspace {
        key: key(0x3C),
        editor_id: Some("Tamriel".to_string()),
        bounds: Some(GridBounds::new(GridPoint::new(-1, -1), GridPoint::new(1, 1))),
        regions: vec![region(0x50, vec![CoverageArea::rect((-3, -3), (3, 3))])],
    };
    let clipped = RegionIndex::for_worldspace(&worldspace, true);
    assert_eq!(clipped.len(), 9);
    assert!(clipped.lookup(GridPoint::new(2, 2)).is_empty());

    let full = RegionIndex::for_worldspace(&worldspace, false);
    assert_eq!(full.len(), 49);
    assert_eq!(full.lookup(GridPoint::new(2, 2)), &[key(0x50)]);
}

fn arb_rect() -> impl Strategy<Value = CoverageArea> {
    (-6i32..6, -6i32..6, 0i32..4, 0i32..4)
        .prop_map(|(x, y, w, h)| CoverageArea::rect((x, y), (x + w, y + h)))
}

fn arb_regions() -> impl Strategy<Value = Vec<RegionDefinition>> {
    prop::collection::vec(prop::collection::vec(arb_rect(), 0..3), 1..6).prop_map(|areas| {
        areas
            .into_iter()
            .enumerate()
            .map(|(offset, areas)| region(0x100 + offset as u32, areas))
            .collect()
    })
}

proptest! {
    #[test]
    fn lookup_is_exact_ordered_and_unique(regions in arb_regions()) {
        let index = RegionIndex::build(&regions);
        let scan = GridBounds::new(GridPoint::new(-8, -8), GridPoint::new(12, 12));
        for point in scan.points() {
            let found = index.lookup(point);
            let unique: HashSet<_> = found.iter().collect();
            prop_assert_eq!(unique.len(), found.len());

            let expected: Vec<FormKey> = regions
                .iter()
                .filter(|region| region.areas.iter().any(|area| area.contains(point)))
                .map(|region| region.key.clone())
                .collect();
            prop_assert_eq!(found, expected.as_slice());
        }
    }
}
