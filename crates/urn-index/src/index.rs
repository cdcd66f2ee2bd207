use std::collections::HashMap;

use tracing::{debug, info};
use urn_model::{Coverage, GridBounds, GridPoint, RegionDefinition, RegionId, Worldspace};

/// Immutable grid point to region lookup.
///
/// Each point maps to the regions covering it, in the order those regions
/// were first associated with the point during construction. A region is
/// listed at most once per point no matter how many of its areas overlap.
#[derive(Debug, Clone, Default)]
pub struct RegionIndex {
    points: HashMap<GridPoint, Vec<RegionId>>,
    regions: Vec<RegionId>,
    coverage: HashMap<RegionId, usize>,
}

impl RegionIndex {
    /// Index every region in listing order.
    pub fn build<'a>(regions: impl IntoIterator<Item = &'a RegionDefinition>) -> Self {
        Self::build_clipped(regions, None)
    }

    /// Like [`RegionIndex::build`], ignoring points outside `clip`.
    pub fn build_clipped<'a>(
        regions: impl IntoIterator<Item = &'a RegionDefinition>,
        clip: Option<GridBounds>,
    ) -> Self {
        let mut builder = RegionIndexBuilder::new();
        if let Some(clip) = clip {
            builder = builder.clip_to(clip);
        }
        for region in regions {
            builder.add_region(region);
        }
        builder.build()
    }

    /// Index a worldspace's regions, optionally clipped to its declared bounds.
    pub fn for_worldspace(worldspace: &Worldspace, clip_to_bounds: bool) -> Self {
        let clip = if clip_to_bounds {
            worldspace.bounds
        } else {
            None
        };
        Self::build_clipped(&worldspace.regions, clip)
    }

    /// Regions covering `point`. Unknown points yield an empty slice.
    pub fn lookup(&self, point: GridPoint) -> &[RegionId] {
        self.points
            .get(&point)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Number of grid points covered by at least one region.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Regions with at least one covered point, in discovery order.
    pub fn regions(&self) -> &[RegionId] {
        &self.regions
    }

    pub fn region_count(&self) -> usize {
        self.regions.len()
    }

    /// Number of distinct points associated with `region`.
    pub fn points_for(&self, region: &RegionId) -> usize {
        self.coverage.get(region).copied().unwrap_or(0)
    }
}

/// Incremental construction of a [`RegionIndex`].
#[derive(Debug, Default)]
pub struct RegionIndexBuilder {
    clip: Option<GridBounds>,
    index: RegionIndex,
}

impl RegionIndexBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every association outside `bounds`.
    #[must_use]
    pub fn clip_to(mut self, bounds: GridBounds) -> Self {
        self.clip = Some(bounds);
        self
    }

    /// Associate every point covered by the region's areas. Returns the
    /// number of new associations.
    pub fn add_region(&mut self, region: &RegionDefinition) -> usize {
        let added: usize = region
            .areas
            .iter()
            .map(|area| self.add_area(&region.key, area))
            .sum();
        if added == 0 && self.index.points_for(&region.key) == 0 {
            debug!(
                region = %region.label(),
                area_count = region.areas.len(),
                "region covers no grid points"
            );
        }
        added
    }

    /// Associate every point `area` covers with `region`. Returns the number
    /// of new associations.
    pub fn add_area<C: Coverage + ?Sized>(&mut self, region: &RegionId, area: &C) -> usize {
        let mut added = 0;
        for point in area.covered_points(self.clip.as_ref()) {
            if self.associate(point, region) {
                added += 1;
            }
        }
        added
    }

    fn associate(&mut self, point: GridPoint, region: &RegionId) -> bool {
        let entry = self.index.points.entry(point).or_default();
        if entry.contains(region) {
            return false;
        }
        entry.push(region.clone());
        let count = self.index.coverage.entry(region.clone()).or_insert(0);
        if *count == 0 {
            self.index.regions.push(region.clone());
        }
        *count += 1;
        true
    }

    pub fn build(self) -> RegionIndex {
        info!(
            point_count = self.index.len(),
            region_count = self.index.region_count(),
            clipped = self.clip.is_some(),
            "region index built"
        );
        self.index
    }
}
