use std::fmt;

use serde::Serialize;
use tracing::{debug, info_span};
use urn_index::RegionIndex;
use urn_model::{CellRecord, FormKey, GridPoint};

use crate::error::{PatchError, SourceError};
use crate::event::PatchEvent;
use crate::merge::{add_missing_regions, contains_all};
use crate::source::{LogSink, OverrideSink, ParentResolver};

/// Where a cell ends up after the eligibility checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellFilter {
    Interior,
    MissingGrid,
    OtherWorldspace,
    Persistent,
    Eligible(GridPoint),
}

/// Counters for one patch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PatchSummary {
    pub visited: usize,
    pub interior: usize,
    pub missing_grid: usize,
    pub other_worldspace: usize,
    pub persistent: usize,
    pub no_region_data: usize,
    pub no_new_regions: usize,
    /// Cells that received an override.
    pub changed: u64,
    /// Region ids appended across all overrides.
    pub regions_added: usize,
}

impl PatchSummary {
    pub fn skipped(&self) -> usize {
        self.interior + self.missing_grid + self.other_worldspace + self.persistent
    }

    pub fn summary_line(&self) -> String {
        match self.changed {
            0 => "No changes were made.".to_string(),
            1 => "Successfully modified 1 cell.".to_string(),
            count => format!("Successfully modified {count} cells."),
        }
    }
}

impl fmt::Display for PatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary_line())
    }
}

/// Adds index-resolved regions to the exterior cells of one worldspace.
#[derive(Debug, Clone, Copy)]
pub struct CellPatcher<'a> {
    index: &'a RegionIndex,
    target: &'a FormKey,
}

impl<'a> CellPatcher<'a> {
    pub fn new(index: &'a RegionIndex, target: &'a FormKey) -> Self {
        Self { index, target }
    }

    /// Visit `cells` in order and patch every eligible one.
    ///
    /// The first error from the cell stream, the resolver or the sink aborts
    /// the run. Overrides created before the failure stay in `output`.
    pub fn run<I, R, O, L>(
        &self,
        cells: I,
        resolver: &R,
        output: &mut O,
        log: &mut L,
    ) -> Result<PatchSummary, PatchError>
    where
        I: IntoIterator<Item = Result<CellRecord, SourceError>>,
        R: ParentResolver + ?Sized,
        O: OverrideSink + ?Sized,
        L: LogSink + ?Sized,
    {
        let span = info_span!("patch", worldspace = %self.target);
        let _guard = span.enter();
        let mut summary = PatchSummary::default();

        for cell in cells {
            let cell = cell.map_err(PatchError::Cells)?;
            summary.visited += 1;
            match self.filter(&cell, resolver)? {
                CellFilter::Interior => summary.interior += 1,
                CellFilter::MissingGrid => {
                    summary.missing_grid += 1;
                    log.record(&PatchEvent::MissingGrid {
                        cell: cell.key.clone(),
                        label: cell.display_name(),
                    });
                }
                CellFilter::OtherWorldspace => summary.other_worldspace += 1,
                CellFilter::Persistent => {
                    summary.persistent += 1;
                    log.record(&PatchEvent::PersistentCell {
                        cell: cell.key.clone(),
                    });
                }
                CellFilter::Eligible(grid) => {
                    let event = self.patch_cell(&cell, grid, output)?;
                    if event.is_mutation() {
                        summary.changed += 1;
                        summary.regions_added += event.added();
                    }
                    match &event {
                        PatchEvent::NoRegionData { .. } => summary.no_region_data += 1,
                        PatchEvent::NoNewRegions { .. } => summary.no_new_regions += 1,
                        _ => {}
                    }
                    log.record(&event);
                }
            }
        }

        debug!(
            visited = summary.visited,
            skipped = summary.skipped(),
            changed = summary.changed,
            "patch run finished"
        );
        Ok(summary)
    }

    /// Eligibility checks, first match wins.
    pub fn filter<R>(&self, cell: &CellRecord, resolver: &R) -> Result<CellFilter, PatchError>
    where
        R: ParentResolver + ?Sized,
    {
        if cell.is_interior() {
            return Ok(CellFilter::Interior);
        }
        let Some(grid) = cell.grid else {
            return Ok(CellFilter::MissingGrid);
        };
        let parent = resolver
            .resolve_parent(cell)
            .map_err(|source| PatchError::Parent {
                cell: cell.key.clone(),
                source,
            })?;
        if parent.as_ref() != Some(self.target) {
            return Ok(CellFilter::OtherWorldspace);
        }
        if cell.looks_persistent() {
            return Ok(CellFilter::Persistent);
        }
        Ok(CellFilter::Eligible(grid))
    }

    /// Resolve and merge regions for one eligible cell.
    ///
    /// Writes to `output` only when at least one region is missing. A cell
    /// whose override already holds every resolved region (the same key seen
    /// earlier in the stream) reports [`PatchEvent::NoNewRegions`].
    pub fn patch_cell<O>(
        &self,
        cell: &CellRecord,
        grid: GridPoint,
        output: &mut O,
    ) -> Result<PatchEvent, PatchError>
    where
        O: OverrideSink + ?Sized,
    {
        let regions = self.index.lookup(grid);
        let label = cell.display_name();
        if regions.is_empty() {
            return Ok(PatchEvent::NoRegionData {
                cell: cell.key.clone(),
                label,
                grid,
            });
        }
        if contains_all(cell.regions.as_deref(), regions) {
            return Ok(PatchEvent::NoNewRegions {
                cell: cell.key.clone(),
                label,
                grid,
            });
        }

        let target = output
            .get_or_add_override(cell)
            .map_err(|source| PatchError::Override {
                cell: cell.key.clone(),
                source,
            })?;
        let existing = target.regions.get_or_insert_with(Vec::new);
        let added = add_missing_regions(existing, regions);
        if added == 0 {
            return Ok(PatchEvent::NoNewRegions {
                cell: cell.key.clone(),
                label,
                grid,
            });
        }
        Ok(PatchEvent::RegionsAdded {
            cell: cell.key.clone(),
            label,
            grid,
            added,
            resolved: regions.len(),
        })
    }
}
