//! Patch pipeline stages shared by the CLI commands.
//!
//! - **Load**: read settings and the plugin snapshot
//! - **Index**: build the region index for the target worldspace
//! - **Patch**: run the cell patcher into an in-memory plugin
//! - **Output**: write the plugin as JSON unless this is a dry run

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{info, info_span};

use urn_index::RegionIndex;
use urn_model::{FormKey, GridPoint, RegionId, Worldspace};
use urn_patch::{CellPatcher, PatchPlugin, PatchSummary, TracingLogSink};

use crate::settings::Settings;
use crate::snapshot::{Snapshot, write_patch};

/// Inputs for one `patch` invocation after flags were merged into settings.
#[derive(Debug, Clone)]
pub struct PatchRequest {
    pub snapshot: PathBuf,
    pub settings: Settings,
    /// Explicit output path. Defaults to `<output_name>.json` next to the
    /// snapshot.
    pub output: Option<PathBuf>,
    pub dry_run: bool,
}

impl PatchRequest {
    pub fn output_path(&self) -> PathBuf {
        if let Some(path) = &self.output {
            return path.clone();
        }
        let file_name = format!("{}.json", self.settings.patch.output_name);
        self.snapshot
            .parent()
            .map_or_else(|| PathBuf::from(&file_name), |dir| dir.join(&file_name))
    }
}

/// Outcome of a patch run.
#[derive(Debug)]
pub struct PatchRun {
    pub worldspace: FormKey,
    pub worldspace_label: String,
    pub indexed_points: usize,
    pub indexed_regions: usize,
    pub summary: PatchSummary,
    pub plugin: PatchPlugin,
    /// Where the plugin was written. `None` on a dry run.
    pub written: Option<PathBuf>,
}

/// One row of the `regions` listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegionRow {
    pub region: RegionId,
    pub label: String,
    pub areas: usize,
    /// Grid points this region claims after clipping.
    pub cells: usize,
}

pub fn load_snapshot(path: &Path) -> Result<Snapshot> {
    let start = Instant::now();
    let snapshot = Snapshot::load(path)?;
    info!(
        path = %path.display(),
        worldspaces = snapshot.worldspaces.len(),
        cells = snapshot.cells.len(),
        duration_ms = start.elapsed().as_millis(),
        "snapshot loaded"
    );
    Ok(snapshot)
}

pub fn run_patch(request: &PatchRequest) -> Result<PatchRun> {
    let snapshot = load_snapshot(&request.snapshot)?;
    let patch_settings = &request.settings.patch;
    let worldspace = snapshot
        .worldspace(&patch_settings.worldspace)
        .context("resolve target worldspace")?;

    let index = info_span!("index", worldspace = %worldspace.key)
        .in_scope(|| RegionIndex::for_worldspace(worldspace, patch_settings.clip_to_bounds));

    let mut plugin = PatchPlugin::new(patch_settings.output_name.clone());
    let mut log = TracingLogSink;
    let summary = CellPatcher::new(&index, &worldspace.key)
        .run(snapshot.cells(), &snapshot, &mut plugin, &mut log)
        .context("patch cells")?;

    let written = if request.dry_run {
        info!(overrides = plugin.len(), "dry run, patch not written");
        None
    } else {
        let path = request.output_path();
        write_patch(&plugin, &path)?;
        info!(path = %path.display(), overrides = plugin.len(), "patch written");
        Some(path)
    };

    Ok(PatchRun {
        worldspace: worldspace.key.clone(),
        worldspace_label: worldspace_label(worldspace),
        indexed_points: index.len(),
        indexed_regions: index.region_count(),
        summary,
        plugin,
        written,
    })
}

/// Regions of `worldspace` in listing order with their indexed coverage.
pub fn region_rows(worldspace: &Worldspace, clip_to_bounds: bool) -> Vec<RegionRow> {
    let index = RegionIndex::for_worldspace(worldspace, clip_to_bounds);
    worldspace
        .regions
        .iter()
        .map(|region| RegionRow {
            region: region.key.clone(),
            label: region.label(),
            areas: region.areas.len(),
            cells: index.points_for(&region.key),
        })
        .collect()
}

/// Labels of the regions covering `point`, in index order.
pub fn lookup_point(worldspace: &Worldspace, clip_to_bounds: bool, point: GridPoint) -> Vec<String> {
    let index = RegionIndex::for_worldspace(worldspace, clip_to_bounds);
    index
        .lookup(point)
        .iter()
        .map(|id| {
            worldspace
                .regions
                .iter()
                .find(|region| &region.key == id)
                .map_or_else(|| id.to_string(), |region| region.label())
        })
        .collect()
}

fn worldspace_label(worldspace: &Worldspace) -> String {
    worldspace
        .editor_id
        .as_deref()
        .filter(|editor_id| !editor_id.is_empty())
        .map_or_else(|| worldspace.key.to_string(), str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(snapshot: &str, output: Option<&str>) -> PatchRequest {
        PatchRequest {
            snapshot: PathBuf::from(snapshot),
            settings: Settings::default(),
            output: output.map(PathBuf::from),
            dry_run: false,
        }
    }

    #[test]
    fn output_defaults_next_to_snapshot() {
        assert_eq!(
            request("data/skyrim.json", None).output_path(),
            PathBuf::from("data/UniqueRegionNamesPatcher.esp.json")
        );
    }

    #[test]
    fn explicit_output_wins() {
        assert_eq!(
            request("data/skyrim.json", Some("out/patch.json")).output_path(),
            PathBuf::from("out/patch.json")
        );
    }
}
