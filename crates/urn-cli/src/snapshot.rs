//! JSON plugin snapshots and patch output.
//!
//! A snapshot is the load order already flattened to winning overrides:
//! every worldspace with its region list, followed by every cell record in
//! priority order.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use urn_model::{CellRecord, FormKey, Worldspace};
use urn_patch::{ParentResolver, PatchPlugin, SourceError};

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("failed to read snapshot {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse snapshot {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("worldspace {identity:?} not found in snapshot")]
    UnknownWorldspace { identity: String },

    #[error("failed to write patch {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub worldspaces: Vec<Worldspace>,
    /// Winning cell overrides in load-order priority.
    #[serde(default)]
    pub cells: Vec<CellRecord>,
}

impl Snapshot {
    pub fn load(path: &Path) -> Result<Self, SnapshotError> {
        let file = File::open(path).map_err(|source| SnapshotError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_reader(BufReader::new(file)).map_err(|source| SnapshotError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Find a worldspace by form key or editor id.
    pub fn worldspace(&self, identity: &str) -> Result<&Worldspace, SnapshotError> {
        self.worldspaces
            .iter()
            .find(|worldspace| worldspace.matches(identity))
            .ok_or_else(|| SnapshotError::UnknownWorldspace {
                identity: identity.to_string(),
            })
    }

    /// Cell records in priority order.
    pub fn cells(&self) -> impl Iterator<Item = Result<CellRecord, SourceError>> + '_ {
        self.cells.iter().cloned().map(Ok)
    }
}

impl ParentResolver for Snapshot {
    fn resolve_parent(&self, cell: &CellRecord) -> Result<Option<FormKey>, SourceError> {
        let Some(parent) = &cell.worldspace else {
            return Ok(None);
        };
        Ok(self
            .worldspaces
            .iter()
            .any(|worldspace| &worldspace.key == parent)
            .then(|| parent.clone()))
    }
}

/// Write `plugin` as pretty-printed JSON.
pub fn write_patch(plugin: &PatchPlugin, path: &Path) -> Result<(), SnapshotError> {
    let write_error = |source| SnapshotError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(write_error)?;
    }
    let file = File::create(path).map_err(write_error)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, plugin)
        .map_err(|error| write_error(std::io::Error::other(error)))?;
    writer.write_all(b"\n").map_err(write_error)?;
    writer.flush().map_err(write_error)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SNAPSHOT: &str = r#"{
        "worldspaces": [
            {"key": "00003C:Skyrim.esm", "editor_id": "Tamriel"},
            {"key": "03CE0F:Dragonborn.esm", "editor_id": "DLC2SolstheimWorld"}
        ],
        "cells": [
            {"key": "000A01:Skyrim.esm", "grid": {"x": 1, "y": 1}, "worldspace": "00003C:Skyrim.esm"},
            {"key": "000A02:Skyrim.esm", "grid": {"x": 1, "y": 2}, "worldspace": "0FFFFF:Gone.esp"},
            {"key": "000A03:Skyrim.esm", "flags": {"interior": true}}
        ]
    }"#;

    fn snapshot() -> Snapshot {
        serde_json::from_str(SNAPSHOT).unwrap()
    }

    #[test]
    fn finds_worldspace_by_key_or_editor_id() {
        let snapshot = snapshot();
        assert_eq!(
            snapshot.worldspace("dlc2solstheimworld").unwrap().key.to_string(),
            "03CE0F:Dragonborn.esm"
        );
        assert_eq!(
            snapshot.worldspace("00003C:Skyrim.esm").unwrap().editor_id.as_deref(),
            Some("Tamriel")
        );
        assert!(matches!(
            snapshot.worldspace("Blackreach"),
            Err(SnapshotError::UnknownWorldspace { .. })
        ));
    }

    #[test]
    fn dangling_and_missing_parents_resolve_to_none() {
        let snapshot = snapshot();
        let parents: Vec<_> = snapshot
            .cells
            .iter()
            .map(|cell| snapshot.resolve_parent(cell).unwrap())
            .collect();
        assert_eq!(parents[0], Some("00003C:Skyrim.esm".parse().unwrap()));
        assert_eq!(parents[1], None);
        assert_eq!(parents[2], None);
    }

    #[test]
    fn cells_keep_snapshot_order() {
        let snapshot = snapshot();
        let keys: Vec<String> = snapshot
            .cells()
            .map(|cell| cell.unwrap().key.to_string())
            .collect();
        assert_eq!(
            keys,
            vec!["000A01:Skyrim.esm", "000A02:Skyrim.esm", "000A03:Skyrim.esm"]
        );
    }

    #[test]
    fn load_reports_path_on_bad_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();
        let error = Snapshot::load(&path).unwrap_err();
        assert!(matches!(error, SnapshotError::Json { .. }));
        assert!(error.to_string().contains("broken.json"));
    }
}
