//! Per-cell log events emitted during a patch run.

use std::fmt;

use tracing::Level;
use urn_model::{FormKey, GridPoint};

/// Something worth reporting about one cell.
///
/// Interior cells and cells of other worldspaces are skipped without an
/// event; they only show up in the [`crate::PatchSummary`] counters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchEvent {
    /// Exterior cell without a grid position.
    MissingGrid { cell: FormKey, label: String },
    /// The worldspace's persistent cell.
    PersistentCell { cell: FormKey },
    /// No region covers the cell's grid point.
    NoRegionData {
        cell: FormKey,
        label: String,
        grid: GridPoint,
    },
    /// The cell already lists every resolved region.
    NoNewRegions {
        cell: FormKey,
        label: String,
        grid: GridPoint,
    },
    /// An override was written with `added` of the `resolved` regions.
    RegionsAdded {
        cell: FormKey,
        label: String,
        grid: GridPoint,
        added: usize,
        resolved: usize,
    },
}

impl PatchEvent {
    pub fn cell(&self) -> &FormKey {
        match self {
            Self::MissingGrid { cell, .. }
            | Self::PersistentCell { cell }
            | Self::NoRegionData { cell, .. }
            | Self::NoNewRegions { cell, .. }
            | Self::RegionsAdded { cell, .. } => cell,
        }
    }

    /// Grid point of the cell, when it has one.
    pub fn grid(&self) -> Option<GridPoint> {
        match self {
            Self::NoRegionData { grid, .. }
            | Self::NoNewRegions { grid, .. }
            | Self::RegionsAdded { grid, .. } => Some(*grid),
            Self::MissingGrid { .. } | Self::PersistentCell { .. } => None,
        }
    }

    /// Regions appended to the cell's override, zero for every other event.
    pub fn added(&self) -> usize {
        match self {
            Self::RegionsAdded { added, .. } => *added,
            _ => 0,
        }
    }

    /// Severity the event is logged at. Only a gridless exterior cell warns.
    pub fn level(&self) -> Level {
        match self {
            Self::MissingGrid { .. } => Level::WARN,
            _ => Level::INFO,
        }
    }

    /// True when the event stands for a written override.
    pub fn is_mutation(&self) -> bool {
        matches!(self, Self::RegionsAdded { added, .. } if *added > 0)
    }
}

impl fmt::Display for PatchEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingGrid { label, .. } => {
                write!(f, "Exterior cell '{label}' does not have a grid position")
            }
            Self::PersistentCell { cell } => {
                write!(f, "Skipping persistent worldspace cell '{}'", cell.id_string())
            }
            Self::NoRegionData { label, grid, .. } => {
                write!(f, "No region data found for exterior cell '{label}' {grid}")
            }
            Self::NoNewRegions { label, grid, .. } => {
                write!(f, "No new regions to add to exterior cell '{label}' {grid}")
            }
            Self::RegionsAdded {
                label, grid, added, ..
            } => {
                let noun = if *added == 1 { "region" } else { "regions" };
                write!(f, "Added {added} {noun} to exterior cell '{label}' {grid}")
            }
        }
    }
}
