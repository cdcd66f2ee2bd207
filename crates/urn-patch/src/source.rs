//! Collaborator interfaces the patcher consumes.

use tracing::{Level, info, warn};
use urn_model::{CellRecord, FormKey};

use crate::error::SourceError;
use crate::event::PatchEvent;

/// Resolves a cell's owning worldspace.
pub trait ParentResolver {
    /// `Ok(None)` when the cell has no resolvable worldspace parent.
    fn resolve_parent(&self, cell: &CellRecord) -> Result<Option<FormKey>, SourceError>;
}

/// Produces writable copies of cells scoped to the output patch.
pub trait OverrideSink {
    /// Returns the override for `cell`, creating it from `cell` on first use.
    /// Later calls for the same key return the same override.
    fn get_or_add_override(&mut self, cell: &CellRecord) -> Result<&mut CellRecord, SourceError>;
}

/// Receives one event per reported cell.
pub trait LogSink {
    fn record(&mut self, event: &PatchEvent);
}

/// Keeps every event in memory.
#[derive(Debug, Default)]
pub struct VecLogSink {
    pub events: Vec<PatchEvent>,
}

impl VecLogSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.events.iter().map(ToString::to_string).collect()
    }
}

impl LogSink for VecLogSink {
    fn record(&mut self, event: &PatchEvent) {
        self.events.push(event.clone());
    }
}

/// Forwards events to `tracing` at their [`PatchEvent::level`].
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogSink;

impl LogSink for TracingLogSink {
    fn record(&mut self, event: &PatchEvent) {
        let cell = event.cell();
        let grid = event.grid();
        let added = event.added();
        if event.level() == Level::WARN {
            warn!(cell = %cell, grid = ?grid, "{event}");
        } else {
            info!(cell = %cell, grid = ?grid, added, "{event}");
        }
    }
}

impl<L: LogSink + ?Sized> LogSink for &mut L {
    fn record(&mut self, event: &PatchEvent) {
        (**self).record(event);
    }
}
