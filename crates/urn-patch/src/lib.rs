//! Cell traversal and region merge.
//!
//! [`CellPatcher`] walks cell records in the order the data source hands them
//! over, skips cells that cannot carry regions, resolves each remaining cell's
//! grid point through a [`urn_index::RegionIndex`] and adds the missing region
//! ids to an override copy of the cell.

#![deny(unsafe_code)]

pub mod error;
pub mod event;
pub mod merge;
pub mod patcher;
pub mod plugin;
pub mod source;

pub use error::{PatchError, SourceError};
pub use event::PatchEvent;
pub use merge::{add_missing_regions, contains_all};
pub use patcher::{CellFilter, CellPatcher, PatchSummary};
pub use plugin::PatchPlugin;
pub use source::{LogSink, OverrideSink, ParentResolver, TracingLogSink, VecLogSink};
