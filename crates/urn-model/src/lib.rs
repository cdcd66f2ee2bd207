//! Record model shared by the region index and the cell patcher.

pub mod area;
pub mod cell;
pub mod error;
pub mod grid;
pub mod ids;
pub mod region;

pub use area::{Coverage, CoverageArea};
pub use cell::{CellFlags, CellRecord};
pub use error::ModelError;
pub use grid::{GridBounds, GridPoint};
pub use ids::{FormKey, RegionId};
pub use region::{RegionDefinition, Worldspace};
