//! Spatial region resolution for exterior cells.
//!
//! [`RegionIndex`] is built once from a worldspace's region list and then
//! answers "which regions cover this grid point" with a single hash lookup.

#![deny(unsafe_code)]

mod index;

pub use index::{RegionIndex, RegionIndexBuilder};
