//! Library side of the region patcher CLI: settings, snapshot IO, logging and
//! the patch pipeline.

pub mod logging;
pub mod pipeline;
pub mod settings;
pub mod snapshot;
