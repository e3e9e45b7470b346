pub mod charts;
pub mod context;
pub mod dataset;
pub mod error;
pub mod index;
pub mod views;

#[cfg(test)]
pub mod testing;

pub use context::DashboardContext;
pub use dataset::DataPaths;
pub use error::{ComputeError, Result};
