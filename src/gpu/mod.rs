//! GPU device discovery.
//!
//! - [`device`]: device properties and the query interface
//! - [`cuda`]: CUDA driver backend
//! - [`simulated`]: in-memory devices for CPU-only runs and tests

pub mod cuda;
pub mod device;
pub mod simulated;
