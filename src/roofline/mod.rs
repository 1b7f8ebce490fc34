//! Roofline model derived from static device attributes.
//!
//! - [`arch`]: compute capability → architecture family and cores per SM
//! - [`estimate`]: peak throughput, peak bandwidth and ridge point
//! - [`workload`]: reference workloads and their classification

pub mod arch;
pub mod estimate;
pub mod workload;
