//! GPU device properties and the device query interface.
//!
//! [`DeviceApi`] is the seam between the report and whatever enumerates
//! devices: the CUDA driver when compiled with the `cuda` feature, or the
//! in-memory presets in [`super::simulated`].

use thiserror::Error;

#[derive(Error, Debug)]
pub enum QueryError {
    #[error("CUDA driver error: {0}")]
    Driver(String),

    #[error("Device {index} out of range ({count} devices present)")]
    InvalidDevice { index: usize, count: usize },
}

/// Static hardware attributes of a single GPU device.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceProperties {
    /// Device index.
    pub index: usize,

    /// Device name (e.g., "NVIDIA GeForce GTX 1070").
    pub name: String,

    /// Compute capability major version.
    pub major: u32,

    /// Compute capability minor version.
    pub minor: u32,

    /// Number of streaming multiprocessors.
    pub multiprocessor_count: u32,

    /// Peak core clock in kHz.
    pub clock_rate_khz: u32,

    /// Peak memory clock in kHz.
    pub memory_clock_rate_khz: u32,

    /// Global memory bus width in bits.
    pub memory_bus_width: u32,

    /// Total global memory in bytes.
    pub total_global_mem: usize,

    /// Shared memory available per block in bytes.
    pub shared_mem_per_block: usize,
}

impl DeviceProperties {
    /// Compute capability as (major, minor).
    pub fn compute_capability(&self) -> (u32, u32) {
        (self.major, self.minor)
    }

    /// Core clock in MHz.
    pub fn clock_rate_mhz(&self) -> f64 {
        f64::from(self.clock_rate_khz) / 1000.0
    }

    /// Memory clock in MHz.
    pub fn memory_clock_rate_mhz(&self) -> f64 {
        f64::from(self.memory_clock_rate_khz) / 1000.0
    }
}

/// Enumerates devices and reads their properties.
pub trait DeviceApi {
    /// Number of devices visible to this backend.
    fn device_count(&self) -> Result<usize, QueryError>;

    /// Properties of the device at `index` (`0..device_count()`).
    fn properties(&self, index: usize) -> Result<DeviceProperties, QueryError>;
}
