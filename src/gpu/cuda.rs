//! CUDA driver backend.
//!
//! With the `cuda` feature enabled, uses cudarc to enumerate devices and read
//! their attributes. Without it, reports no devices (CPU-only mode).

#[cfg(feature = "cuda")]
use std::sync::Arc;

#[cfg(feature = "cuda")]
use cudarc::driver::{sys::CUdevice_attribute as Attr, CudaContext, DriverError};
#[cfg(feature = "cuda")]
use tracing::debug;

use super::device::{DeviceApi, DeviceProperties, QueryError};

/// Device queries backed by the CUDA driver API.
#[derive(Debug, Default, Clone, Copy)]
pub struct CudaDriver;

impl CudaDriver {
    pub fn new() -> Self {
        Self
    }
}

#[cfg(feature = "cuda")]
fn driver_error(err: DriverError) -> QueryError {
    QueryError::Driver(format!("{err:?}"))
}

#[cfg(feature = "cuda")]
fn attribute(ctx: &Arc<CudaContext>, attr: Attr) -> Result<u32, QueryError> {
    let value = ctx.attribute(attr).map_err(driver_error)?;
    Ok(value.max(0) as u32)
}

impl DeviceApi for CudaDriver {
    #[cfg(feature = "cuda")]
    fn device_count(&self) -> Result<usize, QueryError> {
        let count = CudaContext::device_count().map_err(driver_error)?;
        debug!(count, "CUDA device count");
        Ok(count.max(0) as usize)
    }

    #[cfg(not(feature = "cuda"))]
    fn device_count(&self) -> Result<usize, QueryError> {
        tracing::info!("CUDA not enabled, running in CPU-only mode");
        Ok(0)
    }

    #[cfg(feature = "cuda")]
    fn properties(&self, index: usize) -> Result<DeviceProperties, QueryError> {
        let ctx = CudaContext::new(index).map_err(driver_error)?;
        let name = ctx.name().map_err(driver_error)?;
        // SAFETY: `cu_device` is a valid handle for the lifetime of `ctx`,
        // and the driver was initialised by `CudaContext::new`.
        let total_global_mem =
            unsafe { cudarc::driver::result::device::total_mem(ctx.cu_device()) }
                .map_err(driver_error)?;

        let props = DeviceProperties {
            index,
            name,
            major: attribute(&ctx, Attr::CU_DEVICE_ATTRIBUTE_COMPUTE_CAPABILITY_MAJOR)?,
            minor: attribute(&ctx, Attr::CU_DEVICE_ATTRIBUTE_COMPUTE_CAPABILITY_MINOR)?,
            multiprocessor_count: attribute(&ctx, Attr::CU_DEVICE_ATTRIBUTE_MULTIPROCESSOR_COUNT)?,
            clock_rate_khz: attribute(&ctx, Attr::CU_DEVICE_ATTRIBUTE_CLOCK_RATE)?,
            memory_clock_rate_khz: attribute(&ctx, Attr::CU_DEVICE_ATTRIBUTE_MEMORY_CLOCK_RATE)?,
            memory_bus_width: attribute(&ctx, Attr::CU_DEVICE_ATTRIBUTE_GLOBAL_MEMORY_BUS_WIDTH)?,
            total_global_mem,
            shared_mem_per_block: attribute(
                &ctx,
                Attr::CU_DEVICE_ATTRIBUTE_MAX_SHARED_MEMORY_PER_BLOCK,
            )? as usize,
        };

        debug!(device = index, name = %props.name, "Read CUDA device properties");
        Ok(props)
    }

    #[cfg(not(feature = "cuda"))]
    fn properties(&self, index: usize) -> Result<DeviceProperties, QueryError> {
        Err(QueryError::InvalidDevice { index, count: 0 })
    }
}
