//! Simulated GPU devices.
//!
//! Lets the report run on machines without CUDA, and gives tests a
//! deterministic device list. Presets mirror the hardware in the target
//! cluster plus one datacenter part:
//! - Molly: 2x GTX 1070 (8 GB each)
//! - Wintermute: 2x Quadro M6000 (24 GB each)
//! - A100: 1x A100-SXM4-40GB

use tracing::debug;

use super::device::{DeviceApi, DeviceProperties, QueryError};

const GIB: usize = 1024 * 1024 * 1024;

/// An in-memory [`DeviceApi`].
#[derive(Debug, Clone, Default)]
pub struct SimulatedDevices {
    devices: Vec<DeviceProperties>,

    /// When set, `device_count` fails with this driver message.
    count_failure: Option<String>,
}

impl SimulatedDevices {
    /// Simulate the given devices. Indices are reassigned in list order.
    pub fn new(devices: Vec<DeviceProperties>) -> Self {
        let devices = devices
            .into_iter()
            .enumerate()
            .map(|(index, props)| DeviceProperties { index, ..props })
            .collect();

        Self {
            devices,
            count_failure: None,
        }
    }

    /// A backend whose device-count query always fails.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            devices: Vec::new(),
            count_failure: Some(message.into()),
        }
    }
}

impl DeviceApi for SimulatedDevices {
    fn device_count(&self) -> Result<usize, QueryError> {
        if let Some(message) = &self.count_failure {
            return Err(QueryError::Driver(message.clone()));
        }
        debug!(count = self.devices.len(), "Simulated device count");
        Ok(self.devices.len())
    }

    fn properties(&self, index: usize) -> Result<DeviceProperties, QueryError> {
        self.devices
            .get(index)
            .cloned()
            .ok_or(QueryError::InvalidDevice {
                index,
                count: self.devices.len(),
            })
    }
}

pub fn gtx_1070() -> DeviceProperties {
    DeviceProperties {
        index: 0,
        name: "NVIDIA GeForce GTX 1070".to_string(),
        major: 6,
        minor: 1,
        multiprocessor_count: 15,
        clock_rate_khz: 1_683_000,
        memory_clock_rate_khz: 4_004_000,
        memory_bus_width: 256,
        total_global_mem: 8 * GIB,
        shared_mem_per_block: 48 * 1024,
    }
}

pub fn quadro_m6000() -> DeviceProperties {
    DeviceProperties {
        index: 0,
        name: "NVIDIA Quadro M6000".to_string(),
        major: 5,
        minor: 2,
        multiprocessor_count: 24,
        clock_rate_khz: 1_114_000,
        memory_clock_rate_khz: 3_305_000,
        memory_bus_width: 384,
        total_global_mem: 24 * GIB,
        shared_mem_per_block: 48 * 1024,
    }
}

pub fn a100_sxm4_40gb() -> DeviceProperties {
    DeviceProperties {
        index: 0,
        name: "NVIDIA A100-SXM4-40GB".to_string(),
        major: 8,
        minor: 0,
        multiprocessor_count: 108,
        clock_rate_khz: 1_410_000,
        memory_clock_rate_khz: 1_215_000,
        memory_bus_width: 5120,
        total_global_mem: 40 * GIB,
        shared_mem_per_block: 48 * 1024,
    }
}

pub fn stub_devices_molly() -> SimulatedDevices {
    SimulatedDevices::new(vec![gtx_1070(), gtx_1070()])
}

pub fn stub_devices_wintermute() -> SimulatedDevices {
    SimulatedDevices::new(vec![quadro_m6000(), quadro_m6000()])
}

pub fn stub_devices_a100() -> SimulatedDevices {
    SimulatedDevices::new(vec![a100_sxm4_40gb()])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stub_devices() {
        let molly = stub_devices_molly();
        assert_eq!(molly.device_count().unwrap(), 2);
        assert_eq!(molly.properties(0).unwrap().total_global_mem, 8 * GIB);
        assert_eq!(molly.properties(1).unwrap().index, 1);

        let wintermute = stub_devices_wintermute();
        assert_eq!(wintermute.device_count().unwrap(), 2);
        assert_eq!(wintermute.properties(0).unwrap().total_global_mem, 24 * GIB);
    }

    #[test]
    fn test_out_of_range() {
        let a100 = stub_devices_a100();
        let err = a100.properties(1).unwrap_err();
        assert!(matches!(err, QueryError::InvalidDevice { index: 1, count: 1 }));
    }

    #[test]
    fn test_failing_count() {
        let api = SimulatedDevices::failing("CUDA_ERROR_NOT_INITIALIZED");
        let err = api.device_count().unwrap_err();
        assert!(err.to_string().contains("CUDA_ERROR_NOT_INITIALIZED"));
    }
}
