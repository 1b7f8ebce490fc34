//! Command-line configuration for gpu-roofline.
//!
//! The report itself takes no parameters; flags only pick the device
//! backend and tune logging.

use clap::{Parser, ValueEnum};

use crate::gpu::cuda::CudaDriver;
use crate::gpu::device::DeviceApi;
use crate::gpu::simulated::{
    stub_devices_a100, stub_devices_molly, stub_devices_wintermute, SimulatedDevices,
};

/// Command-line arguments.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "gpu-roofline",
    version,
    about = "Theoretical roofline report for every detected CUDA GPU"
)]
pub struct Cli {
    /// Enable verbose logging.
    #[arg(short, long)]
    pub verbose: bool,

    /// Log line format (logs go to stderr).
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    /// Report on simulated devices instead of querying the CUDA driver.
    #[arg(long, value_enum)]
    pub simulate: Option<Preset>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

/// Built-in simulated device sets.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// 2x GeForce GTX 1070
    Molly,
    /// 2x Quadro M6000
    Wintermute,
    /// 1x A100-SXM4-40GB
    A100,
    /// No devices
    #[value(name = "none")]
    Empty,
    /// Device-count query fails as if the driver were not initialised
    #[value(name = "driver-failure", hide = true)]
    DriverFailure,
}

impl Preset {
    pub fn devices(self) -> SimulatedDevices {
        match self {
            Preset::Molly => stub_devices_molly(),
            Preset::Wintermute => stub_devices_wintermute(),
            Preset::A100 => stub_devices_a100(),
            Preset::Empty => SimulatedDevices::default(),
            Preset::DriverFailure => SimulatedDevices::failing("CUDA_ERROR_NOT_INITIALIZED"),
        }
    }
}

impl Cli {
    /// Default `tracing` filter directive when `RUST_LOG` is unset.
    pub fn log_filter(&self) -> &'static str {
        if self.verbose {
            "gpu_roofline=debug"
        } else {
            "gpu_roofline=info"
        }
    }

    /// The device backend selected by the flags.
    pub fn device_api(&self) -> Box<dyn DeviceApi> {
        match self.simulate {
            Some(preset) => Box::new(preset.devices()),
            None => Box::new(CudaDriver::new()),
        }
    }
}
