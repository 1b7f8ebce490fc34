//! Theoretical peak throughput, peak bandwidth and the ridge point.

use tracing::{debug, warn};

use super::arch::{self, Architecture};
use crate::gpu::device::DeviceProperties;

/// Peak FP32 throughput in TFLOP/s for a clock given in MHz.
///
/// Each core retires one fused multiply-add (two operations) per cycle.
pub fn peak_throughput(sm_count: u32, cores_per_sm: u32, clock_mhz: f64) -> f64 {
    f64::from(sm_count) * f64::from(cores_per_sm) * clock_mhz * 2.0 / 1e6
}

/// Peak memory bandwidth in GB/s for a memory clock given in MHz.
///
/// The factor 2 is double data rate; `/ 8000` turns bits into bytes and
/// MB/s into GB/s.
pub fn peak_bandwidth(memory_clock_mhz: f64, bus_width_bits: u32) -> f64 {
    memory_clock_mhz * 2.0 * f64::from(bus_width_bits) / 8000.0
}

/// Arithmetic intensity (operations per byte) where the compute and
/// bandwidth ceilings meet. `None` when bandwidth is not positive.
pub fn ridge_point(ops_per_sec: f64, bytes_per_sec: f64) -> Option<f64> {
    if bytes_per_sec > 0.0 {
        Some(ops_per_sec / bytes_per_sec)
    } else {
        None
    }
}

/// Roofline ceilings of one device.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RooflineEstimate {
    /// Architecture family from the compute capability.
    pub arch: Architecture,

    /// Cores per SM used for the throughput estimate.
    pub cores_per_sm: u32,

    /// False when `cores_per_sm` is the fallback for an unknown capability.
    pub cores_known: bool,

    /// Peak arithmetic throughput in operations/second.
    pub peak_ops_per_sec: f64,

    /// Peak memory bandwidth in bytes/second.
    pub peak_bytes_per_sec: f64,

    /// Ridge point in operations/byte.
    pub ridge_point: Option<f64>,
}

impl RooflineEstimate {
    pub fn from_properties(props: &DeviceProperties) -> Self {
        let entry = arch::lookup(props.major, props.minor);
        let cores = arch::cores_per_sm(props.major, props.minor);
        if entry.is_none() {
            warn!(
                device = props.index,
                major = props.major,
                minor = props.minor,
                cores_per_sm = cores,
                "Unknown compute capability, using default cores per SM"
            );
        }

        let tflops = peak_throughput(props.multiprocessor_count, cores, props.clock_rate_mhz());
        let gbs = peak_bandwidth(props.memory_clock_rate_mhz(), props.memory_bus_width);

        let peak_ops_per_sec = tflops * 1e12;
        let peak_bytes_per_sec = gbs * 1e9;
        let ridge = ridge_point(peak_ops_per_sec, peak_bytes_per_sec);
        if ridge.is_none() {
            warn!(device = props.index, "Memory bandwidth is zero, ridge point undefined");
        }

        let estimate = Self {
            arch: Architecture::from_compute_capability(props.major, props.minor),
            cores_per_sm: cores,
            cores_known: entry.is_some(),
            peak_ops_per_sec,
            peak_bytes_per_sec,
            ridge_point: ridge,
        };

        debug!(
            device = props.index,
            tflops = estimate.peak_tflops(),
            bandwidth_gbs = estimate.peak_bandwidth_gbs(),
            ridge_point = ?estimate.ridge_point,
            "Roofline estimate"
        );
        estimate
    }

    pub fn peak_tflops(&self) -> f64 {
        self.peak_ops_per_sec / 1e12
    }

    pub fn peak_gflops(&self) -> f64 {
        self.peak_ops_per_sec / 1e9
    }

    pub fn peak_bandwidth_gbs(&self) -> f64 {
        self.peak_bytes_per_sec / 1e9
    }

    /// Attainable GFLOP/s at the given intensity: min(peak, bandwidth × AI).
    pub fn attainable_gflops(&self, intensity: f64) -> f64 {
        (self.peak_bandwidth_gbs() * intensity).min(self.peak_gflops())
    }
}
