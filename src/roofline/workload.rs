//! Reference workloads and memory/compute-bound classification.
//!
//! Intensities are illustrative FP32 figures, not measurements.

use std::fmt;

/// Which ceiling limits a workload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundedness {
    MemoryBound,
    ComputeBound,
}

impl fmt::Display for Boundedness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Boundedness::MemoryBound => f.write_str("memory-bound"),
            Boundedness::ComputeBound => f.write_str("compute-bound"),
        }
    }
}

/// Memory-bound iff `intensity < ridge_point`. A workload sitting exactly on
/// the ridge point is compute-bound.
pub fn classify(intensity: f64, ridge_point: f64) -> Boundedness {
    if intensity < ridge_point {
        Boundedness::MemoryBound
    } else {
        Boundedness::ComputeBound
    }
}

/// A well-known operation with a typical arithmetic intensity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceWorkload {
    pub name: &'static str,

    /// Intensity as shown in the report (FLOP/byte).
    pub intensity_label: &'static str,

    /// Intensity compared against the ridge point (FLOP/byte).
    pub intensity: f64,
}

impl ReferenceWorkload {
    pub fn classify(&self, ridge_point: f64) -> Boundedness {
        classify(self.intensity, ridge_point)
    }
}

pub const REFERENCE_WORKLOADS: &[ReferenceWorkload] = &[
    ReferenceWorkload {
        name: "Vector addition",
        intensity_label: "~0.33",
        intensity: 0.33,
    },
    ReferenceWorkload {
        name: "Matrix-vector product",
        intensity_label: "~2",
        intensity: 2.0,
    },
    ReferenceWorkload {
        name: "Small dense matrix product",
        intensity_label: "~8",
        intensity: 8.0,
    },
    ReferenceWorkload {
        name: "Large dense matrix product",
        intensity_label: "~40+",
        intensity: 40.0,
    },
    ReferenceWorkload {
        name: "Large-kernel convolution",
        intensity_label: "~20-100",
        intensity: 50.0,
    },
];

pub const MEMORY_BOUND_GUIDANCE: &[&str] = &[
    "Coalesce global memory accesses so each warp touches contiguous addresses",
    "Reuse data through shared memory or registers (tiling, blocking)",
    "Fuse adjacent kernels to avoid round trips through global memory",
    "Use narrower data types (FP16/BF16/INT8) to move fewer bytes",
];

pub const COMPUTE_BOUND_GUIDANCE: &[&str] = &[
    "Use fused multiply-add and tensor core instructions where available",
    "Raise occupancy and instruction-level parallelism to hide latency",
    "Avoid warp divergence in hot loops",
    "Prefer reduced precision arithmetic when accuracy allows",
];

/// Fixed optimization advice for a category.
pub fn guidance(bound: Boundedness) -> &'static [&'static str] {
    match bound {
        Boundedness::MemoryBound => MEMORY_BOUND_GUIDANCE,
        Boundedness::ComputeBound => COMPUTE_BOUND_GUIDANCE,
    }
}
