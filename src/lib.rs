//! gpu-roofline: theoretical roofline numbers for CUDA GPUs.
//!
//! Reads static hardware attributes of every detected device and derives:
//!   peak FP32 throughput  (SMs × cores/SM × clock × 2)
//!   peak memory bandwidth (memory clock × 2 × bus width)
//!   ridge point           (throughput / bandwidth, FLOP/byte)
//!
//! Reference workloads are then classified as memory- or compute-bound
//! against the ridge point and printed as a plain-text report.

pub mod config;
pub mod gpu;
pub mod report;
pub mod roofline;
