//! Plain-text roofline report.
//!
//! [`run`] walks every device in index order and writes one section per
//! device as soon as its properties are read. The first failed query aborts
//! the walk; sections already written stay written.

use std::io::{self, Write};

use thiserror::Error;
use tracing::{debug, info};

use crate::gpu::device::{DeviceApi, DeviceProperties, QueryError};
use crate::roofline::estimate::RooflineEstimate;
use crate::roofline::workload::{guidance, Boundedness, REFERENCE_WORKLOADS};

/// Width of the rule printed between device sections.
pub const SEPARATOR_WIDTH: usize = 72;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Failed to query device count: {0}")]
    DeviceCount(QueryError),

    #[error("Failed to query properties of device {index}: {error}")]
    DeviceProperties { index: usize, error: QueryError },

    #[error("No CUDA-capable devices detected")]
    NoDevicesFound,

    #[error("Failed to write report: {0}")]
    Io(#[from] io::Error),
}

/// The rule line separating device sections.
pub fn separator() -> String {
    "=".repeat(SEPARATOR_WIDTH)
}

/// Report every device visible through `api`. Returns the device count.
pub fn run<W: Write>(api: &dyn DeviceApi, out: &mut W) -> Result<usize, ReportError> {
    let count = api.device_count().map_err(ReportError::DeviceCount)?;
    info!(count, "Detected devices");
    if count == 0 {
        return Err(ReportError::NoDevicesFound);
    }

    for index in 0..count {
        let props = api
            .properties(index)
            .map_err(|error| ReportError::DeviceProperties { index, error })?;
        debug!(
            device = index,
            name = %props.name,
            major = props.major,
            minor = props.minor,
            sms = props.multiprocessor_count,
            "Device properties"
        );

        let estimate = RooflineEstimate::from_properties(&props);
        if index > 0 {
            writeln!(out, "{}", separator())?;
        }
        write_device_report(out, &props, &estimate)?;
    }

    out.flush()?;
    Ok(count)
}

/// Write the report section for one device.
pub fn write_device_report<W: Write>(
    out: &mut W,
    props: &DeviceProperties,
    estimate: &RooflineEstimate,
) -> io::Result<()> {
    write_device_info(out, props, estimate)?;
    writeln!(out)?;
    write_peaks(out, estimate)?;
    writeln!(out)?;
    write_workloads(out, estimate)?;
    writeln!(out)?;
    write_guidance(out)?;
    writeln!(out)?;
    write_plot_values(out, estimate)
}

/// Render one device section to a string.
pub fn render_device_report(props: &DeviceProperties, estimate: &RooflineEstimate) -> String {
    let mut buf = Vec::new();
    write_device_report(&mut buf, props, estimate).expect("writing to a Vec cannot fail");
    String::from_utf8_lossy(&buf).into_owned()
}

fn write_device_info<W: Write>(
    out: &mut W,
    props: &DeviceProperties,
    estimate: &RooflineEstimate,
) -> io::Result<()> {
    let cores_note = if estimate.cores_known {
        ""
    } else {
        " (default, unknown architecture)"
    };

    let (major, minor) = props.compute_capability();

    writeln!(out, "Device {}: {}", props.index, props.name)?;
    writeln!(
        out,
        "  Compute capability:        {major}.{minor} ({})",
        estimate.arch
    )?;
    writeln!(out, "  Streaming multiprocessors: {}", props.multiprocessor_count)?;
    writeln!(
        out,
        "  FP32 cores per SM:         {}{}",
        estimate.cores_per_sm, cores_note
    )?;
    writeln!(out, "  Core clock:                {:.1} MHz", props.clock_rate_mhz())?;
    writeln!(
        out,
        "  Memory clock:              {:.1} MHz",
        props.memory_clock_rate_mhz()
    )?;
    writeln!(out, "  Memory bus width:          {} bits", props.memory_bus_width)?;
    writeln!(
        out,
        "  Global memory:             {:.2} GiB",
        props.total_global_mem as f64 / (1024.0 * 1024.0 * 1024.0)
    )?;
    writeln!(
        out,
        "  Shared memory per block:   {:.1} KiB",
        props.shared_mem_per_block as f64 / 1024.0
    )
}

fn write_peaks<W: Write>(out: &mut W, estimate: &RooflineEstimate) -> io::Result<()> {
    writeln!(out, "Theoretical peaks")?;
    writeln!(
        out,
        "  Peak FP32 throughput:      {:.2} TFLOP/s ({:.2} GFLOP/s)",
        estimate.peak_tflops(),
        estimate.peak_gflops()
    )?;
    writeln!(
        out,
        "  Peak memory bandwidth:     {:.2} GB/s",
        estimate.peak_bandwidth_gbs()
    )?;
    match estimate.ridge_point {
        Some(ridge) => writeln!(out, "  Ridge point:               {ridge:.2} FLOP/byte"),
        None => writeln!(
            out,
            "  Ridge point:               undefined (memory bandwidth is zero)"
        ),
    }
}

fn write_workloads<W: Write>(out: &mut W, estimate: &RooflineEstimate) -> io::Result<()> {
    writeln!(
        out,
        "  {:<28}{:>9}  {:>16}   {}",
        "Reference workload", "FLOP/byte", "attainable", "bound"
    )?;
    for workload in REFERENCE_WORKLOADS {
        let label = match estimate.ridge_point {
            Some(ridge) => workload.classify(ridge).to_string(),
            None => "unclassified".to_string(),
        };
        let attainable = format!(
            "{:.2} GFLOP/s",
            estimate.attainable_gflops(workload.intensity)
        );
        writeln!(
            out,
            "  {:<28}{:>9}  {:>16}   {}",
            workload.name, workload.intensity_label, attainable, label
        )?;
    }
    Ok(())
}

fn write_guidance<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "Optimization guidance")?;
    for bound in [Boundedness::MemoryBound, Boundedness::ComputeBound] {
        writeln!(out, "  {bound} workloads:")?;
        for line in guidance(bound) {
            writeln!(out, "    - {line}")?;
        }
    }
    Ok(())
}

fn write_plot_values<W: Write>(out: &mut W, estimate: &RooflineEstimate) -> io::Result<()> {
    writeln!(out, "Roofline plot")?;
    writeln!(
        out,
        "  Compute ceiling (horizontal): y = {:.2} GFLOP/s",
        estimate.peak_gflops()
    )?;
    writeln!(
        out,
        "  Bandwidth ceiling (slope):    y = {:.2} GB/s x intensity",
        estimate.peak_bandwidth_gbs()
    )?;
    match estimate.ridge_point {
        Some(ridge) => writeln!(
            out,
            "  Ridge point (intersection):   ({:.2} FLOP/byte, {:.2} GFLOP/s)",
            ridge,
            estimate.peak_gflops()
        ),
        None => writeln!(out, "  Ridge point (intersection):   undefined"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gpu::simulated::{a100_sxm4_40gb, gtx_1070};

    #[test]
    fn test_a100_section() {
        let props = a100_sxm4_40gb();
        let estimate = RooflineEstimate::from_properties(&props);
        let text = render_device_report(&props, &estimate);

        assert!(text.starts_with("Device 0: NVIDIA A100-SXM4-40GB\n"));
        assert!(text.contains("8.0 (Ampere)"));
        assert!(text.contains("FP32 cores per SM:         64\n"));
        assert!(text.contains("19.49 TFLOP/s (19491.84 GFLOP/s)"));
        assert!(text.contains("1555.20 GB/s"));
        assert!(text.contains("Ridge point:               12.53 FLOP/byte"));
        assert!(text.contains("(12.53 FLOP/byte, 19491.84 GFLOP/s)"));
        assert!(text.contains("40.00 GiB"));
        assert!(text.contains("48.0 KiB"));
    }

    #[test]
    fn test_workload_labels() {
        let props = a100_sxm4_40gb();
        let estimate = RooflineEstimate::from_properties(&props);
        let text = render_device_report(&props, &estimate);

        let line = |name: &str| {
            text.lines()
                .find(|l| l.trim_start().starts_with(name))
                .unwrap()
                .to_string()
        };
        assert!(line("Vector addition").ends_with("memory-bound"));
        assert!(line("Matrix-vector product").ends_with("memory-bound"));
        assert!(line("Small dense matrix product").ends_with("memory-bound"));
        assert!(line("Large dense matrix product").ends_with("compute-bound"));
        assert!(line("Large-kernel convolution").ends_with("compute-bound"));

        // min(1555.2 GB/s x AI, 19491.84 GFLOP/s)
        assert!(line("Vector addition").contains("513.22 GFLOP/s"));
        assert!(line("Matrix-vector product").contains("3110.40 GFLOP/s"));
        assert!(line("Large dense matrix product").contains("19491.84 GFLOP/s"));
    }

    #[test]
    fn test_undefined_ridge_point() {
        let mut props = gtx_1070();
        props.memory_clock_rate_khz = 0;
        let estimate = RooflineEstimate::from_properties(&props);
        let text = render_device_report(&props, &estimate);

        assert!(text.contains("undefined (memory bandwidth is zero)"));
        assert_eq!(text.matches("unclassified").count(), REFERENCE_WORKLOADS.len());
        assert!(!text.contains("NaN"));
    }

    #[test]
    fn test_unknown_architecture_flagged() {
        let mut props = gtx_1070();
        props.major = 4;
        let estimate = RooflineEstimate::from_properties(&props);
        let text = render_device_report(&props, &estimate);

        assert!(text.contains("4.1 (unknown)"));
        assert!(text.contains("(default, unknown architecture)"));
    }

    #[test]
    fn test_separator() {
        assert_eq!(separator().len(), SEPARATOR_WIDTH);
        assert!(separator().chars().all(|c| c == '='));
    }
}
