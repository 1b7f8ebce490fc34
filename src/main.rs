//! gpu-roofline: prints the theoretical roofline of every detected GPU.
//!
//! For each device, reports peak FP32 throughput, peak memory bandwidth,
//! the ridge point between them, and where common kernels fall relative
//! to it. Exits with status 1 if no device is found or a query fails.

use std::io;

use clap::Parser;
use tracing::info;

use gpu_roofline::config::{Cli, LogFormat};
use gpu_roofline::report;

fn main() -> anyhow::Result<()> {
    // Parse CLI arguments.
    let cli = Cli::parse();

    // Initialize tracing/logging. stdout is reserved for the report.
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| cli.log_filter().into());
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(true);
    match cli.log_format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }

    info!("gpu-roofline v{}", env!("CARGO_PKG_VERSION"));

    let api = cli.device_api();
    info!(simulated = ?cli.simulate, "Device backend selected");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let devices = report::run(api.as_ref(), &mut out)?;

    info!(devices, "Roofline report complete");
    Ok(())
}
