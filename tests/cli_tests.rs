//! End-to-end tests against the built binary.

use std::process::{Command, Output};

use gpu_roofline::report::separator;

fn gpu_roofline(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_gpu-roofline"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run gpu-roofline")
}

#[test]
fn test_simulated_a100_exits_zero() {
    let output = gpu_roofline(&["--simulate", "a100"]);
    assert_eq!(output.status.code(), Some(0));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("Device 0: NVIDIA A100-SXM4-40GB"));
    assert!(stdout.contains("Ridge point:               12.53 FLOP/byte"));
}

#[test]
fn test_simulated_pair_has_one_separator() {
    let output = gpu_roofline(&["--simulate", "wintermute"]);
    assert_eq!(output.status.code(), Some(0));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.matches(&separator()).count(), 1);
}

#[test]
fn test_no_devices_exits_one() {
    let output = gpu_roofline(&["--simulate", "none"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("No CUDA-capable devices detected"));
}

#[test]
fn test_device_count_failure_exits_one() {
    let output = gpu_roofline(&["--simulate", "driver-failure"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to query device count"));
    assert!(stderr.contains("CUDA_ERROR_NOT_INITIALIZED"));
}

#[cfg(not(feature = "cuda"))]
#[test]
fn test_cpu_only_build_reports_no_devices() {
    let output = gpu_roofline(&[]);
    assert_eq!(output.status.code(), Some(1));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("No CUDA-capable devices detected"));
}

#[test]
fn test_json_logs_keep_stdout_clean() {
    let output = gpu_roofline(&["--simulate", "a100", "--log-format", "json"]);
    assert_eq!(output.status.code(), Some(0));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.contains("\"level\""));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.lines().any(|l| l.starts_with('{')));
}
