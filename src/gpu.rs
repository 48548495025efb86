//! GPU Support Detection
//!
//! Farm jobs that carry GPU-labeled tests only run them when NVIDIA
//! support is present on the agent. Detection runs `nvidia-smi -L` and
//! falls back to probing the kernel driver.

use std::path::Path;
use std::process::Command;

/// Kernel driver probe used when nvidia-smi is unavailable
const NVIDIA_PROC_PATH: &str = "/proc/driver/nvidia/version";

/// Check whether the machine has usable NVIDIA GPU support.
pub fn has_gpu_support() -> bool {
    if let Ok(output) = Command::new("nvidia-smi").arg("-L").output() {
        if output.status.success() {
            let listing = String::from_utf8_lossy(&output.stdout);
            if listing.lines().any(|line| line.starts_with("GPU ")) {
                debug!("NVIDIA support detected via nvidia-smi");
                return true;
            }
        }
    }

    if Path::new(NVIDIA_PROC_PATH).exists() {
        debug!("NVIDIA support detected via {}", NVIDIA_PROC_PATH);
        return true;
    }

    false
}
