//! @ai:module:intent Choose the execution device from an explicit choice or the hardware present
//! @ai:module:layer infrastructure
//! @ai:module:public_api DeviceProbe, SystemDeviceProbe, FixedDeviceProbe, resolve_device

use crate::config::Device;
use std::process::Command;

/// @ai:intent Reports which accelerators the runtime environment offers
pub trait DeviceProbe: Send + Sync {
    fn cuda_available(&self) -> bool;
    fn mps_available(&self) -> bool;
}

/// @ai:intent Probes the machine this process runs on
pub struct SystemDeviceProbe;

impl SystemDeviceProbe {
    /// @ai:intent Check if a command runs successfully on this system
    /// @ai:effects io
    fn command_succeeds(tool: &str, args: &[&str]) -> bool {
        Command::new(tool)
            .args(args)
            .output()
            .map(|output| output.status.success())
            .unwrap_or(false)
    }
}

impl DeviceProbe for SystemDeviceProbe {
    /// @ai:intent CUDA is usable when the driver lists at least one GPU
    /// @ai:effects io
    fn cuda_available(&self) -> bool {
        if std::env::var("CUDA_VISIBLE_DEVICES").is_ok_and(|v| v.trim().is_empty()) {
            return false;
        }
        Self::command_succeeds("nvidia-smi", &["-L"])
    }

    /// Metal Performance Shaders only exist on Apple silicon.
    fn mps_available(&self) -> bool {
        cfg!(all(target_os = "macos", target_arch = "aarch64"))
    }
}

/// @ai:intent Probe with fixed answers (for testing)
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedDeviceProbe {
    pub cuda: bool,
    pub mps: bool,
}

impl DeviceProbe for FixedDeviceProbe {
    fn cuda_available(&self) -> bool {
        self.cuda
    }

    fn mps_available(&self) -> bool {
        self.mps
    }
}

/// @ai:intent Pick the device: explicit, then CUDA, then MPS, then CPU
/// @ai:effects io (through the probe)
pub fn resolve_device<P: DeviceProbe + ?Sized>(explicit: Option<Device>, probe: &P) -> Device {
    if let Some(device) = explicit {
        return device;
    }

    if probe.cuda_available() {
        Device::Cuda
    } else if probe.mps_available() {
        Device::Mps
    } else {
        Device::Cpu
    }
}
