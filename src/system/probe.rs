use std::path::Path;
use std::time::Duration;

use sysinfo::{Disks, System};
use tracing::debug;

use super::snapshot::{BootStats, CpuStats, DiskStats, HostInfo, MemoryStats};

/// Why one metric group could not be read on this host.
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("platform reports no {interface} accounting")]
    Unsupported { interface: &'static str },
    #[error("no filesystem mounted at {mount_point}")]
    UnknownMount { mount_point: String },
}

/// OS metrics source consumed by the collector.
///
/// Production code goes through [`SysinfoProbe`]; tests substitute
/// deterministic fakes to exercise degraded hosts.
pub trait SystemProbe {
    fn memory(&mut self) -> Result<MemoryStats, ProbeError>;
    fn disk(&mut self, mount_point: &Path) -> Result<DiskStats, ProbeError>;
    fn cpu(&mut self) -> Result<CpuStats, ProbeError>;
    fn boot(&mut self) -> Result<BootStats, ProbeError>;
    fn host(&mut self) -> HostInfo;
}

/// Whether this build target has an OS metrics backend at all. When false,
/// every probe call would come back empty, so startup refuses early.
pub fn platform_supported() -> bool {
    sysinfo::IS_SUPPORTED_SYSTEM
}

pub struct SysinfoProbe {
    sys: System,
    cpu_sample: Duration,
}

impl SysinfoProbe {
    /// `cpu_sample` is the wall-clock window the CPU utilization delta is
    /// measured over. Zero means a single instantaneous reading.
    pub fn new(cpu_sample: Duration) -> Self {
        Self {
            sys: System::new(),
            cpu_sample,
        }
    }
}

impl SystemProbe for SysinfoProbe {
    fn memory(&mut self) -> Result<MemoryStats, ProbeError> {
        self.sys.refresh_memory();
        let total = self.sys.total_memory();
        if total == 0 {
            return Err(ProbeError::Unsupported {
                interface: "virtual memory",
            });
        }
        Ok(MemoryStats::new(
            total,
            self.sys.available_memory(),
            self.sys.used_memory(),
        ))
    }

    fn disk(&mut self, mount_point: &Path) -> Result<DiskStats, ProbeError> {
        let disks = Disks::new_with_refreshed_list();
        let disk = disks
            .list()
            .iter()
            .find(|disk| disk.mount_point() == mount_point)
            .ok_or_else(|| ProbeError::UnknownMount {
                mount_point: mount_point.display().to_string(),
            })?;

        let total = disk.total_space();
        let free = disk.available_space();
        Ok(DiskStats::new(
            mount_point.display().to_string(),
            total,
            total.saturating_sub(free),
            free,
        ))
    }

    fn cpu(&mut self) -> Result<CpuStats, ProbeError> {
        self.sys.refresh_cpu_all();

        // Utilization is a delta between two refreshes. A zero window skips
        // the second refresh and may legitimately read 0%.
        let window = effective_cpu_window(self.cpu_sample);
        if !window.is_zero() {
            debug!(window_ms = window.as_millis() as u64, "sampling cpu usage");
            std::thread::sleep(window);
            self.sys.refresh_cpu_usage();
        }

        let logical_cores = self.sys.cpus().len();
        if logical_cores == 0 {
            return Err(ProbeError::Unsupported { interface: "CPU" });
        }
        Ok(CpuStats::new(
            self.sys.global_cpu_usage(),
            logical_cores as u32,
        ))
    }

    fn boot(&mut self) -> Result<BootStats, ProbeError> {
        let booted_unix_secs = System::boot_time();
        if booted_unix_secs == 0 {
            return Err(ProbeError::Unsupported {
                interface: "boot time",
            });
        }
        Ok(BootStats {
            booted_unix_secs,
            uptime_secs: System::uptime(),
        })
    }

    fn host(&mut self) -> HostInfo {
        let os = match (System::name(), System::os_version()) {
            (Some(name), Some(version)) => Some(format!("{name} {version}")),
            (Some(name), None) => Some(name),
            _ => None,
        };
        HostInfo {
            hostname: System::host_name(),
            os,
            kernel: System::kernel_version(),
        }
    }
}

/// sysinfo cannot resolve CPU deltas below its minimum interval, so any
/// nonzero window is raised to at least that. Zero stays zero.
fn effective_cpu_window(requested: Duration) -> Duration {
    if requested.is_zero() {
        Duration::ZERO
    } else {
        requested.max(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL)
    }
}
