use serde::Serialize;

/// Whole-host memory accounting, in bytes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemoryStats {
    pub total_bytes: u64,
    pub available_bytes: u64,
    pub used_bytes: u64,
    pub used_percent: f32,
}

impl MemoryStats {
    pub fn new(total_bytes: u64, available_bytes: u64, used_bytes: u64) -> Self {
        Self {
            total_bytes,
            available_bytes,
            used_bytes,
            used_percent: percent_of(used_bytes, total_bytes),
        }
    }
}

/// Filesystem usage for one mount point, in bytes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiskStats {
    pub mount_point: String,
    pub total_bytes: u64,
    pub used_bytes: u64,
    pub free_bytes: u64,
    pub used_percent: f32,
}

impl DiskStats {
    pub fn new(mount_point: String, total_bytes: u64, used_bytes: u64, free_bytes: u64) -> Self {
        Self {
            mount_point,
            total_bytes,
            used_bytes,
            free_bytes,
            used_percent: percent_of(used_bytes, total_bytes),
        }
    }
}

/// Aggregate CPU utilization over the sampling window plus core count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CpuStats {
    pub usage_percent: f32,
    pub logical_cores: u32,
}

impl CpuStats {
    pub fn new(usage_percent: f32, logical_cores: u32) -> Self {
        let usage_percent = if usage_percent.is_finite() {
            usage_percent.clamp(0.0, 100.0)
        } else {
            0.0
        };
        Self {
            usage_percent,
            logical_cores,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BootStats {
    pub booted_unix_secs: u64,
    pub uptime_secs: u64,
}

/// Host identity, best effort. Any field the OS refuses to name stays `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HostInfo {
    pub hostname: Option<String>,
    pub os: Option<String>,
    pub kernel: Option<String>,
}

/// One complete collection pass. Each metric group is gathered independently;
/// a group the host could not report is `None` and the rest stand on their own.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    pub host: HostInfo,
    pub taken_unix_ms: u64,
    pub memory: Option<MemoryStats>,
    pub disk: Option<DiskStats>,
    pub cpu: Option<CpuStats>,
    pub boot: Option<BootStats>,
}

/// Ratio as a percentage, clamped to 0..=100. A zero denominator reads as 0
/// rather than poisoning the snapshot with NaN.
fn percent_of(part: u64, whole: u64) -> f32 {
    if whole == 0 {
        return 0.0;
    }
    ((part as f64 / whole as f64) * 100.0).clamp(0.0, 100.0) as f32
}

#[cfg(test)]
mod tests {
    use super::{CpuStats, DiskStats, MemoryStats};

    #[test]
    fn memory_percent_from_used_over_total() {
        let mem = MemoryStats::new(8_589_934_592, 6_442_450_944, 2_147_483_648);
        assert_eq!(mem.used_percent, 25.0);
    }

    #[test]
    fn zero_total_memory_yields_zero_percent() {
        let mem = MemoryStats::new(0, 0, 0);
        assert_eq!(mem.used_percent, 0.0);
    }

    #[test]
    fn overcommitted_usage_clamps_to_one_hundred() {
        let mem = MemoryStats::new(1_000, 0, 2_000);
        assert_eq!(mem.used_percent, 100.0);
    }

    #[test]
    fn disk_percent_ignores_reserved_slack() {
        // total > used + free is normal (ext4 root reserve); the percent
        // is still used over total.
        let disk = DiskStats::new("/".to_string(), 1_000, 250, 700);
        assert_eq!(disk.used_percent, 25.0);
    }

    #[test]
    fn cpu_usage_clamps_out_of_range_readings() {
        assert_eq!(CpuStats::new(-3.0, 4).usage_percent, 0.0);
        assert_eq!(CpuStats::new(104.2, 4).usage_percent, 100.0);
        assert_eq!(CpuStats::new(f32::NAN, 4).usage_percent, 0.0);
    }
}
