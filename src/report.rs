use std::fmt::Write;

use crate::format::{format_bytes, format_uptime};
use crate::system::snapshot::{HostInfo, MetricsSnapshot};

const UNAVAILABLE: &str = "not available on this system";

/// Render the snapshot as the plain-text report.
///
/// Pure over its input: equal snapshots produce byte-identical output.
/// Group and field order are fixed; an unavailable group renders as a
/// single placeholder line under its heading.
pub fn render(snapshot: &MetricsSnapshot) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{:<10} {}", "Host", host_line(&snapshot.host));
    let _ = writeln!(
        out,
        "{:<10} {} ms since epoch",
        "Taken", snapshot.taken_unix_ms
    );

    let _ = writeln!(out);
    let _ = writeln!(out, "Memory");
    match &snapshot.memory {
        Some(memory) => {
            field(&mut out, "total", bytes_field(memory.total_bytes));
            field(&mut out, "available", bytes_field(memory.available_bytes));
            field(&mut out, "used", bytes_field(memory.used_bytes));
            field(&mut out, "usage", format!("{:.1}%", memory.used_percent));
        }
        None => unavailable(&mut out),
    }

    let _ = writeln!(out);
    match &snapshot.disk {
        Some(disk) => {
            let _ = writeln!(out, "Disk {}", disk.mount_point);
            field(&mut out, "total", bytes_field(disk.total_bytes));
            field(&mut out, "used", bytes_field(disk.used_bytes));
            field(&mut out, "free", bytes_field(disk.free_bytes));
            field(&mut out, "usage", format!("{:.1}%", disk.used_percent));
        }
        None => {
            let _ = writeln!(out, "Disk");
            unavailable(&mut out);
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "CPU");
    match &snapshot.cpu {
        Some(cpu) => {
            field(&mut out, "usage", format!("{:.1}%", cpu.usage_percent));
            field(&mut out, "cores", cpu.logical_cores.to_string());
        }
        None => unavailable(&mut out),
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Boot time");
    match &snapshot.boot {
        Some(boot) => {
            field(
                &mut out,
                "booted",
                format!("{} s since epoch", boot.booted_unix_secs),
            );
            field(&mut out, "uptime", format_uptime(boot.uptime_secs));
        }
        None => unavailable(&mut out),
    }

    out
}

pub fn render_json(snapshot: &MetricsSnapshot) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(snapshot)
}

fn host_line(host: &HostInfo) -> String {
    let hostname = host.hostname.as_deref().unwrap_or("unknown");
    let os = host.os.as_deref().unwrap_or("unknown");
    let kernel = host.kernel.as_deref().unwrap_or("unknown");
    format!("{hostname} ({os}, kernel {kernel})")
}

fn field(out: &mut String, label: &str, value: String) {
    let _ = writeln!(out, "  {label:<10} {value}");
}

fn unavailable(out: &mut String) {
    let _ = writeln!(out, "  {UNAVAILABLE}");
}

/// Exact byte count first, human-readable form in parentheses. Below 1 KB
/// the two would repeat each other, so the parenthetical is dropped.
fn bytes_field(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{bytes} B")
    } else {
        format!("{bytes} B ({})", format_bytes(bytes))
    }
}
