use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::warn;

use super::probe::{ProbeError, SystemProbe};
use super::snapshot::MetricsSnapshot;

/// Runs one collection pass over a [`SystemProbe`].
///
/// Groups are collected sequentially and independently: a probe error is
/// demoted to an unavailable group here and never aborts the pass.
pub struct Collector<P> {
    probe: P,
    mount_point: PathBuf,
}

impl<P: SystemProbe> Collector<P> {
    pub fn new(probe: P, mount_point: impl Into<PathBuf>) -> Self {
        Collector {
            probe,
            mount_point: mount_point.into(),
        }
    }

    pub fn collect(&mut self) -> MetricsSnapshot {
        let host = self.probe.host();
        let taken_unix_ms = unix_ms_now();

        let memory = group("memory", self.probe.memory());
        let disk = group("disk", self.probe.disk(&self.mount_point));
        let cpu = group("cpu", self.probe.cpu());
        let boot = group("boot time", self.probe.boot());

        MetricsSnapshot {
            host,
            taken_unix_ms,
            memory,
            disk,
            cpu,
            boot,
        }
    }
}

/// The sole spot where probe failures turn into unavailable groups.
fn group<T>(name: &'static str, result: Result<T, ProbeError>) -> Option<T> {
    match result {
        Ok(stats) => Some(stats),
        Err(err) => {
            warn!(group = name, %err, "metric group unavailable");
            None
        }
    }
}

fn unix_ms_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
