//! Single-shot host metrics snapshot.
//!
//! One collection pass reads memory, disk, CPU, and boot time from the
//! running OS, each group independently, and renders them as one
//! deterministic plain-text or JSON report. A group the host cannot
//! report is marked unavailable instead of failing the run.

pub mod format;
pub mod report;
pub mod system;
