//! Dashboard stats collection.
//!
//! Responsible only for gathering data: wall-clock time, OS string, and
//! (when the platform supports it) CPU, memory, and free-disk readings.
//! The metrics source is capability-checked once at construction; on an
//! unsupported platform the three metric fields degrade to a fixed
//! placeholder instead of erroring.

use std::path::PathBuf;

use chrono::Local;
use sysinfo::{Disks, System};

use crate::constants::{INITIAL_SETTLE_MS, METRICS_PLACEHOLDER, ONE_GIB};
use crate::models::DashboardStats;

/// Live metrics handles, present only on supported platforms.
struct MetricsSource {
    sys: System,
    disks: Disks,
}

pub struct StatsCollector {
    source: Option<MetricsSource>,
}

impl StatsCollector {
    pub fn new() -> Self {
        if !sysinfo::IS_SUPPORTED_SYSTEM {
            return Self { source: None };
        }

        let mut sys = System::new_all();
        sys.refresh_all();
        // Allow initial CPU counters to settle before the first reading
        std::thread::sleep(std::time::Duration::from_millis(INITIAL_SETTLE_MS));
        sys.refresh_all();
        let disks = Disks::new_with_refreshed_list();

        Self {
            source: Some(MetricsSource { sys, disks }),
        }
    }

    /// Take a fresh snapshot. Time and OS are always populated; cpu, mem,
    /// and disk fall back to the placeholder when metrics are unavailable.
    pub fn snapshot(&mut self) -> DashboardStats {
        let time = Local::now().format("%H:%M:%S").to_string();
        let os = os_string();

        let (cpu, mem, disk) = match &mut self.source {
            Some(source) => {
                source.sys.refresh_all();
                source.disks.refresh();

                let cpu = format!("{:.1}%", source.sys.global_cpu_usage());
                let mem = format!("{:.1}%", memory_percent(&source.sys));
                let disk = free_disk_string(&source.disks)
                    .unwrap_or_else(|| METRICS_PLACEHOLDER.to_string());
                (cpu, mem, disk)
            }
            None => (
                METRICS_PLACEHOLDER.to_string(),
                METRICS_PLACEHOLDER.to_string(),
                METRICS_PLACEHOLDER.to_string(),
            ),
        };

        DashboardStats {
            time,
            os,
            cpu,
            mem,
            disk,
        }
    }
}

impl Default for StatsCollector {
    fn default() -> Self {
        Self::new()
    }
}

fn memory_percent(sys: &System) -> f32 {
    if sys.total_memory() == 0 {
        return 0.0;
    }
    (sys.used_memory() as f32 / sys.total_memory() as f32) * 100.0
}

/// Free space of the filesystem holding the working directory, as
/// "X.Y GB free". Picks the disk with the longest matching mount point.
fn free_disk_string(disks: &Disks) -> Option<String> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("/"));

    let disk = disks
        .list()
        .iter()
        .filter(|d| cwd.starts_with(d.mount_point()))
        .max_by_key(|d| d.mount_point().as_os_str().len())?;

    let free_gib = disk.available_space() as f64 / ONE_GIB as f64;
    Some(format!("{:.1} GB free", free_gib))
}

fn os_string() -> String {
    match System::name() {
        Some(name) => match System::os_version() {
            Some(version) => format!("{} {}", name, version),
            None => name,
        },
        None => format!("{} {}", std::env::consts::OS, std::env::consts::ARCH),
    }
}
