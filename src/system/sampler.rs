use std::time::Duration;

use sysinfo::{MINIMUM_CPU_UPDATE_INTERVAL, ProcessRefreshKind, ProcessesToUpdate, System};
use tracing::debug;

use super::snapshot::{GlobalStats, MemoryStats, ProcessSample};
use crate::clock::{Clock, SystemClock};

/// Window between the two CPU refreshes backing an aggregate reading.
/// A full second trades latency for a stable number instead of a noisy one.
pub const CPU_SAMPLE_WINDOW: Duration = Duration::from_secs(1);

/// Sampling seam between the OS and everything downstream. Aggregate stats
/// and the process table are two separate queries on purpose; callers that
/// invoke both get two snapshots taken at slightly different instants.
pub trait SystemSampler {
    fn global_stats(&mut self) -> GlobalStats;
    fn processes(&mut self) -> Vec<ProcessSample>;
}

pub struct Sampler<C: Clock = SystemClock> {
    sys: System,
    clock: C,
}

impl Sampler<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for Sampler<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> Sampler<C> {
    pub fn with_clock(clock: C) -> Self {
        let mut sys = System::new();
        sys.refresh_memory();
        sys.refresh_cpu_all();
        sys.refresh_processes_specifics(
            ProcessesToUpdate::All,
            true,
            ProcessRefreshKind::nothing().with_memory().with_cpu(),
        );
        // CPU percentages are deltas between refreshes; the first refresh
        // only seeds the counters. Wait out the minimum interval so the
        // next query already carries meaningful numbers.
        clock.sleep(MINIMUM_CPU_UPDATE_INTERVAL);
        Sampler { sys, clock }
    }
}

impl<C: Clock> SystemSampler for Sampler<C> {
    fn global_stats(&mut self) -> GlobalStats {
        self.sys.refresh_cpu_all();
        self.clock.sleep(CPU_SAMPLE_WINDOW);
        self.sys.refresh_cpu_all();
        self.sys.refresh_memory();

        let total_bytes = self.sys.total_memory();
        let used_bytes = self.sys.used_memory();
        let used_percent = if total_bytes == 0 {
            debug!("memory query returned zero total; reporting zeroed stats");
            0.0
        } else {
            used_bytes as f64 / total_bytes as f64 * 100.0
        };

        GlobalStats {
            cpu_percent: self.sys.global_cpu_usage(),
            memory: MemoryStats {
                total_bytes,
                used_bytes,
                used_percent,
            },
        }
    }

    fn processes(&mut self) -> Vec<ProcessSample> {
        self.sys.refresh_processes_specifics(
            ProcessesToUpdate::All,
            true,
            ProcessRefreshKind::nothing().with_memory().with_cpu(),
        );

        let mut samples = Vec::with_capacity(self.sys.processes().len());
        for (pid, process) in self.sys.processes() {
            // Fields the OS withholds stay at their zero values; the
            // process is still reported.
            samples.push(ProcessSample {
                pid: pid.as_u32(),
                name: process.name().to_string_lossy().to_string(),
                cpu_percent: process.cpu_usage(),
                memory_bytes: process.memory(),
            });
        }
        samples
    }
}
