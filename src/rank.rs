use std::cmp::Ordering;

use crate::system::snapshot::ProcessSample;

pub const DEFAULT_TOP_N: usize = 5;

/// Top `n` processes by CPU usage, descending. Processes with no measured
/// CPU are dropped first. The sort is stable and keyed on CPU only; ties
/// keep their input order rather than falling back to memory.
pub fn top_by_cpu(mut samples: Vec<ProcessSample>, n: usize) -> Vec<ProcessSample> {
    samples.retain(|s| s.cpu_percent > 0.0);
    samples.sort_by(|a, b| {
        b.cpu_percent
            .partial_cmp(&a.cpu_percent)
            .unwrap_or(Ordering::Equal)
    });
    samples.truncate(n);
    samples
}
