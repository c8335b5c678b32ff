use std::cell::RefCell;
use std::time::Duration;

use procwatch::clock::Clock;
use procwatch::config::MonitorConfig;
use procwatch::report::Reporter;
use procwatch::system::sampler::SystemSampler;
use procwatch::system::snapshot::{GlobalStats, MemoryStats, ProcessSample};

struct FakeSampler {
    stats: GlobalStats,
    processes: Vec<ProcessSample>,
    global_calls: u32,
    process_calls: u32,
}

impl FakeSampler {
    fn new(cpu_percent: f32, memory_used_percent: f64, processes: Vec<ProcessSample>) -> Self {
        FakeSampler {
            stats: GlobalStats {
                cpu_percent,
                memory: MemoryStats {
                    total_bytes: 16 * 1024 * 1024 * 1024,
                    used_bytes: 8 * 1024 * 1024 * 1024,
                    used_percent: memory_used_percent,
                },
            },
            processes,
            global_calls: 0,
            process_calls: 0,
        }
    }
}

impl SystemSampler for FakeSampler {
    fn global_stats(&mut self) -> GlobalStats {
        self.global_calls += 1;
        self.stats
    }

    fn processes(&mut self) -> Vec<ProcessSample> {
        self.process_calls += 1;
        self.processes.clone()
    }
}

struct RecordingClock {
    sleeps: RefCell<Vec<Duration>>,
}

impl RecordingClock {
    fn new() -> Self {
        RecordingClock {
            sleeps: RefCell::new(Vec::new()),
        }
    }
}

impl Clock for RecordingClock {
    fn sleep(&self, duration: Duration) {
        self.sleeps.borrow_mut().push(duration);
    }
}

fn sample(pid: u32, name: &str, cpu_percent: f32, memory_bytes: u64) -> ProcessSample {
    ProcessSample {
        pid,
        name: name.to_string(),
        cpu_percent,
        memory_bytes,
    }
}

fn run_one_cycle(sampler: FakeSampler, config: MonitorConfig) -> String {
    let mut reporter = Reporter::new(sampler, RecordingClock::new(), Vec::new(), config);
    reporter.cycle().expect("cycle against a buffer cannot fail");
    String::from_utf8(reporter.into_writer()).expect("report output is utf-8")
}

#[test]
fn prints_aggregate_stats_to_two_decimals() {
    let output = run_one_cycle(
        FakeSampler::new(12.345, 50.0, Vec::new()),
        MonitorConfig::default(),
    );
    assert!(output.contains("CPU usage: 12.35%"), "output: {output}");
    assert!(
        output.contains("Memory: 8.00GB / 16.00GB (50.00%)"),
        "output: {output}"
    );
}

#[test]
fn cpu_alert_fires_above_threshold() {
    let output = run_one_cycle(
        FakeSampler::new(85.5, 50.0, Vec::new()),
        MonitorConfig::default(),
    );
    assert!(output.contains("ALERT: CPU usage above 80%!"), "output: {output}");
    assert!(!output.contains("memory usage above"), "output: {output}");
}

#[test]
fn cpu_alert_silent_below_threshold() {
    let output = run_one_cycle(
        FakeSampler::new(79.9, 50.0, Vec::new()),
        MonitorConfig::default(),
    );
    assert!(!output.contains("ALERT"), "output: {output}");
}

#[test]
fn memory_alert_fires_independently() {
    let output = run_one_cycle(
        FakeSampler::new(10.0, 92.3, Vec::new()),
        MonitorConfig::default(),
    );
    assert!(output.contains("ALERT: memory usage above 85%!"), "output: {output}");
    assert!(!output.contains("CPU usage above"), "output: {output}");
}

#[test]
fn both_alerts_can_fire_in_one_cycle() {
    let output = run_one_cycle(
        FakeSampler::new(95.0, 99.0, Vec::new()),
        MonitorConfig::default(),
    );
    assert!(output.contains("ALERT: CPU usage above 80%!"), "output: {output}");
    assert!(output.contains("ALERT: memory usage above 85%!"), "output: {output}");
}

#[test]
fn top_processes_are_ranked_and_formatted() {
    let processes = vec![
        sample(1, "low", 5.0, 100 * 1024 * 1024),
        sample(2, "idle", 0.0, 1024),
        sample(3, "hog", 90.0, 2 * 1024 * 1024 * 1024),
    ];
    let output = run_one_cycle(FakeSampler::new(20.0, 50.0, processes), MonitorConfig::default());

    let hog = output.find("PID: 3 | hog | CPU: 90.00% | Memory: 2048.00MB");
    let low = output.find("PID: 1 | low | CPU: 5.00% | Memory: 100.00MB");
    assert!(hog.is_some(), "output: {output}");
    assert!(low.is_some(), "output: {output}");
    assert!(hog < low, "hog should print before low");
    assert!(!output.contains("idle"), "idle process should be dropped");
}

#[test]
fn zeroed_stats_print_as_zero() {
    let mut sampler = FakeSampler::new(0.0, 0.0, Vec::new());
    sampler.stats.memory = MemoryStats::default();
    let output = run_one_cycle(sampler, MonitorConfig::default());
    assert!(output.contains("CPU usage: 0.00%"), "output: {output}");
    assert!(
        output.contains("Memory: 0.00GB / 0.00GB (0.00%)"),
        "output: {output}"
    );
}

#[test]
fn each_cycle_issues_two_separate_queries() {
    let sampler = FakeSampler::new(10.0, 10.0, Vec::new());
    let mut reporter = Reporter::new(
        sampler,
        RecordingClock::new(),
        Vec::new(),
        MonitorConfig::default(),
    );
    reporter.cycle().unwrap();
    reporter.cycle().unwrap();
    let sampler = reporter.into_sampler();
    assert_eq!(sampler.global_calls, 2);
    assert_eq!(sampler.process_calls, 2);
}
