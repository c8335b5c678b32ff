use std::io::{self, Write};
use std::time::Duration;

use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::terminal::{Clear, ClearType};
use tracing::warn;

use crate::clock::Clock;
use crate::config::MonitorConfig;
use crate::format::{bytes_to_gb, bytes_to_mb};
use crate::rank::top_by_cpu;
use crate::system::sampler::SystemSampler;

/// Fixed-interval console reporter. Generic over the sampler, the clock,
/// and the output so a cycle can run in tests against canned data and a
/// byte buffer.
pub struct Reporter<S, C, W> {
    sampler: S,
    clock: C,
    out: W,
    config: MonitorConfig,
}

impl<S, C, W> Reporter<S, C, W>
where
    S: SystemSampler,
    C: Clock,
    W: Write,
{
    pub fn new(sampler: S, clock: C, out: W, config: MonitorConfig) -> Self {
        Reporter {
            sampler,
            clock,
            out,
            config,
        }
    }

    /// Tear down and hand back the output, e.g. to inspect a captured
    /// report buffer.
    pub fn into_writer(self) -> W {
        self.out
    }

    pub fn into_sampler(self) -> S {
        self.sampler
    }

    /// Loop forever. A failed cycle is logged and the next one still runs;
    /// only external termination stops the loop.
    pub fn run(&mut self) -> ! {
        let interval = Duration::from_secs(self.config.interval_secs);
        loop {
            if let Err(err) = self.cycle() {
                warn!(%err, "report cycle failed");
            }
            self.clock.sleep(interval);
        }
    }

    /// One report cycle: clear, aggregate stats, alerts, top processes.
    /// Aggregate stats and the process table come from two separate OS
    /// queries, so the two halves of the report are not one atomic snapshot.
    pub fn cycle(&mut self) -> io::Result<()> {
        execute!(self.out, Clear(ClearType::All), MoveTo(0, 0))?;

        let stats = self.sampler.global_stats();
        writeln!(self.out, "CPU usage: {:.2}%", stats.cpu_percent)?;
        writeln!(
            self.out,
            "Memory: {:.2}GB / {:.2}GB ({:.2}%)",
            bytes_to_gb(stats.memory.used_bytes),
            bytes_to_gb(stats.memory.total_bytes),
            stats.memory.used_percent,
        )?;

        // Independent checks; both, one, or neither may fire.
        if stats.cpu_percent > self.config.cpu_alert_percent {
            writeln!(
                self.out,
                "ALERT: CPU usage above {:.0}%!",
                self.config.cpu_alert_percent
            )?;
        }
        if stats.memory.used_percent > self.config.memory_alert_percent {
            writeln!(
                self.out,
                "ALERT: memory usage above {:.0}%!",
                self.config.memory_alert_percent
            )?;
        }

        writeln!(self.out)?;
        writeln!(self.out, "Top CPU-consuming processes:")?;
        let top = top_by_cpu(self.sampler.processes(), self.config.top_n);
        for process in &top {
            writeln!(
                self.out,
                "PID: {} | {} | CPU: {:.2}% | Memory: {:.2}MB",
                process.pid,
                process.name,
                process.cpu_percent,
                bytes_to_mb(process.memory_bytes),
            )?;
        }
        self.out.flush()
    }
}
