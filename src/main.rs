use std::io::stdout;
use std::path::PathBuf;

use clap::Parser;
use color_eyre::Result;
use procwatch::clock::SystemClock;
use procwatch::config::{Config, load_config, load_config_from_path};
use procwatch::export::export_top_processes;
use procwatch::rank::top_by_cpu;
use procwatch::report::Reporter;
use procwatch::system::sampler::{Sampler, SystemSampler};
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "procwatch",
    about = "Console system monitor: periodic CPU/memory report with a startup CSV snapshot"
)]
struct Cli {
    /// Path to config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seconds between report cycles
    #[arg(long)]
    interval_secs: Option<u64>,

    /// Number of top processes to show
    #[arg(long)]
    top: Option<usize>,

    /// Path for the startup CSV snapshot
    #[arg(long)]
    output: Option<PathBuf>,

    /// Skip the startup CSV snapshot
    #[arg(long, default_value_t = false)]
    no_export: bool,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config_for_cli(&cli);

    println!("Starting CPU and memory monitor... (Ctrl+C to exit)");

    let mut sampler = Sampler::new();

    if config.export.enabled {
        let top = top_by_cpu(sampler.processes(), config.monitor.top_n);
        match export_top_processes(&top, &config.export.path) {
            Ok(()) => println!("Report written: {}", config.export.path.display()),
            Err(err) => {
                // Export failure never blocks monitoring.
                warn!(path = %config.export.path.display(), %err, "failed to write CSV report");
                eprintln!("Failed to write report {}: {err}", config.export.path.display());
            }
        }
    }

    let mut reporter = Reporter::new(sampler, SystemClock, stdout(), config.monitor);
    reporter.run()
}

fn load_config_for_cli(cli: &Cli) -> Config {
    let mut config = match &cli.config {
        Some(path) => load_config_from_path(path),
        None => load_config(),
    };

    if let Some(secs) = cli.interval_secs {
        config.monitor.interval_secs = secs;
    }
    if let Some(top) = cli.top {
        config.monitor.top_n = top;
    }
    if let Some(ref path) = cli.output {
        config.export.path = path.clone();
    }
    if cli.no_export {
        config.export.enabled = false;
    }

    config
}
