use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::export::DEFAULT_REPORT_PATH;
use crate::rank::DEFAULT_TOP_N;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub monitor: MonitorConfig,
    pub export: ExportConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Seconds between report cycles.
    pub interval_secs: u64,
    /// How many top processes to print per cycle.
    pub top_n: usize,
    pub cpu_alert_percent: f32,
    pub memory_alert_percent: f64,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        MonitorConfig {
            interval_secs: 10,
            top_n: DEFAULT_TOP_N,
            cpu_alert_percent: 80.0,
            memory_alert_percent: 85.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Write the one-shot CSV snapshot at startup.
    pub enabled: bool,
    pub path: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        ExportConfig {
            enabled: true,
            path: PathBuf::from(DEFAULT_REPORT_PATH),
        }
    }
}

pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("procwatch").join("config.toml"))
}

pub fn load_config() -> Config {
    match config_path() {
        Some(path) if path.exists() => load_config_from_path(&path),
        _ => Config::default(),
    }
}

pub fn load_config_from_path(path: &Path) -> Config {
    match std::fs::read_to_string(path) {
        Ok(contents) => toml::from_str(&contents).unwrap_or_default(),
        Err(_) => Config::default(),
    }
}
