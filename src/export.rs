use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::format::format_size;
use crate::system::snapshot::ProcessSample;

pub const DEFAULT_REPORT_PATH: &str = "relatorio_processos.csv";

/// Write the ranked process list as a flat CSV file. Overwrites any
/// existing file at `path`. Runs once at startup; the report loop never
/// calls this again.
pub fn export_top_processes(samples: &[ProcessSample], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "PID,Name,CPU Usage (%),Memory Usage")?;
    for sample in samples {
        writeln!(
            writer,
            "{},{},{:.2},{}",
            sample.pid,
            csv_field(&sample.name),
            sample.cpu_percent,
            format_size(sample.memory_bytes),
        )?;
    }
    writer.flush()
}

/// Quote a field when it would break the row; process names can contain
/// anything the OS allows.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
