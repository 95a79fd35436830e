use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;
use std::path::Path;

use crate::runner::RunReport;
use crate::scoring::{CalculatorKind, CalculatorResult};

/// Machine-readable summary of one run.
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub calculator: CalculatorKind,
    pub dry_run: bool,
    pub generated_at: DateTime<Utc>,
    pub total_players: usize,
    /// Busts or steals; zero for grades.
    pub flagged: usize,
    pub results: &'a [CalculatorResult],
}

impl<'a> JsonReport<'a> {
    pub fn new(report: &'a RunReport, generated_at: DateTime<Utc>) -> Self {
        Self {
            calculator: report.kind,
            dry_run: report.dry_run,
            generated_at,
            total_players: report.total(),
            flagged: report.flagged_count(),
            results: &report.results,
        }
    }
}

pub fn render_json(report: &RunReport) -> Result<String> {
    serde_json::to_string_pretty(&JsonReport::new(report, Utc::now()))
        .context("Failed to serialize report")
}

/// Write the JSON report atomically, so readers never see a partial file.
pub fn write_report(path: &Path, report: &RunReport) -> Result<()> {
    let json = render_json(report)?;

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;
    file.write_all(json.as_bytes())
        .with_context(|| format!("Failed to write report to {}", path.display()))?;
    file.write_all(b"\n")?;
    file.commit()
        .with_context(|| format!("Failed to save report to {}", path.display()))?;

    Ok(())
}
