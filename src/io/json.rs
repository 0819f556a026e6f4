use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::error::Result;
use crate::sim::runner::{RunReport, RunStatus};
use crate::sim::summary::TrajectorySummary;

/// JSON document describing one finished run.
#[derive(Debug, Clone, Serialize)]
pub struct RunDocument<'a> {
    pub scenario: &'a str,
    pub status: String,
    pub steps: usize,
    pub summary: Option<TrajectorySummary>,
}

impl<'a> RunDocument<'a> {
    pub fn new(scenario: &'a str, report: &RunReport) -> Self {
        let status = match &report.status {
            RunStatus::Ready => "ready".to_string(),
            RunStatus::Running => "running".to_string(),
            RunStatus::Completed => "completed".to_string(),
            RunStatus::Aborted(e) => format!("aborted: {e}"),
        };
        Self {
            scenario,
            status,
            steps: report.samples.len().saturating_sub(1),
            summary: report.summary(),
        }
    }
}

/// Write the run summary as pretty-printed JSON.
pub fn write_summary<W: Write>(writer: &mut W, scenario: &str, report: &RunReport) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, &RunDocument::new(scenario, report))?;
    writeln!(writer)?;
    Ok(())
}

/// Write the run summary JSON to a file.
pub fn write_summary_file(path: impl AsRef<Path>, scenario: &str, report: &RunReport) -> Result<()> {
    let mut file = std::fs::File::create(path)?;
    write_summary(&mut file, scenario, report)
}
