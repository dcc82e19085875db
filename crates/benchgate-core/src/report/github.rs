//! GitHub Actions step outputs for the threshold gate.

use std::io::Write;
use std::path::Path;

use tracing::debug;

use crate::error::{BenchError, BenchResult};
use crate::threshold::ThresholdReport;

/// `key=value` lines describing the gate outcome.
///
/// `benchmark_passed` counts every record that did not fail, warnings
/// included.
pub fn format_github_output(report: &ThresholdReport) -> String {
    format!(
        "benchmark_status={}\nbenchmark_passed={}\nbenchmark_failed={}\nbenchmark_warnings={}\n",
        if report.passed { "pass" } else { "fail" },
        report.total - report.counts.failed,
        report.counts.failed,
        report.counts.warnings()
    )
}

/// Append the outputs to the file GitHub Actions reads step outputs from.
pub fn append_github_output(path: &Path, report: &ThresholdReport) -> BenchResult<()> {
    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| BenchError::io(path, e))?;
    file.write_all(format_github_output(report).as_bytes())
        .map_err(|e| BenchError::io(path, e))?;
    debug!(path = %path.display(), "wrote github step outputs");
    Ok(())
}
