//! Facade mapping one method onto each front-end operation.

use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::{debug, info};

use crate::aggregate::{aggregate, RunSummary};
use crate::baseline::{Baseline, BaselineStore};
use crate::compare::{compare, CompareOutcome};
use crate::config::EngineConfig;
use crate::discovery::{file_name_of, ResultFileStatus, ResultsDir};
use crate::error::BenchResult;
use crate::io::write_atomic;
use crate::record::{load_records, TimingRecord};
use crate::report::render_report;
use crate::threshold::{check, ThresholdBaseline, ThresholdReport};

/// Benchmark result manager.
///
/// Every method taking `file: Option<&Path>` uses that result file when
/// given and the latest one in the results dir otherwise.
#[derive(Debug, Clone)]
pub struct BenchManager {
    config: EngineConfig,
    results: ResultsDir,
    baseline: BaselineStore,
}

impl BenchManager {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            results: ResultsDir::new(&config.results_dir),
            baseline: BaselineStore::new(&config.baseline_path),
            config,
        }
    }

    pub fn baseline_store(&self) -> &BaselineStore {
        &self.baseline
    }

    /// Result files, oldest first.
    pub fn list_results(&self) -> BenchResult<Vec<PathBuf>> {
        self.results.list()
    }

    /// Result files with their decode status.
    pub fn scan_results(&self) -> BenchResult<Vec<ResultFileStatus>> {
        self.results.scan()
    }

    fn resolve(&self, file: Option<&Path>) -> BenchResult<PathBuf> {
        match file {
            Some(path) => Ok(path.to_path_buf()),
            None => self.results.latest(),
        }
    }

    fn load(&self, file: Option<&Path>) -> BenchResult<(String, Vec<TimingRecord>)> {
        let path = self.resolve(file)?;
        let records = load_records(&path)?;
        Ok((file_name_of(&path), records))
    }

    pub fn summarize(&self, file: Option<&Path>) -> BenchResult<RunSummary> {
        let (name, records) = self.load(file)?;
        aggregate(&name, &records)
    }

    /// Compare a run against the stored baseline.
    ///
    /// The baseline is consulted first: with none stored the result is
    /// `NoBaseline` whatever the state of the results dir.
    pub fn compare(&self, file: Option<&Path>) -> BenchResult<CompareOutcome> {
        let Some(baseline) = self.baseline.load() else {
            debug!(path = %self.baseline.path().display(), "no baseline to compare against");
            return Ok(CompareOutcome::NoBaseline);
        };
        let summary = self.summarize(file)?;
        Ok(CompareOutcome::Compared(compare(&baseline, &summary)))
    }

    /// Replace the baseline with the aggregation of a run. On any error the
    /// existing baseline is left untouched.
    pub fn set_baseline(&self, file: Option<&Path>) -> BenchResult<Baseline> {
        let summary = self.summarize(file)?;
        self.baseline.save(&summary, &summary.file)
    }

    /// Render the markdown report, writing it to `output` when given.
    pub fn report(&self, file: Option<&Path>, output: Option<&Path>) -> BenchResult<String> {
        let summary = self.summarize(file)?;
        let outcome = match self.baseline.load() {
            Some(baseline) => CompareOutcome::Compared(compare(&baseline, &summary)),
            None => CompareOutcome::NoBaseline,
        };
        let content = render_report(&summary, &outcome, Local::now().naive_local());

        if let Some(path) = output {
            write_atomic(path, content.as_bytes())?;
            info!(path = %path.display(), "report written");
        }
        Ok(content)
    }

    /// Gate a run's raw records against the threshold baseline.
    pub fn check_thresholds(&self, file: Option<&Path>) -> BenchResult<ThresholdReport> {
        let (name, records) = self.load(file)?;
        let thresholds = ThresholdBaseline::load(&self.config.threshold_baseline_path);
        let report = check(&records, thresholds.as_ref());
        info!(
            file = %name,
            passed = report.passed,
            failed = report.counts.failed,
            warnings = report.counts.warnings(),
            "threshold check complete"
        );
        Ok(report)
    }
}
