//! Per-record threshold gate for CI.
//!
//! Unlike the comparator, which works on aggregated averages, the gate looks
//! at every raw record on its own against a separately maintained threshold
//! baseline keyed by `"<operation>_<tool>"`. Each key carries two bounds:
//!
//! - `max_duration_ms`: hard ceiling, exceeding it fails the gate
//! - `percentile_95_ms`: soft bound, exceeding it only warns
//!
//! Both comparisons are strict: a duration equal to a bound is within it.

use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::io::read_optional_json;
use crate::record::TimingRecord;

/// Bounds for one `"<operation>_<tool>"` key.
///
/// A missing bound is unbounded and never trips.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ThresholdEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation: Option<String>,
    #[serde(default)]
    pub max_duration_ms: Option<f64>,
    #[serde(default)]
    pub percentile_95_ms: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_ms: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
}

impl ThresholdEntry {
    pub fn new(max_duration_ms: f64, percentile_95_ms: f64) -> Self {
        Self {
            max_duration_ms: Some(max_duration_ms),
            percentile_95_ms: Some(percentile_95_ms),
            ..Self::default()
        }
    }
}

/// The threshold reference document. Read-only to this engine.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ThresholdBaseline {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default)]
    pub baselines: IndexMap<String, ThresholdEntry>,
}

impl ThresholdBaseline {
    /// Load the threshold baseline. Missing or unreadable documents are
    /// treated as absent.
    pub fn load(path: &Path) -> Option<Self> {
        read_optional_json(path, "threshold baseline")
    }

    pub fn entry(&self, record: &TimingRecord) -> Option<&ThresholdEntry> {
        self.baselines.get(&record.threshold_key())
    }
}

/// Classification of a single record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Verdict {
    Passed,
    /// Exceeded the soft p95 bound.
    Warning,
    /// No threshold entry for the record's key. Advisory, like `Warning`.
    NoBaseline,
    /// Unsuccessful, or exceeded the hard ceiling.
    Failed,
}

/// Verdict for one record, with the bound it was judged against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordCheck {
    pub operation: String,
    pub tool: String,
    pub duration_ms: f64,
    pub success: bool,
    pub verdict: Verdict,
    /// The bound that was exceeded, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit_ms: Option<f64>,
}

impl RecordCheck {
    /// Percentage by which the duration exceeds `limit_ms`.
    pub fn deviation_percent(&self) -> Option<f64> {
        self.limit_ms
            .filter(|limit| *limit > 0.0)
            .map(|limit| (self.duration_ms - limit) / limit * 100.0)
    }
}

/// Evaluate one record against the threshold baseline.
pub fn check_record(record: &TimingRecord, thresholds: &ThresholdBaseline) -> RecordCheck {
    let (verdict, limit_ms) = if !record.success {
        (Verdict::Failed, None)
    } else {
        match thresholds.entry(record) {
            None => (Verdict::NoBaseline, None),
            Some(entry) => match (entry.max_duration_ms, entry.percentile_95_ms) {
                (Some(max), _) if record.duration_ms > max => (Verdict::Failed, Some(max)),
                (_, Some(p95)) if record.duration_ms > p95 => (Verdict::Warning, Some(p95)),
                _ => (Verdict::Passed, None),
            },
        }
    };

    RecordCheck {
        operation: record.operation.clone(),
        tool: record.tool.clone(),
        duration_ms: record.duration_ms,
        success: record.success,
        verdict,
        limit_ms,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VerdictCounts {
    pub passed: usize,
    pub warning: usize,
    pub no_baseline: usize,
    pub failed: usize,
}

impl VerdictCounts {
    fn add(&mut self, verdict: Verdict) {
        match verdict {
            Verdict::Passed => self.passed += 1,
            Verdict::Warning => self.warning += 1,
            Verdict::NoBaseline => self.no_baseline += 1,
            Verdict::Failed => self.failed += 1,
        }
    }

    /// Advisory outcomes: soft overages plus records with no entry.
    pub fn warnings(&self) -> usize {
        self.warning + self.no_baseline
    }
}

/// Result of gating one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdReport {
    /// Whether a threshold baseline was available at all.
    pub baseline_present: bool,
    pub passed: bool,
    pub total: usize,
    pub counts: VerdictCounts,
    pub records: Vec<RecordCheck>,
}

impl ThresholdReport {
    pub fn has_warnings(&self) -> bool {
        self.counts.warnings() > 0
    }
}

/// Gate `records` against `thresholds`.
///
/// Without a threshold baseline the gate passes automatically and records
/// are not classified. Otherwise it fails iff any record is `Failed`;
/// warnings never fail it.
pub fn check(records: &[TimingRecord], thresholds: Option<&ThresholdBaseline>) -> ThresholdReport {
    let Some(thresholds) = thresholds else {
        return ThresholdReport {
            baseline_present: false,
            passed: true,
            total: records.len(),
            counts: VerdictCounts::default(),
            records: Vec::new(),
        };
    };

    let mut counts = VerdictCounts::default();
    let checks: Vec<RecordCheck> = records
        .iter()
        .map(|r| {
            let c = check_record(r, thresholds);
            counts.add(c.verdict);
            c
        })
        .collect();

    ThresholdReport {
        baseline_present: true,
        passed: counts.failed == 0,
        total: records.len(),
        counts,
        records: checks,
    }
}
