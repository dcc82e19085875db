//! Comparison of a run summary against the stored baseline.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::aggregate::RunSummary;
use crate::baseline::Baseline;

/// A change below this percentage is an improvement.
pub const IMPROVEMENT_THRESHOLD_PCT: f64 = -5.0;

/// A change above this percentage is a regression.
pub const REGRESSION_THRESHOLD_PCT: f64 = 5.0;

/// How an operation's average duration moved relative to the baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Improvement,
    Regression,
    Neutral,
}

/// Classify a relative change. The band `[-5, 5]` is neutral, both ends
/// inclusive.
pub fn classify(change_percent: f64) -> Classification {
    if change_percent < IMPROVEMENT_THRESHOLD_PCT {
        Classification::Improvement
    } else if change_percent > REGRESSION_THRESHOLD_PCT {
        Classification::Regression
    } else {
        Classification::Neutral
    }
}

/// Average-duration change for one operation present in both runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationDelta {
    pub operation: String,
    pub baseline_avg: f64,
    pub current_avg: f64,
    pub change_percent: f64,
    pub change_ms: f64,
}

impl OperationDelta {
    /// `None` when the baseline average is zero; such operations cannot be
    /// compared relatively and are left out of both lists.
    pub fn between(operation: &str, baseline_avg: f64, current_avg: f64) -> Option<Self> {
        if baseline_avg == 0.0 {
            return None;
        }
        Some(Self {
            operation: operation.to_string(),
            baseline_avg,
            current_avg,
            change_percent: (current_avg - baseline_avg) / baseline_avg * 100.0,
            change_ms: current_avg - baseline_avg,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub baseline_file: String,
    pub current_file: String,
    pub improvements: Vec<OperationDelta>,
    pub regressions: Vec<OperationDelta>,
    pub new_operations: Vec<String>,
    pub missing_operations: Vec<String>,
}

impl ComparisonResult {
    pub fn has_regressions(&self) -> bool {
        !self.regressions.is_empty()
    }
}

/// Outcome of comparing against whatever baseline is stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CompareOutcome {
    /// No baseline has been set yet.
    NoBaseline,
    Compared(ComparisonResult),
}

impl CompareOutcome {
    pub fn comparison(&self) -> Option<&ComparisonResult> {
        match self {
            Self::NoBaseline => None,
            Self::Compared(c) => Some(c),
        }
    }
}

/// Diff `current` against `baseline`.
///
/// Operations are visited in name order, so the result depends only on the
/// two summaries' contents and not on the order records were read in.
pub fn compare(baseline: &Baseline, current: &RunSummary) -> ComparisonResult {
    let mut result = ComparisonResult {
        baseline_file: baseline.source_file.clone(),
        current_file: current.file.clone(),
        improvements: Vec::new(),
        regressions: Vec::new(),
        new_operations: Vec::new(),
        missing_operations: Vec::new(),
    };

    let names: BTreeSet<&String> = baseline
        .operations
        .keys()
        .chain(current.operations.keys())
        .collect();

    for name in names {
        let (base, cur) = match (baseline.operations.get(name), current.operations.get(name)) {
            (None, Some(_)) => {
                result.new_operations.push(name.clone());
                continue;
            }
            (Some(_), None) => {
                result.missing_operations.push(name.clone());
                continue;
            }
            (Some(b), Some(c)) => (b, c),
            (None, None) => continue,
        };

        let Some(delta) = OperationDelta::between(name, base.avg_duration, cur.avg_duration) else {
            continue;
        };
        match classify(delta.change_percent) {
            Classification::Improvement => result.improvements.push(delta),
            Classification::Regression => result.regressions.push(delta),
            Classification::Neutral => {}
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::aggregate;
    use crate::record::TimingRecord;

    fn run(file: &str, ops: &[(&str, f64)]) -> RunSummary {
        let records: Vec<TimingRecord> = ops
            .iter()
            .map(|(op, ms)| TimingRecord::new(*op, "node", *ms, true))
            .collect();
        aggregate(file, &records).unwrap()
    }

    fn baseline(ops: &[(&str, f64)]) -> Baseline {
        Baseline::from_summary(&run("base.json", ops), "base.json")
    }

    #[test]
    fn test_improvement() {
        let c = compare(&baseline(&[("install", 100.0)]), &run("cur.json", &[("install", 80.0)]));
        assert_eq!(c.improvements.len(), 1);
        assert!(c.regressions.is_empty());
        let d = &c.improvements[0];
        assert_eq!(d.operation, "install");
        assert_eq!(d.change_percent, -20.0);
        assert_eq!(d.change_ms, -20.0);
        assert_eq!(d.baseline_avg, 100.0);
        assert_eq!(d.current_avg, 80.0);
    }

    #[test]
    fn test_regression() {
        let c = compare(&baseline(&[("install", 100.0)]), &run("cur.json", &[("install", 106.0)]));
        assert_eq!(c.regressions.len(), 1);
        assert_eq!(c.regressions[0].change_percent, 6.0);
        assert!(c.has_regressions());
    }

    #[test]
    fn test_within_band_is_neutral() {
        for current in [103.0, 105.0, 95.0] {
            let c = compare(&baseline(&[("install", 100.0)]), &run("cur.json", &[("install", current)]));
            assert!(c.improvements.is_empty(), "{current} should be neutral");
            assert!(c.regressions.is_empty(), "{current} should be neutral");
        }
    }

    #[test]
    fn test_classify_boundaries() {
        assert_eq!(classify(-5.0), Classification::Neutral);
        assert_eq!(classify(5.0), Classification::Neutral);
        assert_eq!(classify(-5.000001), Classification::Improvement);
        assert_eq!(classify(5.000001), Classification::Regression);
    }

    #[test]
    fn test_new_and_missing() {
        let c = compare(
            &baseline(&[("install", 100.0), ("update", 10.0)]),
            &run("cur.json", &[("install", 100.0), ("build", 10.0)]),
        );
        assert_eq!(c.missing_operations, vec!["update"]);
        assert_eq!(c.new_operations, vec!["build"]);
        assert_eq!(c.baseline_file, "base.json");
        assert_eq!(c.current_file, "cur.json");
    }

    #[test]
    fn test_zero_baseline_average_is_skipped() {
        let c = compare(&baseline(&[("noop", 0.0)]), &run("cur.json", &[("noop", 50.0)]));
        assert!(c.improvements.is_empty());
        assert!(c.regressions.is_empty());
        assert!(c.new_operations.is_empty());
        assert!(c.missing_operations.is_empty());
    }

    #[test]
    fn test_outcome_json_shape() {
        let v = serde_json::to_value(CompareOutcome::NoBaseline).unwrap();
        assert_eq!(v["status"], "no_baseline");

        let c = compare(&baseline(&[("install", 100.0)]), &run("cur.json", &[("install", 80.0)]));
        let v = serde_json::to_value(CompareOutcome::Compared(c)).unwrap();
        assert_eq!(v["status"], "compared");
        assert_eq!(v["improvements"][0]["operation"], "install");
    }
}
