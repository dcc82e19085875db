//! Aggregation of raw timing records into per-operation and per-tool summaries.
//!
//! A single pass counts records per `operation` and files each duration into
//! exactly one `(tool, operation)` bucket. Operation statistics are drawn
//! from the buckets of every tool, tool totals from that tool's buckets.
//! Buckets are dropped once the statistics are computed; the finished
//! summaries hold no per-record state.
//!
//! Map iteration order is the order in which each key first appeared in the
//! input, which keeps rendered reports stable across runs on identical data.

use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{BenchError, BenchResult};
use crate::record::TimingRecord;
use crate::stats::DurationStats;

/// Statistics for one operation across all tools.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationSummary {
    pub count: u64,
    pub success_count: u64,
    pub total_duration: f64,
    pub avg_duration: f64,
    pub median_duration: f64,
    pub min_duration: f64,
    pub max_duration: f64,
    pub std_duration: f64,
    pub success_rate: f64,
}

/// Per-operation counters nested under a tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolOperationStats {
    pub count: u64,
    #[serde(rename = "success")]
    pub success_count: u64,
    #[serde(rename = "duration")]
    pub total_duration: f64,
}

/// Statistics for one tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolSummary {
    pub operations: IndexMap<String, ToolOperationStats>,
    pub total_duration: f64,
    pub success_count: u64,
    pub total_count: u64,
    #[serde(default)]
    pub success_rate: f64,
}

/// The result of aggregating one result file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Name of the result file the records came from.
    pub file: String,
    /// Copied verbatim from the first record.
    pub timestamp: Option<String>,
    pub total_operations: usize,
    pub operations: IndexMap<String, OperationSummary>,
    pub tools: IndexMap<String, ToolSummary>,
}

/// `success / count`, or 0 for an empty group.
pub fn success_rate(success_count: u64, count: u64) -> f64 {
    if count == 0 {
        0.0
    } else {
        success_count as f64 / count as f64
    }
}

#[derive(Default)]
struct Counter {
    count: u64,
    success_count: u64,
}

impl Counter {
    fn push(&mut self, success: bool) {
        self.count += 1;
        if success {
            self.success_count += 1;
        }
    }
}

/// Records of one `(tool, operation)` pair. Each duration is held in exactly
/// one bucket.
#[derive(Default)]
struct Bucket {
    counter: Counter,
    durations: Vec<f64>,
}

/// Sum of samples taken in ascending order, independent of arrival order.
fn ordered_sum(mut durations: Vec<f64>) -> f64 {
    durations.sort_by(f64::total_cmp);
    durations.iter().sum()
}

fn operation_summary(
    counter: &Counter,
    tools: &IndexMap<String, IndexMap<String, Bucket>>,
    operation: &str,
) -> OperationSummary {
    let samples: Vec<f64> = tools
        .values()
        .filter_map(|ops| ops.get(operation))
        .flat_map(|b| b.durations.iter().copied())
        .collect();
    let stats = DurationStats::from_samples(samples).unwrap_or_default();
    OperationSummary {
        count: counter.count,
        success_count: counter.success_count,
        total_duration: stats.total,
        avg_duration: stats.mean,
        median_duration: stats.median,
        min_duration: stats.min,
        max_duration: stats.max,
        std_duration: stats.std_dev,
        success_rate: success_rate(counter.success_count, counter.count),
    }
}

fn tool_summary(buckets: IndexMap<String, Bucket>) -> ToolSummary {
    let mut all = Counter::default();
    let mut samples = Vec::new();
    let mut operations = IndexMap::with_capacity(buckets.len());

    for (op, mut bucket) in buckets {
        all.count += bucket.counter.count;
        all.success_count += bucket.counter.success_count;
        bucket.durations.sort_by(f64::total_cmp);
        let stats = ToolOperationStats {
            count: bucket.counter.count,
            success_count: bucket.counter.success_count,
            total_duration: bucket.durations.iter().sum(),
        };
        samples.extend(bucket.durations);
        operations.insert(op, stats);
    }

    ToolSummary {
        operations,
        total_duration: ordered_sum(samples),
        success_count: all.success_count,
        total_count: all.count,
        success_rate: success_rate(all.success_count, all.count),
    }
}

fn has_non_finite(summary: &RunSummary) -> bool {
    let op_stats = summary.operations.values().flat_map(|o| {
        [
            o.total_duration,
            o.avg_duration,
            o.median_duration,
            o.max_duration,
            o.std_duration,
        ]
    });
    let tool_stats = summary.tools.values().flat_map(|t| {
        std::iter::once(t.total_duration).chain(t.operations.values().map(|o| o.total_duration))
    });
    op_stats.chain(tool_stats).any(|v| !v.is_finite())
}

/// Aggregate `records` from the result file named `source_file`.
///
/// An empty record sequence is `MissingInput`, never a zero-count summary.
/// Durations large enough to overflow a derived statistic are
/// `MalformedInput`: such a summary could not be stored as JSON.
pub fn aggregate(source_file: &str, records: &[TimingRecord]) -> BenchResult<RunSummary> {
    let Some(first) = records.first() else {
        return Err(BenchError::missing_input(format!("No data in {}", source_file)));
    };

    let mut operations: IndexMap<String, Counter> = IndexMap::new();
    let mut tools: IndexMap<String, IndexMap<String, Bucket>> = IndexMap::new();

    for r in records {
        operations
            .entry(r.operation.clone())
            .or_default()
            .push(r.success);

        let bucket = tools
            .entry(r.tool.clone())
            .or_default()
            .entry(r.operation.clone())
            .or_default();
        bucket.counter.push(r.success);
        bucket.durations.push(r.duration_ms);
    }

    let operations = operations
        .iter()
        .map(|(op, counter)| (op.clone(), operation_summary(counter, &tools, op)))
        .collect();

    let summary = RunSummary {
        file: source_file.to_string(),
        timestamp: first.timestamp.clone(),
        total_operations: records.len(),
        operations,
        tools: tools
            .into_iter()
            .map(|(tool, buckets)| (tool, tool_summary(buckets)))
            .collect(),
    };

    if has_non_finite(&summary) {
        return Err(BenchError::malformed(
            Path::new(source_file),
            "durations overflow the summary statistics",
        ));
    }
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(op: &str, tool: &str, ms: f64, ok: bool) -> TimingRecord {
        TimingRecord::new(op, tool, ms, ok)
    }

    #[test]
    fn test_empty_is_missing_input() {
        let err = aggregate("benchmark_results_x.json", &[]).unwrap_err();
        assert!(matches!(err, BenchError::MissingInput { .. }));
        assert_eq!(err.to_string(), "No data in benchmark_results_x.json");
    }

    #[test]
    fn test_operation_statistics() {
        let records = vec![
            rec("install", "node", 100.0, true),
            rec("install", "uv", 300.0, false),
            rec("install", "node", 200.0, true),
            rec("update", "node", 50.0, true),
        ];
        let summary = aggregate("r.json", &records).unwrap();
        assert_eq!(summary.total_operations, 4);

        let install = &summary.operations["install"];
        assert_eq!(install.count, 3);
        assert_eq!(install.success_count, 2);
        assert_eq!(install.total_duration, 600.0);
        assert_eq!(install.avg_duration, 200.0);
        assert_eq!(install.median_duration, 200.0);
        assert_eq!(install.min_duration, 100.0);
        assert_eq!(install.max_duration, 300.0);
        assert_eq!(install.std_duration, 100.0);
        assert!((install.success_rate - 2.0 / 3.0).abs() < 1e-12);

        let update = &summary.operations["update"];
        assert_eq!(update.count, 1);
        assert_eq!(update.std_duration, 0.0);
        assert_eq!(update.success_rate, 1.0);
    }

    #[test]
    fn test_tool_statistics() {
        let records = vec![
            rec("install", "node", 100.0, true),
            rec("update", "node", 20.0, false),
            rec("install", "node", 150.0, true),
            rec("install", "uv", 10.0, true),
        ];
        let summary = aggregate("r.json", &records).unwrap();

        let node = &summary.tools["node"];
        assert_eq!(node.total_count, 3);
        assert_eq!(node.success_count, 2);
        assert_eq!(node.total_duration, 270.0);
        assert_eq!(node.operations["install"].count, 2);
        assert_eq!(node.operations["install"].total_duration, 250.0);
        assert_eq!(node.operations["update"].success_count, 0);

        let uv = &summary.tools["uv"];
        assert_eq!(uv.total_count, 1);
        assert_eq!(uv.success_rate, 1.0);
    }

    #[test]
    fn test_first_occurrence_order_preserved() {
        let records = vec![
            rec("update", "uv", 1.0, true),
            rec("install", "node", 1.0, true),
            rec("build", "uv", 1.0, true),
            rec("install", "go", 1.0, true),
        ];
        let summary = aggregate("r.json", &records).unwrap();
        let ops: Vec<&str> = summary.operations.keys().map(String::as_str).collect();
        assert_eq!(ops, vec!["update", "install", "build"]);
        let tools: Vec<&str> = summary.tools.keys().map(String::as_str).collect();
        assert_eq!(tools, vec!["uv", "node", "go"]);
    }

    #[test]
    fn test_timestamp_from_first_record() {
        let records = vec![
            rec("install", "node", 1.0, true).with_timestamp("2024-05-01T10:00:00"),
            rec("install", "node", 1.0, true).with_timestamp("2024-05-01T11:00:00"),
        ];
        let summary = aggregate("r.json", &records).unwrap();
        assert_eq!(summary.timestamp.as_deref(), Some("2024-05-01T10:00:00"));

        let no_ts = aggregate("r.json", &[rec("install", "node", 1.0, true)]).unwrap();
        assert!(no_ts.timestamp.is_none());
    }

    #[test]
    fn test_tool_json_uses_legacy_field_names() {
        let summary = aggregate("r.json", &[rec("install", "node", 5.0, true)]).unwrap();
        let v = serde_json::to_value(&summary.tools["node"]).unwrap();
        assert_eq!(v["operations"]["install"]["duration"], 5.0);
        assert_eq!(v["operations"]["install"]["success"], 1);
        assert_eq!(v["total_count"], 1);
    }

    #[test]
    fn test_overflowing_durations_are_malformed() {
        let records = vec![
            rec("install", "node", 1e308, true),
            rec("install", "node", 1e308, true),
        ];
        let err = aggregate("benchmark_results_big.json", &records).unwrap_err();
        assert!(matches!(err, BenchError::MalformedInput { .. }));
        assert_eq!(err.exit_code(), 0);

        let large = aggregate("r.json", &[rec("install", "node", 1e308, true)]).unwrap();
        assert_eq!(large.operations["install"].avg_duration, 1e308);
    }

    #[test]
    fn test_tool_totals_ignore_record_order() {
        let a = vec![
            rec("install", "node", 0.1, true),
            rec("update", "node", 1e16, true),
            rec("install", "node", 0.2, true),
            rec("build", "node", 0.3, true),
        ];
        let mut b = a.clone();
        b.reverse();
        let sa = aggregate("r.json", &a).unwrap();
        let sb = aggregate("r.json", &b).unwrap();
        assert_eq!(sa.tools["node"].total_duration, sb.tools["node"].total_duration);
        assert_eq!(sa.operations["install"], sb.operations["install"]);
    }

    #[test]
    fn test_success_rate_of_empty_group() {
        assert_eq!(success_rate(0, 0), 0.0);
        assert_eq!(success_rate(1, 4), 0.25);
    }
}
