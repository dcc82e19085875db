//! Plain-text console views.

use super::{percent, NO_BASELINE_MESSAGE};
use crate::aggregate::RunSummary;
use crate::compare::CompareOutcome;
use crate::discovery::ResultFileStatus;
use crate::threshold::{RecordCheck, ThresholdReport, Verdict};

/// Available result files with their decode status.
pub fn format_results_list(files: &[ResultFileStatus]) -> String {
    if files.is_empty() {
        return "No benchmark results found.".to_string();
    }

    let mut lines = vec!["Available benchmark results:".to_string()];
    for f in files {
        let status = match &f.records {
            Ok(1) => "1 record".to_string(),
            Ok(n) => format!("{} records", n),
            Err(e) => format!("unreadable: {}", e),
        };
        lines.push(format!("  - {} ({})", f.file_name(), status));
    }
    lines.join("\n")
}

pub fn format_summary(summary: &RunSummary) -> String {
    let mut lines = vec![
        format!("Summary for {}:", summary.file),
        format!("  Total Operations: {}", summary.total_operations),
        format!(
            "  Timestamp: {}",
            summary.timestamp.as_deref().unwrap_or("N/A")
        ),
        String::new(),
        "  Operations:".to_string(),
    ];
    for (op, s) in &summary.operations {
        lines.push(format!(
            "    {}: {} ops, {} success, {:.1}ms avg",
            op,
            s.count,
            percent(s.success_rate),
            s.avg_duration
        ));
    }
    lines.join("\n")
}

/// One header line plus a count line for each non-empty category.
pub fn format_comparison(outcome: &CompareOutcome) -> String {
    let c = match outcome {
        CompareOutcome::NoBaseline => return NO_BASELINE_MESSAGE.to_string(),
        CompareOutcome::Compared(c) => c,
    };

    let mut lines = vec![format!(
        "Comparison: {} vs {}",
        c.current_file, c.baseline_file
    )];
    let counts = [
        (c.improvements.len(), "improvements"),
        (c.regressions.len(), "regressions"),
        (c.new_operations.len(), "new operations"),
        (c.missing_operations.len(), "missing operations"),
    ];
    for (n, label) in counts {
        if n > 0 {
            lines.push(format!("  {} {}", n, label));
        }
    }
    if lines.len() == 1 {
        lines.push("  no significant changes".to_string());
    }
    lines.join("\n")
}

fn format_check_line(c: &RecordCheck) -> String {
    let subject = format!("{}/{}", c.operation, c.tool);
    let detail = match (c.verdict, c.limit_ms) {
        (Verdict::Failed, None) => "FAILED".to_string(),
        (Verdict::Failed | Verdict::Warning, Some(limit)) => match c.deviation_percent() {
            Some(pct) => format!("{:.1}ms > {:.1}ms (+{:.1}%)", c.duration_ms, limit, pct),
            None => format!("{:.1}ms > {:.1}ms", c.duration_ms, limit),
        },
        (Verdict::NoBaseline, _) => format!("{:.1}ms (no baseline)", c.duration_ms),
        _ => format!("{:.1}ms (within baseline)", c.duration_ms),
    };
    let tag = match c.verdict {
        Verdict::Passed => "pass",
        Verdict::Warning | Verdict::NoBaseline => "warn",
        Verdict::Failed => "FAIL",
    };
    format!("  [{}] {}: {}", tag, subject, detail)
}

/// Per-record gate report followed by the summary and status lines.
pub fn format_check_report(report: &ThresholdReport) -> String {
    let mut lines = vec!["Benchmark threshold check".to_string()];

    if !report.baseline_present {
        lines.push(format!(
            "  No threshold baseline found; {} records not checked.",
            report.total
        ));
    }
    lines.extend(report.records.iter().map(format_check_line));

    lines.push(String::new());
    lines.push(format!(
        "Summary: {} passed, {} warnings, {} failed",
        report.counts.passed,
        report.counts.warnings(),
        report.counts.failed
    ));
    let status = if !report.passed {
        "FAIL: threshold exceeded"
    } else if report.has_warnings() {
        "PASS (with warnings)"
    } else {
        "PASS"
    };
    lines.push(format!("Status: {}", status));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::aggregate;
    use crate::baseline::Baseline;
    use crate::compare::compare;
    use crate::error::BenchError;
    use crate::record::TimingRecord;
    use crate::threshold::{check, ThresholdBaseline, ThresholdEntry};
    use std::path::{Path, PathBuf};

    #[test]
    fn test_results_list() {
        assert_eq!(format_results_list(&[]), "No benchmark results found.");

        let files = vec![
            ResultFileStatus {
                path: PathBuf::from("r/benchmark_results_1.json"),
                records: Ok(3),
            },
            ResultFileStatus {
                path: PathBuf::from("r/benchmark_results_2.json"),
                records: Err(BenchError::malformed(Path::new("r/benchmark_results_2.json"), "eof")),
            },
        ];
        let out = format_results_list(&files);
        assert!(out.contains("  - benchmark_results_1.json (3 records)"));
        assert!(out.contains("  - benchmark_results_2.json (unreadable: malformed input"));
    }

    #[test]
    fn test_summary_lines() {
        let s = aggregate(
            "benchmark_results_1.json",
            &[
                TimingRecord::new("install", "node", 100.0, true),
                TimingRecord::new("install", "node", 50.0, false),
            ],
        )
        .unwrap();
        let out = format_summary(&s);
        assert!(out.starts_with("Summary for benchmark_results_1.json:"));
        assert!(out.contains("  Timestamp: N/A"));
        assert!(out.contains("    install: 2 ops, 50.0% success, 75.0ms avg"));
    }

    #[test]
    fn test_comparison_lines() {
        assert_eq!(
            format_comparison(&CompareOutcome::NoBaseline),
            "No baseline found. Run 'set-baseline' first."
        );

        let base = aggregate("a.json", &[TimingRecord::new("install", "node", 100.0, true)]).unwrap();
        let cur = aggregate(
            "b.json",
            &[
                TimingRecord::new("install", "node", 200.0, true),
                TimingRecord::new("build", "node", 1.0, true),
            ],
        )
        .unwrap();
        let outcome = CompareOutcome::Compared(compare(&Baseline::from_summary(&base, "a.json"), &cur));
        let out = format_comparison(&outcome);
        assert_eq!(
            out,
            "Comparison: b.json vs a.json\n  1 regressions\n  1 new operations"
        );

        let same = CompareOutcome::Compared(compare(&Baseline::from_summary(&base, "a.json"), &base));
        assert!(format_comparison(&same).ends_with("no significant changes"));
    }

    #[test]
    fn test_check_report() {
        let mut t = ThresholdBaseline::default();
        t.baselines
            .insert("install_node".to_string(), ThresholdEntry::new(1000.0, 800.0));
        let records = vec![
            TimingRecord::new("install", "node", 500.0, true),
            TimingRecord::new("install", "node", 880.0, true),
            TimingRecord::new("install", "node", 1200.0, true),
            TimingRecord::new("install", "node", 10.0, false),
            TimingRecord::new("update", "node", 3.0, true),
        ];
        let out = format_check_report(&check(&records, Some(&t)));

        assert!(out.contains("  [pass] install/node: 500.0ms (within baseline)"));
        assert!(out.contains("  [warn] install/node: 880.0ms > 800.0ms (+10.0%)"));
        assert!(out.contains("  [FAIL] install/node: 1200.0ms > 1000.0ms (+20.0%)"));
        assert!(out.contains("  [FAIL] install/node: FAILED"));
        assert!(out.contains("  [warn] update/node: 3.0ms (no baseline)"));
        assert!(out.contains("Summary: 1 passed, 2 warnings, 2 failed"));
        assert!(out.ends_with("Status: FAIL: threshold exceeded"));
    }

    #[test]
    fn test_zero_limit_has_no_percentage() {
        let mut t = ThresholdBaseline::default();
        t.baselines
            .insert("install_node".to_string(), ThresholdEntry::new(0.0, 0.0));
        let records = vec![TimingRecord::new("install", "node", 5.0, true)];
        let out = format_check_report(&check(&records, Some(&t)));

        assert!(out.contains("  [FAIL] install/node: 5.0ms > 0.0ms\n"));
        assert!(!out.contains("%)"));
    }

    #[test]
    fn test_check_report_without_baseline() {
        let records = vec![TimingRecord::new("install", "node", 1.0, true)];
        let out = format_check_report(&check(&records, None));
        assert!(out.contains("No threshold baseline found; 1 records not checked."));
        assert!(out.contains("Summary: 0 passed, 0 warnings, 0 failed"));
        assert!(out.ends_with("Status: PASS"));
    }
}
