//! Markdown performance report.

use chrono::NaiveDateTime;

use super::{percent, NO_BASELINE_MESSAGE};
use crate::aggregate::RunSummary;
use crate::compare::{CompareOutcome, ComparisonResult, OperationDelta};

/// Render the full report for `summary`.
///
/// Table rows follow the summary's map order, so identical input always
/// renders identical output. `generated_at` is the only non-derived value
/// and is passed in by the caller.
pub fn render_report(
    summary: &RunSummary,
    comparison: &CompareOutcome,
    generated_at: NaiveDateTime,
) -> String {
    let mut lines = vec![
        "# Benchmark Performance Report".to_string(),
        format!("Generated: {}", generated_at.format("%Y-%m-%d %H:%M:%S")),
        format!("Latest Results: {}", summary.file),
        String::new(),
        "## Summary".to_string(),
        format!("- Total Operations: {}", summary.total_operations),
        format!(
            "- Timestamp: {}",
            summary.timestamp.as_deref().unwrap_or("N/A")
        ),
        String::new(),
    ];

    lines.push("## Operations Performance".to_string());
    lines.push(
        "| Operation | Count | Success Rate | Avg Duration (ms) | Min | Max | Median |".to_string(),
    );
    lines.push(
        "|-----------|-------|--------------|-------------------|-----|-----|--------|".to_string(),
    );
    for (op, s) in &summary.operations {
        lines.push(format!(
            "| {} | {} | {} | {:.1} | {:.1} | {:.1} | {:.1} |",
            op,
            s.count,
            percent(s.success_rate),
            s.avg_duration,
            s.min_duration,
            s.max_duration,
            s.median_duration
        ));
    }
    lines.push(String::new());

    lines.push("## Tools Performance".to_string());
    lines.push("| Tool | Operations | Success Rate | Total Duration (ms) |".to_string());
    lines.push("|------|------------|--------------|---------------------|".to_string());
    for (tool, t) in &summary.tools {
        lines.push(format!(
            "| {} | {} | {} | {:.1} |",
            tool,
            t.total_count,
            percent(crate::aggregate::success_rate(t.success_count, t.total_count)),
            t.total_duration
        ));
    }
    lines.push(String::new());

    match comparison {
        CompareOutcome::Compared(c) => push_comparison(&mut lines, c),
        CompareOutcome::NoBaseline => {
            lines.push("## Baseline Comparison".to_string());
            lines.push(format!("⚠️ {}", NO_BASELINE_MESSAGE));
            lines.push(String::new());
        }
    }

    lines.join("\n")
}

fn push_comparison(lines: &mut Vec<String>, c: &ComparisonResult) {
    lines.push("## Comparison with Baseline".to_string());
    lines.push(format!("Baseline: {}", c.baseline_file));
    lines.push(String::new());

    if !c.improvements.is_empty() {
        lines.push("### 🚀 Improvements".to_string());
        push_delta_table(lines, "Improvement", &c.improvements, |d| {
            format!(
                "{:.1}% ({:.1}ms faster)",
                d.change_percent.abs(),
                d.change_ms.abs()
            )
        });
    }

    if !c.regressions.is_empty() {
        lines.push("### ⚠️ Regressions".to_string());
        push_delta_table(lines, "Regression", &c.regressions, |d| {
            format!("{:.1}% ({:.1}ms slower)", d.change_percent, d.change_ms)
        });
    }

    if !c.new_operations.is_empty() {
        lines.push("### ✨ New Operations".to_string());
        lines.push(c.new_operations.join(", "));
        lines.push(String::new());
    }

    if !c.missing_operations.is_empty() {
        lines.push("### ❌ Missing Operations".to_string());
        lines.push(c.missing_operations.join(", "));
        lines.push(String::new());
    }
}

fn push_delta_table(
    lines: &mut Vec<String>,
    change_header: &str,
    deltas: &[OperationDelta],
    change: impl Fn(&OperationDelta) -> String,
) {
    lines.push(format!(
        "| Operation | Baseline (ms) | Current (ms) | {} |",
        change_header
    ));
    lines.push(format!(
        "|-----------|---------------|--------------|{}|",
        "-".repeat(change_header.len() + 2)
    ));
    for d in deltas {
        lines.push(format!(
            "| {} | {:.1} | {:.1} | {} |",
            d.operation,
            d.baseline_avg,
            d.current_avg,
            change(d)
        ));
    }
    lines.push(String::new());
}
