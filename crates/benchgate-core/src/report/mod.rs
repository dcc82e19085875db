//! Rendering of summaries, comparisons and gate results.
//!
//! Every renderer here is a pure function of its inputs and returns a
//! `String`; printing and file output are left to the caller.

pub mod console;
pub mod github;
pub mod markdown;

pub use markdown::render_report;

/// Shown wherever a comparison was requested but no baseline is stored.
pub const NO_BASELINE_MESSAGE: &str = "No baseline found. Run 'set-baseline' first.";

/// A success rate in `[0, 1]` as a percentage with one decimal.
pub(crate) fn percent(rate: f64) -> String {
    format!("{:.1}%", rate * 100.0)
}
