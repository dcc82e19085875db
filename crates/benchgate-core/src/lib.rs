//! Benchmark result analysis for CI.
//!
//! This crate turns raw operation-timing records into reviewable signals:
//!
//! - Aggregation into per-operation and per-tool statistics
//! - A single stored baseline, replaced atomically on demand
//! - Comparison against that baseline with a fixed ±5% noise band
//! - A per-record threshold gate with hard and soft bounds
//! - Markdown and console rendering of the above
//!
//! # Quick Start
//!
//! ```no_run
//! use benchgate_core::{BenchManager, CompareOutcome, EngineConfig};
//!
//! # fn example() -> benchgate_core::BenchResult<()> {
//! let manager = BenchManager::new(EngineConfig::load("benchmarks", None)?);
//!
//! match manager.compare(None)? {
//!     CompareOutcome::NoBaseline => println!("no baseline yet"),
//!     CompareOutcome::Compared(c) => {
//!         for r in &c.regressions {
//!             println!("{}: +{:.1}%", r.operation, r.change_percent);
//!         }
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Layout
//!
//! | Path | Contents |
//! |------|----------|
//! | `<dir>/results/benchmark_results_*.json` | Raw timing records, one file per run |
//! | `<dir>/baseline.json` | Comparison baseline |
//! | `<dir>/thresholds.json` | Threshold baseline for the CI gate |
//! | `<dir>/benchgate.yaml` | Optional path overrides |

pub mod aggregate;
pub mod baseline;
pub mod compare;
pub mod config;
pub mod discovery;
pub mod error;
mod io;
pub mod manager;
pub mod record;
pub mod report;
pub mod stats;
pub mod threshold;

// Re-export main types
pub use aggregate::{aggregate, OperationSummary, RunSummary, ToolOperationStats, ToolSummary};
pub use baseline::{Baseline, BaselineStore};
pub use compare::{
    compare, classify, Classification, CompareOutcome, ComparisonResult, OperationDelta,
    IMPROVEMENT_THRESHOLD_PCT, REGRESSION_THRESHOLD_PCT,
};
pub use config::{EngineConfig, EngineConfigOverrides};
pub use discovery::{ResultFileStatus, ResultsDir};
pub use error::{BenchError, BenchResult};
pub use manager::BenchManager;
pub use record::{decode_records, load_records, TimingRecord};
pub use stats::DurationStats;
pub use threshold::{
    check, check_record, RecordCheck, ThresholdBaseline, ThresholdEntry, ThresholdReport, Verdict,
    VerdictCounts,
};
