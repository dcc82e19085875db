use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "benchgate",
    version,
    about = "Benchmark result aggregation, baseline comparison and CI threshold gating"
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Benchmarks directory holding results/, baseline.json and thresholds.json
    #[arg(
        long,
        global = true,
        env = "BENCHGATE_DIR",
        default_value = "benchmarks"
    )]
    pub benchmarks_dir: PathBuf,

    /// YAML file overriding artifact paths (default: <benchmarks-dir>/benchgate.yaml)
    #[arg(long, global = true, env = "BENCHGATE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List available benchmark results
    List,
    /// Summarize a results file
    Summary(SummaryArgs),
    /// Compare a results file against the baseline
    Compare(CompareArgs),
    /// Replace the baseline with a results file
    SetBaseline(SetBaselineArgs),
    /// Generate a markdown performance report
    Report(ReportArgs),
    /// Gate raw results against the threshold baseline (exit 1 on failure)
    Check(CheckArgs),
}

#[derive(Args, Debug)]
pub struct SummaryArgs {
    /// Results file (default: latest)
    #[arg(long)]
    pub file: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Args, Debug)]
pub struct CompareArgs {
    /// Results file (default: latest)
    #[arg(long)]
    pub file: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Args, Debug)]
pub struct SetBaselineArgs {
    /// Results file (default: latest)
    #[arg(long)]
    pub file: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Results file (default: latest)
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Write the report here instead of stdout
    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Results file (default: latest)
    pub file: Option<PathBuf>,

    /// Append step outputs to this file
    #[arg(long, env = "GITHUB_OUTPUT")]
    pub github_output: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}
