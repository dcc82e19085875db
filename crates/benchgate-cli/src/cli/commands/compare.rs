use benchgate_core::report::console::format_comparison;
use benchgate_core::BenchManager;

use super::report_error;
use crate::cli::args::{CompareArgs, OutputFormat};
use crate::exit_codes::SUCCESS;

/// Regressions are advisory here; only `check` gates.
pub fn run(manager: &BenchManager, args: CompareArgs) -> anyhow::Result<i32> {
    let outcome = match manager.compare(args.file.as_deref()) {
        Ok(o) => o,
        Err(e) => return Ok(report_error(&e)),
    };

    match args.format {
        OutputFormat::Text => println!("{}", format_comparison(&outcome)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&outcome)?),
    }
    Ok(SUCCESS)
}
