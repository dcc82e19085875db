use benchgate_core::report::console::format_summary;
use benchgate_core::BenchManager;

use super::report_error;
use crate::cli::args::{OutputFormat, SummaryArgs};
use crate::exit_codes::SUCCESS;

pub fn run(manager: &BenchManager, args: SummaryArgs) -> anyhow::Result<i32> {
    let summary = match manager.summarize(args.file.as_deref()) {
        Ok(s) => s,
        Err(e) => return Ok(report_error(&e)),
    };

    match args.format {
        OutputFormat::Text => println!("{}", format_summary(&summary)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
    }
    Ok(SUCCESS)
}
