use benchgate_core::report::console::format_check_report;
use benchgate_core::report::github::append_github_output;
use benchgate_core::BenchManager;

use super::report_error;
use crate::cli::args::{CheckArgs, OutputFormat};
use crate::exit_codes::{CHECK_FAILED, SUCCESS};

/// Exit 1 iff a record failed. Warnings and step-output failures never
/// change the exit code.
pub fn run(manager: &BenchManager, args: CheckArgs) -> anyhow::Result<i32> {
    let report = match manager.check_thresholds(args.file.as_deref()) {
        Ok(r) => r,
        Err(e) => return Ok(report_error(&e)),
    };

    match args.format {
        OutputFormat::Text => println!("{}", format_check_report(&report)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    // Step outputs are advisory; only the gate decides the exit code.
    if let Some(path) = &args.github_output {
        if let Err(e) = append_github_output(path, &report) {
            tracing::warn!(path = %path.display(), error = %e, "failed to write step outputs");
            eprintln!("Warning: {}", e);
        }
    }

    Ok(if report.passed { SUCCESS } else { CHECK_FAILED })
}
