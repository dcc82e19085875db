use benchgate_core::BenchManager;

use super::report_error;
use crate::cli::args::ReportArgs;
use crate::exit_codes::SUCCESS;

pub fn run(manager: &BenchManager, args: ReportArgs) -> anyhow::Result<i32> {
    let content = match manager.report(args.file.as_deref(), args.output.as_deref()) {
        Ok(c) => c,
        Err(e) => return Ok(report_error(&e)),
    };

    match &args.output {
        Some(path) => println!("Report saved to {}", path.display()),
        None => println!("{}", content),
    }
    Ok(SUCCESS)
}
