use benchgate_core::BenchManager;

use super::report_error;
use crate::cli::args::SetBaselineArgs;
use crate::exit_codes::SUCCESS;

pub fn run(manager: &BenchManager, args: SetBaselineArgs) -> anyhow::Result<i32> {
    match manager.set_baseline(args.file.as_deref()) {
        Ok(baseline) => {
            println!("Baseline set from {}", baseline.source_file);
            Ok(SUCCESS)
        }
        Err(e) => Ok(report_error(&e)),
    }
}
