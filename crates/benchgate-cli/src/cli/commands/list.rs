use benchgate_core::report::console::format_results_list;
use benchgate_core::BenchManager;

use super::report_error;
use crate::exit_codes::SUCCESS;

pub fn run(manager: &BenchManager) -> anyhow::Result<i32> {
    match manager.scan_results() {
        Ok(files) => {
            println!("{}", format_results_list(&files));
            Ok(SUCCESS)
        }
        Err(e) => Ok(report_error(&e)),
    }
}
