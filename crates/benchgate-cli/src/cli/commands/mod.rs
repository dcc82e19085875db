use benchgate_core::{BenchError, BenchManager, EngineConfig};

use super::args::{Cli, Command, GlobalArgs};

pub mod check;
pub mod compare;
pub mod list;
pub mod report;
pub mod set_baseline;
pub mod summary;

pub fn dispatch(cli: Cli) -> anyhow::Result<i32> {
    let manager = match manager_from(&cli.global) {
        Ok(m) => m,
        Err(e) => return Ok(report_error(&e)),
    };

    match cli.cmd {
        Command::List => list::run(&manager),
        Command::Summary(args) => summary::run(&manager, args),
        Command::Compare(args) => compare::run(&manager, args),
        Command::SetBaseline(args) => set_baseline::run(&manager, args),
        Command::Report(args) => report::run(&manager, args),
        Command::Check(args) => check::run(&manager, args),
    }
}

fn manager_from(global: &GlobalArgs) -> Result<BenchManager, BenchError> {
    let config = EngineConfig::load(&global.benchmarks_dir, global.config.as_deref())?;
    tracing::debug!(?config, "engine config");
    Ok(BenchManager::new(config))
}

/// Print an engine error and return the exit code it maps to.
pub(crate) fn report_error(e: &BenchError) -> i32 {
    eprintln!("Error: {}", e);
    e.exit_code()
}
