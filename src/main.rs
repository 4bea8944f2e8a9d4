//! `pynotes` binary: parses the command line and runs one note command.

use std::process::ExitCode;

use clap::Parser;

use pynotes_cli::{cli, commands, exec::SystemExecutor, logging};

/// Exit status for usage errors, matching the one clap uses for bad arguments.
const USAGE_EXIT_CODE: u8 = 2;

fn main() -> ExitCode {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = cli::Cli::parse();
    let command = args.command.name();
    logging::init_subscriber(args.verbose, command);
    let log = logging::Logger::new(command);

    match commands::run(&args, &SystemExecutor, &log) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => {
            log.report_log_location();
            ExitCode::FAILURE
        }
        Err(e) => {
            log.error(&e.to_string());
            if e.is_usage() {
                ExitCode::from(USAGE_EXIT_CODE)
            } else {
                log.report_log_location();
                ExitCode::FAILURE
            }
        }
    }
}
