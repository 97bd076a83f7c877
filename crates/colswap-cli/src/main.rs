use std::process::ExitCode;

use clap::Parser;
use colswap_cli::{Cli, LogLevel, init_logging, print_error, run};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = cli.parsed_log_level();
    if let Err(err) = init_logging(log_level.unwrap_or(LogLevel::Info), cli.log_format) {
        eprintln!("{err}");
        return ExitCode::from(err.exit_code());
    }
    if log_level.is_none() {
        tracing::warn!(
            event = "invalid_log_level",
            value = %cli.log_level,
            "invalid log level {}, using INFO instead",
            cli.log_level
        );
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(event = "run_failed", error = %err);
            print_error(&err);
            ExitCode::from(err.exit_code())
        }
    }
}
