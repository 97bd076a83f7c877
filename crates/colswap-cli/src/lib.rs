//! Command-line front end for colswap.

mod atomic;
mod cli;
mod commands;
mod error;
mod logging;

pub use cli::{
    Cli, Command, FormatArg, InputArgs, LogFormat, LogLevel, SwapArgs, default_output_file,
};
pub use commands::run;
pub use error::{CliError, print_error};
pub use logging::init_logging;
