use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use colswap_engine::DatasetFormat;

#[derive(Parser, Debug)]
#[command(
    name = "colswap",
    version,
    about = "Swap values between column groups to break cross-column correlations"
)]
pub struct Cli {
    /// Minimum level of log events written to stderr; unknown names fall back to info.
    #[arg(
        long = "log_level",
        visible_alias = "log-level",
        short = 'l',
        global = true,
        default_value = "info"
    )]
    pub log_level: String,
    /// Log rendering.
    #[arg(
        long = "log_format",
        visible_alias = "log-format",
        value_enum,
        global = true,
        default_value_t = LogFormat::Text
    )]
    pub log_format: LogFormat,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Swap grouped column values and write the result.
    Swap(SwapArgs),
    /// Check a configuration against a dataset without writing output.
    Validate(InputArgs),
    /// Print the JSON Schema of the configuration format.
    Schema,
}

#[derive(Args, Debug)]
pub struct InputArgs {
    /// Dataset file (.csv, .json, .xlsx or .xls).
    #[arg(value_name = "DATA")]
    pub data: PathBuf,
    /// Swap configuration file (.toml, .json, .yaml or .yml).
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,
}

#[derive(Args, Debug)]
pub struct SwapArgs {
    #[command(flatten)]
    pub input: InputArgs,
    /// Destination for the swapped dataset; falls back to the config's
    /// output_file, then to masked_data.<format> in the working directory.
    #[arg(long = "output_file", visible_alias = "output-file", short = 'o')]
    pub output_file: Option<PathBuf>,
    /// Seed override; replaces the config seed.
    #[arg(long)]
    pub seed: Option<u64>,
    /// Output format; defaults to the input format, csv for workbooks.
    #[arg(long, value_enum)]
    pub format: Option<FormatArg>,
    /// Optional path for the JSON run report.
    #[arg(long)]
    pub report: Option<PathBuf>,
}

impl Cli {
    /// Resolved log level, or `None` when the name is not recognized.
    pub fn parsed_log_level(&self) -> Option<LogLevel> {
        LogLevel::from_name(&self.log_level)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Case-insensitive lookup; `warning` and `critical` are accepted too.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "error" | "critical" => Some(LogLevel::Error),
            "warn" | "warning" => Some(LogLevel::Warn),
            "info" => Some(LogLevel::Info),
            "debug" => Some(LogLevel::Debug),
            "trace" => Some(LogLevel::Trace),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Csv,
    Json,
}

/// Output path used when neither the command line nor the config names one.
pub fn default_output_file(format: DatasetFormat) -> PathBuf {
    PathBuf::from(format!("masked_data.{}", format.extension()))
}

impl From<FormatArg> for DatasetFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Csv => DatasetFormat::Csv,
            FormatArg::Json => DatasetFormat::Json,
        }
    }
}
