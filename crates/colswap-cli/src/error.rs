use colswap_core::SchemaError;
use colswap_engine::SwapError;
use colswap_plan::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),
    #[error("dataset error: {0}")]
    Swap(#[from] SwapError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid arguments: {0}")]
    InvalidArgs(String),
    #[error("logging error: {0}")]
    Logging(String),
}

impl CliError {
    /// Process exit code: 2 for configuration errors, 3 for schema errors.
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::Config(_) => 2,
            CliError::Schema(_) | CliError::Swap(SwapError::Schema(_)) => 3,
            _ => 1,
        }
    }
}

/// Print an error to stderr, expanding configuration issues one per line.
pub fn print_error(err: &CliError) {
    match err {
        CliError::Config(config_err) => match config_err.report() {
            Some(report) => {
                eprintln!("invalid swap configuration");
                for issue in &report.errors {
                    eprintln!("error {} {}: {}", issue.code, issue.path, issue.message);
                    if let Some(hint) = &issue.hint {
                        eprintln!("  hint: {hint}");
                    }
                }
            }
            None => eprintln!("{err}"),
        },
        _ => eprintln!("{err}"),
    }
}
