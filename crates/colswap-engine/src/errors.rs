use colswap_core::SchemaError;
use thiserror::Error;

/// Errors emitted while reading, swapping, or writing datasets.
#[derive(Debug, Error)]
pub enum SwapError {
    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),
    #[error("invalid dataset: {0}")]
    InvalidDataset(String),
    #[error("unsupported dataset format: {0}")]
    UnsupportedFormat(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("excel error: {0}")]
    Excel(#[from] calamine::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
