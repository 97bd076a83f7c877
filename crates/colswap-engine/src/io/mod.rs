//! Dataset readers and writers.

pub mod csv;
pub mod excel;
pub mod json;

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use colswap_core::Dataset;

use crate::errors::SwapError;

/// Supported dataset file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetFormat {
    Csv,
    Json,
    /// `.xlsx`/`.xls` workbooks; read only.
    Excel,
}

impl DatasetFormat {
    /// Detect the format from the file extension.
    pub fn from_path(path: &Path) -> Result<Self, SwapError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match extension.as_str() {
            "csv" => Ok(DatasetFormat::Csv),
            "json" => Ok(DatasetFormat::Json),
            "xlsx" | "xls" => Ok(DatasetFormat::Excel),
            _ => Err(SwapError::UnsupportedFormat(path.display().to_string())),
        }
    }

    /// Format used when writing a dataset read in this format.
    pub fn output(self) -> Self {
        match self {
            DatasetFormat::Excel => DatasetFormat::Csv,
            other => other,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            DatasetFormat::Csv => "csv",
            DatasetFormat::Json => "json",
            DatasetFormat::Excel => "xlsx",
        }
    }
}

/// Read a dataset file in the given format.
pub fn read_dataset(path: &Path, format: DatasetFormat) -> Result<Dataset, SwapError> {
    match format {
        DatasetFormat::Csv => csv::read_csv(BufReader::new(File::open(path)?)),
        DatasetFormat::Json => json::read_json(BufReader::new(File::open(path)?)),
        DatasetFormat::Excel => excel::read_excel(path),
    }
}

/// Serialize a dataset in the given format.
pub fn dataset_to_bytes(dataset: &Dataset, format: DatasetFormat) -> Result<Vec<u8>, SwapError> {
    let mut buffer = Vec::new();
    match format {
        DatasetFormat::Csv => csv::write_csv(&mut buffer, dataset)?,
        DatasetFormat::Json => json::write_json(&mut buffer, dataset)?,
        DatasetFormat::Excel => {
            return Err(SwapError::UnsupportedFormat(
                "excel output is not supported, write csv or json".to_string(),
            ));
        }
    }
    Ok(buffer)
}
