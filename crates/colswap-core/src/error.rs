use thiserror::Error;

/// Dataset shape errors shared across colswap crates.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    /// The dataset schema drifted from the schema a plan was built against.
    #[error("schema mismatch: expected columns [{}], found [{}]", .expected.join(", "), .actual.join(", "))]
    Mismatch {
        expected: Vec<String>,
        actual: Vec<String>,
    },
    /// A row does not carry one value per schema column.
    #[error("row {row} has {actual} value(s) but the schema defines {expected} column(s)")]
    RowWidth {
        row: usize,
        expected: usize,
        actual: usize,
    },
    /// A column name appears twice in the schema.
    #[error("duplicate column name: {0}")]
    DuplicateColumn(String),
    /// A keyed record does not carry the schema's column set.
    #[error("row {row} does not match the schema column set: {detail}")]
    ColumnSetMismatch { row: usize, detail: String },
}

/// Convenience alias for results returned by colswap crates.
pub type Result<T> = std::result::Result<T, SchemaError>;
