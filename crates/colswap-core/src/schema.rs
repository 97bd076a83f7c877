use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SchemaError};

/// Ordered, duplicate-free set of column names shared by every row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct Schema {
    columns: Vec<String>,
}

impl Schema {
    pub fn new<I, S>(columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();
        let mut seen = BTreeSet::new();
        for column in &columns {
            if !seen.insert(column.as_str()) {
                return Err(SchemaError::DuplicateColumn(column.clone()));
            }
        }
        Ok(Self { columns })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Position of a column by exact name.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    pub fn name(&self, index: usize) -> Option<&str> {
        self.columns.get(index).map(String::as_str)
    }

    /// Fail unless `actual` has the same columns in the same order.
    pub fn ensure_matches(&self, actual: &Schema) -> Result<()> {
        if self.columns == actual.columns {
            return Ok(());
        }
        Err(SchemaError::Mismatch {
            expected: self.columns.clone(),
            actual: actual.columns.clone(),
        })
    }
}

impl TryFrom<Vec<String>> for Schema {
    type Error = SchemaError;

    fn try_from(columns: Vec<String>) -> Result<Self> {
        Schema::new(columns)
    }
}

impl From<Schema> for Vec<String> {
    fn from(schema: Schema) -> Self {
        schema.columns
    }
}
