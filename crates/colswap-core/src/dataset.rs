use crate::error::{Result, SchemaError};
use crate::schema::Schema;
use crate::value::Value;

/// One row, positionally aligned with the dataset schema.
pub type Row = Vec<Value>;

/// Ordered rows sharing a single schema.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    schema: Schema,
    rows: Vec<Row>,
}

impl Dataset {
    /// Build a dataset, rejecting rows whose width differs from the schema.
    pub fn new(schema: Schema, rows: Vec<Row>) -> Result<Self> {
        let dataset = Self { schema, rows };
        dataset.ensure_consistent()?;
        Ok(dataset)
    }

    pub fn empty(schema: Schema) -> Self {
        Self {
            schema,
            rows: Vec::new(),
        }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell lookup by row index and column name.
    pub fn get(&self, row: usize, column: &str) -> Option<&Value> {
        let index = self.schema.index_of(column)?;
        self.rows.get(row).and_then(|values| values.get(index))
    }

    /// All values of one column in row order.
    pub fn column_values(&self, column: &str) -> Option<Vec<&Value>> {
        let index = self.schema.index_of(column)?;
        Some(self.rows.iter().map(|row| &row[index]).collect())
    }

    /// Check that every row carries exactly one value per column.
    pub fn ensure_consistent(&self) -> Result<()> {
        let expected = self.schema.len();
        for (row, values) in self.rows.iter().enumerate() {
            if values.len() != expected {
                return Err(SchemaError::RowWidth {
                    row,
                    expected,
                    actual: values.len(),
                });
            }
        }
        Ok(())
    }
}
