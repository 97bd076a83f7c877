use std::io::{Read, Write};

use colswap_core::{Dataset, Row, Schema, SchemaError, Value};
use serde_json::Map;

use crate::errors::SwapError;

/// Read a JSON array of flat objects.
///
/// The schema is the key order of the first object; every other object must
/// carry exactly the same keys. Nested arrays and objects are rejected.
pub fn read_json<R: Read>(reader: R) -> Result<Dataset, SwapError> {
    let document: serde_json::Value = serde_json::from_reader(reader)?;
    let serde_json::Value::Array(items) = document else {
        return Err(SwapError::InvalidDataset(
            "expected a JSON array of objects".to_string(),
        ));
    };

    let mut objects = Vec::with_capacity(items.len());
    for (idx, item) in items.into_iter().enumerate() {
        match item {
            serde_json::Value::Object(object) => objects.push(object),
            other => {
                return Err(SwapError::InvalidDataset(format!(
                    "row {idx} is not an object: {other}"
                )));
            }
        }
    }

    let Some(first) = objects.first() else {
        return Ok(Dataset::empty(Schema::new(Vec::<String>::new())?));
    };
    let schema = Schema::new(first.keys().cloned())?;

    let mut rows: Vec<Row> = Vec::with_capacity(objects.len());
    for (idx, object) in objects.iter().enumerate() {
        rows.push(object_to_row(idx, object, &schema)?);
    }

    Ok(Dataset::new(schema, rows)?)
}

fn object_to_row(
    idx: usize,
    object: &Map<String, serde_json::Value>,
    schema: &Schema,
) -> Result<Row, SwapError> {
    if object.len() != schema.len() {
        return Err(column_set_mismatch(idx, object, schema).into());
    }

    let mut row = Row::with_capacity(schema.len());
    for column in schema.columns() {
        let value = object
            .get(column)
            .ok_or_else(|| column_set_mismatch(idx, object, schema))?;
        let value = Value::from_json(value).ok_or_else(|| {
            SwapError::InvalidDataset(format!(
                "row {idx} column '{column}' holds a nested value"
            ))
        })?;
        row.push(value);
    }
    Ok(row)
}

fn column_set_mismatch(
    idx: usize,
    object: &Map<String, serde_json::Value>,
    schema: &Schema,
) -> SchemaError {
    let found = object.keys().cloned().collect::<Vec<_>>().join(", ");
    SchemaError::ColumnSetMismatch {
        row: idx,
        detail: format!(
            "expected [{}], found [{found}]",
            schema.columns().join(", ")
        ),
    }
}

/// Write a dataset as a pretty-printed JSON array of objects.
pub fn write_json<W: Write>(writer: W, dataset: &Dataset) -> Result<(), SwapError> {
    let columns = dataset.schema().columns();
    let objects: Vec<Map<String, serde_json::Value>> = dataset
        .rows()
        .iter()
        .map(|row| {
            columns
                .iter()
                .cloned()
                .zip(row.iter().map(Value::to_json))
                .collect()
        })
        .collect();

    serde_json::to_writer_pretty(writer, &objects)?;
    Ok(())
}
