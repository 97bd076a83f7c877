use std::io::{Read, Write};

use colswap_core::{Dataset, Row, Schema, Value};

use crate::errors::SwapError;

/// Read a CSV document whose first record is the header.
///
/// Cells are kept as text; empty cells become `Null`. Records with a
/// different field count than the header are rejected as schema errors.
pub fn read_csv<R: Read>(reader: R) -> Result<Dataset, SwapError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = reader
        .headers()?
        .iter()
        .map(|header| header.to_string())
        .collect::<Vec<_>>();
    let schema = Schema::new(headers)?;

    let mut rows: Vec<Row> = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(Value::from_csv).collect());
    }

    Ok(Dataset::new(schema, rows)?)
}

/// Write a dataset as CSV with a header row in schema order.
pub fn write_csv<W: Write>(writer: W, dataset: &Dataset) -> Result<(), SwapError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    writer.write_record(dataset.schema().columns())?;
    for row in dataset.rows() {
        writer.write_record(row.iter().map(Value::to_csv))?;
    }

    writer.flush()?;
    Ok(())
}
