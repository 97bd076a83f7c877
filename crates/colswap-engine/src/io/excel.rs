use std::path::Path;

use calamine::{Data, DataType, Reader, open_workbook_auto};
use colswap_core::{Dataset, Row, Schema, Value};

use crate::errors::SwapError;

/// Read the first worksheet of an `.xlsx`/`.xls` workbook.
///
/// The first row is the header. Blank cells become `Null`, numbers and
/// booleans keep their type, dates are rendered as `YYYY-MM-DD HH:MM:SS`
/// text. Workbooks are input only; output is written as CSV.
pub fn read_excel(path: &Path) -> Result<Dataset, SwapError> {
    let mut workbook = open_workbook_auto(path)?;
    let Some(sheet) = workbook.sheet_names().into_iter().next() else {
        return Err(SwapError::InvalidDataset(format!(
            "workbook {} has no worksheets",
            path.display()
        )));
    };
    let range = workbook.worksheet_range(&sheet)?;

    let mut records = range.rows();
    let Some(header) = records.next() else {
        return Ok(Dataset::empty(Schema::new(Vec::<String>::new())?));
    };
    let mut columns = Vec::with_capacity(header.len());
    for (idx, cell) in header.iter().enumerate() {
        if cell.is_empty() {
            return Err(SwapError::InvalidDataset(format!(
                "sheet {sheet} has a blank header in column {}",
                idx + 1
            )));
        }
        columns.push(cell.to_string());
    }
    let schema = Schema::new(columns)?;

    let rows: Vec<Row> = records
        .map(|record| record.iter().map(cell_value).collect())
        .collect();

    Ok(Dataset::new(schema, rows)?)
}

fn cell_value(cell: &Data) -> Value {
    match cell {
        Data::Empty => Value::Null,
        Data::String(value) if value.is_empty() => Value::Null,
        Data::String(value) => Value::Text(value.clone()),
        Data::Int(value) => Value::Int(*value),
        Data::Float(value) => Value::Float(*value),
        Data::Bool(value) => Value::Bool(*value),
        Data::DateTime(_) => match cell.as_datetime() {
            Some(datetime) => Value::Text(datetime.format("%Y-%m-%d %H:%M:%S").to_string()),
            None => Value::Text(cell.to_string()),
        },
        Data::DateTimeIso(value) | Data::DurationIso(value) => Value::Text(value.clone()),
        Data::Error(_) => Value::Text(cell.to_string()),
    }
}
