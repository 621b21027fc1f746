use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde_json::{Map, Value};

use crate::model::error::ProcessorError;
use crate::model::record;

/// CSV columns that hold numbers. Every other cell stays text, so names like
/// `1984` or `007` keep their exact spelling.
const NUMERIC_COLUMNS: &[&str] = &["price", "Quantity"];

/// Reads a list of records from `path`. Files ending in `.csv` are read as a
/// header row plus data rows; everything else is parsed as a JSON array.
pub fn load_records(path: &Path) -> Result<Vec<Value>, ProcessorError> {
    let shown = path.display().to_string();
    let file = File::open(path).map_err(|source| ProcessorError::Load {
        path: shown.clone(),
        source,
    })?;

    let is_csv = path
        .extension()
        .map_or(false, |ext| ext.eq_ignore_ascii_case("csv"));

    let records = if is_csv {
        read_csv(file, &shown)?
    } else {
        read_json(file, &shown)?
    };

    tracing::info!(path = %shown, records = records.len(), "records loaded");
    Ok(records)
}

fn read_json(file: File, path: &str) -> Result<Vec<Value>, ProcessorError> {
    let value: Value =
        serde_json::from_reader(BufReader::new(file)).map_err(|source| ProcessorError::Json {
            path: path.to_string(),
            source,
        })?;

    match value {
        Value::Array(records) => Ok(records),
        _ => Err(ProcessorError::NotAList {
            path: path.to_string(),
        }),
    }
}

fn read_csv(file: File, path: &str) -> Result<Vec<Value>, ProcessorError> {
    let csv_error = |source| ProcessorError::Csv {
        path: path.to_string(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(file);

    let headers = reader.headers().map_err(csv_error)?.clone();
    let mut records = Vec::new();

    for result in reader.records() {
        let row = result.map_err(csv_error)?;
        let mut fields = Map::new();
        for (header, cell) in headers.iter().zip(row.iter()) {
            let numeric = NUMERIC_COLUMNS.contains(&header);
            if let Some(value) = record::typed_cell(cell, numeric) {
                fields.insert(header.to_string(), value);
            }
        }
        records.push(Value::Object(fields));
    }

    Ok(records)
}
