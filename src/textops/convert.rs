use serde_json::{Map, Value};

use std::fs;
use std::path::Path;

use crate::batch::{write_decision, Outcome};
use crate::core::error::{BatchError, Result};

/// One row: column name -> value. Key order is preserved so CSV columns
/// survive a round trip.
pub type Record = Map<String, Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFormat {
    Json,
    Csv,
}

impl DataFormat {
    pub fn from_str(value: &str) -> Result<Self> {
        match value {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            other => Err(BatchError::InvalidArgument(format!(
                "unknown format '{other}'. Expected json or csv."
            ))),
        }
    }

    /// Infer the format from a file extension, if recognizable.
    pub fn infer(path: &Path) -> Option<Self> {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("json") => Some(Self::Json),
            Some("csv") => Some(Self::Csv),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }
}

/// Read a CSV file into records; every value comes back as a string.
pub fn read_csv(path: &Path, delimiter: u8) -> Result<Vec<Record>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .from_path(path)?;
    let headers = reader.headers()?.clone();

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        let mut record = Record::new();
        for (header, field) in headers.iter().zip(row.iter()) {
            record.insert(header.to_string(), Value::String(field.to_string()));
        }
        records.push(record);
    }
    Ok(records)
}

/// Write records as CSV, taking the header from the first record. An empty
/// record list produces an empty file.
pub fn write_csv(records: &[Record], path: &Path, delimiter: u8) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_path(path)?;

    let Some(first) = records.first() else {
        writer.flush()?;
        return Ok(());
    };

    let headers: Vec<&String> = first.keys().collect();
    writer.write_record(headers.iter().map(|h| h.as_str()))?;

    for record in records {
        let row: Vec<String> = headers
            .iter()
            .map(|h| record.get(*h).map(stringify).unwrap_or_default())
            .collect();
        writer.write_record(&row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Read a JSON file that holds an array of objects.
pub fn read_json(path: &Path) -> Result<Vec<Record>> {
    let content = fs::read_to_string(path)?;
    let value: Value = serde_json::from_str(&content)?;

    match value {
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Value::Object(map) => Ok(map),
                other => Err(BatchError::InvalidArgument(format!(
                    "expected an array of objects, found element: {other}"
                ))),
            })
            .collect(),
        other => Err(BatchError::InvalidArgument(format!(
            "expected a top-level JSON array, found: {}",
            kind_of(&other)
        ))),
    }
}

/// Write records as a JSON array, compact by default.
pub fn write_json(records: &[Record], path: &Path, pretty: bool) -> Result<()> {
    let content = if pretty {
        serde_json::to_string_pretty(records)?
    } else {
        serde_json::to_string(records)?
    };
    fs::write(path, content)?;
    Ok(())
}

/// Convert one file to `target` format inside `output_dir`.
pub fn convert_file(
    path: &Path,
    output_dir: &Path,
    target: DataFormat,
    input_format: Option<DataFormat>,
    delimiter: u8,
    pretty: bool,
    overwrite: bool,
    dry_run: bool,
) -> Result<Outcome> {
    let Some(input_format) = input_format.or_else(|| DataFormat::infer(path)) else {
        return Err(BatchError::InvalidArgument(format!(
            "cannot infer input format of '{}'; use --input-format",
            path.display()
        )));
    };

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    let dest = output_dir.join(format!("{stem}.{}", target.extension()));

    if let Some(outcome) = write_decision(&dest, overwrite, dry_run) {
        return Ok(outcome);
    }

    let records = match input_format {
        DataFormat::Csv => read_csv(path, delimiter)?,
        DataFormat::Json => read_json(path)?,
    };

    fs::create_dir_all(output_dir)?;
    match target {
        DataFormat::Json => write_json(&records, &dest, pretty)?,
        DataFormat::Csv => write_csv(&records, &dest, delimiter)?,
    }

    Ok(Outcome::Done)
}

fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
