use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{
    Array, AsArray, BooleanArray, Float32Array, Float64Array, Int32Array, Int64Array, StringArray,
};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{Column, Table, Value};
use super::recode;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the survey table from a file and run it through the rename/recode
/// pipeline.  Dispatch by extension.
///
/// Supported formats:
/// * `.parquet` – flat Parquet file, one scalar column per variable
/// * `.json`    – `[{ "Provinsi": 34, "Umur_Bulan": 12, ... }, ...]`
/// * `.csv`     – header row with the raw column names
pub fn load_file(path: &Path) -> Result<Table> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let raw = match ext.as_str() {
        "parquet" | "pq" => load_parquet(path),
        "json" => load_json(path),
        "csv" => load_csv(path),
        other => bail!("Unsupported file extension: .{other}"),
    }?;

    Ok(recode::prepare(raw))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default
/// `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "Provinsi": 34, "Jenis Kelamin": 1, "Umur_Bulan": 12, "BB_Lahir": 3.1 },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<Table> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let records = root.as_array().context("Expected top-level JSON array")?;

    // Column order: first appearance across the records.
    let mut order: Vec<String> = Vec::new();
    for rec in records {
        if let Some(obj) = rec.as_object() {
            for key in obj.keys() {
                if !order.contains(key) {
                    order.push(key.clone());
                }
            }
        }
    }

    let mut cells: BTreeMap<String, Vec<Value>> = BTreeMap::new();
    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;
        for name in &order {
            let value = obj.get(name).map_or(Value::Null, json_to_value);
            cells.entry(name.clone()).or_default().push(value);
        }
    }

    let columns = order
        .into_iter()
        .map(|name| {
            let values = cells.remove(&name).unwrap_or_default();
            Column::infer(name, values)
        })
        .collect();
    Ok(Table::new(columns))
}

fn json_to_value(val: &JsonValue) -> Value {
    match val {
        JsonValue::String(s) => Value::Text(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Integer(i)
            } else if let Some(f) = n.as_f64() {
                Value::Float(f)
            } else {
                Value::Text(n.to_string())
            }
        }
        JsonValue::Bool(b) => Value::Text(b.to_string()),
        JsonValue::Null => Value::Null,
        other => Value::Text(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with the raw column names, one record per child.
fn load_csv(path: &Path) -> Result<Table> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut cells: Vec<Vec<Value>> = vec![Vec::new(); headers.len()];

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        if record.len() != headers.len() {
            bail!(
                "CSV row {row_no}: expected {} fields, found {}",
                headers.len(),
                record.len()
            );
        }
        for (col_idx, cell) in record.iter().enumerate() {
            cells[col_idx].push(guess_cell_type(cell));
        }
    }

    let columns = headers
        .into_iter()
        .zip(cells)
        .map(|(name, values)| Column::infer(name, values))
        .collect();
    Ok(Table::new(columns))
}

fn guess_cell_type(s: &str) -> Value {
    let s = s.trim();
    if s.is_empty() {
        return Value::Null;
    }
    if let Ok(i) = s.parse::<i64>() {
        return Value::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return Value::Float(f);
    }
    Value::Text(s.to_string())
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a flat Parquet file: every column is a scalar Arrow array
/// (strings, ints, floats, bools).  Works with files written by both
/// **Pandas** (`df.to_parquet()`) and **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<Table> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut names: Vec<String> = Vec::new();
    let mut cells: Vec<Vec<Value>> = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        if names.is_empty() {
            names = schema.fields().iter().map(|f| f.name().clone()).collect();
            cells = vec![Vec::new(); names.len()];
        }

        for (col_idx, col) in batch.columns().iter().enumerate() {
            for row in 0..batch.num_rows() {
                cells[col_idx].push(extract_scalar(col, row));
            }
        }
    }

    let columns = names
        .into_iter()
        .zip(cells)
        .map(|(name, values)| Column::infer(name, values))
        .collect();
    Ok(Table::new(columns))
}

// -- Parquet / Arrow helpers --

/// Extract a single scalar from an Arrow column at a given row.
fn extract_scalar(col: &Arc<dyn Array>, row: usize) -> Value {
    if col.is_null(row) {
        return Value::Null;
    }
    match col.data_type() {
        DataType::Utf8 | DataType::LargeUtf8 => {
            if let Some(s) = col.as_any().downcast_ref::<StringArray>() {
                Value::Text(s.value(row).to_string())
            } else {
                // LargeStringArray
                let s = col.as_string::<i64>();
                Value::Text(s.value(row).to_string())
            }
        }
        DataType::Int32 => {
            let arr = col.as_any().downcast_ref::<Int32Array>();
            arr.map_or(Value::Null, |a| Value::Integer(a.value(row) as i64))
        }
        DataType::Int64 => {
            let arr = col.as_any().downcast_ref::<Int64Array>();
            arr.map_or(Value::Null, |a| Value::Integer(a.value(row)))
        }
        DataType::Float32 => {
            let arr = col.as_any().downcast_ref::<Float32Array>();
            arr.map_or(Value::Null, |a| Value::Float(a.value(row) as f64))
        }
        DataType::Float64 => {
            let arr = col.as_any().downcast_ref::<Float64Array>();
            arr.map_or(Value::Null, |a| Value::Float(a.value(row)))
        }
        DataType::Boolean => {
            let arr = col.as_any().downcast_ref::<BooleanArray>();
            arr.map_or(Value::Null, |a| Value::Text(a.value(row).to_string()))
        }
        other => Value::Text(format!("{other:?}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_type_guessing() {
        assert_eq!(guess_cell_type("12"), Value::Integer(12));
        assert_eq!(guess_cell_type("3.25"), Value::Float(3.25));
        assert_eq!(guess_cell_type(" Normal "), Value::Text("Normal".into()));
        assert_eq!(guess_cell_type(""), Value::Null);
    }

    #[test]
    fn json_records_build_recoded_table() {
        let dir = std::env::temp_dir().join("stunting-dashboard-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("rows.json");
        std::fs::write(
            &path,
            r#"[
                {"Jenis Kelamin": 1, "Umur_Bulan": 10},
                {"Jenis Kelamin": 2, "Umur_Bulan": 20}
            ]"#,
        )
        .unwrap();

        let table = load_file(&path).unwrap();
        assert_eq!(table.n_rows(), 2);
        let jk = table.column("Jenis Kelamin").unwrap();
        assert_eq!(jk.values[0], Value::Text("Laki-laki".into()));
        assert!(table.column("Umur Bulan").is_some());
    }

    #[test]
    fn unsupported_extension_is_an_error() {
        let err = load_file(Path::new("data.xlsx")).unwrap_err();
        assert!(err.to_string().contains(".xlsx"));
    }
}
