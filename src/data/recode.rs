//! Rename and recode the raw table into the working table.
//!
//! Both steps are pure transforms: row count and row order never change,
//! and a missing column simply skips its rename/recode.

use super::codemap::{self, CODE_MAPS, PASS_THROUGH_CATEGORICAL, RENAME_COLUMNS};
use super::model::{FieldType, Table, Value};

/// Rename raw spreadsheet headers to display names.  Columns not in the
/// rename table keep their name.
pub fn rename_columns(mut table: Table) -> Table {
    for col in &mut table.columns {
        if let Some((_, display)) = RENAME_COLUMNS.iter().find(|(raw, _)| *raw == col.name) {
            col.name = (*display).to_string();
        }
    }
    table
}

/// Apply every code table to its column, then retype the pass-through
/// categorical columns.
///
/// Recoding a cell:
/// * integer code found in the table → its label,
/// * code absent from the table → `Value::Null` (never an error),
/// * already-labelled text → passed through unchanged (re-running the
///   recode is a no-op),
/// * null → null.
pub fn recode(mut table: Table) -> Table {
    for (name, map) in CODE_MAPS {
        let Some(col) = table.column_mut(name) else {
            log::debug!("column `{name}` absent, skipping recode");
            continue;
        };
        for cell in &mut col.values {
            *cell = recode_cell(cell, map);
        }
        col.ty = FieldType::Categorical;
    }

    for name in PASS_THROUGH_CATEGORICAL {
        if let Some(col) = table.column_mut(name) {
            col.ty = FieldType::Categorical;
        }
    }

    table
}

fn recode_cell(cell: &Value, map: &[(i64, &'static str)]) -> Value {
    match cell {
        Value::Text(_) | Value::Null => cell.clone(),
        other => match other.as_code().and_then(|c| codemap::label_for(map, c)) {
            Some(label) => Value::Text(label.to_string()),
            None => Value::Null,
        },
    }
}

/// Full ingestion pipeline: rename, then recode.
pub fn prepare(table: Table) -> Table {
    recode(rename_columns(table))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Column;

    fn raw() -> Table {
        Table::new(vec![
            Column::infer(
                "Jenis Kelamin".into(),
                vec![Value::Integer(1), Value::Integer(2), Value::Integer(1)],
            ),
            Column::infer(
                "Umur_Bulan".into(),
                vec![Value::Integer(10), Value::Integer(20), Value::Integer(30)],
            ),
        ])
    }

    #[test]
    fn recode_preserves_row_count_and_order() {
        let before = raw();
        let n = before.n_rows();
        let after = prepare(before);
        assert_eq!(after.n_rows(), n);
        let jk = after.column("Jenis Kelamin").unwrap();
        assert_eq!(jk.values[0], Value::Text("Laki-laki".into()));
        assert_eq!(jk.values[1], Value::Text("Perempuan".into()));
        assert_eq!(jk.values[2], Value::Text("Laki-laki".into()));
        assert_eq!(jk.ty, FieldType::Categorical);
    }

    #[test]
    fn rename_maps_raw_headers() {
        let after = rename_columns(raw());
        assert!(after.column("Umur Bulan").is_some());
        assert!(after.column("Umur_Bulan").is_none());
        // column not in the rename table keeps its name
        assert!(after.column("Jenis Kelamin").is_some());
    }

    #[test]
    fn unmapped_code_becomes_null() {
        let t = Table::new(vec![Column::infer(
            "Jenis Kelamin".into(),
            vec![Value::Integer(1), Value::Integer(7)],
        )]);
        let after = recode(t);
        let jk = after.column("Jenis Kelamin").unwrap();
        assert_eq!(jk.values[0], Value::Text("Laki-laki".into()));
        assert_eq!(jk.values[1], Value::Null);
    }

    #[test]
    fn recode_is_idempotent_on_labelled_input() {
        let once = prepare(raw());
        let twice = recode(once.clone());
        let a = once.column("Jenis Kelamin").unwrap();
        let b = twice.column("Jenis Kelamin").unwrap();
        assert_eq!(a.values, b.values);
    }

    #[test]
    fn integral_float_codes_recode() {
        let t = Table::new(vec![Column::infer(
            "Provinsi".into(),
            vec![Value::Float(34.0), Value::Float(11.0)],
        )]);
        let after = recode(t);
        let p = after.column("Provinsi").unwrap();
        assert_eq!(p.values[0], Value::Text("DI Yogyakarta".into()));
        assert_eq!(p.values[1], Value::Text("Aceh".into()));
    }

    #[test]
    fn missing_column_is_skipped() {
        let t = Table::new(vec![Column::infer(
            "Umur Bulan".into(),
            vec![Value::Integer(5)],
        )]);
        let after = recode(t);
        assert_eq!(after.n_cols(), 1);
        assert_eq!(after.column("Umur Bulan").unwrap().ty, FieldType::Numeric);
    }

    #[test]
    fn pass_through_columns_are_retyped() {
        let t = Table::new(vec![Column::infer(
            "Kategori Berat Lahir".into(),
            // numeric-looking bucket labels would otherwise infer as numeric
            vec![Value::Integer(1), Value::Integer(2)],
        )]);
        let after = recode(t);
        assert_eq!(
            after.column("Kategori Berat Lahir").unwrap().ty,
            FieldType::Categorical
        );
    }
}
