//! Filter-and-summarize: up to two categorical set predicates plus one
//! inclusive numeric range, combined with AND, then count/mean/median over
//! the range column on the surviving rows.

use std::collections::BTreeSet;

use thiserror::Error;

use super::model::Table;
use super::stats;

#[derive(Debug, Error, PartialEq)]
pub enum FilterError {
    #[error("kolom `{0}` tidak ada dalam tabel")]
    UnknownField(String),
}

/// One categorical constraint: keep rows whose label is in `allowed`.
/// An empty set means the constraint is inactive (keep everything).
#[derive(Debug, Clone, Default)]
pub struct CatConstraint {
    pub field: String,
    pub allowed: BTreeSet<String>,
}

impl CatConstraint {
    pub fn is_active(&self) -> bool {
        !self.allowed.is_empty()
    }
}

/// Inclusive numeric range over one column.  The bounds are fixed from the
/// unfiltered table when the column is selected, not recomputed per pass.
#[derive(Debug, Clone)]
pub struct NumericRange {
    pub field: String,
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone)]
pub struct FilterSpec {
    pub cat1: Option<CatConstraint>,
    pub cat2: Option<CatConstraint>,
    pub range: NumericRange,
}

/// Matching rows plus summary statistics over the range column.
/// `mean`/`median` are absent (not zero) when no row matches; full
/// precision is kept here, rounding is a display concern.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterResult {
    pub rows: Vec<usize>,
    pub count: usize,
    pub mean: Option<f64>,
    pub median: Option<f64>,
}

/// Apply the spec: categorical 1, categorical 2, then the numeric range.
/// The order is fixed for determinism; the result is the intersection
/// either way.
pub fn apply(table: &Table, spec: &FilterSpec) -> Result<FilterResult, FilterError> {
    let mut rows: Vec<usize> = (0..table.n_rows()).collect();

    for cat in [&spec.cat1, &spec.cat2].into_iter().flatten() {
        rows = apply_categorical(table, cat, rows)?;
    }
    rows = apply_range(table, &spec.range, rows)?;

    let num_col = table
        .column(&spec.range.field)
        .ok_or_else(|| FilterError::UnknownField(spec.range.field.clone()))?;
    let subset: Vec<f64> = rows
        .iter()
        .filter_map(|&i| num_col.values[i].as_f64())
        .collect();

    Ok(FilterResult {
        count: rows.len(),
        mean: stats::mean(&subset),
        median: stats::median(&subset),
        rows,
    })
}

fn apply_categorical(
    table: &Table,
    cat: &CatConstraint,
    rows: Vec<usize>,
) -> Result<Vec<usize>, FilterError> {
    let col = table
        .column(&cat.field)
        .ok_or_else(|| FilterError::UnknownField(cat.field.clone()))?;
    if !cat.is_active() {
        return Ok(rows);
    }
    Ok(rows
        .into_iter()
        .filter(|&i| cat.allowed.contains(&col.values[i].to_string()))
        .collect())
}

fn apply_range(
    table: &Table,
    range: &NumericRange,
    rows: Vec<usize>,
) -> Result<Vec<usize>, FilterError> {
    let col = table
        .column(&range.field)
        .ok_or_else(|| FilterError::UnknownField(range.field.clone()))?;
    Ok(rows
        .into_iter()
        .filter(|&i| {
            col.values[i]
                .as_f64()
                .is_some_and(|v| v >= range.min && v <= range.max)
        })
        .collect())
}

/// Build the row subset as a new table (for display).
pub fn subset_table(table: &Table, rows: &[usize]) -> Table {
    Table::new(
        table
            .columns
            .iter()
            .map(|c| super::model::Column {
                name: c.name.clone(),
                ty: c.ty,
                values: rows.iter().map(|&i| c.values[i].clone()).collect(),
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Column, Value};
    use crate::data::recode;

    fn working_table() -> Table {
        // raw coded rows: {sex:1, age:10}, {sex:2, age:20}, {sex:1, age:30}
        let raw = Table::new(vec![
            Column::infer(
                "Jenis Kelamin".into(),
                vec![Value::Integer(1), Value::Integer(2), Value::Integer(1)],
            ),
            Column::infer(
                "Umur_Bulan".into(),
                vec![Value::Integer(10), Value::Integer(20), Value::Integer(30)],
            ),
        ]);
        recode::prepare(raw)
    }

    fn spec(
        cat: Option<(&str, &[&str])>,
        range: (&str, f64, f64),
    ) -> FilterSpec {
        FilterSpec {
            cat1: cat.map(|(field, labels)| CatConstraint {
                field: field.to_string(),
                allowed: labels.iter().map(ToString::to_string).collect(),
            }),
            cat2: None,
            range: NumericRange {
                field: range.0.to_string(),
                min: range.1,
                max: range.2,
            },
        }
    }

    #[test]
    fn categorical_plus_range_scenario() {
        let t = working_table();
        let s = spec(
            Some(("Jenis Kelamin", &["Laki-laki"])),
            ("Umur Bulan", 0.0, 100.0),
        );
        let r = apply(&t, &s).unwrap();
        assert_eq!(r.count, 2);
        assert_eq!(r.rows, vec![0, 2]);
        assert_eq!(r.mean, Some(20.0));
        assert_eq!(r.median, Some(20.0));
    }

    #[test]
    fn inactive_categorical_means_range_only() {
        let t = working_table();
        let s = spec(Some(("Jenis Kelamin", &[])), ("Umur Bulan", 15.0, 30.0));
        let r = apply(&t, &s).unwrap();
        assert_eq!(r.rows, vec![1, 2]);
    }

    #[test]
    fn range_bounds_are_inclusive() {
        let t = working_table();
        let s = spec(None, ("Umur Bulan", 10.0, 30.0));
        let r = apply(&t, &s).unwrap();
        assert_eq!(r.count, 3);
    }

    #[test]
    fn result_never_exceeds_table() {
        let t = working_table();
        let s = spec(None, ("Umur Bulan", f64::MIN, f64::MAX));
        let r = apply(&t, &s).unwrap();
        assert_eq!(r.count, t.n_rows());
    }

    #[test]
    fn empty_range_yields_absent_stats() {
        let t = working_table();
        let s = spec(None, ("Umur Bulan", 100.0, 200.0));
        let r = apply(&t, &s).unwrap();
        assert_eq!(r.count, 0);
        assert!(r.rows.is_empty());
        assert_eq!(r.mean, None);
        assert_eq!(r.median, None);
    }

    #[test]
    fn filtering_on_projected_column_fails_fast() {
        let t = working_table();
        let drop = ["Umur Bulan".to_string()].into_iter().collect();
        let projected = t.project(&drop);
        let s = spec(None, ("Umur Bulan", 0.0, 100.0));
        assert_eq!(
            apply(&projected, &s),
            Err(FilterError::UnknownField("Umur Bulan".into()))
        );
    }

    #[test]
    fn both_categoricals_combine_with_and() {
        let mut t = working_table();
        t.columns.push(Column {
            name: "Pengetahuan Stunting".into(),
            ty: crate::data::model::FieldType::Categorical,
            values: vec![
                Value::Text("Ya".into()),
                Value::Text("Ya".into()),
                Value::Text("Tidak".into()),
            ],
        });
        let s = FilterSpec {
            cat1: Some(CatConstraint {
                field: "Jenis Kelamin".into(),
                allowed: ["Laki-laki".to_string()].into_iter().collect(),
            }),
            cat2: Some(CatConstraint {
                field: "Pengetahuan Stunting".into(),
                allowed: ["Ya".to_string()].into_iter().collect(),
            }),
            range: NumericRange {
                field: "Umur Bulan".into(),
                min: 0.0,
                max: 100.0,
            },
        };
        let r = apply(&t, &s).unwrap();
        assert_eq!(r.rows, vec![0]);
    }

    #[test]
    fn subset_table_preserves_schema() {
        let t = working_table();
        let sub = subset_table(&t, &[2, 0]);
        assert_eq!(sub.n_cols(), t.n_cols());
        assert_eq!(sub.n_rows(), 2);
        assert_eq!(
            sub.column("Umur Bulan").unwrap().values,
            vec![Value::Integer(30), Value::Integer(10)]
        );
    }
}
