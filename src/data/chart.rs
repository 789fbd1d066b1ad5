//! Chart series computation for the visualisation page.
//!
//! The core validates the (chart kind, field type) pairing and refuses an
//! incompatible request with a user-facing message; rendering is the UI's
//! concern.

use std::fmt;

use thiserror::Error;

use super::model::{FieldType, Table};
use super::stats::{self, BoxSummary};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Bar,
    Pie,
    Histogram,
    Boxplot,
}

impl ChartKind {
    pub const ALL: [ChartKind; 4] = [
        ChartKind::Bar,
        ChartKind::Pie,
        ChartKind::Histogram,
        ChartKind::Boxplot,
    ];

    /// Which field type this chart kind accepts.
    pub fn required_type(self) -> FieldType {
        match self {
            ChartKind::Bar | ChartKind::Pie => FieldType::Categorical,
            ChartKind::Histogram | ChartKind::Boxplot => FieldType::Numeric,
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChartKind::Bar => write!(f, "Bar Chart"),
            ChartKind::Pie => write!(f, "Pie Chart"),
            ChartKind::Histogram => write!(f, "Histogram"),
            ChartKind::Boxplot => write!(f, "Boxplot"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub field: String,
}

#[derive(Debug, Error, PartialEq)]
pub enum ChartError {
    #[error("kolom `{0}` tidak ada dalam tabel")]
    UnknownField(String),
    #[error("{kind} hanya untuk variabel {required}, sedangkan `{field}` bertipe {actual}")]
    IncompatibleField {
        kind: ChartKind,
        field: String,
        required: FieldType,
        actual: FieldType,
    },
    #[error("kolom `{0}` tidak memiliki data")]
    EmptyColumn(String),
}

/// One histogram bin over `[start, end)` (the last bin is closed).
#[derive(Debug, Clone, PartialEq)]
pub struct HistBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub label: String,
    pub count: usize,
    pub fraction: f64,
}

/// The aggregated series handed to the renderer.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartData {
    /// (label, count), most frequent first.
    Bar(Vec<(String, usize)>),
    Pie(Vec<PieSlice>),
    Histogram(Vec<HistBin>),
    Boxplot(BoxSummary),
}

/// Compute the series for a chart spec, refusing incompatible pairings.
pub fn compute(table: &Table, spec: &ChartSpec) -> Result<ChartData, ChartError> {
    let col = table
        .column(&spec.field)
        .ok_or_else(|| ChartError::UnknownField(spec.field.clone()))?;

    let required = spec.kind.required_type();
    if col.ty != required {
        return Err(ChartError::IncompatibleField {
            kind: spec.kind,
            field: spec.field.clone(),
            required,
            actual: col.ty,
        });
    }

    match spec.kind {
        ChartKind::Bar => Ok(ChartData::Bar(value_counts(col))),
        ChartKind::Pie => {
            let counts = value_counts(col);
            let total: usize = counts.iter().map(|(_, n)| n).sum();
            if total == 0 {
                return Err(ChartError::EmptyColumn(spec.field.clone()));
            }
            Ok(ChartData::Pie(
                counts
                    .into_iter()
                    .map(|(label, count)| PieSlice {
                        label,
                        count,
                        fraction: count as f64 / total as f64,
                    })
                    .collect(),
            ))
        }
        ChartKind::Histogram => {
            let vals = col.numeric_values();
            if vals.is_empty() {
                return Err(ChartError::EmptyColumn(spec.field.clone()));
            }
            Ok(ChartData::Histogram(histogram_bins(&vals)))
        }
        ChartKind::Boxplot => stats::box_summary(col)
            .map(ChartData::Boxplot)
            .ok_or_else(|| ChartError::EmptyColumn(spec.field.clone())),
    }
}

/// Distinct labels with their counts, most frequent first; ties break by
/// label so the order is deterministic.
fn value_counts(col: &super::model::Column) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for v in &col.values {
        if v.is_null() {
            continue;
        }
        let label = v.to_string();
        match counts.iter_mut().find(|(l, _)| *l == label) {
            Some((_, n)) => *n += 1,
            None => counts.push((label, 1)),
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    counts
}

/// Equal-width bins, `ceil(sqrt(n))` of them, clamped to `1..=50`.
fn histogram_bins(vals: &[f64]) -> Vec<HistBin> {
    let min = vals.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = vals.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let n_bins = ((vals.len() as f64).sqrt().ceil() as usize).clamp(1, 50);

    if min == max {
        // degenerate distribution: one bin holding everything
        return vec![HistBin {
            start: min,
            end: max,
            count: vals.len(),
        }];
    }

    let width = (max - min) / n_bins as f64;
    let mut bins: Vec<HistBin> = (0..n_bins)
        .map(|i| HistBin {
            start: min + i as f64 * width,
            end: min + (i + 1) as f64 * width,
            count: 0,
        })
        .collect();

    for &v in vals {
        let idx = (((v - min) / width) as usize).min(n_bins - 1);
        bins[idx].count += 1;
    }
    bins
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Column, Table, Value};

    fn table() -> Table {
        Table::new(vec![
            Column::infer(
                "Jenis Kelamin".into(),
                vec![
                    Value::Text("Laki-laki".into()),
                    Value::Text("Perempuan".into()),
                    Value::Text("Laki-laki".into()),
                ],
            ),
            Column::infer(
                "Umur Bulan".into(),
                vec![Value::Integer(10), Value::Integer(20), Value::Integer(30)],
            ),
        ])
    }

    fn spec(kind: ChartKind, field: &str) -> ChartSpec {
        ChartSpec {
            kind,
            field: field.to_string(),
        }
    }

    #[test]
    fn bar_counts_most_frequent_first() {
        let data = compute(&table(), &spec(ChartKind::Bar, "Jenis Kelamin")).unwrap();
        assert_eq!(
            data,
            ChartData::Bar(vec![
                ("Laki-laki".to_string(), 2),
                ("Perempuan".to_string(), 1)
            ])
        );
    }

    #[test]
    fn pie_fractions_sum_to_one() {
        let ChartData::Pie(slices) =
            compute(&table(), &spec(ChartKind::Pie, "Jenis Kelamin")).unwrap()
        else {
            panic!("expected pie data");
        };
        let total: f64 = slices.iter().map(|s| s.fraction).sum();
        assert!((total - 1.0).abs() < 1e-12);
        assert_eq!(slices[0].count, 2);
    }

    #[test]
    fn histogram_counts_sum_to_n() {
        let ChartData::Histogram(bins) =
            compute(&table(), &spec(ChartKind::Histogram, "Umur Bulan")).unwrap()
        else {
            panic!("expected histogram data");
        };
        let total: usize = bins.iter().map(|b| b.count).sum();
        assert_eq!(total, 3);
    }

    #[test]
    fn histogram_degenerate_distribution() {
        let bins = histogram_bins(&[5.0, 5.0, 5.0]);
        assert_eq!(bins.len(), 1);
        assert_eq!(bins[0].count, 3);
    }

    #[test]
    fn incompatible_pairs_are_refused() {
        let t = table();
        for (kind, field) in [
            (ChartKind::Bar, "Umur Bulan"),
            (ChartKind::Pie, "Umur Bulan"),
            (ChartKind::Histogram, "Jenis Kelamin"),
            (ChartKind::Boxplot, "Jenis Kelamin"),
        ] {
            let err = compute(&t, &spec(kind, field)).unwrap_err();
            assert!(
                matches!(err, ChartError::IncompatibleField { .. }),
                "{kind} on {field} should be refused, got {err:?}"
            );
        }
    }

    #[test]
    fn refusal_message_names_the_types() {
        let err = compute(&table(), &spec(ChartKind::Bar, "Umur Bulan")).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("Bar Chart"));
        assert!(msg.contains("kategorik"));
        assert!(msg.contains("Umur Bulan"));
    }

    #[test]
    fn unknown_field_is_reported() {
        let err = compute(&table(), &spec(ChartKind::Bar, "Tidak Ada")).unwrap_err();
        assert_eq!(err, ChartError::UnknownField("Tidak Ada".into()));
    }

    #[test]
    fn boxplot_summary_for_numeric() {
        let ChartData::Boxplot(b) =
            compute(&table(), &spec(ChartKind::Boxplot, "Umur Bulan")).unwrap()
        else {
            panic!("expected boxplot data");
        };
        assert_eq!(b.median, 20.0);
    }
}
