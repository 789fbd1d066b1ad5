//! Descriptive statistics over numeric columns (pandas `describe` analogue).

use super::model::Column;

/// Arithmetic mean; `None` for an empty slice.
pub fn mean(vals: &[f64]) -> Option<f64> {
    if vals.is_empty() {
        return None;
    }
    Some(vals.iter().sum::<f64>() / vals.len() as f64)
}

/// Sample standard deviation (ddof = 1); `None` when fewer than two values.
pub fn sample_std(vals: &[f64]) -> Option<f64> {
    if vals.len() < 2 {
        return None;
    }
    let m = mean(vals)?;
    let ss: f64 = vals.iter().map(|v| (v - m).powi(2)).sum();
    Some((ss / (vals.len() - 1) as f64).sqrt())
}

/// Linear-interpolation percentile over a pre-sorted slice, `q` in `[0, 1]`.
/// Matches the pandas default interpolation.
pub fn percentile_linear(sorted: &[f64], q: f64) -> f64 {
    debug_assert!(!sorted.is_empty());
    if sorted.len() == 1 {
        return sorted[0];
    }
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    if lo == hi {
        sorted[lo]
    } else {
        let frac = pos - lo as f64;
        sorted[lo] + (sorted[hi] - sorted[lo]) * frac
    }
}

/// Median; `None` for an empty slice.
pub fn median(vals: &[f64]) -> Option<f64> {
    if vals.is_empty() {
        return None;
    }
    let mut sorted = vals.to_vec();
    sorted.sort_by(f64::total_cmp);
    Some(percentile_linear(&sorted, 0.5))
}

// ---------------------------------------------------------------------------
// describe
// ---------------------------------------------------------------------------

/// One row of the `describe` table for a numeric column.
#[derive(Debug, Clone, PartialEq)]
pub struct Describe {
    pub count: usize,
    pub mean: f64,
    /// Absent when only a single value exists.
    pub std: Option<f64>,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

/// Summarise the non-null cells of a numeric column; `None` when empty.
pub fn describe(col: &Column) -> Option<Describe> {
    let mut vals = col.numeric_values();
    if vals.is_empty() {
        return None;
    }
    vals.sort_by(f64::total_cmp);
    Some(Describe {
        count: vals.len(),
        mean: mean(&vals)?,
        std: sample_std(&vals),
        min: vals[0],
        q1: percentile_linear(&vals, 0.25),
        median: percentile_linear(&vals, 0.5),
        q3: percentile_linear(&vals, 0.75),
        max: *vals.last()?,
    })
}

// ---------------------------------------------------------------------------
// boxplot summary
// ---------------------------------------------------------------------------

/// Five-number summary with 1.5·IQR whiskers clamped to observed values,
/// plus the points beyond the whiskers.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxSummary {
    pub whisker_low: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub whisker_high: f64,
    pub outliers: Vec<f64>,
}

pub fn box_summary(col: &Column) -> Option<BoxSummary> {
    let mut vals = col.numeric_values();
    if vals.is_empty() {
        return None;
    }
    vals.sort_by(f64::total_cmp);

    let q1 = percentile_linear(&vals, 0.25);
    let q3 = percentile_linear(&vals, 0.75);
    let iqr = q3 - q1;
    let fence_low = q1 - 1.5 * iqr;
    let fence_high = q3 + 1.5 * iqr;

    let whisker_low = vals
        .iter()
        .cloned()
        .find(|v| *v >= fence_low)
        .unwrap_or(vals[0]);
    let whisker_high = vals
        .iter()
        .cloned()
        .rev()
        .find(|v| *v <= fence_high)
        .unwrap_or(*vals.last()?);

    let outliers = vals
        .iter()
        .cloned()
        .filter(|v| *v < fence_low || *v > fence_high)
        .collect();

    Some(BoxSummary {
        whisker_low,
        q1,
        median: percentile_linear(&vals, 0.5),
        q3,
        whisker_high,
        outliers,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Column, Value};

    fn col(vals: &[f64]) -> Column {
        Column::infer(
            "x".into(),
            vals.iter().map(|v| Value::Float(*v)).collect(),
        )
    }

    #[test]
    fn mean_and_median_basic() {
        assert_eq!(mean(&[10.0, 20.0, 30.0]), Some(20.0));
        assert_eq!(median(&[10.0, 20.0, 30.0]), Some(20.0));
        assert_eq!(median(&[1.0, 2.0, 3.0, 4.0]), Some(2.5));
        assert_eq!(mean(&[]), None);
        assert_eq!(median(&[]), None);
    }

    #[test]
    fn percentiles_interpolate_linearly() {
        let sorted = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(percentile_linear(&sorted, 0.25), 1.75);
        assert_eq!(percentile_linear(&sorted, 0.75), 3.25);
        assert_eq!(percentile_linear(&sorted, 0.0), 1.0);
        assert_eq!(percentile_linear(&sorted, 1.0), 4.0);
        assert_eq!(percentile_linear(&[7.0], 0.5), 7.0);
    }

    #[test]
    fn sample_std_matches_hand_computation() {
        // values 2,4,4,4,5,5,7,9: mean 5, sample variance 32/7
        let vals = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let std = sample_std(&vals).unwrap();
        assert!((std - (32.0f64 / 7.0).sqrt()).abs() < 1e-12);
        assert_eq!(sample_std(&[1.0]), None);
    }

    #[test]
    fn describe_skips_nulls() {
        let c = Column::infer(
            "x".into(),
            vec![Value::Float(1.0), Value::Null, Value::Float(3.0)],
        );
        let d = describe(&c).unwrap();
        assert_eq!(d.count, 2);
        assert_eq!(d.mean, 2.0);
        assert_eq!(d.min, 1.0);
        assert_eq!(d.max, 3.0);
    }

    #[test]
    fn describe_empty_is_none() {
        assert_eq!(describe(&col(&[])), None);
    }

    #[test]
    fn box_summary_flags_outliers() {
        let c = col(&[1.0, 2.0, 3.0, 4.0, 5.0, 100.0]);
        let b = box_summary(&c).unwrap();
        assert_eq!(b.outliers, vec![100.0]);
        assert!(b.whisker_high <= 5.0);
        assert_eq!(b.whisker_low, 1.0);
    }

    #[test]
    fn box_summary_without_outliers_spans_min_max() {
        let c = col(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        let b = box_summary(&c).unwrap();
        assert_eq!(b.whisker_low, 1.0);
        assert_eq!(b.whisker_high, 5.0);
        assert_eq!(b.median, 3.0);
        assert!(b.outliers.is_empty());
    }
}
