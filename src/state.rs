use std::collections::BTreeSet;

use crate::data::chart::{ChartKind, ChartSpec};
use crate::data::filter::{CatConstraint, FilterSpec, NumericRange};
use crate::data::model::Table;

// ---------------------------------------------------------------------------
// Pages
// ---------------------------------------------------------------------------

/// The six dashboard pages, selected from the side panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    Data,
    Filter,
    Statistics,
    Visualization,
    About,
}

impl Default for Page {
    fn default() -> Self {
        Page::Home
    }
}

impl Page {
    pub const ALL: [Page; 6] = [
        Page::Home,
        Page::Data,
        Page::Filter,
        Page::Statistics,
        Page::Visualization,
        Page::About,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::Data => "Data",
            Page::Filter => "Filter Data",
            Page::Statistics => "Statistik",
            Page::Visualization => "Visualisasi",
            Page::About => "About",
        }
    }
}

// ---------------------------------------------------------------------------
// Per-view widget state
// ---------------------------------------------------------------------------

/// Selections on the filter page.  The slider bounds are captured from the
/// unfiltered table when the numeric column is picked and stay fixed until
/// another column is picked.
#[derive(Debug, Clone, Default)]
pub struct FilterUi {
    pub cat1_field: Option<String>,
    pub cat1_values: BTreeSet<String>,
    pub cat2_field: Option<String>,
    pub cat2_values: BTreeSet<String>,
    pub num_field: Option<String>,
    pub bounds: (f64, f64),
    pub range: (f64, f64),
}

/// Selections on the visualisation page.
#[derive(Debug, Clone)]
pub struct ChartUi {
    pub kind: ChartKind,
    pub field: Option<String>,
}

impl Default for ChartUi {
    fn default() -> Self {
        ChartUi {
            kind: ChartKind::Bar,
            field: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    /// Working table (renamed + recoded), None until a file is loaded.
    pub table: Option<Table>,

    pub page: Page,

    /// Columns ticked in the side panel, applied (irreversibly) on demand.
    pub drop_selection: BTreeSet<String>,

    pub filter: FilterUi,
    pub chart: ChartUi,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Ingest a newly loaded working table and reset the widget state.
    pub fn set_table(&mut self, table: Table) {
        self.drop_selection.clear();
        self.filter = FilterUi::default();
        self.chart = ChartUi::default();
        self.table = Some(table);
        self.reset_defaults();
        self.status_message = None;
    }

    /// Pick defaults for any unset (or no longer valid) field selections.
    fn reset_defaults(&mut self) {
        let (cats, nums, all_names) = match &self.table {
            Some(t) => (
                t.categorical_columns(),
                t.numeric_columns(),
                t.column_names(),
            ),
            None => return,
        };

        let valid = |sel: &Option<String>, pool: &[String]| {
            matches!(sel, Some(name) if pool.contains(name))
        };

        if !valid(&self.filter.cat1_field, &cats) {
            self.filter.cat1_field = cats.first().cloned();
            self.filter.cat1_values.clear();
        }
        if !valid(&self.filter.cat2_field, &cats) {
            self.filter.cat2_field = cats.get(1).or_else(|| cats.first()).cloned();
            self.filter.cat2_values.clear();
        }
        if !valid(&self.filter.num_field, &nums) {
            let field = nums.first().cloned();
            if let Some(name) = &field {
                self.set_numeric_field(name.clone());
            } else {
                self.filter.num_field = None;
            }
        }
        if !valid(&self.chart.field, &all_names) {
            self.chart.field = all_names.first().cloned();
        }
    }

    /// Drop the ticked columns from the working table.  One-way: the only
    /// way back is reloading the file.
    pub fn apply_projection(&mut self) {
        if self.drop_selection.is_empty() {
            return;
        }
        if let Some(table) = &self.table {
            let projected = table.project(&self.drop_selection);
            log::info!(
                "dropped {} column(s), {} remain",
                self.drop_selection.len(),
                projected.n_cols()
            );
            self.table = Some(projected);
        }
        self.drop_selection.clear();
        self.reset_defaults();
    }

    /// Select a categorical filter column (slot 1 or 2), clearing its
    /// label selection.
    pub fn set_cat_field(&mut self, slot: usize, name: String) {
        if slot == 0 {
            self.filter.cat1_field = Some(name);
            self.filter.cat1_values.clear();
        } else {
            self.filter.cat2_field = Some(name);
            self.filter.cat2_values.clear();
        }
    }

    /// Select the numeric filter column; bounds come from the unfiltered
    /// working table at this moment.
    pub fn set_numeric_field(&mut self, name: String) {
        let bounds = self
            .table
            .as_ref()
            .and_then(|t| t.column(&name))
            .and_then(|c| c.min_max())
            .unwrap_or((0.0, 0.0));
        self.filter.num_field = Some(name);
        self.filter.bounds = bounds;
        self.filter.range = bounds;
    }

    /// Assemble the current filter spec, if a numeric column is selected.
    pub fn filter_spec(&self) -> Option<FilterSpec> {
        let num_field = self.filter.num_field.clone()?;
        let cat = |field: &Option<String>, values: &BTreeSet<String>| {
            field.clone().map(|field| CatConstraint {
                field,
                allowed: values.clone(),
            })
        };
        Some(FilterSpec {
            cat1: cat(&self.filter.cat1_field, &self.filter.cat1_values),
            cat2: cat(&self.filter.cat2_field, &self.filter.cat2_values),
            range: NumericRange {
                field: num_field,
                min: self.filter.range.0,
                max: self.filter.range.1,
            },
        })
    }

    /// The current chart spec, if a column is selected.
    pub fn chart_spec(&self) -> Option<ChartSpec> {
        Some(ChartSpec {
            kind: self.chart.kind,
            field: self.chart.field.clone()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Column, Value};
    use crate::data::recode;

    fn state_with_data() -> AppState {
        let raw = Table::new(vec![
            Column::infer(
                "Jenis Kelamin".into(),
                vec![Value::Integer(1), Value::Integer(2)],
            ),
            Column::infer(
                "Umur_Bulan".into(),
                vec![Value::Integer(10), Value::Integer(30)],
            ),
        ]);
        let mut state = AppState::default();
        state.set_table(recode::prepare(raw));
        state
    }

    #[test]
    fn defaults_point_at_real_columns() {
        let state = state_with_data();
        assert_eq!(state.filter.cat1_field.as_deref(), Some("Jenis Kelamin"));
        assert_eq!(state.filter.num_field.as_deref(), Some("Umur Bulan"));
        assert_eq!(state.filter.bounds, (10.0, 30.0));
        assert_eq!(state.filter.range, (10.0, 30.0));
    }

    #[test]
    fn projection_is_applied_and_defaults_repaired() {
        let mut state = state_with_data();
        state.drop_selection.insert("Umur Bulan".to_string());
        state.apply_projection();
        let table = state.table.as_ref().unwrap();
        assert!(table.column("Umur Bulan").is_none());
        // the numeric selection no longer exists, so it is reset
        assert_eq!(state.filter.num_field, None);
        assert!(state.drop_selection.is_empty());
    }

    #[test]
    fn changing_cat_field_clears_its_values() {
        let mut state = state_with_data();
        state.filter.cat1_values.insert("Laki-laki".to_string());
        state.set_cat_field(0, "Jenis Kelamin".to_string());
        assert!(state.filter.cat1_values.is_empty());
    }

    #[test]
    fn filter_spec_uses_current_range() {
        let mut state = state_with_data();
        state.filter.range = (12.0, 25.0);
        let spec = state.filter_spec().unwrap();
        assert_eq!(spec.range.min, 12.0);
        assert_eq!(spec.range.max, 25.0);
    }
}
