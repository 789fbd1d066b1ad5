use std::collections::BTreeSet;
use std::fmt;

// ---------------------------------------------------------------------------
// Value – a single cell of the table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value mirroring the dtypes found in the source
/// spreadsheet (integer codes, measurements, category labels).
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Integer(i64),
    Float(f64),
    Null,
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) => write!(f, "{s}"),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Float(v) => {
                if v.fract() == 0.0 {
                    write!(f, "{v:.0}")
                } else {
                    write!(f, "{v:.2}")
                }
            }
            Value::Null => write!(f, ""),
        }
    }
}

impl Value {
    /// Interpret the cell as a number, if it is one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            Value::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Interpret the cell as an integer code.  Floats count only when
    /// integral; spreadsheet exports often store codes as `11.0`.
    pub fn as_code(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            Value::Float(v) if v.fract() == 0.0 => Some(*v as i64),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

// ---------------------------------------------------------------------------
// FieldType / Column
// ---------------------------------------------------------------------------

/// Every column is exactly one of these for the lifetime of the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Numeric,
    Categorical,
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::Numeric => write!(f, "numerik"),
            FieldType::Categorical => write!(f, "kategorik"),
        }
    }
}

/// One named column with its type tag and cells, in row order.
#[derive(Debug, Clone)]
pub struct Column {
    pub name: String,
    pub ty: FieldType,
    pub values: Vec<Value>,
}

impl Column {
    /// Infer the type tag from the cells: a column is numeric when every
    /// non-null cell is a number, categorical otherwise.
    pub fn infer(name: String, values: Vec<Value>) -> Self {
        let numeric = values
            .iter()
            .filter(|v| !v.is_null())
            .all(|v| v.as_f64().is_some());
        let ty = if numeric {
            FieldType::Numeric
        } else {
            FieldType::Categorical
        };
        Column { name, ty, values }
    }

    /// Non-null cells as `f64`, in row order.
    pub fn numeric_values(&self) -> Vec<f64> {
        self.values.iter().filter_map(Value::as_f64).collect()
    }

    /// Sorted set of distinct non-null labels (display form).
    pub fn unique_labels(&self) -> BTreeSet<String> {
        self.values
            .iter()
            .filter(|v| !v.is_null())
            .map(ToString::to_string)
            .collect()
    }

    /// Min and max over the non-null numeric cells.
    pub fn min_max(&self) -> Option<(f64, f64)> {
        let vals = self.numeric_values();
        if vals.is_empty() {
            return None;
        }
        let min = vals.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = vals.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        Some((min, max))
    }
}

// ---------------------------------------------------------------------------
// Table – the complete working dataset
// ---------------------------------------------------------------------------

/// An ordered set of equally long columns sharing one schema.
#[derive(Debug, Clone, Default)]
pub struct Table {
    pub columns: Vec<Column>,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Self {
        debug_assert!(
            columns
                .windows(2)
                .all(|w| w[0].values.len() == w[1].values.len()),
            "all columns must have the same row count"
        );
        Table { columns }
    }

    /// Number of rows.
    pub fn n_rows(&self) -> usize {
        self.columns.first().map_or(0, |c| c.values.len())
    }

    /// Number of columns.
    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.n_rows() == 0
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_mut(&mut self, name: &str) -> Option<&mut Column> {
        self.columns.iter_mut().find(|c| c.name == name)
    }

    /// All column names, in schema order.
    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    /// Names of numeric columns, in schema order.
    pub fn numeric_columns(&self) -> Vec<String> {
        self.columns
            .iter()
            .filter(|c| c.ty == FieldType::Numeric)
            .map(|c| c.name.clone())
            .collect()
    }

    /// Names of categorical columns, in schema order.
    pub fn categorical_columns(&self) -> Vec<String> {
        self.columns
            .iter()
            .filter(|c| c.ty == FieldType::Categorical)
            .map(|c| c.name.clone())
            .collect()
    }

    /// Drop the named columns from the schema and every row.
    /// Dropping a column that is not present is a no-op.
    pub fn project(&self, drop: &BTreeSet<String>) -> Table {
        Table {
            columns: self
                .columns
                .iter()
                .filter(|c| !drop.contains(&c.name))
                .cloned()
                .collect(),
        }
    }
}
