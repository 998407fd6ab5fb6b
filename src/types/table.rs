use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::HashMap;

/// A scalar cell value as supplied by the host.
///
/// Untagged so host JSON stays natural: `null`, `true`, `3.5`, `"text"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl Default for Value {
    fn default() -> Self {
        Self::Null
    }
}

impl Value {
    /// Canonical text form used for display, editing, and diffing.
    ///
    /// Null renders empty; numbers use integer display when exact, otherwise
    /// trimmed decimal form.
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            Self::Null => Cow::Borrowed(""),
            Self::Bool(true) => Cow::Borrowed("true"),
            Self::Bool(false) => Cow::Borrowed("false"),
            Self::Number(n) => Cow::Owned(format_number(*n)),
            Self::Text(s) => Cow::Borrowed(s),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

/// Smart number display: integers without a decimal point, decimals with
/// trailing zeros trimmed.
#[allow(clippy::float_cmp)]
#[allow(clippy::cast_possible_truncation)]
fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return String::new();
    }
    if value == value.floor() && value.abs() < 1e11 {
        format!("{}", value as i64)
    } else {
        let s = format!("{value:.10}");
        let s = s.trim_end_matches('0');
        let s = s.trim_end_matches('.');
        s.to_string()
    }
}

/// One row: column name to value. Rows need not share identical keys;
/// columns absent on a row render as empty.
pub type Row = HashMap<String, Value>;

/// An immutable-per-render table snapshot supplied by the host.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    /// Ordered column names; the authoritative display set and order.
    pub columns: Vec<String>,
    /// Ordered rows; order is display order and diff alignment.
    pub rows: Vec<Row>,
    /// Stable dataset identity; a change means "different dataset" and
    /// resets all grid-private state.
    #[serde(default)]
    pub identity: String,
}

impl Table {
    /// Builds a snapshot, dropping duplicate column names (first wins).
    pub fn new(columns: Vec<String>, rows: Vec<Row>, identity: impl Into<String>) -> Self {
        let mut seen: Vec<String> = Vec::with_capacity(columns.len());
        for name in columns {
            if !seen.contains(&name) {
                seen.push(name);
            }
        }
        Self {
            columns: seen,
            rows,
            identity: identity.into(),
        }
    }

    /// Re-applies the duplicate-column invariant after deserialization.
    pub fn normalized(mut self) -> Self {
        let mut seen: Vec<String> = Vec::with_capacity(self.columns.len());
        for name in self.columns.drain(..) {
            if !seen.contains(&name) {
                seen.push(name);
            }
        }
        self.columns = seen;
        self
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Column name at a display index.
    pub fn column_name(&self, col: usize) -> Option<&str> {
        self.columns.get(col).map(String::as_str)
    }

    /// Value at (row index, column name); `None` when the row does not exist
    /// or the row has no entry for that column.
    pub fn value(&self, row: usize, column: &str) -> Option<&Value> {
        self.rows.get(row).and_then(|r| r.get(column))
    }

    /// Display text at (row index, column index); absent values are empty.
    pub fn cell_text(&self, row: usize, col: usize) -> Cow<'_, str> {
        self.column_name(col)
            .and_then(|name| self.value(row, name))
            .map_or(Cow::Borrowed(""), Value::as_text)
    }
}
