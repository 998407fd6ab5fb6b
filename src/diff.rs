//! Positional diff classification against a comparison snapshot.
//!
//! Alignment is strictly by row index. Reordered-but-identical rows report
//! as changed; this is a documented limitation of positional alignment, not
//! a defect. Classification is a rendering annotation only and never
//! mutates either table.

use std::borrow::Cow;

use crate::types::{Table, Value};

/// Per-cell classification of the primary table against the comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DiffKind {
    /// String forms match, or no comparison table is active.
    #[default]
    Unchanged,
    /// A comparison row exists at this index but its string form differs.
    Changed,
    /// The comparison table has no row at this index.
    NewRow,
}

/// Classifies one cell of the primary table.
///
/// `primary_value` is the primary cell's value (`None` when the row has no
/// entry for the column). Absent values compare as the empty string on both
/// sides.
pub fn classify(
    row_idx: usize,
    column: &str,
    primary_value: Option<&Value>,
    comparison: Option<&Table>,
) -> DiffKind {
    let Some(other) = comparison else {
        return DiffKind::Unchanged;
    };
    let Some(other_row) = other.rows.get(row_idx) else {
        return DiffKind::NewRow;
    };
    let primary_text = primary_value.map_or(Cow::Borrowed(""), Value::as_text);
    let other_text = other_row
        .get(column)
        .map_or(Cow::Borrowed(""), Value::as_text);
    if primary_text == other_text {
        DiffKind::Unchanged
    } else {
        DiffKind::Changed
    }
}

/// Classifies one cell by (row index, column index) of the primary table.
pub fn classify_cell(
    primary: &Table,
    comparison: Option<&Table>,
    row_idx: usize,
    col_idx: usize,
) -> DiffKind {
    let Some(column) = primary.column_name(col_idx) else {
        return DiffKind::Unchanged;
    };
    classify(row_idx, column, primary.value(row_idx, column), comparison)
}
