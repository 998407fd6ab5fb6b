//! Per-column width state: base widths, interactive resize, auto-fit.
//!
//! Base widths are zoom-independent; zoom scaling is applied at query time.
//! Cumulative offsets are pre-computed once per mutation, enabling O(log n)
//! hit testing the same way cell positions are looked up for rendering.

use std::collections::HashMap;

use crate::measure::TextMeasure;
use crate::types::Table;

/// Default base column width in pixels at 100% zoom
pub const DEFAULT_COL_WIDTH: f32 = 150.0;

/// Lower clamp applied to every base width
pub const MIN_COL_WIDTH: f32 = 60.0;

/// Upper clamp applied to every base width
pub const MAX_COL_WIDTH: f32 = 800.0;

/// Rows sampled from the head of the table during auto-fit
pub const AUTO_FIT_SAMPLE_ROWS: usize = 500;

/// Width reserved beside the header label for the sort/menu indicator
pub const HEADER_ICON_ALLOWANCE: f32 = 18.0;

/// Horizontal padding inside a cell, each side
pub const CELL_PADDING: f32 = 4.0;

/// Half-width of the pointer hit zone around a column's right edge
pub const RESIZE_HANDLE_TOLERANCE: f32 = 4.0;

fn clamp_width(width: f32) -> f32 {
    width.clamp(MIN_COL_WIDTH, MAX_COL_WIDTH)
}

/// Column width state for the current table's column list.
#[derive(Debug, Clone, Default)]
pub struct ColumnLayout {
    /// Display-ordered column names, mirroring the table
    columns: Vec<String>,
    /// Base widths keyed by column name; missing entries mean default
    widths: HashMap<String, f32>,
    /// Cumulative base x-offsets (`offsets[i]` = left edge of column i,
    /// last entry = total base width)
    offsets: Vec<f32>,
}

impl ColumnLayout {
    pub fn new(columns: &[String]) -> Self {
        let mut layout = Self {
            columns: columns.to_vec(),
            widths: HashMap::new(),
            offsets: Vec::new(),
        };
        layout.rebuild_offsets();
        layout
    }

    /// Replaces the column list and discards all stored widths.
    ///
    /// Called on table-identity change; widths for columns not in the new
    /// list are dropped with everything else.
    pub fn reset(&mut self, columns: &[String]) {
        self.columns = columns.to_vec();
        self.widths.clear();
        self.rebuild_offsets();
    }

    /// Swaps the column list while keeping widths for surviving names.
    ///
    /// Used when the host updates the column list under the same table
    /// identity.
    pub fn sync_columns(&mut self, columns: &[String]) {
        self.columns = columns.to_vec();
        self.widths.retain(|name, _| columns.contains(name));
        self.rebuild_offsets();
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn column_name(&self, col: usize) -> Option<&str> {
        self.columns.get(col).map(String::as_str)
    }

    /// Base width of a column by name (default when never set).
    pub fn base_width(&self, column: &str) -> f32 {
        self.widths.get(column).copied().unwrap_or(DEFAULT_COL_WIDTH)
    }

    /// Base width of a column by display index.
    pub fn base_width_at(&self, col: usize) -> f32 {
        self.columns
            .get(col)
            .map_or(DEFAULT_COL_WIDTH, |name| self.base_width(name))
    }

    /// Sets a column's base width, clamped. Unknown names and non-finite
    /// widths are ignored.
    pub fn set_base_width(&mut self, column: &str, width: f32) {
        if !width.is_finite() || !self.columns.iter().any(|c| c == column) {
            return;
        }
        self.widths.insert(column.to_string(), clamp_width(width));
        self.rebuild_offsets();
    }

    /// Sets a column's base width by display index, clamped.
    pub fn set_base_width_at(&mut self, col: usize, width: f32) {
        let Some(name) = self.columns.get(col).cloned() else {
            return;
        };
        self.set_base_width(&name, width);
    }

    /// Adjusts a column's base width by a screen-pixel delta measured at the
    /// given zoom scale. The delta is divided by the scale so the stored
    /// base width stays zoom-independent.
    pub fn resize_by(&mut self, column: &str, delta_px: f32, scale: f32) {
        let scale = if scale.is_finite() && scale > 0.0 {
            scale
        } else {
            1.0
        };
        let width = self.base_width(column) + delta_px / scale;
        self.set_base_width(column, width);
    }

    /// Opens a drag-resize session anchored at the current width.
    pub fn begin_resize(&self, col: usize, pointer_x: f32) -> Option<DragResize> {
        if col >= self.columns.len() {
            return None;
        }
        Some(DragResize {
            col,
            start_x: pointer_x,
            start_width: self.base_width_at(col),
        })
    }

    /// Measures header and sampled cell text to fit column widths.
    ///
    /// Targets `columns` when given, otherwise every column in the table.
    /// Sampling stops after the first [`AUTO_FIT_SAMPLE_ROWS`] rows; fitting
    /// to the head of the table is an accepted approximation on large
    /// datasets. Without a measurer this is a no-op.
    pub fn auto_fit(
        &mut self,
        table: &Table,
        measure: Option<&mut dyn TextMeasure>,
        font: &str,
        columns: Option<&[String]>,
    ) {
        let Some(measure) = measure else {
            return;
        };
        let targets: Vec<String> = match columns {
            Some(named) => named
                .iter()
                .filter(|c| self.columns.contains(c))
                .cloned()
                .collect(),
            None => self.columns.clone(),
        };
        for column in targets {
            let mut widest = measure.measure(&column, font) + HEADER_ICON_ALLOWANCE;
            for row in table.rows.iter().take(AUTO_FIT_SAMPLE_ROWS) {
                if let Some(value) = row.get(&column) {
                    let text = value.as_text();
                    if text.is_empty() {
                        continue;
                    }
                    widest = widest.max(measure.measure(&text, font));
                }
            }
            self.set_base_width(&column, widest + CELL_PADDING * 2.0);
        }
    }

    /// Left edge of a column at the given zoom scale.
    pub fn x_of(&self, col: usize, scale: f32) -> f32 {
        self.offsets.get(col).copied().unwrap_or(0.0) * scale
    }

    /// Scaled width of a column at the given zoom scale.
    pub fn width_of(&self, col: usize, scale: f32) -> f32 {
        self.base_width_at(col) * scale
    }

    /// Total scaled width of all columns.
    pub fn total_width(&self, scale: f32) -> f32 {
        self.offsets.last().copied().unwrap_or(0.0) * scale
    }

    /// Column under a scaled x coordinate, if any.
    pub fn col_at_x(&self, x: f32, scale: f32) -> Option<usize> {
        if self.columns.is_empty() || scale <= 0.0 {
            return None;
        }
        let base_x = x / scale;
        let total = self.offsets.last().copied().unwrap_or(0.0);
        if base_x < 0.0 || base_x >= total {
            return None;
        }
        match self
            .offsets
            .binary_search_by(|pos| pos.partial_cmp(&base_x).unwrap_or(std::cmp::Ordering::Equal))
        {
            Ok(i) => Some(i.min(self.columns.len().saturating_sub(1))),
            Err(i) => Some(i.saturating_sub(1)),
        }
    }

    /// Column whose right-edge resize handle is under a scaled x coordinate.
    pub fn resize_handle_at(&self, x: f32, scale: f32) -> Option<usize> {
        if scale <= 0.0 {
            return None;
        }
        let base_x = x / scale;
        let tolerance = RESIZE_HANDLE_TOLERANCE / scale;
        for col in 0..self.columns.len() {
            let right = self.offsets.get(col + 1).copied().unwrap_or(0.0);
            if (base_x - right).abs() <= tolerance {
                return Some(col);
            }
        }
        None
    }

    fn rebuild_offsets(&mut self) {
        self.offsets.clear();
        self.offsets.reserve(self.columns.len() + 1);
        let mut x: f32 = 0.0;
        for name in &self.columns {
            self.offsets.push(x);
            x += self.base_width(name);
        }
        self.offsets.push(x);
    }
}

/// An in-flight drag-resize session for one column.
///
/// Created on pointer-down over a resize handle, fed absolute pointer x on
/// every move, dropped on pointer-up. Width math anchors to the width at
/// session start, so repeated moves to the same position are idempotent.
#[derive(Debug, Clone, Copy)]
pub struct DragResize {
    pub col: usize,
    pub start_x: f32,
    pub start_width: f32,
}

impl DragResize {
    /// Applies the width implied by an absolute pointer position.
    pub fn update(&self, layout: &mut ColumnLayout, pointer_x: f32, scale: f32) {
        let scale = if scale.is_finite() && scale > 0.0 {
            scale
        } else {
            1.0
        };
        let delta = pointer_x - self.start_x;
        layout.set_base_width_at(self.col, self.start_width + delta / scale);
    }
}
