//! Pure frame composition: state in, frame plan out.
//!
//! Materializes only the windowed rows and the horizontally visible
//! columns. All geometry is screen-space: vertical placement subtracts the
//! scroll offset, horizontal placement subtracts the container's
//! `scroll_x`. No drawing happens here.

use crate::diff::classify_cell;
use crate::grid::GridState;
use crate::render::backend::{CellPlan, FramePlan, FrameTheme, HeaderCell, SelectionRect};

/// Builds the frame plan for the current state.
///
/// `scroll_x` is the container's horizontal scroll position;
/// `viewport_width` culls columns fully outside the view (non-positive
/// width disables culling).
pub fn build_frame(state: &GridState, scroll_x: f32, viewport_width: f32) -> FramePlan {
    let scale = state.viewport.scale();
    let row_height = state.row_height();
    let header_height = if state.options.show_headers {
        state.options.header_height * scale
    } else {
        0.0
    };
    let font_px = state.options.base_font_px * scale;
    let font = format!("{}px {}", font_px, state.options.font_family);
    let header_font = format!("600 {}px {}", font_px, state.options.font_family);

    let window = state
        .viewport
        .window(state.table.row_count(), row_height);

    let visible_cols: Vec<(usize, f32, f32)> = (0..state.columns.column_count())
        .filter_map(|col| {
            let x = state.columns.x_of(col, scale) - scroll_x;
            let width = state.columns.width_of(col, scale);
            let culled = viewport_width > 0.0 && (x + width <= 0.0 || x >= viewport_width);
            if culled {
                None
            } else {
                Some((col, x, width))
            }
        })
        .collect();

    let headers = if state.options.show_headers {
        visible_cols
            .iter()
            .map(|&(col, x, width)| HeaderCell {
                col,
                label: state
                    .table
                    .column_name(col)
                    .unwrap_or_default()
                    .to_string(),
                x,
                width,
            })
            .collect()
    } else {
        Vec::new()
    };

    let scroll_y = state.viewport.scroll_offset;
    let focused = state.focus.cell();
    let comparison = state.comparison.as_ref();

    let mut cells = Vec::with_capacity(window.len() * visible_cols.len());
    for row in window.start..window.end {
        let y = header_height + row as f32 * row_height - scroll_y;
        for &(col, x, width) in &visible_cols {
            cells.push(CellPlan {
                row,
                col,
                x,
                y,
                width,
                height: row_height,
                text: state.table.cell_text(row, col).into_owned(),
                diff: classify_cell(&state.table, comparison, row, col),
                selected: focused == Some((row, col)),
            });
        }
    }

    let selection = focused.and_then(|(row, col)| {
        if !window.contains(row) || col >= state.columns.column_count() {
            return None;
        }
        Some(SelectionRect {
            x: state.columns.x_of(col, scale) - scroll_x,
            y: header_height + row as f32 * row_height - scroll_y,
            width: state.columns.width_of(col, scale),
            height: row_height,
        })
    });

    FramePlan {
        cells,
        headers,
        selection,
        window,
        row_height,
        header_height,
        font,
        header_font,
        font_px,
        total_width: state.columns.total_width(scale),
        content_height: state.content_height(),
        empty: state.table.is_empty(),
        theme: FrameTheme {
            background: state.options.background_color.clone(),
            text: state.options.text_color.clone(),
            grid_lines: state.options.grid_color.clone(),
            header_bg: state.options.header_bg_color.clone(),
            header_text: state.options.header_text_color.clone(),
            selection: state.options.selection_color.clone(),
            diff_new_row: state.options.diff_new_row_color.clone(),
            diff_changed: state.options.diff_changed_color.clone(),
            empty_text: state.options.empty_state_text.clone(),
        },
    }
}
