//! Frame composition tests.
//!
//! Builds frame plans through the widget facade and verifies windowing,
//! geometry, culling, diff annotations, and zoom scaling end to end.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use gridview::diff::DiffKind;
use gridview::layout::ROW_BUFFER;
use gridview::render::FramePlan;
use gridview::types::{GridOptions, Row, Table, Value};
use gridview::GridView;
use test_case::test_case;

// ================================================================
// Test helpers
// ================================================================

const ROW_H: f32 = 24.0;
const HEADER_H: f32 = 26.0;

/// Build a table where cell (r, c) holds the text `"<col><r>"`.
fn make_table(identity: &str, columns: &[&str], rows: usize) -> Table {
    let columns: Vec<String> = columns.iter().map(|c| (*c).to_string()).collect();
    let rows = (0..rows)
        .map(|r| {
            columns
                .iter()
                .map(|c| (c.clone(), Value::Text(format!("{c}{r}"))))
                .collect::<Row>()
        })
        .collect();
    Table::new(columns, rows, identity)
}

/// An 800x600 widget with a loaded table. The body is 574px tall after
/// the 26px header strip.
fn make_view(columns: &[&str], rows: usize) -> GridView {
    let mut view = GridView::new_test(800, 600);
    let _ = view.set_table(make_table("t1", columns, rows));
    view
}

/// Rows covered by the plan's materialized cells, as (min, max) indices.
fn row_span(plan: &FramePlan) -> (usize, usize) {
    let min = plan.cells.iter().map(|c| c.row).min().unwrap();
    let max = plan.cells.iter().map(|c| c.row).max().unwrap();
    (min, max)
}

// ================================================================
// Windowed materialization tests
// ================================================================

#[test]
fn test_plan_materializes_window_not_table() {
    let view = make_view(&["a", "b"], 10_000);
    let plan = view.frame();

    // 574px body at 24px rows: rows 0..=23 touch the view, plus the
    // trailing buffer.
    assert_eq!(plan.window.start, 0);
    assert_eq!(plan.window.end, 23 + 1 + ROW_BUFFER);
    assert_eq!(plan.cells.len(), plan.window.len() * 2);
}

#[test]
fn test_scrolled_plan_keeps_buffer_on_both_sides() {
    let mut view = make_view(&["a"], 10_000);
    let _ = view.set_scroll(2400.0);
    let plan = view.frame();

    let (min, max) = row_span(&plan);
    assert_eq!(min, 100 - ROW_BUFFER);
    assert!(max >= 100 + 23, "visible rows are all materialized");
    assert!(plan.cells.len() < 200, "far rows stay unmaterialized");
}

#[test]
fn test_window_heights_sum_to_content_height() {
    let mut view = make_view(&["a"], 50_000);
    let _ = view.set_scroll(777_600.0);
    let plan = view.frame();

    let materialized = plan.window.len() as f32 * plan.row_height;
    let sum = plan.window.spacer_top + materialized + plan.window.spacer_bottom;
    assert_eq!(sum, plan.content_height);
    assert_eq!(plan.content_height, 50_000.0 * ROW_H);
}

#[test]
fn test_cell_geometry_accounts_for_header_and_scroll() {
    let mut view = make_view(&["a"], 1000);
    let _ = view.set_scroll(2400.0);
    let plan = view.frame();

    let cell = plan.cells.iter().find(|c| c.row == 100).unwrap();
    assert_eq!(cell.y, HEADER_H, "row 100 sits at the top of the body");
    assert_eq!(cell.x, 0.0);
    assert_eq!(cell.height, ROW_H);
    assert_eq!(cell.text, "a100");
}

#[test]
fn test_scroll_past_end_is_clamped_in_plan() {
    let mut view = make_view(&["a"], 30);
    let _ = view.set_scroll(1_000_000.0);
    let plan = view.frame();

    // 30 rows * 24px = 720px of content in a 574px body.
    let (_, max) = row_span(&plan);
    assert_eq!(max, 29);
    let last = plan.cells.iter().find(|c| c.row == 29).unwrap();
    assert_eq!(last.y, HEADER_H + 720.0 - 146.0 - ROW_H);
}

// ================================================================
// Horizontal culling tests
// ================================================================

#[test]
fn test_offscreen_columns_are_culled() {
    // 10 columns at the 150px default: 1500px total, 800px viewport.
    let cols: Vec<String> = (0..10).map(|i| format!("c{i}")).collect();
    let col_refs: Vec<&str> = cols.iter().map(String::as_str).collect();
    let view = make_view(&col_refs, 5);
    let plan = view.frame();

    let planned: Vec<usize> = plan.headers.iter().map(|h| h.col).collect();
    assert_eq!(planned, vec![0, 1, 2, 3, 4, 5], "column 5 straddles the edge");
}

#[test]
fn test_horizontal_scroll_shifts_culling_window() {
    let cols: Vec<String> = (0..10).map(|i| format!("c{i}")).collect();
    let col_refs: Vec<&str> = cols.iter().map(String::as_str).collect();
    let mut view = make_view(&col_refs, 5);
    view.set_scroll_x(700.0);
    let plan = view.frame();

    let planned: Vec<usize> = plan.headers.iter().map(|h| h.col).collect();
    assert_eq!(planned, vec![4, 5, 6, 7, 8, 9]);
    let first = plan.headers.first().unwrap();
    assert_eq!(first.x, 4.0 * 150.0 - 700.0);
}

// ================================================================
// Selection rect tests
// ================================================================

#[test]
fn test_selection_rect_tracks_focused_cell() {
    let mut view = make_view(&["a", "b"], 100);
    let _ = view.grid_mut().click_cell(5, 1);
    let plan = view.frame();

    let rect = plan.selection.unwrap();
    assert_eq!(rect.x, 150.0);
    assert_eq!(rect.y, HEADER_H + 5.0 * ROW_H);
    assert_eq!(rect.width, 150.0);
    assert_eq!(rect.height, ROW_H);
    assert!(plan.cells.iter().any(|c| c.selected && c.row == 5 && c.col == 1));
}

#[test]
fn test_selection_rect_absent_when_row_leaves_window() {
    let mut view = make_view(&["a"], 10_000);
    let _ = view.grid_mut().click_cell(2, 0);
    let _ = view.set_scroll(100_000.0);
    let plan = view.frame();

    assert!(plan.selection.is_none());
    assert!(!plan.cells.iter().any(|c| c.selected));
}

#[test]
fn test_no_selection_rect_when_idle() {
    let view = make_view(&["a"], 10);
    assert!(view.frame().selection.is_none());
}

// ================================================================
// Diff annotation tests
// ================================================================

#[test]
fn test_rows_beyond_comparison_plan_as_new() {
    let mut view = make_view(&["a"], 5);
    let _ = view.set_comparison(Some(make_table("base", &["a"], 3)));
    let plan = view.frame();

    for cell in &plan.cells {
        let expected = if cell.row >= 3 {
            DiffKind::NewRow
        } else {
            DiffKind::Unchanged
        };
        assert_eq!(cell.diff, expected, "row {}", cell.row);
    }
}

#[test]
fn test_changed_cells_plan_by_position_not_content() {
    let mut view = make_view(&["a", "b"], 3);
    let mut base = make_table("base", &["a", "b"], 3);
    base.rows[1].insert("b".to_string(), Value::Text("other".to_string()));
    let _ = view.set_comparison(Some(base));
    let plan = view.frame();

    let changed: Vec<(usize, usize)> = plan
        .cells
        .iter()
        .filter(|c| c.diff == DiffKind::Changed)
        .map(|c| (c.row, c.col))
        .collect();
    assert_eq!(changed, vec![(1, 1)]);
}

#[test]
fn test_null_and_absent_compare_as_empty() {
    let columns = vec!["a".to_string()];
    let rows = vec![[("a".to_string(), Value::Null)].into_iter().collect::<Row>()];
    let mut view = GridView::new_test(800, 600);
    let _ = view.set_table(Table::new(columns.clone(), rows, "t1"));

    // The comparison row has no "a" entry at all.
    let _ = view.set_comparison(Some(Table::new(columns, vec![Row::new()], "base")));
    let plan = view.frame();
    assert_eq!(plan.cells[0].diff, DiffKind::Unchanged);
}

#[test]
fn test_clearing_comparison_drops_annotations() {
    let mut view = make_view(&["a"], 4);
    let _ = view.set_comparison(Some(make_table("base", &["a"], 1)));
    let _ = view.set_comparison(None);
    let plan = view.frame();
    assert!(plan.cells.iter().all(|c| c.diff == DiffKind::Unchanged));
}

// ================================================================
// Zoom tests
// ================================================================

#[test]
fn test_zoom_scales_rows_fonts_and_header() {
    let mut view = make_view(&["a"], 100);
    let _ = view.set_zoom(200);
    let plan = view.frame();

    assert_eq!(plan.row_height, 48.0);
    assert_eq!(plan.header_height, 52.0);
    assert_eq!(plan.font_px, 26.0);
    assert_eq!(plan.font, "26px sans-serif");
    assert_eq!(plan.header_font, "600 26px sans-serif");
    assert_eq!(plan.content_height, 100.0 * 48.0);
}

#[test]
fn test_zoom_scales_drawn_widths_but_not_base_widths() {
    let mut view = make_view(&["a", "b"], 10);
    let _ = view.set_zoom(50);
    let plan = view.frame();

    assert_eq!(plan.total_width, 2.0 * 150.0 * 0.5);
    let header = plan.headers.iter().find(|h| h.col == 1).unwrap();
    assert_eq!(header.x, 75.0);
    assert_eq!(header.width, 75.0);
    // Stored widths stay at the 100% baseline.
    assert_eq!(view.grid().columns.base_width_at(0), 150.0);
}

#[test_case(999, 200 ; "above maximum clamps down")]
#[test_case(1, 20 ; "below minimum clamps up")]
#[test_case(150, 150 ; "in range passes through")]
fn test_zoom_is_clamped_into_range(requested: u16, effective: u16) {
    let mut view = make_view(&["a"], 10);
    let _ = view.set_zoom(requested);
    assert_eq!(view.grid().viewport.zoom(), effective);
}

#[test]
fn test_zoom_shrinks_materialized_window() {
    let mut view = make_view(&["a"], 10_000);
    let at_100 = view.frame().window.len();
    let _ = view.set_zoom(200);
    let at_200 = view.frame().window.len();
    assert!(at_200 < at_100, "taller rows fit fewer in the same body");
}

// ================================================================
// Empty and headerless states
// ================================================================

#[test]
fn test_empty_table_still_plans_headers() {
    let view = make_view(&["name", "age"], 0);
    let plan = view.frame();

    assert!(plan.empty);
    assert!(plan.cells.is_empty());
    assert_eq!(plan.headers.len(), 2);
    assert_eq!(plan.headers[0].label, "name");
    assert_eq!(plan.theme.empty_text, "No data");
}

#[test]
fn test_empty_state_text_comes_from_options() {
    let options = GridOptions {
        empty_state_text: "Nothing to show".to_string(),
        ..GridOptions::default()
    };
    let mut view = GridView::with_options(800, 600, options);
    let _ = view.set_table(make_table("t1", &["a"], 0));
    assert_eq!(view.frame().theme.empty_text, "Nothing to show");
}

#[test]
fn test_hidden_headers_move_body_to_top() {
    let options = GridOptions {
        show_headers: false,
        ..GridOptions::default()
    };
    let mut view = GridView::with_options(800, 600, options);
    let _ = view.set_table(make_table("t1", &["a"], 10));
    let plan = view.frame();

    assert!(plan.headers.is_empty());
    assert_eq!(plan.header_height, 0.0);
    assert_eq!(plan.cells[0].y, 0.0);
}

#[test]
fn test_theme_mirrors_options() {
    let options = GridOptions {
        background_color: "#101010".to_string(),
        selection_color: "#FF0000".to_string(),
        ..GridOptions::default()
    };
    let mut view = GridView::with_options(800, 600, options);
    let _ = view.set_table(make_table("t1", &["a"], 1));
    let theme = view.frame().theme;

    assert_eq!(theme.background, "#101010");
    assert_eq!(theme.selection, "#FF0000");
    assert_eq!(theme.diff_new_row, "#E6F4EA");
}

// ================================================================
// Snapshot replacement through the facade
// ================================================================

#[test]
fn test_duplicate_columns_are_dropped_first_wins() {
    let table = Table::new(
        vec!["a".to_string(), "b".to_string(), "a".to_string()],
        Vec::new(),
        "t1",
    );
    let mut view = GridView::new_test(800, 600);
    let _ = view.set_table(table);

    let plan = view.frame();
    let labels: Vec<&str> = plan.headers.iter().map(|h| h.label.as_str()).collect();
    assert_eq!(labels, vec!["a", "b"]);
}

#[test]
fn test_identity_change_rewinds_scroll_in_plan() {
    let mut view = make_view(&["a"], 1000);
    let _ = view.set_scroll(5000.0);

    let _ = view.set_table(make_table("t2", &["a"], 1000));
    let plan = view.frame();
    assert_eq!(plan.window.start, 0);
    assert_eq!(plan.cells[0].y, HEADER_H);
}
