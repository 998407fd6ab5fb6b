//! Interaction tests: selection, keyboard navigation, and the edit
//! session lifecycle.
//!
//! Drives the grid state machine the way the event shell does and checks
//! the effects handed back for the shell to apply.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use gridview::types::{Direction, GridOptions, Row, Table, Value};
use gridview::{ArrowKey, Effect, Focus, GridState};

// ================================================================
// Test helpers
// ================================================================

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

/// Grid with a loaded table and a 240px body (10 rows at the default
/// 24px row height).
fn make_state(columns: &[&str], rows: usize) -> GridState {
    let mut state = GridState::new(GridOptions::default());
    let _ = state.set_viewport_height(240.0);
    let _ = state.set_table(make_table("t1", columns, rows));
    state
}

/// Grid configured for right-to-left navigation.
fn make_rtl_state(columns: &[&str], rows: usize) -> GridState {
    let options = GridOptions {
        direction: Direction::Rtl,
        ..GridOptions::default()
    };
    let mut state = GridState::new(options);
    let _ = state.set_viewport_height(240.0);
    let _ = state.set_table(make_table("t1", columns, rows));
    state
}

/// Extract every commit payload from an effect list, in order.
fn commits(effects: &[Effect]) -> Vec<(usize, String, String)> {
    effects
        .iter()
        .filter_map(|e| match e {
            Effect::CommitEdit { row, column, text } => {
                Some((*row, column.clone(), text.clone()))
            }
            _ => None,
        })
        .collect()
}

/// Selected cell position, panicking when idle or editing.
fn selected(state: &GridState) -> (usize, usize) {
    match state.focus {
        Focus::Selected { row, col } => (row, col),
        ref other => panic!("expected a selected cell, got {other:?}"),
    }
}

// ================================================================
// Selection tests
// ================================================================

#[test]
fn test_click_selects_cell() {
    let mut state = make_state(&["name", "age"], 5);
    let effects = state.click_cell(3, 1);
    assert_eq!(selected(&state), (3, 1));
    assert!(effects.contains(&Effect::Redraw));
}

#[test]
fn test_click_outside_table_is_ignored() {
    let mut state = make_state(&["name"], 3);
    assert!(state.click_cell(3, 0).is_empty());
    assert!(state.click_cell(0, 1).is_empty());
    assert_eq!(state.focus, Focus::Idle);
}

#[test]
fn test_click_moves_selection_between_cells() {
    let mut state = make_state(&["a", "b", "c"], 5);
    let _ = state.click_cell(0, 0);
    let _ = state.click_cell(4, 2);
    assert_eq!(selected(&state), (4, 2));
}

#[test]
fn test_empty_table_accepts_no_selection() {
    let mut state = make_state(&["a"], 0);
    assert!(state.click_cell(0, 0).is_empty());
    assert_eq!(state.focus, Focus::Idle);
}

// ================================================================
// Arrow navigation tests
// ================================================================

#[test]
fn test_arrows_move_one_cell() {
    let mut state = make_state(&["a", "b", "c"], 5);
    let _ = state.click_cell(2, 1);

    let _ = state.arrow(ArrowKey::Down);
    assert_eq!(selected(&state), (3, 1));
    let _ = state.arrow(ArrowKey::Up);
    assert_eq!(selected(&state), (2, 1));
    let _ = state.arrow(ArrowKey::Right);
    assert_eq!(selected(&state), (2, 2));
    let _ = state.arrow(ArrowKey::Left);
    assert_eq!(selected(&state), (2, 1));
}

#[test]
fn test_arrows_clamp_at_edges_without_wrapping() {
    let mut state = make_state(&["a", "b"], 3);

    let _ = state.click_cell(0, 0);
    assert!(state.arrow(ArrowKey::Up).is_empty());
    assert!(state.arrow(ArrowKey::Left).is_empty());
    assert_eq!(selected(&state), (0, 0));

    let _ = state.click_cell(2, 1);
    assert!(state.arrow(ArrowKey::Down).is_empty());
    assert!(state.arrow(ArrowKey::Right).is_empty());
    assert_eq!(selected(&state), (2, 1));
}

#[test]
fn test_arrows_do_nothing_when_idle() {
    let mut state = make_state(&["a"], 3);
    assert!(state.arrow(ArrowKey::Down).is_empty());
    assert_eq!(state.focus, Focus::Idle);
}

#[test]
fn test_rtl_swaps_horizontal_arrows_only() {
    let mut state = make_rtl_state(&["a", "b", "c"], 3);
    let _ = state.click_cell(1, 1);

    // Left advances the column index under RTL, Right goes back.
    let _ = state.arrow(ArrowKey::Left);
    assert_eq!(selected(&state), (1, 2));
    let _ = state.arrow(ArrowKey::Right);
    let _ = state.arrow(ArrowKey::Right);
    assert_eq!(selected(&state), (1, 0));

    // Vertical movement is direction-independent.
    let _ = state.arrow(ArrowKey::Down);
    assert_eq!(selected(&state), (2, 0));
}

// ================================================================
// Tab traversal tests
// ================================================================

#[test]
fn test_tab_advances_and_stops_at_last_column() {
    let mut state = make_state(&["a", "b", "c"], 3);
    let _ = state.click_cell(1, 1);

    let _ = state.tab(false);
    assert_eq!(selected(&state), (1, 2));
    assert!(state.tab(false).is_empty(), "last column is a hard stop");
    assert_eq!(selected(&state), (1, 2));
}

#[test]
fn test_shift_tab_wraps_to_previous_row_last_column() {
    let mut state = make_state(&["a", "b", "c"], 3);
    let _ = state.click_cell(2, 0);

    let _ = state.tab(true);
    assert_eq!(selected(&state), (1, 2));
}

#[test]
fn test_shift_tab_stops_at_origin() {
    let mut state = make_state(&["a", "b"], 3);
    let _ = state.click_cell(0, 0);
    assert!(state.tab(true).is_empty());
    assert_eq!(selected(&state), (0, 0));
}

#[test]
fn test_tab_is_unaffected_by_rtl() {
    let mut state = make_rtl_state(&["a", "b"], 2);
    let _ = state.click_cell(0, 0);
    let _ = state.tab(false);
    assert_eq!(selected(&state), (0, 1), "tab follows column order, not direction");
}

// ================================================================
// Edit lifecycle tests
// ================================================================

#[test]
fn test_enter_opens_edit_with_current_text() {
    let mut state = make_state(&["name"], 3);
    let _ = state.click_cell(1, 0);
    let _ = state.enter();

    assert!(state.focus.is_editing());
    assert_eq!(state.focused_cell_text().unwrap(), "name1");
}

#[test]
fn test_double_click_opens_edit() {
    let mut state = make_state(&["name"], 3);
    let effects = state.double_click_cell(2, 0);

    assert!(state.focus.is_editing());
    assert!(commits(&effects).is_empty());
}

#[test]
fn test_enter_commits_exactly_once() {
    let mut state = make_state(&["name", "age"], 3);
    let mut all = Vec::new();

    all.extend(state.click_cell(1, 0));
    all.extend(state.enter());
    all.extend(state.input("Ada"));
    all.extend(state.enter());

    let commits = commits(&all);
    assert_eq!(commits.len(), 1);
    assert_eq!(commits[0], (1, "name".to_string(), "Ada".to_string()));
    assert_eq!(selected(&state), (1, 0), "commit returns to selection");
}

#[test]
fn test_escape_discards_draft_without_committing() {
    let mut state = make_state(&["name"], 3);
    let mut all = Vec::new();

    all.extend(state.double_click_cell(1, 0));
    all.extend(state.input("scratch"));
    all.extend(state.escape());

    assert!(commits(&all).is_empty(), "escape never reaches the host");
    assert_eq!(selected(&state), (1, 0));

    // The draft is gone; reopening starts from the committed value.
    let _ = state.enter();
    assert_eq!(state.focused_cell_text().unwrap(), "name1");
}

#[test]
fn test_blur_commits_open_session() {
    let mut state = make_state(&["name"], 3);
    let _ = state.double_click_cell(0, 0);
    let _ = state.input("edited");

    let effects = state.blur();
    assert_eq!(
        commits(&effects),
        vec![(0, "name".to_string(), "edited".to_string())]
    );
    assert!(!state.focus.is_editing());
}

#[test]
fn test_blur_without_session_is_noop() {
    let mut state = make_state(&["name"], 3);
    let _ = state.click_cell(0, 0);
    assert!(state.blur().is_empty());
    assert!(state.escape().is_empty());
}

#[test]
fn test_click_elsewhere_commits_then_selects() {
    let mut state = make_state(&["a", "b"], 3);
    let _ = state.double_click_cell(0, 0);
    let _ = state.input("moved on");

    let effects = state.click_cell(2, 1);
    assert_eq!(
        commits(&effects),
        vec![(0, "a".to_string(), "moved on".to_string())]
    );
    assert_eq!(selected(&state), (2, 1));
}

#[test]
fn test_new_session_commits_previous_first() {
    let mut state = make_state(&["a", "b"], 3);
    let _ = state.double_click_cell(0, 0);
    let _ = state.input("first");

    let effects = state.double_click_cell(1, 1);
    assert_eq!(
        commits(&effects),
        vec![(0, "a".to_string(), "first".to_string())]
    );
    match &state.focus {
        Focus::Editing { row, col, draft, .. } => {
            assert_eq!((*row, *col), (1, 1));
            assert_eq!(draft, "b1");
        }
        other => panic!("expected a fresh session, got {other:?}"),
    }
}

#[test]
fn test_reopening_same_cell_keeps_draft() {
    let mut state = make_state(&["a"], 3);
    let _ = state.double_click_cell(1, 0);
    let _ = state.input("typing...");

    assert!(state.double_click_cell(1, 0).is_empty());
    assert_eq!(state.focused_cell_text().unwrap(), "typing...");
}

#[test]
fn test_empty_commit_text_is_preserved() {
    let mut state = make_state(&["a"], 2);
    let _ = state.double_click_cell(0, 0);
    let _ = state.input("");

    let effects = state.enter();
    assert_eq!(commits(&effects), vec![(0, "a".to_string(), String::new())]);
}

#[test]
fn test_numeric_looking_text_commits_verbatim() {
    let mut state = make_state(&["a"], 2);
    let _ = state.double_click_cell(0, 0);
    let _ = state.input("42");

    let effects = state.enter();
    assert_eq!(
        commits(&effects),
        vec![(0, "a".to_string(), "42".to_string())],
        "no numeric coercion on commit"
    );
}

#[test]
fn test_navigation_keys_are_inert_while_editing() {
    let mut state = make_state(&["a", "b"], 3);
    let _ = state.double_click_cell(1, 0);
    let _ = state.input("draft");

    assert!(state.arrow(ArrowKey::Down).is_empty());
    assert!(state.tab(false).is_empty());
    assert_eq!(state.focused_cell_text().unwrap(), "draft");
}

// ================================================================
// Snapshot update tests
// ================================================================

#[test]
fn test_new_identity_resets_focus_and_scroll() {
    let mut state = make_state(&["a"], 100);
    let _ = state.click_cell(50, 0);
    let _ = state.set_scroll(600.0);

    let effects = state.set_table(make_table("t2", &["x", "y"], 10));
    assert_eq!(state.focus, Focus::Idle);
    assert_eq!(state.viewport.scroll_offset, 0.0);
    assert!(effects.contains(&Effect::SyncScroll(0.0)));
}

#[test]
fn test_identity_change_discards_edit_without_committing() {
    let mut state = make_state(&["a"], 5);
    let _ = state.double_click_cell(2, 0);
    let _ = state.input("unsaved");

    let effects = state.set_table(make_table("t2", &["a"], 5));
    assert!(commits(&effects).is_empty(), "no fabricated edit on reset");
    assert_eq!(state.focus, Focus::Idle);
}

#[test]
fn test_same_identity_update_keeps_selection() {
    let mut state = make_state(&["a", "b"], 5);
    let _ = state.click_cell(3, 1);

    let _ = state.set_table(make_table("t1", &["a", "b"], 5));
    assert_eq!(selected(&state), (3, 1));
}

#[test]
fn test_same_identity_shrink_drops_stale_focus() {
    let mut state = make_state(&["a"], 10);
    let _ = state.click_cell(8, 0);

    let effects = state.set_table(make_table("t1", &["a"], 4));
    assert_eq!(state.focus, Focus::Idle);
    assert!(commits(&effects).is_empty());
}

#[test]
fn test_same_identity_shrink_reclamps_scroll() {
    let mut state = make_state(&["a"], 100);
    let _ = state.set_scroll(2000.0);

    let _ = state.set_table(make_table("t1", &["a"], 20));
    // 20 rows * 24px = 480px of content in a 240px body.
    assert_eq!(state.viewport.scroll_offset, 240.0);
}

// ================================================================
// Scroll-into-view tests
// ================================================================

#[test]
fn test_arrow_below_view_scrolls_bottom_aligned() {
    let mut state = make_state(&["a"], 100);
    let _ = state.click_cell(9, 0);

    // Row 10 starts at 240px, just past the 240px body.
    let effects = state.arrow(ArrowKey::Down);
    assert_eq!(state.viewport.scroll_offset, 11.0 * 24.0 - 240.0);
    assert!(effects.contains(&Effect::SyncScroll(state.viewport.scroll_offset)));
}

#[test]
fn test_arrow_above_view_scrolls_top_aligned() {
    let mut state = make_state(&["a"], 100);
    let _ = state.set_scroll(480.0);
    let _ = state.click_cell(20, 0);

    let _ = state.arrow(ArrowKey::Up);
    assert_eq!(state.viewport.scroll_offset, 19.0 * 24.0);
}

#[test]
fn test_arrow_inside_view_does_not_scroll() {
    let mut state = make_state(&["a"], 100);
    let _ = state.click_cell(2, 0);

    let effects = state.arrow(ArrowKey::Down);
    assert_eq!(state.viewport.scroll_offset, 0.0);
    assert!(!effects.iter().any(|e| matches!(e, Effect::SyncScroll(_))));
}

// ================================================================
// Copy text tests
// ================================================================

#[test]
fn test_copy_text_follows_focus() {
    let mut state = make_state(&["name"], 3);
    assert_eq!(state.focused_cell_text(), None);

    let _ = state.click_cell(2, 0);
    assert_eq!(state.focused_cell_text().unwrap(), "name2");

    let _ = state.enter();
    let _ = state.input("half-typed");
    assert_eq!(
        state.focused_cell_text().unwrap(),
        "half-typed",
        "an open draft is what copy sees"
    );
}

#[test]
fn test_copy_text_formats_values() {
    let columns = vec!["n".to_string()];
    let rows = vec![
        [("n".to_string(), Value::Number(2.0))].into_iter().collect::<Row>(),
        [("n".to_string(), Value::Number(3.5))].into_iter().collect::<Row>(),
        [("n".to_string(), Value::Bool(true))].into_iter().collect::<Row>(),
        [("n".to_string(), Value::Null)].into_iter().collect::<Row>(),
    ];
    let mut state = GridState::new(GridOptions::default());
    let _ = state.set_table(Table::new(columns, rows, "t"));

    let _ = state.click_cell(0, 0);
    assert_eq!(state.focused_cell_text().unwrap(), "2");
    let _ = state.click_cell(1, 0);
    assert_eq!(state.focused_cell_text().unwrap(), "3.5");
    let _ = state.click_cell(2, 0);
    assert_eq!(state.focused_cell_text().unwrap(), "true");
    let _ = state.click_cell(3, 0);
    assert_eq!(state.focused_cell_text().unwrap(), "");
}
