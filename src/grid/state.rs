//! Grid interaction state and its reducer-style transitions.
//!
//! All grid-private state lives here: the table snapshot, column widths,
//! viewport, and the focus machine (idle / selected / editing). Transitions
//! are synchronous methods that mutate the state and return [`Effect`]s for
//! the shell to apply (host callback invocation, DOM scroll sync, redraw).
//! Nothing in this module touches a rendering surface, so every transition
//! is testable natively.

use crate::layout::{ColumnLayout, Viewport};
use crate::types::{Direction, GridOptions, Table};

/// Focus component of the grid state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Focus {
    /// No cell selected
    #[default]
    Idle,
    /// One active cell
    Selected { row: usize, col: usize },
    /// One in-flight edit session
    Editing {
        row: usize,
        col: usize,
        /// Column name captured when the session opened; the commit
        /// callback reports names, not indices
        column: String,
        draft: String,
    },
}

impl Focus {
    /// The focused cell position, if any.
    pub fn cell(&self) -> Option<(usize, usize)> {
        match self {
            Self::Idle => None,
            Self::Selected { row, col } | Self::Editing { row, col, .. } => Some((*row, *col)),
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self, Self::Editing { .. })
    }
}

/// Arrow keys, pre-translation; the configured [`Direction`] decides how
/// Left/Right map onto column movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrowKey {
    Up,
    Down,
    Left,
    Right,
}

/// Side requests produced by a transition, applied by the shell in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Invoke the host edit callback with exactly this text
    CommitEdit {
        row: usize,
        column: String,
        text: String,
    },
    /// Scroll offset changed; sync the scroll container
    SyncScroll(f32),
    /// Visible state changed; schedule a redraw
    Redraw,
}

/// The grid's private state: snapshot, layout, viewport, focus.
#[derive(Debug, Default)]
pub struct GridState {
    pub table: Table,
    pub comparison: Option<Table>,
    pub columns: ColumnLayout,
    pub viewport: Viewport,
    pub focus: Focus,
    pub options: GridOptions,
}

impl GridState {
    pub fn new(options: GridOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Scaled row height at the current zoom.
    pub fn row_height(&self) -> f32 {
        self.viewport.scaled_row_height(self.options.base_row_height)
    }

    /// Total scaled content height for the current table.
    pub fn content_height(&self) -> f32 {
        Viewport::content_height(self.table.row_count(), self.row_height())
    }

    /// Replaces the table snapshot.
    ///
    /// A new identity token resets all grid-private state (widths, scroll,
    /// zoom stays). The same identity keeps state but re-clamps focus and
    /// re-syncs the column list, since the host may deliver an updated
    /// snapshot after a commit.
    pub fn set_table(&mut self, table: Table) -> Vec<Effect> {
        let identity_changed = table.identity != self.table.identity;
        if identity_changed {
            self.columns.reset(&table.columns);
            self.focus = Focus::Idle;
            self.viewport.scroll_offset = 0.0;
        } else if table.columns != self.table.columns {
            self.columns.sync_columns(&table.columns);
        }
        self.table = table;
        self.clamp_focus();
        self.viewport.clamp_scroll(self.content_height());
        vec![Effect::SyncScroll(self.viewport.scroll_offset), Effect::Redraw]
    }

    /// Replaces the comparison snapshot used for diff annotations.
    pub fn set_comparison(&mut self, comparison: Option<Table>) -> Vec<Effect> {
        self.comparison = comparison;
        vec![Effect::Redraw]
    }

    /// Sets the zoom percentage (clamped 20–200) and re-clamps scroll.
    pub fn set_zoom(&mut self, pct: u16) -> Vec<Effect> {
        self.viewport.set_zoom(pct);
        self.viewport.clamp_scroll(self.content_height());
        vec![Effect::SyncScroll(self.viewport.scroll_offset), Effect::Redraw]
    }

    /// Scroll event from the container.
    pub fn set_scroll(&mut self, offset: f32) -> Vec<Effect> {
        self.viewport.set_scroll(offset, self.content_height());
        vec![Effect::Redraw]
    }

    /// Viewport body height changed.
    pub fn set_viewport_height(&mut self, height: f32) -> Vec<Effect> {
        self.viewport.resize(height);
        self.viewport.clamp_scroll(self.content_height());
        vec![Effect::Redraw]
    }

    /// Pointer click on a body cell. Commits any open edit session first.
    pub fn click_cell(&mut self, row: usize, col: usize) -> Vec<Effect> {
        if !self.cell_in_range(row, col) {
            return Vec::new();
        }
        if let Focus::Editing { row: r, col: c, .. } = self.focus {
            if (r, c) == (row, col) {
                return Vec::new();
            }
        }
        let mut effects = Vec::new();
        self.commit_active(&mut effects);
        self.focus = Focus::Selected { row, col };
        effects.push(Effect::Redraw);
        effects
    }

    /// Double-click opens an edit session on the cell.
    pub fn double_click_cell(&mut self, row: usize, col: usize) -> Vec<Effect> {
        self.begin_edit_at(row, col)
    }

    /// Arrow-key navigation; clamped to table bounds, no wraparound.
    pub fn arrow(&mut self, key: ArrowKey) -> Vec<Effect> {
        if self.focus.is_editing() {
            return Vec::new();
        }
        let Focus::Selected { row, col } = self.focus else {
            return Vec::new();
        };
        let (d_row, d_col) = self.arrow_deltas(key);
        let new_row = step_clamped(row, d_row, self.table.row_count());
        let new_col = step_clamped(col, d_col, self.table.column_count());
        self.move_selection(new_row, new_col)
    }

    /// Tab advances one column and stops at the last column. Shift+Tab goes
    /// back one column and wraps to the previous row's last column, except
    /// at row 0.
    pub fn tab(&mut self, shift: bool) -> Vec<Effect> {
        if self.focus.is_editing() {
            return Vec::new();
        }
        let Focus::Selected { row, col } = self.focus else {
            return Vec::new();
        };
        let cols = self.table.column_count();
        let (new_row, new_col) = if shift {
            if col > 0 {
                (row, col - 1)
            } else if row > 0 && cols > 0 {
                (row - 1, cols - 1)
            } else {
                (row, col)
            }
        } else if col + 1 < cols {
            (row, col + 1)
        } else {
            (row, col)
        };
        self.move_selection(new_row, new_col)
    }

    /// Enter begins an edit on the selected cell, or commits an open one.
    pub fn enter(&mut self) -> Vec<Effect> {
        match self.focus.clone() {
            Focus::Idle => Vec::new(),
            Focus::Selected { row, col } => self.begin_edit_at(row, col),
            Focus::Editing { .. } => {
                let mut effects = Vec::new();
                self.commit_active(&mut effects);
                effects.push(Effect::Redraw);
                effects
            }
        }
    }

    /// Escape discards the draft without invoking the callback; selection
    /// stays on the cell.
    pub fn escape(&mut self) -> Vec<Effect> {
        if let Focus::Editing { row, col, .. } = self.focus {
            self.focus = Focus::Selected { row, col };
            vec![Effect::Redraw]
        } else {
            Vec::new()
        }
    }

    /// Replaces the draft text of the open edit session.
    pub fn input(&mut self, text: &str) -> Vec<Effect> {
        if let Focus::Editing { draft, .. } = &mut self.focus {
            text.clone_into(draft);
        }
        Vec::new()
    }

    /// Focus left the edit surface; commit-on-blur.
    pub fn blur(&mut self) -> Vec<Effect> {
        if !self.focus.is_editing() {
            return Vec::new();
        }
        let mut effects = Vec::new();
        self.commit_active(&mut effects);
        effects.push(Effect::Redraw);
        effects
    }

    /// Opens an edit session at a cell, committing any prior session first.
    pub fn begin_edit_at(&mut self, row: usize, col: usize) -> Vec<Effect> {
        if !self.cell_in_range(row, col) {
            return Vec::new();
        }
        if let Focus::Editing { row: r, col: c, .. } = self.focus {
            if (r, c) == (row, col) {
                return Vec::new();
            }
        }
        let mut effects = Vec::new();
        self.commit_active(&mut effects);
        let Some(column) = self.table.column_name(col).map(str::to_string) else {
            effects.push(Effect::Redraw);
            return effects;
        };
        let draft = self.table.cell_text(row, col).into_owned();
        self.focus = Focus::Editing {
            row,
            col,
            column,
            draft,
        };
        effects.push(Effect::Redraw);
        effects
    }

    /// Display text of the focused cell, if any. Used by clipboard copy.
    pub fn focused_cell_text(&self) -> Option<String> {
        match &self.focus {
            Focus::Idle => None,
            Focus::Selected { row, col } => Some(self.table.cell_text(*row, *col).into_owned()),
            Focus::Editing { draft, .. } => Some(draft.clone()),
        }
    }

    fn arrow_deltas(&self, key: ArrowKey) -> (isize, isize) {
        let rtl = self.options.direction == Direction::Rtl;
        match key {
            ArrowKey::Up => (-1, 0),
            ArrowKey::Down => (1, 0),
            ArrowKey::Left => (0, if rtl { 1 } else { -1 }),
            ArrowKey::Right => (0, if rtl { -1 } else { 1 }),
        }
    }

    fn move_selection(&mut self, row: usize, col: usize) -> Vec<Effect> {
        let before = self.focus.cell();
        self.focus = Focus::Selected { row, col };
        let mut effects = Vec::new();
        if self.viewport.scroll_to_row(row, self.row_height()) {
            effects.push(Effect::SyncScroll(self.viewport.scroll_offset));
        }
        if before != Some((row, col)) || !effects.is_empty() {
            effects.push(Effect::Redraw);
        }
        effects
    }

    /// Commits the open edit session, if any, pushing the callback effect.
    fn commit_active(&mut self, effects: &mut Vec<Effect>) {
        if !self.focus.is_editing() {
            return;
        }
        if let Focus::Editing {
            row,
            col,
            column,
            draft,
        } = std::mem::take(&mut self.focus)
        {
            effects.push(Effect::CommitEdit {
                row,
                column,
                text: draft,
            });
            self.focus = Focus::Selected { row, col };
        }
    }

    fn cell_in_range(&self, row: usize, col: usize) -> bool {
        row < self.table.row_count() && col < self.table.column_count()
    }

    /// Drops or re-clamps focus that no longer points inside the table.
    ///
    /// Stale edit sessions are discarded without committing; committing a
    /// row the host no longer has would fabricate an edit.
    fn clamp_focus(&mut self) {
        match &self.focus {
            Focus::Idle => {}
            Focus::Selected { row, col } | Focus::Editing { row, col, .. } => {
                if !self.cell_in_range(*row, *col) {
                    self.focus = Focus::Idle;
                }
            }
        }
    }
}

/// Clamped single-step move inside `[0, count)`.
fn step_clamped(index: usize, delta: isize, count: usize) -> usize {
    if count == 0 {
        return 0;
    }
    let max = count - 1;
    match delta {
        d if d < 0 => index.saturating_sub(1),
        d if d > 0 => (index + 1).min(max),
        _ => index.min(max),
    }
}
