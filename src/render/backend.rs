//! Render backend trait and the frame plan it consumes.
//!
//! A frame plan is the complete, backend-agnostic description of one frame:
//! screen-space geometry for the materialized cells, the header strip, and
//! the selection highlight. Backends only draw; all composition happens in
//! [`crate::render::plan`].

use crate::diff::DiffKind;
use crate::error::Result;
use crate::layout::RowWindow;

/// Geometry and content for one materialized cell.
#[derive(Debug, Clone)]
pub struct CellPlan {
    pub row: usize,
    pub col: usize,
    /// Left edge in screen pixels
    pub x: f32,
    /// Top edge in screen pixels
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub text: String,
    pub diff: DiffKind,
    pub selected: bool,
}

/// One column header cell; the resize handle sits at `x + width`.
#[derive(Debug, Clone)]
pub struct HeaderCell {
    pub col: usize,
    pub label: String,
    pub x: f32,
    pub width: f32,
}

/// Screen-space highlight rectangle for the active cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Resolved CSS colors for one frame, copied out of the grid options so
/// backends never reach back into state.
#[derive(Debug, Clone)]
pub struct FrameTheme {
    pub background: String,
    pub text: String,
    pub grid_lines: String,
    pub header_bg: String,
    pub header_text: String,
    pub selection: String,
    pub diff_new_row: String,
    pub diff_changed: String,
    /// Placeholder message for a zero-row table
    pub empty_text: String,
}

/// Complete description of one frame.
#[derive(Debug, Clone)]
pub struct FramePlan {
    pub cells: Vec<CellPlan>,
    pub headers: Vec<HeaderCell>,
    pub selection: Option<SelectionRect>,
    /// The materialized row window behind `cells`
    pub window: RowWindow,
    /// Scaled row height in pixels
    pub row_height: f32,
    /// Scaled header strip height (0 when headers are hidden)
    pub header_height: f32,
    /// Font spec for cell text at the current zoom
    pub font: String,
    /// Font spec for header labels at the current zoom
    pub header_font: String,
    /// Scaled font size in pixels, for baseline math
    pub font_px: f32,
    /// Total scaled width of all columns
    pub total_width: f32,
    /// Total scaled height of all rows (header excluded)
    pub content_height: f32,
    /// Zero-row table; backends draw the empty-state placeholder
    pub empty: bool,
    pub theme: FrameTheme,
}

/// Drawing surface abstraction.
///
/// The canvas 2D implementation is the production backend; tests drive the
/// planner directly and can record frames through this trait.
pub trait RenderBackend {
    /// Updates the backing store for a new physical size and pixel ratio.
    fn resize(&mut self, width: u32, height: u32, dpr: f32);

    /// Draws a complete frame.
    fn render(&mut self, plan: &FramePlan) -> Result<()>;
}
