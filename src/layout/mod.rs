//! Layout engine for column geometry and viewport windowing.
//!
//! This module handles:
//! - Per-column base widths with resize and auto-fit
//! - Viewport state (scroll position, zoom, visible row window)
//! - Binary search for column hit testing at screen coordinates

mod columns;
mod viewport;

pub use columns::{
    ColumnLayout, DragResize, AUTO_FIT_SAMPLE_ROWS, CELL_PADDING, DEFAULT_COL_WIDTH,
    HEADER_ICON_ALLOWANCE, MAX_COL_WIDTH, MIN_COL_WIDTH, RESIZE_HANDLE_TOLERANCE,
};
pub use viewport::{RowWindow, Viewport, DEFAULT_ZOOM, MAX_ZOOM, MIN_ZOOM, ROW_BUFFER};
