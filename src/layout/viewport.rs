//! Viewport state and row windowing for virtualized rendering.
//!
//! The windower is a pure function of scroll offset, viewport height, row
//! height, and row count. It is recomputed synchronously on every scroll,
//! resize, zoom change, and table swap; nothing outside the returned range
//! is ever materialized.

/// Minimum zoom percentage
pub const MIN_ZOOM: u16 = 20;

/// Maximum zoom percentage
pub const MAX_ZOOM: u16 = 200;

/// Default zoom percentage
pub const DEFAULT_ZOOM: u16 = 100;

/// Rows materialized beyond each edge of the visible range
pub const ROW_BUFFER: usize = 10;

/// A contiguous slice of rows to materialize, with the spacer heights that
/// keep the scrollable region's total height exact.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowWindow {
    /// First materialized row index
    pub start: usize,
    /// One past the last materialized row index
    pub end: usize,
    /// Pixel height of the skipped rows above `start`
    pub spacer_top: f32,
    /// Pixel height of the skipped rows below `end`
    pub spacer_bottom: f32,
}

impl RowWindow {
    pub const EMPTY: Self = Self {
        start: 0,
        end: 0,
        spacer_top: 0.0,
        spacer_bottom: 0.0,
    };

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    pub fn contains(&self, row: usize) -> bool {
        row >= self.start && row < self.end
    }
}

/// Viewport state: scroll position, rendered height, zoom.
#[derive(Debug, Clone)]
pub struct Viewport {
    /// Vertical scroll offset in scaled content pixels
    pub scroll_offset: f32,
    /// Rendered body height in pixels (header strip excluded)
    pub height: f32,
    /// Zoom percentage, always within [`MIN_ZOOM`, `MAX_ZOOM`]
    zoom: u16,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            scroll_offset: 0.0,
            height: 600.0,
            zoom: DEFAULT_ZOOM,
        }
    }
}

impl Viewport {
    pub fn new(height: f32) -> Self {
        Self {
            height: height.max(0.0),
            ..Self::default()
        }
    }

    pub fn zoom(&self) -> u16 {
        self.zoom
    }

    /// Sets the zoom percentage, clamped to the valid range.
    pub fn set_zoom(&mut self, pct: u16) {
        self.zoom = pct.clamp(MIN_ZOOM, MAX_ZOOM);
    }

    /// Zoom as a multiplier (1.0 at 100%).
    pub fn scale(&self) -> f32 {
        f32::from(self.zoom) / 100.0
    }

    /// Row height at the current zoom.
    pub fn scaled_row_height(&self, base_row_height: f32) -> f32 {
        base_row_height * self.scale()
    }

    pub fn resize(&mut self, height: f32) {
        self.height = height.max(0.0);
    }

    /// Sets the scroll offset, clamped to the content.
    pub fn set_scroll(&mut self, offset: f32, content_height: f32) {
        self.scroll_offset = offset;
        self.clamp_scroll(content_height);
    }

    /// Clamps the scroll offset to `[0, content_height - height]`.
    pub fn clamp_scroll(&mut self, content_height: f32) {
        if !self.scroll_offset.is_finite() {
            self.scroll_offset = 0.0;
            return;
        }
        let max = (content_height - self.height).max(0.0);
        self.scroll_offset = self.scroll_offset.clamp(0.0, max);
    }

    /// Total scaled content height for a row count.
    pub fn content_height(total_rows: usize, row_height: f32) -> f32 {
        count_px(total_rows, row_height)
    }

    /// Computes the materialized row window for the current scroll state.
    ///
    /// The returned range carries [`ROW_BUFFER`] extra rows on each end,
    /// clamped to `[0, total_rows]`. Spacer heights satisfy
    /// `spacer_top + len×row_height + spacer_bottom == total_rows×row_height`.
    pub fn window(&self, total_rows: usize, row_height: f32) -> RowWindow {
        if total_rows == 0 || row_height <= 0.0 || !row_height.is_finite() {
            return RowWindow::EMPTY;
        }
        let content = count_px(total_rows, row_height);
        let scroll = if self.scroll_offset.is_finite() {
            self.scroll_offset.clamp(0.0, content)
        } else {
            0.0
        };
        let height = if self.height.is_finite() {
            self.height.max(0.0)
        } else {
            0.0
        };

        let first_visible = row_at_offset(scroll, row_height).min(total_rows - 1);
        let last_visible = row_at_offset(scroll + height, row_height).min(total_rows - 1);

        let start = first_visible.saturating_sub(ROW_BUFFER);
        let end = (last_visible + 1 + ROW_BUFFER).min(total_rows);

        RowWindow {
            start,
            end,
            spacer_top: count_px(start, row_height),
            spacer_bottom: count_px(total_rows - end, row_height),
        }
    }

    /// Scrolls by the minimum delta that brings `row` fully into view.
    ///
    /// Returns whether the offset changed; already-visible rows are a no-op.
    pub fn scroll_to_row(&mut self, row: usize, row_height: f32) -> bool {
        if row_height <= 0.0 || !row_height.is_finite() {
            return false;
        }
        let top = count_px(row, row_height);
        let bottom = top + row_height;
        if top < self.scroll_offset {
            self.scroll_offset = top;
            true
        } else if bottom > self.scroll_offset + self.height {
            self.scroll_offset = (bottom - self.height).max(0.0);
            true
        } else {
            false
        }
    }

    /// Row index under a y coordinate measured from the top of the body
    /// area, or `None` outside the table.
    pub fn row_at(&self, y: f32, row_height: f32, total_rows: usize) -> Option<usize> {
        if y < 0.0 || row_height <= 0.0 || !row_height.is_finite() {
            return None;
        }
        let row = row_at_offset(self.scroll_offset + y, row_height);
        (row < total_rows).then_some(row)
    }

    /// Whether a row is fully inside the scrolled view.
    pub fn is_row_in_view(&self, row: usize, row_height: f32) -> bool {
        let top = count_px(row, row_height);
        let bottom = top + row_height;
        top >= self.scroll_offset && bottom <= self.scroll_offset + self.height
    }
}

/// Index of the row containing a vertical content offset.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn row_at_offset(offset: f32, row_height: f32) -> usize {
    if offset <= 0.0 || row_height <= 0.0 {
        return 0;
    }
    let idx = (offset / row_height).floor();
    if idx.is_finite() && idx >= 0.0 {
        idx as usize
    } else {
        0
    }
}

/// Pixel height of `count` rows.
fn count_px(count: usize, row_height: f32) -> f32 {
    count as f32 * row_height
}
