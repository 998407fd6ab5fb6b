//! Canvas 2D rendering backend.
//!
//! Implements the RenderBackend trait using the HTML Canvas 2D API via
//! web-sys. The context is scaled by the devicePixelRatio at the start of
//! every frame, so all drawing here uses logical (CSS pixel) coordinates.

use std::borrow::Cow;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::diff::DiffKind;
use crate::error::Result;
use crate::measure::{MeasureCache, TextMeasure};
use crate::render::backend::{FramePlan, RenderBackend, SelectionRect};

const CELL_PADDING: f64 = 4.0;

/// Canvas 2D renderer implementing the RenderBackend trait
pub struct CanvasRenderer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    width: u32,
    height: u32,
    dpr: f32,
    /// Cache for text measurements (key: "font\\ntext")
    measure_cache: MeasureCache,
}

impl CanvasRenderer {
    /// Create a new Canvas renderer from an HtmlCanvasElement
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|_| "Failed to get 2d context")?
            .ok_or("No 2d context available")?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| "Failed to cast to CanvasRenderingContext2d")?;

        let width = canvas.width();
        let height = canvas.height();

        Ok(Self {
            canvas,
            ctx,
            width,
            height,
            dpr: 1.0,
            measure_cache: MeasureCache::default(),
        })
    }

    /// The 2d context, shared with [`CanvasMeasure`] for auto-fit.
    pub fn context(&self) -> CanvasRenderingContext2d {
        self.ctx.clone()
    }

    /// Helper to get crisp pixel position for 1px lines
    fn crisp(x: f64) -> f64 {
        x.floor() + 0.5
    }

    /// Draw a filled rectangle
    fn fill_rect(&self, x: f64, y: f64, w: f64, h: f64, color: &str) {
        self.ctx.set_fill_style_str(color);
        self.ctx.fill_rect(x, y, w, h);
    }

    /// Draw a stroked line
    fn stroke_line(&self, x1: f64, y1: f64, x2: f64, y2: f64, width: f64, color: &str) {
        self.ctx.begin_path();
        self.ctx.set_stroke_style_str(color);
        self.ctx.set_line_width(width);
        self.ctx.move_to(Self::crisp(x1), Self::crisp(y1));
        self.ctx.line_to(Self::crisp(x2), Self::crisp(y2));
        self.ctx.stroke();
    }

    /// Measure text width in the currently set font, cached.
    #[allow(clippy::cast_possible_truncation)]
    fn measure_text_cached(&mut self, text: &str, font: &str) -> f64 {
        if let Some(width) = self.measure_cache.get(font, text) {
            return f64::from(width);
        }
        let width = self
            .ctx
            .measure_text(text)
            .map(|m| m.width())
            .unwrap_or(0.0) as f32;
        self.measure_cache.insert(font, text, width);
        f64::from(width)
    }

    /// Truncate text with ellipsis if it exceeds max width
    fn truncate_text<'a>(&mut self, text: &'a str, max_width: f64, font: &str) -> Cow<'a, str> {
        if self.measure_text_cached(text, font) <= max_width {
            return Cow::Borrowed(text);
        }

        let ellipsis = "\u{2026}";
        let ellipsis_width = self.measure_text_cached(ellipsis, font);
        let available = max_width - ellipsis_width;

        if available <= 0.0 {
            return Cow::Borrowed(ellipsis);
        }

        // Binary search for the maximum text that fits
        let chars: Vec<char> = text.chars().collect();
        let mut low = 0;
        let mut high = chars.len();

        while low < high {
            let mid = (low + high).div_ceil(2);
            let truncated: String = chars.iter().take(mid).collect();
            let width = self.measure_text_cached(&truncated, font);
            if width <= available {
                low = mid;
            } else {
                high = mid - 1;
            }
        }

        let mut truncated: String = chars.iter().take(low).collect();
        truncated.push_str(ellipsis);
        Cow::Owned(truncated)
    }

    /// Diff tint fills, then one text pass with a single font set.
    ///
    /// Plain text is pre-truncated by truncate_text() so per-cell clipping
    /// is redundant.
    fn render_cells(&mut self, plan: &FramePlan) {
        for cell in &plan.cells {
            let tint = match cell.diff {
                DiffKind::NewRow => Some(plan.theme.diff_new_row.as_str()),
                DiffKind::Changed => Some(plan.theme.diff_changed.as_str()),
                DiffKind::Unchanged => None,
            };
            if let Some(color) = tint {
                self.fill_rect(
                    f64::from(cell.x),
                    f64::from(cell.y),
                    f64::from(cell.width),
                    f64::from(cell.height),
                    color,
                );
            }
        }

        self.ctx.set_font(&plan.font);
        self.ctx.set_fill_style_str(&plan.theme.text);
        for cell in &plan.cells {
            if cell.text.is_empty() {
                continue;
            }
            let max_width = f64::from(cell.width) - CELL_PADDING * 2.0;
            if max_width <= 0.0 {
                continue;
            }
            let display = self.truncate_text(&cell.text, max_width, &plan.font);
            let text_x = f64::from(cell.x) + CELL_PADDING;
            let text_y = f64::from(cell.y) + f64::from(cell.height) / 2.0
                + f64::from(plan.font_px) / 3.0;
            let _ = self.ctx.fill_text(display.as_ref(), text_x, text_y);
        }
    }

    /// Grid lines along the edges of the materialized cells.
    fn render_grid_lines(&mut self, plan: &FramePlan) {
        let Some(first) = plan.cells.first() else {
            return;
        };
        let first_row = first.row;
        let first_col = first.col;
        let body_top = f64::from(plan.header_height);

        // Horizontal extent from the first materialized row
        let mut left = f64::MAX;
        let mut right = f64::MIN;
        for cell in plan.cells.iter().filter(|c| c.row == first_row) {
            left = left.min(f64::from(cell.x));
            right = right.max(f64::from(cell.x) + f64::from(cell.width));
        }
        // Vertical extent from the first materialized column
        let mut top = f64::MAX;
        let mut bottom = f64::MIN;
        for cell in plan.cells.iter().filter(|c| c.col == first_col) {
            top = top.min(f64::from(cell.y));
            bottom = bottom.max(f64::from(cell.y) + f64::from(cell.height));
        }
        top = top.max(body_top);
        if left > right || top > bottom {
            return;
        }

        let color = &plan.theme.grid_lines;
        for cell in plan.cells.iter().filter(|c| c.col == first_col) {
            let y = f64::from(cell.y) + f64::from(cell.height);
            if y < body_top {
                continue;
            }
            self.stroke_line(left, y, right, y, 1.0, color);
        }
        for cell in plan.cells.iter().filter(|c| c.row == first_row) {
            self.stroke_line(f64::from(cell.x), top, f64::from(cell.x), bottom, 1.0, color);
        }
        self.stroke_line(right, top, right, bottom, 1.0, color);
    }

    /// Header strip: background, bold labels, column separators.
    fn render_headers(&mut self, plan: &FramePlan, logical_width: f64) {
        if plan.header_height <= 0.0 {
            return;
        }
        let h = f64::from(plan.header_height);
        self.fill_rect(0.0, 0.0, logical_width, h, &plan.theme.header_bg);

        self.ctx.set_font(&plan.header_font);
        self.ctx.set_fill_style_str(&plan.theme.header_text);
        for header in &plan.headers {
            let max_width = f64::from(header.width) - CELL_PADDING * 2.0;
            if max_width <= 0.0 {
                continue;
            }
            let label = self.truncate_text(&header.label, max_width, &plan.header_font);
            let x = f64::from(header.x) + CELL_PADDING;
            let y = h / 2.0 + f64::from(plan.font_px) / 3.0;
            let _ = self.ctx.fill_text(label.as_ref(), x, y);
        }

        for header in &plan.headers {
            let x = f64::from(header.x) + f64::from(header.width);
            self.stroke_line(x, 0.0, x, h, 1.0, &plan.theme.grid_lines);
        }
        self.stroke_line(0.0, h, logical_width, h, 1.0, &plan.theme.grid_lines);
    }

    /// 2px accent outline inset so it stays inside the cell bounds.
    fn render_selection(&self, rect: SelectionRect, plan: &FramePlan) {
        self.ctx.set_stroke_style_str(&plan.theme.selection);
        self.ctx.set_line_width(2.0);
        self.ctx.stroke_rect(
            f64::from(rect.x) + 1.0,
            f64::from(rect.y) + 1.0,
            (f64::from(rect.width) - 2.0).max(0.0),
            (f64::from(rect.height) - 2.0).max(0.0),
        );
    }

    /// Centered placeholder text in the body area of a zero-row table.
    fn render_empty_state(&self, plan: &FramePlan, logical_width: f64, logical_height: f64) {
        let body_top = f64::from(plan.header_height);
        self.ctx.set_font(&plan.font);
        self.ctx.set_fill_style_str(&plan.theme.header_text);
        self.ctx.set_text_align("center");
        let _ = self.ctx.fill_text(
            &plan.theme.empty_text,
            logical_width / 2.0,
            body_top + (logical_height - body_top) / 2.0,
        );
        self.ctx.set_text_align("left");
    }
}

impl RenderBackend for CanvasRenderer {
    fn resize(&mut self, width: u32, height: u32, dpr: f32) {
        self.width = width;
        self.height = height;
        self.dpr = dpr;
        self.measure_cache.clear();

        // Physical buffer size; the CSS size stays logical
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        let style = self.canvas.style();
        let _ = style.set_property(
            "width",
            &format!("{}px", f64::from(width) / f64::from(dpr)),
        );
        let _ = style.set_property(
            "height",
            &format!("{}px", f64::from(height) / f64::from(dpr)),
        );
    }

    fn render(&mut self, plan: &FramePlan) -> Result<()> {
        let logical_width = f64::from(self.width) / f64::from(self.dpr);
        let logical_height = f64::from(self.height) / f64::from(self.dpr);

        // Clips survive reset_transform(), so the whole frame runs inside
        // save/restore; a clip leak in any sub-call would corrupt
        // subsequent frames.
        self.ctx
            .reset_transform()
            .map_err(|_| "Failed to reset transform")?;
        self.ctx
            .clear_rect(0.0, 0.0, f64::from(self.width), f64::from(self.height));
        self.ctx.save();
        let _ = self.ctx.scale(f64::from(self.dpr), f64::from(self.dpr));

        self.fill_rect(0.0, 0.0, logical_width, logical_height, &plan.theme.background);

        if plan.empty {
            self.render_headers(plan, logical_width);
            self.render_empty_state(plan, logical_width, logical_height);
            self.ctx.restore();
            return Ok(());
        }

        self.render_cells(plan);
        self.render_grid_lines(plan);
        if let Some(rect) = plan.selection {
            self.render_selection(rect, plan);
        }
        // Headers last: rows scrolling under the strip paint first and the
        // strip covers them.
        self.render_headers(plan, logical_width);

        self.ctx.restore();
        Ok(())
    }
}

/// Text measurement through the canvas 2D context.
///
/// Shares the renderer's context. Setting the font here is safe because
/// the renderer re-sets its font at the start of every text pass.
pub struct CanvasMeasure {
    ctx: CanvasRenderingContext2d,
    cache: MeasureCache,
}

impl CanvasMeasure {
    pub fn new(ctx: CanvasRenderingContext2d) -> Self {
        Self {
            ctx,
            cache: MeasureCache::default(),
        }
    }
}

impl TextMeasure for CanvasMeasure {
    #[allow(clippy::cast_possible_truncation)]
    fn measure(&mut self, text: &str, font: &str) -> f32 {
        if let Some(width) = self.cache.get(font, text) {
            return width;
        }
        self.ctx.set_font(font);
        let width = self
            .ctx
            .measure_text(text)
            .map(|m| m.width())
            .unwrap_or(0.0) as f32;
        self.cache.insert(font, text, width);
        width
    }
}
