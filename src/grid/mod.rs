//! Main GridView struct - the primary entry point for the Canvas 2D grid.
//!
//! This module provides the WASM-exported `GridView` component that handles:
//! - Accepting table snapshots from the host (rows, ordered columns, identity)
//! - Managing viewport state (scroll, zoom, column widths)
//! - Coordinating between frame planning and Canvas 2D rendering
//! - Handling user interactions (scroll, click, keyboard, cell editing)
//!
//! Event handlers for selection, editing, and copy are automatically
//! registered when the grid is mounted - no manual JavaScript wiring
//! required. Edits flow back to the host through the edit callback; the
//! grid never mutates the snapshot it was given.

mod events;
#[cfg(target_arch = "wasm32")]
mod clipboard;
#[cfg(target_arch = "wasm32")]
mod input;
mod state;

pub use state::{ArrowKey, Effect, Focus, GridState};

use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use js_sys::Function;
#[cfg(target_arch = "wasm32")]
use js_sys::Reflect;
#[cfg(target_arch = "wasm32")]
use serde::Serialize;
#[cfg(target_arch = "wasm32")]
use std::cell::RefCell;
#[cfg(target_arch = "wasm32")]
use std::rc::Rc;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::closure::Closure;
#[cfg(target_arch = "wasm32")]
use web_sys::{
    Document, HtmlCanvasElement, HtmlDivElement, HtmlElement, KeyboardEvent, MouseEvent,
};

#[cfg(target_arch = "wasm32")]
use crate::layout::DragResize;
#[cfg(target_arch = "wasm32")]
use crate::render::{CanvasMeasure, CanvasRenderer, RenderBackend};
#[cfg(target_arch = "wasm32")]
use crate::types::Table;
#[cfg(target_arch = "wasm32")]
use input::InputOverlay;

#[cfg(not(target_arch = "wasm32"))]
use crate::render::FramePlan;
use crate::render::build_frame;
use crate::types::GridOptions;

#[cfg(target_arch = "wasm32")]
fn scroll_left_f64(element: &HtmlDivElement) -> f64 {
    Reflect::get(element.as_ref(), &JsValue::from_str("scrollLeft"))
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(element.scroll_left() as f64)
}

#[cfg(target_arch = "wasm32")]
fn scroll_top_f64(element: &HtmlDivElement) -> f64 {
    Reflect::get(element.as_ref(), &JsValue::from_str("scrollTop"))
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(element.scroll_top() as f64)
}

/// Shared state that can be accessed by event handlers (wasm32 only)
#[cfg(target_arch = "wasm32")]
pub(crate) struct SharedState {
    pub(crate) grid: GridState,
    /// Horizontal scroll of the container. Kept outside [`GridState`]
    /// because only the vertical position participates in row windowing.
    pub(crate) scroll_x: f32,
    pub(crate) widget_width: f32,
    pub(crate) widget_height: f32,
    pub(crate) dpr: f32,
    pub(crate) needs_render: bool,
    pub(crate) overlay_visible: bool,
    pub(crate) drag: Option<DragResize>,
    pub(crate) render_callback: Option<Function>,
    pub(crate) edit_callback: Option<Function>,
    pub(crate) scroll_container: Option<HtmlDivElement>,
    pub(crate) scroll_spacer: Option<HtmlDivElement>,
    pub(crate) overlay: Option<InputOverlay>,
    pub(crate) frames_rendered: u32,
    pub(crate) last_prep_ms: f64,
    pub(crate) last_draw_ms: f64,
    pub(crate) last_visible_cells: u32,
}

// Timing helper for WASM metrics.
#[cfg(target_arch = "wasm32")]
pub(crate) fn now_ms() -> f64 {
    if let Some(window) = web_sys::window() {
        if let Some(perf) = window.performance() {
            return perf.now();
        }
    }
    js_sys::Date::now()
}

#[cfg(target_arch = "wasm32")]
#[derive(Serialize)]
struct GridMetrics {
    rows_total: u32,
    rows_materialized: u32,
    visible_cells: u32,
    prep_ms: f64,
    draw_ms: f64,
    frames_rendered: u32,
}

/// The main grid component exported to JavaScript
#[wasm_bindgen]
pub struct GridView {
    #[cfg(target_arch = "wasm32")]
    state: Rc<RefCell<SharedState>>,
    #[cfg(target_arch = "wasm32")]
    renderer: Option<CanvasRenderer>,
    #[cfg(target_arch = "wasm32")]
    measurer: Option<CanvasMeasure>,
    #[cfg(target_arch = "wasm32")]
    canvas: Option<HtmlCanvasElement>,
    #[cfg(target_arch = "wasm32")]
    #[allow(dead_code)] // Kept to maintain DOM reference
    flex_wrapper: Option<HtmlDivElement>,
    #[cfg(target_arch = "wasm32")]
    #[allow(dead_code)]
    mouse_closures: Vec<Closure<dyn FnMut(MouseEvent)>>,
    #[cfg(target_arch = "wasm32")]
    #[allow(dead_code)]
    key_closure: Option<Closure<dyn FnMut(KeyboardEvent)>>,
    #[cfg(target_arch = "wasm32")]
    #[allow(dead_code)]
    scroll_closure: Option<Closure<dyn FnMut(web_sys::Event)>>,
    #[cfg(target_arch = "wasm32")]
    #[allow(dead_code)]
    editor_closures: Vec<Closure<dyn FnMut(web_sys::Event)>>,
    #[cfg(target_arch = "wasm32")]
    #[allow(dead_code)]
    editor_key_closure: Option<Closure<dyn FnMut(KeyboardEvent)>>,

    // Non-wasm32 fields (for tests/CLI)
    #[cfg(not(target_arch = "wasm32"))]
    grid: GridState,
    #[cfg(not(target_arch = "wasm32"))]
    scroll_x: f32,
    #[cfg(not(target_arch = "wasm32"))]
    widget_width: f32,
    #[cfg(not(target_arch = "wasm32"))]
    widget_height: f32,
}

// ============================================================================
// WASM32 Implementation
// ============================================================================

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
impl GridView {
    /// Create a new grid instance.
    ///
    /// `options` is a partial configuration object (or `undefined` for
    /// defaults). The grid renders nothing until [`GridView::mount`] builds
    /// its DOM structure.
    #[wasm_bindgen(constructor)]
    pub fn new(options: JsValue) -> Result<GridView, JsValue> {
        console_error_panic_hook::set_once();

        let options: GridOptions = if options.is_undefined() || options.is_null() {
            GridOptions::default()
        } else {
            serde_wasm_bindgen::from_value(options)
                .map_err(|e| JsValue::from_str(&format!("invalid options: {e}")))?
        };

        let state = Rc::new(RefCell::new(SharedState {
            grid: GridState::new(options),
            scroll_x: 0.0,
            widget_width: 0.0,
            widget_height: 0.0,
            dpr: 1.0,
            needs_render: true,
            overlay_visible: false,
            drag: None,
            render_callback: None,
            edit_callback: None,
            scroll_container: None,
            scroll_spacer: None,
            overlay: None,
            frames_rendered: 0,
            last_prep_ms: 0.0,
            last_draw_ms: 0.0,
            last_visible_cells: 0,
        }));

        Ok(GridView {
            state,
            renderer: None,
            measurer: None,
            canvas: None,
            flex_wrapper: None,
            mouse_closures: Vec::new(),
            key_closure: None,
            scroll_closure: None,
            editor_closures: Vec::new(),
            editor_key_closure: None,
        })
    }

    /// Build the grid's DOM inside the container and wire event handlers.
    ///
    /// Creates a canvas sized to the container, a transparent scroll
    /// container on top of it with a spacer div sized to the content (so
    /// native scrollbars have the right range), and the hidden edit input.
    #[wasm_bindgen]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn mount(&mut self, container_id: &str) -> Result<(), JsValue> {
        if self.canvas.is_some() {
            return Err(JsValue::from_str("already mounted"));
        }
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let container = document
            .get_element_by_id(container_id)
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
            .ok_or_else(|| JsValue::from_str(&format!("container #{container_id} not found")))?;

        // dpr is a small ratio; logical sizes are CSS pixel counts
        let dpr = window.device_pixel_ratio() as f32;
        let logical_width = container.client_width().max(1) as f32;
        let logical_height = container.client_height().max(1) as f32;
        let physical_width = (logical_width * dpr).round() as u32;
        let physical_height = (logical_height * dpr).round() as u32;

        let canvas = document
            .create_element("canvas")
            .ok()
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
            .ok_or_else(|| JsValue::from_str("failed to create canvas"))?;
        canvas.set_width(physical_width);
        canvas.set_height(physical_height);

        // Build the scroll scaffold BEFORE wiring mouse events, so the
        // scroll container is available as the event target.
        let (flex_wrapper, scroll_closure) =
            Self::build_scroll_scaffold(&document, &container, &canvas, &self.state);
        let flex_wrapper =
            flex_wrapper.ok_or_else(|| JsValue::from_str("failed to build scroll scaffold"))?;

        let mut renderer =
            CanvasRenderer::new(canvas.clone()).map_err(|e| JsValue::from_str(&e.to_string()))?;
        renderer.resize(physical_width, physical_height, dpr);
        let measurer = CanvasMeasure::new(renderer.context());

        let (accent, font_family) = {
            let s = self.state.borrow();
            (
                s.grid.options.selection_color.clone(),
                s.grid.options.font_family.clone(),
            )
        };
        let overlay = InputOverlay::create(&document, flex_wrapper.as_ref(), &accent, &font_family);
        let overlay_input = overlay.input();

        {
            let mut s = self.state.borrow_mut();
            s.dpr = dpr;
            s.widget_width = logical_width;
            s.widget_height = logical_height;
            s.overlay = Some(overlay);
            s.needs_render = true;
            let _ = Self::sync_viewport_metrics(&mut s);
        }

        // Mouse events go on the scroll container (z-index 1, on top of the
        // canvas). Use the container's own bounding rect for coordinate
        // extraction (not event.target(), which could be the spacer child).
        let event_target: Option<HtmlElement> = {
            let s = self.state.borrow();
            s.scroll_container
                .as_ref()
                .map(|c| c.as_ref() as &HtmlElement)
                .cloned()
        };
        if let Some(target) = event_target {
            // Mouse down
            {
                let state = self.state.clone();
                let container_ref = target.clone();
                let closure = Closure::wrap(Box::new(move |event: MouseEvent| {
                    let rect = container_ref.get_bounding_client_rect();
                    let x = event.client_x() as f32 - rect.left() as f32;
                    let y = event.client_y() as f32 - rect.top() as f32;
                    Self::internal_mouse_down(&state, x, y);
                }) as Box<dyn FnMut(MouseEvent)>);
                target
                    .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref())
                    .ok();
                self.mouse_closures.push(closure);
            }

            // Mouse move (drag resize + resize-handle hover cursor)
            {
                let state = self.state.clone();
                let container_ref = target.clone();
                let closure = Closure::wrap(Box::new(move |event: MouseEvent| {
                    let rect = container_ref.get_bounding_client_rect();
                    let x = event.client_x() as f32 - rect.left() as f32;
                    let y = event.client_y() as f32 - rect.top() as f32;
                    Self::internal_mouse_move(&state, &container_ref, x, y);
                }) as Box<dyn FnMut(MouseEvent)>);
                target
                    .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())
                    .ok();
                self.mouse_closures.push(closure);
            }

            // Mouse up
            {
                let state = self.state.clone();
                let closure = Closure::wrap(Box::new(move |_event: MouseEvent| {
                    Self::internal_mouse_up(&state);
                }) as Box<dyn FnMut(MouseEvent)>);
                target
                    .add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref())
                    .ok();
                self.mouse_closures.push(closure);
            }

            // Double click (begin edit)
            {
                let state = self.state.clone();
                let container_ref = target.clone();
                let closure = Closure::wrap(Box::new(move |event: MouseEvent| {
                    let rect = container_ref.get_bounding_client_rect();
                    let x = event.client_x() as f32 - rect.left() as f32;
                    let y = event.client_y() as f32 - rect.top() as f32;
                    Self::internal_dblclick(&state, x, y);
                }) as Box<dyn FnMut(MouseEvent)>);
                target
                    .add_event_listener_with_callback("dblclick", closure.as_ref().unchecked_ref())
                    .ok();
                self.mouse_closures.push(closure);
            }
        }

        // Keyboard handler on document for navigation and Ctrl+C
        self.key_closure = {
            let state = self.state.clone();
            let closure = Closure::wrap(Box::new(move |event: KeyboardEvent| {
                let key = event.key();
                let ctrl = event.ctrl_key() || event.meta_key();
                if Self::internal_key_down(&state, &key, ctrl, event.shift_key()) {
                    event.prevent_default();
                }
            }) as Box<dyn FnMut(KeyboardEvent)>);
            document
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())
                .ok();
            Some(closure)
        };

        // Edit input events: draft text, Enter/Escape, commit-on-blur
        if let Some(input) = overlay_input {
            {
                let state = self.state.clone();
                let input_ref = input.clone();
                let closure = Closure::wrap(Box::new(move |_event: web_sys::Event| {
                    let _ = state.borrow_mut().grid.input(&input_ref.value());
                }) as Box<dyn FnMut(web_sys::Event)>);
                input
                    .add_event_listener_with_callback("input", closure.as_ref().unchecked_ref())
                    .ok();
                self.editor_closures.push(closure);
            }
            {
                let state = self.state.clone();
                let closure = Closure::wrap(Box::new(move |event: KeyboardEvent| {
                    // Keys typed into the editor must not reach the document
                    // handler.
                    event.stop_propagation();
                    let effects = match event.key().as_str() {
                        "Enter" => state.borrow_mut().grid.enter(),
                        "Escape" => state.borrow_mut().grid.escape(),
                        _ => return,
                    };
                    event.prevent_default();
                    Self::apply_effects(&state, effects);
                }) as Box<dyn FnMut(KeyboardEvent)>);
                input
                    .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())
                    .ok();
                self.editor_key_closure = Some(closure);
            }
            {
                let state = self.state.clone();
                let closure = Closure::wrap(Box::new(move |_event: web_sys::Event| {
                    let effects = { state.borrow_mut().grid.blur() };
                    Self::apply_effects(&state, effects);
                }) as Box<dyn FnMut(web_sys::Event)>);
                input
                    .add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref())
                    .ok();
                self.editor_closures.push(closure);
            }
        }

        self.renderer = Some(renderer);
        self.measurer = Some(measurer);
        self.canvas = Some(canvas);
        self.flex_wrapper = Some(flex_wrapper);
        self.scroll_closure = scroll_closure;

        Self::update_scroll_spacer(&self.state);
        let callback = { self.state.borrow().render_callback.clone() };
        Self::invoke_render_callback(callback);
        Ok(())
    }

    /// Load a table snapshot (rows, ordered columns, identity token).
    ///
    /// A changed identity token resets widths, selection, and scroll; the
    /// same identity keeps them and re-clamps anything the new snapshot
    /// invalidated.
    #[wasm_bindgen]
    pub fn set_table(&mut self, table: JsValue) -> Result<(), JsValue> {
        let table: Table = serde_wasm_bindgen::from_value(table)
            .map_err(|e| JsValue::from_str(&format!("invalid table: {e}")))?;
        let effects = {
            let mut s = self.state.borrow_mut();
            s.grid.set_table(table.normalized())
        };
        Self::update_scroll_spacer(&self.state);
        Self::apply_effects(&self.state, effects);
        Ok(())
    }

    /// Load or clear the comparison snapshot used for diff tinting.
    #[wasm_bindgen]
    pub fn set_comparison(&mut self, table: JsValue) -> Result<(), JsValue> {
        let comparison: Option<Table> = if table.is_undefined() || table.is_null() {
            None
        } else {
            let table: Table = serde_wasm_bindgen::from_value(table)
                .map_err(|e| JsValue::from_str(&format!("invalid table: {e}")))?;
            Some(table.normalized())
        };
        let effects = { self.state.borrow_mut().grid.set_comparison(comparison) };
        Self::apply_effects(&self.state, effects);
        Ok(())
    }

    /// Set the zoom percentage, clamped to 20-200.
    ///
    /// Zoom scales row heights and font sizes; stored column widths stay in
    /// base (100%) pixels.
    #[wasm_bindgen]
    pub fn set_zoom(&mut self, percent: u32) {
        let pct = u16::try_from(percent).unwrap_or(u16::MAX);
        let effects = {
            let mut s = self.state.borrow_mut();
            let mut effects = s.grid.set_zoom(pct);
            // Scaled header height changed, so the body height did too.
            effects.extend(Self::sync_viewport_metrics(&mut s));
            effects
        };
        Self::update_scroll_spacer(&self.state);
        Self::apply_effects(&self.state, effects);
    }

    /// Current zoom percentage.
    #[wasm_bindgen]
    pub fn zoom(&self) -> u32 {
        u32::from(self.state.borrow().grid.viewport.zoom())
    }

    /// Register the host callback invoked once per committed edit as
    /// `(row_index, column_name, new_text)`. Cancelled edits never invoke it.
    #[wasm_bindgen]
    pub fn set_edit_callback(&mut self, callback: Option<Function>) {
        self.state.borrow_mut().edit_callback = callback;
    }

    /// Register a JS callback to request a render on the next animation frame.
    #[wasm_bindgen]
    pub fn set_render_callback(&mut self, callback: Option<Function>) {
        self.state.borrow_mut().render_callback = callback;
    }

    /// Render the current state to the canvas
    #[wasm_bindgen]
    #[allow(clippy::cast_possible_truncation)]
    pub fn render(&mut self) -> Result<(), JsValue> {
        // Sync scroll position from the native scroll container (if mounted)
        self.sync_scroll_from_container();

        let Some(renderer) = self.renderer.as_mut() else {
            return Ok(());
        };
        let plan = {
            let mut s = self.state.borrow_mut();
            if !s.needs_render {
                return Ok(());
            }
            let prep_start = now_ms();
            let plan = build_frame(&s.grid, s.scroll_x, s.widget_width);
            s.last_prep_ms = now_ms() - prep_start;
            plan
        };

        let draw_start = now_ms();
        renderer
            .render(&plan)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        {
            let mut s = self.state.borrow_mut();
            s.last_draw_ms = now_ms() - draw_start;
            s.last_visible_cells = plan.cells.len() as u32;
            s.frames_rendered = s.frames_rendered.saturating_add(1);
            s.needs_render = false;
        }
        // Keep the edit input glued to its cell as the view scrolls.
        Self::position_overlay(&self.state);
        Ok(())
    }

    /// Resize the viewport (dimensions in CSS pixels).
    ///
    /// The canvas backing store is scaled by the current devicePixelRatio.
    #[wasm_bindgen]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn resize(&mut self, width: u32, height: u32) {
        let dpr = web_sys::window()
            .map(|w| w.device_pixel_ratio())
            .unwrap_or(1.0) as f32;
        let logical_width = width as f32;
        let logical_height = height as f32;
        let physical_width = (logical_width * dpr).round() as u32;
        let physical_height = (logical_height * dpr).round() as u32;

        let effects = {
            let mut s = self.state.borrow_mut();
            s.dpr = dpr;
            s.widget_width = logical_width;
            s.widget_height = logical_height;
            s.needs_render = true;
            Self::sync_viewport_metrics(&mut s)
        };
        if let Some(renderer) = self.renderer.as_mut() {
            renderer.resize(physical_width, physical_height, dpr);
        }
        Self::apply_effects(&self.state, effects);
    }

    /// Fit column widths to the header and sampled cell content.
    ///
    /// Measures through the canvas context; before `mount` this is a no-op.
    #[wasm_bindgen]
    pub fn auto_size_columns(&mut self) {
        let Some(measurer) = self.measurer.as_mut() else {
            return;
        };
        let effects = {
            let mut s = self.state.borrow_mut();
            // Widths are stored at base (100%) scale, so measure at the
            // base font size regardless of zoom.
            let font = format!(
                "{}px {}",
                s.grid.options.base_font_px, s.grid.options.font_family
            );
            let grid = &mut s.grid;
            grid.columns.auto_fit(&grid.table, Some(measurer), &font, None);
            vec![Effect::Redraw]
        };
        Self::update_scroll_spacer(&self.state);
        Self::apply_effects(&self.state, effects);
    }

    /// The selected or editing cell as `[row, col]`, if any.
    #[wasm_bindgen]
    #[allow(clippy::cast_possible_truncation)]
    pub fn selected_cell(&self) -> Option<Vec<u32>> {
        let s = self.state.borrow();
        s.grid
            .focus
            .cell()
            .map(|(row, col)| vec![row as u32, col as u32])
    }

    /// Total scaled content height in CSS pixels.
    #[wasm_bindgen]
    pub fn content_height(&self) -> f32 {
        self.state.borrow().grid.content_height()
    }

    /// Snapshot of render timing and windowing metrics for host diagnostics.
    #[wasm_bindgen]
    #[allow(clippy::cast_possible_truncation)]
    pub fn metrics(&self) -> Result<JsValue, JsValue> {
        let s = self.state.borrow();
        let window = s
            .grid
            .viewport
            .window(s.grid.table.row_count(), s.grid.row_height());
        let metrics = GridMetrics {
            rows_total: s.grid.table.row_count() as u32,
            rows_materialized: window.len() as u32,
            visible_cells: s.last_visible_cells,
            prep_ms: s.last_prep_ms,
            draw_ms: s.last_draw_ms,
            frames_rendered: s.frames_rendered,
        };
        serde_wasm_bindgen::to_value(&metrics)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
    }
}

// Private helpers (wasm32)
#[cfg(target_arch = "wasm32")]
impl GridView {
    /// Wrap the canvas in a flex column with a native scroll area.
    ///
    /// The scroll container sits on top of the canvas (transparent,
    /// z-index 1) so native scrollbars stay visible and wheel events land
    /// on it; the spacer div sized to the content creates the scroll range.
    #[allow(clippy::cast_possible_truncation)]
    fn build_scroll_scaffold(
        document: &Document,
        container: &HtmlElement,
        canvas: &HtmlCanvasElement,
        state: &Rc<RefCell<SharedState>>,
    ) -> (
        Option<HtmlDivElement>,
        Option<Closure<dyn FnMut(web_sys::Event)>>,
    ) {
        let create_div = || -> Option<HtmlDivElement> {
            document
                .create_element("div")
                .ok()
                .and_then(|el| el.dyn_into::<HtmlDivElement>().ok())
        };
        let Some(flex_wrapper) = create_div() else {
            return (None, None);
        };
        let Some(scroll_container) = create_div() else {
            return (None, None);
        };
        let Some(spacer) = create_div() else {
            return (None, None);
        };

        // Ensure the container can host absolute children
        let container_style = container.style();
        if container_style
            .get_property_value("position")
            .unwrap_or_default()
            .is_empty()
        {
            let _ = container_style.set_property("position", "relative");
        }

        // Flex wrapper: fills the container completely
        let wrapper_style = flex_wrapper.style();
        let _ = wrapper_style.set_property("display", "flex");
        let _ = wrapper_style.set_property("flex-direction", "column");
        let _ = wrapper_style.set_property("width", "100%");
        let _ = wrapper_style.set_property("height", "100%");
        let _ = wrapper_style.set_property("position", "absolute");
        let _ = wrapper_style.set_property("top", "0");
        let _ = wrapper_style.set_property("left", "0");

        // Scroll container: fills the wrapper, handles scrolling. Sits on
        // top of the canvas (z-index 1) with a transparent background so
        // the canvas underneath shows through.
        let container_style = scroll_container.style();
        let _ = container_style.set_property("flex", "1");
        let _ = container_style.set_property("overflow", "auto");
        let _ = container_style.set_property("position", "relative");
        let _ = container_style.set_property("z-index", "1");
        let _ = container_style.set_property("background", "transparent");
        let _ = container_style.set_property("min-height", "0"); // Important for flex children
        // Mark so hosts can find the scroll container for sizing
        let _ = scroll_container.set_attribute("data-gridview-scroll", "");

        // Spacer: sized to content to create the scroll range
        let spacer_style = spacer.style();
        let _ = spacer_style.set_property("position", "absolute");
        let _ = spacer_style.set_property("top", "0");
        let _ = spacer_style.set_property("left", "0");
        let _ = spacer_style.set_property("width", "0px");
        let _ = spacer_style.set_property("height", "0px");

        // Canvas: viewport-sized, behind the scroll container (z-index 0)
        let canvas_style = canvas.style();
        let _ = canvas_style.set_property("position", "absolute");
        let _ = canvas_style.set_property("top", "0");
        let _ = canvas_style.set_property("left", "0");
        let _ = canvas_style.set_property("pointer-events", "none");
        let _ = canvas_style.set_property("z-index", "0");

        let _ = flex_wrapper.append_child(canvas);
        let _ = scroll_container.append_child(&spacer);
        let _ = flex_wrapper.append_child(&scroll_container);
        let _ = container.append_child(&flex_wrapper);

        // Scroll event: pull the container position into the viewport state
        // and schedule a redraw through the host render callback.
        let state_for_scroll = state.clone();
        let container_for_scroll = scroll_container.clone();
        let scroll_closure = Closure::wrap(Box::new(move |_event: web_sys::Event| {
            let effects = {
                let mut s = state_for_scroll.borrow_mut();
                s.scroll_x = scroll_left_f64(&container_for_scroll) as f32;
                s.grid
                    .set_scroll(scroll_top_f64(&container_for_scroll) as f32)
            };
            Self::apply_effects(&state_for_scroll, effects);
        }) as Box<dyn FnMut(web_sys::Event)>);
        let _ = scroll_container
            .add_event_listener_with_callback("scroll", scroll_closure.as_ref().unchecked_ref());

        {
            let mut s = state.borrow_mut();
            s.scroll_container = Some(scroll_container);
            s.scroll_spacer = Some(spacer);
        }

        (Some(flex_wrapper), Some(scroll_closure))
    }

    /// Push the widget body height (below the scaled header) into the
    /// viewport.
    fn sync_viewport_metrics(s: &mut SharedState) -> Vec<Effect> {
        let scale = s.grid.viewport.scale();
        let header = if s.grid.options.show_headers {
            s.grid.options.header_height * scale
        } else {
            0.0
        };
        s.grid.set_viewport_height((s.widget_height - header).max(0.0))
    }

    /// Resize the spacer div to the scaled content, so the native
    /// scrollbar range tracks the table.
    fn update_scroll_spacer(state: &Rc<RefCell<SharedState>>) {
        // Compute dimensions while holding the borrow, then drop before DOM
        // mutations. Style changes here can fire a synchronous scroll event
        // whose closure needs borrow_mut().
        let (spacer, width, height) = {
            let s = state.borrow();
            let Some(spacer) = s.scroll_spacer.clone() else {
                return;
            };
            let scale = s.grid.viewport.scale();
            let header = if s.grid.options.show_headers {
                s.grid.options.header_height * scale
            } else {
                0.0
            };
            (
                spacer,
                s.grid.columns.total_width(scale),
                header + s.grid.content_height(),
            )
        };
        let style = spacer.style();
        let _ = style.set_property("width", &format!("{width}px"));
        let _ = style.set_property("height", &format!("{height}px"));
    }

    /// Sync viewport scroll from the native scroll container
    #[allow(clippy::cast_possible_truncation)]
    fn sync_scroll_from_container(&self) {
        let container = { self.state.borrow().scroll_container.clone() };
        let Some(container) = container else {
            return;
        };
        let top = scroll_top_f64(&container) as f32;
        let left = scroll_left_f64(&container) as f32;
        let mut s = self.state.borrow_mut();
        s.scroll_x = left;
        let _ = s.grid.set_scroll(top);
    }
}

// ============================================================================
// Non-WASM32 Implementation (for testing/CLI)
// ============================================================================

#[cfg(not(target_arch = "wasm32"))]
impl GridView {
    /// Create a new grid (non-wasm version for testing)
    #[must_use]
    pub fn new_test(width: u32, height: u32) -> Self {
        Self::with_options(width, height, GridOptions::default())
    }

    /// Create a new grid with explicit options (non-wasm).
    #[must_use]
    pub fn with_options(width: u32, height: u32, options: GridOptions) -> Self {
        let mut view = GridView {
            grid: GridState::new(options),
            scroll_x: 0.0,
            widget_width: width as f32,
            widget_height: height as f32,
        };
        view.sync_viewport_metrics();
        view
    }

    /// Load a table snapshot.
    pub fn set_table(&mut self, table: crate::types::Table) -> Vec<Effect> {
        self.grid.set_table(table.normalized())
    }

    /// Load or clear the comparison snapshot.
    pub fn set_comparison(&mut self, table: Option<crate::types::Table>) -> Vec<Effect> {
        self.grid.set_comparison(table.map(crate::types::Table::normalized))
    }

    /// Set the zoom percentage, clamped to 20-200.
    pub fn set_zoom(&mut self, percent: u16) -> Vec<Effect> {
        let mut effects = self.grid.set_zoom(percent);
        effects.extend(self.sync_viewport_metrics());
        effects
    }

    /// Scroll the body to a vertical offset.
    pub fn set_scroll(&mut self, offset: f32) -> Vec<Effect> {
        self.grid.set_scroll(offset)
    }

    /// Scroll the body to a horizontal offset.
    pub fn set_scroll_x(&mut self, offset: f32) {
        self.scroll_x = offset.max(0.0);
    }

    /// Build the frame plan for the current state.
    #[must_use]
    pub fn frame(&self) -> FramePlan {
        build_frame(&self.grid, self.scroll_x, self.widget_width)
    }

    /// The interaction state, for driving transitions directly.
    pub fn grid(&self) -> &GridState {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut GridState {
        &mut self.grid
    }

    fn sync_viewport_metrics(&mut self) -> Vec<Effect> {
        let scale = self.grid.viewport.scale();
        let header = if self.grid.options.show_headers {
            self.grid.options.header_height * scale
        } else {
            0.0
        };
        self.grid
            .set_viewport_height((self.widget_height - header).max(0.0))
    }
}
