//! Event handling for the grid: pointer, keyboard, and effect application.
//!
//! Handlers are static `pub(crate)` methods taking the shared state `Rc`,
//! called from the closures wired in `mod.rs`. Each one extracts what it
//! needs under a short borrow, drops the borrow, then touches the DOM and
//! invokes host callbacks. DOM calls can re-enter synchronously (setting
//! `scrollTop` fires a scroll event, `focus()` fires blur on the old
//! target), so nothing here holds a borrow across them.

#[cfg(target_arch = "wasm32")]
use std::cell::RefCell;
#[cfg(target_arch = "wasm32")]
use std::rc::Rc;

#[cfg(target_arch = "wasm32")]
use js_sys::Function;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;
#[cfg(target_arch = "wasm32")]
use web_sys::HtmlElement;

#[cfg(target_arch = "wasm32")]
use super::input;
#[cfg(target_arch = "wasm32")]
use super::{ArrowKey, Effect, GridView, SharedState};
#[cfg(target_arch = "wasm32")]
use crate::render::backend::SelectionRect;

/// What a pointer event landed on.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum HitTarget {
    /// A body cell at (row, col)
    Cell(usize, usize),
    /// A column header
    Header(usize),
    /// The resize handle on a column's right edge
    ResizeHandle(usize),
    /// Nothing interactive
    Miss,
}

#[cfg(target_arch = "wasm32")]
impl GridView {
    /// Handle mouse down: open a resize drag on a handle, otherwise select
    /// the cell under the pointer. Coordinates are viewport-relative.
    pub(crate) fn internal_mouse_down(state: &Rc<RefCell<SharedState>>, x: f32, y: f32) {
        let effects = {
            let mut s = state.borrow_mut();
            match Self::hit_test(&s, x, y) {
                HitTarget::ResizeHandle(col) => {
                    let content_x = x + s.scroll_x;
                    s.drag = s.grid.columns.begin_resize(col, content_x);
                    Vec::new()
                }
                HitTarget::Cell(row, col) => s.grid.click_cell(row, col),
                HitTarget::Header(_) | HitTarget::Miss => Vec::new(),
            }
        };
        Self::apply_effects(state, effects);
    }

    /// Handle mouse move: feed an active resize drag, or swap the cursor
    /// when hovering a resize handle.
    pub(crate) fn internal_mouse_move(
        state: &Rc<RefCell<SharedState>>,
        element: &HtmlElement,
        x: f32,
        y: f32,
    ) {
        let (resizing, over_handle) = {
            let mut s = state.borrow_mut();
            let scale = s.grid.viewport.scale();
            let content_x = x + s.scroll_x;
            if let Some(drag) = s.drag {
                drag.update(&mut s.grid.columns, content_x, scale);
                s.needs_render = true;
                (true, true)
            } else {
                let over = matches!(Self::hit_test(&s, x, y), HitTarget::ResizeHandle(_));
                (false, over)
            }
        };
        let cursor = if over_handle { "col-resize" } else { "default" };
        let _ = element.style().set_property("cursor", cursor);
        if resizing {
            Self::update_scroll_spacer(state);
            let callback = { state.borrow().render_callback.clone() };
            Self::invoke_render_callback(callback);
        }
    }

    /// Handle mouse up: close any resize drag.
    pub(crate) fn internal_mouse_up(state: &Rc<RefCell<SharedState>>) {
        state.borrow_mut().drag = None;
    }

    /// Handle double click: begin editing the cell under the pointer.
    pub(crate) fn internal_dblclick(state: &Rc<RefCell<SharedState>>, x: f32, y: f32) {
        let effects = {
            let mut s = state.borrow_mut();
            match Self::hit_test(&s, x, y) {
                HitTarget::Cell(row, col) => s.grid.double_click_cell(row, col),
                _ => Vec::new(),
            }
        };
        Self::apply_effects(state, effects);
    }

    /// Handle a document-level key press. Returns true when the grid
    /// consumed the key and the browser default should be suppressed.
    pub(crate) fn internal_key_down(
        state: &Rc<RefCell<SharedState>>,
        key: &str,
        ctrl: bool,
        shift: bool,
    ) -> bool {
        if ctrl && key.eq_ignore_ascii_case("c") {
            return Self::internal_copy(state);
        }
        let (effects, handled) = {
            let mut s = state.borrow_mut();
            if s.grid.focus.is_editing() {
                // Keys inside an edit session arrive through the input
                // element's own handler, never here.
                return false;
            }
            let selected = s.grid.focus.cell().is_some();
            let effects = match key {
                "ArrowUp" => s.grid.arrow(ArrowKey::Up),
                "ArrowDown" => s.grid.arrow(ArrowKey::Down),
                "ArrowLeft" => s.grid.arrow(ArrowKey::Left),
                "ArrowRight" => s.grid.arrow(ArrowKey::Right),
                "Tab" => s.grid.tab(shift),
                "Enter" => s.grid.enter(),
                _ => return false,
            };
            (effects, selected)
        };
        Self::apply_effects(state, effects);
        handled
    }

    /// Map viewport-relative coordinates to a grid target.
    pub(crate) fn hit_test(s: &SharedState, x: f32, y: f32) -> HitTarget {
        if x < 0.0 || y < 0.0 {
            return HitTarget::Miss;
        }
        let grid = &s.grid;
        let scale = grid.viewport.scale();
        let header_h = Self::header_height(s);
        // Horizontal hit tests happen in content space: the canvas paints
        // columns shifted by scroll_x, so the pointer position maps back by
        // adding it.
        let content_x = x + s.scroll_x;
        if y < header_h {
            if let Some(col) = grid.columns.resize_handle_at(content_x, scale) {
                return HitTarget::ResizeHandle(col);
            }
            return match grid.columns.col_at_x(content_x, scale) {
                Some(col) => HitTarget::Header(col),
                None => HitTarget::Miss,
            };
        }
        let Some(row) =
            grid.viewport
                .row_at(y - header_h, grid.row_height(), grid.table.row_count())
        else {
            return HitTarget::Miss;
        };
        match grid.columns.col_at_x(content_x, scale) {
            Some(col) => HitTarget::Cell(row, col),
            None => HitTarget::Miss,
        }
    }

    /// Apply the effects returned by a state transition.
    ///
    /// Host callbacks and DOM handles are cloned out first so no borrow is
    /// held while they run.
    #[allow(clippy::cast_possible_truncation)]
    pub(crate) fn apply_effects(state: &Rc<RefCell<SharedState>>, effects: Vec<Effect>) {
        if effects.is_empty() {
            return;
        }
        let (container, edit_callback, render_callback) = {
            let s = state.borrow();
            (
                s.scroll_container.clone(),
                s.edit_callback.clone(),
                s.render_callback.clone(),
            )
        };
        let mut redraw = false;
        for effect in effects {
            match effect {
                Effect::CommitEdit { row, column, text } => {
                    if let Some(callback) = &edit_callback {
                        let _ = callback.call3(
                            &JsValue::NULL,
                            &JsValue::from_f64(row as f64),
                            &JsValue::from_str(&column),
                            &JsValue::from_str(&text),
                        );
                    }
                }
                Effect::SyncScroll(offset) => {
                    if let Some(container) = &container {
                        // Fires a synchronous scroll event; its closure
                        // takes borrow_mut(), so none is held here.
                        container.set_scroll_top(offset.round() as i32);
                    }
                }
                Effect::Redraw => redraw = true,
            }
        }
        if redraw {
            state.borrow_mut().needs_render = true;
            Self::sync_overlay(state);
            Self::invoke_render_callback(render_callback);
        }
    }

    /// Show or hide the edit input to match the focus state.
    ///
    /// Only transitions touch the element: re-showing an already visible
    /// input would stomp the text the user is typing.
    pub(crate) fn sync_overlay(state: &Rc<RefCell<SharedState>>) {
        let (input_el, show, rect, draft, font_px) = {
            let mut s = state.borrow_mut();
            let editing = s.grid.focus.is_editing();
            if editing == s.overlay_visible {
                return;
            }
            s.overlay_visible = editing;
            let Some(input_el) = s.overlay.as_ref().and_then(|o| o.input()) else {
                return;
            };
            let draft = if editing {
                s.grid.focused_cell_text().unwrap_or_default()
            } else {
                String::new()
            };
            let font_px = s.grid.options.base_font_px * s.grid.viewport.scale();
            (input_el, editing, Self::focused_cell_rect(&s), draft, font_px)
        };
        if show {
            if let Some(rect) = rect {
                input::show_input(&input_el, &rect, &draft, font_px);
            }
        } else {
            input::hide_input(&input_el);
        }
    }

    /// Reposition a visible edit input after a render.
    ///
    /// When the editing cell scrolls out of view the input is parked
    /// offscreen instead of hidden: hiding would blur it, and blur commits.
    pub(crate) fn position_overlay(state: &Rc<RefCell<SharedState>>) {
        let (input_el, placement) = {
            let s = state.borrow();
            if !s.overlay_visible {
                return;
            }
            let Some(input_el) = s.overlay.as_ref().and_then(|o| o.input()) else {
                return;
            };
            let header_h = Self::header_height(&s);
            let placement = Self::focused_cell_rect(&s).map(|rect| {
                let visible = rect.y + rect.height > header_h && rect.y < s.widget_height;
                (rect, visible)
            });
            (input_el, placement)
        };
        let Some((rect, visible)) = placement else {
            return;
        };
        if visible {
            input::place_input(&input_el, &rect);
        } else {
            input::park_input(&input_el);
        }
    }

    /// Viewport-relative rectangle of the focused cell, if any.
    pub(crate) fn focused_cell_rect(s: &SharedState) -> Option<SelectionRect> {
        let (row, col) = s.grid.focus.cell()?;
        let scale = s.grid.viewport.scale();
        let row_height = s.grid.row_height();
        Some(SelectionRect {
            x: s.grid.columns.x_of(col, scale) - s.scroll_x,
            y: Self::header_height(s) + (row as f32) * row_height - s.grid.viewport.scroll_offset,
            width: s.grid.columns.width_of(col, scale),
            height: row_height,
        })
    }

    /// Scaled header height, zero when headers are hidden.
    pub(crate) fn header_height(s: &SharedState) -> f32 {
        if s.grid.options.show_headers {
            s.grid.options.header_height * s.grid.viewport.scale()
        } else {
            0.0
        }
    }

    /// Invoke the render callback if one is registered.
    pub(crate) fn invoke_render_callback(callback: Option<Function>) {
        if let Some(callback) = callback {
            let _ = callback.call0(&JsValue::NULL);
        }
    }
}
