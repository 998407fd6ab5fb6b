//! DOM input overlay for cell editing.
//!
//! A single absolutely positioned `<input>` carries text entry for the
//! active edit session. It is created once at mount inside the flex
//! wrapper (not the scroll container, so content scrolling does not drag
//! it), shown over the editing cell, and parked offscreen when that cell
//! scrolls out of view. Hiding it instead would blur the input, and blur
//! commits the edit.

use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, HtmlInputElement};

use crate::render::backend::SelectionRect;

/// Overlay input element for in-place cell editing.
pub(crate) struct InputOverlay {
    input: Option<HtmlInputElement>,
}

impl InputOverlay {
    /// Create the hidden `<input>` inside `parent`.
    ///
    /// `accent` is the border color (the selection color, so the editor
    /// reads as the selected cell) and `font_family` matches the canvas
    /// text.
    pub(crate) fn create(
        document: &Document,
        parent: &HtmlElement,
        accent: &str,
        font_family: &str,
    ) -> Self {
        let input = document
            .create_element("input")
            .ok()
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok());
        if let Some(input) = &input {
            input.set_type("text");
            let style = input.style();
            let _ = style.set_property("position", "absolute");
            let _ = style.set_property("z-index", "1000");
            let _ = style.set_property("box-sizing", "border-box");
            let _ = style.set_property("border", &format!("2px solid {accent}"));
            let _ = style.set_property("outline", "none");
            let _ = style.set_property("padding", "0 4px");
            let _ = style.set_property("font-family", font_family);
            let _ = style.set_property("background", "#fff");
            let _ = style.set_property("display", "none");
            let _ = parent.append_child(input);
        }
        InputOverlay { input }
    }

    /// Handle to the element, for wiring listeners and borrow-free style
    /// updates.
    pub(crate) fn input(&self) -> Option<HtmlInputElement> {
        self.input.clone()
    }
}

impl Drop for InputOverlay {
    fn drop(&mut self) {
        if let Some(input) = &self.input {
            if let Some(parent) = input.parent_node() {
                let _ = parent.remove_child(input);
            }
        }
    }
}

/// Show the input over `rect` with the draft text, focused and selected.
pub(crate) fn show_input(input: &HtmlInputElement, rect: &SelectionRect, value: &str, font_px: f32) {
    let style = input.style();
    let _ = style.set_property("display", "block");
    let _ = style.set_property("font-size", &format!("{font_px}px"));
    place_input(input, rect);
    input.set_value(value);
    let _ = input.focus();
    input.select();
}

/// Move the input to `rect` without touching its value or focus.
pub(crate) fn place_input(input: &HtmlInputElement, rect: &SelectionRect) {
    let style = input.style();
    let _ = style.set_property("left", &format!("{}px", rect.x));
    let _ = style.set_property("top", &format!("{}px", rect.y));
    let _ = style.set_property("width", &format!("{}px", rect.width));
    let _ = style.set_property("height", &format!("{}px", rect.height));
}

/// Park the input far offscreen, keeping focus so the session stays open.
pub(crate) fn park_input(input: &HtmlInputElement) {
    let _ = input.style().set_property("top", "-10000px");
}

/// Hide the input and release focus.
pub(crate) fn hide_input(input: &HtmlInputElement) {
    let _ = input.style().set_property("display", "none");
    let _ = input.blur();
}
