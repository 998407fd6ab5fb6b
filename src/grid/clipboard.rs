//! Clipboard copy for the grid.
//!
//! Ctrl+C (Cmd+C on macOS) copies the focused cell's display text through
//! the async Clipboard API, fire and forget. While editing, the live draft
//! is what gets copied.

use std::cell::RefCell;
use std::rc::Rc;

use super::{GridView, SharedState};

impl GridView {
    /// Copy the focused cell's text. Returns whether anything was copied.
    pub(crate) fn internal_copy(state: &Rc<RefCell<SharedState>>) -> bool {
        let text = { state.borrow().grid.focused_cell_text() };
        let Some(text) = text else {
            return false;
        };
        Self::copy_to_clipboard_internal(&Self::escape_cell_value(&text));
        true
    }

    /// Escape a cell value for clipboard text.
    ///
    /// Values containing tabs, newlines, or quotes get quote-wrapped with
    /// internal quotes doubled, so multi-cell pastes into spreadsheet apps
    /// survive.
    fn escape_cell_value(value: &str) -> String {
        if value.contains('\t')
            || value.contains('\n')
            || value.contains('\r')
            || value.contains('"')
        {
            format!("\"{}\"", value.replace('"', "\"\""))
        } else {
            value.to_string()
        }
    }

    /// Write text to the system clipboard (fire-and-forget)
    fn copy_to_clipboard_internal(text: &str) {
        if let Some(window) = web_sys::window() {
            let clipboard = window.navigator().clipboard();
            let _ = clipboard.write_text(text);
        }
    }
}
