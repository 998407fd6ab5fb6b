//! gridview - virtualized data grid for the web
//!
//! Renders host-supplied table snapshots in the browser via WebAssembly and
//! Canvas 2D:
//! - Row windowing over native scroll (large tables stay smooth)
//! - Column layout with drag resize and content auto-fit
//! - Keyboard navigation, in-place cell editing, clipboard copy
//! - Positional diff tinting against a comparison snapshot
//! - Zoom from 20% to 200%
//!
//! The grid never mutates the snapshot it is given: edits are reported to
//! the host through a callback and land in the next snapshot the host
//! pushes down.
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { GridView } from 'gridview';
//! await init();
//! const grid = new GridView({ direction: 'ltr' });
//! grid.mount('container');
//! grid.set_render_callback(() => requestAnimationFrame(() => grid.render()));
//! grid.set_edit_callback((row, column, text) => applyEdit(row, column, text));
//! grid.set_table(snapshot);
//! grid.render();
//! ```

pub mod diff;
pub mod error;
pub mod grid;
pub mod layout;
pub mod measure;
pub mod render;
pub mod types;

use wasm_bindgen::prelude::*;

// Re-export the main grid struct
pub use grid::{ArrowKey, Effect, Focus, GridState, GridView};

pub use types::*;

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
