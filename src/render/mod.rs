//! Rendering: pure frame composition plus the Canvas 2D backend.
//!
//! This module provides:
//! - Backend-agnostic frame plans and the rendering trait
//! - The frame planner (native-testable, no DOM types)
//! - Canvas 2D backend and text measurement (wasm32 only)

pub mod backend;
mod plan;

#[cfg(target_arch = "wasm32")]
mod canvas;

// Re-export commonly used types
pub use backend::{CellPlan, FramePlan, FrameTheme, HeaderCell, RenderBackend, SelectionRect};
pub use plan::build_frame;

#[cfg(target_arch = "wasm32")]
pub use canvas::{CanvasMeasure, CanvasRenderer};
