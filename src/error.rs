//! Structured error types for gridview.
//!
//! Replaces `Result<T, String>` throughout the codebase with proper error types.

/// All errors that can occur in gridview state handling and rendering.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    /// Malformed table snapshot from the host.
    #[error("Table snapshot: {0}")]
    Table(String),

    /// JSON (de)serialization error at the host boundary.
    #[error("Snapshot JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// DOM construction or lookup failure.
    #[error("DOM: {0}")]
    Dom(String),

    /// Rendering error.
    #[error("Render error: {0}")]
    Render(String),

    /// Host callback invocation failure.
    #[error("Callback error: {0}")]
    Callback(String),

    /// I/O error (CLI only).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Catch-all for string errors.
    #[error("{0}")]
    Other(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GridError>;

impl From<String> for GridError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for GridError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<GridError> for wasm_bindgen::JsValue {
    fn from(e: GridError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}
