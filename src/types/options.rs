use serde::{Deserialize, Serialize};

/// Horizontal direction mapping for arrow-key navigation.
///
/// The state machine itself is direction-agnostic; this decides which of
/// ArrowLeft/ArrowRight decrements vs increments the column index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Ltr,
    Rtl,
}

/// Visual and behavioral configuration for the grid.
///
/// Hosts pass a partial object; every omitted field falls back to the
/// default below.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GridOptions {
    /// Horizontal arrow mapping (LTR default; RTL swaps left/right)
    pub direction: Direction,
    /// Whether the column header strip is drawn
    pub show_headers: bool,
    /// Height of the column header strip in pixels (unscaled)
    pub header_height: f32,
    /// Row height in pixels at 100% zoom
    pub base_row_height: f32,
    /// Font size in pixels at 100% zoom
    pub base_font_px: f32,
    /// Font family for cells and headers
    pub font_family: String,
    /// Cell background color
    pub background_color: String,
    /// Cell text color
    pub text_color: String,
    /// Grid line color
    pub grid_color: String,
    /// Header strip background color
    pub header_bg_color: String,
    /// Header label color
    pub header_text_color: String,
    /// Active cell border color
    pub selection_color: String,
    /// Background tint for rows absent from the comparison table
    pub diff_new_row_color: String,
    /// Background tint for cells whose value differs from the comparison
    pub diff_changed_color: String,
    /// Placeholder text drawn when the table has zero rows
    pub empty_state_text: String,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            direction: Direction::Ltr,
            show_headers: true,
            header_height: 26.0,
            base_row_height: 24.0,
            base_font_px: 13.0,
            font_family: "sans-serif".to_string(),
            background_color: "#FFFFFF".to_string(),
            text_color: "#1F1F1F".to_string(),
            grid_color: "#E0E0E0".to_string(),
            header_bg_color: "#F3F3F3".to_string(),
            header_text_color: "#595959".to_string(),
            selection_color: "#4285F4".to_string(),
            diff_new_row_color: "#E6F4EA".to_string(),
            diff_changed_color: "#FEF7E0".to_string(),
            empty_state_text: "No data".to_string(),
        }
    }
}
