//! Data types for the grid component.

mod options;
mod table;

pub use options::*;
pub use table::*;
