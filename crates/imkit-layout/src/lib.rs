//! Row-based panel layout engine for imkit
//!
//! A [`PanelLayout`] is the cursor of one panel for one frame. Rows are
//! declared with one of the [`LayoutType`] modes and widgets then pull their
//! bounds from it left to right, wrapping to a new row when the declared
//! column count is used up.

mod panel;
mod row;

pub use panel::*;
pub use row::*;

pub mod prelude {
    pub use crate::panel::{Allocation, PanelLayout, RowStart, Scroll};
    pub use crate::row::{LayoutFormat, LayoutType, RowLayout};
}
