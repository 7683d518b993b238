//! Immediate-mode windows, panels and widgets for imkit
//!
//! A [`Context`] owns every piece of persistent UI state. Each frame the host
//! feeds input between [`Context::input_begin`] and [`Context::input_end`],
//! declares its windows and widgets between [`Context::begin`] and
//! [`Context::end`], walks the resulting [`Context::commands`] and finally
//! calls [`Context::clear`] to collect whatever was not touched.

mod chart;
mod clipboard;
mod config;
mod context;
mod group;
mod input;
mod layout;
mod page;
mod panel;
mod popup;
mod stack;
mod style;
mod tree;
mod widgets;
mod window;

#[cfg(test)]
mod test_support;

pub use chart::*;
pub use clipboard::*;
pub use config::*;
pub use context::*;
pub use input::*;
pub use page::{PanelId, TableId, WindowId};
pub use panel::{Panel, PanelType};
pub use popup::*;
pub use stack::*;
pub use style::*;
pub use tree::*;
pub use widgets::{WidgetLayoutState, WidgetStates};
pub use window::*;

pub mod prelude {
    pub use crate::chart::{ChartEvent, ChartType};
    pub use crate::clipboard::Clipboard;
    pub use crate::config::{Config, MemoryConfig};
    pub use crate::context::Context;
    pub use crate::input::{Key, MouseButton};
    pub use crate::popup::PopupKind;
    pub use crate::stack::ButtonBehavior;
    pub use crate::style::{Style, Symbol, TextAlign, Theme};
    pub use crate::tree::TreeType;
    pub use crate::window::{CollapseState, ShowState, WindowFlags};
    pub use imkit_layout::{LayoutFormat, Scroll};
}
