//! Collapsible tree tabs and nodes
//!
//! A tree header toggles between minimized and maximized when clicked. Open
//! trees indent every following widget until the matching [`Context::tree_pop`].
//! The collapse state of hashed trees lives in the window's state table, so
//! it survives across frames without the caller storing it.

use crate::context::Context;
use crate::stack::ButtonBehavior;
use crate::style::{StyleItem, TextAlign};
use crate::widgets::{button_behavior, TextPaint, WidgetLayoutState, WidgetStates};
use crate::window::{CollapseState, WindowFlags};
use imkit_core::hash::{self, Hash};
use imkit_graphics::{Color, Rect, Vec2};
use std::panic::Location;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TreeType {
    /// Bare header without a background, for nested entries.
    Node,
    /// Header with a filled background, for top-level sections.
    Tab,
}

impl CollapseState {
    fn to_value(self) -> u32 {
        match self {
            CollapseState::Minimized => 0,
            CollapseState::Maximized => 1,
        }
    }

    fn from_value(value: u32) -> Self {
        if value == 0 {
            CollapseState::Minimized
        } else {
            CollapseState::Maximized
        }
    }

    fn toggled(self) -> Self {
        match self {
            CollapseState::Minimized => CollapseState::Maximized,
            CollapseState::Maximized => CollapseState::Minimized,
        }
    }
}

impl Context {
    /// Tree identified by its call site and title.
    #[track_caller]
    pub fn tree_push(&mut self, kind: TreeType, title: &str, initial: CollapseState) -> bool {
        let seed = hash::location_hash(Location::caller(), 0);
        self.tree_push_hashed(kind, title, initial, title.as_bytes(), seed)
    }

    /// Tree identified by its call site and `id`; use inside loops.
    #[track_caller]
    pub fn tree_push_id(&mut self, kind: TreeType, title: &str, initial: CollapseState, id: u32) -> bool {
        let seed = hash::location_hash(Location::caller(), id);
        self.tree_push_hashed(kind, title, initial, title.as_bytes(), seed)
    }

    /// Tree identified by `key` hashed with `seed`.
    pub fn tree_push_hashed(&mut self, kind: TreeType, title: &str, initial: CollapseState, key: &[u8], seed: u32) -> bool {
        let tree_hash: Hash = hash::murmur3_32(key, seed);
        let Some(win) = self.current else {
            debug_assert!(false, "tree pushed outside of a window");
            return false;
        };
        let slot = match self.find_slot(win, tree_hash) {
            Some(slot) => Some(slot),
            None => self.add_slot(win, tree_hash, initial.to_value()),
        };
        let mut state = slot
            .and_then(|slot| self.slot_value(slot))
            .map_or(initial, CollapseState::from_value);
        let open = self.tree_state_push(kind, title, &mut state);
        if let Some(slot) = slot {
            self.set_slot_value(slot, state.to_value());
        }
        open
    }

    /// Tree whose collapse state is owned by the caller.
    pub fn tree_state_push(&mut self, kind: TreeType, title: &str, state: &mut CollapseState) -> bool {
        if self.current.is_none() {
            return false;
        }
        let tab = self.style.tab;
        let spacing = self.style.window.spacing;
        let window_padding = self.style.window.padding;
        let window_background = self.style.window.background;
        let font_height = self.font().height();

        let row_height = font_height + 2.0 * tab.padding.y;
        self.layout_set_min_row_height(row_height);
        self.layout_row_dynamic(row_height, 1);
        self.layout_reset_min_row_height();

        let (mut header, widget_state) = self.widget();
        let rom = self
            .current_panel()
            .is_some_and(|panel| panel.flags.contains(WindowFlags::ROM));
        let accepts = !rom && widget_state == WidgetLayoutState::Valid;
        let mut ws = self.last_widget_state;

        let toggled = self.with_canvas(|canvas, input| {
            let text_background = match kind {
                TreeType::Tab => match tab.background {
                    StyleItem::Image(image) => {
                        canvas.buffer.draw_image(canvas.arena, header, &image, Color::WHITE);
                        Color::TRANSPARENT
                    }
                    StyleItem::Color(background) => {
                        canvas.fill_rect(header, 0.0, tab.border_color);
                        canvas.fill_rect(header.shrink(tab.border), tab.rounding, background);
                        background
                    }
                },
                TreeType::Node => window_background,
            };
            let toggled = button_behavior(&mut ws, header, input.filter(|_| accepts), ButtonBehavior::Default);
            let next = if toggled { state.toggled() } else { *state };

            let (symbol, button) = match (next, kind) {
                (CollapseState::Maximized, TreeType::Tab) => (tab.sym_maximize, tab.tab_maximize_button),
                (CollapseState::Maximized, TreeType::Node) => (tab.sym_maximize, tab.node_maximize_button),
                (CollapseState::Minimized, TreeType::Tab) => (tab.sym_minimize, tab.tab_minimize_button),
                (CollapseState::Minimized, TreeType::Node) => (tab.sym_minimize, tab.node_minimize_button),
            };
            let sym = Rect::new(
                header.x + tab.padding.x,
                header.y + tab.padding.y,
                font_height,
                font_height,
            );
            let mut sym_state = WidgetStates::empty();
            canvas.do_button_symbol(&mut sym_state, sym, symbol, ButtonBehavior::Default, &button, None);

            header.w = header.w.max(sym.w + spacing.x);
            let label = Rect::new(
                sym.max_x() + spacing.x,
                sym.y,
                header.w - (sym.w + spacing.y + tab.indent),
                font_height,
            );
            let paint = TextPaint {
                padding: Vec2::ZERO,
                background: text_background,
                color: tab.text,
            };
            canvas.text(label, title, &paint, TextAlign::LEFT);
            toggled
        });
        self.last_widget_state = ws;
        if toggled {
            *state = state.toggled();
        }
        if *state != CollapseState::Maximized {
            return false;
        }
        let Some(panel) = self.current_panel_mut() else {
            return false;
        };
        let layout = &mut panel.layout;
        layout.at_x = header.x + layout.offset.x as f32 + tab.indent;
        layout.bounds.w = layout.bounds.w.max(tab.indent);
        layout.bounds.w -= tab.indent + window_padding.x;
        layout.row.tree_depth += 1;
        true
    }

    /// Closes the innermost open tree and removes its indentation.
    pub fn tree_pop(&mut self) {
        let indent = self.style.tab.indent;
        let padding = self.style.window.padding;
        let Some(panel) = self.current_panel_mut() else {
            return;
        };
        let layout = &mut panel.layout;
        if layout.row.tree_depth == 0 {
            debug_assert!(false, "tree_pop without an open tree");
            log::warn!("tree_pop without an open tree");
            return;
        }
        layout.at_x -= indent + layout.offset.x as f32;
        layout.bounds.w += indent + padding.x;
        layout.row.tree_depth -= 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapse_state_round_trips_through_table_values() {
        for state in [CollapseState::Minimized, CollapseState::Maximized] {
            assert_eq!(CollapseState::from_value(state.to_value()), state);
        }
        assert_eq!(CollapseState::Minimized.toggled(), CollapseState::Maximized);
    }
}
