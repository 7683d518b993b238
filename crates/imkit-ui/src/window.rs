//! Persistent window state and the window query API

use crate::context::{Context, InsertLocation};
use crate::page::{TableId, WindowId};
use crate::panel::PanelType;
use crate::widgets::WidgetStates;
use bitflags::bitflags;
use imkit_core::hash::{self, Hash};
use imkit_core::{ArenaBuffer, Checkpoint, CommandBuffer};
use imkit_graphics::{Rect, Vec2};
use imkit_layout::Scroll;

bitflags! {
    /// Window behavior. Bits from [`DYNAMIC`](Self::DYNAMIC) upward are
    /// managed by the context and survive between frames.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct WindowFlags: u32 {
        const BORDER = 1 << 0;
        const MOVABLE = 1 << 1;
        const SCALABLE = 1 << 2;
        const CLOSABLE = 1 << 3;
        const MINIMIZABLE = 1 << 4;
        const NO_SCROLLBAR = 1 << 5;
        const TITLE = 1 << 6;
        const SCROLL_AUTO_HIDE = 1 << 7;
        const BACKGROUND = 1 << 8;
        const SCALE_LEFT = 1 << 9;
        const NO_INPUT = 1 << 10;

        /// Height follows content; used by nonblocking and dynamic popups.
        const DYNAMIC = 1 << 11;
        /// Read-only: drawn but ignores input.
        const ROM = 1 << 12;
        const NOT_INTERACTIVE = Self::ROM.bits() | Self::NO_INPUT.bits();
        const HIDDEN = 1 << 13;
        const CLOSED = 1 << 14;
        const MINIMIZED = 1 << 15;
        /// Drop [`ROM`](Self::ROM) when the panel ends.
        const REMOVE_ROM = 1 << 16;

        /// Every caller-settable bit.
        const PUBLIC = (1 << 11) - 1;
    }
}

pub(crate) const WINDOW_MAX_NAME: usize = 64;

/// Window name truncated to a fixed inline buffer.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct WindowName {
    bytes: [u8; WINDOW_MAX_NAME],
    len: usize,
}

impl WindowName {
    pub fn new(name: &str) -> Self {
        let mut len = name.len().min(WINDOW_MAX_NAME - 1);
        while !name.is_char_boundary(len) {
            len -= 1;
        }
        let mut bytes = [0; WINDOW_MAX_NAME];
        bytes[..len].copy_from_slice(&name.as_bytes()[..len]);
        Self { bytes, len }
    }

    pub fn as_str(&self) -> &str {
        std::str::from_utf8(&self.bytes[..self.len]).unwrap_or_default()
    }
}

impl std::fmt::Debug for WindowName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("WindowName").field(&self.as_str()).finish()
    }
}

/// Commands a popup recorded into its parent's buffer this frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct PopupBuffer {
    pub active: bool,
    /// Parent buffer state right before the popup started recording.
    pub start: Option<Checkpoint>,
    pub first: Option<usize>,
    pub last: Option<usize>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct PopupState {
    pub win: Option<WindowId>,
    pub kind: PanelType,
    pub buf: PopupBuffer,
    pub name: Hash,
    pub active: bool,
    pub combo_count: u32,
    pub con_count: u32,
    pub con_old: u32,
    pub active_con: u32,
    pub header: Rect,
}

#[derive(Clone, Debug)]
pub struct Window {
    pub(crate) seq: u32,
    pub(crate) name: Hash,
    pub(crate) name_string: WindowName,
    pub(crate) flags: WindowFlags,
    pub(crate) bounds: Rect,
    pub(crate) scrollbar: Scroll,
    pub(crate) buffer: CommandBuffer,
    pub(crate) layout: Option<crate::page::PanelId>,
    pub(crate) popup: PopupState,
    pub(crate) tables: Option<TableId>,
    pub(crate) table_count: u32,
    pub(crate) prev: Option<WindowId>,
    pub(crate) next: Option<WindowId>,
    pub(crate) parent: Option<WindowId>,
    pub(crate) widgets_disabled: bool,
    pub(crate) scrolled: bool,
}

impl Window {
    pub(crate) fn new(seq: u32) -> Self {
        Self {
            seq,
            name: 0,
            name_string: WindowName::new(""),
            flags: WindowFlags::empty(),
            bounds: Rect::ZERO,
            scrollbar: Scroll::default(),
            buffer: CommandBuffer::default(),
            layout: None,
            popup: PopupState::default(),
            tables: None,
            table_count: 0,
            prev: None,
            next: None,
            parent: None,
            widgets_disabled: false,
            scrolled: false,
        }
    }

    pub fn name(&self) -> &str {
        self.name_string.as_str()
    }

    pub fn name_hash(&self) -> Hash {
        self.name
    }

    pub fn flags(&self) -> WindowFlags {
        self.flags
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn scroll(&self) -> Scroll {
        self.scrollbar
    }

    /// Frame sequence number of the last `begin`.
    pub fn seq(&self) -> u32 {
        self.seq
    }

    pub fn table_count(&self) -> u32 {
        self.table_count
    }

    /// Commands recorded for this window in the current frame.
    pub fn command_count(&self) -> usize {
        self.buffer.len()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CollapseState {
    #[default]
    Minimized,
    Maximized,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShowState {
    Hidden,
    Shown,
}

impl Context {
    pub fn window_find(&self, name: &str) -> Option<&Window> {
        let id = self.find_window(hash::hash_str(name, hash::seed::WINDOW), name)?;
        self.window(id)
    }

    fn named_window_mut(&mut self, name: &str) -> Option<(WindowId, &mut Window)> {
        let id = self.find_window(hash::hash_str(name, hash::seed::WINDOW), name)?;
        self.window_mut(id).map(|win| (id, win))
    }

    fn current_window(&self) -> Option<&Window> {
        let win = self.current.and_then(|id| self.window(id));
        debug_assert!(win.is_some(), "window query outside of begin/end");
        win
    }

    /// Bounds of the current window.
    pub fn window_get_bounds(&self) -> Rect {
        self.current_window().map_or(Rect::ZERO, |win| win.bounds)
    }

    pub fn window_get_position(&self) -> Vec2 {
        self.window_get_bounds().pos()
    }

    pub fn window_get_size(&self) -> Vec2 {
        self.window_get_bounds().size()
    }

    pub fn window_get_width(&self) -> f32 {
        self.window_get_bounds().w
    }

    pub fn window_get_height(&self) -> f32 {
        self.window_get_bounds().h
    }

    /// Visible content area of the innermost open panel.
    pub fn window_get_content_region(&self) -> Rect {
        self.current_panel().map_or(Rect::ZERO, |panel| panel.layout.clip)
    }

    pub fn window_get_content_region_min(&self) -> Vec2 {
        self.window_get_content_region().pos()
    }

    pub fn window_get_content_region_max(&self) -> Vec2 {
        let region = self.window_get_content_region();
        Vec2::new(region.max_x(), region.max_y())
    }

    pub fn window_get_content_region_size(&self) -> Vec2 {
        self.window_get_content_region().size()
    }

    /// Direct drawing into the current window's command buffer.
    pub fn window_canvas<R>(&mut self, f: impl FnOnce(&mut CommandBuffer, &mut ArenaBuffer) -> R) -> Option<R> {
        let (buffer, arena) = self.window_buffer(self.current?)?;
        Some(f(buffer, arena))
    }

    /// Whether the current window is the active one.
    pub fn window_has_focus(&self) -> bool {
        self.current.is_some() && self.current == self.active
    }

    /// Whether the named window is the active one.
    pub fn window_is_active(&self, name: &str) -> bool {
        let id = self.find_window(hash::hash_str(name, hash::seed::WINDOW), name);
        id.is_some() && id == self.active
    }

    pub fn window_is_hovered(&self) -> bool {
        let Some(win) = self.current_window() else {
            return false;
        };
        if win.flags.contains(WindowFlags::HIDDEN) {
            return false;
        }
        let mut bounds = win.bounds;
        if win.flags.contains(WindowFlags::MINIMIZED) {
            bounds.h = self.current_panel().map_or(0.0, |panel| panel.layout.header_height);
        }
        self.input.is_mouse_hovering_rect(bounds)
    }

    pub fn window_is_any_hovered(&self) -> bool {
        let header_height = self.font().height() + 2.0 * self.style.window.header.padding.y;
        self.window_ids().into_iter().filter_map(|id| self.window(id)).any(|win| {
            if win.flags.contains(WindowFlags::HIDDEN) {
                return false;
            }
            let popup_hovered = win.popup.active
                && win
                    .popup
                    .win
                    .and_then(|id| self.window(id))
                    .is_some_and(|popup| self.input.is_mouse_hovering_rect(popup.bounds));
            let mut bounds = win.bounds;
            if win.flags.contains(WindowFlags::MINIMIZED) {
                bounds.h = header_height;
            }
            popup_hovered || self.input.is_mouse_hovering_rect(bounds)
        })
    }

    /// Whether the mouse is over any window or the last widget was modified.
    pub fn item_is_any_active(&self) -> bool {
        self.window_is_any_hovered() || self.last_widget_state.contains(WidgetStates::MODIFIED)
    }

    pub fn window_is_collapsed(&self, name: &str) -> bool {
        self.window_find(name)
            .is_some_and(|win| win.flags.contains(WindowFlags::MINIMIZED))
    }

    /// Closed or unknown windows both report `true`.
    pub fn window_is_closed(&self, name: &str) -> bool {
        self.window_find(name)
            .map_or(true, |win| win.flags.contains(WindowFlags::CLOSED))
    }

    pub fn window_is_hidden(&self, name: &str) -> bool {
        self.window_find(name)
            .map_or(true, |win| win.flags.contains(WindowFlags::HIDDEN))
    }

    pub fn window_set_bounds(&mut self, name: &str, bounds: Rect) {
        if let Some((_, win)) = self.named_window_mut(name) {
            win.bounds = bounds;
        }
    }

    pub fn window_set_position(&mut self, name: &str, pos: Vec2) {
        if let Some((_, win)) = self.named_window_mut(name) {
            win.bounds.x = pos.x;
            win.bounds.y = pos.y;
        }
    }

    pub fn window_set_size(&mut self, name: &str, size: Vec2) {
        if let Some((_, win)) = self.named_window_mut(name) {
            win.bounds.w = size.x;
            win.bounds.h = size.y;
        }
    }

    /// Moves the named window to the top of the z-order and activates it.
    pub fn window_set_focus(&mut self, name: &str) {
        let Some(id) = self.find_window(hash::hash_str(name, hash::seed::WINDOW), name) else {
            return;
        };
        if self.end != Some(id) {
            self.remove_window(id);
            self.insert_window(id, InsertLocation::Back);
        }
        self.active = Some(id);
    }

    pub fn window_get_scroll(&self) -> Scroll {
        self.current_window().map_or(Scroll::default(), |win| win.scrollbar)
    }

    pub fn window_set_scroll(&mut self, scroll: Scroll) {
        let Some(id) = self.current else {
            return;
        };
        let Some(win) = self.window_mut(id) else {
            return;
        };
        win.scrollbar = scroll;
        let Some(mut panel) = win.layout else {
            return;
        };
        while let Some(parent) = self.panel(panel).and_then(|p| p.parent) {
            panel = parent;
        }
        if let Some(root) = self.panel_mut(panel) {
            root.layout.offset = scroll;
        }
    }

    /// Closes and later collects the named window. The window being built
    /// cannot close itself this way.
    pub fn window_close(&mut self, name: &str) {
        let current = self.current;
        match self.named_window_mut(name) {
            Some((id, _)) if current == Some(id) => {
                debug_assert!(false, "window_close called on the current window");
                log::warn!("window {name:?} cannot close itself");
            }
            Some((_, win)) => win.flags.insert(WindowFlags::HIDDEN | WindowFlags::CLOSED),
            None => {}
        }
    }

    pub fn window_collapse(&mut self, name: &str, state: CollapseState) {
        if let Some((_, win)) = self.named_window_mut(name) {
            win.flags.set(WindowFlags::MINIMIZED, state == CollapseState::Minimized);
        }
    }

    pub fn window_collapse_if(&mut self, name: &str, state: CollapseState, cond: bool) {
        if cond {
            self.window_collapse(name, state);
        }
    }

    pub fn window_show(&mut self, name: &str, state: ShowState) {
        if let Some((_, win)) = self.named_window_mut(name) {
            win.flags.set(WindowFlags::HIDDEN, state == ShowState::Hidden);
        }
    }

    pub fn window_show_if(&mut self, name: &str, state: ShowState, cond: bool) {
        if cond {
            self.window_show(name, state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_mask_excludes_context_bits() {
        assert!(WindowFlags::PUBLIC.contains(WindowFlags::NO_INPUT | WindowFlags::BORDER));
        assert!(!WindowFlags::PUBLIC.intersects(WindowFlags::DYNAMIC | WindowFlags::ROM | WindowFlags::HIDDEN));
    }

    #[test]
    fn long_names_are_truncated_on_char_boundary() {
        let name = "é".repeat(40);
        let stored = WindowName::new(&name);
        assert!(stored.as_str().len() < WINDOW_MAX_NAME);
        assert!(name.starts_with(stored.as_str()));
        assert_eq!(WindowName::new("Demo").as_str(), "Demo");
    }
}
