//! Groups: scrollable sub-panels inside a window
//!
//! A group takes one widget slot of its parent and lays its own widgets out
//! inside it. Named groups keep their scroll offset in the window's state
//! table under the group's hash (x) and the hash plus one (y).

use crate::context::Context;
use crate::panel::PanelType;
use crate::window::WindowFlags;
use imkit_core::hash::{self, Hash};
use imkit_graphics::Rect;
use imkit_layout::Scroll;

impl Context {
    /// Scroll offset stored for a named group of the current window.
    fn group_offset(&mut self, key: Hash) -> Scroll {
        let Some(win) = self.current else {
            return Scroll::default();
        };
        let x = self.find_slot(win, key).and_then(|slot| self.slot_value(slot));
        let y = self.find_slot(win, key.wrapping_add(1)).and_then(|slot| self.slot_value(slot));
        match (x, y) {
            (Some(x), y) => Scroll::new(x, y.unwrap_or(0)),
            _ => {
                self.add_slot(win, key, 0);
                self.add_slot(win, key.wrapping_add(1), 0);
                Scroll::default()
            }
        }
    }

    fn store_group_offset(&mut self, key: Hash, scroll: Scroll) {
        let Some(win) = self.current else {
            return;
        };
        for (k, value) in [(key, scroll.x), (key.wrapping_add(1), scroll.y)] {
            match self.find_slot(win, k) {
                Some(slot) => {
                    self.set_slot_value(slot, value);
                }
                None => {
                    self.add_slot(win, k, value);
                }
            }
        }
    }

    pub fn group_begin(&mut self, title: &str, flags: WindowFlags) -> bool {
        self.group_begin_titled(title, title, flags)
    }

    /// Starts the group `id`, restoring its scroll offset from the previous
    /// frame. A `true` result must be paired with [`group_end`](Self::group_end).
    pub fn group_begin_titled(&mut self, id: &str, title: &str, flags: WindowFlags) -> bool {
        let key = hash::hash_str(id, hash::seed::GROUP);
        let offset = self.group_offset(key);
        self.group_start(offset, Some(key), title, flags)
    }

    /// Starts an anonymous group scrolled by `offset`; the caller keeps the
    /// offset and receives its update from [`group_scrolled_end`](Self::group_scrolled_end).
    pub fn group_scrolled_offset_begin(&mut self, offset: Scroll, title: &str, flags: WindowFlags) -> bool {
        self.group_start(offset, None, title, flags)
    }

    fn group_start(&mut self, offset: Scroll, scroll_key: Option<Hash>, title: &str, flags: WindowFlags) -> bool {
        let Some(win) = self.current else {
            debug_assert!(false, "group begun outside of a window");
            return false;
        };
        let spacing = self.style.window.spacing;
        let Some(parent) = self.current_panel_id() else {
            return false;
        };
        let Some((allocation, clip)) = self.panel_mut(parent).map(|panel| {
            let allocation = panel.layout.alloc_space(spacing);
            (allocation, panel.layout.clip)
        }) else {
            return false;
        };
        if let Some(row) = allocation.new_row {
            self.row_background(row);
        }
        let bounds = allocation.bounds;
        if !clip.intersects(&bounds) && !flags.contains(WindowFlags::MOVABLE) {
            return false;
        }

        let mut flags = flags & WindowFlags::PUBLIC;
        if self.window(win).is_some_and(|w| w.flags.contains(WindowFlags::ROM)) {
            flags.insert(WindowFlags::ROM);
        }
        let Some(panel) = self.create_panel() else {
            return false;
        };
        let Some(mut host) = self.group_host(win, panel, bounds, flags) else {
            self.free_panel(panel);
            return false;
        };
        host.scroll = offset;
        let title = flags.contains(WindowFlags::TITLE).then_some(title);
        self.panel_begin(&mut host, title, PanelType::Group);

        let Some(panel_flags) = self.panel_mut(panel).map(|group| {
            group.parent = Some(parent);
            group.scroll_key = scroll_key;
            group.flags
        }) else {
            return false;
        };
        let clip = self.panel(panel).map_or(Rect::NULL, |group| group.layout.clip);
        if let Some(window) = self.window_mut(win) {
            window.buffer = host.buffer;
            window.buffer.clip = clip;
            window.layout = Some(panel);
        }

        if panel_flags.intersects(WindowFlags::CLOSED | WindowFlags::MINIMIZED) {
            self.group_scrolled_end();
            return false;
        }
        true
    }

    /// Ends the innermost group.
    pub fn group_end(&mut self) {
        self.group_scrolled_end();
    }

    /// Ends the innermost group and returns its scroll offset.
    pub fn group_scrolled_end(&mut self) -> Scroll {
        let Some(win) = self.current else {
            debug_assert!(false, "group end outside of a window");
            return Scroll::default();
        };
        let Some(group_id) = self.current_panel_id() else {
            return Scroll::default();
        };
        let Some(group) = self.panel(group_id).copied() else {
            return Scroll::default();
        };
        if group.kind != PanelType::Group {
            debug_assert!(false, "group end without a matching group begin");
            log::warn!("group end without a matching group begin");
            return Scroll::default();
        }
        let Some(parent) = group.parent else {
            return Scroll::default();
        };
        let parent_clip = self.panel(parent).map_or(Rect::NULL, |p| p.layout.clip);
        let padding = self.style.window.group_padding;

        let Some(mut host) = self.group_host(win, group_id, group.host_bounds, group.flags) else {
            return Scroll::default();
        };
        host.scroll = group.layout.offset;
        let outer = group.host_bounds;
        let clip = parent_clip.unify(outer.x, outer.y, outer.max_x(), outer.max_y() + padding.x);
        host.buffer.push_scissor(&mut self.memory, clip);
        self.panel_end(&mut host);

        if let Some(window) = self.window_mut(win) {
            window.buffer = host.buffer;
            window.layout = Some(parent);
        }
        if let Some((buffer, arena)) = self.window_buffer(win) {
            buffer.push_scissor(arena, parent_clip);
        }
        self.free_panel(group_id);
        if let Some(key) = group.scroll_key {
            self.store_group_offset(key, host.scroll);
        }
        host.scroll
    }

    /// Scroll offset of the named group in the current window.
    pub fn group_get_scroll(&mut self, id: &str) -> Scroll {
        let key = hash::hash_str(id, hash::seed::GROUP);
        self.group_offset(key)
    }

    pub fn group_set_scroll(&mut self, id: &str, scroll: Scroll) {
        let key = hash::hash_str(id, hash::seed::GROUP);
        self.store_group_offset(key, scroll);
    }
}

#[cfg(test)]
#[path = "tests/group_tests.rs"]
mod tests;
