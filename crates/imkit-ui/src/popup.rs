//! Popups, contextual menus, tooltips, combos and menus
//!
//! Every window owns at most one popup window. A popup records into its
//! parent's command buffer; when the parent window ends, those records are
//! cut out of the parent's chain and appended after all windows so the
//! popup is drawn on top. While a popup is open its parent panels are
//! read-only.
//!
//! Combos, menus and contextual menus are nonblocking: they close when the
//! user presses the mouse outside of them.

use crate::context::Context;
use crate::input::MouseButton;
use crate::page::WindowId;
use crate::panel::{panel_padding, PanelType};
use crate::style::{Symbol, TextAlign};
use crate::widgets::{button_behavior, Canvas, TextPaint, WidgetLayoutState, WidgetStates};
use crate::window::{PopupBuffer, WindowFlags};
use crate::ButtonBehavior;
use imkit_core::hash;
use imkit_core::CommandBuffer;
use imkit_core::{next_of, Clipping};
use imkit_graphics::{Color, Rect, Vec2};
use imkit_layout::Scroll;

const TOOLTIP_NAME: &str = "__##Tooltip##__";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PopupKind {
    /// Fixed size given by the caller.
    Static,
    /// Height follows the content.
    Dynamic,
}

impl Context {
    /// Adds `insert` and removes `remove` on every panel of `win`, innermost first.
    fn mark_parent_panels(&mut self, win: WindowId, insert: WindowFlags, remove: WindowFlags) {
        let mut cursor = self.window(win).and_then(|w| w.layout);
        while let Some(id) = cursor {
            cursor = self.panel_mut(id).and_then(|panel| {
                panel.flags.insert(insert);
                panel.flags.remove(remove);
                panel.parent
            });
        }
    }

    fn current_is_popup(&self) -> bool {
        self.current_panel().is_some_and(|panel| panel.kind.is_popup())
    }

    /// Remembers where the popup of `win` starts recording.
    fn start_popup(&mut self, win: WindowId) {
        let checkpoint = match self.window(win) {
            Some(window) => window.buffer.checkpoint(&self.memory),
            None => return,
        };
        if let Some(window) = self.window_mut(win) {
            window.popup.buf = PopupBuffer {
                active: true,
                start: Some(checkpoint),
                first: None,
                last: None,
            };
        }
    }

    /// Records the range of commands the popup of `win` produced.
    fn finish_popup(&mut self, win: WindowId) {
        let Some(window) = self.window(win) else {
            return;
        };
        let buf = window.popup.buf;
        let buffer = window.buffer;
        let Some(start) = buf.start else {
            return;
        };
        let first = if buffer.len() == start.len() {
            None
        } else {
            match start.last() {
                Some(last) => next_of(&self.memory, last),
                None => buffer.begin(),
            }
        };
        if let Some(window) = self.window_mut(win) {
            window.popup.buf.first = first;
            window.popup.buf.last = first.and(buffer.last());
        }
    }

    fn create_popup_window(&mut self, parent: WindowId, kind: PanelType) -> Option<WindowId> {
        let popup = self.create_window()?;
        if let Some(win) = self.window_mut(popup) {
            win.parent = Some(parent);
            win.buffer = CommandBuffer::new(Clipping::On);
        }
        if let Some(win) = self.window_mut(parent) {
            win.popup.win = Some(popup);
            win.popup.kind = kind;
        }
        Some(popup)
    }

    /// Opens the popup `title` at `rect`, relative to the current panel's
    /// content area. A `true` result must be paired with [`popup_end`](Self::popup_end).
    pub fn popup_begin(&mut self, kind: PopupKind, title: &str, flags: WindowFlags, rect: Rect) -> bool {
        let Some(win) = self.current else {
            debug_assert!(false, "popup begun outside of a window");
            return false;
        };
        if self.current_is_popup() {
            debug_assert!(false, "popups cannot open popups");
            log::warn!("popup {title:?} requested from inside a popup");
            return false;
        }
        let Some(parent_panel) = self.current_panel_id() else {
            return false;
        };
        let title_hash = hash::hash_str(title, hash::seed::POPUP);

        let existing = self.window(win).and_then(|w| w.popup.win);
        let mut popup = match existing {
            Some(popup) => popup,
            None => {
                let Some(popup) = self.create_popup_window(win, PanelType::Popup) else {
                    return false;
                };
                if let Some(window) = self.window_mut(win) {
                    window.popup.active = false;
                }
                popup
            }
        };

        let Some(state) = self.window(win).map(|w| w.popup) else {
            return false;
        };
        if state.name != title_hash {
            if state.active {
                return false;
            }
            self.free_window(popup);
            let Some(fresh) = self.create_popup_window(win, PanelType::Popup) else {
                return false;
            };
            popup = fresh;
            if let Some(window) = self.window_mut(win) {
                window.popup.name = title_hash;
                window.popup.active = true;
            }
        }

        let clip = self.panel(parent_panel).map_or(Rect::ZERO, |p| p.layout.clip);
        let mut bounds = rect;
        bounds.x += clip.x;
        bounds.y += clip.y;
        let mut flags = (flags & WindowFlags::PUBLIC) | WindowFlags::BORDER;
        if kind == PopupKind::Dynamic {
            flags.insert(WindowFlags::DYNAMIC);
        }

        let Some(panel) = self.create_panel() else {
            return false;
        };
        let parent_buffer = self.window(win).map(|w| w.buffer).unwrap_or_default();
        let seq = self.seq;
        if let Some(window) = self.window_mut(popup) {
            window.parent = Some(win);
            window.bounds = bounds;
            window.seq = seq;
            window.layout = Some(panel);
            window.flags = flags;
            window.buffer = parent_buffer;
        }
        self.start_popup(win);
        let checkpoint = self.window(win).and_then(|w| w.popup.buf.start);
        if let Some((buffer, arena)) = self.window_buffer(popup) {
            buffer.push_scissor(arena, Rect::NULL);
        }

        self.current = Some(popup);
        let Some(mut host) = self.window_host(popup, panel) else {
            self.current = Some(win);
            return false;
        };
        let visible = self.panel_begin(&mut host, Some(title), PanelType::Popup);
        self.commit_window_host(&host);

        if visible {
            self.mark_parent_panels(win, WindowFlags::ROM, WindowFlags::REMOVE_ROM);
            if let Some(window) = self.window_mut(win) {
                window.popup.active = true;
            }
            if let Some(popup_panel) = self.panel_mut(panel) {
                popup_panel.parent = Some(parent_panel);
            }
            true
        } else {
            self.mark_parent_panels(win, WindowFlags::REMOVE_ROM, WindowFlags::empty());
            if let Some(window) = self.window_mut(win) {
                window.popup.buf.active = false;
                window.popup.active = false;
            }
            if let (Some(checkpoint), Some((buffer, arena))) = (checkpoint, self.window_buffer(popup)) {
                buffer.rollback(arena, checkpoint);
            }
            self.current = Some(win);
            self.free_panel(panel);
            if let Some(window) = self.window_mut(popup) {
                window.layout = None;
            }
            false
        }
    }

    /// Opens a nonblocking popup at `body`. Pressing the mouse outside of
    /// `body`, or inside `header`, closes it.
    fn nonblock_begin(&mut self, flags: WindowFlags, body: Rect, header: Rect, kind: PanelType) -> bool {
        let Some(win) = self.current else {
            return false;
        };
        if self.current_is_popup() {
            debug_assert!(false, "popups cannot open popups");
            return false;
        }
        let Some(parent_panel) = self.current_panel_id() else {
            return false;
        };

        let mut is_active = true;
        let popup = match self.window(win).and_then(|w| w.popup.win) {
            None => match self.create_popup_window(win, kind) {
                Some(popup) => popup,
                None => return false,
            },
            Some(popup) => {
                let pressed = self.input.is_mouse_pressed(MouseButton::Left);
                let in_body = self.input.is_mouse_hovering_rect(body);
                let in_header = self.input.is_mouse_hovering_rect(header);
                if pressed && (!in_body || in_header) {
                    is_active = false;
                }
                popup
            }
        };
        if let Some(window) = self.window_mut(win) {
            window.popup.header = header;
        }
        if !is_active {
            self.mark_parent_panels(win, WindowFlags::REMOVE_ROM, WindowFlags::empty());
            return false;
        }

        let Some(panel) = self.create_panel() else {
            return false;
        };
        let seq = self.seq;
        if let Some(window) = self.window_mut(popup) {
            window.bounds = body;
            window.parent = Some(win);
            window.layout = Some(panel);
            window.flags = (flags & WindowFlags::PUBLIC) | WindowFlags::BORDER | WindowFlags::DYNAMIC;
            window.seq = seq;
        }
        if let Some(window) = self.window_mut(win) {
            window.popup.active = true;
        }
        self.start_popup(win);
        let parent_buffer = self.window(win).map(|w| w.buffer).unwrap_or_default();
        if let Some((buffer, arena)) = self.window_buffer(popup) {
            *buffer = parent_buffer;
            buffer.push_scissor(arena, Rect::NULL);
        }

        self.current = Some(popup);
        let Some(mut host) = self.window_host(popup, panel) else {
            self.current = Some(win);
            return false;
        };
        self.panel_begin(&mut host, None, kind);
        self.commit_window_host(&host);
        if let Some(window) = self.window_mut(win) {
            window.buffer = host.buffer;
        }
        if let Some(popup_panel) = self.panel_mut(panel) {
            popup_panel.parent = Some(parent_panel);
        }
        self.mark_parent_panels(win, WindowFlags::ROM, WindowFlags::empty());
        true
    }

    /// Hides the current popup; it disappears once ended.
    pub fn popup_close(&mut self) {
        if !self.current_is_popup() {
            debug_assert!(false, "popup_close outside of a popup");
            return;
        }
        if let Some(popup) = self.current.and_then(|id| self.window_mut(id)) {
            popup.flags.insert(WindowFlags::HIDDEN);
        }
    }

    pub fn popup_end(&mut self) {
        let Some(popup) = self.current else {
            return;
        };
        if !self.current_is_popup() {
            debug_assert!(false, "popup_end without a matching popup begin");
            log::warn!("popup_end without a matching popup begin");
            return;
        }
        let Some((parent, flags, panel)) = self.window(popup).and_then(|w| Some((w.parent?, w.flags, w.layout?))) else {
            return;
        };
        if flags.contains(WindowFlags::HIDDEN) {
            self.mark_parent_panels(parent, WindowFlags::REMOVE_ROM, WindowFlags::empty());
            if let Some(window) = self.window_mut(parent) {
                window.popup.active = false;
            }
        }
        if let Some((buffer, arena)) = self.window_buffer(popup) {
            buffer.push_scissor(arena, Rect::NULL);
        }
        if let Some(mut host) = self.window_host(popup, panel) {
            self.panel_end(&mut host);
            self.commit_window_host(&host);
        }
        self.free_panel(panel);
        let popup_buffer = match self.window_mut(popup) {
            Some(window) => {
                window.layout = None;
                window.buffer
            }
            None => return,
        };
        if let Some(window) = self.window_mut(parent) {
            window.buffer = popup_buffer;
        }
        self.finish_popup(parent);
        self.current = Some(parent);
        let clip = self.current_panel().map_or(Rect::NULL, |p| p.layout.clip);
        if let Some((buffer, arena)) = self.window_buffer(parent) {
            buffer.push_scissor(arena, clip);
        }
    }

    pub fn popup_get_scroll(&self) -> Scroll {
        self.current
            .filter(|_| self.current_is_popup())
            .and_then(|id| self.window(id))
            .map_or(Scroll::default(), |w| w.scrollbar)
    }

    pub fn popup_set_scroll(&mut self, scroll: Scroll) {
        if !self.current_is_popup() {
            return;
        }
        if let Some(panel) = self.current_panel_mut() {
            panel.layout.offset = scroll;
        }
        if let Some(popup) = self.current.and_then(|id| self.window_mut(id)) {
            popup.scrollbar = scroll;
        }
    }

    /// Opens a context menu of `size` when `trigger` is right-clicked.
    pub fn contextual_begin(&mut self, flags: WindowFlags, size: Vec2, trigger: Rect) -> bool {
        let Some(win) = self.current else {
            return false;
        };
        let Some(state) = self.window_mut(win).map(|w| {
            w.popup.con_count += 1;
            w.popup
        }) else {
            return false;
        };
        if self.current != self.active {
            return false;
        }

        let is_open = state.win.is_some() && state.kind == PanelType::Contextual;
        let is_clicked = self.input.mouse_clicked(MouseButton::Right, trigger);
        if state.active_con != 0 && state.con_count != state.active_con {
            return false;
        }
        if !is_open && state.active_con != 0 {
            if let Some(window) = self.window_mut(win) {
                window.popup.active_con = 0;
            }
        }
        if !is_open && !is_clicked {
            return false;
        }
        if let Some(window) = self.window_mut(win) {
            window.popup.active_con = state.con_count;
        }

        let origin = if is_clicked {
            self.input.mouse.pos
        } else {
            state
                .win
                .and_then(|id| self.window(id))
                .map_or(Vec2::ZERO, |popup| popup.bounds.pos())
        };
        let body = Rect::from_pos_size(origin, size);
        let opened = self.nonblock_begin(flags | WindowFlags::NO_SCROLLBAR, body, Rect::ZERO, PanelType::Contextual);
        let popup = self.window(win).and_then(|w| w.popup.win);
        if opened {
            if let Some(window) = self.window_mut(win) {
                window.popup.kind = PanelType::Contextual;
            }
        } else {
            if let Some(window) = self.window_mut(win) {
                window.popup.active_con = 0;
                window.popup.kind = PanelType::None;
            }
            if let Some(popup) = popup.and_then(|id| self.window_mut(id)) {
                popup.flags = WindowFlags::empty();
            }
        }
        opened
    }

    /// Full-width button inside a nonblocking popup; closes the popup when
    /// clicked.
    fn popup_item_label(&mut self, text: &str, align: TextAlign, menu: bool) -> bool {
        let style = if menu {
            self.style.menu_button
        } else {
            self.style.contextual_button
        };
        let (bounds, state) = self.widget_fitting(style.padding);
        if state == WidgetLayoutState::Invalid {
            return false;
        }
        let accepts = self.widget_input(state).is_some();
        let mut ws = self.last_widget_state;
        let clicked = self.with_canvas(|canvas, input| {
            canvas.do_button_text(
                &mut ws,
                bounds,
                text,
                align,
                ButtonBehavior::Default,
                &style,
                input.filter(|_| accepts),
            )
        });
        self.last_widget_state = ws;
        if clicked {
            self.popup_close();
        }
        clicked
    }

    pub fn contextual_item_label(&mut self, text: &str, align: TextAlign) -> bool {
        self.popup_item_label(text, align, false)
    }

    pub fn contextual_close(&mut self) {
        self.popup_close();
    }

    /// Ends a nonblocking popup. Dynamic popups also close when the user
    /// clicks the empty area below their last row.
    pub fn contextual_end(&mut self) {
        let Some(popup) = self.current else {
            return;
        };
        let Some(panel) = self.current_panel().copied() else {
            return;
        };
        if !panel.kind.is_popup() {
            debug_assert!(false, "contextual_end outside of a popup");
            return;
        }
        if panel.flags.contains(WindowFlags::DYNAMIC) {
            let layout = &panel.layout;
            let mut body = Rect::ZERO;
            if layout.at_y < layout.bounds.max_y() {
                let padding = panel_padding(&self.style, panel.kind);
                body = layout.bounds;
                body.y = layout.at_y + layout.footer_height + layout.border + padding.y + layout.row.height;
                body.h = layout.bounds.max_y() - body.y;
            }
            let pressed = self.input.is_mouse_pressed(MouseButton::Left);
            let in_body = self.input.is_mouse_hovering_rect(body);
            if pressed && in_body {
                if let Some(window) = self.window_mut(popup) {
                    window.flags.insert(WindowFlags::HIDDEN);
                }
            }
        }
        if let Some(window) = self.window_mut(popup) {
            if window.flags.contains(WindowFlags::HIDDEN) {
                window.seq = 0;
            }
        }
        self.popup_end();
    }

    /// Opens a tooltip of `width` next to the mouse. Returns `false` while a
    /// nonblocking popup of the window is open.
    pub fn tooltip_begin(&mut self, width: f32) -> bool {
        let Some(win) = self.current else {
            return false;
        };
        let Some(state) = self.window(win).map(|w| w.popup) else {
            return false;
        };
        if state.win.is_some() && state.kind.is_nonblock() {
            return false;
        }
        let clip = self.current_panel().map_or(Rect::ZERO, |p| p.layout.clip);
        let pos = self.input.mouse.pos;
        let bounds = Rect::new(
            (pos.x + 1.0).floor() - clip.x.trunc(),
            (pos.y + 1.0).floor() - clip.y.trunc(),
            width.ceil(),
            Rect::NULL.h.ceil(),
        );
        let opened = self.popup_begin(
            PopupKind::Dynamic,
            TOOLTIP_NAME,
            WindowFlags::NO_SCROLLBAR | WindowFlags::BORDER,
            bounds,
        );
        if opened {
            if let Some(window) = self.window_mut(win) {
                window.popup.kind = PanelType::Tooltip;
            }
            if let Some(panel) = self.current_panel_mut() {
                panel.kind = PanelType::Tooltip;
            }
            self.unlock_window_panel(win);
        }
        opened
    }

    /// Lets the innermost panel of `win` keep reacting while a tooltip is shown.
    fn unlock_window_panel(&mut self, win: WindowId) {
        if let Some(panel) = self.window(win).and_then(|w| w.layout) {
            if let Some(panel) = self.panel_mut(panel) {
                panel.flags.remove(WindowFlags::ROM);
            }
        }
    }

    /// Ends a tooltip; tooltips live for a single frame.
    pub fn tooltip_end(&mut self) {
        if let Some(window) = self.current.and_then(|id| self.window_mut(id)) {
            window.seq = window.seq.wrapping_sub(1);
        }
        self.popup_close();
        self.popup_end();
    }

    /// One-line tooltip showing `text`.
    pub fn tooltip(&mut self, text: &str) {
        let padding = self.style.window.padding;
        let font = self.font();
        let width = font.text_width(text) + 4.0 * padding.x;
        let height = font.height() + 2.0 * padding.y;
        if self.tooltip_begin(width) {
            self.layout_row_dynamic(height, 1);
            self.label(text, TextAlign::LEFT);
            self.tooltip_end();
        }
    }

    fn combo_open(&mut self, win: WindowId, size: Vec2, is_clicked: bool, header: Rect) -> bool {
        let border = self.style.window.combo_border;
        let Some(state) = self.window_mut(win).map(|w| {
            let state = w.popup;
            w.popup.combo_count += 1;
            state
        }) else {
            return false;
        };
        let id = state.combo_count;
        let body = Rect::new(header.x, header.max_y() - border, size.x, size.y);
        let is_open = state.win.is_some();
        let is_active = is_open && state.name == id && state.kind == PanelType::Combo;
        if (is_open && !is_active) || (!is_open && !is_active && !is_clicked) {
            return false;
        }
        let close_area = if is_clicked && is_open { Rect::ZERO } else { header };
        if !self.nonblock_begin(WindowFlags::empty(), body, close_area, PanelType::Combo) {
            return false;
        }
        if let Some(window) = self.window_mut(win) {
            window.popup.kind = PanelType::Combo;
            window.popup.name = id;
        }
        true
    }

    /// Combo box showing `selected`; opens a dropdown of `size` when clicked.
    pub fn combo_begin_label(&mut self, selected: &str, size: Vec2) -> bool {
        let Some(win) = self.current else {
            return false;
        };
        let (header, state) = self.widget();
        if state == WidgetLayoutState::Invalid {
            return false;
        }
        let rom = self
            .current_panel()
            .is_some_and(|panel| panel.flags.contains(WindowFlags::ROM));
        let accepts = !rom && state == WidgetLayoutState::Valid;
        let style = self.style.combo;
        let mut ws = self.last_widget_state;

        let is_clicked = self.with_canvas(|canvas: &mut Canvas<'_>, input| {
            let is_clicked = button_behavior(&mut ws, header, input.filter(|_| accepts), ButtonBehavior::Default);
            let (background, label_color) = if ws.contains(WidgetStates::ACTIVED) {
                (style.active, style.label_active)
            } else if ws.contains(WidgetStates::HOVER) {
                (style.hover, style.label_hover)
            } else {
                (style.normal, style.label_normal)
            };
            canvas.fill_item(header, &background, style.rounding, Some((style.border, style.border_color)));
            let text_background = background.color_or(Color::TRANSPARENT);

            let symbol = if ws.contains(WidgetStates::HOVER) {
                style.sym_hover
            } else if is_clicked {
                style.sym_active
            } else {
                style.sym_normal
            };
            let mut button = Rect::new(
                header.max_x() - header.h - style.button_padding.x,
                header.y + style.button_padding.y,
                header.h - 2.0 * style.button_padding.y,
                0.0,
            );
            button.h = button.w;
            let content = Rect::new(
                button.x + style.button.padding.x,
                button.y + style.button.padding.y,
                button.w - 2.0 * style.button.padding.x,
                button.h - 2.0 * style.button.padding.y,
            );
            let mut label = Rect::new(
                header.x + style.content_padding.x,
                header.y + style.content_padding.y,
                0.0,
                header.h - 2.0 * style.content_padding.y,
            );
            label.w = if symbol != Symbol::None {
                button.x - (style.content_padding.x + style.spacing.x) - label.x
            } else {
                header.w - 2.0 * style.content_padding.x
            };
            let paint = TextPaint {
                padding: Vec2::ZERO,
                background: text_background,
                color: label_color,
            };
            canvas.text(label, selected, &paint, TextAlign::LEFT);
            if symbol != Symbol::None {
                canvas.draw_button_symbol(button, content, ws, &style.button, symbol);
            }
            is_clicked
        });
        self.last_widget_state = ws;
        self.combo_open(win, size, is_clicked, header)
    }

    pub fn combo_item_label(&mut self, text: &str, align: TextAlign) -> bool {
        self.popup_item_label(text, align, false)
    }

    pub fn combo_close(&mut self) {
        self.popup_close();
    }

    pub fn combo_end(&mut self) {
        self.contextual_end();
    }

    /// Reserves the top of the current window for a menubar.
    pub fn menubar_begin(&mut self) {
        let Some(panel) = self.current_panel_mut() else {
            return;
        };
        if panel.flags.intersects(WindowFlags::HIDDEN | WindowFlags::MINIMIZED) {
            return;
        }
        let layout = &mut panel.layout;
        debug_assert_eq!(layout.at_y, layout.bounds.y, "menubar must precede every widget");
        layout.menu.x = layout.at_x;
        layout.menu.y = layout.at_y + layout.row.height;
        layout.menu.w = layout.bounds.w;
        layout.menu.offset = layout.offset;
        layout.offset.y = 0;
    }

    pub fn menubar_end(&mut self) {
        let spacing = self.style.window.spacing;
        let Some(panel) = self.current_panel_mut() else {
            return;
        };
        if panel.flags.intersects(WindowFlags::HIDDEN | WindowFlags::MINIMIZED) {
            return;
        }
        let layout = &mut panel.layout;
        layout.menu.h = layout.at_y - layout.menu.y + layout.row.height + spacing.y;
        layout.bounds.y += layout.menu.h;
        layout.bounds.h -= layout.menu.h;
        layout.offset = layout.menu.offset;
        layout.at_y = layout.bounds.y - layout.row.height;
        layout.clip.y = layout.bounds.y;
        layout.clip.h = layout.bounds.h;
        let clip = layout.clip;
        self.with_canvas(|canvas, _| canvas.push_scissor(clip));
    }

    /// Menu button labelled `title`; opens a dropdown of `size` below it.
    pub fn menu_begin_label(&mut self, title: &str, align: TextAlign, size: Vec2) -> bool {
        let Some(win) = self.current else {
            return false;
        };
        let (header, state) = self.widget();
        if state == WidgetLayoutState::Invalid {
            return false;
        }
        let rom = self.window(win).is_some_and(|w| w.flags.contains(WindowFlags::ROM));
        let accepts = !rom && state == WidgetLayoutState::Valid;
        let style = self.style.menu_button;
        let mut ws = self.last_widget_state;
        let is_clicked = self.with_canvas(|canvas, input| {
            canvas.do_button_text(
                &mut ws,
                header,
                title,
                align,
                ButtonBehavior::Default,
                &style,
                input.filter(|_| accepts),
            )
        });
        self.last_widget_state = ws;

        let id = hash::hash_str(title, hash::seed::MENU);
        let body = Rect::new(header.x, header.max_y(), size.x, size.y);
        let Some(state) = self.window(win).map(|w| w.popup) else {
            return false;
        };
        let is_open = state.win.is_some();
        let is_active = is_open && state.name == id && state.kind == PanelType::Menu;
        if (is_open && !is_active) || (!is_open && !is_active && !is_clicked) {
            return false;
        }
        if !self.nonblock_begin(WindowFlags::NO_SCROLLBAR, body, header, PanelType::Menu) {
            return false;
        }
        if let Some(window) = self.window_mut(win) {
            window.popup.kind = PanelType::Menu;
            window.popup.name = id;
        }
        true
    }

    pub fn menu_item_label(&mut self, text: &str, align: TextAlign) -> bool {
        self.popup_item_label(text, align, true)
    }

    pub fn menu_close(&mut self) {
        self.popup_close();
    }

    pub fn menu_end(&mut self) {
        self.contextual_end();
    }
}

#[cfg(test)]
#[path = "tests/popup_tests.rs"]
mod tests;
