//! Panel chrome and finalization
//!
//! Windows, groups and popups all run through [`Context::panel_begin`] and
//! [`Context::panel_end`]. Both operate on a [`PanelHost`]: the geometry,
//! flags, scroll offset and command buffer of whatever owns the panel. For a
//! window these are copied out of the window record and written back
//! afterwards; a group builds a host on the fly from its parent panel.

use crate::chart::Chart;
use crate::context::Context;
use crate::input::MouseButton;
use crate::page::{PanelId, WindowId};
use crate::style::{CursorKind, HeaderAlign, Style, StyleItem, TextAlign};
use crate::widgets::{Canvas, Orientation, TextPaint, WidgetStates};
use crate::window::WindowFlags;
use crate::ButtonBehavior;
use imkit_core::hash::Hash;
use imkit_core::CommandBuffer;
use imkit_graphics::{Color, Rect, Vec2};
use imkit_layout::{PanelLayout, Scroll};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PanelType {
    #[default]
    None,
    Window,
    Group,
    Popup,
    Contextual,
    Combo,
    Menu,
    Tooltip,
}

impl PanelType {
    /// Popups that close when the user clicks elsewhere.
    pub fn is_nonblock(self) -> bool {
        matches!(self, PanelType::Contextual | PanelType::Combo | PanelType::Menu)
    }

    pub fn is_popup(self) -> bool {
        self.is_nonblock() || matches!(self, PanelType::Popup | PanelType::Tooltip)
    }

    /// Panels nested inside another panel's command stream.
    pub fn is_sub(self) -> bool {
        self.is_popup() || self == PanelType::Group
    }
}

/// Layout and bookkeeping of one open panel.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Panel {
    pub(crate) kind: PanelType,
    pub(crate) flags: WindowFlags,
    pub(crate) layout: PanelLayout,
    pub(crate) has_scrolling: bool,
    pub(crate) chart: Chart,
    pub(crate) parent: Option<PanelId>,
    /// State table key holding a named group's scroll offset.
    pub(crate) scroll_key: Option<Hash>,
    /// Bounds of the owner when the panel began, chrome included.
    pub(crate) host_bounds: Rect,
}

impl Panel {
    pub fn kind(&self) -> PanelType {
        self.kind
    }

    pub fn flags(&self) -> WindowFlags {
        self.flags
    }

    pub fn layout(&self) -> &PanelLayout {
        &self.layout
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum HostKind {
    Window,
    Group,
}

/// Everything panel begin/end read and write on the owner of a panel.
#[derive(Clone, Copy, Debug)]
pub(crate) struct PanelHost {
    pub kind: HostKind,
    /// The owning window; for groups the window they are nested in.
    pub window: WindowId,
    pub panel: PanelId,
    pub bounds: Rect,
    pub flags: WindowFlags,
    pub scroll: Scroll,
    pub buffer: CommandBuffer,
}

pub(crate) fn panel_padding(style: &Style, kind: PanelType) -> Vec2 {
    let window = &style.window;
    match kind {
        PanelType::Group => window.group_padding,
        PanelType::Popup => window.popup_padding,
        PanelType::Contextual => window.contextual_padding,
        PanelType::Combo => window.combo_padding,
        PanelType::Menu => window.menu_padding,
        PanelType::Tooltip => window.tooltip_padding,
        PanelType::Window | PanelType::None => window.padding,
    }
}

pub(crate) fn panel_border(style: &Style, flags: WindowFlags, kind: PanelType) -> f32 {
    if !flags.contains(WindowFlags::BORDER) {
        return 0.0;
    }
    let window = &style.window;
    match kind {
        PanelType::Group => window.group_border,
        PanelType::Popup => window.popup_border,
        PanelType::Contextual => window.contextual_border,
        PanelType::Combo => window.combo_border,
        PanelType::Menu => window.menu_border,
        PanelType::Tooltip => window.tooltip_border,
        PanelType::Window | PanelType::None => window.border,
    }
}

fn panel_border_color(style: &Style, kind: PanelType) -> Color {
    let window = &style.window;
    match kind {
        PanelType::Group => window.group_border_color,
        PanelType::Popup => window.popup_border_color,
        PanelType::Contextual => window.contextual_border_color,
        PanelType::Combo => window.combo_border_color,
        PanelType::Menu => window.menu_border_color,
        PanelType::Tooltip => window.tooltip_border_color,
        PanelType::Window | PanelType::None => window.border_color,
    }
}

fn has_header(flags: WindowFlags, title: Option<&str>) -> bool {
    flags.intersects(WindowFlags::CLOSABLE | WindowFlags::MINIMIZABLE | WindowFlags::TITLE)
        && !flags.contains(WindowFlags::HIDDEN)
        && title.is_some()
}

impl Context {
    fn header_height(&self, font_height: f32) -> f32 {
        let header = &self.style.window.header;
        font_height + 2.0 * header.padding.y + 2.0 * header.label_padding.y
    }

    pub(crate) fn default_min_row_height(&self) -> f32 {
        self.font().height() + self.style.text.padding.y * 2.0 + self.style.window.min_row_height_padding * 2.0
    }

    /// Lays out the panel's chrome and stores its layout under `host.panel`.
    /// Returns whether the panel body is visible.
    pub(crate) fn panel_begin(&mut self, host: &mut PanelHost, title: Option<&str>, kind: PanelType) -> bool {
        let font = self.font();
        let font_id = self.style.font.0;
        let font_height = font.height();
        let window_style = self.style.window;
        let header_style = window_style.header;
        let scrollbar_size = window_style.scrollbar_size;
        let padding = panel_padding(&self.style, kind);
        let no_input = host.flags.contains(WindowFlags::NO_INPUT);

        if host.flags.contains(WindowFlags::MOVABLE) && !host.flags.contains(WindowFlags::ROM) && !no_input {
            let height = if has_header(host.flags, title) {
                self.header_height(font_height)
            } else {
                padding.y
            };
            let header = Rect::new(host.bounds.x, host.bounds.y, host.bounds.w, height);
            let left = *self.input.mouse.button(MouseButton::Left);
            if left.down
                && left.clicked == 0
                && self.input.has_mouse_click_down_in_rect(MouseButton::Left, header, true)
            {
                let delta = self.input.mouse.delta;
                host.bounds.x += delta.x;
                host.bounds.y += delta.y;
                self.input.mouse.button_mut(MouseButton::Left).clicked_pos += delta;
                self.style.cursor_active = CursorKind::Move;
            }
        }

        let mut panel = Panel {
            kind,
            flags: host.flags,
            has_scrolling: true,
            host_bounds: host.bounds,
            ..Panel::default()
        };
        let mut bounds = host.bounds;
        bounds.x += padding.x;
        bounds.w -= 2.0 * padding.x;
        let border = panel_border(&self.style, host.flags, kind);
        if host.flags.contains(WindowFlags::BORDER) {
            bounds = bounds.shrink(border);
        }
        let mut layout = PanelLayout::new(bounds, padding.y, self.default_min_row_height());
        layout.border = border;
        layout.offset = host.scroll;
        if !host.flags.contains(WindowFlags::NO_SCROLLBAR) {
            layout.bounds.w -= scrollbar_size.x;
        }
        if !kind.is_nonblock() {
            if !host.flags.contains(WindowFlags::NO_SCROLLBAR) || host.flags.contains(WindowFlags::SCALABLE) {
                layout.footer_height = scrollbar_size.y;
            }
            layout.bounds.h -= layout.footer_height;
        }

        let is_active = host.kind == HostKind::Window && self.active == Some(host.window);
        let mut canvas = Canvas {
            buffer: &mut host.buffer,
            arena: &mut self.memory,
            font: &*font,
            font_id,
        };
        let input = (!no_input).then_some(&self.input);

        if let Some(title) = title.filter(|_| has_header(host.flags, title)) {
            let mut header = Rect::new(
                host.bounds.x,
                host.bounds.y,
                host.bounds.w,
                font_height + 2.0 * header_style.padding.y + 2.0 * header_style.label_padding.y,
            );
            layout.header_height = header.h;
            layout.bounds.y += header.h;
            layout.bounds.h -= header.h;
            layout.at_y += header.h;

            let (background, label_color) = if is_active {
                (header_style.active, header_style.label_active)
            } else if self.input.is_mouse_hovering_rect(header) {
                (header_style.hover, header_style.label_hover)
            } else {
                (header_style.normal, header_style.label_normal)
            };
            header.h += 1.0;
            canvas.fill_item(header, &background, 0.0, None);
            let text_background = background.color_or(Color::TRANSPARENT);

            let mut button = Rect::new(0.0, header.y + header_style.padding.y, 0.0, header.h - 2.0 * header_style.padding.y);
            button.w = button.h;
            if host.flags.contains(WindowFlags::CLOSABLE) {
                if header_style.align == HeaderAlign::Right {
                    button.x = header.max_x() - (button.w + header_style.padding.x);
                    header.w -= button.w + header_style.spacing.x + header_style.padding.x;
                } else {
                    button.x = header.x + header_style.padding.x;
                    header.x += button.w + header_style.spacing.x + header_style.padding.x;
                }
                let mut ws = WidgetStates::empty();
                if canvas.do_button_symbol(
                    &mut ws,
                    button,
                    header_style.close_symbol,
                    ButtonBehavior::Default,
                    &header_style.close_button,
                    input,
                ) && !host.flags.contains(WindowFlags::ROM)
                {
                    panel.flags.insert(WindowFlags::HIDDEN);
                    panel.flags.remove(WindowFlags::MINIMIZED);
                }
            }
            if host.flags.contains(WindowFlags::MINIMIZABLE) {
                if header_style.align == HeaderAlign::Right {
                    button.x = header.max_x() - button.w;
                    if !host.flags.contains(WindowFlags::CLOSABLE) {
                        button.x -= header_style.padding.x;
                        header.w -= header_style.padding.x;
                    }
                    header.w -= button.w + header_style.spacing.x;
                } else {
                    button.x = header.x;
                    header.x += button.w + header_style.spacing.x + header_style.padding.x;
                }
                let symbol = if panel.flags.contains(WindowFlags::MINIMIZED) {
                    header_style.maximize_symbol
                } else {
                    header_style.minimize_symbol
                };
                let mut ws = WidgetStates::empty();
                if canvas.do_button_symbol(
                    &mut ws,
                    button,
                    symbol,
                    ButtonBehavior::Default,
                    &header_style.minimize_button,
                    input,
                ) && !host.flags.contains(WindowFlags::ROM)
                {
                    panel.flags.toggle(WindowFlags::MINIMIZED);
                }
            }

            let mut label = Rect::new(
                header.x + header_style.padding.x + header_style.label_padding.x,
                header.y + header_style.label_padding.y,
                0.0,
                font_height + 2.0 * header_style.label_padding.y,
            );
            label.w = (font.text_width(title) + 2.0 * header_style.spacing.x).clamp(0.0, (header.max_x() - label.x).max(0.0));
            let paint = TextPaint {
                padding: Vec2::ZERO,
                background: text_background,
                color: label_color,
            };
            canvas.text(label, title, &paint, TextAlign::LEFT);
        }

        if !panel.flags.intersects(WindowFlags::MINIMIZED | WindowFlags::DYNAMIC) {
            let body = Rect::new(
                host.bounds.x,
                host.bounds.y + layout.header_height,
                host.bounds.w,
                host.bounds.h - layout.header_height,
            );
            canvas.fill_item(body, &window_style.fixed_background, window_style.rounding, None);
        }

        let clip = canvas
            .buffer
            .clip
            .unify(layout.bounds.x, layout.bounds.y, layout.bounds.max_x(), layout.bounds.max_y());
        canvas.push_scissor(clip);
        layout.clip = clip;

        panel.layout = layout;
        let visible = !panel.flags.intersects(WindowFlags::HIDDEN | WindowFlags::MINIMIZED);
        if let Some(slot) = self.panel_mut(host.panel) {
            *slot = panel;
        }
        visible
    }

    fn root_window(&self, mut id: WindowId) -> WindowId {
        while let Some(parent) = self.window(id).and_then(|w| w.parent) {
            id = parent;
        }
        id
    }

    fn root_panel(&self, mut id: PanelId) -> PanelId {
        while let Some(parent) = self.panel(id).and_then(|p| p.parent) {
            id = parent;
        }
        id
    }

    /// Finishes the panel under `host.panel`: scrollbars, border, scaler and,
    /// for top-level windows, the command buffer.
    pub(crate) fn panel_end(&mut self, host: &mut PanelHost) {
        let Some(mut panel) = self.panel(host.panel).copied() else {
            log::warn!("panel end without a matching begin");
            return;
        };
        let font = self.font();
        let font_id = self.style.font.0;
        let window_style = self.style.window;
        let (scrollv, scrollh) = (self.style.scrollv, self.style.scrollh);
        let scrollbar_size = window_style.scrollbar_size;
        let padding = panel_padding(&self.style, panel.kind);
        let border_color = panel_border_color(&self.style, panel.kind);
        let rom = panel.flags.intersects(WindowFlags::NOT_INTERACTIVE);

        let scroll_has_scrolling = if panel.kind.is_sub() {
            let root_window = self.root_window(host.window);
            let root_clip = self
                .panel(self.root_panel(host.panel))
                .map_or(Rect::ZERO, |root| root.layout.clip);
            let bounds = panel.layout.bounds;
            if self.active == Some(root_window)
                && panel.has_scrolling
                && !rom
                && self.input.is_mouse_hovering_rect(bounds)
                && bounds.intersects(&root_clip)
            {
                let mut cursor = panel.parent;
                while let Some(id) = cursor {
                    cursor = self.panel_mut(id).and_then(|parent| {
                        parent.has_scrolling = false;
                        parent.parent
                    });
                }
                true
            } else {
                false
            }
        } else {
            let has = self.active == Some(host.window) && panel.has_scrolling;
            let wheel = self.input.mouse.scroll_delta;
            let scrolled = !rom && has && (wheel.y > 0.0 || wheel.x > 0.0);
            if let Some(win) = self.window_mut(host.window) {
                win.scrolled = scrolled;
            }
            has
        };

        if !panel.kind.is_sub() {
            host.buffer.push_scissor(&mut self.memory, Rect::NULL);
        }

        let mut canvas = Canvas {
            buffer: &mut host.buffer,
            arena: &mut self.memory,
            font: &*font,
            font_id,
        };
        let mut input = (!rom).then_some(&mut self.input);
        let layout = &mut panel.layout;
        layout.at_y += layout.row.height;

        if panel.flags.contains(WindowFlags::DYNAMIC) && !panel.flags.contains(WindowFlags::MINIMIZED) {
            if layout.at_y < layout.bounds.max_y() {
                layout.bounds.h = layout.at_y - layout.bounds.y;
            }
            let background = window_style.background;
            let side = padding.x + layout.border;
            canvas.fill_rect(Rect::new(host.bounds.x, layout.bounds.y, host.bounds.w, padding.y), 0.0, background);
            canvas.fill_rect(Rect::new(host.bounds.x, layout.bounds.y, side, layout.bounds.h), 0.0, background);
            let mut right = Rect::new(layout.bounds.max_x(), layout.bounds.y, side, layout.bounds.h);
            if layout.offset.y == 0 && !panel.flags.contains(WindowFlags::NO_SCROLLBAR) {
                right.w += scrollbar_size.x;
            }
            canvas.fill_rect(right, 0.0, background);
            if layout.footer_height > 0.0 {
                let bottom = Rect::new(host.bounds.x, layout.bounds.max_y(), host.bounds.w, layout.footer_height);
                canvas.fill_rect(bottom, 0.0, background);
            }
        }

        if !panel.flags.intersects(WindowFlags::NO_SCROLLBAR | WindowFlags::MINIMIZED) {
            let track = Rect::new(
                layout.bounds.max_x() + padding.x,
                layout.bounds.y,
                scrollbar_size.x,
                layout.bounds.h,
            );
            let mut ws = WidgetStates::empty();
            let offset = canvas.do_scrollbar(
                Orientation::Vertical,
                &mut ws,
                track,
                scroll_has_scrolling,
                layout.offset.y as f32,
                (layout.at_y - track.y).trunc(),
                track.h * 0.10,
                &scrollv,
                input.as_deref_mut(),
            );
            layout.offset.y = offset as u32;
            if scroll_has_scrolling {
                if let Some(input) = input.as_deref_mut() {
                    input.mouse.scroll_delta.y = 0.0;
                }
            }

            let track = Rect::new(layout.bounds.x, layout.bounds.max_y(), layout.bounds.w, scrollbar_size.y);
            let mut ws = WidgetStates::empty();
            let offset = canvas.do_scrollbar(
                Orientation::Horizontal,
                &mut ws,
                track,
                scroll_has_scrolling,
                layout.offset.x as f32,
                (layout.max_x - track.x).trunc(),
                layout.max_x * 0.05,
                &scrollh,
                input.as_deref_mut(),
            );
            layout.offset.x = offset as u32;
        }

        if panel.flags.contains(WindowFlags::BORDER) {
            let bottom = if panel.flags.contains(WindowFlags::MINIMIZED) {
                window_style.border + host.bounds.y + layout.header_height
            } else if panel.flags.contains(WindowFlags::DYNAMIC) {
                layout.bounds.max_y() + layout.footer_height
            } else {
                host.bounds.max_y()
            };
            let mut frame = host.bounds;
            frame.h = bottom - host.bounds.y;
            canvas.stroke_rect(frame, window_style.rounding, layout.border, border_color);
        }

        let mut cursor = None;
        if panel.flags.contains(WindowFlags::SCALABLE) && !panel.flags.contains(WindowFlags::MINIMIZED) {
            if let Some(input) = input.as_deref_mut() {
                let mut scaler = Rect::new(0.0, layout.bounds.max_y(), scrollbar_size.x, scrollbar_size.y);
                scaler.x = if panel.flags.contains(WindowFlags::SCALE_LEFT) {
                    layout.bounds.x - padding.x * 0.5
                } else {
                    layout.bounds.max_x() + padding.x
                };
                if panel.flags.contains(WindowFlags::NO_SCROLLBAR) {
                    scaler.x -= scaler.w;
                }

                match window_style.scaler {
                    StyleItem::Image(_) => canvas.fill_item(scaler, &window_style.scaler, 0.0, None),
                    StyleItem::Color(color) => {
                        let points = if panel.flags.contains(WindowFlags::SCALE_LEFT) {
                            [
                                Vec2::new(scaler.x, scaler.y),
                                Vec2::new(scaler.x, scaler.max_y()),
                                Vec2::new(scaler.max_x(), scaler.max_y()),
                            ]
                        } else {
                            [
                                Vec2::new(scaler.max_x(), scaler.y),
                                Vec2::new(scaler.max_x(), scaler.max_y()),
                                Vec2::new(scaler.x, scaler.max_y()),
                            ]
                        };
                        canvas.buffer.fill_triangle(canvas.arena, points, color);
                    }
                }

                if !host.flags.contains(WindowFlags::ROM) {
                    let min_size = window_style.min_size;
                    let left_down = input.is_mouse_down(MouseButton::Left);
                    if left_down && input.has_mouse_click_down_in_rect(MouseButton::Left, scaler, true) {
                        let delta = input.mouse.delta;
                        let mut delta_x = delta.x;
                        if panel.flags.contains(WindowFlags::SCALE_LEFT) {
                            delta_x = -delta_x;
                            host.bounds.x += delta.x;
                        }
                        if host.bounds.w + delta_x >= min_size.x
                            && (delta_x < 0.0 || (delta_x > 0.0 && input.mouse.pos.x >= scaler.x))
                        {
                            host.bounds.w += delta_x;
                            scaler.x += delta.x;
                        }
                        if !panel.flags.contains(WindowFlags::DYNAMIC)
                            && min_size.y < host.bounds.h + delta.y
                            && (delta.y < 0.0 || (delta.y > 0.0 && input.mouse.pos.y >= scaler.y))
                        {
                            host.bounds.h += delta.y;
                            scaler.y += delta.y;
                        }
                        let clicked_pos = &mut input.mouse.button_mut(MouseButton::Left).clicked_pos;
                        clicked_pos.x = scaler.x + scaler.w / 2.0;
                        clicked_pos.y = scaler.y + scaler.h / 2.0;
                        cursor = Some(CursorKind::ResizeTopRightDownLeft);
                    }
                }
            }
        }
        if let Some(kind) = cursor {
            self.style.cursor_active = kind;
        }

        if !panel.kind.is_sub() {
            if panel.flags.contains(WindowFlags::HIDDEN) {
                host.buffer.reset();
            } else {
                self.finish_window(host);
            }
        }

        if panel.flags.contains(WindowFlags::REMOVE_ROM) {
            panel.flags.remove(WindowFlags::ROM | WindowFlags::REMOVE_ROM);
        }
        host.flags = panel.flags;
        host.scroll = panel.layout.offset;
        debug_assert_eq!(panel.layout.row.tree_depth, 0, "every tree push needs a matching pop");
        if let Some(slot) = self.panel_mut(host.panel) {
            *slot = panel;
        }

        if host.kind == HostKind::Window {
            if let Some(win) = self.window_mut(host.window) {
                let popup = &mut win.popup;
                if popup.active_con != 0 && popup.con_old != popup.con_count {
                    popup.con_count = 0;
                    popup.con_old = 0;
                    popup.active_con = 0;
                } else {
                    popup.con_old = popup.con_count;
                    popup.con_count = 0;
                }
                popup.combo_count = 0;
            }
        }
    }

    /// Seals a top-level window's buffer and pulls the records of its popup
    /// out of it so they can be drawn above every window.
    fn finish_window(&mut self, host: &mut PanelHost) {
        host.buffer.finish(&self.memory);
        let Some(buf) = self.window(host.window).map(|w| w.popup.buf) else {
            return;
        };
        if !buf.active {
            return;
        }
        if let (Some(first), Some(last)) = (buf.first, buf.last) {
            let after = buf.start.and_then(|start| start.last());
            host.buffer.detach(&mut self.memory, after, first, last);
            log::trace!("detached popup commands {first}..={last} from window buffer");
        }
    }

    /// Host view of a window record.
    pub(crate) fn window_host(&self, id: WindowId, panel: PanelId) -> Option<PanelHost> {
        let win = self.window(id)?;
        Some(PanelHost {
            kind: HostKind::Window,
            window: id,
            panel,
            bounds: win.bounds,
            flags: win.flags,
            scroll: win.scrollbar,
            buffer: win.buffer,
        })
    }

    /// Writes a window host back into its window record.
    pub(crate) fn commit_window_host(&mut self, host: &PanelHost) {
        if let Some(win) = self.window_mut(host.window) {
            win.bounds = host.bounds;
            win.flags = host.flags;
            win.scrollbar = host.scroll;
            win.buffer = host.buffer;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panel_type_sets() {
        assert!(PanelType::Combo.is_nonblock());
        assert!(!PanelType::Popup.is_nonblock());
        assert!(PanelType::Tooltip.is_popup());
        assert!(PanelType::Group.is_sub());
        assert!(!PanelType::Window.is_sub());
    }

    #[test]
    fn border_only_applies_with_flag() {
        let style = Style::default();
        assert_eq!(panel_border(&style, WindowFlags::empty(), PanelType::Window), 0.0);
        assert_eq!(
            panel_border(&style, WindowFlags::BORDER, PanelType::Group),
            style.window.group_border
        );
    }

    #[test]
    fn header_requires_title_and_flag() {
        assert!(has_header(WindowFlags::TITLE, Some("x")));
        assert!(!has_header(WindowFlags::TITLE, None));
        assert!(!has_header(WindowFlags::BORDER, Some("x")));
        assert!(!has_header(WindowFlags::TITLE | WindowFlags::HIDDEN, Some("x")));
    }
}
