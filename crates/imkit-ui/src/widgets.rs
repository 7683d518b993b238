//! Widget behaviors and drawing primitives
//!
//! The free functions here are shared by window chrome (header buttons,
//! scrollbars) and by the widgets exposed on [`Context`]. They never touch the
//! context directly: callers hand them a [`Canvas`] and, when the widget may
//! react to the user, the input snapshot.

use crate::context::Context;
use crate::input::{Input, Key, MouseButton};
use crate::stack::ButtonBehavior;
use crate::style::{ButtonStyle, ScrollbarStyle, StyleItem, Symbol, TextAlign, ToggleStyle};
use bitflags::bitflags;
use imkit_core::{ArenaBuffer, CommandBuffer, Font};
use imkit_graphics::{Color, Rect, Vec2};

bitflags! {
    /// Interaction state of the most recent widget.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct WidgetStates: u32 {
        const MODIFIED = 1 << 1;
        const INACTIVE = 1 << 2;
        const ENTERED = 1 << 3;
        const HOVER = 1 << 4;
        const ACTIVED = 1 << 5;
        const LEFT = 1 << 6;

        const HOVERED = Self::HOVER.bits() | Self::MODIFIED.bits();
        const ACTIVE = Self::ACTIVED.bits() | Self::MODIFIED.bits();
    }
}

impl WidgetStates {
    fn reset(&mut self) {
        *self = if self.contains(WidgetStates::MODIFIED) {
            WidgetStates::INACTIVE | WidgetStates::MODIFIED
        } else {
            WidgetStates::INACTIVE
        };
    }
}

/// Outcome of claiming space for a widget.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WidgetLayoutState {
    /// Entirely outside the visible region; nothing should be drawn.
    Invalid,
    /// Visible and may react to input.
    Valid,
    /// Visible but the mouse is elsewhere, so input can be skipped.
    Rom,
    /// Visible but widgets of the window are disabled.
    Disabled,
}

impl WidgetLayoutState {
    pub fn is_visible(self) -> bool {
        self != WidgetLayoutState::Invalid
    }

    pub fn accepts_input(self) -> bool {
        self == WidgetLayoutState::Valid
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Orientation {
    Vertical,
    Horizontal,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Heading {
    Up,
    Right,
    Down,
    Left,
}

/// Colors and insets of a piece of text.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct TextPaint {
    pub padding: Vec2,
    pub background: Color,
    pub color: Color,
}

/// A command buffer paired with the arena it records into.
pub(crate) struct Canvas<'a> {
    pub buffer: &'a mut CommandBuffer,
    pub arena: &'a mut ArenaBuffer,
    pub font: &'a dyn Font,
    pub font_id: u32,
}

pub(crate) fn triangle_from_direction(r: Rect, pad: Vec2, heading: Heading) -> [Vec2; 3] {
    let r = r.pad(pad);
    let w_half = r.w / 2.0;
    let h_half = r.h / 2.0;
    match heading {
        Heading::Up => [
            Vec2::new(r.x + w_half, r.y),
            Vec2::new(r.max_x(), r.max_y()),
            Vec2::new(r.x, r.max_y()),
        ],
        Heading::Right => [
            Vec2::new(r.x, r.y),
            Vec2::new(r.max_x(), r.y + h_half),
            Vec2::new(r.x, r.max_y()),
        ],
        Heading::Down => [
            Vec2::new(r.x, r.y),
            Vec2::new(r.max_x(), r.y),
            Vec2::new(r.x + w_half, r.max_y()),
        ],
        Heading::Left => [
            Vec2::new(r.x, r.y + h_half),
            Vec2::new(r.max_x(), r.y),
            Vec2::new(r.max_x(), r.max_y()),
        ],
    }
}

impl Canvas<'_> {
    pub fn fill_rect(&mut self, rect: Rect, rounding: f32, color: Color) {
        self.buffer.fill_rect(self.arena, rect, rounding, color);
    }

    pub fn stroke_rect(&mut self, rect: Rect, rounding: f32, thickness: f32, color: Color) {
        self.buffer.stroke_rect(self.arena, rect, rounding, thickness, color);
    }

    pub fn push_scissor(&mut self, rect: Rect) {
        self.buffer.push_scissor(self.arena, rect);
    }

    /// Paints a style item; color items also get an optional border.
    pub fn fill_item(&mut self, rect: Rect, item: &StyleItem, rounding: f32, border: Option<(f32, Color)>) {
        match item {
            StyleItem::Image(image) => self.buffer.draw_image(self.arena, rect, image, Color::WHITE),
            StyleItem::Color(color) => {
                self.fill_rect(rect, rounding, *color);
                if let Some((thickness, border_color)) = border {
                    self.stroke_rect(rect, rounding, thickness, border_color);
                }
            }
        }
    }

    /// Draws `text` aligned inside `bounds`.
    pub fn text(&mut self, bounds: Rect, text: &str, paint: &TextPaint, align: TextAlign) {
        let font_height = self.font.height();
        let mut b = bounds;
        b.h = b.h.max(2.0 * paint.padding.y);

        let mut label = Rect::new(0.0, b.y + paint.padding.y, 0.0, font_height.min(b.h - 2.0 * paint.padding.y));
        let text_width = self.font.text_width(text) + 2.0 * paint.padding.x;

        if align.contains(TextAlign::ALIGN_LEFT) {
            label.x = b.x + paint.padding.x;
            label.w = (b.w - 2.0 * paint.padding.x).max(0.0);
        } else if align.contains(TextAlign::ALIGN_CENTERED) {
            label.w = (2.0 * paint.padding.x + text_width).max(1.0);
            label.x = b.x + paint.padding.x + ((b.w - 2.0 * paint.padding.x) - label.w) / 2.0;
            label.x = label.x.max(b.x + paint.padding.x);
            label.w = b.max_x().min(label.x + label.w);
            if label.w >= label.x {
                label.w -= label.x;
            }
        } else if align.contains(TextAlign::ALIGN_RIGHT) {
            label.x = (b.x + paint.padding.x).max(b.max_x() - (2.0 * paint.padding.x + text_width));
            label.w = text_width + 2.0 * paint.padding.x;
        } else {
            return;
        }

        if align.contains(TextAlign::ALIGN_MIDDLE) {
            label.y = b.y + b.h / 2.0 - font_height / 2.0;
            label.h = (b.h / 2.0).max(b.h - (b.h / 2.0 + font_height / 2.0));
        } else if align.contains(TextAlign::ALIGN_BOTTOM) {
            label.y = b.y + b.h - font_height;
            label.h = font_height;
        }
        self.buffer
            .draw_text(self.arena, label, text, self.font_id, self.font, paint.background, paint.color);
    }

    pub fn symbol(&mut self, symbol: Symbol, content: Rect, background: Color, foreground: Color, border_width: f32) {
        match symbol {
            Symbol::X | Symbol::Underscore | Symbol::Plus | Symbol::Minus => {
                let glyph = match symbol {
                    Symbol::X => "x",
                    Symbol::Underscore => "_",
                    Symbol::Plus => "+",
                    _ => "-",
                };
                let paint = TextPaint {
                    padding: Vec2::ZERO,
                    background,
                    color: foreground,
                };
                self.text(content, glyph, &paint, TextAlign::CENTERED);
            }
            Symbol::RectSolid | Symbol::RectOutline => {
                self.fill_rect(content, 0.0, foreground);
                if symbol == Symbol::RectOutline {
                    self.fill_rect(content.shrink(border_width), 0.0, background);
                }
            }
            Symbol::CircleSolid | Symbol::CircleOutline => {
                self.buffer.fill_circle(self.arena, content, foreground);
                if symbol == Symbol::CircleOutline {
                    self.buffer.fill_circle(self.arena, content.shrink(1.0), background);
                }
            }
            Symbol::TriangleUp | Symbol::TriangleDown | Symbol::TriangleLeft | Symbol::TriangleRight => {
                let heading = match symbol {
                    Symbol::TriangleRight => Heading::Right,
                    Symbol::TriangleLeft => Heading::Left,
                    Symbol::TriangleUp => Heading::Up,
                    _ => Heading::Down,
                };
                let points = triangle_from_direction(content, Vec2::ZERO, heading);
                self.buffer.fill_triangle(self.arena, points, foreground);
            }
            Symbol::None => {}
        }
    }

    /// Paints the button frame for `state` and returns the item used.
    pub fn button_frame(&mut self, bounds: Rect, state: WidgetStates, style: &ButtonStyle) -> StyleItem {
        let background = if state.contains(WidgetStates::HOVER) {
            style.hover
        } else if state.contains(WidgetStates::ACTIVED) {
            style.active
        } else {
            style.normal
        };
        self.fill_item(bounds, &background, style.rounding, Some((style.border, style.border_color)));
        background
    }

    fn button_colors(state: WidgetStates, background: &StyleItem, style: &ButtonStyle) -> (Color, Color) {
        let bg = background.color_or(style.text_background);
        let fg = if state.contains(WidgetStates::HOVER) {
            style.text_hover
        } else if state.contains(WidgetStates::ACTIVED) {
            style.text_active
        } else {
            style.text_normal
        };
        (bg, fg)
    }

    pub fn draw_button_text(
        &mut self,
        bounds: Rect,
        content: Rect,
        state: WidgetStates,
        style: &ButtonStyle,
        text: &str,
        align: TextAlign,
    ) {
        let background = self.button_frame(bounds, state, style);
        let (bg, fg) = Self::button_colors(state, &background, style);
        let paint = TextPaint {
            padding: Vec2::ZERO,
            background: bg,
            color: fg,
        };
        self.text(content, text, &paint, align);
    }

    pub fn draw_button_symbol(
        &mut self,
        bounds: Rect,
        content: Rect,
        state: WidgetStates,
        style: &ButtonStyle,
        symbol: Symbol,
    ) {
        let background = self.button_frame(bounds, state, style);
        let (bg, fg) = Self::button_colors(state, &background, style);
        self.symbol(symbol, content, bg, fg, 1.0);
    }

    #[allow(clippy::too_many_arguments)]
    pub fn do_button_text(
        &mut self,
        state: &mut WidgetStates,
        bounds: Rect,
        text: &str,
        align: TextAlign,
        behavior: ButtonBehavior,
        style: &ButtonStyle,
        input: Option<&Input>,
    ) -> bool {
        let (clicked, content) = do_button(state, bounds, style, input, behavior);
        self.draw_button_text(bounds, content, *state, style, text, align);
        clicked
    }

    pub fn do_button_symbol(
        &mut self,
        state: &mut WidgetStates,
        bounds: Rect,
        symbol: Symbol,
        behavior: ButtonBehavior,
        style: &ButtonStyle,
        input: Option<&Input>,
    ) -> bool {
        let (clicked, content) = do_button(state, bounds, style, input, behavior);
        self.draw_button_symbol(bounds, content, *state, style, symbol);
        clicked
    }

    /// Checkbox with a trailing label. Returns whether `active` changed.
    pub fn do_toggle(
        &mut self,
        state: &mut WidgetStates,
        bounds: Rect,
        active: &mut bool,
        text: &str,
        style: &ToggleStyle,
        input: Option<&Input>,
    ) -> bool {
        let font_height = self.font.height();
        let mut r = bounds;
        r.w = r.w.max(font_height + 2.0 * style.padding.x);
        r.h = r.h.max(font_height + 2.0 * style.padding.y);
        let touch = Rect::new(
            r.x - style.touch_padding.x,
            r.y - style.touch_padding.y,
            r.w + 2.0 * style.touch_padding.x,
            r.h + 2.0 * style.touch_padding.y,
        );

        let select = Rect::new(r.x, r.y + r.h / 2.0 - font_height / 2.0, font_height, font_height);
        let cursor = Rect::new(
            select.x + style.padding.x + style.border,
            select.y + style.padding.y + style.border,
            select.w - (2.0 * style.padding.x + 2.0 * style.border),
            select.h - (2.0 * style.padding.y + 2.0 * style.border),
        );
        let label_x = select.max_x() + style.spacing;
        let label = Rect::new(label_x, select.y, r.max_x().max(label_x) - label_x, select.w);

        let was_active = *active;
        *active = toggle_behavior(input, touch, state, *active);

        let (background, cursor_item, text_color) = if state.contains(WidgetStates::HOVER) {
            (style.hover, style.cursor_hover, style.text_hover)
        } else if state.contains(WidgetStates::ACTIVED) {
            (style.hover, style.cursor_hover, style.text_active)
        } else {
            (style.normal, style.cursor_normal, style.text_normal)
        };
        match background {
            StyleItem::Color(color) => {
                self.fill_rect(select, 0.0, style.border_color);
                self.fill_rect(select.shrink(style.border), 0.0, color);
            }
            StyleItem::Image(_) => self.fill_item(select, &background, 0.0, None),
        }
        if *active {
            self.fill_item(cursor, &cursor_item, 0.0, None);
        }
        let paint = TextPaint {
            padding: Vec2::ZERO,
            background: style.text_background,
            color: text_color,
        };
        self.text(label, text, &paint, style.text_alignment);
        was_active != *active
    }

    fn draw_scrollbar(&mut self, state: WidgetStates, style: &ScrollbarStyle, bounds: Rect, cursor: Rect) {
        let (background, cursor_item) = if state.contains(WidgetStates::ACTIVED) {
            (style.active, style.cursor_active)
        } else if state.contains(WidgetStates::HOVER) {
            (style.hover, style.cursor_hover)
        } else {
            (style.normal, style.cursor_normal)
        };
        self.fill_item(bounds, &background, style.rounding, Some((style.border, style.border_color)));
        self.fill_item(
            cursor,
            &cursor_item,
            style.rounding_cursor,
            Some((style.border_cursor, style.cursor_border_color)),
        );
    }

    /// Scrollbar along `orientation`; returns the new offset. An offset of
    /// zero is returned when `target` fits into the track.
    #[allow(clippy::too_many_arguments)]
    pub fn do_scrollbar(
        &mut self,
        orientation: Orientation,
        state: &mut WidgetStates,
        track: Rect,
        has_scrolling: bool,
        offset: f32,
        target: f32,
        step: f32,
        style: &ScrollbarStyle,
        input: Option<&mut Input>,
    ) -> f32 {
        let mut scroll = track;
        let (length, cursor, empty_before, empty_after) = match orientation {
            Orientation::Vertical => {
                scroll.w = scroll.w.max(1.0);
                scroll.h = scroll.h.max(0.0);
                if target <= scroll.h {
                    return 0.0;
                }
                let offset = offset.clamp(0.0, target - scroll.h);
                let cursor = Rect::new(
                    scroll.x + style.border + style.padding.x,
                    scroll.y + (offset / target) * scroll.h + style.border + style.padding.y,
                    scroll.w - (2.0 * style.border + 2.0 * style.padding.x),
                    ((scroll.h / target) * scroll.h - (2.0 * style.border + 2.0 * style.padding.y)).max(0.0),
                );
                let north = Rect::new(scroll.x, scroll.y, scroll.w, (cursor.y - scroll.y).max(0.0));
                let south = Rect::new(
                    scroll.x,
                    cursor.max_y(),
                    scroll.w,
                    (scroll.max_y() - cursor.max_y()).max(0.0),
                );
                (scroll.h, cursor, north, south)
            }
            Orientation::Horizontal => {
                scroll.h = scroll.h.max(1.0);
                scroll.w = scroll.w.max(2.0 * scroll.h);
                if target <= scroll.w {
                    return 0.0;
                }
                let offset = offset.clamp(0.0, target - scroll.w);
                let cursor = Rect::new(
                    scroll.x + (offset / target) * scroll.w + style.border + style.padding.x,
                    scroll.y + style.border + style.padding.y,
                    (scroll.w / target) * scroll.w - (2.0 * style.border + 2.0 * style.padding.x),
                    scroll.h - (2.0 * style.border + 2.0 * style.padding.y),
                );
                let west = Rect::new(scroll.x, scroll.y, cursor.x - scroll.x, scroll.h);
                let east = Rect::new(cursor.max_x(), scroll.y, scroll.max_x() - cursor.max_x(), scroll.h);
                (scroll.w, cursor, west, east)
            }
        };

        let offset = offset.clamp(0.0, target - length);
        let offset = scrollbar_behavior(
            state,
            input,
            has_scrolling,
            scroll,
            cursor,
            empty_before,
            empty_after,
            offset,
            target,
            step.min(length),
            orientation,
        );

        let mut cursor = cursor;
        match orientation {
            Orientation::Vertical => {
                cursor.y = scroll.y + (offset / target) * scroll.h + style.border_cursor + style.padding.y;
            }
            Orientation::Horizontal => cursor.x = scroll.x + (offset / target) * scroll.w,
        }
        self.draw_scrollbar(*state, style, scroll, cursor);
        offset
    }
}

/// Hover, press and trigger logic shared by every clickable widget.
pub(crate) fn button_behavior(
    state: &mut WidgetStates,
    r: Rect,
    input: Option<&Input>,
    behavior: ButtonBehavior,
) -> bool {
    state.reset();
    let Some(input) = input else {
        return false;
    };
    let mut triggered = false;
    if input.is_mouse_hovering_rect(r) {
        *state = WidgetStates::HOVERED;
        if input.is_mouse_down(MouseButton::Left) {
            *state = WidgetStates::ACTIVE;
        }
        if input.has_mouse_click_in_rect(MouseButton::Left, r) {
            triggered = match behavior {
                ButtonBehavior::Default => input.is_mouse_pressed(MouseButton::Left),
                ButtonBehavior::Repeater => input.is_mouse_down(MouseButton::Left),
            };
        }
    }
    track_enter_leave(state, input, r);
    triggered
}

fn track_enter_leave(state: &mut WidgetStates, input: &Input, r: Rect) {
    if state.contains(WidgetStates::HOVER) && !input.is_mouse_prev_hovering_rect(r) {
        *state |= WidgetStates::ENTERED;
    } else if input.is_mouse_prev_hovering_rect(r) {
        *state |= WidgetStates::LEFT;
    }
}

/// Runs the button behavior over the touch area of `r`; returns whether it
/// triggered and the content rectangle inside the frame.
pub(crate) fn do_button(
    state: &mut WidgetStates,
    r: Rect,
    style: &ButtonStyle,
    input: Option<&Input>,
    behavior: ButtonBehavior,
) -> (bool, Rect) {
    let content = Rect::new(
        r.x + style.padding.x + style.border + style.rounding,
        r.y + style.padding.y + style.border + style.rounding,
        r.w - (2.0 * style.padding.x + style.border + style.rounding * 2.0),
        r.h - (2.0 * style.padding.y + style.border + style.rounding * 2.0),
    );
    let touch = Rect::new(
        r.x - style.touch_padding.x,
        r.y - style.touch_padding.y,
        r.w + 2.0 * style.touch_padding.x,
        r.h + 2.0 * style.touch_padding.y,
    );
    (button_behavior(state, touch, input, behavior), content)
}

fn toggle_behavior(input: Option<&Input>, select: Rect, state: &mut WidgetStates, active: bool) -> bool {
    state.reset();
    let mut active = active;
    if button_behavior(state, select, input, ButtonBehavior::Default) {
        *state = WidgetStates::ACTIVE;
        active = !active;
    }
    if let Some(input) = input {
        track_enter_leave(state, input, select);
    }
    active
}

#[allow(clippy::too_many_arguments)]
fn scrollbar_behavior(
    state: &mut WidgetStates,
    input: Option<&mut Input>,
    has_scrolling: bool,
    scroll: Rect,
    cursor: Rect,
    empty_before: Rect,
    empty_after: Rect,
    offset: f32,
    target: f32,
    step: f32,
    orientation: Orientation,
) -> f32 {
    state.reset();
    let Some(input) = input else {
        return offset;
    };
    let vertical = orientation == Orientation::Vertical;
    let length = if vertical { scroll.h } else { scroll.w };
    let mut offset = offset;

    let left = *input.mouse.button(MouseButton::Left);
    let click_in_cursor = input.has_mouse_click_down_in_rect(MouseButton::Left, cursor, true);
    if input.is_mouse_hovering_rect(scroll) {
        *state = WidgetStates::HOVERED;
    }
    let scroll_delta = if vertical {
        input.mouse.scroll_delta.y
    } else {
        input.mouse.scroll_delta.x
    };

    let mut ws = WidgetStates::empty();
    if left.down && click_in_cursor && left.clicked == 0 {
        *state = WidgetStates::ACTIVE;
        let pixel = if vertical { input.mouse.delta.y } else { input.mouse.delta.x };
        offset = (offset + (pixel / length) * target).clamp(0.0, target - length);
        let cursor_pos = (offset / target) * length;
        let clicked_pos = &mut input.mouse.button_mut(MouseButton::Left).clicked_pos;
        if vertical {
            clicked_pos.y = scroll.y + cursor_pos + cursor.h / 2.0;
        } else {
            clicked_pos.x = scroll.x + cursor_pos + cursor.w / 2.0;
        }
    } else if (input.is_key_pressed(Key::ScrollUp) && vertical && has_scrolling)
        || button_behavior(&mut ws, empty_before, Some(input), ButtonBehavior::Default)
    {
        offset = (offset - length).max(0.0);
    } else if (input.is_key_pressed(Key::ScrollDown) && vertical && has_scrolling)
        || button_behavior(&mut ws, empty_after, Some(input), ButtonBehavior::Default)
    {
        offset = (offset + length).min(target - length);
    } else if has_scrolling {
        if scroll_delta != 0.0 {
            offset = (offset + step * -scroll_delta).clamp(0.0, target - length);
        } else if input.is_key_pressed(Key::ScrollStart) {
            if vertical {
                offset = 0.0;
            }
        } else if input.is_key_pressed(Key::ScrollEnd) && vertical {
            offset = target - length;
        }
    }
    track_enter_leave(state, input, scroll);
    offset
}

impl Context {
    /// Claims the next widget slot of the current panel.
    pub fn widget(&mut self) -> (Rect, WidgetLayoutState) {
        let Some(win) = self.current else {
            log::warn!("widget requested outside of a window");
            return (Rect::ZERO, WidgetLayoutState::Invalid);
        };
        let spacing = self.style.window.spacing;
        let Some(panel) = self.current_panel_mut() else {
            return (Rect::ZERO, WidgetLayoutState::Invalid);
        };
        let allocation = panel.layout.alloc_space(spacing);
        let clip = panel.layout.clip;
        if let Some(row) = allocation.new_row {
            self.row_background(row);
        }

        let bounds = allocation.bounds.truncate();
        let c = clip.truncate();
        let visible = c.unify(bounds.x, bounds.y, bounds.max_x(), bounds.max_y());
        if !c.intersects(&bounds) {
            return (bounds, WidgetLayoutState::Invalid);
        }
        if self.window(win).is_some_and(|w| w.widgets_disabled) {
            return (bounds, WidgetLayoutState::Disabled);
        }
        if !visible.contains(self.input.mouse.pos) {
            return (bounds, WidgetLayoutState::Rom);
        }
        (bounds, WidgetLayoutState::Valid)
    }

    /// Like [`widget`](Self::widget) but widens the bounds into the panel
    /// padding on the first and last column.
    pub fn widget_fitting(&mut self, item_padding: Vec2) -> (Rect, WidgetLayoutState) {
        let (mut bounds, state) = self.widget();
        let Some(panel) = self.current_panel() else {
            return (bounds, state);
        };
        let panel_padding = crate::panel::panel_padding(&self.style, panel.kind);
        let layout = &panel.layout;
        if layout.row.index == 1 {
            bounds.w += panel_padding.x;
            bounds.x -= panel_padding.x;
        } else {
            bounds.x -= item_padding.x;
        }
        if layout.row.index == layout.row.columns {
            bounds.w += panel_padding.x;
        } else {
            bounds.w += item_padding.x;
        }
        (bounds, state)
    }

    /// Input for a widget in `state`, or `None` when it must not react.
    pub(crate) fn widget_input(&self, state: WidgetLayoutState) -> Option<&Input> {
        let rom = self
            .current_panel()
            .is_some_and(|panel| panel.flags.contains(crate::window::WindowFlags::ROM));
        (state.accepts_input() && !rom).then_some(&self.input)
    }

    pub fn label(&mut self, text: &str, align: TextAlign) {
        let color = self.style.text.color;
        self.label_colored(text, align, color);
    }

    pub fn label_colored(&mut self, text: &str, align: TextAlign, color: Color) {
        let (bounds, state) = self.widget();
        if !state.is_visible() {
            return;
        }
        let paint = TextPaint {
            padding: self.style.text.padding,
            background: self.style.window.background,
            color,
        };
        self.with_canvas(|canvas, _| canvas.text(bounds, text, &paint, align));
    }

    pub fn button_label(&mut self, title: &str) -> bool {
        let style = self.style.button;
        self.button_text_styled(&style, title)
    }

    pub fn button_text_styled(&mut self, style: &ButtonStyle, title: &str) -> bool {
        let (bounds, state) = self.widget();
        if !state.is_visible() {
            return false;
        }
        let behavior = self.button_behavior;
        let accepts = self.widget_input(state).is_some();
        let mut ws = self.last_widget_state;
        let clicked = self.with_canvas(|canvas, input| {
            canvas.do_button_text(
                &mut ws,
                bounds,
                title,
                style.text_alignment,
                behavior,
                style,
                input.filter(|_| accepts),
            )
        });
        self.last_widget_state = ws;
        clicked
    }

    pub fn button_symbol(&mut self, symbol: Symbol) -> bool {
        let (bounds, state) = self.widget();
        if !state.is_visible() {
            return false;
        }
        let style = self.style.button;
        let behavior = self.button_behavior;
        let accepts = self.widget_input(state).is_some();
        let mut ws = self.last_widget_state;
        let clicked = self.with_canvas(|canvas, input| {
            canvas.do_button_symbol(&mut ws, bounds, symbol, behavior, &style, input.filter(|_| accepts))
        });
        self.last_widget_state = ws;
        clicked
    }

    /// Checkbox bound to `active`; returns whether the user toggled it.
    pub fn checkbox_label(&mut self, label: &str, active: &mut bool) -> bool {
        let (bounds, state) = self.widget();
        if !state.is_visible() {
            return false;
        }
        let style = self.style.checkbox;
        let accepts = self.widget_input(state).is_some();
        let mut ws = self.last_widget_state;
        let changed = self.with_canvas(|canvas, input| {
            canvas.do_toggle(&mut ws, bounds, active, label, &style, input.filter(|_| accepts))
        });
        self.last_widget_state = ws;
        changed
    }

    /// Leaves `cols` widget slots empty.
    pub fn spacing(&mut self, cols: usize) {
        let spacing = self.style.window.spacing;
        let mut rows = Vec::new();
        if let Some(panel) = self.current_panel_mut() {
            panel.layout.spacing(cols, spacing, |row| rows.push(row));
        }
        for row in rows {
            self.row_background(row);
        }
    }

    /// Claims a widget slot whose content is drawn by the host's custom draw
    /// callback `callback` at conversion time.
    pub fn custom(&mut self, callback: u32, data: u64) -> WidgetLayoutState {
        let (bounds, state) = self.widget();
        if state.is_visible() {
            self.with_canvas(|canvas, _| canvas.buffer.push_custom(canvas.arena, bounds, callback, data));
        }
        state
    }

    /// State of the most recently processed widget.
    pub fn last_widget_state(&self) -> WidgetStates {
        self.last_widget_state
    }

    pub fn widget_is_hovered(&self) -> bool {
        self.last_widget_state.contains(WidgetStates::HOVER)
    }

    pub fn widget_disable_begin(&mut self) {
        if let Some(win) = self.current.and_then(|id| self.window_mut(id)) {
            win.widgets_disabled = true;
        }
    }

    pub fn widget_disable_end(&mut self) {
        if let Some(win) = self.current.and_then(|id| self.window_mut(id)) {
            win.widgets_disabled = false;
        }
    }
}

#[cfg(test)]
#[path = "tests/widgets_tests.rs"]
mod tests;
