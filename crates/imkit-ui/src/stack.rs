//! Fixed-capacity configuration stacks
//!
//! Every push remembers the value it overwrote so the matching pop can put
//! it back. Pushing onto a full stack and popping an empty one are refused.

use crate::style::{FontId, Style, StyleItem, TextAlign};
use imkit_graphics::{Color, Vec2};

pub const STYLE_ITEM_STACK_SIZE: usize = 16;
pub const FLOAT_STACK_SIZE: usize = 32;
pub const VECTOR_STACK_SIZE: usize = 16;
pub const FLAGS_STACK_SIZE: usize = 32;
pub const COLOR_STACK_SIZE: usize = 32;
pub const FONT_STACK_SIZE: usize = 8;
pub const BUTTON_BEHAVIOR_STACK_SIZE: usize = 8;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ButtonBehavior {
    /// Triggers once when pressed.
    #[default]
    Default,
    /// Triggers every frame while held.
    Repeater,
}

#[derive(Clone, Debug)]
pub struct ConfigStack<T, const N: usize> {
    items: Vec<T>,
}

impl<T, const N: usize> Default for ConfigStack<T, N> {
    fn default() -> Self {
        Self {
            items: Vec::with_capacity(N),
        }
    }
}

impl<T, const N: usize> ConfigStack<T, N> {
    pub fn push(&mut self, value: T) -> bool {
        if self.items.len() >= N {
            log::warn!("configuration stack of {N} entries is full");
            return false;
        }
        self.items.push(value);
        true
    }

    pub fn pop(&mut self) -> Option<T> {
        let value = self.items.pop();
        if value.is_none() {
            log::warn!("pop on an empty configuration stack");
        }
        value
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

/// Style items reachable through the style-item stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StyleItemSlot {
    WindowFixedBackground,
    HeaderNormal,
    HeaderHover,
    HeaderActive,
    ButtonNormal,
    ButtonHover,
    ButtonActive,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FloatSlot {
    WindowBorder,
    WindowRounding,
    GroupBorder,
    PopupBorder,
    MinRowHeightPadding,
    ButtonBorder,
    ButtonRounding,
    TabIndent,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Vec2Slot {
    WindowPadding,
    WindowSpacing,
    GroupPadding,
    PopupPadding,
    ScrollbarSize,
    ButtonPadding,
    HeaderPadding,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlagsSlot {
    ButtonTextAlignment,
    CheckboxTextAlignment,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColorSlot {
    Text,
    WindowBackground,
    WindowBorder,
    ButtonText,
}

impl StyleItemSlot {
    fn slot(self, style: &mut Style) -> &mut StyleItem {
        match self {
            StyleItemSlot::WindowFixedBackground => &mut style.window.fixed_background,
            StyleItemSlot::HeaderNormal => &mut style.window.header.normal,
            StyleItemSlot::HeaderHover => &mut style.window.header.hover,
            StyleItemSlot::HeaderActive => &mut style.window.header.active,
            StyleItemSlot::ButtonNormal => &mut style.button.normal,
            StyleItemSlot::ButtonHover => &mut style.button.hover,
            StyleItemSlot::ButtonActive => &mut style.button.active,
        }
    }
}

impl FloatSlot {
    fn slot(self, style: &mut Style) -> &mut f32 {
        match self {
            FloatSlot::WindowBorder => &mut style.window.border,
            FloatSlot::WindowRounding => &mut style.window.rounding,
            FloatSlot::GroupBorder => &mut style.window.group_border,
            FloatSlot::PopupBorder => &mut style.window.popup_border,
            FloatSlot::MinRowHeightPadding => &mut style.window.min_row_height_padding,
            FloatSlot::ButtonBorder => &mut style.button.border,
            FloatSlot::ButtonRounding => &mut style.button.rounding,
            FloatSlot::TabIndent => &mut style.tab.indent,
        }
    }
}

impl Vec2Slot {
    fn slot(self, style: &mut Style) -> &mut Vec2 {
        match self {
            Vec2Slot::WindowPadding => &mut style.window.padding,
            Vec2Slot::WindowSpacing => &mut style.window.spacing,
            Vec2Slot::GroupPadding => &mut style.window.group_padding,
            Vec2Slot::PopupPadding => &mut style.window.popup_padding,
            Vec2Slot::ScrollbarSize => &mut style.window.scrollbar_size,
            Vec2Slot::ButtonPadding => &mut style.button.padding,
            Vec2Slot::HeaderPadding => &mut style.window.header.padding,
        }
    }
}

impl FlagsSlot {
    fn slot(self, style: &mut Style) -> &mut TextAlign {
        match self {
            FlagsSlot::ButtonTextAlignment => &mut style.button.text_alignment,
            FlagsSlot::CheckboxTextAlignment => &mut style.checkbox.text_alignment,
        }
    }
}

impl ColorSlot {
    fn slot(self, style: &mut Style) -> &mut Color {
        match self {
            ColorSlot::Text => &mut style.text.color,
            ColorSlot::WindowBackground => &mut style.window.background,
            ColorSlot::WindowBorder => &mut style.window.border_color,
            ColorSlot::ButtonText => &mut style.button.text_normal,
        }
    }
}

/// Every configuration stack of a context.
#[derive(Clone, Debug, Default)]
pub struct ConfigStacks {
    pub style_items: ConfigStack<(StyleItemSlot, StyleItem), STYLE_ITEM_STACK_SIZE>,
    pub floats: ConfigStack<(FloatSlot, f32), FLOAT_STACK_SIZE>,
    pub vectors: ConfigStack<(Vec2Slot, Vec2), VECTOR_STACK_SIZE>,
    pub flags: ConfigStack<(FlagsSlot, TextAlign), FLAGS_STACK_SIZE>,
    pub colors: ConfigStack<(ColorSlot, Color), COLOR_STACK_SIZE>,
    pub fonts: ConfigStack<FontId, FONT_STACK_SIZE>,
    pub button_behaviors: ConfigStack<ButtonBehavior, BUTTON_BEHAVIOR_STACK_SIZE>,
}

macro_rules! swap_stack {
    ($push:ident, $pop:ident, $stack:ident, $slot:ty, $value:ty) => {
        pub fn $push(&mut self, style: &mut Style, slot: $slot, value: $value) -> bool {
            let target = slot.slot(style);
            if !self.$stack.push((slot, *target)) {
                return false;
            }
            *target = value;
            true
        }

        pub fn $pop(&mut self, style: &mut Style) -> bool {
            match self.$stack.pop() {
                Some((slot, old)) => {
                    *slot.slot(style) = old;
                    true
                }
                None => false,
            }
        }
    };
}

impl ConfigStacks {
    swap_stack!(push_style_item, pop_style_item, style_items, StyleItemSlot, StyleItem);
    swap_stack!(push_float, pop_float, floats, FloatSlot, f32);
    swap_stack!(push_vec2, pop_vec2, vectors, Vec2Slot, Vec2);
    swap_stack!(push_flags, pop_flags, flags, FlagsSlot, TextAlign);
    swap_stack!(push_color, pop_color, colors, ColorSlot, Color);

    pub fn push_font(&mut self, style: &mut Style, font: FontId) -> bool {
        if !self.fonts.push(style.font) {
            return false;
        }
        style.font = font;
        true
    }

    pub fn pop_font(&mut self, style: &mut Style) -> bool {
        match self.fonts.pop() {
            Some(old) => {
                style.font = old;
                true
            }
            None => false,
        }
    }

    pub fn push_button_behavior(&mut self, current: &mut ButtonBehavior, behavior: ButtonBehavior) -> bool {
        if !self.button_behaviors.push(*current) {
            return false;
        }
        *current = behavior;
        true
    }

    pub fn pop_button_behavior(&mut self, current: &mut ButtonBehavior) -> bool {
        match self.button_behaviors.pop() {
            Some(old) => {
                *current = old;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_then_pop_restores_value() {
        let mut style = Style::default();
        let mut stacks = ConfigStacks::default();
        let original = style.window.padding;
        assert!(stacks.push_vec2(&mut style, Vec2Slot::WindowPadding, Vec2::new(9.0, 9.0)));
        assert_eq!(style.window.padding, Vec2::new(9.0, 9.0));
        assert!(stacks.pop_vec2(&mut style));
        assert_eq!(style.window.padding, original);
        assert!(!stacks.pop_vec2(&mut style));
    }

    #[test]
    fn nested_pushes_unwind_in_order() {
        let mut style = Style::default();
        let mut stacks = ConfigStacks::default();
        stacks.push_float(&mut style, FloatSlot::WindowBorder, 5.0);
        stacks.push_float(&mut style, FloatSlot::WindowBorder, 7.0);
        stacks.pop_float(&mut style);
        assert_eq!(style.window.border, 5.0);
        stacks.pop_float(&mut style);
        assert_eq!(style.window.border, Style::default().window.border);
    }

    #[test]
    fn full_stack_refuses_push() {
        let mut style = Style::default();
        let mut stacks = ConfigStacks::default();
        for i in 0..FONT_STACK_SIZE {
            assert!(stacks.push_font(&mut style, FontId(i as u32)));
        }
        assert!(!stacks.push_font(&mut style, FontId(99)));
        assert_eq!(style.font, FontId(FONT_STACK_SIZE as u32 - 1));
    }

    #[test]
    fn button_behavior_round_trips() {
        let mut stacks = ConfigStacks::default();
        let mut behavior = ButtonBehavior::Default;
        stacks.push_button_behavior(&mut behavior, ButtonBehavior::Repeater);
        assert_eq!(behavior, ButtonBehavior::Repeater);
        stacks.pop_button_behavior(&mut behavior);
        assert_eq!(behavior, ButtonBehavior::Default);
    }
}
