//! Themes and per-widget style blocks

use bitflags::bitflags;
use imkit_graphics::{Color, Image, Vec2};

bitflags! {
    /// Placement of text inside its bounds.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct TextAlign: u32 {
        const ALIGN_LEFT = 0x01;
        const ALIGN_CENTERED = 0x02;
        const ALIGN_RIGHT = 0x04;
        const ALIGN_TOP = 0x08;
        const ALIGN_MIDDLE = 0x10;
        const ALIGN_BOTTOM = 0x20;

        const LEFT = Self::ALIGN_MIDDLE.bits() | Self::ALIGN_LEFT.bits();
        const CENTERED = Self::ALIGN_MIDDLE.bits() | Self::ALIGN_CENTERED.bits();
        const RIGHT = Self::ALIGN_MIDDLE.bits() | Self::ALIGN_RIGHT.bits();
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

/// Small glyphs drawn by header buttons, tree nodes and combos.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Symbol {
    None,
    X,
    Underscore,
    CircleSolid,
    CircleOutline,
    RectSolid,
    RectOutline,
    TriangleUp,
    TriangleDown,
    TriangleLeft,
    TriangleRight,
    Plus,
    Minus,
}

/// Index into a [`ColorTable`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StyleColor {
    Text,
    Window,
    Header,
    Border,
    Button,
    ButtonHover,
    ButtonActive,
    Toggle,
    ToggleHover,
    ToggleCursor,
    Select,
    SelectActive,
    Slider,
    SliderCursor,
    SliderCursorHover,
    SliderCursorActive,
    Property,
    Edit,
    EditCursor,
    Combo,
    Chart,
    ChartColor,
    ChartColorHighlight,
    Scrollbar,
    ScrollbarCursor,
    ScrollbarCursorHover,
    ScrollbarCursorActive,
    TabHeader,
}

impl StyleColor {
    pub const COUNT: usize = 28;
}

/// Base palette every style block is derived from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColorTable([Color; StyleColor::COUNT]);

impl ColorTable {
    pub fn new(theme: Theme) -> Self {
        let c = Color::rgba;
        Self(match theme {
            Theme::Dark => [
                c(175, 175, 175, 255),
                c(45, 45, 45, 255),
                c(40, 40, 40, 255),
                c(65, 65, 65, 255),
                c(50, 50, 50, 255),
                c(40, 40, 40, 255),
                c(35, 35, 35, 255),
                c(100, 100, 100, 255),
                c(120, 120, 120, 255),
                c(45, 45, 45, 255),
                c(45, 45, 45, 255),
                c(35, 35, 35, 255),
                c(38, 38, 38, 255),
                c(100, 100, 100, 255),
                c(120, 120, 120, 255),
                c(150, 150, 150, 255),
                c(38, 38, 38, 255),
                c(38, 38, 38, 255),
                c(175, 175, 175, 255),
                c(45, 45, 45, 255),
                c(120, 120, 120, 255),
                c(45, 45, 45, 255),
                c(255, 0, 0, 255),
                c(40, 40, 40, 255),
                c(100, 100, 100, 255),
                c(120, 120, 120, 255),
                c(150, 150, 150, 255),
                c(40, 40, 40, 255),
            ],
            Theme::Light => [
                c(70, 70, 70, 255),
                c(175, 175, 175, 255),
                c(175, 175, 175, 255),
                c(0, 0, 0, 255),
                c(185, 185, 185, 255),
                c(170, 170, 170, 255),
                c(160, 160, 160, 255),
                c(150, 150, 150, 255),
                c(120, 120, 120, 255),
                c(175, 175, 175, 255),
                c(190, 190, 190, 255),
                c(175, 175, 175, 255),
                c(190, 190, 190, 255),
                c(80, 80, 80, 255),
                c(70, 70, 70, 255),
                c(60, 60, 60, 255),
                c(175, 175, 175, 255),
                c(150, 150, 150, 255),
                c(0, 0, 0, 255),
                c(175, 175, 175, 255),
                c(160, 160, 160, 255),
                c(45, 45, 45, 255),
                c(255, 0, 0, 255),
                c(180, 180, 180, 255),
                c(140, 140, 140, 255),
                c(150, 150, 150, 255),
                c(160, 160, 160, 255),
                c(180, 180, 180, 255),
            ],
        })
    }

    pub fn get(&self, color: StyleColor) -> Color {
        self.0[color as usize]
    }

    pub fn set(&mut self, color: StyleColor, value: Color) {
        self.0[color as usize] = value;
    }
}

/// Background of a widget part: a flat color or a textured region.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StyleItem {
    Color(Color),
    Image(Image),
}

impl StyleItem {
    /// Flat color of the item; textured items report `fallback`.
    pub fn color_or(&self, fallback: Color) -> Color {
        match self {
            StyleItem::Color(color) => *color,
            StyleItem::Image(_) => fallback,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    pub color: Color,
    pub padding: Vec2,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ButtonStyle {
    pub normal: StyleItem,
    pub hover: StyleItem,
    pub active: StyleItem,
    pub border_color: Color,
    pub text_background: Color,
    pub text_normal: Color,
    pub text_hover: Color,
    pub text_active: Color,
    pub text_alignment: TextAlign,
    pub border: f32,
    pub rounding: f32,
    pub padding: Vec2,
    pub image_padding: Vec2,
    pub touch_padding: Vec2,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ToggleStyle {
    pub normal: StyleItem,
    pub hover: StyleItem,
    pub active: StyleItem,
    pub border_color: Color,
    pub cursor_normal: StyleItem,
    pub cursor_hover: StyleItem,
    pub text_normal: Color,
    pub text_hover: Color,
    pub text_active: Color,
    pub text_background: Color,
    pub text_alignment: TextAlign,
    pub padding: Vec2,
    pub touch_padding: Vec2,
    pub spacing: f32,
    pub border: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollbarStyle {
    pub normal: StyleItem,
    pub hover: StyleItem,
    pub active: StyleItem,
    pub border_color: Color,
    pub cursor_normal: StyleItem,
    pub cursor_hover: StyleItem,
    pub cursor_active: StyleItem,
    pub cursor_border_color: Color,
    pub border: f32,
    pub rounding: f32,
    pub border_cursor: f32,
    pub rounding_cursor: f32,
    pub padding: Vec2,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TabStyle {
    pub background: StyleItem,
    pub border_color: Color,
    pub text: Color,
    pub tab_maximize_button: ButtonStyle,
    pub tab_minimize_button: ButtonStyle,
    pub node_maximize_button: ButtonStyle,
    pub node_minimize_button: ButtonStyle,
    pub sym_minimize: Symbol,
    pub sym_maximize: Symbol,
    pub border: f32,
    pub rounding: f32,
    pub indent: f32,
    pub padding: Vec2,
    pub spacing: Vec2,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ComboStyle {
    pub normal: StyleItem,
    pub hover: StyleItem,
    pub active: StyleItem,
    pub border_color: Color,
    pub label_normal: Color,
    pub label_hover: Color,
    pub label_active: Color,
    pub sym_normal: Symbol,
    pub sym_hover: Symbol,
    pub sym_active: Symbol,
    pub button: ButtonStyle,
    pub border: f32,
    pub rounding: f32,
    pub content_padding: Vec2,
    pub button_padding: Vec2,
    pub spacing: Vec2,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChartStyle {
    pub background: StyleItem,
    pub border_color: Color,
    pub selected_color: Color,
    pub color: Color,
    pub border: f32,
    pub rounding: f32,
    pub padding: Vec2,
    pub show_markers: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeaderAlign {
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WindowHeaderStyle {
    pub normal: StyleItem,
    pub hover: StyleItem,
    pub active: StyleItem,
    pub close_button: ButtonStyle,
    pub minimize_button: ButtonStyle,
    pub close_symbol: Symbol,
    pub minimize_symbol: Symbol,
    pub maximize_symbol: Symbol,
    pub label_normal: Color,
    pub label_hover: Color,
    pub label_active: Color,
    pub align: HeaderAlign,
    pub padding: Vec2,
    pub label_padding: Vec2,
    pub spacing: Vec2,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WindowStyle {
    pub header: WindowHeaderStyle,
    pub fixed_background: StyleItem,
    pub background: Color,
    pub border_color: Color,
    pub popup_border_color: Color,
    pub combo_border_color: Color,
    pub contextual_border_color: Color,
    pub menu_border_color: Color,
    pub group_border_color: Color,
    pub tooltip_border_color: Color,
    pub scaler: StyleItem,
    pub border: f32,
    pub combo_border: f32,
    pub contextual_border: f32,
    pub menu_border: f32,
    pub group_border: f32,
    pub tooltip_border: f32,
    pub popup_border: f32,
    pub min_row_height_padding: f32,
    pub rounding: f32,
    pub spacing: Vec2,
    pub scrollbar_size: Vec2,
    pub min_size: Vec2,
    pub padding: Vec2,
    pub group_padding: Vec2,
    pub popup_padding: Vec2,
    pub combo_padding: Vec2,
    pub contextual_padding: Vec2,
    pub menu_padding: Vec2,
    pub tooltip_padding: Vec2,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CursorKind {
    Arrow,
    Text,
    Move,
    ResizeVertical,
    ResizeHorizontal,
    ResizeTopLeftDownRight,
    ResizeTopRightDownLeft,
}

impl CursorKind {
    pub const COUNT: usize = 7;
}

/// Image drawn at the mouse position when cursor drawing is enabled.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cursor {
    pub image: Image,
    pub size: Vec2,
    pub offset: Vec2,
}

/// Index of a font registered with the context.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct FontId(pub u32);

#[derive(Clone, Debug, PartialEq)]
pub struct Style {
    pub colors: ColorTable,
    pub font: FontId,
    pub cursors: [Option<Cursor>; CursorKind::COUNT],
    pub cursor_active: CursorKind,
    pub cursor_last: Option<CursorKind>,
    pub cursor_visible: bool,
    pub text: TextStyle,
    pub button: ButtonStyle,
    pub contextual_button: ButtonStyle,
    pub menu_button: ButtonStyle,
    pub checkbox: ToggleStyle,
    pub scrollh: ScrollbarStyle,
    pub scrollv: ScrollbarStyle,
    pub tab: TabStyle,
    pub combo: ComboStyle,
    pub chart: ChartStyle,
    pub window: WindowStyle,
}

impl Default for Style {
    fn default() -> Self {
        Self::from_table(ColorTable::new(Theme::Dark))
    }
}

impl Style {
    pub fn new(theme: Theme) -> Self {
        Self::from_table(ColorTable::new(theme))
    }

    /// Derives every style block from `table`.
    pub fn from_table(table: ColorTable) -> Self {
        let color = |c: StyleColor| table.get(c);
        let item = |c: StyleColor| StyleItem::Color(table.get(c));
        let text = color(StyleColor::Text);

        let flat_button = |background: StyleColor, border_color: Color, rounding: f32, padding: Vec2| ButtonStyle {
            normal: item(background),
            hover: item(background),
            active: item(background),
            border_color,
            text_background: color(background),
            text_normal: text,
            text_hover: text,
            text_active: text,
            text_alignment: TextAlign::CENTERED,
            border: 0.0,
            rounding,
            padding,
            image_padding: Vec2::ZERO,
            touch_padding: Vec2::ZERO,
        };

        let button = ButtonStyle {
            normal: item(StyleColor::Button),
            hover: item(StyleColor::ButtonHover),
            active: item(StyleColor::ButtonActive),
            border_color: color(StyleColor::Border),
            text_background: color(StyleColor::Button),
            text_normal: text,
            text_hover: text,
            text_active: text,
            text_alignment: TextAlign::CENTERED,
            border: 1.0,
            rounding: 4.0,
            padding: Vec2::new(2.0, 2.0),
            image_padding: Vec2::ZERO,
            touch_padding: Vec2::ZERO,
        };

        let contextual_button = ButtonStyle {
            hover: item(StyleColor::ButtonHover),
            active: item(StyleColor::ButtonActive),
            ..flat_button(StyleColor::Window, color(StyleColor::Window), 0.0, Vec2::new(2.0, 2.0))
        };
        let menu_button = flat_button(StyleColor::Window, color(StyleColor::Window), 1.0, Vec2::new(2.0, 2.0));

        let checkbox = ToggleStyle {
            normal: item(StyleColor::Toggle),
            hover: item(StyleColor::ToggleHover),
            active: item(StyleColor::ToggleHover),
            border_color: Color::TRANSPARENT,
            cursor_normal: item(StyleColor::ToggleCursor),
            cursor_hover: item(StyleColor::ToggleCursor),
            text_normal: text,
            text_hover: text,
            text_active: text,
            text_background: color(StyleColor::Window),
            text_alignment: TextAlign::LEFT,
            padding: Vec2::new(2.0, 2.0),
            touch_padding: Vec2::ZERO,
            spacing: 4.0,
            border: 0.0,
        };

        let scrollbar = ScrollbarStyle {
            normal: item(StyleColor::Scrollbar),
            hover: item(StyleColor::Scrollbar),
            active: item(StyleColor::Scrollbar),
            border_color: color(StyleColor::Scrollbar),
            cursor_normal: item(StyleColor::ScrollbarCursor),
            cursor_hover: item(StyleColor::ScrollbarCursorHover),
            cursor_active: item(StyleColor::ScrollbarCursorActive),
            cursor_border_color: color(StyleColor::Scrollbar),
            border: 0.0,
            rounding: 0.0,
            border_cursor: 0.0,
            rounding_cursor: 0.0,
            padding: Vec2::ZERO,
        };

        let tab_button = flat_button(StyleColor::TabHeader, Color::TRANSPARENT, 0.0, Vec2::ZERO);
        let node_button = ButtonStyle {
            text_background: color(StyleColor::TabHeader),
            ..flat_button(StyleColor::Window, Color::TRANSPARENT, 0.0, Vec2::ZERO)
        };
        let tab = TabStyle {
            background: item(StyleColor::TabHeader),
            border_color: color(StyleColor::Border),
            text,
            tab_maximize_button: tab_button,
            tab_minimize_button: tab_button,
            node_maximize_button: node_button,
            node_minimize_button: node_button,
            sym_minimize: Symbol::TriangleRight,
            sym_maximize: Symbol::TriangleDown,
            border: 1.0,
            rounding: 0.0,
            indent: 10.0,
            padding: Vec2::new(4.0, 4.0),
            spacing: Vec2::new(4.0, 4.0),
        };

        let combo = ComboStyle {
            normal: item(StyleColor::Combo),
            hover: item(StyleColor::Combo),
            active: item(StyleColor::Combo),
            border_color: color(StyleColor::Border),
            label_normal: text,
            label_hover: text,
            label_active: text,
            sym_normal: Symbol::TriangleDown,
            sym_hover: Symbol::TriangleDown,
            sym_active: Symbol::TriangleDown,
            button: flat_button(StyleColor::Combo, Color::TRANSPARENT, 0.0, Vec2::new(2.0, 2.0)),
            border: 1.0,
            rounding: 0.0,
            content_padding: Vec2::new(4.0, 4.0),
            button_padding: Vec2::new(0.0, 4.0),
            spacing: Vec2::new(4.0, 0.0),
        };

        let chart = ChartStyle {
            background: item(StyleColor::Chart),
            border_color: color(StyleColor::Border),
            selected_color: color(StyleColor::ChartColorHighlight),
            color: color(StyleColor::ChartColor),
            border: 0.0,
            rounding: 0.0,
            padding: Vec2::new(4.0, 4.0),
            show_markers: true,
        };

        let header_button = flat_button(StyleColor::Header, Color::TRANSPARENT, 0.0, Vec2::ZERO);
        let header = WindowHeaderStyle {
            normal: item(StyleColor::Header),
            hover: item(StyleColor::Header),
            active: item(StyleColor::Header),
            close_button: header_button,
            minimize_button: header_button,
            close_symbol: Symbol::X,
            minimize_symbol: Symbol::Minus,
            maximize_symbol: Symbol::Plus,
            label_normal: text,
            label_hover: text,
            label_active: text,
            align: HeaderAlign::Right,
            padding: Vec2::new(4.0, 4.0),
            label_padding: Vec2::new(4.0, 4.0),
            spacing: Vec2::ZERO,
        };

        let border = color(StyleColor::Border);
        let padding = Vec2::new(4.0, 4.0);
        let window = WindowStyle {
            header,
            fixed_background: item(StyleColor::Window),
            background: color(StyleColor::Window),
            border_color: border,
            popup_border_color: border,
            combo_border_color: border,
            contextual_border_color: border,
            menu_border_color: border,
            group_border_color: border,
            tooltip_border_color: border,
            scaler: StyleItem::Color(text),
            border: 2.0,
            combo_border: 1.0,
            contextual_border: 1.0,
            menu_border: 1.0,
            group_border: 1.0,
            tooltip_border: 1.0,
            popup_border: 1.0,
            min_row_height_padding: 8.0,
            rounding: 0.0,
            spacing: Vec2::new(4.0, 4.0),
            scrollbar_size: Vec2::new(10.0, 10.0),
            min_size: Vec2::new(64.0, 64.0),
            padding,
            group_padding: padding,
            popup_padding: padding,
            combo_padding: padding,
            contextual_padding: padding,
            menu_padding: padding,
            tooltip_padding: padding,
        };

        Self {
            colors: table,
            font: FontId::default(),
            cursors: [None; CursorKind::COUNT],
            cursor_active: CursorKind::Arrow,
            cursor_last: None,
            cursor_visible: false,
            text: TextStyle {
                color: text,
                padding: Vec2::ZERO,
            },
            button,
            contextual_button,
            menu_button,
            checkbox,
            scrollh: scrollbar,
            scrollv: scrollbar,
            tab,
            combo,
            chart,
            window,
        }
    }

    pub fn set_cursor(&mut self, kind: CursorKind, cursor: Cursor) {
        self.cursors[kind as usize] = Some(cursor);
    }

    /// Cursor image for the currently active cursor kind, if one was loaded.
    pub fn active_cursor(&self) -> Option<&Cursor> {
        self.cursors[self.cursor_active as usize].as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn themes_differ_in_palette() {
        let dark = Style::new(Theme::Dark);
        let light = Style::new(Theme::Light);
        assert_ne!(dark.window.background, light.window.background);
        assert_eq!(dark.text.color, dark.colors.get(StyleColor::Text));
    }

    #[test]
    fn derived_blocks_follow_the_table() {
        let mut table = ColorTable::new(Theme::Dark);
        table.set(StyleColor::Button, Color::RED);
        let style = Style::from_table(table);
        assert_eq!(style.button.normal, StyleItem::Color(Color::RED));
        assert_eq!(style.button.text_background, Color::RED);
    }

    #[test]
    fn cursor_lookup_uses_active_kind() {
        let mut style = Style::default();
        assert!(style.active_cursor().is_none());
        let cursor = Cursor {
            image: Image::default(),
            size: Vec2::new(16.0, 16.0),
            offset: Vec2::ZERO,
        };
        style.set_cursor(CursorKind::Move, cursor);
        style.cursor_active = CursorKind::Move;
        assert_eq!(style.active_cursor(), Some(&cursor));
    }
}
