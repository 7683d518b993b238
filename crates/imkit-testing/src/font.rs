use imkit_core::{Font, Glyph};
use imkit_graphics::{Handle, Vec2};

/// Monospace font over a 16x16 ASCII atlas; every glyph is
/// [`GLYPH_WIDTH`](Self::GLYPH_WIDTH) wide and lines are
/// [`LINE_HEIGHT`](Self::LINE_HEIGHT) tall.
#[derive(Clone, Copy, Debug, Default)]
pub struct MonoFont;

impl MonoFont {
    pub const GLYPH_WIDTH: f32 = 8.0;
    pub const LINE_HEIGHT: f32 = 14.0;
    pub const TEXTURE: Handle = Handle(1);

    /// Atlas cell of `codepoint`; characters outside ASCII map to `?`.
    pub fn cell(codepoint: char) -> (u32, u32) {
        let code = if codepoint.is_ascii() { codepoint as u32 } else { '?' as u32 };
        (code % 16, code / 16)
    }
}

impl Font for MonoFont {
    fn height(&self) -> f32 {
        Self::LINE_HEIGHT
    }

    fn text_width(&self, text: &str) -> f32 {
        text.chars().count() as f32 * Self::GLYPH_WIDTH
    }

    fn query_glyph(&self, codepoint: char, _next: Option<char>) -> Glyph {
        let (col, row) = Self::cell(codepoint);
        let step = 1.0 / 16.0;
        let min = Vec2::new(col as f32 * step, row as f32 * step);
        Glyph {
            uv: [min, Vec2::new(min.x + step, min.y + step)],
            offset: Vec2::ZERO,
            width: Self::GLYPH_WIDTH,
            height: Self::LINE_HEIGHT,
            xadvance: Self::GLYPH_WIDTH,
        }
    }

    fn texture(&self) -> Handle {
        Self::TEXTURE
    }
}
