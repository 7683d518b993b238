use imkit_graphics::Vec2;

/// Placement of one glyph, as reported by a font's glyph query.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Glyph {
    /// Texture coordinates of the top-left and bottom-right corners.
    pub uv: [Vec2; 2],
    pub offset: Vec2,
    pub width: f32,
    pub height: f32,
    pub xadvance: f32,
}

/// Text measurement contract consumed by layout and drawing.
pub trait Font {
    /// Line height in pixels.
    fn height(&self) -> f32;

    fn text_width(&self, text: &str) -> f32;

    /// Glyph for `codepoint`; `next` allows kerning against the following character.
    fn query_glyph(&self, codepoint: char, next: Option<char>) -> Glyph;

    /// Texture holding the glyph atlas.
    fn texture(&self) -> imkit_graphics::Handle {
        imkit_graphics::Handle::NONE
    }
}

/// Longest prefix of `text` that fits into `width`, returned as
/// `(byte length, glyph count, measured width)`.
pub fn clamp_text(font: &dyn Font, text: &str, width: f32) -> (usize, usize, f32) {
    let mut fitted = (0, 0, 0.0);
    let mut total = 0.0;
    let mut buf = [0u8; 4];
    for (glyphs, (index, ch)) in text.char_indices().enumerate() {
        total += font.text_width(ch.encode_utf8(&mut buf));
        if total > width {
            break;
        }
        fitted = (index + ch.len_utf8(), glyphs + 1, total);
    }
    fitted
}
