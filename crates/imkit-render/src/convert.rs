use crate::draw_list::DrawList;
use crate::vertex::DrawIndex;
use bitflags::bitflags;
use imkit_core::{Command, Commands, Font, Point16};
use imkit_graphics::{Rect, Vec2};
use std::rc::Rc;

bitflags! {
    /// Problems met while converting a frame. Empty means every command was
    /// tessellated; otherwise the named buffers ran out of room and the
    /// primitives that did not fit were skipped.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ConvertResult: u32 {
        const INVALID_PARAM = 1;
        const COMMAND_BUFFER_FULL = 1 << 1;
        const VERTEX_BUFFER_FULL = 1 << 2;
        const ELEMENT_BUFFER_FULL = 1 << 3;
    }
}

impl ConvertResult {
    pub fn is_success(self) -> bool {
        self.is_empty()
    }
}

/// Resolves the font index stored in text commands.
pub trait FontLookup {
    fn font(&self, id: u32) -> Option<&dyn Font>;
}

impl FontLookup for [Rc<dyn Font>] {
    fn font(&self, id: u32) -> Option<&dyn Font> {
        self.get(id as usize).map(|font| font.as_ref())
    }
}

impl FontLookup for dyn Font {
    fn font(&self, _id: u32) -> Option<&dyn Font> {
        Some(self)
    }
}

/// Host drawing for custom commands, emitted straight into the draw list.
pub trait CustomDraw<I: DrawIndex = u16> {
    fn draw(&mut self, list: &mut DrawList<I>, bounds: Rect, data: u64);
}

impl<I, F> CustomDraw<I> for F
where
    I: DrawIndex,
    F: FnMut(&mut DrawList<I>, Rect, u64),
{
    fn draw(&mut self, list: &mut DrawList<I>, bounds: Rect, data: u64) {
        self(list, bounds, data)
    }
}

/// Custom draw callbacks keyed by the id recorded in custom commands.
pub struct CustomDrawRegistry<I: DrawIndex = u16> {
    callbacks: Vec<(u32, Box<dyn CustomDraw<I>>)>,
}

impl<I: DrawIndex> Default for CustomDrawRegistry<I> {
    fn default() -> Self {
        Self { callbacks: Vec::new() }
    }
}

impl<I: DrawIndex> CustomDrawRegistry<I> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `callback` under `id`, replacing an earlier registration.
    pub fn register(&mut self, id: u32, callback: Box<dyn CustomDraw<I>>) {
        match self.callbacks.iter_mut().find(|(key, _)| *key == id) {
            Some(slot) => slot.1 = callback,
            None => self.callbacks.push((id, callback)),
        }
    }

    pub fn unregister(&mut self, id: u32) -> bool {
        let before = self.callbacks.len();
        self.callbacks.retain(|(key, _)| *key != id);
        self.callbacks.len() != before
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }

    /// Runs callback `id`; returns `false` when nothing is registered under it.
    pub fn draw(&mut self, id: u32, list: &mut DrawList<I>, bounds: Rect, data: u64) -> bool {
        match self.callbacks.iter_mut().find(|(key, _)| *key == id) {
            Some((_, callback)) => {
                callback.draw(list, bounds, data);
                true
            }
            None => false,
        }
    }
}

fn vec2(p: Point16) -> Vec2 {
    Vec2::new(p[0] as f32, p[1] as f32)
}

/// Tessellates `commands` into `list`, replacing its previous content.
pub fn convert<I, F>(
    commands: Commands<'_>,
    fonts: &F,
    list: &mut DrawList<I>,
    custom: &mut CustomDrawRegistry<I>,
) -> ConvertResult
where
    I: DrawIndex,
    F: FontLookup + ?Sized,
{
    list.clear();
    let config = *list.config();
    if config.circle_segment_count == 0 || config.arc_segment_count == 0 || config.curve_segment_count == 0 {
        log::warn!("vertex conversion needs non-zero segment counts");
        return ConvertResult::INVALID_PARAM;
    }

    let mut commands = commands;
    while let Some((userdata, command)) = commands.next_with_userdata() {
        list.push_userdata(userdata);
        match command {
            Command::Scissor(s) => list.add_clip(s.rect()),
            Command::Line(l) => list.stroke_line(vec2(l.begin), vec2(l.end), l.color, l.thickness as f32),
            Command::Curve(c) => list.stroke_curve(
                vec2(c.begin),
                vec2(c.ctrl[0]),
                vec2(c.ctrl[1]),
                vec2(c.end),
                c.color,
                config.curve_segment_count,
                c.thickness as f32,
            ),
            Command::Rect(r) => list.stroke_rect(r.rect(), r.color, r.rounding as f32, r.thickness as f32),
            Command::RectFilled(r) => list.fill_rect(r.rect(), r.color, r.rounding as f32),
            Command::RectMultiColor(r) => list.fill_rect_multi_color(r.rect(), r.left, r.top, r.right, r.bottom),
            Command::Circle(c) => {
                let r = c.rect();
                list.stroke_circle(r.center(), r.w / 2.0, c.color, config.circle_segment_count, c.thickness as f32);
            }
            Command::CircleFilled(c) => {
                let r = c.rect();
                list.fill_circle(r.center(), r.w / 2.0, c.color, config.circle_segment_count);
            }
            Command::Arc(a) | Command::ArcFilled(a) => {
                let center = Vec2::new(a.cx as f32, a.cy as f32);
                list.path_line_to(center);
                list.path_arc_to(center, a.r as f32, a.angles[0], a.angles[1], config.arc_segment_count);
                list.path_line_to(center);
                if matches!(command, Command::ArcFilled(_)) {
                    list.path_fill(a.color);
                } else {
                    list.path_stroke(a.color, true, a.thickness as f32);
                }
            }
            Command::Triangle(t) => list.stroke_triangle([vec2(t.a), vec2(t.b), vec2(t.c)], t.color, t.thickness as f32),
            Command::TriangleFilled(t) => list.fill_triangle([vec2(t.a), vec2(t.b), vec2(t.c)], t.color),
            Command::Polygon(p, points) => {
                for point in points.iter() {
                    list.path_line_to(point);
                }
                list.path_stroke(p.color, true, p.thickness as f32);
            }
            Command::PolygonFilled(p, points) => {
                for point in points.iter() {
                    list.path_line_to(point);
                }
                list.path_fill(p.color);
            }
            Command::Polyline(p, points) => {
                for point in points.iter() {
                    list.path_line_to(point);
                }
                list.path_stroke(p.color, false, p.thickness as f32);
            }
            Command::Text(t, text) => match fonts.font(t.font) {
                Some(font) => list.add_text(font, t.rect(), text, t.foreground),
                None => log::warn!("text command refers to unknown font {}", t.font),
            },
            Command::Image(i) => list.add_image(&i.image(), i.rect(), i.color),
            Command::Custom(c) => {
                if !custom.draw(c.callback, list, c.rect(), c.data) {
                    log::debug!("no custom draw callback registered for {}", c.callback);
                }
            }
        }
    }

    log::trace!(
        "converted frame into {} vertices, {} indices, {} draw commands",
        list.vertices().len(),
        list.indices().len(),
        list.commands().len()
    );
    list.result()
}

#[cfg(test)]
#[path = "tests/convert_tests.rs"]
mod tests;
