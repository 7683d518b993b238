//! Per-window draw command recorder.
//!
//! A [`CommandBuffer`] owns no memory. It remembers which records in a shared
//! [`ArenaBuffer`] belong to it and appends new ones to the arena's front,
//! linking each to its predecessor.

use crate::buffer::{ArenaBuffer, BufferSide};
use crate::command::*;
use crate::font::{clamp_text, Font};
use bytemuck::Pod;
use imkit_graphics::{Color, Image, Rect, Vec2};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Clipping {
    On,
    Off,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CommandBuffer {
    pub clip: Rect,
    pub use_clipping: bool,
    pub userdata: u64,
    begin: Option<usize>,
    last: Option<usize>,
    end: usize,
    count: usize,
}

/// Recording state captured by [`CommandBuffer::checkpoint`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Checkpoint {
    begin: Option<usize>,
    last: Option<usize>,
    count: usize,
    clip: Rect,
    front: usize,
}

impl Checkpoint {
    /// Record the checkpoint was taken after, if any.
    pub fn last(&self) -> Option<usize> {
        self.last
    }

    /// Number of records at the time of the checkpoint.
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

impl Default for CommandBuffer {
    fn default() -> Self {
        Self::new(Clipping::On)
    }
}

fn quantize(v: f32) -> i16 {
    v as i16
}

fn extent(v: f32) -> u16 {
    v.max(0.0) as u16
}

impl CommandBuffer {
    pub fn new(clipping: Clipping) -> Self {
        Self {
            clip: Rect::NULL,
            use_clipping: clipping == Clipping::On,
            userdata: 0,
            begin: None,
            last: None,
            end: 0,
            count: 0,
        }
    }

    /// Starts a fresh recording at the arena's current front fill level.
    pub fn start(&mut self, arena: &ArenaBuffer) {
        self.begin = None;
        self.last = None;
        self.end = arena.allocated();
        self.count = 0;
        self.clip = Rect::NULL;
    }

    /// Records the arena fill level at the end of the recording.
    pub fn finish(&mut self, arena: &ArenaBuffer) {
        self.end = arena.allocated();
    }

    /// Forgets every record; the arena is left untouched.
    pub fn reset(&mut self) {
        self.begin = None;
        self.last = None;
        self.count = 0;
        self.clip = Rect::NULL;
    }

    pub fn begin(&self) -> Option<usize> {
        self.begin
    }

    pub fn last(&self) -> Option<usize> {
        self.last
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn iter<'a>(&self, arena: &'a ArenaBuffer) -> Commands<'a> {
        Commands::new(arena, self.begin)
    }

    /// Remembers the current recording state for a later [`rollback`](Self::rollback).
    pub fn checkpoint(&self, arena: &ArenaBuffer) -> Checkpoint {
        Checkpoint {
            begin: self.begin,
            last: self.last,
            count: self.count,
            clip: self.clip,
            front: arena.allocated(),
        }
    }

    /// Drops every record appended since `checkpoint` and releases their
    /// arena bytes.
    pub fn rollback(&mut self, arena: &mut ArenaBuffer, checkpoint: Checkpoint) {
        arena.truncate_front(checkpoint.front);
        self.begin = checkpoint.begin;
        self.last = checkpoint.last;
        self.count = checkpoint.count;
        self.clip = checkpoint.clip;
        self.end = arena.allocated();
        if let Some(last) = self.last {
            set_next(arena, last, None);
        }
    }

    /// Unlinks the contiguous chain `first..=last` from this buffer. `after`
    /// is the record preceding `first`, if any. The detached chain keeps its
    /// internal links and ends in [`NO_NEXT`]; returns how many records it holds.
    pub fn detach(
        &mut self,
        arena: &mut ArenaBuffer,
        after: Option<usize>,
        first: usize,
        last: usize,
    ) -> usize {
        let mut detached = 1;
        let mut cursor = first;
        while cursor != last {
            match next_of(arena, cursor) {
                Some(next) => {
                    cursor = next;
                    detached += 1;
                }
                None => break,
            }
        }
        let rest = next_of(arena, last);
        match after {
            Some(prev) => {
                set_next(arena, prev, rest);
            }
            None => self.begin = rest,
        }
        if self.last == Some(last) {
            self.last = after;
        }
        set_next(arena, last, None);
        self.count = self.count.saturating_sub(detached);
        if self.count == 0 {
            self.begin = None;
            self.last = None;
        }
        detached
    }

    /// Appends a record and links it after the previous one.
    fn push<P: Pod>(
        &mut self,
        arena: &mut ArenaBuffer,
        kind: CommandKind,
        payload: &P,
        trailing: &[u8],
    ) -> Option<usize> {
        let size = HEADER_SIZE + std::mem::size_of::<P>() + trailing.len();
        let span = match arena.alloc(BufferSide::Front, size, COMMAND_ALIGN) {
            Ok(span) => span,
            Err(err) => {
                log::warn!("dropping {kind:?} command: {err}");
                return None;
            }
        };
        let offset = span.start(arena.capacity());
        let header = CommandHeader {
            kind: kind as u32,
            next: NO_NEXT,
            userdata: self.userdata,
        };
        let bytes = arena.bytes_mut(span);
        bytes[..HEADER_SIZE].copy_from_slice(bytemuck::bytes_of(&header));
        let payload_end = HEADER_SIZE + std::mem::size_of::<P>();
        bytes[HEADER_SIZE..payload_end].copy_from_slice(bytemuck::bytes_of(payload));
        bytes[payload_end..].copy_from_slice(trailing);

        match self.last {
            Some(prev) => {
                set_next(arena, prev, Some(offset));
            }
            None => self.begin = Some(offset),
        }
        self.last = Some(offset);
        self.end = arena.allocated();
        self.count += 1;
        Some(offset)
    }

    fn culled(&self, rect: &Rect) -> bool {
        self.use_clipping && !rect.intersects(&self.clip)
    }

    /// Like [`culled`](Self::culled) but also rejects an empty clip.
    fn culled_strict(&self, rect: &Rect) -> bool {
        self.use_clipping && (self.clip.w == 0.0 || self.clip.h == 0.0 || !rect.intersects(&self.clip))
    }

    /// Records a scissor change and adopts `rect` as the buffer's clip.
    pub fn push_scissor(&mut self, arena: &mut ArenaBuffer, rect: Rect) {
        self.clip = rect;
        let payload = ScissorCommand {
            x: quantize(rect.x),
            y: quantize(rect.y),
            w: extent(rect.w),
            h: extent(rect.h),
        };
        self.push(arena, CommandKind::Scissor, &payload, &[]);
    }

    pub fn stroke_line(
        &mut self,
        arena: &mut ArenaBuffer,
        begin: Vec2,
        end: Vec2,
        thickness: f32,
        color: Color,
    ) {
        if thickness <= 0.0 || !color.is_visible() {
            return;
        }
        let payload = LineCommand {
            begin: point16(begin),
            end: point16(end),
            thickness: extent(thickness),
            _pad: 0,
            color,
        };
        self.push(arena, CommandKind::Line, &payload, &[]);
    }

    pub fn stroke_curve(
        &mut self,
        arena: &mut ArenaBuffer,
        points: [Vec2; 4],
        thickness: f32,
        color: Color,
    ) {
        if thickness <= 0.0 || !color.is_visible() {
            return;
        }
        let payload = CurveCommand {
            begin: point16(points[0]),
            ctrl: [point16(points[1]), point16(points[2])],
            end: point16(points[3]),
            thickness: extent(thickness),
            _pad: 0,
            color,
        };
        self.push(arena, CommandKind::Curve, &payload, &[]);
    }

    pub fn stroke_rect(
        &mut self,
        arena: &mut ArenaBuffer,
        rect: Rect,
        rounding: f32,
        thickness: f32,
        color: Color,
    ) {
        if !color.is_visible() || rect.w == 0.0 || rect.h == 0.0 || thickness <= 0.0 {
            return;
        }
        if self.culled(&rect) {
            return;
        }
        let payload = RectCommand {
            x: quantize(rect.x),
            y: quantize(rect.y),
            w: extent(rect.w),
            h: extent(rect.h),
            rounding: extent(rounding),
            thickness: extent(thickness),
            color,
        };
        self.push(arena, CommandKind::Rect, &payload, &[]);
    }

    pub fn fill_rect(&mut self, arena: &mut ArenaBuffer, rect: Rect, rounding: f32, color: Color) {
        if !color.is_visible() || rect.w == 0.0 || rect.h == 0.0 {
            return;
        }
        if self.culled(&rect) {
            return;
        }
        let payload = RectFilledCommand {
            x: quantize(rect.x),
            y: quantize(rect.y),
            w: extent(rect.w),
            h: extent(rect.h),
            rounding: extent(rounding),
            _pad: 0,
            color,
        };
        self.push(arena, CommandKind::RectFilled, &payload, &[]);
    }

    pub fn fill_rect_multi_color(
        &mut self,
        arena: &mut ArenaBuffer,
        rect: Rect,
        left: Color,
        top: Color,
        right: Color,
        bottom: Color,
    ) {
        if self.culled(&rect) {
            return;
        }
        let payload = RectMultiColorCommand {
            x: quantize(rect.x),
            y: quantize(rect.y),
            w: extent(rect.w),
            h: extent(rect.h),
            left,
            top,
            bottom,
            right,
        };
        self.push(arena, CommandKind::RectMultiColor, &payload, &[]);
    }

    pub fn stroke_circle(&mut self, arena: &mut ArenaBuffer, rect: Rect, thickness: f32, color: Color) {
        if rect.w == 0.0 || rect.h == 0.0 || thickness <= 0.0 || !color.is_visible() {
            return;
        }
        if self.culled(&rect) {
            return;
        }
        let payload = CircleCommand {
            x: quantize(rect.x),
            y: quantize(rect.y),
            w: extent(rect.w),
            h: extent(rect.h),
            thickness: extent(thickness),
            _pad: 0,
            color,
        };
        self.push(arena, CommandKind::Circle, &payload, &[]);
    }

    pub fn fill_circle(&mut self, arena: &mut ArenaBuffer, rect: Rect, color: Color) {
        if !color.is_visible() || rect.w == 0.0 || rect.h == 0.0 {
            return;
        }
        if self.culled(&rect) {
            return;
        }
        let payload = CircleFilledCommand {
            x: quantize(rect.x),
            y: quantize(rect.y),
            w: extent(rect.w),
            h: extent(rect.h),
            color,
        };
        self.push(arena, CommandKind::CircleFilled, &payload, &[]);
    }

    #[allow(clippy::too_many_arguments)]
    pub fn stroke_arc(
        &mut self,
        arena: &mut ArenaBuffer,
        center: Vec2,
        radius: f32,
        a_min: f32,
        a_max: f32,
        thickness: f32,
        color: Color,
    ) {
        if !color.is_visible() || thickness <= 0.0 {
            return;
        }
        let payload = ArcCommand {
            cx: quantize(center.x),
            cy: quantize(center.y),
            r: extent(radius),
            thickness: extent(thickness),
            angles: [a_min, a_max],
            color,
        };
        self.push(arena, CommandKind::Arc, &payload, &[]);
    }

    pub fn fill_arc(
        &mut self,
        arena: &mut ArenaBuffer,
        center: Vec2,
        radius: f32,
        a_min: f32,
        a_max: f32,
        color: Color,
    ) {
        if !color.is_visible() {
            return;
        }
        let payload = ArcCommand {
            cx: quantize(center.x),
            cy: quantize(center.y),
            r: extent(radius),
            thickness: 0,
            angles: [a_min, a_max],
            color,
        };
        self.push(arena, CommandKind::ArcFilled, &payload, &[]);
    }

    fn triangle_culled(&self, points: &[Vec2; 3]) -> bool {
        self.use_clipping && !points.iter().any(|p| self.clip.contains(*p))
    }

    pub fn stroke_triangle(
        &mut self,
        arena: &mut ArenaBuffer,
        points: [Vec2; 3],
        thickness: f32,
        color: Color,
    ) {
        if !color.is_visible() || thickness <= 0.0 || self.triangle_culled(&points) {
            return;
        }
        let payload = TriangleCommand {
            a: point16(points[0]),
            b: point16(points[1]),
            c: point16(points[2]),
            thickness: extent(thickness),
            color,
        };
        self.push(arena, CommandKind::Triangle, &payload, &[]);
    }

    pub fn fill_triangle(&mut self, arena: &mut ArenaBuffer, points: [Vec2; 3], color: Color) {
        if !color.is_visible() || self.triangle_culled(&points) {
            return;
        }
        let payload = TriangleCommand {
            a: point16(points[0]),
            b: point16(points[1]),
            c: point16(points[2]),
            thickness: 0,
            color,
        };
        self.push(arena, CommandKind::TriangleFilled, &payload, &[]);
    }

    fn push_points(
        &mut self,
        arena: &mut ArenaBuffer,
        kind: CommandKind,
        points: &[Vec2],
        thickness: f32,
        color: Color,
    ) {
        let count = points.len().min(u16::MAX as usize);
        let packed: Vec<Point16> = points[..count].iter().copied().map(point16).collect();
        let payload = PolygonCommand {
            color,
            thickness: extent(thickness),
            point_count: count as u16,
        };
        self.push(arena, kind, &payload, bytemuck::cast_slice(&packed));
    }

    pub fn stroke_polygon(
        &mut self,
        arena: &mut ArenaBuffer,
        points: &[Vec2],
        thickness: f32,
        color: Color,
    ) {
        if !color.is_visible() || thickness <= 0.0 || points.is_empty() {
            return;
        }
        self.push_points(arena, CommandKind::Polygon, points, thickness, color);
    }

    pub fn fill_polygon(&mut self, arena: &mut ArenaBuffer, points: &[Vec2], color: Color) {
        if !color.is_visible() || points.is_empty() {
            return;
        }
        self.push_points(arena, CommandKind::PolygonFilled, points, 0.0, color);
    }

    pub fn stroke_polyline(
        &mut self,
        arena: &mut ArenaBuffer,
        points: &[Vec2],
        thickness: f32,
        color: Color,
    ) {
        if !color.is_visible() || thickness <= 0.0 || points.is_empty() {
            return;
        }
        self.push_points(arena, CommandKind::Polyline, points, thickness, color);
    }

    pub fn draw_image(&mut self, arena: &mut ArenaBuffer, rect: Rect, image: &Image, color: Color) {
        if self.culled_strict(&rect) {
            return;
        }
        let payload = ImageCommand {
            handle: image.handle,
            x: quantize(rect.x),
            y: quantize(rect.y),
            w: extent(rect.w),
            h: extent(rect.h),
            region: image.region,
            image_w: image.w,
            image_h: image.h,
            color,
        };
        self.push(arena, CommandKind::Image, &payload, &[]);
    }

    /// Records a host callback to be invoked during vertex conversion.
    pub fn push_custom(&mut self, arena: &mut ArenaBuffer, rect: Rect, callback: u32, data: u64) {
        if self.culled_strict(&rect) {
            return;
        }
        let payload = CustomCommand {
            x: quantize(rect.x),
            y: quantize(rect.y),
            w: extent(rect.w),
            h: extent(rect.h),
            callback,
            _pad: 0,
            data,
        };
        self.push(arena, CommandKind::Custom, &payload, &[]);
    }

    /// Records `text`, clamped to the glyphs that fit into `rect`.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_text(
        &mut self,
        arena: &mut ArenaBuffer,
        rect: Rect,
        text: &str,
        font_id: u32,
        font: &dyn Font,
        background: Color,
        foreground: Color,
    ) {
        if text.is_empty() || (!background.is_visible() && !foreground.is_visible()) {
            return;
        }
        if self.culled_strict(&rect) {
            return;
        }
        let mut length = text.len();
        if font.text_width(text) > rect.w {
            length = clamp_text(font, text, rect.w).0;
        }
        if length == 0 {
            return;
        }
        let payload = TextCommand {
            font: font_id,
            background,
            foreground,
            x: quantize(rect.x),
            y: quantize(rect.y),
            w: extent(rect.w),
            h: extent(rect.h),
            height: font.height(),
            length: length as u32,
        };
        self.push(arena, CommandKind::Text, &payload, &text.as_bytes()[..length]);
    }
}

/// Rewrites the `next` link of the record at `offset`.
pub fn set_next(arena: &mut ArenaBuffer, offset: usize, next: Option<usize>) -> bool {
    let Some(mut header) = arena.read::<CommandHeader>(offset) else {
        return false;
    };
    header.next = next.map_or(NO_NEXT, |n| n as u32);
    arena.write(offset, &header)
}

/// Reads the `next` link of the record at `offset`.
pub fn next_of(arena: &ArenaBuffer, offset: usize) -> Option<usize> {
    let header = arena.read::<CommandHeader>(offset)?;
    (header.next != NO_NEXT).then_some(header.next as usize)
}

#[cfg(test)]
#[path = "tests/command_tests.rs"]
mod tests;
