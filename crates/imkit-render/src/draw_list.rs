//! Tessellation into vertex, index and draw-call buffers
//!
//! Shapes are first built as a path of points and then either filled as a
//! convex fan or stroked as a quad strip. With anti-aliasing on, both gain a
//! one pixel fringe whose outer vertices fade to transparent.

use crate::config::{AntiAliasing, ConvertConfig};
use crate::convert::ConvertResult;
use crate::vertex::{DrawIndex, DrawVertex};
use imkit_core::Font;
use imkit_graphics::{Color, Handle, Image, Rect, Vec2};
use std::f32::consts::PI;

/// Width of the anti-aliasing fringe in pixels.
const AA_SIZE: f32 = 1.0;

/// Points of the unit circle used by [`DrawList::path_arc_to_fast`].
const CIRCLE_SEGMENTS: usize = 12;

/// A run of indices drawn with one clip rectangle and texture.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawCommand {
    pub elem_count: u32,
    pub clip_rect: Rect,
    pub texture: Handle,
    pub userdata: u64,
}

/// Optional caps on the output buffers; `None` lets a buffer grow freely.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BufferLimits {
    pub vertices: Option<usize>,
    pub indices: Option<usize>,
    pub commands: Option<usize>,
}

pub struct DrawList<I: DrawIndex = u16> {
    config: ConvertConfig,
    limits: BufferLimits,
    clip_rect: Rect,
    vertices: Vec<DrawVertex>,
    indices: Vec<I>,
    commands: Vec<DrawCommand>,
    path: Vec<Vec2>,
    circle: [Vec2; CIRCLE_SEGMENTS],
    userdata: u64,
    result: ConvertResult,
}

/// Averaged normal at a joint, lengthened so the offset edges stay parallel.
fn miter(n0: Vec2, n1: Vec2) -> Vec2 {
    let dm = (n0 + n1) * 0.5;
    let dmr2 = dm.length_sq();
    if dmr2 > 0.000001 {
        dm * (1.0 / dmr2).min(100.0)
    } else {
        dm
    }
}

impl<I: DrawIndex> DrawList<I> {
    pub fn new(config: ConvertConfig) -> Self {
        let circle = std::array::from_fn(|i| {
            let a = i as f32 / CIRCLE_SEGMENTS as f32 * 2.0 * PI;
            Vec2::new(a.cos(), a.sin())
        });
        Self {
            config,
            limits: BufferLimits::default(),
            clip_rect: Rect::NULL,
            vertices: Vec::new(),
            indices: Vec::new(),
            commands: Vec::new(),
            path: Vec::new(),
            circle,
            userdata: 0,
            result: ConvertResult::empty(),
        }
    }

    pub fn with_limits(mut self, limits: BufferLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Drops all output while keeping the allocations for the next frame.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
        self.commands.clear();
        self.path.clear();
        self.clip_rect = Rect::NULL;
        self.userdata = 0;
        self.result = ConvertResult::empty();
    }

    pub fn config(&self) -> &ConvertConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: ConvertConfig) {
        self.config = config;
    }

    pub fn vertices(&self) -> &[DrawVertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[I] {
        &self.indices
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Draw calls that actually reference indices.
    pub fn draw_calls(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands.iter().filter(|cmd| cmd.elem_count > 0)
    }

    /// Buffers that ran out of room since the last [`clear`](Self::clear).
    pub fn result(&self) -> ConvertResult {
        self.result
    }

    pub fn clip_rect(&self) -> Rect {
        self.clip_rect
    }

    /// Userdata attached to draw commands started from now on.
    pub fn push_userdata(&mut self, userdata: u64) {
        self.userdata = userdata;
    }

    fn push_command(&mut self, clip_rect: Rect, texture: Handle) -> bool {
        if self.limits.commands.is_some_and(|max| self.commands.len() >= max) {
            self.result |= ConvertResult::COMMAND_BUFFER_FULL;
            return false;
        }
        self.commands.push(DrawCommand {
            elem_count: 0,
            clip_rect,
            texture,
            userdata: self.userdata,
        });
        self.clip_rect = clip_rect;
        true
    }

    /// Starts clipping following triangles to `rect`.
    pub fn add_clip(&mut self, rect: Rect) {
        match self.commands.last_mut() {
            None => {
                let texture = self.config.null.texture;
                self.push_command(rect, texture);
            }
            Some(prev) if prev.elem_count == 0 => {
                prev.clip_rect = rect;
                self.clip_rect = rect;
            }
            Some(prev) => {
                let texture = prev.texture;
                self.push_command(rect, texture);
            }
        }
    }

    fn push_image(&mut self, texture: Handle) {
        match self.commands.last_mut() {
            None => {
                self.push_command(Rect::NULL, texture);
            }
            Some(prev) if prev.elem_count == 0 => prev.texture = texture,
            Some(prev) if prev.texture != texture => {
                let clip = prev.clip_rect;
                self.push_command(clip, texture);
            }
            Some(_) => {}
        }
    }

    /// Makes room for `vertices` vertices and `indices` indices in the
    /// current draw command; returns the index of the first new vertex.
    fn reserve(&mut self, vertices: usize, indices: usize) -> Option<u32> {
        if self.commands.is_empty() {
            let texture = self.config.null.texture;
            if !self.push_command(Rect::NULL, texture) {
                return None;
            }
        }
        let base = self.vertices.len();
        let max_vertices = self.limits.vertices.map_or(I::MAX_VERTICES, |max| max.min(I::MAX_VERTICES));
        if base + vertices > max_vertices {
            self.result |= ConvertResult::VERTEX_BUFFER_FULL;
            return None;
        }
        if self.limits.indices.is_some_and(|max| self.indices.len() + indices > max) {
            self.result |= ConvertResult::ELEMENT_BUFFER_FULL;
            return None;
        }
        let cmd = self.commands.last_mut()?;
        cmd.elem_count += indices as u32;
        self.vertices.reserve(vertices);
        self.indices.reserve(indices);
        Some(base as u32)
    }

    fn vertex(&mut self, position: Vec2, uv: Vec2, color: Color) {
        self.vertices.push(DrawVertex::new(position, uv, color));
    }

    fn push_indices(&mut self, indices: &[u32]) {
        self.indices.extend(indices.iter().map(|&i| I::from_vertex(i)));
    }

    fn faded(&self, color: Color) -> Color {
        let alpha = (color.a as f32 * self.config.global_alpha.clamp(0.0, 1.0)) as u8;
        color.with_alpha(alpha)
    }

    /// Expands the polyline `points` into triangles `thickness` wide.
    pub fn stroke_poly_line(
        &mut self,
        points: &[Vec2],
        color: Color,
        closed: bool,
        thickness: f32,
        aa: AntiAliasing,
    ) {
        let n = points.len();
        if n < 2 {
            return;
        }
        let color = self.faded(color);
        let uv = self.config.null.uv;
        let count = if closed { n } else { n - 1 };
        let next = |i: usize| if i + 1 == n { 0 } else { i + 1 };

        if aa == AntiAliasing::Off {
            let Some(mut idx) = self.reserve(count * 4, count * 6) else {
                return;
            };
            for i1 in 0..count {
                let p1 = points[i1];
                let p2 = points[next(i1)];
                let d = (p2 - p1).normalized() * (thickness * 0.5);
                self.vertex(p1 + Vec2::new(d.y, -d.x), uv, color);
                self.vertex(p2 + Vec2::new(d.y, -d.x), uv, color);
                self.vertex(p2 + Vec2::new(-d.y, d.x), uv, color);
                self.vertex(p1 + Vec2::new(-d.y, d.x), uv, color);
                self.push_indices(&[idx, idx + 1, idx + 2, idx, idx + 2, idx + 3]);
                idx += 4;
            }
            return;
        }

        let thick = thickness > 1.0;
        let transparent = color.with_alpha(0);
        let (vertex_count, index_count) = if thick { (n * 4, count * 18) } else { (n * 3, count * 12) };
        let Some(base) = self.reserve(vertex_count, index_count) else {
            return;
        };
        let mut normals = vec![Vec2::ZERO; n];
        for i1 in 0..count {
            let diff = (points[next(i1)] - points[i1]).normalized();
            normals[i1] = Vec2::new(diff.y, -diff.x);
        }
        if !closed {
            normals[n - 1] = normals[n - 2];
        }

        if !thick {
            let mut temp = vec![Vec2::ZERO; n * 2];
            if !closed {
                for i in [0, n - 1] {
                    temp[i * 2] = points[i] + normals[i] * AA_SIZE;
                    temp[i * 2 + 1] = points[i] - normals[i] * AA_SIZE;
                }
            }
            let mut idx1 = base;
            for i1 in 0..count {
                let i2 = next(i1);
                let idx2 = if i1 + 1 == n { base } else { idx1 + 3 };
                let dm = miter(normals[i1], normals[i2]) * AA_SIZE;
                temp[i2 * 2] = points[i2] + dm;
                temp[i2 * 2 + 1] = points[i2] - dm;
                self.push_indices(&[
                    idx2,
                    idx1,
                    idx1 + 2,
                    idx1 + 2,
                    idx2 + 2,
                    idx2,
                    idx2 + 1,
                    idx1 + 1,
                    idx1,
                    idx1,
                    idx2,
                    idx2 + 1,
                ]);
                idx1 = idx2;
            }
            for (i, &point) in points.iter().enumerate() {
                self.vertex(point, uv, color);
                self.vertex(temp[i * 2], uv, transparent);
                self.vertex(temp[i * 2 + 1], uv, transparent);
            }
            return;
        }

        let half_inner = (thickness - AA_SIZE) * 0.5;
        let mut temp = vec![Vec2::ZERO; n * 4];
        if !closed {
            for i in [0, n - 1] {
                let outer = normals[i] * (half_inner + AA_SIZE);
                let inner = normals[i] * half_inner;
                temp[i * 4] = points[i] + outer;
                temp[i * 4 + 1] = points[i] + inner;
                temp[i * 4 + 2] = points[i] - inner;
                temp[i * 4 + 3] = points[i] - outer;
            }
        }
        let mut idx1 = base;
        for i1 in 0..count {
            let i2 = next(i1);
            let idx2 = if i1 + 1 == n { base } else { idx1 + 4 };
            let dm = miter(normals[i1], normals[i2]);
            let outer = dm * (half_inner + AA_SIZE);
            let inner = dm * half_inner;
            temp[i2 * 4] = points[i2] + outer;
            temp[i2 * 4 + 1] = points[i2] + inner;
            temp[i2 * 4 + 2] = points[i2] - inner;
            temp[i2 * 4 + 3] = points[i2] - outer;
            self.push_indices(&[
                idx2 + 1,
                idx1 + 1,
                idx1 + 2,
                idx1 + 2,
                idx2 + 2,
                idx2 + 1,
                idx2 + 1,
                idx1 + 1,
                idx1,
                idx1,
                idx2,
                idx2 + 1,
                idx2 + 2,
                idx1 + 2,
                idx1 + 3,
                idx1 + 3,
                idx2 + 3,
                idx2 + 2,
            ]);
            idx1 = idx2;
        }
        for i in 0..n {
            self.vertex(temp[i * 4], uv, transparent);
            self.vertex(temp[i * 4 + 1], uv, color);
            self.vertex(temp[i * 4 + 2], uv, color);
            self.vertex(temp[i * 4 + 3], uv, transparent);
        }
    }

    /// Fills the convex polygon `points` as a triangle fan.
    pub fn fill_poly_convex(&mut self, points: &[Vec2], color: Color, aa: AntiAliasing) {
        let n = points.len();
        if n < 3 {
            return;
        }
        let color = self.faded(color);
        let uv = self.config.null.uv;

        if aa == AntiAliasing::Off {
            let Some(base) = self.reserve(n, (n - 2) * 3) else {
                return;
            };
            for &point in points {
                self.vertex(point, uv, color);
            }
            for i in 2..n as u32 {
                self.push_indices(&[base, base + i - 1, base + i]);
            }
            return;
        }

        let transparent = color.with_alpha(0);
        let Some(base) = self.reserve(n * 2, (n - 2) * 3 + n * 6) else {
            return;
        };
        let inner = base;
        let outer = base + 1;
        for i in 2..n as u32 {
            self.push_indices(&[inner, inner + ((i - 1) << 1), inner + (i << 1)]);
        }
        let mut normals = vec![Vec2::ZERO; n];
        let mut i0 = n - 1;
        for i1 in 0..n {
            let diff = (points[i1] - points[i0]).normalized();
            normals[i0] = Vec2::new(diff.y, -diff.x);
            i0 = i1;
        }
        let mut i0 = n - 1;
        for i1 in 0..n {
            let dm = miter(normals[i0], normals[i1]) * (AA_SIZE * 0.5);
            self.vertex(points[i1] - dm, uv, color);
            self.vertex(points[i1] + dm, uv, transparent);
            let (a, b) = ((i1 as u32) << 1, (i0 as u32) << 1);
            self.push_indices(&[inner + a, inner + b, outer + b, outer + b, outer + a, inner + a]);
            i0 = i1;
        }
    }

    pub fn path_clear(&mut self) {
        self.path.clear();
    }

    /// Current path points.
    pub fn path(&self) -> &[Vec2] {
        &self.path
    }

    pub fn path_line_to(&mut self, pos: Vec2) {
        if self.commands.is_empty() {
            self.add_clip(Rect::NULL);
        }
        let null = self.config.null.texture;
        if self.commands.last().is_some_and(|cmd| cmd.texture != null) {
            self.push_image(null);
        }
        self.path.push(pos);
    }

    /// Arc through the precomputed twelfths of a circle, from `a_min` to
    /// `a_max` inclusive. Twelfth 0 points along +x, 3 along +y.
    pub fn path_arc_to_fast(&mut self, center: Vec2, radius: f32, a_min: usize, a_max: usize) {
        for a in a_min..=a_max {
            let c = self.circle[a % CIRCLE_SEGMENTS];
            self.path_line_to(center + c * radius);
        }
    }

    /// Arc from angle `a_min` to `a_max` (radians) in `segments` steps.
    pub fn path_arc_to(&mut self, center: Vec2, radius: f32, a_min: f32, a_max: f32, segments: u32) {
        if radius == 0.0 || segments == 0 {
            return;
        }
        let d_angle = (a_max - a_min) / segments as f32;
        let (sin_d, cos_d) = d_angle.sin_cos();
        let mut cx = a_min.cos() * radius;
        let mut cy = a_min.sin() * radius;
        for _ in 0..=segments {
            self.path_line_to(Vec2::new(center.x + cx, center.y + cy));
            let new_cx = cx * cos_d - cy * sin_d;
            cy = cy * cos_d + cx * sin_d;
            cx = new_cx;
        }
    }

    /// Rectangle from corner `a` to corner `b`, optionally with rounded corners.
    pub fn path_rect_to(&mut self, a: Vec2, b: Vec2, rounding: f32) {
        let r = rounding.min((b.x - a.x).abs()).min((b.y - a.y).abs());
        if r == 0.0 {
            self.path_line_to(a);
            self.path_line_to(Vec2::new(b.x, a.y));
            self.path_line_to(b);
            self.path_line_to(Vec2::new(a.x, b.y));
        } else {
            self.path_arc_to_fast(Vec2::new(a.x + r, a.y + r), r, 6, 9);
            self.path_arc_to_fast(Vec2::new(b.x - r, a.y + r), r, 9, 12);
            self.path_arc_to_fast(Vec2::new(b.x - r, b.y - r), r, 0, 3);
            self.path_arc_to_fast(Vec2::new(a.x + r, b.y - r), r, 3, 6);
        }
    }

    /// Cubic bezier from the last path point through `p2` and `p3` to `p4`.
    pub fn path_curve_to(&mut self, p2: Vec2, p3: Vec2, p4: Vec2, segments: u32) {
        let Some(&p1) = self.path.last() else {
            return;
        };
        let segments = segments.max(1);
        let step = 1.0 / segments as f32;
        for i in 1..=segments {
            let t = step * i as f32;
            let u = 1.0 - t;
            let w1 = u * u * u;
            let w2 = 3.0 * u * u * t;
            let w3 = 3.0 * u * t * t;
            let w4 = t * t * t;
            self.path_line_to(p1 * w1 + p2 * w2 + p3 * w3 + p4 * w4);
        }
    }

    pub fn path_fill(&mut self, color: Color) {
        let path = std::mem::take(&mut self.path);
        let aa = self.config.shape_aa;
        self.fill_poly_convex(&path, color, aa);
        self.path = path;
        self.path.clear();
    }

    pub fn path_stroke(&mut self, color: Color, closed: bool, thickness: f32) {
        let path = std::mem::take(&mut self.path);
        let aa = self.config.line_aa;
        self.stroke_poly_line(&path, color, closed, thickness, aa);
        self.path = path;
        self.path.clear();
    }

    /// Offset that keeps one pixel wide strokes on pixel centers without
    /// anti-aliasing.
    fn pixel_offset(&self) -> Vec2 {
        match self.config.line_aa {
            AntiAliasing::On => Vec2::ZERO,
            AntiAliasing::Off => Vec2::new(0.5, 0.5),
        }
    }

    pub fn stroke_line(&mut self, a: Vec2, b: Vec2, color: Color, thickness: f32) {
        if !color.is_visible() {
            return;
        }
        let offset = self.pixel_offset();
        self.path_line_to(a - offset);
        self.path_line_to(b - offset);
        self.path_stroke(color, false, thickness);
    }

    pub fn fill_rect(&mut self, rect: Rect, color: Color, rounding: f32) {
        if !color.is_visible() {
            return;
        }
        let offset = self.pixel_offset();
        let min = rect.pos() - offset;
        self.path_rect_to(min, min + rect.size(), rounding);
        self.path_fill(color);
    }

    pub fn stroke_rect(&mut self, rect: Rect, color: Color, rounding: f32, thickness: f32) {
        if !color.is_visible() {
            return;
        }
        let offset = self.pixel_offset();
        let min = rect.pos() - offset;
        self.path_rect_to(min, min + rect.size(), rounding);
        self.path_stroke(color, true, thickness);
    }

    /// Rectangle whose corners blend between four colors.
    pub fn fill_rect_multi_color(&mut self, rect: Rect, left: Color, top: Color, right: Color, bottom: Color) {
        let null = self.config.null;
        self.push_image(null.texture);
        let Some(idx) = self.reserve(4, 6) else {
            return;
        };
        let (left, top, right, bottom) = (self.faded(left), self.faded(top), self.faded(right), self.faded(bottom));
        self.push_indices(&[idx, idx + 1, idx + 2, idx, idx + 2, idx + 3]);
        self.vertex(rect.pos(), null.uv, left);
        self.vertex(Vec2::new(rect.max_x(), rect.y), null.uv, top);
        self.vertex(Vec2::new(rect.max_x(), rect.max_y()), null.uv, right);
        self.vertex(Vec2::new(rect.x, rect.max_y()), null.uv, bottom);
    }

    pub fn fill_triangle(&mut self, points: [Vec2; 3], color: Color) {
        if !color.is_visible() {
            return;
        }
        for point in points {
            self.path_line_to(point);
        }
        self.path_fill(color);
    }

    pub fn stroke_triangle(&mut self, points: [Vec2; 3], color: Color, thickness: f32) {
        if !color.is_visible() {
            return;
        }
        for point in points {
            self.path_line_to(point);
        }
        self.path_stroke(color, true, thickness);
    }

    fn circle_path(&mut self, center: Vec2, radius: f32, segments: u32) {
        let segments = segments.max(3);
        let a_max = PI * 2.0 * (segments as f32 - 1.0) / segments as f32;
        self.path_arc_to(center, radius, 0.0, a_max, segments - 1);
    }

    pub fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color, segments: u32) {
        if !color.is_visible() {
            return;
        }
        self.circle_path(center, radius, segments);
        self.path_fill(color);
    }

    pub fn stroke_circle(&mut self, center: Vec2, radius: f32, color: Color, segments: u32, thickness: f32) {
        if !color.is_visible() {
            return;
        }
        self.circle_path(center, radius, segments);
        self.path_stroke(color, true, thickness);
    }

    #[allow(clippy::too_many_arguments)]
    pub fn stroke_curve(
        &mut self,
        p0: Vec2,
        cp0: Vec2,
        cp1: Vec2,
        p1: Vec2,
        color: Color,
        segments: u32,
        thickness: f32,
    ) {
        if !color.is_visible() {
            return;
        }
        self.path_line_to(p0);
        self.path_curve_to(cp0, cp1, p1, segments);
        self.path_stroke(color, false, thickness);
    }

    /// Textured quad from `a` to `c` mapping `uv_a` to `uv_c`.
    fn push_rect_uv(&mut self, a: Vec2, c: Vec2, uv_a: Vec2, uv_c: Vec2, color: Color) {
        let Some(idx) = self.reserve(4, 6) else {
            return;
        };
        self.push_indices(&[idx, idx + 1, idx + 2, idx, idx + 2, idx + 3]);
        self.vertex(a, uv_a, color);
        self.vertex(Vec2::new(c.x, a.y), Vec2::new(uv_c.x, uv_a.y), color);
        self.vertex(c, uv_c, color);
        self.vertex(Vec2::new(a.x, c.y), Vec2::new(uv_a.x, uv_c.y), color);
    }

    pub fn add_image(&mut self, image: &Image, rect: Rect, color: Color) {
        let color = self.faded(color);
        self.push_image(image.handle);
        let [u0, v0, u1, v1] = image.uv();
        self.push_rect_uv(
            rect.pos(),
            Vec2::new(rect.max_x(), rect.max_y()),
            Vec2::new(u0, v0),
            Vec2::new(u1, v1),
            color,
        );
    }

    /// One quad per glyph, laid out from the left edge of `rect`.
    pub fn add_text(&mut self, font: &dyn Font, rect: Rect, text: &str, color: Color) {
        if text.is_empty() || !color.is_visible() || !rect.intersects(&self.clip_rect) {
            return;
        }
        let color = self.faded(color);
        self.push_image(font.texture());
        let mut x = rect.x;
        let mut chars = text.chars().peekable();
        while let Some(ch) = chars.next() {
            let glyph = font.query_glyph(ch, chars.peek().copied());
            let gx = x + glyph.offset.x;
            let gy = rect.y + glyph.offset.y;
            self.push_rect_uv(
                Vec2::new(gx, gy),
                Vec2::new(gx + glyph.width, gy + glyph.height),
                glyph.uv[0],
                glyph.uv[1],
                color,
            );
            x += glyph.xadvance;
        }
    }
}

#[cfg(test)]
#[path = "tests/draw_list_tests.rs"]
mod tests;
