//! Draw command records.
//!
//! A record is a [`CommandHeader`] immediately followed by a kind-specific
//! payload and, for polygons and text, variable-length trailing data. All
//! records are plain old data so they can live inside an [`ArenaBuffer`].
//!
//! [`ArenaBuffer`]: crate::ArenaBuffer

use crate::buffer::ArenaBuffer;
use bytemuck::{Pod, Zeroable};
use imkit_graphics::{Color, Handle, Rect, Vec2};

/// `next` value of the last record in a chain.
pub const NO_NEXT: u32 = u32::MAX;

/// Alignment of every record inside the arena.
pub const COMMAND_ALIGN: usize = 8;

#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CommandKind {
    Scissor = 1,
    Line,
    Curve,
    Rect,
    RectFilled,
    RectMultiColor,
    Circle,
    CircleFilled,
    Arc,
    ArcFilled,
    Triangle,
    TriangleFilled,
    Polygon,
    PolygonFilled,
    Polyline,
    Text,
    Image,
    Custom,
}

impl CommandKind {
    pub fn from_u32(raw: u32) -> Option<Self> {
        use CommandKind::*;
        const ALL: [CommandKind; 18] = [
            Scissor,
            Line,
            Curve,
            Rect,
            RectFilled,
            RectMultiColor,
            Circle,
            CircleFilled,
            Arc,
            ArcFilled,
            Triangle,
            TriangleFilled,
            Polygon,
            PolygonFilled,
            Polyline,
            Text,
            Image,
            Custom,
        ];
        ALL.iter().copied().find(|kind| *kind as u32 == raw)
    }
}

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct CommandHeader {
    pub kind: u32,
    /// Arena offset of the next record, or [`NO_NEXT`].
    pub next: u32,
    pub userdata: u64,
}

pub const HEADER_SIZE: usize = std::mem::size_of::<CommandHeader>();

/// Quantized point as stored in records.
pub type Point16 = [i16; 2];

pub fn point16(v: Vec2) -> Point16 {
    [v.x as i16, v.y as i16]
}

fn point_vec(p: Point16) -> Vec2 {
    Vec2::new(p[0] as f32, p[1] as f32)
}

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct ScissorCommand {
    pub x: i16,
    pub y: i16,
    pub w: u16,
    pub h: u16,
}

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct LineCommand {
    pub begin: Point16,
    pub end: Point16,
    pub thickness: u16,
    pub _pad: u16,
    pub color: Color,
}

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct CurveCommand {
    pub begin: Point16,
    pub end: Point16,
    pub ctrl: [Point16; 2],
    pub thickness: u16,
    pub _pad: u16,
    pub color: Color,
}

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct RectCommand {
    pub x: i16,
    pub y: i16,
    pub w: u16,
    pub h: u16,
    pub rounding: u16,
    pub thickness: u16,
    pub color: Color,
}

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct RectFilledCommand {
    pub x: i16,
    pub y: i16,
    pub w: u16,
    pub h: u16,
    pub rounding: u16,
    pub _pad: u16,
    pub color: Color,
}

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct RectMultiColorCommand {
    pub x: i16,
    pub y: i16,
    pub w: u16,
    pub h: u16,
    pub left: Color,
    pub top: Color,
    pub bottom: Color,
    pub right: Color,
}

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct CircleCommand {
    pub x: i16,
    pub y: i16,
    pub w: u16,
    pub h: u16,
    pub thickness: u16,
    pub _pad: u16,
    pub color: Color,
}

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct CircleFilledCommand {
    pub x: i16,
    pub y: i16,
    pub w: u16,
    pub h: u16,
    pub color: Color,
}

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct ArcCommand {
    pub cx: i16,
    pub cy: i16,
    pub r: u16,
    /// Zero for filled arcs.
    pub thickness: u16,
    /// Start and end angle in radians.
    pub angles: [f32; 2],
    pub color: Color,
}

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct TriangleCommand {
    pub a: Point16,
    pub b: Point16,
    pub c: Point16,
    /// Zero for filled triangles.
    pub thickness: u16,
    pub color: Color,
}

/// Shared payload of polygon, filled polygon and polyline records.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct PolygonCommand {
    pub color: Color,
    pub thickness: u16,
    pub point_count: u16,
}

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct TextCommand {
    pub font: u32,
    pub background: Color,
    pub foreground: Color,
    pub x: i16,
    pub y: i16,
    pub w: u16,
    pub h: u16,
    pub height: f32,
    pub length: u32,
}

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct ImageCommand {
    pub handle: Handle,
    pub x: i16,
    pub y: i16,
    pub w: u16,
    pub h: u16,
    pub region: [u16; 4],
    pub image_w: u16,
    pub image_h: u16,
    pub color: Color,
}

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct CustomCommand {
    pub x: i16,
    pub y: i16,
    pub w: u16,
    pub h: u16,
    /// Host-registered callback identifier.
    pub callback: u32,
    pub _pad: u32,
    pub data: u64,
}

macro_rules! rect_accessor {
    ($($ty:ty),*) => {
        $(impl $ty {
            pub fn rect(&self) -> Rect {
                Rect::new(self.x as f32, self.y as f32, self.w as f32, self.h as f32)
            }
        })*
    };
}

rect_accessor!(
    ScissorCommand,
    RectCommand,
    RectFilledCommand,
    RectMultiColorCommand,
    CircleCommand,
    CircleFilledCommand,
    TextCommand,
    ImageCommand,
    CustomCommand
);

impl ImageCommand {
    pub fn image(&self) -> imkit_graphics::Image {
        imkit_graphics::Image::sub_image(self.handle, self.image_w, self.image_h, self.region)
    }
}

/// Trailing point list of a polygon-like record.
#[derive(Clone, Copy, Debug)]
pub struct Points<'a> {
    bytes: &'a [u8],
}

impl<'a> Points<'a> {
    pub fn len(&self) -> usize {
        self.bytes.len() / std::mem::size_of::<Point16>()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = Vec2> + 'a {
        self.bytes
            .chunks_exact(std::mem::size_of::<Point16>())
            .map(|chunk| point_vec(bytemuck::pod_read_unaligned(chunk)))
    }
}

/// Decoded view of one record.
#[derive(Clone, Copy, Debug)]
pub enum Command<'a> {
    Scissor(ScissorCommand),
    Line(LineCommand),
    Curve(CurveCommand),
    Rect(RectCommand),
    RectFilled(RectFilledCommand),
    RectMultiColor(RectMultiColorCommand),
    Circle(CircleCommand),
    CircleFilled(CircleFilledCommand),
    Arc(ArcCommand),
    ArcFilled(ArcCommand),
    Triangle(TriangleCommand),
    TriangleFilled(TriangleCommand),
    Polygon(PolygonCommand, Points<'a>),
    PolygonFilled(PolygonCommand, Points<'a>),
    Polyline(PolygonCommand, Points<'a>),
    Text(TextCommand, &'a str),
    Image(ImageCommand),
    Custom(CustomCommand),
}

impl Command<'_> {
    pub fn kind(&self) -> CommandKind {
        match self {
            Command::Scissor(_) => CommandKind::Scissor,
            Command::Line(_) => CommandKind::Line,
            Command::Curve(_) => CommandKind::Curve,
            Command::Rect(_) => CommandKind::Rect,
            Command::RectFilled(_) => CommandKind::RectFilled,
            Command::RectMultiColor(_) => CommandKind::RectMultiColor,
            Command::Circle(_) => CommandKind::Circle,
            Command::CircleFilled(_) => CommandKind::CircleFilled,
            Command::Arc(_) => CommandKind::Arc,
            Command::ArcFilled(_) => CommandKind::ArcFilled,
            Command::Triangle(_) => CommandKind::Triangle,
            Command::TriangleFilled(_) => CommandKind::TriangleFilled,
            Command::Polygon(..) => CommandKind::Polygon,
            Command::PolygonFilled(..) => CommandKind::PolygonFilled,
            Command::Polyline(..) => CommandKind::Polyline,
            Command::Text(..) => CommandKind::Text,
            Command::Image(_) => CommandKind::Image,
            Command::Custom(_) => CommandKind::Custom,
        }
    }
}

/// Size of the fixed payload that follows the header for `kind`.
pub fn payload_size(kind: CommandKind) -> usize {
    use std::mem::size_of;
    match kind {
        CommandKind::Scissor => size_of::<ScissorCommand>(),
        CommandKind::Line => size_of::<LineCommand>(),
        CommandKind::Curve => size_of::<CurveCommand>(),
        CommandKind::Rect => size_of::<RectCommand>(),
        CommandKind::RectFilled => size_of::<RectFilledCommand>(),
        CommandKind::RectMultiColor => size_of::<RectMultiColorCommand>(),
        CommandKind::Circle => size_of::<CircleCommand>(),
        CommandKind::CircleFilled => size_of::<CircleFilledCommand>(),
        CommandKind::Arc | CommandKind::ArcFilled => size_of::<ArcCommand>(),
        CommandKind::Triangle | CommandKind::TriangleFilled => size_of::<TriangleCommand>(),
        CommandKind::Polygon | CommandKind::PolygonFilled | CommandKind::Polyline => {
            size_of::<PolygonCommand>()
        }
        CommandKind::Text => size_of::<TextCommand>(),
        CommandKind::Image => size_of::<ImageCommand>(),
        CommandKind::Custom => size_of::<CustomCommand>(),
    }
}

fn decode_at<'a>(arena: &'a ArenaBuffer, offset: usize, kind: CommandKind) -> Option<Command<'a>> {
    let at = offset + HEADER_SIZE;
    let command = match kind {
        CommandKind::Scissor => Command::Scissor(arena.read(at)?),
        CommandKind::Line => Command::Line(arena.read(at)?),
        CommandKind::Curve => Command::Curve(arena.read(at)?),
        CommandKind::Rect => Command::Rect(arena.read(at)?),
        CommandKind::RectFilled => Command::RectFilled(arena.read(at)?),
        CommandKind::RectMultiColor => Command::RectMultiColor(arena.read(at)?),
        CommandKind::Circle => Command::Circle(arena.read(at)?),
        CommandKind::CircleFilled => Command::CircleFilled(arena.read(at)?),
        CommandKind::Arc => Command::Arc(arena.read(at)?),
        CommandKind::ArcFilled => Command::ArcFilled(arena.read(at)?),
        CommandKind::Triangle => Command::Triangle(arena.read(at)?),
        CommandKind::TriangleFilled => Command::TriangleFilled(arena.read(at)?),
        CommandKind::Polygon | CommandKind::PolygonFilled | CommandKind::Polyline => {
            let payload: PolygonCommand = arena.read(at)?;
            let len = payload.point_count as usize * std::mem::size_of::<Point16>();
            let bytes = arena.slice(at + payload_size(kind), len)?;
            let points = Points { bytes };
            match kind {
                CommandKind::Polygon => Command::Polygon(payload, points),
                CommandKind::PolygonFilled => Command::PolygonFilled(payload, points),
                _ => Command::Polyline(payload, points),
            }
        }
        CommandKind::Text => {
            let payload: TextCommand = arena.read(at)?;
            let bytes = arena.slice(at + payload_size(kind), payload.length as usize)?;
            Command::Text(payload, std::str::from_utf8(bytes).ok()?)
        }
        CommandKind::Image => Command::Image(arena.read(at)?),
        CommandKind::Custom => Command::Custom(arena.read(at)?),
    };
    Some(command)
}

/// Walks a linked chain of records starting at `head`.
///
/// Iteration stops at [`NO_NEXT`], at an offset past the arena's front fill
/// level, or at a record that fails to decode.
#[derive(Clone)]
pub struct Commands<'a> {
    arena: &'a ArenaBuffer,
    next: Option<usize>,
    remaining: usize,
}

impl<'a> Commands<'a> {
    pub fn new(arena: &'a ArenaBuffer, head: Option<usize>) -> Self {
        Self {
            arena,
            next: head,
            // A chain can never hold more records than fit in the arena.
            remaining: arena.allocated() / HEADER_SIZE + 1,
        }
    }

    pub fn empty(arena: &'a ArenaBuffer) -> Self {
        Self::new(arena, None)
    }

    /// Same as [`Iterator::next`] but also yields the record's userdata.
    pub fn next_with_userdata(&mut self) -> Option<(u64, Command<'a>)> {
        let offset = self.next.take()?;
        if self.remaining == 0 || offset + HEADER_SIZE > self.arena.allocated() {
            return None;
        }
        self.remaining -= 1;
        let header: CommandHeader = self.arena.read(offset)?;
        let kind = CommandKind::from_u32(header.kind)?;
        let command = decode_at(self.arena, offset, kind)?;
        if header.next != NO_NEXT {
            self.next = Some(header.next as usize);
        }
        Some((header.userdata, command))
    }
}

impl<'a> Iterator for Commands<'a> {
    type Item = Command<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_with_userdata().map(|(_, command)| command)
    }
}
