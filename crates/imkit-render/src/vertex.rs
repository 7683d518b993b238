use bytemuck::{Pod, Zeroable};
use imkit_graphics::{Color, Vec2};
use std::fmt::Debug;

/// One output vertex, laid out for direct upload to a vertex buffer.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct DrawVertex {
    pub position: [f32; 2],
    pub uv: [f32; 2],
    pub color: [u8; 4],
}

impl DrawVertex {
    pub fn new(position: Vec2, uv: Vec2, color: Color) -> Self {
        Self {
            position: [position.x, position.y],
            uv: [uv.x, uv.y],
            color: [color.r, color.g, color.b, color.a],
        }
    }

    pub fn position(&self) -> Vec2 {
        Vec2::new(self.position[0], self.position[1])
    }
}

/// Element type of the index buffer.
pub trait DrawIndex: Copy + Debug + PartialEq + Pod {
    /// Number of distinct vertices the type can address.
    const MAX_VERTICES: usize;

    fn from_vertex(index: u32) -> Self;

    fn to_vertex(self) -> u32;
}

impl DrawIndex for u16 {
    const MAX_VERTICES: usize = 1 << 16;

    fn from_vertex(index: u32) -> Self {
        index as u16
    }

    fn to_vertex(self) -> u32 {
        self as u32
    }
}

impl DrawIndex for u32 {
    const MAX_VERTICES: usize = u32::MAX as usize;

    fn from_vertex(index: u32) -> Self {
        index
    }

    fn to_vertex(self) -> u32 {
        self
    }
}
