//! Vertex conversion for imkit draw commands
//!
//! [`convert`] walks a frame's command list and tessellates every primitive
//! into a [`DrawList`]: textured, colored vertices, 16- or 32-bit indices and
//! one [`DrawCommand`] per run of triangles that share a clip rectangle and
//! texture. Output limits are optional; running into one is reported in the
//! returned [`ConvertResult`] instead of failing the whole frame.

mod config;
mod convert;
mod draw_list;
mod vertex;

pub use config::*;
pub use convert::*;
pub use draw_list::*;
pub use vertex::*;

pub mod prelude {
    pub use crate::config::{AntiAliasing, ConvertConfig, NullTexture};
    pub use crate::convert::{convert, ConvertResult, CustomDraw, CustomDrawRegistry, FontLookup};
    pub use crate::draw_list::{BufferLimits, DrawCommand, DrawList};
    pub use crate::vertex::{DrawIndex, DrawVertex};
}
