//! Pure math/data for drawing in imkit
//!
//! This crate contains the geometry primitives, colors and texture handles
//! that every other imkit crate speaks in.

mod color;
mod geometry;
mod image;

pub use color::*;
pub use geometry::*;
pub use image::*;

pub mod prelude {
    pub use crate::color::Color;
    pub use crate::geometry::{Rect, Vec2};
    pub use crate::image::{Handle, Image};
}
