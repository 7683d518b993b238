//! Memory and draw-command primitives for imkit
//!
//! Everything the toolkit records during a frame lives in an [`ArenaBuffer`];
//! long-lived entities (windows, panels, state tables) live in a
//! [`MemoryPool`]. Neither hands out pointers: callers keep byte offsets and
//! typed ids instead.

mod allocator;
mod buffer;
pub mod collections;
mod command;
mod command_buffer;
mod error;
mod font;
pub mod hash;
mod pool;
mod table;

pub use allocator::*;
pub use buffer::*;
pub use command::*;
pub use command_buffer::*;
pub use error::*;
pub use font::*;
pub use pool::*;
pub use table::*;

pub mod prelude {
    pub use crate::buffer::{ArenaBuffer, BufferSide};
    pub use crate::command::{Command, CommandKind};
    pub use crate::command_buffer::CommandBuffer;
    pub use crate::font::{Font, Glyph};
    pub use crate::pool::{MemoryPool, PoolId};
    pub use crate::table::StateTable;
}
