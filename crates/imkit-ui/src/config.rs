//! Context construction options

use crate::style::Theme;

/// Where the context keeps its per-frame commands and long-lived entities.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MemoryConfig {
    /// Growable arena and paged entity pool, both gated by the context allocator.
    Dynamic {
        initial_size: usize,
        grow_factor: f32,
        /// Entities per pool page.
        page_capacity: usize,
    },
    /// One block of `size` bytes; commands fill it from the front while
    /// every entity slot is charged against its back.
    Fixed { size: usize },
    /// Separate fixed blocks for commands and for entities.
    Split { command_size: usize, pool_size: usize },
}

impl Default for MemoryConfig {
    fn default() -> Self {
        MemoryConfig::Dynamic {
            initial_size: 4 * 1024,
            grow_factor: 2.0,
            page_capacity: 8,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Config {
    pub memory: MemoryConfig,
    pub theme: Theme,
    /// Hint forwarded to vertex conversion.
    pub anti_aliasing: bool,
    /// Draw the style's cursor image into the overlay.
    pub cursor_visible: bool,
}

impl Config {
    pub fn fixed(size: usize) -> Self {
        Self {
            memory: MemoryConfig::Fixed { size },
            ..Self::default()
        }
    }

    pub fn split(command_size: usize, pool_size: usize) -> Self {
        Self {
            memory: MemoryConfig::Split {
                command_size,
                pool_size,
            },
            ..Self::default()
        }
    }
}
