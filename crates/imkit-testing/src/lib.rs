//! Testing utilities and harness for imkit

mod font;
mod harness;

pub use font::*;
pub use harness::*;

/// Routes `log` output through the test harness; safe to call from every test.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub mod prelude {
    pub use crate::font::MonoFont;
    pub use crate::harness::{FrameOutput, Harness};
    pub use crate::init_logging;
}
