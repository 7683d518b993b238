//! Shared fixtures for the crate's unit tests.

use crate::config::Config;
use crate::context::Context;
use crate::input::MouseButton;
use imkit_core::{Command, Font, Glyph};
use imkit_graphics::{Rect, Vec2};
use std::rc::Rc;

pub(crate) const GLYPH_WIDTH: f32 = 8.0;
pub(crate) const LINE_HEIGHT: f32 = 14.0;

/// Every glyph is 8 pixels wide and lines are 14 pixels tall.
pub(crate) struct FixedFont;

impl Font for FixedFont {
    fn height(&self) -> f32 {
        LINE_HEIGHT
    }

    fn text_width(&self, text: &str) -> f32 {
        text.chars().count() as f32 * GLYPH_WIDTH
    }

    fn query_glyph(&self, _codepoint: char, _next: Option<char>) -> Glyph {
        Glyph {
            width: GLYPH_WIDTH,
            height: LINE_HEIGHT,
            xadvance: GLYPH_WIDTH,
            ..Glyph::default()
        }
    }
}

pub(crate) fn context() -> Context {
    let _ = env_logger::builder().is_test(true).try_init();
    Context::new(Config::default(), Rc::new(FixedFont))
}

/// Runs one frame without input events; the caller clears.
pub(crate) fn frame<R>(ctx: &mut Context, ui: impl FnOnce(&mut Context) -> R) -> R {
    ctx.input_begin();
    ctx.input_end();
    ui(ctx)
}

/// Runs one frame in which the mouse moves to `at` and `button` goes down.
pub(crate) fn press_frame<R>(
    ctx: &mut Context,
    button: MouseButton,
    at: Vec2,
    ui: impl FnOnce(&mut Context) -> R,
) -> R {
    ctx.input_begin();
    ctx.input_motion(at.x, at.y);
    ctx.input_button(button, at.x, at.y, true);
    ctx.input_end();
    ui(ctx)
}

/// Runs one frame in which `button` is pressed and released at `at`.
pub(crate) fn click_frame<R>(
    ctx: &mut Context,
    button: MouseButton,
    at: Vec2,
    ui: impl FnOnce(&mut Context) -> R,
) -> R {
    ctx.input_begin();
    ctx.input_motion(at.x, at.y);
    ctx.input_button(button, at.x, at.y, true);
    ctx.input_button(button, at.x, at.y, false);
    ctx.input_end();
    ui(ctx)
}

/// Text of every text command in draw order.
pub(crate) fn texts(ctx: &mut Context) -> Vec<String> {
    ctx.commands()
        .filter_map(|command| match command {
            Command::Text(_, text) => Some(text.to_owned()),
            _ => None,
        })
        .collect()
}
