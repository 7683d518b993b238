use crate::font::MonoFont;
use imkit_core::{Command, CommandKind};
use imkit_graphics::Vec2;
use imkit_ui::{Config, Context, MouseButton};
use std::rc::Rc;

enum Event {
    Motion(Vec2),
    Button(MouseButton, Vec2, bool),
    Scroll(Vec2),
}

/// What a frame left in the command list before it was cleared.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameOutput {
    pub kinds: Vec<CommandKind>,
    pub texts: Vec<String>,
}

impl FrameOutput {
    pub fn count(&self, kind: CommandKind) -> usize {
        self.kinds.iter().filter(|k| **k == kind).count()
    }
}

/// Drives a [`Context`] frame by frame with scripted input.
///
/// Input queued with [`move_mouse`](Self::move_mouse), [`press`](Self::press)
/// and friends is delivered at the start of the next frame.
pub struct Harness {
    ctx: Context,
    pending: Vec<Event>,
    frames: usize,
}

impl Default for Harness {
    fn default() -> Self {
        Self::new()
    }
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        Self {
            ctx: Context::new(config, Rc::new(MonoFont)),
            pending: Vec::new(),
            frames: 0,
        }
    }

    pub fn context(&mut self) -> &mut Context {
        &mut self.ctx
    }

    /// Frames completed so far.
    pub fn frames(&self) -> usize {
        self.frames
    }

    pub fn move_mouse(&mut self, at: Vec2) -> &mut Self {
        self.pending.push(Event::Motion(at));
        self
    }

    pub fn press(&mut self, button: MouseButton, at: Vec2) -> &mut Self {
        self.pending.push(Event::Motion(at));
        self.pending.push(Event::Button(button, at, true));
        self
    }

    pub fn release(&mut self, button: MouseButton, at: Vec2) -> &mut Self {
        self.pending.push(Event::Motion(at));
        self.pending.push(Event::Button(button, at, false));
        self
    }

    /// Press and release within one frame.
    pub fn click(&mut self, button: MouseButton, at: Vec2) -> &mut Self {
        self.press(button, at);
        self.pending.push(Event::Button(button, at, false));
        self
    }

    pub fn scroll(&mut self, delta: Vec2) -> &mut Self {
        self.pending.push(Event::Scroll(delta));
        self
    }

    /// Delivers queued input and runs `ui`, leaving the command list intact
    /// until [`finish`](Self::finish).
    pub fn run<R>(&mut self, ui: impl FnOnce(&mut Context) -> R) -> R {
        self.ctx.input_begin();
        for event in self.pending.drain(..) {
            match event {
                Event::Motion(at) => self.ctx.input_motion(at.x, at.y),
                Event::Button(button, at, down) => self.ctx.input_button(button, at.x, at.y, down),
                Event::Scroll(delta) => self.ctx.input_scroll(delta),
            }
        }
        self.ctx.input_end();
        ui(&mut self.ctx)
    }

    /// Collects the frame's output and clears the context.
    pub fn finish(&mut self) -> FrameOutput {
        let mut output = FrameOutput::default();
        for command in self.ctx.commands() {
            output.kinds.push(command.kind());
            if let Command::Text(_, text) = command {
                output.texts.push(text.to_owned());
            }
        }
        self.ctx.clear();
        self.frames += 1;
        log::trace!("harness frame {} produced {} commands", self.frames, output.kinds.len());
        output
    }

    /// One complete frame: input, `ui`, output capture and clear.
    pub fn frame<R>(&mut self, ui: impl FnOnce(&mut Context) -> R) -> (R, FrameOutput) {
        let value = self.run(ui);
        (value, self.finish())
    }
}
