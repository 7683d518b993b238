//! Drives a small imkit interface through a few scripted frames and prints
//! what each frame records and how it tessellates.

use imkit_core::{Command, CommandKind};
use imkit_graphics::{Color, Rect, Vec2};
use imkit_render::prelude::*;
use imkit_testing::MonoFont;
use imkit_ui::prelude::*;
use std::rc::Rc;

const SWATCH: u32 = 1;
const FRUITS: [&str; 3] = ["Apple", "Pear", "Plum"];

/// Mouse position and left button state delivered at the start of a frame.
#[derive(Clone, Copy)]
struct Step {
    mouse: Vec2,
    down: bool,
}

const SCRIPT: [Step; 5] = [
    Step { mouse: Vec2::new(0.0, 0.0), down: false },
    Step { mouse: Vec2::new(40.0, 60.0), down: true },
    Step { mouse: Vec2::new(40.0, 60.0), down: false },
    Step { mouse: Vec2::new(160.0, 60.0), down: true },
    Step { mouse: Vec2::new(160.0, 60.0), down: false },
];

#[derive(Default)]
struct DemoState {
    clicks: u32,
    wrap: bool,
    fruit: usize,
    section: CollapseState,
    samples: Vec<f32>,
}

fn ui(ctx: &mut Context, state: &mut DemoState) {
    let flags = WindowFlags::TITLE | WindowFlags::BORDER | WindowFlags::MOVABLE | WindowFlags::CLOSABLE;
    if ctx.begin("Demo", Rect::new(10.0, 10.0, 300.0, 360.0), flags) {
        ctx.layout_row_dynamic(28.0, 2);
        if ctx.button_label("Click") {
            state.clicks += 1;
            log::info!("button clicked {} times", state.clicks);
        }
        ctx.checkbox_label("Wrap", &mut state.wrap);

        ctx.layout_row_dynamic(28.0, 1);
        if ctx.combo_begin_label(FRUITS[state.fruit], Vec2::new(200.0, 120.0)) {
            ctx.layout_row_dynamic(24.0, 1);
            for (index, fruit) in FRUITS.iter().enumerate() {
                if ctx.combo_item_label(fruit, TextAlign::LEFT) {
                    state.fruit = index;
                }
            }
            ctx.combo_end();
        }

        if ctx.tree_state_push(TreeType::Tab, "Samples", &mut state.section) {
            ctx.layout_row_dynamic(80.0, 1);
            if ctx.chart_begin(ChartType::Lines, state.samples.len(), 0.0, 1.0) {
                for &sample in &state.samples {
                    ctx.chart_push(sample);
                }
                ctx.chart_end();
            }
            ctx.tree_pop();
        }

        ctx.layout_row_dynamic(40.0, 1);
        ctx.custom(SWATCH, 0x3366cc);
    }
    ctx.end();
}

fn summarize(ctx: &mut Context) -> Vec<(CommandKind, usize)> {
    let mut counts: Vec<(CommandKind, usize)> = Vec::new();
    for command in ctx.commands() {
        if let Command::Text(_, text) = command {
            log::debug!("text {text:?}");
        }
        let kind = command.kind();
        match counts.iter_mut().find(|(k, _)| *k == kind) {
            Some((_, count)) => *count += 1,
            None => counts.push((kind, 1)),
        }
    }
    counts
}

fn main() {
    env_logger::init();

    println!("=== imkit headless demo ===");
    let mut ctx = Context::new(Config::fixed(256 * 1024), Rc::new(MonoFont));
    let mut state = DemoState {
        samples: (0..16).map(|i| (i as f32 * 0.4).sin() * 0.5 + 0.5).collect(),
        ..DemoState::default()
    };

    let mut custom = CustomDrawRegistry::new();
    custom.register(
        SWATCH,
        Box::new(|list: &mut DrawList, bounds: Rect, rgb: u64| {
            let color = Color::rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8);
            list.fill_rect(bounds, color, 4.0);
        }),
    );
    let mut list = DrawList::new(ConvertConfig::with_anti_aliasing(ctx.config().anti_aliasing));

    for (frame, step) in SCRIPT.iter().enumerate() {
        ctx.input_begin();
        ctx.input_motion(step.mouse.x, step.mouse.y);
        ctx.input_button(MouseButton::Left, step.mouse.x, step.mouse.y, step.down);
        ctx.input_end();

        ui(&mut ctx, &mut state);

        let counts = summarize(&mut ctx);
        let fonts = ctx.fonts().to_vec();
        let result = convert(ctx.commands(), fonts.as_slice(), &mut list, &mut custom);
        if !result.is_success() {
            log::error!("frame {frame} conversion failed: {result:?}");
        }
        let memory = ctx.memory_status();
        println!(
            "frame {frame}: {} draw calls, {} vertices, {} indices, {} of {} bytes used",
            list.commands().len(),
            list.vertices().len(),
            list.indices().len(),
            memory.allocated,
            memory.size,
        );
        for (kind, count) in counts {
            println!("    {kind:?}: {count}");
        }
        ctx.clear();
    }
    println!(
        "clicks: {}, wrap: {}, fruit: {}",
        state.clicks, state.wrap, FRUITS[state.fruit]
    );
}
