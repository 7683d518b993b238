use imkit_graphics::{Color, Rect, Vec2};
use imkit_render::prelude::*;
use imkit_testing::prelude::*;
use imkit_ui::prelude::*;
use std::cell::Cell;
use std::rc::Rc;

const SWATCH: u32 = 1;

fn ui(ctx: &mut Context) {
    let flags = WindowFlags::TITLE | WindowFlags::BORDER | WindowFlags::NO_SCROLLBAR;
    if ctx.begin("Demo", Rect::new(10.0, 10.0, 220.0, 200.0), flags) {
        ctx.layout_row_dynamic(24.0, 2);
        ctx.label("Name", TextAlign::LEFT);
        ctx.button_label("Apply");
        ctx.layout_row_dynamic(40.0, 1);
        ctx.custom(SWATCH, 0xff00ff);
    }
    ctx.end();
}

fn convert_frame(harness: &mut Harness, custom: &mut CustomDrawRegistry) -> (DrawList, ConvertResult) {
    harness.run(ui);
    let ctx = harness.context();
    let mut list = DrawList::new(ConvertConfig::with_anti_aliasing(ctx.config().anti_aliasing));
    let fonts: Vec<_> = ctx.fonts().to_vec();
    let result = convert(ctx.commands(), fonts.as_slice(), &mut list, custom);
    harness.finish();
    (list, result)
}

#[test]
fn a_window_frame_converts_into_valid_buffers() {
    init_logging();
    let mut harness = Harness::new();
    let (list, result) = convert_frame(&mut harness, &mut CustomDrawRegistry::new());
    assert!(result.is_success());
    assert!(!list.vertices().is_empty());

    let elements: u32 = list.draw_calls().map(|cmd| cmd.elem_count).sum();
    assert_eq!(elements as usize, list.indices().len());
    let vertex_count = list.vertices().len() as u32;
    assert!(list.indices().iter().all(|&i| u32::from(i) < vertex_count));
    assert!(list.draw_calls().any(|cmd| cmd.texture == MonoFont::TEXTURE));
}

#[test]
fn window_content_is_clipped_to_the_window() {
    init_logging();
    let mut harness = Harness::new();
    let (list, _) = convert_frame(&mut harness, &mut CustomDrawRegistry::new());
    let window = Rect::new(10.0, 10.0, 220.0, 200.0);
    let inside = |clip: Rect| {
        clip.x >= window.x && clip.y >= window.y && clip.max_x() <= window.max_x() && clip.max_y() <= window.max_y()
    };
    assert!(list.draw_calls().any(|cmd| cmd.elem_count > 0 && inside(cmd.clip_rect)));
}

#[test]
fn custom_widgets_reach_their_callback() {
    init_logging();
    let mut harness = Harness::new();
    let calls = Rc::new(Cell::new(0));
    let counter = Rc::clone(&calls);
    let mut custom = CustomDrawRegistry::new();
    custom.register(
        SWATCH,
        Box::new(move |list: &mut DrawList, bounds: Rect, data: u64| {
            counter.set(counter.get() + 1);
            assert_eq!(data, 0xff00ff);
            assert!(bounds.w > 0.0 && bounds.h > 0.0);
            list.fill_rect(bounds, Color::rgb(255, 0, 255), 0.0);
        }),
    );
    let (plain, _) = convert_frame(&mut harness, &mut CustomDrawRegistry::new());
    let (with_swatch, result) = convert_frame(&mut harness, &mut custom);
    assert!(result.is_success());
    assert_eq!(calls.get(), 1);
    assert!(with_swatch.vertices().len() > plain.vertices().len());
}

#[test]
fn anti_aliasing_follows_the_context_config() {
    init_logging();
    let config = Config {
        anti_aliasing: true,
        ..Config::default()
    };
    let mut smooth = Harness::with_config(config);
    let mut sharp = Harness::new();
    let (smooth, _) = convert_frame(&mut smooth, &mut CustomDrawRegistry::new());
    let (sharp, _) = convert_frame(&mut sharp, &mut CustomDrawRegistry::new());
    assert_eq!(smooth.config().shape_aa, AntiAliasing::On);
    assert_eq!(sharp.config().shape_aa, AntiAliasing::Off);
    assert!(smooth.vertices().len() > sharp.vertices().len());
}

#[test]
fn hovered_button_changes_only_colors() {
    init_logging();
    let mut harness = Harness::new();
    let (idle, _) = convert_frame(&mut harness, &mut CustomDrawRegistry::new());
    harness.move_mouse(Vec2::new(200.0, 50.0));
    let (hovered, _) = convert_frame(&mut harness, &mut CustomDrawRegistry::new());
    assert_eq!(idle.vertices().len(), hovered.vertices().len());
    assert_eq!(idle.indices().len(), hovered.indices().len());
}
