use super::*;
use crate::style::TextAlign;
use crate::test_support::{context, frame, texts};

const MAIN: Rect = Rect::new(0.0, 0.0, 240.0, 300.0);
const PLAIN: WindowFlags = WindowFlags::NO_SCROLLBAR;

fn rows(ctx: &mut Context, count: usize) {
    ctx.layout_row_dynamic(20.0, 1);
    for i in 0..count {
        ctx.label(&format!("row {i}"), TextAlign::LEFT);
    }
}

#[test]
fn group_content_is_recorded_into_window() {
    let mut ctx = context();
    frame(&mut ctx, |ctx| {
        ctx.begin("Main", MAIN, PLAIN);
        ctx.layout_row_dynamic(100.0, 1);
        assert!(ctx.group_begin("list", WindowFlags::BORDER));
        rows(ctx, 2);
        ctx.group_end();
        ctx.layout_row_dynamic(20.0, 1);
        ctx.label("below", TextAlign::LEFT);
        ctx.end();
    });
    assert_eq!(texts(&mut ctx), ["row 0", "row 1", "below"]);
}

#[test]
fn titled_group_draws_its_title() {
    let mut ctx = context();
    frame(&mut ctx, |ctx| {
        ctx.begin("Main", MAIN, PLAIN);
        ctx.layout_row_dynamic(100.0, 1);
        assert!(ctx.group_begin_titled("g1", "Settings", WindowFlags::TITLE | WindowFlags::BORDER));
        ctx.group_end();
        ctx.end();
    });
    assert_eq!(texts(&mut ctx), ["Settings"]);
}

#[test]
fn group_takes_one_widget_slot() {
    let mut ctx = context();
    frame(&mut ctx, |ctx| {
        ctx.begin("Main", MAIN, PLAIN);
        ctx.layout_row_dynamic(80.0, 2);
        let row = ctx.layout_widget_bounds();
        assert!(ctx.group_begin("left", WindowFlags::empty()));
        let region = ctx.window_get_content_region();
        assert!(region.x >= row.x && region.max_x() <= row.max_x() + 1.0);
        assert!(region.w < row.w);
        ctx.group_end();
        let (next, _) = ctx.widget();
        assert!(next.x >= row.x + row.w / 2.0);
        assert!(next.x >= region.max_x());
        ctx.end();
    });
}

#[test]
fn group_outside_clip_is_skipped() {
    let mut ctx = context();
    frame(&mut ctx, |ctx| {
        ctx.begin("Main", Rect::new(0.0, 0.0, 200.0, 80.0), PLAIN);
        ctx.layout_row_dynamic(200.0, 1);
        ctx.label("fill", TextAlign::LEFT);
        ctx.layout_row_dynamic(50.0, 1);
        assert!(!ctx.group_begin("hidden", WindowFlags::empty()));
        ctx.end();
    });
}

#[test]
fn set_scroll_is_visible_to_get_scroll() {
    let mut ctx = context();
    frame(&mut ctx, |ctx| {
        ctx.begin("Main", MAIN, PLAIN);
        assert_eq!(ctx.group_get_scroll("list"), Scroll::default());
        ctx.group_set_scroll("list", Scroll::new(3, 15));
        assert_eq!(ctx.group_get_scroll("list"), Scroll::new(3, 15));
        ctx.end();
    });
}

#[test]
fn overflowing_group_keeps_its_scroll_offset() {
    let mut ctx = context();
    let list = |ctx: &mut Context| {
        ctx.begin("Main", MAIN, PLAIN);
        ctx.layout_row_dynamic(100.0, 1);
        if ctx.group_begin("list", WindowFlags::empty()) {
            rows(ctx, 30);
            ctx.group_end();
        }
        ctx.end();
    };
    frame(&mut ctx, |ctx| {
        ctx.begin("Main", MAIN, PLAIN);
        ctx.group_set_scroll("list", Scroll::new(0, 40));
        ctx.end();
    });
    ctx.clear();
    frame(&mut ctx, list);
    ctx.clear();
    frame(&mut ctx, |ctx| {
        ctx.begin("Main", MAIN, PLAIN);
        assert_eq!(ctx.group_get_scroll("list"), Scroll::new(0, 40));
        ctx.end();
    });
}

#[test]
fn fitting_content_resets_caller_offset() {
    let mut ctx = context();
    let offset = frame(&mut ctx, |ctx| {
        ctx.begin("Main", MAIN, PLAIN);
        ctx.layout_row_dynamic(200.0, 1);
        assert!(ctx.group_scrolled_offset_begin(Scroll::new(0, 25), "free", WindowFlags::empty()));
        rows(ctx, 1);
        let offset = ctx.group_scrolled_end();
        ctx.end();
        offset
    });
    assert_eq!(offset, Scroll::default());
}

#[test]
fn nested_groups_unwind_to_the_window() {
    let mut ctx = context();
    frame(&mut ctx, |ctx| {
        ctx.begin("Main", MAIN, PLAIN);
        let outer = ctx.window_get_content_region();
        ctx.layout_row_dynamic(200.0, 1);
        assert!(ctx.group_begin("outer", WindowFlags::empty()));
        ctx.layout_row_dynamic(120.0, 1);
        assert!(ctx.group_begin("inner", WindowFlags::empty()));
        rows(ctx, 1);
        ctx.group_end();
        ctx.group_end();
        assert_eq!(ctx.window_get_content_region(), outer);
        ctx.end();
    });
    assert_eq!(texts(&mut ctx), ["row 0"]);
}
