use crate::test_support::{context, frame};
use crate::window::WindowFlags;
use imkit_graphics::{Rect, Vec2};
use imkit_layout::LayoutFormat;
use proptest::prelude::*;

const PLAIN: WindowFlags = WindowFlags::NO_SCROLLBAR;

fn in_window<R>(ui: impl FnOnce(&mut crate::Context) -> R) -> R {
    let mut ctx = context();
    frame(&mut ctx, |ctx| {
        ctx.begin("Layout", Rect::new(0.0, 0.0, 240.0, 400.0), PLAIN);
        let result = ui(ctx);
        ctx.end();
        result
    })
}

#[test]
fn dynamic_row_splits_width_evenly() {
    let (first, second, spacing) = in_window(|ctx| {
        ctx.layout_row_dynamic(20.0, 2);
        let (first, _) = ctx.widget();
        let (second, _) = ctx.widget();
        (first, second, ctx.style().window.spacing.x)
    });
    assert!((first.w - second.w).abs() <= 1.0);
    assert_eq!(first.y, second.y);
    assert!((second.x - (first.max_x() + spacing)).abs() <= 1.0);
}

#[test]
fn dynamic_row_wraps_after_its_columns() {
    let (first, third) = in_window(|ctx| {
        ctx.layout_row_dynamic(20.0, 2);
        let (first, _) = ctx.widget();
        ctx.widget();
        let (third, _) = ctx.widget();
        (first, third)
    });
    assert_eq!(first.x, third.x);
    assert!(third.y > first.y);
}

#[test]
fn static_row_uses_item_width() {
    let bounds = in_window(|ctx| {
        ctx.layout_row_static(20.0, 64.0, 3);
        ctx.widget().0
    });
    assert_eq!(bounds.w, 64.0);
}

#[test]
fn zero_height_row_uses_min_row_height() {
    let (tall, reset) = in_window(|ctx| {
        ctx.layout_set_min_row_height(40.0);
        ctx.layout_row_dynamic(0.0, 1);
        let tall = ctx.widget().0;
        ctx.layout_reset_min_row_height();
        ctx.layout_row_dynamic(0.0, 1);
        (tall, ctx.widget().0)
    });
    assert_eq!(tall.h, 40.0);
    assert!(reset.h < tall.h);
}

#[test]
fn pushed_row_ratios_share_the_width() {
    let (left, right) = in_window(|ctx| {
        ctx.layout_row_begin(LayoutFormat::Dynamic, 20.0, 2);
        assert!(ctx.layout_row_push(0.25));
        let left = ctx.widget().0;
        assert!(ctx.layout_row_push(0.75));
        let right = ctx.widget().0;
        ctx.layout_row_end();
        (left, right)
    });
    assert!(right.w > 2.5 * left.w);
}

#[test]
fn template_static_column_keeps_its_width() {
    let (fixed, dynamic) = in_window(|ctx| {
        ctx.layout_row_template_begin(20.0);
        assert!(ctx.layout_row_template_push_static(50.0));
        assert!(ctx.layout_row_template_push_dynamic());
        ctx.layout_row_template_end();
        (ctx.widget().0, ctx.widget().0)
    });
    assert_eq!(fixed.w, 50.0);
    assert!(dynamic.w > fixed.w);
}

#[test]
fn space_coordinates_round_trip() {
    let (local, back) = in_window(|ctx| {
        ctx.layout_space_begin(LayoutFormat::Static, 100.0, 1);
        let local = Vec2::new(12.0, 7.0);
        let screen = ctx.layout_space_to_screen(local);
        let back = ctx.layout_space_to_local(screen);
        let rect = Rect::new(3.0, 4.0, 20.0, 10.0);
        let on_screen = ctx.layout_space_rect_to_screen(rect);
        assert_eq!(ctx.layout_space_rect_to_local(on_screen), rect);
        ctx.layout_space_end();
        (local, back)
    });
    assert_eq!(local, back);
}

#[test]
fn space_push_places_widget_relative_to_row() {
    let (space, placed) = in_window(|ctx| {
        ctx.layout_space_begin(LayoutFormat::Static, 100.0, 1);
        let space = ctx.layout_space_bounds();
        ctx.layout_space_push(Rect::new(10.0, 20.0, 30.0, 15.0));
        let placed = ctx.widget().0;
        ctx.layout_space_end();
        (space, placed)
    });
    assert_eq!(placed.w, 30.0);
    assert_eq!(placed.h, 15.0);
    assert!(space.h >= 100.0);
}

#[test]
fn ratio_from_pixel_is_relative_to_window_width() {
    let (quarter, clamped) = in_window(|ctx| (ctx.layout_ratio_from_pixel(60.0), ctx.layout_ratio_from_pixel(1000.0)));
    assert_eq!(quarter, 0.25);
    assert_eq!(clamped, 1.0);
}

#[test]
fn spacing_skips_columns() {
    let (first, after) = in_window(|ctx| {
        ctx.layout_row_dynamic(20.0, 3);
        let first = ctx.widget().0;
        ctx.spacing(1);
        (first, ctx.widget().0)
    });
    assert!(after.x > first.max_x() + first.w);
}

proptest! {
    #[test]
    fn dynamic_row_widgets_stay_ordered_inside_the_window(columns in 1usize..6, width in 160.0f32..480.0) {
        let mut ctx = context();
        let rects = frame(&mut ctx, |ctx| {
            ctx.begin("Row", Rect::new(0.0, 0.0, width, 200.0), PLAIN);
            ctx.layout_row_dynamic(20.0, columns);
            let rects: Vec<Rect> = (0..columns).map(|_| ctx.widget().0).collect();
            ctx.end();
            rects
        });
        for rect in &rects {
            prop_assert!(rect.w > 0.0);
            prop_assert!(rect.x >= 0.0 && rect.max_x() <= width + 1.0);
            prop_assert_eq!(rect.y, rects[0].y);
        }
        for pair in rects.windows(2) {
            prop_assert!(pair[1].x >= pair[0].max_x() - 1.0);
            prop_assert!((pair[1].w - pair[0].w).abs() <= 1.0);
        }
    }
}
