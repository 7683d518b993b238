use super::*;

const SPACING: Vec2 = Vec2 { x: 4.0, y: 4.0 };

fn panel(width: f32) -> PanelLayout {
    PanelLayout::new(Rect::new(0.0, 0.0, width, 500.0), 0.0, 20.0)
}

fn assert_close(actual: f32, expected: f32) {
    assert!(
        (actual - expected).abs() < 0.01,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn dynamic_row_splits_width_with_remainders() {
    let mut layout = panel(300.0);
    layout.row_dynamic(30.0, 3, SPACING);

    let rects: Vec<Rect> = (0..3).map(|_| layout.alloc_space(SPACING).bounds).collect();
    let w = (300.0 - 2.0 * 4.0) / 3.0;
    assert_close(w, 97.33);

    assert_close(rects[0].x, 0.0);
    assert_close(rects[1].x, 101.33);
    assert_close(rects[2].x, 202.67);
    for (i, rect) in rects.iter().enumerate() {
        let offset = i as f32 * w;
        assert_close(rect.w, w + (offset - offset.round()));
        assert_close(rect.h, 30.0);
    }
}

#[test]
fn dynamic_offsets_follow_formula_for_several_panels() {
    for &(width, columns, gap) in &[(250.0f32, 4usize, 5.0f32), (640.0, 7, 2.0), (99.0, 2, 0.0)] {
        let spacing = Vec2::new(gap, gap);
        let mut layout = panel(width);
        layout.row_dynamic(20.0, columns, spacing);
        let w = (width - (columns as f32 - 1.0) * gap) / columns as f32;
        for i in 0..columns {
            let rect = layout.alloc_space(spacing).bounds;
            assert_close(rect.x, i as f32 * (w + gap));
        }
    }
}

#[test]
fn overflowing_columns_start_a_new_row() {
    let mut layout = panel(300.0);
    let first = layout.row_dynamic(30.0, 3, SPACING);
    let row_height = 30.0 + SPACING.y;
    assert_eq!(first.height, row_height);

    let top: Vec<Rect> = (0..3).map(|_| layout.alloc_space(SPACING).bounds).collect();
    let wrapped = layout.alloc_space(SPACING);

    let next = wrapped.new_row.expect("fourth widget starts a row");
    assert_close(next.y - first.y, row_height);
    assert_eq!(layout.row.index, 1);
    assert_close(wrapped.bounds.x, 0.0);
    assert_close(wrapped.bounds.y, top[0].y + row_height);
    assert!(top.iter().all(|r| r.y + r.h <= wrapped.bounds.y));
}

#[test]
fn zero_height_rows_use_minimum() {
    let mut layout = panel(100.0);
    layout.set_min_row_height(25.0);
    let start = layout.row_dynamic(0.0, 1, SPACING);
    assert_eq!(start.height, 29.0);
    layout.reset_min_row_height(10.0);
    assert_eq!(layout.row.min_height, 10.0);
}

#[test]
fn static_row_uses_item_width() {
    let mut layout = panel(300.0);
    layout.row_static(20.0, 50.0, 2, SPACING);
    let a = layout.alloc_space(SPACING).bounds;
    let b = layout.alloc_space(SPACING).bounds;
    assert_eq!((a.x, a.w), (0.0, 50.0));
    assert_eq!((b.x, b.w), (54.0, 50.0));
    assert_eq!(layout.max_x, 104.0);
}

#[test]
fn pushed_ratios_cannot_exceed_the_row() {
    let mut layout = panel(200.0);
    layout.row_begin(LayoutFormat::Dynamic, 20.0, 3, SPACING);
    assert!(layout.row_push(0.5));
    let a = layout.alloc_space(SPACING).bounds;
    assert!(layout.row_push(0.25));
    let b = layout.alloc_space(SPACING).bounds;
    assert!(!layout.row_push(0.5));
    layout.row_end();

    let space = layout.usable_space(3, SPACING);
    assert_close(a.w, 0.5 * space);
    assert_close(b.x, 0.5 * space + SPACING.x);
    assert_close(layout.row.filled, 0.75);
}

#[test]
fn row_push_requires_row_begin() {
    let mut layout = panel(200.0);
    layout.row_dynamic(20.0, 2, SPACING);
    assert!(!layout.row_push(0.5));
}

#[test]
fn negative_ratios_share_the_remainder() {
    let mut layout = panel(208.0);
    layout.row(LayoutFormat::Dynamic, 20.0, &[0.5, -1.0, -1.0], SPACING);
    assert_close(layout.row.item_width, 0.25);

    let space = layout.usable_space(3, SPACING);
    let widths: Vec<f32> = (0..3).map(|_| layout.alloc_space(SPACING).bounds.w).collect();
    assert_close(widths[0], 0.5 * space);
    assert!((widths[1] - 0.25 * space).abs() < 1.0);
    assert!((widths[2] - 0.25 * space).abs() < 1.0);
}

#[test]
fn static_ratio_array_is_in_pixels() {
    let mut layout = panel(300.0);
    layout.row(LayoutFormat::Static, 20.0, &[40.0, 60.0], SPACING);
    let a = layout.alloc_space(SPACING).bounds;
    let b = layout.alloc_space(SPACING).bounds;
    assert_eq!((a.x, a.w), (0.0, 40.0));
    assert_eq!((b.x, b.w), (44.0, 60.0));
}

#[test]
fn template_gives_variable_columns_their_share() {
    let spacing = Vec2::ZERO;
    let mut layout = panel(400.0);
    layout.template_begin(20.0, spacing);
    layout.template_push_static(100.0);
    layout.template_push_dynamic();
    layout.template_push_variable(50.0);
    layout.template_end(spacing);

    assert_eq!(layout.row.template_width(0), Some(100.0));
    assert_eq!(layout.row.template_width(1), Some(150.0));
    assert_eq!(layout.row.template_width(2), Some(150.0));
    assert_eq!(layout.row.template_width(3), None);
}

#[test]
fn template_keeps_variable_minimum_when_tight() {
    let spacing = Vec2::ZERO;
    let mut layout = panel(200.0);
    layout.template_begin(20.0, spacing);
    layout.template_push_variable(150.0);
    layout.template_push_dynamic();
    layout.template_push_static(50.0);
    layout.template_end(spacing);

    assert_eq!(layout.row.template_width(0), Some(150.0));
    assert_eq!(layout.row.template_width(1), Some(0.0));
    assert_eq!(layout.row.template_width(2), Some(50.0));
}

#[test]
fn template_with_only_variable_columns_does_not_divide_by_zero() {
    let spacing = Vec2::ZERO;
    let mut layout = panel(100.0);
    layout.template_begin(20.0, spacing);
    layout.template_push_variable(80.0);
    layout.template_push_variable(80.0);
    layout.template_end(spacing);

    let widths: Vec<f32> = (0..2).filter_map(|i| layout.row.template_width(i)).collect();
    assert_eq!(widths, vec![80.0, 80.0]);
}

#[test]
fn static_free_space_places_by_pixels() {
    let mut layout = PanelLayout::new(Rect::new(10.0, 20.0, 300.0, 300.0), 0.0, 20.0);
    layout.space_begin(LayoutFormat::Static, 100.0, 2, SPACING);
    layout.space_push(Rect::new(5.0, 6.0, 40.0, 30.0));
    let bounds = layout.alloc_space(SPACING).bounds;
    assert_eq!(bounds, Rect::new(15.0, 26.0, 40.0, 30.0));
    assert_eq!(layout.max_x, 55.0);
    layout.space_end();
    assert_eq!(layout.row.item, Rect::ZERO);
}

#[test]
fn dynamic_free_space_scales_by_row() {
    let mut layout = panel(200.0);
    layout.space_begin(LayoutFormat::Dynamic, 96.0, 1, SPACING);
    layout.space_push(Rect::new(0.5, 0.0, 0.25, 0.5));
    let bounds = layout.alloc_space(SPACING).bounds;
    assert_close(bounds.x, 100.0);
    assert_close(bounds.w, 50.0);
    assert_close(bounds.h, 50.0);
}

#[test]
fn screen_and_local_conversions_are_inverse() {
    let mut layout = PanelLayout::new(Rect::new(30.0, 40.0, 200.0, 200.0), 0.0, 20.0);
    layout.offset = Scroll::new(5, 7);
    let local = Vec2::new(12.0, 3.0);
    let screen = layout.to_screen(local);
    assert_eq!(screen, Vec2::new(37.0, 36.0));
    assert_eq!(layout.to_local(screen), local);

    let rect = Rect::new(1.0, 2.0, 3.0, 4.0);
    assert_eq!(layout.rect_to_local(layout.rect_to_screen(rect)), rect);
}

#[test]
fn scroll_offset_shifts_widgets() {
    let mut layout = panel(100.0);
    layout.offset = Scroll::new(10, 20);
    layout.row_dynamic(20.0, 1, SPACING);
    let bounds = layout.alloc_space(SPACING).bounds;
    assert_close(bounds.x, -10.0);
    assert_close(bounds.y, -20.0);
    assert_close(layout.max_x, 100.0);
}

#[test]
fn spacing_skips_across_rows() {
    let mut layout = panel(300.0);
    layout.row_dynamic(20.0, 3, SPACING);
    layout.alloc_space(SPACING);
    let mut rows = 0;
    layout.spacing(4, SPACING, |_| rows += 1);
    assert_eq!(rows, 1);
    assert_eq!(layout.row.index, 2);

    let bounds = layout.alloc_space(SPACING).bounds;
    assert_close(bounds.x, 202.67);
}

#[test]
fn peek_does_not_consume() {
    let mut layout = panel(300.0);
    layout.row_dynamic(20.0, 2, SPACING);
    let peeked = layout.peek(SPACING);
    let allocated = layout.alloc_space(SPACING).bounds;
    assert_eq!(peeked, allocated);
}

#[test]
fn widget_bounds_cover_remaining_row() {
    let mut layout = PanelLayout::new(Rect::new(10.0, 0.0, 200.0, 100.0), 0.0, 20.0);
    layout.row_dynamic(20.0, 1, SPACING);
    layout.at_x += 30.0;
    let bounds = layout.widget_bounds();
    assert_eq!(bounds.x, 40.0);
    assert_eq!(bounds.w, 170.0);
    assert_eq!(bounds.h, 24.0);
}
