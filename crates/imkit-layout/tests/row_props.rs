use imkit_graphics::{Rect, Vec2};
use imkit_layout::PanelLayout;
use proptest::prelude::*;

proptest! {
    #[test]
    fn dynamic_columns_are_evenly_spaced(
        width in 50.0f32..2000.0,
        columns in 1usize..12,
        gap in 0.0f32..12.0,
    ) {
        let spacing = Vec2::new(gap, gap);
        let mut layout = PanelLayout::new(Rect::new(0.0, 0.0, width, 400.0), 0.0, 16.0);
        layout.row_dynamic(24.0, columns, spacing);
        let w = (width - (columns as f32 - 1.0) * gap).max(1.0) / columns as f32;

        let mut previous_end = f32::MIN;
        for i in 0..columns {
            let bounds = layout.alloc_space(spacing).bounds;
            let expected_x = i as f32 * (w + gap);
            prop_assert!((bounds.x - expected_x).abs() < 0.01);
            prop_assert!((bounds.w - w).abs() <= 0.5 + 1e-3);
            prop_assert!(bounds.x + 0.5 + 1e-3 >= previous_end);
            previous_end = bounds.x + bounds.w;
        }
    }

    #[test]
    fn wrapping_advances_exactly_one_row(
        columns in 1usize..8,
        height in 1.0f32..80.0,
        extra in 1usize..8,
    ) {
        let spacing = Vec2::new(4.0, 3.0);
        let mut layout = PanelLayout::new(Rect::new(0.0, 0.0, 500.0, 500.0), 0.0, 16.0);
        layout.row_dynamic(height, columns, spacing);
        let first = layout.alloc_space(spacing).bounds;
        for _ in 1..columns {
            layout.alloc_space(spacing);
        }
        let mut y = first.y;
        for _ in 0..extra {
            let allocation = layout.alloc_space(spacing);
            if let Some(row) = allocation.new_row {
                prop_assert!((allocation.bounds.y - y - (height + spacing.y)).abs() < 1e-3);
                prop_assert!((row.height - (height + spacing.y)).abs() < 1e-3);
                y = allocation.bounds.y;
            }
        }
    }
}
