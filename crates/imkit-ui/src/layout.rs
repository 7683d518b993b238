//! Row layout operations on the current panel

use crate::context::Context;
use crate::window::WindowFlags;
use imkit_graphics::{Rect, Vec2};
use imkit_layout::{LayoutFormat, PanelLayout, RowStart};

impl Context {
    /// Runs `f` on the innermost panel layout of the current window.
    fn with_layout<R>(&mut self, f: impl FnOnce(&mut PanelLayout, Vec2) -> R) -> Option<R> {
        let spacing = self.style.window.spacing;
        let panel = self.current_panel_mut();
        debug_assert!(panel.is_some(), "layout call outside of begin/end");
        panel.map(|panel| f(&mut panel.layout, spacing))
    }

    /// Starts a row unless the panel is collapsed, painting its background
    /// in dynamic panels.
    fn start_row(&mut self, f: impl FnOnce(&mut PanelLayout, Vec2) -> RowStart) {
        let minimized = self
            .current_panel()
            .is_some_and(|panel| panel.flags.contains(WindowFlags::MINIMIZED));
        if minimized {
            return;
        }
        if let Some(row) = self.with_layout(f) {
            self.row_background(row);
        }
    }

    pub fn layout_set_min_row_height(&mut self, height: f32) {
        self.with_layout(|layout, _| layout.set_min_row_height(height));
    }

    pub fn layout_reset_min_row_height(&mut self) {
        let height = self.default_min_row_height();
        self.with_layout(|layout, _| layout.reset_min_row_height(height));
    }

    /// Row of `cols` equally wide widgets; a height of zero uses the
    /// minimum row height.
    pub fn layout_row_dynamic(&mut self, height: f32, cols: usize) {
        self.start_row(|layout, spacing| layout.row_dynamic(height, cols, spacing));
    }

    pub fn layout_row_static(&mut self, height: f32, item_width: f32, cols: usize) {
        self.start_row(|layout, spacing| layout.row_static(height, item_width, cols, spacing));
    }

    pub fn layout_row_begin(&mut self, format: LayoutFormat, height: f32, cols: usize) {
        self.start_row(|layout, spacing| layout.row_begin(format, height, cols, spacing));
    }

    pub fn layout_row_push(&mut self, value: f32) -> bool {
        self.with_layout(|layout, _| layout.row_push(value)).unwrap_or(false)
    }

    pub fn layout_row_end(&mut self) {
        self.with_layout(|layout, _| layout.row_end());
    }

    pub fn layout_row(&mut self, format: LayoutFormat, height: f32, ratios: &[f32]) {
        self.start_row(|layout, spacing| layout.row(format, height, ratios, spacing));
    }

    pub fn layout_row_template_begin(&mut self, height: f32) {
        self.start_row(|layout, spacing| layout.template_begin(height, spacing));
    }

    pub fn layout_row_template_push_dynamic(&mut self) -> bool {
        self.with_layout(|layout, _| layout.template_push_dynamic())
            .unwrap_or(false)
    }

    pub fn layout_row_template_push_variable(&mut self, min_width: f32) -> bool {
        self.with_layout(|layout, _| layout.template_push_variable(min_width))
            .unwrap_or(false)
    }

    pub fn layout_row_template_push_static(&mut self, width: f32) -> bool {
        self.with_layout(|layout, _| layout.template_push_static(width))
            .unwrap_or(false)
    }

    pub fn layout_row_template_end(&mut self) {
        self.with_layout(|layout, spacing| layout.template_end(spacing));
    }

    /// Free placement row holding up to `widget_count` widgets.
    pub fn layout_space_begin(&mut self, format: LayoutFormat, height: f32, widget_count: usize) {
        self.start_row(|layout, spacing| layout.space_begin(format, height, widget_count, spacing));
    }

    pub fn layout_space_push(&mut self, rect: Rect) {
        self.with_layout(|layout, _| layout.space_push(rect));
    }

    pub fn layout_space_end(&mut self) {
        self.with_layout(|layout, _| layout.space_end());
    }

    pub fn layout_space_bounds(&mut self) -> Rect {
        self.with_layout(|layout, _| layout.space_bounds())
            .unwrap_or(Rect::ZERO)
    }

    pub fn layout_space_to_screen(&mut self, local: Vec2) -> Vec2 {
        self.with_layout(|layout, _| layout.to_screen(local))
            .unwrap_or(local)
    }

    pub fn layout_space_to_local(&mut self, screen: Vec2) -> Vec2 {
        self.with_layout(|layout, _| layout.to_local(screen))
            .unwrap_or(screen)
    }

    pub fn layout_space_rect_to_screen(&mut self, local: Rect) -> Rect {
        self.with_layout(|layout, _| layout.rect_to_screen(local))
            .unwrap_or(local)
    }

    pub fn layout_space_rect_to_local(&mut self, screen: Rect) -> Rect {
        self.with_layout(|layout, _| layout.rect_to_local(screen))
            .unwrap_or(screen)
    }

    /// Remaining space of the current row.
    pub fn layout_widget_bounds(&mut self) -> Rect {
        self.with_layout(|layout, _| layout.widget_bounds())
            .unwrap_or(Rect::ZERO)
    }

    /// `pixel_width` as a fraction of the current window's width.
    pub fn layout_ratio_from_pixel(&self, pixel_width: f32) -> f32 {
        let width = self.window_get_bounds().w;
        if width <= 0.0 {
            return 0.0;
        }
        (pixel_width / width).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
#[path = "tests/layout_tests.rs"]
mod tests;
