//! Line and column charts
//!
//! A chart occupies one widget slot. Values are pushed one at a time between
//! [`Context::chart_begin`] and [`Context::chart_end`]; each push draws its
//! data point immediately and reports whether the mouse interacts with it.

use crate::context::Context;
use crate::input::{Input, MouseButton};
use crate::style::StyleItem;
use crate::widgets::Canvas;
use crate::window::WindowFlags;
use bitflags::bitflags;
use imkit_graphics::{Color, Rect, Vec2};

pub const CHART_MAX_SLOT: usize = 4;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ChartType {
    #[default]
    Lines,
    Column,
}

bitflags! {
    /// Mouse interaction with a pushed data point.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ChartEvent: u32 {
        const HOVERING = 1 << 0;
        const CLICKED = 1 << 1;
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct ChartSlot {
    kind: ChartType,
    color: Color,
    highlight: Color,
    min: f32,
    max: f32,
    range: f32,
    count: usize,
    last: Vec2,
    index: usize,
    show_markers: bool,
}

impl ChartSlot {
    fn new(kind: ChartType, count: usize, min: f32, max: f32, color: Color, highlight: Color, show_markers: bool) -> Self {
        let (min, max) = (min.min(max), min.max(max));
        Self {
            kind,
            color,
            highlight,
            min,
            max,
            range: max - min,
            count,
            last: Vec2::ZERO,
            index: 0,
            show_markers,
        }
    }

    /// Position of `value` between the slot's bounds; a flat range maps to the bottom.
    fn ratio(&self, value: f32) -> f32 {
        if self.range == 0.0 {
            0.0
        } else {
            (value - self.min) / self.range
        }
    }
}

/// Chart state of a panel; lives only between begin and end.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Chart {
    slot: usize,
    bounds: Rect,
    slots: [ChartSlot; CHART_MAX_SLOT],
}

impl Chart {
    pub fn slot_count(&self) -> usize {
        self.slot
    }

    /// Plot area inside the chart padding.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    fn push_line(&mut self, canvas: &mut Canvas<'_>, input: Option<&Input>, value: f32, slot: usize) -> ChartEvent {
        let g = self.bounds;
        let s = &mut self.slots[slot];
        let ratio = s.ratio(value);
        let mut event = ChartEvent::empty();
        let left = input.map(|i| *i.mouse.button(MouseButton::Left));

        if s.index == 0 {
            s.last = Vec2::new(g.x, g.max_y() - ratio * g.h);
            let marker = Rect::new(s.last.x - 2.0, s.last.y - 2.0, 4.0, 4.0);
            let mut color = s.color;
            let near = Rect::new(s.last.x - 3.0, s.last.y - 3.0, 6.0, 6.0);
            if let (Some(input), Some(left)) = (input, left) {
                if near.contains(input.mouse.pos) {
                    if input.is_mouse_hovering_rect(marker) {
                        event |= ChartEvent::HOVERING;
                    }
                    if left.down && left.clicked > 0 {
                        event |= ChartEvent::CLICKED;
                    }
                    color = s.highlight;
                }
            }
            if s.show_markers {
                canvas.fill_rect(marker, 0.0, color);
            }
            s.index += 1;
            return event;
        }

        let step = g.w / s.count.max(1) as f32;
        let cur = Vec2::new(g.x + step * s.index as f32, g.max_y() - ratio * g.h);
        canvas.buffer.stroke_line(canvas.arena, s.last, cur, 1.0, s.color);

        let mut color = s.color;
        let hit = Rect::new(cur.x - 3.0, cur.y - 3.0, 6.0, 6.0);
        if let (Some(input), Some(left)) = (input, left) {
            if input.is_mouse_hovering_rect(hit) {
                event = ChartEvent::HOVERING;
                if !left.down && left.clicked > 0 {
                    event |= ChartEvent::CLICKED;
                }
                color = s.highlight;
            }
        }
        if s.show_markers {
            canvas.fill_rect(Rect::new(cur.x - 2.0, cur.y - 2.0, 4.0, 4.0), 0.0, color);
        }
        s.last = cur;
        s.index += 1;
        event
    }

    fn push_column(&mut self, canvas: &mut Canvas<'_>, input: Option<&Input>, value: f32, slot: usize) -> ChartEvent {
        let g = self.bounds;
        let s = &mut self.slots[slot];
        if s.index >= s.count {
            return ChartEvent::empty();
        }
        let mut item = Rect::ZERO;
        item.w = (g.w - (s.count - 1) as f32) / s.count as f32;
        if s.range != 0.0 {
            item.h = g.h * (value / s.range).abs();
            if value >= 0.0 {
                let ratio = (value + s.min.abs()) / s.range.abs();
                item.y = g.max_y() - g.h * ratio;
            } else {
                let ratio = (value - s.max) / s.range;
                item.y = g.y + g.h * ratio.abs() - item.h;
            }
        } else {
            item.y = g.max_y();
        }
        item.x = g.x + s.index as f32 * item.w + s.index as f32;

        let mut event = ChartEvent::empty();
        let mut color = s.color;
        if let Some(input) = input {
            if item.contains(input.mouse.pos) {
                let left = input.mouse.button(MouseButton::Left);
                event = ChartEvent::HOVERING;
                if !left.down && left.clicked > 0 {
                    event |= ChartEvent::CLICKED;
                }
                color = s.highlight;
            }
        }
        canvas.fill_rect(item, 0.0, color);
        s.index += 1;
        event
    }
}

impl Context {
    /// Starts a chart over the next widget slot with the style's colors.
    pub fn chart_begin(&mut self, kind: ChartType, count: usize, min: f32, max: f32) -> bool {
        let style = self.style.chart;
        self.chart_begin_colored(kind, style.color, style.selected_color, count, min, max)
    }

    pub fn chart_begin_colored(
        &mut self,
        kind: ChartType,
        color: Color,
        highlight: Color,
        count: usize,
        min: f32,
        max: f32,
    ) -> bool {
        let (bounds, state) = self.widget();
        let style = self.style.chart;
        let Some(panel) = self.current_panel_mut() else {
            return false;
        };
        panel.chart = Chart::default();
        if !state.is_visible() {
            return false;
        }

        let mut area = Rect::new(
            bounds.x + style.padding.x,
            bounds.y + style.padding.y,
            bounds.w - 2.0 * style.padding.x,
            bounds.h - 2.0 * style.padding.y,
        );
        area.w = area.w.max(2.0 * style.padding.x);
        area.h = area.h.max(2.0 * style.padding.y);
        panel.chart.bounds = area;
        panel.chart.slots[0] = ChartSlot::new(kind, count, min, max, color, highlight, style.show_markers);
        panel.chart.slot = 1;

        self.with_canvas(|canvas, _| match style.background {
            StyleItem::Image(image) => canvas.buffer.draw_image(canvas.arena, bounds, &image, Color::WHITE),
            StyleItem::Color(background) => {
                canvas.fill_rect(bounds, style.rounding, style.border_color);
                canvas.fill_rect(bounds.shrink(style.border), style.rounding, background);
            }
        });
        true
    }

    /// Adds another data series to the open chart.
    pub fn chart_add_slot(&mut self, kind: ChartType, count: usize, min: f32, max: f32) {
        let style = self.style.chart;
        self.chart_add_slot_colored(kind, style.color, style.selected_color, count, min, max);
    }

    pub fn chart_add_slot_colored(
        &mut self,
        kind: ChartType,
        color: Color,
        highlight: Color,
        count: usize,
        min: f32,
        max: f32,
    ) {
        let show_markers = self.style.chart.show_markers;
        let Some(panel) = self.current_panel_mut() else {
            return;
        };
        let chart = &mut panel.chart;
        if chart.slot >= CHART_MAX_SLOT {
            log::warn!("chart already holds {CHART_MAX_SLOT} series");
            return;
        }
        chart.slots[chart.slot] = ChartSlot::new(kind, count, min, max, color, highlight, show_markers);
        chart.slot += 1;
    }

    pub fn chart_push(&mut self, value: f32) -> ChartEvent {
        self.chart_push_slot(value, 0)
    }

    /// Pushes `value` into series `slot` and draws it.
    pub fn chart_push_slot(&mut self, value: f32, slot: usize) -> ChartEvent {
        let Some(panel) = self.current_panel() else {
            return ChartEvent::empty();
        };
        let mut chart = panel.chart;
        if slot >= chart.slot {
            return ChartEvent::empty();
        }
        let interactive = !panel.flags.contains(WindowFlags::ROM);
        let event = self.with_canvas(|canvas, input| {
            let input = input.filter(|_| interactive);
            match chart.slots[slot].kind {
                ChartType::Lines => chart.push_line(canvas, input, value, slot),
                ChartType::Column => chart.push_column(canvas, input, value, slot),
            }
        });
        if let Some(panel) = self.current_panel_mut() {
            panel.chart = chart;
        }
        event
    }

    pub fn chart_end(&mut self) {
        if let Some(panel) = self.current_panel_mut() {
            panel.chart = Chart::default();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_orders_bounds() {
        let slot = ChartSlot::new(ChartType::Lines, 4, 10.0, -10.0, Color::RED, Color::BLUE, true);
        assert_eq!(slot.min, -10.0);
        assert_eq!(slot.max, 10.0);
        assert_eq!(slot.range, 20.0);
        assert_eq!(slot.ratio(0.0), 0.5);
    }

    #[test]
    fn flat_range_maps_to_bottom() {
        let slot = ChartSlot::new(ChartType::Column, 2, 3.0, 3.0, Color::RED, Color::BLUE, false);
        assert_eq!(slot.ratio(3.0), 0.0);
    }
}
