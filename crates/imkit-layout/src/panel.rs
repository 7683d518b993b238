//! Panel layout cursor

use crate::row::{LayoutFormat, LayoutType, RowLayout, TemplateColumn};
use imkit_graphics::{Rect, Vec2};

/// Scroll offset in whole pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Scroll {
    pub x: u32,
    pub y: u32,
}

impl Scroll {
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    pub fn as_vec2(self) -> Vec2 {
        Vec2::new(self.x as f32, self.y as f32)
    }
}

/// Geometry of a row that was just started; dynamic panels paint a
/// background behind it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RowStart {
    pub y: f32,
    pub height: f32,
}

/// Result of allocating one widget slot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Allocation {
    pub bounds: Rect,
    pub new_row: Option<RowStart>,
}

/// Region claimed by a menubar at the top of a panel.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MenuBar {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub offset: Scroll,
}

/// Rounding remainder added back to dynamic widths so that neighbouring
/// widgets meet without gaps after truncation.
fn frac(x: f32) -> f32 {
    x - x.round()
}

/// Layout cursor of one panel for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PanelLayout {
    /// Content area.
    pub bounds: Rect,
    pub clip: Rect,
    pub at_x: f32,
    pub at_y: f32,
    pub max_x: f32,
    pub header_height: f32,
    pub footer_height: f32,
    pub border: f32,
    pub offset: Scroll,
    pub row: RowLayout,
    pub menu: MenuBar,
}

impl PanelLayout {
    /// Starts a panel whose content area is `bounds`; the first row begins
    /// `initial_row_height` below its top edge.
    pub fn new(bounds: Rect, initial_row_height: f32, min_row_height: f32) -> Self {
        Self {
            bounds,
            clip: bounds,
            at_x: bounds.x,
            at_y: bounds.y,
            row: RowLayout {
                height: initial_row_height,
                min_height: min_row_height,
                ..RowLayout::default()
            },
            ..Self::default()
        }
    }

    /// Pixel width left for widgets in a row of `columns` after spacing.
    pub fn usable_space(&self, columns: usize, spacing: Vec2) -> f32 {
        let gaps = columns.saturating_sub(1) as f32 * spacing.x;
        self.bounds.w - gaps
    }

    /// Advances to a new row of `columns` widgets.
    pub fn begin_row(&mut self, height: f32, columns: usize, spacing: Vec2) -> RowStart {
        self.row.index = 0;
        self.at_y += self.row.height;
        self.row.columns = columns;
        self.row.height = if height == 0.0 {
            height.max(self.row.min_height) + spacing.y
        } else {
            height + spacing.y
        };
        self.row.item_offset = 0.0;
        RowStart {
            y: self.at_y,
            height: self.row.height,
        }
    }

    fn fixed_row(&mut self, format: LayoutFormat, height: f32, columns: usize, width: f32, spacing: Vec2) -> RowStart {
        let start = self.begin_row(height, columns, spacing);
        self.row.kind = match format {
            LayoutFormat::Dynamic => LayoutType::DynamicFixed,
            LayoutFormat::Static => LayoutType::StaticFixed,
        };
        self.row.clear_ratios();
        self.row.filled = 0.0;
        self.row.item_offset = 0.0;
        self.row.item_width = width;
        start
    }

    /// Row of `columns` equal widgets filling the panel width.
    pub fn row_dynamic(&mut self, height: f32, columns: usize, spacing: Vec2) -> RowStart {
        self.fixed_row(LayoutFormat::Dynamic, height, columns, 0.0, spacing)
    }

    /// Row of `columns` widgets of `item_width` pixels each.
    pub fn row_static(&mut self, height: f32, item_width: f32, columns: usize, spacing: Vec2) -> RowStart {
        self.fixed_row(LayoutFormat::Static, height, columns, item_width, spacing)
    }

    /// Row whose widths are pushed one at a time with [`row_push`](Self::row_push).
    pub fn row_begin(&mut self, format: LayoutFormat, height: f32, columns: usize, spacing: Vec2) -> RowStart {
        let start = self.begin_row(height, columns, spacing);
        self.row.kind = match format {
            LayoutFormat::Dynamic => LayoutType::DynamicRow,
            LayoutFormat::Static => LayoutType::StaticRow,
        };
        self.row.clear_ratios();
        self.row.filled = 0.0;
        self.row.item_width = 0.0;
        self.row.item_offset = 0.0;
        self.row.columns = columns;
        start
    }

    /// Sets the width of the next widget: a ratio for dynamic rows, pixels
    /// for static rows. Ratios overflowing the row are rejected.
    pub fn row_push(&mut self, ratio_or_width: f32) -> bool {
        match self.row.kind {
            LayoutType::DynamicRow => {
                let ratio = ratio_or_width;
                if ratio + self.row.filled > 1.0 {
                    return false;
                }
                self.row.item_width = if ratio > 0.0 {
                    ratio.clamp(0.0, 1.0)
                } else {
                    1.0 - self.row.filled
                };
                true
            }
            LayoutType::StaticRow => {
                self.row.item_width = ratio_or_width;
                true
            }
            _ => {
                log::warn!("row_push outside of a row_begin/row_end pair");
                false
            }
        }
    }

    pub fn row_end(&mut self) {
        if matches!(self.row.kind, LayoutType::DynamicRow | LayoutType::StaticRow) {
            self.row.item_width = 0.0;
            self.row.item_offset = 0.0;
        }
    }

    /// Row with per-column ratios (dynamic) or pixel widths (static). In
    /// dynamic rows negative ratios split the unclaimed remainder evenly.
    pub fn row(&mut self, format: LayoutFormat, height: f32, ratios: &[f32], spacing: Vec2) -> RowStart {
        let start = self.begin_row(height, ratios.len(), spacing);
        self.row.set_ratios(ratios);
        match format {
            LayoutFormat::Dynamic => {
                let mut claimed = 0.0;
                let mut undefined = 0usize;
                for &ratio in ratios {
                    if ratio < 0.0 {
                        undefined += 1;
                    } else {
                        claimed += ratio;
                    }
                }
                let remaining = (1.0 - claimed).clamp(0.0, 1.0);
                self.row.kind = LayoutType::Dynamic;
                self.row.item_width = if remaining > 0.0 && undefined > 0 {
                    remaining / undefined as f32
                } else {
                    0.0
                };
            }
            LayoutFormat::Static => {
                self.row.kind = LayoutType::Static;
                self.row.item_width = 0.0;
            }
        }
        self.row.item_offset = 0.0;
        self.row.filled = 0.0;
        start
    }

    pub fn template_begin(&mut self, height: f32, spacing: Vec2) -> RowStart {
        let start = self.begin_row(height, 1, spacing);
        self.row.kind = LayoutType::Template;
        self.row.columns = 0;
        self.row.clear_ratios();
        self.row.item_width = 0.0;
        self.row.item_height = 0.0;
        self.row.item_offset = 0.0;
        self.row.filled = 0.0;
        self.row.item = Rect::ZERO;
        start
    }

    pub fn template_push(&mut self, column: TemplateColumn) -> bool {
        self.row.push_template(column)
    }

    pub fn template_push_dynamic(&mut self) -> bool {
        self.template_push(TemplateColumn::Dynamic)
    }

    pub fn template_push_variable(&mut self, min_width: f32) -> bool {
        self.template_push(TemplateColumn::Variable(min_width))
    }

    pub fn template_push_static(&mut self, width: f32) -> bool {
        self.template_push(TemplateColumn::Static(width))
    }

    /// Resolves the pushed template columns into pixel widths.
    pub fn template_end(&mut self, spacing: Vec2) {
        if self.row.kind != LayoutType::Template {
            log::warn!("template_end without template_begin");
            return;
        }
        let space = self.usable_space(self.row.columns, spacing);
        self.row.resolve_templates(space);
    }

    /// Free-placement row; widgets are positioned with [`space_push`](Self::space_push).
    pub fn space_begin(&mut self, format: LayoutFormat, height: f32, widget_count: usize, spacing: Vec2) -> RowStart {
        let start = self.begin_row(height, widget_count, spacing);
        self.row.kind = match format {
            LayoutFormat::Static => LayoutType::StaticFree,
            LayoutFormat::Dynamic => LayoutType::DynamicFree,
        };
        self.row.clear_ratios();
        self.row.filled = 0.0;
        self.row.item_width = 0.0;
        self.row.item_offset = 0.0;
        start
    }

    /// Sets the rectangle of the next free widget, in row-local coordinates
    /// (normalized for dynamic space).
    pub fn space_push(&mut self, rect: Rect) {
        self.row.item = rect;
    }

    pub fn space_end(&mut self) {
        self.row.item_width = 0.0;
        self.row.item_height = 0.0;
        self.row.item_offset = 0.0;
        self.row.item = Rect::ZERO;
    }

    /// Visible area of the current free-placement row.
    pub fn space_bounds(&self) -> Rect {
        Rect::new(self.clip.x, self.clip.y, self.clip.w, self.row.height)
    }

    fn origin(&self) -> Vec2 {
        Vec2::new(self.at_x - self.offset.x as f32, self.at_y - self.offset.y as f32)
    }

    pub fn to_screen(&self, local: Vec2) -> Vec2 {
        local + self.origin()
    }

    pub fn to_local(&self, screen: Vec2) -> Vec2 {
        screen - self.origin()
    }

    pub fn rect_to_screen(&self, local: Rect) -> Rect {
        local.translate(self.origin())
    }

    pub fn rect_to_local(&self, screen: Rect) -> Rect {
        screen.translate(-self.origin())
    }

    /// Remaining rectangle of the current row from the cursor onward.
    pub fn widget_bounds(&self) -> Rect {
        Rect::new(
            self.at_x,
            self.at_y,
            self.bounds.w - (self.at_x - self.bounds.x).max(0.0),
            self.row.height,
        )
    }

    pub fn set_min_row_height(&mut self, height: f32) {
        self.row.min_height = height;
    }

    pub fn reset_min_row_height(&mut self, default_height: f32) {
        self.row.min_height = default_height;
    }

    /// Starts another row with the current row's height and column count.
    pub fn alloc_row(&mut self, spacing: Vec2) -> RowStart {
        let height = self.row.height - spacing.y;
        let columns = self.row.columns;
        self.begin_row(height, columns, spacing)
    }

    /// Bounds of the widget at the current index; `commit` advances the
    /// row's running offset and content extent.
    fn widget_space(&mut self, spacing: Vec2, commit: bool) -> Rect {
        let panel_space = self.usable_space(self.row.columns, spacing);
        let index = self.row.index as f32;
        let scroll = self.offset.as_vec2();

        let (item_offset, item_width, item_spacing) = match self.row.kind {
            LayoutType::DynamicFixed => {
                let w = panel_space.max(1.0) / self.row.columns.max(1) as f32;
                let item_offset = index * w;
                (item_offset, w + frac(item_offset), index * spacing.x)
            }
            LayoutType::DynamicRow => {
                let w = self.row.item_width * panel_space;
                let item_offset = self.row.item_offset;
                if commit {
                    self.row.item_offset += w + spacing.x;
                    self.row.filled += self.row.item_width;
                    self.row.index = 0;
                }
                (item_offset, w + frac(item_offset), 0.0)
            }
            LayoutType::DynamicFree => {
                let item = self.row.item;
                let x = self.at_x + self.bounds.w * item.x - scroll.x;
                let y = self.at_y + self.row.height * item.y - scroll.y;
                return Rect::new(
                    x,
                    y,
                    self.bounds.w * item.w + frac(x),
                    self.row.height * item.h + frac(y),
                );
            }
            LayoutType::Dynamic => {
                let ratio = match self.row.ratio(self.row.index) {
                    Some(ratio) if ratio >= 0.0 => ratio,
                    _ => self.row.item_width,
                };
                let w = ratio * panel_space;
                let item_offset = self.row.item_offset;
                if commit {
                    self.row.item_offset += w;
                    self.row.filled += ratio;
                }
                (item_offset, w + frac(item_offset), index * spacing.x)
            }
            LayoutType::StaticFixed => {
                let w = self.row.item_width;
                (index * w, w, index * spacing.x)
            }
            LayoutType::StaticRow => {
                let w = self.row.item_width;
                let item_offset = self.row.item_offset;
                if commit {
                    self.row.item_offset += w;
                }
                (item_offset, w, index * spacing.x)
            }
            LayoutType::StaticFree => {
                let item = self.row.item;
                let x = self.at_x + item.x;
                if commit && x + item.w > self.max_x {
                    self.max_x = x + item.w;
                }
                return Rect::new(
                    x - scroll.x,
                    self.at_y + item.y - scroll.y,
                    item.w,
                    item.h,
                );
            }
            LayoutType::Static => {
                let w = self.row.ratio(self.row.index).unwrap_or(0.0);
                let item_offset = self.row.item_offset;
                if commit {
                    self.row.item_offset += w;
                }
                (item_offset, w, index * spacing.x)
            }
            LayoutType::Template => {
                let w = self.row.template_width(self.row.index).unwrap_or(0.0);
                let item_offset = self.row.item_offset;
                if commit {
                    self.row.item_offset += w;
                }
                (item_offset, w + frac(item_offset), index * spacing.x)
            }
        };

        let x = self.at_x + item_offset + item_spacing;
        if commit && x + item_width > self.max_x {
            self.max_x = x + item_width;
        }
        Rect::new(
            x - scroll.x,
            self.at_y - scroll.y,
            item_width,
            self.row.height - spacing.y,
        )
    }

    /// Claims the next widget slot, wrapping to a new row when the current
    /// one is full.
    pub fn alloc_space(&mut self, spacing: Vec2) -> Allocation {
        let new_row = (self.row.index >= self.row.columns).then(|| self.alloc_row(spacing));
        let bounds = self.widget_space(spacing, true);
        self.row.index += 1;
        Allocation { bounds, new_row }
    }

    /// Bounds the next allocation would receive, without claiming it.
    pub fn peek(&self, spacing: Vec2) -> Rect {
        let mut ahead = *self;
        if ahead.row.index >= ahead.row.columns {
            ahead.at_y += ahead.row.height;
            ahead.row.index = 0;
        }
        let mut bounds = ahead.widget_space(spacing, false);
        if ahead.row.index == 0 {
            bounds.x -= ahead.row.item_offset;
        }
        bounds
    }

    /// Skips `cols` widget slots, crossing row boundaries as needed. Every
    /// row started along the way is reported to `on_row`.
    pub fn spacing(&mut self, cols: usize, spacing: Vec2, mut on_row: impl FnMut(RowStart)) {
        if self.row.columns == 0 {
            return;
        }
        let target = self.row.index + cols;
        let index = target % self.row.columns;
        let rows = target / self.row.columns;
        let mut skip = cols;
        if rows > 0 {
            for _ in 0..rows {
                on_row(self.alloc_row(spacing));
            }
            skip = index;
        }
        if !matches!(self.row.kind, LayoutType::DynamicFixed | LayoutType::StaticFixed) {
            for _ in 0..skip {
                let allocation = self.alloc_space(spacing);
                if let Some(row) = allocation.new_row {
                    on_row(row);
                }
            }
        }
        self.row.index = index;
    }
}

#[cfg(test)]
#[path = "tests/panel_tests.rs"]
mod tests;
