//! Row layout state

use imkit_graphics::Rect;

/// Maximum columns remembered for ratio-array rows.
pub const MAX_LAYOUT_ROW_COLUMNS: usize = 16;
/// Maximum columns of a template row.
pub const MAX_TEMPLATE_COLUMNS: usize = 16;

/// Whether widths are fractions of the panel (`Dynamic`) or pixels (`Static`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayoutFormat {
    Dynamic,
    Static,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LayoutType {
    /// Equal columns sharing the panel width.
    #[default]
    DynamicFixed,
    /// One ratio pushed before each widget.
    DynamicRow,
    /// Normalized free placement inside the row.
    DynamicFree,
    /// Ratio array given up front; negative entries share the remainder.
    Dynamic,
    /// Equal pixel-width columns.
    StaticFixed,
    /// One pixel width pushed before each widget.
    StaticRow,
    /// Pixel free placement inside the row.
    StaticFree,
    /// Pixel width array given up front.
    Static,
    /// Mix of static, variable and dynamic columns resolved at `template_end`.
    Template,
}

/// Column description for template rows.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TemplateColumn {
    /// Fixed pixel width.
    Static(f32),
    /// Shares spare space but never shrinks below the given width while space allows.
    Variable(f32),
    /// Shares spare space with no minimum.
    Dynamic,
}

impl TemplateColumn {
    fn encode(self) -> f32 {
        match self {
            TemplateColumn::Static(width) => width.max(0.0),
            TemplateColumn::Variable(min) => -min.max(1.0),
            TemplateColumn::Dynamic => -1.0,
        }
    }
}

/// Per-row layout state of a panel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RowLayout {
    pub kind: LayoutType,
    pub index: usize,
    pub height: f32,
    pub min_height: f32,
    pub columns: usize,
    pub(crate) ratios: [f32; MAX_LAYOUT_ROW_COLUMNS],
    pub(crate) ratio_count: usize,
    pub item_width: f32,
    pub item_height: f32,
    pub item_offset: f32,
    pub filled: f32,
    /// Pushed rectangle for free layouts.
    pub item: Rect,
    pub tree_depth: usize,
    pub(crate) templates: [f32; MAX_TEMPLATE_COLUMNS],
}

impl Default for RowLayout {
    fn default() -> Self {
        Self {
            kind: LayoutType::DynamicFixed,
            index: 0,
            height: 0.0,
            min_height: 0.0,
            columns: 0,
            ratios: [0.0; MAX_LAYOUT_ROW_COLUMNS],
            ratio_count: 0,
            item_width: 0.0,
            item_height: 0.0,
            item_offset: 0.0,
            filled: 0.0,
            item: Rect::ZERO,
            tree_depth: 0,
            templates: [0.0; MAX_TEMPLATE_COLUMNS],
        }
    }
}

impl RowLayout {
    pub(crate) fn set_ratios(&mut self, ratios: &[f32]) {
        let count = ratios.len().min(MAX_LAYOUT_ROW_COLUMNS);
        if ratios.len() > MAX_LAYOUT_ROW_COLUMNS {
            log::warn!(
                "row declares {} ratios; only the first {MAX_LAYOUT_ROW_COLUMNS} are kept",
                ratios.len()
            );
        }
        self.ratios[..count].copy_from_slice(&ratios[..count]);
        self.ratio_count = count;
    }

    pub(crate) fn clear_ratios(&mut self) {
        self.ratio_count = 0;
    }

    /// Ratio (dynamic) or pixel width (static) declared for column `index`.
    pub fn ratio(&self, index: usize) -> Option<f32> {
        self.ratios[..self.ratio_count].get(index).copied()
    }

    pub(crate) fn push_template(&mut self, column: TemplateColumn) -> bool {
        if self.kind != LayoutType::Template {
            return false;
        }
        if self.columns >= MAX_TEMPLATE_COLUMNS {
            log::warn!("template row is limited to {MAX_TEMPLATE_COLUMNS} columns");
            return false;
        }
        self.templates[self.columns] = column.encode();
        self.columns += 1;
        true
    }

    /// Resolved width of template column `index` (valid after `template_end`).
    pub fn template_width(&self, index: usize) -> Option<f32> {
        (index < self.columns.min(MAX_TEMPLATE_COLUMNS)).then(|| self.templates[index])
    }

    /// Resolves template widths against `space` usable pixels.
    pub(crate) fn resolve_templates(&mut self, space: f32) {
        let columns = self.columns.min(MAX_TEMPLATE_COLUMNS);
        let mut variable_count = 0usize;
        let mut min_variable_count = 0usize;
        let mut min_fixed_width = 0.0f32;
        let mut total_fixed_width = 0.0f32;
        let mut max_variable_width = 0.0f32;

        for &width in &self.templates[..columns] {
            if width >= 0.0 {
                total_fixed_width += width;
                min_fixed_width += width;
            } else if width < -1.0 {
                let width = -width;
                total_fixed_width += width;
                max_variable_width = max_variable_width.max(width);
                variable_count += 1;
            } else {
                min_variable_count += 1;
                variable_count += 1;
            }
        }

        if variable_count == 0 {
            return;
        }
        let mut var_width = (space - min_fixed_width).max(0.0) / variable_count as f32;
        let enough_space = var_width >= max_variable_width;
        if !enough_space {
            // Variable columns keep their minimum; dynamic ones split what is left.
            var_width = if min_variable_count > 0 {
                (space - total_fixed_width).max(0.0) / min_variable_count as f32
            } else {
                0.0
            };
        }
        for width in &mut self.templates[..columns] {
            *width = if *width >= 0.0 {
                *width
            } else if *width < -1.0 && !enough_space {
                -*width
            } else {
                var_width
            };
        }
    }
}
