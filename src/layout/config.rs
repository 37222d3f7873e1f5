//! Layout configuration.
//!
//! Everything a pass reads besides the nodes themselves: container width,
//! and per-section insets and spacing. Sections without their own entry
//! fall back to `default_metrics`.
//!
//! The config is handed to a pass by reference and is not touched while the
//! pass runs, so a pass is a pure function of (sequence, config).

use crate::error::{check_metric, Result};
use crate::types::{Insets, ZERO_INSETS};

/// Spacing and insets of one section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionMetrics {
    pub inset: Insets,
    /// Vertical gap between two lines.
    pub line_spacing: f32,
    /// Horizontal gap between two boxes on the same line.
    pub inter_item_spacing: f32,
}

impl SectionMetrics {
    pub const fn new(inset: Insets, line_spacing: f32, inter_item_spacing: f32) -> Self {
        Self {
            inset,
            line_spacing,
            inter_item_spacing,
        }
    }
}

impl Default for SectionMetrics {
    fn default() -> Self {
        Self::new(ZERO_INSETS, 0.0, 0.0)
    }
}

/// Configuration of a flow layout pass.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    /// Content width of the hosting container.
    pub container_width: f32,
    /// Metrics for any section without an explicit entry.
    pub default_metrics: SectionMetrics,
    /// Per-section overrides, indexed by section.
    pub sections: Vec<SectionMetrics>,
}

impl LayoutConfig {
    /// A config with the given container width and zero spacing everywhere.
    pub fn new(container_width: f32) -> Self {
        Self {
            container_width,
            default_metrics: SectionMetrics::default(),
            sections: Vec::new(),
        }
    }

    pub fn with_inset(mut self, inset: Insets) -> Self {
        self.default_metrics.inset = inset;
        self
    }

    pub fn with_line_spacing(mut self, spacing: f32) -> Self {
        self.default_metrics.line_spacing = spacing;
        self
    }

    pub fn with_inter_item_spacing(mut self, spacing: f32) -> Self {
        self.default_metrics.inter_item_spacing = spacing;
        self
    }

    /// Set the metrics of one section, padding earlier sections with the defaults.
    pub fn with_section(mut self, section: usize, metrics: SectionMetrics) -> Self {
        if self.sections.len() <= section {
            self.sections.resize(section + 1, self.default_metrics);
        }
        self.sections[section] = metrics;
        self
    }

    /// Metrics for `section`, falling back to the defaults.
    pub fn section(&self, section: usize) -> SectionMetrics {
        self.sections
            .get(section)
            .copied()
            .unwrap_or(self.default_metrics)
    }

    /// Right edge a box may reach in `section`.
    ///
    /// Container width plus the section's horizontal insets.
    pub fn line_width(&self, section: usize) -> f32 {
        let inset = self.section(section).inset;
        self.container_width + inset.left + inset.right
    }

    /// Narrowest container width that still holds one `item_width` box per
    /// line in the default section.
    pub fn minimum_compression_width(&self, item_width: f32) -> f32 {
        let inset = self.default_metrics.inset;
        item_width + inset.left + inset.right + 1.0
    }

    /// Reject non-finite or negative widths, spacings and insets.
    pub fn validate(&self) -> Result<()> {
        check_metric("container_width", self.container_width)?;
        for metrics in std::iter::once(&self.default_metrics).chain(self.sections.iter()) {
            check_metric("inset.left", metrics.inset.left)?;
            check_metric("inset.right", metrics.inset.right)?;
            check_metric("inset.top", metrics.inset.top)?;
            check_metric("inset.bottom", metrics.inset.bottom)?;
            check_metric("line_spacing", metrics.line_spacing)?;
            check_metric("inter_item_spacing", metrics.inter_item_spacing)?;
        }
        Ok(())
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self::new(0.0)
    }
}
