//! Data Sources
//!
//! The flow layout never owns text. It asks a [`FlowDataSource`] for the
//! ordered items of each section, their text units and their intrinsic
//! frames, the same way a collection container asks its host.
//!
//! [`TextSource`] is the ready-made source for plain strings: one item per
//! grapheme, sized from a fixed cell metric, with intrinsic frames taken
//! from a greedy natural flow.

use std::borrow::Cow;

use super::config::LayoutConfig;
use super::text_measure::{text_units, unit_width};
use crate::engine::classify;
use crate::error::{check_metric, Result};
use crate::types::{Frame, IndexPath, NodeClass, Size};

// =============================================================================
// Host interface
// =============================================================================

/// Everything the engine reads from its host for one pass.
pub trait FlowDataSource {
    /// Number of sections. Hosts without sections keep the default.
    fn section_count(&self) -> usize {
        1
    }

    /// Number of items in `section`.
    fn item_count(&self, section: usize) -> usize;

    /// The text unit shown by the item.
    fn item_content(&self, index_path: IndexPath) -> Cow<'_, str>;

    /// The item's natural frame before kinsoku adjustment.
    fn intrinsic_frame(&self, index_path: IndexPath) -> Frame;

    /// The container's natural content size before kinsoku adjustment.
    fn natural_content_size(&self) -> Size<f32>;
}

// =============================================================================
// Glyph metrics
// =============================================================================

/// Fixed per-cell glyph metrics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphMetrics {
    /// Width of one terminal-style cell; CJK glyphs take two.
    pub cell_width: f32,
    pub line_height: f32,
}

impl GlyphMetrics {
    pub const fn new(cell_width: f32, line_height: f32) -> Self {
        Self {
            cell_width,
            line_height,
        }
    }

    /// Intrinsic size of one unit.
    ///
    /// A line break gets a zero-sized box, like a bare break glyph in a text
    /// container. Other zero-width units (tabs, ZWSP, lone combining marks)
    /// keep the line height so they sit on their line.
    pub fn size_of(&self, unit: &str) -> Size<f32> {
        if classify(unit).contains(NodeClass::LINE_BREAK) {
            return Size {
                width: 0.0,
                height: 0.0,
            };
        }
        let cells = unit_width(unit);
        Size {
            width: self.cell_width * cells as f32,
            height: self.line_height,
        }
    }

    pub fn validate(&self) -> Result<()> {
        check_metric("cell_width", self.cell_width)?;
        check_metric("line_height", self.line_height)?;
        Ok(())
    }
}

impl Default for GlyphMetrics {
    fn default() -> Self {
        Self::new(1.0, 1.0)
    }
}

// =============================================================================
// Natural flow
// =============================================================================

/// Greedy flow placement of `sizes` per section, ignoring kinsoku rules.
///
/// Boxes fill each line left to right and wrap when the next box would pass
/// the line width; a line is as tall as its tallest box. Sections stack
/// vertically with their insets. Returns one frame per box and the
/// natural content size.
pub fn natural_flow(sections: &[Vec<Size<f32>>], config: &LayoutConfig) -> (Vec<Vec<Frame>>, Size<f32>) {
    let mut frames = Vec::with_capacity(sections.len());
    let mut bottom = 0.0f32;

    for (section, sizes) in sections.iter().enumerate() {
        let metrics = config.section(section);
        let line_width = config.line_width(section);
        let left = metrics.inset.left;

        let mut x = left;
        let mut y = bottom + metrics.inset.top;
        let mut line_height = 0.0f32;
        let mut placed = Vec::with_capacity(sizes.len());

        for size in sizes {
            if x > left && x + size.width > line_width {
                x = left;
                y += line_height + metrics.line_spacing;
                line_height = 0.0;
            }
            placed.push(Frame::new(x, y, size.width, size.height));
            x += size.width + metrics.inter_item_spacing;
            line_height = line_height.max(size.height);
        }

        bottom = y + line_height + metrics.inset.bottom;
        frames.push(placed);
    }

    let size = Size {
        width: config.container_width,
        height: bottom,
    };
    (frames, size)
}

// =============================================================================
// TextSource
// =============================================================================

/// A data source over plain strings, one section per string.
#[derive(Debug, Clone, PartialEq)]
pub struct TextSource {
    sections: Vec<Vec<String>>,
    frames: Vec<Vec<Frame>>,
    natural_size: Size<f32>,
}

impl TextSource {
    /// Build a single-section source from `text`.
    pub fn new(text: &str, metrics: GlyphMetrics, config: &LayoutConfig) -> Result<Self> {
        Self::from_sections([text], metrics, config)
    }

    /// Build a source with one section per string.
    pub fn from_sections<'a>(
        sections: impl IntoIterator<Item = &'a str>,
        metrics: GlyphMetrics,
        config: &LayoutConfig,
    ) -> Result<Self> {
        metrics.validate()?;
        config.validate()?;

        let sections: Vec<Vec<String>> = sections
            .into_iter()
            .map(|text| text_units(text).into_iter().map(str::to_owned).collect())
            .collect();
        let sizes: Vec<Vec<Size<f32>>> = sections
            .iter()
            .map(|units| units.iter().map(|unit| metrics.size_of(unit)).collect())
            .collect();
        let (frames, natural_size) = natural_flow(&sizes, config);

        Ok(Self {
            sections,
            frames,
            natural_size,
        })
    }

    /// Total number of items across all sections.
    pub fn len(&self) -> usize {
        self.sections.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FlowDataSource for TextSource {
    fn section_count(&self) -> usize {
        self.sections.len()
    }

    fn item_count(&self, section: usize) -> usize {
        self.sections.get(section).map_or(0, Vec::len)
    }

    fn item_content(&self, index_path: IndexPath) -> Cow<'_, str> {
        Cow::Borrowed(&self.sections[index_path.section][index_path.item])
    }

    fn intrinsic_frame(&self, index_path: IndexPath) -> Frame {
        self.frames[index_path.section][index_path.item]
    }

    fn natural_content_size(&self) -> Size<f32> {
        self.natural_size
    }
}
