//! Core types for chinese-text-flow.
//!
//! Geometry reuses Taffy's `Point`, `Size` and `Rect` so frames and insets
//! speak the same language as the rest of the layout stack. Everything here
//! is a plain value type that flows through the engine unchanged.

use std::fmt;

pub use taffy::{Point, Rect, Size};

// =============================================================================
// Insets
// =============================================================================

/// Edge insets of a section (left, right, top, bottom).
pub type Insets = Rect<f32>;

/// Insets with every edge set to `value`.
pub const fn uniform_insets(value: f32) -> Insets {
    Rect {
        left: value,
        right: value,
        top: value,
        bottom: value,
    }
}

/// All-zero insets.
pub const ZERO_INSETS: Insets = uniform_insets(0.0);

// =============================================================================
// Frame
// =============================================================================

/// Absolute rectangle of one glyph box.
///
/// The origin is the top-left corner; y grows downward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub origin: Point<f32>,
    pub size: Size<f32>,
}

impl Frame {
    /// Create a frame from origin and size components.
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Point { x, y },
            size: Size { width, height },
        }
    }

    /// A zero-origin frame of the given size.
    pub const fn sized(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    #[inline]
    pub fn min_x(&self) -> f32 {
        self.origin.x
    }

    #[inline]
    pub fn min_y(&self) -> f32 {
        self.origin.y
    }

    #[inline]
    pub fn max_x(&self) -> f32 {
        self.origin.x + self.size.width
    }

    #[inline]
    pub fn max_y(&self) -> f32 {
        self.origin.y + self.size.height
    }

    /// True when the two frames overlap or touch along a non-empty region.
    ///
    /// Zero-sized frames (bare line-break glyphs) intersect any frame that
    /// contains their origin.
    pub fn intersects(&self, other: &Frame) -> bool {
        self.min_x() <= other.max_x()
            && other.min_x() <= self.max_x()
            && self.min_y() <= other.max_y()
            && other.min_y() <= self.max_y()
    }

    /// True when `other` lies entirely inside this frame.
    pub fn contains(&self, other: &Frame) -> bool {
        other.min_x() >= self.min_x()
            && other.max_x() <= self.max_x()
            && other.min_y() >= self.min_y()
            && other.max_y() <= self.max_y()
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {}, {})",
            self.origin.x, self.origin.y, self.size.width, self.size.height
        )
    }
}

// =============================================================================
// IndexPath
// =============================================================================

/// Position of an item in the host's data source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct IndexPath {
    pub section: usize,
    pub item: usize,
}

impl IndexPath {
    pub const fn new(section: usize, item: usize) -> Self {
        Self { section, item }
    }
}

impl fmt::Display for IndexPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.section, self.item)
    }
}

// =============================================================================
// Node classification (bitflags)
// =============================================================================

bitflags::bitflags! {
    /// Line-breaking classes of a text unit.
    ///
    /// A unit may carry several classes at once when it holds more than
    /// one codepoint, e.g. a cluster containing both `”` and `\n`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct NodeClass: u8 {
        const ORDINARY = 0;
        /// Opening bracket or quote: may not end a line.
        const BEGIN_PUNCTUATION = 1 << 0;
        /// Closing bracket, quote or stop: may not start a line.
        const END_PUNCTUATION = 1 << 1;
        /// Explicit line break.
        const LINE_BREAK = 1 << 2;
    }
}

// =============================================================================
// Layout attributes
// =============================================================================

/// What the host receives for each visible box: where it goes and which
/// item it belongs to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutAttributes {
    pub index_path: IndexPath,
    pub frame: Frame,
}
