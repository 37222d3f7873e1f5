//! # chinese-text-flow
//!
//! Flow layout for Chinese text with kinsoku line-breaking rules.
//!
//! Every text unit is a box with an intrinsic size. The layout fills a
//! fixed-width container line by line and keeps the typographic rules:
//! - closing punctuation (`）」。，…`) never starts a line
//! - opening punctuation (`（「“`) never ends a line
//! - `\n` forces a new line
//! - a box that overflows moves down, pulling along whatever must stay with it
//!
//! ## Architecture
//!
//! Nodes are entries in one arena, linked by index rather than pointers.
//! The layout is one left-to-right pass over that chain; a node that breaks
//! a rule may move a run of earlier nodes (the cascade) before it is placed.
//!
//! ```text
//! FlowDataSource → NodeChain → reposition → frames → host renderer
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Geometry (Frame, Insets), IndexPath, NodeClass
//! - [`engine`] - Node, NodeChain, kinsoku character classes
//! - [`layout`] - LayoutConfig, data sources, FlowLayout
//! - [`pipeline`] - Reactive re-layout with spark-signals
//! - [`error`] - Input validation errors

pub mod engine;
pub mod error;
pub mod layout;
pub mod pipeline;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use error::{FlowError, Result};

pub use engine::{classify, Node, NodeChain, NodeId};

pub use layout::{
    build_sequence, find_run, natural_flow, reposition, string_width, text_units, unit_width,
    FlowDataSource, FlowLayout, GlyphMetrics, LayoutConfig, SectionMetrics, TextSource,
};

pub use pipeline::{compute_flow_snapshot, create_flow_derived, FlowSnapshot};
