//! Flow Layout Module
//!
//! Kinsoku-aware flow layout for Chinese text.
//!
//! # Architecture
//!
//! The layout module sits between a host container and the node engine:
//!
//! 1. A [`FlowDataSource`] hands over items (text unit + intrinsic frame)
//! 2. [`build_sequence`] turns them into a linked [`NodeChain`]
//! 3. [`reposition`] runs the single kinsoku pass with a [`LayoutConfig`]
//! 4. [`FlowLayout`] answers the host's queries (visible frames, content
//!    size, run lookup)
//!
//! # Example
//!
//! ```
//! use chinese_text_flow::layout::{FlowLayout, GlyphMetrics, LayoutConfig, TextSource};
//!
//! let config = LayoutConfig::new(40.0);
//! let source = TextSource::new("一二三四。", GlyphMetrics::new(5.0, 10.0), &config).unwrap();
//!
//! let mut layout = FlowLayout::new(config);
//! layout.prepare(&source).unwrap();
//!
//! // 。 may not start a line, so 四 moves down with it
//! let four = layout.find_run("四。").unwrap();
//! assert_eq!(four.frame().origin.x, 0.0);
//! ```
//!
//! [`NodeChain`]: crate::engine::NodeChain

mod config;
mod flow;
mod source;
mod text_measure;

pub use config::*;
pub use flow::*;
pub use source::*;
pub use text_measure::*;
