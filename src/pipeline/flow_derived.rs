//! Flow Derived - Reactive flow layout computation.
//!
//! Creates a Derived that re-runs the whole build-then-reposition cycle
//! whenever:
//! - The text changes
//! - The layout config changes (container width, insets, spacing)
//!
//! Each run starts from a fresh chain, so a snapshot never mixes frames
//! from two passes.

use log::warn;
use spark_signals::{derived, Derived, Signal};

use crate::layout::{FlowLayout, GlyphMetrics, LayoutConfig, TextSource};
use crate::types::{LayoutAttributes, Size};

/// Result of one flow layout pass.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowSnapshot {
    /// Attributes of every box, in text order.
    pub attributes: Vec<LayoutAttributes>,
    /// Natural content size plus the reflow delta of the last line.
    pub content_size: Size<f32>,
}

impl Default for FlowSnapshot {
    fn default() -> Self {
        Self {
            attributes: Vec::new(),
            content_size: Size {
                width: 0.0,
                height: 0.0,
            },
        }
    }
}

/// Lay out `text` once and capture the result.
///
/// Invalid metrics or config produce an empty snapshot.
pub fn compute_flow_snapshot(text: &str, config: LayoutConfig, metrics: GlyphMetrics) -> FlowSnapshot {
    let source = match TextSource::new(text, metrics, &config) {
        Ok(source) => source,
        Err(err) => {
            warn!("flow layout skipped: {err}");
            return FlowSnapshot::default();
        }
    };

    let mut layout = FlowLayout::new(config);
    if let Err(err) = layout.prepare(&source) {
        warn!("flow layout skipped: {err}");
        return FlowSnapshot::default();
    }

    FlowSnapshot {
        attributes: layout.attributes(),
        content_size: layout.total_content_size(),
    }
}

/// Create the flow derived.
///
/// Returns a Derived that lays out the text and automatically re-runs when
/// the text or config signal changes.
pub fn create_flow_derived(
    text: Signal<String>,
    config: Signal<LayoutConfig>,
    metrics: GlyphMetrics,
) -> Derived<FlowSnapshot> {
    derived(move || {
        // Reading both signals creates the reactive dependencies
        let text = text.get();
        let config = config.get();

        compute_flow_snapshot(&text, config, metrics)
    })
}

// =============================================================================
// Tests
// =============================================================================
