//! Flow Layout - builds the node chain and runs the kinsoku pass.
//!
//! # Pass
//!
//! ```text
//! FlowDataSource → build_sequence → NodeChain → reposition → frames
//! ```
//!
//! `reposition` walks the chain once, left to right. For each node:
//!
//! 1. normalize the frame left over from the host (`validate_position`)
//! 2. explicit break → new line
//! 3. at line head but may not start a line → break at the previous candidate
//! 4. at line tail but may not end a line → move down, or break at the candidate
//! 5. otherwise → ordinary placement
//! 6. overflowing the line → the same head/candidate choice as 4
//! 7. still overflowing → new line regardless of punctuation
//!
//! A cascade only rewrites nodes between the candidate and the current node,
//! never nodes after it, so each node is written a bounded number of times.

use log::{debug, trace, warn};

use super::config::LayoutConfig;
use super::source::FlowDataSource;
use super::text_measure::text_units;
use crate::engine::{Node, NodeChain, NodeId};
use crate::error::{FlowError, Result};
use crate::types::{Frame, IndexPath, LayoutAttributes, Size};

// =============================================================================
// Sequence construction
// =============================================================================

/// Rebuild `chain` from `source`.
///
/// The previous chain is released first. Returns the last node's frame as
/// the host laid it out, before any kinsoku adjustment.
pub fn build_sequence<S>(chain: &mut NodeChain, source: &S) -> Result<Option<Frame>>
where
    S: FlowDataSource + ?Sized,
{
    chain.release();
    let total: usize = (0..source.section_count())
        .map(|section| source.item_count(section))
        .sum();
    chain.reserve(total);

    for section in 0..source.section_count() {
        for item in 0..source.item_count(section) {
            let index_path = IndexPath::new(section, item);
            match build_node(source, index_path) {
                Ok(node) => {
                    chain.append(node);
                }
                Err(err) => {
                    chain.release();
                    return Err(err);
                }
            }
        }
    }

    Ok(chain.tail().map(|tail| chain.node(tail).frame()))
}

fn build_node<S>(source: &S, index_path: IndexPath) -> Result<Node>
where
    S: FlowDataSource + ?Sized,
{
    let content = source.item_content(index_path);
    if content.is_empty() {
        return Err(FlowError::EmptyContent { index_path });
    }

    let frame = source.intrinsic_frame(index_path);
    let Size { width, height } = frame.size;
    let valid = |v: f32| v.is_finite() && v >= 0.0;
    if !valid(width) || !valid(height) {
        return Err(FlowError::InvalidSize {
            index_path,
            width,
            height,
        });
    }

    Ok(Node::new(content.into_owned(), frame, index_path))
}

// =============================================================================
// Reposition
// =============================================================================

/// Run the kinsoku pass over the whole chain.
pub fn reposition(chain: &mut NodeChain, config: &LayoutConfig) {
    let ids: Vec<NodeId> = chain.ids().collect();
    for id in ids {
        place_node(chain, id, config);
    }
}

fn place_node(chain: &mut NodeChain, id: NodeId, config: &LayoutConfig) {
    chain.validate_position(id, config);

    if chain.node(id).has_line_break() {
        chain.change_to_next_line(id, config);
    } else if chain.is_head_of_line(id) && !chain.can_be_head_of_line(id) {
        chain.adjust_positions_from_previous_candidate(id, config);
    } else if chain.is_tail_of_line(id) && !chain.can_be_tail_of_line(id) {
        break_before(chain, id, config);
    } else {
        chain.adjust_position(id, config);
    }

    if chain.is_beyond_boundary(id, config) {
        break_before(chain, id, config);
    }

    // Last resort: punctuation rules give way so the line always ends.
    if chain.is_beyond_boundary(id, config) {
        trace!("forced break before {:?}", chain.node(id).content());
        chain.change_to_next_line(id, config);

        if chain.is_beyond_boundary(id, config) {
            let node = chain.node(id);
            warn!(
                "{:?} at {} is wider than its line ({} > {})",
                node.content(),
                node.index_path(),
                node.frame().max_x(),
                config.line_width(node.index_path().section)
            );
        }
    }
}

/// Start a new line at `id` if it may head one, else at the previous candidate.
fn break_before(chain: &mut NodeChain, id: NodeId, config: &LayoutConfig) {
    if chain.can_be_head_of_line(id) {
        chain.change_to_next_line(id, config);
    } else {
        chain.adjust_positions_from_previous_candidate(id, config);
    }
}

// =============================================================================
// Run lookup
// =============================================================================

/// First node of the first run whose contents spell `text`, unit by unit.
pub fn find_run(chain: &NodeChain, text: &str) -> Option<NodeId> {
    if text.is_empty() {
        return None;
    }
    let units = text_units(text);
    let ids: Vec<NodeId> = chain.ids().collect();

    ids.windows(units.len())
        .find(|window| {
            window
                .iter()
                .zip(&units)
                .all(|(&id, unit)| chain.node(id).content() == *unit)
        })
        .map(|window| window[0])
}

// =============================================================================
// FlowLayout
// =============================================================================

/// The layout object a host container drives.
///
/// Call [`prepare`](Self::prepare) whenever the layout is invalidated, then
/// read frames back. Nothing is observable half-way through a pass.
#[derive(Debug, Clone, Default)]
pub struct FlowLayout {
    config: LayoutConfig,
    chain: NodeChain,
    natural_size: Option<Size<f32>>,
    last_frame_before_reflow: Option<Frame>,
}

impl FlowLayout {
    pub fn new(config: LayoutConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Replace the configuration. Takes effect on the next `prepare`.
    pub fn set_config(&mut self, config: LayoutConfig) {
        self.config = config;
    }

    pub fn chain(&self) -> &NodeChain {
        &self.chain
    }

    /// Rebuild the chain from `source` and run the kinsoku pass.
    ///
    /// On error the layout is left empty.
    pub fn prepare<S>(&mut self, source: &S) -> Result<()>
    where
        S: FlowDataSource + ?Sized,
    {
        self.natural_size = None;
        self.last_frame_before_reflow = None;
        if let Err(err) = self.config.validate() {
            self.chain.release();
            return Err(err);
        }

        self.last_frame_before_reflow = build_sequence(&mut self.chain, source)?;
        self.natural_size = Some(source.natural_content_size());
        reposition(&mut self.chain, &self.config);

        debug!(
            "flow layout: {} nodes, content height delta {}",
            self.chain.len(),
            self.content_height_delta()
        );
        Ok(())
    }

    /// Final frames in chain order.
    pub fn frames(&self) -> Vec<Frame> {
        self.chain.iter().map(Node::frame).collect()
    }

    /// Attributes of every node, in chain order.
    pub fn attributes(&self) -> Vec<LayoutAttributes> {
        self.chain.iter().map(attributes_of).collect()
    }

    /// Attributes of every node whose frame intersects `rect`.
    pub fn visible_frames(&self, rect: &Frame) -> Vec<LayoutAttributes> {
        self.chain
            .iter()
            .filter(|node| node.frame().intersects(rect))
            .map(attributes_of)
            .collect()
    }

    /// Natural content size plus the height the reflow added to the last line.
    pub fn total_content_size(&self) -> Size<f32> {
        let natural = self.natural_size.unwrap_or(Size {
            width: 0.0,
            height: 0.0,
        });
        Size {
            width: natural.width,
            height: natural.height + self.content_height_delta(),
        }
    }

    fn content_height_delta(&self) -> f32 {
        match (self.last_frame_before_reflow, self.chain.tail()) {
            (Some(before), Some(tail)) => self.chain.node(tail).frame().max_y() - before.max_y(),
            _ => 0.0,
        }
    }

    /// First node of the first run spelling `text`.
    pub fn find_run(&self, text: &str) -> Option<&Node> {
        find_run(&self.chain, text).map(|id| self.chain.node(id))
    }
}

fn attributes_of(node: &Node) -> LayoutAttributes {
    LayoutAttributes {
        index_path: node.index_path(),
        frame: node.frame(),
    }
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;

    use super::*;
    use crate::layout::{GlyphMetrics, TextSource};
    use crate::types::{Insets, uniform_insets};

    /// CJK glyphs are 10 x 10.
    const METRICS: GlyphMetrics = GlyphMetrics::new(5.0, 10.0);

    fn layout(text: &str, config: LayoutConfig) -> FlowLayout {
        let source = TextSource::new(text, METRICS, &config).unwrap();
        let mut layout = FlowLayout::new(config);
        layout.prepare(&source).unwrap();
        layout
    }

    fn origin_of(layout: &FlowLayout, id: NodeId) -> (f32, f32) {
        let frame = layout.chain().node(id).frame();
        (frame.origin.x, frame.origin.y)
    }

    /// Lines as strings, grouped by head-of-line.
    fn lines(layout: &FlowLayout) -> Vec<String> {
        let chain = layout.chain();
        let mut lines: Vec<String> = Vec::new();
        for id in chain.ids() {
            if chain.is_head_of_line(id) || lines.is_empty() {
                lines.push(String::new());
            }
            if let Some(line) = lines.last_mut() {
                line.push_str(chain.node(id).content());
            }
        }
        lines
    }

    struct FixedSource {
        items: Vec<(&'static str, Frame)>,
    }

    impl FlowDataSource for FixedSource {
        fn item_count(&self, _section: usize) -> usize {
            self.items.len()
        }

        fn item_content(&self, index_path: IndexPath) -> Cow<'_, str> {
            Cow::Borrowed(self.items[index_path.item].0)
        }

        fn intrinsic_frame(&self, index_path: IndexPath) -> Frame {
            self.items[index_path.item].1
        }

        fn natural_content_size(&self) -> Size<f32> {
            Size {
                width: 100.0,
                height: 50.0,
            }
        }
    }

    #[test]
    fn test_single_node_at_inset_origin() {
        let config = LayoutConfig::new(100.0).with_inset(Insets {
            left: 3.0,
            right: 3.0,
            top: 4.0,
            bottom: 0.0,
        });
        let layout = layout("一", config);

        assert_eq!(layout.chain().len(), 1);
        assert_eq!(origin_of(&layout, 0), (3.0, 4.0));
    }

    #[test]
    fn test_plain_text_wraps_at_line_width() {
        let layout = layout("一二三四五六七", LayoutConfig::new(30.0));
        assert_eq!(lines(&layout), vec!["一二三", "四五六", "七"]);
    }

    #[test]
    fn test_end_punctuation_pulls_previous_char_down() {
        let layout = layout("一二三四。", LayoutConfig::new(40.0));
        assert_eq!(lines(&layout), vec!["一二三", "四。"]);
        assert_eq!(origin_of(&layout, 3), (0.0, 10.0));
        assert_eq!(origin_of(&layout, 4), (10.0, 10.0));
    }

    #[test]
    fn test_closing_bracket_cascades_back_to_opening_bracket() {
        let layout = layout("一二（好）", LayoutConfig::new(40.0));
        assert_eq!(lines(&layout), vec!["一二", "（好）"]);
        assert_eq!(origin_of(&layout, 2), (0.0, 10.0));
        assert_eq!(origin_of(&layout, 3), (10.0, 10.0));
        assert_eq!(origin_of(&layout, 4), (20.0, 10.0));
    }

    #[test]
    fn test_opening_bracket_never_ends_line() {
        let layout = layout("一二三（好", LayoutConfig::new(40.0));
        assert_eq!(lines(&layout), vec!["一二三", "（好"]);
    }

    #[test]
    fn test_end_punctuation_alone_on_narrow_line() {
        // Only 国 fits; ” has no candidate but the sequence head
        let layout = layout("国”", LayoutConfig::new(10.0));
        assert_eq!(origin_of(&layout, 0), (0.0, 0.0));
        assert_eq!(origin_of(&layout, 1), (0.0, 10.0));
        assert!(layout.chain().is_head_of_line(1));
    }

    #[test]
    fn test_line_break_starts_following_node_on_new_line() {
        let config = LayoutConfig::new(100.0).with_inset(uniform_insets(2.0));
        let layout = layout("一二\n三", config);
        let chain = layout.chain();

        assert!(chain.node(2).has_line_break());
        assert!(chain.is_head_of_line(3));
        assert_eq!(chain.node(3).frame().origin.x, 2.0);
        // Zero-height break glyph takes the height of the line above
        assert_eq!(chain.node(2).frame().size.height, 10.0);
    }

    #[test]
    fn test_zero_width_units_stay_on_their_line() {
        let config = LayoutConfig::new(100.0);

        let tab = layout("一\t二", config.clone());
        assert_eq!(origin_of(&tab, 1), (10.0, 0.0));
        assert_eq!(origin_of(&tab, 2), (10.0, 0.0));
        assert_eq!(tab.chain().node(1).frame().size.height, 10.0);
        assert_eq!(lines(&tab), vec!["一\t二"]);

        let zwsp = layout("一二\u{200B}三", config);
        assert_eq!(origin_of(&zwsp, 3), (20.0, 0.0));
        assert_eq!(lines(&zwsp), vec!["一二\u{200B}三"]);
        assert_eq!(zwsp.total_content_size().height, 10.0);
    }

    #[test]
    fn test_leading_line_break_adds_a_line() {
        let one = layout("\n一", LayoutConfig::new(100.0));
        assert_eq!(one.chain().node(0).frame(), Frame::new(0.0, 0.0, 0.0, 10.0));
        assert_eq!(origin_of(&one, 1), (0.0, 10.0));
        assert_eq!(one.total_content_size().height, 20.0);

        let two = layout("\n\n一", LayoutConfig::new(100.0));
        assert_eq!(origin_of(&two, 1), (0.0, 10.0));
        assert_eq!(two.chain().node(1).frame().size.height, 10.0);
        assert_eq!(origin_of(&two, 2), (0.0, 20.0));
        assert_eq!(two.total_content_size().height, 30.0);
    }

    #[test]
    fn test_bracketed_glyph_at_two_glyph_width_keeps_boundary() {
        // （好） cannot keep all three together in two cells per line; the
        // closing bracket starts line 2 rather than overflow.
        let layout = layout("（好）", LayoutConfig::new(20.0));
        assert_eq!(lines(&layout), vec!["（好", "）"]);
        assert_eq!(origin_of(&layout, 2), (0.0, 10.0));
        assert!(layout.chain().is_head_of_line(2));
        assert!(layout.frames().iter().all(|frame| frame.max_x() <= 20.0));
    }

    #[test]
    fn test_set_config_applies_on_next_prepare() {
        let mut layout = layout("一二三四五六七", LayoutConfig::new(30.0));
        let wide = LayoutConfig::new(70.0);
        let source = TextSource::new("一二三四五六七", METRICS, &wide).unwrap();

        layout.set_config(wide);
        assert_eq!(layout.config().container_width, 70.0);
        assert_eq!(lines(&layout).len(), 3);

        layout.prepare(&source).unwrap();
        assert_eq!(lines(&layout), vec!["一二三四五六七"]);
    }

    #[test]
    fn test_wide_node_overflows_on_its_own_line() {
        let config = LayoutConfig::new(100.0);
        let source = FixedSource {
            items: vec![
                ("一", Frame::sized(10.0, 10.0)),
                ("图", Frame::sized(150.0, 10.0)),
                ("二", Frame::sized(10.0, 10.0)),
            ],
        };
        let mut layout = FlowLayout::new(config);
        layout.prepare(&source).unwrap();
        let chain = layout.chain();

        assert!(chain.is_head_of_line(1));
        assert_eq!(chain.node(1).frame().origin.x, 0.0);
        assert!(chain.is_beyond_boundary(1, layout.config()));
        assert!(chain.is_head_of_line(2));
    }

    #[test]
    fn test_empty_source() {
        let layout = layout("", LayoutConfig::new(100.0));
        assert!(layout.chain().is_empty());
        assert!(layout.frames().is_empty());
        assert!(layout.visible_frames(&Frame::new(0.0, 0.0, 100.0, 100.0)).is_empty());
        assert!(layout.find_run("好").is_none());
    }

    #[test]
    fn test_find_run() {
        let layout = layout("一二（好）好", LayoutConfig::new(40.0));

        let node = layout.find_run("好").unwrap();
        assert_eq!(node.content(), "好");
        assert_eq!(node.index_path(), IndexPath::new(0, 3));

        assert_eq!(layout.find_run("好）").unwrap().index_path().item, 3);
        assert_eq!(layout.find_run("）好").unwrap().index_path().item, 4);
        assert!(layout.find_run("好好").is_none());
        assert!(layout.find_run("").is_none());
        assert!(layout.find_run("一二（好）好！").is_none());
    }

    #[test]
    fn test_visible_frames_filters_by_rect() {
        let layout = layout("一二三四五六", LayoutConfig::new(30.0));

        let first_line = layout.visible_frames(&Frame::new(0.0, 0.0, 30.0, 5.0));
        assert_eq!(first_line.len(), 3);
        assert!(first_line.iter().all(|attr| attr.frame.origin.y == 0.0));

        let everything = layout.visible_frames(&Frame::new(0.0, 0.0, 30.0, 20.0));
        assert_eq!(everything.len(), 6);
    }

    #[test]
    fn test_total_content_size_tracks_reflow() {
        // Natural flow: 一二三四 | 。 ; after reflow the last line is unchanged
        let same = layout("一二三四。", LayoutConfig::new(40.0));
        assert_eq!(same.total_content_size().height, 20.0);
        assert_eq!(same.total_content_size().width, 40.0);

        // Natural flow: 一二三（ | 好 ... reflow keeps two lines
        let moved = layout("一二三（好", LayoutConfig::new(40.0));
        assert_eq!(moved.total_content_size().height, 20.0);
    }

    #[test]
    fn test_total_content_size_grows_with_line_break() {
        // Natural flow keeps 一\n二 on one line; the break adds two lines
        let layout = layout("一\n二", LayoutConfig::new(100.0));
        assert_eq!(layout.total_content_size().height, 30.0);
    }

    #[test]
    fn test_prepare_rejects_empty_content() {
        let source = FixedSource {
            items: vec![("一", Frame::sized(10.0, 10.0)), ("", Frame::sized(10.0, 10.0))],
        };
        let mut layout = FlowLayout::new(LayoutConfig::new(100.0));
        let err = layout.prepare(&source).unwrap_err();

        assert_eq!(
            err,
            FlowError::EmptyContent {
                index_path: IndexPath::new(0, 1)
            }
        );
        assert!(layout.chain().is_empty());
    }

    #[test]
    fn test_prepare_rejects_invalid_size() {
        let source = FixedSource {
            items: vec![("一", Frame::sized(f32::NAN, 10.0))],
        };
        let mut layout = FlowLayout::new(LayoutConfig::new(100.0));
        assert!(matches!(
            layout.prepare(&source),
            Err(FlowError::InvalidSize { .. })
        ));
    }

    #[test]
    fn test_prepare_rejects_invalid_config() {
        let source = FixedSource { items: vec![] };
        let mut layout = FlowLayout::new(LayoutConfig::new(f32::INFINITY));
        assert!(layout.prepare(&source).is_err());
    }

    #[test]
    fn test_build_sequence_reports_pre_reflow_tail() {
        let source = FixedSource {
            items: vec![
                ("一", Frame::new(0.0, 0.0, 10.0, 10.0)),
                ("二", Frame::new(10.0, 0.0, 10.0, 10.0)),
            ],
        };
        let mut chain = NodeChain::new();
        let last = build_sequence(&mut chain, &source).unwrap();
        assert_eq!(last, Some(Frame::new(10.0, 0.0, 10.0, 10.0)));
        assert_eq!(chain.len(), 2);

        // Rebuilding replaces the old chain instead of extending it
        build_sequence(&mut chain, &source).unwrap();
        assert_eq!(chain.len(), 2);
    }

    #[test]
    fn test_dyn_source() {
        let config = LayoutConfig::new(100.0);
        let source = TextSource::new("好", METRICS, &config).unwrap();
        let dyn_source: &dyn FlowDataSource = &source;
        let mut layout = FlowLayout::new(config);
        layout.prepare(dyn_source).unwrap();
        assert_eq!(layout.chain().len(), 1);
    }
}
