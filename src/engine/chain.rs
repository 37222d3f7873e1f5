//! NodeChain - arena of linked nodes and the placement operations.
//!
//! Nodes are stored contiguously and linked by index:
//!
//! ```text
//! id:    0      1      2      3
//!       「  ⇄  好  ⇄  」  ⇄  。
//! prev: None   0      1      2
//! next: 1      2      3      None
//! ```
//!
//! Every predicate is recomputed from the current frames on each call, and
//! every placement operation writes frames only. A later node can therefore
//! move earlier nodes (the cascade) simply by rewriting their frames in place.

use log::trace;

use super::node::{Node, NodeId};
use crate::layout::LayoutConfig;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeChain {
    nodes: Vec<Node>,
    head: Option<NodeId>,
    tail: Option<NodeId>,
}

impl NodeChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make room for `additional` more nodes.
    pub fn reserve(&mut self, additional: usize) {
        self.nodes.reserve(additional);
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn head(&self) -> Option<NodeId> {
        self.head
    }

    pub fn tail(&self) -> Option<NodeId> {
        self.tail
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// The node at `id`. Panics on an id from another chain.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    /// Node ids in chain order, following `next` links from the head.
    pub fn ids(&self) -> ChainIds<'_> {
        ChainIds {
            chain: self,
            cursor: self.head,
        }
    }

    /// Nodes in chain order.
    pub fn iter(&self) -> impl Iterator<Item = &Node> + '_ {
        self.ids().map(move |id| &self.nodes[id])
    }

    // =========================================================================
    // Linking
    // =========================================================================

    /// Link `node` after the current tail and return its id.
    pub fn append(&mut self, mut node: Node) -> NodeId {
        let id = self.nodes.len();
        node.prev = self.tail;
        node.next = None;
        self.nodes.push(node);

        match self.tail {
            Some(tail) => self.nodes[tail].next = Some(id),
            None => self.head = Some(id),
        }
        self.tail = Some(id);
        id
    }

    /// Unlink every node, head to tail, then drop them all.
    pub fn release(&mut self) {
        let mut cursor = self.head;
        let mut unlinked = 0usize;
        while let Some(id) = cursor {
            cursor = self.nodes[id].next.take();
            if let Some(next) = cursor {
                self.nodes[next].prev = None;
            }
            unlinked += 1;
        }
        if unlinked > 0 {
            trace!("released node chain of {unlinked} nodes");
        }
        self.nodes.clear();
        self.head = None;
        self.tail = None;
    }

    // =========================================================================
    // Predicates
    // =========================================================================

    /// No predecessor, or the predecessor ends above this node's top edge.
    pub fn is_head_of_line(&self, id: NodeId) -> bool {
        let node = &self.nodes[id];
        match node.prev {
            None => true,
            Some(prev) => node.frame.min_y() >= self.nodes[prev].frame.max_y(),
        }
    }

    /// No successor, or the successor starts below this node's bottom edge.
    pub fn is_tail_of_line(&self, id: NodeId) -> bool {
        let node = &self.nodes[id];
        match node.next {
            None => true,
            Some(next) => node.frame.max_y() <= self.nodes[next].frame.min_y(),
        }
    }

    /// Whether the node may legally start a line.
    ///
    /// The first node of a section has no predecessor inside its section and
    /// is treated like the sequence head.
    pub fn can_be_head_of_line(&self, id: NodeId) -> bool {
        let node = &self.nodes[id];
        match node.prev {
            None => true,
            Some(_) if self.starts_section(id) => true,
            Some(prev) => !node.is_end_punctuation() && !self.nodes[prev].is_begin_punctuation(),
        }
    }

    /// Whether the node may legally end a line.
    pub fn can_be_tail_of_line(&self, id: NodeId) -> bool {
        !self.nodes[id].is_begin_punctuation()
    }

    /// Whether the right edge passes the line width of the node's section.
    pub fn is_beyond_boundary(&self, id: NodeId, config: &LayoutConfig) -> bool {
        let node = &self.nodes[id];
        node.frame.max_x() > config.line_width(node.index_path().section)
    }

    /// First item of a section that is not the sequence head.
    fn starts_section(&self, id: NodeId) -> bool {
        let node = &self.nodes[id];
        match node.prev {
            None => false,
            Some(prev) => {
                node.is_first_in_section()
                    && self.nodes[prev].index_path().section != node.index_path().section
            }
        }
    }

    // =========================================================================
    // Placement
    // =========================================================================

    /// Top edge of a new line started by `id` below its predecessor.
    fn next_line_y(&self, id: NodeId, prev: NodeId, config: &LayoutConfig) -> f32 {
        let node = &self.nodes[id];
        let prev_node = &self.nodes[prev];
        let metrics = config.section(node.index_path().section);
        if self.starts_section(id) {
            let prev_inset = config.section(prev_node.index_path().section).inset;
            prev_node.frame.max_y() + prev_inset.bottom + metrics.inset.top
        } else {
            prev_node.frame.max_y() + metrics.line_spacing
        }
    }

    /// Place the node on its current line, or at the start of a new one.
    ///
    /// - No predecessor: the section's top-left origin.
    /// - Head of line (or right after an explicit break, or starting a
    ///   section): left margin, one line below the predecessor.
    /// - Otherwise: right of the predecessor, bottom edges aligned.
    pub fn adjust_position(&mut self, id: NodeId, config: &LayoutConfig) {
        let metrics = config.section(self.nodes[id].index_path().section);
        let Some(prev) = self.nodes[id].prev else {
            let frame = &mut self.nodes[id].frame;
            frame.origin.x = metrics.inset.left;
            frame.origin.y = metrics.inset.top;
            return;
        };

        let starts_line = self.is_head_of_line(id)
            || self.nodes[prev].has_line_break()
            || self.starts_section(id);

        if starts_line {
            let y = self.next_line_y(id, prev, config);
            let frame = &mut self.nodes[id].frame;
            frame.origin.x = metrics.inset.left;
            frame.origin.y = y;
        } else {
            let prev_frame = self.nodes[prev].frame;
            let frame = &mut self.nodes[id].frame;
            frame.origin.x = prev_frame.max_x() + metrics.inter_item_spacing;
            frame.origin.y = prev_frame.max_y() - frame.size.height;
        }
    }

    /// Force the node to the start of a new line below its predecessor.
    ///
    /// A line-break node takes its predecessor's height; bare break glyphs
    /// report a zero or oversized height of their own. The sequence head
    /// stays where it is, and a break at the head borrows the height of the
    /// first glyph after it.
    pub fn change_to_next_line(&mut self, id: NodeId, config: &LayoutConfig) {
        let Some(prev) = self.nodes[id].prev else {
            if self.nodes[id].has_line_break() {
                let height = self.first_glyph_height_after(id);
                self.nodes[id].frame.size.height = height;
            }
            return;
        };

        let inset_left = config.section(self.nodes[id].index_path().section).inset.left;
        let y = self.next_line_y(id, prev, config);
        let prev_height = self.nodes[prev].frame.size.height;

        let node = &mut self.nodes[id];
        node.frame.origin.x = inset_left;
        node.frame.origin.y = y;
        if node.has_line_break() {
            node.frame.size.height = prev_height;
        }
    }

    /// Height of the first non-break node with a height after `id`, or zero.
    fn first_glyph_height_after(&self, id: NodeId) -> f32 {
        let mut cursor = self.nodes[id].next;
        while let Some(next) = cursor {
            let node = &self.nodes[next];
            if !node.has_line_break() && node.frame.size.height > 0.0 {
                return node.frame.size.height;
            }
            cursor = node.next;
        }
        0.0
    }

    /// Nearest predecessor that may start a line.
    pub fn lookup_previous_candidate(&self, id: NodeId) -> Option<NodeId> {
        let mut cursor = self.nodes[id].prev;
        while let Some(candidate) = cursor {
            if self.can_be_head_of_line(candidate) {
                return Some(candidate);
            }
            cursor = self.nodes[candidate].prev;
        }
        None
    }

    /// Break before the nearest candidate and reflow everything up to `id`.
    ///
    /// The candidate moves to a new line, each node between it and `id` is
    /// placed again from its new predecessor, then `id` itself is placed.
    /// Without a candidate (or when the candidate already carries a line
    /// break) only `id` is placed.
    pub fn adjust_positions_from_previous_candidate(&mut self, id: NodeId, config: &LayoutConfig) {
        if let Some(candidate) = self.lookup_previous_candidate(id) {
            if !self.nodes[candidate].has_line_break() {
                trace!(
                    "cascade: breaking before {:?} for {:?}",
                    self.nodes[candidate].content(),
                    self.nodes[id].content()
                );
                self.change_to_next_line(candidate, config);

                let mut cursor = self.nodes[candidate].next;
                while let Some(next) = cursor {
                    if next == id {
                        break;
                    }
                    self.adjust_position(next, config);
                    cursor = self.nodes[next].next;
                }
            }
        }
        self.adjust_position(id, config);
    }

    /// Normalize a frame left over from the host or an earlier pass.
    ///
    /// The stale frame only decides whether the node begins a line; the
    /// position itself is recomputed from the already placed predecessor.
    pub fn validate_position(&mut self, id: NodeId, config: &LayoutConfig) {
        self.adjust_position(id, config);
    }

    // =========================================================================
    // Diagnostics
    // =========================================================================

    /// `content (x, y, w, h)` followed by ` line_head` / ` line_tail` markers.
    pub fn describe(&self, id: NodeId) -> String {
        let node = &self.nodes[id];
        let mut desc = format!("{} {}", node.content(), node.frame);
        if self.is_head_of_line(id) {
            desc.push_str(" line_head");
        }
        if self.is_tail_of_line(id) {
            desc.push_str(" line_tail");
        }
        desc
    }
}

/// Iterator over node ids in chain order.
pub struct ChainIds<'a> {
    chain: &'a NodeChain,
    cursor: Option<NodeId>,
}

impl Iterator for ChainIds<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.cursor?;
        self.cursor = self.chain.nodes[id].next;
        Some(id)
    }
}
