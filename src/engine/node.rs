//! Node - one text unit and its placement rectangle.
//!
//! Nodes never point at each other directly. They live in a [`NodeChain`]
//! arena and refer to their neighbors by [`NodeId`], so the back-reference
//! can never keep a discarded chain alive.
//!
//! [`NodeChain`]: super::NodeChain

use std::fmt;

use super::charset::classify;
use crate::types::{Frame, IndexPath, NodeClass};

/// Index of a node inside its [`NodeChain`](super::NodeChain).
pub type NodeId = usize;

/// One glyph box in the flow.
///
/// Only `frame` changes after construction. Classification is computed
/// once from `content`.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    content: String,
    class: NodeClass,
    index_path: IndexPath,
    pub(crate) frame: Frame,
    pub(crate) prev: Option<NodeId>,
    pub(crate) next: Option<NodeId>,
}

impl Node {
    /// Create an unlinked node with its intrinsic frame.
    pub fn new(content: impl Into<String>, frame: Frame, index_path: IndexPath) -> Self {
        let content = content.into();
        let class = classify(&content);
        Self {
            content,
            class,
            index_path,
            frame,
            prev: None,
            next: None,
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn class(&self) -> NodeClass {
        self.class
    }

    pub fn index_path(&self) -> IndexPath {
        self.index_path
    }

    pub fn frame(&self) -> Frame {
        self.frame
    }

    pub fn prev(&self) -> Option<NodeId> {
        self.prev
    }

    pub fn next(&self) -> Option<NodeId> {
        self.next
    }

    #[inline]
    pub fn is_begin_punctuation(&self) -> bool {
        self.class.contains(NodeClass::BEGIN_PUNCTUATION)
    }

    #[inline]
    pub fn is_end_punctuation(&self) -> bool {
        self.class.contains(NodeClass::END_PUNCTUATION)
    }

    #[inline]
    pub fn has_line_break(&self) -> bool {
        self.class.contains(NodeClass::LINE_BREAK)
    }

    /// True for the first item of its data-source section.
    pub fn is_first_in_section(&self) -> bool {
        self.index_path.item == 0
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.content)
    }
}
