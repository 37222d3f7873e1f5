//! Flow Engine - Node arena and placement operations.
//!
//! The engine manages the core data structures:
//! - Charset: the three kinsoku character classes
//! - Node: one text unit, its classification and its frame
//! - NodeChain: the linked arena plus line predicates and placement moves
//!
//! # Architecture
//!
//! Nodes are NOT boxed objects pointing at each other. They are entries in
//! one `Vec`, linked by index:
//!
//! ```text
//! Index 0: 「  (prev=None, next=1, class=BEGIN)
//! Index 1: 好  (prev=0,    next=2, class=ORDINARY)
//! Index 2: 」  (prev=1,    next=None, class=END)
//! ```
//!
//! Dropping the `Vec` drops the whole chain, so a rebuilt sequence never
//! keeps the previous one alive.

pub mod charset;
mod chain;
mod node;

pub use chain::*;
pub use charset::classify;
pub use node::*;
