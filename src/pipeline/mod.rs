//! Reactive Pipeline
//!
//! Connects host state to the flow layout through spark-signals.
//!
//! # Pipeline Architecture
//!
//! ```text
//! text signal ─┐
//!              ├→ flowDerived → FlowSnapshot → host renderer
//! config signal┘
//! ```
//!
//! A change to either signal is the "layout invalidated" event: the derived
//! rebuilds the chain and runs the full pass before anyone can read frames.

pub mod flow_derived;

pub use flow_derived::{compute_flow_snapshot, create_flow_derived, FlowSnapshot};
