//! Error type for input validation.
//!
//! The placement pass itself never fails. Errors only surface when a data
//! source or configuration hands the engine something it cannot place at
//! all (empty text units, non-finite sizes, negative spacing).

use thiserror::Error;

use crate::types::IndexPath;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FlowError {
    #[error("item {index_path} has empty content")]
    EmptyContent { index_path: IndexPath },

    #[error("item {index_path} has an invalid intrinsic size {width} x {height}")]
    InvalidSize {
        index_path: IndexPath,
        width: f32,
        height: f32,
    },

    #[error("invalid layout metric `{name}`: {value}")]
    InvalidMetric { name: &'static str, value: f32 },
}

pub type Result<T> = std::result::Result<T, FlowError>;

/// Reject NaN, infinities and negative values.
pub(crate) fn check_metric(name: &'static str, value: f32) -> Result<f32> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(FlowError::InvalidMetric { name, value })
    }
}
