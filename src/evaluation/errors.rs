//! Errors for cross-validated scoring and grid evaluation.
//!
//! [`CvError`] covers bandwidth validation, grid construction, and breaches of
//! the smoother contract. Summary-level failures surfaced during evaluation
//! are folded in through `From<SummaryError>`, keeping `?` chains flat in the
//! scoring paths.

use crate::summary::errors::SummaryError;

/// Result alias for evaluation paths that may produce [`CvError`].
pub type CvResult<T> = Result<T, CvError>;

/// Error type for leave-one-out scoring and bandwidth grids.
#[derive(Debug, Clone, PartialEq)]
pub enum CvError {
    // ---- Bandwidth validation ----
    /// Bandwidth vector length differs from the number of group variables.
    BandwidthLengthMismatch { expected: usize, actual: usize },

    /// Bandwidth entries must be finite.
    NonFiniteBandwidth { index: usize, value: f64 },

    /// Bandwidth entries must be strictly positive.
    NonPositiveBandwidth { index: usize, value: f64 },

    // ---- Grid construction ----
    /// Grids need at least one point per dimension.
    InvalidGridSize { n: usize },

    /// Upper-bound multiple must be finite and > 0.
    InvalidMaxMultiple { value: f64, reason: &'static str },

    /// Grid dimensionality differs from the summary's group count.
    GridDimensionMismatch { expected: usize, actual: usize },

    // ---- Smoother contract ----
    /// Smoother returned a prediction vector of the wrong length.
    SmootherOutputLength { expected: usize, actual: usize },

    /// Smoother-side failure, reported by the implementor.
    SmootherFailure { reason: String },

    // ---- Summary passthrough ----
    /// Requested response column does not exist.
    UnknownSummaryVar { name: String },

    /// Any other summary-level failure, carried as text.
    InvalidSummary { text: String },
}

impl std::error::Error for CvError {}

impl std::fmt::Display for CvError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Bandwidth validation ----
            CvError::BandwidthLengthMismatch { expected, actual } => {
                write!(f, "Bandwidth vector has length {actual}, expected {expected}")
            }
            CvError::NonFiniteBandwidth { index, value } => {
                write!(f, "Non-finite bandwidth {value} at index {index}")
            }
            CvError::NonPositiveBandwidth { index, value } => {
                write!(f, "Non-positive bandwidth {value} at index {index}")
            }

            // ---- Grid construction ----
            CvError::InvalidGridSize { n } => {
                write!(f, "Invalid grid size {n}: need at least one point per dimension")
            }
            CvError::InvalidMaxMultiple { value, reason } => {
                write!(f, "Invalid grid upper-bound multiple {value}: {reason}")
            }
            CvError::GridDimensionMismatch { expected, actual } => {
                write!(f, "Grid has {actual} dimensions, summary has {expected}")
            }

            // ---- Smoother contract ----
            CvError::SmootherOutputLength { expected, actual } => {
                write!(f, "Smoother returned {actual} predictions, expected {expected}")
            }
            CvError::SmootherFailure { reason } => {
                write!(f, "Smoother failed: {reason}")
            }

            // ---- Summary passthrough ----
            CvError::UnknownSummaryVar { name } => {
                write!(f, "Unknown summary variable '{name}'")
            }
            CvError::InvalidSummary { text } => {
                write!(f, "Invalid condensed summary: {text}")
            }
        }
    }
}

impl From<SummaryError> for CvError {
    fn from(err: SummaryError) -> Self {
        match err {
            SummaryError::UnknownSummaryVar { name } => CvError::UnknownSummaryVar { name },
            other => CvError::InvalidSummary { text: other.to_string() },
        }
    }
}
