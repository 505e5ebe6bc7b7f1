//! Errors for condensed-summary construction and column lookup.
//!
//! This module defines [`SummaryError`], the validation error type raised when
//! a condensed summary (or one of its parts) fails its construction
//! invariants, plus [`SummaryResult`] as the shared result alias.
//!
//! ## Conventions
//! - **Indices are 0-based** (rows, columns, and per-column element indices).
//! - Bin widths must be **finite and strictly positive**.
//! - `NaN` encodes a missing value and is accepted in coordinates and summary
//!   columns; **±∞ is always rejected**.
//! - Variable names (group and summary alike) must be non-empty and unique
//!   within one summary.

/// Result alias for summary construction/lookup paths that may produce
/// [`SummaryError`].
pub type SummaryResult<T> = Result<T, SummaryError>;

/// Validation error for condensed summaries.
///
/// Covers schema problems (shapes, lengths, naming) and value problems
/// (non-finite widths, infinite entries). Implements `Display`/`Error` so it
/// can travel through the crate's other error surfaces unchanged.
#[derive(Debug, Clone, PartialEq)]
pub enum SummaryError {
    // ---- Schema ----
    /// Summary has zero rows.
    EmptySummary,

    /// Summary declares no group variables.
    NoGroupVariables,

    /// Summary carries no summary columns.
    NoSummaryColumns,

    /// A group or summary variable has an empty name.
    EmptyVariableName,

    /// Two variables (group or summary) share a name.
    DuplicateVariableName { name: String },

    /// Coordinate matrix column count does not match the group count.
    GroupCountMismatch { groups: usize, coord_cols: usize },

    /// A summary column's length does not match the row count.
    ColumnLengthMismatch { name: String, expected: usize, actual: usize },

    // ---- Values ----
    /// Bin width must be finite and > 0.
    InvalidBinWidth { name: String, value: f64, reason: &'static str },

    /// Coordinates may be NaN (missing) but never ±∞.
    InfiniteCoordinate { row: usize, col: usize, value: f64 },

    /// Summary values may be NaN (missing) but never ±∞.
    InfiniteSummaryValue { name: String, index: usize, value: f64 },

    // ---- Column lookup ----
    /// Requested response column does not exist.
    UnknownSummaryVar { name: String },
}

impl std::error::Error for SummaryError {}

impl std::fmt::Display for SummaryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Schema ----
            SummaryError::EmptySummary => {
                write!(f, "Condensed summary has no rows")
            }
            SummaryError::NoGroupVariables => {
                write!(f, "Condensed summary declares no group variables")
            }
            SummaryError::NoSummaryColumns => {
                write!(f, "Condensed summary carries no summary columns")
            }
            SummaryError::EmptyVariableName => {
                write!(f, "Variable names must be non-empty")
            }
            SummaryError::DuplicateVariableName { name } => {
                write!(f, "Duplicate variable name '{name}'")
            }
            SummaryError::GroupCountMismatch { groups, coord_cols } => {
                write!(
                    f,
                    "Coordinate matrix has {coord_cols} columns but {groups} group variables were declared"
                )
            }
            SummaryError::ColumnLengthMismatch { name, expected, actual } => {
                write!(
                    f,
                    "Summary column '{name}' has length {actual}, expected {expected}"
                )
            }

            // ---- Values ----
            SummaryError::InvalidBinWidth { name, value, reason } => {
                write!(f, "Invalid bin width {value} for group variable '{name}': {reason}")
            }
            SummaryError::InfiniteCoordinate { row, col, value } => {
                write!(f, "Infinite coordinate at ({row}, {col}): {value}")
            }
            SummaryError::InfiniteSummaryValue { name, index, value } => {
                write!(f, "Infinite value in summary column '{name}' at index {index}: {value}")
            }

            // ---- Column lookup ----
            SummaryError::UnknownSummaryVar { name } => {
                write!(f, "Unknown summary variable '{name}'")
            }
        }
    }
}
