//! Condensed-summary data model.
//!
//! Purpose
//! -------
//! Own the crate's input type: a condensed (pre-binned) table of group
//! coordinates and per-bin summary statistics, validated once at
//! construction. Everything else in the crate — leave-one-out scoring, grid
//! evaluation, bandwidth search — consumes the types defined here.
//!
//! Submodules
//! ----------
//! - [`data`]: `GroupVariable`, `SummaryColumn`, and `CondensedSummary`.
//! - [`errors`]: `SummaryError` and the `SummaryResult` alias.
//!
//! Downstream usage
//! ----------------
//! Condensation itself (binning raw observations into this shape) happens
//! upstream of this crate; smoothing of the summaries is delegated to
//! implementors of `evaluation::Smoother`.

pub mod data;
pub mod errors;

// ---- Re-exports (primary public surface) ----
pub use data::{CondensedSummary, GroupVariable, SummaryColumn};
pub use errors::{SummaryError, SummaryResult};

/// Convenience prelude for the summary data model.
pub mod prelude {
    pub use super::data::{CondensedSummary, GroupVariable, SummaryColumn};
    pub use super::errors::{SummaryError, SummaryResult};
}
