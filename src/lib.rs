//! bandwidth_cv — cross-validated bandwidth selection for condensed data summaries.
//!
//! Purpose
//! -------
//! Choose smoothing bandwidths for condensed summaries: datasets reduced to
//! binned grouping coordinates with aggregated columns (counts, means, ...)
//! attached to each row. The crate scores candidate bandwidths by
//! leave-one-out cross-validation against a user-supplied smoothing backend
//! and searches for the minimizer with a lower-bounded quasi-Newton method,
//! where the bin widths act as the lower bound.
//!
//! Key behaviors
//! -------------
//! - Validate and carry condensed summaries (`summary`): grouping variables
//!   with bin widths, row coordinates, and named summary columns where NaN
//!   marks a missing aggregate.
//! - Score a bandwidth via leave-one-out RMSE and sweep whole candidate
//!   grids (`evaluation`), delegating all smoothing to implementations of
//!   the [`Smoother`](evaluation::Smoother) trait.
//! - Select the best bandwidth (`selection`): softplus bound elimination,
//!   L-BFGS search, and diagnostics for non-convergence and estimates
//!   pinned at the bin widths.
//! - Run the underlying unconstrained minimization (`optimization`): an
//!   Argmin-backed L-BFGS layer with finite-difference gradient fallback
//!   and a unified error surface.
//!
//! Invariants & assumptions
//! ------------------------
//! - NaN is the missing-value marker throughout; infinities are rejected at
//!   construction time and never flow through the estimators.
//! - Bandwidths are per-grouping-variable, in declaration order, and only
//!   meaningful at or above the bin widths.
//! - The smoothing backend is external: this crate never interpolates or
//!   smooths anything itself, it only drives the backend through the
//!   [`Smoother`](evaluation::Smoother) contract.
//!
//! Conventions
//! -----------
//! - Numeric data uses `ndarray` (`Array1`/`Array2` and views).
//! - Fallible operations return module-specific result aliases
//!   (`SummaryResult`, `CvResult`, `OptResult`); errors convert upward via
//!   `From` impls so callers at the selection layer see a single
//!   [`OptError`](optimization::errors::OptError) surface.
//! - Warnings (non-convergence, near-bound fits) are carried on the result
//!   and also emitted through the `log` facade.
//!
//! Downstream usage
//! ----------------
//! - Implement [`Smoother`](evaluation::Smoother) for your backend, build a
//!   [`CondensedSummary`](summary::CondensedSummary), and call
//!   [`best_bandwidth`](selection::best_bandwidth) for an automatic fit or
//!   [`rmse_grid`](evaluation::rmse_grid) to inspect the score surface.
//! - The [`prelude`] pulls in the main surface of all four modules.
//!
//! Testing notes
//! -------------
//! - Unit tests in the submodules pin down validation rules, estimator
//!   arithmetic, transforms, and solver wiring, mostly on hand-checkable
//!   fixtures and toy smoothers.
//! - `tests/` exercises the full pipeline: grid scoring and bandwidth
//!   searches over a small kernel smoother, including the missing-data and
//!   warning paths.

pub mod evaluation;
pub mod optimization;
pub mod selection;
pub mod summary;

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use bandwidth_cv::prelude::*;
//
// to import the main crate surface in a single line.

pub mod prelude {
    pub use crate::evaluation::prelude::*;
    pub use crate::optimization::prelude::*;
    pub use crate::selection::prelude::*;
    pub use crate::summary::prelude::*;
}
