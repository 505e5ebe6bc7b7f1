//! numerical_stability — numerically robust transforms for the bandwidth search.
//!
//! Purpose
//! -------
//! Collect the numerically stable scalar and vector transforms the
//! selection layer uses to run a lower-bounded bandwidth search through an
//! unconstrained solver. This module centralizes the transform logic so the
//! rest of the optimization and selection layers can assume
//! well-conditioned `f64` arithmetic.
//!
//! Key behaviors
//! -------------
//! - Provide the stable softplus pair (`safe_softplus`,
//!   `safe_softplus_inv`) for mapping unconstrained reals into strictly
//!   positive offsets without overflow/underflow.
//! - Provide `relative_distance` for comparing a fitted bandwidth vector
//!   against its lower bounds, used to flag estimates pinned at the bound.
//!
//! Invariants & assumptions
//! ------------------------
//! - All public transforms assume finite `f64` inputs; domain and shape
//!   validation (positivity, length checks) is enforced in the selection
//!   and minimizer layers, not here.
//! - This module never logs, performs I/O, or touches global state; it is
//!   pure numerical helpers suitable for use inside tight inner loops.
//! - Panics and `unsafe` are avoided under normal usage; invalid inputs
//!   should be caught by upstream validation and surfaced as
//!   domain-specific error types.
//!
//! Downstream usage
//! ----------------
//! - The selection layer maps bandwidths `h > w` into unconstrained
//!   parameters via `θ = softplus⁻¹(h/w − 1)` and back via
//!   `h = w · (1 + softplus(θ))`.
//! - The near-bound diagnostic compares `h_hat` to the bin widths with
//!   `relative_distance` and warns when the result is tiny.
//!
//! Testing notes
//! -------------
//! - Unit tests in [`transformations`] cover agreement of the stable
//!   transforms with naïve formulas on safe grids, tail behavior past the
//!   cutoff, round-trip accuracy, and known relative-distance values.
//! - Integration tests in the selection layer exercise the transforms
//!   end-to-end through the bandwidth search.

pub mod transformations;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::transformations::{relative_distance, safe_softplus, safe_softplus_inv};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use bandwidth_cv::optimization::numerical_stability::prelude::*;
//
// to import the main numerical-stability surface in a single line.

pub mod prelude {
    pub use super::transformations::{relative_distance, safe_softplus, safe_softplus_inv};
}
