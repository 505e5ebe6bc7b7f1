//! minimizer — argmin-powered bound-free minimization layer.
//!
//! Purpose
//! -------
//! Provide a high-level, Argmin-backed minimization layer for smooth search
//! criteria `f(θ)`. Callers implement a single trait, [`Criterion`], and
//! invoke [`minimize`] to run L-BFGS with a configurable line search,
//! tolerances, and a finite-difference gradient fallback. The bandwidth
//! selection layer is the primary consumer, but nothing here knows about
//! bandwidths.
//!
//! Key behaviors
//! -------------
//! - Bridge user-supplied criteria into Argmin-compatible cost functions via
//!   [`adapter::ArgMinAdapter`]; the criterion value is minimized directly,
//!   with no sign flip.
//! - Expose a single entrypoint [`minimize`] that:
//!   - validates the initial guess with [`Criterion::check`],
//!   - selects an L-BFGS solver via [`builders`] based on
//!     [`traits::LineSearcher`],
//!   - executes the solver via [`run::run_lbfgs`], and
//!   - normalizes results into a [`MinimizeOutcome`].
//! - Fall back to finite-difference gradients in [`finite_diff`] when the
//!   criterion does not provide analytic derivatives, with post-hoc
//!   validation and error capture.
//! - Centralize configuration ([`Tolerances`], [`SearchOptions`]) and
//!   validation logic ([`validation`]) so the solver layer can assume sane,
//!   finite inputs.
//!
//! Invariants & assumptions
//! ------------------------
//! - Parameters live in an unconstrained space as [`Theta`] (`Array1<f64>`).
//!   Any mapping from constrained space (e.g. lower-bounded bandwidths)
//!   happens in the layer that defines the criterion.
//! - [`Criterion::value`] and [`Criterion::grad`] must treat invalid inputs
//!   as recoverable [`OptError`](crate::optimization::errors::OptError)
//!   values, not panics.
//! - Configuration types are validated on construction and treated as
//!   internally consistent by the solver layer.
//! - Errors bubble up as [`OptResult<T>`](crate::optimization::errors::OptResult);
//!   this module and its children never intentionally panic or use `unsafe`.
//!
//! Downstream usage
//! ----------------
//! - The selection layer implements [`Criterion`] for its cross-validation
//!   objective and calls [`minimize`] with an initial [`Theta`], the summary
//!   data payload, and a [`SearchOptions`] configuration.
//! - The re-exported surface is [`minimize`], [`Criterion`],
//!   [`SearchOptions`], [`Tolerances`], [`LineSearcher`],
//!   [`MinimizeOutcome`], plus the numeric aliases from [`types`].
//!
//! Testing notes
//! -------------
//! - Unit tests in submodules cover:
//!   - cost and gradient handling in [`adapter`],
//!   - solver construction and tolerance wiring in [`builders`],
//!   - finite-difference + validation behavior in [`finite_diff`],
//!   - configuration and outcome invariants in [`traits`],
//!   - full quadratic solves in [`api`].
//! - The pipeline integration tests exercise [`minimize`] on the real
//!   cross-validation criterion.

pub mod adapter;
pub mod api;
pub mod builders;
pub mod finite_diff;
pub mod run;
pub mod traits;
pub mod types;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::api::minimize;
pub use self::traits::{Criterion, LineSearcher, MinimizeOutcome, SearchOptions, Tolerances};
pub use self::types::{Cost, DEFAULT_LBFGS_MEM, FnEvalMap, Grad, Theta};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use bandwidth_cv::optimization::minimizer::prelude::*;
//
// to import the main minimizer surface in a single line.

pub mod prelude {
    pub use super::api::minimize;
    pub use super::traits::{Criterion, LineSearcher, MinimizeOutcome, SearchOptions, Tolerances};
    pub use super::types::{Cost, Grad, Theta};
}
