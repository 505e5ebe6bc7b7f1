//! optimization — minimizer stack, numerical helpers, and unified error surface.
//!
//! Purpose
//! -------
//! Provide a cohesive optimization layer for the bandwidth search, combining
//! an Argmin-backed L-BFGS minimizer, numerically stable parameter
//! transforms, and a single error/result surface. Callers implement a search
//! criterion, choose tolerances, and obtain fitted parameters and
//! diagnostics without touching backend solver details.
//!
//! Key behaviors
//! -------------
//! - Expose a high-level API for **minimizing smooth criteria** `f(θ)`
//!   (`minimizer`), including configuration of solvers and stopping
//!   criteria.
//! - Supply shared numerical primitives (`numerical_stability`) for mapping
//!   unconstrained parameters into lower-bounded bandwidth space and for
//!   boundary diagnostics.
//! - Normalize configuration issues, numerical failures, cross-validation
//!   failures, and backend solver errors into a single enum
//!   (`errors::OptError`) with a common result alias (`OptResult<T>`).
//!
//! Invariants & assumptions
//! ------------------------
//! - Solvers operate in an unconstrained parameter space `θ` and assume
//!   that inputs are finite once validation has passed; invalid states are
//!   reported as `OptError`, not panics.
//! - Criterion implementations are expected to treat domain violations
//!   (e.g., unknown response columns, smoother failures) as recoverable
//!   errors surfaced through the optimization layer.
//!
//! Conventions
//! -----------
//! - Solvers minimize the criterion value directly; lower is better and no
//!   sign flip happens anywhere in the stack.
//! - Parameters and gradients are represented using `ndarray`-based aliases
//!   (`Theta`, `Grad`); any mapping between unconstrained θ-space and
//!   bounded bandwidths is handled by numerical-stability helpers in the
//!   selection layer.
//! - Public optimization entrypoints that can fail return `OptResult<T>`;
//!   callers never see raw Argmin errors.
//! - This module and its submodules avoid I/O and logging apart from the
//!   optional `obs_slog` observer; higher layers are responsible for
//!   reporting progress and diagnostics.
//!
//! Downstream usage
//! ----------------
//! - The selection layer implements `Criterion` for its cross-validation
//!   objective and calls `minimize` with a parameter guess, summary payload,
//!   and `SearchOptions` to obtain a `MinimizeOutcome`.
//! - Front-ends typically import the curated surface via
//!   `optimization::prelude::*`, which forwards the submodule preludes and
//!   the core error types.
//!
//! Testing notes
//! -------------
//! - Unit tests in the submodules focus on local concerns:
//!   - `minimizer`: solver wiring, tolerance handling, and quadratic solves.
//!   - `numerical_stability`: agreement with naïve formulas on safe grids
//!     and well-behaved tails.
//! - The pipeline integration tests exercise end-to-end bandwidth searches,
//!   verifying that configuration mistakes, numerical problems, and backend
//!   failures all surface as sensible `OptError` values.

pub mod errors;
pub mod minimizer;
pub mod numerical_stability;

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use bandwidth_cv::optimization::prelude::*;
//
// to import the main optimization surface in a single line.

pub mod prelude {
    pub use super::errors::{OptError, OptResult};
    pub use super::minimizer::prelude::*;
    pub use super::numerical_stability::prelude::*;
}
