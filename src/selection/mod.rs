//! Automatic bandwidth selection.
//!
//! Purpose
//! -------
//! Turn the cross-validated score from [`evaluation`](crate::evaluation)
//! into a fitted bandwidth: a lower-bounded quasi-Newton search over the
//! leave-one-out RMSE, with the bound eliminated through a softplus
//! reparameterization so the solver stays unconstrained.
//!
//! Submodules
//! ----------
//! - [`options`]: user-facing knobs ([`SelectionOptions`]).
//! - [`problem`]: the RMSE criterion and the bandwidth/theta transforms.
//! - [`best`]: the [`best_bandwidth`] entry point, [`BandwidthFit`], and
//!   [`SelectionWarning`].
//!
//! Downstream usage
//! ----------------
//! Callers bring a [`Smoother`](crate::evaluation::Smoother) implementation
//! and a [`CondensedSummary`](crate::summary::CondensedSummary) and get back
//! a [`BandwidthFit`] carrying the estimate and its diagnostics. Warnings
//! also go through [`log::warn!`] for users with a logger installed.

pub mod best;
pub mod options;
pub mod problem;

// ---- Re-exports (primary public surface) ----
pub use best::{best_bandwidth, BandwidthFit, SelectionWarning, LOWER_BOUND_REL_TOL};
pub use options::{SelectionOptions, DEFAULT_INIT_MULTIPLE};
pub use problem::BandwidthProblem;

/// Convenience prelude for running bandwidth searches.
pub mod prelude {
    pub use super::best::{best_bandwidth, BandwidthFit, SelectionWarning};
    pub use super::options::SelectionOptions;
}
