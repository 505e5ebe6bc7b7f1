//! Cross-validated bandwidth scoring.
//!
//! Purpose
//! -------
//! Everything needed to measure how good a candidate bandwidth is, before any
//! numerical search gets involved: the [`Smoother`] seam to the smoothing
//! backend, the leave-one-out RMSE estimator, and Cartesian candidate grids
//! with an order-preserving sweep over them.
//!
//! Submodules
//! ----------
//! - [`smoother`]: the backend trait driven by the scoring loop.
//! - [`loocv`]: leave-one-out RMSE for one bandwidth vector.
//! - [`grid`]: candidate grids anchored to bin widths and the grid sweep.
//! - [`errors`]: `CvError` / `CvResult`.
//!
//! Downstream usage
//! ----------------
//! `selection::best_bandwidth` minimises the same estimator numerically; the
//! grid sweep is the diagnostic companion for plotting the RMSE surface.

pub mod errors;
pub mod grid;
pub mod loocv;
pub mod smoother;

// ---- Re-exports (primary public surface) ----
pub use errors::{CvError, CvResult};
pub use grid::{
    bandwidth_grid, rmse_grid, BandwidthGrid, GridPoint, DEFAULT_GRID_POINTS,
    DEFAULT_MAX_MULTIPLE,
};
pub use loocv::loocv_rmse;
pub use smoother::Smoother;

/// Convenience prelude for scoring bandwidths.
pub mod prelude {
    pub use super::errors::{CvError, CvResult};
    pub use super::grid::{bandwidth_grid, rmse_grid, BandwidthGrid, GridPoint};
    pub use super::loocv::loocv_rmse;
    pub use super::smoother::Smoother;
}
