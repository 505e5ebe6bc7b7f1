//! Candidate bandwidth grids and exhaustive grid scoring.
//!
//! Purpose
//! -------
//! Provide the two exploratory entry points around [`loocv_rmse`]: build a
//! Cartesian grid of candidate bandwidths anchored to the summary's bin
//! widths, and score every row of such a grid in order. Plotted, the scored
//! grid gives the usual RMSE-versus-bandwidth picture before (or instead of)
//! running the numerical search.
//!
//! Key behaviors
//! -------------
//! - Per dimension, candidates run linearly from `2 x width` to
//!   `max_multiple x width`, `n` points inclusive of both ends.
//! - The full grid is the Cartesian product with the **first dimension
//!   cycling fastest**, matching column-major expansion of the per-dimension
//!   axes.
//! - Scoring never reorders or drops rows: output position `i` is grid row
//!   `i`, with `NaN` recording an uninformative candidate.
//!
//! Invariants & assumptions
//! ------------------------
//! - Grid size grows as `n^d` for `d` group variables; callers choose `n`
//!   with that in mind.

use ndarray::{Array1, Array2, ArrayView1};

use crate::evaluation::errors::{CvError, CvResult};
use crate::evaluation::loocv::loocv_rmse;
use crate::evaluation::smoother::Smoother;
use crate::summary::CondensedSummary;

/// Default number of grid points per dimension.
pub const DEFAULT_GRID_POINTS: usize = 50;

/// Default upper bound of the grid, as a multiple of each bin width.
pub const DEFAULT_MAX_MULTIPLE: f64 = 20.0;

/// A dense table of candidate bandwidth vectors, one per row.
#[derive(Debug, Clone, PartialEq)]
pub struct BandwidthGrid {
    /// Dimension names, copied from the summary's group variables.
    pub names: Vec<String>,

    /// Candidate bandwidths, `n_rows x n_dims`.
    pub values: Array2<f64>,
}

impl BandwidthGrid {
    /// Number of candidate bandwidth vectors.
    pub fn n_rows(&self) -> usize {
        self.values.nrows()
    }

    /// Number of bandwidth dimensions.
    pub fn n_dims(&self) -> usize {
        self.values.ncols()
    }

    /// Candidate `i` as a view.
    pub fn row(&self, i: usize) -> ArrayView1<'_, f64> {
        self.values.row(i)
    }
}

/// One scored grid row: the candidate bandwidth and its cross-validated RMSE
/// (`NaN` when no residual was well-defined).
#[derive(Debug, Clone, PartialEq)]
pub struct GridPoint {
    pub h: Array1<f64>,
    pub rmse: f64,
}

/// Purpose
/// -------
/// Build the default candidate grid for `summary`: per group variable, `n`
/// evenly spaced bandwidths from twice its bin width up to
/// `max_multiple x` its bin width, expanded to the full Cartesian product.
///
/// Errors
/// ------
/// - `CvError::InvalidGridSize` if `n == 0`.
/// - `CvError::InvalidMaxMultiple` if `max_multiple` is non-finite or ≤ 0.
///
/// Notes
/// -----
/// `max_multiple` below 2 still produces a grid; the per-dimension axis then
/// runs downward from `2 x width`. The grid has `n^d` rows.
pub fn bandwidth_grid(
    summary: &CondensedSummary,
    n: usize,
    max_multiple: f64,
) -> CvResult<BandwidthGrid> {
    if n == 0 {
        return Err(CvError::InvalidGridSize { n });
    }
    if !max_multiple.is_finite() {
        return Err(CvError::InvalidMaxMultiple {
            value: max_multiple,
            reason: "Multiple must be finite.",
        });
    }
    if max_multiple <= 0.0 {
        return Err(CvError::InvalidMaxMultiple {
            value: max_multiple,
            reason: "Multiple must be positive.",
        });
    }

    let dims = summary.n_groups();
    let axes: Vec<Array1<f64>> = summary
        .groups
        .iter()
        .map(|g| Array1::linspace(2.0 * g.width, max_multiple * g.width, n))
        .collect();

    let rows = n.pow(dims as u32);
    let mut values = Array2::<f64>::zeros((rows, dims));
    for r in 0..rows {
        let mut rem = r;
        for (d, axis) in axes.iter().enumerate() {
            values[[r, d]] = axis[rem % n];
            rem /= n;
        }
    }

    let names = summary.groups.iter().map(|g| g.name.clone()).collect();
    Ok(BandwidthGrid { names, values })
}

/// Purpose
/// -------
/// Score every candidate in `grid` with [`loocv_rmse`], preserving row order.
///
/// Parameters
/// ----------
/// - `grid`: candidates to score; `None` builds the default grid
///   ([`DEFAULT_GRID_POINTS`] points per dimension up to
///   [`DEFAULT_MAX_MULTIPLE`] times each width).
/// - `var`: response column, `None` for the first summary column.
///
/// Returns
/// -------
/// One [`GridPoint`] per grid row, in grid order. Uninformative candidates
/// score `NaN` and stay in place.
///
/// Errors
/// ------
/// - `CvError::GridDimensionMismatch` if the grid was built for a different
///   number of group variables.
/// - Anything [`loocv_rmse`] raises for the first failing candidate.
pub fn rmse_grid<S: Smoother>(
    summary: &CondensedSummary,
    grid: Option<&BandwidthGrid>,
    var: Option<&str>,
    smoother: &S,
) -> CvResult<Vec<GridPoint>> {
    let default_grid;
    let grid = match grid {
        Some(g) => g,
        None => {
            default_grid = bandwidth_grid(summary, DEFAULT_GRID_POINTS, DEFAULT_MAX_MULTIPLE)?;
            &default_grid
        }
    };
    if grid.n_dims() != summary.n_groups() {
        return Err(CvError::GridDimensionMismatch {
            expected: summary.n_groups(),
            actual: grid.n_dims(),
        });
    }

    let mut scored = Vec::with_capacity(grid.n_rows());
    for r in 0..grid.n_rows() {
        let h = grid.row(r);
        let rmse = loocv_rmse(summary, h, var, smoother)?;
        scored.push(GridPoint { h: h.to_owned(), rmse });
    }
    Ok(scored)
}
