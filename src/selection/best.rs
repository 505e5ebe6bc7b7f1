//! Entry point for the cross-validated bandwidth search.
//!
//! `best_bandwidth` wires the pieces together: it resolves the response
//! column, maps the starting bandwidth into unconstrained space, runs the
//! L-BFGS minimizer on the leave-one-out RMSE, and decodes the result back
//! into bandwidth space together with convergence diagnostics and warnings.
use ndarray::Array1;

use crate::evaluation::smoother::Smoother;
use crate::optimization::{
    errors::{OptError, OptResult},
    minimizer::minimize,
    numerical_stability::relative_distance,
};
use crate::selection::{
    options::{DEFAULT_INIT_MULTIPLE, SelectionOptions},
    problem::BandwidthProblem,
};
use crate::summary::CondensedSummary;

/// Relative distance below which a fitted bandwidth counts as sitting on
/// its lower bound (0.1%).
pub const LOWER_BOUND_REL_TOL: f64 = 1e-3;

/// Non-fatal findings about a completed bandwidth search.
///
/// Warnings are carried on the [`BandwidthFit`] and also emitted through
/// [`log::warn!`] so library users with a logger installed see them without
/// inspecting the result.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionWarning {
    /// The solver stopped for a reason other than meeting a tolerance
    /// (e.g. the iteration cap). The estimate is usable but approximate.
    NonConvergence { status: String },

    /// The fitted bandwidth is within [`LOWER_BOUND_REL_TOL`] relative
    /// distance of the bin widths. The cross-validation optimum sits at the
    /// boundary, so the data do not support smoothing beyond the bin scale.
    NearLowerBound { rel_dist: f64 },
}

impl std::fmt::Display for SelectionWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SelectionWarning::NonConvergence { status } => {
                write!(f, "Bandwidth search did not converge: {status}")
            }
            SelectionWarning::NearLowerBound { rel_dist } => {
                write!(
                    f,
                    "Fitted bandwidth is within {rel_dist:.2e} relative distance of the bin \
                     widths; the optimum sits on the lower bound"
                )
            }
        }
    }
}

/// Result of a bandwidth search.
///
/// Fields:
/// - `h_hat`: fitted bandwidth, one entry per grouping variable in
///   declaration order, always at or above the bin widths.
/// - `rmse`: leave-one-out RMSE at `h_hat`.
/// - `evaluations`: number of criterion evaluations the solver recorded,
///   always at least 1 (the starting point is always scored).
/// - `iterations`: solver iterations.
/// - `converged`: whether the solver stopped on a tolerance.
/// - `status`: human-readable termination status.
/// - `grad_norm`: L2 norm of the last gradient, when one was available.
/// - `warnings`: non-fatal findings, also emitted via [`log::warn!`].
#[derive(Debug, Clone, PartialEq)]
pub struct BandwidthFit {
    pub h_hat: Array1<f64>,
    pub rmse: f64,
    pub evaluations: u64,
    pub iterations: usize,
    pub converged: bool,
    pub status: String,
    pub grad_norm: Option<f64>,
    pub warnings: Vec<SelectionWarning>,
}

/// Select the bandwidth minimizing the leave-one-out RMSE of `smoother` on
/// `summary`.
///
/// # Behavior
/// - Resolves the response column from `opts.response` (first summary
///   column when `None`).
/// - Starts from `opts.h_init` when given, otherwise from
///   [`DEFAULT_INIT_MULTIPLE`] times the bin widths.
/// - Eliminates the lower bound `h_i > w_i` via the softplus transform and
///   runs an unconstrained L-BFGS search configured by `opts.search`.
/// - Decodes the best parameters back into bandwidth space and attaches
///   [`SelectionWarning`]s for non-convergence and for estimates pinned at
///   the bin widths.
///
/// # Errors
/// - `UnknownSummaryVar` when `opts.response` names a missing column.
/// - `InitialBandwidthLength` / `InvalidInitialBandwidth` for a bad
///   `opts.h_init`.
/// - `NonFiniteCost` when the criterion has no signal (fewer than two
///   scorable rows, so every evaluation is NaN).
/// - Any solver error surfaced through the minimizer layer.
///
/// # Example
/// ```
/// use bandwidth_cv::evaluation::{errors::CvResult, Smoother};
/// use bandwidth_cv::selection::{best_bandwidth, SelectionOptions};
/// use bandwidth_cv::summary::{CondensedSummary, GroupVariable, SummaryColumn};
/// use ndarray::{array, Array1, Array2, ArrayView1, ArrayView2};
///
/// struct MeanSmoother;
///
/// impl Smoother for MeanSmoother {
///     fn smooth(
///         &self, training: &CondensedSummary, queries: ArrayView2<'_, f64>,
///         _h: ArrayView1<'_, f64>, var: &str,
///     ) -> CvResult<Array1<f64>> {
///         let mean = training
///             .column(var)
///             .map(|c| c.values.mean().unwrap_or(f64::NAN))
///             .unwrap_or(f64::NAN);
///         Ok(Array1::from_elem(queries.nrows(), mean))
///     }
/// }
///
/// let summary = CondensedSummary::new(
///     vec![GroupVariable::new("x", 0.1)?],
///     Array2::from_shape_vec((3, 1), vec![0.05, 0.15, 0.25]).unwrap(),
///     vec![SummaryColumn::new("count", array![4.0, 7.0, 5.0])?],
/// )?;
///
/// let fit = best_bandwidth(&summary, &MeanSmoother, &SelectionOptions::default())?;
/// assert!(fit.h_hat[0] > 0.1);
/// assert!(fit.evaluations >= 1);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn best_bandwidth<S: Smoother>(
    summary: &CondensedSummary, smoother: &S, opts: &SelectionOptions,
) -> OptResult<BandwidthFit> {
    let problem = BandwidthProblem::new(summary, opts.response.as_deref(), smoother)?;
    let widths = summary.widths();
    let h0 = match &opts.h_init {
        Some(h) => {
            validate_h_init(h, &widths)?;
            h.clone()
        }
        None => &widths * DEFAULT_INIT_MULTIPLE,
    };
    let theta0 = problem.theta_from_bandwidth(&h0);
    let outcome = minimize(&problem, theta0, summary, &opts.search)?;
    let h_hat = problem.bandwidth_from_theta(&outcome.theta_hat);

    let mut warnings = Vec::new();
    if !outcome.converged {
        warnings.push(SelectionWarning::NonConvergence { status: outcome.status.clone() });
    }
    let rel_dist = relative_distance(h_hat.view(), widths.view());
    if rel_dist < LOWER_BOUND_REL_TOL {
        warnings.push(SelectionWarning::NearLowerBound { rel_dist });
    }
    for warning in &warnings {
        log::warn!("{warning}");
    }

    let evaluations = outcome.fn_evals.get("cost_count").copied().unwrap_or(0).max(1);
    Ok(BandwidthFit {
        h_hat,
        rmse: outcome.value,
        evaluations,
        iterations: outcome.iterations,
        converged: outcome.converged,
        status: outcome.status,
        grad_norm: outcome.grad_norm,
        warnings,
    })
}

fn validate_h_init(h_init: &Array1<f64>, widths: &Array1<f64>) -> OptResult<()> {
    if h_init.len() != widths.len() {
        return Err(OptError::InitialBandwidthLength {
            expected: widths.len(),
            actual: h_init.len(),
        });
    }
    for (index, (value, width)) in h_init.iter().zip(widths.iter()).enumerate() {
        if !value.is_finite() {
            return Err(OptError::InvalidInitialBandwidth {
                index,
                value: *value,
                reason: "Initial bandwidth must be finite.",
            });
        }
        if value <= width {
            return Err(OptError::InvalidInitialBandwidth {
                index,
                value: *value,
                reason: "Initial bandwidth must be strictly above the bin width.",
            });
        }
    }
    Ok(())
}
