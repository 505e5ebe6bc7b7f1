//! High-level entry point for minimizing a user-provided `Criterion`.
//!
//! This selects an L-BFGS solver with either Hager-Zhang or More-Thuente line
//! search, wraps the criterion in an `ArgMinAdapter`, and delegates the run to
//! `run_lbfgs`.
use crate::optimization::{
    errors::OptResult,
    minimizer::{
        MinimizeOutcome, Theta,
        adapter::ArgMinAdapter,
        builders::{build_optimizer_hager_zhang, build_optimizer_more_thuente},
        run::run_lbfgs,
        traits::{Criterion, LineSearcher, SearchOptions},
    },
};

/// Minimize a criterion `f(θ)` using L-BFGS with the chosen line search.
///
/// # Behavior
/// - Validates the initial guess via `f.check(theta0, data)`.
/// - Wraps `(f, data)` in an `ArgMinAdapter` exposing `f` to `argmin` as a
///   minimization problem, finite-differencing the gradient when the
///   criterion does not provide one.
/// - Builds an L-BFGS solver with either **Hager-Zhang** or **More-Thuente**
///   line search based on `opts.line_searcher`.
/// - Calls `run_lbfgs`, which configures the executor (initial params,
///   max iters, optional observers) and returns a `MinimizeOutcome`.
///
/// # Parameters
/// - `f`: The criterion implementing [`Criterion`].
/// - `theta0`: Initial parameter vector.
/// - `data`: Criterion data passed through to `value`/`grad`.
/// - `opts`: Search options (tolerances, line search choice, verbosity, etc.).
///
/// # Errors
/// - Propagates any error from `f.check`.
/// - Propagates builder errors from `build_optimizer_*`.
/// - Propagates runtime errors from `run_lbfgs` (e.g., line search failures).
///
/// # Returns
/// A [`MinimizeOutcome`] containing `theta_hat`, the best value `f(θ̂)`,
/// termination status, iteration counts, function evaluation counts, and
/// optionally the gradient norm.
///
/// # Example
/// ```
/// use bandwidth_cv::optimization::errors::OptResult;
/// use bandwidth_cv::optimization::minimizer::{
///     minimize, Criterion, LineSearcher, SearchOptions, Tolerances,
/// };
/// use ndarray::{array, Array1};
///
/// struct Quadratic;
///
/// impl Criterion for Quadratic {
///     type Data = ();
///     fn value(&self, theta: &Array1<f64>, _: &()) -> OptResult<f64> {
///         Ok(theta.dot(theta))
///     }
///     fn check(&self, _: &Array1<f64>, _: &()) -> OptResult<()> {
///         Ok(())
///     }
/// }
///
/// let opts = SearchOptions::new(
///     Tolerances::new(Some(1e-6), None, Some(200))?,
///     LineSearcher::MoreThuente,
///     false,
///     None,
/// )?;
/// let out = minimize(&Quadratic, array![0.1, -0.2], &(), &opts)?;
/// assert!(out.converged);
/// assert!(out.value < 1e-6);
/// # Ok::<(), bandwidth_cv::optimization::errors::OptError>(())
/// ```
pub fn minimize<F: Criterion>(
    f: &F, theta0: Theta, data: &F::Data, opts: &SearchOptions,
) -> OptResult<MinimizeOutcome> {
    f.check(&theta0, data)?;
    let problem = ArgMinAdapter::new(f, data);
    match opts.line_searcher {
        LineSearcher::MoreThuente => {
            let solver = build_optimizer_more_thuente(opts)?;
            run_lbfgs(theta0, opts, problem, solver)
        }
        LineSearcher::HagerZhang => {
            let solver = build_optimizer_hager_zhang(opts)?;
            run_lbfgs(theta0, opts, problem, solver)
        }
    }
}
