//! minimizer::builders — L-BFGS solver construction helpers.
//!
//! Purpose
//! -------
//! Provide small builders for the L-BFGS solvers used by the bandwidth
//! search. These helpers hide Argmin's generic wiring and apply crate-level
//! options (tolerances, memory size) so higher-level code can request a
//! configured solver without touching Argmin-specific types.
//!
//! Key behaviors
//! -------------
//! - Construct L-BFGS solvers with either Hager-Zhang or More-Thuente line
//!   search, based on crate-level aliases.
//! - Apply optional gradient and cost-change tolerances from
//!   [`SearchOptions`] via a shared configuration helper.
//! - Leave the initial parameter vector and maximum iterations to the
//!   runner layer, keeping these builders side-effect free.
//!
//! Invariants & assumptions
//! ------------------------
//! - All solvers operate on the canonical numeric types [`Theta`], [`Grad`],
//!   and [`Cost`] as defined in [`minimizer::types`](crate::optimization::minimizer::types).
//! - The L-BFGS memory is either provided via `opts.lbfgs_mem` or defaults
//!   to [`DEFAULT_LBFGS_MEM`].
//! - Invalid tolerances passed into Argmin's `with_tolerance_grad` /
//!   `with_tolerance_cost` surface as [`OptError`](crate::optimization::errors::OptError)
//!   via the crate's `From<Error>` implementation.
//!
//! Downstream usage
//! ----------------
//! - [`minimize`](crate::optimization::minimizer::api::minimize) picks a
//!   builder based on the configured [`LineSearcher`](super::traits::LineSearcher)
//!   and hands the solver to `run_lbfgs` together with the adapted problem.
use argmin::solver::quasinewton::LBFGS;

use crate::optimization::{
    errors::OptResult,
    minimizer::{
        traits::SearchOptions,
        types::{
            Cost, DEFAULT_LBFGS_MEM, Grad, HagerZhangLS, LbfgsHagerZhang, LbfgsMoreThuente,
            MoreThuenteLS, Theta,
        },
    },
};

/// build_optimizer_hager_zhang — construct L-BFGS with Hager-Zhang line search.
///
/// Purpose
/// -------
/// Build an [`LbfgsHagerZhang`] solver with the crate's standard numeric
/// types and any tolerances present in [`SearchOptions`], leaving initial
/// parameters and iteration limits to the caller.
///
/// Parameters
/// ----------
/// - `opts`: `&SearchOptions`
///   Search options. This builder consults:
///   - `opts.lbfgs_mem`: optional L-BFGS history size; when `None`,
///     [`DEFAULT_LBFGS_MEM`] is used.
///   - `opts.tols.tol_grad` and `opts.tols.tol_cost`: optional tolerances
///     wired into the solver.
///
/// Returns
/// -------
/// `OptResult<LbfgsHagerZhang>`
///   - `Ok(solver)` with any configured tolerances applied.
///   - `Err(e)` if Argmin rejects a tolerance setting.
///
/// Errors
/// ------
/// - `OptError` (via `From<argmin::core::Error>`) when
///   `with_tolerance_grad` or `with_tolerance_cost` rejects a value.
///
/// Notes
/// -----
/// - This function does not set `theta0` or `max_iters`; the runner applies
///   those when executing the solve.
pub fn build_optimizer_hager_zhang(opts: &SearchOptions) -> OptResult<LbfgsHagerZhang> {
    let hager_zhang = HagerZhangLS::new();
    let mem = opts.lbfgs_mem.unwrap_or(DEFAULT_LBFGS_MEM);
    let lbfgs = LbfgsHagerZhang::new(hager_zhang, mem);
    configure_lbfgs(lbfgs, opts)
}

/// build_optimizer_more_thuente — construct L-BFGS with More-Thuente line search.
///
/// Same contract as [`build_optimizer_hager_zhang`], with the More-Thuente
/// line-search strategy instead. More-Thuente is the crate default because
/// it tolerates the mild non-smoothness of finite-difference gradients
/// better in practice.
pub fn build_optimizer_more_thuente(opts: &SearchOptions) -> OptResult<LbfgsMoreThuente> {
    let more_thuente = MoreThuenteLS::new();
    let mem = opts.lbfgs_mem.unwrap_or(DEFAULT_LBFGS_MEM);
    let lbfgs = LbfgsMoreThuente::new(more_thuente, mem);
    configure_lbfgs(lbfgs, opts)
}

/// configure_lbfgs — apply optional tolerances to an L-BFGS solver.
///
/// Generic over the line-search type `L` so both builders share the wiring.
/// When a tolerance is `None` the corresponding `with_tolerance_*` method is
/// not called and Argmin's default stays in effect.
///
/// # Errors
/// - `OptError` (via `From<argmin::core::Error>`) when Argmin rejects a
///   tolerance value.
pub fn configure_lbfgs<L>(
    mut solver: LBFGS<L, Theta, Grad, Cost>, opts: &SearchOptions,
) -> OptResult<LBFGS<L, Theta, Grad, Cost>> {
    if let Some(g) = opts.tols.tol_grad {
        solver = solver.with_tolerance_grad(g)?;
    }
    if let Some(c) = opts.tols.tol_cost {
        solver = solver.with_tolerance_cost(c)?;
    }
    Ok(solver)
}
