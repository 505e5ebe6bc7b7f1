//! minimizer::finite_diff — finite-difference gradient helper.
//!
//! Purpose
//! -------
//! Provide a forward-difference gradient approximation around a parameter
//! vector, together with error capture and validation, so that the rest of
//! the optimizer can request derivatives without depending directly on the
//! `finitediff` API.
//!
//! Key behaviors
//! -------------
//! - Compute forward-difference gradients with error capture and
//!   post-hoc validation via [`run_fd_diff`].
//!
//! Invariants & assumptions
//! ------------------------
//! - Parameter vectors and gradients are represented as `ndarray`
//!   containers over `f64` (`Theta`, `Grad`).
//! - Any error raised by the objective during finite differencing is
//!   routed into the shared `closure_err` cell and treated as a hard
//!   failure for the gradient computation.
//! - Gradients returned from this module are guaranteed to satisfy
//!   [`validate_grad`].
//!
//! Conventions
//! -----------
//! - Finite differences are taken with respect to the unconstrained
//!   parameter vector `Theta`; any reparameterization is handled by
//!   higher layers.
//! - Domain errors are surfaced as [`OptError`] via `OptResult<T>`;
//!   Argmin's [`Error`] is confined to the thin boundary where
//!   finite-difference closures are invoked.
//!
//! Downstream usage
//! ----------------
//! - The optimizer adapter calls [`run_fd_diff`] when a [`Criterion`]
//!   implementation does not provide an analytic gradient and the central
//!   difference it tries first fails validation or raises an error.
//!
//! Testing notes
//! -------------
//! - Unit tests cover successful gradients, closure-error propagation, and
//!   validation failures on non-finite gradients.
//!
//! [`OptError`]: crate::optimization::errors::OptError
//! [`Criterion`]: crate::optimization::minimizer::traits::Criterion
use crate::optimization::{
    errors::OptResult,
    minimizer::{validation::validate_grad, Grad, Theta},
};
use argmin::core::Error;
use finitediff::FiniteDiff;
use std::cell::RefCell;

/// run_fd_diff — forward-difference gradient with error capture and validation.
///
/// Purpose
/// -------
/// Compute a forward-difference approximation to the gradient of a scalar
/// objective at `theta`, while capturing any error raised inside the
/// evaluation closure and enforcing basic shape/finiteness invariants on
/// the resulting gradient.
///
/// Parameters
/// ----------
/// - `theta`: `&Theta`
///   Point in parameter space at which the gradient should be
///   approximated. The length of `theta` defines the expected gradient
///   dimension.
/// - `func`: `&G`
///   Objective function mapping `theta` to a scalar value. This is the
///   closure passed to `forward_diff`; it is assumed to route any
///   evaluation errors into `closure_err` and return `NaN` in that case.
/// - `closure_err`: `&RefCell<Option<Error>>`
///   Shared cell used to capture an [`argmin::core::Error`] raised inside
///   `func` while the finite-difference routine is running. This helper
///   clears the cell on entry and inspects it after the FD call.
///
/// Returns
/// -------
/// `OptResult<Grad>`
///   - `Ok(grad)` when finite differencing succeeds, no error was
///     captured in `closure_err`, and the resulting gradient passes
///     [`validate_grad`].
///   - `Err(e)` when either `func` signaled an error via `closure_err`
///     or the gradient fails validation.
///
/// Errors
/// ------
/// - `OptError` (via `impl From<Error> for OptError`)
///   Returned when `closure_err` contains an Argmin error captured from
///   inside `func`.
/// - `OptError::GradientDimMismatch`
///   Returned by [`validate_grad`] when the finite-difference gradient
///   length does not match `theta.len()`.
/// - `OptError::InvalidGradient`
///   Returned by [`validate_grad`] when any gradient element is NaN or
///   infinite.
///
/// Panics
/// ------
/// - Never panics.
///
/// Notes
/// -----
/// - This helper assumes that the caller has wrapped the original
///   objective in a closure that writes any runtime error into
///   `closure_err` and returns `NaN`. If no error is written, the FD
///   path is assumed to have evaluated successfully.
/// - Only the first gradient element failing validation is reported by
///   [`validate_grad`].
///
/// Examples
/// --------
/// ```rust
/// # use std::cell::RefCell;
/// # use argmin::core::Error;
/// # use ndarray::Array1;
/// # use bandwidth_cv::optimization::minimizer::Theta;
/// # use bandwidth_cv::optimization::minimizer::finite_diff::run_fd_diff;
/// let theta: Theta = Array1::from(vec![0.0_f64, 1.0]);
/// let closure_err: RefCell<Option<Error>> = RefCell::new(None);
///
/// // Simple quadratic objective with no internal error path.
/// let f = |x: &Theta| x.dot(x);
///
/// let grad = run_fd_diff(&theta, &f, &closure_err).unwrap();
/// assert_eq!(grad.len(), theta.len());
/// ```
pub fn run_fd_diff<G: Fn(&Theta) -> f64>(
    theta: &Theta, func: &G, closure_err: &RefCell<Option<Error>>,
) -> OptResult<Grad> {
    closure_err.replace(None);
    let fd_grad = theta.forward_diff(func);
    let dim = theta.len();
    if let Some(err) = closure_err.take() {
        return Err(err.into());
    }
    validate_grad(&fd_grad, dim)?;
    Ok(fd_grad)
}
