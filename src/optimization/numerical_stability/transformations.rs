//! Numerical stability utilities.
//!
//! Provides safe implementations of common nonlinear transforms
//! that are prone to overflow/underflow in naïve form.
//! The functions here follow guarded strategies similar to those
//! in major ML libraries (e.g. PyTorch, TensorFlow), using explicit
//! cutoffs (`x > 20.0`) to keep `f64` arithmetic in a well-conditioned regime.
//!
//! # Provided items
//! - [`safe_softplus(x)`]: stable version of `ln(1 + exp(x))`,
//!   mapping ℝ → (0, ∞) without overflow.
//! - [`safe_softplus_inv(x)`]: inverse of softplus, mapping
//!   (0, ∞) → ℝ without catastrophic cancellation.
//! - [`relative_distance(x, y)`]: mean element-wise relative distance
//!   between two vectors, used to detect estimates pinned at a boundary.
//!
//! # Rationale
//! The softplus pair is the building block for lower-bounded search spaces:
//! a bandwidth constrained to `h > w` is searched as the unconstrained
//! `θ = softplus⁻¹(h/w − 1)`, so the solver never sees the bound.
use ndarray::ArrayView1;

/// Numerically stable softplus: `softplus(x) = ln(1 + exp(x))`.
///
/// Computes softplus without overflow for large positive `x` and
/// with good precision for large negative `x`. This implementation
/// uses a simple piecewise guard:
///
/// - For sufficiently large `x`, `softplus(x) ≈ x + ln1p(exp(-x)) ≈ x`.
/// - Otherwise, it falls back to `ln1p(exp(x))`.
///
/// The cutoff used here (`x > 20.0`) is a practical threshold that
/// keeps the calculation in a well-conditioned regime for `f64`
/// (similar to the strategy used in common ML libraries like PyTorch).
///
/// # Parameters
/// - `x`: real input
///
/// # Returns
/// - `softplus(x)` as `f64`.
pub fn safe_softplus(x: f64) -> f64 {
    if x > 20.0 { x } else { x.exp().ln_1p() }
}

/// Stable inverse of softplus on `(0, ∞)`: solves for `t` in
/// `softplus(t) = x`, returning `t = ln(exp(x) - 1)`.
///
/// Direct evaluation of `ln(exp(x) - 1)` can overflow or lose precision.
/// This implementation mirrors the guarded strategy of `safe_softplus`:
///
/// - For sufficiently large `x`, `exp(-x)` is tiny and
///   `ln(exp(x) - 1) ≈ x + ln(1 - exp(-x)) ≈ x`.
/// - Otherwise, it uses `ln(expm1(x))`.
///
/// The cutoff (`x > 20.0`) is chosen for numerical robustness with `f64`.
///
/// # Parameters
/// - `x`: a positive real (the softplus output), must be finite and `> 0`.
///
/// # Returns
/// - `t` such that `softplus(t) = x`.
pub fn safe_softplus_inv(x: f64) -> f64 {
    if x > 20.0 { x } else { x.exp_m1().ln() }
}

/// Mean element-wise relative distance between two vectors:
/// `mean_i |x_i - y_i| / |x_i + y_i|`.
///
/// Symmetric in its arguments and scale-free, which makes it suitable for
/// comparing a fitted bandwidth against the bin widths that bound it from
/// below: a small value means the estimate sits essentially on the bound.
///
/// # Parameters
/// - `x`, `y`: vectors of equal length. Lengths must match; this is
///   enforced by upstream validation, not here.
///
/// # Returns
/// - The mean relative distance as `f64`. `NaN` when the vectors are empty
///   or when some `x_i + y_i == 0` with `x_i == y_i` (0/0); `inf` leaks in
///   only if `x_i + y_i == 0` with `x_i != y_i`, which cannot happen for
///   positive inputs.
pub fn relative_distance(x: ArrayView1<'_, f64>, y: ArrayView1<'_, f64>) -> f64 {
    let num = (&x - &y).mapv(f64::abs);
    let den = (&x + &y).mapv(f64::abs);
    (num / den).mean().unwrap_or(f64::NAN)
}
