//! The cross-validation objective as a solver-ready criterion.
//!
//! [`BandwidthProblem`] owns everything the solver needs that is not data:
//! the per-dimension bin widths (the lower bounds), the resolved response
//! column name, and the smoother. The condensed summary itself travels as
//! the criterion's `Data` payload.
//!
//! The lower bound `h_i > w_i` is eliminated rather than enforced: the
//! solver works on unconstrained `θ` and the problem maps
//! `h_i = w_i · (1 + softplus(θ_i))` before every evaluation. The search can
//! push `θ_i` arbitrarily far down without ever producing an invalid
//! bandwidth.
use ndarray::Array1;

use crate::evaluation::{loocv::loocv_rmse, smoother::Smoother};
use crate::optimization::{
    errors::{OptError, OptResult},
    minimizer::{Cost, Criterion, Theta},
    numerical_stability::{safe_softplus, safe_softplus_inv},
};
use crate::summary::CondensedSummary;

/// Leave-one-out RMSE as a function of unconstrained bandwidth parameters.
///
/// Construct with [`BandwidthProblem::new`], which resolves the response
/// column once so every later evaluation can assume it exists. The same
/// summary must then be passed as the data payload when minimizing;
/// the stored widths are read from it at construction time.
#[derive(Debug)]
pub struct BandwidthProblem<'a, S: Smoother> {
    widths: Array1<f64>,
    var: String,
    smoother: &'a S,
}

impl<'a, S: Smoother> BandwidthProblem<'a, S> {
    /// Resolve the response column and capture the bin widths.
    ///
    /// # Errors
    /// - `UnknownSummaryVar` when `var` names a column the summary does not
    ///   have.
    pub fn new(summary: &CondensedSummary, var: Option<&str>, smoother: &'a S) -> OptResult<Self> {
        let response = summary.response_column(var)?;
        Ok(Self { widths: summary.widths(), var: response.name.clone(), smoother })
    }

    /// Map unconstrained parameters into bandwidths:
    /// `h_i = w_i · (1 + softplus(θ_i))`.
    ///
    /// Every `θ` in ℝⁿ lands strictly above the bin widths in exact
    /// arithmetic; for very negative `θ_i` the result rounds to `w_i`
    /// itself, which downstream code accepts.
    pub fn bandwidth_from_theta(&self, theta: &Theta) -> Array1<f64> {
        self.widths
            .iter()
            .zip(theta.iter())
            .map(|(w, t)| w * (1.0 + safe_softplus(*t)))
            .collect()
    }

    /// Inverse of [`bandwidth_from_theta`](Self::bandwidth_from_theta):
    /// `θ_i = softplus⁻¹(h_i / w_i − 1)`.
    ///
    /// Requires `h_i > w_i` strictly; at or below the width the inverse is
    /// not defined (−∞ or NaN). Starting points are validated upstream.
    pub fn theta_from_bandwidth(&self, h: &Array1<f64>) -> Theta {
        self.widths
            .iter()
            .zip(h.iter())
            .map(|(w, h)| safe_softplus_inv(h / w - 1.0))
            .collect()
    }
}

impl<'a, S: Smoother> Criterion for BandwidthProblem<'a, S> {
    type Data = CondensedSummary;

    /// Leave-one-out RMSE at the bandwidth encoded by `theta`.
    ///
    /// A summary whose scorable rows all drop out yields `NaN`, which the
    /// adapter rejects as `NonFiniteCost`; the search cannot proceed on a
    /// criterion with no signal.
    fn value(&self, theta: &Theta, data: &CondensedSummary) -> OptResult<Cost> {
        let h = self.bandwidth_from_theta(theta);
        let rmse = loocv_rmse(data, h.view(), Some(&self.var), self.smoother)?;
        Ok(rmse)
    }

    fn check(&self, theta: &Theta, _data: &CondensedSummary) -> OptResult<()> {
        if theta.len() != self.widths.len() {
            return Err(OptError::ThetaLengthMismatch {
                expected: self.widths.len(),
                actual: theta.len(),
            });
        }
        for (index, value) in theta.iter().enumerate() {
            if !value.is_finite() {
                return Err(OptError::InvalidThetaInput { index, value: *value });
            }
        }
        Ok(())
    }
}
