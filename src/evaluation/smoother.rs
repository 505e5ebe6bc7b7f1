//! Smoother seam between this crate and the actual smoothing backend.
//!
//! Bandwidth selection never smooths anything itself: it repeatedly asks a
//! [`Smoother`] for predictions at held-out coordinates and scores the
//! residuals. Any kernel regression, binned convolution, or local-polynomial
//! backend can plug in by implementing the single method below.

use ndarray::{Array1, ArrayView1, ArrayView2};

use crate::evaluation::errors::CvResult;
use crate::summary::CondensedSummary;

/// A smoothing backend driven by the cross-validation loop.
///
/// ## Contract
/// - Return exactly one prediction per row of `queries`, in order.
/// - Encode an undefined prediction (no mass near the query, empty training
///   set, ...) as `NaN`; the caller treats it as missing, not as an error.
/// - `h` has one strictly positive entry per group variable of `training`,
///   in declaration order.
/// - `training` is the caller's table with rows removed; implementations must
///   tolerate any row count, including zero.
/// - `var` names the summary column to predict and is guaranteed to exist in
///   the caller's table.
///
/// Use `CvError::SmootherFailure` for backend-side failures that should abort
/// scoring rather than count as a missing prediction.
pub trait Smoother {
    /// Predict `var` at each query coordinate from the training summary.
    fn smooth(
        &self,
        training: &CondensedSummary,
        queries: ArrayView2<'_, f64>,
        h: ArrayView1<'_, f64>,
        var: &str,
    ) -> CvResult<Array1<f64>>;
}
