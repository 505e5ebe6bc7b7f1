//! Leave-one-out cross-validated RMSE for a single bandwidth vector.
//!
//! Purpose
//! -------
//! Score how well a smoother, run at a given bandwidth, predicts each
//! summarised bin from all the others. Each retained row is held out in turn,
//! the smoother is retrained on the remainder (cheaply, since it only sees the
//! condensed table), and the residual at the held-out coordinate is recorded.
//! The score is the root of the mean squared residual.
//!
//! Key behaviors
//! -------------
//! - Rows with a missing (`NaN`) response value or any missing coordinate are
//!   excluded before the loop; they neither train nor score.
//! - Predictions the smoother reports as `NaN` are treated as missing and
//!   skipped, not treated as errors.
//! - If no residual is well-defined, the score is `NaN` rather than an error,
//!   so grid sweeps can record "no information here" and move on.
//!
//! Invariants & assumptions
//! ------------------------
//! - The bandwidth vector is validated here (length, finiteness, positivity)
//!   but is *not* required to sit above the bin widths; only the bandwidth
//!   search enforces that lower bound.
//! - Row order is preserved everywhere, so repeated calls on the same inputs
//!   reproduce the same floating-point result bit for bit.

use ndarray::{s, ArrayView1};

use crate::evaluation::errors::{CvError, CvResult};
use crate::evaluation::smoother::Smoother;
use crate::summary::CondensedSummary;

/// Check a bandwidth vector against a summary's dimensionality.
///
/// Shared by the scoring, grid, and search entry points.
pub(crate) fn validate_bandwidth(h: ArrayView1<'_, f64>, expected: usize) -> CvResult<()> {
    if h.len() != expected {
        return Err(CvError::BandwidthLengthMismatch { expected, actual: h.len() });
    }
    for (index, &value) in h.iter().enumerate() {
        if !value.is_finite() {
            return Err(CvError::NonFiniteBandwidth { index, value });
        }
        if value <= 0.0 {
            return Err(CvError::NonPositiveBandwidth { index, value });
        }
    }
    Ok(())
}

/// Purpose
/// -------
/// Compute the leave-one-out cross-validated RMSE of `smoother` at bandwidth
/// `h` on `summary`.
///
/// Parameters
/// ----------
/// - `summary`: condensed table to score against.
/// - `h`: bandwidth vector, one entry per group variable, in declaration
///   order.
/// - `var`: response column to validate; `None` selects the first summary
///   column.
/// - `smoother`: smoothing backend to drive.
///
/// Returns
/// -------
/// The RMSE over all well-defined held-out residuals, or `NaN` when none is
/// well-defined (fewer than two complete rows, or every prediction missing).
///
/// Errors
/// ------
/// - `CvError::UnknownSummaryVar` if `var` names a missing column.
/// - `CvError::BandwidthLengthMismatch` / `NonFiniteBandwidth` /
///   `NonPositiveBandwidth` on invalid `h`.
/// - `CvError::SmootherOutputLength` if the smoother breaks its one
///   prediction per query contract.
/// - Any error the smoother itself returns.
///
/// Notes
/// -----
/// Cost is one smoother call per retained row, each over a table one row
/// smaller than the retained set.
pub fn loocv_rmse<S: Smoother>(
    summary: &CondensedSummary,
    h: ArrayView1<'_, f64>,
    var: Option<&str>,
    smoother: &S,
) -> CvResult<f64> {
    let response = summary.response_column(var)?;
    validate_bandwidth(h, summary.n_groups())?;

    // Complete rows only: response present and every coordinate present.
    let keep: Vec<usize> = (0..summary.n_rows())
        .filter(|&i| !response.values[i].is_nan() && summary.row(i).iter().all(|v| !v.is_nan()))
        .collect();
    if keep.len() < 2 {
        return Ok(f64::NAN);
    }

    let actual: Vec<f64> = keep.iter().map(|&i| response.values[i]).collect();
    let var_name = response.name.clone();
    let filtered = summary.take_rows(&keep);

    let mut sum_sq = 0.0;
    let mut used = 0usize;
    for i in 0..filtered.n_rows() {
        let train_rows: Vec<usize> = (0..filtered.n_rows()).filter(|&j| j != i).collect();
        let training = filtered.take_rows(&train_rows);
        let query = filtered.coords.slice(s![i..i + 1, ..]);

        let pred = smoother.smooth(&training, query, h, &var_name)?;
        if pred.len() != 1 {
            return Err(CvError::SmootherOutputLength { expected: 1, actual: pred.len() });
        }

        let resid = pred[0] - actual[i];
        if resid.is_nan() {
            continue;
        }
        sum_sq += resid * resid;
        used += 1;
    }

    if used == 0 {
        return Ok(f64::NAN);
    }
    Ok((sum_sq / used as f64).sqrt())
}

#[cfg(test)]
mod tests {
    // ---- Scope ----
    // These tests cover:
    // - The residual assembly itself, checked against a hand-rolled
    //   leave-one-out loop with a training-mean predictor.
    // - Missing-data handling: excluded rows, missing predictions, and the
    //   all-missing NaN result.
    // - Bandwidth validation and smoother-contract enforcement.
    //
    // They intentionally do NOT cover:
    // - Grid sweeps (see grid.rs) or the bandwidth search (see selection).
    // - Any real smoothing backend; predictors here are deliberately trivial.

    use ndarray::{array, Array1, Array2, ArrayView2};

    use super::*;
    use crate::summary::{GroupVariable, SummaryColumn};

    /// Predicts the training mean of `var` everywhere; ignores coordinates
    /// and bandwidth.
    struct MeanSmoother;

    impl Smoother for MeanSmoother {
        fn smooth(
            &self,
            training: &CondensedSummary,
            queries: ArrayView2<'_, f64>,
            _h: ArrayView1<'_, f64>,
            var: &str,
        ) -> CvResult<Array1<f64>> {
            let column = training
                .column(var)
                .ok_or_else(|| CvError::UnknownSummaryVar { name: var.to_string() })?;
            let mean = column.values.mean().unwrap_or(f64::NAN);
            Ok(Array1::from_elem(queries.nrows(), mean))
        }
    }

    /// Every prediction is missing.
    struct NanSmoother;

    impl Smoother for NanSmoother {
        fn smooth(
            &self,
            _training: &CondensedSummary,
            queries: ArrayView2<'_, f64>,
            _h: ArrayView1<'_, f64>,
            _var: &str,
        ) -> CvResult<Array1<f64>> {
            Ok(Array1::from_elem(queries.nrows(), f64::NAN))
        }
    }

    /// Always fails, as a backend would on an internal error.
    struct FailingSmoother;

    impl Smoother for FailingSmoother {
        fn smooth(
            &self,
            _training: &CondensedSummary,
            _queries: ArrayView2<'_, f64>,
            _h: ArrayView1<'_, f64>,
            _var: &str,
        ) -> CvResult<Array1<f64>> {
            Err(CvError::SmootherFailure { reason: "backend exploded".to_string() })
        }
    }

    /// Returns two predictions per query, breaking the contract.
    struct ChattySmoother;

    impl Smoother for ChattySmoother {
        fn smooth(
            &self,
            _training: &CondensedSummary,
            queries: ArrayView2<'_, f64>,
            _h: ArrayView1<'_, f64>,
            _var: &str,
        ) -> CvResult<Array1<f64>> {
            Ok(Array1::zeros(2 * queries.nrows()))
        }
    }

    fn line_summary(values: Array1<f64>) -> CondensedSummary {
        let n = values.len();
        let coords =
            Array2::from_shape_fn((n, 1), |(i, _)| 0.05 + 0.1 * i as f64);
        CondensedSummary::new(
            vec![GroupVariable::new("x", 0.1).unwrap()],
            coords,
            vec![SummaryColumn::new("mean", values).unwrap()],
        )
        .unwrap()
    }

    fn loo_mean_rmse(values: &[f64]) -> f64 {
        let n = values.len();
        let mut sum_sq = 0.0;
        for i in 0..n {
            let rest: Vec<f64> =
                values.iter().enumerate().filter(|&(j, _)| j != i).map(|(_, &v)| v).collect();
            let mean = rest.iter().sum::<f64>() / rest.len() as f64;
            let resid = mean - values[i];
            sum_sq += resid * resid;
        }
        (sum_sq / n as f64).sqrt()
    }

    #[test]
    fn matches_direct_loo_loop_for_mean_predictor() {
        // Purpose: the scoring loop is the textbook leave-one-out recipe.
        // Given: five complete rows and the training-mean predictor.
        // Expect: RMSE equal to a direct reimplementation of the loop.

        let values = [1.0, 2.0, 4.0, 3.0, 5.0];
        let summary = line_summary(Array1::from(values.to_vec()));

        let rmse =
            loocv_rmse(&summary, array![0.3].view(), None, &MeanSmoother).unwrap();

        approx::assert_relative_eq!(rmse, loo_mean_rmse(&values), epsilon = 1e-12);
    }

    #[test]
    fn bandwidth_does_not_leak_into_mean_predictor_score() {
        // Purpose: the estimator passes h through untouched; a predictor that
        //          ignores it must score identically at any h.
        // Given: the same table scored at h=0.3 and h=30.
        // Expect: bitwise-equal RMSE.

        let summary = line_summary(array![1.0, 2.0, 4.0, 3.0, 5.0]);

        let a = loocv_rmse(&summary, array![0.3].view(), None, &MeanSmoother).unwrap();
        let b = loocv_rmse(&summary, array![30.0].view(), None, &MeanSmoother).unwrap();

        assert_eq!(a, b);
    }

    #[test]
    fn missing_responses_are_excluded_from_training_and_scoring() {
        // Purpose: a row with a missing response must behave exactly as if it
        //          were absent from the table.
        // Given: six rows with NaN responses at positions 1 and 4, and the
        //        same table with those rows dropped by hand.
        // Expect: identical RMSE.

        let with_gaps =
            line_summary(array![1.0, f64::NAN, 4.0, 3.0, f64::NAN, 5.0]);
        let dropped = line_summary(array![1.0, 4.0, 3.0, 5.0]);

        let a =
            loocv_rmse(&with_gaps, array![0.3].view(), None, &MeanSmoother).unwrap();
        let b =
            loocv_rmse(&dropped, array![0.3].view(), None, &MeanSmoother).unwrap();

        approx::assert_relative_eq!(a, b, epsilon = 1e-12);
        approx::assert_relative_eq!(
            a,
            loo_mean_rmse(&[1.0, 4.0, 3.0, 5.0]),
            epsilon = 1e-12
        );
    }

    #[test]
    fn missing_coordinates_exclude_the_row() {
        // Purpose: coordinates are needed both to train and to query, so a
        //          NaN coordinate removes the whole row.
        // Given: one NaN coordinate in an otherwise complete table.
        // Expect: same score as the table without that row.

        let mut summary = line_summary(array![1.0, 2.0, 4.0, 3.0]);
        summary.coords[[2, 0]] = f64::NAN;

        // Same rows as the survivors, coordinates aligned by hand.
        let mut trimmed = line_summary(array![1.0, 2.0, 3.0]);
        trimmed.coords[[2, 0]] = 0.35;

        let a = loocv_rmse(&summary, array![0.3].view(), None, &MeanSmoother).unwrap();
        let b = loocv_rmse(&trimmed, array![0.3].view(), None, &MeanSmoother).unwrap();

        approx::assert_relative_eq!(a, b, epsilon = 1e-12);
    }

    #[test]
    fn all_missing_predictions_give_nan_not_error() {
        // Purpose: an uninformative bandwidth is a data outcome, not a crash.
        // Given: a smoother that never produces a prediction.
        // Expect: Ok(NaN).

        let summary = line_summary(array![1.0, 2.0, 3.0]);

        let rmse = loocv_rmse(&summary, array![0.3].view(), None, &NanSmoother).unwrap();

        assert!(rmse.is_nan());
    }

    #[test]
    fn fewer_than_two_complete_rows_give_nan() {
        // Purpose: with at most one usable row there is no held-out pair to
        //          score, so the result is missing.
        // Given: a two-row table with one NaN response.
        // Expect: Ok(NaN) without calling the smoother on an empty table.

        let summary = line_summary(array![1.0, f64::NAN]);

        let rmse =
            loocv_rmse(&summary, array![0.3].view(), None, &MeanSmoother).unwrap();

        assert!(rmse.is_nan());
    }

    #[test]
    fn bandwidth_vector_is_validated() {
        // Purpose: shape and value checks on h happen before any smoothing.
        // Given: wrong length, NaN entry, and zero entry.
        // Expect: the matching CvError for each.

        let summary = line_summary(array![1.0, 2.0, 3.0]);

        assert_eq!(
            loocv_rmse(&summary, array![0.3, 0.3].view(), None, &MeanSmoother).unwrap_err(),
            CvError::BandwidthLengthMismatch { expected: 1, actual: 2 }
        );

        let err =
            loocv_rmse(&summary, array![f64::NAN].view(), None, &MeanSmoother).unwrap_err();
        assert!(matches!(err, CvError::NonFiniteBandwidth { index: 0, .. }));

        assert_eq!(
            loocv_rmse(&summary, array![0.0].view(), None, &MeanSmoother).unwrap_err(),
            CvError::NonPositiveBandwidth { index: 0, value: 0.0 }
        );
    }

    #[test]
    fn unknown_response_column_is_an_error() {
        // Purpose: asking for a column the condensation never produced must
        //          fail loudly, not silently fall back to the default.
        // Given: a table with only a "mean" column.
        // Expect: UnknownSummaryVar("sd").

        let summary = line_summary(array![1.0, 2.0, 3.0]);

        assert_eq!(
            loocv_rmse(&summary, array![0.3].view(), Some("sd"), &MeanSmoother).unwrap_err(),
            CvError::UnknownSummaryVar { name: "sd".to_string() }
        );
    }

    #[test]
    fn smoother_errors_propagate() {
        // Purpose: backend failures abort scoring with the backend's reason.
        // Given: a smoother that always fails.
        // Expect: SmootherFailure passed through unchanged.

        let summary = line_summary(array![1.0, 2.0, 3.0]);

        assert_eq!(
            loocv_rmse(&summary, array![0.3].view(), None, &FailingSmoother).unwrap_err(),
            CvError::SmootherFailure { reason: "backend exploded".to_string() }
        );
    }

    #[test]
    fn wrong_prediction_count_is_rejected() {
        // Purpose: the one-prediction-per-query contract is enforced.
        // Given: a smoother returning two predictions per query.
        // Expect: SmootherOutputLength { expected: 1, actual: 2 }.

        let summary = line_summary(array![1.0, 2.0, 3.0]);

        assert_eq!(
            loocv_rmse(&summary, array![0.3].view(), None, &ChattySmoother).unwrap_err(),
            CvError::SmootherOutputLength { expected: 1, actual: 2 }
        );
    }
}
