//! Integration tests for the condensed-summary bandwidth pipeline.
//!
//! Purpose
//! -------
//! - Validate the end-to-end flow: from a validated condensed summary,
//!   through leave-one-out scoring and grid sweeps, to the numerical
//!   bandwidth search with its diagnostics and warnings.
//! - Exercise a realistic Gaussian kernel smoother (optionally
//!   count-weighted) rather than the trivial predictors the unit tests
//!   lean on.
//!
//! Coverage
//! --------
//! - `summary`:
//!   - One- and two-dimensional tables, extra summary columns, and missing
//!     values in both coordinates and responses.
//! - `evaluation::loocv`:
//!   - Agreement with a hand-rolled leave-one-out loop, missing-row
//!     exclusion, response-column selection, and NaN scores.
//! - `evaluation::grid`:
//!   - Default and explicit sweeps, Cartesian expansion order, and
//!     estimator agreement per grid row.
//! - `selection`:
//!   - Full searches with default and capped solver settings, improvement
//!     over the starting point, bit-for-bit reproducibility, and warning
//!     attachment.
//!
//! Exclusions
//! ----------
//! - Solver-level edge cases (tolerance validation, finite-difference
//!   fallback internals) — covered by unit tests in
//!   `optimization::minimizer`.
//! - Production smoothing backends; the kernel here is a test double that
//!   is realistic but deliberately small.
use bandwidth_cv::{
    evaluation::{
        errors::{CvError, CvResult},
        grid::{bandwidth_grid, rmse_grid},
        loocv::loocv_rmse,
        smoother::Smoother,
    },
    optimization::{
        errors::OptError,
        minimizer::{LineSearcher, SearchOptions, Tolerances},
    },
    selection::{best_bandwidth, SelectionOptions, SelectionWarning, DEFAULT_INIT_MULTIPLE},
    summary::{CondensedSummary, GroupVariable, SummaryColumn},
};
use ndarray::{array, Array1, Array2, ArrayView1, ArrayView2};

/// Purpose
/// -------
/// Provide a small but realistic smoothing backend: a Nadaraya–Watson
/// regression with a product Gaussian kernel over the bin-centre
/// coordinates, optionally weighting each training bin by one of its
/// summary columns (typically the bin count).
///
/// Key behaviors
/// -------------
/// - For query `q`, training row `j` contributes weight
///   `w_j = base_j * exp(-0.5 * Σ_d ((q_d - x_jd) / h_d)^2)` where `base_j`
///   is the weight column entry (or 1 when unweighted).
/// - Training rows with a missing response or a non-finite base weight are
///   skipped rather than poisoning the sums.
/// - A query with no usable training mass predicts `NaN`, which the
///   cross-validation loop treats as a missing residual.
///
/// Invariants
/// ----------
/// - Tolerates empty training tables (every prediction is `NaN`), as the
///   `Smoother` contract requires.
struct GaussianSmoother {
    weights: Option<String>,
}

impl GaussianSmoother {
    fn unweighted() -> Self {
        Self { weights: None }
    }

    fn count_weighted() -> Self {
        Self { weights: Some("count".to_string()) }
    }
}

impl Smoother for GaussianSmoother {
    fn smooth(
        &self,
        training: &CondensedSummary,
        queries: ArrayView2<'_, f64>,
        h: ArrayView1<'_, f64>,
        var: &str,
    ) -> CvResult<Array1<f64>> {
        let response = training
            .column(var)
            .ok_or_else(|| CvError::UnknownSummaryVar { name: var.to_string() })?;
        let base = match &self.weights {
            Some(name) => Some(
                training
                    .column(name)
                    .ok_or_else(|| CvError::UnknownSummaryVar { name: name.clone() })?,
            ),
            None => None,
        };

        let mut out = Array1::from_elem(queries.nrows(), f64::NAN);
        for (q_idx, query) in queries.outer_iter().enumerate() {
            let mut num = 0.0;
            let mut den = 0.0;
            for j in 0..training.n_rows() {
                let y = response.values[j];
                if y.is_nan() {
                    continue;
                }
                let base_weight = base.map(|c| c.values[j]).unwrap_or(1.0);
                if !base_weight.is_finite() {
                    continue;
                }
                let z: f64 = query
                    .iter()
                    .zip(training.row(j).iter())
                    .zip(h.iter())
                    .map(|((q, x), hd)| {
                        let d = (q - x) / hd;
                        d * d
                    })
                    .sum();
                let w = base_weight * (-0.5 * z).exp();
                num += w * y;
                den += w;
            }
            if den > 0.0 {
                out[q_idx] = num / den;
            }
        }
        Ok(out)
    }
}

/// Purpose
/// -------
/// Build the workhorse one-dimensional fixture: eight bins of width 0.1
/// whose "mean" column zigzags around 2.0, so kernel smoothing genuinely
/// reduces the leave-one-out error as the bandwidth grows.
///
/// Returns
/// -------
/// - A summary with columns `["mean", "count"]`; the first column is the
///   default response, the second feeds the count-weighted smoother.
fn noisy_constant_summary() -> CondensedSummary {
    let coords = Array2::from_shape_fn((8, 1), |(i, _)| 0.05 + 0.1 * i as f64);
    CondensedSummary::new(
        vec![GroupVariable::new("x", 0.1).unwrap()],
        coords,
        vec![
            SummaryColumn::new("mean", array![2.3, 1.6, 2.25, 1.8, 2.35, 1.7, 2.2, 1.75])
                .unwrap(),
            SummaryColumn::new("count", array![14.0, 9.0, 12.0, 11.0, 8.0, 13.0, 10.0, 12.0])
                .unwrap(),
        ],
    )
    .expect("fixture summary is valid")
}

/// Six bins with a count column first and a steep "mean" column second,
/// for response-selection checks. Counts and means are deliberately on
/// different scales so their scores cannot coincide.
fn count_mean_summary() -> CondensedSummary {
    let coords = Array2::from_shape_fn((6, 1), |(i, _)| 0.05 + 0.1 * i as f64);
    CondensedSummary::new(
        vec![GroupVariable::new("x", 0.1).unwrap()],
        coords,
        vec![
            SummaryColumn::new("count", array![5.0, 9.0, 4.0, 7.0, 6.0, 8.0]).unwrap(),
            SummaryColumn::new("mean", array![1.2, 1.9, 3.1, 3.8, 5.2, 5.9]).unwrap(),
        ],
    )
    .expect("fixture summary is valid")
}

/// A 3x3 two-dimensional table (widths 0.1 and 0.5) whose response is a
/// mildly perturbed plane, for multi-dimensional sweeps.
fn surface_summary() -> CondensedSummary {
    let mut coords = Array2::<f64>::zeros((9, 2));
    for iy in 0..3 {
        for ix in 0..3 {
            coords[[3 * iy + ix, 0]] = 0.05 + 0.1 * ix as f64;
            coords[[3 * iy + ix, 1]] = 0.25 + 0.5 * iy as f64;
        }
    }
    CondensedSummary::new(
        vec![
            GroupVariable::new("x", 0.1).unwrap(),
            GroupVariable::new("y", 0.5).unwrap(),
        ],
        coords,
        vec![
            SummaryColumn::new("mean", array![1.4, 1.5, 1.8, 1.8, 2.1, 2.2, 2.4, 2.5, 2.8])
                .unwrap(),
        ],
    )
    .expect("fixture summary is valid")
}

/// Purpose
/// -------
/// Recompute the leave-one-out RMSE of the unweighted Gaussian smoother
/// from first principles, without going through the crate: hold out each
/// row, predict it from the rest with the same kernel arithmetic, and
/// average the squared residuals.
///
/// Invariants
/// ----------
/// - Assumes every row of `summary` is complete and uses its first summary
///   column as the response, mirroring the defaults of `loocv_rmse`.
fn hand_rolled_kernel_loocv(summary: &CondensedSummary, h: f64) -> f64 {
    let values = &summary.columns[0].values;
    let n = summary.n_rows();
    let mut sum_sq = 0.0;
    for i in 0..n {
        let mut num = 0.0;
        let mut den = 0.0;
        for j in 0..n {
            if j == i {
                continue;
            }
            let d = (summary.coords[[i, 0]] - summary.coords[[j, 0]]) / h;
            let w = (-0.5 * d * d).exp();
            num += w * values[j];
            den += w;
        }
        let resid = num / den - values[i];
        sum_sq += resid * resid;
    }
    (sum_sq / n as f64).sqrt()
}

#[test]
// Purpose
// -------
// Pin the estimator to its definition: scoring a real kernel smoother
// through the public API must agree with a from-scratch leave-one-out
// loop using the same kernel arithmetic.
//
// Given
// -----
// - The eight-bin zigzag fixture, the unweighted Gaussian smoother, and a
//   bandwidth of 0.3.
//
// Expect
// ------
// - `loocv_rmse` returns a finite, strictly positive score equal to the
//   hand-rolled computation to within 1e-12.
fn kernel_estimator_matches_hand_rolled_loocv() {
    let summary = noisy_constant_summary();
    let smoother = GaussianSmoother::unweighted();

    let api = loocv_rmse(&summary, array![0.3].view(), None, &smoother)
        .expect("complete table should score");
    let direct = hand_rolled_kernel_loocv(&summary, 0.3);

    assert!(api.is_finite() && api > 0.0);
    approx::assert_relative_eq!(api, direct, epsilon = 1e-12);
}

#[test]
// Purpose
// -------
// Verify that rows with a missing response or a missing coordinate are
// excluded from both training and scoring, end to end: the score must
// match a table with those rows physically removed.
//
// Given
// -----
// - The zigzag fixture with the response blanked at row 2 and a
//   coordinate blanked at row 5, versus a hand-built six-row table
//   containing exactly the survivors.
//
// Expect
// ------
// - Identical RMSE at the same bandwidth.
fn missing_rows_behave_as_if_absent() {
    let mut with_gaps = noisy_constant_summary();
    with_gaps.columns[0].values[2] = f64::NAN;
    with_gaps.coords[[5, 0]] = f64::NAN;

    let trimmed = CondensedSummary::new(
        vec![GroupVariable::new("x", 0.1).unwrap()],
        Array2::from_shape_vec((6, 1), vec![0.05, 0.15, 0.35, 0.45, 0.65, 0.75]).unwrap(),
        vec![SummaryColumn::new("mean", array![2.3, 1.6, 1.8, 2.35, 2.2, 1.75]).unwrap()],
    )
    .expect("trimmed fixture is valid");

    let smoother = GaussianSmoother::unweighted();
    let gapped = loocv_rmse(&with_gaps, array![0.3].view(), None, &smoother)
        .expect("gapped table should score");
    let dropped = loocv_rmse(&trimmed, array![0.3].view(), None, &smoother)
        .expect("trimmed table should score");

    approx::assert_relative_eq!(gapped, dropped, epsilon = 1e-12);
}

#[test]
// Purpose
// -------
// Check response-column plumbing through the estimator: the default is
// the first summary column, named columns resolve, and weighting by a
// second column actually changes the score.
//
// Given
// -----
// - A table with columns ["count", "mean"], scored unweighted at None,
//   Some("count"), and Some("mean"), and count-weighted at Some("mean").
//
// Expect
// ------
// - None and Some("count") give bitwise-identical scores.
// - The "mean" score differs from the "count" score.
// - Count-weighting shifts the "mean" score.
fn response_selection_flows_through_the_estimator() {
    let summary = count_mean_summary();
    let unweighted = GaussianSmoother::unweighted();

    let by_default = loocv_rmse(&summary, array![0.3].view(), None, &unweighted).unwrap();
    let by_name = loocv_rmse(&summary, array![0.3].view(), Some("count"), &unweighted).unwrap();
    let mean_score = loocv_rmse(&summary, array![0.3].view(), Some("mean"), &unweighted).unwrap();

    assert_eq!(by_default.to_bits(), by_name.to_bits());
    assert!((by_default - mean_score).abs() > 1e-6);

    let weighted = GaussianSmoother::count_weighted();
    let weighted_score =
        loocv_rmse(&summary, array![0.3].view(), Some("mean"), &weighted).unwrap();
    assert!(weighted_score.is_finite());
    assert!((weighted_score - mean_score).abs() > 1e-9);
}

#[test]
// Purpose
// -------
// Verify the default sweep: fifty candidates per dimension running from
// twice to twenty times the bin width, scored in order with a real
// kernel, every score finite and equal to the estimator called directly.
//
// Given
// -----
// - The zigzag fixture (bin width 0.1) and `rmse_grid` with no grid.
//
// Expect
// ------
// - Fifty points from 0.2 to 2.0 with constant spacing.
// - Each point's RMSE matches `loocv_rmse` at that candidate.
fn default_grid_sweep_spans_two_to_twenty_bin_widths() {
    let summary = noisy_constant_summary();
    let smoother = GaussianSmoother::unweighted();

    let scored = rmse_grid(&summary, None, None, &smoother).expect("default sweep should run");

    assert_eq!(scored.len(), 50);
    approx::assert_relative_eq!(scored[0].h[0], 0.2, epsilon = 1e-12);
    approx::assert_relative_eq!(scored[49].h[0], 2.0, epsilon = 1e-12);

    let step = scored[1].h[0] - scored[0].h[0];
    for r in 1..scored.len() {
        approx::assert_relative_eq!(scored[r].h[0] - scored[r - 1].h[0], step, epsilon = 1e-9);
    }

    for point in &scored {
        assert!(point.rmse.is_finite());
        let direct = loocv_rmse(&summary, point.h.view(), None, &smoother).unwrap();
        approx::assert_relative_eq!(point.rmse, direct, epsilon = 1e-12);
    }
}

#[test]
// Purpose
// -------
// Verify multi-dimensional sweeps: the grid is the Cartesian product with
// the first dimension cycling fastest, and scoring preserves that order
// row for row.
//
// Given
// -----
// - The 3x3 plane fixture (widths 0.1 and 0.5) and a 4-point grid up to
//   8x the widths.
//
// Expect
// ------
// - Sixteen rows; dimension 0 repeats its axis while dimension 1 advances
//   once per block.
// - Scored points carry the grid rows unchanged, each RMSE finite and
//   matching a direct estimator call.
fn two_dimensional_sweep_preserves_cartesian_order() {
    let summary = surface_summary();
    let smoother = GaussianSmoother::unweighted();

    let grid = bandwidth_grid(&summary, 4, 8.0).expect("grid construction should succeed");
    assert_eq!(grid.n_rows(), 16);
    assert_eq!(grid.n_dims(), 2);
    assert_eq!(grid.names, vec!["x".to_string(), "y".to_string()]);

    let x_axis = Array1::linspace(0.2, 0.8, 4);
    let y_axis = Array1::linspace(1.0, 4.0, 4);
    for r in 0..16 {
        approx::assert_relative_eq!(grid.values[[r, 0]], x_axis[r % 4], epsilon = 1e-12);
        approx::assert_relative_eq!(grid.values[[r, 1]], y_axis[r / 4], epsilon = 1e-12);
    }

    let scored =
        rmse_grid(&summary, Some(&grid), None, &smoother).expect("sweep should succeed");
    assert_eq!(scored.len(), 16);
    for (r, point) in scored.iter().enumerate() {
        assert_eq!(point.h, grid.row(r).to_owned());
        assert!(point.rmse.is_finite());
        let direct = loocv_rmse(&summary, grid.row(r), None, &smoother).unwrap();
        approx::assert_relative_eq!(point.rmse, direct, epsilon = 1e-12);
    }
}

#[test]
// Purpose
// -------
// Run the full search on a surface where smoothing demonstrably helps and
// check the contract of the fit: at or better than the starting score,
// bandwidth above the bin width, converged, and free of warnings.
//
// Given
// -----
// - The zigzag fixture, the unweighted kernel, and default options (start
//   at 5x the bin widths).
//
// Expect
// ------
// - `fit.rmse` no worse than the estimator at the starting bandwidth.
// - The fitted bandwidth stays above the start (averaging wins on zigzag
//   data), the solver converges, and no warnings attach.
fn search_improves_on_the_default_start() {
    let summary = noisy_constant_summary();
    let smoother = GaussianSmoother::unweighted();

    let fit = best_bandwidth(&summary, &smoother, &SelectionOptions::default())
        .expect("search should succeed");

    let h_start = summary.widths() * DEFAULT_INIT_MULTIPLE;
    let start_score = loocv_rmse(&summary, h_start.view(), None, &smoother).unwrap();

    assert!(fit.rmse.is_finite());
    assert!(fit.rmse <= start_score + 1e-9);
    assert!(fit.h_hat[0] > h_start[0]);
    assert!(fit.converged, "status: {}", fit.status);
    assert!(fit.warnings.is_empty(), "warnings: {:?}", fit.warnings);
    assert!(fit.evaluations >= 1);
}

#[test]
// Purpose
// -------
// The pipeline is deterministic floating-point arithmetic end to end, so
// two identical searches must agree bit for bit, diagnostics included.
//
// Given
// -----
// - Two `best_bandwidth` calls on the zigzag fixture with the
//   count-weighted kernel and default options.
//
// Expect
// ------
// - Identical fits, including bandwidth, RMSE, iteration counts, and
//   warnings.
fn repeated_searches_are_bit_for_bit_reproducible() {
    let summary = noisy_constant_summary();
    let smoother = GaussianSmoother::count_weighted();

    let first = best_bandwidth(&summary, &smoother, &SelectionOptions::default())
        .expect("first search should succeed");
    let second = best_bandwidth(&summary, &smoother, &SelectionOptions::default())
        .expect("second search should succeed");

    assert_eq!(first, second);
    assert!(first.rmse.is_finite());
    assert!(first.h_hat[0] >= 0.1);
}

#[test]
// Purpose
// -------
// Starve the solver of iterations and confirm the non-convergence path:
// the search still returns a usable fit, flags it, and reports the
// termination status verbatim.
//
// Given
// -----
// - The zigzag fixture with the unweighted kernel, an unreachable
//   gradient tolerance, and a single-iteration budget.
//
// Expect
// ------
// - `converged` is false with status "MaxItersReached" after exactly one
//   iteration, a NonConvergence warning attached, and a bandwidth still
//   at or above the bin width.
fn capped_iteration_budget_reports_nonconvergence() {
    let summary = noisy_constant_summary();
    let smoother = GaussianSmoother::unweighted();
    let search = SearchOptions::new(
        Tolerances::new(Some(1e-30), None, Some(1)).unwrap(),
        LineSearcher::MoreThuente,
        false,
        None,
    )
    .unwrap();
    let opts = SelectionOptions::new(None, None, search);

    let fit = best_bandwidth(&summary, &smoother, &opts).expect("capped search should succeed");

    assert!(!fit.converged);
    assert_eq!(fit.status, "MaxItersReached");
    assert_eq!(fit.iterations, 1);
    assert!(
        fit.warnings.iter().any(|w| matches!(w, SelectionWarning::NonConvergence { .. })),
        "warnings: {:?}",
        fit.warnings
    );
    assert!(fit.h_hat[0] >= 0.1);
}

#[test]
// Purpose
// -------
// Trace the uninformative-data path through every layer: the estimator
// and the sweep report NaN scores, while the search fails with a
// non-finite cost instead of returning a meaningless bandwidth.
//
// Given
// -----
// - A three-bin table whose only response column is entirely missing, and
//   a variant with a single complete row.
//
// Expect
// ------
// - `loocv_rmse` returns Ok(NaN) for both tables.
// - A grid sweep preserves candidates with NaN scores.
// - `best_bandwidth` returns `OptError::NonFiniteCost`.
fn uninformative_tables_score_nan_and_fail_the_search() {
    let groups = vec![GroupVariable::new("x", 0.1).unwrap()];
    let coords = Array2::from_shape_vec((3, 1), vec![0.05, 0.15, 0.25]).unwrap();
    let all_missing = CondensedSummary::new(
        groups.clone(),
        coords.clone(),
        vec![SummaryColumn::new("mean", array![f64::NAN, f64::NAN, f64::NAN]).unwrap()],
    )
    .expect("all-missing fixture is valid");
    let one_complete = CondensedSummary::new(
        groups,
        coords,
        vec![SummaryColumn::new("mean", array![2.0, f64::NAN, f64::NAN]).unwrap()],
    )
    .expect("one-complete fixture is valid");

    let smoother = GaussianSmoother::unweighted();

    let score = loocv_rmse(&all_missing, array![0.3].view(), None, &smoother).unwrap();
    assert!(score.is_nan());
    let score = loocv_rmse(&one_complete, array![0.3].view(), None, &smoother).unwrap();
    assert!(score.is_nan());

    let grid = bandwidth_grid(&all_missing, 3, 8.0).unwrap();
    let scored = rmse_grid(&all_missing, Some(&grid), None, &smoother).unwrap();
    assert_eq!(scored.len(), 3);
    for (r, point) in scored.iter().enumerate() {
        assert_eq!(point.h, grid.row(r).to_owned());
        assert!(point.rmse.is_nan());
    }

    let err = best_bandwidth(&all_missing, &smoother, &SelectionOptions::default())
        .expect_err("search on an all-missing response must fail");
    assert!(matches!(err, OptError::NonFiniteCost { .. }));
}
