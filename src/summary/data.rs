//! Condensed-summary container used throughout bandwidth selection.
//!
//! Purpose
//! -------
//! Define the crate's owned view of a condensed (pre-binned) table:
//! [`GroupVariable`] describes one binned grouping dimension, [`SummaryColumn`]
//! one per-bin statistic, and [`CondensedSummary`] ties them together with the
//! bin-centre coordinate matrix. Construction validates shape and value
//! invariants once, so downstream code (cross-validation, grid evaluation,
//! bandwidth search) can operate without re-checking.
//!
//! Key invariants
//! --------------
//! - At least one group variable and at least one summary column.
//! - Coordinate matrix is `n_rows x n_groups`, one column per group variable,
//!   in declaration order.
//! - Every summary column has exactly `n_rows` entries.
//! - Bin widths are finite and strictly positive.
//! - `NaN` marks a missing coordinate or summary value; ±∞ is rejected.
//! - Group and summary names are non-empty and mutually unique.
//!
//! Conventions
//! -----------
//! The condensation step conventionally emits a bin count alongside the
//! summarised statistics; here the count is an ordinary summary column like
//! any other, so it can itself serve as the response being validated. When no
//! response is named, the first summary column is used.

use ndarray::{Array1, Array2, ArrayView1, Axis};

use crate::summary::errors::{SummaryError, SummaryResult};

/// One binned grouping dimension of a condensed summary.
///
/// Key behaviors
/// -------------
/// - `new` validates the name (non-empty) and the bin width (finite, > 0).
/// - The width doubles as the natural lower bound for any bandwidth applied
///   along this dimension.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupVariable {
    /// Variable name, unique within one summary.
    pub name: String,

    /// Bin width used during condensation; finite and strictly positive.
    pub width: f64,
}

impl GroupVariable {
    /// Purpose
    /// -------
    /// Build a validated group variable.
    ///
    /// Errors
    /// ------
    /// - `SummaryError::EmptyVariableName` if `name` is empty.
    /// - `SummaryError::InvalidBinWidth` if `width` is non-finite or ≤ 0.
    pub fn new(name: &str, width: f64) -> SummaryResult<Self> {
        if name.is_empty() {
            return Err(SummaryError::EmptyVariableName);
        }
        if !width.is_finite() {
            return Err(SummaryError::InvalidBinWidth {
                name: name.to_string(),
                value: width,
                reason: "Bin width must be finite.",
            });
        }
        if width <= 0.0 {
            return Err(SummaryError::InvalidBinWidth {
                name: name.to_string(),
                value: width,
                reason: "Bin width must be positive.",
            });
        }
        Ok(Self { name: name.to_string(), width })
    }
}

/// One per-bin summary statistic (count, mean, standard deviation, ...).
///
/// Values may contain `NaN` for bins where the statistic is undefined; ±∞ is
/// rejected at construction. Length against the owning table is checked by
/// [`CondensedSummary::new`].
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryColumn {
    /// Column name, unique within one summary.
    pub name: String,

    /// Per-row values; `NaN` encodes missing.
    pub values: Array1<f64>,
}

impl SummaryColumn {
    /// Purpose
    /// -------
    /// Build a validated summary column.
    ///
    /// Errors
    /// ------
    /// - `SummaryError::EmptyVariableName` if `name` is empty.
    /// - `SummaryError::InfiniteSummaryValue` on the first ±∞ entry.
    pub fn new(name: &str, values: Array1<f64>) -> SummaryResult<Self> {
        if name.is_empty() {
            return Err(SummaryError::EmptyVariableName);
        }
        for (index, &value) in values.iter().enumerate() {
            if value.is_infinite() {
                return Err(SummaryError::InfiniteSummaryValue {
                    name: name.to_string(),
                    index,
                    value,
                });
            }
        }
        Ok(Self { name: name.to_string(), values })
    }
}

/// Condensed (pre-binned) table: group metadata, bin-centre coordinates, and
/// summary columns.
///
/// Purpose
/// -------
/// Owned input for every operation in this crate. The coordinate matrix holds
/// one row per retained bin and one column per group variable; summary columns
/// hold the statistics computed over each bin.
///
/// Downstream usage
/// ----------------
/// - `evaluation::loocv_rmse` scores a bandwidth against this table.
/// - `evaluation::bandwidth_grid` derives candidate grids from the widths.
/// - `selection::best_bandwidth` searches bandwidths with the widths as the
///   lower bound.
///
/// Testing notes
/// -------------
/// Constructor tests live below; leave-one-out subsetting is exercised through
/// the cross-validation tests in `evaluation`.
#[derive(Debug, Clone, PartialEq)]
pub struct CondensedSummary {
    /// Group variables, in coordinate-column order.
    pub groups: Vec<GroupVariable>,

    /// Bin-centre coordinates, `n_rows x n_groups`; `NaN` encodes missing.
    pub coords: Array2<f64>,

    /// Summary columns; each of length `n_rows`. The first column is the
    /// default response.
    pub columns: Vec<SummaryColumn>,
}

impl CondensedSummary {
    /// Purpose
    /// -------
    /// Assemble and validate a condensed summary in one pass.
    ///
    /// Parameters
    /// ----------
    /// - `groups`: one entry per grouping dimension, in coordinate-column
    ///   order.
    /// - `coords`: bin-centre matrix, `n_rows x groups.len()`.
    /// - `columns`: summary statistics, each of length `n_rows`.
    ///
    /// Errors
    /// ------
    /// - `SummaryError::NoGroupVariables` / `NoSummaryColumns` on empty
    ///   metadata.
    /// - `SummaryError::GroupCountMismatch` if `coords` width differs from the
    ///   group count.
    /// - `SummaryError::EmptySummary` if `coords` has zero rows.
    /// - `SummaryError::DuplicateVariableName` if any two names collide.
    /// - `SummaryError::InfiniteCoordinate` on the first ±∞ coordinate.
    /// - `SummaryError::ColumnLengthMismatch` on the first ragged column.
    ///
    /// Examples
    /// --------
    /// ```rust
    /// use bandwidth_cv::summary::{CondensedSummary, GroupVariable, SummaryColumn};
    /// use ndarray::array;
    ///
    /// let summary = CondensedSummary::new(
    ///     vec![GroupVariable::new("x", 0.1).unwrap()],
    ///     array![[0.05], [0.15], [0.25]],
    ///     vec![
    ///         SummaryColumn::new("count", array![4.0, 7.0, 2.0]).unwrap(),
    ///         SummaryColumn::new("mean", array![1.2, f64::NAN, 0.8]).unwrap(),
    ///     ],
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(summary.n_rows(), 3);
    /// assert_eq!(summary.response_column(None).unwrap().name, "count");
    /// ```
    pub fn new(
        groups: Vec<GroupVariable>,
        coords: Array2<f64>,
        columns: Vec<SummaryColumn>,
    ) -> SummaryResult<Self> {
        if groups.is_empty() {
            return Err(SummaryError::NoGroupVariables);
        }
        if columns.is_empty() {
            return Err(SummaryError::NoSummaryColumns);
        }
        if coords.ncols() != groups.len() {
            return Err(SummaryError::GroupCountMismatch {
                groups: groups.len(),
                coord_cols: coords.ncols(),
            });
        }
        let n_rows = coords.nrows();
        if n_rows == 0 {
            return Err(SummaryError::EmptySummary);
        }

        let mut seen: Vec<&str> = Vec::with_capacity(groups.len() + columns.len());
        for name in groups
            .iter()
            .map(|g| g.name.as_str())
            .chain(columns.iter().map(|c| c.name.as_str()))
        {
            if seen.contains(&name) {
                return Err(SummaryError::DuplicateVariableName { name: name.to_string() });
            }
            seen.push(name);
        }

        for ((row, col), &value) in coords.indexed_iter() {
            if value.is_infinite() {
                return Err(SummaryError::InfiniteCoordinate { row, col, value });
            }
        }

        for column in &columns {
            if column.values.len() != n_rows {
                return Err(SummaryError::ColumnLengthMismatch {
                    name: column.name.clone(),
                    expected: n_rows,
                    actual: column.values.len(),
                });
            }
        }

        Ok(Self { groups, coords, columns })
    }

    /// Number of bins (rows) in the summary.
    pub fn n_rows(&self) -> usize {
        self.coords.nrows()
    }

    /// Number of grouping dimensions.
    pub fn n_groups(&self) -> usize {
        self.groups.len()
    }

    /// Group variable names, in coordinate-column order.
    pub fn group_vars(&self) -> Vec<&str> {
        self.groups.iter().map(|g| g.name.as_str()).collect()
    }

    /// Bin widths, in coordinate-column order.
    pub fn widths(&self) -> Array1<f64> {
        self.groups.iter().map(|g| g.width).collect()
    }

    /// Summary column names, in declaration order.
    pub fn summary_vars(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Look up a summary column by name.
    pub fn column(&self, name: &str) -> Option<&SummaryColumn> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Purpose
    /// -------
    /// Resolve the response column being validated: the named column when
    /// `want` is given, otherwise the first summary column.
    ///
    /// Errors
    /// ------
    /// - `SummaryError::UnknownSummaryVar` if `want` names a column that does
    ///   not exist.
    pub fn response_column(&self, want: Option<&str>) -> SummaryResult<&SummaryColumn> {
        match want {
            Some(name) => self
                .column(name)
                .ok_or_else(|| SummaryError::UnknownSummaryVar { name: name.to_string() }),
            None => Ok(&self.columns[0]),
        }
    }

    /// Coordinates of row `i` as a view.
    pub fn row(&self, i: usize) -> ArrayView1<'_, f64> {
        self.coords.row(i)
    }

    /// Row subset in the given order, for leave-one-out training sets.
    ///
    /// The result intentionally skips re-validation: an empty `rows` produces
    /// an empty table, which callers hand to smoothers that must tolerate it.
    pub(crate) fn take_rows(&self, rows: &[usize]) -> CondensedSummary {
        CondensedSummary {
            groups: self.groups.clone(),
            coords: self.coords.select(Axis(0), rows),
            columns: self
                .columns
                .iter()
                .map(|c| SummaryColumn {
                    name: c.name.clone(),
                    values: c.values.select(Axis(0), rows),
                })
                .collect(),
        }
    }
}
