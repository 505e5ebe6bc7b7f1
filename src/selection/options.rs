//! Configuration for the bandwidth search.
use ndarray::Array1;

use crate::optimization::minimizer::SearchOptions;

/// Default multiple of the bin widths used as the search start when the
/// caller does not provide an initial bandwidth.
pub const DEFAULT_INIT_MULTIPLE: f64 = 5.0;

/// Options for [`best_bandwidth`](super::best::best_bandwidth).
///
/// Fields:
/// - `h_init`: optional starting bandwidth, one entry per grouping variable
///   in declaration order. Entries must be finite and **strictly above** the
///   bin width in their dimension; `None` starts the search at
///   [`DEFAULT_INIT_MULTIPLE`] times the bin widths.
/// - `response`: optional summary column to cross-validate. `None` selects
///   the first summary column.
/// - `search`: solver configuration forwarded to the minimizer. The default
///   stops on a cost change below `1e-2`, which is deliberately loose: the
///   cross-validation surface is flat near its minimum and extra digits of
///   bandwidth precision do not change the smoothed output noticeably.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionOptions {
    pub h_init: Option<Array1<f64>>,
    pub response: Option<String>,
    pub search: SearchOptions,
}

impl SelectionOptions {
    /// Bundle the three option groups into one struct.
    ///
    /// Unlike the solver-level constructors this performs no validation:
    /// `h_init` can only be checked against a concrete summary, which
    /// happens inside `best_bandwidth`.
    pub fn new(
        h_init: Option<Array1<f64>>, response: Option<String>, search: SearchOptions,
    ) -> Self {
        Self { h_init, response, search }
    }
}

impl Default for SelectionOptions {
    fn default() -> Self {
        Self { h_init: None, response: None, search: SearchOptions::default() }
    }
}
