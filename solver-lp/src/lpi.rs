//! LP backend interface.
//!
//! The trait mirrors the small set of operations a constraint handler needs
//! from an auxiliary LP: incremental construction, bound/objective/coefficient
//! updates, primal and dual simplex solves and a handful of status queries.

use crate::error::LpResult;

/// Integer parameters understood by every backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LpParam {
    /// Discard the warm-start basis on the next solve (0/1).
    FromScratch,
    /// Run LP presolving before solving (0/1).
    Presolving,
    /// Scale the LP before solving (0/1).
    Scaling,
    /// Use fast but less accurate MIP-oriented settings (0/1).
    FastMip,
}

/// Solution quality measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolQuality {
    /// Estimated condition number of the final basis matrix.
    EstimCondition,
    /// Exact condition number of the final basis matrix.
    ExactCondition,
}

/// A column to be appended to an LP.
#[derive(Debug, Clone, PartialEq)]
pub struct LpColumn {
    /// Objective coefficient.
    pub obj: f64,
    /// Lower bound (may be `-infinity`).
    pub lb: f64,
    /// Upper bound (may be `+infinity`).
    pub ub: f64,
    /// Sparse entries `(row, value)`.
    pub entries: Vec<(usize, f64)>,
}

impl LpColumn {
    /// Create a column with bounds `[lb, ub]` and no entries.
    pub fn new(obj: f64, lb: f64, ub: f64) -> Self {
        Self {
            obj,
            lb,
            ub,
            entries: Vec::new(),
        }
    }

    /// Add a coefficient in `row`.
    pub fn with_entry(mut self, row: usize, value: f64) -> Self {
        self.entries.push((row, value));
        self
    }
}

/// Operations required from an LP solver backend.
///
/// Rows are ranged (`lhs <= a.x <= rhs`), columns carry bounds and an
/// objective coefficient; the sense is always minimization.
pub trait LpInterface {
    /// Value the backend treats as infinite.
    fn infinity(&self) -> f64;

    /// Whether `value` is infinite for this backend.
    fn is_infinity(&self, value: f64) -> bool {
        value >= self.infinity()
    }

    /// Number of rows.
    fn n_rows(&self) -> usize;

    /// Number of columns.
    fn n_cols(&self) -> usize;

    /// Append empty rows with the given sides.
    fn add_rows(&mut self, lhs: &[f64], rhs: &[f64]) -> LpResult<()>;

    /// Append columns.
    fn add_cols(&mut self, cols: &[LpColumn]) -> LpResult<()>;

    /// Change objective coefficients.
    fn chg_obj(&mut self, indices: &[usize], values: &[f64]) -> LpResult<()>;

    /// Objective coefficient of a column.
    fn obj(&self, col: usize) -> LpResult<f64>;

    /// Change column bounds.
    fn chg_bounds(&mut self, indices: &[usize], lb: &[f64], ub: &[f64]) -> LpResult<()>;

    /// Bounds `(lb, ub)` of a column.
    fn bounds(&self, col: usize) -> LpResult<(f64, f64)>;

    /// Change a single matrix coefficient (zero removes the entry).
    fn chg_coef(&mut self, row: usize, col: usize, value: f64) -> LpResult<()>;

    /// Change row sides.
    fn chg_sides(&mut self, indices: &[usize], lhs: &[f64], rhs: &[f64]) -> LpResult<()>;

    /// Sides `(lhs, rhs)` of a row.
    fn sides(&self, row: usize) -> LpResult<(f64, f64)>;

    /// Nonzero entries `(col, value)` of a row, sorted by column.
    fn row(&self, row: usize) -> LpResult<Vec<(usize, f64)>>;

    /// Solve with the primal simplex method.
    fn solve_primal(&mut self) -> LpResult<()>;

    /// Solve with the dual simplex method.
    fn solve_dual(&mut self) -> LpResult<()>;

    /// Whether the last solve finished without numerical trouble.
    fn is_stable(&self) -> bool;

    /// Whether the last solve proved primal infeasibility.
    fn is_primal_infeasible(&self) -> bool;

    /// Whether the last solve proved primal unboundedness.
    fn is_primal_unbounded(&self) -> bool;

    /// Whether the last solve ended optimal.
    fn is_optimal(&self) -> bool;

    /// Whether a primal ray is available from the last solve.
    fn exists_primal_ray(&self) -> bool;

    /// Primal values of the structural columns.
    fn primal_solution(&self) -> LpResult<Vec<f64>>;

    /// Quality measure of the last solution, `None` if unavailable.
    fn sol_quality(&self, quality: SolQuality) -> Option<f64>;

    /// Set an integer parameter.
    fn set_int_par(&mut self, param: LpParam, value: i32);

    /// Current value of an integer parameter.
    fn int_par(&self, param: LpParam) -> i32;
}
