//! Simplex solver settings.

/// Settings for [`crate::DenseSimplex`].
#[derive(Debug, Clone)]
pub struct SimplexSettings {
    /// Maximum number of simplex iterations per solve.
    pub max_iter: usize,

    /// Primal feasibility tolerance on bounds of basic variables.
    pub tol_primal: f64,

    /// Dual feasibility (reduced cost) tolerance.
    pub tol_dual: f64,

    /// Smallest pivot element accepted in ratio tests.
    pub tol_pivot: f64,

    /// Refactorize the basis every this many pivots.
    pub refactor_freq: usize,

    /// Switch to Bland's rule after this many consecutive degenerate pivots.
    pub bland_after: usize,

    /// Residual `|B x_B + N x_N|` above which a solve is flagged unstable.
    pub tol_residual: f64,

    /// Log a summary of every solve.
    pub verbose: bool,
}

impl Default for SimplexSettings {
    fn default() -> Self {
        Self {
            max_iter: 10_000,
            tol_primal: 1e-9,
            tol_dual: 1e-9,
            tol_pivot: 1e-9,
            refactor_freq: 64,
            bland_after: 50,
            tol_residual: 1e-6,
            verbose: false,
        }
    }
}
