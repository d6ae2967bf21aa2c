//! Dense basis inverse with product-form updates.

use nalgebra::DMatrix;

/// Explicit inverse of the basis matrix.
///
/// Small auxiliary LPs keep `m` modest, so a dense inverse updated by
/// elementary row operations and periodically rebuilt from an LU
/// factorization is both simple and accurate enough.
#[derive(Debug, Clone)]
pub(crate) struct BasisFactor {
    inv: DMatrix<f64>,
}

impl BasisFactor {
    /// Invert `b`; `None` if it is singular.
    pub fn factor(b: DMatrix<f64>) -> Option<Self> {
        let m = b.nrows();
        if m == 0 {
            return Some(Self {
                inv: DMatrix::zeros(0, 0),
            });
        }
        b.lu().try_inverse().map(|inv| Self { inv })
    }

    /// `s * I`, used for the all-logical basis.
    pub fn scaled_identity(m: usize, s: f64) -> Self {
        Self {
            inv: DMatrix::identity(m, m) * s,
        }
    }

    /// Dimension of the basis.
    pub fn dim(&self) -> usize {
        self.inv.nrows()
    }

    /// `B^{-1} a` for a sparse column `a`.
    pub fn ftran(&self, col: &[(usize, f64)]) -> Vec<f64> {
        let m = self.dim();
        let mut out = vec![0.0; m];
        for &(r, v) in col {
            let c = self.inv.column(r);
            for i in 0..m {
                out[i] += c[i] * v;
            }
        }
        out
    }

    /// `B^{-T} c` for a dense vector `c`.
    pub fn btran(&self, c: &[f64]) -> Vec<f64> {
        let m = self.dim();
        let mut y = vec![0.0; m];
        for (i, &ci) in c.iter().enumerate() {
            if ci == 0.0 {
                continue;
            }
            for k in 0..m {
                y[k] += ci * self.inv[(i, k)];
            }
        }
        y
    }

    /// Row `p` of `B^{-1}`.
    pub fn row(&self, p: usize) -> Vec<f64> {
        self.inv.row(p).iter().copied().collect()
    }

    /// Replace basic position `p` by a column whose ftran is `alpha`.
    pub fn update(&mut self, p: usize, alpha: &[f64]) {
        let m = self.dim();
        let piv = alpha[p];
        let pivot_row: Vec<f64> = (0..m).map(|k| self.inv[(p, k)] / piv).collect();
        for i in 0..m {
            if i == p {
                continue;
            }
            let f = alpha[i];
            if f == 0.0 {
                continue;
            }
            for k in 0..m {
                self.inv[(i, k)] -= f * pivot_row[k];
            }
        }
        for k in 0..m {
            self.inv[(p, k)] = pivot_row[k];
        }
    }

    /// Condition estimate `||B||_1 * ||B^{-1}||_1`.
    pub fn condition(&self, b: &DMatrix<f64>) -> f64 {
        norm1(b) * norm1(&self.inv)
    }
}

/// Maximum absolute column sum.
pub(crate) fn norm1(a: &DMatrix<f64>) -> f64 {
    a.column_iter()
        .map(|c| c.iter().map(|v| v.abs()).sum::<f64>())
        .fold(0.0, f64::max)
}
