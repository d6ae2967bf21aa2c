//! Cut and clause types.

use crate::model::{Solution, VarId};

/// Source of a cut (for tracking and debugging).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CutSource {
    /// IIS cut from the alternative LP.
    Iis,

    /// Coupling row `s + M y <= M`.
    Coupling,
}

/// A sparse linear cut: `a^T x <= rhs`.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearCut {
    /// Nonzero coefficients.
    pub coefs: Vec<(VarId, f64)>,

    /// Right-hand side.
    pub rhs: f64,

    /// Optional name for debugging.
    pub name: Option<String>,

    /// Only valid in the current subtree.
    pub local: bool,

    /// May be removed from the LP when unused.
    pub removable: bool,

    /// Source of this cut.
    pub source: CutSource,
}

impl LinearCut {
    /// Create a new globally valid, removable cut.
    pub fn new(coefs: Vec<(VarId, f64)>, rhs: f64, source: CutSource) -> Self {
        Self {
            coefs,
            rhs,
            name: None,
            local: false,
            removable: true,
            source,
        }
    }

    /// Attach a name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set validity and removability.
    pub fn with_flags(mut self, local: bool, removable: bool) -> Self {
        self.local = local;
        self.removable = removable;
        self
    }

    /// `a^T sol - rhs`; positive if `sol` violates the cut.
    pub fn violation(&self, sol: &Solution) -> f64 {
        let lhs: f64 = self.coefs.iter().map(|&(v, a)| a * sol.value(v)).sum();
        lhs - self.rhs
    }

    /// Violation exceeds `tol`.
    pub fn is_violated(&self, sol: &Solution, tol: f64) -> bool {
        self.violation(sol) > tol
    }
}

/// A clause: at least one literal is 1.
#[derive(Debug, Clone, PartialEq)]
pub struct Clause {
    /// Constraint name.
    pub name: String,

    /// Literals (binary or negated binary variables).
    pub literals: Vec<VarId>,

    /// Only valid in the current subtree.
    pub local: bool,

    /// May be removed when unused.
    pub removable: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cut_violation() {
        // y0 + y1 <= 1
        let cut = LinearCut::new(vec![(VarId(0), 1.0), (VarId(1), 1.0)], 1.0, CutSource::Iis);

        let sol = Solution::from_values(vec![0.5, 0.5]);
        assert!(!cut.is_violated(&sol, 1e-6));

        let sol = Solution::from_values(vec![1.0, 0.6]);
        assert!(cut.is_violated(&sol, 1e-6));
        assert!((cut.violation(&sol) - 0.6).abs() < 1e-10);
    }
}
