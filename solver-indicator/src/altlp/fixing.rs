//! Scoped fixing of alternative LP columns.

use std::mem;
use std::ops::{Deref, DerefMut};

use solver_lp::{LpInterface, LpResult};

/// Fixes columns to `[0, 0]` and restores their previous bounds on drop.
///
/// The first fix of a column records its bounds; fixing it again is a no-op
/// for restoration. Use [`FixGuard::restore`] to observe restoration errors;
/// dropping the guard restores as well and logs failures.
pub struct FixGuard<'a> {
    lp: &'a mut dyn LpInterface,
    saved: Vec<(usize, f64, f64)>,
}

impl<'a> FixGuard<'a> {
    /// Create a guard with nothing fixed.
    pub fn new(lp: &'a mut dyn LpInterface) -> Self {
        Self {
            lp,
            saved: Vec::new(),
        }
    }

    /// Fix a single column.
    pub fn fix_one(&mut self, col: usize) -> LpResult<()> {
        if !self.is_fixed(col) {
            let (lb, ub) = self.lp.bounds(col)?;
            self.saved.push((col, lb, ub));
        }
        self.lp.chg_bounds(&[col], &[0.0], &[0.0])
    }

    /// Fix several columns.
    pub fn fix(&mut self, cols: &[usize]) -> LpResult<()> {
        for &col in cols {
            self.fix_one(col)?;
        }
        Ok(())
    }

    /// Whether `col` was fixed through this guard.
    pub fn is_fixed(&self, col: usize) -> bool {
        self.saved.iter().any(|&(c, _, _)| c == col)
    }

    /// Number of columns fixed through this guard.
    pub fn n_fixed(&self) -> usize {
        self.saved.len()
    }

    /// Restore all fixed columns.
    pub fn restore(mut self) -> LpResult<()> {
        let saved = mem::take(&mut self.saved);
        restore_bounds(&mut *self.lp, &saved)
    }
}

fn restore_bounds(lp: &mut dyn LpInterface, saved: &[(usize, f64, f64)]) -> LpResult<()> {
    if saved.is_empty() {
        return Ok(());
    }
    let cols: Vec<usize> = saved.iter().map(|&(c, _, _)| c).collect();
    let lb: Vec<f64> = saved.iter().map(|&(_, l, _)| l).collect();
    let ub: Vec<f64> = saved.iter().map(|&(_, _, u)| u).collect();
    lp.chg_bounds(&cols, &lb, &ub)
}

impl Drop for FixGuard<'_> {
    fn drop(&mut self) {
        let saved = mem::take(&mut self.saved);
        if let Err(e) = restore_bounds(&mut *self.lp, &saved) {
            log::warn!("failed to unfix {} alternative LP columns: {e}", saved.len());
        }
    }
}

impl<'a> Deref for FixGuard<'a> {
    type Target = dyn LpInterface + 'a;

    fn deref(&self) -> &Self::Target {
        &*self.lp
    }
}

impl<'a> DerefMut for FixGuard<'a> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.lp
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use solver_lp::{DenseSimplex, LpColumn};

    fn lp_with_cols() -> DenseSimplex {
        let mut lp = DenseSimplex::default();
        lp.add_rows(&[-1.0], &[-1.0]).unwrap();
        lp.add_cols(&[
            LpColumn::new(1.0, 0.0, f64::INFINITY),
            LpColumn::new(1.0, f64::NEG_INFINITY, f64::INFINITY),
            LpColumn::new(1.0, 0.0, 0.0),
        ])
        .unwrap();
        lp
    }

    #[test]
    fn test_restore_exact_bounds() {
        let mut lp = lp_with_cols();
        {
            let mut guard = FixGuard::new(&mut lp);
            guard.fix(&[0, 1, 2, 1]).unwrap();
            assert_eq!(guard.n_fixed(), 3);
            assert_eq!(guard.bounds(1).unwrap(), (0.0, 0.0));
            guard.restore().unwrap();
        }
        assert_eq!(lp.bounds(0).unwrap(), (0.0, f64::INFINITY));
        assert_eq!(lp.bounds(1).unwrap(), (f64::NEG_INFINITY, f64::INFINITY));
        assert_eq!(lp.bounds(2).unwrap(), (0.0, 0.0));
    }

    #[test]
    fn test_drop_restores() {
        let mut lp = lp_with_cols();
        {
            let mut guard = FixGuard::new(&mut lp);
            guard.fix_one(0).unwrap();
        }
        assert_eq!(lp.bounds(0).unwrap(), (0.0, f64::INFINITY));
    }

    #[test]
    fn test_fix_out_of_range() {
        let mut lp = lp_with_cols();
        let mut guard = FixGuard::new(&mut lp);
        assert!(guard.fix_one(7).is_err());
        assert_eq!(guard.n_fixed(), 0);
    }
}
