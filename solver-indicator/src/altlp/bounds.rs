//! Keeping row 0 in sync with variable bounds.

use super::SeparationContext;
use crate::error::IndicatorResult;
use crate::model::Model;

/// Local bound changes above this count force a rescale of row 0.
const RESCALE_LOCAL_CHANGES: usize = 10;

impl SeparationContext {
    /// Permanently fix a deleted constraint's column to zero.
    pub fn delete_column(&mut self, col: usize) -> IndicatorResult<()> {
        if let Some(lp) = self.lp.as_deref_mut() {
            lp.chg_bounds(&[col], &[0.0], &[0.0])?;
            self.scaled = false;
        }
        Ok(())
    }

    /// Fix a column to zero while its constraint is disabled.
    pub fn fix_column(&mut self, col: usize) -> IndicatorResult<()> {
        if let Some(lp) = self.lp.as_deref_mut() {
            lp.chg_bounds(&[col], &[0.0], &[0.0])?;
        }
        Ok(())
    }

    /// Release a column to `[0, inf)`.
    pub fn unfix_column(&mut self, col: usize) -> IndicatorResult<()> {
        if let Some(lp) = self.lp.as_deref_mut() {
            let inf = lp.infinity();
            lp.chg_bounds(&[col], &[0.0], &[inf])?;
        }
        Ok(())
    }

    /// Write local bounds into row 0.
    pub fn update_first_row(&mut self, model: &Model) -> IndicatorResult<()> {
        let num = model.numerics;
        let lp = match self.lp.as_deref_mut() {
            Some(lp) => lp,
            None => return Ok(()),
        };
        let mut cnt = 0;
        for var in model.var_ids() {
            let v = model.var(var);
            if let Some(col) = self.registry.lb_col(var) {
                lp.chg_coef(0, col, -v.lb_local)?;
                if !num.is_eq(v.lb_local, v.lb_global) {
                    cnt += 1;
                }
            }
            if let Some(col) = self.registry.ub_col(var) {
                lp.chg_coef(0, col, v.ub_local)?;
                if !num.is_eq(v.ub_local, v.ub_global) {
                    cnt += 1;
                }
            }
        }
        if cnt > RESCALE_LOCAL_CHANGES {
            self.scaled = false;
        }
        Ok(())
    }

    /// Write global bounds into row 0.
    pub fn update_first_row_global(&mut self, model: &Model) -> IndicatorResult<()> {
        let lp = match self.lp.as_deref_mut() {
            Some(lp) => lp,
            None => return Ok(()),
        };
        for var in model.var_ids() {
            let v = model.var(var);
            if let Some(col) = self.registry.lb_col(var) {
                lp.chg_coef(0, col, -v.lb_global)?;
            }
            if let Some(col) = self.registry.ub_col(var) {
                lp.chg_coef(0, col, v.ub_global)?;
            }
        }
        Ok(())
    }

    /// Set both sides of row 0 to minus the mean absolute coefficient.
    ///
    /// No-op if already scaled since the last change.
    pub fn scale_first_row(&mut self) -> IndicatorResult<()> {
        if self.scaled {
            return Ok(());
        }
        let lp = match self.lp.as_deref_mut() {
            Some(lp) => lp,
            None => return Ok(()),
        };
        let row = lp.row(0)?;
        if !row.is_empty() {
            let sum: f64 = row.iter().map(|(_, v)| v.abs()).sum();
            let side = -sum.abs() / row.len() as f64;
            lp.chg_sides(&[0], &[side], &[side])?;
            log::debug!("scaled first row to {side:.6}");
        }
        self.scaled = true;
        Ok(())
    }

    /// Whether a cut derived from the alternative LP point `primsol` is
    /// only valid in the current subtree.
    pub fn check_iis_local(&self, model: &Model, primsol: &[f64]) -> bool {
        self.registry.uses_local_bounds(model, primsol)
    }
}
