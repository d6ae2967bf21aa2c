//! Adding linear parts as alternative LP columns.

use solver_lp::LpColumn;

use super::registry::SlackRow;
use super::SeparationContext;
use crate::error::IndicatorResult;
use crate::model::{LinConsId, Model, VarId, VarStatus};

/// A linear inequality `lhs <= sum vals * vars <= rhs` as seen by the alternative LP.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearPart {
    /// Variables.
    pub vars: Vec<VarId>,

    /// Coefficients.
    pub vals: Vec<f64>,

    /// Left-hand side.
    pub lhs: f64,

    /// Right-hand side.
    pub rhs: f64,
}

/// The inequality represented by `lincons` with slack `slackvar`.
///
/// An aggregated slack `s = scalar * x + constant` is replaced by the single
/// inequality `scalar * x <= constant`. Returns `None` if nothing usable
/// remains.
pub fn linear_part(model: &Model, lincons: LinConsId, slackvar: Option<VarId>) -> Option<LinearPart> {
    let cons = model.lincons(lincons);
    if let Some(s) = slackvar {
        if let VarStatus::Aggregated { .. } = model.var(s).status {
            let (var, scalar, constant) = model.probvar_sum(s);
            if model.numerics.is_zero(scalar) && !cons.active {
                return None;
            }
            return Some(LinearPart {
                vars: vec![var],
                vals: vec![scalar],
                lhs: f64::NEG_INFINITY,
                rhs: constant,
            });
        }
        if !cons.active {
            return None;
        }
    }
    Some(LinearPart {
        vars: cons.vars.clone(),
        vals: cons.vals.clone(),
        lhs: cons.lhs,
        rhs: cons.rhs,
    })
}

impl SeparationContext {
    /// Add the linear part of `lincons` as a new column.
    ///
    /// Returns the column index, or `None` if the constraint has no
    /// representable part. Rows for variables seen for the first time are
    /// created, together with one column per finite global bound.
    pub fn add_constraint(
        &mut self,
        model: &Model,
        lincons: LinConsId,
        slackvar: Option<VarId>,
        objcoef: f64,
    ) -> IndicatorResult<Option<usize>> {
        let num = model.numerics;
        let part = match linear_part(model, lincons, slackvar) {
            Some(part) => part,
            None => return Ok(None),
        };
        if num.is_infinity(part.rhs) && num.is_infinity(-part.lhs) {
            log::debug!("linear constraint {} is free, not added", model.lincons(lincons).name);
            return Ok(None);
        }

        self.init_lp()?;
        let lp = match self.lp.as_deref_mut() {
            Some(lp) => lp,
            None => return Ok(None),
        };
        let inf = lp.infinity();
        let col = lp.n_cols();

        // an upper side is used directly, a lower side with flipped sign
        let (sign, val) = if num.is_infinity(part.rhs) {
            (-1.0, part.lhs)
        } else {
            (1.0, part.rhs)
        };

        let mut entries: Vec<(usize, f64)> = Vec::with_capacity(part.vars.len() + 1);
        if !num.is_feas_zero(val) {
            entries.push((0, sign * val));
        }

        // rows created by this call, registered only once the column exists
        let mut new_rows: Vec<(VarId, bool)> = Vec::new();
        for (&var, &a) in part.vars.iter().zip(&part.vals) {
            if Some(var) == slackvar {
                continue;
            }
            let known = match self.registry.slack_row(var) {
                Some(SlackRow::Row(row)) => Some(row),
                Some(SlackRow::Unused) => None,
                None => self.registry.var_row(var),
            };
            let row = match known {
                Some(row) => row,
                None => match new_rows.iter().position(|&(v, _)| v == var) {
                    Some(k) => self.n_rows + k,
                    None => {
                        new_rows.push((var, self.registry.is_slack(var)));
                        self.n_rows + new_rows.len() - 1
                    }
                },
            };
            entries.push((row, sign * a));
        }
        let first_new_row = self.n_rows;

        if !new_rows.is_empty() {
            let lhs: Vec<f64> = new_rows
                .iter()
                .map(|&(_, slack)| if slack { -inf } else { 0.0 })
                .collect();
            let rhs = vec![0.0; lhs.len()];
            lp.add_rows(&lhs, &rhs)?;
            self.n_rows += new_rows.len();
        }

        let lb = if num.is_eq(part.lhs, part.rhs) { -inf } else { 0.0 };
        let mut cols = vec![LpColumn {
            obj: objcoef,
            lb,
            ub: inf,
            entries,
        }];

        let mut new_lb_cols: Vec<(VarId, usize)> = Vec::new();
        let mut new_ub_cols: Vec<(VarId, usize)> = Vec::new();
        for (k, &(var, slack)) in new_rows.iter().enumerate() {
            if slack {
                continue;
            }
            let row = first_new_row + k;
            let v = model.var(var);
            if !num.is_infinity(-v.lb_global) {
                let mut bound_col = LpColumn::new(0.0, 0.0, inf);
                if !num.is_zero(v.lb_global) {
                    bound_col = bound_col.with_entry(0, -v.lb_global);
                }
                new_lb_cols.push((var, col + cols.len()));
                cols.push(bound_col.with_entry(row, -1.0));
            }
            if !num.is_infinity(v.ub_global) {
                let mut bound_col = LpColumn::new(0.0, 0.0, inf);
                if !num.is_zero(v.ub_global) {
                    bound_col = bound_col.with_entry(0, v.ub_global);
                }
                new_ub_cols.push((var, col + cols.len()));
                cols.push(bound_col.with_entry(row, 1.0));
            }
        }

        lp.add_cols(&cols)?;
        self.scaled = false;

        for (k, &(var, slack)) in new_rows.iter().enumerate() {
            if slack {
                self.registry.set_slack_row(var, first_new_row + k);
            } else {
                self.registry.insert_var_row(var, first_new_row + k);
            }
        }
        self.n_lb_bounds += new_lb_cols.len();
        self.n_ub_bounds += new_ub_cols.len();
        for (var, c) in new_lb_cols {
            self.registry.insert_lb_col(var, c);
        }
        for (var, c) in new_ub_cols {
            self.registry.insert_ub_col(var, c);
        }

        debug_assert_eq!(lp.n_rows(), self.n_rows);
        log::debug!(
            "added column {} for {} ({} new rows, {} bound columns)",
            col,
            model.lincons(lincons).name,
            new_rows.len(),
            cols.len() - 1
        );
        Ok(Some(col))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::altlp::default_lp_factory;
    use crate::model::VarType;

    #[test]
    fn test_add_constraint_layout() {
        let mut model = Model::new();
        let x = model.add_var("x", VarType::Continuous, 0.0, 10.0, 0.0);
        let s = model.add_var("s", VarType::Continuous, 0.0, f64::INFINITY, 0.0);
        // x - s <= 5
        let c = model.add_linear("c", &[x, s], &[1.0, -1.0], f64::NEG_INFINITY, 5.0).unwrap();

        let mut ctx = SeparationContext::new(default_lp_factory());
        ctx.register_slack(s);
        let col = ctx.add_constraint(&model, c, Some(s), 1.0).unwrap();
        assert_eq!(col, Some(0));

        // row 0 plus one row for x; slack skipped
        assert_eq!(ctx.n_rows(), 2);
        assert_eq!(ctx.n_lb_bounds(), 1);
        assert_eq!(ctx.n_ub_bounds(), 1);

        // zero lower bound has no row 0 entry
        let lp = ctx.lp().unwrap();
        assert_eq!(lp.n_cols(), 3);
        assert_eq!(lp.row(0).unwrap(), vec![(0, 5.0), (2, 10.0)]);
        assert_eq!(lp.row(1).unwrap(), vec![(0, 1.0), (1, -1.0), (2, 1.0)]);
        assert_eq!(ctx.registry().lb_col(x), Some(1));
        assert_eq!(ctx.registry().ub_col(x), Some(2));
        assert_eq!(ctx.registry().slack_row(s), Some(SlackRow::Unused));
    }

    #[test]
    fn test_lower_side_flips_sign() {
        let mut model = Model::new();
        let x = model.add_var("x", VarType::Continuous, -1.0, f64::INFINITY, 0.0);
        // x >= 8
        let c = model.add_linear("c", &[x], &[1.0], 8.0, f64::INFINITY).unwrap();

        let mut ctx = SeparationContext::new(default_lp_factory());
        let col = ctx.add_constraint(&model, c, None, 0.0).unwrap();
        assert_eq!(col, Some(0));
        assert_eq!(ctx.n_lb_bounds(), 1);

        let lp = ctx.lp().unwrap();
        assert_eq!(lp.row(0).unwrap(), vec![(0, -8.0), (1, 1.0)]);
        assert_eq!(lp.row(1).unwrap(), vec![(0, -1.0), (1, -1.0)]);
        assert_eq!(lp.bounds(0).unwrap(), (0.0, f64::INFINITY));
    }

    #[test]
    fn test_equality_gives_free_column() {
        let mut model = Model::new();
        let x = model.add_var("x", VarType::Continuous, f64::NEG_INFINITY, f64::INFINITY, 0.0);
        let c = model.add_linear("c", &[x], &[2.0], 4.0, 4.0).unwrap();

        let mut ctx = SeparationContext::new(default_lp_factory());
        ctx.add_constraint(&model, c, None, 0.0).unwrap();
        let lp = ctx.lp().unwrap();
        assert_eq!(lp.n_cols(), 1);
        assert_eq!(lp.bounds(0).unwrap(), (f64::NEG_INFINITY, f64::INFINITY));
    }

    #[test]
    fn test_other_slack_gets_inequality_row() {
        let mut model = Model::new();
        let x = model.add_var("x", VarType::Continuous, 0.0, 10.0, 0.0);
        let s1 = model.add_var("s1", VarType::Continuous, 0.0, f64::INFINITY, 0.0);
        let s2 = model.add_var("s2", VarType::Continuous, 0.0, f64::INFINITY, 0.0);
        let c = model.add_linear("c", &[x, s1, s2], &[1.0, -1.0, 1.0], f64::NEG_INFINITY, 3.0).unwrap();

        let mut ctx = SeparationContext::new(default_lp_factory());
        ctx.register_slack(s1);
        ctx.register_slack(s2);
        ctx.add_constraint(&model, c, Some(s1), 1.0).unwrap();

        assert_eq!(ctx.n_rows(), 3);
        assert_eq!(ctx.registry().var_row(x), Some(1));
        assert_eq!(ctx.registry().slack_row(s2), Some(SlackRow::Row(2)));
        let lp = ctx.lp().unwrap();
        assert_eq!(lp.sides(2).unwrap(), (f64::NEG_INFINITY, 0.0));
        assert_eq!(lp.sides(1).unwrap(), (0.0, 0.0));
    }

    #[test]
    fn test_inactive_linear_part_skipped() {
        let mut model = Model::new();
        let x = model.add_var("x", VarType::Continuous, 0.0, 10.0, 0.0);
        let s = model.add_var("s", VarType::Continuous, 0.0, f64::INFINITY, 0.0);
        let c = model.add_linear("c", &[x, s], &[1.0, -1.0], f64::NEG_INFINITY, 5.0).unwrap();
        model.lincons_mut(c).active = false;

        let mut ctx = SeparationContext::new(default_lp_factory());
        assert_eq!(ctx.add_constraint(&model, c, Some(s), 1.0).unwrap(), None);
        assert!(!ctx.has_lp());
    }
}
