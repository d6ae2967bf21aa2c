//! Consistency checks used by debug assertions.

use solver_lp::LpInterface;

use crate::cons::IndicatorConstraint;
use crate::model::Numerics;

/// Columns of usable constraints are `[0, inf)`; every other column has
/// only zero or infinite bounds.
pub fn lp_bounds_clean(lp: &dyn LpInterface, conss: &[IndicatorConstraint], num: &Numerics) -> bool {
    let n_cols = lp.n_cols();
    let mut covered = vec![false; n_cols];

    for cons in conss.iter().filter(|c| c.is_usable()) {
        let col = match cons.col_index {
            Some(col) => col,
            None => continue,
        };
        if col >= n_cols {
            log::warn!("column {} of {} out of range", col, cons.name);
            return false;
        }
        covered[col] = true;
        let (lb, ub) = match lp.bounds(col) {
            Ok(b) => b,
            Err(_) => return false,
        };
        if !num.is_feas_zero(lb) || !lp.is_infinity(ub) {
            log::warn!("column {} of {} has bounds [{}, {}]", col, cons.name, lb, ub);
            return false;
        }
    }

    for col in (0..n_cols).filter(|&c| !covered[c]) {
        let (lb, ub) = match lp.bounds(col) {
            Ok(b) => b,
            Err(_) => return false,
        };
        if (!lp.is_infinity(-lb) && !num.is_feas_zero(lb)) || (!lp.is_infinity(ub) && !num.is_feas_zero(ub)) {
            log::warn!("column {} has bounds [{}, {}]", col, lb, ub);
            return false;
        }
    }
    true
}

/// Whether the linear parts in the support of `primsol` are jointly
/// infeasible under the local bounds.
#[cfg(feature = "iis-check")]
pub fn iis_is_infeasible(
    model: &crate::model::Model,
    conss: &[IndicatorConstraint],
    primsol: &[f64],
) -> crate::error::IndicatorResult<bool> {
    use std::collections::HashMap;

    use solver_lp::{DenseSimplex, LpColumn};

    use crate::altlp::linear_part;
    use crate::model::VarId;

    let num = model.numerics;
    let mut lp = DenseSimplex::default();
    let mut cols: HashMap<VarId, usize> = HashMap::new();

    for cons in conss {
        let col = match cons.col_index {
            Some(col) => col,
            None => continue,
        };
        if num.is_feas_zero(primsol.get(col).copied().unwrap_or(0.0)) {
            continue;
        }
        let part = match linear_part(model, cons.lincons, Some(cons.slackvar)) {
            Some(part) => part,
            None => continue,
        };
        let (sign, rhs) = if num.is_infinity(part.rhs) {
            (-1.0, part.lhs)
        } else {
            (1.0, part.rhs)
        };

        let mut new_cols = Vec::new();
        let mut entries = Vec::new();
        for (&var, &a) in part.vars.iter().zip(&part.vals) {
            if var == cons.slackvar {
                continue;
            }
            let next = lp.n_cols() + new_cols.len();
            let j = *cols.entry(var).or_insert_with(|| {
                let v = model.var(var);
                let lb = if num.is_infinity(-v.lb_local) { f64::NEG_INFINITY } else { v.lb_local };
                let ub = if num.is_infinity(v.ub_local) { f64::INFINITY } else { v.ub_local };
                new_cols.push(LpColumn::new(0.0, lb, ub));
                next
            });
            entries.push((j, sign * a));
        }
        lp.add_cols(&new_cols)?;
        let row = lp.n_rows();
        lp.add_rows(&[f64::NEG_INFINITY], &[rhs])?;
        for (j, a) in entries {
            lp.chg_coef(row, j, a)?;
        }
    }

    lp.solve_primal()?;
    if !lp.is_primal_infeasible() {
        log::warn!("detected IIS is not infeasible in the original problem");
        return Ok(false);
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LinConsId, VarId};
    use solver_lp::{DenseSimplex, LpColumn};

    #[test]
    fn test_bounds_clean() {
        let num = Numerics::default();
        let mut lp = DenseSimplex::default();
        lp.add_rows(&[-1.0], &[-1.0]).unwrap();
        lp.add_cols(&[
            LpColumn::new(1.0, 0.0, f64::INFINITY),
            LpColumn::new(0.0, 0.0, f64::INFINITY),
            LpColumn::new(0.0, f64::NEG_INFINITY, f64::INFINITY),
        ])
        .unwrap();

        let mut cons = IndicatorConstraint::new("c", VarId(0), VarId(1), LinConsId(0), true);
        cons.col_index = Some(0);
        let mut conss = vec![cons];
        assert!(lp_bounds_clean(&lp, &conss, &num));

        // a fixed column of a usable constraint is not clean
        lp.chg_bounds(&[0], &[0.0], &[0.0]).unwrap();
        assert!(!lp_bounds_clean(&lp, &conss, &num));

        // but fine once the constraint is disabled
        conss[0].enabled = false;
        assert!(lp_bounds_clean(&lp, &conss, &num));

        lp.chg_bounds(&[1], &[0.0], &[3.0]).unwrap();
        assert!(!lp_bounds_clean(&lp, &conss, &num));
    }
}
