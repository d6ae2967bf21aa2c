//! Checking complete solutions and repairing them.

use super::{HandlerResult, IndicatorHandler};
use crate::cons::ConsId;
use crate::error::IndicatorResult;
use crate::model::{Model, Solution, Stage};
use crate::separation::check_alt_lp_feasibility;

impl IndicatorHandler {
    /// Whether constraint `cons` is violated by `sol` (the LP solution if
    /// `None`).
    ///
    /// A constraint whose linear part is not materialized cannot be judged
    /// locally and is reported as violated.
    pub fn is_violated(&self, model: &Model, cons: ConsId, sol: Option<&Solution>) -> IndicatorResult<bool> {
        let cons = self.get(cons)?;
        if !cons.lincons_active {
            return Ok(true);
        }
        let num = model.numerics;
        Ok(num.is_feas_positive(model.sol_val(sol, cons.slackvar))
            && num.is_feas_positive(model.sol_val(sol, cons.binvar)))
    }

    /// Repair `sol` so that constraint `cons` holds.
    ///
    /// The slack is set to the violation of the linear part; if that is
    /// positive the binary is set to 0, otherwise the binary is moved in the
    /// direction of its objective where the locks allow it. Returns whether
    /// `sol` was changed.
    pub fn make_indicator_feasible(&self, model: &Model, cons: ConsId, sol: &mut Solution) -> IndicatorResult<bool> {
        let cons = self.get(cons)?;
        if cons.deleted && model.stage() >= Stage::Presolving {
            return Ok(false);
        }
        if !cons.lincons_active {
            return Ok(false);
        }
        let lincons = model.lincons(cons.lincons);
        if !(lincons.active || model.stage() < Stage::Presolving) {
            return Ok(false);
        }

        let num = model.numerics;
        let mut sum = 0.0;
        let mut slack_coef = 0.0;
        for (&v, &a) in lincons.vars.iter().zip(&lincons.vals) {
            if v == cons.slackvar {
                slack_coef = a;
            } else {
                sum += a * model.sol_val(Some(sol), v);
            }
        }
        if slack_coef == 0.0 {
            return Ok(false);
        }
        if !num.is_infinity(lincons.rhs) {
            sum -= lincons.rhs;
        } else if !num.is_infinity(-lincons.lhs) {
            sum = lincons.lhs - sum;
        }

        let mut changed = false;
        let (binvar, slackvar) = (cons.binvar, cons.slackvar);
        if num.is_feas_positive(sum) {
            if !num.is_feas_eq(model.sol_val(Some(sol), slackvar), sum) {
                model.set_sol_val(sol, slackvar, sum);
                changed = true;
            }
            if !num.is_feas_eq(model.sol_val(Some(sol), binvar), 0.0) {
                model.set_sol_val(sol, binvar, 0.0);
                changed = true;
            }
        } else {
            if !num.is_feas_eq(model.sol_val(Some(sol), slackvar), 0.0) {
                model.set_sol_val(sol, slackvar, 0.0);
                changed = true;
            }
            let bin = model.var(binvar);
            let bin_val = model.sol_val(Some(sol), binvar);
            if bin.obj < 0.0 {
                if bin.may_round_up() && !num.is_feas_eq(bin_val, 1.0) {
                    model.set_sol_val(sol, binvar, 1.0);
                    changed = true;
                }
            } else if bin.may_round_down() && !num.is_feas_eq(bin_val, 0.0) {
                model.set_sol_val(sol, binvar, 0.0);
                changed = true;
            }
        }
        Ok(changed)
    }

    pub(super) fn check_solution(
        &mut self,
        model: &mut Model,
        sol: &Solution,
        print_reason: bool,
    ) -> IndicatorResult<HandlerResult> {
        let num = model.numerics;
        let mut try_sol = if model.stage() < Stage::Solved && self.settings.try_solutions {
            Some(sol.clone())
        } else {
            None
        };
        let mut result = HandlerResult::Feasible;
        let mut some_not_active = false;
        let mut changed = false;

        for c in 0..self.conss.len() {
            let cons = &self.conss[c];
            if cons.deleted {
                continue;
            }
            if !cons.lincons_active {
                some_not_active = true;
                continue;
            }

            let slack_val = model.sol_val(Some(sol), cons.slackvar);
            let bin_val = model.sol_val(Some(sol), cons.binvar);
            if !num.is_feas_zero(bin_val) && !num.is_feas_zero(slack_val) {
                result = HandlerResult::Infeasible;
                if print_reason {
                    log::info!(
                        "{}; violation: <{}> = {}, <{}> = {}",
                        self.print_cons(model, c),
                        model.var(cons.binvar).name,
                        bin_val,
                        model.var(cons.slackvar).name,
                        slack_val
                    );
                }
                if try_sol.is_none() {
                    return Ok(result);
                }
            }
            if let Some(ts) = try_sol.as_mut() {
                changed |= self.make_indicator_feasible(model, ConsId(c), ts)?;
            }
        }

        if some_not_active {
            let feasible = match self.ctx.as_mut() {
                Some(ctx) => check_alt_lp_feasibility(ctx, model, &self.conss, Some(sol), &self.settings)?,
                None => false,
            };
            if !feasible {
                log::debug!("linear parts not materialized: alternative LP check failed");
                result = HandlerResult::Infeasible;
            }
        } else if changed {
            if let Some(ts) = try_sol {
                log::debug!("passing repaired solution to the try-solution heuristic");
                model.outbox.try_solutions.push(ts);
            }
        }
        Ok(result)
    }
}
