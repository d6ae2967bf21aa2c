//! Enforcement of indicator constraints on relaxation solutions.

use super::{HandlerResult, IndicatorHandler};
use crate::error::IndicatorResult;
use crate::model::{BoundChange, BranchChild, Model};
use crate::separation::enforce_cuts;

impl IndicatorHandler {
    /// Enforce all constraints on the current LP solution.
    ///
    /// Propagation runs first. If some linear part is not materialized (or
    /// `enforce_cuts` is set) the alternative LP is asked for cuts; otherwise
    /// the violated constraint with the largest slack value is branched on.
    pub(super) fn enforce_indicators(&mut self, model: &mut Model, gen_logicor: bool) -> IndicatorResult<HandlerResult> {
        let num = model.numerics;
        let mut some_not_active = false;
        let mut branch_cons = None;
        let mut max_slack = -1.0;

        for c in 0..self.conss.len() {
            if !self.conss[c].is_usable() {
                continue;
            }
            if !self.conss[c].lincons_active {
                some_not_active = true;
                continue;
            }

            let outcome = self.prop_indicator(model, c)?;
            if outcome.cutoff {
                return Ok(HandlerResult::Cutoff);
            }
            if outcome.n_gen > 0 {
                return Ok(HandlerResult::ReducedDom);
            }

            let cons = &self.conss[c];
            let bin_val = model.sol_val(None, cons.binvar);
            let slack_val = model.sol_val(None, cons.slackvar);
            if !num.is_feas_zero(bin_val) && !num.is_feas_zero(slack_val) && slack_val > max_slack {
                max_slack = slack_val;
                branch_cons = Some(c);
            }
        }

        if (some_not_active || self.settings.enforce_cuts) && self.settings.sepa_alternative_lp {
            if let Some(ctx) = self.ctx.as_mut() {
                let n_gen = enforce_cuts(ctx, model, &self.conss, None, &self.settings, gen_logicor)?;
                if n_gen > 0 {
                    return Ok(if gen_logicor {
                        HandlerResult::ConsAdded
                    } else {
                        HandlerResult::Separated
                    });
                }
            }
        }

        let c = match branch_cons {
            Some(c) => c,
            None => return Ok(HandlerResult::Feasible),
        };
        if !self.settings.branch_indicators {
            return Ok(HandlerResult::Infeasible);
        }

        let cons = &self.conss[c];
        let (binvar, slackvar) = (cons.binvar, cons.slackvar);
        log::debug!("branching on <{}> (slack value {})", cons.name, max_slack);
        let (bin_lb, bin_ub) = (model.var(binvar).lb_local, model.var(binvar).ub_local);
        let (slack_lb, slack_ub) = (model.var(slackvar).lb_local, model.var(slackvar).ub_local);

        // y = 1, s = 0
        let mut enforced = BranchChild {
            estimate: model.child_estimate(binvar, 1.0),
            bound_changes: Vec::new(),
        };
        if bin_lb < 0.5 {
            enforced.bound_changes.push(BoundChange::lower(binvar, bin_lb, bin_ub, 1.0));
        }
        if !num.is_feas_zero(slack_ub) {
            enforced.bound_changes.push(BoundChange::upper(slackvar, slack_lb, slack_ub, 0.0));
        }

        // y = 0
        let mut released = BranchChild {
            estimate: model.child_estimate(binvar, 0.0),
            bound_changes: Vec::new(),
        };
        if bin_ub > 0.5 {
            released.bound_changes.push(BoundChange::upper(binvar, bin_lb, bin_ub, 0.0));
        }

        model.outbox.children.push(enforced);
        model.outbox.children.push(released);
        Ok(HandlerResult::Branched)
    }
}

#[cfg(test)]
mod tests {
    use crate::cons::ConsId;
    use crate::handler::{ConstraintHandler, HandlerResult, IndicatorHandler};
    use crate::model::{Model, Solution, Stage, VarId, VarType};
    use crate::settings::IndicatorSettings;

    fn setup(settings: IndicatorSettings) -> (Model, IndicatorHandler, ConsId, VarId, VarId) {
        let mut model = Model::new();
        let y = model.add_var("y", VarType::Binary, 0.0, 1.0, 1.0);
        let x = model.add_var("x", VarType::Continuous, 0.0, 10.0, 0.0);
        let mut handler = IndicatorHandler::new(settings).unwrap();
        model.set_stage(Stage::Transformed);
        let c = handler
            .create_indicator(&mut model, "c", y, &[x], &[1.0], 5.0)
            .unwrap()
            .unwrap();
        let s = handler.get(c).unwrap().slackvar;
        model.set_stage(Stage::Solving);
        (model, handler, c, y, s)
    }

    fn lp_point(model: &mut Model, values: &[(VarId, f64)]) {
        let mut sol = Solution::new(model.n_vars());
        for &(v, val) in values {
            sol.set_value(v, val);
        }
        model.set_lp_solution(sol);
    }

    #[test]
    fn test_feasible_point() {
        let (mut model, mut handler, _, y, s) = setup(IndicatorSettings::default());
        lp_point(&mut model, &[(y, 1.0), (s, 0.0)]);
        assert_eq!(handler.enforce_lp(&mut model, false).unwrap(), HandlerResult::Feasible);
    }

    #[test]
    fn test_violated_without_branching() {
        let (mut model, mut handler, _, y, s) = setup(IndicatorSettings::default());
        lp_point(&mut model, &[(y, 0.5), (s, 3.0)]);
        assert_eq!(handler.enforce_lp(&mut model, false).unwrap(), HandlerResult::Infeasible);
        assert!(model.outbox.children.is_empty());
    }

    #[test]
    fn test_branching_children() {
        let settings = IndicatorSettings::default().with_branch_indicators(true);
        let (mut model, mut handler, _, y, s) = setup(settings);
        lp_point(&mut model, &[(y, 0.5), (s, 3.0)]);

        assert_eq!(handler.enforce_lp(&mut model, false).unwrap(), HandlerResult::Branched);
        let children = &model.outbox.children;
        assert_eq!(children.len(), 2);

        let enforced = &children[0];
        assert_eq!(enforced.bound_changes.len(), 2);
        assert_eq!(enforced.bound_changes[0].var, y);
        assert!((enforced.bound_changes[0].new_lb - 1.0).abs() < 1e-12);
        assert_eq!(enforced.bound_changes[1].var, s);
        assert!((enforced.bound_changes[1].new_ub - 0.0).abs() < 1e-12);
        // objective coefficient 1 on y, moved from 0.5 to 1
        assert!((enforced.estimate - 1.0).abs() < 1e-9);

        let released = &children[1];
        assert_eq!(released.bound_changes.len(), 1);
        assert!((released.bound_changes[0].new_ub - 0.0).abs() < 1e-12);
        assert!((released.estimate - 0.0).abs() < 1e-9);
    }

    #[test]
    fn test_branches_on_largest_slack() {
        let settings = IndicatorSettings::default().with_branch_indicators(true);
        let (mut model, mut handler, _, y, s) = setup(settings);
        let x = model.find_var("x").unwrap();
        let y2 = model.add_var("y2", VarType::Binary, 0.0, 1.0, 0.0);
        let c2 = handler
            .create_indicator(&mut model, "c2", y2, &[x], &[-1.0], -1.0)
            .unwrap()
            .unwrap();
        let s2 = handler.get(c2).unwrap().slackvar;
        lp_point(&mut model, &[(y, 0.5), (s, 1.0), (y2, 0.5), (s2, 4.0)]);

        assert_eq!(handler.enforce_lp(&mut model, false).unwrap(), HandlerResult::Branched);
        assert_eq!(model.outbox.children[0].bound_changes[0].var, y2);
    }

    #[test]
    fn test_propagation_first() {
        let (mut model, mut handler, c, y, s) = setup(IndicatorSettings::default());
        let ev = model.chg_var_lb_local(y, 1.0).unwrap();
        handler.process_bound_event(&model, &ev);
        lp_point(&mut model, &[(y, 1.0), (s, 3.0)]);

        assert_eq!(handler.enforce_lp(&mut model, false).unwrap(), HandlerResult::ReducedDom);
        assert!((model.var(s).ub_local - 0.0).abs() < 1e-12);
        assert!(!handler.get(c).unwrap().enabled);
    }

    #[test]
    fn test_pseudo_objective_infeasible() {
        let (mut model, mut handler, _, _, _) = setup(IndicatorSettings::default());
        assert_eq!(
            handler.enforce_pseudo(&mut model, false, true).unwrap(),
            HandlerResult::DidNotRun
        );
    }
}
