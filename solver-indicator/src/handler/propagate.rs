//! Domain propagation and conflict explanation.

use super::{HandlerResult, IndicatorHandler};
use crate::cons::ConsId;
use crate::error::IndicatorResult;
use crate::model::{Model, VarId};

/// Inference info: the binary was the reason.
pub(super) const REASON_BINARY: i32 = 0;

/// Inference info: the slack was the reason.
pub(super) const REASON_SLACK: i32 = 1;

/// Result of propagating a single constraint.
#[derive(Debug, Clone, Copy, Default)]
pub(super) struct PropOutcome {
    pub cutoff: bool,
    pub n_gen: usize,
}

impl IndicatorHandler {
    /// Tighten `var <= 0` on behalf of constraint `c`.
    fn infer_zero_ub(&mut self, model: &mut Model, c: usize, var: VarId, info: i32) -> Option<bool> {
        let out = model.infer_var_ub(var, 0.0, ConsId(c), info);
        if out.infeasible {
            return None;
        }
        if let Some(event) = out.event {
            self.process_bound_event(model, &event);
        }
        Some(out.tightened)
    }

    /// Propagate constraint `c` at the current node.
    ///
    /// Both variables nonzero is a cutoff; one nonzero forces the other to
    /// zero and deactivates the constraint locally; a slack fixed to zero
    /// makes the constraint redundant.
    pub(super) fn prop_indicator(&mut self, model: &mut Model, c: usize) -> IndicatorResult<PropOutcome> {
        let mut outcome = PropOutcome::default();
        let cons = &self.conss[c];
        if !cons.lincons_active {
            return Ok(outcome);
        }
        let (binvar, slackvar) = (cons.binvar, cons.slackvar);
        let num = model.numerics;

        if cons.n_fixed_nonzero > 1 {
            log::debug!("constraint <{}>: binary and slack both nonzero", cons.name);
            outcome.cutoff = true;
            return Ok(outcome);
        }

        if cons.n_fixed_nonzero == 1 {
            if model.var(binvar).lb_local > 0.5 {
                log::debug!(
                    "binary <{}> nonzero, fixing slack <{}> to 0",
                    model.var(binvar).name,
                    model.var(slackvar).name
                );
                match self.infer_zero_ub(model, c, slackvar, REASON_BINARY) {
                    Some(true) => outcome.n_gen += 1,
                    Some(false) => {}
                    None => {
                        outcome.cutoff = true;
                        return Ok(outcome);
                    }
                }
            }
            if num.is_feas_positive(model.var(slackvar).lb_local) {
                log::debug!(
                    "slack <{}> nonzero, fixing binary <{}> to 0",
                    model.var(slackvar).name,
                    model.var(binvar).name
                );
                match self.infer_zero_ub(model, c, binvar, REASON_SLACK) {
                    Some(true) => outcome.n_gen += 1,
                    Some(false) => {}
                    None => {
                        outcome.cutoff = true;
                        return Ok(outcome);
                    }
                }
            }
            self.delete_local(model, c)?;
        } else if num.is_feas_zero(model.var(slackvar).ub_local) {
            self.delete_local(model, c)?;
            outcome.n_gen += 1;
        }
        Ok(outcome)
    }

    pub(super) fn propagate_all(&mut self, model: &mut Model) -> IndicatorResult<HandlerResult> {
        let mut result = HandlerResult::DidNotRun;
        let mut n_gen = 0;
        for c in 0..self.conss.len() {
            if !self.conss[c].is_usable() {
                continue;
            }
            result = HandlerResult::DidNotFind;
            let outcome = self.prop_indicator(model, c)?;
            if outcome.cutoff {
                return Ok(HandlerResult::Cutoff);
            }
            n_gen += outcome.n_gen;
        }
        if n_gen > 0 {
            result = HandlerResult::ReducedDom;
        }
        Ok(result)
    }

    /// Add the reason of inference `info` of constraint `c` to the conflict.
    pub(super) fn resolve_inference(&self, model: &mut Model, c: usize, info: i32) -> HandlerResult {
        let cons = &self.conss[c];
        let reason = if info == REASON_BINARY {
            cons.binvar
        } else {
            cons.slackvar
        };
        model.outbox.conflict_vars.push(reason);
        HandlerResult::Success
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::ConstraintHandler;
    use crate::model::{Stage, VarType};
    use crate::settings::IndicatorSettings;

    fn setup() -> (Model, IndicatorHandler, ConsId) {
        let mut model = Model::new();
        let y = model.add_var("y", VarType::Binary, 0.0, 1.0, 0.0);
        let x = model.add_var("x", VarType::Continuous, 0.0, 10.0, 0.0);
        let mut handler = IndicatorHandler::new(IndicatorSettings::default()).unwrap();
        model.set_stage(Stage::Transformed);
        let c = handler
            .create_indicator(&mut model, "c", y, &[x], &[1.0], 5.0)
            .unwrap()
            .unwrap();
        model.set_stage(Stage::Solving);
        (model, handler, c)
    }

    #[test]
    fn test_binary_fixes_slack() {
        let (mut model, mut handler, c) = setup();
        let (y, s) = {
            let cons = handler.get(c).unwrap();
            (cons.binvar, cons.slackvar)
        };
        let ev = model.chg_var_lb_local(y, 1.0).unwrap();
        handler.process_bound_event(&model, &ev);

        let result = handler.propagate(&mut model).unwrap();
        assert_eq!(result, HandlerResult::ReducedDom);
        assert!((model.var(s).ub_local - 0.0).abs() < 1e-12);
        assert_eq!(model.outbox.inferences.len(), 1);
        assert_eq!(model.outbox.inferences[0].info, REASON_BINARY);
        assert_eq!(model.outbox.deleted_local, vec![c]);
        assert!(!handler.get(c).unwrap().enabled);

        handler
            .resolve_propagation(&mut model, c, s, REASON_BINARY)
            .unwrap();
        assert_eq!(model.outbox.conflict_vars, vec![y]);
    }

    #[test]
    fn test_slack_fixes_binary() {
        let (mut model, mut handler, c) = setup();
        let (y, s) = {
            let cons = handler.get(c).unwrap();
            (cons.binvar, cons.slackvar)
        };
        let ev = model.chg_var_lb_local(s, 2.0).unwrap();
        handler.process_bound_event(&model, &ev);

        assert_eq!(handler.propagate(&mut model).unwrap(), HandlerResult::ReducedDom);
        assert!((model.var(y).ub_local - 0.0).abs() < 1e-12);
        assert_eq!(model.outbox.inferences[0].info, REASON_SLACK);
    }

    #[test]
    fn test_both_nonzero_is_cutoff() {
        let (mut model, mut handler, c) = setup();
        let (y, s) = {
            let cons = handler.get(c).unwrap();
            (cons.binvar, cons.slackvar)
        };
        for ev in [model.chg_var_lb_local(y, 1.0), model.chg_var_lb_local(s, 1.0)]
            .into_iter()
            .flatten()
        {
            handler.process_bound_event(&model, &ev);
        }
        assert_eq!(handler.propagate(&mut model).unwrap(), HandlerResult::Cutoff);
    }

    #[test]
    fn test_nothing_to_do() {
        let (mut model, mut handler, _) = setup();
        assert_eq!(handler.propagate(&mut model).unwrap(), HandlerResult::DidNotFind);
        assert!(model.outbox.deleted_local.is_empty());
    }
}
