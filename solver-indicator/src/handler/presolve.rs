//! Presolving and coupling constraints.

use super::{HandlerResult, IndicatorHandler};
use crate::cuts::{CutSource, LinearCut};
use crate::error::IndicatorResult;
use crate::model::{Implication, Model, VarBound};

/// Reductions found by all presolvers since the handler last ran.
#[derive(Debug, Clone, Copy, Default)]
pub struct PresolveRound {
    /// Presolving rounds performed so far.
    pub n_rounds: usize,

    /// Newly fixed variables.
    pub new_fixed_vars: usize,

    /// Newly aggregated variables.
    pub new_aggr_vars: usize,

    /// Newly changed variable types.
    pub new_chg_var_types: usize,

    /// Newly changed bounds.
    pub new_chg_bds: usize,

    /// Newly deleted constraints.
    pub new_del_conss: usize,

    /// Newly changed coefficients.
    pub new_chg_coefs: usize,

    /// Newly changed sides.
    pub new_chg_sides: usize,
}

impl PresolveRound {
    /// No presolver changed anything since the last call.
    pub fn no_reductions(&self) -> bool {
        self.new_fixed_vars == 0
            && self.new_aggr_vars == 0
            && self.new_chg_var_types == 0
            && self.new_chg_bds == 0
            && self.new_del_conss == 0
            && self.new_chg_coefs == 0
            && self.new_chg_sides == 0
    }
}

/// Presolving counters the handler adds to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PresolveCounters {
    /// Fixed variables.
    pub fixed_vars: usize,

    /// Deleted constraints.
    pub del_conss: usize,

    /// Constraints upgraded to other constraint types.
    pub upgd_conss: usize,
}

impl IndicatorHandler {
    pub(super) fn presolve_round(
        &mut self,
        model: &mut Model,
        round: &PresolveRound,
        counters: &mut PresolveCounters,
    ) -> IndicatorResult<HandlerResult> {
        let mut result = HandlerResult::DidNotRun;
        let fixed_at_start = counters.fixed_vars;
        let num = model.numerics;

        for c in 0..self.conss.len() {
            if self.conss[c].deleted {
                continue;
            }
            if result == HandlerResult::DidNotRun {
                result = HandlerResult::DidNotFind;
            }
            if !self.conss[c].lincons_active {
                continue;
            }
            let changed = round.n_rounds == 0
                || round.new_fixed_vars > 0
                || round.new_chg_bds > 0
                || round.new_aggr_vars > 0
                || counters.fixed_vars > fixed_at_start;
            if !changed {
                continue;
            }

            let (binvar, slackvar) = (self.conss[c].binvar, self.conss[c].slackvar);
            let (bin_lb, bin_ub) = (model.var(binvar).lb_global, model.var(binvar).ub_global);
            let (slack_lb, slack_ub) = (model.var(slackvar).lb_global, model.var(slackvar).ub_global);

            if bin_lb > 0.5 {
                if num.is_feas_positive(slack_lb) {
                    log::debug!("<{}>: binary fixed to 1 and slack positive", self.conss[c].name);
                    return Ok(HandlerResult::Cutoff);
                }
                log::debug!("<{}>: binary fixed to 1, fixing slack to 0", self.conss[c].name);
                let (infeasible, fixed) = self.fix_and_notify(model, slackvar, 0.0);
                if infeasible {
                    return Ok(HandlerResult::Cutoff);
                }
                if fixed {
                    counters.fixed_vars += 1;
                }
            } else if bin_ub < 0.5 {
                log::debug!("<{}>: binary fixed to 0, deleting", self.conss[c].name);
            } else if num.is_feas_positive(slack_lb) {
                log::debug!("<{}>: slack positive, fixing binary to 0", self.conss[c].name);
                let (infeasible, fixed) = self.fix_and_notify(model, binvar, 0.0);
                if infeasible {
                    return Ok(HandlerResult::Cutoff);
                }
                if fixed {
                    counters.fixed_vars += 1;
                }
            } else if num.is_feas_zero(slack_ub) {
                log::debug!("<{}>: slack fixed to 0, deleting", self.conss[c].name);
            } else {
                continue;
            }

            self.delete_global(model, c)?;
            counters.del_conss += 1;
            result = HandlerResult::Success;
        }

        if round.no_reductions()
            && result != HandlerResult::Success
            && self.settings.add_coupling_cons
            && !self.added_coupling_cons
        {
            let n_gen = self.create_var_ubs(model)?;
            if n_gen > 0 {
                result = HandlerResult::Success;
                counters.upgd_conss += n_gen;
                if self.settings.remove_indicators {
                    counters.del_conss += n_gen;
                }
            }
            self.added_coupling_cons = true;
        }
        Ok(result)
    }

    /// Emit the coupling varbounds `s + M y <= M` with `M = ub(s)`.
    ///
    /// Returns the number of varbounds generated.
    pub(super) fn create_var_ubs(&mut self, model: &mut Model) -> IndicatorResult<usize> {
        let num = model.numerics;
        let mut n_gen = 0;
        for c in 0..self.conss.len() {
            if self.conss[c].deleted {
                continue;
            }
            let (binvar, slackvar) = (self.conss[c].binvar, self.conss[c].slackvar);
            let ub = model.var(slackvar).ub_global;
            if num.is_infinity(ub) || ub > self.settings.max_coupling_value {
                continue;
            }
            model.outbox.varbounds.push(VarBound {
                name: format!("couple{}", c),
                var: slackvar,
                vbvar: binvar,
                coef: ub,
                lhs: -num.infinity,
                rhs: ub,
                check: self.settings.remove_indicators,
                removable: !self.settings.remove_indicators,
            });
            n_gen += 1;
            if self.settings.remove_indicators {
                self.delete_global(model, c)?;
            }
        }
        log::debug!("added {} coupling varbounds", n_gen);
        Ok(n_gen)
    }

    pub(super) fn exit_presolve(&mut self, model: &mut Model) -> IndicatorResult<HandlerResult> {
        if self.settings.add_coupling_cons && !self.added_coupling_cons {
            self.create_var_ubs(model)?;
            self.added_coupling_cons = true;
        }

        for cons in self.conss.iter().filter(|c| c.lincons_active && !c.deleted) {
            let bin_lb = model.var(cons.binvar).lb_local;
            if bin_lb > 0.5 && model.numerics.is_feas_positive(model.var(cons.slackvar).lb_local) {
                return Ok(HandlerResult::Cutoff);
            }
            model.outbox.implications.push(Implication {
                binvar: cons.binvar,
                implied: cons.slackvar,
                bound: 0.0,
            });
        }
        Ok(HandlerResult::Feasible)
    }

    /// Add coupling rows `s + M y <= M` to the initial LP.
    pub(super) fn add_coupling_rows(&mut self, model: &mut Model) {
        if !self.settings.add_coupling || (self.settings.add_coupling_cons && self.added_coupling_cons) {
            return;
        }
        let num = model.numerics;
        for (c, cons) in self.conss.iter().enumerate() {
            if cons.deleted || !cons.lincons_active {
                continue;
            }
            let ub = model.var(cons.slackvar).ub_global;
            if num.is_infinity(ub) || ub > self.settings.max_coupling_value {
                continue;
            }
            let name = format!("couple{}", c);
            if self.settings.add_coupling_cons {
                model.outbox.varbounds.push(VarBound {
                    name,
                    var: cons.slackvar,
                    vbvar: cons.binvar,
                    coef: ub,
                    lhs: -num.infinity,
                    rhs: ub,
                    check: false,
                    removable: true,
                });
            } else {
                let row = LinearCut::new(vec![(cons.slackvar, 1.0), (cons.binvar, ub)], ub, CutSource::Coupling)
                    .with_name(name)
                    .with_flags(false, false);
                model.outbox.cuts.push(row.clone());
                model.cut_pool.add(row);
            }
        }
    }
}
