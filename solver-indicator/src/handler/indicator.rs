//! The indicator constraint handler.

use std::fmt;

use super::{ConstraintHandler, CopyMap, HandlerResult, PresolveCounters, PresolveRound};
use crate::altlp::{default_lp_factory, LpFactory, SeparationContext, SeparationStats};
use crate::cons::{ConsId, IndicatorConstraint};
use crate::error::{IndicatorError, IndicatorResult};
use crate::model::{Bilinear, LinConsId, Model, Solution, Stage, VarId, VarType};
use crate::separation::separate_iis_rounding;
use crate::settings::IndicatorSettings;

/// Handler for indicator constraints `y = 1 => a x <= b`.
///
/// Each constraint is stored as a binary `y`, a slack `s >= 0` and a linear
/// constraint `a x - s <= b`; the handler enforces `y = 1 => s = 0`. With
/// [`IndicatorSettings::sepa_alternative_lp`] the handler maintains an
/// alternative LP from which IIS cuts over the binaries are separated.
pub struct IndicatorHandler {
    pub(super) settings: IndicatorSettings,
    pub(super) conss: Vec<IndicatorConstraint>,
    pub(super) ctx: Option<SeparationContext>,
    lp_factory: LpFactory,
    add_linconss: Vec<LinConsId>,
    pub(super) added_coupling_cons: bool,
}

impl fmt::Debug for IndicatorHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IndicatorHandler")
            .field("settings", &self.settings)
            .field("n_conss", &self.conss.len())
            .field("ctx", &self.ctx)
            .field("n_add_linconss", &self.add_linconss.len())
            .field("added_coupling_cons", &self.added_coupling_cons)
            .finish()
    }
}

/// All variables are continuous or implicit integer.
fn only_continuous(model: &Model, vars: &[VarId]) -> bool {
    vars.iter()
        .all(|&v| matches!(model.var(v).vtype, VarType::Continuous | VarType::ImplicitInteger))
}

impl IndicatorHandler {
    /// Handler name.
    pub const NAME: &'static str = "indicator";

    /// Create a handler; fails on incompatible settings.
    pub fn new(settings: IndicatorSettings) -> IndicatorResult<Self> {
        settings.validate()?;
        Ok(Self {
            settings,
            conss: Vec::new(),
            ctx: None,
            lp_factory: default_lp_factory(),
            add_linconss: Vec::new(),
            added_coupling_cons: false,
        })
    }

    /// Use a different LP backend for the alternative LP.
    pub fn with_lp_factory(mut self, factory: LpFactory) -> Self {
        self.lp_factory = factory;
        self
    }

    /// Handler settings.
    pub fn settings(&self) -> &IndicatorSettings {
        &self.settings
    }

    /// All constraints, indexed by [`ConsId`].
    pub fn constraints(&self) -> &[IndicatorConstraint] {
        &self.conss
    }

    /// Constraint data, checked.
    pub fn get(&self, cons: ConsId) -> IndicatorResult<&IndicatorConstraint> {
        self.conss.get(cons.0).ok_or_else(|| {
            IndicatorError::InvalidData(format!(
                "unknown indicator constraint {} ({} constraints)",
                cons.0,
                self.conss.len()
            ))
        })
    }

    /// The separation context, between `init_sol` and `exit_sol`.
    pub fn separation_context(&self) -> Option<&SeparationContext> {
        self.ctx.as_ref()
    }

    /// Separation statistics, if the alternative LP is in use.
    pub fn stats(&self) -> Option<&SeparationStats> {
        self.ctx.as_ref().map(|ctx| ctx.stats())
    }

    /// Coupling varbounds have been generated.
    pub fn added_coupling_cons(&self) -> bool {
        self.added_coupling_cons
    }

    // === Creation ===

    /// Create `binvar = 1 => sum vals * vars <= rhs`.
    ///
    /// Adds the slack `indslack_<name>` and the linear constraint
    /// `indlin_<name>` to the model. With `generate_bilinear` a bilinear
    /// constraint `binvar * slack = 0` is emitted instead and `None` is
    /// returned.
    pub fn create_indicator(
        &mut self,
        model: &mut Model,
        name: &str,
        binvar: VarId,
        vars: &[VarId],
        vals: &[f64],
        rhs: f64,
    ) -> IndicatorResult<Option<ConsId>> {
        model.check_var(binvar)?;
        for &v in vars {
            model.check_var(v)?;
        }
        let num = model.numerics;

        let integral = vars
            .iter()
            .zip(vals)
            .all(|(&v, &a)| model.var(v).vtype.is_integral() && num.is_integral(a));
        let slack_type = if integral {
            VarType::ImplicitInteger
        } else {
            VarType::Continuous
        };
        let slackvar = model.add_var(format!("indslack_{}", name), slack_type, 0.0, num.infinity, 0.0);

        let active = !(self.settings.no_lincons_cont && only_continuous(model, vars));
        let lincons = model.add_linear(format!("indlin_{}", name), vars, vals, -num.infinity, rhs)?;
        model.add_coef_linear(lincons, slackvar, -1.0)?;

        if self.settings.generate_bilinear {
            model.outbox.bilinear.push(Bilinear {
                name: name.to_string(),
                x: binvar,
                y: slackvar,
            });
            log::debug!("created bilinear constraint <{}> instead of indicator", name);
            return Ok(None);
        }

        let cons = IndicatorConstraint::new(name, binvar, slackvar, lincons, active);
        self.push_constraint(model, cons).map(Some)
    }

    /// Create an indicator constraint on an existing linear constraint.
    ///
    /// `slackvar` must appear in `lincons` with coefficient -1.
    pub fn create_indicator_lincons(
        &mut self,
        model: &mut Model,
        name: &str,
        binvar: VarId,
        lincons: LinConsId,
        slackvar: VarId,
    ) -> IndicatorResult<ConsId> {
        model.check_var(binvar)?;
        model.check_var(slackvar)?;
        model.check_lincons(lincons)?;

        let active = !(self.settings.no_lincons_cont && only_continuous(model, &model.lincons(lincons).vars));
        let cons = IndicatorConstraint::new(name, binvar, slackvar, lincons, active);
        self.push_constraint(model, cons)
    }

    /// Append `val * var` to the inequality of `cons`.
    ///
    /// An implicit integer slack becomes continuous if the new term is
    /// fractional.
    pub fn add_var_to_indicator(&mut self, model: &mut Model, cons: ConsId, var: VarId, val: f64) -> IndicatorResult<()> {
        let (lincons, slackvar) = {
            let c = self.get(cons)?;
            (c.lincons, c.slackvar)
        };
        model.add_coef_linear(lincons, var, val)?;

        let num = model.numerics;
        if model.var(slackvar).vtype != VarType::Continuous
            && (!model.var(var).vtype.is_integral() || !num.is_integral(val))
        {
            model.chg_var_type(slackvar, VarType::Continuous);
        }
        Ok(())
    }

    /// Register a linear constraint that enters the alternative LP without
    /// an indicator.
    pub fn add_linear_cons(&mut self, model: &Model, lincons: LinConsId) -> IndicatorResult<()> {
        model.check_lincons(lincons)?;
        self.add_linconss.push(lincons);
        Ok(())
    }

    fn push_constraint(&mut self, model: &mut Model, cons: IndicatorConstraint) -> IndicatorResult<ConsId> {
        let id = ConsId(self.conss.len());
        log::debug!("created indicator constraint <{}>", cons.name);
        self.conss.push(cons);
        self.lock_cons(model, id.0, 1, 0);
        if model.stage() >= Stage::Transformed {
            self.attach(model, id.0)?;
        }
        Ok(id)
    }

    /// Validate the binary, count the variables fixed nonzero and add the
    /// alternative LP column once the LP exists.
    pub(super) fn attach(&mut self, model: &Model, c: usize) -> IndicatorResult<()> {
        let num = model.numerics;
        let cons = &mut self.conss[c];
        let bin = model.var(cons.binvar);
        if bin.vtype != VarType::Binary {
            return Err(IndicatorError::InvalidData(format!(
                "indicator variable <{}> is not binary ({:?})",
                bin.name, bin.vtype
            )));
        }

        cons.n_fixed_nonzero = 0;
        if bin.lb_local > 0.5 {
            cons.n_fixed_nonzero += 1;
        }
        if cons.lincons_active && num.is_feas_positive(model.var(cons.slackvar).lb_local) {
            cons.n_fixed_nonzero += 1;
        }
        if cons.n_fixed_nonzero > 0 {
            log::debug!(
                "constraint <{}> has {} variables fixed to be nonzero",
                cons.name,
                cons.n_fixed_nonzero
            );
        }

        if self.settings.sepa_alternative_lp && model.stage() >= Stage::InitSolve && cons.col_index.is_none() {
            if let Some(ctx) = self.ctx.as_mut() {
                ctx.register_slack(cons.slackvar);
                cons.col_index = ctx.add_constraint(model, cons.lincons, Some(cons.slackvar), 1.0)?;
                if let (Some(col), false) = (cons.col_index, cons.enabled) {
                    ctx.fix_column(col)?;
                }
            }
        }
        Ok(())
    }

    // === Constraint hooks ===

    pub(super) fn lock_cons(&self, model: &mut Model, c: usize, locks_pos: i32, locks_neg: i32) {
        let cons = &self.conss[c];
        model.add_var_locks(cons.binvar, locks_neg, locks_pos);
        if cons.lincons_active {
            model.add_var_locks(cons.slackvar, locks_neg, locks_pos);
        } else {
            let vars = model.lincons(cons.lincons).vars.clone();
            for v in vars {
                model.add_var_locks(v, locks_pos + locks_neg, locks_pos + locks_neg);
            }
        }
    }

    /// Delete a constraint and retire its alternative LP column.
    pub(super) fn delete_cons(&mut self, model: &mut Model, c: usize) -> IndicatorResult<()> {
        if self.conss[c].deleted {
            return Ok(());
        }
        self.lock_cons(model, c, -1, 0);
        let cons = &mut self.conss[c];
        cons.deleted = true;
        if let (Some(col), Some(ctx)) = (cons.col_index.take(), self.ctx.as_mut()) {
            ctx.delete_column(col)?;
        }
        log::debug!("deleted indicator constraint <{}>", cons.name);
        Ok(())
    }

    /// Delete during presolving.
    pub(super) fn delete_global(&mut self, model: &mut Model, c: usize) -> IndicatorResult<()> {
        model.outbox.deleted_global.push(ConsId(c));
        self.delete_cons(model, c)
    }

    /// Deactivate at the current node.
    pub(super) fn delete_local(&mut self, model: &mut Model, c: usize) -> IndicatorResult<()> {
        model.outbox.deleted_local.push(ConsId(c));
        self.disable_cons(c)
    }

    pub(super) fn enable_cons(&mut self, c: usize) -> IndicatorResult<()> {
        let cons = &mut self.conss[c];
        cons.enabled = true;
        if let (Some(col), Some(ctx)) = (cons.col_index, self.ctx.as_mut()) {
            ctx.unfix_column(col)?;
        }
        Ok(())
    }

    pub(super) fn disable_cons(&mut self, c: usize) -> IndicatorResult<()> {
        let cons = &mut self.conss[c];
        cons.enabled = false;
        if let (Some(col), Some(ctx)) = (cons.col_index, self.ctx.as_mut()) {
            ctx.fix_column(col)?;
        }
        Ok(())
    }

    fn index(&self, cons: ConsId) -> IndicatorResult<usize> {
        self.get(cons).map(|_| cons.0)
    }

    // === Solve lifecycle ===

    fn init_solve(&mut self, model: &mut Model) -> IndicatorResult<()> {
        if self.settings.sepa_alternative_lp {
            let mut ctx = SeparationContext::new(self.lp_factory.clone());
            for cons in self.conss.iter().filter(|c| !c.deleted) {
                ctx.register_slack(cons.slackvar);
            }
            self.ctx = Some(ctx);
        }

        for cons in self.conss.iter_mut().filter(|c| !c.deleted) {
            if !cons.lincons_active {
                model.lincons_mut(cons.lincons).enabled = false;
            }
            if let Some(ctx) = self.ctx.as_mut() {
                if cons.col_index.is_none() {
                    cons.col_index = ctx.add_constraint(model, cons.lincons, Some(cons.slackvar), 1.0)?;
                    if let (Some(col), false) = (cons.col_index, cons.enabled) {
                        ctx.fix_column(col)?;
                    }
                }
            }
        }

        if let Some(ctx) = self.ctx.as_mut() {
            for &lincons in &self.add_linconss {
                ctx.add_constraint(model, lincons, None, 0.0)?;
            }
            log::debug!(
                "alternative LP: {} rows, {} indicator columns, {} additional linear constraints",
                ctx.n_rows(),
                self.conss.iter().filter(|c| c.col_index.is_some()).count(),
                self.add_linconss.len()
            );
        }
        Ok(())
    }

    fn exit_solve(&mut self) {
        if let Some(ctx) = self.ctx.take() {
            log::debug!("alternative LP statistics: {:?}", ctx.stats());
        }
        for cons in &mut self.conss {
            cons.col_index = None;
        }
    }

    fn transform_cons(&mut self, model: &mut Model, c: usize) -> IndicatorResult<()> {
        let (slackvar, lincons) = (self.conss[c].slackvar, self.conss[c].lincons);
        model.check_var(slackvar)?;
        model.check_lincons(lincons)?;

        // The slack is implicit integer if every other term is integral.
        if model.var(slackvar).vtype != VarType::ImplicitInteger {
            let num = model.numerics;
            let lc = model.lincons(lincons);
            let mut found_slack = false;
            let mut integral = true;
            for (&v, &a) in lc.vars.iter().zip(&lc.vals) {
                if v == slackvar {
                    found_slack = true;
                } else if !model.var(v).vtype.is_integral() || !num.is_integral(a) {
                    integral = false;
                    break;
                }
            }
            if integral && found_slack {
                model.chg_var_type(slackvar, VarType::ImplicitInteger);
            }
        }
        self.attach(model, c)
    }

    fn separate(&mut self, model: &mut Model, sol: Option<&Solution>) -> IndicatorResult<HandlerResult> {
        if !self.settings.sepa_alternative_lp || self.conss.is_empty() {
            return Ok(HandlerResult::DidNotRun);
        }
        let ctx = match self.ctx.as_mut() {
            Some(ctx) => ctx,
            None => return Ok(HandlerResult::DidNotRun),
        };
        let n_gen = separate_iis_rounding(ctx, model, &self.conss, sol, &self.settings)?;
        Ok(if n_gen == 0 {
            HandlerResult::DidNotFind
        } else if self.settings.gen_logicor {
            HandlerResult::ConsAdded
        } else {
            HandlerResult::Separated
        })
    }
}

impl ConstraintHandler for IndicatorHandler {
    type Constraint = IndicatorConstraint;

    fn name(&self) -> &str {
        Self::NAME
    }

    fn constraint(&self, cons: ConsId) -> IndicatorResult<&IndicatorConstraint> {
        self.get(cons)
    }

    fn n_constraints(&self) -> usize {
        self.conss.len()
    }

    fn init(&mut self, _model: &mut Model) -> IndicatorResult<()> {
        self.settings.validate()
    }

    fn presolve(
        &mut self,
        model: &mut Model,
        round: &PresolveRound,
        counters: &mut PresolveCounters,
    ) -> IndicatorResult<HandlerResult> {
        self.presolve_round(model, round, counters)
    }

    fn exit_pre(&mut self, model: &mut Model) -> IndicatorResult<HandlerResult> {
        self.exit_presolve(model)
    }

    fn init_sol(&mut self, model: &mut Model) -> IndicatorResult<()> {
        self.init_solve(model)
    }

    fn exit_sol(&mut self, _model: &mut Model) -> IndicatorResult<()> {
        self.exit_solve();
        Ok(())
    }

    fn delete(&mut self, model: &mut Model, cons: ConsId) -> IndicatorResult<()> {
        let c = self.index(cons)?;
        self.delete_cons(model, c)
    }

    fn transform(&mut self, model: &mut Model, cons: ConsId) -> IndicatorResult<()> {
        let c = self.index(cons)?;
        self.transform_cons(model, c)
    }

    fn init_lp(&mut self, model: &mut Model) -> IndicatorResult<()> {
        self.add_coupling_rows(model);
        Ok(())
    }

    fn lock(&mut self, model: &mut Model, cons: ConsId, locks_pos: i32, locks_neg: i32) -> IndicatorResult<()> {
        let c = self.index(cons)?;
        self.lock_cons(model, c, locks_pos, locks_neg);
        Ok(())
    }

    fn enable(&mut self, _model: &mut Model, cons: ConsId) -> IndicatorResult<()> {
        let c = self.index(cons)?;
        self.enable_cons(c)
    }

    fn disable(&mut self, _model: &mut Model, cons: ConsId) -> IndicatorResult<()> {
        let c = self.index(cons)?;
        self.disable_cons(c)
    }

    fn separate_lp(&mut self, model: &mut Model) -> IndicatorResult<HandlerResult> {
        self.separate(model, None)
    }

    fn separate_sol(&mut self, model: &mut Model, sol: &Solution) -> IndicatorResult<HandlerResult> {
        self.separate(model, Some(sol))
    }

    fn enforce_lp(&mut self, model: &mut Model, sol_infeasible: bool) -> IndicatorResult<HandlerResult> {
        if sol_infeasible {
            return Ok(HandlerResult::Feasible);
        }
        let gen_logicor = self.settings.gen_logicor;
        self.enforce_indicators(model, gen_logicor)
    }

    fn enforce_pseudo(
        &mut self,
        model: &mut Model,
        sol_infeasible: bool,
        obj_infeasible: bool,
    ) -> IndicatorResult<HandlerResult> {
        if sol_infeasible {
            return Ok(HandlerResult::Feasible);
        }
        if obj_infeasible {
            return Ok(HandlerResult::DidNotRun);
        }
        self.enforce_indicators(model, true)
    }

    fn check(&mut self, model: &mut Model, sol: &Solution, print_reason: bool) -> IndicatorResult<HandlerResult> {
        self.check_solution(model, sol, print_reason)
    }

    fn propagate(&mut self, model: &mut Model) -> IndicatorResult<HandlerResult> {
        self.propagate_all(model)
    }

    fn resolve_propagation(
        &mut self,
        model: &mut Model,
        cons: ConsId,
        _infer_var: VarId,
        info: i32,
    ) -> IndicatorResult<HandlerResult> {
        let c = self.index(cons)?;
        Ok(self.resolve_inference(model, c, info))
    }

    fn print(&self, model: &Model, cons: ConsId) -> String {
        self.print_cons(model, cons.0)
    }

    fn copy(
        &mut self,
        model: &mut Model,
        source: &Self,
        cons: ConsId,
        map: &CopyMap,
        name: Option<&str>,
    ) -> IndicatorResult<Option<ConsId>> {
        self.copy_cons(model, source, cons, map, name)
    }

    fn parse(&mut self, model: &mut Model, name: &str, text: &str) -> IndicatorResult<ConsId> {
        self.parse_cons(model, name, text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup(settings: IndicatorSettings) -> (Model, IndicatorHandler, VarId, VarId) {
        let mut model = Model::new();
        let y = model.add_var("y", VarType::Binary, 0.0, 1.0, 0.0);
        let x = model.add_var("x", VarType::Continuous, 0.0, 10.0, 0.0);
        let handler = IndicatorHandler::new(settings).unwrap();
        (model, handler, y, x)
    }

    #[test]
    fn test_create_indicator() {
        let (mut model, mut handler, y, x) = setup(IndicatorSettings::default());
        let c = handler
            .create_indicator(&mut model, "c", y, &[x], &[1.0], 5.0)
            .unwrap()
            .unwrap();

        let cons = handler.get(c).unwrap();
        assert!(cons.lincons_active);
        assert_eq!(model.var(cons.slackvar).name, "indslack_c");
        assert_eq!(model.var(cons.slackvar).vtype, VarType::Continuous);

        let lc = model.lincons(cons.lincons);
        assert_eq!(lc.name, "indlin_c");
        assert_eq!(lc.vars, vec![x, cons.slackvar]);
        assert!((lc.vals[1] + 1.0).abs() < 1e-12);
        assert!((lc.rhs - 5.0).abs() < 1e-12);

        // y and s are locked upwards
        assert_eq!(model.var(y).locks_up, 1);
        assert_eq!(model.var(cons.slackvar).locks_up, 1);
    }

    #[test]
    fn test_constraint_lookup() {
        let (mut model, mut handler, y, x) = setup(IndicatorSettings::default());
        let c = handler
            .create_indicator(&mut model, "c", y, &[x], &[1.0], 5.0)
            .unwrap()
            .unwrap();
        assert_eq!(handler.constraint(c).unwrap().name, "c");
        assert!(matches!(
            handler.constraint(ConsId(7)),
            Err(IndicatorError::InvalidData(_))
        ));
    }

    #[test]
    fn test_integral_slack_type() {
        let (mut model, mut handler, y, _) = setup(IndicatorSettings::default());
        let z = model.add_var("z", VarType::Integer, 0.0, 10.0, 0.0);
        let c = handler
            .create_indicator(&mut model, "c", y, &[z], &[2.0], 5.0)
            .unwrap()
            .unwrap();
        let s = handler.get(c).unwrap().slackvar;
        assert_eq!(model.var(s).vtype, VarType::ImplicitInteger);

        handler.add_var_to_indicator(&mut model, c, z, 0.5).unwrap();
        assert_eq!(model.var(s).vtype, VarType::Continuous);
    }

    #[test]
    fn test_no_lincons_cont() {
        let mut settings = IndicatorSettings::alternative_lp();
        settings.no_lincons_cont = true;
        let (mut model, mut handler, y, x) = setup(settings);
        let c = handler
            .create_indicator(&mut model, "c", y, &[x], &[1.0], 5.0)
            .unwrap()
            .unwrap();
        assert!(!handler.get(c).unwrap().lincons_active);

        model.set_stage(Stage::InitSolve);
        handler.init_sol(&mut model).unwrap();
        let cons = handler.get(c).unwrap();
        assert!(!model.lincons(cons.lincons).enabled);
        assert!(cons.col_index.is_some());
    }

    #[test]
    fn test_generate_bilinear() {
        let mut settings = IndicatorSettings::default();
        settings.generate_bilinear = true;
        let (mut model, mut handler, y, x) = setup(settings);
        let c = handler.create_indicator(&mut model, "c", y, &[x], &[1.0], 5.0).unwrap();
        assert!(c.is_none());
        assert_eq!(handler.n_constraints(), 0);
        assert_eq!(model.outbox.bilinear.len(), 1);
        assert_eq!(model.outbox.bilinear[0].x, y);
    }

    #[test]
    fn test_transform_rejects_non_binary() {
        let (mut model, mut handler, _, x) = setup(IndicatorSettings::default());
        let z = model.add_var("z", VarType::Integer, 0.0, 3.0, 0.0);
        let c = handler
            .create_indicator(&mut model, "c", z, &[x], &[1.0], 5.0)
            .unwrap()
            .unwrap();
        model.set_stage(Stage::Transformed);
        assert!(matches!(
            handler.transform(&mut model, c),
            Err(IndicatorError::InvalidData(_))
        ));
    }

    #[test]
    fn test_lifecycle_columns() {
        let (mut model, mut handler, y, x) = setup(IndicatorSettings::alternative_lp());
        let c = handler
            .create_indicator(&mut model, "c", y, &[x], &[1.0], 5.0)
            .unwrap()
            .unwrap();
        model.set_stage(Stage::Transformed);
        handler.transform(&mut model, c).unwrap();
        assert!(handler.get(c).unwrap().col_index.is_none());

        model.set_stage(Stage::InitSolve);
        handler.init_sol(&mut model).unwrap();
        let col = handler.get(c).unwrap().col_index.unwrap();

        handler.disable(&mut model, c).unwrap();
        let lp = handler.separation_context().unwrap().lp().unwrap();
        assert_eq!(lp.bounds(col).unwrap(), (0.0, 0.0));

        handler.enable(&mut model, c).unwrap();
        let lp = handler.separation_context().unwrap().lp().unwrap();
        let (lb, ub) = lp.bounds(col).unwrap();
        assert_eq!(lb, 0.0);
        assert!(lp.is_infinity(ub));

        // created after the LP exists: column added immediately
        let y2 = model.add_var("y2", VarType::Binary, 0.0, 1.0, 0.0);
        let c2 = handler
            .create_indicator(&mut model, "c2", y2, &[x], &[-1.0], -8.0)
            .unwrap()
            .unwrap();
        let col2 = handler.get(c2).unwrap().col_index.unwrap();
        assert_ne!(col, col2);

        handler.delete(&mut model, c2).unwrap();
        assert!(handler.get(c2).unwrap().col_index.is_none());
        let lp = handler.separation_context().unwrap().lp().unwrap();
        assert_eq!(lp.bounds(col2).unwrap(), (0.0, 0.0));

        handler.exit_sol(&mut model).unwrap();
        assert!(handler.separation_context().is_none());
        assert!(handler.get(c).unwrap().col_index.is_none());
    }
}
