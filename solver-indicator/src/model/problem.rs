//! Variables, linear constraints and bound bookkeeping.

use std::collections::HashMap;
use std::fmt;

use super::numerics::Numerics;
use super::outbox::{Inference, Outbox};
use super::solution::Solution;
use crate::cons::ConsId;
use crate::cuts::CutPool;
use crate::error::{IndicatorError, IndicatorResult};

/// Stable variable identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VarId(pub usize);

impl fmt::Display for VarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// Stable linear constraint identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LinConsId(pub usize);

/// Variable type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarType {
    /// Binary variable.
    Binary,

    /// General integer variable.
    Integer,

    /// Continuous variable that takes integral values in every feasible solution.
    ImplicitInteger,

    /// Continuous variable.
    Continuous,
}

impl VarType {
    /// Whether values are integral in feasible solutions.
    pub fn is_integral(&self) -> bool {
        !matches!(self, VarType::Continuous)
    }
}

/// How a variable relates to the active problem variables.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VarStatus {
    /// Active problem variable.
    Active,

    /// Globally fixed.
    Fixed,

    /// `x = scalar * var + constant`.
    Aggregated {
        /// Aggregation target.
        var: VarId,
        /// Multiplier.
        scalar: f64,
        /// Offset.
        constant: f64,
    },

    /// `x = 1 - var`.
    Negated(VarId),
}

/// A problem variable.
#[derive(Debug, Clone)]
pub struct Variable {
    /// Variable name.
    pub name: String,

    /// Variable type.
    pub vtype: VarType,

    /// Objective coefficient.
    pub obj: f64,

    /// Global lower bound.
    pub lb_global: f64,

    /// Global upper bound.
    pub ub_global: f64,

    /// Lower bound at the current node.
    pub lb_local: f64,

    /// Upper bound at the current node.
    pub ub_local: f64,

    /// Status.
    pub status: VarStatus,

    /// Number of locks against decreasing the variable.
    pub locks_down: i32,

    /// Number of locks against increasing the variable.
    pub locks_up: i32,
}

impl Variable {
    /// Rounding down never violates a constraint.
    pub fn may_round_down(&self) -> bool {
        self.locks_down == 0
    }

    /// Rounding up never violates a constraint.
    pub fn may_round_up(&self) -> bool {
        self.locks_up == 0
    }
}

/// A linear constraint `lhs <= sum a_j x_j <= rhs`.
#[derive(Debug, Clone)]
pub struct LinearConstraint {
    /// Constraint name.
    pub name: String,

    /// Variables.
    pub vars: Vec<VarId>,

    /// Coefficients, parallel to `vars`.
    pub vals: Vec<f64>,

    /// Left-hand side (may be `-infinity`).
    pub lhs: f64,

    /// Right-hand side (may be `+infinity`).
    pub rhs: f64,

    /// Present in the problem.
    pub active: bool,

    /// Enforced and checked by the surrounding solver.
    pub enabled: bool,
}

/// Solving stage of the surrounding solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Stage {
    /// Problem is being built.
    #[default]
    Problem,
    /// Problem has been transformed.
    Transformed,
    /// Presolving is running.
    Presolving,
    /// Presolving is finishing.
    ExitPresolve,
    /// Solving data is being initialized.
    InitSolve,
    /// Branch and bound is running.
    Solving,
    /// Solving finished.
    Solved,
}

/// Direction of a bound change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundEventKind {
    /// Lower bound increased.
    LbTightened,
    /// Lower bound decreased.
    LbRelaxed,
    /// Upper bound decreased.
    UbTightened,
    /// Upper bound increased.
    UbRelaxed,
}

/// A local bound change, as reported to interested handlers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundEvent {
    /// Changed variable.
    pub var: VarId,
    /// Direction.
    pub kind: BoundEventKind,
    /// Previous bound.
    pub old_bound: f64,
    /// New bound.
    pub new_bound: f64,
}

/// Result of a bound inference.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InferOutcome {
    /// The new bound empties the domain.
    pub infeasible: bool,
    /// The bound was changed.
    pub tightened: bool,
    /// Event produced by the change.
    pub event: Option<BoundEvent>,
}

/// The surrounding solver as seen by the indicator handler.
#[derive(Debug, Default)]
pub struct Model {
    /// Numerical tolerances.
    pub numerics: Numerics,

    /// Artifacts emitted by handlers.
    pub outbox: Outbox,

    /// Global pool of valid cuts.
    pub cut_pool: CutPool,

    vars: Vec<Variable>,
    linconss: Vec<LinearConstraint>,
    negations: HashMap<VarId, VarId>,
    stage: Stage,
    lp_solution: Solution,
}

impl Model {
    /// Create an empty model.
    pub fn new() -> Self {
        Self::default()
    }

    // === Variables ===

    /// Add a variable; binary bounds are clamped to `[0, 1]`.
    pub fn add_var(&mut self, name: impl Into<String>, vtype: VarType, lb: f64, ub: f64, obj: f64) -> VarId {
        let (lb, ub) = if vtype == VarType::Binary {
            (lb.max(0.0), ub.min(1.0))
        } else {
            (lb, ub)
        };
        let id = VarId(self.vars.len());
        self.vars.push(Variable {
            name: name.into(),
            vtype,
            obj,
            lb_global: lb,
            ub_global: ub,
            lb_local: lb,
            ub_local: ub,
            status: VarStatus::Active,
            locks_down: 0,
            locks_up: 0,
        });
        if self.lp_solution.len() < self.vars.len() {
            self.lp_solution.set_value(id, 0.0);
        }
        id
    }

    /// Variable data.
    pub fn var(&self, id: VarId) -> &Variable {
        &self.vars[id.0]
    }

    /// Mutable variable data.
    pub fn var_mut(&mut self, id: VarId) -> &mut Variable {
        &mut self.vars[id.0]
    }

    /// Number of variables.
    pub fn n_vars(&self) -> usize {
        self.vars.len()
    }

    /// All variable ids in creation order.
    pub fn var_ids(&self) -> impl Iterator<Item = VarId> {
        (0..self.vars.len()).map(VarId)
    }

    /// Look up a variable by name.
    pub fn find_var(&self, name: &str) -> Option<VarId> {
        self.vars.iter().position(|v| v.name == name).map(VarId)
    }

    /// Checked variable id.
    pub fn check_var(&self, id: VarId) -> IndicatorResult<VarId> {
        if id.0 < self.vars.len() {
            Ok(id)
        } else {
            Err(IndicatorError::InvalidData(format!(
                "unknown variable {} ({} variables)",
                id,
                self.vars.len()
            )))
        }
    }

    /// The negation `1 - var`, created on first use.
    pub fn negated(&mut self, var: VarId) -> VarId {
        if let VarStatus::Negated(orig) = self.var(var).status {
            return orig;
        }
        if let Some(&neg) = self.negations.get(&var) {
            return neg;
        }
        let v = self.var(var).clone();
        let id = VarId(self.vars.len());
        self.vars.push(Variable {
            name: format!("~{}", v.name),
            vtype: v.vtype,
            obj: -v.obj,
            lb_global: 1.0 - v.ub_global,
            ub_global: 1.0 - v.lb_global,
            lb_local: 1.0 - v.ub_local,
            ub_local: 1.0 - v.lb_local,
            status: VarStatus::Negated(var),
            locks_down: v.locks_up,
            locks_up: v.locks_down,
        });
        self.negations.insert(var, id);
        id
    }

    /// Resolve aggregations and negations: `var = scalar * active + constant`.
    pub fn probvar_sum(&self, var: VarId) -> (VarId, f64, f64) {
        let mut cur = var;
        let mut scalar = 1.0;
        let mut constant = 0.0;
        // aggregation chains are acyclic
        for _ in 0..=self.vars.len() {
            match self.var(cur).status {
                VarStatus::Aggregated { var, scalar: s, constant: c } => {
                    constant += scalar * c;
                    scalar *= s;
                    cur = var;
                }
                VarStatus::Negated(orig) => {
                    constant += scalar;
                    scalar = -scalar;
                    cur = orig;
                }
                VarStatus::Active | VarStatus::Fixed => break,
            }
        }
        (cur, scalar, constant)
    }

    /// Aggregate `var = scalar * onto + constant`.
    pub fn aggregate_var(&mut self, var: VarId, onto: VarId, scalar: f64, constant: f64) {
        self.var_mut(var).status = VarStatus::Aggregated {
            var: onto,
            scalar,
            constant,
        };
    }

    /// Change the variable type.
    pub fn chg_var_type(&mut self, var: VarId, vtype: VarType) {
        self.var_mut(var).vtype = vtype;
    }

    /// Add rounding locks; a negation carries the swapped counters.
    pub fn add_var_locks(&mut self, var: VarId, down: i32, up: i32) {
        let (base, down, up) = match self.var(var).status {
            VarStatus::Negated(orig) => (orig, up, down),
            _ => (var, down, up),
        };
        let v = self.var_mut(base);
        v.locks_down += down;
        v.locks_up += up;
        if let Some(&neg) = self.negations.get(&base) {
            let n = self.var_mut(neg);
            n.locks_down += up;
            n.locks_up += down;
        }
    }

    // === Bounds ===

    /// Change the local lower bound.
    pub fn chg_var_lb_local(&mut self, var: VarId, lb: f64) -> Option<BoundEvent> {
        let old = self.var(var).lb_local;
        if old == lb {
            return None;
        }
        self.var_mut(var).lb_local = lb;
        self.mirror_bounds(var);
        let kind = if lb > old {
            BoundEventKind::LbTightened
        } else {
            BoundEventKind::LbRelaxed
        };
        Some(BoundEvent {
            var,
            kind,
            old_bound: old,
            new_bound: lb,
        })
    }

    /// Change the local upper bound.
    pub fn chg_var_ub_local(&mut self, var: VarId, ub: f64) -> Option<BoundEvent> {
        let old = self.var(var).ub_local;
        if old == ub {
            return None;
        }
        self.var_mut(var).ub_local = ub;
        self.mirror_bounds(var);
        let kind = if ub < old {
            BoundEventKind::UbTightened
        } else {
            BoundEventKind::UbRelaxed
        };
        Some(BoundEvent {
            var,
            kind,
            old_bound: old,
            new_bound: ub,
        })
    }

    /// Tighten the local upper bound on behalf of constraint `cons`.
    pub fn infer_var_ub(&mut self, var: VarId, ub: f64, cons: ConsId, info: i32) -> InferOutcome {
        let num = self.numerics;
        let v = self.var(var);
        if num.is_feas_lt(ub, v.lb_local) {
            return InferOutcome {
                infeasible: true,
                ..InferOutcome::default()
            };
        }
        if !num.is_feas_lt(ub, v.ub_local) {
            return InferOutcome::default();
        }
        let event = self.chg_var_ub_local(var, ub);
        self.outbox.inferences.push(Inference {
            var,
            bound: ub,
            cons,
            info,
        });
        InferOutcome {
            infeasible: false,
            tightened: true,
            event,
        }
    }

    /// Fix a variable globally; returns `(infeasible, fixed)`.
    pub fn fix_var(&mut self, var: VarId, value: f64) -> (bool, bool) {
        let num = self.numerics;
        let v = self.var(var);
        if num.is_feas_lt(value, v.lb_global) || num.is_feas_lt(v.ub_global, value) {
            return (true, false);
        }
        if num.is_eq(v.lb_global, value) && num.is_eq(v.ub_global, value) {
            return (false, false);
        }
        let v = self.var_mut(var);
        v.lb_global = value;
        v.ub_global = value;
        v.lb_local = value;
        v.ub_local = value;
        if v.status == VarStatus::Active {
            v.status = VarStatus::Fixed;
        }
        self.mirror_bounds(var);
        (false, true)
    }

    /// Copy the bounds of `var` onto its negation (or original).
    fn mirror_bounds(&mut self, var: VarId) {
        let other = match self.var(var).status {
            VarStatus::Negated(orig) => orig,
            _ => match self.negations.get(&var) {
                Some(&neg) => neg,
                None => return,
            },
        };
        let (lb_g, ub_g, lb_l, ub_l) = {
            let v = self.var(var);
            (v.lb_global, v.ub_global, v.lb_local, v.ub_local)
        };
        let o = self.var_mut(other);
        o.lb_global = 1.0 - ub_g;
        o.ub_global = 1.0 - lb_g;
        o.lb_local = 1.0 - ub_l;
        o.ub_local = 1.0 - lb_l;
    }

    // === Linear constraints ===

    /// Add a linear constraint `lhs <= sum vals * vars <= rhs`.
    pub fn add_linear(
        &mut self,
        name: impl Into<String>,
        vars: &[VarId],
        vals: &[f64],
        lhs: f64,
        rhs: f64,
    ) -> IndicatorResult<LinConsId> {
        if vars.len() != vals.len() {
            return Err(IndicatorError::InvalidData(format!(
                "{} variables but {} coefficients",
                vars.len(),
                vals.len()
            )));
        }
        for &v in vars {
            self.check_var(v)?;
        }
        let id = LinConsId(self.linconss.len());
        self.linconss.push(LinearConstraint {
            name: name.into(),
            vars: vars.to_vec(),
            vals: vals.to_vec(),
            lhs,
            rhs,
            active: true,
            enabled: true,
        });
        Ok(id)
    }

    /// Linear constraint data.
    pub fn lincons(&self, id: LinConsId) -> &LinearConstraint {
        &self.linconss[id.0]
    }

    /// Mutable linear constraint data.
    pub fn lincons_mut(&mut self, id: LinConsId) -> &mut LinearConstraint {
        &mut self.linconss[id.0]
    }

    /// Checked linear constraint id.
    pub fn check_lincons(&self, id: LinConsId) -> IndicatorResult<LinConsId> {
        if id.0 < self.linconss.len() {
            Ok(id)
        } else {
            Err(IndicatorError::InvalidData(format!(
                "unknown linear constraint {}",
                id.0
            )))
        }
    }

    /// Look up a linear constraint by name.
    pub fn find_lincons(&self, name: &str) -> Option<LinConsId> {
        self.linconss.iter().position(|c| c.name == name).map(LinConsId)
    }

    /// Append a term to a linear constraint.
    pub fn add_coef_linear(&mut self, id: LinConsId, var: VarId, val: f64) -> IndicatorResult<()> {
        self.check_var(var)?;
        let cons = self.lincons_mut(id);
        cons.vars.push(var);
        cons.vals.push(val);
        Ok(())
    }

    // === Solutions ===

    /// Current solving stage.
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Set the solving stage.
    pub fn set_stage(&mut self, stage: Stage) {
        self.stage = stage;
    }

    /// Current LP relaxation solution.
    pub fn lp_solution(&self) -> &Solution {
        &self.lp_solution
    }

    /// Replace the LP relaxation solution.
    pub fn set_lp_solution(&mut self, sol: Solution) {
        self.lp_solution = sol;
    }

    /// Value of `var` in `sol`, or in the LP solution if `sol` is `None`.
    pub fn sol_val(&self, sol: Option<&Solution>, var: VarId) -> f64 {
        let sol = sol.unwrap_or(&self.lp_solution);
        let (active, scalar, constant) = self.probvar_sum(var);
        let base = match self.var(active).status {
            VarStatus::Fixed => self.var(active).lb_global,
            _ => sol.value(active),
        };
        scalar * base + constant
    }

    /// Set the value of `var` in `sol`, writing through aggregations and negations.
    pub fn set_sol_val(&self, sol: &mut Solution, var: VarId, value: f64) {
        let (active, scalar, constant) = self.probvar_sum(var);
        if scalar == 0.0 || self.var(active).status == VarStatus::Fixed {
            return;
        }
        sol.set_value(active, (value - constant) / scalar);
    }

    /// Estimate of the objective in a child where `var` is set to `target`.
    pub fn child_estimate(&self, var: VarId, target: f64) -> f64 {
        let base: f64 = self
            .var_ids()
            .map(|v| self.var(v).obj * self.lp_solution.value(v))
            .sum();
        base + self.var(var).obj * (target - self.sol_val(None, var))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negation_and_aggregation() {
        let mut model = Model::new();
        let y = model.add_var("y", VarType::Binary, 0.0, 1.0, 2.0);
        let x = model.add_var("x", VarType::Continuous, 0.0, 10.0, 0.0);
        let s = model.add_var("s", VarType::Continuous, 0.0, 10.0, 0.0);

        let ny = model.negated(y);
        assert_eq!(model.negated(y), ny);
        assert_eq!(model.negated(ny), y);
        assert_eq!(model.var(ny).name, "~y");

        model.aggregate_var(s, x, 2.0, 1.0);
        let (var, scalar, constant) = model.probvar_sum(s);
        assert_eq!(var, x);
        assert!((scalar - 2.0).abs() < 1e-12);
        assert!((constant - 1.0).abs() < 1e-12);

        let mut sol = Solution::new(model.n_vars());
        sol.set_value(y, 1.0);
        sol.set_value(x, 3.0);
        assert!((model.sol_val(Some(&sol), ny) - 0.0).abs() < 1e-12);
        assert!((model.sol_val(Some(&sol), s) - 7.0).abs() < 1e-12);
    }

    #[test]
    fn test_bound_events() {
        let mut model = Model::new();
        let x = model.add_var("x", VarType::Continuous, 0.0, 10.0, 0.0);

        let ev = model.chg_var_lb_local(x, 2.0).unwrap();
        assert_eq!(ev.kind, BoundEventKind::LbTightened);
        assert!(model.chg_var_lb_local(x, 2.0).is_none());

        let out = model.infer_var_ub(x, 1.0, ConsId(0), 0);
        assert!(out.infeasible);
        let out = model.infer_var_ub(x, 5.0, ConsId(0), 0);
        assert!(out.tightened);
        assert_eq!(out.event.unwrap().kind, BoundEventKind::UbTightened);
        assert_eq!(model.outbox.inferences.len(), 1);
    }

    #[test]
    fn test_fix_var() {
        let mut model = Model::new();
        let x = model.add_var("x", VarType::Integer, 0.0, 3.0, 0.0);
        assert_eq!(model.fix_var(x, 4.0), (true, false));
        assert_eq!(model.fix_var(x, 2.0), (false, true));
        assert_eq!(model.fix_var(x, 2.0), (false, false));
        assert_eq!(model.var(x).status, VarStatus::Fixed);
    }

    #[test]
    fn test_add_linear_validates() {
        let mut model = Model::new();
        let x = model.add_var("x", VarType::Continuous, 0.0, 1.0, 0.0);
        assert!(model.add_linear("c", &[x], &[1.0, 2.0], 0.0, 1.0).is_err());
        assert!(model.add_linear("c", &[VarId(7)], &[1.0], 0.0, 1.0).is_err());
        let c = model.add_linear("c", &[x], &[1.0], 0.0, 1.0).unwrap();
        assert_eq!(model.find_lincons("c"), Some(c));
    }

    #[test]
    fn test_locks_and_writes_through_negation() {
        let mut model = Model::new();
        let y = model.add_var("y", VarType::Binary, 0.0, 1.0, 0.0);
        let ny = model.negated(y);

        model.add_var_locks(ny, 0, 1);
        assert_eq!(model.var(y).locks_down, 1);
        assert_eq!(model.var(ny).locks_up, 1);
        assert!(model.var(y).may_round_up());
        assert!(!model.var(ny).may_round_up());

        let mut sol = Solution::new(model.n_vars());
        model.set_sol_val(&mut sol, ny, 1.0);
        assert!((sol.value(y) - 0.0).abs() < 1e-12);
        assert!((model.sol_val(Some(&sol), ny) - 1.0).abs() < 1e-12);
    }
}
