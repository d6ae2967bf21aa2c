//! Artifacts emitted towards the surrounding solver.

use super::problem::VarId;
use super::solution::Solution;
use crate::cons::ConsId;
use crate::cuts::{Clause, LinearCut};

/// A bound change applied in a branching child.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundChange {
    /// Variable.
    pub var: VarId,

    /// Previous lower bound.
    pub old_lb: f64,

    /// Previous upper bound.
    pub old_ub: f64,

    /// New lower bound.
    pub new_lb: f64,

    /// New upper bound.
    pub new_ub: f64,
}

impl BoundChange {
    /// Raise the lower bound to `value`.
    pub fn lower(var: VarId, old_lb: f64, old_ub: f64, value: f64) -> Self {
        Self {
            var,
            old_lb,
            old_ub,
            new_lb: value,
            new_ub: old_ub,
        }
    }

    /// Lower the upper bound to `value`.
    pub fn upper(var: VarId, old_lb: f64, old_ub: f64, value: f64) -> Self {
        Self {
            var,
            old_lb,
            old_ub,
            new_lb: old_lb,
            new_ub: value,
        }
    }
}

/// A branching child.
#[derive(Debug, Clone, PartialEq)]
pub struct BranchChild {
    /// Objective estimate of the child.
    pub estimate: f64,

    /// Bound changes applied in the child.
    pub bound_changes: Vec<BoundChange>,
}

/// Variable bound constraint `lhs <= var + coef * vbvar <= rhs`.
#[derive(Debug, Clone, PartialEq)]
pub struct VarBound {
    /// Constraint name.
    pub name: String,

    /// Bounded variable.
    pub var: VarId,

    /// Bounding variable.
    pub vbvar: VarId,

    /// Coefficient of `vbvar`.
    pub coef: f64,

    /// Left-hand side.
    pub lhs: f64,

    /// Right-hand side.
    pub rhs: f64,

    /// Checked for feasibility by the surrounding solver.
    pub check: bool,

    /// May be removed from the LP when unused.
    pub removable: bool,
}

/// Bilinear constraint `x * y = 0`.
#[derive(Debug, Clone, PartialEq)]
pub struct Bilinear {
    /// Constraint name.
    pub name: String,

    /// First factor.
    pub x: VarId,

    /// Second factor.
    pub y: VarId,
}

/// Implication `binvar = 1 => implied <= bound`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Implication {
    /// Binary condition variable.
    pub binvar: VarId,

    /// Implied variable.
    pub implied: VarId,

    /// Implied upper bound.
    pub bound: f64,
}

/// Record of a propagated bound, resolvable through `resolve_propagation`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Inference {
    /// Tightened variable.
    pub var: VarId,

    /// New upper bound.
    pub bound: f64,

    /// Constraint responsible.
    pub cons: ConsId,

    /// Handler-specific reason code.
    pub info: i32,
}

/// Everything a handler emits while processing a callback.
#[derive(Debug, Clone, Default)]
pub struct Outbox {
    /// Clauses over negated binaries.
    pub clauses: Vec<Clause>,

    /// Cutting planes added to the current LP.
    pub cuts: Vec<LinearCut>,

    /// Variable bound constraints.
    pub varbounds: Vec<VarBound>,

    /// Bilinear constraints.
    pub bilinear: Vec<Bilinear>,

    /// Branching children.
    pub children: Vec<BranchChild>,

    /// Constraints deleted at the current node.
    pub deleted_local: Vec<ConsId>,

    /// Constraints deleted globally.
    pub deleted_global: Vec<ConsId>,

    /// Variables whose lower bound enters the current conflict.
    pub conflict_vars: Vec<VarId>,

    /// Repaired solutions for the try-solution heuristic.
    pub try_solutions: Vec<Solution>,

    /// Implications added to the implication graph.
    pub implications: Vec<Implication>,

    /// Bound inferences.
    pub inferences: Vec<Inference>,
}

impl Outbox {
    /// Drop all collected artifacts.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
