//! Constraint handler interface and the indicator handler.
//!
//! The surrounding branch-and-cut loop drives a handler through the
//! callbacks of [`ConstraintHandler`] at fixed points of the solve:
//! presolving, LP initialization, separation, enforcement, checking and
//! propagation. Everything a callback produces goes to the model's outbox.

mod check;
mod display;
mod enforce;
mod events;
mod indicator;
mod presolve;
mod propagate;

use std::collections::HashMap;

pub use indicator::IndicatorHandler;
pub use presolve::{PresolveCounters, PresolveRound};

use crate::cons::ConsId;
use crate::error::IndicatorResult;
use crate::model::{LinConsId, Model, Solution, VarId};

/// Result code of a handler callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerResult {
    /// The callback was skipped.
    DidNotRun,

    /// The callback ran but found nothing.
    DidNotFind,

    /// All constraints are satisfied.
    Feasible,

    /// Some constraint is violated and nothing was done about it.
    Infeasible,

    /// Cutting planes were added.
    Separated,

    /// Constraints (clauses) were added.
    ConsAdded,

    /// Variable domains were reduced.
    ReducedDom,

    /// The current node is infeasible.
    Cutoff,

    /// Branching children were created.
    Branched,

    /// Presolving or conflict analysis succeeded.
    Success,
}

/// Variable and linear-constraint correspondence used when copying
/// constraints between models.
#[derive(Debug, Clone, Default)]
pub struct CopyMap {
    /// Source variable to target variable.
    pub vars: HashMap<VarId, VarId>,

    /// Source linear constraint to target linear constraint.
    pub linconss: HashMap<LinConsId, LinConsId>,
}

/// Callbacks a constraint handler exposes to the surrounding solver.
///
/// The handler owns its constraints; callbacks that act on the whole set
/// take no constraint argument. Per-constraint hooks receive the
/// [`ConsId`] returned at creation.
pub trait ConstraintHandler {
    /// Constraint data type.
    type Constraint;

    /// Handler name.
    fn name(&self) -> &str;

    /// Constraint data; fails for an unknown id.
    fn constraint(&self, cons: ConsId) -> IndicatorResult<&Self::Constraint>;

    /// Number of constraints, including deleted ones.
    fn n_constraints(&self) -> usize;

    /// Called once the problem has been transformed.
    fn init(&mut self, _model: &mut Model) -> IndicatorResult<()> {
        Ok(())
    }

    /// Called before the transformed problem is freed.
    fn exit(&mut self, _model: &mut Model) -> IndicatorResult<()> {
        Ok(())
    }

    /// Presolving is about to begin.
    fn init_pre(&mut self, _model: &mut Model) -> IndicatorResult<()> {
        Ok(())
    }

    /// One presolving round.
    fn presolve(
        &mut self,
        model: &mut Model,
        round: &PresolveRound,
        counters: &mut PresolveCounters,
    ) -> IndicatorResult<HandlerResult>;

    /// Presolving is finished.
    fn exit_pre(&mut self, model: &mut Model) -> IndicatorResult<HandlerResult>;

    /// Branch and bound is about to begin.
    fn init_sol(&mut self, model: &mut Model) -> IndicatorResult<()>;

    /// Branch and bound data is about to be freed.
    fn exit_sol(&mut self, model: &mut Model) -> IndicatorResult<()>;

    /// Remove a constraint from the problem.
    fn delete(&mut self, model: &mut Model, cons: ConsId) -> IndicatorResult<()>;

    /// Bring a constraint into the transformed problem.
    fn transform(&mut self, model: &mut Model, cons: ConsId) -> IndicatorResult<()>;

    /// Add the initial LP relaxation.
    fn init_lp(&mut self, model: &mut Model) -> IndicatorResult<()>;

    /// Add rounding locks for a constraint.
    ///
    /// `locks_pos` counts the constraint itself, `locks_neg` its negation.
    fn lock(&mut self, model: &mut Model, cons: ConsId, locks_pos: i32, locks_neg: i32) -> IndicatorResult<()>;

    /// A constraint becomes active at the current node.
    fn enable(&mut self, model: &mut Model, cons: ConsId) -> IndicatorResult<()>;

    /// A constraint becomes inactive at the current node.
    fn disable(&mut self, model: &mut Model, cons: ConsId) -> IndicatorResult<()>;

    /// Separate the current LP solution.
    fn separate_lp(&mut self, model: &mut Model) -> IndicatorResult<HandlerResult>;

    /// Separate an arbitrary primal solution.
    fn separate_sol(&mut self, model: &mut Model, sol: &Solution) -> IndicatorResult<HandlerResult>;

    /// Enforce the constraints on the current LP solution.
    fn enforce_lp(&mut self, model: &mut Model, sol_infeasible: bool) -> IndicatorResult<HandlerResult>;

    /// Enforce the constraints on the current pseudo solution.
    fn enforce_pseudo(
        &mut self,
        model: &mut Model,
        sol_infeasible: bool,
        obj_infeasible: bool,
    ) -> IndicatorResult<HandlerResult>;

    /// Check a complete solution.
    ///
    /// Returns [`HandlerResult::Feasible`] or [`HandlerResult::Infeasible`].
    fn check(&mut self, model: &mut Model, sol: &Solution, print_reason: bool) -> IndicatorResult<HandlerResult>;

    /// Domain propagation at the current node.
    fn propagate(&mut self, model: &mut Model) -> IndicatorResult<HandlerResult>;

    /// Explain a bound change made during propagation.
    fn resolve_propagation(
        &mut self,
        model: &mut Model,
        cons: ConsId,
        infer_var: VarId,
        info: i32,
    ) -> IndicatorResult<HandlerResult>;

    /// Text form of a constraint.
    fn print(&self, model: &Model, cons: ConsId) -> String;

    /// Copy a constraint of `source` into this handler.
    ///
    /// Returns `None` if some variable or linear constraint has no image
    /// in `map`.
    fn copy(
        &mut self,
        model: &mut Model,
        source: &Self,
        cons: ConsId,
        map: &CopyMap,
        name: Option<&str>,
    ) -> IndicatorResult<Option<ConsId>>;

    /// Create a constraint from its text form.
    fn parse(&mut self, model: &mut Model, name: &str, text: &str) -> IndicatorResult<ConsId>;
}
