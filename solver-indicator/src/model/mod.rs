//! Interface to the surrounding solver.
//!
//! The handler never owns variables or linear constraints; it reads and
//! modifies them through [`Model`] and reports everything it produces
//! (cuts, clauses, branching children, deletions) through the [`Outbox`].

mod numerics;
mod outbox;
mod problem;
mod solution;

pub use numerics::Numerics;
pub use outbox::{
    Bilinear, BoundChange, BranchChild, Implication, Inference, Outbox, VarBound,
};
pub use problem::{
    BoundEvent, BoundEventKind, InferOutcome, LinConsId, LinearConstraint, Model, Stage,
    VarId, VarStatus, VarType, Variable,
};
pub use solution::Solution;
