//! # solver-indicator
//!
//! A constraint handler for indicator constraints
//!
//! ```text
//!   y = 1  =>  a^T x <= b
//! ```
//!
//! with `y` binary. Each constraint is stored as `a^T x - s <= b` with a
//! slack `s >= 0`, and the handler enforces `y = 1 => s = 0` through
//! propagation, branching and cutting planes.
//!
//! # Alternative-LP separation
//!
//! With [`IndicatorSettings::sepa_alternative_lp`] the handler keeps an
//! alternative polyhedron LP whose vertices correspond to irreducible
//! infeasible subsystems (IIS) of the linear parts. An IIS over indicators
//! `C` yields the cut
//!
//! ```text
//!   sum_{j in C} y_j <= |C| - 1
//! ```
//!
//! Cuts are found by threshold rounding of the relaxation values and by
//! extending a fixed set of columns to a cover of infeasible subsystems.
//!
//! # Example
//!
//! ```ignore
//! use solver_indicator::{ConstraintHandler, IndicatorHandler, IndicatorSettings, Model, Stage, VarType};
//!
//! let mut model = Model::new();
//! let y = model.add_var("y", VarType::Binary, 0.0, 1.0, 1.0);
//! let x = model.add_var("x", VarType::Continuous, 0.0, 10.0, 0.0);
//!
//! let mut handler = IndicatorHandler::new(IndicatorSettings::alternative_lp())?;
//! handler.create_indicator(&mut model, "c", y, &[x], &[1.0], 5.0)?;
//!
//! model.set_stage(Stage::InitSolve);
//! handler.init_sol(&mut model)?;
//! let result = handler.separate_lp(&mut model)?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::too_many_arguments)]

pub mod altlp;
pub mod cons;
pub mod cuts;
pub mod error;
pub mod handler;
pub mod model;
pub mod separation;
pub mod settings;

pub use altlp::{LpFactory, SeparationContext, SeparationStats};
pub use cons::{ConsId, IndicatorConstraint};
pub use cuts::{Clause, CutPool, LinearCut};
pub use error::{IndicatorError, IndicatorResult};
pub use handler::{ConstraintHandler, CopyMap, HandlerResult, IndicatorHandler, PresolveCounters, PresolveRound};
pub use model::{Model, Solution, Stage, VarId, VarType};
pub use settings::IndicatorSettings;
