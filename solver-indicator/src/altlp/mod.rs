//! The alternative polyhedron LP.
//!
//! For the system of indicator linear parts `A x <= b` together with the
//! variable bounds, the alternative LP is
//!
//! ```text
//!   b^T u + ub^T w - lb^T v = -1
//!   A^T u + w - v           =  0
//!   u, v, w                 >= 0
//! ```
//!
//! Row 0 carries the normalization; every other row belongs to one original
//! or slack variable. Each indicator contributes one `u` column, each finite
//! bound one `v` or `w` column. Vertices of this polyhedron correspond to
//! irreducible infeasible subsystems; fixing an indicator column to zero
//! removes its inequality from the system.

mod bounds;
mod builder;
mod checker;
mod fixing;
mod registry;

use std::fmt;
use std::rc::Rc;

use solver_lp::{DenseSimplex, LpInterface, LpParam};

use crate::error::IndicatorResult;

pub use builder::{linear_part, LinearPart};
pub use checker::{check_alt_lp_infeasible, AltLpVerdict};
pub use fixing::FixGuard;
pub use registry::{Registry, SlackRow};

/// Creates fresh LP backends for the alternative LP.
pub type LpFactory = Rc<dyn Fn() -> Box<dyn LpInterface>>;

/// Factory for the bundled dense simplex backend.
pub fn default_lp_factory() -> LpFactory {
    Rc::new(|| Box::new(DenseSimplex::default()) as Box<dyn LpInterface>)
}

/// Counters kept across separation, enforcement and checking calls.
#[derive(Debug, Default, Clone)]
pub struct SeparationStats {
    /// Alternative LP solves (including retries).
    pub lp_solves: usize,

    /// Solves repeated because of numerical instability or a primal ray.
    pub resolves: usize,

    /// Solves that gave no conclusion.
    pub lp_errors: usize,

    /// Cuts and clauses generated.
    pub cuts: usize,

    /// Cuts found to be only locally valid.
    pub local_cuts: usize,

    /// Successful rounding rounds.
    pub rounding_rounds: usize,
}

/// State of the alternative LP for one solve.
///
/// Created when solving starts, extended as constraints arrive and dropped
/// when solving ends. Every separation routine receives it explicitly.
pub struct SeparationContext {
    lp: Option<Box<dyn LpInterface>>,
    factory: LpFactory,
    registry: Registry,
    n_rows: usize,
    n_lb_bounds: usize,
    n_ub_bounds: usize,
    scaled: bool,
    stats: SeparationStats,
}

impl fmt::Debug for SeparationContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SeparationContext")
            .field("has_lp", &self.lp.is_some())
            .field("n_rows", &self.n_rows)
            .field("n_lb_bounds", &self.n_lb_bounds)
            .field("n_ub_bounds", &self.n_ub_bounds)
            .field("scaled", &self.scaled)
            .field("stats", &self.stats)
            .finish()
    }
}

impl SeparationContext {
    /// Create a context; the LP itself is built on first use.
    pub fn new(factory: LpFactory) -> Self {
        Self {
            lp: None,
            factory,
            registry: Registry::default(),
            n_rows: 0,
            n_lb_bounds: 0,
            n_ub_bounds: 0,
            scaled: false,
            stats: SeparationStats::default(),
        }
    }

    /// Create the LP with its normalization row.
    fn init_lp(&mut self) -> IndicatorResult<()> {
        if self.lp.is_some() {
            return Ok(());
        }
        let mut lp = (self.factory)();
        lp.add_rows(&[-1.0], &[-1.0])?;
        lp.set_int_par(LpParam::FromScratch, 0);
        lp.set_int_par(LpParam::Presolving, 1);
        lp.set_int_par(LpParam::Scaling, 1);
        lp.set_int_par(LpParam::FastMip, 0);
        self.n_rows = 1;
        self.scaled = false;
        self.lp = Some(lp);
        log::debug!("initialized alternative LP");
        Ok(())
    }

    /// The LP has been created.
    pub fn has_lp(&self) -> bool {
        self.lp.is_some()
    }

    /// The alternative LP, if created.
    pub fn lp(&self) -> Option<&dyn LpInterface> {
        self.lp.as_deref()
    }

    /// Mutable access to the alternative LP, if created.
    pub fn lp_mut(&mut self) -> Option<&mut (dyn LpInterface + 'static)> {
        self.lp.as_deref_mut()
    }

    /// Row and column maps.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Register `var` as a slack variable (row assigned on first use).
    pub fn register_slack(&mut self, var: crate::model::VarId) {
        self.registry.register_slack(var);
    }

    /// Number of rows created, including the normalization row.
    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    /// Number of lower bound columns.
    pub fn n_lb_bounds(&self) -> usize {
        self.n_lb_bounds
    }

    /// Number of upper bound columns.
    pub fn n_ub_bounds(&self) -> usize {
        self.n_ub_bounds
    }

    /// Row 0 has been rescaled since the last change.
    pub fn is_scaled(&self) -> bool {
        self.scaled
    }

    /// Separation statistics.
    pub fn stats(&self) -> &SeparationStats {
        &self.stats
    }

    /// Split borrows of the LP, registry and statistics.
    pub(crate) fn parts(&mut self) -> Option<(&mut dyn LpInterface, &Registry, &mut SeparationStats)> {
        let lp = self.lp.as_deref_mut()?;
        Some((lp, &self.registry, &mut self.stats))
    }
}
