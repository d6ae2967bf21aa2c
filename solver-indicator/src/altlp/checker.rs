//! Solving the alternative LP with retries.

use solver_lp::{LpInterface, LpParam, SolQuality};

use super::SeparationStats;

/// Outcome of an alternative LP solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AltLpVerdict {
    /// The LP is provably infeasible.
    pub infeasible: bool,

    /// The solve gave no trustworthy conclusion.
    pub error: bool,
}

impl AltLpVerdict {
    fn error() -> Self {
        Self {
            infeasible: false,
            error: true,
        }
    }
}

fn run(lp: &mut dyn LpInterface, primal: bool, stats: &mut SeparationStats) -> bool {
    stats.lp_solves += 1;
    let res = if primal { lp.solve_primal() } else { lp.solve_dual() };
    match res {
        Ok(()) => true,
        Err(e) => {
            log::debug!("alternative LP solve failed: {e}");
            false
        }
    }
}

/// Solve `lp` and decide whether it is infeasible.
///
/// The dual simplex (`primal == false`) may only be used when the LP is
/// known to be dual feasible, i.e. after bound changes only. An unstable
/// solve is repeated from scratch without presolving; a primal ray without
/// a definite status after the dual simplex triggers a primal re-solve.
/// A basis condition estimate above `max_condition` (if positive) makes the
/// result untrustworthy.
pub fn check_alt_lp_infeasible(
    lp: &mut dyn LpInterface,
    max_condition: f64,
    primal: bool,
    stats: &mut SeparationStats,
) -> AltLpVerdict {
    if !run(lp, primal, stats) {
        stats.lp_errors += 1;
        return AltLpVerdict::error();
    }

    if !lp.is_stable() {
        log::warn!("numerical problems in alternative LP, retrying from scratch");
        stats.resolves += 1;
        lp.set_int_par(LpParam::FromScratch, 1);
        lp.set_int_par(LpParam::Presolving, 0);
        let ok = run(lp, primal, stats);
        lp.set_int_par(LpParam::FromScratch, 0);
        lp.set_int_par(LpParam::Presolving, 1);
        if !ok {
            stats.lp_errors += 1;
            return AltLpVerdict::error();
        }
    }

    if max_condition > 0.0 {
        match lp.sol_quality(SolQuality::EstimCondition) {
            Some(condition) if condition > max_condition => {
                log::debug!(
                    "basis condition estimate {condition:.3e} exceeds limit {max_condition:.3e}"
                );
                stats.lp_errors += 1;
                return AltLpVerdict::error();
            }
            Some(condition) => {
                log::debug!("basis condition estimate {condition:.3e} within limit");
            }
            None => log::debug!("basis condition estimate not available"),
        }
    }

    if !lp.is_primal_infeasible()
        && !lp.is_primal_unbounded()
        && !lp.is_optimal()
        && lp.exists_primal_ray()
        && !primal
    {
        log::warn!("dual simplex produced a primal ray, retrying with primal simplex");
        stats.resolves += 1;
        lp.set_int_par(LpParam::FromScratch, 1);
        lp.set_int_par(LpParam::Presolving, 1);
        lp.set_int_par(LpParam::Scaling, 1);
        let ok = run(lp, true, stats);
        lp.set_int_par(LpParam::FromScratch, 0);
        if !ok {
            stats.lp_errors += 1;
            return AltLpVerdict::error();
        }
    }

    if lp.is_primal_infeasible() {
        return AltLpVerdict {
            infeasible: true,
            error: false,
        };
    }
    if !lp.is_primal_unbounded() && !lp.is_optimal() {
        log::warn!(
            "{} simplex returned without a definite status",
            if primal { "primal" } else { "dual" }
        );
        stats.lp_errors += 1;
        return AltLpVerdict::error();
    }
    AltLpVerdict::default()
}
