//! Enforcement and feasibility checking through the alternative LP.

use solver_lp::LpParam;

use super::cover::{extend_to_cover, CoverParams, CoverSet};
use super::debug::lp_bounds_clean;
use super::objective::set_alt_lp_obj_zero;
use crate::altlp::{check_alt_lp_infeasible, FixGuard, SeparationContext};
use crate::cons::IndicatorConstraint;
use crate::error::{IndicatorError, IndicatorResult};
use crate::model::{Model, Solution};
use crate::settings::IndicatorSettings;

/// Prepare row 0 and the objective for an exact fixing, and collect the
/// constraints whose binary is zero in `sol`.
fn prepare_exact(
    ctx: &mut SeparationContext,
    model: &Model,
    conss: &[IndicatorConstraint],
    sol: Option<&Solution>,
    update_bounds: bool,
) -> IndicatorResult<CoverSet> {
    debug_assert!(ctx.lp().map_or(true, |lp| lp_bounds_clean(lp, conss, &model.numerics)));
    if update_bounds {
        ctx.update_first_row_global(model)?;
    }
    ctx.scale_first_row()?;
    if let Some(lp) = ctx.lp_mut() {
        set_alt_lp_obj_zero(lp, conss)?;
    }

    let num = model.numerics;
    let mut cover = CoverSet::new(conss.len());
    for (j, cons) in conss.iter().enumerate() {
        if cons.is_usable() && num.is_feas_zero(model.sol_val(sol, cons.binvar)) {
            cover.insert(j, model.var(cons.binvar).obj);
        }
    }
    Ok(cover)
}

/// Generate cuts for an integral solution by fixing exactly the
/// constraints whose binary is zero.
///
/// Fails with [`IndicatorError::LpError`] if no cut was found and an LP
/// solve gave no conclusion. Returns the number of cuts generated.
pub fn enforce_cuts(
    ctx: &mut SeparationContext,
    model: &mut Model,
    conss: &[IndicatorConstraint],
    sol: Option<&Solution>,
    settings: &IndicatorSettings,
    gen_logicor: bool,
) -> IndicatorResult<usize> {
    if !ctx.has_lp() {
        return Ok(0);
    }
    let mut cover = prepare_exact(ctx, model, conss, sol, settings.update_bounds)?;

    let (lp, registry, stats) = match ctx.parts() {
        Some(parts) => parts,
        None => return Ok(0),
    };
    let params = CoverParams {
        max_condition: settings.max_condition_alt_lp,
        removable: settings.removable,
        gen_logicor,
    };

    let mut guard = FixGuard::new(&mut *lp);
    guard.fix(&cover.columns(conss))?;
    let outcome = extend_to_cover(&mut guard, registry, stats, model, conss, sol, &mut cover, params)?;
    if outcome.n_gen == 0 && outcome.error {
        return Err(IndicatorError::LpError(
            "alternative LP could not be solved during enforcement".into(),
        ));
    }
    guard.restore()?;

    debug_assert!(lp_bounds_clean(&*lp, conss, &model.numerics));
    log::debug!("enforcement generated {} IIS cuts", outcome.n_gen);
    Ok(outcome.n_gen)
}

/// Whether `sol` satisfies the indicator system according to the
/// alternative LP.
///
/// The constraints with zero binary are dropped; the remaining linear parts
/// are jointly feasible exactly if the alternative LP is infeasible. Without
/// an alternative LP nothing can be certified and `false` is returned.
pub fn check_alt_lp_feasibility(
    ctx: &mut SeparationContext,
    model: &Model,
    conss: &[IndicatorConstraint],
    sol: Option<&Solution>,
    settings: &IndicatorSettings,
) -> IndicatorResult<bool> {
    if !ctx.has_lp() {
        return Ok(false);
    }
    let cover = prepare_exact(ctx, model, conss, sol, settings.update_bounds)?;

    let (lp, _, stats) = match ctx.parts() {
        Some(parts) => parts,
        None => return Ok(false),
    };
    let mut guard = FixGuard::new(&mut *lp);
    guard.fix(&cover.columns(conss))?;
    guard.set_int_par(LpParam::FromScratch, 1);
    let verdict = check_alt_lp_infeasible(&mut *guard, settings.max_condition_alt_lp, true, stats);
    guard.set_int_par(LpParam::FromScratch, 0);
    if verdict.error {
        return Err(IndicatorError::LpError(
            "alternative LP could not be solved during check".into(),
        ));
    }
    guard.restore()?;

    debug_assert!(lp_bounds_clean(&*lp, conss, &model.numerics));
    Ok(verdict.infeasible)
}
