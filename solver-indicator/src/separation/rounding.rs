//! Threshold rounding separation.

use super::cover::{extend_to_cover, CoverParams, CoverSet};
use super::debug::lp_bounds_clean;
use super::objective::set_alt_lp_obj;
use crate::altlp::{FixGuard, SeparationContext};
use crate::cons::IndicatorConstraint;
use crate::error::IndicatorResult;
use crate::model::{Model, Solution};
use crate::settings::IndicatorSettings;

/// Separate IIS cuts for `sol` by rounding the binaries.
///
/// For each threshold from `rounding_max_thres` down to `rounding_min_thres`
/// (step `rounding_offset`), the constraints whose binary is below the
/// threshold start fixed and are extended to a cover. Stops after
/// `rounding_rounds` thresholds that produced cuts. LP errors only end the
/// current threshold. Returns the number of cuts generated.
pub fn separate_iis_rounding(
    ctx: &mut SeparationContext,
    model: &mut Model,
    conss: &[IndicatorConstraint],
    sol: Option<&Solution>,
    settings: &IndicatorSettings,
) -> IndicatorResult<usize> {
    if !ctx.has_lp() {
        return Ok(0);
    }
    debug_assert!(ctx.lp().map_or(true, |lp| lp_bounds_clean(lp, conss, &model.numerics)));

    if settings.update_bounds {
        ctx.update_first_row(model)?;
    }
    ctx.scale_first_row()?;

    let (lp, registry, stats) = match ctx.parts() {
        Some(parts) => parts,
        None => return Ok(0),
    };
    set_alt_lp_obj(lp, model, conss, sol)?;

    let num = model.numerics;
    let params = CoverParams {
        max_condition: settings.max_condition_alt_lp,
        removable: settings.removable,
        gen_logicor: settings.gen_logicor,
    };
    let n_usable = conss.iter().filter(|c| c.is_usable()).count();
    let mut n_gen = 0;
    let mut rounds = 0;
    let mut threshold = settings.rounding_max_thres;

    while rounds < settings.rounding_rounds && threshold >= settings.rounding_min_thres {
        let mut cover = CoverSet::new(conss.len());
        for (j, cons) in conss.iter().enumerate() {
            if cons.is_usable() && num.is_feas_lt(model.sol_val(sol, cons.binvar), threshold) {
                cover.insert(j, model.var(cons.binvar).obj);
            }
        }

        if cover.size() == n_usable {
            log::debug!("threshold {threshold:.3}: all constraints fixed, skipping");
            threshold -= settings.rounding_offset;
            continue;
        }

        let mut guard = FixGuard::new(&mut *lp);
        guard.fix(&cover.columns(conss))?;
        let outcome = extend_to_cover(&mut guard, registry, stats, model, conss, sol, &mut cover, params)?;
        guard.restore()?;

        if outcome.n_gen > 0 {
            n_gen += outcome.n_gen;
            rounds += 1;
            stats.rounding_rounds += 1;
        }
        log::debug!(
            "threshold {threshold:.3}: cover of size {} with value {:.3}, {} cuts",
            cover.size(),
            cover.value(),
            outcome.n_gen
        );
        threshold -= settings.rounding_offset;
    }

    debug_assert!(lp_bounds_clean(&*lp, conss, &model.numerics));
    log::debug!("rounding separation generated {n_gen} IIS cuts");
    Ok(n_gen)
}
