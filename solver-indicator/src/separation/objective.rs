//! Objective of the alternative LP.

use solver_lp::{LpInterface, LpResult};

use crate::cons::IndicatorConstraint;
use crate::model::{Model, Solution};

/// Objective of indicator columns whose binary is at one.
pub const OBJ_EPSILON: f64 = 0.001;

fn set_obj(lp: &mut dyn LpInterface, conss: &[IndicatorConstraint], value: impl Fn(&IndicatorConstraint) -> f64) -> LpResult<()> {
    let mut indices = Vec::with_capacity(conss.len());
    let mut obj = Vec::with_capacity(conss.len());
    for cons in conss.iter().filter(|c| c.is_usable()) {
        if let Some(col) = cons.col_index {
            indices.push(col);
            obj.push(value(cons));
        }
    }
    lp.chg_obj(&indices, &obj)
}

/// Objective `1 - y` per indicator column, biasing the LP towards small
/// subsystems of constraints violated by `sol`.
pub fn set_alt_lp_obj(
    lp: &mut dyn LpInterface,
    model: &Model,
    conss: &[IndicatorConstraint],
    sol: Option<&Solution>,
) -> LpResult<()> {
    let num = model.numerics;
    set_obj(lp, conss, |cons| {
        let val = model.sol_val(sol, cons.binvar);
        if num.is_feas_eq(val, 1.0) {
            OBJ_EPSILON
        } else {
            1.0 - val
        }
    })
}

/// Uniform small objective on all indicator columns.
pub fn set_alt_lp_obj_zero(lp: &mut dyn LpInterface, conss: &[IndicatorConstraint]) -> LpResult<()> {
    set_obj(lp, conss, |_| OBJ_EPSILON)
}
