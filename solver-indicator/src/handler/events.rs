//! Tracking how many of binary and slack are bound away from zero.

use super::IndicatorHandler;
use crate::model::{BoundEvent, BoundEventKind, Model, Stage, VarId, VarStatus};

/// `event` as seen by `var`: the event itself, or its mirror image if
/// `var` is the negation of the changed variable.
fn event_for(model: &Model, var: VarId, event: &BoundEvent) -> Option<BoundEvent> {
    if var == event.var {
        return Some(*event);
    }
    let mirrored = match model.var(var).status {
        VarStatus::Negated(orig) => orig == event.var,
        _ => model.var(event.var).status == VarStatus::Negated(var),
    };
    if !mirrored {
        return None;
    }
    let kind = match event.kind {
        BoundEventKind::LbTightened => BoundEventKind::UbTightened,
        BoundEventKind::LbRelaxed => BoundEventKind::UbRelaxed,
        BoundEventKind::UbTightened => BoundEventKind::LbTightened,
        BoundEventKind::UbRelaxed => BoundEventKind::LbRelaxed,
    };
    Some(BoundEvent {
        var,
        kind,
        old_bound: 1.0 - event.old_bound,
        new_bound: 1.0 - event.new_bound,
    })
}

impl IndicatorHandler {
    /// Update the fixed-nonzero counters after a local bound change.
    ///
    /// The surrounding solver calls this for every bound change it applies;
    /// changes made by the handler itself are processed internally.
    pub fn process_bound_event(&mut self, model: &Model, event: &BoundEvent) {
        if model.stage() < Stage::Transformed {
            return;
        }
        let num = model.numerics;
        for cons in self.conss.iter_mut().filter(|c| c.lincons_active && !c.deleted) {
            for var in [cons.binvar, cons.slackvar] {
                let ev = match event_for(model, var, event) {
                    Some(ev) => ev,
                    None => continue,
                };
                let (old, new) = (ev.old_bound, ev.new_bound);
                match ev.kind {
                    BoundEventKind::LbTightened => {
                        if !num.is_feas_positive(old) && num.is_feas_positive(new) {
                            cons.n_fixed_nonzero += 1;
                        }
                    }
                    BoundEventKind::UbTightened => {
                        if !num.is_feas_negative(old) && num.is_feas_negative(new) {
                            cons.n_fixed_nonzero += 1;
                        }
                    }
                    BoundEventKind::LbRelaxed => {
                        if num.is_feas_positive(old) && !num.is_feas_positive(new) {
                            cons.n_fixed_nonzero = cons.n_fixed_nonzero.saturating_sub(1);
                        }
                    }
                    BoundEventKind::UbRelaxed => {
                        if num.is_feas_negative(old) && !num.is_feas_negative(new) {
                            cons.n_fixed_nonzero = cons.n_fixed_nonzero.saturating_sub(1);
                        }
                    }
                }
                log::trace!(
                    "<{}>: {:?} {} -> {}, {} fixed nonzero",
                    model.var(var).name,
                    ev.kind,
                    old,
                    new,
                    cons.n_fixed_nonzero
                );
            }
        }
    }

    /// Fix `var` globally and process the resulting local bound changes.
    ///
    /// Returns `(infeasible, fixed)`.
    pub(super) fn fix_and_notify(&mut self, model: &mut Model, var: VarId, value: f64) -> (bool, bool) {
        let (old_lb, old_ub) = (model.var(var).lb_local, model.var(var).ub_local);
        let (infeasible, fixed) = model.fix_var(var, value);
        if fixed {
            let mut events = Vec::with_capacity(2);
            if value > old_lb {
                events.push(BoundEvent {
                    var,
                    kind: BoundEventKind::LbTightened,
                    old_bound: old_lb,
                    new_bound: value,
                });
            }
            if value < old_ub {
                events.push(BoundEvent {
                    var,
                    kind: BoundEventKind::UbTightened,
                    old_bound: old_ub,
                    new_bound: value,
                });
            }
            for event in &events {
                self.process_bound_event(model, event);
            }
        }
        (infeasible, fixed)
    }
}

#[cfg(test)]
mod tests {
    use crate::handler::IndicatorHandler;
    use crate::model::{Model, Stage, VarType};
    use crate::settings::IndicatorSettings;

    #[test]
    fn test_fixed_nonzero_tracking() {
        let mut model = Model::new();
        let y = model.add_var("y", VarType::Binary, 0.0, 1.0, 0.0);
        let x = model.add_var("x", VarType::Continuous, 0.0, 10.0, 0.0);
        let mut handler = IndicatorHandler::new(IndicatorSettings::default()).unwrap();
        model.set_stage(Stage::Transformed);
        let c = handler
            .create_indicator(&mut model, "c", y, &[x], &[1.0], 5.0)
            .unwrap()
            .unwrap();
        let s = handler.get(c).unwrap().slackvar;

        let ev = model.chg_var_lb_local(y, 1.0).unwrap();
        handler.process_bound_event(&model, &ev);
        assert_eq!(handler.get(c).unwrap().n_fixed_nonzero, 1);

        let ev = model.chg_var_lb_local(s, 0.5).unwrap();
        handler.process_bound_event(&model, &ev);
        assert_eq!(handler.get(c).unwrap().n_fixed_nonzero, 2);

        let ev = model.chg_var_lb_local(y, 0.0).unwrap();
        handler.process_bound_event(&model, &ev);
        assert_eq!(handler.get(c).unwrap().n_fixed_nonzero, 1);
    }

    #[test]
    fn test_negated_binary_events() {
        let mut model = Model::new();
        let y = model.add_var("y", VarType::Binary, 0.0, 1.0, 0.0);
        let ny = model.negated(y);
        let x = model.add_var("x", VarType::Continuous, 0.0, 10.0, 0.0);
        let mut handler = IndicatorHandler::new(IndicatorSettings::default()).unwrap();
        model.set_stage(Stage::Transformed);
        let c = handler
            .create_indicator(&mut model, "c", ny, &[x], &[1.0], 5.0)
            .unwrap()
            .unwrap();

        // y <= 0 means ~y >= 1
        let ev = model.chg_var_ub_local(y, 0.0).unwrap();
        handler.process_bound_event(&model, &ev);
        assert_eq!(handler.get(c).unwrap().n_fixed_nonzero, 1);
    }
}
