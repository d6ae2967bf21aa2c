//! Property tests for column bookkeeping and IIS cut soundness.

use std::collections::HashSet;

use proptest::prelude::*;
use solver_indicator::altlp::FixGuard;
use solver_indicator::separation::lp_bounds_clean;
use solver_indicator::{
    ConsId, ConstraintHandler, IndicatorHandler, IndicatorSettings, Model, Solution, Stage, VarId, VarType,
};
use solver_lp::{DenseSimplex, LpColumn, LpInterface};

const INF: f64 = f64::INFINITY;

fn bounded_lp(bounds: &[(f64, f64)]) -> DenseSimplex {
    let mut lp = DenseSimplex::default();
    lp.add_rows(&[-INF], &[1.0]).unwrap();
    let cols: Vec<LpColumn> = bounds
        .iter()
        .map(|&(lb, ub)| LpColumn::new(1.0, lb, ub).with_entry(0, 1.0))
        .collect();
    lp.add_cols(&cols).unwrap();
    lp
}

fn bounds_strategy() -> impl Strategy<Value = Vec<(f64, f64)>> {
    prop::collection::vec(
        prop_oneof![Just((0.0, INF)), Just((0.0, 0.0)), (0.0..5.0f64).prop_map(|ub| (0.0, ub))],
        1..8,
    )
}

/// One constraint `y = 1 => x <= bound` (upper) or `y = 1 => x >= bound`.
#[derive(Debug, Clone, Copy)]
struct Bound {
    upper: bool,
    value: i32,
}

fn bound_strategy() -> impl Strategy<Value = Bound> {
    (any::<bool>(), 0..=20i32).prop_map(|(upper, value)| Bound { upper, value })
}

/// Indicators on a single variable `x in [0, 20]`, all binaries at 1.
fn separate_bounds(bounds: &[Bound]) -> (Model, Vec<VarId>) {
    let mut model = Model::new();
    let x = model.add_var("x", VarType::Continuous, 0.0, 20.0, 0.0);
    let mut handler = IndicatorHandler::new(IndicatorSettings::alternative_lp()).unwrap();

    let mut binaries = Vec::new();
    let mut conss = Vec::new();
    for (i, b) in bounds.iter().enumerate() {
        let y = model.add_var(format!("y{}", i), VarType::Binary, 0.0, 1.0, 1.0);
        let (coef, rhs) = if b.upper {
            (1.0, b.value as f64)
        } else {
            (-1.0, -b.value as f64)
        };
        let c = handler
            .create_indicator(&mut model, &format!("c{}", i), y, &[x], &[coef], rhs)
            .unwrap()
            .unwrap();
        binaries.push(y);
        conss.push(c);
    }

    model.set_stage(Stage::Transformed);
    for &c in &conss {
        handler.transform(&mut model, c).unwrap();
    }
    model.set_stage(Stage::InitSolve);
    handler.init_sol(&mut model).unwrap();
    model.set_stage(Stage::Solving);

    let mut sol = Solution::new(model.n_vars());
    for &y in &binaries {
        sol.set_value(y, 1.0);
    }
    model.set_lp_solution(sol);
    handler.separate_lp(&mut model).unwrap();
    (model, binaries)
}

fn is_infeasible(bounds: &[Bound]) -> bool {
    let lower = bounds.iter().filter(|b| !b.upper).map(|b| b.value).max();
    let upper = bounds.iter().filter(|b| b.upper).map(|b| b.value).min();
    matches!((lower, upper), (Some(l), Some(u)) if l > u)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_fix_guard_restores_bounds(
        bounds in bounds_strategy(),
        picks in prop::collection::vec(0..8usize, 0..12),
    ) {
        let mut lp = bounded_lp(&bounds);
        let cols: Vec<usize> = picks.into_iter().filter(|&c| c < bounds.len()).collect();
        {
            let mut guard = FixGuard::new(&mut lp);
            guard.fix(&cols).unwrap();
            // fixing twice changes nothing
            guard.fix(&cols).unwrap();
            let distinct: HashSet<usize> = cols.iter().copied().collect();
            prop_assert_eq!(guard.n_fixed(), distinct.len());
            for &c in &cols {
                prop_assert!(guard.is_fixed(c));
                prop_assert_eq!(guard.bounds(c).unwrap(), (0.0, 0.0));
            }
            guard.restore().unwrap();
        }
        for (c, &b) in bounds.iter().enumerate() {
            prop_assert_eq!(lp.bounds(c).unwrap(), b);
        }

        // dropping the guard restores as well
        {
            let mut guard = FixGuard::new(&mut lp);
            guard.fix(&cols).unwrap();
        }
        for (c, &b) in bounds.iter().enumerate() {
            prop_assert_eq!(lp.bounds(c).unwrap(), b);
        }
    }

    #[test]
    fn prop_columns_unique(
        before in 1..5usize,
        after in 0..5usize,
        deletions in prop::collection::vec(any::<bool>(), 10),
    ) {
        let mut model = Model::new();
        let x = model.add_var("x", VarType::Continuous, -5.0, 5.0, 0.0);
        let mut handler = IndicatorHandler::new(IndicatorSettings::alternative_lp()).unwrap();
        let mut conss: Vec<ConsId> = Vec::new();

        // constraints created while solving get their column immediately
        let create = |model: &mut Model, handler: &mut IndicatorHandler, i: usize| {
            let y = model.add_var(format!("y{}", i), VarType::Binary, 0.0, 1.0, 0.0);
            handler
                .create_indicator(model, &format!("c{}", i), y, &[x], &[1.0], i as f64)
                .unwrap()
                .unwrap()
        };

        for i in 0..before {
            conss.push(create(&mut model, &mut handler, i));
        }
        model.set_stage(Stage::Transformed);
        for &c in &conss {
            handler.transform(&mut model, c).unwrap();
        }
        model.set_stage(Stage::InitSolve);
        handler.init_sol(&mut model).unwrap();
        model.set_stage(Stage::Solving);
        for i in before..before + after {
            conss.push(create(&mut model, &mut handler, i));
        }

        for (&c, &del) in conss.iter().zip(&deletions) {
            if del {
                handler.delete(&mut model, c).unwrap();
            }
        }

        let mut seen = HashSet::new();
        for &c in &conss {
            let cons = handler.get(c).unwrap();
            if cons.deleted {
                prop_assert!(cons.col_index.is_none());
            } else {
                let col = cons.col_index.unwrap();
                prop_assert!(seen.insert(col), "column {} used twice", col);
            }
        }
        let lp = handler.separation_context().unwrap().lp().unwrap();
        prop_assert!(lp_bounds_clean(lp, handler.constraints(), &model.numerics));
    }

    #[test]
    fn prop_iis_cuts_are_sound(bounds in prop::collection::vec(bound_strategy(), 2..6)) {
        let (model, binaries) = separate_bounds(&bounds);

        for cut in &model.outbox.cuts {
            let support: Vec<Bound> = cut
                .coefs
                .iter()
                .map(|(v, _)| {
                    let i = binaries.iter().position(|y| y == v).unwrap();
                    bounds[i]
                })
                .collect();
            prop_assert!(is_infeasible(&support), "cut on a feasible subsystem: {:?}", support);
            prop_assert!((cut.rhs - (support.len() as f64 - 1.0)).abs() < 1e-12);
        }
        if is_infeasible(&bounds) {
            prop_assert!(!model.outbox.cuts.is_empty());
        } else {
            prop_assert!(model.outbox.cuts.is_empty());
        }
    }
}
