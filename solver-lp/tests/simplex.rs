use proptest::prelude::*;
use solver_lp::{DenseSimplex, LpColumn, LpInterface, LpParam, SimplexStatus, SolQuality};

const INF: f64 = f64::INFINITY;

/// min -2x - y  s.t.  x + y <= 4,  x + 2y <= 6,  x in [0, 3],  y in [0, 10]
fn small_lp() -> DenseSimplex {
    let mut lp = DenseSimplex::default();
    lp.add_rows(&[-INF, -INF], &[4.0, 6.0]).unwrap();
    lp.add_cols(&[
        LpColumn::new(-2.0, 0.0, 3.0).with_entry(0, 1.0).with_entry(1, 1.0),
        LpColumn::new(-1.0, 0.0, 10.0).with_entry(0, 1.0).with_entry(1, 2.0),
    ])
    .unwrap();
    lp
}

#[test]
fn test_primal_optimal() {
    let mut lp = small_lp();
    lp.solve_primal().unwrap();
    assert!(lp.is_optimal());
    assert!(lp.is_stable());

    let x = lp.primal_solution().unwrap();
    assert!((x[0] - 3.0).abs() < 1e-8);
    assert!((x[1] - 1.0).abs() < 1e-8);
    assert!((lp.objective_value().unwrap() + 7.0).abs() < 1e-8);
}

#[test]
fn test_warm_start_after_bound_change() {
    let mut lp = small_lp();
    lp.solve_primal().unwrap();
    assert!(lp.is_optimal());

    lp.chg_bounds(&[0], &[0.0], &[1.0]).unwrap();
    lp.solve_dual().unwrap();
    assert!(lp.is_optimal());

    let x = lp.primal_solution().unwrap();
    assert!((x[0] - 1.0).abs() < 1e-8);
    assert!((x[1] - 2.5).abs() < 1e-8);
    assert!((lp.objective_value().unwrap() + 4.5).abs() < 1e-8);
}

#[test]
fn test_from_scratch_gives_same_answer() {
    let mut lp = small_lp();
    lp.solve_primal().unwrap();
    lp.set_int_par(LpParam::FromScratch, 1);
    lp.chg_bounds(&[0], &[0.0], &[1.0]).unwrap();
    lp.solve_primal().unwrap();
    assert!(lp.is_optimal());
    assert!((lp.objective_value().unwrap() + 4.5).abs() < 1e-8);
}

#[test]
fn test_infeasible() {
    // x + y >= 5 with x, y in [0, 2]
    let mut lp = DenseSimplex::default();
    lp.add_rows(&[5.0], &[INF]).unwrap();
    lp.add_cols(&[
        LpColumn::new(0.0, 0.0, 2.0).with_entry(0, 1.0),
        LpColumn::new(0.0, 0.0, 2.0).with_entry(0, 1.0),
    ])
    .unwrap();

    lp.solve_primal().unwrap();
    assert!(lp.is_primal_infeasible());
    assert!(!lp.is_optimal());

    lp.solve_dual().unwrap();
    assert!(lp.is_primal_infeasible());
}

#[test]
fn test_unbounded_ray() {
    // min -x  s.t.  x - y <= 1,  x, y >= 0
    let mut lp = DenseSimplex::default();
    lp.add_rows(&[-INF], &[1.0]).unwrap();
    lp.add_cols(&[
        LpColumn::new(-1.0, 0.0, INF).with_entry(0, 1.0),
        LpColumn::new(0.0, 0.0, INF).with_entry(0, -1.0),
    ])
    .unwrap();

    lp.solve_primal().unwrap();
    assert!(lp.is_primal_unbounded());
    assert!(lp.exists_primal_ray());
    let ray = lp.primal_ray().unwrap();
    assert!(ray[0] > 0.0);
    assert!((ray[0] - ray[1]).abs() < 1e-9);
}

#[test]
fn test_equality_row() {
    // min x + 2y  s.t.  x + y = 3,  x in [0, 2],  y >= 0
    let mut lp = DenseSimplex::default();
    lp.add_rows(&[3.0], &[3.0]).unwrap();
    lp.add_cols(&[
        LpColumn::new(1.0, 0.0, 2.0).with_entry(0, 1.0),
        LpColumn::new(2.0, 0.0, INF).with_entry(0, 1.0),
    ])
    .unwrap();

    lp.solve_primal().unwrap();
    assert!(lp.is_optimal());
    let x = lp.primal_solution().unwrap();
    assert!((x[0] - 2.0).abs() < 1e-8);
    assert!((x[1] - 1.0).abs() < 1e-8);
}

#[test]
fn test_free_column() {
    // min x  s.t.  x >= -5,  x free
    let mut lp = DenseSimplex::default();
    lp.add_rows(&[-5.0], &[INF]).unwrap();
    lp.add_cols(&[LpColumn::new(1.0, -INF, INF).with_entry(0, 1.0)])
        .unwrap();

    lp.solve_primal().unwrap();
    assert!(lp.is_optimal());
    assert!((lp.primal_solution().unwrap()[0] + 5.0).abs() < 1e-8);
}

#[test]
fn test_rows_added_after_solve() {
    let mut lp = small_lp();
    lp.solve_primal().unwrap();
    assert!(lp.is_optimal());

    // x <= 2 as a new row
    lp.add_rows(&[-INF], &[2.0]).unwrap();
    lp.chg_coef(2, 0, 1.0).unwrap();
    assert_eq!(lp.row(2).unwrap(), vec![(0, 1.0)]);

    lp.solve_dual().unwrap();
    assert!(lp.is_optimal());
    let x = lp.primal_solution().unwrap();
    assert!((x[0] - 2.0).abs() < 1e-8);
    assert!((x[1] - 2.0).abs() < 1e-8);
}

#[test]
fn test_condition_reported() {
    let mut lp = small_lp();
    assert!(lp.sol_quality(SolQuality::EstimCondition).is_none());
    lp.solve_primal().unwrap();
    let cond = lp.sol_quality(SolQuality::EstimCondition).unwrap();
    assert!(cond >= 1.0 - 1e-12);
    assert_eq!(lp.status(), SimplexStatus::Optimal);
}

#[test]
fn test_dimension_mismatch() {
    let mut lp = small_lp();
    assert!(lp.chg_bounds(&[0, 1], &[0.0], &[1.0]).is_err());
    assert!(lp.chg_obj(&[5], &[1.0]).is_err());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Packing LPs: `A x <= b` with `b >= 0`, boxed columns. The origin is
    /// feasible, so both methods must reach the same optimum.
    #[test]
    fn prop_primal_and_dual_agree(
        m in 1usize..4,
        n in 1usize..4,
        coefs in proptest::collection::vec(-3i32..4, 16),
        rhs in proptest::collection::vec(0i32..6, 4),
        cost in proptest::collection::vec(-4i32..4, 4),
    ) {
        let build = || {
            let mut lp = DenseSimplex::default();
            let lhs = vec![-INF; m];
            let b: Vec<f64> = rhs[..m].iter().map(|&v| f64::from(v)).collect();
            lp.add_rows(&lhs, &b).unwrap();
            let cols: Vec<LpColumn> = (0..n)
                .map(|j| {
                    let mut c = LpColumn::new(f64::from(cost[j]), 0.0, 5.0);
                    for i in 0..m {
                        let a = coefs[i * 4 + j];
                        if a != 0 {
                            c = c.with_entry(i, f64::from(a));
                        }
                    }
                    c
                })
                .collect();
            lp.add_cols(&cols).unwrap();
            lp
        };

        let mut primal = build();
        primal.solve_primal().unwrap();
        prop_assert!(primal.is_optimal());

        let mut dual = build();
        dual.solve_dual().unwrap();
        prop_assert!(dual.is_optimal());

        let zp = primal.objective_value().unwrap();
        let zd = dual.objective_value().unwrap();
        prop_assert!((zp - zd).abs() < 1e-6);

        let x = primal.primal_solution().unwrap();
        for i in 0..m {
            let act: f64 = primal.row(i).unwrap().iter().map(|&(j, a)| a * x[j]).sum();
            prop_assert!(act <= f64::from(rhs[i]) + 1e-6);
        }
        for v in &x {
            prop_assert!(*v >= -1e-9 && *v <= 5.0 + 1e-9);
        }
    }
}
