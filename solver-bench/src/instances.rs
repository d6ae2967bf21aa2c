//! Random indicator instances.

use anyhow::Result;
use clap::ValueEnum;
use solver_indicator::{ConsId, IndicatorHandler, Model, Solution, VarId, VarType};

/// Instance family.
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum Family {
    /// Bounds `x_j <= u` or `x_j >= l` on a few shared variables.
    Intervals,
    /// Dense rows `a^T x <= b` over all variables.
    Rows,
}

/// Simple LCG random number generator in `[0, 1)`.
pub struct Lcg(u64);

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Self(seed)
    }

    /// Top 53 bits of the state, scaled to `[0, 1)`.
    pub fn uniform(&mut self) -> f64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        ((self.0 >> 11) as f64) / ((1u64 << 53) as f64)
    }

    pub fn below(&mut self, n: usize) -> usize {
        ((self.uniform() * n as f64) as usize).min(n - 1)
    }
}

pub struct Instance {
    pub model: Model,
    pub binaries: Vec<VarId>,
    pub conss: Vec<ConsId>,
}

/// Create `n_cons` indicator constraints on `n_vars` variables in `[0, 10]`.
pub fn generate(
    handler: &mut IndicatorHandler,
    family: Family,
    n_vars: usize,
    n_cons: usize,
    rng: &mut Lcg,
) -> Result<Instance> {
    let mut model = Model::new();
    let xs: Vec<VarId> = (0..n_vars)
        .map(|j| model.add_var(format!("x{}", j), VarType::Continuous, 0.0, 10.0, 0.0))
        .collect();

    let mut binaries = Vec::with_capacity(n_cons);
    let mut conss = Vec::with_capacity(n_cons);
    for i in 0..n_cons {
        let y = model.add_var(format!("y{}", i), VarType::Binary, 0.0, 1.0, 1.0 + rng.uniform());
        let (vars, vals, rhs) = match family {
            Family::Intervals => {
                let x = xs[rng.below(n_vars)];
                let bound = (10.0 * rng.uniform()).round();
                if rng.uniform() < 0.5 {
                    (vec![x], vec![1.0], bound)
                } else {
                    (vec![x], vec![-1.0], -bound)
                }
            }
            Family::Rows => {
                let vals: Vec<f64> = (0..n_vars).map(|_| (4.0 * rng.uniform() - 2.0).round()).collect();
                let rhs = (20.0 * rng.uniform() - 10.0).round();
                (xs.clone(), vals, rhs)
            }
        };
        let c = handler.create_indicator(&mut model, &format!("ind{}", i), y, &vars, &vals, rhs)?;
        if let Some(c) = c {
            binaries.push(y);
            conss.push(c);
        }
    }
    Ok(Instance {
        model,
        binaries,
        conss,
    })
}

/// Relaxation point with random binary values.
pub fn fractional_point(model: &Model, binaries: &[VarId], rng: &mut Lcg) -> Solution {
    let mut sol = Solution::new(model.n_vars());
    for &y in binaries {
        sol.set_value(y, rng.uniform());
    }
    sol
}
