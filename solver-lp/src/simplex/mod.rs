//! Dense bounded simplex implementing [`LpInterface`].
//!
//! Structurals and row logicals share one variable space; a warm basis is
//! kept across solves and extended when rows or columns are appended.

mod basis;
mod dual;
mod primal;
mod work;

use std::collections::HashMap;

use crate::data::LpData;
use crate::error::{LpError, LpResult};
use crate::lpi::{LpColumn, LpInterface, LpParam, SolQuality};
use crate::settings::SimplexSettings;

pub use work::SimplexStatus;
use work::{WarmBasis, Work};

/// Which simplex variant to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Method {
    Primal,
    Dual,
}

/// Simplex LP backend on dense basis factorizations.
#[derive(Debug, Clone)]
pub struct DenseSimplex {
    data: LpData,
    settings: SimplexSettings,
    params: HashMap<LpParam, i32>,
    warm: Option<WarmBasis>,
    status: SimplexStatus,
    stable: bool,
    x: Vec<f64>,
    ray: Option<Vec<f64>>,
    condition: Option<f64>,
    iterations: usize,
}

impl Default for DenseSimplex {
    fn default() -> Self {
        Self::new(SimplexSettings::default())
    }
}

impl DenseSimplex {
    /// Create an empty LP.
    pub fn new(settings: SimplexSettings) -> Self {
        Self {
            data: LpData::new(),
            settings,
            params: HashMap::new(),
            warm: None,
            status: SimplexStatus::NotSolved,
            stable: true,
            x: Vec::new(),
            ray: None,
            condition: None,
            iterations: 0,
        }
    }

    /// Underlying LP data.
    pub fn data(&self) -> &LpData {
        &self.data
    }

    /// Status of the last solve.
    pub fn status(&self) -> SimplexStatus {
        self.status
    }

    /// Iterations spent by the last solve.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Primal ray of the last solve, if unbounded.
    pub fn primal_ray(&self) -> Option<&[f64]> {
        self.ray.as_deref()
    }

    /// Objective value of the last solution.
    pub fn objective_value(&self) -> LpResult<f64> {
        if self.status == SimplexStatus::NotSolved {
            return Err(LpError::NoSolution);
        }
        Ok(self
            .data
            .obj_vec()
            .iter()
            .zip(&self.x)
            .map(|(c, x)| c * x)
            .sum())
    }

    fn modified(&mut self) {
        self.status = SimplexStatus::NotSolved;
        self.ray = None;
    }

    fn solve(&mut self, method: Method) -> LpResult<()> {
        if self.int_par(LpParam::FromScratch) != 0 {
            self.warm = None;
        }

        let mut work = Work::new(&self.data, &self.settings, self.warm.as_ref());
        let mut status = match method {
            Method::Primal => work.primal(),
            Method::Dual if work.is_dual_feasible() => {
                let s = work.dual();
                if s == SimplexStatus::IterationLimit {
                    log::debug!("dual simplex hit iteration limit, continuing with primal");
                    work.iterations = 0;
                    work.primal()
                } else {
                    s
                }
            }
            Method::Dual => work.primal(),
        };

        let residual = work.residual();
        let mut stable = status != SimplexStatus::NumericalTrouble;
        if residual > self.settings.tol_residual {
            log::debug!("simplex residual {residual:.3e} above tolerance");
            stable = false;
            if status == SimplexStatus::Optimal {
                status = SimplexStatus::NumericalTrouble;
            }
        }

        self.x = work.x[..work.n].to_vec();
        self.ray = work.ray.take();
        self.condition = Some(work.factor.condition(&work.basis_matrix()));
        self.iterations = work.iterations;
        self.warm = stable.then(|| work.warm_basis());
        self.status = status;
        self.stable = stable;

        if self.settings.verbose {
            log::info!(
                "simplex ({:?}): {:?} after {} iterations, {} rows, {} cols",
                method,
                status,
                self.iterations,
                self.data.nrows(),
                self.data.ncols()
            );
        }
        Ok(())
    }
}

impl LpInterface for DenseSimplex {
    fn infinity(&self) -> f64 {
        f64::INFINITY
    }

    fn n_rows(&self) -> usize {
        self.data.nrows()
    }

    fn n_cols(&self) -> usize {
        self.data.ncols()
    }

    fn add_rows(&mut self, lhs: &[f64], rhs: &[f64]) -> LpResult<()> {
        self.data.add_rows(lhs, rhs)?;
        self.modified();
        Ok(())
    }

    fn add_cols(&mut self, cols: &[LpColumn]) -> LpResult<()> {
        for c in cols {
            self.data.add_col(c.obj, c.lb, c.ub, &c.entries)?;
        }
        self.modified();
        Ok(())
    }

    fn chg_obj(&mut self, indices: &[usize], values: &[f64]) -> LpResult<()> {
        if indices.len() != values.len() {
            return Err(LpError::DimensionMismatch(format!(
                "{} indices, {} values",
                indices.len(),
                values.len()
            )));
        }
        for (&j, &v) in indices.iter().zip(values) {
            self.data.set_obj(j, v)?;
        }
        self.modified();
        Ok(())
    }

    fn obj(&self, col: usize) -> LpResult<f64> {
        self.data.obj(col)
    }

    fn chg_bounds(&mut self, indices: &[usize], lb: &[f64], ub: &[f64]) -> LpResult<()> {
        if indices.len() != lb.len() || indices.len() != ub.len() {
            return Err(LpError::DimensionMismatch(format!(
                "{} indices, {} lower, {} upper",
                indices.len(),
                lb.len(),
                ub.len()
            )));
        }
        for ((&j, &l), &u) in indices.iter().zip(lb).zip(ub) {
            self.data.set_bounds(j, l, u)?;
        }
        self.modified();
        Ok(())
    }

    fn bounds(&self, col: usize) -> LpResult<(f64, f64)> {
        self.data.bounds(col)
    }

    fn chg_coef(&mut self, row: usize, col: usize, value: f64) -> LpResult<()> {
        self.data.set_coef(row, col, value)?;
        self.modified();
        Ok(())
    }

    fn chg_sides(&mut self, indices: &[usize], lhs: &[f64], rhs: &[f64]) -> LpResult<()> {
        if indices.len() != lhs.len() || indices.len() != rhs.len() {
            return Err(LpError::DimensionMismatch(format!(
                "{} indices, {} lhs, {} rhs",
                indices.len(),
                lhs.len(),
                rhs.len()
            )));
        }
        for ((&i, &l), &r) in indices.iter().zip(lhs).zip(rhs) {
            self.data.set_sides(i, l, r)?;
        }
        self.modified();
        Ok(())
    }

    fn sides(&self, row: usize) -> LpResult<(f64, f64)> {
        self.data.sides(row)
    }

    fn row(&self, row: usize) -> LpResult<Vec<(usize, f64)>> {
        self.data.row(row)
    }

    fn solve_primal(&mut self) -> LpResult<()> {
        self.solve(Method::Primal)
    }

    fn solve_dual(&mut self) -> LpResult<()> {
        self.solve(Method::Dual)
    }

    fn is_stable(&self) -> bool {
        self.stable
    }

    fn is_primal_infeasible(&self) -> bool {
        self.status == SimplexStatus::PrimalInfeasible
    }

    fn is_primal_unbounded(&self) -> bool {
        self.status == SimplexStatus::Unbounded
    }

    fn is_optimal(&self) -> bool {
        self.status == SimplexStatus::Optimal
    }

    fn exists_primal_ray(&self) -> bool {
        self.status == SimplexStatus::Unbounded && self.ray.is_some()
    }

    fn primal_solution(&self) -> LpResult<Vec<f64>> {
        if self.status == SimplexStatus::NotSolved {
            return Err(LpError::NoSolution);
        }
        Ok(self.x.clone())
    }

    fn sol_quality(&self, quality: SolQuality) -> Option<f64> {
        match quality {
            SolQuality::EstimCondition | SolQuality::ExactCondition => self.condition,
        }
    }

    fn set_int_par(&mut self, param: LpParam, value: i32) {
        self.params.insert(param, value);
    }

    fn int_par(&self, param: LpParam) -> i32 {
        self.params.get(&param).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_lp_solves() {
        let mut lp = DenseSimplex::default();
        lp.solve_primal().unwrap();
        assert!(lp.is_optimal());
        assert!(lp.primal_solution().unwrap().is_empty());
    }

    #[test]
    fn test_params_default_zero() {
        let mut lp = DenseSimplex::default();
        assert_eq!(lp.int_par(LpParam::Scaling), 0);
        lp.set_int_par(LpParam::Scaling, 1);
        assert_eq!(lp.int_par(LpParam::Scaling), 1);
    }

    #[test]
    fn test_modification_clears_status() {
        let mut lp = DenseSimplex::default();
        lp.add_cols(&[LpColumn::new(1.0, 0.0, 1.0)]).unwrap();
        lp.solve_primal().unwrap();
        assert!(lp.is_optimal());
        lp.chg_obj(&[0], &[-1.0]).unwrap();
        assert_eq!(lp.status(), SimplexStatus::NotSolved);
        assert!(lp.primal_solution().is_err());
    }
}
