//! Dual simplex for a dual feasible starting basis.

use super::work::{SimplexStatus, VarState, Work};

impl Work<'_> {
    /// Whether the current basis is dual feasible for the true costs.
    pub(crate) fn is_dual_feasible(&self) -> bool {
        let cb: Vec<f64> = self.head.iter().map(|&k| self.cost[k]).collect();
        let d = self.reduced_costs(&cb, false);
        let tol = self.settings.tol_dual;
        (0..self.n + self.m).all(|j| {
            if self.lb[j] == self.ub[j] {
                return true;
            }
            match self.state[j] {
                VarState::Basic => true,
                VarState::AtLower => d[j] >= -tol,
                VarState::AtUpper => d[j] <= tol,
                VarState::AtZero => d[j].abs() <= tol,
            }
        })
    }

    /// Run the dual simplex; the basis must be dual feasible.
    pub(crate) fn dual(&mut self) -> SimplexStatus {
        let tol_piv = self.settings.tol_pivot;

        loop {
            if self.iterations >= self.settings.max_iter {
                return SimplexStatus::IterationLimit;
            }
            if self.maybe_refactor().is_err() {
                return SimplexStatus::NumericalTrouble;
            }

            // leaving row: largest bound violation
            let mut leave: Option<(usize, f64, f64, VarState)> = None;
            let mut worst = 0.0;
            for (p, &k) in self.head.iter().enumerate() {
                let (viol, s, target, state) = match self.infeasibility(k) {
                    -1 => (self.lb[k] - self.x[k], 1.0, self.lb[k], VarState::AtLower),
                    1 => (self.x[k] - self.ub[k], -1.0, self.ub[k], VarState::AtUpper),
                    _ => continue,
                };
                if viol > worst {
                    worst = viol;
                    leave = Some((p, s, target, state));
                }
            }
            let Some((p, s, target, leave_state)) = leave else {
                return SimplexStatus::Optimal;
            };

            let cb: Vec<f64> = self.head.iter().map(|&k| self.cost[k]).collect();
            let d = self.reduced_costs(&cb, false);
            let rho = self.factor.row(p);

            let mut best: Option<usize> = None;
            let mut best_ratio = f64::INFINITY;
            let mut best_alpha = 0.0;
            for j in 0..self.n + self.m {
                if self.state[j] == VarState::Basic {
                    continue;
                }
                let a = self.dot(&rho, j);
                let eligible = (self.can_increase(j) && s * a < -tol_piv)
                    || (self.can_decrease(j) && s * a > tol_piv);
                if !eligible {
                    continue;
                }
                let ratio = d[j].abs() / a.abs();
                if ratio < best_ratio - 1e-12
                    || ((ratio - best_ratio).abs() <= 1e-12 && a.abs() > best_alpha)
                {
                    best_ratio = ratio;
                    best_alpha = a.abs();
                    best = Some(j);
                }
            }
            let Some(q) = best else {
                return SimplexStatus::PrimalInfeasible;
            };

            let alpha = self.factor.ftran(&self.cols[q]);
            if alpha[p].abs() <= tol_piv {
                return SimplexStatus::NumericalTrouble;
            }
            let k = self.head[p];
            let delta = (self.x[k] - target) / alpha[p];

            for (i, &ai) in alpha.iter().enumerate() {
                let b = self.head[i];
                self.x[b] -= ai * delta;
            }
            self.x[q] += delta;
            self.iterations += 1;
            self.pivot(p, q, &alpha, leave_state);
        }
    }
}
