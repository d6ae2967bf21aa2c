//! Bounded primal simplex with a composite phase 1.

use super::work::{SimplexStatus, VarState, Work};

/// Candidate pricing rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pricing {
    Dantzig,
    Bland,
}

impl Work<'_> {
    /// Bound tolerance for variable `k` at value scale of its bound.
    pub(crate) fn feas_tol(&self, bound: f64) -> f64 {
        self.settings.tol_primal * (1.0 + bound.abs())
    }

    /// `-1` below lower bound, `+1` above upper bound, `0` otherwise.
    pub(crate) fn infeasibility(&self, k: usize) -> i8 {
        let v = self.x[k];
        if v < self.lb[k] - self.feas_tol(self.lb[k]) {
            -1
        } else if v > self.ub[k] + self.feas_tol(self.ub[k]) {
            1
        } else {
            0
        }
    }

    /// Reduced costs of all variables for basic costs `cb` and nonbasic costs `cn`.
    pub(crate) fn reduced_costs(&self, cb: &[f64], phase1: bool) -> Vec<f64> {
        let y = self.factor.btran(cb);
        (0..self.n + self.m)
            .map(|j| {
                if self.state[j] == VarState::Basic {
                    0.0
                } else {
                    let c = if phase1 { 0.0 } else { self.cost[j] };
                    c - self.dot(&y, j)
                }
            })
            .collect()
    }

    /// Run the primal simplex from the current basis.
    pub(crate) fn primal(&mut self) -> SimplexStatus {
        let tol_dual = self.settings.tol_dual;
        let tol_piv = self.settings.tol_pivot;

        loop {
            if self.iterations >= self.settings.max_iter {
                return SimplexStatus::IterationLimit;
            }
            if self.maybe_refactor().is_err() {
                return SimplexStatus::NumericalTrouble;
            }

            let infeas: Vec<i8> = self.head.iter().map(|&k| self.infeasibility(k)).collect();
            let phase1 = infeas.iter().any(|&s| s != 0);
            let cb: Vec<f64> = if phase1 {
                infeas.iter().map(|&s| f64::from(s)).collect()
            } else {
                self.head.iter().map(|&k| self.cost[k]).collect()
            };
            let d = self.reduced_costs(&cb, phase1);

            let pricing = if self.degenerate_run > self.settings.bland_after {
                Pricing::Bland
            } else {
                Pricing::Dantzig
            };
            let Some((q, dir)) = self.price(&d, tol_dual, pricing) else {
                return if phase1 {
                    SimplexStatus::PrimalInfeasible
                } else {
                    SimplexStatus::Optimal
                };
            };

            let alpha = self.factor.ftran(&self.cols[q]);
            // rate of change of each basic per unit step of the entering variable
            let g: Vec<f64> = alpha.iter().map(|a| -dir * a).collect();

            let flip = self.ub[q] - self.lb[q];
            let mut best_t = f64::INFINITY;
            let mut best: Option<(usize, VarState)> = None;
            let mut best_g = 0.0;
            for (p, &gp) in g.iter().enumerate() {
                if gp.abs() <= tol_piv {
                    continue;
                }
                let k = self.head[p];
                let v = self.x[k];
                let (target, leave) = if gp > 0.0 {
                    match infeas[p] {
                        1 => continue,
                        -1 => (self.lb[k], VarState::AtLower),
                        _ if self.ub[k].is_finite() => (self.ub[k], VarState::AtUpper),
                        _ => continue,
                    }
                } else {
                    match infeas[p] {
                        -1 => continue,
                        1 => (self.ub[k], VarState::AtUpper),
                        _ if self.lb[k].is_finite() => (self.lb[k], VarState::AtLower),
                        _ => continue,
                    }
                };
                let t = ((target - v) / gp).max(0.0);
                let better = match pricing {
                    Pricing::Bland => {
                        t < best_t - 1e-12
                            || ((t - best_t).abs() <= 1e-12
                                && best.map_or(true, |(bp, _)| self.head[p] < self.head[bp]))
                    }
                    Pricing::Dantzig => {
                        t < best_t - 1e-12 || ((t - best_t).abs() <= 1e-12 && gp.abs() > best_g)
                    }
                };
                if better {
                    best_t = t;
                    best = Some((p, leave));
                    best_g = gp.abs();
                }
            }

            self.iterations += 1;

            if flip.is_finite() && flip <= best_t {
                // bound flip, basis unchanged
                let step = flip;
                for (p, &gp) in g.iter().enumerate() {
                    let k = self.head[p];
                    self.x[k] += step * gp;
                }
                let (state, value) = if dir > 0.0 {
                    (VarState::AtUpper, self.ub[q])
                } else {
                    (VarState::AtLower, self.lb[q])
                };
                self.state[q] = state;
                self.x[q] = value;
                self.degenerate_run = 0;
                continue;
            }

            let Some((p, leave)) = best else {
                if phase1 {
                    return SimplexStatus::NumericalTrouble;
                }
                let mut ray = vec![0.0; self.n];
                if q < self.n {
                    ray[q] = dir;
                }
                for (p, &gp) in g.iter().enumerate() {
                    let k = self.head[p];
                    if k < self.n {
                        ray[k] = gp;
                    }
                }
                self.ray = Some(ray);
                return SimplexStatus::Unbounded;
            };

            if best_t <= self.settings.tol_primal {
                self.degenerate_run += 1;
            } else {
                self.degenerate_run = 0;
            }

            for (i, &gi) in g.iter().enumerate() {
                let k = self.head[i];
                self.x[k] += best_t * gi;
            }
            self.x[q] += dir * best_t;
            self.pivot(p, q, &alpha, leave);
        }
    }

    /// Pick an entering variable and its direction (`+1` increase, `-1` decrease).
    fn price(&self, d: &[f64], tol: f64, pricing: Pricing) -> Option<(usize, f64)> {
        let mut best: Option<(usize, f64)> = None;
        let mut best_val = 0.0;
        for j in 0..self.n + self.m {
            if self.state[j] == VarState::Basic {
                continue;
            }
            let dir = if d[j] < -tol && self.can_increase(j) {
                1.0
            } else if d[j] > tol && self.can_decrease(j) {
                -1.0
            } else {
                continue;
            };
            match pricing {
                Pricing::Bland => return Some((j, dir)),
                Pricing::Dantzig => {
                    if d[j].abs() > best_val {
                        best_val = d[j].abs();
                        best = Some((j, dir));
                    }
                }
            }
        }
        best
    }
}
