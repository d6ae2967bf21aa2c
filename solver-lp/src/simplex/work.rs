//! Working state of a single simplex solve.

use nalgebra::DMatrix;

use super::basis::BasisFactor;
use crate::data::LpData;
use crate::settings::SimplexSettings;

/// Position of a nonbasic variable, or basic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum VarState {
    Basic,
    AtLower,
    AtUpper,
    /// Free nonbasic variable resting at zero.
    AtZero,
}

/// Reference to a basic variable that survives column/row additions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BasicRef {
    Col(usize),
    Row(usize),
}

/// Basis kept between solves for warm starting.
#[derive(Debug, Clone)]
pub(crate) struct WarmBasis {
    pub head: Vec<BasicRef>,
    pub col_state: Vec<VarState>,
    pub row_state: Vec<VarState>,
}

/// Outcome of a simplex run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimplexStatus {
    /// No solve has been run since the last modification.
    NotSolved,
    /// Optimal basis found.
    Optimal,
    /// Primal infeasibility proven.
    PrimalInfeasible,
    /// Primal unboundedness proven; a ray is available.
    Unbounded,
    /// Iteration limit reached.
    IterationLimit,
    /// Singular basis or loss of accuracy.
    NumericalTrouble,
}

/// Signals a singular basis during refactorization.
#[derive(Debug)]
pub(crate) struct Singular;

/// Simplex working data over `n` structural and `m` logical variables.
///
/// The logical of row `i` is variable `n + i` with column `-e_i`, so the
/// constraints read `A x - r = 0` with `lhs <= r <= rhs`.
pub(crate) struct Work<'a> {
    pub n: usize,
    pub m: usize,
    pub cols: Vec<Vec<(usize, f64)>>,
    pub lb: Vec<f64>,
    pub ub: Vec<f64>,
    pub cost: Vec<f64>,
    pub head: Vec<usize>,
    pub state: Vec<VarState>,
    pub x: Vec<f64>,
    pub factor: BasisFactor,
    pub settings: &'a SimplexSettings,
    pub iterations: usize,
    pub pivots_since_refactor: usize,
    pub degenerate_run: usize,
    pub ray: Option<Vec<f64>>,
}

impl<'a> Work<'a> {
    /// Set up from LP data and an optional warm basis.
    pub fn new(data: &LpData, settings: &'a SimplexSettings, warm: Option<&WarmBasis>) -> Self {
        let n = data.ncols();
        let m = data.nrows();
        let a = data.to_csc();

        let mut cols: Vec<Vec<(usize, f64)>> = a
            .outer_iterator()
            .map(|c| c.iter().map(|(i, &v)| (i, v)).collect())
            .collect();
        cols.extend((0..m).map(|i| vec![(i, -1.0)]));

        let (clb, cub) = data.col_bounds();
        let (lhs, rhs) = data.row_sides();
        let mut lb = clb.to_vec();
        lb.extend_from_slice(lhs);
        let mut ub = cub.to_vec();
        ub.extend_from_slice(rhs);

        let mut cost = data.obj_vec().to_vec();
        cost.extend(std::iter::repeat(0.0).take(m));

        let mut work = Self {
            n,
            m,
            cols,
            lb,
            ub,
            cost,
            head: Vec::new(),
            state: vec![VarState::AtLower; n + m],
            x: vec![0.0; n + m],
            factor: BasisFactor::scaled_identity(m, 1.0),
            settings,
            iterations: 0,
            pivots_since_refactor: 0,
            degenerate_run: 0,
            ray: None,
        };

        let warmed = warm.map(|w| work.load_warm(w)).unwrap_or(false);
        if !warmed {
            work.slack_basis();
        }
        work
    }

    /// All-logical basis with structurals at a bound.
    pub fn slack_basis(&mut self) {
        self.head = (0..self.m).map(|i| self.n + i).collect();
        for j in 0..self.n {
            self.state[j] = VarState::AtLower;
        }
        for i in 0..self.m {
            self.state[self.n + i] = VarState::Basic;
        }
        self.place_nonbasics();
        // B = -I is its own inverse
        self.factor = BasisFactor::scaled_identity(self.m, -1.0);
        self.pivots_since_refactor = 0;
        self.compute_basics();
    }

    fn load_warm(&mut self, warm: &WarmBasis) -> bool {
        let (n, m) = (self.n, self.m);
        if warm.col_state.len() > n || warm.row_state.len() > m {
            return false;
        }
        let mut head: Vec<usize> = warm
            .head
            .iter()
            .map(|r| match *r {
                BasicRef::Col(j) => j,
                BasicRef::Row(i) => n + i,
            })
            .collect();
        head.extend((warm.row_state.len()..m).map(|i| n + i));
        if head.len() != m {
            return false;
        }

        for (j, s) in warm.col_state.iter().enumerate() {
            self.state[j] = *s;
        }
        for j in warm.col_state.len()..n {
            self.state[j] = VarState::AtLower;
        }
        for (i, s) in warm.row_state.iter().enumerate() {
            self.state[n + i] = *s;
        }
        for i in warm.row_state.len()..m {
            self.state[n + i] = VarState::Basic;
        }
        self.head = head;
        self.place_nonbasics();
        if self.refactor().is_err() {
            log::debug!("warm basis singular, falling back to slack basis");
            return false;
        }
        true
    }

    /// Snapshot the current basis for the next solve.
    pub fn warm_basis(&self) -> WarmBasis {
        let head = self
            .head
            .iter()
            .map(|&k| {
                if k < self.n {
                    BasicRef::Col(k)
                } else {
                    BasicRef::Row(k - self.n)
                }
            })
            .collect();
        WarmBasis {
            head,
            col_state: self.state[..self.n].to_vec(),
            row_state: self.state[self.n..].to_vec(),
        }
    }

    /// Move every nonbasic variable onto a finite bound (or zero if free).
    fn place_nonbasics(&mut self) {
        for j in 0..self.n + self.m {
            let (l, u) = (self.lb[j], self.ub[j]);
            let state = self.state[j];
            if state == VarState::Basic {
                continue;
            }
            let prefer_upper = state == VarState::AtUpper;
            let (s, v) = if prefer_upper && u.is_finite() {
                (VarState::AtUpper, u)
            } else if l.is_finite() {
                (VarState::AtLower, l)
            } else if u.is_finite() {
                (VarState::AtUpper, u)
            } else {
                (VarState::AtZero, 0.0)
            };
            self.state[j] = s;
            self.x[j] = v;
        }
    }

    /// Dense basis matrix.
    pub fn basis_matrix(&self) -> DMatrix<f64> {
        let mut b = DMatrix::zeros(self.m, self.m);
        for (p, &k) in self.head.iter().enumerate() {
            for &(i, v) in &self.cols[k] {
                b[(i, p)] = v;
            }
        }
        b
    }

    /// Rebuild the basis inverse and recompute basic values.
    pub fn refactor(&mut self) -> Result<(), Singular> {
        let factor = BasisFactor::factor(self.basis_matrix()).ok_or(Singular)?;
        self.factor = factor;
        self.pivots_since_refactor = 0;
        self.compute_basics();
        Ok(())
    }

    /// `x_B = -B^{-1} N x_N`.
    pub fn compute_basics(&mut self) {
        let mut rhs: Vec<(usize, f64)> = Vec::new();
        let mut dense = vec![0.0; self.m];
        for j in 0..self.n + self.m {
            if self.state[j] == VarState::Basic || self.x[j] == 0.0 {
                continue;
            }
            for &(i, v) in &self.cols[j] {
                dense[i] -= v * self.x[j];
            }
        }
        for (i, v) in dense.into_iter().enumerate() {
            if v != 0.0 {
                rhs.push((i, v));
            }
        }
        let xb = self.factor.ftran(&rhs);
        for (p, &k) in self.head.iter().enumerate() {
            self.x[k] = xb[p];
        }
    }

    /// Largest absolute row residual of `A x - r`.
    pub fn residual(&self) -> f64 {
        let mut r = vec![0.0; self.m];
        for j in 0..self.n + self.m {
            let xj = self.x[j];
            if xj == 0.0 {
                continue;
            }
            for &(i, v) in &self.cols[j] {
                r[i] += v * xj;
            }
        }
        r.into_iter().map(f64::abs).fold(0.0, f64::max)
    }

    /// Column dot product `y . M_j`.
    pub fn dot(&self, y: &[f64], j: usize) -> f64 {
        self.cols[j].iter().map(|&(i, v)| y[i] * v).sum()
    }

    pub fn can_increase(&self, j: usize) -> bool {
        matches!(self.state[j], VarState::AtLower | VarState::AtZero) && self.ub[j] > self.x[j]
    }

    pub fn can_decrease(&self, j: usize) -> bool {
        matches!(self.state[j], VarState::AtUpper | VarState::AtZero) && self.lb[j] < self.x[j]
    }

    /// Refactorize if due; flags numerical trouble on a singular basis.
    pub fn maybe_refactor(&mut self) -> Result<(), Singular> {
        if self.pivots_since_refactor >= self.settings.refactor_freq {
            self.refactor()?;
        }
        Ok(())
    }

    /// Replace basic position `p` by `entering`, the leaving variable going to `leave_state`.
    pub fn pivot(&mut self, p: usize, entering: usize, alpha: &[f64], leave_state: VarState) {
        let leaving = self.head[p];
        self.x[leaving] = match leave_state {
            VarState::AtUpper => self.ub[leaving],
            _ => self.lb[leaving],
        };
        self.state[leaving] = leave_state;
        self.state[entering] = VarState::Basic;
        self.head[p] = entering;
        self.factor.update(p, alpha);
        self.pivots_since_refactor += 1;
    }
}
