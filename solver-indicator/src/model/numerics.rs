//! Tolerance-aware comparisons.

/// Numerical tolerances of the surrounding solver.
#[derive(Debug, Clone, Copy)]
pub struct Numerics {
    /// Absolute tolerance for equality tests.
    pub epsilon: f64,

    /// Feasibility tolerance.
    pub feastol: f64,

    /// Values at or above this are infinite.
    pub infinity: f64,

    /// Minimal violation for a cut to be considered efficacious.
    pub min_efficacy: f64,
}

impl Default for Numerics {
    fn default() -> Self {
        Self {
            epsilon: 1e-9,
            feastol: 1e-6,
            infinity: 1e20,
            min_efficacy: 1e-4,
        }
    }
}

impl Numerics {
    fn rel_diff(a: f64, b: f64) -> f64 {
        let scale = a.abs().max(b.abs()).max(1.0);
        (a - b) / scale
    }

    /// `v` is infinite.
    pub fn is_infinity(&self, v: f64) -> bool {
        v >= self.infinity
    }

    /// `|v| <= epsilon`.
    pub fn is_zero(&self, v: f64) -> bool {
        v.abs() <= self.epsilon
    }

    /// `a == b` up to epsilon (relative).
    pub fn is_eq(&self, a: f64, b: f64) -> bool {
        if self.is_infinity(a.abs()) || self.is_infinity(b.abs()) {
            return (self.is_infinity(a) && self.is_infinity(b))
                || (self.is_infinity(-a) && self.is_infinity(-b));
        }
        Self::rel_diff(a, b).abs() <= self.epsilon
    }

    /// `|v| <= feastol`.
    pub fn is_feas_zero(&self, v: f64) -> bool {
        v.abs() <= self.feastol
    }

    /// `v > feastol`.
    pub fn is_feas_positive(&self, v: f64) -> bool {
        v > self.feastol
    }

    /// `v < -feastol`.
    pub fn is_feas_negative(&self, v: f64) -> bool {
        v < -self.feastol
    }

    /// `a == b` up to feastol (relative).
    pub fn is_feas_eq(&self, a: f64, b: f64) -> bool {
        Self::rel_diff(a, b).abs() <= self.feastol
    }

    /// `a < b` beyond feastol (relative).
    pub fn is_feas_lt(&self, a: f64, b: f64) -> bool {
        Self::rel_diff(a, b) < -self.feastol
    }

    /// `v` is within epsilon of an integer.
    pub fn is_integral(&self, v: f64) -> bool {
        (v - v.round()).abs() <= self.epsilon
    }

    /// `v` is within feastol of an integer.
    pub fn is_feas_integral(&self, v: f64) -> bool {
        (v - v.round()).abs() <= self.feastol
    }

    /// A cut with violation `v` is worth adding.
    pub fn is_efficacious(&self, v: f64) -> bool {
        v > self.min_efficacy
    }
}
