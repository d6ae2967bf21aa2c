//! Primal solution values.

use super::problem::VarId;

/// Values of the problem variables; unset variables read as zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Solution {
    values: Vec<f64>,
}

impl Solution {
    /// All-zero solution over `n` variables.
    pub fn new(n: usize) -> Self {
        Self {
            values: vec![0.0; n],
        }
    }

    /// Solution from dense values indexed by variable id.
    pub fn from_values(values: Vec<f64>) -> Self {
        Self { values }
    }

    /// Value of `var`.
    pub fn value(&self, var: VarId) -> f64 {
        self.values.get(var.0).copied().unwrap_or(0.0)
    }

    /// Set the value of `var`, growing the vector if needed.
    pub fn set_value(&mut self, var: VarId, value: f64) {
        if var.0 >= self.values.len() {
            self.values.resize(var.0 + 1, 0.0);
        }
        self.values[var.0] = value;
    }

    /// Number of stored values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// No values stored.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Dense values.
    pub fn values(&self) -> &[f64] {
        &self.values
    }
}
