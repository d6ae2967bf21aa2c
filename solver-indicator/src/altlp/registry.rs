//! Row and column maps of the alternative LP.

use std::collections::HashMap;

use crate::model::{Model, VarId};

/// Row state of a registered slack variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlackRow {
    /// Known slack variable that has not appeared in another linear part yet.
    Unused,

    /// Row assigned to the slack variable.
    Row(usize),
}

/// Maps from variables to alternative LP rows and bound columns.
///
/// Maps only ever grow while the LP lives.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    var_rows: HashMap<VarId, usize>,
    slack_rows: HashMap<VarId, SlackRow>,
    lb_cols: HashMap<VarId, usize>,
    ub_cols: HashMap<VarId, usize>,
}

impl Registry {
    /// Mark `var` as a slack variable without a row.
    pub fn register_slack(&mut self, var: VarId) {
        self.slack_rows.entry(var).or_insert(SlackRow::Unused);
    }

    /// Whether `var` is a registered slack variable.
    pub fn is_slack(&self, var: VarId) -> bool {
        self.slack_rows.contains_key(&var)
    }

    /// Row state of a slack variable.
    pub fn slack_row(&self, var: VarId) -> Option<SlackRow> {
        self.slack_rows.get(&var).copied()
    }

    pub(crate) fn set_slack_row(&mut self, var: VarId, row: usize) {
        self.slack_rows.insert(var, SlackRow::Row(row));
    }

    /// Row of an original variable.
    pub fn var_row(&self, var: VarId) -> Option<usize> {
        self.var_rows.get(&var).copied()
    }

    pub(crate) fn insert_var_row(&mut self, var: VarId, row: usize) {
        self.var_rows.insert(var, row);
    }

    /// Lower bound column of `var`.
    pub fn lb_col(&self, var: VarId) -> Option<usize> {
        self.lb_cols.get(&var).copied()
    }

    pub(crate) fn insert_lb_col(&mut self, var: VarId, col: usize) {
        self.lb_cols.insert(var, col);
    }

    /// Upper bound column of `var`.
    pub fn ub_col(&self, var: VarId) -> Option<usize> {
        self.ub_cols.get(&var).copied()
    }

    pub(crate) fn insert_ub_col(&mut self, var: VarId, col: usize) {
        self.ub_cols.insert(var, col);
    }

    /// Whether the alternative LP point `primsol` uses the bound column of a
    /// variable whose local bound differs from its global one.
    ///
    /// Stops at the first such column.
    pub fn uses_local_bounds(&self, model: &Model, primsol: &[f64]) -> bool {
        let num = model.numerics;
        let used = |col: usize| primsol.get(col).map_or(false, |&v| !num.is_feas_zero(v));
        for var in model.var_ids() {
            let v = model.var(var);
            if !num.is_eq(v.lb_local, v.lb_global) && self.lb_col(var).map_or(false, used) {
                return true;
            }
            if !num.is_eq(v.ub_local, v.ub_global) && self.ub_col(var).map_or(false, used) {
                return true;
            }
        }
        false
    }
}
