//! Indicator constraint data.

use crate::model::{LinConsId, VarId};

/// Index of an indicator constraint in its handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConsId(pub usize);

/// An indicator constraint `binvar = 1 => slackvar = 0`.
///
/// The slack variable appears with coefficient -1 in the linear constraint
/// `lincons`, so fixing it to zero enforces the original inequality.
#[derive(Debug, Clone)]
pub struct IndicatorConstraint {
    /// Constraint name.
    pub name: String,

    /// Binary indicator variable (possibly negated).
    pub binvar: VarId,

    /// Slack variable of the linear part.
    pub slackvar: VarId,

    /// Linear part.
    pub lincons: LinConsId,

    /// Column in the alternative LP, if represented.
    ///
    /// Set once the alternative LP exists for every constraint that is not
    /// deleted and has a representable linear part, including those whose
    /// linear part is inactive. A disabled constraint keeps its index with
    /// the column fixed to `[0, 0]`; deletion resets it to `None`. Indices
    /// are never reused.
    pub col_index: Option<usize>,

    /// The linear part is materialized in the surrounding solver.
    pub lincons_active: bool,

    /// How many of {binvar, slackvar} are bound away from zero at the current node.
    pub n_fixed_nonzero: u8,

    /// Enabled at the current node.
    pub enabled: bool,

    /// Removed from the problem.
    pub deleted: bool,
}

impl IndicatorConstraint {
    /// Create constraint data with no alternative LP column.
    pub fn new(name: impl Into<String>, binvar: VarId, slackvar: VarId, lincons: LinConsId, lincons_active: bool) -> Self {
        Self {
            name: name.into(),
            binvar,
            slackvar,
            lincons,
            col_index: None,
            lincons_active,
            n_fixed_nonzero: 0,
            enabled: true,
            deleted: false,
        }
    }

    /// Participates in separation, enforcement and checking.
    pub fn is_usable(&self) -> bool {
        self.enabled && !self.deleted
    }
}
