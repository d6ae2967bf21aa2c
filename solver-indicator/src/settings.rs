//! Configuration settings for the indicator constraint handler.

use crate::error::{IndicatorError, IndicatorResult};

/// Indicator constraint handler settings.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IndicatorSettings {
    // === Enforcement ===
    /// Branch on violated indicator constraints during enforcement.
    pub branch_indicators: bool,

    /// Emit clauses instead of cut rows when separating IIS cuts.
    pub gen_logicor: bool,

    /// Use the alternative LP for separation.
    pub sepa_alternative_lp: bool,

    /// Generate cuts from the alternative LP during enforcement.
    pub enforce_cuts: bool,

    // === Coupling ===
    /// Add coupling rows `s + M y <= M` to the initial LP.
    pub add_coupling: bool,

    /// Largest big-M coefficient allowed in coupling rows.
    pub max_coupling_value: f64,

    /// Add coupling as varbound constraints during presolving.
    pub add_coupling_cons: bool,

    /// Remove indicator constraints once coupling varbounds exist.
    pub remove_indicators: bool,

    // === Alternative LP ===
    /// Sync the alternative LP with current variable bounds.
    pub update_bounds: bool,

    /// Do not materialize linear parts over continuous variables only.
    pub no_lincons_cont: bool,

    /// Maximal estimated condition number of an alternative LP basis (0 disables).
    pub max_condition_alt_lp: f64,

    /// Emit bilinear constraints `y * s = 0` instead of indicator constraints.
    pub generate_bilinear: bool,

    /// Mark emitted cuts and clauses as removable.
    pub removable: bool,

    // === Rounding separation ===
    /// Smallest rounding threshold.
    pub rounding_min_thres: f64,

    /// Largest rounding threshold.
    pub rounding_max_thres: f64,

    /// Number of successful rounding rounds.
    pub rounding_rounds: usize,

    /// Decrement between thresholds.
    pub rounding_offset: f64,

    // === Check ===
    /// Repair checked solutions and pass them to the try-solution outbox.
    pub try_solutions: bool,
}

impl Default for IndicatorSettings {
    fn default() -> Self {
        Self {
            branch_indicators: false,
            gen_logicor: false,
            sepa_alternative_lp: false,
            enforce_cuts: false,

            add_coupling: true,
            max_coupling_value: 1e4,
            add_coupling_cons: false,
            remove_indicators: false,

            update_bounds: false,
            no_lincons_cont: false,
            max_condition_alt_lp: 0.0,
            generate_bilinear: false,
            removable: true,

            rounding_min_thres: 0.1,
            rounding_max_thres: 0.6,
            rounding_rounds: 1,
            rounding_offset: 0.1,

            try_solutions: true,
        }
    }
}

impl IndicatorSettings {
    /// Settings with alternative-LP separation enabled.
    pub fn alternative_lp() -> Self {
        Self {
            sepa_alternative_lp: true,
            ..Self::default()
        }
    }

    /// Enable or disable alternative-LP separation.
    pub fn with_sepa_alternative_lp(mut self, on: bool) -> Self {
        self.sepa_alternative_lp = on;
        self
    }

    /// Enable or disable branching on indicator constraints.
    pub fn with_branch_indicators(mut self, on: bool) -> Self {
        self.branch_indicators = on;
        self
    }

    /// Emit clauses instead of rows.
    pub fn with_gen_logicor(mut self, on: bool) -> Self {
        self.gen_logicor = on;
        self
    }

    /// Enable or disable alternative-LP cuts during enforcement.
    pub fn with_enforce_cuts(mut self, on: bool) -> Self {
        self.enforce_cuts = on;
        self
    }

    /// Sync the alternative LP with current bounds.
    pub fn with_update_bounds(mut self, on: bool) -> Self {
        self.update_bounds = on;
        self
    }

    /// Set the condition number limit for the alternative LP (0 disables).
    pub fn with_max_condition(mut self, max_condition: f64) -> Self {
        self.max_condition_alt_lp = max_condition;
        self
    }

    /// Set the threshold sweep for rounding separation.
    pub fn with_rounding(mut self, min_thres: f64, max_thres: f64, offset: f64, rounds: usize) -> Self {
        self.rounding_min_thres = min_thres;
        self.rounding_max_thres = max_thres;
        self.rounding_offset = offset;
        self.rounding_rounds = rounds;
        self
    }

    /// Configure coupling rows and varbounds.
    pub fn with_coupling(mut self, add_coupling: bool, add_coupling_cons: bool, max_value: f64) -> Self {
        self.add_coupling = add_coupling;
        self.add_coupling_cons = add_coupling_cons;
        self.max_coupling_value = max_value;
        self
    }

    /// Check for incompatible option combinations.
    pub fn validate(&self) -> IndicatorResult<()> {
        if self.no_lincons_cont && !self.sepa_alternative_lp {
            return Err(IndicatorError::InvalidParameters(
                "no_lincons_cont requires sepa_alternative_lp".into(),
            ));
        }
        if self.no_lincons_cont && self.generate_bilinear {
            return Err(IndicatorError::InvalidParameters(
                "no_lincons_cont and generate_bilinear are mutually exclusive".into(),
            ));
        }
        if self.rounding_offset <= 0.0 {
            return Err(IndicatorError::InvalidParameters(format!(
                "rounding_offset must be positive, got {}",
                self.rounding_offset
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_valid() {
        let s = IndicatorSettings::default();
        assert!(s.validate().is_ok());
        assert!(!s.sepa_alternative_lp);
        assert!((s.rounding_max_thres - 0.6).abs() < 1e-12);
        assert!((s.max_coupling_value - 1e4).abs() < 1e-12);
    }

    #[test]
    fn test_incompatible_options() {
        let mut s = IndicatorSettings::default();
        s.no_lincons_cont = true;
        assert!(matches!(s.validate(), Err(IndicatorError::InvalidParameters(_))));

        s.sepa_alternative_lp = true;
        assert!(s.validate().is_ok());

        s.generate_bilinear = true;
        assert!(s.validate().is_err());
    }

    #[test]
    fn test_builders() {
        let s = IndicatorSettings::default()
            .with_sepa_alternative_lp(true)
            .with_enforce_cuts(true)
            .with_update_bounds(false)
            .with_coupling(true, true, 100.0);
        assert!(s.sepa_alternative_lp);
        assert!(s.enforce_cuts);
        assert!(!s.update_bounds);
        assert!(s.add_coupling_cons);
        assert!((s.max_coupling_value - 100.0).abs() < 1e-12);

        let s = s.with_sepa_alternative_lp(false);
        assert!(!s.sepa_alternative_lp);
    }
}
