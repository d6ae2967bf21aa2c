//! Extending a fixed set of indicator columns to an IIS cover.

use solver_lp::LpParam;

use crate::altlp::{check_alt_lp_infeasible, FixGuard, Registry, SeparationStats};
use crate::cons::IndicatorConstraint;
use crate::cuts::{Clause, CutSource, LinearCut};
use crate::error::IndicatorResult;
use crate::model::{Model, Solution};

/// Options for cut generation.
#[derive(Debug, Clone, Copy)]
pub struct CoverParams {
    /// Condition limit passed to the infeasibility check (0 disables).
    pub max_condition: f64,

    /// Mark generated cuts as removable.
    pub removable: bool,

    /// Emit clauses instead of rows.
    pub gen_logicor: bool,
}

/// Result of one cover extension.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CoverOutcome {
    /// Number of cuts or clauses generated.
    pub n_gen: usize,

    /// An LP solve gave no conclusion.
    pub error: bool,
}

/// A set of indicator constraints, indexed by position in the handler.
#[derive(Debug, Clone, Default)]
pub struct CoverSet {
    members: Vec<bool>,
    size: usize,
    value: f64,
}

impl CoverSet {
    /// Empty set over `n` constraints.
    pub fn new(n: usize) -> Self {
        Self {
            members: vec![false; n],
            size: 0,
            value: 0.0,
        }
    }

    /// Add constraint `j` with objective `obj`; false if already present.
    pub fn insert(&mut self, j: usize, obj: f64) -> bool {
        if self.members[j] {
            return false;
        }
        self.members[j] = true;
        self.size += 1;
        self.value += obj;
        true
    }

    /// Whether constraint `j` is in the set.
    pub fn contains(&self, j: usize) -> bool {
        self.members.get(j).copied().unwrap_or(false)
    }

    /// Number of members.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Sum of the binary objective coefficients of the members.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Alternative LP columns of the members that have one.
    pub fn columns(&self, conss: &[IndicatorConstraint]) -> Vec<usize> {
        conss
            .iter()
            .enumerate()
            .filter(|&(j, _)| self.contains(j))
            .filter_map(|(_, c)| c.col_index)
            .collect()
    }
}

/// Grow `cover` until the alternative LP becomes infeasible.
///
/// Each round solves the LP (from scratch the first time, warm afterwards),
/// reads the support of the solution among indicator columns and adds the
/// first supported constraint to the cover. If `sol` violates
/// `sum_{support} y <= |support| - 1`, a cut is emitted through the model's
/// outbox; globally valid rows also enter the cut pool.
#[allow(clippy::too_many_arguments)]
pub fn extend_to_cover(
    lp: &mut FixGuard<'_>,
    registry: &Registry,
    stats: &mut SeparationStats,
    model: &mut Model,
    conss: &[IndicatorConstraint],
    sol: Option<&Solution>,
    cover: &mut CoverSet,
    params: CoverParams,
) -> IndicatorResult<CoverOutcome> {
    let num = model.numerics;
    let n_usable = conss.iter().filter(|c| c.is_usable()).count();
    let mut outcome = CoverOutcome::default();
    let mut step = 0;

    loop {
        let verdict = if step == 0 {
            lp.set_int_par(LpParam::FromScratch, 1);
            let v = check_alt_lp_infeasible(&mut **lp, params.max_condition, true, stats);
            lp.set_int_par(LpParam::FromScratch, 0);
            v
        } else {
            check_alt_lp_infeasible(&mut **lp, params.max_condition, false, stats)
        };
        if verdict.error {
            outcome.error = true;
            break;
        }
        if verdict.infeasible {
            break;
        }

        let primsol = lp.primal_solution()?;
        let mut support = Vec::new();
        let mut sum = 0.0;
        let mut candidate = None;
        for (j, cons) in conss.iter().enumerate() {
            if !cons.is_usable() {
                continue;
            }
            let col = match cons.col_index {
                Some(col) => col,
                None => continue,
            };
            if num.is_feas_zero(primsol.get(col).copied().unwrap_or(0.0)) {
                continue;
            }
            support.push(j);
            sum += model.sol_val(sol, cons.binvar);
            if candidate.is_none() {
                candidate = Some((j, col));
            }
        }

        // the solution may be zero within tolerances
        let (cand, cand_col) = match candidate {
            Some(c) => c,
            None => break,
        };
        cover.insert(cand, model.var(conss[cand].binvar).obj);
        lp.fix_one(cand_col)?;
        log::debug!(
            "cover size {}: added {} (IIS size {})",
            cover.size(),
            conss[cand].name,
            support.len()
        );

        let size_iis = support.len();
        if num.is_efficacious(sum - (size_iis as f64 - 1.0)) {
            #[cfg(all(debug_assertions, feature = "iis-check"))]
            debug_assert!(
                super::debug::iis_is_infeasible(model, conss, &primsol).unwrap_or(false),
                "detected IIS is feasible in the original problem"
            );

            let local = registry.uses_local_bounds(model, &primsol);
            if params.gen_logicor {
                let literals = support.iter().map(|&j| model.negated(conss[j].binvar)).collect();
                model.outbox.clauses.push(Clause {
                    name: "iis".into(),
                    literals,
                    local,
                    removable: params.removable,
                });
            } else {
                let coefs = support.iter().map(|&j| (conss[j].binvar, 1.0)).collect();
                let cut = LinearCut::new(coefs, (size_iis - 1) as f64, CutSource::Iis)
                    .with_name("iis")
                    .with_flags(local, params.removable);
                if !local {
                    model.cut_pool.add(cut.clone());
                }
                model.outbox.cuts.push(cut);
            }
            if local {
                stats.local_cuts += 1;
            }
            stats.cuts += 1;
            outcome.n_gen += 1;
        }

        step += 1;
        if step >= n_usable {
            break;
        }
    }
    Ok(outcome)
}
