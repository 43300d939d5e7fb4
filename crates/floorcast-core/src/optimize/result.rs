// Optimization outcome types.

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

use crate::draft::pick::{PlayerId, TeamId};

/// How an optimization request ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultStatus {
    /// The roster is optimal up to the configured MIP gap.
    Optimal,
    /// The roster is feasible, but the time limit stopped the solver before
    /// optimality was proven.
    BudgetExceeded,
    /// No roster completion satisfies the constraints.
    Infeasible,
    /// The time limit ran out before any valid roster was found.
    NoSolution,
}

impl ResultStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ResultStatus::Optimal => "optimal",
            ResultStatus::BudgetExceeded => "budget exceeded",
            ResultStatus::Infeasible => "infeasible",
            ResultStatus::NoSolution => "no solution",
        }
    }

    /// Whether results with this status carry a roster.
    pub fn has_roster(&self) -> bool {
        matches!(self, ResultStatus::Optimal | ResultStatus::BudgetExceeded)
    }
}

impl fmt::Display for ResultStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A team's best roster completion.
///
/// `roster` is empty unless `status.has_roster()`. `weekly_totals` and `floor`
/// are recomputed from the player pool, so `floor` is exactly the smallest
/// entry of `weekly_totals`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptimizationResult {
    pub team: TeamId,
    pub status: ResultStatus,
    pub roster: BTreeSet<PlayerId>,
    pub weekly_totals: Vec<f64>,
    pub floor: Option<f64>,
}

impl OptimizationResult {
    pub fn infeasible(team: TeamId) -> Self {
        Self::empty(team, ResultStatus::Infeasible)
    }

    pub fn no_solution(team: TeamId) -> Self {
        Self::empty(team, ResultStatus::NoSolution)
    }

    fn empty(team: TeamId, status: ResultStatus) -> Self {
        OptimizationResult {
            team,
            status,
            roster: BTreeSet::new(),
            weekly_totals: Vec::new(),
            floor: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.roster.is_empty()
    }
}

/// Smallest weekly total, or `None` when there are no weeks.
pub fn weekly_floor(weekly_totals: &[f64]) -> Option<f64> {
    weekly_totals.iter().copied().reduce(f64::min)
}
