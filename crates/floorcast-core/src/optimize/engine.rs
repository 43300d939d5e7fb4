// Roster optimizer: solve the formulation and interpret the solver outcome.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::constraints::ConstraintSet;
use crate::draft::pick::{PlayerId, TeamId};
use crate::draft::state::DraftState;
use crate::players::pool::PlayerPool;
use crate::solver::{SolveBudget, SolveStatus, Solver, SolverError};

use super::formulation::{formulate, RosterModel};
use super::request::OptimizationRequest;
use super::result::{weekly_floor, OptimizationResult, ResultStatus};
use super::OptimizeError;

/// Default distance from 1.0 at which a selection variable counts as chosen.
pub const DEFAULT_INTEGRALITY_TOLERANCE: f64 = 1e-5;

/// Relative difference between the solver's objective and the recomputed
/// floor above which a warning is logged.
const OBJECTIVE_MISMATCH_TOLERANCE: f64 = 1e-6;

/// Stateless maximin roster optimizer.
///
/// Each call builds a fresh problem, so one optimizer can be shared across
/// threads.
#[derive(Clone)]
pub struct RosterOptimizer {
    solver: Arc<dyn Solver>,
    budget: SolveBudget,
    integrality_tolerance: f64,
}

impl std::fmt::Debug for RosterOptimizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RosterOptimizer")
            .field("solver", &self.solver.name())
            .field("budget", &self.budget)
            .field("integrality_tolerance", &self.integrality_tolerance)
            .finish()
    }
}

impl RosterOptimizer {
    pub fn new(solver: Arc<dyn Solver>) -> Self {
        RosterOptimizer {
            solver,
            budget: SolveBudget::default(),
            integrality_tolerance: DEFAULT_INTEGRALITY_TOLERANCE,
        }
    }

    pub fn with_budget(mut self, budget: SolveBudget) -> Self {
        self.budget = budget;
        self
    }

    pub fn with_integrality_tolerance(mut self, tolerance: f64) -> Self {
        self.integrality_tolerance = tolerance;
        self
    }

    pub fn budget(&self) -> &SolveBudget {
        &self.budget
    }

    /// Best completion of `team`'s roster under `constraints`, maximizing the
    /// smallest weekly projected total.
    ///
    /// Infeasibility and budget exhaustion come back as statuses on an `Ok`
    /// result. Errors are reserved for bad inputs and solver failures.
    pub fn optimize(
        &self,
        team: TeamId,
        state: &DraftState,
        pool: &PlayerPool,
        constraints: &ConstraintSet,
    ) -> Result<OptimizationResult, OptimizeError> {
        let request = OptimizationRequest::build(team, state, pool, constraints)?;

        if let Some(reason) = request.infeasibility() {
            info!("{}: infeasible before solving ({})", team, reason);
            return Ok(OptimizationResult::infeasible(team));
        }

        let model = formulate(&request);
        debug!(
            "{}: {} candidates, {} pinned, {} variables, {} constraints",
            team,
            request.candidates.len(),
            request.pinned.len(),
            model.problem.num_vars(),
            model.problem.constraints().len()
        );

        let outcome = self.solver.solve(&model.problem, &self.budget)?;
        let result = match outcome.status {
            SolveStatus::Infeasible => OptimizationResult::infeasible(team),
            SolveStatus::Unknown => OptimizationResult::no_solution(team),
            SolveStatus::Optimal | SolveStatus::Feasible => {
                let certified = outcome.status == SolveStatus::Optimal;
                match self.accept(&request, &model, &outcome.values) {
                    Ok(roster) => {
                        let weekly_totals = pool.weekly_totals(&roster);
                        let floor = weekly_floor(&weekly_totals);
                        if let (Some(objective), Some(floor)) = (outcome.objective, floor) {
                            let scale = floor.abs().max(1.0);
                            if (objective - floor).abs() > OBJECTIVE_MISMATCH_TOLERANCE * scale {
                                warn!(
                                    "{}: solver objective {} differs from recomputed floor {}",
                                    team, objective, floor
                                );
                            }
                        }
                        OptimizationResult {
                            team,
                            status: if certified {
                                ResultStatus::Optimal
                            } else {
                                ResultStatus::BudgetExceeded
                            },
                            roster,
                            weekly_totals,
                            floor,
                        }
                    }
                    Err(err) if certified => return Err(err.into()),
                    Err(err) => {
                        warn!("{}: discarding time-limited incumbent: {}", team, err);
                        OptimizationResult::no_solution(team)
                    }
                }
            }
        };

        info!(
            "{}: {} via {} ({} candidates, floor {:?})",
            team,
            result.status,
            self.solver.name(),
            request.candidates.len(),
            result.floor
        );
        Ok(result)
    }

    /// Extract the roster from solver values and re-check it against the
    /// request.
    fn accept(
        &self,
        request: &OptimizationRequest<'_>,
        model: &RosterModel,
        values: &[f64],
    ) -> Result<BTreeSet<PlayerId>, SolverError> {
        let expected = model.problem.num_vars();
        if values.len() != expected {
            return Err(SolverError::ValueCountMismatch {
                expected,
                found: values.len(),
            });
        }
        let tolerance = self.integrality_tolerance;
        if let Some((id, value)) = model.fractional_selection(values, tolerance) {
            return Err(SolverError::InvalidSolution {
                reason: format!("player {id} selected at fractional value {value}"),
            });
        }
        let roster = model.extract_roster(values, tolerance);
        check_roster(request, &roster).map_err(|reason| SolverError::InvalidSolution { reason })?;
        Ok(roster)
    }
}

/// Confirm `roster` satisfies every constraint of `request`.
fn check_roster(request: &OptimizationRequest<'_>, roster: &BTreeSet<PlayerId>) -> Result<(), String> {
    let roster_size = request.constraints.roster_size;
    if roster.len() != roster_size {
        return Err(format!("roster has {} players, expected {}", roster.len(), roster_size));
    }
    if let Some(missing) = request.pinned.iter().find(|id| !roster.contains(*id)) {
        return Err(format!("team pick {missing} was dropped"));
    }

    let mut counts = BTreeMap::new();
    for player in request.candidates.iter().filter(|p| roster.contains(&p.id)) {
        *counts.entry(player.position).or_insert(0usize) += 1;
    }
    let matched: usize = counts.values().sum();
    if matched != roster.len() {
        return Err("roster contains players outside the candidate set".to_string());
    }
    for (&position, bounds) in &request.constraints.position_bounds {
        let count = counts.get(&position).copied().unwrap_or(0);
        if !bounds.contains(count) {
            return Err(format!("{count} {position} outside bounds {bounds}"));
        }
    }
    Ok(())
}
