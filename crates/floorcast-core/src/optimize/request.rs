// Optimization request: validated inputs and the candidate set for one team.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::constraints::ConstraintSet;
use crate::draft::pick::{PlayerId, Position, TeamId};
use crate::draft::state::DraftState;
use crate::players::pool::{Player, PlayerPool};

use super::OptimizeError;

/// Why a request cannot have a feasible roster, found without solving.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Infeasibility {
    NoCandidates,
    TooFewCandidates { needed: usize, available: usize },
    PositionShortfall { position: Position, min: usize, available: usize },
    PinnedExceedRoster { pinned: usize, roster_size: usize },
    PinnedExceedPosition { position: Position, pinned: usize, max: usize },
}

impl fmt::Display for Infeasibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Infeasibility::NoCandidates => write!(f, "no candidate players"),
            Infeasibility::TooFewCandidates { needed, available } => {
                write!(f, "roster needs {needed} players but only {available} are available")
            }
            Infeasibility::PositionShortfall { position, min, available } => {
                write!(f, "{position} needs at least {min} but only {available} are available")
            }
            Infeasibility::PinnedExceedRoster { pinned, roster_size } => {
                write!(f, "team already has {pinned} players, roster size is {roster_size}")
            }
            Infeasibility::PinnedExceedPosition { position, pinned, max } => {
                write!(f, "team already has {pinned} {position}, max is {max}")
            }
        }
    }
}

/// Everything the formulation needs for one team, borrowed from the caller.
#[derive(Debug, Clone)]
pub struct OptimizationRequest<'a> {
    pub team: TeamId,
    /// Unclaimed players plus the team's own picks, in ascending id order.
    pub candidates: Vec<&'a Player>,
    /// The team's existing picks; every completion must include them.
    pub pinned: BTreeSet<PlayerId>,
    pub constraints: &'a ConstraintSet,
    pub num_periods: usize,
}

impl<'a> OptimizationRequest<'a> {
    /// Check the inputs and collect the candidate set.
    ///
    /// Fails on invalid constraints, constraints that leave a pool position
    /// unbounded, an unknown team, or a claimed player missing from the pool.
    pub fn build(
        team: TeamId,
        state: &DraftState,
        pool: &'a PlayerPool,
        constraints: &'a ConstraintSet,
    ) -> Result<Self, OptimizeError> {
        constraints.validate()?;
        constraints.covers(&pool.positions())?;

        let pinned = state
            .team_picks(team)
            .ok_or(OptimizeError::UnknownTeam {
                team,
                num_teams: state.num_teams(),
            })?
            .clone();

        if let Some(&missing) = state.claimed().iter().find(|id| !pool.contains(**id)) {
            return Err(OptimizeError::UnknownPlayer(missing));
        }

        let candidates = pool
            .iter()
            .filter(|p| !state.is_claimed(p.id) || pinned.contains(&p.id))
            .collect();

        Ok(OptimizationRequest {
            team,
            candidates,
            pinned,
            constraints,
            num_periods: pool.num_periods(),
        })
    }

    /// Candidate count per position.
    pub fn candidates_by_position(&self) -> BTreeMap<Position, usize> {
        let mut counts = BTreeMap::new();
        for player in &self.candidates {
            *counts.entry(player.position).or_insert(0) += 1;
        }
        counts
    }

    fn pinned_by_position(&self) -> BTreeMap<Position, usize> {
        let mut counts = BTreeMap::new();
        for player in self.candidates.iter().filter(|p| self.pinned.contains(&p.id)) {
            *counts.entry(player.position).or_insert(0) += 1;
        }
        counts
    }

    /// A reason this request is infeasible that can be seen without solving.
    ///
    /// `None` does not prove feasibility; the solver has the final word.
    pub fn infeasibility(&self) -> Option<Infeasibility> {
        let roster_size = self.constraints.roster_size;
        if self.candidates.is_empty() {
            return Some(Infeasibility::NoCandidates);
        }
        if roster_size > self.candidates.len() {
            return Some(Infeasibility::TooFewCandidates {
                needed: roster_size,
                available: self.candidates.len(),
            });
        }
        if self.pinned.len() > roster_size {
            return Some(Infeasibility::PinnedExceedRoster {
                pinned: self.pinned.len(),
                roster_size,
            });
        }

        let available = self.candidates_by_position();
        let pinned = self.pinned_by_position();
        for (&position, bounds) in &self.constraints.position_bounds {
            let have = available.get(&position).copied().unwrap_or(0);
            if have < bounds.min {
                return Some(Infeasibility::PositionShortfall {
                    position,
                    min: bounds.min,
                    available: have,
                });
            }
            let held = pinned.get(&position).copied().unwrap_or(0);
            if held > bounds.max {
                return Some(Infeasibility::PinnedExceedPosition {
                    position,
                    pinned: held,
                    max: bounds.max,
                });
            }
        }
        None
    }
}
