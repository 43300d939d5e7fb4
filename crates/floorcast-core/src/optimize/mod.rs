// Roster optimization: maximin weekly-floor completion of a team's roster.
//
// request     -> input checks, candidate set, pre-solve infeasibility
// formulation -> MILP with an epigraph variable for the weekly floor
// engine      -> solve through the `Solver` port and interpret the outcome
// result      -> what the caller gets back
// recommend   -> result joined with player data for display

pub mod engine;
pub mod formulation;
pub mod recommend;
pub mod request;
pub mod result;

use thiserror::Error;

use crate::constraints::ConstraintError;
use crate::draft::pick::{PlayerId, TeamId};
use crate::solver::SolverError;

pub use engine::RosterOptimizer;
pub use recommend::{Recommendation, RecommendedPlayer};
pub use request::{Infeasibility, OptimizationRequest};
pub use result::{OptimizationResult, ResultStatus};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum OptimizeError {
    #[error("invalid roster configuration: {0}")]
    Configuration(#[from] ConstraintError),

    #[error("unknown team {team} (draft has {num_teams} teams)")]
    UnknownTeam { team: TeamId, num_teams: usize },

    #[error("player {0} is claimed in the draft but missing from the player pool")]
    UnknownPlayer(PlayerId),

    #[error(transparent)]
    Solver(#[from] SolverError),
}
