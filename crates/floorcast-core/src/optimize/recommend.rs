// Recommendation: an optimization result joined with player details.

use std::cmp::Ordering;

use serde::Serialize;

use crate::draft::pick::{PlayerId, Position, TeamId};
use crate::draft::state::DraftState;
use crate::players::pool::{Player, PlayerPool};

use super::result::{OptimizationResult, ResultStatus};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendedPlayer {
    pub id: PlayerId,
    pub name: String,
    pub position: Position,
    pub pro_team: String,
    pub season_total: f64,
}

impl From<&Player> for RecommendedPlayer {
    fn from(p: &Player) -> Self {
        RecommendedPlayer {
            id: p.id,
            name: p.name.clone(),
            position: p.position,
            pro_team: p.pro_team.clone(),
            season_total: p.season_total(),
        }
    }
}

/// What a team should draft next, and what it already has.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub team: TeamId,
    pub status: ResultStatus,
    /// Players in the optimal roster the team has not drafted yet, best
    /// season total first.
    pub to_draft: Vec<RecommendedPlayer>,
    /// The team's current picks.
    pub current: Vec<RecommendedPlayer>,
    pub weekly_totals: Vec<f64>,
    pub floor: Option<f64>,
}

fn by_season_total(a: &RecommendedPlayer, b: &RecommendedPlayer) -> Ordering {
    b.season_total
        .partial_cmp(&a.season_total)
        .unwrap_or(Ordering::Equal)
        .then_with(|| a.name.cmp(&b.name))
}

impl Recommendation {
    pub fn from_result(result: &OptimizationResult, state: &DraftState, pool: &PlayerPool) -> Self {
        let picks = state.team_picks(result.team);
        let is_pick = |id: &PlayerId| picks.is_some_and(|set| set.contains(id));

        let mut to_draft: Vec<RecommendedPlayer> = result
            .roster
            .iter()
            .filter(|id| !is_pick(*id))
            .filter_map(|id| pool.get(*id))
            .map(RecommendedPlayer::from)
            .collect();
        to_draft.sort_by(by_season_total);

        let mut current: Vec<RecommendedPlayer> = picks
            .into_iter()
            .flatten()
            .filter_map(|id| pool.get(*id))
            .map(RecommendedPlayer::from)
            .collect();
        current.sort_by(by_season_total);

        Recommendation {
            team: result.team,
            status: result.status,
            to_draft,
            current,
            weekly_totals: result.weekly_totals.clone(),
            floor: result.floor,
        }
    }

    /// The single best player to take with the current pick.
    pub fn next_pick(&self) -> Option<&RecommendedPlayer> {
        self.to_draft.first()
    }
}
