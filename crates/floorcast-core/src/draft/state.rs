// Draft state: which players each team holds, and the global claimed set.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::pick::{PlayerId, TeamId};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftStateError {
    #[error("unknown team {team} (draft has {num_teams} teams)")]
    UnknownTeam { team: TeamId, num_teams: usize },

    #[error("player {player_id} is already claimed")]
    AlreadyClaimed { player_id: PlayerId },
}

/// Snapshot of who owns whom.
///
/// Invariants, maintained by `record_pick`:
/// - every team's pick set is a subset of `claimed`
/// - team pick sets are pairwise disjoint
/// - their union equals `claimed`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftState {
    team_picks: Vec<BTreeSet<PlayerId>>,
    claimed: BTreeSet<PlayerId>,
}

impl DraftState {
    /// Create an empty draft for `num_teams` teams.
    pub fn new(num_teams: usize) -> Self {
        DraftState {
            team_picks: vec![BTreeSet::new(); num_teams],
            claimed: BTreeSet::new(),
        }
    }

    /// Assign `player_id` to `team`.
    ///
    /// Rejects unknown teams and players already on any roster, leaving the
    /// state untouched.
    pub fn record_pick(&mut self, team: TeamId, player_id: PlayerId) -> Result<(), DraftStateError> {
        let num_teams = self.num_teams();
        let Some(picks) = self.team_picks.get_mut(team.0) else {
            return Err(DraftStateError::UnknownTeam { team, num_teams });
        };
        if !self.claimed.insert(player_id) {
            return Err(DraftStateError::AlreadyClaimed { player_id });
        }
        picks.insert(player_id);
        Ok(())
    }

    pub fn num_teams(&self) -> usize {
        self.team_picks.len()
    }

    /// All players on any roster.
    pub fn claimed(&self) -> &BTreeSet<PlayerId> {
        &self.claimed
    }

    pub fn is_claimed(&self, player_id: PlayerId) -> bool {
        self.claimed.contains(&player_id)
    }

    /// The players already on `team`'s roster, or `None` for an unknown team.
    pub fn team_picks(&self, team: TeamId) -> Option<&BTreeSet<PlayerId>> {
        self.team_picks.get(team.0)
    }

    /// The team holding `player_id`, if any.
    pub fn owner_of(&self, player_id: PlayerId) -> Option<TeamId> {
        self.team_picks
            .iter()
            .position(|picks| picks.contains(&player_id))
            .map(TeamId)
    }

    /// Total number of picks recorded.
    pub fn pick_count(&self) -> usize {
        self.claimed.len()
    }
}
