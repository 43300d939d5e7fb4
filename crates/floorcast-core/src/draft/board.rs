// Draft board: the pick log laid over the draft order.
//
// The board is the read-only view a draft-state collaborator hands to the
// optimizer. It derives the per-team `DraftState`, answers "who is on the
// clock", and can be rewound to any earlier pick.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::pick::{round_and_pick, DraftPick, PlayerId, TeamId};
use super::state::{DraftState, DraftStateError};
use crate::players::pool::PlayerPool;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("draft order has {order_len} entries but the draft needs {needed}")]
    OrderTooShort { order_len: usize, needed: usize },

    #[error("draft order entry {overall} names team index {team}, but there are only {num_teams} teams")]
    OrderTeamOutOfRange {
        overall: usize,
        team: usize,
        num_teams: usize,
    },

    #[error("pick log has {picks} picks but the draft only has {total} slots")]
    TooManyPicks { picks: usize, total: usize },

    #[error("player {player_id} picked twice (second time at overall pick {overall})")]
    DuplicatePick { player_id: PlayerId, overall: usize },

    #[error("player {player_id} at overall pick {overall} is not in the player pool")]
    UnknownPlayer { player_id: PlayerId, overall: usize },
}

/// How the pick order is generated when no explicit order is configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStyle {
    /// Order reverses every round (1..N, N..1, ...).
    #[default]
    Snake,
    /// Same order every round.
    Linear,
}

/// Which team is on the clock for every overall pick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftOrder(Vec<TeamId>);

impl DraftOrder {
    /// Generate an order for `num_teams` teams over `rounds` rounds.
    pub fn generate(style: OrderStyle, num_teams: usize, rounds: usize) -> Self {
        let mut order = Vec::with_capacity(num_teams * rounds);
        for round in 0..rounds {
            let reversed = style == OrderStyle::Snake && round % 2 == 1;
            if reversed {
                order.extend((0..num_teams).rev().map(TeamId));
            } else {
                order.extend((0..num_teams).map(TeamId));
            }
        }
        DraftOrder(order)
    }

    /// Use an explicit order (team index per overall pick).
    pub fn explicit(teams: Vec<TeamId>) -> Self {
        DraftOrder(teams)
    }

    pub fn team_at(&self, overall: usize) -> Option<TeamId> {
        self.0.get(overall).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// The next pick to be made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OnTheClock {
    pub overall: usize,
    pub round: usize,
    pub pick_in_round: usize,
    pub team: TeamId,
}

/// Pick log plus draft order, with the derived `DraftState`.
#[derive(Debug, Clone)]
pub struct DraftBoard {
    num_teams: usize,
    rounds: usize,
    order: DraftOrder,
    picks: Vec<PlayerId>,
    state: DraftState,
}

impl DraftBoard {
    /// Build a board and replay the pick log into a `DraftState`.
    ///
    /// `rounds` is the number of picks each team makes (the roster size).
    /// The order must cover every pick of the draft and only name existing
    /// teams; the log may not repeat a player.
    pub fn new(
        num_teams: usize,
        rounds: usize,
        order: DraftOrder,
        picks: Vec<PlayerId>,
    ) -> Result<Self, BoardError> {
        let needed = num_teams * rounds;
        if order.len() < needed {
            return Err(BoardError::OrderTooShort {
                order_len: order.len(),
                needed,
            });
        }
        if let Some((overall, team)) = order
            .0
            .iter()
            .enumerate()
            .find(|(_, team)| team.0 >= num_teams)
        {
            return Err(BoardError::OrderTeamOutOfRange {
                overall,
                team: team.0,
                num_teams,
            });
        }
        if picks.len() > needed {
            return Err(BoardError::TooManyPicks {
                picks: picks.len(),
                total: needed,
            });
        }

        let mut state = DraftState::new(num_teams);
        for (overall, &player_id) in picks.iter().enumerate() {
            let team = order.0[overall];
            state.record_pick(team, player_id).map_err(|e| match e {
                DraftStateError::AlreadyClaimed { player_id } => {
                    BoardError::DuplicatePick { player_id, overall }
                }
                DraftStateError::UnknownTeam { team, num_teams } => {
                    BoardError::OrderTeamOutOfRange {
                        overall,
                        team: team.0,
                        num_teams,
                    }
                }
            })?;
        }

        Ok(DraftBoard {
            num_teams,
            rounds,
            order,
            picks,
            state,
        })
    }

    /// Check that every logged pick refers to a player in `pool`.
    pub fn validate_against(&self, pool: &PlayerPool) -> Result<(), BoardError> {
        for (overall, player_id) in self.picks.iter().enumerate() {
            if !pool.contains(*player_id) {
                return Err(BoardError::UnknownPlayer {
                    player_id: *player_id,
                    overall,
                });
            }
        }
        Ok(())
    }

    /// A board truncated to its first `pick_count` picks ("go to pick").
    /// Counts past the end of the log return the full board.
    pub fn rewind(&self, pick_count: usize) -> Result<DraftBoard, BoardError> {
        let keep = pick_count.min(self.picks.len());
        DraftBoard::new(
            self.num_teams,
            self.rounds,
            self.order.clone(),
            self.picks[..keep].to_vec(),
        )
    }

    pub fn state(&self) -> &DraftState {
        &self.state
    }

    pub fn num_teams(&self) -> usize {
        self.num_teams
    }

    pub fn pick_count(&self) -> usize {
        self.picks.len()
    }

    /// Number of picks in a complete draft.
    pub fn total_picks(&self) -> usize {
        self.num_teams * self.rounds
    }

    pub fn is_complete(&self) -> bool {
        self.pick_count() >= self.total_picks()
    }

    /// The pick about to be made, or `None` once the draft has concluded.
    pub fn on_the_clock(&self) -> Option<OnTheClock> {
        if self.is_complete() {
            return None;
        }
        let overall = self.pick_count();
        let team = self.order.team_at(overall)?;
        let (round, pick_in_round) = round_and_pick(overall, self.num_teams);
        Some(OnTheClock {
            overall,
            round,
            pick_in_round,
            team,
        })
    }

    /// Every logged pick, in order.
    pub fn picks(&self) -> impl Iterator<Item = DraftPick> + '_ {
        self.picks
            .iter()
            .enumerate()
            .map(|(overall, &player_id)| self.locate(overall, player_id))
    }

    pub fn last_pick(&self) -> Option<DraftPick> {
        let overall = self.picks.len().checked_sub(1)?;
        Some(self.locate(overall, self.picks[overall]))
    }

    fn locate(&self, overall: usize, player_id: PlayerId) -> DraftPick {
        let (round, pick_in_round) = round_and_pick(overall, self.num_teams);
        DraftPick {
            overall,
            round,
            pick_in_round,
            team: self.order.0[overall],
            player_id,
        }
    }
}
