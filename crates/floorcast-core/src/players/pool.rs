// Player pool: every draftable player with a weekly projection vector.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::draft::pick::{PlayerId, Position};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PoolError {
    #[error("duplicate player id {0}")]
    DuplicateId(PlayerId),

    #[error("player {player_id} has {found} weekly projections, expected {expected}")]
    PeriodMismatch {
        player_id: PlayerId,
        expected: usize,
        found: usize,
    },

    #[error("player {0} has no weekly projections")]
    NoPeriods(PlayerId),

    #[error("player {player_id} has an invalid projection {value} in week {week}")]
    InvalidProjection {
        player_id: PlayerId,
        week: usize,
        value: f64,
    },
}

/// A draftable player and their projected points per scoring period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub pro_team: String,
    pub position: Position,
    /// One projection per week, in week order. Bye weeks are 0.0.
    pub weekly_points: Vec<f64>,
}

impl Player {
    /// Sum of all weekly projections.
    pub fn season_total(&self) -> f64 {
        self.weekly_points.iter().sum()
    }
}

/// Immutable, validated collection of players keyed by id.
///
/// All players share the same number of weeks and every projection is
/// finite and non-negative.
#[derive(Debug, Clone, Default)]
pub struct PlayerPool {
    players: BTreeMap<PlayerId, Player>,
    num_periods: usize,
}

impl PlayerPool {
    pub fn new(players: Vec<Player>) -> Result<Self, PoolError> {
        let num_periods = players.first().map(|p| p.weekly_points.len()).unwrap_or(0);
        let mut map = BTreeMap::new();

        for player in players {
            if player.weekly_points.is_empty() {
                return Err(PoolError::NoPeriods(player.id));
            }
            if player.weekly_points.len() != num_periods {
                return Err(PoolError::PeriodMismatch {
                    player_id: player.id,
                    expected: num_periods,
                    found: player.weekly_points.len(),
                });
            }
            if let Some((week, &value)) = player
                .weekly_points
                .iter()
                .enumerate()
                .find(|(_, v)| !v.is_finite() || **v < 0.0)
            {
                return Err(PoolError::InvalidProjection {
                    player_id: player.id,
                    week: week + 1,
                    value,
                });
            }
            let id = player.id;
            if map.insert(id, player).is_some() {
                return Err(PoolError::DuplicateId(id));
            }
        }

        Ok(PlayerPool {
            players: map,
            num_periods,
        })
    }

    pub fn get(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(&id)
    }

    pub fn contains(&self, id: PlayerId) -> bool {
        self.players.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Number of scoring periods every player is projected for.
    pub fn num_periods(&self) -> usize {
        self.num_periods
    }

    /// Players in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        self.players.values()
    }

    /// Distinct positions present in the pool.
    pub fn positions(&self) -> BTreeSet<Position> {
        self.players.values().map(|p| p.position).collect()
    }

    /// Drop players whose season total is at or below `min_season_points`,
    /// except those listed in `keep` (already drafted players must stay
    /// resolvable).
    pub fn playable(&self, min_season_points: f64, keep: &BTreeSet<PlayerId>) -> PlayerPool {
        let players = self
            .players
            .iter()
            .filter(|(id, p)| keep.contains(id) || p.season_total() > min_season_points)
            .map(|(id, p)| (*id, p.clone()))
            .collect::<BTreeMap<_, _>>();
        let num_periods = if players.is_empty() { 0 } else { self.num_periods };
        PlayerPool {
            players,
            num_periods,
        }
    }

    /// Summed weekly projections of `roster`. Ids missing from the pool
    /// contribute nothing.
    pub fn weekly_totals<'a>(&self, roster: impl IntoIterator<Item = &'a PlayerId>) -> Vec<f64> {
        let mut totals = vec![0.0; self.num_periods];
        for player in roster.into_iter().filter_map(|id| self.players.get(id)) {
            for (total, points) in totals.iter_mut().zip(&player.weekly_points) {
                *total += points;
            }
        }
        totals
    }
}

/// Unclaimed players sorted by season total (highest first, ties by name),
/// optionally restricted to one position.
pub fn best_available<'a>(
    pool: &'a PlayerPool,
    claimed: &BTreeSet<PlayerId>,
    position: Option<Position>,
    limit: usize,
) -> Vec<&'a Player> {
    let mut available: Vec<&Player> = pool
        .iter()
        .filter(|p| !claimed.contains(&p.id))
        .filter(|p| position.map_or(true, |pos| p.position == pos))
        .collect();
    available.sort_by(|a, b| {
        b.season_total()
            .partial_cmp(&a.season_total())
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.name.cmp(&b.name))
    });
    available.truncate(limit);
    available
}
