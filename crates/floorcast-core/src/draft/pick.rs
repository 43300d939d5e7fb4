// Identifiers, positions and individual pick records.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable player identifier (ESPN player ID).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u32);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Zero-based team index. Displayed 1-based ("Team 3" is `TeamId(2)`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamId(pub usize);

impl TeamId {
    /// Build a team id from the 1-based number shown to users.
    /// Returns `None` for 0.
    pub fn from_display_number(n: usize) -> Option<Self> {
        n.checked_sub(1).map(TeamId)
    }

    pub fn display_number(&self) -> usize {
        self.0 + 1
    }
}

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Team {}", self.display_number())
    }
}

/// Football positions a player can be rostered at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Position {
    Quarterback,
    RunningBack,
    WideReceiver,
    TightEnd,
    Kicker,
    Defense,
}

impl Position {
    /// Every position, in display order.
    pub const ALL: [Position; 6] = [
        Position::Quarterback,
        Position::RunningBack,
        Position::WideReceiver,
        Position::TightEnd,
        Position::Kicker,
        Position::Defense,
    ];

    /// Parse a position label into a Position.
    ///
    /// Handles ESPN-style abbreviations:
    /// - "D/ST", "DST", "DEF" -> Defense
    /// - "K", "PK" -> Kicker
    pub fn from_str_pos(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "QB" => Some(Position::Quarterback),
            "RB" => Some(Position::RunningBack),
            "WR" => Some(Position::WideReceiver),
            "TE" => Some(Position::TightEnd),
            "K" | "PK" => Some(Position::Kicker),
            "D/ST" | "DST" | "DEF" => Some(Position::Defense),
            _ => None,
        }
    }

    /// Return the display string for this position.
    pub fn display_str(&self) -> &'static str {
        match self {
            Position::Quarterback => "QB",
            Position::RunningBack => "RB",
            Position::WideReceiver => "WR",
            Position::TightEnd => "TE",
            Position::Kicker => "K",
            Position::Defense => "D/ST",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_str())
    }
}

/// A single completed pick, located on the draft board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftPick {
    /// Zero-based overall pick index.
    pub overall: usize,
    /// 1-based round number.
    pub round: usize,
    /// 1-based pick number within the round.
    pub pick_in_round: usize,
    /// Team that made the pick.
    pub team: TeamId,
    /// The drafted player.
    pub player_id: PlayerId,
}

/// Split a zero-based overall pick index into a 1-based (round, pick) pair.
pub fn round_and_pick(overall: usize, num_teams: usize) -> (usize, usize) {
    if num_teams == 0 {
        return (1, overall + 1);
    }
    (overall / num_teams + 1, overall % num_teams + 1)
}
