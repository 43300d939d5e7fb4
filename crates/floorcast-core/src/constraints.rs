// Roster-shape rules: exact roster size and per-position bounds.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::draft::pick::Position;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstraintError {
    #[error("roster_size must be greater than 0")]
    EmptyRoster,

    #[error("{position}: min {min} is greater than max {max}")]
    InvertedBounds {
        position: Position,
        min: usize,
        max: usize,
    },

    #[error("position minimums add up to {sum_min}, more than the roster size {roster_size}")]
    MinimumsExceedRoster { sum_min: usize, roster_size: usize },

    #[error("position maximums add up to {sum_max}, fewer than the roster size {roster_size}")]
    MaximumsBelowRoster { sum_max: usize, roster_size: usize },

    #[error("player pool contains {0} players but no bounds are configured for {0}")]
    UncoveredPosition(Position),
}

/// Inclusive `[min, max]` count of players at one position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionBounds {
    pub min: usize,
    pub max: usize,
}

impl PositionBounds {
    pub fn new(min: usize, max: usize) -> Self {
        PositionBounds { min, max }
    }

    pub fn contains(&self, count: usize) -> bool {
        (self.min..=self.max).contains(&count)
    }
}

impl fmt::Display for PositionBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}

/// The shape every completed roster must have.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstraintSet {
    /// Exact number of players on a completed roster.
    pub roster_size: usize,
    pub position_bounds: BTreeMap<Position, PositionBounds>,
}

impl ConstraintSet {
    pub fn new(roster_size: usize, position_bounds: BTreeMap<Position, PositionBounds>) -> Self {
        ConstraintSet {
            roster_size,
            position_bounds,
        }
    }

    /// Check that some roster can satisfy these rules in isolation:
    /// `sum(min) <= roster_size <= sum(max)` and `min <= max` everywhere.
    pub fn validate(&self) -> Result<(), ConstraintError> {
        if self.roster_size == 0 {
            return Err(ConstraintError::EmptyRoster);
        }
        for (&position, bounds) in &self.position_bounds {
            if bounds.min > bounds.max {
                return Err(ConstraintError::InvertedBounds {
                    position,
                    min: bounds.min,
                    max: bounds.max,
                });
            }
        }
        let sum_min: usize = self.position_bounds.values().map(|b| b.min).sum();
        if sum_min > self.roster_size {
            return Err(ConstraintError::MinimumsExceedRoster {
                sum_min,
                roster_size: self.roster_size,
            });
        }
        let sum_max: usize = self.position_bounds.values().map(|b| b.max).sum();
        if sum_max < self.roster_size {
            return Err(ConstraintError::MaximumsBelowRoster {
                sum_max,
                roster_size: self.roster_size,
            });
        }
        Ok(())
    }

    /// Check that every position present among `positions` has bounds.
    pub fn covers(&self, positions: &BTreeSet<Position>) -> Result<(), ConstraintError> {
        match positions
            .iter()
            .find(|p| !self.position_bounds.contains_key(*p))
        {
            Some(&missing) => Err(ConstraintError::UncoveredPosition(missing)),
            None => Ok(()),
        }
    }

    pub fn bounds(&self, position: Position) -> Option<PositionBounds> {
        self.position_bounds.get(&position).copied()
    }
}
