// Draft model: identifiers, positions, per-team pick sets and the pick log.

pub mod board;
pub mod pick;
pub mod state;
