// Player data: the projection pool and its CSV loader.

pub mod pool;
pub mod projections;
