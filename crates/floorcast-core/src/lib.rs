// Library root: re-exports all modules so the CLI and integration tests can
// reach the crate's public API.

pub mod config;
pub mod constraints;
pub mod draft;
pub mod optimize;
pub mod players;
pub mod solver;
