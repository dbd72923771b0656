//! Royal Game of Ur rules engine.
//!
//! Implements the turn engine for the two-player race game: board
//! topology, move validation, capture and bonus-turn resolution, win
//! detection, and a greedy heuristic computer opponent. Rendering and
//! input handling live in host applications, which mutate state only
//! through [`engine::Engine`] commands and read it back through its
//! query methods.

pub mod ai;
pub mod board;
pub mod engine;
pub mod player;
pub mod rules;
