//! Seat collaborators backed by the planners in [`crate::bot`].

mod heuristic;
mod random;

pub use heuristic::HeuristicPolicy;
pub use random::RandomPolicy;
