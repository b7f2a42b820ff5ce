#![deny(warnings)]
pub mod game;
pub mod model;

pub use game::collaborator::{Collaborator, DecisionContext, ScriptedCollaborator};
pub use game::error::{ConfigurationError, EngineError, IllegalMove, InvariantViolation};
pub use game::events::{GameEvent, GameLog, NullLog};
pub use game::hand::{HandOutcome, HandResult, HandState};
pub use game::orchestrator::{Orchestrator, OrchestratorConfig};
