pub mod bidding;
pub mod bonus;
pub mod collaborator;
pub mod deal;
pub mod error;
pub mod events;
pub mod hand;
pub mod match_state;
pub mod melds;
pub mod orchestrator;
pub mod serialization;
pub mod tricks;
