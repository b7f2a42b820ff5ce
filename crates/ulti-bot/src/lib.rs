pub mod bot;
pub mod policy;

pub use bot::{AnnouncePlanner, BidPlanner, BotContext, BotDifficulty, BotParams, BotStyle, PlayPlanner};
pub use policy::{HeuristicPolicy, RandomPolicy};
