mod announce;
mod bid;
mod play;

pub use announce::AnnouncePlanner;
pub use bid::BidPlanner;
pub use play::PlayPlanner;

use std::sync::OnceLock;
use ulti_core::game::collaborator::DecisionContext;
use ulti_core::model::contract::GameType;
use ulti_core::model::hand::Hand;
use ulti_core::model::player::Seat;
use ulti_core::model::suit::Suit;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BotDifficulty {
    /// Accepts only strong indicator bids, announces nothing and follows with the first legal card.
    Easy,
    #[default]
    Normal,
}

impl BotDifficulty {
    pub fn from_env() -> Self {
        static CACHED: OnceLock<BotDifficulty> = OnceLock::new();
        *CACHED.get_or_init(|| {
            std::env::var("ULTI_BOT_DIFFICULTY")
                .ok()
                .and_then(|raw| Self::from_name(&raw))
                .unwrap_or_default()
        })
    }

    pub fn from_name(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "easy" => Some(BotDifficulty::Easy),
            "normal" | "default" => Some(BotDifficulty::Normal),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BotStyle {
    /// Point game: collect tricks and card points.
    Collect,
    /// Lose tricks: Betli taker or anyone in Klopitzky.
    Duck,
    /// Betli defender: force the taker to win a trick.
    Squeeze,
}

/// Bidding and announcement thresholds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BotParams {
    pub trump_bid_threshold: u32,
    pub no_trump_threshold: u32,
    pub betli_max_high_cards: usize,
    pub ulti_min_trumps: usize,
}

impl Default for BotParams {
    fn default() -> Self {
        Self {
            trump_bid_threshold: 60,
            no_trump_threshold: 4,
            betli_max_high_cards: 1,
            ulti_min_trumps: 5,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct BotContext<'a> {
    pub decision: &'a DecisionContext<'a>,
    pub difficulty: BotDifficulty,
    pub params: &'a BotParams,
}

impl<'a> BotContext<'a> {
    pub fn new(
        decision: &'a DecisionContext<'a>,
        difficulty: BotDifficulty,
        params: &'a BotParams,
    ) -> Self {
        Self {
            decision,
            difficulty,
            params,
        }
    }

    pub fn seat(&self) -> Seat {
        self.decision.seat
    }

    pub fn hand(&self) -> &'a Hand {
        self.decision.hand
    }

    pub fn trump(&self) -> Option<Suit> {
        self.decision.contract.and_then(|c| c.trump_suit())
    }

    pub fn is_taker(&self) -> bool {
        self.decision.contract.and_then(|c| c.taker()) == Some(self.seat())
    }

    pub fn style(&self) -> BotStyle {
        match self.decision.contract.map(|c| c.game_type()) {
            Some(GameType::Klopitzky) => BotStyle::Duck,
            Some(GameType::Betli) if self.is_taker() => BotStyle::Duck,
            Some(GameType::Betli) => BotStyle::Squeeze,
            _ => BotStyle::Collect,
        }
    }
}

pub(crate) fn count_suit(hand: &Hand, suit: Suit) -> usize {
    hand.iter().filter(|card| card.suit == suit).count()
}

#[cfg(test)]
mod tests {
    use super::BotDifficulty;

    #[test]
    fn difficulty_names_parse_case_insensitively() {
        assert_eq!(BotDifficulty::from_name(" EASY "), Some(BotDifficulty::Easy));
        assert_eq!(BotDifficulty::from_name("legacy"), None);
        assert_eq!(BotDifficulty::from_name("Normal"), Some(BotDifficulty::Normal));
        assert_eq!(BotDifficulty::from_name("hard"), None);
    }
}
