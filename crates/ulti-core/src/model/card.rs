use crate::model::points;
use crate::model::rank::Rank;
use crate::model::suit::Suit;
use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { suit, rank }
    }

    pub fn is_trump(self, trump: Option<Suit>) -> bool {
        points::is_trump(self, trump)
    }

    pub fn power(self, trump: Option<Suit>) -> u16 {
        points::power(self, trump)
    }

    pub fn point_value(self, trump: Option<Suit>) -> u32 {
        points::points(self, trump)
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit.symbol())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot parse card from {0:?}")]
pub struct ParseCardError(pub String);

impl FromStr for Card {
    type Err = ParseCardError;

    /// Rank symbol followed by a suit letter, e.g. `UH`, `10B`, `7A`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        let suit_char = chars
            .next_back()
            .ok_or_else(|| ParseCardError(s.to_string()))?;
        let suit = Suit::from_symbol(suit_char).ok_or_else(|| ParseCardError(s.to_string()))?;
        let rank = Rank::from_symbol(chars.as_str()).ok_or_else(|| ParseCardError(s.to_string()))?;
        Ok(Card::new(rank, suit))
    }
}
