use crate::model::player::Seat;
use crate::model::suit::Suit;
use core::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameType {
    Trump,
    NoTrump,
    Betli,
    Klopitzky,
}

impl GameType {
    /// Melds and bonus announcements only exist in point games.
    pub const fn is_point_game(self) -> bool {
        matches!(self, GameType::Trump | GameType::NoTrump)
    }
}

impl fmt::Display for GameType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            GameType::Trump => "Trump",
            GameType::NoTrump => "No-Trump",
            GameType::Betli => "Betli",
            GameType::Klopitzky => "Klopitzky",
        };
        f.write_str(label)
    }
}

/// Result of bidding. Fields are private so the trump suit cannot change once fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contract {
    game_type: GameType,
    trump: Option<Suit>,
    taker: Option<Seat>,
}

impl Contract {
    pub const fn trump(suit: Suit, taker: Seat) -> Self {
        Self {
            game_type: GameType::Trump,
            trump: Some(suit),
            taker: Some(taker),
        }
    }

    pub const fn no_trump(taker: Seat) -> Self {
        Self {
            game_type: GameType::NoTrump,
            trump: None,
            taker: Some(taker),
        }
    }

    pub const fn betli(taker: Seat) -> Self {
        Self {
            game_type: GameType::Betli,
            trump: None,
            taker: Some(taker),
        }
    }

    pub const fn klopitzky() -> Self {
        Self {
            game_type: GameType::Klopitzky,
            trump: None,
            taker: None,
        }
    }

    pub const fn game_type(&self) -> GameType {
        self.game_type
    }

    pub const fn trump_suit(&self) -> Option<Suit> {
        self.trump
    }

    pub const fn taker(&self) -> Option<Seat> {
        self.taker
    }
}

impl fmt::Display for Contract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.trump, self.taker) {
            (Some(suit), Some(taker)) => write!(f, "{} ({suit}) by {taker}", self.game_type),
            (None, Some(taker)) => write!(f, "{} by {taker}", self.game_type),
            _ => write!(f, "{}", self.game_type),
        }
    }
}
