use core::fmt;
use serde::{Deserialize, Serialize};

/// Ordinal order is used for sequence adjacency only. Points and trick power come from
/// the lookup tables in [`crate::model::points`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[repr(u8)]
pub enum Rank {
    Seven = 0,
    Eight = 1,
    Nine = 2,
    Ten = 3,
    Under = 4,
    Over = 5,
    King = 6,
    Ace = 7,
}

impl Rank {
    pub const ORDERED: [Rank; 8] = [
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Under,
        Rank::Over,
        Rank::King,
        Rank::Ace,
    ];

    pub const fn ordinal(self) -> u8 {
        self as u8
    }

    pub const fn from_ordinal(ordinal: u8) -> Option<Self> {
        match ordinal {
            0 => Some(Rank::Seven),
            1 => Some(Rank::Eight),
            2 => Some(Rank::Nine),
            3 => Some(Rank::Ten),
            4 => Some(Rank::Under),
            5 => Some(Rank::Over),
            6 => Some(Rank::King),
            7 => Some(Rank::Ace),
            _ => None,
        }
    }

    pub const fn symbol(self) -> &'static str {
        match self {
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Under => "U",
            Rank::Over => "O",
            Rank::King => "K",
            Rank::Ace => "A",
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol.to_ascii_uppercase().as_str() {
            "7" | "VII" => Some(Rank::Seven),
            "8" | "VIII" => Some(Rank::Eight),
            "9" | "IX" => Some(Rank::Nine),
            "10" | "X" => Some(Rank::Ten),
            "U" => Some(Rank::Under),
            "O" => Some(Rank::Over),
            "K" => Some(Rank::King),
            "A" => Some(Rank::Ace),
            _ => None,
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
