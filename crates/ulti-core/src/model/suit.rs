use core::fmt;
use serde::{Deserialize, Serialize};

/// Declaration order doubles as the tie-break priority: Hearts > Bells > Leaves > Acorns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Suit {
    Acorns = 0,
    Leaves = 1,
    Bells = 2,
    Hearts = 3,
}

impl Suit {
    /// Bidding order, lowest priority first.
    pub const ALL: [Suit; 4] = [Suit::Acorns, Suit::Leaves, Suit::Bells, Suit::Hearts];

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Suit::Acorns),
            1 => Some(Suit::Leaves),
            2 => Some(Suit::Bells),
            3 => Some(Suit::Hearts),
            _ => None,
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn priority(self) -> u8 {
        self as u8
    }

    pub const fn symbol(self) -> char {
        match self {
            Suit::Acorns => 'A',
            Suit::Leaves => 'L',
            Suit::Bells => 'B',
            Suit::Hearts => 'H',
        }
    }

    pub const fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            'A' | 'a' => Some(Suit::Acorns),
            'L' | 'l' => Some(Suit::Leaves),
            'B' | 'b' => Some(Suit::Bells),
            'H' | 'h' => Some(Suit::Hearts),
            _ => None,
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Suit::Acorns => "Acorns",
            Suit::Leaves => "Leaves",
            Suit::Bells => "Bells",
            Suit::Hearts => "Hearts",
        };
        f.write_str(label)
    }
}
