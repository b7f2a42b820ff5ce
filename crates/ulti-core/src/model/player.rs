use crate::game::error::ConfigurationError;
use core::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum Seat {
    First = 0,
    Second = 1,
    Third = 2,
    Fourth = 3,
}

impl Seat {
    pub const LOOP: [Seat; 4] = [Seat::First, Seat::Second, Seat::Third, Seat::Fourth];

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Seat::First),
            1 => Some(Seat::Second),
            2 => Some(Seat::Third),
            3 => Some(Seat::Fourth),
            _ => None,
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    /// Next seat clockwise at a table of `players` seats.
    pub fn next(self, players: PlayerCount) -> Seat {
        let count = players.seats();
        Seat::LOOP[(self.index() + 1) % count]
    }

    /// The opponent in a two-seat game.
    pub const fn other(self) -> Seat {
        match self {
            Seat::First => Seat::Second,
            _ => Seat::First,
        }
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Seat::First => "Seat 1",
            Seat::Second => "Seat 2",
            Seat::Third => "Seat 3",
            Seat::Fourth => "Seat 4",
        };
        f.write_str(label)
    }
}

/// Table size. Only two seats are played out; three and four seats exist for the deal layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerCount {
    Two,
    Three,
    Four,
}

impl PlayerCount {
    pub const fn seats(self) -> usize {
        match self {
            PlayerCount::Two => 2,
            PlayerCount::Three => 3,
            PlayerCount::Four => 4,
        }
    }

    /// Seats that receive cards. At a four-seat table the dealer sits out.
    pub fn active_seats(self, dealer: Seat) -> Vec<Seat> {
        let seats = &Seat::LOOP[..self.seats()];
        match self {
            PlayerCount::Four => seats.iter().copied().filter(|&s| s != dealer).collect(),
            _ => seats.to_vec(),
        }
    }

    pub const fn initial_cards(self) -> usize {
        match self {
            PlayerCount::Two => 8,
            PlayerCount::Three | PlayerCount::Four => 6,
        }
    }

    pub const fn initial_packet(self) -> usize {
        match self {
            PlayerCount::Two => 4,
            PlayerCount::Three | PlayerCount::Four => 6,
        }
    }

    pub const fn remainder_cards(self) -> usize {
        match self {
            PlayerCount::Two => 4,
            PlayerCount::Three | PlayerCount::Four => 3,
        }
    }
}

impl TryFrom<usize> for PlayerCount {
    type Error = ConfigurationError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        match value {
            2 => Ok(PlayerCount::Two),
            3 => Ok(PlayerCount::Three),
            4 => Ok(PlayerCount::Four),
            other => Err(ConfigurationError::PlayerCount(other)),
        }
    }
}
