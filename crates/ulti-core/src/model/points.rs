//! Canonical point and trick-power tables.
//!
//! A card is evaluated against the trump table only when a trump suit is in force and the
//! card belongs to it; every other card uses the plain table.

use crate::model::card::Card;
use crate::model::rank::Rank;
use crate::model::suit::Suit;

/// Added to every trump power so that any trump beats any non-trump.
pub const TRUMP_POWER_OFFSET: u16 = 100;

/// Card points credited to the winner of the final trick.
pub const LAST_TRICK_POINTS: u32 = 10;

pub const fn trump_power(rank: Rank) -> u16 {
    match rank {
        Rank::Under => 8,
        Rank::Nine => 7,
        Rank::Ace => 6,
        Rank::Ten => 5,
        Rank::King => 4,
        Rank::Over => 3,
        Rank::Eight => 2,
        Rank::Seven => 1,
    }
}

pub const fn plain_power(rank: Rank) -> u16 {
    match rank {
        Rank::Ace => 8,
        Rank::Ten => 7,
        Rank::King => 6,
        Rank::Over => 5,
        Rank::Under => 4,
        Rank::Nine => 3,
        Rank::Eight => 2,
        Rank::Seven => 1,
    }
}

pub const fn trump_points(rank: Rank) -> u32 {
    match rank {
        Rank::Under => 20,
        Rank::Nine => 14,
        Rank::Ace => 11,
        Rank::Ten => 10,
        Rank::King => 4,
        Rank::Over => 3,
        Rank::Eight | Rank::Seven => 0,
    }
}

pub const fn plain_points(rank: Rank) -> u32 {
    match rank {
        Rank::Ace => 11,
        Rank::Ten => 10,
        Rank::King => 4,
        Rank::Over => 3,
        Rank::Under => 2,
        Rank::Nine | Rank::Eight | Rank::Seven => 0,
    }
}

pub fn is_trump(card: Card, trump: Option<Suit>) -> bool {
    trump == Some(card.suit)
}

pub fn power(card: Card, trump: Option<Suit>) -> u16 {
    if is_trump(card, trump) {
        TRUMP_POWER_OFFSET + trump_power(card.rank)
    } else {
        plain_power(card.rank)
    }
}

pub fn points(card: Card, trump: Option<Suit>) -> u32 {
    if is_trump(card, trump) {
        trump_points(card.rank)
    } else {
        plain_points(card.rank)
    }
}
