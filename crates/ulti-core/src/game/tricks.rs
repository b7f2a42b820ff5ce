//! Follow-suit legality and trick winner determination.
//!
//! `trump` is `Some` only in Trump games; every other game type evaluates all cards on the
//! plain table with no trump obligation.

use crate::model::card::Card;
use crate::model::hand::Hand;
use crate::model::suit::Suit;
use crate::model::player::Seat;
use crate::model::trick::{Play, Trick};
use serde::{Deserialize, Serialize};

/// A finished trick and the seat that took it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedTrick {
    pub trick: Trick,
    pub winner: Seat,
    pub winning_card: Card,
}

/// Cards `hand` may contribute to `trick`: the led suit if held, else a trump if held,
/// else anything.
pub fn legal_cards(hand: &Hand, trick: &Trick, trump: Option<Suit>) -> Vec<Card> {
    let Some(led) = trick.led_suit() else {
        return hand.cards().to_vec();
    };

    if hand.has_suit(led) {
        return hand.iter().copied().filter(|c| c.suit == led).collect();
    }

    if let Some(trump_suit) = trump {
        if hand.has_suit(trump_suit) {
            return hand.iter().copied().filter(|c| c.suit == trump_suit).collect();
        }
    }

    hand.cards().to_vec()
}

fn precedence(card: Card, led: Suit, trump: Option<Suit>) -> u8 {
    if card.is_trump(trump) {
        2
    } else if card.suit == led {
        1
    } else {
        0
    }
}

/// Whether `challenger` takes the trick from the running `best`.
pub fn beats(challenger: Card, best: Card, led: Suit, trump: Option<Suit>) -> bool {
    let key = |card: Card| (precedence(card, led, trump), card.power(trump));
    key(challenger) > key(best)
}

/// The play currently winning `trick`; the first card seeds the running best.
pub fn winning_play(trick: &Trick, trump: Option<Suit>) -> Option<Play> {
    let led = trick.led_suit()?;
    let mut plays = trick.plays().iter().copied();
    let first = plays.next()?;
    Some(plays.fold(first, |best, play| {
        if beats(play.card, best.card, led, trump) {
            play
        } else {
            best
        }
    }))
}
