use crate::model::card::Card;
use crate::model::suit::Suit;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Self { cards: Vec::new() }
    }

    pub fn with_cards(cards: Vec<Card>, trump: Option<Suit>) -> Self {
        let mut hand = Self { cards };
        hand.sort(trump);
        hand
    }

    /// Adds a dealt packet and re-sorts against the given trump context.
    pub fn receive(&mut self, cards: &[Card], trump: Option<Suit>) {
        self.cards.extend_from_slice(cards);
        self.sort(trump);
    }

    pub fn remove(&mut self, card: Card) -> bool {
        if let Some(index) = self.cards.iter().position(|&c| c == card) {
            self.cards.remove(index);
            true
        } else {
            false
        }
    }

    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }

    pub fn has_suit(&self, suit: Suit) -> bool {
        self.cards.iter().any(|c| c.suit == suit)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Suit priority descending, then point value descending; power breaks point ties.
    pub fn sort(&mut self, trump: Option<Suit>) {
        self.cards.sort_by_key(|c| {
            (
                Reverse(c.suit),
                Reverse(c.point_value(trump)),
                Reverse(c.power(trump)),
            )
        });
    }
}
