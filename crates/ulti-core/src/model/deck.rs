use crate::game::error::InvariantViolation;
use crate::model::card::Card;
use crate::model::rank::Rank;
use crate::model::suit::Suit;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::collections::HashSet;

pub const DECK_SIZE: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    pub fn standard() -> Self {
        let mut cards = Vec::with_capacity(DECK_SIZE);
        for suit in Suit::ALL.iter().copied() {
            for rank in Rank::ORDERED.iter().copied() {
                cards.push(Card::new(rank, suit));
            }
        }
        Self { cards }
    }

    pub fn shuffled<R: rand::Rng + ?Sized>(rng: &mut R) -> Self {
        let mut deck = Self::standard();
        deck.shuffle_in_place(rng);
        deck
    }

    pub fn shuffled_with_seed(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::shuffled(&mut rng)
    }

    /// Stacked deck in dealing order. Rejects anything that is not the full 32-card set.
    pub fn from_cards(cards: Vec<Card>) -> Result<Self, InvariantViolation> {
        verify_complete(&cards)?;
        Ok(Self { cards })
    }

    pub fn shuffle_in_place<R: rand::Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn into_cards(self) -> Vec<Card> {
        self.cards
    }
}

/// Checks that `cards` is exactly the 32-card deck: no duplicates, 8 per suit, 4 per rank.
pub fn verify_complete(cards: &[Card]) -> Result<(), InvariantViolation> {
    if cards.len() != DECK_SIZE {
        return Err(InvariantViolation::DeckIntegrity(format!(
            "expected {DECK_SIZE} cards, found {}",
            cards.len()
        )));
    }
    let unique: HashSet<Card> = cards.iter().copied().collect();
    if unique.len() != DECK_SIZE {
        return Err(InvariantViolation::DeckIntegrity(format!(
            "{} duplicate card(s)",
            DECK_SIZE - unique.len()
        )));
    }
    for suit in Suit::ALL {
        let count = cards.iter().filter(|c| c.suit == suit).count();
        if count != Rank::ORDERED.len() {
            return Err(InvariantViolation::DeckIntegrity(format!(
                "{suit} has {count} cards"
            )));
        }
    }
    for rank in Rank::ORDERED {
        let count = cards.iter().filter(|c| c.rank == rank).count();
        if count != Suit::ALL.len() {
            return Err(InvariantViolation::DeckIntegrity(format!(
                "rank {rank} has {count} cards"
            )));
        }
    }
    Ok(())
}
