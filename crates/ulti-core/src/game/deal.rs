//! Two-stage deal: initial packets plus indicator, then the remainder after bidding.

use crate::game::error::{EngineError, InvariantViolation};
use crate::model::card::Card;
use crate::model::deck::{Deck, verify_complete};
use crate::model::hand::Hand;
use crate::model::player::{PlayerCount, Seat};
use crate::model::suit::Suit;
use std::array;
use tracing::{Level, event};

/// Number of bottom talon cards shown to both seats before the Betli question.
pub const TALON_PREVIEW: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deal {
    players: PlayerCount,
    dealer: Seat,
    hands: [Hand; 4],
    indicator: Card,
    talon: Vec<Card>,
}

/// Validates the table size, then shuffles with `seed` and deals.
pub fn deal_with_seed(players: usize, dealer: Seat, seed: u64) -> Result<Deal, EngineError> {
    let players = PlayerCount::try_from(players)?;
    Ok(initial_deal(players, dealer, Deck::shuffled_with_seed(seed))?)
}

/// Deals from the top of `deck`, starting left of the dealer.
pub fn initial_deal(
    players: PlayerCount,
    dealer: Seat,
    deck: Deck,
) -> Result<Deal, InvariantViolation> {
    let order = deal_order(players, dealer);
    let mut cards = deck.into_cards().into_iter();
    let mut hands: [Hand; 4] = array::from_fn(|_| Hand::new());

    let rounds = players.initial_cards() / players.initial_packet();
    for _ in 0..rounds {
        for seat in order.iter().copied() {
            let packet: Vec<Card> = cards.by_ref().take(players.initial_packet()).collect();
            hands[seat.index()].receive(&packet, None);
        }
    }

    let indicator = cards
        .next()
        .ok_or_else(|| InvariantViolation::DeckIntegrity("no card left for the indicator".into()))?;
    let talon: Vec<Card> = cards.collect();

    event!(
        target: "ulti_core::deal",
        Level::DEBUG,
        players = players.seats(),
        dealer = %dealer,
        indicator = %indicator,
        talon = talon.len(),
        "initial deal"
    );

    Ok(Deal {
        players,
        dealer,
        hands,
        indicator,
        talon,
    })
}

/// Active seats in dealing order: the seat after the dealer receives first.
fn deal_order(players: PlayerCount, dealer: Seat) -> Vec<Seat> {
    let active = players.active_seats(dealer);
    let mut order = Vec::with_capacity(active.len());
    let mut seat = dealer.next(players);
    for _ in 0..players.seats() {
        if active.contains(&seat) {
            order.push(seat);
        }
        seat = seat.next(players);
    }
    order
}

impl Deal {
    pub fn players(&self) -> PlayerCount {
        self.players
    }

    pub fn dealer(&self) -> Seat {
        self.dealer
    }

    pub fn hand(&self, seat: Seat) -> &Hand {
        &self.hands[seat.index()]
    }

    pub fn hand_mut(&mut self, seat: Seat) -> &mut Hand {
        &mut self.hands[seat.index()]
    }

    pub fn indicator(&self) -> Card {
        self.indicator
    }

    pub fn talon(&self) -> &[Card] {
        &self.talon
    }

    /// Bottom of the talon, revealed before the Betli question.
    pub fn talon_preview(&self) -> &[Card] {
        let start = self.talon.len().saturating_sub(TALON_PREVIEW);
        &self.talon[start..]
    }

    /// Hands, talon and indicator must together be the full deck.
    pub fn verify_partition(&self) -> Result<(), InvariantViolation> {
        let mut all: Vec<Card> = self
            .hands
            .iter()
            .flat_map(|hand| hand.cards().iter().copied())
            .collect();
        all.push(self.indicator);
        all.extend_from_slice(&self.talon);
        verify_complete(&all)
    }

    /// Deals the post-bid packets from the top of the talon and re-sorts each touched hand
    /// against `trump`.
    pub fn remainder_deal(&mut self, trump: Option<Suit>) -> Result<(), EngineError> {
        let order = deal_order(self.players, self.dealer);
        let per_seat = self.players.remainder_cards();
        let needed = per_seat * order.len();
        if self.talon.len() < needed {
            return Err(EngineError::TalonExhausted {
                needed,
                available: self.talon.len(),
            });
        }

        let drawn: Vec<Card> = self.talon.drain(..needed).collect();
        for (seat, packet) in order.iter().zip(drawn.chunks(per_seat)) {
            self.hands[seat.index()].receive(packet, trump);
        }

        event!(
            target: "ulti_core::deal",
            Level::DEBUG,
            dealt = needed,
            talon_left = self.talon.len(),
            "remainder deal"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Deal, deal_with_seed, initial_deal};
    use crate::game::error::{ConfigurationError, EngineError};
    use crate::model::card::Card;
    use crate::model::deck::Deck;
    use crate::model::player::{PlayerCount, Seat};
    use crate::model::rank::Rank;
    use crate::model::suit::Suit;
    use std::collections::HashSet;

    fn dealt_cards(deal: &Deal) -> Vec<Card> {
        let mut all: Vec<Card> = Seat::LOOP
            .iter()
            .flat_map(|&seat| deal.hand(seat).cards().to_vec())
            .collect();
        all.push(deal.indicator());
        all.extend_from_slice(deal.talon());
        all
    }

    #[test]
    fn two_player_layout() {
        let deal = deal_with_seed(2, Seat::First, 7).unwrap();
        assert_eq!(deal.hand(Seat::First).len(), 8);
        assert_eq!(deal.hand(Seat::Second).len(), 8);
        assert_eq!(deal.talon().len(), 15);
        assert!(deal.verify_partition().is_ok());
    }

    #[test]
    fn three_and_four_player_layouts() {
        let three = deal_with_seed(3, Seat::First, 7).unwrap();
        for seat in [Seat::First, Seat::Second, Seat::Third] {
            assert_eq!(three.hand(seat).len(), 6);
        }
        assert_eq!(three.talon().len(), 13);

        let four = deal_with_seed(4, Seat::Second, 7).unwrap();
        assert_eq!(four.hand(Seat::Second).len(), 0, "dealer sits out");
        for seat in [Seat::First, Seat::Third, Seat::Fourth] {
            assert_eq!(four.hand(seat).len(), 6);
        }
        assert_eq!(four.talon().len(), 13);
    }

    #[test]
    fn deck_integrity_holds_for_many_seeds_and_table_sizes() {
        for players in 2..=4 {
            for seed in 0..50u64 {
                let deal = deal_with_seed(players, Seat::First, seed).unwrap();
                let all = dealt_cards(&deal);
                assert_eq!(all.len(), 32);
                let unique: HashSet<Card> = all.iter().copied().collect();
                assert_eq!(unique.len(), 32);
                for suit in Suit::ALL {
                    assert_eq!(all.iter().filter(|c| c.suit == suit).count(), 8);
                }
                for rank in Rank::ORDERED {
                    assert_eq!(all.iter().filter(|c| c.rank == rank).count(), 4);
                }
            }
        }
    }

    #[test]
    fn invalid_player_count_is_a_configuration_error() {
        assert_eq!(
            deal_with_seed(5, Seat::First, 1),
            Err(EngineError::Configuration(ConfigurationError::PlayerCount(5)))
        );
        assert_eq!(
            deal_with_seed(0, Seat::First, 1),
            Err(EngineError::Configuration(ConfigurationError::PlayerCount(0)))
        );
    }

    #[test]
    fn non_dealer_receives_first_packet() {
        let deck = Deck::standard();
        let first_four: Vec<Card> = deck.cards()[..4].to_vec();
        let deal = initial_deal(PlayerCount::Two, Seat::First, deck).unwrap();
        for card in first_four {
            assert!(deal.hand(Seat::Second).contains(card));
        }
        assert_eq!(deal.indicator(), Deck::standard().cards()[16]);
    }

    #[test]
    fn remainder_deal_brings_hands_to_twelve() {
        let mut deal = deal_with_seed(2, Seat::Second, 11).unwrap();
        deal.remainder_deal(Some(Suit::Hearts)).unwrap();
        assert_eq!(deal.hand(Seat::First).len(), 12);
        assert_eq!(deal.hand(Seat::Second).len(), 12);
        assert_eq!(deal.talon().len(), 7);
    }

    #[test]
    fn remainder_deal_gives_three_each_at_three_seats() {
        let mut deal = deal_with_seed(3, Seat::Second, 11).unwrap();
        deal.remainder_deal(None).unwrap();
        for seat in [Seat::First, Seat::Second, Seat::Third] {
            assert_eq!(deal.hand(seat).len(), 9);
        }
        assert_eq!(deal.talon().len(), 4);
    }

    #[test]
    fn second_remainder_deal_exhausts_the_talon() {
        let mut deal = deal_with_seed(2, Seat::First, 3).unwrap();
        deal.remainder_deal(None).unwrap();
        assert_eq!(
            deal.remainder_deal(None),
            Err(EngineError::TalonExhausted {
                needed: 8,
                available: 7
            })
        );
    }

    #[test]
    fn talon_preview_is_the_bottom_four() {
        let deal = deal_with_seed(2, Seat::First, 5).unwrap();
        let talon = deal.talon();
        assert_eq!(deal.talon_preview(), &talon[talon.len() - 4..]);
    }
}
