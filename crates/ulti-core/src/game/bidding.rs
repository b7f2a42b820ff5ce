//! Fixed-phase bidding. Each phase asks the non-dealer, then the dealer; the first
//! acceptance ends bidding, and if every phase passes the hand becomes Klopitzky.

use crate::game::error::IllegalMove;
use crate::model::card::Card;
use crate::model::contract::Contract;
use crate::model::player::Seat;
use crate::model::suit::Suit;
use core::fmt;
use serde::{Deserialize, Serialize};
use tracing::{Level, event};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BidOffer {
    /// Play with the indicator card's suit as trump.
    Indicator(Suit),
    Suit(Suit),
    NoTrump,
    Betli,
}

impl fmt::Display for BidOffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BidOffer::Indicator(suit) => write!(f, "accept indicator ({suit})"),
            BidOffer::Suit(suit) => write!(f, "{suit} trump"),
            BidOffer::NoTrump => f.write_str("no-trump"),
            BidOffer::Betli => f.write_str("betli"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BidChoice {
    Accept(BidOffer),
    Pass,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BidStep {
    Continue,
    Resolved(Contract),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bidding {
    dealer: Seat,
    offers: Vec<BidOffer>,
    phase: usize,
    dealer_to_answer: bool,
    outcome: Option<Contract>,
}

impl Bidding {
    pub fn new(dealer: Seat, indicator: Card) -> Self {
        let mut offers = Vec::with_capacity(6);
        offers.push(BidOffer::Indicator(indicator.suit));
        offers.extend(
            Suit::ALL
                .iter()
                .copied()
                .filter(|&suit| suit != indicator.suit)
                .map(BidOffer::Suit),
        );
        offers.push(BidOffer::NoTrump);
        offers.push(BidOffer::Betli);
        Self {
            dealer,
            offers,
            phase: 0,
            dealer_to_answer: false,
            outcome: None,
        }
    }

    /// Seat on turn and the offer it is being asked about.
    pub fn pending(&self) -> Option<(Seat, BidOffer)> {
        if self.outcome.is_some() {
            return None;
        }
        let offer = *self.offers.get(self.phase)?;
        Some((self.seat_on_turn(), offer))
    }

    pub fn options(&self) -> Vec<BidChoice> {
        match self.pending() {
            Some((_, offer)) => vec![BidChoice::Accept(offer), BidChoice::Pass],
            None => Vec::new(),
        }
    }

    pub fn outcome(&self) -> Option<Contract> {
        self.outcome
    }

    pub fn is_betli_phase(&self) -> bool {
        matches!(self.pending(), Some((_, BidOffer::Betli)))
    }

    pub fn answer(&mut self, seat: Seat, choice: BidChoice) -> Result<BidStep, IllegalMove> {
        let (expected, offer) = self.pending().ok_or(IllegalMove::NothingPending)?;
        if seat != expected {
            return Err(IllegalMove::OutOfTurn {
                expected,
                actual: seat,
            });
        }

        match choice {
            BidChoice::Accept(accepted) if accepted == offer => {
                let contract = match offer {
                    BidOffer::Indicator(suit) | BidOffer::Suit(suit) => Contract::trump(suit, seat),
                    BidOffer::NoTrump => Contract::no_trump(seat),
                    BidOffer::Betli => Contract::betli(seat),
                };
                Ok(self.resolve(contract))
            }
            BidChoice::Accept(_) => Err(IllegalMove::Bid { seat, choice }),
            BidChoice::Pass => {
                event!(target: "ulti_core::bidding", Level::DEBUG, seat = %seat, offer = %offer, "pass");
                if self.dealer_to_answer {
                    self.dealer_to_answer = false;
                    self.phase += 1;
                } else {
                    self.dealer_to_answer = true;
                }
                if self.phase == self.offers.len() {
                    return Ok(self.resolve(Contract::klopitzky()));
                }
                Ok(BidStep::Continue)
            }
        }
    }

    fn seat_on_turn(&self) -> Seat {
        if self.dealer_to_answer {
            self.dealer
        } else {
            self.dealer.other()
        }
    }

    fn resolve(&mut self, contract: Contract) -> BidStep {
        event!(
            target: "ulti_core::bidding",
            Level::DEBUG,
            contract = %contract,
            "bidding resolved"
        );
        self.outcome = Some(contract);
        BidStep::Resolved(contract)
    }
}
