use crate::model::card::Card;
use crate::model::player::{PlayerCount, Seat};
use crate::model::suit::Suit;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trick {
    leader: Seat,
    players: PlayerCount,
    plays: Vec<Play>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Play {
    pub seat: Seat,
    pub card: Card,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrickError {
    #[error("trick already complete")]
    TrickComplete,
    #[error("expected {expected} to play next but got {actual}")]
    OutOfTurn { expected: Seat, actual: Seat },
}

impl Trick {
    pub fn new(leader: Seat, players: PlayerCount) -> Self {
        Self {
            leader,
            players,
            plays: Vec::with_capacity(players.seats()),
        }
    }

    pub fn leader(&self) -> Seat {
        self.leader
    }

    pub fn plays(&self) -> &[Play] {
        &self.plays
    }

    pub fn is_empty(&self) -> bool {
        self.plays.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.plays.len() == self.players.seats()
    }

    pub fn led_suit(&self) -> Option<Suit> {
        self.plays.first().map(|play| play.card.suit)
    }

    pub fn cards(&self) -> impl Iterator<Item = Card> + '_ {
        self.plays.iter().map(|play| play.card)
    }

    pub fn card_of(&self, seat: Seat) -> Option<Card> {
        self.plays
            .iter()
            .find(|play| play.seat == seat)
            .map(|play| play.card)
    }

    pub fn expected_seat(&self) -> Option<Seat> {
        if self.is_complete() {
            return None;
        }
        Some(
            self.plays
                .last()
                .map(|play| play.seat.next(self.players))
                .unwrap_or(self.leader),
        )
    }

    pub fn play(&mut self, seat: Seat, card: Card) -> Result<(), TrickError> {
        let expected = self.expected_seat().ok_or(TrickError::TrickComplete)?;
        if expected != seat {
            return Err(TrickError::OutOfTurn {
                expected,
                actual: seat,
            });
        }
        self.plays.push(Play { seat, card });
        Ok(())
    }
}
