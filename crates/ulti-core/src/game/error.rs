use crate::game::bidding::BidChoice;
use crate::game::bonus::{BonusType, BonusWindow};
use crate::model::card::Card;
use crate::model::player::Seat;
use crate::model::suit::Suit;
use core::fmt;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Setup problems detected before any game state exists.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("unsupported player count {0}; expected 2, 3 or 4")]
    PlayerCount(usize),
    #[error("hands can only be played out at a two-seat table, got {0} seats")]
    UnsupportedTable(usize),
    #[error("at least one attempt per decision is required")]
    ZeroAttempts,
}

/// Which kind of answer a pending decision expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DecisionKind {
    Bid,
    Announcement,
    Card,
}

impl fmt::Display for DecisionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DecisionKind::Bid => "bid",
            DecisionKind::Announcement => "announcement",
            DecisionKind::Card => "card",
        };
        f.write_str(label)
    }
}

/// A collaborator answered outside the legal option set of the pending decision.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IllegalMove {
    #[error("no decision is pending")]
    NothingPending,
    #[error("{expected} is on turn, {actual} answered")]
    OutOfTurn { expected: Seat, actual: Seat },
    #[error("a {expected} decision is pending, got a {actual} answer")]
    WrongDecision {
        expected: DecisionKind,
        actual: DecisionKind,
    },
    #[error("{seat} bid {choice:?}, which was not offered")]
    Bid { seat: Seat, choice: BidChoice },
    #[error("{bonus} is not available to {seat} in the {window:?} window")]
    Bonus {
        seat: Seat,
        bonus: BonusType,
        window: BonusWindow,
    },
    #[error("{seat} announced {bonus} more than once")]
    DuplicateBonus { seat: Seat, bonus: BonusType },
    #[error("{card} is not a legal play for {seat}")]
    Card { seat: Seat, card: Card },
}

/// An engine invariant failed at its checkpoint. Always a bug.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("deck integrity broken: {0}")]
    DeckIntegrity(String),
    #[error("trump suit already fixed to {existing:?}, refusing {attempted:?}")]
    TrumpReassigned {
        existing: Option<Suit>,
        attempted: Option<Suit>,
    },
    #[error("announcements are sealed once trick play starts")]
    AnnouncementsSealed,
    #[error("hand finished after {played} tricks, expected {expected}")]
    TrickCount { played: usize, expected: usize },
    #[error("score component {0} written twice")]
    ScoreRewritten(&'static str),
    #[error("turn bookkeeping broken: {0}")]
    Turn(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error(transparent)]
    IllegalMove(#[from] IllegalMove),
    #[error(transparent)]
    Invariant(#[from] InvariantViolation),
    #[error("talon holds {available} cards but {needed} are required")]
    TalonExhausted { needed: usize, available: usize },
}

impl EngineError {
    /// Only illegal answers may be re-solicited; everything else aborts the hand.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, EngineError::IllegalMove(_))
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigurationError, EngineError, IllegalMove, InvariantViolation};
    use crate::model::player::Seat;

    #[test]
    fn only_illegal_moves_are_recoverable() {
        let illegal = EngineError::from(IllegalMove::Card {
            seat: Seat::First,
            card: "7H".parse().unwrap(),
        });
        assert!(illegal.is_recoverable());
        assert!(!EngineError::from(ConfigurationError::PlayerCount(5)).is_recoverable());
        assert!(!EngineError::from(InvariantViolation::AnnouncementsSealed).is_recoverable());
        assert!(
            !EngineError::TalonExhausted {
                needed: 8,
                available: 3
            }
            .is_recoverable()
        );
    }

    #[test]
    fn messages_name_the_offender() {
        let err = IllegalMove::Card {
            seat: Seat::Second,
            card: "UH".parse().unwrap(),
        };
        assert_eq!(err.to_string(), "UH is not a legal play for Seat 2");
    }
}
