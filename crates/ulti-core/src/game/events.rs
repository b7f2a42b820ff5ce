//! Append-only game log. The engine writes records; it never reads them back.

use crate::game::bonus::BonusAnnouncement;
use crate::game::error::DecisionKind;
use crate::game::hand::HandResult;
use crate::game::melds::MeldContest;
use crate::model::card::Card;
use crate::model::contract::Contract;
use crate::model::player::Seat;
use crate::model::trick::Play;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatCards {
    pub seat: Seat,
    pub cards: Vec<Card>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    HandStarted {
        hand_number: u32,
        dealer: Seat,
        seed: Option<u64>,
    },
    InitialDeal {
        hands: Vec<SeatCards>,
        indicator: Card,
        talon: usize,
    },
    BiddingResolved {
        contract: Contract,
    },
    BonusAnnounced {
        announcement: BonusAnnouncement,
    },
    RemainderDeal {
        hands: Vec<SeatCards>,
        talon_left: usize,
    },
    MeldsResolved {
        contest: MeldContest,
    },
    TrickCompleted {
        number: usize,
        leader: Seat,
        plays: Vec<Play>,
        winner: Seat,
    },
    DecisionRejected {
        seat: Seat,
        kind: DecisionKind,
        attempt: u32,
        reason: String,
    },
    HandEnded {
        result: HandResult,
    },
}

impl GameEvent {
    pub fn name(&self) -> &'static str {
        match self {
            GameEvent::HandStarted { .. } => "hand_started",
            GameEvent::InitialDeal { .. } => "initial_deal",
            GameEvent::BiddingResolved { .. } => "bidding_resolved",
            GameEvent::BonusAnnounced { .. } => "bonus_announced",
            GameEvent::RemainderDeal { .. } => "remainder_deal",
            GameEvent::MeldsResolved { .. } => "melds_resolved",
            GameEvent::TrickCompleted { .. } => "trick_completed",
            GameEvent::DecisionRejected { .. } => "decision_rejected",
            GameEvent::HandEnded { .. } => "hand_ended",
        }
    }
}

/// Sink for game events.
pub trait GameLog {
    fn record(&mut self, event: GameEvent);
}

impl GameLog for Vec<GameEvent> {
    fn record(&mut self, event: GameEvent) {
        self.push(event);
    }
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullLog;

impl GameLog for NullLog {
    fn record(&mut self, _event: GameEvent) {}
}
