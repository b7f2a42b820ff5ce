use crate::game::bidding::BidChoice;
use crate::game::bonus::{BonusAnnouncement, BonusType, BonusWindow};
use crate::game::hand::HandPhase;
use crate::model::card::Card;
use crate::model::contract::Contract;
use crate::model::hand::Hand;
use crate::model::player::Seat;
use crate::model::trick::Trick;
use std::collections::VecDeque;
use tracing::{Level, event};

/// What a seat can see when asked for a decision.
#[derive(Debug, Clone, Copy)]
pub struct DecisionContext<'a> {
    pub seat: Seat,
    pub dealer: Seat,
    pub phase: HandPhase,
    pub hand: &'a Hand,
    pub indicator: Card,
    pub contract: Option<Contract>,
    pub trick: Option<&'a Trick>,
    /// Bottom talon cards, shown only while the Betli question is open.
    pub talon_preview: &'a [Card],
    pub announcements: &'a [BonusAnnouncement],
    pub window: Option<BonusWindow>,
}

/// Decision-maker for one seat. Answers are taken as final; the engine validates them
/// and reports anything outside the offered options as an illegal move.
pub trait Collaborator {
    fn choose_bid(&mut self, options: &[BidChoice], ctx: &DecisionContext<'_>) -> BidChoice;

    /// An empty answer passes.
    fn choose_bonus_announcements(
        &mut self,
        options: &[BonusType],
        ctx: &DecisionContext<'_>,
    ) -> Vec<BonusType>;

    fn choose_card(&mut self, legal: &[Card], ctx: &DecisionContext<'_>) -> Card;
}

/// Replays fixed answers. Exhausted bid and announcement scripts pass; an exhausted card
/// script plays the first legal card and logs a warning for it. Scripted cards are
/// returned as written, legal or not.
#[derive(Debug, Clone, Default)]
pub struct ScriptedCollaborator {
    bids: VecDeque<BidChoice>,
    announcements: VecDeque<Vec<BonusType>>,
    cards: VecDeque<Card>,
}

impl ScriptedCollaborator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bids(mut self, bids: impl IntoIterator<Item = BidChoice>) -> Self {
        self.bids.extend(bids);
        self
    }

    pub fn with_announcements(
        mut self,
        announcements: impl IntoIterator<Item = Vec<BonusType>>,
    ) -> Self {
        self.announcements.extend(announcements);
        self
    }

    pub fn with_cards(mut self, cards: impl IntoIterator<Item = Card>) -> Self {
        self.cards.extend(cards);
        self
    }
}

impl Collaborator for ScriptedCollaborator {
    fn choose_bid(&mut self, _options: &[BidChoice], _ctx: &DecisionContext<'_>) -> BidChoice {
        self.bids.pop_front().unwrap_or(BidChoice::Pass)
    }

    fn choose_bonus_announcements(
        &mut self,
        _options: &[BonusType],
        _ctx: &DecisionContext<'_>,
    ) -> Vec<BonusType> {
        self.announcements.pop_front().unwrap_or_default()
    }

    fn choose_card(&mut self, legal: &[Card], ctx: &DecisionContext<'_>) -> Card {
        if let Some(card) = self.cards.pop_front() {
            return card;
        }
        let fallback = legal[0];
        event!(
            target: "ulti_core::collaborator",
            Level::WARN,
            seat = %ctx.seat,
            card = %fallback,
            legal = legal.len(),
            "card script exhausted, playing first legal card"
        );
        fallback
    }
}
