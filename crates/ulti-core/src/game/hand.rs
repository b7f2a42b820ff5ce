//! One hand as an explicit state machine: the owner asks [`HandState::pending`] for the
//! next decision, obtains an answer from the seat on turn and feeds it to
//! [`HandState::apply`].

use crate::game::bidding::{BidChoice, BidStep, Bidding};
use crate::game::bonus::{
    BonusAnnouncement, BonusType, BonusWindow, HandFacts, Settlement, available_bonuses, settle,
    validate_announcements,
};
use crate::game::collaborator::DecisionContext;
use crate::game::deal::{Deal, initial_deal};
use crate::game::error::{DecisionKind, EngineError, IllegalMove, InvariantViolation};
use crate::game::events::{GameEvent, GameLog, SeatCards};
use crate::game::melds::{MeldContest, resolve_melds};
use crate::game::tricks::{CompletedTrick, legal_cards, winning_play};
use crate::model::card::Card;
use crate::model::contract::{Contract, GameType};
use crate::model::deck::Deck;
use crate::model::points::LAST_TRICK_POINTS;
use crate::model::player::{PlayerCount, Seat};
use crate::model::score::Score;
use crate::model::suit::Suit;
use crate::model::trick::Trick;
use serde::{Deserialize, Serialize};
use tracing::{Level, event};

/// Tricks in a two-seat hand: 8 initial cards plus 4 from the remainder deal.
pub const TRICKS_PER_HAND: usize = 12;

const SEATS: [Seat; 2] = [Seat::First, Seat::Second];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HandPhase {
    Bidding,
    Announcing(BonusWindow),
    Playing,
    Finished,
}

/// The decision the engine is waiting for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Bid {
        seat: Seat,
        options: Vec<BidChoice>,
    },
    Announce {
        seat: Seat,
        window: BonusWindow,
        options: Vec<BonusType>,
    },
    Play {
        seat: Seat,
        legal: Vec<Card>,
    },
}

impl Decision {
    pub fn seat(&self) -> Seat {
        match self {
            Decision::Bid { seat, .. }
            | Decision::Announce { seat, .. }
            | Decision::Play { seat, .. } => *seat,
        }
    }

    pub fn kind(&self) -> DecisionKind {
        match self {
            Decision::Bid { .. } => DecisionKind::Bid,
            Decision::Announce { .. } => DecisionKind::Announcement,
            Decision::Play { .. } => DecisionKind::Card,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    Bid(BidChoice),
    Announce(Vec<BonusType>),
    Play(Card),
}

impl Answer {
    pub fn kind(&self) -> DecisionKind {
        match self {
            Answer::Bid(_) => DecisionKind::Bid,
            Answer::Announce(_) => DecisionKind::Announcement,
            Answer::Play(_) => DecisionKind::Card,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HandOutcome {
    /// Trump or No-Trump: the sole seat with the most game points.
    Points { winner: Option<Seat> },
    /// The taker makes Betli by taking no trick at all.
    Betli { taker: Seat, made: bool },
    /// Fewest tricks wins.
    Klopitzky { winner: Option<Seat> },
}

impl HandOutcome {
    pub fn winner(&self) -> Option<Seat> {
        match *self {
            HandOutcome::Points { winner } | HandOutcome::Klopitzky { winner } => winner,
            HandOutcome::Betli { taker, made } => Some(if made { taker } else { taker.other() }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandResult {
    pub hand_number: u32,
    pub contract: Contract,
    pub scores: [Score; 2],
    pub tricks_won: [usize; 2],
    pub melds: MeldContest,
    pub settlement: Option<Settlement>,
    pub outcome: HandOutcome,
}

impl HandResult {
    /// Points carried into match totals. Only point games move the scoreboard.
    pub fn match_points(&self, seat: Seat) -> i64 {
        if self.contract.game_type().is_point_game() {
            self.scores[seat.index()].total()
        } else {
            0
        }
    }
}

#[derive(Debug, Clone)]
pub struct HandState {
    hand_number: u32,
    deal: Deal,
    bidding: Bidding,
    contract: Option<Contract>,
    phase: HandPhase,
    announce_queue: Vec<Seat>,
    announcements: Vec<BonusAnnouncement>,
    melds: MeldContest,
    current_trick: Trick,
    history: Vec<CompletedTrick>,
    scores: [Score; 2],
    result: Option<HandResult>,
}

impl HandState {
    /// Deals a two-seat hand from `deck` and opens bidding.
    pub fn deal(
        hand_number: u32,
        dealer: Seat,
        deck: Deck,
        log: &mut dyn GameLog,
    ) -> Result<Self, EngineError> {
        let deal = initial_deal(PlayerCount::Two, dealer, deck)?;
        deal.verify_partition()?;

        log.record(GameEvent::InitialDeal {
            hands: seat_cards(&deal),
            indicator: deal.indicator(),
            talon: deal.talon().len(),
        });

        let bidding = Bidding::new(dealer, deal.indicator());
        Ok(Self {
            hand_number,
            deal,
            bidding,
            contract: None,
            phase: HandPhase::Bidding,
            announce_queue: Vec::new(),
            announcements: Vec::new(),
            melds: MeldContest::default(),
            current_trick: Trick::new(dealer.other(), PlayerCount::Two),
            history: Vec::new(),
            scores: [Score::default(); 2],
            result: None,
        })
    }

    pub fn hand_number(&self) -> u32 {
        self.hand_number
    }

    pub fn phase(&self) -> HandPhase {
        self.phase
    }

    pub fn deal_state(&self) -> &Deal {
        &self.deal
    }

    pub fn contract(&self) -> Option<Contract> {
        self.contract
    }

    pub fn announcements(&self) -> &[BonusAnnouncement] {
        &self.announcements
    }

    pub fn melds(&self) -> &MeldContest {
        &self.melds
    }

    pub fn current_trick(&self) -> &Trick {
        &self.current_trick
    }

    pub fn trick_history(&self) -> &[CompletedTrick] {
        &self.history
    }

    pub fn result(&self) -> Option<&HandResult> {
        self.result.as_ref()
    }

    pub fn into_result(self) -> Option<HandResult> {
        self.result
    }

    fn trump(&self) -> Option<Suit> {
        self.contract.and_then(|c| c.trump_suit())
    }

    /// The next decision, or `None` once the hand is finished.
    pub fn pending(&self) -> Option<Decision> {
        match self.phase {
            HandPhase::Bidding => {
                let (seat, _) = self.bidding.pending()?;
                Some(Decision::Bid {
                    seat,
                    options: self.bidding.options(),
                })
            }
            HandPhase::Announcing(window) => {
                let seat = *self.announce_queue.first()?;
                let contract = self.contract?;
                Some(Decision::Announce {
                    seat,
                    window,
                    options: available_bonuses(seat, &contract, &self.announcements),
                })
            }
            HandPhase::Playing => {
                let seat = self.current_trick.expected_seat()?;
                Some(Decision::Play {
                    seat,
                    legal: legal_cards(self.deal.hand(seat), &self.current_trick, self.trump()),
                })
            }
            HandPhase::Finished => None,
        }
    }

    pub fn context(&self, seat: Seat) -> DecisionContext<'_> {
        let window = match self.phase {
            HandPhase::Announcing(window) => Some(window),
            _ => None,
        };
        let talon_preview: &[Card] = if self.bidding.is_betli_phase() {
            self.deal.talon_preview()
        } else {
            &[]
        };
        DecisionContext {
            seat,
            dealer: self.deal.dealer(),
            phase: self.phase,
            hand: self.deal.hand(seat),
            indicator: self.deal.indicator(),
            contract: self.contract,
            trick: matches!(self.phase, HandPhase::Playing).then_some(&self.current_trick),
            talon_preview,
            announcements: &self.announcements,
            window,
        }
    }

    /// Applies `seat`'s answer to the pending decision. An illegal answer leaves the state
    /// untouched.
    pub fn apply(
        &mut self,
        seat: Seat,
        answer: Answer,
        log: &mut dyn GameLog,
    ) -> Result<(), EngineError> {
        let pending = self.pending().ok_or(IllegalMove::NothingPending)?;
        if pending.kind() != answer.kind() {
            return Err(IllegalMove::WrongDecision {
                expected: pending.kind(),
                actual: answer.kind(),
            }
            .into());
        }
        if pending.seat() != seat {
            return Err(IllegalMove::OutOfTurn {
                expected: pending.seat(),
                actual: seat,
            }
            .into());
        }

        match (pending, answer) {
            (Decision::Bid { .. }, Answer::Bid(choice)) => self.apply_bid(seat, choice, log),
            (Decision::Announce { window, .. }, Answer::Announce(chosen)) => {
                self.apply_announcements(seat, window, chosen, log)
            }
            (Decision::Play { legal, .. }, Answer::Play(card)) => {
                if !legal.contains(&card) {
                    return Err(IllegalMove::Card { seat, card }.into());
                }
                self.apply_play(seat, card, log)
            }
            _ => Err(InvariantViolation::Turn("decision and answer kinds diverged".into()).into()),
        }
    }

    fn apply_bid(
        &mut self,
        seat: Seat,
        choice: BidChoice,
        log: &mut dyn GameLog,
    ) -> Result<(), EngineError> {
        let BidStep::Resolved(contract) = self.bidding.answer(seat, choice)? else {
            return Ok(());
        };
        self.fix_contract(contract)?;
        log.record(GameEvent::BiddingResolved { contract });

        if contract.game_type().is_point_game() {
            self.open_window(BonusWindow::Back, contract);
            Ok(())
        } else {
            self.remainder_deal(log)?;
            self.start_play(log)
        }
    }

    fn fix_contract(&mut self, contract: Contract) -> Result<(), InvariantViolation> {
        if let Some(existing) = self.contract {
            return Err(InvariantViolation::TrumpReassigned {
                existing: existing.trump_suit(),
                attempted: contract.trump_suit(),
            });
        }
        self.contract = Some(contract);
        Ok(())
    }

    fn open_window(&mut self, window: BonusWindow, contract: Contract) {
        let first = contract.taker().unwrap_or(self.deal.dealer().other());
        self.announce_queue = vec![first, first.other()];
        self.phase = HandPhase::Announcing(window);
    }

    fn apply_announcements(
        &mut self,
        seat: Seat,
        window: BonusWindow,
        chosen: Vec<BonusType>,
        log: &mut dyn GameLog,
    ) -> Result<(), EngineError> {
        let contract = self
            .contract
            .ok_or_else(|| InvariantViolation::Turn("announcing without a contract".into()))?;
        validate_announcements(seat, window, &contract, &self.announcements, &chosen)?;
        if !self.history.is_empty() {
            return Err(InvariantViolation::AnnouncementsSealed.into());
        }

        for bonus in chosen {
            let announcement = BonusAnnouncement {
                owner: seat,
                bonus,
                window,
            };
            event!(
                target: "ulti_core::hand",
                Level::DEBUG,
                seat = %seat,
                bonus = %bonus,
                window = ?window,
                "bonus announced"
            );
            self.announcements.push(announcement);
            log.record(GameEvent::BonusAnnounced { announcement });
        }

        self.announce_queue.remove(0);
        if !self.announce_queue.is_empty() {
            return Ok(());
        }

        match window {
            BonusWindow::Back => {
                self.remainder_deal(log)?;
                self.open_window(BonusWindow::Front, contract);
                Ok(())
            }
            BonusWindow::Front => self.start_play(log),
        }
    }

    fn remainder_deal(&mut self, log: &mut dyn GameLog) -> Result<(), EngineError> {
        self.deal.remainder_deal(self.trump())?;
        log.record(GameEvent::RemainderDeal {
            hands: seat_cards(&self.deal),
            talon_left: self.deal.talon().len(),
        });
        Ok(())
    }

    fn start_play(&mut self, log: &mut dyn GameLog) -> Result<(), EngineError> {
        let contract = self
            .contract
            .ok_or_else(|| InvariantViolation::Turn("play started without a contract".into()))?;

        if contract.game_type().is_point_game() {
            let holdings: Vec<(Seat, Vec<Card>)> = SEATS
                .iter()
                .map(|&seat| (seat, self.deal.hand(seat).cards().to_vec()))
                .collect();
            self.melds = resolve_melds(&holdings);
            for seat in SEATS {
                self.scores[seat.index()].set_meld_points(self.melds.points_for(seat))?;
            }
            log.record(GameEvent::MeldsResolved {
                contest: self.melds.clone(),
            });
        }

        event!(
            target: "ulti_core::hand",
            Level::DEBUG,
            hand = self.hand_number,
            contract = %contract,
            announcements = self.announcements.len(),
            "trick play starts"
        );
        self.current_trick = Trick::new(self.deal.dealer().other(), PlayerCount::Two);
        self.phase = HandPhase::Playing;
        Ok(())
    }

    fn apply_play(
        &mut self,
        seat: Seat,
        card: Card,
        log: &mut dyn GameLog,
    ) -> Result<(), EngineError> {
        if !self.deal.hand_mut(seat).remove(card) {
            return Err(IllegalMove::Card { seat, card }.into());
        }
        self.current_trick
            .play(seat, card)
            .map_err(|err| InvariantViolation::Turn(err.to_string()))?;

        if !self.current_trick.is_complete() {
            return Ok(());
        }

        let best = winning_play(&self.current_trick, self.trump())
            .ok_or_else(|| InvariantViolation::Turn("complete trick without a winner".into()))?;
        let finished = std::mem::replace(
            &mut self.current_trick,
            Trick::new(best.seat, PlayerCount::Two),
        );
        log.record(GameEvent::TrickCompleted {
            number: self.history.len() + 1,
            leader: finished.leader(),
            plays: finished.plays().to_vec(),
            winner: best.seat,
        });
        self.history.push(CompletedTrick {
            trick: finished,
            winner: best.seat,
            winning_card: best.card,
        });

        if SEATS.iter().all(|&s| self.deal.hand(s).is_empty()) {
            self.finish(log)?;
        }
        Ok(())
    }

    fn won_cards(&self, seat: Seat) -> impl Iterator<Item = Card> + '_ {
        self.history
            .iter()
            .filter(move |t| t.winner == seat)
            .flat_map(|t| t.trick.cards())
    }

    fn finish(&mut self, log: &mut dyn GameLog) -> Result<(), EngineError> {
        if self.history.len() != TRICKS_PER_HAND {
            return Err(InvariantViolation::TrickCount {
                played: self.history.len(),
                expected: TRICKS_PER_HAND,
            }
            .into());
        }
        let contract = self
            .contract
            .ok_or_else(|| InvariantViolation::Turn("hand finished without a contract".into()))?;
        let trump = self.trump();
        let last_winner = self.history.last().map(|t| t.winner);

        let mut card_points = [0u32; 2];
        let mut tricks_won = [0usize; 2];
        for seat in SEATS {
            let mut points: u32 = self.won_cards(seat).map(|c| c.point_value(trump)).sum();
            if last_winner == Some(seat) {
                points += LAST_TRICK_POINTS;
            }
            card_points[seat.index()] = points;
            tricks_won[seat.index()] = self.history.iter().filter(|t| t.winner == seat).count();
            self.scores[seat.index()].set_card_points(points)?;
        }

        let settlement = if contract.game_type().is_point_game() {
            let facts = HandFacts {
                contract,
                tricks: &self.history,
                card_points,
                game_points: [
                    self.scores[0].game_points(),
                    self.scores[1].game_points(),
                ],
            };
            let settlement = settle(&self.announcements, &facts);
            for seat in SEATS {
                self.scores[seat.index()].set_bonus_points(settlement.totals[seat.index()])?;
            }
            Some(settlement)
        } else {
            None
        };

        let outcome = match contract.game_type() {
            GameType::Trump | GameType::NoTrump => HandOutcome::Points {
                winner: sole_max(self.scores[0].game_points(), self.scores[1].game_points()),
            },
            GameType::Betli => {
                let taker = contract
                    .taker()
                    .ok_or_else(|| InvariantViolation::Turn("betli without a taker".into()))?;
                HandOutcome::Betli {
                    taker,
                    made: tricks_won[taker.index()] == 0,
                }
            }
            // Arguments swapped: the seat with fewer tricks wins.
            GameType::Klopitzky => HandOutcome::Klopitzky {
                winner: sole_max(tricks_won[1], tricks_won[0]),
            },
        };

        let result = HandResult {
            hand_number: self.hand_number,
            contract,
            scores: self.scores,
            tricks_won,
            melds: self.melds.clone(),
            settlement,
            outcome,
        };
        event!(
            target: "ulti_core::hand",
            Level::DEBUG,
            hand = self.hand_number,
            winner = ?outcome.winner(),
            first = result.scores[0].total(),
            second = result.scores[1].total(),
            "hand finished"
        );
        log.record(GameEvent::HandEnded {
            result: result.clone(),
        });
        self.result = Some(result);
        self.phase = HandPhase::Finished;
        Ok(())
    }
}

/// `Seat::First` if `first` is strictly larger, `Seat::Second` if `second` is, else none.
fn sole_max<T: Ord>(first: T, second: T) -> Option<Seat> {
    match first.cmp(&second) {
        std::cmp::Ordering::Greater => Some(Seat::First),
        std::cmp::Ordering::Less => Some(Seat::Second),
        std::cmp::Ordering::Equal => None,
    }
}

fn seat_cards(deal: &Deal) -> Vec<SeatCards> {
    SEATS
        .iter()
        .map(|&seat| SeatCards {
            seat,
            cards: deal.hand(seat).cards().to_vec(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{Answer, Decision, HandOutcome, HandPhase, HandState, TRICKS_PER_HAND};
    use crate::game::bidding::{BidChoice, BidOffer};
    use crate::game::bonus::BonusWindow;
    use crate::game::error::{DecisionKind, EngineError, IllegalMove};
    use crate::game::events::GameEvent;
    use crate::game::melds::MeldContest;
    use crate::model::contract::GameType;
    use crate::model::deck::Deck;
    use crate::model::player::Seat;

    fn answer_for(decision: &Decision, accept: &dyn Fn(BidOffer) -> bool) -> Answer {
        match decision {
            Decision::Bid { options, .. } => Answer::Bid(
                options
                    .iter()
                    .copied()
                    .find(|choice| matches!(choice, BidChoice::Accept(offer) if accept(*offer)))
                    .unwrap_or(BidChoice::Pass),
            ),
            Decision::Announce { .. } => Answer::Announce(Vec::new()),
            Decision::Play { legal, .. } => Answer::Play(legal[0]),
        }
    }

    fn play_out(
        seed: u64,
        dealer: Seat,
        accept: &dyn Fn(BidOffer) -> bool,
        log: &mut Vec<GameEvent>,
    ) -> HandState {
        let mut state = HandState::deal(1, dealer, Deck::shuffled_with_seed(seed), log).unwrap();
        while let Some(decision) = state.pending() {
            let answer = answer_for(&decision, accept);
            state.apply(decision.seat(), answer, log).unwrap();
        }
        state
    }

    fn advance_to_play(state: &mut HandState, log: &mut Vec<GameEvent>) {
        while let Some(decision) = state.pending() {
            if matches!(decision, Decision::Play { .. }) {
                return;
            }
            let answer = answer_for(&decision, &|_| true);
            state.apply(decision.seat(), answer, log).unwrap();
        }
    }

    #[test]
    fn all_passes_play_klopitzky_without_melds() {
        let mut log = Vec::new();
        let state = play_out(5, Seat::First, &|_| false, &mut log);
        let result = state.result().unwrap();

        assert_eq!(result.contract.game_type(), GameType::Klopitzky);
        assert_eq!(result.tricks_won[0] + result.tricks_won[1], TRICKS_PER_HAND);
        assert_eq!(result.melds, MeldContest::default());
        assert!(result.settlement.is_none());
        assert_eq!(result.match_points(Seat::First), 0);
        assert_eq!(result.match_points(Seat::Second), 0);
        assert!(!log.iter().any(|e| matches!(e, GameEvent::MeldsResolved { .. })));
        let expected = if result.tricks_won[0] < result.tricks_won[1] {
            Some(Seat::First)
        } else if result.tricks_won[1] < result.tricks_won[0] {
            Some(Seat::Second)
        } else {
            None
        };
        assert_eq!(result.outcome, HandOutcome::Klopitzky { winner: expected });
    }

    #[test]
    fn betli_hand_skips_melds_and_settlement() {
        for seed in 0..10 {
            let mut log = Vec::new();
            let state = play_out(seed, Seat::First, &|o| o == BidOffer::Betli, &mut log);
            let result = state.result().unwrap();

            assert_eq!(result.contract.game_type(), GameType::Betli);
            assert_eq!(result.contract.taker(), Some(Seat::Second));
            assert_eq!(result.melds, MeldContest::default());
            assert!(result.settlement.is_none());
            for score in &result.scores {
                assert_eq!(score.meld_points(), 0);
                assert_eq!(score.bonus_points(), 0);
            }
            assert!(log.iter().all(|e| !matches!(
                e,
                GameEvent::MeldsResolved { .. } | GameEvent::BonusAnnounced { .. }
            )));
            let made = result.tricks_won[Seat::Second.index()] == 0;
            assert_eq!(
                result.outcome,
                HandOutcome::Betli {
                    taker: Seat::Second,
                    made
                }
            );
        }
    }

    #[test]
    fn talon_preview_is_visible_only_for_the_betli_question() {
        let mut log = Vec::new();
        let mut state = HandState::deal(1, Seat::Second, Deck::shuffled_with_seed(9), &mut log).unwrap();
        assert!(state.context(Seat::First).talon_preview.is_empty());

        while let Some(Decision::Bid { seat, options }) = state.pending() {
            if options.contains(&BidChoice::Accept(BidOffer::Betli)) {
                let ctx = state.context(seat);
                assert_eq!(ctx.talon_preview, state.deal_state().talon_preview());
                assert_eq!(ctx.talon_preview.len(), 4);
                return;
            }
            state.apply(seat, Answer::Bid(BidChoice::Pass), &mut log).unwrap();
        }
        panic!("betli was never offered");
    }

    #[test]
    fn trump_contract_opens_both_windows_around_remainder_deal() {
        let mut log = Vec::new();
        let mut state = HandState::deal(1, Seat::First, Deck::shuffled_with_seed(21), &mut log).unwrap();
        let seat = state.pending().unwrap().seat();
        assert_eq!(seat, Seat::Second);
        let offer = state.context(seat).indicator.suit;
        state
            .apply(seat, Answer::Bid(BidChoice::Accept(BidOffer::Indicator(offer))), &mut log)
            .unwrap();

        assert_eq!(state.phase(), HandPhase::Announcing(BonusWindow::Back));
        assert_eq!(state.pending().unwrap().seat(), Seat::Second);
        assert_eq!(state.deal_state().hand(Seat::First).len(), 8);

        state.apply(Seat::Second, Answer::Announce(Vec::new()), &mut log).unwrap();
        state.apply(Seat::First, Answer::Announce(Vec::new()), &mut log).unwrap();
        assert_eq!(state.phase(), HandPhase::Announcing(BonusWindow::Front));
        assert_eq!(state.deal_state().hand(Seat::First).len(), 12);
        assert_eq!(state.deal_state().hand(Seat::Second).len(), 12);

        state.apply(Seat::Second, Answer::Announce(Vec::new()), &mut log).unwrap();
        state.apply(Seat::First, Answer::Announce(Vec::new()), &mut log).unwrap();
        assert_eq!(state.phase(), HandPhase::Playing);
        assert_eq!(state.current_trick().leader(), Seat::Second);
        assert!(log.iter().any(|e| matches!(e, GameEvent::MeldsResolved { .. })));
    }

    #[test]
    fn illegal_card_is_rejected_and_state_kept() {
        let mut log = Vec::new();
        let mut state = HandState::deal(1, Seat::First, Deck::shuffled_with_seed(3), &mut log).unwrap();
        advance_to_play(&mut state, &mut log);

        let before = state.pending().unwrap();
        let seat = before.seat();
        let foreign = state.deal_state().hand(seat.other()).cards()[0];
        let err = state.apply(seat, Answer::Play(foreign), &mut log).unwrap_err();

        assert_eq!(err, EngineError::IllegalMove(IllegalMove::Card { seat, card: foreign }));
        assert!(err.is_recoverable());
        assert_eq!(state.pending(), Some(before));
        assert!(state.current_trick().is_empty());
    }

    #[test]
    fn wrong_seat_and_wrong_kind_are_illegal_moves() {
        let mut log = Vec::new();
        let mut state = HandState::deal(1, Seat::First, Deck::shuffled_with_seed(8), &mut log).unwrap();

        let err = state
            .apply(Seat::First, Answer::Bid(BidChoice::Pass), &mut log)
            .unwrap_err();
        assert_eq!(
            err,
            EngineError::IllegalMove(IllegalMove::OutOfTurn {
                expected: Seat::Second,
                actual: Seat::First,
            })
        );

        let card = state.deal_state().hand(Seat::Second).cards()[0];
        let err = state.apply(Seat::Second, Answer::Play(card), &mut log).unwrap_err();
        assert_eq!(
            err,
            EngineError::IllegalMove(IllegalMove::WrongDecision {
                expected: DecisionKind::Bid,
                actual: DecisionKind::Card,
            })
        );
    }

    #[test]
    fn finished_hand_accepts_nothing() {
        let mut log = Vec::new();
        let mut state = play_out(11, Seat::Second, &|_| true, &mut log);
        assert_eq!(state.phase(), HandPhase::Finished);
        let err = state
            .apply(Seat::First, Answer::Announce(Vec::new()), &mut log)
            .unwrap_err();
        assert_eq!(err, EngineError::IllegalMove(IllegalMove::NothingPending));
    }

    #[test]
    fn card_points_count_won_cards_plus_last_trick() {
        let mut log = Vec::new();
        let state = play_out(17, Seat::First, &|_| true, &mut log);
        let result = state.result().unwrap();
        let trump = result.contract.trump_suit();

        let played: u32 = state
            .trick_history()
            .iter()
            .flat_map(|t| t.trick.cards())
            .map(|c| c.point_value(trump))
            .sum();
        let counted = result.scores[0].card_points() + result.scores[1].card_points();
        assert_eq!(counted, played + 10);
        assert_eq!(state.trick_history().len(), TRICKS_PER_HAND);
    }
}
