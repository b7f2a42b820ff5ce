use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use ulti_core::game::bidding::{BidChoice, BidOffer};
use ulti_core::game::bonus::BonusType;
use ulti_core::game::collaborator::{Collaborator, DecisionContext, ScriptedCollaborator};
use ulti_core::game::error::{DecisionKind, EngineError, IllegalMove};
use ulti_core::game::events::GameEvent;
use ulti_core::game::match_state::MatchState;
use ulti_core::game::orchestrator::{Orchestrator, OrchestratorConfig};
use ulti_core::game::serialization::MatchSnapshot;
use ulti_core::model::card::Card;
use ulti_core::model::contract::GameType;
use ulti_core::model::deck::Deck;
use ulti_core::model::player::Seat;
use ulti_core::model::suit::Suit;

/// Accepts the first offer and plays a seeded random legal card.
struct Wanderer {
    rng: StdRng,
}

impl Wanderer {
    fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Collaborator for Wanderer {
    fn choose_bid(&mut self, options: &[BidChoice], _ctx: &DecisionContext<'_>) -> BidChoice {
        options[0]
    }

    fn choose_bonus_announcements(
        &mut self,
        options: &[BonusType],
        _ctx: &DecisionContext<'_>,
    ) -> Vec<BonusType> {
        options.iter().copied().take(1).collect()
    }

    fn choose_card(&mut self, legal: &[Card], _ctx: &DecisionContext<'_>) -> Card {
        *legal.choose(&mut self.rng).unwrap()
    }
}

/// Offers a card it does not hold once, then behaves.
struct Fumbler {
    fumbled: bool,
}

impl Collaborator for Fumbler {
    fn choose_bid(&mut self, _options: &[BidChoice], _ctx: &DecisionContext<'_>) -> BidChoice {
        BidChoice::Pass
    }

    fn choose_bonus_announcements(
        &mut self,
        _options: &[BonusType],
        _ctx: &DecisionContext<'_>,
    ) -> Vec<BonusType> {
        Vec::new()
    }

    fn choose_card(&mut self, legal: &[Card], ctx: &DecisionContext<'_>) -> Card {
        if !self.fumbled {
            self.fumbled = true;
            if let Some(card) = Deck::standard()
                .cards()
                .iter()
                .copied()
                .find(|c| !ctx.hand.contains(*c))
            {
                return card;
            }
        }
        legal[0]
    }
}

fn config(max_attempts: u32) -> OrchestratorConfig {
    OrchestratorConfig {
        players: 2,
        max_attempts,
    }
}

fn wanderers(seed: u64) -> Orchestrator {
    Orchestrator::new(
        config(1),
        [Box::new(Wanderer::new(seed)), Box::new(Wanderer::new(seed ^ 0xFF))],
    )
    .unwrap()
}

#[test]
fn same_seed_and_answers_replay_byte_identical() {
    let run = || {
        let mut log = Vec::new();
        let result = wanderers(44)
            .play_seeded(1, Seat::First, 2024, &mut log)
            .unwrap();
        (
            serde_json::to_string(&result).unwrap(),
            serde_json::to_string(&log).unwrap(),
        )
    };
    assert_eq!(run(), run());
}

#[test]
fn every_follow_obeys_suit_then_trump() {
    for seed in 0..40 {
        let mut log = Vec::new();
        let dealer = if seed % 2 == 0 { Seat::First } else { Seat::Second };
        wanderers(seed).play_seeded(1, dealer, seed, &mut log).unwrap();

        let mut trump: Option<Suit> = None;
        let mut hands: [Vec<Card>; 2] = [Vec::new(), Vec::new()];
        for event in &log {
            match event {
                GameEvent::BiddingResolved { contract } => trump = contract.trump_suit(),
                GameEvent::RemainderDeal { hands: dealt, .. } => {
                    for seat_cards in dealt {
                        hands[seat_cards.seat.index()] = seat_cards.cards.clone();
                    }
                }
                GameEvent::TrickCompleted { plays, .. } => {
                    let led = plays[0].card.suit;
                    let follow = plays[1];
                    let held = &hands[follow.seat.index()];
                    if held.iter().any(|c| c.suit == led) {
                        assert_eq!(follow.card.suit, led, "seed {seed}: revoke");
                    } else if let Some(trump) = trump {
                        if held.iter().any(|c| c.suit == trump) {
                            assert_eq!(follow.card.suit, trump, "seed {seed}: failed to trump");
                        }
                    }
                    for play in plays {
                        hands[play.seat.index()].retain(|c| *c != play.card);
                    }
                }
                _ => {}
            }
        }
        assert!(hands.iter().all(Vec::is_empty), "seed {seed}: cards left");
    }
}

#[test]
fn rejected_card_is_resolicited_when_attempts_remain() {
    let mut orchestrator = Orchestrator::new(
        config(2),
        [
            Box::new(ScriptedCollaborator::new()),
            Box::new(Fumbler { fumbled: false }),
        ],
    )
    .unwrap();
    let mut log = Vec::new();
    let result = orchestrator.play_seeded(1, Seat::First, 7, &mut log).unwrap();

    assert_eq!(result.contract.game_type(), GameType::Klopitzky);
    let rejections: Vec<&GameEvent> = log
        .iter()
        .filter(|e| matches!(e, GameEvent::DecisionRejected { .. }))
        .collect();
    assert_eq!(rejections.len(), 1);
    assert!(matches!(
        rejections[0],
        GameEvent::DecisionRejected {
            seat: Seat::Second,
            kind: DecisionKind::Card,
            attempt: 1,
            ..
        }
    ));
}

#[test]
fn rejected_card_aborts_without_touching_totals() {
    let mut orchestrator = Orchestrator::new(
        config(1),
        [
            Box::new(ScriptedCollaborator::new()),
            Box::new(Fumbler { fumbled: false }),
        ],
    )
    .unwrap();
    let mut state = MatchState::with_seed(Seat::First, 99);
    let mut log = Vec::new();

    let err = state.play_next(&mut orchestrator, &mut log).unwrap_err();
    assert!(matches!(err, EngineError::IllegalMove(IllegalMove::Card { seat: Seat::Second, .. })));
    assert_eq!(state.scores().standings(), &[0, 0]);
    assert_eq!(state.hand_number(), 1);
    assert_eq!(state.dealer(), Seat::First);
    assert!(!log.iter().any(|e| matches!(e, GameEvent::HandEnded { .. })));
}

#[test]
fn aborted_hand_keeps_the_shuffle_stream_in_step() {
    let mut original = MatchState::with_seed(Seat::First, 99);
    let mut fumbling = Orchestrator::new(
        config(1),
        [
            Box::new(ScriptedCollaborator::new()),
            Box::new(Fumbler { fumbled: false }),
        ],
    )
    .unwrap();
    let mut aborted = Vec::new();
    original.play_next(&mut fumbling, &mut aborted).unwrap_err();

    let mut restored = MatchSnapshot::capture(&original).restore();
    let deal_of = |state: &mut MatchState| {
        let mut log = Vec::new();
        let mut passive = Orchestrator::new(
            config(1),
            [
                Box::new(ScriptedCollaborator::new()),
                Box::new(ScriptedCollaborator::new()),
            ],
        )
        .unwrap();
        state.play_next(&mut passive, &mut log).unwrap();
        log.into_iter()
            .find(|e| matches!(e, GameEvent::InitialDeal { .. }))
            .unwrap()
    };
    let first_attempt = aborted
        .into_iter()
        .find(|e| matches!(e, GameEvent::InitialDeal { .. }))
        .unwrap();
    let retried = deal_of(&mut original);
    assert_eq!(retried, first_attempt);
    assert_eq!(deal_of(&mut restored), retried);
}

#[test]
fn match_alternates_dealer_and_accumulates_point_games() {
    let mut orchestrator = wanderers(3);
    let mut state = MatchState::with_seed(Seat::First, 555);
    let mut expected = [0i64; 2];

    for hand in 1..=4 {
        let dealer = state.dealer();
        let result = state
            .play_next(&mut orchestrator, &mut ulti_core::NullLog)
            .unwrap();
        assert_eq!(result.hand_number, hand);
        assert_eq!(state.dealer(), dealer.other());
        for seat in [Seat::First, Seat::Second] {
            expected[seat.index()] += result.match_points(seat);
        }
        assert_eq!(state.scores().standings(), &expected);
    }
}

#[test]
fn restored_snapshot_deals_the_same_next_hand() {
    let mut original = MatchState::with_seed(Seat::Second, 31337);
    let mut orchestrator = Orchestrator::new(
        config(1),
        [
            Box::new(ScriptedCollaborator::new().with_bids([BidChoice::Accept(BidOffer::NoTrump)])),
            Box::new(ScriptedCollaborator::new()),
        ],
    )
    .unwrap();
    original
        .play_next(&mut orchestrator, &mut ulti_core::NullLog)
        .unwrap();

    let json = MatchSnapshot::to_json(&original).unwrap();
    let mut restored = MatchSnapshot::from_json(&json).unwrap().restore();
    assert_eq!(restored.hand_number(), 2);
    assert_eq!(restored.scores(), original.scores());

    let deal_of = |state: &mut MatchState| {
        let mut log = Vec::new();
        let mut passive = Orchestrator::new(
            config(1),
            [
                Box::new(ScriptedCollaborator::new()),
                Box::new(ScriptedCollaborator::new()),
            ],
        )
        .unwrap();
        state.play_next(&mut passive, &mut log).unwrap();
        log.into_iter()
            .find(|e| matches!(e, GameEvent::InitialDeal { .. }))
            .unwrap()
    };
    assert_eq!(deal_of(&mut original), deal_of(&mut restored));
}
