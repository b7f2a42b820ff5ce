use crate::game::error::EngineError;
use crate::game::events::GameLog;
use crate::game::hand::HandResult;
use crate::game::orchestrator::Orchestrator;
use crate::model::deck::Deck;
use crate::model::player::Seat;
use crate::model::score::ScoreBoard;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// A run of hands with alternating dealer and cumulative totals.
#[derive(Debug, Clone)]
pub struct MatchState {
    scores: ScoreBoard,
    hand_number: u32,
    dealer: Seat,
    rng: StdRng,
    seed: u64,
}

impl MatchState {
    pub fn new(dealer: Seat) -> Self {
        let seed: u64 = rand::random();
        Self::with_seed_hand(seed, 1, dealer)
    }

    pub fn with_seed(dealer: Seat, seed: u64) -> Self {
        Self::with_seed_hand(seed, 1, dealer)
    }

    /// Rebuilds the shuffle stream as it stood before `hand_number`.
    pub fn with_seed_hand(seed: u64, hand_number: u32, dealer: Seat) -> Self {
        let normalized = hand_number.max(1);
        let mut rng = StdRng::seed_from_u64(seed);
        for _ in 1..normalized {
            let _ = Deck::shuffled(&mut rng);
        }
        Self {
            scores: ScoreBoard::new(),
            hand_number: normalized,
            dealer,
            rng,
            seed,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn hand_number(&self) -> u32 {
        self.hand_number
    }

    pub fn dealer(&self) -> Seat {
        self.dealer
    }

    pub fn scores(&self) -> &ScoreBoard {
        &self.scores
    }

    pub fn scores_mut(&mut self) -> &mut ScoreBoard {
        &mut self.scores
    }

    /// Plays the next hand. Totals, hand number, dealer and the shuffle stream only
    /// move when the hand completes; an aborted hand is redealt identically.
    pub fn play_next(
        &mut self,
        orchestrator: &mut Orchestrator,
        log: &mut dyn GameLog,
    ) -> Result<HandResult, EngineError> {
        let mut rng = self.rng.clone();
        let deck = Deck::shuffled(&mut rng);
        let result = orchestrator.play_hand(self.hand_number, self.dealer, deck, None, log)?;
        self.rng = rng;
        self.record(&result);
        Ok(result)
    }

    fn record(&mut self, result: &HandResult) {
        for seat in [Seat::First, Seat::Second] {
            self.scores.add_points(seat, result.match_points(seat));
        }
        if let Some(winner) = result.outcome.winner() {
            self.scores.record_win(winner);
        }
        self.hand_number += 1;
        self.dealer = self.dealer.other();
    }
}
