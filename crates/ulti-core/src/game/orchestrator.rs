use crate::game::collaborator::Collaborator;
use crate::game::error::{ConfigurationError, EngineError, InvariantViolation};
use crate::game::events::{GameEvent, GameLog};
use crate::game::hand::{Answer, Decision, HandResult, HandState};
use crate::model::deck::Deck;
use crate::model::player::{PlayerCount, Seat};
use serde::{Deserialize, Serialize};
use tracing::{Level, event};

const DEFAULT_MAX_ATTEMPTS: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrchestratorConfig {
    pub players: usize,
    /// Answers solicited per decision before an illegal move aborts the hand.
    pub max_attempts: u32,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            players: 2,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl OrchestratorConfig {
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        let players = PlayerCount::try_from(self.players)?;
        if players != PlayerCount::Two {
            return Err(ConfigurationError::UnsupportedTable(self.players));
        }
        if self.max_attempts == 0 {
            return Err(ConfigurationError::ZeroAttempts);
        }
        Ok(())
    }
}

/// Owns the seat collaborators and drives hands from deal to settlement.
pub struct Orchestrator {
    config: OrchestratorConfig,
    seats: [Box<dyn Collaborator>; 2],
}

impl Orchestrator {
    pub fn new(
        config: OrchestratorConfig,
        seats: [Box<dyn Collaborator>; 2],
    ) -> Result<Self, ConfigurationError> {
        config.validate()?;
        Ok(Self { config, seats })
    }

    pub fn config(&self) -> &OrchestratorConfig {
        &self.config
    }

    pub fn play_seeded(
        &mut self,
        hand_number: u32,
        dealer: Seat,
        seed: u64,
        log: &mut dyn GameLog,
    ) -> Result<HandResult, EngineError> {
        self.play_hand(hand_number, dealer, Deck::shuffled_with_seed(seed), Some(seed), log)
    }

    /// Plays one hand from `deck`. Any error aborts the hand; no partial result is returned.
    pub fn play_hand(
        &mut self,
        hand_number: u32,
        dealer: Seat,
        deck: Deck,
        seed: Option<u64>,
        log: &mut dyn GameLog,
    ) -> Result<HandResult, EngineError> {
        log.record(GameEvent::HandStarted {
            hand_number,
            dealer,
            seed,
        });
        let mut state = HandState::deal(hand_number, dealer, deck, log)?;

        while let Some(decision) = state.pending() {
            self.resolve_decision(&mut state, &decision, log)?;
        }

        state.into_result().ok_or_else(|| {
            InvariantViolation::Turn("no decision pending but the hand has no result".into())
                .into()
        })
    }

    fn resolve_decision(
        &mut self,
        state: &mut HandState,
        decision: &Decision,
        log: &mut dyn GameLog,
    ) -> Result<(), EngineError> {
        let seat = decision.seat();
        let mut attempt = 0;
        loop {
            attempt += 1;
            let answer = self.solicit(state, decision);
            let err = match state.apply(seat, answer, log) {
                Ok(()) => return Ok(()),
                Err(err) => err,
            };
            if !err.is_recoverable() {
                return Err(err);
            }

            event!(
                target: "ulti_core::orchestrator",
                Level::WARN,
                seat = %seat,
                attempt,
                error = %err,
                "decision rejected"
            );
            log.record(GameEvent::DecisionRejected {
                seat,
                kind: decision.kind(),
                attempt,
                reason: err.to_string(),
            });
            if attempt >= self.config.max_attempts {
                return Err(err);
            }
        }
    }

    fn solicit(&mut self, state: &HandState, decision: &Decision) -> Answer {
        let ctx = state.context(decision.seat());
        let collaborator = &mut self.seats[decision.seat().index()];
        match decision {
            Decision::Bid { options, .. } => Answer::Bid(collaborator.choose_bid(options, &ctx)),
            Decision::Announce { options, .. } => {
                Answer::Announce(collaborator.choose_bonus_announcements(options, &ctx))
            }
            Decision::Play { legal, .. } => Answer::Play(collaborator.choose_card(legal, &ctx)),
        }
    }
}
