use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use ulti_core::game::bidding::BidChoice;
use ulti_core::game::bonus::BonusType;
use ulti_core::game::collaborator::{Collaborator, DecisionContext};
use ulti_core::model::card::Card;

/// Uniform choice among the offered options from a seeded stream.
#[derive(Debug, Clone)]
pub struct RandomPolicy {
    rng: StdRng,
    announce_probability: f64,
}

impl RandomPolicy {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            announce_probability: 0.1,
        }
    }

    /// Chance of announcing each offered bonus; clamped to `[0, 1]`.
    pub fn with_announce_probability(mut self, probability: f64) -> Self {
        self.announce_probability = probability.clamp(0.0, 1.0);
        self
    }
}

impl Collaborator for RandomPolicy {
    fn choose_bid(&mut self, options: &[BidChoice], _ctx: &DecisionContext<'_>) -> BidChoice {
        options
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(BidChoice::Pass)
    }

    fn choose_bonus_announcements(
        &mut self,
        options: &[BonusType],
        _ctx: &DecisionContext<'_>,
    ) -> Vec<BonusType> {
        let probability = self.announce_probability;
        options
            .iter()
            .copied()
            .filter(|_| self.rng.gen_bool(probability))
            .collect()
    }

    fn choose_card(&mut self, legal: &[Card], _ctx: &DecisionContext<'_>) -> Card {
        *legal
            .choose(&mut self.rng)
            .expect("the engine never asks for a card without a legal option")
    }
}
