use crate::bot::{AnnouncePlanner, BidPlanner, BotContext, BotDifficulty, BotParams, PlayPlanner};
use tracing::{Level, event};
use ulti_core::game::bidding::BidChoice;
use ulti_core::game::bonus::BonusType;
use ulti_core::game::collaborator::{Collaborator, DecisionContext};
use ulti_core::model::card::Card;

/// Rule-based collaborator.
#[derive(Debug, Clone)]
pub struct HeuristicPolicy {
    difficulty: BotDifficulty,
    params: BotParams,
}

impl HeuristicPolicy {
    pub fn new(difficulty: BotDifficulty) -> Self {
        Self {
            difficulty,
            params: BotParams::default(),
        }
    }

    pub fn easy() -> Self {
        Self::new(BotDifficulty::Easy)
    }

    pub fn normal() -> Self {
        Self::new(BotDifficulty::Normal)
    }

    pub fn with_params(mut self, params: BotParams) -> Self {
        self.params = params;
        self
    }

    pub fn difficulty(&self) -> BotDifficulty {
        self.difficulty
    }
}

impl Default for HeuristicPolicy {
    fn default() -> Self {
        Self::new(BotDifficulty::from_env())
    }
}

impl Collaborator for HeuristicPolicy {
    fn choose_bid(&mut self, options: &[BidChoice], ctx: &DecisionContext<'_>) -> BidChoice {
        let bot_ctx = BotContext::new(ctx, self.difficulty, &self.params);
        let choice = BidPlanner::choose(options, &bot_ctx);
        event!(
            target: "ulti_bot::bid",
            Level::DEBUG,
            seat = %ctx.seat,
            difficulty = ?self.difficulty,
            indicator = %ctx.indicator,
            choice = ?choice,
        );
        choice
    }

    fn choose_bonus_announcements(
        &mut self,
        options: &[BonusType],
        ctx: &DecisionContext<'_>,
    ) -> Vec<BonusType> {
        let bot_ctx = BotContext::new(ctx, self.difficulty, &self.params);
        let chosen = AnnouncePlanner::choose(options, &bot_ctx);
        if !chosen.is_empty() {
            event!(
                target: "ulti_bot::announce",
                Level::DEBUG,
                seat = %ctx.seat,
                window = ?ctx.window,
                bonuses = ?chosen,
            );
        }
        chosen
    }

    fn choose_card(&mut self, legal: &[Card], ctx: &DecisionContext<'_>) -> Card {
        let bot_ctx = BotContext::new(ctx, self.difficulty, &self.params);
        let (chosen, reason) = match PlayPlanner::choose(legal, &bot_ctx) {
            Some(card) => (card, "heuristic_play"),
            None => (legal[0], "fallback_first_legal"),
        };
        log_play_decision(&bot_ctx, legal, chosen, reason);
        chosen
    }
}

fn log_play_decision(ctx: &BotContext<'_>, legal: &[Card], chosen: Card, reason: &str) {
    if !tracing::enabled!(Level::DEBUG) {
        return;
    }

    let legal_preview = if legal.len() <= 6 {
        legal
            .iter()
            .map(|card| card.to_string())
            .collect::<Vec<_>>()
            .join(",")
    } else {
        format!("{} moves", legal.len())
    };

    let seat = ctx.seat();
    let style = ctx.style();
    let trick_cards = ctx.decision.trick.map_or(0, |t| t.plays().len());
    event!(
        target: "ulti_bot::play",
        Level::DEBUG,
        seat = %seat,
        difficulty = ?ctx.difficulty,
        style = ?style,
        legal_count = legal.len(),
        legal_moves = %legal_preview,
        chosen = %chosen,
        trick_cards,
        reason,
    );
}

#[cfg(test)]
mod tests {
    use super::HeuristicPolicy;
    use crate::bot::BotDifficulty;
    use ulti_core::game::collaborator::Collaborator;
    use ulti_core::game::events::GameEvent;
    use ulti_core::game::orchestrator::{Orchestrator, OrchestratorConfig};
    use ulti_core::model::player::Seat;

    fn heuristic_table(difficulty: BotDifficulty) -> Orchestrator {
        let seats: [Box<dyn Collaborator>; 2] = [
            Box::new(HeuristicPolicy::new(difficulty)),
            Box::new(HeuristicPolicy::new(difficulty)),
        ];
        Orchestrator::new(OrchestratorConfig::default(), seats).unwrap()
    }

    #[test]
    fn heuristic_seats_finish_hands_without_rejections() {
        for difficulty in [BotDifficulty::Easy, BotDifficulty::Normal] {
            let mut orchestrator = heuristic_table(difficulty);
            for seed in 0..25 {
                let mut log = Vec::new();
                let dealer = if seed % 2 == 0 { Seat::First } else { Seat::Second };
                let result = orchestrator.play_seeded(1, dealer, seed, &mut log).unwrap();
                assert_eq!(result.tricks_won[0] + result.tricks_won[1], 12);
                assert!(!log.iter().any(|e| matches!(e, GameEvent::DecisionRejected { .. })));
            }
        }
    }

    #[test]
    fn heuristic_play_is_deterministic() {
        let run = || {
            let mut log = Vec::new();
            heuristic_table(BotDifficulty::Normal)
                .play_seeded(2, Seat::Second, 77, &mut log)
                .unwrap();
            log
        };
        assert_eq!(run(), run());
    }
}
