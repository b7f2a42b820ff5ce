use super::{BotContext, BotDifficulty, count_suit};
use ulti_core::game::bonus::{BonusType, BonusWindow};
use ulti_core::model::card::Card;
use ulti_core::model::hand::Hand;
use ulti_core::model::rank::Rank;
use ulti_core::model::suit::Suit;

pub struct AnnouncePlanner;

impl AnnouncePlanner {
    /// Announces only what the current hand already holds the cards for. The back window
    /// is reserved for bonuses that are nearly certain.
    pub fn choose(options: &[BonusType], ctx: &BotContext<'_>) -> Vec<BonusType> {
        if matches!(ctx.difficulty, BotDifficulty::Easy) {
            return Vec::new();
        }
        let window = ctx.decision.window.unwrap_or(BonusWindow::Front);
        options
            .iter()
            .copied()
            .filter(|&bonus| {
                let confident = Self::confident(bonus, ctx);
                match window {
                    BonusWindow::Back => confident && bonus == BonusType::Kassza,
                    BonusWindow::Front => confident,
                }
            })
            .collect()
    }

    fn confident(bonus: BonusType, ctx: &BotContext<'_>) -> bool {
        let hand = ctx.hand();
        let Some(trump) = ctx.trump() else {
            return bonus == BonusType::FourAces && holds_all_aces(hand);
        };
        let holds = |ranks: &[Rank]| ranks.iter().all(|&r| hand.contains(Card::new(r, trump)));
        match bonus {
            BonusType::Kassza => ctx.is_taker() && holds(&[Rank::King, Rank::Over]),
            BonusType::Trull => holds(&[Rank::Under, Rank::Nine, Rank::Seven]),
            BonusType::Family => holds(&[Rank::Ace, Rank::King, Rank::Over]),
            BonusType::Ulti => {
                holds(&[Rank::Seven]) && count_suit(hand, trump) >= ctx.params.ulti_min_trumps
            }
            BonusType::FourAces => holds_all_aces(hand),
            _ => false,
        }
    }
}

fn holds_all_aces(hand: &Hand) -> bool {
    Suit::ALL
        .iter()
        .all(|&suit| hand.contains(Card::new(Rank::Ace, suit)))
}
