use super::{BotContext, BotDifficulty, BotStyle};
use ulti_core::game::tricks::beats;
use ulti_core::model::card::Card;
use ulti_core::model::rank::Rank;

pub struct PlayPlanner;

impl PlayPlanner {
    pub fn choose(legal: &[Card], ctx: &BotContext<'_>) -> Option<Card> {
        if matches!(ctx.difficulty, BotDifficulty::Easy) {
            return legal.first().copied();
        }
        let trump = ctx.trump();
        let led = ctx
            .decision
            .trick
            .and_then(|trick| trick.plays().first().copied());

        // Cheapest first: lowest card points, then lowest power.
        let mut ordered = legal.to_vec();
        ordered.sort_by_key(|c| (c.point_value(trump), c.power(trump)));

        let Some(led) = led else {
            return Self::lead(&ordered, ctx);
        };
        let led_suit = led.card.suit;
        let (winners, losers): (Vec<Card>, Vec<Card>) = ordered
            .iter()
            .partition(|&&c| beats(c, led.card, led_suit, trump));

        match ctx.style() {
            BotStyle::Collect => {
                let worth_taking = led.card.point_value(trump) > 0;
                winners
                    .iter()
                    .copied()
                    .find(|&c| !Self::saving_ulti(c, ctx) || legal.len() == 1)
                    .filter(|_| worth_taking || losers.is_empty())
                    .or_else(|| losers.first().copied())
                    .or_else(|| ordered.first().copied())
            }
            // Highest card that still ducks; forced to win, win with the highest.
            BotStyle::Duck => losers
                .last()
                .copied()
                .or_else(|| winners.last().copied()),
            BotStyle::Squeeze => losers.first().or(winners.first()).copied(),
        }
    }

    fn lead(ordered: &[Card], ctx: &BotContext<'_>) -> Option<Card> {
        match ctx.style() {
            BotStyle::Collect => {
                let trump = ctx.trump();
                let trumps: Vec<Card> = ordered
                    .iter()
                    .copied()
                    .filter(|c| c.is_trump(trump) && !Self::saving_ulti(*c, ctx))
                    .collect();
                if ctx.is_taker() && trumps.len() >= 3 {
                    return trumps
                        .iter()
                        .copied()
                        .max_by_key(|c| c.power(trump));
                }
                ordered
                    .iter()
                    .copied()
                    .filter(|c| !Self::saving_ulti(*c, ctx))
                    .max_by_key(|c| (c.rank == Rank::Ace, std::cmp::Reverse(c.power(trump))))
                    .or_else(|| ordered.first().copied())
            }
            BotStyle::Duck | BotStyle::Squeeze => ordered
                .iter()
                .copied()
                .min_by_key(|c| c.power(ctx.trump())),
        }
    }

    /// The trump seven stays in hand for the last trick while the hand has other cards.
    fn saving_ulti(card: Card, ctx: &BotContext<'_>) -> bool {
        match ctx.trump() {
            Some(trump) => card == Card::new(Rank::Seven, trump) && ctx.hand().len() > 1,
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::PlayPlanner;
    use crate::bot::{BotContext, BotDifficulty, BotParams};
    use ulti_core::game::collaborator::DecisionContext;
    use ulti_core::game::hand::HandPhase;
    use ulti_core::model::card::Card;
    use ulti_core::model::contract::Contract;
    use ulti_core::model::hand::Hand;
    use ulti_core::model::player::{PlayerCount, Seat};
    use ulti_core::model::suit::Suit;
    use ulti_core::model::trick::Trick;

    fn cards(notation: &[&str]) -> Vec<Card> {
        notation.iter().map(|s| s.parse().unwrap()).collect()
    }

    fn context<'a>(hand: &'a Hand, trick: &'a Trick, contract: Contract) -> DecisionContext<'a> {
        DecisionContext {
            seat: Seat::First,
            dealer: Seat::First,
            phase: HandPhase::Playing,
            hand,
            indicator: "KH".parse().unwrap(),
            contract: Some(contract),
            trick: Some(trick),
            talon_preview: &[],
            announcements: &[],
            window: None,
        }
    }

    fn led_trick(card: &str) -> Trick {
        let mut trick = Trick::new(Seat::Second, PlayerCount::Two);
        trick.play(Seat::Second, card.parse().unwrap()).unwrap();
        trick
    }

    #[test]
    fn collector_takes_a_counting_card_with_the_cheapest_winner() {
        let hand = Hand::with_cards(cards(&["AB", "KB", "8B", "7A"]), Some(Suit::Hearts));
        let trick = led_trick("10B");
        let decision = context(&hand, &trick, Contract::trump(Suit::Hearts, Seat::Second));
        let params = BotParams::default();
        let ctx = BotContext::new(&decision, BotDifficulty::Normal, &params);
        let legal = cards(&["AB", "KB", "8B"]);
        assert_eq!(PlayPlanner::choose(&legal, &ctx), Some("AB".parse().unwrap()));
    }

    #[test]
    fn collector_discards_cheaply_when_it_cannot_win() {
        let hand = Hand::with_cards(cards(&["KB", "8B", "7A"]), Some(Suit::Hearts));
        let trick = led_trick("AB");
        let decision = context(&hand, &trick, Contract::trump(Suit::Hearts, Seat::Second));
        let params = BotParams::default();
        let ctx = BotContext::new(&decision, BotDifficulty::Normal, &params);
        let legal = cards(&["KB", "8B"]);
        assert_eq!(PlayPlanner::choose(&legal, &ctx), Some("8B".parse().unwrap()));
    }

    #[test]
    fn betli_taker_ducks_under_the_led_card() {
        let hand = Hand::with_cards(cards(&["9B", "UB", "AB"]), None);
        let trick = led_trick("OB");
        let decision = context(&hand, &trick, Contract::betli(Seat::First));
        let params = BotParams::default();
        let ctx = BotContext::new(&decision, BotDifficulty::Normal, &params);
        let legal = cards(&["9B", "UB", "AB"]);
        assert_eq!(PlayPlanner::choose(&legal, &ctx), Some("UB".parse().unwrap()));
    }

    #[test]
    fn easy_bot_plays_first_legal_card() {
        let hand = Hand::with_cards(cards(&["9B", "AB"]), None);
        let trick = led_trick("OB");
        let decision = context(&hand, &trick, Contract::klopitzky());
        let params = BotParams::default();
        let ctx = BotContext::new(&decision, BotDifficulty::Easy, &params);
        let legal = cards(&["AB", "9B"]);
        assert_eq!(PlayPlanner::choose(&legal, &ctx), Some("AB".parse().unwrap()));
    }
}
