use super::{BotContext, BotDifficulty, count_suit};
use ulti_core::game::bidding::{BidChoice, BidOffer};
use ulti_core::model::card::Card;
use ulti_core::model::hand::Hand;
use ulti_core::model::points::{plain_points, trump_points};
use ulti_core::model::rank::Rank;
use ulti_core::model::suit::Suit;

pub struct BidPlanner;

impl BidPlanner {
    /// Accepts the offer on the table when the hand clears the threshold for it.
    pub fn choose(options: &[BidChoice], ctx: &BotContext<'_>) -> BidChoice {
        let offer = options.iter().find_map(|choice| match choice {
            BidChoice::Accept(offer) => Some(*offer),
            BidChoice::Pass => None,
        });
        match offer {
            Some(offer) if Self::accepts(offer, ctx) => BidChoice::Accept(offer),
            _ => BidChoice::Pass,
        }
    }

    pub fn accepts(offer: BidOffer, ctx: &BotContext<'_>) -> bool {
        let hand = ctx.hand();
        let params = ctx.params;
        match (ctx.difficulty, offer) {
            (BotDifficulty::Easy, BidOffer::Indicator(suit)) => count_suit(hand, suit) >= 4,
            (BotDifficulty::Easy, _) => false,
            (_, BidOffer::Indicator(suit) | BidOffer::Suit(suit)) => {
                trump_strength(hand, suit) >= params.trump_bid_threshold
            }
            (_, BidOffer::NoTrump) => no_trump_strength(hand) >= params.no_trump_threshold,
            (_, BidOffer::Betli) => {
                high_cards(hand, ctx.decision.talon_preview) <= params.betli_max_high_cards
            }
        }
    }
}

/// Ten per trump held plus the trump card points, plus five per side ace.
pub fn trump_strength(hand: &Hand, trump: Suit) -> u32 {
    hand.iter()
        .map(|card| {
            if card.suit == trump {
                10 + trump_points(card.rank)
            } else if card.rank == Rank::Ace {
                5
            } else {
                0
            }
        })
        .sum()
}

/// Aces and tens, counting a ten only when its ace is also held.
pub fn no_trump_strength(hand: &Hand) -> u32 {
    let aces = hand.iter().filter(|c| c.rank == Rank::Ace).count() as u32;
    let guarded_tens = hand
        .iter()
        .filter(|c| c.rank == Rank::Ten && hand.contains(Card::new(Rank::Ace, c.suit)))
        .count() as u32;
    aces + guarded_tens
}

/// Cards worth points in plain play. The visible talon cards count against the hand when
/// they are low, since the remainder deal cannot hand them out any more.
fn high_cards(hand: &Hand, talon_preview: &[Card]) -> usize {
    let held = hand
        .iter()
        .filter(|c| plain_points(c.rank) >= plain_points(Rank::King))
        .count();
    let low_in_talon = talon_preview
        .iter()
        .filter(|c| c.rank <= Rank::Nine)
        .count();
    held + usize::from(low_in_talon >= 3)
}
