//! Bonus announcements: the two announcement windows, legality of a declaration, and
//! signed settlement against the finished hand.

use crate::game::error::IllegalMove;
use crate::game::tricks::CompletedTrick;
use crate::model::card::Card;
use crate::model::contract::{Contract, GameType};
use crate::model::player::Seat;
use crate::model::rank::Rank;
use crate::model::suit::Suit;
use core::fmt;
use serde::{Deserialize, Serialize};

/// Extra bonus point for the sole seat with the most game points.
pub const LEADER_BONUS: i32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BonusWindow {
    /// Before the remainder deal, scored at the higher value.
    Back,
    /// After the remainder deal.
    Front,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BonusType {
    Kassza,
    Abszolut,
    Hundred,
    TwoHundred,
    FourAces,
    Trull,
    Ulti,
    Family,
    AllTrumps,
    Volat,
}

impl BonusType {
    pub const ALL: [BonusType; 10] = [
        BonusType::Kassza,
        BonusType::Abszolut,
        BonusType::Hundred,
        BonusType::TwoHundred,
        BonusType::FourAces,
        BonusType::Trull,
        BonusType::Ulti,
        BonusType::Family,
        BonusType::AllTrumps,
        BonusType::Volat,
    ];

    /// (back, front) values.
    pub const fn values(self) -> (i32, i32) {
        match self {
            BonusType::Kassza => (4, 2),
            BonusType::Abszolut => (6, 3),
            BonusType::Hundred => (8, 4),
            BonusType::TwoHundred => (8, 4),
            BonusType::FourAces => (8, 4),
            BonusType::Trull => (4, 2),
            BonusType::Ulti => (10, 5),
            BonusType::Family => (4, 2),
            BonusType::AllTrumps => (12, 6),
            BonusType::Volat => (20, 10),
        }
    }

    pub const fn value(self, window: BonusWindow) -> i32 {
        let (back, front) = self.values();
        match window {
            BonusWindow::Back => back,
            BonusWindow::Front => front,
        }
    }

    /// Bonuses whose condition names trump cards; never offered without a trump suit.
    pub const fn needs_trump(self) -> bool {
        matches!(
            self,
            BonusType::Kassza
                | BonusType::Trull
                | BonusType::Ulti
                | BonusType::Family
                | BonusType::AllTrumps
        )
    }

    pub const fn taker_only(self) -> bool {
        matches!(self, BonusType::Kassza)
    }
}

impl fmt::Display for BonusType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BonusType::Kassza => "Kassza",
            BonusType::Abszolut => "Abszolút",
            BonusType::Hundred => "100/80",
            BonusType::TwoHundred => "200/180",
            BonusType::FourAces => "Four Aces",
            BonusType::Trull => "Trull",
            BonusType::Ulti => "Ulti",
            BonusType::Family => "Family",
            BonusType::AllTrumps => "All Trumps",
            BonusType::Volat => "Volát",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BonusAnnouncement {
    pub owner: Seat,
    pub bonus: BonusType,
    pub window: BonusWindow,
}

/// Bonuses `seat` may still declare in `window`.
pub fn available_bonuses(
    seat: Seat,
    contract: &Contract,
    existing: &[BonusAnnouncement],
) -> Vec<BonusType> {
    if !contract.game_type().is_point_game() {
        return Vec::new();
    }
    let has_trump = contract.trump_suit().is_some();
    let is_taker = contract.taker() == Some(seat);
    BonusType::ALL
        .iter()
        .copied()
        .filter(|bonus| has_trump || !bonus.needs_trump())
        .filter(|bonus| is_taker || !bonus.taker_only())
        .filter(|bonus| {
            !existing
                .iter()
                .any(|a| a.owner == seat && a.bonus == *bonus)
        })
        .collect()
}

/// Checks a whole answer for one seat in one window before anything is recorded.
pub fn validate_announcements(
    seat: Seat,
    window: BonusWindow,
    contract: &Contract,
    existing: &[BonusAnnouncement],
    chosen: &[BonusType],
) -> Result<(), IllegalMove> {
    let available = available_bonuses(seat, contract, existing);
    for (index, bonus) in chosen.iter().copied().enumerate() {
        let repeated = chosen[..index].contains(&bonus)
            || existing.iter().any(|a| a.owner == seat && a.bonus == bonus);
        if repeated {
            return Err(IllegalMove::DuplicateBonus { seat, bonus });
        }
        if !available.contains(&bonus) {
            return Err(IllegalMove::Bonus {
                seat,
                bonus,
                window,
            });
        }
    }
    Ok(())
}

/// Everything settlement needs to know about the finished hand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandFacts<'a> {
    pub contract: Contract,
    pub tricks: &'a [CompletedTrick],
    pub card_points: [u32; 2],
    pub game_points: [u32; 2],
}

impl HandFacts<'_> {
    fn won_cards(&self, seat: Seat) -> impl Iterator<Item = Card> + '_ {
        self.tricks
            .iter()
            .filter(move |t| t.winner == seat)
            .flat_map(|t| t.trick.cards())
    }

    fn won_all(&self, seat: Seat, required: &[Card]) -> bool {
        let won: Vec<Card> = self.won_cards(seat).collect();
        required.iter().all(|card| won.contains(card))
    }

    fn won_trumps(&self, seat: Seat, ranks: &[Rank]) -> bool {
        let Some(trump) = self.contract.trump_suit() else {
            return false;
        };
        let required: Vec<Card> = ranks.iter().map(|&r| Card::new(r, trump)).collect();
        self.won_all(seat, &required)
    }

    fn is_trump_game(&self) -> bool {
        self.contract.game_type() == GameType::Trump
    }

    fn threshold(&self, trump: u32, no_trump: u32) -> u32 {
        if self.is_trump_game() { trump } else { no_trump }
    }

    /// Whether the bonus condition holds for `owner`.
    pub fn succeeds(&self, owner: Seat, bonus: BonusType) -> bool {
        let card_points = self.card_points[owner.index()];
        match bonus {
            BonusType::Kassza => {
                let opponent = self.card_points[owner.other().index()];
                self.contract.taker() == Some(owner)
                    && self.won_trumps(owner, &[Rank::King, Rank::Over])
                    && card_points > opponent
            }
            BonusType::Abszolut => card_points >= self.threshold(82, 66),
            BonusType::Hundred => card_points >= self.threshold(100, 80),
            BonusType::TwoHundred => self.game_points[owner.index()] >= self.threshold(200, 180),
            BonusType::FourAces => {
                let aces: Vec<Card> = Suit::ALL.iter().map(|&s| Card::new(Rank::Ace, s)).collect();
                self.won_all(owner, &aces)
            }
            BonusType::Trull => self.won_trumps(owner, &[Rank::Under, Rank::Nine, Rank::Seven]),
            BonusType::Ulti => match (self.tricks.last(), self.contract.trump_suit()) {
                (Some(last), Some(trump)) => {
                    last.winner == owner && last.winning_card == Card::new(Rank::Seven, trump)
                }
                _ => false,
            },
            BonusType::Family => self.won_trumps(owner, &[Rank::Ace, Rank::King, Rank::Over]),
            BonusType::AllTrumps => self.won_trumps(
                owner,
                &[
                    Rank::Under,
                    Rank::Nine,
                    Rank::Ace,
                    Rank::Ten,
                    Rank::King,
                    Rank::Over,
                ],
            ),
            BonusType::Volat => {
                !self.tricks.is_empty() && self.tricks.iter().all(|t| t.winner == owner)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BonusOutcome {
    pub announcement: BonusAnnouncement,
    pub success: bool,
    pub delta: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    pub outcomes: Vec<BonusOutcome>,
    pub leader_bonus: Option<Seat>,
    pub totals: [i32; 2],
}

/// Settles every announcement at its window's value, signed by success, then awards the
/// leader bonus. Reads `facts` only.
pub fn settle(announcements: &[BonusAnnouncement], facts: &HandFacts<'_>) -> Settlement {
    let mut totals = [0i32; 2];
    let outcomes: Vec<BonusOutcome> = announcements
        .iter()
        .map(|&announcement| {
            let success = facts.succeeds(announcement.owner, announcement.bonus);
            let value = announcement.bonus.value(announcement.window);
            let delta = if success { value } else { -value };
            totals[announcement.owner.index()] += delta;
            BonusOutcome {
                announcement,
                success,
                delta,
            }
        })
        .collect();

    let leader_bonus = match facts.game_points[0].cmp(&facts.game_points[1]) {
        std::cmp::Ordering::Greater => Some(Seat::First),
        std::cmp::Ordering::Less => Some(Seat::Second),
        std::cmp::Ordering::Equal => None,
    };
    if let Some(seat) = leader_bonus {
        totals[seat.index()] += LEADER_BONUS;
    }

    Settlement {
        outcomes,
        leader_bonus,
        totals,
    }
}
