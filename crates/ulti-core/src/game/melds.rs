//! Sequence and four-of-a-kind melds, and the contest that awards at most one of each kind.

use crate::model::card::Card;
use crate::model::player::Seat;
use crate::model::points::plain_power;
use crate::model::rank::Rank;
use crate::model::suit::Suit;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

pub const TERC_POINTS: u32 = 20;
pub const KVART_POINTS: u32 = 50;
pub const LONG_SEQUENCE_POINTS: u32 = 100;
pub const FOUR_OF_A_KIND_POINTS: u32 = 80;

const MIN_SEQUENCE: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MeldKind {
    Sequence(u8),
    FourOfAKind(Rank),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meld {
    pub kind: MeldKind,
    pub cards: Vec<Card>,
    pub points: u32,
}

impl Meld {
    pub fn name(&self) -> &'static str {
        match self.kind {
            MeldKind::Sequence(3) => "Terc",
            MeldKind::Sequence(4) => "Kvart",
            MeldKind::Sequence(_) => "Long Sequence",
            MeldKind::FourOfAKind(_) => "Vannak",
        }
    }

    /// Highest card of a sequence (cards are stored in ascending rank order).
    fn top_card(&self) -> Option<Card> {
        self.cards.last().copied()
    }
}

const fn sequence_points(length: usize) -> u32 {
    match length {
        3 => TERC_POINTS,
        4 => KVART_POINTS,
        _ => LONG_SEQUENCE_POINTS,
    }
}

/// Every maximal run of at least three consecutive ranks, per suit.
pub fn detect_sequences(cards: &[Card]) -> Vec<Meld> {
    let mut melds = Vec::new();
    for suit in Suit::ALL {
        let mut ranks: Vec<Rank> = cards
            .iter()
            .filter(|c| c.suit == suit)
            .map(|c| c.rank)
            .collect();
        ranks.sort();
        ranks.dedup();

        let mut run: Vec<Rank> = Vec::new();
        for rank in ranks {
            let extends = run
                .last()
                .is_some_and(|prev| prev.ordinal() + 1 == rank.ordinal());
            if !extends {
                push_run(&mut melds, &run, suit);
                run.clear();
            }
            run.push(rank);
        }
        push_run(&mut melds, &run, suit);
    }
    melds
}

fn push_run(melds: &mut Vec<Meld>, run: &[Rank], suit: Suit) {
    if run.len() < MIN_SEQUENCE {
        return;
    }
    melds.push(Meld {
        kind: MeldKind::Sequence(run.len() as u8),
        cards: run.iter().map(|&rank| Card::new(rank, suit)).collect(),
        points: sequence_points(run.len()),
    });
}

/// Ranks held in all four suits.
pub fn detect_four_of_a_kind(cards: &[Card]) -> Vec<Meld> {
    Rank::ORDERED
        .iter()
        .copied()
        .filter(|&rank| {
            Suit::ALL
                .iter()
                .all(|&suit| cards.contains(&Card::new(rank, suit)))
        })
        .map(|rank| Meld {
            kind: MeldKind::FourOfAKind(rank),
            cards: Suit::ALL.iter().map(|&suit| Card::new(rank, suit)).collect(),
            points: FOUR_OF_A_KIND_POINTS,
        })
        .collect()
}

/// Longer run, then higher top rank, then higher suit priority of the top card.
pub fn compare_sequences(a: &Meld, b: &Meld) -> Ordering {
    a.cards
        .len()
        .cmp(&b.cards.len())
        .then_with(|| {
            let top_a = a.top_card().map(|c| (c.rank.ordinal(), c.suit.priority()));
            let top_b = b.top_card().map(|c| (c.rank.ordinal(), c.suit.priority()));
            top_a.cmp(&top_b)
        })
}

/// Higher plain trick power of the rank wins.
pub fn compare_four_of_a_kind(a: &Meld, b: &Meld) -> Ordering {
    let power = |meld: &Meld| match meld.kind {
        MeldKind::FourOfAKind(rank) => plain_power(rank),
        MeldKind::Sequence(_) => 0,
    };
    power(a).cmp(&power(b))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeldAward {
    pub seat: Seat,
    pub meld: Meld,
}

/// Contest winners; each kind is awarded to at most one seat.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeldContest {
    pub sequence: Option<MeldAward>,
    pub four_of_a_kind: Option<MeldAward>,
}

impl MeldContest {
    pub fn points_for(&self, seat: Seat) -> u32 {
        self.awards()
            .filter(|award| award.seat == seat)
            .map(|award| award.meld.points)
            .sum()
    }

    pub fn awards(&self) -> impl Iterator<Item = &MeldAward> {
        self.sequence.iter().chain(self.four_of_a_kind.iter())
    }
}

/// Runs both contests over each seat's cards.
pub fn resolve_melds(holdings: &[(Seat, Vec<Card>)]) -> MeldContest {
    let best = |detect: fn(&[Card]) -> Vec<Meld>, compare: fn(&Meld, &Meld) -> Ordering| {
        holdings
            .iter()
            .flat_map(|(seat, cards)| {
                detect(cards.as_slice())
                    .into_iter()
                    .map(move |meld| MeldAward { seat: *seat, meld })
            })
            .max_by(|a, b| compare(&a.meld, &b.meld))
    };

    MeldContest {
        sequence: best(detect_sequences, compare_sequences),
        four_of_a_kind: best(detect_four_of_a_kind, compare_four_of_a_kind),
    }
}
