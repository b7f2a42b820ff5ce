use crate::game::error::InvariantViolation;
use crate::model::player::Seat;
use serde::{Deserialize, Serialize};

/// Per-seat score for one hand. Each component may be written once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    card_points: Option<u32>,
    meld_points: Option<u32>,
    bonus_points: Option<i32>,
}

impl Score {
    pub fn card_points(&self) -> u32 {
        self.card_points.unwrap_or(0)
    }

    pub fn meld_points(&self) -> u32 {
        self.meld_points.unwrap_or(0)
    }

    pub fn bonus_points(&self) -> i32 {
        self.bonus_points.unwrap_or(0)
    }

    /// Card points plus meld points.
    pub fn game_points(&self) -> u32 {
        self.card_points() + self.meld_points()
    }

    pub fn total(&self) -> i64 {
        i64::from(self.game_points()) + i64::from(self.bonus_points())
    }

    pub fn set_card_points(&mut self, points: u32) -> Result<(), InvariantViolation> {
        write_once(&mut self.card_points, points, "card_points")
    }

    pub fn set_meld_points(&mut self, points: u32) -> Result<(), InvariantViolation> {
        write_once(&mut self.meld_points, points, "meld_points")
    }

    pub fn set_bonus_points(&mut self, points: i32) -> Result<(), InvariantViolation> {
        write_once(&mut self.bonus_points, points, "bonus_points")
    }
}

fn write_once<T>(slot: &mut Option<T>, value: T, name: &'static str) -> Result<(), InvariantViolation> {
    if slot.is_some() {
        return Err(InvariantViolation::ScoreRewritten(name));
    }
    *slot = Some(value);
    Ok(())
}

/// Running totals across the hands of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScoreBoard {
    totals: [i64; 2],
    hands_won: [u32; 2],
}

impl ScoreBoard {
    pub const fn new() -> Self {
        Self {
            totals: [0; 2],
            hands_won: [0; 2],
        }
    }

    pub fn add_points(&mut self, seat: Seat, points: i64) {
        self.totals[seat.index()] += points;
    }

    pub fn record_win(&mut self, seat: Seat) {
        self.hands_won[seat.index()] += 1;
    }

    pub fn set_totals(&mut self, totals: [i64; 2], hands_won: [u32; 2]) {
        self.totals = totals;
        self.hands_won = hands_won;
    }

    pub fn score(&self, seat: Seat) -> i64 {
        self.totals[seat.index()]
    }

    pub fn hands_won(&self, seat: Seat) -> u32 {
        self.hands_won[seat.index()]
    }

    pub fn standings(&self) -> &[i64; 2] {
        &self.totals
    }

    pub fn wins(&self) -> &[u32; 2] {
        &self.hands_won
    }

    pub fn leading_player(&self) -> Option<Seat> {
        match self.totals[0].cmp(&self.totals[1]) {
            std::cmp::Ordering::Greater => Some(Seat::First),
            std::cmp::Ordering::Less => Some(Seat::Second),
            std::cmp::Ordering::Equal => None,
        }
    }
}
