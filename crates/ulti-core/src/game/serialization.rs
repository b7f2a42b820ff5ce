use super::match_state::MatchState;
use crate::model::player::Seat;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchSnapshot {
    pub seed: u64,
    pub hand_number: u32,
    pub dealer: Seat,
    pub totals: [i64; 2],
    pub hands_won: [u32; 2],
}

impl MatchSnapshot {
    pub fn capture(state: &MatchState) -> Self {
        MatchSnapshot {
            seed: state.seed(),
            hand_number: state.hand_number(),
            dealer: state.dealer(),
            totals: *state.scores().standings(),
            hands_won: *state.scores().wins(),
        }
    }

    pub fn restore(self) -> MatchState {
        let mut state = MatchState::with_seed_hand(self.seed, self.hand_number, self.dealer);
        state.scores_mut().set_totals(self.totals, self.hands_won);
        state
    }

    pub fn to_json(state: &MatchState) -> serde_json::Result<String> {
        let snapshot = Self::capture(state);
        serde_json::to_string_pretty(&snapshot)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
