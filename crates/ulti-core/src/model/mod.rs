pub mod card;
pub mod contract;
pub mod deck;
pub mod hand;
pub mod player;
pub mod points;
pub mod rank;
pub mod score;
pub mod suit;
pub mod trick;
