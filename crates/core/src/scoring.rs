use crate::{Card, HandSlot, HAND_COLUMNS};
use serde::{Deserialize, Serialize};

/// A column whose two ranks match cancels to zero regardless of face value.
pub fn column_score(top: &Card, bottom: &Card) -> i64 {
    if top.rank == bottom.rank {
        0
    } else {
        top.score() + bottom.score()
    }
}

/// Sum over the three fixed columns (0,3), (1,4), (2,5).
pub fn hand_score(hand: &[HandSlot]) -> i64 {
    (0..HAND_COLUMNS)
        .map(|col| column_score(&hand[col].card, &hand[col + HAND_COLUMNS].card))
        .sum()
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoundResult {
    pub player: usize,
    pub round_score: i64,
    pub total_score: i64,
}
