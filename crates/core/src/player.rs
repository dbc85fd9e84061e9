use crate::Card;
use serde::{Deserialize, Serialize};

pub const HAND_SLOTS: usize = 6;
pub const HAND_COLUMNS: usize = 3;

/// One of the six fixed positions in a player's grid. Column c pairs slot c
/// with slot c + 3 for scoring.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandSlot {
    pub card: Card,
    pub face_up: bool,
}

impl HandSlot {
    pub fn face_down(card: Card) -> Self {
        Self {
            card,
            face_up: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: usize,
    pub hand: Vec<HandSlot>,
    pub total_score: i64,
    pub round_score: i64,
}

impl Player {
    pub fn new(id: usize) -> Self {
        Self {
            id,
            hand: Vec::with_capacity(HAND_SLOTS),
            total_score: 0,
            round_score: 0,
        }
    }

    pub fn all_face_up(&self) -> bool {
        self.hand.iter().all(|slot| slot.face_up)
    }

    pub fn face_down_count(&self) -> usize {
        self.hand.iter().filter(|slot| !slot.face_up).count()
    }
}
