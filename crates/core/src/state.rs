use crate::Card;
use serde::{Deserialize, Serialize};

/// Single authoritative phase value. Rounds move setup -> draw -> action and
/// then back to draw for the next player until a hand completes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Phase {
    Setup,
    Draw,
    Action,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DrawSource {
    Deck,
    Discard,
}

/// Transient UI-intent cache, reset on every phase transition. At most one
/// choice is held at a time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Selection {
    Deck,
    Discard,
    Slot(usize),
}

/// The card held between a draw and its resolution. It cannot be put back;
/// it either swaps into a slot or goes to the discard pile.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DrawnCard {
    pub card: Card,
    pub source: DrawSource,
}
