use crate::{Card, DrawSource, RoundResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Event {
    RoundStarted {
        round: u8,
        players: usize,
    },
    SetupFlip {
        player: usize,
        slot: usize,
    },
    CardDrawn {
        player: usize,
        source: DrawSource,
        card: Card,
    },
    CardSwapped {
        player: usize,
        slot: usize,
        placed: Card,
        discarded: Card,
    },
    DrawnDiscarded {
        player: usize,
        card: Card,
    },
    SlotFlipped {
        player: usize,
        slot: usize,
    },
    TurnEnded {
        next_player: usize,
    },
    RoundScored {
        round: u8,
        results: Vec<RoundResult>,
    },
    GameOver {
        totals: Vec<i64>,
    },
}

#[derive(Debug, Default)]
pub struct EventBus {
    queue: Vec<Event>,
}

impl EventBus {
    pub fn push(&mut self, event: Event) {
        self.queue.push(event);
    }

    pub fn drain(&mut self) -> impl Iterator<Item = Event> + '_ {
        self.queue.drain(..)
    }
}
