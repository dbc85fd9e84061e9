use crate::{Card, Rank, RngState, Suit};

/// Draw stack and discard pile for one round. The top of either stack is the
/// end of its Vec.
#[derive(Debug, Default, Clone)]
pub struct Deck {
    pub draw: Vec<Card>,
    pub discard: Vec<Card>,
}

impl Deck {
    /// Full 52-card set in suit-major, rank-minor order, ids 1..=52.
    pub fn standard52() -> Self {
        let mut draw = Vec::with_capacity(52);
        let mut next_id = 1u32;
        for suit in Suit::ALL {
            for rank in Rank::ALL {
                draw.push(Card {
                    suit,
                    rank,
                    id: next_id,
                });
                next_id += 1;
            }
        }
        Self {
            draw,
            discard: Vec::new(),
        }
    }

    pub fn shuffle(&mut self, rng: &mut RngState) {
        rng.shuffle(&mut self.draw);
    }

    pub fn draw_top(&mut self) -> Option<Card> {
        self.draw.pop()
    }

    pub fn draw_many(&mut self, count: usize) -> Vec<Card> {
        let mut cards = Vec::with_capacity(count);
        for _ in 0..count {
            if let Some(card) = self.draw.pop() {
                cards.push(card);
            } else {
                break;
            }
        }
        cards
    }

    pub fn take_discard(&mut self) -> Option<Card> {
        self.discard.pop()
    }

    pub fn push_discard(&mut self, card: Card) {
        self.discard.push(card);
    }

    pub fn discard_top(&self) -> Option<&Card> {
        self.discard.last()
    }

    pub fn remaining(&self) -> usize {
        self.draw.len()
    }
}
