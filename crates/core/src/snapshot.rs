use crate::{Card, DrawSource, GameState, Phase, Player, Rank, Selection, Suit};
use serde::Serialize;

/// Read-only view for the renderer. Face-down cards are withheld so a
/// snapshot never leaks information the acting player cannot see.
#[derive(Debug, Clone, Serialize)]
pub struct GameSnapshot {
    pub round: u8,
    pub max_rounds: u8,
    pub players: Vec<PlayerView>,
    pub current_player: usize,
    pub phase: Phase,
    pub selection: Option<Selection>,
    pub drawn: Option<DrawnView>,
    pub discard_top: Option<CardView>,
    pub deck_remaining: usize,
    pub round_pending: bool,
    pub game_over: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayerView {
    pub id: usize,
    pub hand: Vec<SlotView>,
    pub total_score: i64,
    pub round_score: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SlotView {
    pub face_up: bool,
    pub card: Option<CardView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CardView {
    pub suit: Suit,
    pub rank: Rank,
    pub text: String,
    pub score: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct DrawnView {
    pub card: CardView,
    pub source: DrawSource,
}

fn card_view(card: &Card) -> CardView {
    CardView {
        suit: card.suit,
        rank: card.rank,
        text: format!("{}{}", card.rank.label(), card.suit.symbol()),
        score: card.score(),
    }
}

fn player_view(player: &Player) -> PlayerView {
    PlayerView {
        id: player.id,
        hand: player
            .hand
            .iter()
            .map(|slot| SlotView {
                face_up: slot.face_up,
                card: slot.face_up.then(|| card_view(&slot.card)),
            })
            .collect(),
        total_score: player.total_score,
        round_score: player.round_score,
    }
}

impl GameState {
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            round: self.round,
            max_rounds: self.config.max_rounds,
            players: self.players.iter().map(player_view).collect(),
            current_player: self.current_player,
            phase: self.phase,
            selection: self.selection,
            drawn: self.drawn.map(|drawn| DrawnView {
                card: card_view(&drawn.card),
                source: drawn.source,
            }),
            discard_top: self.deck.discard_top().map(card_view),
            deck_remaining: self.deck.remaining(),
            round_pending: self.round_pending,
            game_over: self.game_over,
        }
    }
}
