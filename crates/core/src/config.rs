use serde::{Deserialize, Serialize};

pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 8;

/// How repeated clicks interact with the current selection. The observed
/// play variants disagree here, so the discipline is a declared policy.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SelectionPolicy {
    /// Each click overwrites the single current selection.
    LastClickWins,
    /// Clicking the already-selected source or slot deselects it.
    Toggle,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    pub players: usize,
    pub max_rounds: u8,
    pub selection: SelectionPolicy,
    /// Variant rule: during the draw phase a face-down slot may be flipped
    /// as the whole turn, bypassing the draw entirely.
    pub flip_in_draw: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            players: 4,
            max_rounds: 6,
            selection: SelectionPolicy::LastClickWins,
            flip_in_draw: false,
        }
    }
}

impl GameConfig {
    pub fn valid_player_count(count: usize) -> bool {
        (MIN_PLAYERS..=MAX_PLAYERS).contains(&count)
    }
}
