use crate::{
    hand_score, Deck, DrawSource, DrawnCard, Event, EventBus, GameConfig, HandSlot, Phase, Player,
    RngState, RoundResult, Selection, SelectionPolicy, HAND_SLOTS,
};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GolfError {
    #[error("game is over")]
    GameOver,
    #[error("round result pending")]
    RoundPending,
    #[error("not allowed in phase {0:?}")]
    InvalidPhase(Phase),
    #[error("player {0} is not the acting player")]
    OutOfTurn(usize),
    #[error("invalid slot index {0}")]
    InvalidSlot(usize),
    #[error("slot {0} is already face up")]
    SlotFaceUp(usize),
    #[error("deck is empty")]
    EmptyDeck,
    #[error("discard pile is empty")]
    EmptyDiscard,
    #[error("no qualifying selection to confirm")]
    NothingSelected,
    #[error("invalid player count {0}")]
    InvalidPlayerCount(usize),
    #[error("no round continuation pending")]
    NoPendingRound,
}

/// One full game session. Every intent validates game-over, actor and phase
/// before touching anything, so a rejected intent leaves the state exactly
/// as it was.
#[derive(Debug)]
pub struct GameState {
    pub config: GameConfig,
    pub rng: RngState,
    pub deck: Deck,
    pub players: Vec<Player>,
    pub current_player: usize,
    pub round: u8,
    pub phase: Phase,
    pub selection: Option<Selection>,
    pub drawn: Option<DrawnCard>,
    pub round_pending: bool,
    pub game_over: bool,
    setup_flips: u8,
}

impl GameState {
    pub fn new(config: GameConfig, rng: RngState) -> Result<Self, GolfError> {
        if !GameConfig::valid_player_count(config.players) {
            return Err(GolfError::InvalidPlayerCount(config.players));
        }
        let players = (0..config.players).map(Player::new).collect();
        let mut game = Self {
            rng,
            deck: Deck::default(),
            players,
            current_player: 0,
            round: 1,
            phase: Phase::Setup,
            selection: None,
            drawn: None,
            round_pending: false,
            game_over: false,
            setup_flips: 0,
            config,
        };
        game.deal();
        Ok(game)
    }

    pub fn start_round(&mut self, events: &mut EventBus) {
        self.deal();
        events.push(Event::RoundStarted {
            round: self.round,
            players: self.players.len(),
        });
    }

    /// Fresh shuffled deck, top card seeds the discard pile, six face-down
    /// cards to each player.
    fn deal(&mut self) {
        let mut deck = Deck::standard52();
        deck.shuffle(&mut self.rng);
        if let Some(card) = deck.draw_top() {
            deck.push_discard(card);
        }
        for player in &mut self.players {
            player.round_score = 0;
            player.hand = deck
                .draw_many(HAND_SLOTS)
                .into_iter()
                .map(HandSlot::face_down)
                .collect();
        }
        self.deck = deck;
        self.current_player = 0;
        self.phase = Phase::Setup;
        self.selection = None;
        self.drawn = None;
        self.setup_flips = 0;
        self.round_pending = false;
    }

    fn ensure_live(&self) -> Result<(), GolfError> {
        if self.game_over {
            return Err(GolfError::GameOver);
        }
        if self.round_pending {
            return Err(GolfError::RoundPending);
        }
        Ok(())
    }

    fn set_selection(&mut self, choice: Selection) {
        self.selection = match (self.config.selection, self.selection) {
            (SelectionPolicy::Toggle, Some(current)) if current == choice => None,
            _ => Some(choice),
        };
    }

    pub fn select_deck(&mut self) -> Result<(), GolfError> {
        self.ensure_live()?;
        if self.phase != Phase::Draw {
            return Err(GolfError::InvalidPhase(self.phase));
        }
        // Fail closed even though a 52-card deck cannot run out in practice.
        if self.deck.remaining() == 0 {
            return Err(GolfError::EmptyDeck);
        }
        self.set_selection(Selection::Deck);
        Ok(())
    }

    pub fn select_discard(&mut self) -> Result<(), GolfError> {
        self.ensure_live()?;
        match self.phase {
            Phase::Draw => {
                if self.deck.discard_top().is_none() {
                    return Err(GolfError::EmptyDiscard);
                }
            }
            Phase::Action => {}
            Phase::Setup => return Err(GolfError::InvalidPhase(self.phase)),
        }
        self.set_selection(Selection::Discard);
        Ok(())
    }

    pub fn select_slot(&mut self, player: usize, slot: usize) -> Result<(), GolfError> {
        self.ensure_live()?;
        if player != self.current_player {
            return Err(GolfError::OutOfTurn(player));
        }
        if slot >= HAND_SLOTS {
            return Err(GolfError::InvalidSlot(slot));
        }
        match self.phase {
            Phase::Setup => {
                if self.players[player].hand[slot].face_up {
                    return Err(GolfError::SlotFaceUp(slot));
                }
            }
            Phase::Draw => {
                if !self.config.flip_in_draw {
                    return Err(GolfError::InvalidPhase(self.phase));
                }
                if self.players[player].hand[slot].face_up {
                    return Err(GolfError::SlotFaceUp(slot));
                }
            }
            Phase::Action => {}
        }
        self.set_selection(Selection::Slot(slot));
        Ok(())
    }

    pub fn confirm(&mut self, events: &mut EventBus) -> Result<(), GolfError> {
        self.ensure_live()?;
        match self.phase {
            Phase::Setup => self.confirm_setup(events),
            Phase::Draw => self.confirm_draw(events),
            Phase::Action => self.confirm_action(events),
        }
    }

    fn confirm_setup(&mut self, events: &mut EventBus) -> Result<(), GolfError> {
        let slot = match self.selection {
            Some(Selection::Slot(slot)) => slot,
            _ => return Err(GolfError::NothingSelected),
        };
        let player = self.current_player;
        if self.players[player].hand[slot].face_up {
            return Err(GolfError::SlotFaceUp(slot));
        }
        self.players[player].hand[slot].face_up = true;
        self.setup_flips += 1;
        self.selection = None;
        events.push(Event::SetupFlip { player, slot });
        if self.setup_flips >= 2 {
            self.setup_flips = 0;
            if player + 1 == self.players.len() {
                self.current_player = 0;
                self.phase = Phase::Draw;
            } else {
                self.current_player = player + 1;
            }
        }
        Ok(())
    }

    fn confirm_draw(&mut self, events: &mut EventBus) -> Result<(), GolfError> {
        match self.selection {
            Some(Selection::Deck) => {
                let card = self.deck.draw_top().ok_or(GolfError::EmptyDeck)?;
                self.drawn = Some(DrawnCard {
                    card,
                    source: DrawSource::Deck,
                });
                self.phase = Phase::Action;
                self.selection = None;
                events.push(Event::CardDrawn {
                    player: self.current_player,
                    source: DrawSource::Deck,
                    card,
                });
                Ok(())
            }
            Some(Selection::Discard) => {
                let card = self.deck.take_discard().ok_or(GolfError::EmptyDiscard)?;
                self.drawn = Some(DrawnCard {
                    card,
                    source: DrawSource::Discard,
                });
                self.phase = Phase::Action;
                self.selection = None;
                events.push(Event::CardDrawn {
                    player: self.current_player,
                    source: DrawSource::Discard,
                    card,
                });
                Ok(())
            }
            Some(Selection::Slot(slot)) if self.config.flip_in_draw => {
                let player = self.current_player;
                if self.players[player].hand[slot].face_up {
                    return Err(GolfError::SlotFaceUp(slot));
                }
                self.players[player].hand[slot].face_up = true;
                self.selection = None;
                events.push(Event::SlotFlipped { player, slot });
                self.end_turn(events);
                Ok(())
            }
            _ => Err(GolfError::NothingSelected),
        }
    }

    fn confirm_action(&mut self, events: &mut EventBus) -> Result<(), GolfError> {
        // Phase invariant: a card is held between draw and resolution.
        let drawn = match self.drawn {
            Some(drawn) => drawn,
            None => return Err(GolfError::NothingSelected),
        };
        match self.selection {
            Some(Selection::Slot(slot)) => {
                let player = self.current_player;
                let old = self.players[player].hand[slot].card;
                self.players[player].hand[slot] = HandSlot {
                    card: drawn.card,
                    face_up: true,
                };
                self.deck.push_discard(old);
                self.drawn = None;
                self.selection = None;
                events.push(Event::CardSwapped {
                    player,
                    slot,
                    placed: drawn.card,
                    discarded: old,
                });
                self.end_turn(events);
                Ok(())
            }
            Some(Selection::Discard) => {
                self.deck.push_discard(drawn.card);
                self.drawn = None;
                self.selection = None;
                events.push(Event::DrawnDiscarded {
                    player: self.current_player,
                    card: drawn.card,
                });
                self.end_turn(events);
                Ok(())
            }
            _ => Err(GolfError::NothingSelected),
        }
    }

    fn end_turn(&mut self, events: &mut EventBus) {
        self.selection = None;
        self.drawn = None;
        if self.players[self.current_player].all_face_up() {
            self.score_round(events);
            return;
        }
        self.current_player = (self.current_player + 1) % self.players.len();
        self.phase = Phase::Draw;
        events.push(Event::TurnEnded {
            next_player: self.current_player,
        });
    }

    /// Forces every hand face up, scores each by column cancellation and
    /// parks the game until `continue_round`.
    fn score_round(&mut self, events: &mut EventBus) {
        let mut results = Vec::with_capacity(self.players.len());
        for player in &mut self.players {
            for slot in &mut player.hand {
                slot.face_up = true;
            }
            let score = hand_score(&player.hand);
            player.round_score = score;
            player.total_score += score;
            results.push(RoundResult {
                player: player.id,
                round_score: score,
                total_score: player.total_score,
            });
        }
        self.round_pending = true;
        events.push(Event::RoundScored {
            round: self.round,
            results,
        });
    }

    /// Deferred continuation after the end-of-round pause: deal the next
    /// round, or end the game once the last round has been scored.
    pub fn continue_round(&mut self, events: &mut EventBus) -> Result<(), GolfError> {
        if self.game_over {
            return Err(GolfError::GameOver);
        }
        if !self.round_pending {
            return Err(GolfError::NoPendingRound);
        }
        if self.round < self.config.max_rounds {
            self.round += 1;
            self.start_round(events);
        } else {
            self.round_pending = false;
            self.game_over = true;
            events.push(Event::GameOver {
                totals: self.players.iter().map(|p| p.total_score).collect(),
            });
        }
        Ok(())
    }

    /// Full reinitialization with a new player count. This is the one intent
    /// honored after game over, since it starts a new game.
    pub fn set_player_count(
        &mut self,
        count: usize,
        events: &mut EventBus,
    ) -> Result<(), GolfError> {
        if !GameConfig::valid_player_count(count) {
            return Err(GolfError::InvalidPlayerCount(count));
        }
        self.config.players = count;
        self.players = (0..count).map(Player::new).collect();
        self.round = 1;
        self.game_over = false;
        self.start_round(events);
        Ok(())
    }
}
