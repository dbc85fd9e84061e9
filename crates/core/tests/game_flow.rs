use golf_core::{
    Event, EventBus, GameConfig, GameState, GolfError, Phase, RngState, Selection,
    SelectionPolicy,
};
use std::collections::HashSet;

fn new_game(seed: u64) -> GameState {
    GameState::new(GameConfig::default(), RngState::from_seed(seed)).expect("valid config")
}

fn snapshot_json(game: &GameState) -> String {
    serde_json::to_string(&game.snapshot()).expect("serialize snapshot")
}

/// Distinct card ids visible anywhere in the game. Must always be 52.
fn card_census(game: &GameState) -> usize {
    let mut ids = HashSet::new();
    for card in &game.deck.draw {
        ids.insert(card.id);
    }
    for card in &game.deck.discard {
        ids.insert(card.id);
    }
    for player in &game.players {
        for slot in &player.hand {
            ids.insert(slot.card.id);
        }
    }
    if let Some(drawn) = game.drawn {
        ids.insert(drawn.card.id);
    }
    ids.len()
}

fn first_face_down(game: &GameState, player: usize) -> usize {
    game.players[player]
        .hand
        .iter()
        .position(|slot| !slot.face_up)
        .expect("player has a face-down slot")
}

fn complete_setup(game: &mut GameState, events: &mut EventBus) {
    while game.phase == Phase::Setup {
        let player = game.current_player;
        let slot = first_face_down(game, player);
        game.select_slot(player, slot).unwrap();
        game.confirm(events).unwrap();
    }
}

/// One full draw-and-swap turn for the current player, always targeting
/// their first face-down slot.
fn play_swap_turn(game: &mut GameState, events: &mut EventBus) {
    let player = game.current_player;
    game.select_deck().unwrap();
    game.confirm(events).unwrap();
    let slot = first_face_down(game, player);
    game.select_slot(player, slot).unwrap();
    game.confirm(events).unwrap();
}

#[test]
fn deal_shape_and_card_accounting() {
    let game = new_game(7);
    assert_eq!(game.players.len(), 4);
    assert_eq!(game.round, 1);
    assert_eq!(game.phase, Phase::Setup);
    assert_eq!(game.deck.discard.len(), 1);
    // 52 minus the discard seed minus 6 cards per player.
    assert_eq!(game.deck.remaining(), 52 - 1 - 24);
    for player in &game.players {
        assert_eq!(player.hand.len(), 6);
        assert_eq!(player.face_down_count(), 6);
    }
    assert_eq!(card_census(&game), 52);
}

#[test]
fn setup_two_flips_then_next_player() {
    let mut game = new_game(11);
    let mut events = EventBus::default();

    for flip in 0..2 {
        let slot = first_face_down(&game, 0);
        game.select_slot(0, slot).unwrap();
        game.confirm(&mut events).unwrap();
        assert_eq!(game.players[0].face_down_count(), 5 - flip);
    }
    assert_eq!(game.current_player, 1);

    // A third flip for player 0 is out of turn.
    let before = snapshot_json(&game);
    assert_eq!(game.select_slot(0, 5), Err(GolfError::OutOfTurn(0)));
    assert_eq!(snapshot_json(&game), before);
}

#[test]
fn setup_rejects_face_up_slot() {
    let mut game = new_game(3);
    let mut events = EventBus::default();
    game.select_slot(0, 2).unwrap();
    game.confirm(&mut events).unwrap();

    let before = snapshot_json(&game);
    assert_eq!(game.select_slot(0, 2), Err(GolfError::SlotFaceUp(2)));
    assert_eq!(snapshot_json(&game), before);
}

#[test]
fn setup_finishes_into_draw_phase() {
    let mut game = new_game(5);
    let mut events = EventBus::default();
    complete_setup(&mut game, &mut events);
    assert_eq!(game.phase, Phase::Draw);
    assert_eq!(game.current_player, 0);
    for player in &game.players {
        assert_eq!(player.face_down_count(), 4);
    }
}

#[test]
fn draw_selection_rejections() {
    let mut game = new_game(17);
    let mut events = EventBus::default();

    // Sources are not selectable during setup.
    assert_eq!(game.select_deck(), Err(GolfError::InvalidPhase(Phase::Setup)));
    assert_eq!(
        game.select_discard(),
        Err(GolfError::InvalidPhase(Phase::Setup))
    );

    complete_setup(&mut game, &mut events);

    // Fail closed on exhausted sources.
    let stash = std::mem::take(&mut game.deck.discard);
    assert_eq!(game.select_discard(), Err(GolfError::EmptyDiscard));
    game.deck.discard = stash;

    let stash = std::mem::take(&mut game.deck.draw);
    assert_eq!(game.select_deck(), Err(GolfError::EmptyDeck));
    game.deck.draw = stash;

    // Slots are not draw sources under the default rules.
    assert_eq!(
        game.select_slot(0, 0),
        Err(GolfError::InvalidPhase(Phase::Draw))
    );
}

#[test]
fn confirm_without_selection_is_a_stable_no_op() {
    let mut game = new_game(23);
    let mut events = EventBus::default();
    complete_setup(&mut game, &mut events);

    let before = snapshot_json(&game);
    for _ in 0..3 {
        assert_eq!(game.confirm(&mut events), Err(GolfError::NothingSelected));
        assert_eq!(snapshot_json(&game), before);
    }
}

#[test]
fn swap_moves_old_card_to_discard_top() {
    let mut game = new_game(29);
    let mut events = EventBus::default();
    complete_setup(&mut game, &mut events);

    game.select_deck().unwrap();
    game.confirm(&mut events).unwrap();
    assert_eq!(game.phase, Phase::Action);
    assert_eq!(card_census(&game), 52);

    // The deck is not a legal target once a card is held.
    assert_eq!(game.select_deck(), Err(GolfError::InvalidPhase(Phase::Action)));

    let drawn = game.drawn.expect("card held after draw").card;
    let slot = first_face_down(&game, 0);
    let old = game.players[0].hand[slot].card;

    game.select_slot(0, slot).unwrap();
    game.confirm(&mut events).unwrap();

    assert_eq!(game.players[0].hand[slot].card, drawn);
    assert!(game.players[0].hand[slot].face_up);
    assert_eq!(game.deck.discard_top(), Some(&old));
    assert!(game.drawn.is_none());
    assert_eq!(game.current_player, 1);
    assert_eq!(game.phase, Phase::Draw);
    assert_eq!(card_census(&game), 52);
}

#[test]
fn discarding_the_drawn_card_ends_the_turn() {
    let mut game = new_game(31);
    let mut events = EventBus::default();
    complete_setup(&mut game, &mut events);

    game.select_deck().unwrap();
    game.confirm(&mut events).unwrap();
    let drawn = game.drawn.unwrap().card;

    game.select_discard().unwrap();
    game.confirm(&mut events).unwrap();

    assert_eq!(game.deck.discard_top(), Some(&drawn));
    assert!(game.drawn.is_none());
    assert_eq!(game.current_player, 1);
    assert_eq!(game.phase, Phase::Draw);
    assert_eq!(card_census(&game), 52);
}

#[test]
fn drawing_from_discard_takes_its_top_card() {
    let mut game = new_game(37);
    let mut events = EventBus::default();
    complete_setup(&mut game, &mut events);

    let top = *game.deck.discard_top().unwrap();
    game.select_discard().unwrap();
    game.confirm(&mut events).unwrap();

    let drawn = game.drawn.unwrap();
    assert_eq!(drawn.card, top);
    assert_eq!(game.phase, Phase::Action);
    assert_eq!(card_census(&game), 52);
}

#[test]
fn completing_a_hand_scores_all_players_immediately() {
    let mut game = new_game(41);
    let mut events = EventBus::default();
    complete_setup(&mut game, &mut events);

    // Leave player 0 exactly one face-down slot.
    for slot in &mut game.players[0].hand[1..] {
        slot.face_up = true;
    }
    game.players[0].hand[0].face_up = false;

    game.select_deck().unwrap();
    game.confirm(&mut events).unwrap();
    game.select_slot(0, 0).unwrap();
    game.confirm(&mut events).unwrap();

    assert!(game.round_pending);
    for player in &game.players {
        assert!(player.all_face_up(), "scoring forces every hand face up");
        assert_eq!(player.total_score, player.round_score);
    }
    let scored = events
        .drain()
        .any(|event| matches!(event, Event::RoundScored { round: 1, .. }));
    assert!(scored);

    // Gameplay intents are parked until the continuation runs.
    assert_eq!(game.select_deck(), Err(GolfError::RoundPending));
    assert_eq!(game.confirm(&mut events), Err(GolfError::RoundPending));
    assert_eq!(
        game.continue_round(&mut events),
        Ok(()),
        "continuation deals the next round"
    );
    assert_eq!(game.round, 2);
    assert_eq!(game.phase, Phase::Setup);
}

#[test]
fn full_game_runs_exactly_six_rounds() {
    let mut game = new_game(0xC0FFEE);
    let mut events = EventBus::default();
    let mut rounds_scored = 0;

    while !game.game_over {
        assert_eq!(card_census(&game), 52);
        if game.round_pending {
            rounds_scored += 1;
            game.continue_round(&mut events).unwrap();
        } else if game.phase == Phase::Setup {
            complete_setup(&mut game, &mut events);
        } else {
            play_swap_turn(&mut game, &mut events);
        }
    }

    assert_eq!(rounds_scored, 6);
    assert_eq!(game.round, 6);
    for player in &game.players {
        assert!(player.total_score >= 0);
    }
    let over = events
        .drain()
        .any(|event| matches!(event, Event::GameOver { .. }));
    assert!(over);

    // Nothing moves after game over.
    let before = snapshot_json(&game);
    assert_eq!(game.select_deck(), Err(GolfError::GameOver));
    assert_eq!(game.select_discard(), Err(GolfError::GameOver));
    assert_eq!(game.select_slot(0, 0), Err(GolfError::GameOver));
    assert_eq!(game.confirm(&mut events), Err(GolfError::GameOver));
    assert_eq!(game.continue_round(&mut events), Err(GolfError::GameOver));
    assert_eq!(snapshot_json(&game), before);
}

#[test]
fn toggle_policy_deselects_on_second_click() {
    let config = GameConfig {
        selection: SelectionPolicy::Toggle,
        ..GameConfig::default()
    };
    let mut game = GameState::new(config, RngState::from_seed(43)).unwrap();
    let mut events = EventBus::default();

    game.select_slot(0, 1).unwrap();
    assert_eq!(game.selection, Some(Selection::Slot(1)));
    game.select_slot(0, 1).unwrap();
    assert_eq!(game.selection, None);
    assert_eq!(game.confirm(&mut events), Err(GolfError::NothingSelected));

    complete_setup(&mut game, &mut events);
    game.select_deck().unwrap();
    game.select_deck().unwrap();
    assert_eq!(game.selection, None);
}

#[test]
fn last_click_wins_overwrites_selection() {
    let mut game = new_game(47);
    let mut events = EventBus::default();
    complete_setup(&mut game, &mut events);

    game.select_deck().unwrap();
    assert_eq!(game.selection, Some(Selection::Deck));
    game.select_discard().unwrap();
    assert_eq!(game.selection, Some(Selection::Discard));
    game.select_deck().unwrap();
    assert_eq!(game.selection, Some(Selection::Deck));
}

#[test]
fn flip_in_draw_variant_skips_the_draw() {
    let config = GameConfig {
        flip_in_draw: true,
        ..GameConfig::default()
    };
    let mut game = GameState::new(config, RngState::from_seed(53)).unwrap();
    let mut events = EventBus::default();
    complete_setup(&mut game, &mut events);

    let remaining = game.deck.remaining();
    let slot = first_face_down(&game, 0);
    game.select_slot(0, slot).unwrap();
    game.confirm(&mut events).unwrap();

    assert!(game.players[0].hand[slot].face_up);
    assert!(game.drawn.is_none());
    assert_eq!(game.deck.remaining(), remaining, "no card was drawn");
    assert_eq!(game.current_player, 1);
}

#[test]
fn set_player_count_reinitializes_the_game() {
    let mut game = new_game(59);
    let mut events = EventBus::default();
    complete_setup(&mut game, &mut events);
    play_swap_turn(&mut game, &mut events);

    game.set_player_count(6, &mut events).unwrap();
    assert_eq!(game.players.len(), 6);
    assert_eq!(game.round, 1);
    assert_eq!(game.phase, Phase::Setup);
    assert!(!game.game_over);
    for player in &game.players {
        assert_eq!(player.total_score, 0);
        assert_eq!(player.face_down_count(), 6);
    }
    assert_eq!(card_census(&game), 52);

    assert_eq!(
        game.set_player_count(1, &mut events),
        Err(GolfError::InvalidPlayerCount(1))
    );
    assert_eq!(
        game.set_player_count(9, &mut events),
        Err(GolfError::InvalidPlayerCount(9))
    );
}

#[test]
fn invalid_player_count_rejected_at_construction() {
    let config = GameConfig {
        players: 1,
        ..GameConfig::default()
    };
    assert!(matches!(
        GameState::new(config, RngState::from_seed(1)),
        Err(GolfError::InvalidPlayerCount(1))
    ));
}

#[test]
fn snapshot_hides_face_down_cards() {
    let mut game = new_game(61);
    let mut events = EventBus::default();
    game.select_slot(0, 4).unwrap();
    game.confirm(&mut events).unwrap();

    let snapshot = game.snapshot();
    let hand = &snapshot.players[0].hand;
    assert!(hand[4].face_up);
    assert!(hand[4].card.is_some());
    for (index, slot) in hand.iter().enumerate() {
        if index != 4 {
            assert!(!slot.face_up);
            assert!(slot.card.is_none(), "face-down card must not leak");
        }
    }
    assert_eq!(snapshot.deck_remaining, game.deck.remaining());
    assert!(snapshot.discard_top.is_some());
}

#[test]
fn seeded_games_deal_identically() {
    let first = new_game(0xBEEF);
    let second = new_game(0xBEEF);
    for (a, b) in first.players.iter().zip(&second.players) {
        for (x, y) in a.hand.iter().zip(&b.hand) {
            assert_eq!(x.card, y.card);
        }
    }
    assert_eq!(first.deck.discard_top(), second.deck.discard_top());
}
