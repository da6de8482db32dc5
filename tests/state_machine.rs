//! Phase transitions, timers and turn bookkeeping.

use peafowl_tactics::{
    config::Settings,
    game::{
        session::GameSession,
        state::GameState,
        types::{Phase, Side},
    },
    protocol::ServerMsg,
};
use rand::{rngs::StdRng, SeedableRng};
use uuid::Uuid;

fn seeded(max_turns: u32) -> GameSession {
    GameSession::new(Settings {
        seed: Some(11),
        max_turns,
        ..Settings::default()
    })
}

#[test]
fn new_state_waits_in_the_menu() {
    let state = GameState::new(60.0, 30);
    assert_eq!(state.current_phase, Phase::Menu);
    assert_eq!(state.current_turn, 1);
    assert!(state.current_enemy_wave.is_none());
    assert!(!state.player.is_bot);
    assert!(state.npc.is_bot);
}

#[test]
fn start_game_rebuilds_players_and_enters_preparation() {
    let mut state = GameState::new(60.0, 30);
    let old_player = state.player.id;
    state.player.island.resources.gold = 999;

    state.start_game();
    assert_eq!(state.current_phase, Phase::Preparation);
    assert_eq!(state.current_turn, 1);
    assert!((state.preparation_time_left - 60.0).abs() < f32::EPSILON);
    assert_ne!(state.player.id, old_player, "fresh players");
    assert_eq!(state.player.island.resources.gold, 16);
}

#[test]
fn zero_turn_limit_starts_straight_into_game_over() {
    let mut state = GameState::new(60.0, 0);
    state.start_game();
    assert_eq!(state.current_phase, Phase::GameOver);
    assert!(state.is_game_over());
    assert!(!state.update_preparation_time(60.0));
}

#[test]
fn side_lookup_resolves_both_players() {
    let state = GameState::new(60.0, 30);
    assert_eq!(state.side_of(state.player.id), Some(Side::Local));
    assert_eq!(state.side_of(state.npc.id), Some(Side::Opponent));
    assert_eq!(state.side_of(Uuid::new_v4()), None);
    assert_eq!(state.island(Side::Opponent).owner_id, state.npc.id);
}

#[test]
fn timer_only_runs_during_preparation() {
    let mut state = GameState::new(60.0, 30);
    assert!(!state.update_preparation_time(10.0));
    assert!((state.preparation_time_left - 60.0).abs() < f32::EPSILON);
}

#[test]
fn zero_and_negative_deltas_are_ignored() {
    let mut state = GameState::new(60.0, 30);
    state.start_game();
    assert!(!state.update_preparation_time(0.0));
    assert!(!state.update_preparation_time(-5.0));
    assert!(!state.update_preparation_time(f32::NAN));
    assert!((state.preparation_time_left - 60.0).abs() < f32::EPSILON);
}

#[test]
fn crossing_zero_starts_the_battle_exactly_once() {
    let mut state = GameState::new(60.0, 30);
    state.start_game();

    assert!(!state.update_preparation_time(59.0));
    assert_eq!(state.current_phase, Phase::Preparation);

    assert!(state.update_preparation_time(5.0));
    assert_eq!(state.current_phase, Phase::Battle);
    assert_eq!(state.preparation_time_left, 0.0);
    let wave = state.current_enemy_wave.clone().expect("wave generated");
    assert_eq!(wave.level, 1);

    assert!(!state.update_preparation_time(5.0), "no second transition");
    assert_eq!(state.current_enemy_wave, Some(wave));
}

#[test]
fn battle_is_processed_once_and_loot_is_banked() {
    let mut state = GameState::new(60.0, 30);
    let mut rng = StdRng::seed_from_u64(3);
    state.start_game();
    state.player.island.army.soldiers = 100;
    state.end_preparation_phase();

    let result = state.process_battle(&mut rng).expect("first call resolves");
    assert!(result.player_victory);
    assert_eq!(result.enemies_defeated, 2);
    assert_eq!(state.player.island.feather_inventory.total(), 2);
    assert!(state.current_enemy_wave.as_ref().is_some_and(|w| w.defeated));
    assert_eq!(state.last_battle.as_ref(), Some(&result));

    assert!(state.process_battle(&mut rng).is_none(), "not re-entrant");
    assert_eq!(state.player.island.feather_inventory.total(), 2, "loot not doubled");
}

#[test]
fn battle_outside_battle_phase_is_refused() {
    let mut state = GameState::new(60.0, 30);
    let mut rng = StdRng::seed_from_u64(3);
    state.start_game();
    assert!(state.process_battle(&mut rng).is_none());
}

#[test]
fn ending_a_battle_pays_out_and_advances_the_turn() {
    let mut state = GameState::new(60.0, 30);
    state.start_game();

    state.end_preparation_phase();
    state.end_battle_phase(true);
    assert_eq!(state.player.island.resources.gold, 16 + 4);
    assert_eq!(state.current_turn, 2);
    assert_eq!(state.current_phase, Phase::Preparation);
    assert!(state.current_enemy_wave.is_none());
    assert!((state.preparation_time_left - 60.0).abs() < f32::EPSILON);

    state.end_preparation_phase();
    state.end_battle_phase(false);
    assert_eq!(state.player.island.resources.gold, 16 + 4 + 2);
    assert_eq!(state.current_turn, 3);
}

#[test]
fn end_battle_outside_battle_phase_is_ignored() {
    let mut state = GameState::new(60.0, 30);
    state.start_game();
    state.end_battle_phase(true);
    assert_eq!(state.current_turn, 1);
    assert_eq!(state.player.island.resources.gold, 16);
}

#[test]
fn turn_limit_ends_the_game() {
    let mut session = seeded(2);
    session.start_game();

    for _ in 0..2 {
        assert!(!session.is_game_over());
        session.end_preparation_phase();
        session.process_battle();
        session.end_battle_phase(false);
    }
    assert!(session.is_game_over());
    assert_eq!(session.state().current_phase, Phase::GameOver);
    assert_eq!(session.state().current_turn, 3);

    // Nothing moves once the game is over.
    assert!(session.tick(100.0).is_empty());
    session.end_preparation_phase();
    assert_eq!(session.state().current_phase, Phase::GameOver);
}

#[test]
fn reset_returns_to_the_menu_with_fresh_players() {
    let mut session = seeded(30);
    session.start_game();
    let player = session.player_id();
    session.end_preparation_phase();

    session.reset_game();
    assert_eq!(session.state().current_phase, Phase::Menu);
    assert_eq!(session.state().current_turn, 1);
    assert!(session.state().current_enemy_wave.is_none());
    assert_ne!(session.player_id(), player);
}

#[test]
fn tick_reports_the_battle_phase() {
    let mut session = seeded(30);
    session.start_game();

    assert!(session.tick(30.0).is_empty());
    let events = session.tick(30.0);
    assert_eq!(
        events,
        vec![ServerMsg::PhaseChanged {
            phase: Phase::Battle,
            turn: 1
        }]
    );
}

#[test]
fn skirmish_removes_fallen_units() {
    let mut session = seeded(30);
    session.start_game();
    let (player, npc) = (session.player_id(), session.npc_id());
    assert!(session.train_soldiers(player, 3));
    assert!(session.train_soldiers(npc, 1));

    let ids: Vec<Uuid> = session.state().player.island.units.iter().map(|u| u.id).collect();
    for (q, id) in ids.iter().enumerate() {
        session
            .deploy_unit(player, *id, peafowl_tactics::game::types::HexCoord::new(q as i32, 4))
            .unwrap();
    }

    let result = session.process_skirmish().expect("both sides have units");
    let state = session.state();
    assert_eq!(
        state.player.island.units.len() + state.npc.island.units.len(),
        4 - result.destroyed.len()
    );
    assert_eq!(
        state.player.island.army.soldiers + state.npc.island.army.soldiers,
        (4 - result.destroyed.len()) as u32
    );
}

#[test]
fn skirmish_needs_deployed_units() {
    let mut session = seeded(30);
    session.start_game();
    let (player, npc) = (session.player_id(), session.npc_id());
    assert!(session.train_soldiers(player, 1));
    assert!(session.train_soldiers(npc, 1));
    assert!(session.process_skirmish().is_none());
}
