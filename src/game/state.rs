//! Phase machine over the root game state.
//!
//! `Menu → Preparation → Battle → Preparation …` until the turn limit is
//! passed, which lands in `GameOver`.

use crate::game::{
    battle::{self, SkirmishResult},
    factory::{create_enemy_wave, create_player},
    types::*,
};
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Gold awarded after a won battle.
pub const VICTORY_GOLD: u32 = 4;
/// Consolation gold after a lost battle.
pub const DEFEAT_GOLD: u32 = 2;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub current_phase: Phase,
    pub current_turn: u32,
    pub player: Player,
    pub npc: Player,
    pub preparation_time_left: f32,
    pub current_enemy_wave: Option<EnemyWave>,
    /// Result of the battle fought this battle phase, if any.
    pub last_battle: Option<BattleResult>,
    pub preparation_time: f32,
    pub max_turns: u32,
}

impl GameState {
    /// Fresh state sitting in the menu.
    pub fn new(preparation_time: f32, max_turns: u32) -> Self {
        GameState {
            current_phase: Phase::Menu,
            current_turn: 1,
            player: create_player("Player", false),
            npc: create_player("Rival", true),
            preparation_time_left: preparation_time,
            current_enemy_wave: None,
            last_battle: None,
            preparation_time,
            max_turns,
        }
    }

    fn rebuild(&mut self, phase: Phase) {
        *self = GameState {
            current_phase: phase,
            ..GameState::new(self.preparation_time, self.max_turns)
        };
    }

    pub fn start_game(&mut self) {
        self.rebuild(Phase::Preparation);
        if self.current_turn > self.max_turns {
            self.current_phase = Phase::GameOver;
            log::info!("turn limit {} leaves nothing to play", self.max_turns);
            return;
        }
        log::info!("game started, turn 1");
    }

    pub fn reset_game(&mut self) {
        self.rebuild(Phase::Menu);
        log::info!("game reset to menu");
    }

    pub fn side_of(&self, player_id: Uuid) -> Option<Side> {
        if player_id == self.player.id {
            Some(Side::Local)
        } else if player_id == self.npc.id {
            Some(Side::Opponent)
        } else {
            None
        }
    }

    pub fn island(&self, side: Side) -> &Island {
        match side {
            Side::Local => &self.player.island,
            Side::Opponent => &self.npc.island,
        }
    }

    pub fn island_mut(&mut self, side: Side) -> &mut Island {
        match side {
            Side::Local => &mut self.player.island,
            Side::Opponent => &mut self.npc.island,
        }
    }

    /// Advances the preparation clock. Non-positive deltas are ignored; the
    /// battle phase starts once when the clock reaches zero.
    pub fn update_preparation_time(&mut self, delta_seconds: f32) -> bool {
        if self.current_phase != Phase::Preparation {
            return false;
        }
        let delta = if delta_seconds.is_finite() { delta_seconds.max(0.0) } else { 0.0 };
        self.preparation_time_left = (self.preparation_time_left - delta).max(0.0);
        if self.preparation_time_left <= 0.0 {
            self.end_preparation_phase();
            return true;
        }
        false
    }

    pub fn end_preparation_phase(&mut self) {
        if self.current_phase != Phase::Preparation {
            return;
        }
        self.preparation_time_left = 0.0;
        self.current_phase = Phase::Battle;
        self.current_enemy_wave = Some(create_enemy_wave(self.current_turn));
        self.last_battle = None;
        log::info!("turn {}: battle phase", self.current_turn);
    }

    /// Fights the current wave once per battle phase and banks the loot.
    pub fn process_battle(&mut self, rng: &mut impl Rng) -> Option<BattleResult> {
        if self.current_phase != Phase::Battle || self.last_battle.is_some() {
            return None;
        }
        let wave = self.current_enemy_wave.as_mut()?;
        let result = battle::simulate_battle(&self.player.island.army, wave, rng);
        wave.defeated = result.player_victory;
        self.player.island.add_feathers(&result.feathers_collected);
        self.last_battle = Some(result.clone());
        Some(result)
    }

    /// Pays out the battle reward and moves to the next turn, or to
    /// `GameOver` once the turn limit is passed.
    pub fn end_battle_phase(&mut self, player_won: bool) {
        if self.current_phase != Phase::Battle {
            return;
        }
        self.player.island.resources.gold += if player_won { VICTORY_GOLD } else { DEFEAT_GOLD };
        self.current_turn += 1;
        self.current_enemy_wave = None;
        self.last_battle = None;
        self.preparation_time_left = self.preparation_time;

        if self.is_game_over() {
            self.current_phase = Phase::GameOver;
            log::info!("game over after {} turns", self.max_turns);
        } else {
            self.current_phase = Phase::Preparation;
            log::info!("turn {}: preparation phase", self.current_turn);
        }
    }

    /// Terminal-state predicate: the turn limit has been played out.
    pub fn is_game_over(&self) -> bool {
        self.current_phase == Phase::GameOver || self.current_turn > self.max_turns
    }

    /// Pits the player's deployed units against the rival's roster and
    /// removes the fallen from both islands.
    pub fn process_skirmish(&mut self, rng: &mut impl Rng) -> Option<SkirmishResult> {
        if self.current_phase != Phase::Preparation {
            return None;
        }
        let deployed: Vec<Unit> = self
            .player
            .island
            .units
            .iter()
            .filter(|u| u.is_deployed)
            .cloned()
            .collect();
        if deployed.is_empty() || self.npc.island.units.is_empty() {
            return None;
        }

        let result = battle::simulate_detailed_battle(&deployed, &self.npc.island.units, rng);
        for island in [&mut self.player.island, &mut self.npc.island] {
            let before = island.units.len();
            island.units.retain(|u| !result.destroyed.contains(&u.id));
            let lost = (before - island.units.len()) as u32;
            island.army.soldiers = island.army.soldiers.saturating_sub(lost);
        }
        for survivor in result.local_survivors.iter().chain(&result.opponent_survivors) {
            for island in [&mut self.player.island, &mut self.npc.island] {
                if let Some(unit) = island.units.iter_mut().find(|u| u.id == survivor.id) {
                    unit.health = survivor.health;
                }
            }
        }
        Some(result)
    }
}
