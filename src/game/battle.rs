use crate::game::types::*;
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Round cap of the pairwise resolver.
pub const MAX_SKIRMISH_ROUNDS: u32 = 20;

/// Aggregate power of an army with bonuses applied.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ArmyStats {
    pub total_health: u32,
    pub total_attack_power: u32,
}

/// Attack speed acts as a flat damage multiplier, not as action frequency.
pub fn calculate_army_stats(army: &Army) -> ArmyStats {
    let soldiers = u64::from(army.soldiers);
    let bonuses = &army.bonuses;
    let total_health = soldiers * u64::from(army.health + bonuses.health);
    let per_soldier = f64::from(army.attack_power + bonuses.attack_power);
    let speed_mult = 1.0 + f64::from(bonuses.attack_speed) / 100.0;
    let total_attack_power = (soldiers as f64 * per_soldier * speed_mult).floor();

    ArmyStats {
        total_health: u32::try_from(total_health).unwrap_or(u32::MAX),
        total_attack_power: total_attack_power.min(f64::from(u32::MAX)) as u32,
    }
}

/// One random-colored feather per defeated enemy.
pub fn collect_feathers_from_enemies(defeated: u32, rng: &mut impl Rng) -> FeatherInventory {
    let mut loot = FeatherInventory::default();
    for _ in 0..defeated {
        *loot.get_mut(FeatherColor::random(rng)) += 1;
    }
    loot
}

/// Single-exchange resolution of an army against a wave.
pub fn simulate_battle(army: &Army, wave: &EnemyWave, rng: &mut impl Rng) -> BattleResult {
    let stats = calculate_army_stats(army);
    let damage_to_enemies = stats.total_attack_power;
    let damage_to_player = wave.total_attack_power;
    let enemy_count = wave.enemies.len() as u32;

    let player_victory = damage_to_enemies >= wave.total_health;
    let enemies_defeated = if player_victory {
        enemy_count
    } else {
        // Exact floor of damage / health * count.
        (u64::from(damage_to_enemies) * u64::from(enemy_count) / u64::from(wave.total_health)) as u32
    };

    let feathers_collected = collect_feathers_from_enemies(enemies_defeated, rng);

    log::info!(
        "battle vs wave {}: atk {} / hp {} → {} of {} defeated",
        wave.level,
        damage_to_enemies,
        wave.total_health,
        enemies_defeated,
        enemy_count
    );

    BattleResult {
        player_victory,
        enemies_defeated,
        feathers_collected,
        // Excess damage beyond the army's health pool.
        player_damage: damage_to_player.saturating_sub(stats.total_health),
        remaining_player_health: stats.total_health.saturating_sub(damage_to_player),
    }
}

/// Outcome of a pairwise skirmish.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SkirmishResult {
    /// `None` on a draw.
    pub winner: Option<Side>,
    pub rounds: u32,
    pub local_survivors: Vec<Unit>,
    pub opponent_survivors: Vec<Unit>,
    pub destroyed: Vec<Uuid>,
}

fn strike(attackers: &[Unit], defenders: &mut Vec<Unit>, destroyed: &mut Vec<Uuid>, rng: &mut impl Rng) {
    if attackers.is_empty() || defenders.is_empty() {
        return;
    }
    let attacker = &attackers[rng.random_range(0..attackers.len())];
    let target = rng.random_range(0..defenders.len());
    let defender = &mut defenders[target];
    let damage = (attacker.attack_power - defender.defense / 2).max(1);
    defender.health -= damage;
    if !defender.is_alive() {
        destroyed.push(defender.id);
        defenders.remove(target);
    }
}

/// Round-based unit-versus-unit resolution. Each round every side strikes
/// once with a random living unit at a random living enemy.
pub fn simulate_detailed_battle(local: &[Unit], opponent: &[Unit], rng: &mut impl Rng) -> SkirmishResult {
    let mut local: Vec<Unit> = local.iter().filter(|u| u.is_alive()).cloned().collect();
    let mut opponent: Vec<Unit> = opponent.iter().filter(|u| u.is_alive()).cloned().collect();
    let mut destroyed = Vec::new();
    let mut rounds = 0;

    while rounds < MAX_SKIRMISH_ROUNDS && !local.is_empty() && !opponent.is_empty() {
        rounds += 1;
        strike(&local, &mut opponent, &mut destroyed, rng);
        strike(&opponent, &mut local, &mut destroyed, rng);
    }

    let winner = match local.len().cmp(&opponent.len()) {
        std::cmp::Ordering::Greater => Some(Side::Local),
        std::cmp::Ordering::Less => Some(Side::Opponent),
        std::cmp::Ordering::Equal => None,
    };
    log::info!(
        "skirmish over after {rounds} rounds: {} vs {} survivors",
        local.len(),
        opponent.len()
    );

    SkirmishResult {
        winner,
        rounds,
        local_survivors: local,
        opponent_survivors: opponent,
        destroyed,
    }
}
