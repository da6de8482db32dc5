//! Initial stats handed out by the entity constructors.

use peafowl_tactics::game::{
    factory::{create_egg, create_enemy, create_enemy_wave, create_island, create_player, create_unit},
    types::*,
};
use uuid::Uuid;

#[test]
fn warrior_and_soldier_start_undeployed_with_fixed_stats() {
    let owner = Uuid::new_v4();
    let warrior = create_unit(UnitType::Warrior, owner);
    let soldier = create_unit(UnitType::Soldier, owner);

    assert_eq!((warrior.health, warrior.attack_power), (45, 15));
    assert!((warrior.attack_speed - 1.3).abs() < f32::EPSILON);
    assert_eq!((soldier.health, soldier.attack_power), (35, 20));
    assert!((soldier.attack_speed - 1.0).abs() < f32::EPSILON);

    for unit in [&warrior, &soldier] {
        assert_eq!(unit.owner_id, owner);
        assert_eq!(unit.defense, 0);
        assert!(!unit.is_deployed);
        assert!(unit.position.is_none());
    }
    assert_ne!(warrior.id, soldier.id, "ids must be unique");
}

#[test]
fn island_is_seeded_with_starting_resources() {
    let owner = Uuid::new_v4();
    let island = create_island(owner, "Isle");

    assert_eq!(island.owner_id, owner);
    assert_eq!(island.resources, Resources { gold: 16, eggs: 0 });

    let kinds: Vec<BuildingKind> = island.buildings.iter().map(|b| b.kind).collect();
    assert_eq!(kinds, vec![BuildingKind::Barracks, BuildingKind::Mine, BuildingKind::Hatchery]);
    assert!(island.buildings.iter().all(|b| b.level == 1));

    assert_eq!(island.hatchery.len(), MAX_HATCHERY_SLOTS);
    assert!(island
        .hatchery
        .iter()
        .all(|s| s.egg.is_none() && !s.is_active && s.status == SlotStatus::Empty));

    assert_eq!(island.feather_inventory, FeatherInventory::default());
    assert_eq!(island.army.bonuses, ArmyBonuses::default());
    assert!(island.units.is_empty());
}

#[test]
fn player_owns_its_island() {
    let bot = create_player("Rival", true);
    assert!(bot.is_bot);
    assert_eq!(bot.island.owner_id, bot.id);
}

#[test]
fn egg_bonus_follows_color_table() {
    let green = create_egg(FeatherColor::Green);
    let blue = create_egg(FeatherColor::Blue);
    let orange = create_egg(FeatherColor::Orange);

    assert_eq!((green.bonus_type, green.bonus_value), (BonusType::Health, 20));
    assert_eq!((blue.bonus_type, blue.bonus_value), (BonusType::AttackSpeed, 20));
    assert_eq!((orange.bonus_type, orange.bonus_value), (BonusType::AttackPower, 20));
    assert!(!green.ready);
    assert_eq!(green.hatch_time, 20);
}

#[test]
fn enemy_tier_is_picked_by_wave_level() {
    assert_eq!(create_enemy(1, 1).enemy_type, EnemyType::Chick);
    assert_eq!(create_enemy(3, 3).enemy_type, EnemyType::Juvenile);
    assert_eq!(create_enemy(6, 6).enemy_type, EnemyType::Adult);
    assert_eq!(create_enemy(12, 12).enemy_type, EnemyType::Alpha);

    // Juvenile multipliers are 1.0, so the base formula shows through.
    let juvenile = create_enemy(4, 3);
    assert_eq!(juvenile.health, 50 + 4 * 20);
    assert_eq!(juvenile.attack_power, 10 + 4 * 5);
}

#[test]
fn first_wave_has_two_chicks_led_by_a_stronger_one() {
    let wave = create_enemy_wave(1);

    assert_eq!(wave.enemies.len(), 2);
    assert_eq!(wave.enemies[0].level, 2);
    assert_eq!(wave.enemies[1].level, 1);
    // round(90 * 0.8) + round(70 * 0.8)
    assert_eq!(wave.total_health, 72 + 56);
    // round(20 * 0.8) + round(15 * 0.8)
    assert_eq!(wave.total_attack_power, 16 + 12);
    assert!(!wave.defeated);
}

#[test]
fn wave_size_grows_every_three_levels() {
    assert_eq!(create_enemy_wave(2).enemies.len(), 2);
    assert_eq!(create_enemy_wave(3).enemies.len(), 3);
    assert_eq!(create_enemy_wave(9).enemies.len(), 5);

    let wave = create_enemy_wave(3);
    assert_eq!(wave.total_health, 130 + 110 + 110);
    assert_eq!(wave.total_attack_power, 30 + 25 + 25);
}
