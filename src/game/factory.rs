//! Constructors for fresh game entities. No side effects beyond new IDs.

use crate::game::types::*;
use uuid::Uuid;

/// Starting gold of every island.
pub const STARTING_GOLD: u32 = 16;
/// Seconds an egg incubates before it is considered hatched.
pub const EGG_HATCH_TIME: u32 = 20;
/// Flat bonus every egg grants.
pub const EGG_BONUS_VALUE: u32 = 20;

/// Combat stats of a freshly trained unit.
#[derive(Debug, Clone, Copy)]
struct UnitStats {
    health: i32,
    attack_power: i32,
    attack_speed: f32,
}

impl UnitType {
    fn stats(self) -> UnitStats {
        match self {
            UnitType::Warrior => UnitStats {
                health: 45,
                attack_power: 15,
                attack_speed: 1.3,
            },
            UnitType::Soldier => UnitStats {
                health: 35,
                attack_power: 20,
                attack_speed: 1.0,
            },
        }
    }
}

impl FeatherColor {
    /// Fixed color → bonus table.
    pub fn bonus(self) -> (BonusType, u32) {
        match self {
            FeatherColor::Green => (BonusType::Health, EGG_BONUS_VALUE),
            FeatherColor::Blue => (BonusType::AttackSpeed, EGG_BONUS_VALUE),
            FeatherColor::Orange => (BonusType::AttackPower, EGG_BONUS_VALUE),
        }
    }
}

impl EnemyType {
    /// Highest tier whose threshold is ≤ `wave_level`.
    pub fn for_wave(wave_level: u32) -> Self {
        match wave_level {
            0..=2 => EnemyType::Chick,
            3..=5 => EnemyType::Juvenile,
            6..=9 => EnemyType::Adult,
            _ => EnemyType::Alpha,
        }
    }

    /// (health, attack) multipliers.
    fn multipliers(self) -> (f64, f64) {
        match self {
            EnemyType::Chick => (0.8, 0.8),
            EnemyType::Juvenile => (1.0, 1.0),
            EnemyType::Adult => (1.3, 1.2),
            EnemyType::Alpha => (1.8, 1.5),
        }
    }
}

pub fn create_unit(unit_type: UnitType, owner_id: Uuid) -> Unit {
    let stats = unit_type.stats();
    Unit {
        id: Uuid::new_v4(),
        unit_type,
        owner_id,
        health: stats.health,
        attack_power: stats.attack_power,
        attack_speed: stats.attack_speed,
        defense: 0,
        is_deployed: false,
        position: None,
    }
}

fn create_building(kind: BuildingKind) -> Building {
    Building {
        id: Uuid::new_v4(),
        kind,
        level: 1,
        production_rate: 1,
    }
}

fn empty_slot(id: u32) -> HatcherySlot {
    HatcherySlot {
        id,
        egg: None,
        is_active: false,
        status: SlotStatus::Empty,
    }
}

pub fn create_island(owner_id: Uuid, name: &str) -> Island {
    Island {
        id: Uuid::new_v4(),
        name: name.to_owned(),
        owner_id,
        resources: Resources {
            gold: STARTING_GOLD,
            eggs: 0,
        },
        buildings: vec![
            create_building(BuildingKind::Barracks),
            create_building(BuildingKind::Mine),
            create_building(BuildingKind::Hatchery),
        ],
        army: Army::default(),
        hatchery: (0..MAX_HATCHERY_SLOTS as u32).map(empty_slot).collect(),
        feather_inventory: FeatherInventory::default(),
        units: Vec::new(),
    }
}

pub fn create_player(name: &str, is_bot: bool) -> Player {
    let id = Uuid::new_v4();
    Player {
        id,
        name: name.to_owned(),
        is_bot,
        island: create_island(id, &format!("{name}'s Island")),
    }
}

pub fn create_egg(color: FeatherColor) -> Egg {
    let (bonus_type, bonus_value) = color.bonus();
    Egg {
        id: Uuid::new_v4(),
        color,
        bonus_type,
        bonus_value,
        ready: false,
        hatch_time: EGG_HATCH_TIME,
    }
}

/// One enemy of `level`; its tier follows the wave level.
pub fn create_enemy(level: u32, wave_level: u32) -> PeacockEnemy {
    let enemy_type = EnemyType::for_wave(wave_level);
    let (hp_mult, atk_mult) = enemy_type.multipliers();
    let level_f = f64::from(level);
    PeacockEnemy {
        id: Uuid::new_v4(),
        level,
        health: ((50.0 + level_f * 20.0) * hp_mult).round() as u32,
        attack_power: ((10.0 + level_f * 5.0) * atk_mult).round() as u32,
        enemy_type,
    }
}

/// `2 + wave_level / 3` enemies; the first one is a level above the rest.
pub fn create_enemy_wave(wave_level: u32) -> EnemyWave {
    let count = 2 + wave_level / 3;
    let enemies: Vec<PeacockEnemy> = (0..count)
        .map(|i| {
            let level = if i == 0 { wave_level + 1 } else { wave_level };
            create_enemy(level, wave_level)
        })
        .collect();

    EnemyWave {
        id: Uuid::new_v4(),
        level: wave_level,
        total_health: enemies.iter().map(|e| e.health).sum(),
        total_attack_power: enemies.iter().map(|e| e.attack_power).sum(),
        enemies,
        defeated: false,
    }
}
