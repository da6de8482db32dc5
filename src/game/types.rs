use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Number of concurrent incubation slots per island.
pub const MAX_HATCHERY_SLOTS: usize = 3;

/// Feathers consumed per crafted egg.
pub const FEATHERS_PER_EGG: u32 = 3;

/// Colored resource token.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum FeatherColor {
    Green,
    Blue,
    Orange,
}

impl FeatherColor {
    /// Priority order used wherever colors are scanned.
    pub const ALL: [FeatherColor; 3] = [FeatherColor::Green, FeatherColor::Blue, FeatherColor::Orange];

    /// Uniform pick over the three colors.
    pub fn random(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

impl fmt::Display for FeatherColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FeatherColor::Green => "green",
            FeatherColor::Blue => "blue",
            FeatherColor::Orange => "orange",
        };
        f.write_str(s)
    }
}

/// Per-color feather counts.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeatherInventory {
    pub green: u32,
    pub blue: u32,
    pub orange: u32,
}

impl FeatherInventory {
    pub fn get(&self, color: FeatherColor) -> u32 {
        match color {
            FeatherColor::Green => self.green,
            FeatherColor::Blue => self.blue,
            FeatherColor::Orange => self.orange,
        }
    }

    pub fn get_mut(&mut self, color: FeatherColor) -> &mut u32 {
        match color {
            FeatherColor::Green => &mut self.green,
            FeatherColor::Blue => &mut self.blue,
            FeatherColor::Orange => &mut self.orange,
        }
    }

    pub fn total(&self) -> u32 {
        self.green + self.blue + self.orange
    }

    /// Additive merge.
    pub fn merge(&mut self, other: &FeatherInventory) {
        self.green += other.green;
        self.blue += other.blue;
        self.orange += other.orange;
    }
}

/// Army stat an egg improves.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum BonusType {
    Health,
    AttackPower,
    AttackSpeed,
}

/// Accumulated egg bonuses. Never decreases within a game.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ArmyBonuses {
    pub health: u32,
    pub attack_power: u32,
    /// Percent.
    pub attack_speed: u32,
}

impl ArmyBonuses {
    pub fn apply(&mut self, bonus: BonusType, value: u32) {
        match bonus {
            BonusType::Health => self.health += value,
            BonusType::AttackPower => self.attack_power += value,
            BonusType::AttackSpeed => self.attack_speed += value,
        }
    }
}

/// Aggregate combat record of one side.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Army {
    pub soldiers: u32,
    /// Base health per soldier.
    pub health: u32,
    /// Base attack per soldier.
    pub attack_power: u32,
    pub attack_speed: f32,
    pub bonuses: ArmyBonuses,
}

impl Default for Army {
    fn default() -> Self {
        Army {
            soldiers: 0,
            health: 30,
            attack_power: 10,
            attack_speed: 1.0,
            bonuses: ArmyBonuses::default(),
        }
    }
}

/// Trainable unit archetypes.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UnitType {
    Warrior,
    Soldier,
}

impl UnitType {
    pub const ALL: [UnitType; 2] = [UnitType::Warrior, UnitType::Soldier];
}

/// Axial/cube hex coordinate, `q + r + s == 0`.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HexCoord {
    pub q: i32,
    pub r: i32,
    pub s: i32,
}

/// One trained unit.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Unit {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub unit_type: UnitType,
    pub owner_id: Uuid,
    pub health: i32,
    pub attack_power: i32,
    pub attack_speed: f32,
    pub defense: i32,
    pub is_deployed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<HexCoord>,
}

impl Unit {
    pub fn is_alive(&self) -> bool {
        self.health > 0
    }
}

/// Crafted egg carrying a permanent bonus.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Egg {
    pub id: Uuid,
    pub color: FeatherColor,
    pub bonus_type: BonusType,
    pub bonus_value: u32,
    pub ready: bool,
    pub hatch_time: u32,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SlotStatus {
    Empty,
    Incubating,
    Ready,
}

/// One hatchery position; holds at most one egg.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HatcherySlot {
    pub id: u32,
    pub egg: Option<Egg>,
    pub is_active: bool,
    pub status: SlotStatus,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BuildingKind {
    Barracks,
    Mine,
    Hatchery,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Building {
    pub id: Uuid,
    pub kind: BuildingKind,
    pub level: u32,
    pub production_rate: u32,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
pub struct Resources {
    pub gold: u32,
    pub eggs: u32,
}

/// Everything one player owns.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Island {
    pub id: Uuid,
    pub name: String,
    pub owner_id: Uuid,
    pub resources: Resources,
    pub buildings: Vec<Building>,
    pub army: Army,
    pub hatchery: Vec<HatcherySlot>,
    pub feather_inventory: FeatherInventory,
    pub units: Vec<Unit>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: Uuid,
    pub name: String,
    pub is_bot: bool,
    pub island: Island,
}

/// The two sides of a game.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum Side {
    Local,
    Opponent,
}

impl Side {
    pub fn other(self) -> Side {
        match self {
            Side::Local => Side::Opponent,
            Side::Opponent => Side::Local,
        }
    }
}

/// Enemy tiers, weakest first.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EnemyType {
    Chick,
    Juvenile,
    Adult,
    Alpha,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PeacockEnemy {
    pub id: Uuid,
    pub level: u32,
    pub health: u32,
    pub attack_power: u32,
    #[serde(rename = "type")]
    pub enemy_type: EnemyType,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EnemyWave {
    pub id: Uuid,
    pub level: u32,
    pub enemies: Vec<PeacockEnemy>,
    pub total_health: u32,
    pub total_attack_power: u32,
    pub defeated: bool,
}

/// Outcome of one wave battle.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BattleResult {
    pub player_victory: bool,
    pub enemies_defeated: u32,
    pub feathers_collected: FeatherInventory,
    pub player_damage: u32,
    pub remaining_player_health: u32,
}

/// Game life-cycle.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    Menu,
    Preparation,
    Battle,
    GameOver,
}
