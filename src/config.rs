//! Runtime configuration for a game session.

use once_cell::sync::Lazy;
use std::env;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Seconds of preparation before each battle.
    pub preparation_time: f32,
    /// Simulated seconds between two NPC policy runs.
    pub npc_action_interval: f32,
    /// Driver tick period (milliseconds).
    pub tick_ms: u64,
    /// Canonical training price.
    pub gold_per_soldier: u32,
    /// Turns played before the game ends.
    pub max_turns: u32,
    /// Fixed RNG seed; random when unset.
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            preparation_time: 60.0,
            npc_action_interval: 5.0,
            tick_ms: 500,
            gold_per_soldier: 5,
            max_turns: 30,
            seed: None,
        }
    }
}

fn var<T: FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.parse::<T>().ok())
}

impl Settings {
    pub fn from_env() -> Self {
        let defaults = Settings::default();
        Settings {
            preparation_time: var("PREPARATION_TIME").unwrap_or(defaults.preparation_time),
            npc_action_interval: var("NPC_ACTION_INTERVAL").unwrap_or(defaults.npc_action_interval),
            tick_ms: var("TICK_MS").unwrap_or(defaults.tick_ms),
            gold_per_soldier: var("GOLD_PER_SOLDIER").unwrap_or(defaults.gold_per_soldier),
            max_turns: var("MAX_TURNS")
                .filter(|&turns: &u32| turns > 0)
                .unwrap_or(defaults.max_turns),
            seed: var("GAME_SEED"),
        }
    }
}

static SETTINGS: Lazy<Settings> = Lazy::new(Settings::from_env);

pub fn settings() -> &'static Settings {
    &SETTINGS
}
