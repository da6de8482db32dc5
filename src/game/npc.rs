//! Rule ladder the computer opponent runs during preparation.

use crate::game::types::{FeatherColor, Island, FEATHERS_PER_EGG};
use rand::Rng;

const TRAIN_THRESHOLD: u32 = 50;
const TRAIN_BATCH: u32 = 5;
const COLLECT_THRESHOLD: u32 = 30;
const COLLECT_BATCH: u32 = 3;

/// What one invocation of the policy did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NpcActions {
    pub trained: bool,
    pub collected: bool,
    pub combined: Option<FeatherColor>,
    pub hatched: bool,
    pub activated: Option<u32>,
}

/// Every rung is checked independently against the island as it stands
/// after the previous rungs.
pub fn run_policy(island: &mut Island, gold_per_soldier: u32, rng: &mut impl Rng) -> NpcActions {
    let mut done = NpcActions::default();

    if island.resources.gold >= TRAIN_THRESHOLD {
        done.trained = island.train_soldiers(TRAIN_BATCH, gold_per_soldier, rng);
    }

    if island.resources.gold >= COLLECT_THRESHOLD {
        done.collected = island.collect_feathers(COLLECT_BATCH, None, rng);
    }

    if let Some(color) = FeatherColor::ALL
        .into_iter()
        .find(|c| island.feather_inventory.get(*c) >= FEATHERS_PER_EGG)
    {
        if island.combine_feathers(color, 1) {
            done.combined = Some(color);
        }
    }

    if island.resources.eggs > 0 {
        done.hatched = island.hatch_egg(FeatherColor::random(rng));
        if let Some(slot_id) = island.pending_egg_slot() {
            if island.activate_egg(slot_id) {
                done.activated = Some(slot_id);
            }
        }
    }

    if done != NpcActions::default() {
        log::debug!("npc {}: {done:?}", island.name);
    }
    done
}
