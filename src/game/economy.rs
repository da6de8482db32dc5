//! Resource transforms on a single island.
//!
//! Every operation validates balances first and returns `false` without
//! touching state when the island cannot afford it or a reference is unknown.

use crate::game::factory::{create_egg, create_unit};
use crate::game::types::*;
use rand::Rng;
use uuid::Uuid;

/// Gold per upgrade level.
pub const UPGRADE_COST_PER_LEVEL: u32 = 30;

impl Resources {
    fn can_pay(&self, gold: u32) -> bool {
        self.gold >= gold
    }
    fn pay(&mut self, gold: u32) {
        self.gold -= gold;
    }
}

impl Island {
    /// Buys `amount` feathers for `amount / 2` gold. Without a color each
    /// feather gets its own random one.
    pub fn collect_feathers(
        &mut self,
        amount: u32,
        color: Option<FeatherColor>,
        rng: &mut impl Rng,
    ) -> bool {
        let cost = amount / 2;
        if amount == 0 || !self.resources.can_pay(cost) {
            log::debug!("{}: collect_feathers needs {cost} gold", self.name);
            return false;
        }
        self.resources.pay(cost);
        for _ in 0..amount {
            let c = color.unwrap_or_else(|| FeatherColor::random(rng));
            *self.feather_inventory.get_mut(c) += 1;
        }
        true
    }

    /// Unconditional merge, used for battle loot.
    pub fn add_feathers(&mut self, loot: &FeatherInventory) {
        self.feather_inventory.merge(loot);
    }

    /// Trains `amount` units of random type at `gold_per_unit` each.
    pub fn train_soldiers(&mut self, amount: u32, gold_per_unit: u32, rng: &mut impl Rng) -> bool {
        let Some(cost) = amount.checked_mul(gold_per_unit) else {
            log::debug!("{}: train_soldiers x{amount} is unaffordable", self.name);
            return false;
        };
        if amount == 0 || !self.resources.can_pay(cost) {
            log::debug!("{}: train_soldiers x{amount} needs {cost} gold", self.name);
            return false;
        }
        self.resources.pay(cost);
        for _ in 0..amount {
            let unit_type = UnitType::ALL[rng.random_range(0..UnitType::ALL.len())];
            self.units.push(create_unit(unit_type, self.owner_id));
        }
        self.army.soldiers += amount;
        true
    }

    /// Turns `3 * amount` feathers of `color` into `amount` eggs.
    pub fn combine_feathers(&mut self, color: FeatherColor, amount: u32) -> bool {
        let Some(needed) = FEATHERS_PER_EGG.checked_mul(amount) else {
            log::debug!("{}: combine_feathers x{amount} exceeds any inventory", self.name);
            return false;
        };
        let have = self.feather_inventory.get_mut(color);
        if amount == 0 || *have < needed {
            log::debug!("{}: combine_feathers needs {needed} {color}", self.name);
            return false;
        }
        *have -= needed;
        self.resources.eggs += amount;
        true
    }

    /// Places a new egg of `color` in the first empty slot.
    pub fn hatch_egg(&mut self, color: FeatherColor) -> bool {
        if self.resources.eggs == 0 {
            return false;
        }
        let Some(slot) = self
            .hatchery
            .iter_mut()
            .find(|s| s.status == SlotStatus::Empty && s.egg.is_none())
        else {
            log::debug!("{}: hatchery full", self.name);
            return false;
        };
        self.resources.eggs -= 1;
        slot.egg = Some(create_egg(color));
        slot.status = SlotStatus::Incubating;
        true
    }

    /// Applies the slot's egg bonus to the army. A slot applies at most once.
    pub fn activate_egg(&mut self, slot_id: u32) -> bool {
        let Some(slot) = self.hatchery.iter_mut().find(|s| s.id == slot_id) else {
            return false;
        };
        if slot.is_active {
            return false;
        }
        let Some(egg) = slot.egg.as_mut() else {
            return false;
        };
        egg.ready = true;
        self.army.bonuses.apply(egg.bonus_type, egg.bonus_value);
        slot.is_active = true;
        slot.status = SlotStatus::Ready;
        log::debug!(
            "{}: egg {} activated (+{} {:?})",
            self.name,
            egg.id,
            egg.bonus_value,
            egg.bonus_type
        );
        true
    }

    /// First slot holding an egg that has not been activated yet.
    pub fn pending_egg_slot(&self) -> Option<u32> {
        self.hatchery
            .iter()
            .find(|s| s.egg.is_some() && !s.is_active)
            .map(|s| s.id)
    }

    pub fn upgrade_building(&mut self, building_id: Uuid) -> bool {
        let Some(building) = self.buildings.iter_mut().find(|b| b.id == building_id) else {
            return false;
        };
        let cost = building.level * UPGRADE_COST_PER_LEVEL;
        if !self.resources.can_pay(cost) {
            log::debug!("{}: upgrade needs {cost} gold", self.name);
            return false;
        }
        self.resources.pay(cost);
        building.level += 1;
        building.production_rate += 1;
        true
    }
}
