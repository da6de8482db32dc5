//! Rule ladder of the computer opponent.

use peafowl_tactics::game::{
    factory::create_island,
    npc::{run_policy, NpcActions},
    types::{FeatherColor, Island},
};
use rand::{rngs::StdRng, SeedableRng};
use uuid::Uuid;

fn bot_island(gold: u32) -> Island {
    let mut island = create_island(Uuid::new_v4(), "Rival Isle");
    island.resources.gold = gold;
    island
}

#[test]
fn poor_npc_with_no_stock_does_nothing() {
    let mut island = bot_island(16);
    let done = run_policy(&mut island, 5, &mut StdRng::seed_from_u64(1));
    assert_eq!(done, NpcActions::default());
    assert_eq!(island.resources.gold, 16);
}

#[test]
fn rich_npc_trains_five_and_collects_three() {
    let mut island = bot_island(60);
    let done = run_policy(&mut island, 5, &mut StdRng::seed_from_u64(2));

    assert!(done.trained);
    assert!(done.collected);
    assert_eq!(island.units.len(), 5);
    assert_eq!(island.army.soldiers, 5);
    // 60 - 25 for soldiers - 1 for feathers
    assert_eq!(island.resources.gold, 34);
    // Three random feathers, possibly already crafted into a hatched egg.
    let crafted = island.hatchery.iter().filter(|s| s.egg.is_some()).count() as u32;
    assert_eq!(island.feather_inventory.total() + 3 * crafted, 3);
}

#[test]
fn middle_gold_only_collects() {
    let mut island = bot_island(40);
    let done = run_policy(&mut island, 5, &mut StdRng::seed_from_u64(3));
    assert!(!done.trained);
    assert!(done.collected);
    assert!(island.units.is_empty());
    assert_eq!(island.resources.gold, 39);
}

#[test]
fn combines_first_eligible_color_then_hatches_and_activates() {
    let mut island = bot_island(0);
    island.feather_inventory.green = 3;
    island.feather_inventory.blue = 4;

    let done = run_policy(&mut island, 5, &mut StdRng::seed_from_u64(4));

    assert_eq!(done.combined, Some(FeatherColor::Green), "green has priority");
    assert_eq!(island.feather_inventory.green, 0);
    assert_eq!(island.feather_inventory.blue, 4, "only one color per run");
    assert!(done.hatched);
    assert_eq!(done.activated, Some(0));
    assert_eq!(island.resources.eggs, 0);
    assert!(island.hatchery[0].is_active);

    let b = island.army.bonuses;
    assert_eq!(b.health + b.attack_power + b.attack_speed, 20);
}

#[test]
fn second_run_combines_the_next_color() {
    let mut island = bot_island(0);
    island.feather_inventory.green = 3;
    island.feather_inventory.blue = 4;
    let mut rng = StdRng::seed_from_u64(5);

    run_policy(&mut island, 5, &mut rng);
    let done = run_policy(&mut island, 5, &mut rng);

    assert_eq!(done.combined, Some(FeatherColor::Blue));
    assert_eq!(island.feather_inventory.blue, 1);
    assert_eq!(island.hatchery.iter().filter(|s| s.is_active).count(), 2);
}
