//! Headless driver: plays one automated game against the NPC and logs it.

use peafowl_tactics::{
    config::settings,
    game::{
        board::{deployed_positions, GRID_COLS, GRID_ROWS, LOCAL_FIRST_ROW},
        session::{SessionHandle, SessionRegistry},
        types::{FeatherColor, HexCoord, Phase, FEATHERS_PER_EGG},
    },
    protocol::{ClientMsg, ServerMsg},
};
use tokio::{
    sync::broadcast::error::RecvError,
    time::{interval, Duration},
};
use uuid::Uuid;

/// Gold kept back each turn for feathers.
const FEATHER_BUDGET: u32 = 1;
/// Every n-th turn the deployed squad skirmishes the rival.
const SKIRMISH_EVERY: u32 = 5;

/// Spends the turn's resources the simple way a human would.
async fn plan_turn(handle: &SessionHandle, turn: u32, gold_per_soldier: u32) -> anyhow::Result<()> {
    let snap = handle.snapshot().await?;
    let player_id = snap.state.player.id;
    let gold = snap.state.player.island.resources.gold;

    let recruits = gold.saturating_sub(FEATHER_BUDGET) / gold_per_soldier.max(1);
    if recruits > 0 {
        handle
            .send(ClientMsg::TrainSoldiers {
                player_id,
                amount: recruits,
            })
            .await?;
    }
    handle
        .send(ClientMsg::CollectFeathers {
            player_id,
            amount: 2,
            color: None,
        })
        .await?;

    let snap = handle.snapshot().await?;
    let island = &snap.state.player.island;

    for color in FeatherColor::ALL {
        let eggs = island.feather_inventory.get(color) / FEATHERS_PER_EGG;
        if eggs > 0 {
            handle
                .send(ClientMsg::CombineFeathers {
                    player_id,
                    color,
                    amount: eggs,
                })
                .await?;
            handle.send(ClientMsg::HatchEgg { player_id, color }).await?;
        }
    }
    for slot in island.hatchery.iter().filter(|s| s.egg.is_some() && !s.is_active) {
        handle
            .send(ClientMsg::ActivateEgg {
                player_id,
                slot_id: slot.id,
            })
            .await?;
    }

    let occupied = deployed_positions(&island.units);
    let mut free = (LOCAL_FIRST_ROW..GRID_ROWS)
        .flat_map(|r| (0..GRID_COLS).map(move |q| HexCoord::new(q, r)))
        .filter(|c| !occupied.contains_key(&c.key()));
    for unit in island.units.iter().filter(|u| !u.is_deployed) {
        let Some(position) = free.next() else { break };
        handle
            .send(ClientMsg::DeployUnit {
                player_id,
                unit_id: unit.id,
                position,
            })
            .await?;
    }

    if turn % SKIRMISH_EVERY == 0 {
        handle.send(ClientMsg::Skirmish).await?;
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let settings = settings().clone();
    log::info!("starting headless game with {settings:?}");

    let registry = SessionRegistry::new(settings.clone());
    let game_id = Uuid::new_v4();
    let handle = registry.open(game_id);
    let mut events = handle.subscribe();
    handle.send(ClientMsg::StartGame).await?;

    let mut ticker = interval(Duration::from_millis(settings.tick_ms));
    let delta_seconds = settings.tick_ms as f32 / 1000.0;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                handle.send(ClientMsg::Tick { delta_seconds }).await?;
            }
            event = events.recv() => {
                let event = match event {
                    Ok(e) => e,
                    Err(RecvError::Lagged(n)) => {
                        log::warn!("missed {n} session events");
                        continue;
                    }
                    Err(RecvError::Closed) => break,
                };
                match event {
                    ServerMsg::PhaseChanged { phase: Phase::Preparation, turn } => {
                        plan_turn(&handle, turn, settings.gold_per_soldier).await?;
                    }
                    ServerMsg::PhaseChanged { phase: Phase::Battle, .. } => {
                        handle.send(ClientMsg::ProcessBattle).await?;
                    }
                    ServerMsg::PhaseChanged { .. } => {}
                    ServerMsg::BattleResolved { turn, result } => {
                        log::info!(
                            "turn {turn}: {} ({} defeated, loot {:?})",
                            if result.player_victory { "victory" } else { "defeat" },
                            result.enemies_defeated,
                            result.feathers_collected
                        );
                        handle
                            .send(ClientMsg::EndBattle { player_won: result.player_victory })
                            .await?;
                    }
                    ServerMsg::SkirmishResolved { result } => {
                        log::info!("skirmish winner: {:?} after {} rounds", result.winner, result.rounds);
                    }
                    ServerMsg::CommandRejected { command, rejection } => {
                        log::debug!("{command} rejected: {rejection:?}");
                    }
                    ServerMsg::GameOver { turn } => {
                        let snap = handle.snapshot().await?;
                        log::info!("game over at turn {turn}");
                        log::info!("final state: {}", snap.to_json()?);
                        break;
                    }
                }
            }
        }
    }

    registry.close(game_id);
    Ok(())
}
