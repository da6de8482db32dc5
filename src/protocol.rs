//! Messages exchanged between the presentation layer and a game session.

use crate::game::{
    battle::SkirmishResult,
    board::DeployError,
    types::{BattleResult, FeatherColor, HexCoord, Phase},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------- presentation → core ----------
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(tag = "type")]
pub enum ClientMsg {
    StartGame,
    ResetGame,
    /// Elapsed simulated time since the last tick.
    Tick {
        delta_seconds: f32,
    },
    EndPreparation,
    ProcessBattle,
    EndBattle {
        player_won: bool,
    },
    Skirmish,
    CollectFeathers {
        player_id: Uuid,
        amount: u32,
        color: Option<FeatherColor>,
    },
    TrainSoldiers {
        player_id: Uuid,
        amount: u32,
    },
    CombineFeathers {
        player_id: Uuid,
        color: FeatherColor,
        #[serde(default = "one")]
        amount: u32,
    },
    HatchEgg {
        player_id: Uuid,
        color: FeatherColor,
    },
    ActivateEgg {
        player_id: Uuid,
        slot_id: u32,
    },
    UpgradeBuilding {
        player_id: Uuid,
        building_id: Uuid,
    },
    DeployUnit {
        player_id: Uuid,
        unit_id: Uuid,
        position: HexCoord,
    },
    UndeployUnit {
        player_id: Uuid,
        unit_id: Uuid,
    },
}

fn one() -> u32 {
    1
}

impl ClientMsg {
    pub fn name(&self) -> &'static str {
        match self {
            ClientMsg::StartGame => "StartGame",
            ClientMsg::ResetGame => "ResetGame",
            ClientMsg::Tick { .. } => "Tick",
            ClientMsg::EndPreparation => "EndPreparation",
            ClientMsg::ProcessBattle => "ProcessBattle",
            ClientMsg::EndBattle { .. } => "EndBattle",
            ClientMsg::Skirmish => "Skirmish",
            ClientMsg::CollectFeathers { .. } => "CollectFeathers",
            ClientMsg::TrainSoldiers { .. } => "TrainSoldiers",
            ClientMsg::CombineFeathers { .. } => "CombineFeathers",
            ClientMsg::HatchEgg { .. } => "HatchEgg",
            ClientMsg::ActivateEgg { .. } => "ActivateEgg",
            ClientMsg::UpgradeBuilding { .. } => "UpgradeBuilding",
            ClientMsg::DeployUnit { .. } => "DeployUnit",
            ClientMsg::UndeployUnit { .. } => "UndeployUnit",
        }
    }
}

/// Why a command changed nothing.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(tag = "reason", rename_all = "camelCase")]
pub enum Rejection {
    UnknownPlayer,
    /// Unaffordable or unknown target; the economy no-op.
    NotApplied,
    WrongPhase,
    Deploy { detail: String },
}

impl From<DeployError> for Rejection {
    fn from(e: DeployError) -> Self {
        Rejection::Deploy {
            detail: e.to_string(),
        }
    }
}

// ---------- core → presentation ----------
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(tag = "type")]
pub enum ServerMsg {
    PhaseChanged {
        phase: Phase,
        turn: u32,
    },
    BattleResolved {
        turn: u32,
        result: BattleResult,
    },
    SkirmishResolved {
        result: SkirmishResult,
    },
    CommandRejected {
        command: String,
        rejection: Rejection,
    },
    GameOver {
        turn: u32,
    },
}
