//! One game session = state + seeded RNG + settings.
//!
//! `GameSession` is the synchronous core. `spawn_session` wraps it in a
//! single tokio task so every mutation is serialized through one channel;
//! `SessionRegistry` routes commands to sessions by game id.

use crate::{
    config::Settings,
    game::{
        battle::SkirmishResult,
        board::{BoardLayout, DeployError},
        npc,
        snapshot::Snapshot,
        state::GameState,
        types::{BattleResult, FeatherColor, FeatherInventory, HexCoord, Island, Phase, Side},
    },
    protocol::{ClientMsg, Rejection, ServerMsg},
};
use dashmap::DashMap;
use rand::{rngs::StdRng, SeedableRng};
use tokio::sync::{broadcast, mpsc, oneshot};
use uuid::Uuid;

#[derive(Debug)]
pub struct GameSession {
    state: GameState,
    rng: StdRng,
    settings: Settings,
    layout: BoardLayout,
    /// Simulated seconds since the NPC last acted.
    npc_clock: f32,
}

impl GameSession {
    pub fn new(settings: Settings) -> Self {
        Self::with_layout(settings, BoardLayout::default())
    }

    pub fn with_layout(settings: Settings, layout: BoardLayout) -> Self {
        let seed = settings.seed.unwrap_or_else(rand::random);
        log::debug!("session seeded with {seed}");
        GameSession {
            state: GameState::new(settings.preparation_time, settings.max_turns),
            rng: StdRng::seed_from_u64(seed),
            settings,
            layout,
            npc_clock: 0.0,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn layout(&self) -> BoardLayout {
        self.layout
    }

    pub fn player_id(&self) -> Uuid {
        self.state.player.id
    }

    pub fn npc_id(&self) -> Uuid {
        self.state.npc.id
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.state)
    }

    fn island_mut(&mut self, player_id: Uuid) -> Option<&mut Island> {
        let side = self.state.side_of(player_id)?;
        Some(self.state.island_mut(side))
    }

    // ----- phases -----------------------------------------------------------

    pub fn start_game(&mut self) {
        self.npc_clock = 0.0;
        self.state.start_game();
    }

    pub fn reset_game(&mut self) {
        self.npc_clock = 0.0;
        self.state.reset_game();
    }

    /// Drives the preparation clock and the NPC cadence by `delta_seconds`.
    pub fn tick(&mut self, delta_seconds: f32) -> Vec<ServerMsg> {
        if self.state.current_phase != Phase::Preparation {
            return Vec::new();
        }
        let delta = if delta_seconds.is_finite() { delta_seconds.max(0.0) } else { 0.0 };

        // Preparation never lasts longer than the time left on its clock.
        let delta = delta.min(self.state.preparation_time_left);

        let interval = self.settings.npc_action_interval;
        if interval > 0.0 {
            self.npc_clock += delta;
            let runs = (self.npc_clock / interval).floor() as u32;
            self.npc_clock %= interval;
            let gold_per_soldier = self.settings.gold_per_soldier;
            for _ in 0..runs {
                npc::run_policy(self.state.island_mut(Side::Opponent), gold_per_soldier, &mut self.rng);
            }
        }

        if self.state.update_preparation_time(delta) {
            self.npc_clock = 0.0;
            return vec![self.phase_changed()];
        }
        Vec::new()
    }

    pub fn end_preparation_phase(&mut self) {
        self.npc_clock = 0.0;
        self.state.end_preparation_phase();
    }

    pub fn process_battle(&mut self) -> Option<BattleResult> {
        self.state.process_battle(&mut self.rng)
    }

    pub fn end_battle_phase(&mut self, player_won: bool) {
        self.state.end_battle_phase(player_won);
    }

    pub fn process_skirmish(&mut self) -> Option<SkirmishResult> {
        self.state.process_skirmish(&mut self.rng)
    }

    pub fn is_game_over(&self) -> bool {
        self.state.is_game_over()
    }

    // ----- economy ----------------------------------------------------------

    pub fn collect_feathers(&mut self, player_id: Uuid, amount: u32, color: Option<FeatherColor>) -> bool {
        let Some(side) = self.state.side_of(player_id) else {
            return false;
        };
        self.state.island_mut(side).collect_feathers(amount, color, &mut self.rng)
    }

    pub fn add_feathers(&mut self, player_id: Uuid, loot: &FeatherInventory) -> bool {
        match self.island_mut(player_id) {
            Some(island) => {
                island.add_feathers(loot);
                true
            }
            None => false,
        }
    }

    pub fn train_soldiers(&mut self, player_id: Uuid, amount: u32) -> bool {
        let Some(side) = self.state.side_of(player_id) else {
            return false;
        };
        let gold_per_soldier = self.settings.gold_per_soldier;
        self.state
            .island_mut(side)
            .train_soldiers(amount, gold_per_soldier, &mut self.rng)
    }

    pub fn combine_feathers(&mut self, player_id: Uuid, color: FeatherColor, amount: u32) -> bool {
        self.island_mut(player_id)
            .is_some_and(|island| island.combine_feathers(color, amount))
    }

    pub fn hatch_egg(&mut self, player_id: Uuid, color: FeatherColor) -> bool {
        self.island_mut(player_id)
            .is_some_and(|island| island.hatch_egg(color))
    }

    pub fn activate_egg(&mut self, player_id: Uuid, slot_id: u32) -> bool {
        self.island_mut(player_id)
            .is_some_and(|island| island.activate_egg(slot_id))
    }

    pub fn upgrade_building(&mut self, player_id: Uuid, building_id: Uuid) -> bool {
        self.island_mut(player_id)
            .is_some_and(|island| island.upgrade_building(building_id))
    }

    // ----- deployment -------------------------------------------------------

    pub fn deploy_unit(&mut self, player_id: Uuid, unit_id: Uuid, at: HexCoord) -> Result<(), DeployError> {
        let side = self.state.side_of(player_id).ok_or(DeployError::UnknownPlayer)?;
        let layout = self.layout;
        self.state.island_mut(side).deploy_unit(side, layout, unit_id, at)
    }

    pub fn undeploy_unit(&mut self, player_id: Uuid, unit_id: Uuid) -> bool {
        self.island_mut(player_id)
            .is_some_and(|island| island.undeploy_unit(unit_id))
    }

    // ----- command dispatch -------------------------------------------------

    fn phase_changed(&self) -> ServerMsg {
        ServerMsg::PhaseChanged {
            phase: self.state.current_phase,
            turn: self.state.current_turn,
        }
    }

    fn known(&self, player_id: Uuid) -> Result<(), Rejection> {
        self.state
            .side_of(player_id)
            .map(|_| ())
            .ok_or(Rejection::UnknownPlayer)
    }

    fn applied(ok: bool) -> Result<Vec<ServerMsg>, Rejection> {
        if ok {
            Ok(Vec::new())
        } else {
            Err(Rejection::NotApplied)
        }
    }

    fn in_phase(&self, phase: Phase) -> Result<(), Rejection> {
        if self.state.current_phase == phase {
            Ok(())
        } else {
            Err(Rejection::WrongPhase)
        }
    }

    fn handle(&mut self, msg: ClientMsg) -> Result<Vec<ServerMsg>, Rejection> {
        match msg {
            ClientMsg::StartGame => {
                self.start_game();
                Ok(vec![self.phase_changed()])
            }
            ClientMsg::ResetGame => {
                self.reset_game();
                Ok(vec![self.phase_changed()])
            }
            ClientMsg::Tick { delta_seconds } => Ok(self.tick(delta_seconds)),
            ClientMsg::EndPreparation => {
                self.in_phase(Phase::Preparation)?;
                self.end_preparation_phase();
                Ok(vec![self.phase_changed()])
            }
            ClientMsg::ProcessBattle => {
                self.in_phase(Phase::Battle)?;
                let result = self.process_battle().ok_or(Rejection::NotApplied)?;
                Ok(vec![ServerMsg::BattleResolved {
                    turn: self.state.current_turn,
                    result,
                }])
            }
            ClientMsg::EndBattle { player_won } => {
                self.in_phase(Phase::Battle)?;
                self.end_battle_phase(player_won);
                if self.is_game_over() {
                    Ok(vec![
                        self.phase_changed(),
                        ServerMsg::GameOver {
                            turn: self.state.current_turn,
                        },
                    ])
                } else {
                    Ok(vec![self.phase_changed()])
                }
            }
            ClientMsg::Skirmish => {
                self.in_phase(Phase::Preparation)?;
                let result = self.process_skirmish().ok_or(Rejection::NotApplied)?;
                Ok(vec![ServerMsg::SkirmishResolved { result }])
            }
            ClientMsg::CollectFeathers {
                player_id,
                amount,
                color,
            } => {
                self.known(player_id)?;
                Self::applied(self.collect_feathers(player_id, amount, color))
            }
            ClientMsg::TrainSoldiers { player_id, amount } => {
                self.known(player_id)?;
                Self::applied(self.train_soldiers(player_id, amount))
            }
            ClientMsg::CombineFeathers {
                player_id,
                color,
                amount,
            } => {
                self.known(player_id)?;
                Self::applied(self.combine_feathers(player_id, color, amount))
            }
            ClientMsg::HatchEgg { player_id, color } => {
                self.known(player_id)?;
                Self::applied(self.hatch_egg(player_id, color))
            }
            ClientMsg::ActivateEgg { player_id, slot_id } => {
                self.known(player_id)?;
                Self::applied(self.activate_egg(player_id, slot_id))
            }
            ClientMsg::UpgradeBuilding {
                player_id,
                building_id,
            } => {
                self.known(player_id)?;
                Self::applied(self.upgrade_building(player_id, building_id))
            }
            ClientMsg::DeployUnit {
                player_id,
                unit_id,
                position,
            } => {
                self.known(player_id)?;
                self.deploy_unit(player_id, unit_id, position)?;
                Ok(Vec::new())
            }
            ClientMsg::UndeployUnit { player_id, unit_id } => {
                self.known(player_id)?;
                Self::applied(self.undeploy_unit(player_id, unit_id))
            }
        }
    }

    /// Applies one command and returns the events it produced. A command
    /// that changes nothing yields a single `CommandRejected`.
    pub fn apply(&mut self, msg: ClientMsg) -> Vec<ServerMsg> {
        let command = msg.name();
        match self.handle(msg) {
            Ok(events) => events,
            Err(rejection) => {
                log::debug!("{command} rejected: {rejection:?}");
                vec![ServerMsg::CommandRejected {
                    command: command.to_owned(),
                    rejection,
                }]
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Actor
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub enum DispatchErr {
    ChannelClosed,
}

impl std::fmt::Display for DispatchErr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DispatchErr::ChannelClosed => f.write_str("session channel closed"),
        }
    }
}

impl std::error::Error for DispatchErr {}

#[derive(Debug)]
enum Envelope {
    Client(ClientMsg),
    Snapshot(oneshot::Sender<Snapshot>),
}

/// Cloneable handle to a running session task.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    tx: mpsc::Sender<Envelope>,
    events: broadcast::Sender<ServerMsg>,
}

impl SessionHandle {
    pub async fn send(&self, msg: ClientMsg) -> Result<(), DispatchErr> {
        self.tx
            .send(Envelope::Client(msg))
            .await
            .map_err(|_| DispatchErr::ChannelClosed)
    }

    /// Current state as seen after every command sent before this call.
    pub async fn snapshot(&self) -> Result<Snapshot, DispatchErr> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(Envelope::Snapshot(reply))
            .await
            .map_err(|_| DispatchErr::ChannelClosed)?;
        rx.await.map_err(|_| DispatchErr::ChannelClosed)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ServerMsg> {
        self.events.subscribe()
    }
}

/// Spawns the session task. Must be called inside a tokio runtime; the task
/// ends once every handle is dropped.
pub fn spawn_session(session: GameSession) -> SessionHandle {
    let (tx, mut rx) = mpsc::channel::<Envelope>(64);
    let (events, _) = broadcast::channel::<ServerMsg>(256);
    let publish = events.clone();

    tokio::spawn(async move {
        let mut session = session;
        while let Some(envelope) = rx.recv().await {
            match envelope {
                Envelope::Client(msg) => {
                    for event in session.apply(msg) {
                        // No subscribers is fine.
                        let _ = publish.send(event);
                    }
                }
                Envelope::Snapshot(reply) => {
                    let _ = reply.send(session.snapshot());
                }
            }
        }
        log::debug!("session task finished");
    });

    SessionHandle { tx, events }
}

/// Live sessions by game id.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: DashMap<Uuid, SessionHandle>,
    settings: Settings,
}

impl SessionRegistry {
    pub fn new(settings: Settings) -> Self {
        SessionRegistry {
            sessions: DashMap::new(),
            settings,
        }
    }

    /// Handle for `game_id`, spawning the session on first use.
    pub fn open(&self, game_id: Uuid) -> SessionHandle {
        self.sessions
            .entry(game_id)
            .or_insert_with(|| {
                log::info!("session {game_id} opened");
                spawn_session(GameSession::new(self.settings.clone()))
            })
            .clone()
    }

    pub fn get(&self, game_id: Uuid) -> Option<SessionHandle> {
        self.sessions.get(&game_id).map(|h| h.value().clone())
    }

    pub async fn dispatch(&self, game_id: Uuid, msg: ClientMsg) -> Result<(), DispatchErr> {
        let handle = self.open(game_id);
        handle.send(msg).await
    }

    /// Drops the registry's handle; the task stops once outside clones go too.
    pub fn close(&self, game_id: Uuid) -> bool {
        self.sessions.remove(&game_id).is_some()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
