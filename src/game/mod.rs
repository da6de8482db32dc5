pub mod battle;
pub mod board;
pub mod economy;
pub mod factory;
pub mod npc;
pub mod session;
pub mod snapshot;
pub mod state;
pub mod types;
