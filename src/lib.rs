//! Game-state and battle-resolution core of a turn-based island skirmish.
//!
//! Presentation reads [`game::snapshot::Snapshot`]s and drives a
//! [`game::session::GameSession`] with [`protocol::ClientMsg`] commands.

pub mod config;
pub mod game;
pub mod protocol;
