//! Gameplay outcomes signalled by the simulation
//!
//! Collisions never fail; anything the orchestrator must react to (deaths,
//! level transitions) is reported as an event on the session instead.

use glam::IVec2;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    Hazard,
    Boss,
    OutOfBounds,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    GravityFlipped { direction: i32 },
    PlayerDied { cause: DeathCause },
    OrbCollected { index: usize },
    CheckpointReached { spawn: IVec2 },
    LevelComplete { level: u32 },
    ZoomChanged { zoom_milli: u32 },
}
