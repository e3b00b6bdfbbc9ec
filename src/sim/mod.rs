//! Per-frame simulation
//!
//! All gameplay logic lives here. This module stays deterministic:
//! - Fixed timestep only (one `update` per tick)
//! - Seeded RNG only
//! - Stable iteration order (level collections are never reordered)
//! - No drawing; the renderer reads the scene afterwards

pub mod collision;
pub mod event;
pub mod level;
pub mod player;
pub mod rect;
pub mod speedline;
pub mod tick;

pub use collision::{handle_collisions, horizontal_prepass};
pub use event::{DeathCause, GameEvent};
pub use level::{
    Boss, BuiltinLevels, Level, LevelSource, Orb, Platform, Sign, Sprite, SpriteKind, Trigger,
    TriggerKind,
};
pub use player::{Gravity, Player};
pub use rect::Rect;
pub use speedline::{Speedline, advance_all, spawn_burst};
pub use tick::{FrameInput, InputEvent, PlayScene};
