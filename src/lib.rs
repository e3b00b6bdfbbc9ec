//! Flipline - runtime core of a side-scrolling gravity-flip platformer
//!
//! Core modules:
//! - `sim`: Per-frame simulation (player physics, collisions, speedlines, play loop)
//! - `renderer`: Camera transform, background cache and software rendering
//! - `session`: State shared across scenes (zoom level, overlays, events)
//! - `settings`: Persisted preferences
//! - `game`: State manager and fixed timestep driver
//! - `assets`: Background image loading with a generated fallback

pub mod assets;
pub mod game;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;

pub use game::{FixedTimestep, Game};
pub use session::{Overlay, Session};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one tick per rendered frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Output resolution
    pub const SCREEN_WIDTH: u32 = 800;
    pub const SCREEN_HEIGHT: u32 = 600;

    /// Player movement (pixels per tick)
    pub const PLAYER_SPEED: f32 = 5.0;
    pub const SPRINT_SPEED: f32 = 10.0;
    pub const SPRINT_ACCELERATION: f32 = 0.5;
    /// Sprint speed bleeds off slightly faster than it builds up
    pub const SPRINT_DECELERATION_FACTOR: f32 = 1.2;

    pub const PLAYER_WIDTH: i32 = 40;
    pub const PLAYER_HEIGHT: i32 = 60;
    pub const GRAVITY: f32 = 0.8;
    pub const JUMP_STRENGTH: f32 = 15.0;
    pub const MAX_FALL_SPEED: f32 = 20.0;

    /// Zoom limits and step per input event
    pub const MIN_ZOOM: f32 = 0.5;
    pub const MAX_ZOOM: f32 = 2.0;
    pub const ZOOM_STEP: f32 = 0.1;

    /// Background scroll rate relative to the camera
    pub const PARALLAX_FACTOR: f32 = 0.5;

    pub const BG_IMAGE_PATH: &str = "assets/background.png";

    /// Speedline burst shape
    pub const BURST_MIN: u32 = 30;
    pub const BURST_MAX: u32 = 40;
    pub const BURST_VERTICAL_SPREAD: i32 = 200;
    pub const BURST_JITTER_X: i32 = 50;
    pub const BURST_JITTER_Y: i32 = 100;

    /// Speedline appearance
    pub const SPEEDLINE_LIFETIME: u32 = 30;
    pub const SPEEDLINE_MIN_SPEED: f32 = 8.0;
    pub const SPEEDLINE_MAX_SPEED: f32 = 12.0;
    pub const SPEEDLINE_MIN_LENGTH: i32 = 100;
    pub const SPEEDLINE_MAX_LENGTH: i32 = 200;
    pub const SPEEDLINE_MIN_THICKNESS: i32 = 1;
    pub const SPEEDLINE_MAX_THICKNESS: i32 = 3;
    pub const SPEEDLINE_MIN_OPACITY: u8 = 150;

    /// Distance past the level bounds before the player counts as lost
    pub const KILL_MARGIN: i32 = 400;
}
