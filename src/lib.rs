//! Barrel Bash - a ladders-and-barrels platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (geometry, physics, collisions, game state)
//! - `renderer`: Scene building and Canvas 2D drawing
//! - `audio`: Cue to sound-effect mapping and Web Audio playback
//! - `platform`: Browser/native platform abstraction (input, storage)
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod best_score;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use best_score::BestScore;
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Virtual playfield width (16:9 design resolution)
    pub const VIRTUAL_W: f32 = 480.0;
    /// Virtual playfield height
    pub const VIRTUAL_H: f32 = 270.0;

    /// Fixed simulation rate; one tick per 60 Hz frame
    pub const SIM_HZ: f64 = 60.0;
    /// Fixed simulation timestep in milliseconds
    pub const SIM_DT_MS: f64 = 1000.0 / SIM_HZ;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;
    /// Longest frame gap the driver will try to catch up on
    pub const MAX_FRAME_MS: f64 = 100.0;

    /// Entities are kept this far from the left/right playfield edges
    pub const SIDE_MARGIN: f32 = 8.0;
    /// Barrels (and the player) below `VIRTUAL_H + FALL_MARGIN` are gone
    pub const FALL_MARGIN: f32 = 40.0;

    /// Sentinel surface height meaning "no floor under this x"
    pub const NO_FLOOR: f32 = VIRTUAL_H + 999.0;
    /// How far above its feet an entity may step onto a surface
    pub const STEP_UP: f32 = 3.0;

    /// Player hitbox
    pub const PLAYER_WIDTH: f32 = 10.0;
    pub const PLAYER_HEIGHT: f32 = 14.0;
    /// Where a fresh player appears
    pub const PLAYER_SPAWN_X: f32 = 30.0;
    pub const PLAYER_SPAWN_Y: f32 = VIRTUAL_H - 40.0;

    /// Barrel radius (hitbox is a 2r square)
    pub const BARREL_RADIUS: f32 = 6.0;

    /// Padding added around the goal sprite box for the win check
    pub const GOAL_PAD_X: f32 = 6.0;
    pub const GOAL_PAD_Y: f32 = 4.0;
}

/// Linear interpolation from `a` toward `b` by `t`
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
