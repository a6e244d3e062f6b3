//! Data-driven game balance
//!
//! Every physics and rules constant the simulation reads lives here, so a
//! level designer can override any subset from JSON without a rebuild.

use serde::{Deserialize, Serialize};

/// Gameplay balance values. Units are pixels, ticks and milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player ===
    /// Downward acceleration per tick
    pub gravity: f32,
    /// Target horizontal speed while a direction is held
    pub run_speed: f32,
    /// Lerp factor easing horizontal velocity toward the target
    pub velocity_smoothing: f32,
    /// Initial upward speed of a jump
    pub jump_power: f32,
    /// Downward speed above which a landing emits a cue
    pub land_cue_speed: f32,
    /// Vertical speed on a ladder
    pub climb_speed: f32,
    /// Sideways nudge per tick while on a ladder
    pub ladder_shimmy: f32,
    /// Ticks after leaving the ground during which a jump is still honored
    pub coyote_ticks: u32,
    /// How long a jump press stays buffered
    pub jump_buffer_ms: f64,
    /// Blink length given to a fresh player after a life loss
    pub respawn_invulnerable_ticks: u32,
    /// Whether a blinking player ignores barrel hits
    pub invulnerable_ignores_hits: bool,

    // === Barrels ===
    /// Barrel gravity as a fraction of the player's
    pub barrel_gravity_scale: f32,
    /// Base roll speed of a new barrel
    pub barrel_speed: f32,
    /// Random extra roll speed, drawn from `[0, jitter)`
    pub barrel_speed_jitter: f32,
    /// Spin advance per grounded tick
    pub barrel_spin_rate: f32,
    /// Per-tick chance that a barrel on a ladder drops through
    pub barrel_ladder_drop_chance: f64,

    // === Spawner ===
    pub spawn_interval_ms: f64,
    pub spawn_interval_step_ms: f64,
    pub spawn_interval_floor_ms: f64,

    // === Rules ===
    pub starting_lives: u8,
    pub level_bonus: u64,
    /// Delay before a new round after losing a life
    pub restart_delay_ms: f64,
    /// Delay before the full reset after the last life
    pub game_over_delay_ms: f64,
    /// Spacing of the level-complete fanfare notes
    pub fanfare_note_ms: f64,
    pub fanfare_notes: u8,
    /// How long the Win phase holds before the next level starts
    pub win_hold_ms: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 0.35,
            run_speed: 1.1,
            velocity_smoothing: 0.4,
            jump_power: 5.6,
            land_cue_speed: 1.2,
            climb_speed: 1.0,
            ladder_shimmy: 0.4,
            coyote_ticks: 6,
            jump_buffer_ms: 160.0,
            respawn_invulnerable_ticks: 90,
            invulnerable_ignores_hits: false,

            barrel_gravity_scale: 0.6,
            barrel_speed: 1.6,
            barrel_speed_jitter: 0.5,
            barrel_spin_rate: 0.2,
            barrel_ladder_drop_chance: 0.003,

            spawn_interval_ms: 1700.0,
            spawn_interval_step_ms: 150.0,
            spawn_interval_floor_ms: 800.0,

            starting_lives: 3,
            level_bonus: 1000,
            restart_delay_ms: 900.0,
            game_over_delay_ms: 1400.0,
            fanfare_note_ms: 120.0,
            fanfare_notes: 4,
            win_hold_ms: 480.0,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) tuning document; missing fields keep defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Milliseconds between barrel spawns on `level` (1-based)
    pub fn spawn_interval_for_level(&self, level: u32) -> f64 {
        let steps = level.saturating_sub(1) as f64;
        (self.spawn_interval_ms - steps * self.spawn_interval_step_ms)
            .max(self.spawn_interval_floor_ms)
    }

    /// Gravity applied to barrels each tick
    pub fn barrel_gravity(&self) -> f32 {
        self.gravity * self.barrel_gravity_scale
    }
}
