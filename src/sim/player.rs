//! Player physics: running, jumping, ladder climbing

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::{Rect, ground_below, on_any_ladder, surface_crossed};
use super::input::TickInput;
use super::layout::Layout;
use super::state::GameEvent;
use crate::consts::*;
use crate::lerp;
use crate::tuning::Tuning;

/// Movement mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerMode {
    /// Standing on a surface
    Grounded,
    /// Jumping or falling
    Airborne,
    /// Holding a ladder; gravity is suspended
    Climbing,
}

/// The player character. `pos` is the bottom-center (feet).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    /// -1 facing left, +1 facing right
    pub facing: f32,
    pub mode: PlayerMode,
    /// Blink ticks remaining after a respawn
    pub invulnerable_ticks: u32,
    /// Airborne ticks left in which a jump is still honored
    pub coyote_ticks_left: u32,
}

impl Player {
    /// A fresh player, dropped in at `pos`
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            facing: 1.0,
            mode: PlayerMode::Airborne,
            invulnerable_ticks: 0,
            coyote_ticks_left: 0,
        }
    }

    /// Hitbox: `PLAYER_WIDTH` wide, standing on `pos`
    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.pos.x - PLAYER_WIDTH / 2.0,
            self.pos.y - PLAYER_HEIGHT,
            PLAYER_WIDTH,
            PLAYER_HEIGHT,
        )
    }

    /// Reference point for ladder checks
    pub fn mid_body(&self) -> Vec2 {
        Vec2::new(self.pos.x, self.pos.y - PLAYER_HEIGHT / 2.0)
    }

    pub fn is_airborne(&self) -> bool {
        self.mode == PlayerMode::Airborne
    }

    pub fn is_climbing(&self) -> bool {
        self.mode == PlayerMode::Climbing
    }

    /// Whether the presentation should hide the sprite this frame
    pub fn blink_hidden(&self, frame: u64) -> bool {
        self.invulnerable_ticks > 0 && frame % 6 < 3
    }

    fn land(&mut self, y: f32, tuning: &Tuning) {
        self.pos.y = y;
        self.vel.y = 0.0;
        self.mode = PlayerMode::Grounded;
        self.coyote_ticks_left = tuning.coyote_ticks;
    }

    fn jump(&mut self, tuning: &Tuning, events: &mut Vec<GameEvent>) {
        self.vel.y = -tuning.jump_power;
        self.mode = PlayerMode::Airborne;
        self.coyote_ticks_left = 0;
        events.push(GameEvent::Jump);
    }
}

/// Advance the player by one tick
pub fn update_player(
    player: &mut Player,
    layout: &Layout,
    input: &mut TickInput,
    tuning: &Tuning,
    now_ms: f64,
    events: &mut Vec<GameEvent>,
) {
    // Horizontal intent eases toward the run speed
    let ax = input.axis();
    if player.is_climbing() {
        player.vel.x = 0.0;
    } else {
        player.vel.x = lerp(player.vel.x, ax * tuning.run_speed, tuning.velocity_smoothing);
        if ax != 0.0 {
            player.facing = ax;
        }
    }

    // Ladder mount; a buffered press is spent here only when a ladder is in reach
    if !player.is_climbing() && on_any_ladder(&layout.ladders, player.mid_body()) {
        let pressed = input.jump.consume(now_ms, tuning.jump_buffer_ms);
        if pressed || input.up {
            player.mode = PlayerMode::Climbing;
            player.vel = Vec2::ZERO;
            events.push(GameEvent::Grab);
        }
    }

    if player.is_climbing() {
        climb(player, layout, input, tuning);
    } else {
        fall_or_stand(player, layout, input, tuning, now_ms, events);
    }

    player.pos.x += player.vel.x;
    player.pos.x = player.pos.x.clamp(SIDE_MARGIN, VIRTUAL_W - SIDE_MARGIN);

    if player.invulnerable_ticks > 0 {
        player.invulnerable_ticks -= 1;
    }
}

fn climb(player: &mut Player, layout: &Layout, input: &TickInput, tuning: &Tuning) {
    player.vel.y = if input.up {
        -tuning.climb_speed
    } else if input.down {
        tuning.climb_speed
    } else {
        0.0
    };

    if input.left {
        player.pos.x -= tuning.ladder_shimmy;
    }
    if input.right {
        player.pos.x += tuning.ladder_shimmy;
    }

    let prev_y = player.pos.y;
    player.pos.y += player.vel.y;
    let x = player.pos.x;

    if player.vel.y > 0.0 {
        let ground = ground_below(&layout.platforms, x, prev_y);
        if player.pos.y >= ground {
            player.land(ground, tuning);
            return;
        }
    } else if player.vel.y < 0.0 {
        if let Some(ledge) = surface_crossed(&layout.platforms, x, prev_y, player.pos.y) {
            player.land(ledge, tuning);
            return;
        }
    }

    if !on_any_ladder(&layout.ladders, player.mid_body()) {
        player.mode = PlayerMode::Airborne;
        player.coyote_ticks_left = 0;
    }
}

fn fall_or_stand(
    player: &mut Player,
    layout: &Layout,
    input: &mut TickInput,
    tuning: &Tuning,
    now_ms: f64,
    events: &mut Vec<GameEvent>,
) {
    let was_airborne = player.is_airborne();
    player.vel.y += tuning.gravity;

    let ground = ground_below(&layout.platforms, player.pos.x, player.pos.y);
    if player.pos.y + player.vel.y >= ground {
        if was_airborne && player.vel.y > tuning.land_cue_speed {
            events.push(GameEvent::Land);
        }
        player.land(ground, tuning);

        if input.jump.consume(now_ms, tuning.jump_buffer_ms) {
            player.jump(tuning, events);
        }
    } else {
        // Late presses just after leaving a ledge still count
        if player.coyote_ticks_left > 0 && input.jump.consume(now_ms, tuning.jump_buffer_ms) {
            player.jump(tuning, events);
        } else {
            player.coyote_ticks_left = player.coyote_ticks_left.saturating_sub(1);
        }
        player.pos.y += player.vel.y;
        player.mode = PlayerMode::Airborne;
    }
}
