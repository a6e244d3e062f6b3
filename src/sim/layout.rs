//! Level layout generation
//!
//! Five sloped rows zig-zag up the screen. Each row leaves a gap at its low
//! end so barrels drop to the row beneath; ladders join neighbouring rows.
//! Layouts are a pure function of the level number.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::{LADDER_WIDTH, Ladder, Platform, Rect};
use crate::consts::*;

/// Number of sloped rows
pub const ROWS: u32 = 5;
/// Vertical distance between row midpoints
pub const ROW_SPACING: f32 = 44.0;
/// Midpoint height of the bottom row
pub const BOTTOM_ROW_Y: f32 = VIRTUAL_H - 30.0;
pub const ROW_THICKNESS: f32 = 8.0;
/// Inset of the bottom row's right end and of every row's low end
pub const ROW_PAD: f32 = 14.0;
/// Extra gap at a row's low end for barrels to drop through
pub const EDGE_GAP: f32 = 24.0;
/// Height of the flat ledges at the top
pub const LEDGE_Y: f32 = 34.0;
/// Ladders reach this far above the upper surface
pub const LADDER_HEADROOM: f32 = 6.0;
/// Keep ladders this far from the ends of the shared span
const LADDER_INSET: f32 = 20.0;
/// Levels up to this one get a second ladder between every pair of rows
const EXTRA_LADDER_LEVELS: u32 = 3;

/// Geometry and fixed actors for one level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    /// 1-based level number this layout was built for
    pub number: u32,
    pub platforms: Vec<Platform>,
    pub ladders: Vec<Ladder>,
    /// The character the player must reach
    pub goal: Rect,
    /// The barrel thrower
    pub keeper: Rect,
    /// Where fresh players appear
    pub spawn: Vec2,
}

impl Layout {
    /// Build the layout for `level`
    pub fn build(level: u32) -> Self {
        let level = level.max(1);
        let mut platforms: Vec<Platform> = (0..ROWS).map(|r| build_row(level, r)).collect();

        // Keeper ledge (top left) and goal ledge (top right)
        let keeper_ledge = Platform::new(16.0, LEDGE_Y, 88.0, ROW_THICKNESS, 0.0);
        let goal_ledge = Platform::new(VIRTUAL_W - 124.0, LEDGE_Y, 108.0, ROW_THICKNESS, 0.0);

        let mut ladders = Vec::new();
        for r in 0..ROWS - 1 {
            let lower = &platforms[r as usize];
            let upper = &platforms[r as usize + 1];
            let lo = lower.x.max(upper.x) + LADDER_INSET;
            let hi = (lower.x + lower.w).min(upper.x + upper.w) - LADDER_INSET - LADDER_WIDTH;
            let range = (hi - lo).max(1.0);

            let offset = (mix(level, r) % range as u32) as f32;
            ladders.push(ladder_between(lower, upper, lo + offset));

            if level <= EXTRA_LADDER_LEVELS {
                let offset2 = (offset + range / 2.0) % range;
                ladders.push(ladder_between(lower, upper, lo + offset2));
            }
        }
        let top_row = &platforms[ROWS as usize - 1];
        ladders.push(ladder_between(top_row, &goal_ledge, VIRTUAL_W - 100.0));

        platforms.push(keeper_ledge);
        platforms.push(goal_ledge);

        log::info!(
            "Level {} layout: {} platforms, {} ladders",
            level,
            platforms.len(),
            ladders.len()
        );

        Self {
            number: level,
            platforms,
            ladders,
            goal: Rect::new(VIRTUAL_W - 44.0, LEDGE_Y - 26.0, 20.0, 26.0),
            keeper: Rect::new(40.0, LEDGE_Y - 30.0, 28.0, 30.0),
            spawn: Vec2::new(PLAYER_SPAWN_X, PLAYER_SPAWN_Y),
        }
    }

    /// Where the keeper releases barrels
    pub fn barrel_spawn(&self) -> Vec2 {
        Vec2::new(self.keeper.x + 6.0, self.keeper.y + 18.0)
    }

    /// Win region: the goal sprite box plus padding
    pub fn goal_zone(&self) -> Rect {
        self.goal.expand(GOAL_PAD_X, GOAL_PAD_Y)
    }
}

/// Slope magnitude of row `r`; rows get steeper up the screen and with level
pub fn row_slope(level: u32, r: u32) -> f32 {
    let level_steps = level.saturating_sub(1).min(5) as f32;
    0.025 + r as f32 * 0.002 + level_steps * 0.003
}

fn build_row(level: u32, r: u32) -> Platform {
    let base = BOTTOM_ROW_Y - r as f32 * ROW_SPACING;
    // Even rows descend to the right, odd rows to the left
    let descends_right = r % 2 == 0;
    let slope = if descends_right {
        row_slope(level, r)
    } else {
        -row_slope(level, r)
    };

    let (x0, x1) = if r == 0 {
        (0.0, VIRTUAL_W - ROW_PAD)
    } else if descends_right {
        (0.0, VIRTUAL_W - ROW_PAD - EDGE_GAP)
    } else {
        (ROW_PAD + EDGE_GAP, VIRTUAL_W)
    };
    let w = x1 - x0;

    // Anchor at the midpoint so alternating rows never cross
    let y_left = base - slope * w / 2.0;
    Platform::new(x0, y_left, w, ROW_THICKNESS, slope)
}

/// Ladder at `x` from just above `upper` down to `lower`
fn ladder_between(lower: &Platform, upper: &Platform, x: f32) -> Ladder {
    let rail_mid = x + LADDER_WIDTH / 2.0;
    let top = upper.surface_y(rail_mid) - LADDER_HEADROOM;
    let bottom = lower.surface_y(rail_mid);
    Ladder::new(x, top, bottom - top)
}

/// Deterministic per-(level, row) hash
fn mix(level: u32, r: u32) -> u32 {
    level
        .wrapping_mul(2654435761)
        .wrapping_add(r.wrapping_mul(40503))
        .rotate_left(13)
        .wrapping_mul(2246822519)
}
