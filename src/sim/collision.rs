//! Collision rules: what ends a life and what wins a level
//!
//! All checks are axis-aligned bounding box overlaps (`Rect::overlaps`).

use super::barrel::Barrel;
use super::layout::Layout;
use super::player::Player;
use crate::consts::*;
use crate::tuning::Tuning;

/// Outcome of the per-tick rules pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleOutcome {
    /// Nothing happened
    Clear,
    /// The player touched a barrel (id of the first one found)
    HitBarrel(u32),
    /// The player fell off the bottom of the playfield
    FellOut,
    /// The player reached the goal
    ReachedGoal,
}

/// First barrel overlapping the player, if any
pub fn barrel_hit(player: &Player, barrels: &[Barrel], tuning: &Tuning) -> Option<u32> {
    if tuning.invulnerable_ignores_hits && player.invulnerable_ticks > 0 {
        return None;
    }
    let bounds = player.bounds();
    barrels
        .iter()
        .find(|b| bounds.overlaps(&b.bounds()))
        .map(|b| b.id)
}

pub fn fell_out(player: &Player) -> bool {
    player.pos.y >= VIRTUAL_H + FALL_MARGIN
}

pub fn reached_goal(player: &Player, layout: &Layout) -> bool {
    player.bounds().overlaps(&layout.goal_zone())
}

/// Run the rules in priority order: losing a life beats reaching the goal.
pub fn evaluate(player: &Player, barrels: &[Barrel], layout: &Layout, tuning: &Tuning) -> RuleOutcome {
    if let Some(id) = barrel_hit(player, barrels, tuning) {
        RuleOutcome::HitBarrel(id)
    } else if fell_out(player) {
        RuleOutcome::FellOut
    } else if reached_goal(player, layout) {
        RuleOutcome::ReachedGoal
    } else {
        RuleOutcome::Clear
    }
}
