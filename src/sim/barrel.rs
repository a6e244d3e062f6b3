//! Barrel physics: rolling downhill, bouncing off walls, dropping down ladders

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geometry::{Rect, ground_below, on_any_ladder, platform_under};
use super::layout::Layout;
use crate::consts::*;
use crate::tuning::Tuning;

/// How close to a surface a barrel must be to pick up its slope
const SLOPE_PICKUP: f32 = 2.0;
/// Ladder checks use a point this far above the barrel center
const LADDER_PROBE: f32 = 4.0;

/// A rolling barrel. `pos` is the center; `vel.x` carries the roll speed and direction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Barrel {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Rotation phase in radians (presentation only)
    pub spin: f32,
}

impl Barrel {
    pub fn new(id: u32, pos: Vec2, speed: f32, spin: f32) -> Self {
        Self {
            id,
            pos,
            vel: Vec2::new(speed, 0.0),
            spin,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.pos.x - BARREL_RADIUS,
            self.pos.y - BARREL_RADIUS,
            BARREL_RADIUS * 2.0,
            BARREL_RADIUS * 2.0,
        )
    }

    /// Fallen past the bottom of the playfield
    pub fn is_gone(&self) -> bool {
        self.pos.y >= VIRTUAL_H + FALL_MARGIN
    }
}

/// Advance a barrel by one tick
pub fn update_barrel<R: Rng + ?Sized>(barrel: &mut Barrel, layout: &Layout, tuning: &Tuning, rng: &mut R) {
    barrel.vel.y += tuning.barrel_gravity();

    let ground = ground_below(&layout.platforms, barrel.pos.x, barrel.pos.y);
    if barrel.pos.y + barrel.vel.y >= ground {
        barrel.pos.y = ground;
        barrel.vel.y = 0.0;
        if let Some(platform) = platform_under(&layout.platforms, barrel.pos.x, ground, SLOPE_PICKUP) {
            let dir = platform.downhill();
            barrel.vel.x = barrel.vel.x.abs() * dir;
            barrel.spin += tuning.barrel_spin_rate * dir;
        }
    } else {
        barrel.pos.y += barrel.vel.y;
    }

    barrel.pos.x += barrel.vel.x;

    // Bounce off the side walls
    if barrel.pos.x < SIDE_MARGIN {
        barrel.pos.x = SIDE_MARGIN;
        barrel.vel.x = -barrel.vel.x;
    }
    if barrel.pos.x > VIRTUAL_W - SIDE_MARGIN {
        barrel.pos.x = VIRTUAL_W - SIDE_MARGIN;
        barrel.vel.x = -barrel.vel.x;
    }

    // Now and then slip down a ladder: sink past step-up reach so the floor lets go
    if rng.random_bool(tuning.barrel_ladder_drop_chance.clamp(0.0, 1.0)) {
        let probe = Vec2::new(barrel.pos.x, barrel.pos.y - LADDER_PROBE);
        if on_any_ladder(&layout.ladders, probe) {
            barrel.pos.y += STEP_UP + 1.0;
        }
    }
}

/// Drop barrels that have fallen off the playfield
pub fn cull_barrels(barrels: &mut Vec<Barrel>) {
    barrels.retain(|b| !b.is_gone());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::geometry::{Ladder, Platform};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn layout_with(platforms: Vec<Platform>, ladders: Vec<Ladder>) -> Layout {
        Layout {
            platforms,
            ladders,
            ..Layout::build(1)
        }
    }

    fn no_drops() -> Tuning {
        Tuning {
            barrel_ladder_drop_chance: 0.0,
            ..Tuning::default()
        }
    }

    #[test]
    fn test_rolls_downhill_left() {
        let layout = layout_with(vec![Platform::new(0.0, 100.0, 400.0, 8.0, -0.05)], vec![]);
        let mut rng = Pcg32::seed_from_u64(1);
        let mut barrel = Barrel::new(1, Vec2::new(200.0, 80.0), 1.6, 0.0);
        for _ in 0..120 {
            update_barrel(&mut barrel, &layout, &no_drops(), &mut rng);
        }
        assert!(barrel.vel.x < 0.0);
        assert!(barrel.pos.x < 200.0);
        assert!(barrel.spin < 0.0);
    }

    #[test]
    fn test_flat_counts_as_rolling_right() {
        let layout = layout_with(vec![Platform::new(0.0, 100.0, 400.0, 8.0, 0.0)], vec![]);
        let mut rng = Pcg32::seed_from_u64(1);
        let mut barrel = Barrel::new(1, Vec2::new(200.0, 100.0), -1.6, 0.0);
        update_barrel(&mut barrel, &layout, &no_drops(), &mut rng);
        assert_eq!(barrel.vel.x, 1.6);
        assert_eq!(barrel.pos.y, 100.0);
    }

    #[test]
    fn test_wall_bounce_reflects() {
        let layout = layout_with(vec![], vec![]);
        let mut rng = Pcg32::seed_from_u64(1);
        let mut barrel = Barrel::new(1, Vec2::new(VIRTUAL_W - 9.0, 50.0), 2.0, 0.0);
        update_barrel(&mut barrel, &layout, &no_drops(), &mut rng);
        assert_eq!(barrel.pos.x, VIRTUAL_W - SIDE_MARGIN);
        assert_eq!(barrel.vel.x, -2.0);

        let mut barrel = Barrel::new(2, Vec2::new(9.0, 50.0), -2.0, 0.0);
        update_barrel(&mut barrel, &layout, &no_drops(), &mut rng);
        assert_eq!(barrel.pos.x, SIDE_MARGIN);
        assert_eq!(barrel.vel.x, 2.0);
    }

    #[test]
    fn test_ladder_drop_falls_through_floor() {
        let layout = layout_with(
            vec![
                Platform::new(0.0, 150.0, 400.0, 8.0, 0.0),
                Platform::new(0.0, 200.0, 400.0, 8.0, 0.0),
            ],
            vec![Ladder::new(100.0, 144.0, 56.0)],
        );
        let always = Tuning {
            barrel_ladder_drop_chance: 1.0,
            ..Tuning::default()
        };
        let mut rng = Pcg32::seed_from_u64(7);
        let mut barrel = Barrel::new(1, Vec2::new(104.0, 150.0), 0.0, 0.0);
        update_barrel(&mut barrel, &layout, &always, &mut rng);
        assert_eq!(barrel.pos.y, 154.0);

        // Floor no longer holds it: it falls to the next one down
        for _ in 0..60 {
            update_barrel(&mut barrel, &layout, &no_drops(), &mut rng);
        }
        assert_eq!(barrel.pos.y, 200.0);
    }

    #[test]
    fn test_cull_removes_only_fallen() {
        let mut barrels = vec![
            Barrel::new(1, Vec2::new(50.0, VIRTUAL_H + FALL_MARGIN + 0.5), 1.6, 0.0),
            Barrel::new(2, Vec2::new(50.0, VIRTUAL_H + 39.0), 1.6, 0.0),
            Barrel::new(3, Vec2::new(50.0, 10.0), 1.6, 0.0),
        ];
        cull_barrels(&mut barrels);
        let ids: Vec<u32> = barrels.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }
}
