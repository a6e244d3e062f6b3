//! Scene building: snapshot to flat 2D primitives
//!
//! Everything is in virtual playfield coordinates; the painter scales.

use glam::Vec2;
use serde::Serialize;

use crate::{Settings, lerp};
use crate::consts::*;
use crate::sim::geometry::LADDER_WIDTH;
use crate::sim::{Barrel, GamePhase, Ladder, Platform, Player, Snapshot};

/// RGBA, each channel 0..=1
pub type Color = [f32; 4];

/// Color from a 0xRRGGBB literal
pub const fn rgb(hex: u32) -> Color {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
        1.0,
    ]
}

const fn with_alpha(c: Color, a: f32) -> Color {
    [c[0], c[1], c[2], a]
}

const SKY_TOP: Color = rgb(0x081022);
const SKY_BOTTOM: Color = rgb(0x05070e);
const GIRDER: Color = rgb(0x2b3555);
const GIRDER_RAIL: Color = rgb(0x7aa2ff);
const LADDER: Color = rgb(0x9cc2ff);
const BARREL: Color = rgb(0xb0703a);
const BARREL_HOOP: Color = [60.0 / 255.0, 40.0 / 255.0, 20.0 / 255.0, 0.8];
const FUR: Color = rgb(0x5b3b2a);
const FUR_DARK: Color = rgb(0x3b251b);
const SKIN: Color = rgb(0xffd4a8);
const SHIRT: Color = rgb(0x6cc6ff);
const CAP: Color = rgb(0x224a8f);
const DRESS: Color = rgb(0xffb3d1);
const CROWN: Color = rgb(0xf7d54e);
const WHITE: Color = [1.0, 1.0, 1.0, 1.0];

/// Number of bands in the sky gradient
const SKY_BANDS: u32 = 6;
/// Spacing of ladder rungs
const RUNG_SPACING: f32 = 6.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Align {
    Left,
    Center,
    Right,
}

/// A drawable primitive
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Shape {
    Rect {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        color: Color,
    },
    /// Convex polygon, corners in drawing order
    Quad { points: [Vec2; 4], color: Color },
    Ellipse {
        center: Vec2,
        rx: f32,
        ry: f32,
        rotation: f32,
        color: Color,
    },
    Line {
        from: Vec2,
        to: Vec2,
        width: f32,
        color: Color,
    },
    /// Top-anchored text
    Text {
        pos: Vec2,
        text: String,
        size: f32,
        align: Align,
        color: Color,
    },
}

fn rect(x: f32, y: f32, w: f32, h: f32, color: Color) -> Shape {
    Shape::Rect { x, y, w, h, color }
}

fn text(x: f32, y: f32, s: String, size: f32, align: Align) -> Shape {
    Shape::Text {
        pos: Vec2::new(x, y),
        text: s,
        size,
        align,
        color: with_alpha(WHITE, 0.94),
    }
}

/// Build the full frame for a snapshot
pub fn build_scene(snap: &Snapshot<'_>, settings: &Settings) -> Vec<Shape> {
    let mut shapes = Vec::with_capacity(256);

    sky(&mut shapes);
    for platform in snap.platforms {
        platform_shapes(&mut shapes, platform);
    }
    for ladder in snap.ladders {
        ladder_shapes(&mut shapes, ladder);
    }

    // Goal glow, then the goal and the keeper
    shapes.push(Shape::Ellipse {
        center: Vec2::new(snap.goal.x + snap.goal.w / 2.0, snap.goal.y + snap.goal.h),
        rx: 24.0,
        ry: 9.0,
        rotation: 0.0,
        color: [1.0, 0.86, 0.86, 0.08],
    });
    goal_shapes(&mut shapes, snap.goal.x, snap.goal.y, snap.time_ticks);
    let drum = if settings.drum_enabled() { snap.keeper_drum } else { 0.5 };
    keeper_shapes(&mut shapes, snap.keeper.x, snap.keeper.y, drum);

    for barrel in snap.barrels {
        barrel_shapes(&mut shapes, barrel);
    }

    let hidden = settings.blink_enabled() && snap.player.blink_hidden(snap.time_ticks);
    if !hidden {
        player_shapes(&mut shapes, snap.player, snap.time_ticks);
    }

    hud(&mut shapes, snap);
    shapes
}

fn sky(shapes: &mut Vec<Shape>) {
    let band = VIRTUAL_H / SKY_BANDS as f32;
    for i in 0..SKY_BANDS {
        let t = i as f32 / (SKY_BANDS - 1) as f32;
        let color = [
            lerp(SKY_TOP[0], SKY_BOTTOM[0], t),
            lerp(SKY_TOP[1], SKY_BOTTOM[1], t),
            lerp(SKY_TOP[2], SKY_BOTTOM[2], t),
            1.0,
        ];
        shapes.push(rect(0.0, i as f32 * band, VIRTUAL_W, band + 1.0, color));
    }
}

/// Girder: sloped band with a bright top rail
pub fn platform_shapes(shapes: &mut Vec<Shape>, p: &Platform) {
    let (left, right) = p.end_heights();
    let x1 = p.x + p.w;
    shapes.push(Shape::Quad {
        points: [
            Vec2::new(p.x, left),
            Vec2::new(x1, right),
            Vec2::new(x1, right + p.h),
            Vec2::new(p.x, left + p.h),
        ],
        color: GIRDER,
    });
    shapes.push(Shape::Line {
        from: Vec2::new(p.x, left),
        to: Vec2::new(x1, right),
        width: 1.0,
        color: GIRDER_RAIL,
    });
}

pub fn ladder_shapes(shapes: &mut Vec<Shape>, l: &Ladder) {
    let bottom = l.bottom();
    for x in [l.x, l.x + LADDER_WIDTH] {
        shapes.push(Shape::Line {
            from: Vec2::new(x, l.y),
            to: Vec2::new(x, bottom),
            width: 1.0,
            color: LADDER,
        });
    }
    let mut y = l.y + RUNG_SPACING / 2.0;
    while y < bottom {
        shapes.push(Shape::Line {
            from: Vec2::new(l.x, y),
            to: Vec2::new(l.x + LADDER_WIDTH, y),
            width: 1.0,
            color: LADDER,
        });
        y += RUNG_SPACING;
    }
}

fn goal_shapes(shapes: &mut Vec<Shape>, x: f32, y: f32, frame: u64) {
    shapes.push(rect(x, y + 8.0, 20.0, 14.0, DRESS));
    shapes.push(rect(x + 6.0, y, 8.0, 8.0, SKIN));
    shapes.push(rect(x + 5.0, y - 2.0, 10.0, 3.0, CROWN));
    if frame % 30 < 10 {
        shapes.push(rect(x + 18.0, y + 6.0, 2.0, 2.0, with_alpha(WHITE, 0.8)));
    }
}

/// The keeper; `drum` in 0..=1 swings the arms
fn keeper_shapes(shapes: &mut Vec<Shape>, x: f32, y: f32, drum: f32) {
    shapes.push(rect(x - 6.0, y + 24.0, 40.0, 6.0, GIRDER));
    shapes.push(rect(x, y + 8.0, 28.0, 20.0, FUR));
    shapes.push(rect(x + 8.0, y, 12.0, 10.0, FUR));
    shapes.push(rect(x + 2.0, y + 18.0, 8.0, 10.0, FUR_DARK));
    shapes.push(rect(x + 18.0, y + 18.0, 8.0, 10.0, FUR_DARK));

    let swing = 0.4 - drum * 0.2;
    let arms = [
        (Vec2::new(x + 4.0, y + 14.0), -swing),
        (Vec2::new(x + 24.0, y + 14.0), swing),
    ];
    for (shoulder, angle) in arms {
        shapes.push(Shape::Ellipse {
            center: shoulder + Vec2::new(0.0, 3.0),
            rx: 4.0,
            ry: 3.0,
            rotation: angle,
            color: FUR,
        });
    }
}

pub fn barrel_shapes(shapes: &mut Vec<Shape>, b: &Barrel) {
    let r = BARREL_RADIUS;
    shapes.push(Shape::Ellipse {
        center: b.pos,
        rx: r + 1.0,
        ry: r,
        rotation: b.spin,
        color: BARREL,
    });
    // Slats rotate with the barrel
    let along = Vec2::from_angle(b.spin) * (r - 1.0);
    let across = Vec2::from_angle(b.spin).perp() * 2.0;
    for side in [-1.0, 1.0] {
        let offset = across * side;
        shapes.push(Shape::Line {
            from: b.pos - along + offset,
            to: b.pos + along + offset,
            width: 1.0,
            color: BARREL_HOOP,
        });
    }
}

/// Player sprite, mirrored by facing; feet at `pos`
pub fn player_shapes(shapes: &mut Vec<Shape>, p: &Player, frame: u64) {
    let top = p.pos.y - PLAYER_HEIGHT;
    let x = p.pos.x;
    let flip = if p.facing < 0.0 { -1.0 } else { 1.0 };
    let moving = p.vel.x.abs() > 0.1 && !p.is_airborne();
    let swing = if moving && frame % 16 < 8 { 1.0 } else { 0.0 };

    shapes.push(Shape::Ellipse {
        center: Vec2::new(x, p.pos.y + 1.0),
        rx: 5.0,
        ry: 1.5,
        rotation: 0.0,
        color: [0.0, 0.0, 0.0, 0.3],
    });
    // Legs
    shapes.push(rect(x - 3.0 + swing, top + 9.0, 3.0, 5.0, SKIN));
    shapes.push(rect(x - swing, top + 9.0, 3.0, 5.0, SKIN));
    // Body, head, cap
    shapes.push(rect(x - 5.0, top + 3.0, 10.0, 7.0, SHIRT));
    shapes.push(rect(x - 4.0, top, 8.0, 4.0, SKIN));
    shapes.push(rect(x - 4.0, top - 1.0, 8.0, 2.0, CAP));
    // Eye on the facing side
    let eye_x = if flip > 0.0 { x + 1.0 } else { x - 3.0 };
    shapes.push(rect(eye_x, top + 1.0, 2.0, 2.0, WHITE));
}

fn hud(shapes: &mut Vec<Shape>, snap: &Snapshot<'_>) {
    shapes.push(text(6.0, 6.0, format!("HI {}", snap.best_score), 8.0, Align::Left));
    shapes.push(text(
        VIRTUAL_W / 2.0,
        6.0,
        format!("LEVEL {}  LIVES {}", snap.level, snap.lives),
        8.0,
        Align::Center,
    ));
    shapes.push(text(
        VIRTUAL_W - 6.0,
        6.0,
        format!("SCORE {}", snap.score),
        8.0,
        Align::Right,
    ));

    let message = match snap.phase {
        GamePhase::Paused => Some(vec!["PAUSED".to_string(), "Press P to resume".to_string()]),
        GamePhase::Dead if snap.lives == 0 => Some(vec!["GAME OVER".to_string()]),
        GamePhase::Win => Some(vec![format!("LEVEL {}!", snap.level)]),
        GamePhase::Dead | GamePhase::Playing => None,
    };
    if let Some(lines) = message {
        shapes.push(rect(0.0, 0.0, VIRTUAL_W, VIRTUAL_H, [0.0, 0.0, 0.0, 0.63]));
        let start = VIRTUAL_H / 2.0 - lines.len() as f32 * 8.0;
        for (i, line) in lines.into_iter().enumerate() {
            shapes.push(text(VIRTUAL_W / 2.0, start + i as f32 * 16.0, line, 12.0, Align::Center));
        }
    }
}
