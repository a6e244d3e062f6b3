//! Property tests for the geometry helpers and the simulation invariants

use barrel_bash::Tuning;
use barrel_bash::consts::*;
use barrel_bash::sim::{
    Barrel, GameState, JumpBuffer, Layout, Platform, Rect, TickInput, cull_barrels, ground_y, tick,
};
use glam::Vec2;
use proptest::prelude::*;

fn platform() -> impl Strategy<Value = Platform> {
    (0.0f32..300.0, 20.0f32..250.0, 10.0f32..200.0, -0.2f32..0.2)
        .prop_map(|(x, y, w, slope)| Platform::new(x, y, w, 8.0, slope))
}

fn rect() -> impl Strategy<Value = Rect> {
    (-50.0f32..500.0, -50.0f32..300.0, 0.5f32..60.0, 0.5f32..60.0)
        .prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
}

proptest! {
    #[test]
    fn surface_is_linear_between_end_heights(p in platform(), t in 0.0f32..=1.0) {
        let (left, right) = p.end_heights();
        prop_assert_eq!(left, p.y);
        let x = p.x + t * p.w;
        let expected = left + (right - left) * t;
        prop_assert!((p.surface_y(x) - expected).abs() < 1e-3);
    }

    #[test]
    fn ground_is_topmost_spanning_surface(level in 1u32..20, x in 0.0f32..VIRTUAL_W) {
        let layout = Layout::build(level);
        let spanning: Vec<f32> = layout
            .platforms
            .iter()
            .filter(|p| p.spans(x))
            .map(|p| p.surface_y(x))
            .collect();
        let ground = ground_y(&layout.platforms, x);
        if spanning.is_empty() {
            prop_assert_eq!(ground, NO_FLOOR);
        } else {
            prop_assert!(spanning.iter().all(|&s| ground <= s));
            prop_assert!(spanning.contains(&ground));
        }
    }

    #[test]
    fn overlap_is_symmetric(a in rect(), b in rect()) {
        prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
    }

    #[test]
    fn edge_contact_is_not_overlap(a in rect(), h in 0.5f32..60.0) {
        let right = Rect::new(a.x + a.w, a.y, 10.0, h);
        let below = Rect::new(a.x, a.y + a.h, a.w, h);
        prop_assert!(!a.overlaps(&right));
        prop_assert!(!a.overlaps(&below));
    }

    #[test]
    fn jump_press_is_spent_once(pressed in 0.0f64..10_000.0, delay in 0.0f64..400.0) {
        let window = Tuning::default().jump_buffer_ms;
        let mut buffer = JumpBuffer::default();
        buffer.press(pressed);
        let now = pressed + delay;
        let first = buffer.consume(now, window);
        prop_assert_eq!(first, now - pressed <= window);
        prop_assert!(!buffer.consume(now, window));
    }

    #[test]
    fn spawn_interval_shrinks_to_floor(level in 1u32..100) {
        let tuning = Tuning::default();
        let here = tuning.spawn_interval_for_level(level);
        let next = tuning.spawn_interval_for_level(level + 1);
        prop_assert!(next <= here);
        prop_assert!(here >= tuning.spawn_interval_floor_ms);
        let expected = (1700.0 - 150.0 * f64::from(level - 1)).max(800.0);
        prop_assert_eq!(here, expected);
    }

    #[test]
    fn culling_keeps_exactly_the_visible_barrels(ys in proptest::collection::vec(0.0f32..400.0, 0..30)) {
        let mut barrels: Vec<Barrel> = ys
            .iter()
            .enumerate()
            .map(|(i, &y)| Barrel::new(i as u32 + 1, Vec2::new(100.0, y), 1.6, 0.0))
            .collect();
        cull_barrels(&mut barrels);
        let kept: Vec<u32> = barrels.iter().map(|b| b.id).collect();
        let expected: Vec<u32> = ys
            .iter()
            .enumerate()
            .filter(|&(_, &y)| y < VIRTUAL_H + FALL_MARGIN)
            .map(|(i, _)| i as u32 + 1)
            .collect();
        prop_assert_eq!(kept, expected);
    }

    #[test]
    fn player_stays_inside_side_margins(
        seed in 0u64..1000,
        moves in proptest::collection::vec(0u8..16, 20..120)
    ) {
        let mut state = GameState::new(seed, 0);
        let mut input = TickInput::default();
        let mut now = 0.0;
        for bits in moves {
            input.left = bits & 1 != 0;
            input.right = bits & 2 != 0;
            input.up = bits & 4 != 0;
            if bits & 8 != 0 {
                input.jump.press(now);
            }
            for _ in 0..4 {
                now += SIM_DT_MS;
                tick(&mut state, &mut input, now);
                let x = state.player.pos.x;
                prop_assert!((SIDE_MARGIN..=VIRTUAL_W - SIDE_MARGIN).contains(&x));
                prop_assert!(state.lives <= 3);
            }
        }
    }
}
