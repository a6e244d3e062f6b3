//! Fixed timestep simulation tick
//!
//! One call advances the game by one step. Due scheduled transitions fire
//! first, then the pause toggle, then (only while playing) the spawner, the
//! entities and the rules pass.

use super::barrel::{cull_barrels, update_barrel};
use super::collision::{self, RuleOutcome};
use super::input::TickInput;
use super::player::update_player;
use super::schedule::ScheduledEvent;
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Advance the game state by one step at simulation time `now_ms`
pub fn tick(state: &mut GameState, input: &mut TickInput, now_ms: f64) {
    while let Some(event) = state.schedule.pop_due(now_ms) {
        apply_scheduled(state, event);
    }

    let dt = state
        .last_tick_ms
        .map_or(0.0, |prev| (now_ms - prev).clamp(0.0, MAX_FRAME_MS));
    state.last_tick_ms = Some(now_ms);

    if std::mem::take(&mut input.pause) {
        toggle_pause(state);
    }

    if state.phase != GamePhase::Playing {
        return;
    }

    state.time_ticks += 1;

    // Spawner runs on playing time only
    state.spawn_elapsed_ms += dt;
    if state.spawn_elapsed_ms >= state.spawn_interval_ms {
        state.spawn_elapsed_ms = 0.0;
        state.spawn_barrel();
    }

    state.keeper_drum = (((now_ms * 0.01).sin() + 1.0) / 2.0) as f32;

    update_player(
        &mut state.player,
        &state.layout,
        input,
        &state.tuning,
        now_ms,
        &mut state.events,
    );

    for barrel in &mut state.barrels {
        update_barrel(barrel, &state.layout, &state.tuning, &mut state.rng);
    }

    match collision::evaluate(&state.player, &state.barrels, &state.layout, &state.tuning) {
        RuleOutcome::HitBarrel(id) => {
            log::debug!("Barrel {} hit the player at {:?}", id, state.player.pos);
            lose_life(state, now_ms);
        }
        RuleOutcome::FellOut => {
            log::debug!("Player fell out at x {:.1}", state.player.pos.x);
            lose_life(state, now_ms);
        }
        RuleOutcome::ReachedGoal => complete_level(state, now_ms),
        RuleOutcome::Clear => {}
    }

    cull_barrels(&mut state.barrels);
}

fn toggle_pause(state: &mut GameState) {
    match state.phase {
        GamePhase::Playing => {
            state.phase = GamePhase::Paused;
            state.emit(GameEvent::Paused);
        }
        GamePhase::Paused => {
            state.phase = GamePhase::Playing;
            state.emit(GameEvent::Resumed);
        }
        GamePhase::Dead | GamePhase::Win => {}
    }
}

fn lose_life(state: &mut GameState, now_ms: f64) {
    state.lives = state.lives.saturating_sub(1);
    state.phase = GamePhase::Dead;
    state.emit(GameEvent::LifeLost {
        lives_left: state.lives,
    });

    if state.lives > 0 {
        let due = now_ms + state.tuning.restart_delay_ms;
        state.schedule.push(due, ScheduledEvent::RestartRound);
    } else {
        log::info!("Game over on level {} with score {}", state.level, state.score);
        state.emit(GameEvent::GameOver { score: state.score });
        let due = now_ms + state.tuning.game_over_delay_ms;
        state.schedule.push(due, ScheduledEvent::FullReset);
    }
}

fn complete_level(state: &mut GameState, now_ms: f64) {
    state.level += 1;
    state.score += state.tuning.level_bonus;
    state.phase = GamePhase::Win;
    state.emit(GameEvent::LevelComplete { level: state.level });
    log::info!("Level complete, advancing to {} (score {})", state.level, state.score);

    for i in 0..state.tuning.fanfare_notes {
        let due = now_ms + f64::from(i) * state.tuning.fanfare_note_ms;
        state.schedule.push(due, ScheduledEvent::FanfareNote(i));
    }
    let due = now_ms + state.tuning.win_hold_ms;
    state.schedule.push(due, ScheduledEvent::AdvanceLevel);
}

fn apply_scheduled(state: &mut GameState, event: ScheduledEvent) {
    match event {
        ScheduledEvent::RestartRound => {
            state.start_round(true);
            state.phase = GamePhase::Playing;
            state.emit(GameEvent::RoundRestarted);
        }
        ScheduledEvent::FullReset => {
            state.best_score = state.best_score.max(state.score);
            state.emit(GameEvent::GameReset {
                best_score: state.best_score,
            });
            state.level = 1;
            state.score = 0;
            state.lives = state.tuning.starting_lives;
            state.rebuild_layout();
            state.start_round(false);
            state.phase = GamePhase::Playing;
        }
        ScheduledEvent::FanfareNote(index) => {
            state.emit(GameEvent::FanfareNote { index });
        }
        ScheduledEvent::AdvanceLevel => {
            state.rebuild_layout();
            state.start_round(false);
            state.phase = GamePhase::Playing;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::barrel::Barrel;
    use crate::sim::player::PlayerMode;
    use glam::Vec2;

    /// Drop a motionless barrel on top of the freshly spawned player
    fn barrel_on_player(state: &mut GameState) {
        let id = state.next_entity_id();
        let pos = state.player.pos - Vec2::new(0.0, 7.0);
        state.barrels.push(Barrel::new(id, pos, 0.0, 0.0));
    }

    #[test]
    fn test_life_loss_then_restart() {
        let mut state = GameState::new(12345, 0);
        let mut input = TickInput::default();
        barrel_on_player(&mut state);

        tick(&mut state, &mut input, 0.0);
        assert_eq!(state.lives, 2);
        assert_eq!(state.phase, GamePhase::Dead);
        assert_eq!(state.take_events(), vec![GameEvent::LifeLost { lives_left: 2 }]);

        // Frozen until the restart delay passes
        let frozen = state.barrels.clone();
        for now in [16.0, 500.0, 899.0] {
            tick(&mut state, &mut input, now);
            assert_eq!(state.phase, GamePhase::Dead);
        }
        assert_eq!(state.barrels, frozen);

        tick(&mut state, &mut input, 900.0);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.barrels.is_empty());
        assert_eq!(state.player.pos.x, state.layout.spawn.x);
        assert!((state.player.pos.y - state.layout.spawn.y).abs() < 1.0);
        assert_eq!(state.player.invulnerable_ticks, 89);
        assert_eq!(state.take_events(), vec![GameEvent::RoundRestarted]);
    }

    #[test]
    fn test_last_life_full_reset() {
        let mut state = GameState::new(12345, 1234);
        let mut input = TickInput::default();
        state.lives = 1;
        state.score = 5000;
        state.level = 3;
        state.rebuild_layout();
        state.start_round(false);
        barrel_on_player(&mut state);

        tick(&mut state, &mut input, 0.0);
        assert_eq!(state.lives, 0);
        assert_eq!(state.phase, GamePhase::Dead);
        assert_eq!(
            state.take_events(),
            vec![
                GameEvent::LifeLost { lives_left: 0 },
                GameEvent::GameOver { score: 5000 },
            ]
        );

        // The shorter restart delay does not apply
        tick(&mut state, &mut input, 900.0);
        assert_eq!(state.phase, GamePhase::Dead);
        assert_eq!(state.lives, 0);

        tick(&mut state, &mut input, 1400.0);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.level, 1);
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, 3);
        assert_eq!(state.best_score, 5000);
        assert_eq!(state.layout.number, 1);
        assert_eq!(state.spawn_interval_ms, 1700.0);
        assert!(state.barrels.is_empty());
        assert_eq!(state.take_events(), vec![GameEvent::GameReset { best_score: 5000 }]);
    }

    #[test]
    fn test_full_reset_keeps_higher_best() {
        let mut state = GameState::new(3, 9000);
        let mut input = TickInput::default();
        state.lives = 1;
        state.score = 500;
        barrel_on_player(&mut state);
        tick(&mut state, &mut input, 0.0);
        tick(&mut state, &mut input, 1400.0);
        assert_eq!(state.best_score, 9000);
        assert!(state.take_events().contains(&GameEvent::GameReset { best_score: 9000 }));
    }

    #[test]
    fn test_spawner_fires_on_interval() {
        let mut state = GameState::new(42, 0);
        let mut input = TickInput::default();
        for i in 0..170 {
            tick(&mut state, &mut input, i as f64 * 10.0);
        }
        assert!(state.barrels.is_empty());
        tick(&mut state, &mut input, 1700.0);
        assert_eq!(state.barrels.len(), 1);
        assert_eq!(state.spawn_elapsed_ms, 0.0);
    }

    #[test]
    fn test_long_frame_gap_is_clamped() {
        let mut state = GameState::new(42, 0);
        let mut input = TickInput::default();
        tick(&mut state, &mut input, 0.0);
        tick(&mut state, &mut input, 10_000.0);
        assert_eq!(state.spawn_elapsed_ms, MAX_FRAME_MS);
        assert!(state.barrels.is_empty());
    }

    #[test]
    fn test_pause_freezes_and_resumes() {
        let mut state = GameState::new(42, 0);
        let mut input = TickInput::default();
        tick(&mut state, &mut input, 0.0);

        input.pause = true;
        tick(&mut state, &mut input, 16.0);
        assert!(!input.pause);
        assert_eq!(state.phase, GamePhase::Paused);
        assert_eq!(state.take_events(), vec![GameEvent::Paused]);

        let ticks = state.time_ticks;
        let pos = state.player.pos;
        for i in 2..100 {
            tick(&mut state, &mut input, i as f64 * 16.0);
        }
        assert_eq!(state.time_ticks, ticks);
        assert_eq!(state.player.pos, pos);
        assert_eq!(state.spawn_elapsed_ms, 0.0);

        input.pause = true;
        tick(&mut state, &mut input, 1600.0);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.time_ticks, ticks + 1);
        assert_eq!(state.take_events(), vec![GameEvent::Resumed]);
    }

    #[test]
    fn test_pause_ignored_while_dead() {
        let mut state = GameState::new(42, 0);
        let mut input = TickInput::default();
        barrel_on_player(&mut state);
        tick(&mut state, &mut input, 0.0);
        state.take_events();

        input.pause = true;
        tick(&mut state, &mut input, 16.0);
        assert_eq!(state.phase, GamePhase::Dead);
        assert!(state.take_events().is_empty());
    }

    #[test]
    fn test_reaching_goal_plays_fanfare_then_advances() {
        let mut state = GameState::new(42, 0);
        let mut input = TickInput::default();
        state.player.pos = Vec2::new(440.0, 34.0);
        state.player.mode = PlayerMode::Grounded;

        tick(&mut state, &mut input, 0.0);
        assert_eq!(state.phase, GamePhase::Win);
        assert_eq!(state.level, 2);
        assert_eq!(state.score, 1000);
        assert_eq!(state.lives, 3);

        let mut events = state.take_events();
        for now in [130.0, 250.0, 370.0] {
            tick(&mut state, &mut input, now);
            assert_eq!(state.phase, GamePhase::Win);
            events.extend(state.take_events());
        }
        tick(&mut state, &mut input, 480.0);
        events.extend(state.take_events());

        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.layout.number, 2);
        assert_eq!(state.spawn_interval_ms, 1550.0);
        assert_eq!(state.player.pos.x, state.layout.spawn.x);
        assert!(state.schedule.is_empty());

        let cues: Vec<GameEvent> = events
            .into_iter()
            .filter(|e| {
                matches!(
                    e,
                    GameEvent::LevelComplete { .. } | GameEvent::FanfareNote { .. }
                )
            })
            .collect();
        assert_eq!(
            cues,
            vec![
                GameEvent::LevelComplete { level: 2 },
                GameEvent::FanfareNote { index: 0 },
                GameEvent::FanfareNote { index: 1 },
                GameEvent::FanfareNote { index: 2 },
                GameEvent::FanfareNote { index: 3 },
            ]
        );
    }

    #[test]
    fn test_falling_out_costs_a_life() {
        let mut state = GameState::new(42, 0);
        let mut input = TickInput::default();
        state.player.pos = Vec2::new(200.0, VIRTUAL_H + FALL_MARGIN + 5.0);
        tick(&mut state, &mut input, 0.0);
        assert_eq!(state.lives, 2);
        assert_eq!(state.phase, GamePhase::Dead);
    }

    #[test]
    fn test_drum_phase_in_range() {
        let mut state = GameState::new(42, 0);
        let mut input = TickInput::default();
        for i in 0..200 {
            tick(&mut state, &mut input, i as f64 * SIM_DT_MS);
            assert!((0.0..=1.0).contains(&state.keeper_drum));
        }
    }
}
