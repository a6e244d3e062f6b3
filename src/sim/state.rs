//! Game state and core simulation types
//!
//! `GameState` is the single simulation context: everything a tick reads or
//! writes lives here, including the seeded RNG and the pending transitions.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::barrel::Barrel;
use super::geometry::{Ladder, Platform, Rect};
use super::layout::Layout;
use super::player::Player;
use super::schedule::Schedule;
use crate::tuning::Tuning;

/// Current phase of the round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// A life was just lost; waiting for the restart or the full reset
    Dead,
    /// Goal reached; waiting for the next level to be built
    Win,
    /// Frozen by the player
    Paused,
}

/// Cues for the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Jump,
    /// Hard landing
    Land,
    /// Grabbed a ladder
    Grab,
    LifeLost { lives_left: u8 },
    LevelComplete { level: u32 },
    FanfareNote { index: u8 },
    RoundRestarted,
    /// Last life gone; the full reset follows after a delay
    GameOver { score: u64 },
    /// Progress wiped; `best_score` is what should be persisted
    GameReset { best_score: u64 },
    Paused,
    Resumed,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub tuning: Tuning,
    /// 1-based level number
    pub level: u32,
    pub layout: Layout,
    pub lives: u8,
    pub score: u64,
    /// Best score known to the persistence layer
    pub best_score: u64,
    pub phase: GamePhase,
    pub player: Player,
    /// Active barrels, in spawn order
    pub barrels: Vec<Barrel>,
    /// Playing time since the last barrel spawn
    pub spawn_elapsed_ms: f64,
    pub spawn_interval_ms: f64,
    /// Keeper drum animation phase, 0..=1
    pub keeper_drum: f32,
    /// Playing ticks simulated
    pub time_ticks: u64,
    /// Clock value of the previous tick
    pub last_tick_ms: Option<f64>,
    /// Pending delayed transitions
    pub schedule: Schedule,
    pub(crate) events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create a new game with the given seed and previously persisted best score
    pub fn new(seed: u64, best_score: u64) -> Self {
        Self::with_tuning(seed, best_score, Tuning::default())
    }

    pub fn with_tuning(seed: u64, best_score: u64, tuning: Tuning) -> Self {
        let layout = Layout::build(1);
        let player = Player::new(layout.spawn);
        let spawn_interval_ms = tuning.spawn_interval_for_level(1);
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            level: 1,
            layout,
            lives: tuning.starting_lives,
            score: 0,
            best_score,
            phase: GamePhase::Playing,
            player,
            barrels: Vec::new(),
            spawn_elapsed_ms: 0.0,
            spawn_interval_ms,
            keeper_drum: 0.0,
            time_ticks: 0,
            last_tick_ms: None,
            schedule: Schedule::new(),
            events: Vec::new(),
            next_id: 1,
            tuning,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Drain cues produced since the last call
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Start a round on the current layout: fresh player, no barrels
    pub fn start_round(&mut self, invulnerable: bool) {
        self.player = Player::new(self.layout.spawn);
        if invulnerable {
            self.player.invulnerable_ticks = self.tuning.respawn_invulnerable_ticks;
        }
        self.barrels.clear();
        self.spawn_elapsed_ms = 0.0;
    }

    /// Regenerate geometry for the current level number
    pub fn rebuild_layout(&mut self) {
        self.layout = Layout::build(self.level);
        self.spawn_interval_ms = self.tuning.spawn_interval_for_level(self.level);
    }

    /// Throw a new barrel from the keeper
    pub fn spawn_barrel(&mut self) {
        let jitter = self.tuning.barrel_speed_jitter;
        let speed = self.tuning.barrel_speed
            + if jitter > 0.0 {
                self.rng.random_range(0.0..jitter)
            } else {
                0.0
            };
        let spin = self.rng.random_range(0.0..std::f32::consts::TAU);
        let id = self.next_entity_id();
        let barrel = Barrel::new(id, self.layout.barrel_spawn(), speed, spin);
        self.barrels.push(barrel);
    }

    /// Borrowed, serializable view for the presentation layer
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            phase: self.phase,
            level: self.level,
            score: self.score,
            best_score: self.best_score,
            lives: self.lives,
            player: &self.player,
            barrels: &self.barrels,
            platforms: &self.layout.platforms,
            ladders: &self.layout.ladders,
            goal: self.layout.goal,
            keeper: self.layout.keeper,
            keeper_drum: self.keeper_drum,
            barrel_spawn: self.layout.barrel_spawn(),
            time_ticks: self.time_ticks,
        }
    }
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot<'a> {
    pub phase: GamePhase,
    pub level: u32,
    pub score: u64,
    pub best_score: u64,
    pub lives: u8,
    pub player: &'a Player,
    pub barrels: &'a [Barrel],
    pub platforms: &'a [Platform],
    pub ladders: &'a [Ladder],
    pub goal: Rect,
    pub keeper: Rect,
    pub keeper_drum: f32,
    pub barrel_spawn: Vec2,
    pub time_ticks: u64,
}

impl Snapshot<'_> {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
