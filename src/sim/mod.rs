//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only (one `Pcg32` inside `GameState`)
//! - Stable iteration order (barrels in spawn order)
//! - No rendering or platform dependencies

pub mod barrel;
pub mod collision;
pub mod geometry;
pub mod input;
pub mod layout;
pub mod player;
pub mod schedule;
pub mod state;
pub mod tick;

pub use barrel::{Barrel, cull_barrels, update_barrel};
pub use collision::RuleOutcome;
pub use geometry::{Ladder, Platform, Rect, ground_below, ground_y, surface_crossed};
pub use input::{JumpBuffer, TickInput};
pub use layout::Layout;
pub use player::{Player, PlayerMode, update_player};
pub use schedule::{Schedule, ScheduledEvent};
pub use state::{GameEvent, GamePhase, GameState, Snapshot};
pub use tick::tick;
