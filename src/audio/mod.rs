//! Sound cues
//!
//! Which sound goes with which game event, plus the background arpeggio
//! sequencer. Playback itself is Web Audio and only exists on wasm32.

use crate::sim::GameEvent;

#[cfg(target_arch = "wasm32")]
pub mod web;

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

/// Fanfare pitches, one per note index (wrapping)
pub const FANFARE_HZ: [f32; 4] = [660.0, 880.0, 990.0, 1320.0];
/// Background arpeggio pitches
pub const ARP_NOTES_HZ: [f32; 6] = [220.0, 277.0, 330.0, 440.0, 330.0, 277.0];
/// Time between arpeggio notes
pub const ARP_STEP_MS: f64 = 220.0;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Short square blip
    Jump,
    /// Thud for hard landings and lost lives
    Hit,
    /// Bright tick when grabbing a ladder
    Grab,
    /// One note of the level-complete fanfare
    Fanfare(u8),
}

impl SoundEffect {
    /// The sound for a cue, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match *event {
            GameEvent::Jump => Some(SoundEffect::Jump),
            GameEvent::Land | GameEvent::LifeLost { .. } => Some(SoundEffect::Hit),
            GameEvent::Grab => Some(SoundEffect::Grab),
            GameEvent::FanfareNote { index } => Some(SoundEffect::Fanfare(index)),
            GameEvent::LevelComplete { .. }
            | GameEvent::RoundRestarted
            | GameEvent::GameOver { .. }
            | GameEvent::GameReset { .. }
            | GameEvent::Paused
            | GameEvent::Resumed => None,
        }
    }

    /// Base pitch in Hz
    pub fn frequency(&self) -> f32 {
        match self {
            SoundEffect::Jump => 160.0,
            SoundEffect::Hit => 110.0,
            SoundEffect::Grab => 880.0,
            SoundEffect::Fanfare(i) => FANFARE_HZ[*i as usize % FANFARE_HZ.len()],
        }
    }
}

/// Background arpeggio: steps through `ARP_NOTES_HZ` while running
#[derive(Debug, Clone, Default)]
pub struct Arpeggio {
    running: bool,
    last_note_ms: Option<f64>,
    index: usize,
}

impl Arpeggio {
    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Follow the game: silent while paused or after a game over
    pub fn on_event(&mut self, event: &GameEvent) {
        match event {
            GameEvent::Paused | GameEvent::GameOver { .. } => self.stop(),
            GameEvent::Resumed | GameEvent::GameReset { .. } => self.start(),
            _ => {}
        }
    }

    /// The note to play at `now_ms`, if one is due
    pub fn next_note(&mut self, now_ms: f64) -> Option<f32> {
        if !self.running {
            return None;
        }
        if self.last_note_ms.is_some_and(|t| now_ms - t <= ARP_STEP_MS) {
            return None;
        }
        self.last_note_ms = Some(now_ms);
        let note = ARP_NOTES_HZ[self.index % ARP_NOTES_HZ.len()];
        self.index += 1;
        Some(note)
    }
}
