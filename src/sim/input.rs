//! Per-tick input intent
//!
//! The simulation never sees device events, only these intents.

use serde::{Deserialize, Serialize};

/// One-shot jump press that stays pending for a short window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct JumpBuffer {
    pressed_at_ms: Option<f64>,
}

impl JumpBuffer {
    /// Record a press at `now_ms`, replacing any pending one
    pub fn press(&mut self, now_ms: f64) {
        self.pressed_at_ms = Some(now_ms);
    }

    /// Whether a press is still pending at `now_ms`
    pub fn is_pending(&self, now_ms: f64, window_ms: f64) -> bool {
        self.pressed_at_ms
            .is_some_and(|t| now_ms - t <= window_ms)
    }

    /// Take the pending press, if any. Each press is returned at most once.
    pub fn consume(&mut self, now_ms: f64, window_ms: f64) -> bool {
        let pending = self.is_pending(now_ms, window_ms);
        self.pressed_at_ms = None;
        pending
    }
}

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    /// Climb up (also mounts a ladder)
    pub up: bool,
    /// Climb down
    pub down: bool,
    /// Pause toggle (one-shot, consumed by the tick that sees it)
    pub pause: bool,
    pub jump: JumpBuffer,
}

impl TickInput {
    /// Horizontal intent as -1, 0 or +1
    pub fn axis(&self) -> f32 {
        let mut ax = 0.0;
        if self.left {
            ax -= 1.0;
        }
        if self.right {
            ax += 1.0;
        }
        ax
    }
}
