//! Keyboard and touch mapping
//!
//! Device events are folded into a `TickInput` that the driver hands to the
//! simulation. Codes are `KeyboardEvent.code` values.

use crate::sim::TickInput;

/// What a key does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Left,
    Right,
    /// Climb up; a fresh press also buffers a jump
    Up,
    Down,
    Jump,
    Pause,
    Mute,
}

impl Action {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "ArrowLeft" | "KeyA" => Some(Action::Left),
            "ArrowRight" | "KeyD" => Some(Action::Right),
            "ArrowUp" | "KeyW" => Some(Action::Up),
            "ArrowDown" | "KeyS" => Some(Action::Down),
            "Space" => Some(Action::Jump),
            "KeyP" => Some(Action::Pause),
            "KeyM" => Some(Action::Mute),
            _ => None,
        }
    }
}

/// On-screen buttons for touch devices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchButton {
    Left,
    Right,
    Jump,
}

impl TouchButton {
    pub const ALL: [TouchButton; 3] = [TouchButton::Left, TouchButton::Right, TouchButton::Jump];

    /// DOM id of the button element
    pub fn element_id(self) -> &'static str {
        match self {
            TouchButton::Left => "btn-left",
            TouchButton::Right => "btn-right",
            TouchButton::Jump => "btn-jump",
        }
    }
}

/// Live keyboard and touch state plus the pending one-shot requests
#[derive(Debug, Clone, Default)]
pub struct Controls {
    input: TickInput,
    mute_requested: bool,
}

impl Controls {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle a key press. Returns true when the key is bound, so the caller
    /// can stop the browser from scrolling.
    pub fn key_down(&mut self, code: &str, repeat: bool, now_ms: f64) -> bool {
        let Some(action) = Action::from_code(code) else {
            return false;
        };
        match action {
            Action::Left => self.input.left = true,
            Action::Right => self.input.right = true,
            Action::Up => {
                self.input.up = true;
                if !repeat {
                    self.input.jump.press(now_ms);
                }
            }
            Action::Down => self.input.down = true,
            Action::Jump => {
                if !repeat {
                    self.input.jump.press(now_ms);
                }
            }
            Action::Pause => {
                if !repeat {
                    self.input.pause = true;
                }
            }
            Action::Mute => {
                if !repeat {
                    self.mute_requested = true;
                }
            }
        }
        true
    }

    pub fn key_up(&mut self, code: &str) -> bool {
        let Some(action) = Action::from_code(code) else {
            return false;
        };
        match action {
            Action::Left => self.input.left = false,
            Action::Right => self.input.right = false,
            Action::Up => self.input.up = false,
            Action::Down => self.input.down = false,
            Action::Jump | Action::Pause | Action::Mute => {}
        }
        true
    }

    pub fn touch_left(&mut self, held: bool) {
        self.input.left = held;
    }

    pub fn touch_right(&mut self, held: bool) {
        self.input.right = held;
    }

    /// Jump button: press only, nothing is held
    pub fn touch_jump(&mut self, now_ms: f64) {
        self.input.jump.press(now_ms);
    }

    /// Route a touchstart (`down`) or touchend to its button
    pub fn touch(&mut self, button: TouchButton, down: bool, now_ms: f64) {
        match button {
            TouchButton::Left => self.touch_left(down),
            TouchButton::Right => self.touch_right(down),
            TouchButton::Jump => {
                if down {
                    self.touch_jump(now_ms);
                }
            }
        }
    }

    /// Drop held directions (window blur: key-up events never arrive)
    pub fn release_all(&mut self) {
        self.input.left = false;
        self.input.right = false;
        self.input.up = false;
        self.input.down = false;
    }

    /// Ask for a pause toggle on the next tick
    pub fn request_pause(&mut self) {
        self.input.pause = true;
    }

    /// Intent for the next tick; the tick consumes the one-shot parts
    pub fn input_mut(&mut self) -> &mut TickInput {
        &mut self.input
    }

    pub fn input(&self) -> &TickInput {
        &self.input
    }

    pub fn take_mute(&mut self) -> bool {
        std::mem::take(&mut self.mute_requested)
    }
}
