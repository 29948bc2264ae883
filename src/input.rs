//! Collaborator interfaces for input and application mode changes.

use serde::{Deserialize, Serialize};

/// Logical, edge-triggered input actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputAction {
    Confirm,
    Cancel,
    Up,
    Down,
    Left,
    Right,
}

/// Answers "was this action pressed this frame".
pub trait InputSource {
    fn just_pressed(&self, action: InputAction) -> bool;
}

/// The set of actions pressed during one frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameInput {
    pressed: Vec<InputAction>,
}

impl FrameInput {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn press(action: InputAction) -> Self {
        Self {
            pressed: vec![action],
        }
    }
}

impl InputSource for FrameInput {
    fn just_pressed(&self, action: InputAction) -> bool {
        self.pressed.contains(&action)
    }
}

/// Top-level application modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameMode {
    Map,
    Battle,
}

/// Receives the request to leave the battle screen.
pub trait ModeSwitch {
    fn switch_mode(&mut self, mode: GameMode);
}

/// Records requested mode changes instead of acting on them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModeLog {
    pub requested: Vec<GameMode>,
}

impl ModeSwitch for ModeLog {
    fn switch_mode(&mut self, mode: GameMode) {
        self.requested.push(mode);
    }
}
