// Player input state and the key snapshot handed to the character each tick

use super::action::Action;
use std::collections::HashSet;

/// Which character controls are held during a tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControlKeys {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub jump: bool,
    pub attack: bool,
}

/// Represents the input state of the human player
#[derive(Debug, Default)]
pub struct PlayerInput {
    /// Actions that are currently pressed this tick
    pressed: HashSet<Action>,

    /// Actions that were just pressed this tick (press events)
    just_pressed: HashSet<Action>,

    /// Actions that were just released this tick (release events)
    just_released: HashSet<Action>,
}

impl PlayerInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if an action is currently pressed
    pub fn is_pressed(&self, action: Action) -> bool {
        self.pressed.contains(&action)
    }

    /// Check if an action was just pressed this tick
    pub fn just_pressed(&self, action: Action) -> bool {
        self.just_pressed.contains(&action)
    }

    /// Check if an action was just released this tick
    pub fn just_released(&self, action: Action) -> bool {
        self.just_released.contains(&action)
    }

    /// Register an action press
    pub(crate) fn press(&mut self, action: Action) {
        if self.pressed.insert(action) {
            self.just_pressed.insert(action);
        }
    }

    /// Register an action release
    pub(crate) fn release(&mut self, action: Action) {
        if self.pressed.remove(&action) {
            self.just_released.insert(action);
        }
    }

    /// Clear per-tick edges. Call once per tick after the game consumed them.
    pub(crate) fn update(&mut self) {
        self.just_pressed.clear();
        self.just_released.clear();
    }

    /// Reset all input state
    pub fn reset(&mut self) {
        self.pressed.clear();
        self.just_pressed.clear();
        self.just_released.clear();
    }

    /// Snapshot of held character controls
    pub fn control_keys(&self) -> ControlKeys {
        ControlKeys {
            left: self.is_pressed(Action::MoveLeft),
            right: self.is_pressed(Action::MoveRight),
            up: self.is_pressed(Action::LookUp),
            down: self.is_pressed(Action::Crouch),
            jump: self.is_pressed(Action::Jump),
            attack: self.is_pressed(Action::Attack),
        }
    }
}
