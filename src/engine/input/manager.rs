// Input manager - turns winit events into player actions

use super::action::{Action, InputSource};
use super::config::InputConfig;
use super::player::{ControlKeys, PlayerInput};
use winit::event::{ElementState, KeyEvent, MouseButton};
use winit::keyboard::PhysicalKey;

/// Routes keyboard and mouse events through the bindings into the
/// player's input state
#[derive(Debug, Default)]
pub struct InputManager {
    config: InputConfig,
    player: PlayerInput,
}

impl InputManager {
    /// Input manager using the default bindings
    pub fn new() -> Self {
        Self::with_config(InputConfig::with_defaults())
    }

    pub fn with_config(config: InputConfig) -> Self {
        Self {
            config,
            player: PlayerInput::new(),
        }
    }

    /// Process a keyboard event from winit
    pub fn process_keyboard_event(&mut self, event: &KeyEvent) {
        if let PhysicalKey::Code(key_code) = event.physical_key {
            self.process_source(InputSource::key(key_code), event.state, event.repeat);
        }
    }

    /// Process a mouse button event from winit
    pub fn process_mouse_event(&mut self, button: MouseButton, state: ElementState) {
        self.process_source(InputSource::mouse(button), state, false);
    }

    /// Apply a press or release of a bound source. Key repeats are ignored.
    pub fn process_source(&mut self, source: InputSource, state: ElementState, repeat: bool) {
        let Some(action) = self.config.get_action(source) else {
            return;
        };

        match state {
            ElementState::Pressed if !repeat => self.player.press(action),
            ElementState::Pressed => {}
            ElementState::Released => self.player.release(action),
        }
    }

    /// Clear per-tick edges. Call once per tick after the game consumed them.
    pub fn update(&mut self) {
        self.player.update();
    }

    pub fn player(&self) -> &PlayerInput {
        &self.player
    }

    pub fn just_pressed(&self, action: Action) -> bool {
        self.player.just_pressed(action)
    }

    /// Held character controls for this tick
    pub fn control_keys(&self) -> ControlKeys {
        self.player.control_keys()
    }

    pub fn config(&self) -> &InputConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut InputConfig {
        &mut self.config
    }

    /// Forget everything held, e.g. when the window loses focus
    pub fn reset(&mut self) {
        self.player.reset();
    }
}
