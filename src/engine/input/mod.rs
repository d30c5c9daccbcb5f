// Input handling system
//
// Keyboard and mouse input for the human player, with remappable bindings.
//
// ## Architecture
//
// - `action`: Defines game actions and default key bindings
// - `player`: Pressed/just-pressed state and the `ControlKeys` snapshot
// - `config`: Input configuration and remapping
// - `manager`: Feeds winit events through the bindings
//
// ## Usage Example
//
// ```rust
// use engine::input::{InputManager, Action};
//
// let mut input = InputManager::new();
//
// // In your event loop, process keyboard events
// input.process_keyboard_event(&key_event);
//
// // Once per tick, hand the held keys to the level and clear edges
// level.set_player_keys(input.control_keys());
// input.update();
// ```

pub mod action;
pub mod config;
pub mod manager;
pub mod player;

// Re-export commonly used types
pub use action::{Action, InputSource};
pub use config::InputConfig;
pub use manager::InputManager;
pub use player::{ControlKeys, PlayerInput};
