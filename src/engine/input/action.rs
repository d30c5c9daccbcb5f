// Game action definitions and mappings

use winit::event::MouseButton;
use winit::keyboard::KeyCode;

/// Represents all possible in-game actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // Movement
    MoveLeft,
    MoveRight,
    LookUp,
    Crouch,
    Jump,

    // Combat
    Attack,

    // Meta actions
    Pause,
    Menu,
}

impl Action {
    /// Actions that drive the player's character (as opposed to the game)
    pub fn is_control(self) -> bool {
        !matches!(self, Self::Pause | Self::Menu)
    }
}

/// Represents an input source (keyboard key or mouse button)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputSource {
    Keyboard(KeyCode),
    Mouse(MouseButton),
}

impl InputSource {
    /// Create a keyboard input source
    pub fn key(code: KeyCode) -> Self {
        Self::Keyboard(code)
    }

    /// Create a mouse button input source
    pub fn mouse(button: MouseButton) -> Self {
        Self::Mouse(button)
    }
}

/// Default character bindings: arrows to move, A to jump, S to attack
pub fn default_bindings() -> Vec<(InputSource, Action)> {
    vec![
        (InputSource::key(KeyCode::ArrowLeft), Action::MoveLeft),
        (InputSource::key(KeyCode::ArrowRight), Action::MoveRight),
        (InputSource::key(KeyCode::ArrowUp), Action::LookUp),
        (InputSource::key(KeyCode::ArrowDown), Action::Crouch),
        (InputSource::key(KeyCode::KeyA), Action::Jump),
        (InputSource::key(KeyCode::KeyS), Action::Attack),
        (InputSource::mouse(MouseButton::Left), Action::Attack),
    ]
}

/// Bindings that control the game rather than the character
pub fn global_bindings() -> Vec<(InputSource, Action)> {
    vec![
        (InputSource::key(KeyCode::KeyP), Action::Pause),
        (InputSource::key(KeyCode::Escape), Action::Menu),
    ]
}
