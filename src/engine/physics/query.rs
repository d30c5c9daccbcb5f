// Narrow query surface the motion resolver uses to ask the level about
// terrain and other actors.

use crate::core::Rect;

/// Unique identifier of an actor inside a level
pub type ActorId = u32;

/// A solid terrain pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Solid {
    /// Damage dealt by touching this pixel (0 = harmless)
    pub damage: i32,
}

impl Solid {
    pub fn is_harmful(&self) -> bool {
        self.damage > 0
    }
}

/// An actor providing standing support
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Support {
    pub id: ActorId,
    pub velocity_x: i32,
    pub velocity_y: i32,
}

/// What a foot probe found at a standable pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Footing {
    /// Ground friction in percent per tick
    pub friction: i32,
    /// Damage dealt by standing here
    pub damage: i32,
    /// Vertical correction to sit exactly on top of a moving platform
    pub adjust_y: i32,
    /// Actor whose platform is being stood on, if any
    pub support: Option<Support>,
}

/// Another actor overlapping a queried region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contact {
    pub id: ActorId,
    /// Touching this actor's body hurts the human player
    pub harmful: bool,
    pub springiness: i32,
    pub velocity_y: i32,
}

/// Snapshot of the human-controlled actor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerInfo {
    pub id: ActorId,
    pub face_right: bool,
    pub body: Rect,
    /// Absolute hit box of the player's current attack frame
    pub attack: Option<Rect>,
}

/// Everything an actor may ask the level during its tick.
///
/// Implementations must never report the requesting actor itself.
pub trait LevelQuery {
    /// Terrain solidity at a pixel
    fn solid(&self, x: i32, y: i32) -> Option<Solid>;

    /// Whether a foot placed at the pixel is supported, by terrain or by
    /// another actor's platform
    fn standable(&self, x: i32, y: i32, requester: ActorId) -> Option<Footing>;

    /// First non pass-through actor whose body overlaps `area`
    fn collide(&self, area: Rect, requester: ActorId) -> Option<Contact>;

    /// An undriven vehicle whose body contains the pixel
    fn board(&self, x: i32, y: i32, requester: ActorId) -> Option<ActorId>;

    /// Playable area of the level
    fn boundaries(&self) -> Rect;

    /// Ambient horizontal drag in percent per tick
    fn air_resistance(&self) -> i32;

    /// The human player, if one is present
    fn player(&self) -> Option<PlayerInfo>;
}
