// Side effects an actor's tick asks the level to carry out

use glam::IVec2;

use crate::engine::physics::ActorId;

/// Emitted by `Character` while it processes a tick and drained by the
/// level afterwards. Actors never touch each other or the actor list
/// directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActorEvent {
    /// A frame with a sound cue started
    PlaySound(String),
    /// The actor took damage and now has `hitpoints` left
    Hurt { hitpoints: i32 },
    /// The actor bounced off another actor's head
    SprungOn(ActorId),
    /// The actor is standing on another actor's platform this tick
    StoodOn(ActorId),
    /// Passengers of this actor's platform move along with it
    CarryPassengers {
        passengers: Vec<ActorId>,
        delta: IVec2,
    },
    /// Mount the given vehicle; the actor's tick ended early
    Board(ActorId),
    /// Leave the vehicle this actor is driving
    Unboard,
}

impl ActorEvent {
    /// Events that replace actors in the level rather than mutate them
    pub fn is_composition(&self) -> bool {
        matches!(self, Self::Board(_) | Self::Unboard)
    }
}
