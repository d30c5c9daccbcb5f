// Archetype stats shared by every instance of a character type
//
// Instances copy walk/jump/boost/glide/hitpoints on creation and may
// override them afterwards; the rest is read straight from the type.

use serde::{Deserialize, Serialize};

/// Numeric stats of a character archetype. Speeds are x100 per tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterStats {
    // Movement
    /// Velocity added per walk intent while standing
    pub walk: i32,
    /// Upward velocity of a standing jump
    pub jump: i32,
    /// Extra lift per tick while jump is held during the ascent
    pub boost: i32,
    /// Velocity added per walk intent while airborne
    pub glide: i32,
    pub climb: i32,

    // Combat
    pub hitpoints: i32,

    // Surface behavior
    /// Bounce given to actors landing on this one's head
    pub springiness: i32,
    /// Friction offered to actors standing on this one's platform
    pub friction: i32,
    /// Percentage of ground/air friction this actor actually feels
    pub traction: i32,

    // Vehicles
    pub vehicle: bool,
    pub passenger_x: i32,
    pub passenger_y: i32,
}

/// Stats used for any field a catalog entry leaves out
pub const BASE_STATS: CharacterStats = CharacterStats {
    walk: 100,
    jump: 1000,
    boost: 0,
    glide: 50,
    climb: 0,

    hitpoints: 1,

    springiness: 0,
    friction: 0,
    traction: 100,

    vehicle: false,
    passenger_x: 0,
    passenger_y: 0,
};

impl Default for CharacterStats {
    fn default() -> Self {
        BASE_STATS
    }
}
