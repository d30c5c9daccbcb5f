// Pixel collision queries
//
// The motion resolver never owns terrain or other actors; it talks to the
// level through `LevelQuery` and a couple of probing helpers built on it.

pub mod probe;
pub mod query;

pub use probe::{cliff_edge_within, find_ground_level};
pub use query::{ActorId, Contact, Footing, LevelQuery, PlayerInfo, Solid, Support};
