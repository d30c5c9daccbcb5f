// The level as seen by one actor during its tick

use crate::core::Rect;
use crate::engine::physics::{ActorId, Contact, Footing, LevelQuery, PlayerInfo, Solid};
use crate::game::characters::Character;

use super::tiles::TileMap;

/// Terrain plus every actor except the one being processed, which the
/// caller has split out of the actor list
pub struct LevelView<'a> {
    pub(super) terrain: &'a TileMap,
    pub(super) before: &'a [Character],
    pub(super) after: &'a [Character],
    pub(super) boundaries: Rect,
    pub(super) air_resistance: i32,
    pub(super) player: Option<PlayerInfo>,
}

impl<'a> LevelView<'a> {
    fn others(&self) -> impl Iterator<Item = &'a Character> {
        self.before.iter().chain(self.after.iter())
    }
}

impl LevelQuery for LevelView<'_> {
    fn solid(&self, x: i32, y: i32) -> Option<Solid> {
        self.terrain.solid(x, y)
    }

    fn standable(&self, x: i32, y: i32, requester: ActorId) -> Option<Footing> {
        self.terrain.standable(x, y).or_else(|| {
            self.others()
                .filter(|actor| actor.id() != requester)
                .find_map(|actor| actor.is_standable(x, y))
        })
    }

    fn collide(&self, area: Rect, requester: ActorId) -> Option<Contact> {
        self.others()
            .filter(|actor| actor.id() != requester && !actor.body_passthrough())
            .find(|actor| actor.body_rect().intersects(&area))
            .map(Character::contact)
    }

    /// Only the human player can board
    fn board(&self, x: i32, y: i32, requester: ActorId) -> Option<ActorId> {
        if self.player.map(|p| p.id) != Some(requester) {
            return None;
        }
        self.others()
            .find(|actor| actor.boardable_vehicle() && actor.point_collides(x, y))
            .map(Character::id)
    }

    fn boundaries(&self) -> Rect {
        self.boundaries
    }

    fn air_resistance(&self) -> i32 {
        self.air_resistance
    }

    fn player(&self) -> Option<PlayerInfo> {
        self.player
    }
}
