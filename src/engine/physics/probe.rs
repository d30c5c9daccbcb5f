// Ground probing helpers built on top of `LevelQuery`

use super::query::{ActorId, LevelQuery};

/// How far ground may rise or drop between two neighbouring pixels while
/// still counting as continuous
const MAX_GROUND_DRIFT: i32 = 3;

/// Find the surface height near `(x, y)`.
///
/// If the pixel is standable the search goes up to the top-most standable
/// pixel, otherwise it goes down to the first standable one. Returns `None`
/// when nothing is found within `max_search` pixels.
pub fn find_ground_level(
    level: &dyn LevelQuery,
    x: i32,
    y: i32,
    max_search: i32,
    requester: ActorId,
) -> Option<i32> {
    if level.standable(x, y, requester).is_some() {
        let mut ypos = y;
        for _ in 0..max_search {
            if level.standable(x, ypos - 1, requester).is_none() {
                return Some(ypos);
            }
            ypos -= 1;
        }
        None
    } else {
        (1..=max_search)
            .map(|dy| y + dy)
            .find(|&ypos| level.standable(x, ypos, requester).is_some())
    }
}

/// Check whether walking `delta_x` pixels from `(x, y)` would run off an edge
pub fn cliff_edge_within(
    level: &dyn LevelQuery,
    x: i32,
    y: i32,
    delta_x: i32,
    requester: ActorId,
) -> bool {
    let dir = if delta_x < 0 { -1 } else { 1 };
    let mut ground = y;
    for step in 1..=delta_x.abs() {
        match find_ground_level(level, x + step * dir, ground, MAX_GROUND_DRIFT, requester) {
            Some(found) => ground = found,
            None => return true,
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Rect;
    use crate::engine::physics::query::{Contact, Footing, PlayerInfo, Solid};

    /// Terrain described by a height function: everything at or below
    /// `surface(x)` is solid, `None` means a pit.
    struct HeightField<F: Fn(i32) -> Option<i32>> {
        surface: F,
    }

    impl<F: Fn(i32) -> Option<i32>> LevelQuery for HeightField<F> {
        fn solid(&self, x: i32, y: i32) -> Option<Solid> {
            match (self.surface)(x) {
                Some(top) if y >= top => Some(Solid::default()),
                _ => None,
            }
        }

        fn standable(&self, x: i32, y: i32, _requester: ActorId) -> Option<Footing> {
            self.solid(x, y).map(|_| Footing::default())
        }

        fn collide(&self, _area: Rect, _requester: ActorId) -> Option<Contact> {
            None
        }

        fn board(&self, _x: i32, _y: i32, _requester: ActorId) -> Option<ActorId> {
            None
        }

        fn boundaries(&self) -> Rect {
            Rect::new(0, 0, 1000, 1000)
        }

        fn air_resistance(&self) -> i32 {
            0
        }

        fn player(&self) -> Option<PlayerInfo> {
            None
        }
    }

    #[test]
    fn test_ground_below() {
        let level = HeightField { surface: |_| Some(50) };
        assert_eq!(find_ground_level(&level, 10, 45, 10, 0), Some(50));
        assert_eq!(find_ground_level(&level, 10, 30, 10, 0), None);
    }

    #[test]
    fn test_ground_above_when_buried() {
        let level = HeightField { surface: |_| Some(50) };
        assert_eq!(find_ground_level(&level, 10, 53, 10, 0), Some(50));
        assert_eq!(find_ground_level(&level, 10, 50, 10, 0), Some(50));
        assert_eq!(find_ground_level(&level, 10, 80, 10, 0), None);
    }

    #[test]
    fn test_cliff_edge_detects_pit() {
        let level = HeightField {
            surface: |x| if x < 20 { Some(50) } else { None },
        };
        assert!(cliff_edge_within(&level, 10, 50, 15, 0));
        assert!(!cliff_edge_within(&level, 10, 50, -15, 0));
    }

    #[test]
    fn test_cliff_edge_follows_gentle_slope() {
        let level = HeightField {
            surface: |x| Some(100 - x),
        };
        assert!(!cliff_edge_within(&level, 10, 90, 15, 0));
    }
}
