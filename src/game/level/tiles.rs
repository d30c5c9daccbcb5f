// Tile terrain built from ASCII art
//
//   '#'  solid
//   '='  one-way platform (standable on its top row only)
//   '^'  hazard (solid and damaging)
//   '.'  empty

use crate::core::Rect;
use crate::engine::physics::{Footing, Solid};

use super::LevelError;

/// Friction of any tile surface, percent per tick
pub const TILE_FRICTION: i32 = 20;
/// Damage dealt by hazard tiles
pub const HAZARD_DAMAGE: i32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Empty,
    Solid,
    Platform,
    Hazard,
}

impl Tile {
    fn from_char(ch: char) -> Option<Self> {
        match ch {
            '.' | ' ' => Some(Self::Empty),
            '#' => Some(Self::Solid),
            '=' => Some(Self::Platform),
            '^' => Some(Self::Hazard),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TileMap {
    tile_size: i32,
    columns: i32,
    rows: i32,
    tiles: Vec<Tile>,
}

impl TileMap {
    /// Parse rows of tile characters. All rows must be the same width.
    pub fn from_ascii(tile_size: i32, rows: &[&str]) -> Result<Self, LevelError> {
        if tile_size <= 0 {
            return Err(LevelError::BadTileSize(tile_size));
        }

        let columns = rows.first().map_or(0, |row| row.chars().count());
        if columns == 0 {
            return Err(LevelError::Empty);
        }

        let mut tiles = Vec::with_capacity(columns * rows.len());
        for (row_index, row) in rows.iter().enumerate() {
            if row.chars().count() != columns {
                return Err(LevelError::RaggedRow {
                    row: row_index,
                    expected: columns,
                });
            }
            for (column, ch) in row.chars().enumerate() {
                let tile = Tile::from_char(ch).ok_or(LevelError::UnknownTile {
                    ch,
                    row: row_index,
                    column,
                })?;
                tiles.push(tile);
            }
        }

        Ok(Self {
            tile_size,
            columns: columns as i32,
            rows: rows.len() as i32,
            tiles,
        })
    }

    pub fn tile_size(&self) -> i32 {
        self.tile_size
    }

    /// Map extent in pixels
    pub fn pixel_bounds(&self) -> Rect {
        Rect::new(0, 0, self.columns * self.tile_size, self.rows * self.tile_size)
    }

    /// Tile covering a pixel; outside the map is empty
    pub fn tile_at(&self, x: i32, y: i32) -> Tile {
        let column = x.div_euclid(self.tile_size);
        let row = y.div_euclid(self.tile_size);
        if column < 0 || row < 0 || column >= self.columns || row >= self.rows {
            return Tile::Empty;
        }
        self.tiles[(row * self.columns + column) as usize]
    }

    pub fn solid(&self, x: i32, y: i32) -> Option<Solid> {
        match self.tile_at(x, y) {
            Tile::Solid => Some(Solid { damage: 0 }),
            Tile::Hazard => Some(Solid {
                damage: HAZARD_DAMAGE,
            }),
            Tile::Empty | Tile::Platform => None,
        }
    }

    pub fn standable(&self, x: i32, y: i32) -> Option<Footing> {
        let footing = |damage| Footing {
            friction: TILE_FRICTION,
            damage,
            adjust_y: 0,
            support: None,
        };

        match self.tile_at(x, y) {
            Tile::Solid => Some(footing(0)),
            Tile::Hazard => Some(footing(HAZARD_DAMAGE)),
            Tile::Platform if y.rem_euclid(self.tile_size) == 0 => Some(footing(0)),
            Tile::Platform | Tile::Empty => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map() -> TileMap {
        TileMap::from_ascii(16, &["....", ".==^", "####"]).unwrap()
    }

    #[test]
    fn test_dimensions() {
        assert_eq!(map().pixel_bounds(), Rect::new(0, 0, 64, 48));
    }

    #[test]
    fn test_tile_lookup() {
        let map = map();
        assert_eq!(map.tile_at(0, 0), Tile::Empty);
        assert_eq!(map.tile_at(20, 16), Tile::Platform);
        assert_eq!(map.tile_at(63, 31), Tile::Hazard);
        assert_eq!(map.tile_at(5, 40), Tile::Solid);
        assert_eq!(map.tile_at(-1, 40), Tile::Empty);
        assert_eq!(map.tile_at(5, 48), Tile::Empty);
    }

    #[test]
    fn test_solidity() {
        let map = map();
        assert_eq!(map.solid(5, 40), Some(Solid { damage: 0 }));
        assert!(map.solid(50, 20).unwrap().is_harmful());
        assert!(map.solid(20, 16).is_none());
    }

    #[test]
    fn test_platform_top_row_only() {
        let map = map();
        assert!(map.standable(20, 16).is_some());
        assert!(map.standable(20, 17).is_none());
        assert!(map.standable(20, 31).is_none());
    }

    #[test]
    fn test_hazard_footing_damages() {
        let footing = map().standable(50, 16).unwrap();
        assert_eq!(footing.damage, HAZARD_DAMAGE);
        assert_eq!(footing.friction, TILE_FRICTION);
    }

    #[test]
    fn test_bad_maps() {
        assert!(matches!(TileMap::from_ascii(16, &[]), Err(LevelError::Empty)));
        assert!(matches!(
            TileMap::from_ascii(16, &["..", "."]),
            Err(LevelError::RaggedRow { row: 1, expected: 2 })
        ));
        assert!(matches!(
            TileMap::from_ascii(16, &[".x"]),
            Err(LevelError::UnknownTile { ch: 'x', row: 0, column: 1 })
        ));
        assert!(matches!(TileMap::from_ascii(0, &["."]), Err(LevelError::BadTileSize(0))));
    }
}
