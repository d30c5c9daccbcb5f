// Integer geometry helpers shared by the collision code

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned integer rectangle. `x2`/`y2` are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// A single pixel
    pub const fn point(x: i32, y: i32) -> Self {
        Self::new(x, y, 1, 1)
    }

    pub fn x2(&self) -> i32 {
        self.x + self.w
    }

    pub fn y2(&self) -> i32 {
        self.y + self.h
    }

    pub fn origin(&self) -> IVec2 {
        IVec2::new(self.x, self.y)
    }

    pub fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    /// Check whether a pixel lies inside the rectangle
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.x2() && y >= self.y && y < self.y2()
    }

    /// Check whether two rectangles share at least one pixel
    pub fn intersects(&self, other: &Rect) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.x < other.x2()
            && other.x < self.x2()
            && self.y < other.y2()
            && other.y < self.y2()
    }

    /// Same rectangle shifted by `offset`
    pub fn translated(&self, offset: IVec2) -> Self {
        Self::new(self.x + offset.x, self.y + offset.y, self.w, self.h)
    }
}

/// Integer linear interpolation between `a` (weight `wa`) and `b` (weight `wb`)
pub fn weighted_mix(a: i32, wa: i32, b: i32, wb: i32) -> i32 {
    let total = wa + wb;
    if total == 0 {
        return a;
    }
    (a * wa + b * wb) / total
}

/// Sign of a facing flag: 1 for right, -1 for left
pub fn facing_sign(face_right: bool) -> i32 {
    if face_right {
        1
    } else {
        -1
    }
}
