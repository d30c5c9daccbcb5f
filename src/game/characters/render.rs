// What a renderer needs to draw an actor this tick

use crate::engine::physics::LevelQuery;

use super::character::Character;
use super::frame::FrameKind;

/// Probe range used to tilt sprites with the ground
const SPRITE_SLOPE_RANGE: i32 = 5;

/// Invincible players blink, alternating every this many ticks
const BLINK_PERIOD: i32 = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderHints {
    pub frame: FrameKind,
    pub time_in_frame: i32,
    pub x: i32,
    pub y: i32,
    pub face_right: bool,
    /// Sprite rotation in degrees
    pub rotation: i32,
    /// Trail fade in percent per tick
    pub blur: i32,
    pub visible: bool,
}

impl Character {
    pub fn render_hints(&self, level: &dyn LevelQuery) -> RenderHints {
        let frame = self.frame();

        let rotation = if frame.rotate_on_slope {
            -self.slope_standing_on(level, SPRITE_SLOPE_RANGE) * self.face_dir()
        } else {
            0
        };

        RenderHints {
            frame: self.frame_kind(),
            time_in_frame: self.time_in_frame(),
            x: self.pos.x,
            y: self.pos.y,
            face_right: self.face_right,
            rotation,
            blur: frame.blur,
            visible: self.is_visible(),
        }
    }

    /// Invincible players blink, except while the hit animation plays
    pub fn is_visible(&self) -> bool {
        !(self.is_human()
            && (self.invincible / BLINK_PERIOD) % 2 == 1
            && !self.state.is(FrameKind::GetHit))
    }
}
