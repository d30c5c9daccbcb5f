// Per-tick motion: frame timing, control, then pixel-by-pixel collision
// sweeps along each axis, friction and landing

use glam::IVec2;
use log::debug;

use crate::core::Rect;
use crate::engine::physics::{find_ground_level, LevelQuery};

use super::character::{Character, FEET_WIDTH};
use super::events::ActorEvent;
use super::frame::FrameKind;
use super::state::Completion;

/// Largest step (in pixels) the feet may be corrected up or down to keep
/// standing on uneven ground
pub const MAX_STEP: i32 = 3;

/// Knockback from walking into something harmful
const KNOCKBACK_X: i32 = 200;
const KNOCKBACK_Y: i32 = 400;

/// Bounce velocity per point of springiness
const SPRING_FACTOR: i32 = 13;

/// A fast enough jump or fall into a wall turns into a slide
const SLIDE_MIN_SPEED: i32 = 300;
const SLIDE_MAX_FALL_SPEED: i32 = 100;
/// How far past the body a sliding actor still finds its wall
const SLIDE_GRIP_REACH: i32 = 5;

/// Chance (1 in n) that a finished stand frame fidgets into idle
const IDLE_CHANCE: u32 = 5;

/// How deep below the feet slope detection looks for terrain
const SLOPE_SEARCH_DEPTH: i32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Sweep {
    Done,
    /// The actor started boarding a vehicle and must stop processing
    Boarded,
}

impl Character {
    /// Advance the actor by one tick
    pub fn process(&mut self, level: &dyn LevelQuery) {
        if self.pos.y > level.boundaries().y2() {
            self.hitpoints -= 1;
        }

        self.previous_y = self.pos.y;
        self.cycle = self.cycle.wrapping_add(1);
        let start = self.pos;

        self.run_frame_clock(level);

        if self.state.current().is_moving_on_ground() && self.velocity_x / 100 == 0 {
            self.change_to_stand_frame(level);
        }

        self.control(level);

        self.collided = false;
        let started_standing = match self.footing(level) {
            Some(footing) => {
                self.pos.y += footing.adjust_y;
                true
            }
            None => false,
        };

        if self.invincible > 0 {
            self.invincible -= 1;
        }

        self.sweep_horizontal(level, started_standing);
        if self.sweep_down(level) == Sweep::Boarded {
            return;
        }
        self.sweep_up(level);
        self.push_out_of_terrain(level, started_standing);
        self.resolve_contact_damage(level);
        self.apply_friction_and_landing(level);

        self.velocity_y += self.frame().accel_y;

        let delta = self.pos - start;
        if delta != IVec2::ZERO && !self.passengers.is_empty() {
            let passengers = std::mem::take(&mut self.passengers);
            self.events
                .push(ActorEvent::CarryPassengers { passengers, delta });
        }
        self.passengers.clear();

        self.set_driver_position();
    }

    /// Step the frame timer and run the current frame's completion rule
    fn run_frame_clock(&mut self, level: &dyn LevelQuery) {
        let duration = self.frame().duration;
        if !self.state.advance(duration) {
            return;
        }

        match self.state.current().completion() {
            Some(Completion::IdleOrStand) => {
                if self.rng.one_in(IDLE_CHANCE) && self.kind.has(FrameKind::Idle) {
                    self.change_frame(FrameKind::Idle);
                } else {
                    self.change_frame(FrameKind::Stand);
                }
            }
            Some(Completion::Restart) => self.state.restart(),
            Some(Completion::StandIfStopped) => {
                self.state.restart();
                if self.velocity_x / 100 == 0 {
                    self.change_to_stand_frame(level);
                }
            }
            Some(Completion::Stand) => self.change_to_stand_frame(level),
            Some(Completion::Fall) => {
                self.change_frame(FrameKind::Fall);
            }
            Some(Completion::RestartThenStand) => {
                self.state.restart();
                self.change_to_stand_frame(level);
            }
            None => {}
        }
    }

    fn sweep_horizontal(&mut self, level: &dyn LevelQuery, started_standing: bool) {
        let mut moved = 0;
        while moved < (self.velocity_x / 100).abs() {
            moved += 1;
            let dir = if self.velocity_x > 0 { 1 } else { -1 };

            let body = self.body_rect();
            let xpos = if dir < 0 { body.x - 1 } else { body.x2() };
            let column = Rect::new(xpos, body.y, 1, body.h);

            let mut blocked = false;
            let mut hit = false;
            for ypos in body.y..body.y2() {
                if let Some(solid) = level.solid(xpos, ypos) {
                    if solid.is_harmful() && self.invincible == 0 {
                        hit = true;
                    } else {
                        blocked = true;
                    }
                    break;
                }
            }

            if !hit && !blocked {
                // An invincible player passes through harmful actors
                if let Some(contact) = level.collide(column, self.id) {
                    if contact.harmful && self.is_human() {
                        hit = self.invincible == 0;
                    } else {
                        blocked = true;
                    }
                }
            }

            if hit {
                self.velocity_x = -dir * KNOCKBACK_X;
                self.velocity_y = -KNOCKBACK_Y;
                self.get_hit();
                break;
            }

            if blocked {
                self.start_slide_if_fast(dir);
                self.velocity_x = 0;
                self.collided = true;
                break;
            }

            self.pos.x += dir;
            self.climb_out_of_ground(level);
            if started_standing {
                self.try_to_make_standing(level);
            }
        }
    }

    fn start_slide_if_fast(&mut self, dir: i32) {
        let current = self.state.current();
        if matches!(current, FrameKind::Jump | FrameKind::Fall)
            && self.kind.has(FrameKind::Slide)
            && self.velocity_y <= SLIDE_MAX_FALL_SPEED
            && (dir > 0) == self.face_right
            && self.velocity_x.abs() > SLIDE_MIN_SPEED
        {
            debug!("Actor {} slides down a wall", self.id);
            self.change_frame(FrameKind::Slide);
            self.velocity_y = 0;
        }
    }

    /// After a horizontal step, rise over ground that now overlaps the feet
    fn climb_out_of_ground(&mut self, level: &dyn LevelQuery) {
        let max_climb = self.frame().height.max(MAX_STEP);
        let mut adjust_y = 0;

        self.pos.y -= 1;
        for _ in 0..max_climb {
            match self.footing(level) {
                Some(footing) => {
                    adjust_y = footing.adjust_y;
                    self.pos.y -= 1;
                }
                None => break,
            }
        }
        self.pos.y += 1;
        self.pos.y += adjust_y;
    }

    fn sweep_down(&mut self, level: &dyn LevelQuery) -> Sweep {
        let mut moved = 0;
        while moved < self.velocity_y / 100 {
            moved += 1;

            if let Some(footing) = self.footing(level) {
                if footing.damage > 0 && self.invincible == 0 {
                    self.get_hit();
                }
                self.velocity_y = 0;
                break;
            }

            let fx = self.feet_x();
            let fy = self.feet_y();

            let under_feet = level
                .collide(Rect::point(fx - FEET_WIDTH, fy), self.id)
                .or_else(|| level.collide(Rect::point(fx + FEET_WIDTH, fy), self.id));
            if let Some(target) = under_feet {
                if target.springiness > 0 {
                    self.velocity_y = -target.springiness * SPRING_FACTOR;
                    if target.velocity_y < 0 {
                        self.velocity_y += target.velocity_y;
                    }
                }

                if self.state.is(FrameKind::GetHit) {
                    self.change_frame(FrameKind::Jump);
                }

                self.events.push(ActorEvent::SprungOn(target.id));
            }

            if !self.kind.is_vehicle() {
                if let Some(vehicle) = level.board(fx, fy, self.id) {
                    debug!("Actor {} boards vehicle {}", self.id, vehicle);
                    self.events.push(ActorEvent::Board(vehicle));
                    return Sweep::Boarded;
                }
            }

            self.pos.y += 1;
        }

        Sweep::Done
    }

    fn sweep_up(&mut self, level: &dyn LevelQuery) {
        let mut moved = 0;
        while moved < -self.velocity_y / 100 {
            moved += 1;

            let frame = self.frame();
            let ypos = self.pos.y + frame.collide_y() - 1;
            let left = self.collide_left();
            let right = self.collide_right();
            let head = Rect::new(left, ypos, right - left, 1);

            let mut blocked = false;
            let mut hit = false;
            for xpos in left..right {
                if let Some(solid) = level.solid(xpos, ypos) {
                    if solid.is_harmful() && self.invincible == 0 {
                        hit = true;
                    } else {
                        blocked = true;
                        break;
                    }
                }
            }

            if !hit && !blocked {
                if let Some(contact) = level.collide(head, self.id) {
                    if contact.harmful && self.is_human() {
                        hit = self.invincible == 0;
                    } else {
                        blocked = true;
                    }
                }
            }

            if hit {
                self.get_hit();
                break;
            }

            if !self.is_human() && self.invincible == 0 {
                if let Some(player) = level.player() {
                    if player.body.intersects(&head) {
                        self.set_face_right(level, !player.face_right);
                        self.get_hit();
                        break;
                    }
                }
            }

            if blocked {
                self.collided = true;
                self.velocity_y = 0;
                break;
            }

            self.pos.y -= 1;
        }
    }

    /// Nudge the body out of terrain or actors its lower corners ended up in
    fn push_out_of_terrain(&mut self, level: &dyn LevelQuery, started_standing: bool) {
        let frame = self.frame();
        let ypos = self.pos.y + frame.collide_y() + frame.collide_h();

        let occupied = |me: &Self, xpos: i32| {
            level.solid(xpos, ypos).is_some()
                || level.collide(Rect::point(xpos, ypos), me.id).is_some()
        };

        if occupied(self, self.collide_left()) {
            debug!("Actor {} pushed right", self.id);
            self.pos.x += 1;
            if started_standing {
                self.try_to_make_standing(level);
            }
        }

        if occupied(self, self.collide_right() - 1) {
            debug!("Actor {} pushed left", self.id);
            self.pos.x -= 1;
            if started_standing {
                self.try_to_make_standing(level);
            }
        }
    }

    /// Body contact hurts the player; the player's attack hurts everyone else
    fn resolve_contact_damage(&mut self, level: &dyn LevelQuery) {
        if self.invincible != 0 {
            return;
        }

        if self.is_human() {
            if let Some(contact) = level.collide(self.body_rect(), self.id) {
                if contact.harmful {
                    self.get_hit();
                }
            }
            return;
        }

        if let Some(player) = level.player() {
            if let Some(attack) = player.attack {
                if attack.intersects(&self.body_rect()) {
                    self.set_face_right(level, !player.face_right);
                    self.get_hit();
                }
            }
        }
    }

    fn apply_friction_and_landing(&mut self, level: &dyn LevelQuery) {
        let frame = self.frame();
        let accel_x = frame.accel_x * self.face_dir();
        let accel_y = frame.accel_y;
        self.velocity_x += accel_x;

        let footing = self.footing(level);
        let ground_friction = footing.map_or(0, |f| f.friction);
        let friction =
            (ground_friction + level.air_resistance()) * self.kind.stats().traction / 100;
        self.velocity_x = (self.velocity_x * (100 - friction)) / 100;

        let damage = footing.map_or(0, |f| f.damage);
        if damage > 0 && self.invincible == 0 {
            self.get_hit();
            return;
        }

        let current = self.state.current();
        match footing {
            Some(footing) if self.velocity_y >= 0 => {
                if let Some(support) = footing.support {
                    self.events.push(ActorEvent::StoodOn(support.id));
                }
                if current.ends_on_landing() {
                    self.change_to_stand_frame(level);
                }
            }
            _ => {
                let falls = current.is_stand_family()
                    || current.is_moving_on_ground()
                    || (self.velocity_y + accel_y > 0
                        && !current.resists_falling()
                        && (current != FrameKind::Slide || !self.can_continue_sliding(level)));
                if falls {
                    self.change_frame(FrameKind::Fall);
                }
            }
        }
    }

    /// The wall a slide started on is still within reach
    fn can_continue_sliding(&self, level: &dyn LevelQuery) -> bool {
        let body = self.body_rect();
        let xpos = if self.face_right {
            body.x2() + SLIDE_GRIP_REACH
        } else {
            body.x - SLIDE_GRIP_REACH
        };
        level.solid(xpos, body.y2()).is_some()
    }

    /// Snap back onto ground within `MAX_STEP` pixels, trying down first
    pub fn try_to_make_standing(&mut self, level: &dyn LevelQuery) {
        let start_y = self.pos.y;

        for down in 0..MAX_STEP {
            self.pos.y = start_y + down;
            if self.is_standing(level) {
                return;
            }
        }

        for up in 1..=MAX_STEP {
            self.pos.y = start_y - up;
            if self.is_standing(level) {
                return;
            }
        }

        self.pos.y = start_y;
    }

    /// Slope under the feet in degrees, positive when the ground rises in
    /// the facing direction.
    ///
    /// A `range` of 1 only distinguishes flat from 45 degree slopes; larger
    /// ranges compare ground heights `range` pixels ahead and behind.
    pub fn slope_standing_on(&self, level: &dyn LevelQuery, range: i32) -> i32 {
        if !self.is_standing(level) {
            return 0;
        }

        let forward = self.face_dir();
        let xpos = self.feet_x();
        let mut ypos = self.feet_y();

        for _ in 0..SLOPE_SEARCH_DEPTH {
            if level.solid(xpos, ypos).is_some() {
                break;
            }
            ypos += 1;
        }

        let solid = |x: i32, y: i32| level.solid(x, y).is_some();

        if range == 1 {
            if solid(xpos + forward, ypos - 1) && !solid(xpos - forward, ypos) {
                return 45;
            }
            if !solid(xpos + forward, ypos) && solid(xpos - forward, ypos - 1) {
                return -45;
            }
            return 0;
        }

        let probe = |r: i32| {
            (
                find_ground_level(level, xpos + forward * r, ypos, r + 1, self.id),
                find_ground_level(level, xpos - forward * r, ypos, r + 1, self.id),
            )
        };

        let mut range = range;
        let (mut ahead, mut behind) = probe(range);
        while ahead.is_none() || behind.is_none() {
            range -= 1;
            if range <= 0 {
                return 0;
            }
            (ahead, behind) = probe(range);
        }

        match (ahead, behind) {
            (Some(ahead), Some(behind)) => ((behind - ahead) * 45) / (range * 2),
            _ => 0,
        }
    }
}
