// Character entity: position, velocity, stats and the intent surface that
// both control strategies drive

use std::collections::HashMap;
use std::sync::Arc;

use glam::IVec2;
use log::{debug, trace};

use crate::core::math::facing_sign;
use crate::core::{Rect, SeededRandom};
use crate::engine::physics::{ActorId, Contact, Footing, LevelQuery, PlayerInfo, Support};
use crate::game::control::{ControlStrategy, InteractiveControl, ScriptedControl};

use super::events::ActorEvent;
use super::frame::{Frame, FrameKind};
use super::script::Value;
use super::state::FrameState;
use super::types::CharacterType;

/// Horizontal distance of each foot probe from the feet anchor
pub const FEET_WIDTH: i32 = 5;

/// Ticks of invincibility after being hit
const NPC_INVINCIBILITY: i32 = 10;
const PLAYER_INVINCIBILITY: i32 = 100;

/// Wall-jump push off a slide, in multiples of glide speed
const WALL_JUMP_PUSH: i32 = 15;

/// Search depth of `move_to_standing`
const MAX_SETTLE_DISTANCE: i32 = 1000;

/// A live actor in a level
#[derive(Debug, Clone)]
pub struct Character {
    pub(crate) id: ActorId,
    pub(crate) kind: Arc<CharacterType>,

    // Motion
    pub(crate) pos: IVec2,
    pub(crate) previous_y: i32,
    /// Velocities are x100: one pixel per tick is 100
    pub(crate) velocity_x: i32,
    pub(crate) velocity_y: i32,
    pub(crate) face_right: bool,

    // Stats (start from the type, may be overridden per instance)
    pub(crate) hitpoints: i32,
    pub(crate) max_hitpoints: i32,
    pub(crate) walk_speed: i32,
    pub(crate) jump_power: i32,
    pub(crate) boost_power: i32,
    pub(crate) glide_speed: i32,
    pub(crate) invincible: i32,

    // Animation state
    pub(crate) state: FrameState,
    pub(crate) cycle: u32,
    pub(crate) collided: bool,
    pub(crate) jump_latched: bool,

    // Control
    pub(crate) scripted: ScriptedControl,
    pub(crate) interactive: Option<InteractiveControl>,
    pub(crate) walk_result: i32,
    pub(crate) jump_result: i32,
    pub(crate) fly_result: i32,

    // Composition
    pub(crate) driver: Option<Box<Character>>,
    /// Actors that stood on this one's platform during the last tick
    pub(crate) passengers: Vec<ActorId>,

    pub(crate) vars: HashMap<String, Value>,
    pub(crate) group: Option<i32>,
    pub(crate) rng: SeededRandom,
    pub(crate) events: Vec<ActorEvent>,
}

impl Character {
    /// Create an actor of the given type standing in its stand frame.
    /// Formulas attached later are evaluated every tick.
    pub fn new(kind: Arc<CharacterType>, x: i32, y: i32, face_right: bool) -> Self {
        let stats = kind.stats().clone();
        Self {
            id: 0,
            kind,
            pos: IVec2::new(x, y),
            previous_y: y,
            velocity_x: 0,
            velocity_y: 0,
            face_right,
            hitpoints: stats.hitpoints,
            max_hitpoints: stats.hitpoints,
            walk_speed: stats.walk,
            jump_power: stats.jump,
            boost_power: stats.boost,
            glide_speed: stats.glide,
            invincible: 0,
            state: FrameState::new(),
            cycle: 0,
            collided: false,
            jump_latched: false,
            scripted: ScriptedControl::default(),
            interactive: None,
            walk_result: 0,
            jump_result: 0,
            fly_result: 0,
            driver: None,
            passengers: Vec::new(),
            vars: HashMap::new(),
            group: None,
            rng: SeededRandom::default(),
            events: Vec::new(),
        }
    }

    /// Hand control to formulas
    pub fn with_scripted_control(mut self, control: ScriptedControl) -> Self {
        self.scripted = control;
        self
    }

    /// Make this the human-controlled actor
    pub fn with_interactive_control(mut self) -> Self {
        self.interactive = Some(InteractiveControl::default());
        self
    }

    pub fn with_velocity(mut self, velocity_x: i32, velocity_y: i32) -> Self {
        self.set_velocity(velocity_x, velocity_y);
        self
    }

    pub fn with_group(mut self, group: Option<i32>) -> Self {
        self.group = group;
        self
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn id(&self) -> ActorId {
        self.id
    }

    pub fn character_type(&self) -> &Arc<CharacterType> {
        &self.kind
    }

    pub fn x(&self) -> i32 {
        self.pos.x
    }

    pub fn y(&self) -> i32 {
        self.pos.y
    }

    pub fn position(&self) -> IVec2 {
        self.pos
    }

    pub fn set_pos(&mut self, x: i32, y: i32) {
        self.pos = IVec2::new(x, y);
    }

    pub fn translate(&mut self, delta: IVec2) {
        self.pos += delta;
    }

    pub fn velocity_x(&self) -> i32 {
        self.velocity_x
    }

    pub fn velocity_y(&self) -> i32 {
        self.velocity_y
    }

    pub fn set_velocity(&mut self, velocity_x: i32, velocity_y: i32) {
        self.velocity_x = velocity_x;
        self.velocity_y = velocity_y;
    }

    pub fn face_right(&self) -> bool {
        self.face_right
    }

    pub fn face_dir(&self) -> i32 {
        facing_sign(self.face_right)
    }

    pub fn hitpoints(&self) -> i32 {
        self.hitpoints
    }

    pub fn max_hitpoints(&self) -> i32 {
        self.max_hitpoints
    }

    pub fn walk_speed(&self) -> i32 {
        self.walk_speed
    }

    pub fn jump_power(&self) -> i32 {
        self.jump_power
    }

    pub fn boost_power(&self) -> i32 {
        self.boost_power
    }

    pub fn glide_speed(&self) -> i32 {
        self.glide_speed
    }

    pub fn invincible(&self) -> i32 {
        self.invincible
    }

    pub fn set_invincible(&mut self, ticks: i32) {
        self.invincible = ticks;
    }

    pub fn frame_kind(&self) -> FrameKind {
        self.state.current()
    }

    pub fn time_in_frame(&self) -> i32 {
        self.state.time_in_frame()
    }

    pub fn frame_id(&self) -> u64 {
        self.state.frame_id()
    }

    /// Ticks processed since creation
    pub fn cycle(&self) -> u32 {
        self.cycle
    }

    pub fn collided(&self) -> bool {
        self.collided
    }

    pub fn group(&self) -> Option<i32> {
        self.group
    }

    pub fn is_human(&self) -> bool {
        self.interactive.is_some()
    }

    pub fn interactive_control_mut(&mut self) -> Option<&mut InteractiveControl> {
        self.interactive.as_mut()
    }

    pub fn scripted_control(&self) -> &ScriptedControl {
        &self.scripted
    }

    /// Latch set by the interactive strategy while jump is held
    pub fn set_jump_latched(&mut self, latched: bool) {
        self.jump_latched = latched;
    }

    /// Drain the side effects produced since the last call
    pub fn take_events(&mut self) -> Vec<ActorEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[ActorEvent] {
        &self.events
    }

    // ------------------------------------------------------------------
    // Geometry
    // ------------------------------------------------------------------

    /// The frame currently playing
    pub fn frame(&self) -> &Frame {
        self.kind
            .frame(self.state.current())
            .unwrap_or_else(|| self.kind.stand())
    }

    pub fn feet_x(&self) -> i32 {
        let frame = self.frame();
        if self.face_right {
            self.pos.x + frame.feet_x
        } else {
            self.pos.x + frame.width - frame.feet_x
        }
    }

    pub fn feet_y(&self) -> i32 {
        self.pos.y + self.frame().feet_y
    }

    pub fn collide_left(&self) -> i32 {
        let frame = self.frame();
        if self.face_right {
            self.pos.x + frame.collide_x()
        } else {
            self.pos.x + frame.width - frame.collide_x() - frame.collide_w()
        }
    }

    pub fn collide_right(&self) -> i32 {
        let frame = self.frame();
        if self.face_right {
            self.pos.x + frame.collide_x() + frame.collide_w()
        } else {
            self.pos.x + frame.width - frame.collide_x()
        }
    }

    /// Absolute collision box
    pub fn body_rect(&self) -> Rect {
        let frame = self.frame();
        Rect::new(
            self.collide_left(),
            self.pos.y + frame.collide_y(),
            frame.collide_w(),
            frame.collide_h(),
        )
    }

    /// Absolute hit box of the current frame's attack, if any
    pub fn attack_rect(&self) -> Option<Rect> {
        let frame = self.frame();
        frame.attack.map(|a| {
            let x = if self.face_right {
                self.pos.x + a.x
            } else {
                self.pos.x + frame.width - a.x - a.w
            };
            Rect::new(x, self.pos.y + a.y, a.w, a.h)
        })
    }

    pub fn point_collides(&self, x: i32, y: i32) -> bool {
        self.body_rect().contains(x, y)
    }

    // ------------------------------------------------------------------
    // Support
    // ------------------------------------------------------------------

    /// What the feet rest on, if anything
    pub fn footing(&self, level: &dyn LevelQuery) -> Option<Footing> {
        let fx = self.feet_x();
        let fy = self.feet_y();
        level
            .standable(fx - FEET_WIDTH, fy, self.id)
            .or_else(|| level.standable(fx + FEET_WIDTH, fy, self.id))
    }

    pub fn is_standing(&self, level: &dyn LevelQuery) -> bool {
        self.footing(level).is_some()
    }

    /// Whether another actor's foot at `(x, y)` rests on this actor's
    /// platform. The platform is swept between last tick's height and this
    /// one's so fast movers don't drop their passengers.
    pub fn is_standable(&self, x: i32, y: i32) -> Option<Footing> {
        let platform = self.frame().platform?;

        let mut y1 = self.pos.y + platform.y;
        let mut y2 = self.previous_y + platform.y;
        if y1 > y2 {
            std::mem::swap(&mut y1, &mut y2);
        }

        if y < y1 || y > y2 {
            return None;
        }

        let left = self.pos.x + platform.x;
        if x < left || x >= left + platform.w {
            return None;
        }

        Some(Footing {
            friction: self.kind.stats().friction,
            damage: 0,
            adjust_y: self.pos.y + platform.y - y,
            support: Some(Support {
                id: self.id,
                velocity_x: self.velocity_x,
                velocity_y: self.velocity_y,
            }),
        })
    }

    /// Record an actor standing on this one's platform
    pub fn stood_on_by(&mut self, passenger: ActorId) {
        if !self.passengers.contains(&passenger) {
            self.passengers.push(passenger);
        }
    }

    /// Drop onto the ground below (or climb out of it) after being placed
    pub fn move_to_standing(&mut self, level: &dyn LevelQuery) {
        let start_y = self.pos.y;
        for n in 0..MAX_SETTLE_DISTANCE {
            if self.is_standing(level) {
                if n == 0 {
                    for _ in 0..MAX_SETTLE_DISTANCE {
                        self.pos.y -= 1;
                        if !self.is_standing(level) {
                            self.pos.y += 1;
                            return;
                        }
                    }
                }
                return;
            }
            self.pos.y += 1;
        }
        self.pos.y = start_y;
    }

    // ------------------------------------------------------------------
    // Body properties seen by other actors
    // ------------------------------------------------------------------

    /// Undriven vehicles can be walked through
    pub fn body_passthrough(&self) -> bool {
        self.kind.is_vehicle() && self.driver.is_none()
    }

    /// Touching this actor hurts the human player
    pub fn body_harmful(&self) -> bool {
        !self.kind.is_vehicle() || self.driver.is_some()
    }

    pub fn boardable_vehicle(&self) -> bool {
        self.kind.is_vehicle() && self.driver.is_none()
    }

    pub fn springiness(&self) -> i32 {
        self.kind.stats().springiness
    }

    pub fn contact(&self) -> Contact {
        Contact {
            id: self.id,
            harmful: self.body_harmful(),
            springiness: self.springiness(),
            velocity_y: self.velocity_y,
        }
    }

    pub fn player_info(&self) -> PlayerInfo {
        PlayerInfo {
            id: self.id,
            face_right: self.face_right,
            body: self.body_rect(),
            attack: self.attack_rect(),
        }
    }

    /// Someone bounced off this actor's head
    pub fn spring_off_head(&mut self) {
        debug!("Actor {} sprung on", self.id);
        self.change_frame(FrameKind::Spring);
    }

    // ------------------------------------------------------------------
    // Frames
    // ------------------------------------------------------------------

    /// Switch to another frame, keeping the feet where they are.
    ///
    /// Returns false (and changes nothing) when the type has no such frame
    /// or the actor is dying.
    pub fn change_frame(&mut self, kind: FrameKind) -> bool {
        if self.state.is(FrameKind::Die) {
            return false;
        }

        let archetype = Arc::clone(&self.kind);
        let Some(frame) = archetype.frame(kind) else {
            return false;
        };

        let start_x = self.feet_x();
        let start_y = self.feet_y();

        self.state.enter(kind);

        let diff_x = self.feet_x() - start_x;
        let diff_y = self.feet_y() - start_y;
        self.pos -= IVec2::new(diff_x, diff_y);

        if frame.velocity_x != 0 {
            self.velocity_x = frame.velocity_x * self.face_dir();
        }
        if frame.velocity_y != 0 {
            self.velocity_y = frame.velocity_y;
        }

        if let Some(sound) = &frame.sound {
            self.events.push(ActorEvent::PlaySound(sound.clone()));
        }

        trace!("Actor {} -> {}", self.id, kind.name());
        true
    }

    /// Land in the stand frame matching the ground's slope
    pub fn change_to_stand_frame(&mut self, level: &dyn LevelQuery) {
        if self.kind.has(FrameKind::StandUpSlope) && self.kind.has(FrameKind::StandDownSlope) {
            let slope = self.slope_standing_on(level, 1);
            if slope < 0 {
                self.change_frame(FrameKind::StandDownSlope);
                return;
            }
            if slope > 0 {
                self.change_frame(FrameKind::StandUpSlope);
                return;
            }
        }

        self.change_frame(FrameKind::Stand);
    }

    /// Turn around. Standing or flying actors play their turn frame, and the
    /// feet stay on the same pixel column.
    pub fn set_face_right(&mut self, level: &dyn LevelQuery, facing: bool) {
        if facing == self.face_right {
            return;
        }

        if self.is_standing(level) || self.state.is(FrameKind::Fly) {
            self.change_frame(FrameKind::Turn);
        }

        let original = self.feet_x();
        self.face_right = facing;
        let diff = self.feet_x() - original;
        self.pos.x -= diff;
    }

    // ------------------------------------------------------------------
    // Combat
    // ------------------------------------------------------------------

    /// Take one point of damage.
    ///
    /// # Panics
    /// Callers must check invincibility first; hitting an invincible actor
    /// is a logic error.
    pub fn get_hit(&mut self) {
        assert!(
            self.invincible == 0,
            "actor {} hit while invincible for {} ticks",
            self.id,
            self.invincible
        );

        self.hitpoints -= 1;
        self.invincible = if self.is_human() {
            PLAYER_INVINCIBILITY
        } else {
            NPC_INVINCIBILITY
        };
        self.events.push(ActorEvent::Hurt {
            hitpoints: self.hitpoints,
        });
        debug!("Actor {} hit, {} hitpoints left", self.id, self.hitpoints);

        if self.hitpoints <= 0 && self.kind.has(FrameKind::Die) {
            self.change_frame(FrameKind::Die);
        } else {
            self.change_frame(FrameKind::GetHit);
        }
    }

    /// Out of hitpoints and done playing the death animation
    pub fn is_destroyed(&self) -> bool {
        self.hitpoints <= 0
            && (!self.state.is(FrameKind::Die) || self.state.finished(self.frame().duration))
    }

    // ------------------------------------------------------------------
    // Intents
    // ------------------------------------------------------------------

    /// Run whichever control strategy owns this actor
    pub fn control(&mut self, level: &dyn LevelQuery) {
        if self.state.is(FrameKind::Die) {
            return;
        }

        if self.kind.is_vehicle() && self.driver.is_none() {
            return;
        }

        if let Some(mut interactive) = self.interactive.take() {
            interactive.drive(self, level);
            self.interactive = Some(interactive);
        } else {
            let mut scripted = std::mem::take(&mut self.scripted);
            scripted.drive(self, level);
            self.scripted = scripted;
        }
    }

    pub fn walk(&mut self, level: &dyn LevelQuery, move_right: bool) {
        if self.state.current().blocks_walking() {
            return;
        }

        let standing = self.is_standing(level);
        self.set_face_right(level, move_right);

        let run_bonus = if self.state.is(FrameKind::Run) { 2 } else { 1 };
        let push = if standing {
            self.walk_speed * run_bonus
        } else {
            self.glide_speed
        };
        self.velocity_x += push * facing_sign(move_right);

        let current = self.state.current();
        if standing
            && !matches!(
                current,
                FrameKind::Walk | FrameKind::Jump | FrameKind::Turn | FrameKind::Run
            )
        {
            self.change_frame(FrameKind::Walk);
        }
    }

    pub fn run(&mut self, _level: &dyn LevelQuery, _move_right: bool) {
        if self.state.is(FrameKind::Walk) {
            self.change_frame(FrameKind::Run);
        }
    }

    pub fn fly(&mut self, level: &dyn LevelQuery, move_right: bool, lift: i32) {
        self.set_face_right(level, move_right);
        self.velocity_x += self.glide_speed * facing_sign(move_right);
        self.velocity_y += lift;

        if !matches!(
            self.state.current(),
            FrameKind::Fly | FrameKind::Turn | FrameKind::Spring
        ) {
            self.change_frame(FrameKind::Fly);
        }
    }

    /// Jump off the ground, wall-jump off a slide, or boost an ongoing jump
    pub fn jump(&mut self, level: &dyn LevelQuery) {
        if !self.jump_latched && self.state.is(FrameKind::Slide) {
            let facing = !self.face_right;
            self.set_face_right(level, facing);
            self.velocity_x += self.glide_speed * WALL_JUMP_PUSH * self.face_dir();
            self.velocity_y = (-self.jump_power * 3) / 4;
            self.change_frame(FrameKind::Jump);
            return;
        }

        if !self.jump_latched {
            if let Some(footing) = self.footing(level) {
                // Only the platform's horizontal motion carries over
                if let Some(platform) = footing.support {
                    self.velocity_x += platform.velocity_x;
                }
                self.velocity_y = -self.jump_power;
                self.change_frame(FrameKind::Jump);
                return;
            }
        }

        if self.velocity_y < 0 {
            self.velocity_y -= self.boost_power;
        }
    }

    /// Drop through a one-way platform, or step out of a vehicle
    pub fn jump_down(&mut self, level: &dyn LevelQuery) {
        if self.driver.is_some() {
            self.events.push(ActorEvent::Unboard);
        }

        if self.is_standing(level) {
            self.pos.y += 1;
            if self.is_standing(level) {
                self.pos.y -= 1;
            }
        }
    }

    pub fn crouch(&mut self, level: &dyn LevelQuery) {
        if self.is_standing(level) && !self.state.is(FrameKind::Crouch) {
            self.change_frame(FrameKind::Crouch);
        }
    }

    pub fn uncrouch(&mut self, _level: &dyn LevelQuery) {
        let duration = self.frame().duration;
        self.state.release_hold(duration);
    }

    pub fn lookup(&mut self, level: &dyn LevelQuery) {
        if self.is_standing(level) && !self.state.is(FrameKind::Lookup) {
            self.change_frame(FrameKind::Lookup);
        }
    }

    pub fn unlookup(&mut self, _level: &dyn LevelQuery) {
        let duration = self.frame().duration;
        self.state.release_hold(duration);
    }

    pub fn attack(&mut self, level: &dyn LevelQuery, looking_up: bool) {
        if self.is_standing(level) {
            if self.kind.has(FrameKind::RunAttack) && self.state.is(FrameKind::Run) {
                self.change_frame(FrameKind::RunAttack);
            } else if self.kind.has(FrameKind::UpAttack) && looking_up {
                self.change_frame(FrameKind::UpAttack);
            } else {
                self.change_frame(FrameKind::Attack);
            }
        } else if self.state.is(FrameKind::Jump) || self.state.is(FrameKind::Fall) {
            self.change_frame(FrameKind::JumpAttack);
        }
    }
}
