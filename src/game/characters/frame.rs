// Animation frames: one named clip with its collision geometry and the
// physical properties applied while it plays

use serde::{Deserialize, Serialize};

use crate::core::Rect;

/// Every behavioral state an archetype can provide a frame for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameKind {
    Stand,
    StandUpSlope,
    StandDownSlope,
    Idle,
    Turn,
    Walk,
    Run,
    Jump,
    Fall,
    Crouch,
    Lookup,
    GetHit,
    Attack,
    JumpAttack,
    UpAttack,
    RunAttack,
    Die,
    Fly,
    Slide,
    Spring,
}

impl Default for FrameKind {
    fn default() -> Self {
        Self::Stand
    }
}

impl FrameKind {
    pub const COUNT: usize = 20;

    pub const ALL: [FrameKind; Self::COUNT] = [
        Self::Stand,
        Self::StandUpSlope,
        Self::StandDownSlope,
        Self::Idle,
        Self::Turn,
        Self::Walk,
        Self::Run,
        Self::Jump,
        Self::Fall,
        Self::Crouch,
        Self::Lookup,
        Self::GetHit,
        Self::Attack,
        Self::JumpAttack,
        Self::UpAttack,
        Self::RunAttack,
        Self::Die,
        Self::Fly,
        Self::Slide,
        Self::Spring,
    ];

    /// Position in an archetype's frame table
    pub fn index(self) -> usize {
        self as usize
    }

    /// Name used in catalog files and logs
    pub fn name(self) -> &'static str {
        match self {
            Self::Stand => "stand",
            Self::StandUpSlope => "stand_up_slope",
            Self::StandDownSlope => "stand_down_slope",
            Self::Idle => "idle",
            Self::Turn => "turn",
            Self::Walk => "walk",
            Self::Run => "run",
            Self::Jump => "jump",
            Self::Fall => "fall",
            Self::Crouch => "crouch",
            Self::Lookup => "lookup",
            Self::GetHit => "get_hit",
            Self::Attack => "attack",
            Self::JumpAttack => "jump_attack",
            Self::UpAttack => "up_attack",
            Self::RunAttack => "run_attack",
            Self::Die => "die",
            Self::Fly => "fly",
            Self::Slide => "slide",
            Self::Spring => "spring",
        }
    }
}

/// Region on top of a frame that other actors can stand on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlatformBox {
    pub x: i32,
    pub y: i32,
    pub w: i32,
}

/// A single animation frame.
///
/// All offsets are relative to the actor's top-left corner when facing
/// right; facing left mirrors them horizontally inside `width`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Frame {
    /// Ticks before the frame's completion rule fires
    pub duration: i32,
    pub width: i32,
    pub height: i32,
    /// Foot anchor, kept fixed across frame changes
    pub feet_x: i32,
    pub feet_y: i32,
    /// Body box used for terrain and actor collisions
    pub collide: Rect,
    pub platform: Option<PlatformBox>,
    /// Attack hit box, active for the whole frame
    pub attack: Option<Rect>,
    /// Horizontal impulse set on entry (in facing direction, x100)
    pub velocity_x: i32,
    /// Vertical impulse set on entry (x100)
    pub velocity_y: i32,
    /// Horizontal acceleration per tick, in facing direction
    pub accel_x: i32,
    /// Vertical acceleration per tick (gravity)
    pub accel_y: i32,
    pub rotate_on_slope: bool,
    /// Trail fade in percent per tick, 0 for none
    pub blur: i32,
    pub sound: Option<String>,
}

impl Default for Frame {
    fn default() -> Self {
        Self {
            duration: 1,
            width: 0,
            height: 0,
            feet_x: 0,
            feet_y: 0,
            collide: Rect::default(),
            platform: None,
            attack: None,
            velocity_x: 0,
            velocity_y: 0,
            accel_x: 0,
            accel_y: 0,
            rotate_on_slope: false,
            blur: 0,
            sound: None,
        }
    }
}

impl Frame {
    /// Frame of the given size whose body fills it and whose feet sit just
    /// below its bottom edge
    pub fn sized(width: i32, height: i32, duration: i32) -> Self {
        Self {
            duration,
            width,
            height,
            feet_x: width / 2,
            feet_y: height,
            collide: Rect::new(0, 0, width, height),
            ..Self::default()
        }
    }

    pub fn with_collide(mut self, collide: Rect) -> Self {
        self.collide = collide;
        self
    }

    pub fn with_feet(mut self, feet_x: i32, feet_y: i32) -> Self {
        self.feet_x = feet_x;
        self.feet_y = feet_y;
        self
    }

    pub fn with_accel(mut self, accel_x: i32, accel_y: i32) -> Self {
        self.accel_x = accel_x;
        self.accel_y = accel_y;
        self
    }

    pub fn with_impulse(mut self, velocity_x: i32, velocity_y: i32) -> Self {
        self.velocity_x = velocity_x;
        self.velocity_y = velocity_y;
        self
    }

    pub fn with_platform(mut self, platform: PlatformBox) -> Self {
        self.platform = Some(platform);
        self
    }

    pub fn with_attack(mut self, attack: Rect) -> Self {
        self.attack = Some(attack);
        self
    }

    pub fn with_sound(mut self, sound: &str) -> Self {
        self.sound = Some(sound.to_string());
        self
    }

    pub fn has_platform(&self) -> bool {
        self.platform.is_some()
    }

    pub fn collide_x(&self) -> i32 {
        self.collide.x
    }

    pub fn collide_y(&self) -> i32 {
        self.collide.y
    }

    pub fn collide_w(&self) -> i32 {
        self.collide.w
    }

    pub fn collide_h(&self) -> i32 {
        self.collide.h
    }
}
