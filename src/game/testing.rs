// Shared fixtures for unit tests: archetypes and a height-field level

use std::sync::Arc;

use crate::core::Rect;
use crate::engine::physics::{
    ActorId, Contact, Footing, LevelQuery, PlayerInfo, Solid, Support,
};
use crate::game::characters::{
    Character, CharacterStats, CharacterType, Frame, FrameKind, PlatformBox,
};
use crate::game::level::{Level, TileMap};

/// Ground surface of `HeightField::flat` and `flat_level` fixtures
pub const GROUND_Y: i32 = 128;

/// Id `HeightField` reports for its harmful actor
pub const ENEMY_ID: ActorId = 77;

const GRAVITY: i32 = 80;

fn body(duration: i32) -> Frame {
    Frame::sized(32, 32, duration)
        .with_collide(Rect::new(8, 0, 16, 28))
        .with_feet(16, 32)
        .with_accel(0, GRAVITY)
}

fn hero_stats() -> CharacterStats {
    CharacterStats {
        walk: 200,
        jump: 1000,
        glide: 50,
        hitpoints: 3,
        ..CharacterStats::default()
    }
}

fn hero_frames() -> Vec<(FrameKind, Frame)> {
    let swing = Rect::new(24, 8, 16, 8);
    let mut walk = body(8);
    walk.rotate_on_slope = true;

    vec![
        (FrameKind::Stand, body(10)),
        (FrameKind::StandUpSlope, body(10)),
        (FrameKind::StandDownSlope, body(10)),
        (FrameKind::Idle, body(10)),
        (FrameKind::Turn, body(4)),
        (FrameKind::Walk, walk),
        (FrameKind::Run, body(8)),
        (FrameKind::Jump, body(10)),
        (FrameKind::Fall, body(10)),
        (
            FrameKind::Crouch,
            Frame::sized(32, 20, 10)
                .with_collide(Rect::new(8, 0, 16, 16))
                .with_feet(16, 20)
                .with_accel(0, GRAVITY),
        ),
        (FrameKind::Lookup, body(10)),
        (FrameKind::GetHit, body(10).with_impulse(0, -300)),
        (FrameKind::Attack, body(6).with_attack(swing)),
        (FrameKind::UpAttack, body(6).with_attack(Rect::new(8, -16, 16, 16))),
        (FrameKind::RunAttack, body(6).with_attack(swing)),
        (FrameKind::JumpAttack, body(6).with_attack(swing)),
        (FrameKind::Die, body(6)),
        (FrameKind::Fly, body(10)),
        (FrameKind::Slide, body(10)),
        (
            FrameKind::Spring,
            body(10).with_impulse(100, -900).with_sound("boing"),
        ),
    ]
}

/// Fully animated walker used by most tests
pub fn hero_type_def() -> CharacterType {
    CharacterType::new("hero", hero_stats(), hero_frames()).unwrap()
}

pub fn hero_type() -> Arc<CharacterType> {
    Arc::new(hero_type_def())
}

/// The hero with a head others bounce off
pub fn springy_type() -> Arc<CharacterType> {
    let stats = CharacterStats {
        springiness: 50,
        ..hero_stats()
    };
    Arc::new(CharacterType::new("bouncer", stats, hero_frames()).unwrap())
}

/// One-frame, one-hitpoint actor
pub fn blob_type() -> Arc<CharacterType> {
    let stand = Frame::sized(16, 16, 10).with_accel(0, GRAVITY);
    Arc::new(CharacterType::new("blob", CharacterStats::default(), [(FrameKind::Stand, stand)]).unwrap())
}

/// Weightless 64 pixel wide moving platform
pub fn platform_type() -> Arc<CharacterType> {
    let stats = CharacterStats {
        friction: 20,
        ..CharacterStats::default()
    };
    let stand = Frame::sized(64, 16, 10).with_platform(PlatformBox { x: 0, y: 0, w: 64 });
    Arc::new(CharacterType::new("platform", stats, [(FrameKind::Stand, stand)]).unwrap())
}

/// Vehicle seating its driver 4 pixels in and 20 up
pub fn cart_type() -> Arc<CharacterType> {
    let stats = CharacterStats {
        vehicle: true,
        passenger_x: 4,
        passenger_y: -20,
        ..CharacterStats::default()
    };
    let frame = |duration| Frame::sized(48, 24, duration).with_accel(0, GRAVITY);
    Arc::new(
        CharacterType::new(
            "cart",
            stats,
            [(FrameKind::Stand, frame(10)), (FrameKind::Turn, frame(4))],
        )
        .unwrap(),
    )
}

/// 20x10 tiles of 16 pixels with solid ground from `GROUND_Y` down
pub fn flat_level() -> Level {
    let mut rows = vec!["...................."; 8];
    rows.extend(["####################"; 2]);
    Level::new(TileMap::from_ascii(16, &rows).unwrap())
}

/// Spawn an actor and drop it onto the ground below
pub fn spawn_standing(level: &mut Level, character: Character) -> ActorId {
    let id = level.spawn(character);
    level.settle(id);
    id
}

/// Terrain described by a surface height per column; everything at or
/// below the surface is solid. No other actors.
pub struct HeightField {
    surface: Box<dyn Fn(i32) -> Option<i32>>,
    /// Damaging solid block
    pub hazard: Option<Rect>,
    /// Everything at or above this row is solid
    pub ceiling: Option<i32>,
    /// Body of a harmful actor
    pub enemy: Option<Rect>,
    /// Moving platform reported under every foothold
    pub support: Option<Support>,
    pub bounds: Rect,
    pub player: Option<PlayerInfo>,
    pub friction: i32,
    pub air_resistance: i32,
}

impl HeightField {
    pub fn new(surface: impl Fn(i32) -> Option<i32> + 'static) -> Self {
        Self {
            surface: Box::new(surface),
            hazard: None,
            ceiling: None,
            enemy: None,
            support: None,
            bounds: Rect::new(-10_000, -10_000, 20_000, 20_000),
            player: None,
            friction: 20,
            air_resistance: 0,
        }
    }

    pub fn flat(ground_y: i32) -> Self {
        Self::new(move |_| Some(ground_y))
    }
}

impl LevelQuery for HeightField {
    fn solid(&self, x: i32, y: i32) -> Option<Solid> {
        if self.hazard.is_some_and(|hazard| hazard.contains(x, y)) {
            return Some(Solid { damage: 1 });
        }
        if self.ceiling.is_some_and(|ceiling| y <= ceiling) {
            return Some(Solid { damage: 0 });
        }
        match (self.surface)(x) {
            Some(top) if y >= top => Some(Solid { damage: 0 }),
            _ => None,
        }
    }

    fn standable(&self, x: i32, y: i32, _requester: ActorId) -> Option<Footing> {
        self.solid(x, y).map(|solid| Footing {
            friction: self.friction,
            damage: solid.damage,
            adjust_y: 0,
            support: self.support,
        })
    }

    fn collide(&self, area: Rect, _requester: ActorId) -> Option<Contact> {
        self.enemy
            .filter(|enemy| enemy.intersects(&area))
            .map(|_| Contact {
                id: ENEMY_ID,
                harmful: true,
                springiness: 0,
                velocity_y: 0,
            })
    }

    fn board(&self, _x: i32, _y: i32, _requester: ActorId) -> Option<ActorId> {
        None
    }

    fn boundaries(&self) -> Rect {
        self.bounds
    }

    fn air_resistance(&self) -> i32 {
        self.air_resistance
    }

    fn player(&self) -> Option<PlayerInfo> {
        self.player
    }
}
