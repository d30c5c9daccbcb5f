// Named actor properties readable (and partly writable) by formulas

use std::fmt;
use std::str::FromStr;

use crate::engine::physics::{cliff_edge_within, ActorId, LevelQuery};

use super::character::Character;
use super::ScriptError;

/// How far ahead `near_cliff_edge` looks, in pixels
const CLIFF_LOOKAHEAD: i32 = 15;

/// Built-in actor properties
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActorField {
    X,
    Y,
    X2,
    Y2,
    Facing,
    Cycle,
    Player,
    Collided,
    NearCliffEdge,
    LastWalk,
    LastJump,
    Hitpoints,
    MaxHitpoints,
    WalkSpeed,
    JumpPower,
    BoostPower,
    GlideSpeed,
    Group,
}

impl ActorField {
    pub const ALL: [ActorField; 18] = [
        Self::X,
        Self::Y,
        Self::X2,
        Self::Y2,
        Self::Facing,
        Self::Cycle,
        Self::Player,
        Self::Collided,
        Self::NearCliffEdge,
        Self::LastWalk,
        Self::LastJump,
        Self::Hitpoints,
        Self::MaxHitpoints,
        Self::WalkSpeed,
        Self::JumpPower,
        Self::BoostPower,
        Self::GlideSpeed,
        Self::Group,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::X => "x",
            Self::Y => "y",
            Self::X2 => "x2",
            Self::Y2 => "y2",
            Self::Facing => "facing",
            Self::Cycle => "cycle",
            Self::Player => "player",
            Self::Collided => "collided",
            Self::NearCliffEdge => "near_cliff_edge",
            Self::LastWalk => "last_walk",
            Self::LastJump => "last_jump",
            Self::Hitpoints => "hitpoints",
            Self::MaxHitpoints => "max_hitpoints",
            Self::WalkSpeed => "walk_speed",
            Self::JumpPower => "jump_power",
            Self::BoostPower => "boost_power",
            Self::GlideSpeed => "glide_speed",
            Self::Group => "group",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.name() == name)
    }

    /// Only stats can be assigned; positions and derived flags are read-only
    pub fn is_writable(self) -> bool {
        matches!(
            self,
            Self::Hitpoints
                | Self::MaxHitpoints
                | Self::WalkSpeed
                | Self::JumpPower
                | Self::BoostPower
                | Self::GlideSpeed
        )
    }
}

impl fmt::Display for ActorField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A property name: built-in field or a per-actor custom variable
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ScriptKey {
    Field(ActorField),
    Custom(String),
}

impl FromStr for ScriptKey {
    type Err = std::convert::Infallible;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Ok(ActorField::from_name(name)
            .map(ScriptKey::Field)
            .unwrap_or_else(|| ScriptKey::Custom(name.to_string())))
    }
}

impl From<ActorField> for ScriptKey {
    fn from(field: ActorField) -> Self {
        Self::Field(field)
    }
}

/// A property value as seen by formulas
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Value {
    #[default]
    Null,
    Int(i32),
    Bool(bool),
    Actor(ActorId),
    Text(String),
}

impl Value {
    /// Integer view: booleans count as 0/1, everything else as 0
    pub fn as_int(&self) -> i32 {
        match self {
            Value::Int(n) => *n,
            Value::Bool(b) => i32::from(*b),
            _ => 0,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

/// Read-only view of an actor and its surroundings handed to formulas
pub struct ActorContext<'a> {
    actor: &'a Character,
    level: &'a dyn LevelQuery,
}

impl<'a> ActorContext<'a> {
    pub fn new(actor: &'a Character, level: &'a dyn LevelQuery) -> Self {
        Self { actor, level }
    }

    pub fn actor(&self) -> &Character {
        self.actor
    }

    pub fn get(&self, key: &ScriptKey) -> Value {
        self.actor.value(key, self.level)
    }

    pub fn get_named(&self, name: &str) -> Value {
        match name.parse::<ScriptKey>() {
            Ok(key) => self.get(&key),
            Err(never) => match never {},
        }
    }
}

impl Character {
    /// Read a property. Unknown custom variables read as `Null`.
    pub fn value(&self, key: &ScriptKey, level: &dyn LevelQuery) -> Value {
        let field = match key {
            ScriptKey::Field(field) => *field,
            ScriptKey::Custom(name) => return self.vars.get(name).cloned().unwrap_or_default(),
        };

        match field {
            ActorField::X => Value::Int(self.body_rect().x),
            ActorField::Y => Value::Int(self.pos.y),
            ActorField::X2 => Value::Int(self.body_rect().x2()),
            ActorField::Y2 => Value::Int(self.body_rect().y2()),
            ActorField::Facing => Value::Int(self.face_dir()),
            ActorField::Cycle => Value::Int(self.cycle as i32),
            ActorField::Player => level
                .player()
                .map(|player| Value::Actor(player.id))
                .unwrap_or(Value::Null),
            ActorField::Collided => Value::Bool(self.collided),
            ActorField::NearCliffEdge => Value::Bool(
                self.is_standing(level)
                    && cliff_edge_within(
                        level,
                        self.feet_x(),
                        self.feet_y(),
                        self.face_dir() * CLIFF_LOOKAHEAD,
                        self.id,
                    ),
            ),
            ActorField::LastWalk => Value::Int(self.walk_result),
            ActorField::LastJump => Value::Int(self.jump_result),
            ActorField::Hitpoints => Value::Int(self.hitpoints),
            ActorField::MaxHitpoints => Value::Int(self.max_hitpoints),
            ActorField::WalkSpeed => Value::Int(self.walk_speed),
            ActorField::JumpPower => Value::Int(self.jump_power),
            ActorField::BoostPower => Value::Int(self.boost_power),
            ActorField::GlideSpeed => Value::Int(self.glide_speed),
            ActorField::Group => self.group.map(Value::Int).unwrap_or(Value::Null),
        }
    }

    /// Write a property. Custom variables accept any value; built-in
    /// fields must be writable and take integers.
    pub fn set_value(&mut self, key: &ScriptKey, value: Value) -> Result<(), ScriptError> {
        let field = match key {
            ScriptKey::Field(field) => *field,
            ScriptKey::Custom(name) => {
                self.vars.insert(name.clone(), value);
                return Ok(());
            }
        };

        if !field.is_writable() {
            return Err(ScriptError::ReadOnly(field.name()));
        }

        let n = match value {
            Value::Int(n) => n,
            _ => return Err(ScriptError::NotAnInteger(field.name())),
        };

        match field {
            ActorField::Hitpoints => self.hitpoints = n,
            ActorField::MaxHitpoints => self.max_hitpoints = n,
            ActorField::WalkSpeed => self.walk_speed = n,
            ActorField::JumpPower => self.jump_power = n,
            ActorField::BoostPower => self.boost_power = n,
            ActorField::GlideSpeed => self.glide_speed = n,
            _ => return Err(ScriptError::ReadOnly(field.name())),
        }
        Ok(())
    }

    pub fn custom_vars(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.vars.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Rect;
    use crate::engine::physics::PlayerInfo;
    use crate::game::testing::{self, HeightField, GROUND_Y};

    fn key(name: &str) -> ScriptKey {
        name.parse().unwrap()
    }

    #[test]
    fn test_field_names_roundtrip() {
        for field in ActorField::ALL {
            assert_eq!(ActorField::from_name(field.name()), Some(field));
        }
        assert_eq!(key("walk_speed"), ScriptKey::Field(ActorField::WalkSpeed));
        assert_eq!(key("mood"), ScriptKey::Custom("mood".to_string()));
    }

    #[test]
    fn test_read_builtin_fields() {
        let level = HeightField::flat(GROUND_Y);
        let hero = Character::new(testing::hero_type(), 64, GROUND_Y - 32, false);
        let ctx = ActorContext::new(&hero, &level);

        assert_eq!(ctx.get_named("x"), Value::Int(72));
        assert_eq!(ctx.get_named("x2"), Value::Int(88));
        assert_eq!(ctx.get_named("y"), Value::Int(GROUND_Y - 32));
        assert_eq!(ctx.get_named("facing"), Value::Int(-1));
        assert_eq!(ctx.get_named("collided"), Value::Bool(false));
        assert_eq!(ctx.get_named("walk_speed"), Value::Int(200));
        assert_eq!(ctx.get_named("player"), Value::Null);
        assert_eq!(ctx.get_named("near_cliff_edge"), Value::Bool(false));
    }

    #[test]
    fn test_player_field() {
        let mut level = HeightField::flat(GROUND_Y);
        level.player = Some(PlayerInfo {
            id: 7,
            face_right: true,
            body: Rect::new(0, 0, 1, 1),
            attack: None,
        });
        let hero = Character::new(testing::hero_type(), 64, GROUND_Y - 32, true);
        assert_eq!(
            hero.value(&ActorField::Player.into(), &level),
            Value::Actor(7)
        );
    }

    #[test]
    fn test_near_cliff_edge() {
        let level = HeightField::new(|x| if x < 90 { Some(GROUND_Y) } else { None });
        let hero = Character::new(testing::hero_type(), 64, GROUND_Y - 32, true);
        assert_eq!(hero.value(&ActorField::NearCliffEdge.into(), &level), Value::Bool(true));

        let facing_away = Character::new(testing::hero_type(), 64, GROUND_Y - 32, false);
        assert_eq!(
            facing_away.value(&ActorField::NearCliffEdge.into(), &level),
            Value::Bool(false)
        );
    }

    #[test]
    fn test_write_stats_and_custom_vars() {
        let level = HeightField::flat(GROUND_Y);
        let mut hero = Character::new(testing::hero_type(), 0, 0, true);

        hero.set_value(&key("jump_power"), Value::Int(1500)).unwrap();
        assert_eq!(hero.jump_power(), 1500);

        hero.set_value(&key("mood"), Value::Text("grumpy".into())).unwrap();
        assert_eq!(hero.value(&key("mood"), &level), Value::Text("grumpy".into()));
        assert_eq!(hero.value(&key("unset"), &level), Value::Null);
    }

    #[test]
    fn test_read_only_fields_rejected() {
        let mut hero = Character::new(testing::hero_type(), 0, 0, true);
        assert_eq!(
            hero.set_value(&key("x"), Value::Int(3)),
            Err(ScriptError::ReadOnly("x"))
        );
        assert_eq!(
            hero.set_value(&key("hitpoints"), Value::Bool(true)),
            Err(ScriptError::NotAnInteger("hitpoints"))
        );
        assert_eq!(hero.x(), 0);
    }

    #[test]
    fn test_value_as_int() {
        assert_eq!(Value::Int(-4).as_int(), -4);
        assert_eq!(Value::Bool(true).as_int(), 1);
        assert_eq!(Value::Null.as_int(), 0);
        assert_eq!(Value::Actor(3).as_int(), 0);
    }
}
