// Serialized form of an actor, as stored in level files
//
// Stats equal to the archetype's are left out so records stay small and
// pick up catalog changes.

use log::warn;
use serde::{Deserialize, Serialize};

use crate::game::control::{FormulaCompiler, FormulaRef, ScriptedControl};

use super::character::Character;
use super::types::TypeCatalog;
use super::CatalogError;

/// How often (in ticks) walk/jump/fly formulas run when a record doesn't say
pub const DEFAULT_FORMULA_FREQUENCY: u32 = 10;

fn default_frequency() -> u32 {
    DEFAULT_FORMULA_FREQUENCY
}

fn is_default_frequency(frequency: &u32) -> bool {
    *frequency == DEFAULT_FORMULA_FREQUENCY
}

fn is_false(b: &bool) -> bool {
    !*b
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterRecord {
    #[serde(rename = "type")]
    pub type_id: String,
    pub x: i32,
    pub y: i32,
    pub face_right: bool,
    #[serde(default)]
    pub velocity_x: i32,
    #[serde(default)]
    pub velocity_y: i32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hitpoints: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_hitpoints: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub walk: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jump: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boost: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub glide: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub walk_formula: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jump_formula: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fly_formula: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xpos_formula: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ypos_formula: Option<String>,
    #[serde(
        default = "default_frequency",
        skip_serializing_if = "is_default_frequency"
    )]
    pub formula_test_frequency: u32,

    #[serde(default, skip_serializing_if = "is_false")]
    pub is_human: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<i32>,
}

/// Keep a value only when it differs from the archetype's
fn sparse(value: i32, base: i32) -> Option<i32> {
    (value != base).then_some(value)
}

fn compile(
    compiler: &dyn FormulaCompiler,
    source: Option<&String>,
    what: &str,
) -> Option<FormulaRef> {
    let source = source?;
    let formula = compiler.compile(source);
    if formula.is_none() {
        warn!("Ignoring {} formula that failed to compile: {}", what, source);
    }
    formula
}

impl Character {
    pub fn to_record(&self) -> CharacterRecord {
        let stats = self.kind.stats();
        let source = |formula: Option<&FormulaRef>| formula.map(|f| f.source().to_string());

        CharacterRecord {
            type_id: self.kind.id().to_string(),
            x: self.pos.x,
            y: self.pos.y,
            face_right: self.face_right,
            velocity_x: self.velocity_x,
            velocity_y: self.velocity_y,
            hitpoints: sparse(self.hitpoints, stats.hitpoints),
            max_hitpoints: sparse(self.max_hitpoints, stats.hitpoints),
            walk: sparse(self.walk_speed, stats.walk),
            jump: sparse(self.jump_power, stats.jump),
            boost: sparse(self.boost_power, stats.boost),
            glide: sparse(self.glide_speed, stats.glide),
            walk_formula: source(self.scripted.walk()),
            jump_formula: source(self.scripted.jump()),
            fly_formula: source(self.scripted.fly()),
            xpos_formula: source(self.scripted.xpos()),
            ypos_formula: source(self.scripted.ypos()),
            formula_test_frequency: if self.scripted.has_formulas() {
                self.scripted.frequency()
            } else {
                DEFAULT_FORMULA_FREQUENCY
            },
            is_human: self.is_human(),
            group: self.group,
        }
    }

    /// Rebuild an actor. Formulas that fail to compile are dropped with a
    /// warning; an unknown type is an error.
    pub fn from_record(
        record: &CharacterRecord,
        catalog: &TypeCatalog,
        compiler: &dyn FormulaCompiler,
    ) -> Result<Character, CatalogError> {
        let kind = catalog.get(&record.type_id)?;
        let stats = kind.stats().clone();

        let control = ScriptedControl::new(record.formula_test_frequency)
            .with_walk(compile(compiler, record.walk_formula.as_ref(), "walk"))
            .with_jump(compile(compiler, record.jump_formula.as_ref(), "jump"))
            .with_fly(compile(compiler, record.fly_formula.as_ref(), "fly"))
            .with_xpos(compile(compiler, record.xpos_formula.as_ref(), "xpos"))
            .with_ypos(compile(compiler, record.ypos_formula.as_ref(), "ypos"));

        let mut character = Character::new(kind, record.x, record.y, record.face_right)
            .with_scripted_control(control)
            .with_velocity(record.velocity_x, record.velocity_y)
            .with_group(record.group);

        character.hitpoints = record.hitpoints.unwrap_or(stats.hitpoints);
        character.max_hitpoints = record.max_hitpoints.unwrap_or(stats.hitpoints);
        character.walk_speed = record.walk.unwrap_or(stats.walk);
        character.jump_power = record.jump.unwrap_or(stats.jump);
        character.boost_power = record.boost.unwrap_or(stats.boost);
        character.glide_speed = record.glide.unwrap_or(stats.glide);

        if record.is_human {
            character = character.with_interactive_control();
        }

        Ok(character)
    }
}
