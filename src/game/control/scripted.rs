// Formula-driven control for non-player actors

use crate::engine::physics::LevelQuery;
use crate::game::characters::{ActorContext, Character};

use super::formula::FormulaRef;
use super::ControlStrategy;

/// Walk/jump/fly formulas run every `frequency` ticks, position formulas
/// every tick. The last results stay on the actor, where formulas can read
/// them back, and keep driving it until the next evaluation.
#[derive(Debug, Clone)]
pub struct ScriptedControl {
    walk: Option<FormulaRef>,
    jump: Option<FormulaRef>,
    fly: Option<FormulaRef>,
    xpos: Option<FormulaRef>,
    ypos: Option<FormulaRef>,
    frequency: u32,
    since_last: u32,
}

impl Default for ScriptedControl {
    fn default() -> Self {
        Self::new(1)
    }
}

impl ScriptedControl {
    /// A frequency of 0 is treated as 1
    pub fn new(frequency: u32) -> Self {
        Self {
            walk: None,
            jump: None,
            fly: None,
            xpos: None,
            ypos: None,
            frequency: frequency.max(1),
            since_last: 0,
        }
    }

    pub fn with_walk(mut self, formula: Option<FormulaRef>) -> Self {
        self.walk = formula;
        self
    }

    pub fn with_jump(mut self, formula: Option<FormulaRef>) -> Self {
        self.jump = formula;
        self
    }

    pub fn with_fly(mut self, formula: Option<FormulaRef>) -> Self {
        self.fly = formula;
        self
    }

    pub fn with_xpos(mut self, formula: Option<FormulaRef>) -> Self {
        self.xpos = formula;
        self
    }

    pub fn with_ypos(mut self, formula: Option<FormulaRef>) -> Self {
        self.ypos = formula;
        self
    }

    pub fn walk(&self) -> Option<&FormulaRef> {
        self.walk.as_ref()
    }

    pub fn jump(&self) -> Option<&FormulaRef> {
        self.jump.as_ref()
    }

    pub fn fly(&self) -> Option<&FormulaRef> {
        self.fly.as_ref()
    }

    pub fn xpos(&self) -> Option<&FormulaRef> {
        self.xpos.as_ref()
    }

    pub fn ypos(&self) -> Option<&FormulaRef> {
        self.ypos.as_ref()
    }

    pub fn frequency(&self) -> u32 {
        self.frequency
    }

    pub fn has_formulas(&self) -> bool {
        self.walk.is_some()
            || self.jump.is_some()
            || self.fly.is_some()
            || self.xpos.is_some()
            || self.ypos.is_some()
    }
}

fn run(formula: &FormulaRef, actor: &Character, level: &dyn LevelQuery) -> i32 {
    formula.execute(&ActorContext::new(actor, level))
}

impl ControlStrategy for ScriptedControl {
    fn drive(&mut self, actor: &mut Character, level: &dyn LevelQuery) {
        self.since_last += 1;
        if self.since_last >= self.frequency {
            self.since_last = 0;
        }
        let due = self.since_last == 0;

        if due {
            if let Some(fly) = &self.fly {
                actor.fly_result = run(fly, actor, level);
            }
            if let Some(walk) = &self.walk {
                actor.walk_result = run(walk, actor, level);
            }
        }

        // Cached results drive the actor every tick
        if self.fly.is_some() {
            // Fly owns horizontal motion; walk only picks the direction
            let move_right = match actor.walk_result {
                w if w > 0 => true,
                w if w < 0 => false,
                _ => actor.face_right(),
            };
            let lift = actor.fly_result;
            actor.fly(level, move_right, lift);
        } else if self.walk.is_some() && actor.walk_result != 0 {
            let move_right = actor.walk_result > 0;
            actor.walk(level, move_right);
        }

        if let Some(jump) = &self.jump {
            if due {
                actor.jump_result = run(jump, actor, level);
            }
            if actor.jump_result != 0 {
                actor.jump(level);
            }
        }

        if let Some(xpos) = &self.xpos {
            let x = run(xpos, actor, level);
            actor.set_pos(x, actor.y());
        }

        if let Some(ypos) = &self.ypos {
            let y = run(ypos, actor, level);
            actor.set_pos(actor.x(), y);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::characters::FrameKind;
    use crate::game::control::formula::{Formula, SimpleCompiler};
    use crate::game::control::FormulaCompiler;
    use crate::game::testing::{self, HeightField, GROUND_Y};
    use std::cell::Cell;
    use std::rc::Rc;
    use std::sync::Arc;

    /// Returns a fixed value and counts its evaluations
    #[derive(Debug)]
    struct Counting {
        value: i32,
        calls: Rc<Cell<u32>>,
    }

    impl Formula for Counting {
        fn execute(&self, _ctx: &ActorContext<'_>) -> i32 {
            self.calls.set(self.calls.get() + 1);
            self.value
        }

        fn source(&self) -> &str {
            "counting"
        }
    }

    fn counting(value: i32) -> (FormulaRef, Rc<Cell<u32>>) {
        let calls = Rc::new(Cell::new(0));
        let formula = Arc::new(Counting {
            value,
            calls: Rc::clone(&calls),
        });
        (formula, calls)
    }

    fn compiled(source: &str) -> Option<FormulaRef> {
        SimpleCompiler.compile(source)
    }

    fn standing_actor() -> (Character, HeightField) {
        (
            Character::new(testing::hero_type(), 64, GROUND_Y - 32, true),
            HeightField::flat(GROUND_Y),
        )
    }

    #[test]
    fn test_walk_formula_throttled_by_frequency() {
        let (mut actor, level) = standing_actor();
        let (walk, calls) = counting(0);
        let mut control = ScriptedControl::new(10).with_walk(Some(walk));

        for _ in 0..25 {
            control.drive(&mut actor, &level);
        }
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_position_formulas_run_every_tick() {
        let (mut actor, level) = standing_actor();
        let (xpos, calls) = counting(500);
        let mut control = ScriptedControl::new(10).with_xpos(Some(xpos));

        for _ in 0..7 {
            control.drive(&mut actor, &level);
        }
        assert_eq!(calls.get(), 7);
        assert_eq!(actor.x(), 500);
    }

    #[test]
    fn test_positive_walk_goes_right() {
        let (mut actor, level) = standing_actor();
        let mut control = ScriptedControl::new(1).with_walk(compiled("1"));
        control.drive(&mut actor, &level);
        assert_eq!(actor.velocity_x(), 200);
        assert_eq!(actor.frame_kind(), FrameKind::Walk);
        assert_eq!(actor.walk_result, 1);
    }

    #[test]
    fn test_zero_walk_is_no_intent() {
        let (mut actor, level) = standing_actor();
        let mut control = ScriptedControl::new(1).with_walk(compiled("0"));
        control.drive(&mut actor, &level);
        assert_eq!(actor.velocity_x(), 0);
        assert_eq!(actor.frame_kind(), FrameKind::Stand);
    }

    #[test]
    fn test_jump_formula() {
        let (mut actor, level) = standing_actor();
        let mut control = ScriptedControl::new(1).with_jump(compiled("1"));
        control.drive(&mut actor, &level);
        assert_eq!(actor.frame_kind(), FrameKind::Jump);
        assert_eq!(actor.velocity_y(), -1000);
    }

    #[test]
    fn test_fly_follows_last_walk_direction() {
        let level = HeightField::new(|_| None);
        let mut actor = Character::new(testing::hero_type(), 64, 0, true);
        actor.walk_result = -1;
        let mut control = ScriptedControl::new(1).with_fly(compiled("-40"));
        control.drive(&mut actor, &level);

        assert!(!actor.face_right());
        assert_eq!(actor.velocity_x(), -50);
        assert_eq!(actor.velocity_y(), -40);
        assert_eq!(actor.frame_kind(), FrameKind::Fly);
    }

    #[test]
    fn test_fly_without_walk_keeps_facing() {
        let level = HeightField::new(|_| None);
        let mut actor = Character::new(testing::hero_type(), 64, 0, false);
        let mut control = ScriptedControl::new(1).with_fly(compiled("-10"));
        control.drive(&mut actor, &level);
        assert!(!actor.face_right());
        assert_eq!(actor.velocity_x(), -50);
    }

    #[test]
    fn test_cached_walk_keeps_pushing_between_evaluations() {
        let (mut actor, level) = standing_actor();
        let mut control = ScriptedControl::new(10).with_walk(compiled("1"));

        for _ in 0..10 {
            control.drive(&mut actor, &level);
        }
        assert_eq!(actor.velocity_x(), 200);

        control.drive(&mut actor, &level);
        assert_eq!(actor.velocity_x(), 400);
    }

    #[test]
    fn test_fly_takes_precedence_over_walk() {
        let level = HeightField::new(|_| None);
        let mut actor = Character::new(testing::hero_type(), 64, 0, true);
        let mut control = ScriptedControl::new(1)
            .with_walk(compiled("1"))
            .with_fly(compiled("-10"));
        control.drive(&mut actor, &level);

        assert!(actor.face_right());
        assert_eq!(actor.velocity_x(), 50);
        assert_eq!(actor.velocity_y(), -10);
        assert_eq!(actor.walk_result, 1);
    }

    #[test]
    fn test_zero_lift_still_flies() {
        let level = HeightField::new(|_| None);
        let mut actor = Character::new(testing::hero_type(), 64, 0, true);
        let mut control = ScriptedControl::new(1).with_fly(compiled("0"));
        control.drive(&mut actor, &level);

        assert_eq!(actor.frame_kind(), FrameKind::Fly);
        assert_eq!(actor.velocity_x(), 50);
        assert_eq!(actor.velocity_y(), 0);
    }

    #[test]
    fn test_frequency_zero_acts_as_one() {
        let control = ScriptedControl::new(0);
        assert_eq!(control.frequency(), 1);
        assert!(!control.has_formulas());
    }
}
