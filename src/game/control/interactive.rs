// Keyboard-driven control for the human player

use crate::engine::input::ControlKeys;
use crate::engine::physics::LevelQuery;
use crate::game::characters::{Character, FrameKind};

use super::ControlStrategy;

/// Two presses of the same direction within this many ticks start a run
const DOUBLE_TAP_TICKS: u32 = 10;

#[derive(Debug, Clone, Default)]
pub struct InteractiveControl {
    keys: ControlKeys,
    left_held: bool,
    right_held: bool,
    running: bool,
    /// Cycle of the last left/right tap, `None` before the first one
    last_left: Option<u32>,
    last_right: Option<u32>,
}

impl InteractiveControl {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keys held for the coming tick
    pub fn set_keys(&mut self, keys: ControlKeys) {
        self.keys = keys;
    }

    pub fn keys(&self) -> ControlKeys {
        self.keys
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    fn apply(&mut self, keys: ControlKeys, actor: &mut Character, level: &dyn LevelQuery) {
        let current = actor.frame_kind();
        if current.is_attack() {
            if current == FrameKind::RunAttack {
                let accel = actor.frame().accel_x * actor.face_dir();
                actor.set_velocity(actor.velocity_x() + accel, actor.velocity_y());
            }
            self.running = false;
            return;
        }

        if !keys.left && !keys.right {
            self.running = false;
        }

        if keys.jump {
            if keys.down {
                actor.jump_down(level);
            } else {
                actor.jump(level);
            }
        }
        actor.set_jump_latched(keys.jump);

        if keys.down {
            actor.crouch(level);
            return;
        } else if actor.frame_kind() == FrameKind::Crouch {
            actor.uncrouch(level);
        }

        if keys.up {
            actor.lookup(level);
        } else if actor.frame_kind() == FrameKind::Lookup {
            actor.unlookup(level);
        }

        if keys.attack {
            actor.attack(level, keys.up);
            return;
        }

        let cycle = actor.cycle();
        if keys.left {
            actor.walk(level, false);
            if !self.left_held || self.running {
                self.try_run(actor, level, false, self.last_left);
                self.last_left = Some(cycle);
            }
        }
        if keys.right {
            actor.walk(level, true);
            if !self.right_held || self.running {
                self.try_run(actor, level, true, self.last_right);
                self.last_right = Some(cycle);
            }
        }
    }

    fn try_run(
        &mut self,
        actor: &mut Character,
        level: &dyn LevelQuery,
        move_right: bool,
        last_tap: Option<u32>,
    ) {
        let double_tap = last_tap.is_some_and(|tap| tap + DOUBLE_TAP_TICKS > actor.cycle());
        if self.running || double_tap {
            actor.run(level, move_right);
            self.running = true;
        }
    }
}

impl ControlStrategy for InteractiveControl {
    fn drive(&mut self, actor: &mut Character, level: &dyn LevelQuery) {
        let keys = self.keys;
        self.apply(keys, actor, level);
        self.left_held = keys.left;
        self.right_held = keys.right;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::testing::{self, HeightField, GROUND_Y};

    fn setup() -> (Character, HeightField, InteractiveControl) {
        (
            Character::new(testing::hero_type(), 64, GROUND_Y - 32, true),
            HeightField::flat(GROUND_Y),
            InteractiveControl::new(),
        )
    }

    fn tick(control: &mut InteractiveControl, actor: &mut Character, level: &HeightField, keys: ControlKeys) {
        control.set_keys(keys);
        control.drive(actor, level);
    }

    const RIGHT: ControlKeys = ControlKeys {
        left: false,
        right: true,
        up: false,
        down: false,
        jump: false,
        attack: false,
    };

    const NONE: ControlKeys = ControlKeys {
        left: false,
        right: false,
        up: false,
        down: false,
        jump: false,
        attack: false,
    };

    #[test]
    fn test_single_press_walks() {
        let (mut actor, level, mut control) = setup();
        tick(&mut control, &mut actor, &level, RIGHT);
        assert_eq!(actor.frame_kind(), FrameKind::Walk);
        assert!(!control.is_running());
    }

    #[test]
    fn test_double_tap_runs() {
        let (mut actor, level, mut control) = setup();
        tick(&mut control, &mut actor, &level, RIGHT);
        tick(&mut control, &mut actor, &level, NONE);
        tick(&mut control, &mut actor, &level, RIGHT);
        assert_eq!(actor.frame_kind(), FrameKind::Run);
        assert!(control.is_running());

        tick(&mut control, &mut actor, &level, NONE);
        assert!(!control.is_running());
    }

    #[test]
    fn test_holding_does_not_run() {
        let (mut actor, level, mut control) = setup();
        for _ in 0..5 {
            tick(&mut control, &mut actor, &level, RIGHT);
        }
        assert_eq!(actor.frame_kind(), FrameKind::Walk);
        assert!(!control.is_running());
    }

    #[test]
    fn test_both_directions_apply_in_order() {
        let level = HeightField::new(|_| None);
        let mut actor = Character::new(testing::hero_type(), 64, 0, true);
        let mut control = InteractiveControl::new();
        let both = ControlKeys {
            left: true,
            right: true,
            ..NONE
        };

        tick(&mut control, &mut actor, &level, both);
        assert_eq!(actor.velocity_x(), 0);
        assert!(actor.face_right());
    }

    #[test]
    fn test_jump_latch_blocks_repeat_jumps() {
        let (mut actor, level, mut control) = setup();
        actor.boost_power = 100;
        let jump = ControlKeys { jump: true, ..NONE };

        tick(&mut control, &mut actor, &level, jump);
        assert_eq!(actor.frame_kind(), FrameKind::Jump);
        assert_eq!(actor.velocity_y(), -1000);
        let frame_id = actor.frame_id();

        // Still on the ground, still holding jump: only boosts
        tick(&mut control, &mut actor, &level, jump);
        assert_eq!(actor.velocity_y(), -1100);
        assert_eq!(actor.frame_id(), frame_id);
    }

    #[test]
    fn test_crouch_and_release() {
        let (mut actor, level, mut control) = setup();
        let down = ControlKeys { down: true, ..NONE };
        tick(&mut control, &mut actor, &level, down);
        assert_eq!(actor.frame_kind(), FrameKind::Crouch);

        // Down suppresses walking
        tick(&mut control, &mut actor, &level, ControlKeys { right: true, ..down });
        assert_eq!(actor.velocity_x(), 0);
    }

    #[test]
    fn test_attack_locks_out_input() {
        let (mut actor, level, mut control) = setup();
        let attack = ControlKeys { attack: true, ..NONE };
        tick(&mut control, &mut actor, &level, attack);
        assert_eq!(actor.frame_kind(), FrameKind::Attack);

        tick(&mut control, &mut actor, &level, RIGHT);
        assert_eq!(actor.frame_kind(), FrameKind::Attack);
        assert_eq!(actor.velocity_x(), 0);
    }

    #[test]
    fn test_up_attack_while_looking_up() {
        let (mut actor, level, mut control) = setup();
        tick(
            &mut control,
            &mut actor,
            &level,
            ControlKeys { up: true, attack: true, ..NONE },
        );
        assert_eq!(actor.frame_kind(), FrameKind::UpAttack);
    }
}
