// Frame state machine bookkeeping
//
// `FrameKind` says which state an actor is in; `FrameState` tracks how long
// it has been there. The transitions themselves need physics context and
// live on `Character`.

use super::frame::FrameKind;

/// What happens when a frame plays for its full duration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// Loop the same frame
    Restart,
    /// Go back to the (slope-adapted) stand frame
    Stand,
    /// Loop, but drop to stand if no longer moving horizontally
    StandIfStopped,
    /// Switch to the fall frame
    Fall,
    /// Occasionally fidget, otherwise loop stand
    IdleOrStand,
    /// Loop and immediately settle into stand
    RestartThenStand,
}

impl FrameKind {
    /// Rule applied when the frame's duration elapses. `None` for frames
    /// that only physics can end.
    pub fn completion(self) -> Option<Completion> {
        match self {
            Self::Jump | Self::Fall | Self::GetHit | Self::Die => None,
            Self::Stand => Some(Completion::IdleOrStand),
            Self::StandUpSlope | Self::StandDownSlope | Self::Fly | Self::Run => {
                Some(Completion::Restart)
            }
            Self::Walk => Some(Completion::StandIfStopped),
            Self::Idle
            | Self::Crouch
            | Self::Lookup
            | Self::Attack
            | Self::UpAttack
            | Self::RunAttack
            | Self::Turn => Some(Completion::Stand),
            Self::Slide | Self::JumpAttack => Some(Completion::Fall),
            Self::Spring => Some(Completion::RestartThenStand),
        }
    }

    /// Standing still on the ground
    pub fn is_stand_family(self) -> bool {
        matches!(
            self,
            Self::Stand | Self::Idle | Self::StandUpSlope | Self::StandDownSlope
        )
    }

    pub fn is_attack(self) -> bool {
        matches!(
            self,
            Self::Attack | Self::JumpAttack | Self::UpAttack | Self::RunAttack
        )
    }

    /// Airborne frames that end when the actor touches ground
    pub fn ends_on_landing(self) -> bool {
        matches!(
            self,
            Self::Jump | Self::Fall | Self::GetHit | Self::Slide | Self::JumpAttack
        )
    }

    /// Frames that are never replaced by fall just because support is gone.
    /// Slide is decided separately since it depends on the wall still being there.
    pub fn resists_falling(self) -> bool {
        matches!(
            self,
            Self::JumpAttack | Self::Fall | Self::GetHit | Self::Fly
        )
    }

    /// Ground locomotion frames
    pub fn is_moving_on_ground(self) -> bool {
        matches!(self, Self::Walk | Self::Run)
    }

    /// Frames that pause halfway until released
    pub fn holds_midway(self) -> bool {
        matches!(self, Self::Crouch | Self::Lookup)
    }

    /// Frames during which walk intents are ignored
    pub fn blocks_walking(self) -> bool {
        matches!(
            self,
            Self::Slide | Self::Spring | Self::Die | Self::Turn | Self::GetHit
        )
    }
}

/// Which frame is playing and for how long
#[derive(Debug, Clone, Default)]
pub struct FrameState {
    current: FrameKind,
    time_in_frame: i32,
    frame_id: u64,
}

impl FrameState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> FrameKind {
        self.current
    }

    pub fn is(&self, kind: FrameKind) -> bool {
        self.current == kind
    }

    /// Ticks since the last frame change
    pub fn time_in_frame(&self) -> i32 {
        self.time_in_frame
    }

    /// Incremented on every frame change
    pub fn frame_id(&self) -> u64 {
        self.frame_id
    }

    /// Switch frames, even to the one already playing
    pub fn enter(&mut self, kind: FrameKind) {
        self.current = kind;
        self.time_in_frame = 0;
        self.frame_id += 1;
    }

    /// Replace the frame without counting it as a change
    pub fn reset_to(&mut self, kind: FrameKind) {
        self.current = kind;
        self.time_in_frame = 0;
    }

    /// Loop the current frame
    pub fn restart(&mut self) {
        self.time_in_frame = 0;
    }

    /// Advance one tick. Returns true when the frame just reached
    /// `duration` and has a completion rule to run.
    pub fn advance(&mut self, duration: i32) -> bool {
        self.time_in_frame += 1;

        if self.current.holds_midway() && self.time_in_frame == duration / 2 {
            self.time_in_frame -= 1;
        }

        self.time_in_frame == duration && self.current.completion().is_some()
    }

    /// Let a held crouch/lookup continue past its midpoint
    pub fn release_hold(&mut self, duration: i32) {
        if self.time_in_frame == duration / 2 - 1 {
            self.time_in_frame += 1;
        }
    }

    /// Whether the frame has played at least `duration` ticks
    pub fn finished(&self, duration: i32) -> bool {
        self.time_in_frame >= duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let state = FrameState::new();
        assert_eq!(state.current(), FrameKind::Stand);
        assert_eq!(state.time_in_frame(), 0);
        assert_eq!(state.frame_id(), 0);
    }

    #[test]
    fn test_enter_resets_time_and_counts() {
        let mut state = FrameState::new();
        state.advance(10);
        state.advance(10);
        state.enter(FrameKind::Walk);
        assert_eq!(state.current(), FrameKind::Walk);
        assert_eq!(state.time_in_frame(), 0);
        assert_eq!(state.frame_id(), 1);

        state.enter(FrameKind::Walk);
        assert_eq!(state.frame_id(), 2);
    }

    #[test]
    fn test_advance_reports_completion_once() {
        let mut state = FrameState::new();
        let fired: Vec<bool> = (0..6).map(|_| state.advance(4)).collect();
        assert_eq!(fired, vec![false, false, false, true, false, false]);
    }

    #[test]
    fn test_physics_only_frames_never_complete() {
        for kind in [FrameKind::Jump, FrameKind::Fall, FrameKind::GetHit, FrameKind::Die] {
            let mut state = FrameState::new();
            state.enter(kind);
            assert!((0..20).all(|_| !state.advance(3)), "{:?} completed", kind);
        }
    }

    #[test]
    fn test_crouch_holds_midway_until_released() {
        let mut state = FrameState::new();
        state.enter(FrameKind::Crouch);
        for _ in 0..50 {
            assert!(!state.advance(10));
        }
        assert_eq!(state.time_in_frame(), 4);

        state.release_hold(10);
        assert_eq!(state.time_in_frame(), 5);
        let fired: Vec<bool> = (0..5).map(|_| state.advance(10)).collect();
        assert_eq!(fired, vec![false, false, false, false, true]);
    }

    #[test]
    fn test_release_hold_only_at_midpoint() {
        let mut state = FrameState::new();
        state.enter(FrameKind::Lookup);
        state.advance(10);
        state.release_hold(10);
        assert_eq!(state.time_in_frame(), 1);
    }

    #[test]
    fn test_die_finished() {
        let mut state = FrameState::new();
        state.enter(FrameKind::Die);
        for _ in 0..5 {
            state.advance(6);
        }
        assert!(!state.finished(6));
        state.advance(6);
        assert!(state.finished(6));
    }

    #[test]
    fn test_completion_rules() {
        assert_eq!(FrameKind::Stand.completion(), Some(Completion::IdleOrStand));
        assert_eq!(FrameKind::Walk.completion(), Some(Completion::StandIfStopped));
        assert_eq!(FrameKind::Slide.completion(), Some(Completion::Fall));
        assert_eq!(FrameKind::JumpAttack.completion(), Some(Completion::Fall));
        assert_eq!(FrameKind::Spring.completion(), Some(Completion::RestartThenStand));
        assert_eq!(FrameKind::Turn.completion(), Some(Completion::Stand));
        assert_eq!(FrameKind::Die.completion(), None);
    }

    #[test]
    fn test_state_families() {
        assert!(FrameKind::Idle.is_stand_family());
        assert!(FrameKind::StandDownSlope.is_stand_family());
        assert!(!FrameKind::Walk.is_stand_family());
        assert!(FrameKind::RunAttack.is_attack());
        assert!(FrameKind::Slide.ends_on_landing());
        assert!(!FrameKind::Fly.ends_on_landing());
        assert!(FrameKind::Fly.resists_falling());
        assert!(FrameKind::GetHit.blocks_walking());
    }
}
