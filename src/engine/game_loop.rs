/// Fixed tick clock
///
/// Level logic runs in whole ticks at a constant rate no matter how often
/// the host loop wakes up. Wall-clock time is accumulated and converted
/// into a number of ticks to run.
use std::time::{Duration, Instant};

/// Logic ticks per second
pub const TICKS_PER_SECOND: u32 = 50;
pub const TICK_DURATION: Duration = Duration::from_millis(1000 / TICKS_PER_SECOND as u64);

/// Maximum number of ticks per wake-up to prevent spiral of death
const MAX_CATCH_UP_TICKS: u32 = 5;

/// Tick timing state
#[derive(Debug)]
pub struct TickClock {
    /// Time not yet consumed by whole ticks
    accumulator: Duration,

    /// Time of the last wake-up
    last_wake: Instant,

    /// Whether the game is paused
    paused: bool,

    /// Total ticks handed out
    tick_count: u64,
}

impl TickClock {
    pub fn new() -> Self {
        Self {
            accumulator: Duration::ZERO,
            last_wake: Instant::now(),
            paused: false,
            tick_count: 0,
        }
    }

    /// Measure the time since the last call and return the ticks to run
    pub fn begin_frame(&mut self) -> u32 {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_wake);
        self.last_wake = now;
        self.advance(elapsed)
    }

    /// Feed `elapsed` wall-clock time, returning how many ticks are due
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        if self.paused {
            return 0;
        }

        self.accumulator += elapsed;

        let mut ticks = 0;
        while self.accumulator >= TICK_DURATION && ticks < MAX_CATCH_UP_TICKS {
            self.accumulator -= TICK_DURATION;
            ticks += 1;
        }

        // Drop time we could not catch up on instead of bursting later
        if ticks == MAX_CATCH_UP_TICKS {
            self.accumulator = self.accumulator.min(TICK_DURATION);
        }

        self.tick_count += u64::from(ticks);
        ticks
    }

    /// Time until the next tick is due
    pub fn until_next_tick(&self) -> Duration {
        TICK_DURATION.saturating_sub(self.accumulator)
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn pause(&mut self) {
        if !self.paused {
            self.paused = true;
            log::info!("Game paused");
        }
    }

    pub fn resume(&mut self) {
        if self.paused {
            self.paused = false;
            // Reset accumulator to prevent a tick burst
            self.accumulator = Duration::ZERO;
            self.last_wake = Instant::now();
            log::info!("Game resumed");
        }
    }

    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
    }
}

impl Default for TickClock {
    fn default() -> Self {
        Self::new()
    }
}
