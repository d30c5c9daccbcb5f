// Deterministic seeded random numbers (xorshift32)
//
// Every actor owns one so that replays of the same level produce the same
// idle animations.

/// Seeded xorshift32 generator
#[derive(Debug, Clone)]
pub struct SeededRandom {
    state: u32,
}

impl SeededRandom {
    /// Seed of 0 is treated as 1 to avoid the all-zero fixed point
    pub fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    pub fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    /// Random integer in `0..max`
    pub fn next_int(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// True roughly once every `n` calls
    pub fn one_in(&mut self, n: u32) -> bool {
        self.next_int(n) == 0
    }
}

impl Default for SeededRandom {
    fn default() -> Self {
        Self::new(0x2545_F491)
    }
}
