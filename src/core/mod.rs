// Math utilities and small shared helpers

pub mod math;
pub mod random;

pub use math::Rect;
pub use random::SeededRandom;
