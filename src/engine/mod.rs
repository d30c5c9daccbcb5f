// Engine modules: tick clock, input, physics queries

pub mod game_loop;
pub mod input;
pub mod physics;
