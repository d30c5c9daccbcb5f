// Game modules: characters, their control strategies and the level they
// live in

pub mod characters;
pub mod control;
pub mod level;

#[cfg(test)]
pub mod testing;
