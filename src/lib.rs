// Tile/pixel 2D character engine: archetypes, the actor state machine,
// per-axis collision sweeps, control strategies and vehicles

pub mod core;
pub mod engine;
pub mod game;
