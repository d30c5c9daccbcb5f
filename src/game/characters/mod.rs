// Character system
//
// This module contains everything related to actors:
// - Archetypes (frames + stats) and the catalog they load from
// - The per-actor frame state machine
// - Per-tick motion and collision resolution
// - Vehicle composition and serialized records

pub mod character;
pub mod events;
pub mod frame;
pub mod motion;
pub mod record;
pub mod render;
pub mod script;
pub mod state;
pub mod stats;
pub mod types;
pub mod vehicle;

use thiserror::Error;

// Re-export commonly used types
pub use character::Character;
pub use events::ActorEvent;
pub use frame::{Frame, FrameKind, PlatformBox};
pub use record::CharacterRecord;
pub use render::RenderHints;
pub use script::{ActorContext, ActorField, ScriptKey, Value};
pub use state::{Completion, FrameState};
pub use stats::CharacterStats;
pub use types::{CharacterType, TypeCatalog};

/// Errors raised while loading archetypes or rebuilding actors
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("malformed catalog: {0}")]
    Json(#[from] serde_json::Error),

    #[error("character type '{0}' has no stand frame")]
    MissingStandFrame(String),

    #[error("character type '{0}' defined twice")]
    DuplicateType(String),

    #[error("unknown character type '{0}'")]
    UnknownType(String),
}

/// Errors raised by scripted writes to actor properties
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScriptError {
    #[error("property '{0}' is read-only")]
    ReadOnly(&'static str),

    #[error("property '{0}' expects an integer")]
    NotAnInteger(&'static str),
}
