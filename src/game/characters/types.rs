// Character archetypes and the catalog they are loaded into

use std::collections::HashMap;
use std::sync::Arc;

use log::info;
use serde::Deserialize;

use super::frame::{Frame, FrameKind};
use super::stats::CharacterStats;
use super::CatalogError;

/// Shared, immutable definition of a class of actor
#[derive(Debug)]
pub struct CharacterType {
    id: String,
    stats: CharacterStats,
    stand: Frame,
    /// Optional frames indexed by `FrameKind::index`; the stand slot is unused
    frames: [Option<Frame>; FrameKind::COUNT],
}

impl CharacterType {
    /// Build a type from its frames. A stand frame is mandatory.
    pub fn new(
        id: &str,
        stats: CharacterStats,
        frames: impl IntoIterator<Item = (FrameKind, Frame)>,
    ) -> Result<Self, CatalogError> {
        let mut table: [Option<Frame>; FrameKind::COUNT] = std::array::from_fn(|_| None);
        for (kind, frame) in frames {
            table[kind.index()] = Some(frame);
        }

        let stand = table[FrameKind::Stand.index()]
            .take()
            .ok_or_else(|| CatalogError::MissingStandFrame(id.to_string()))?;

        Ok(Self {
            id: id.to_string(),
            stats,
            stand,
            frames: table,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn stats(&self) -> &CharacterStats {
        &self.stats
    }

    /// The frame every actor falls back to
    pub fn stand(&self) -> &Frame {
        &self.stand
    }

    /// Frame for a state, `None` when the archetype doesn't provide it
    pub fn frame(&self, kind: FrameKind) -> Option<&Frame> {
        match kind {
            FrameKind::Stand => Some(&self.stand),
            _ => self.frames[kind.index()].as_ref(),
        }
    }

    pub fn has(&self, kind: FrameKind) -> bool {
        self.frame(kind).is_some()
    }

    pub fn is_vehicle(&self) -> bool {
        self.stats.vehicle
    }
}

/// On-disk shape of a catalog entry
#[derive(Debug, Deserialize)]
struct CharacterTypeDef {
    id: String,
    #[serde(default)]
    stats: CharacterStats,
    frames: HashMap<FrameKind, Frame>,
}

/// All archetypes known to a game, keyed by id
#[derive(Debug, Default, Clone)]
pub struct TypeCatalog {
    types: HashMap<String, Arc<CharacterType>>,
}

impl TypeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a catalog from a JSON array of type definitions
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let defs: Vec<CharacterTypeDef> = serde_json::from_str(json)?;
        let mut catalog = Self::new();
        for def in defs {
            let character_type = CharacterType::new(&def.id, def.stats, def.frames)?;
            catalog.insert(character_type)?;
        }
        info!("Loaded {} character types", catalog.len());
        Ok(catalog)
    }

    /// Register a type. Ids must be unique.
    pub fn insert(&mut self, character_type: CharacterType) -> Result<Arc<CharacterType>, CatalogError> {
        if self.types.contains_key(character_type.id()) {
            return Err(CatalogError::DuplicateType(character_type.id().to_string()));
        }
        let shared = Arc::new(character_type);
        self.types.insert(shared.id().to_string(), Arc::clone(&shared));
        Ok(shared)
    }

    pub fn get(&self, id: &str) -> Result<Arc<CharacterType>, CatalogError> {
        self.types
            .get(id)
            .cloned()
            .ok_or_else(|| CatalogError::UnknownType(id.to_string()))
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
