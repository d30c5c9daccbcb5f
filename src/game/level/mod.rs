// Level: terrain, the actor list and the per-tick update that applies
// what actors asked for

pub mod tiles;
pub mod view;

use log::{debug, info};
use thiserror::Error;

use crate::core::{Rect, SeededRandom};
use crate::engine::input::ControlKeys;
use crate::engine::physics::{ActorId, PlayerInfo};
use crate::game::characters::{ActorEvent, CatalogError, Character, CharacterRecord, TypeCatalog};
use crate::game::control::FormulaCompiler;

pub use tiles::{Tile, TileMap};
pub use view::LevelView;

/// Mixed into actor ids to seed their random streams
const RNG_SEED_SALT: u32 = 0x9E37_79B9;

#[derive(Debug, Error)]
pub enum LevelError {
    #[error("level has no tiles")]
    Empty,

    #[error("tile size must be positive, got {0}")]
    BadTileSize(i32),

    #[error("row {row} does not have {expected} tiles")]
    RaggedRow { row: usize, expected: usize },

    #[error("unknown tile '{ch}' at row {row}, column {column}")]
    UnknownTile { ch: char, row: usize, column: usize },

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

pub struct Level {
    terrain: TileMap,
    actors: Vec<Character>,
    next_id: ActorId,
    player: Option<ActorId>,
    boundaries: Rect,
    air_resistance: i32,
    /// Sound cues waiting for the audio backend
    sounds: Vec<String>,
    tick_count: u64,
}

impl Level {
    pub fn new(terrain: TileMap) -> Self {
        let boundaries = terrain.pixel_bounds();
        Self {
            terrain,
            actors: Vec::new(),
            next_id: 1,
            player: None,
            boundaries,
            air_resistance: 0,
            sounds: Vec::new(),
            tick_count: 0,
        }
    }

    pub fn with_air_resistance(mut self, air_resistance: i32) -> Self {
        self.air_resistance = air_resistance;
        self
    }

    pub fn with_boundaries(mut self, boundaries: Rect) -> Self {
        self.boundaries = boundaries;
        self
    }

    pub fn terrain(&self) -> &TileMap {
        &self.terrain
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    // ------------------------------------------------------------------
    // Actors
    // ------------------------------------------------------------------

    /// Add an actor, assigning it a fresh id. Human actors become the player.
    pub fn spawn(&mut self, mut character: Character) -> ActorId {
        let id = self.next_id;
        self.next_id += 1;

        character.id = id;
        character.rng = SeededRandom::new(id ^ RNG_SEED_SALT);
        if character.is_human() {
            self.player = Some(id);
        }

        debug!("Spawned {} as actor {}", character.character_type().id(), id);
        self.actors.push(character);
        id
    }

    /// Rebuild an actor from its record and add it
    pub fn spawn_record(
        &mut self,
        record: &CharacterRecord,
        catalog: &TypeCatalog,
        compiler: &dyn FormulaCompiler,
    ) -> Result<ActorId, LevelError> {
        let character = Character::from_record(record, catalog, compiler)?;
        Ok(self.spawn(character))
    }

    pub fn to_records(&self) -> Vec<CharacterRecord> {
        self.actors.iter().map(Character::to_record).collect()
    }

    pub fn get(&self, id: ActorId) -> Option<&Character> {
        self.actors.iter().find(|actor| actor.id() == id)
    }

    pub fn get_mut(&mut self, id: ActorId) -> Option<&mut Character> {
        self.actors.iter_mut().find(|actor| actor.id() == id)
    }

    pub fn remove(&mut self, id: ActorId) -> Option<Character> {
        let index = self.index_of(id)?;
        if self.player == Some(id) {
            self.player = None;
        }
        Some(self.actors.remove(index))
    }

    pub fn actors(&self) -> &[Character] {
        &self.actors
    }

    pub fn count(&self) -> usize {
        self.actors.len()
    }

    pub fn player_id(&self) -> Option<ActorId> {
        self.player
    }

    pub fn player(&self) -> Option<&Character> {
        self.player.and_then(|id| self.get(id))
    }

    /// Hand this tick's held keys to the human player
    pub fn set_player_keys(&mut self, keys: ControlKeys) {
        let Some(id) = self.player else {
            return;
        };
        if let Some(control) = self.get_mut(id).and_then(Character::interactive_control_mut) {
            control.set_keys(keys);
        }
    }

    /// Sound cues emitted since the last call
    pub fn take_sounds(&mut self) -> Vec<String> {
        std::mem::take(&mut self.sounds)
    }

    fn index_of(&self, id: ActorId) -> Option<usize> {
        self.actors.iter().position(|actor| actor.id() == id)
    }

    fn player_info(&self) -> Option<PlayerInfo> {
        self.player().map(Character::player_info)
    }

    /// Run `f` on one actor with a view of everything else
    fn with_view<R>(
        &mut self,
        index: usize,
        player: Option<PlayerInfo>,
        f: impl FnOnce(&mut Character, &LevelView<'_>) -> R,
    ) -> Option<R> {
        let (before, rest) = self.actors.split_at_mut(index);
        let (actor, after) = rest.split_first_mut()?;
        let view = LevelView {
            terrain: &self.terrain,
            before,
            after,
            boundaries: self.boundaries,
            air_resistance: self.air_resistance,
            player,
        };
        Some(f(actor, &view))
    }

    /// Snap an actor onto the ground below it
    pub fn settle(&mut self, id: ActorId) {
        let player = self.player_info();
        if let Some(index) = self.index_of(id) {
            self.with_view(index, player, |actor, view| actor.move_to_standing(view));
        }
    }

    // ------------------------------------------------------------------
    // Simulation
    // ------------------------------------------------------------------

    /// Advance every actor by one tick
    pub fn tick(&mut self) {
        let player = self.player_info();
        let mut compositions = Vec::new();

        let mut index = 0;
        while index < self.actors.len() {
            let processed = self.with_view(index, player, |actor, view| {
                actor.process(view);
                (actor.id(), actor.take_events())
            });
            if let Some((id, events)) = processed {
                self.apply_events(id, events, &mut compositions);
            }
            index += 1;
        }

        for (id, event) in compositions {
            self.compose(id, event);
        }

        self.remove_destroyed();
        self.tick_count += 1;
    }

    fn apply_events(
        &mut self,
        source: ActorId,
        events: Vec<ActorEvent>,
        compositions: &mut Vec<(ActorId, ActorEvent)>,
    ) {
        for event in events {
            match event {
                ActorEvent::PlaySound(sound) => {
                    debug!("Actor {} plays {}", source, sound);
                    self.sounds.push(sound);
                }
                ActorEvent::Hurt { hitpoints } => {
                    debug!("Actor {} hurt, {} hitpoints left", source, hitpoints);
                }
                ActorEvent::SprungOn(target) => {
                    // The target may already have had its turn, so its
                    // reaction is applied right away
                    let reaction = self.get_mut(target).map(|actor| {
                        actor.spring_off_head();
                        actor.take_events()
                    });
                    if let Some(reaction) = reaction {
                        self.apply_events(target, reaction, compositions);
                    }
                }
                ActorEvent::StoodOn(platform) => {
                    if let Some(platform) = self.get_mut(platform) {
                        platform.stood_on_by(source);
                    }
                }
                ActorEvent::CarryPassengers { passengers, delta } => {
                    for passenger in passengers {
                        if let Some(passenger) = self.get_mut(passenger) {
                            passenger.translate(delta);
                        }
                    }
                }
                event if event.is_composition() => compositions.push((source, event)),
                _ => {}
            }
        }
    }

    /// Boarding and unboarding replace actors, so they run after everyone
    /// has moved
    fn compose(&mut self, source: ActorId, event: ActorEvent) {
        match event {
            ActorEvent::Board(vehicle_id) => {
                let (Some(vehicle_index), Some(rider_index)) =
                    (self.index_of(vehicle_id), self.index_of(source))
                else {
                    return;
                };
                if !self.actors[vehicle_index].boardable_vehicle() {
                    return;
                }

                let driven = Character::board(&self.actors[vehicle_index], self.actors[rider_index].clone());
                self.remove(source);
                self.remove(vehicle_id);
                let id = self.spawn(driven);
                info!("Actor {} now drives vehicle {}", source, id);
            }
            ActorEvent::Unboard => {
                let Some(driven) = self.remove(source) else {
                    return;
                };
                match driven.unboard() {
                    Ok((vehicle, rider)) => {
                        self.spawn(vehicle);
                        let id = self.spawn(rider);
                        info!("Vehicle {} ejected its driver as actor {}", source, id);
                    }
                    Err(driven) => {
                        self.spawn(driven);
                    }
                }
            }
            _ => {}
        }
    }

    fn remove_destroyed(&mut self) {
        let player = self.player;
        let mut player_gone = false;

        self.actors.retain(|actor| {
            let destroyed = actor.is_destroyed();
            if destroyed {
                info!("Actor {} destroyed", actor.id());
                player_gone |= Some(actor.id()) == player;
            }
            !destroyed
        });

        if player_gone {
            info!("Player destroyed");
            self.player = None;
        }
    }
}
