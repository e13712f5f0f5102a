//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be deterministic:
//! - Fixed timestep only (one tick per frame)
//! - Seeded RNG only
//! - Stable iteration order (entity lists are vectors, tiles are visited by
//!   cell coordinate or load order)
//! - No platform dependencies; output is a draw list, never pixels

pub mod animation;
pub mod clouds;
pub mod effects;
pub mod entity;
pub mod machine;
pub mod particle;
pub mod player;
pub mod rect;
pub mod soda;
pub mod spark;
pub mod state;
pub mod tick;
pub mod tilemap;
pub mod water;

#[cfg(test)]
pub(crate) mod test_levels;

pub use animation::Animation;
pub use clouds::{Cloud, Clouds};
pub use effects::Effects;
pub use entity::{Action, Collisions, EntityKind, PhysicsEntity};
pub use machine::Machine;
pub use particle::{Particle, ParticleKind};
pub use player::{Player, PlayerUpdate};
pub use rect::Rect;
pub use soda::{Soda, SodaOutcome};
pub use spark::Spark;
pub use state::{GamePhase, GameState, LevelState, RunState};
pub use tick::{TickInput, tick};
pub use tilemap::{Extracted, OffgridTile, Tile, TileKind, Tilemap, TilemapFile};
