//! Hidratate - a tile-based side-scrolling platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, tile collisions, effects, frame tick)
//! - `renderer`: Draw-command composition for the presentation surface
//! - `platform`: Input events and frame pacing
//! - `persistence`: Level store (tilemap JSON files)
//! - `assets`: Asset provider and validated animation library
//! - `audio`: Sound cues and the audio sink seam

pub mod assets;
pub mod audio;
pub mod game;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use game::{Game, GameError};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation rate (one tick per presented frame)
    pub const FRAME_RATE: u32 = 60;
    /// Most ticks run to catch up after a slow host frame
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Low-resolution composition buffer
    pub const DISPLAY_WIDTH: f32 = 320.0;
    pub const DISPLAY_HEIGHT: f32 = 240.0;

    /// Entity hitbox shared by the player, machines and bottles
    pub const ENTITY_WIDTH: f32 = 8.0;
    pub const ENTITY_HEIGHT: f32 = 15.0;
    /// Sprite draw offset relative to the hitbox
    pub const ANIM_OFFSET: (f32, f32) = (-3.0, -3.0);

    /// Gravity per frame and terminal fall speed
    pub const GRAVITY: f32 = 0.1;
    pub const MAX_FALL_SPEED: f32 = 5.0;
    /// Residual horizontal velocity decay per frame
    pub const AIR_FRICTION: f32 = 0.1;

    /// Camera easing divisor (higher = lazier camera)
    pub const CAMERA_EASE: f32 = 30.0;

    /// Total liters split across a level's bottles
    pub const DEFAULT_LITERS: f64 = 3000.0;
}
