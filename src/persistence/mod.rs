//! Level persistence
//!
//! Features:
//! - `LevelStore` seam the simulation loads tilemaps through
//! - Directory-backed store reading `<dir>/<n>.json`
//! - In-memory store for tests and embedded levels
//! - Fail-fast validation with descriptive errors

pub mod level_store;

pub use level_store::{DirLevelStore, LevelStore, MemoryLevelStore};

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading level data
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read level file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed level data in {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("cell key {0:?} is not an \"x;y\" integer pair")]
    InvalidCellKey(String),
    #[error("cell key {key:?} does not match tile position {pos:?}")]
    CellMismatch { key: String, pos: [f32; 2] },
    #[error("tile_size must be a positive integer, got {0}")]
    InvalidTileSize(i64),
    #[error("level store contains no levels")]
    NoLevels,
    #[error("level {index} requested but only {count} available")]
    LevelOutOfRange { index: usize, count: usize },
}
