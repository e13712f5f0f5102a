//! Level stores: where tilemaps come from

use std::fs;
use std::path::{Path, PathBuf};

use super::LoadError;
use crate::sim::Tilemap;

/// Source of level tilemaps, indexed from 0
pub trait LevelStore {
    /// Number of levels available
    fn level_count(&self) -> usize;

    /// Load a fresh copy of level `index`
    fn load(&self, index: usize) -> Result<Tilemap, LoadError>;
}

/// Levels stored as `<dir>/0.json`, `<dir>/1.json`, ...
#[derive(Debug, Clone)]
pub struct DirLevelStore {
    dir: PathBuf,
    count: usize,
}

impl DirLevelStore {
    /// Open a level directory; the level count is the number of `.json` files
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, LoadError> {
        let dir = dir.as_ref().to_path_buf();
        let entries = fs::read_dir(&dir).map_err(|source| LoadError::Io {
            path: dir.clone(),
            source,
        })?;

        let mut count = 0;
        for entry in entries {
            let entry = entry.map_err(|source| LoadError::Io {
                path: dir.clone(),
                source,
            })?;
            if entry.path().extension().is_some_and(|ext| ext == "json") {
                count += 1;
            }
        }

        if count == 0 {
            return Err(LoadError::NoLevels);
        }
        log::info!("Found {} levels in {}", count, dir.display());
        Ok(Self { dir, count })
    }

    fn path_for(&self, index: usize) -> PathBuf {
        self.dir.join(format!("{index}.json"))
    }
}

impl LevelStore for DirLevelStore {
    fn level_count(&self) -> usize {
        self.count
    }

    fn load(&self, index: usize) -> Result<Tilemap, LoadError> {
        if index >= self.count {
            return Err(LoadError::LevelOutOfRange {
                index,
                count: self.count,
            });
        }
        let path = self.path_for(index);
        let text = fs::read_to_string(&path).map_err(|source| LoadError::Io {
            path: path.clone(),
            source,
        })?;
        Tilemap::from_json(&path.display().to_string(), &text)
    }
}

/// Levels kept as JSON text in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryLevelStore {
    levels: Vec<String>,
}

impl MemoryLevelStore {
    pub fn new<I, S>(levels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            levels: levels.into_iter().map(Into::into).collect(),
        }
    }
}

impl LevelStore for MemoryLevelStore {
    fn level_count(&self) -> usize {
        self.levels.len()
    }

    fn load(&self, index: usize) -> Result<Tilemap, LoadError> {
        let text = self.levels.get(index).ok_or(LoadError::LevelOutOfRange {
            index,
            count: self.levels.len(),
        })?;
        Tilemap::from_json(&format!("level {index}"), text)
    }
}
