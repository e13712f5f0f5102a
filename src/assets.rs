//! Asset provider seam and the validated animation library
//!
//! The core never decodes images. It needs to know how many images a key
//! holds (to cycle animations) and how large they are (cloud wrapping). Every
//! key the game uses is checked once at startup; a miss is fatal.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sim::Animation;

/// Dimensions of one image in a sequence
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImageInfo {
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AssetError {
    #[error("asset {0:?} is missing")]
    Missing(String),
    #[error("asset {0:?} has no images")]
    Empty(String),
}

/// Host-side source of images, looked up by logical key
pub trait AssetProvider {
    /// Ordered image sequence for `key` (single images are length-1 sequences)
    fn images(&self, key: &str) -> Option<Vec<ImageInfo>>;
}

/// Image sequences the game needs, with their animation timing
const SEQUENCES: &[(&str, u32, bool)] = &[
    ("player/idle", 6, true),
    ("player/run", 4, true),
    ("player/jump", 5, true),
    ("player/wall_slide", 5, true),
    ("machine/idle", 6, true),
    ("particle/leaf", 20, false),
    ("particle/particle", 6, false),
];

/// Static images and tile groups the renderer references by key
const IMAGES: &[&str] = &[
    "background",
    "clouds",
    "grass",
    "stone",
    "decor",
    "large_decor",
    "soda",
    "water",
    "liters",
    "target",
    "phrases",
];

/// Validated view of the assets, built once at startup
#[derive(Debug, Clone)]
pub struct AssetLibrary {
    animations: HashMap<String, Animation>,
    images: HashMap<String, Vec<ImageInfo>>,
}

impl AssetLibrary {
    /// Resolve every required key, failing on the first miss
    pub fn load(provider: &dyn AssetProvider) -> Result<Self, AssetError> {
        let fetch = |key: &str| -> Result<Vec<ImageInfo>, AssetError> {
            let images = provider
                .images(key)
                .ok_or_else(|| AssetError::Missing(key.to_string()))?;
            if images.is_empty() {
                return Err(AssetError::Empty(key.to_string()));
            }
            Ok(images)
        };

        let mut animations = HashMap::new();
        for &(key, duration, looping) in SEQUENCES {
            let images = fetch(key)?;
            let animation = Animation::new(key, images.len(), duration, looping);
            animations.insert(key.to_string(), animation);
        }

        let mut images = HashMap::new();
        for &key in IMAGES {
            images.insert(key.to_string(), fetch(key)?);
        }

        log::info!(
            "Loaded {} animations and {} image groups",
            animations.len(),
            images.len()
        );
        Ok(Self { animations, images })
    }

    /// Fresh copy of an animation; keys are validated at load
    pub fn animation(&self, key: &str) -> Animation {
        match self.animations.get(key) {
            Some(anim) => anim.copy(),
            None => {
                log::error!("animation {key:?} requested but never loaded");
                Animation::new(key, 1, 1, true)
            }
        }
    }

    pub fn images(&self, key: &str) -> &[ImageInfo] {
        self.images.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of images in a static group (e.g. one phrase banner per level)
    pub fn image_count(&self, key: &str) -> usize {
        self.images(key).len()
    }
}

/// In-memory provider: key to image sizes, loadable from a JSON manifest
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetManifest {
    pub entries: HashMap<String, Vec<ImageInfo>>,
}

impl AssetManifest {
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn insert(&mut self, key: &str, count: usize, width: f32, height: f32) {
        self.entries
            .insert(key.to_string(), vec![ImageInfo { width, height }; count]);
    }

    /// Manifest matching the stock art set
    pub fn with_defaults() -> Self {
        let mut m = Self::default();
        m.insert("player/idle", 22, 14.0, 18.0);
        m.insert("player/run", 8, 14.0, 18.0);
        m.insert("player/jump", 1, 14.0, 18.0);
        m.insert("player/wall_slide", 1, 14.0, 18.0);
        m.insert("machine/idle", 16, 14.0, 18.0);
        m.insert("particle/leaf", 18, 5.0, 5.0);
        m.insert("particle/particle", 4, 5.0, 5.0);
        m.insert("background", 1, 320.0, 240.0);
        m.insert("clouds", 2, 48.0, 16.0);
        m.insert("grass", 9, 16.0, 16.0);
        m.insert("stone", 9, 16.0, 16.0);
        m.insert("decor", 4, 16.0, 16.0);
        m.insert("large_decor", 3, 32.0, 32.0);
        m.insert("soda", 1, 6.0, 4.0);
        m.insert("water", 1, 8.0, 15.0);
        m.insert("liters", 1, 16.0, 16.0);
        m.insert("target", 1, 16.0, 16.0);
        m.insert("phrases", 4, 320.0, 240.0);
        m
    }
}

impl AssetProvider for AssetManifest {
    fn images(&self, key: &str) -> Option<Vec<ImageInfo>> {
        self.entries.get(key).cloned()
    }
}
