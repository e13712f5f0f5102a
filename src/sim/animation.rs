//! Frame-cycling image sequence player
//!
//! Animations only track which image of a sequence is current; the images
//! themselves stay with the asset provider and are referenced by key.

use serde::{Deserialize, Serialize};

/// A playing image sequence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Animation {
    /// Asset key of the image sequence
    pub key: String,
    /// Number of images in the sequence (always >= 1)
    pub image_count: usize,
    /// Frames each image stays on screen
    pub image_duration: u32,
    pub looping: bool,
    /// Monotonic frame counter
    pub frame: u32,
    pub done: bool,
}

impl Animation {
    pub fn new(
        key: impl Into<String>,
        image_count: usize,
        image_duration: u32,
        looping: bool,
    ) -> Self {
        Self {
            key: key.into(),
            image_count: image_count.max(1),
            image_duration: image_duration.max(1),
            looping,
            frame: 0,
            done: false,
        }
    }

    /// Fresh, independent copy of the same sequence with the counter rewound
    pub fn copy(&self) -> Self {
        Self::new(self.key.clone(), self.image_count, self.image_duration, self.looping)
    }

    /// Total frames in one pass of the sequence
    fn span(&self) -> u32 {
        self.image_duration * self.image_count as u32
    }

    /// Advance by one frame
    pub fn update(&mut self) {
        let span = self.span();
        if self.looping {
            self.frame = (self.frame + 1) % span;
        } else {
            self.frame = (self.frame + 1).min(span - 1);
            if self.frame >= span - 1 {
                self.done = true;
            }
        }
    }

    /// Index of the image to draw this frame
    pub fn current_image(&self) -> usize {
        ((self.frame / self.image_duration) as usize).min(self.image_count - 1)
    }
}
