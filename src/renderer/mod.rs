//! Frame composition
//!
//! The simulation never touches pixels. Each tick it records an ordered list
//! of draw commands against the low-resolution display; a [`Presenter`]
//! rasterizes them, applies the screenshake jitter and upscales.

pub mod shapes;

use glam::Vec2;

use crate::audio::SoundEffect;

/// RGBA color, 0-255 per channel
pub type Color = [u8; 4];

/// Where an image is pinned relative to its draw position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    TopLeft,
    Center,
}

/// A single draw operation in display coordinates
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    /// Image `index` of the sequence `key`
    Image {
        key: String,
        index: usize,
        pos: Vec2,
        anchor: Anchor,
        flip: bool,
    },
    /// Image stretched over the whole display (background, banners)
    Fullscreen { key: String, index: usize },
    /// Filled convex polygon
    Polygon { points: Vec<Vec2>, color: Color },
    Text { text: String, pos: Vec2, color: Color },
}

/// Ordered draw commands for one frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawList {
    commands: Vec<DrawCmd>,
}

impl DrawList {
    pub fn image(&mut self, key: &str, index: usize, pos: Vec2, flip: bool) {
        self.commands.push(DrawCmd::Image {
            key: key.to_string(),
            index,
            pos,
            anchor: Anchor::TopLeft,
            flip,
        });
    }

    pub fn image_centered(&mut self, key: &str, index: usize, pos: Vec2) {
        self.commands.push(DrawCmd::Image {
            key: key.to_string(),
            index,
            pos,
            anchor: Anchor::Center,
            flip: false,
        });
    }

    pub fn fullscreen(&mut self, key: &str, index: usize) {
        self.commands.push(DrawCmd::Fullscreen {
            key: key.to_string(),
            index,
        });
    }

    pub fn polygon(&mut self, points: Vec<Vec2>, color: Color) {
        self.commands.push(DrawCmd::Polygon { points, color });
    }

    pub fn text(&mut self, text: impl Into<String>, pos: Vec2, color: Color) {
        self.commands.push(DrawCmd::Text {
            text: text.into(),
            pos,
            color,
        });
    }

    pub fn commands(&self) -> &[DrawCmd] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// Everything the host needs after one tick
#[derive(Debug, Clone, Default)]
pub struct Frame {
    /// Composition for the low-resolution display, back to front
    pub draw: DrawList,
    /// Pixel jitter applied to the final upscaled blit
    pub shake_offset: Vec2,
    /// Fire-and-forget sound cues raised this tick
    pub sounds: Vec<SoundEffect>,
    /// User asked to quit; the host should release display/audio and exit
    pub quit: bool,
}

/// Final upscaled present of a composed frame
pub trait Presenter {
    fn present(&mut self, frame: &Frame);
}

/// Presenter that only counts frames (headless runs)
#[derive(Debug, Default)]
pub struct HeadlessPresenter {
    pub frames: u64,
    pub last_command_count: usize,
}

impl Presenter for HeadlessPresenter {
    fn present(&mut self, frame: &Frame) {
        self.frames += 1;
        self.last_command_count = frame.draw.len();
        log::trace!(
            "frame {}: {} draw commands, shake {:?}",
            self.frames,
            self.last_command_count,
            frame.shake_offset
        );
    }
}
