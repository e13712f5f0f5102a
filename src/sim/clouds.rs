//! Parallax background clouds

use glam::Vec2;
use rand::Rng;

use crate::assets::ImageInfo;
use crate::renderer::DrawList;

/// Number of clouds in the sky
pub const CLOUD_COUNT: usize = 16;

#[derive(Debug, Clone, PartialEq)]
pub struct Cloud {
    pub pos: Vec2,
    /// Index into the cloud image group
    pub image: usize,
    pub size: ImageInfo,
    pub speed: f32,
    /// Parallax factor: 0 = pinned to screen, 1 = moves with the world
    pub depth: f32,
}

impl Cloud {
    pub fn update(&mut self) {
        self.pos.x += self.speed;
    }

    /// Screen position, wrapped so the cloud reappears on the other side
    pub fn screen_pos(&self, offset: Vec2, view_size: Vec2) -> Vec2 {
        let render = self.pos - offset * self.depth;
        Vec2::new(
            render.x.rem_euclid(view_size.x + self.size.width) - self.size.width,
            render.y.rem_euclid(view_size.y + self.size.height) - self.size.height,
        )
    }
}

#[derive(Debug, Clone, Default)]
pub struct Clouds {
    pub clouds: Vec<Cloud>,
}

impl Clouds {
    /// Scatter `count` clouds, back-most first
    pub fn new(images: &[ImageInfo], count: usize, rng: &mut impl Rng) -> Self {
        if images.is_empty() {
            return Self::default();
        }
        let mut clouds: Vec<Cloud> = (0..count)
            .map(|_| {
                let image = rng.random_range(0..images.len());
                Cloud {
                    pos: Vec2::new(rng.random::<f32>() * 99999.0, rng.random::<f32>() * 99999.0),
                    image,
                    size: images[image],
                    speed: rng.random::<f32>() * 0.05 + 0.05,
                    depth: rng.random::<f32>() * 0.6 + 0.2,
                }
            })
            .collect();
        clouds.sort_by(|a, b| a.depth.total_cmp(&b.depth));
        Self { clouds }
    }

    pub fn update(&mut self) {
        for cloud in &mut self.clouds {
            cloud.update();
        }
    }

    pub fn render(&self, out: &mut DrawList, offset: Vec2, view_size: Vec2) {
        for cloud in &self.clouds {
            out.image("clouds", cloud.image, cloud.screen_pos(offset, view_size), false);
        }
    }
}
