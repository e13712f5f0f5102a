//! Animated particles: leaves drifting from trees, dash and impact dust

use glam::Vec2;

use super::animation::Animation;
use crate::assets::AssetLibrary;
use crate::renderer::DrawList;

/// Particle types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleKind {
    Leaf,
    Particle,
}

impl ParticleKind {
    pub fn animation_key(&self) -> &'static str {
        match self {
            ParticleKind::Leaf => "particle/leaf",
            ParticleKind::Particle => "particle/particle",
        }
    }
}

/// A particle for visual effects
#[derive(Debug, Clone)]
pub struct Particle {
    pub kind: ParticleKind,
    pub pos: Vec2,
    pub velocity: Vec2,
    pub animation: Animation,
}

impl Particle {
    /// Spawn with the animation already advanced to `frame`
    pub fn new(
        kind: ParticleKind,
        pos: Vec2,
        velocity: Vec2,
        frame: u32,
        assets: &AssetLibrary,
    ) -> Self {
        let mut animation = assets.animation(kind.animation_key());
        animation.frame = frame;
        Self {
            kind,
            pos,
            velocity,
            animation,
        }
    }

    /// Integrate and animate. Returns true once the animation has finished;
    /// the finishing frame itself is still drawn.
    pub fn update(&mut self) -> bool {
        let kill = self.animation.done;
        self.pos += self.velocity;
        self.animation.update();
        kill
    }

    /// Sideways sway applied to leaves on top of normal integration
    pub fn leaf_drift(&mut self) {
        if self.kind == ParticleKind::Leaf {
            self.pos.x += (self.animation.frame as f32 * 0.035).sin() * 0.3;
        }
    }

    pub fn render(&self, out: &mut DrawList, offset: Vec2) {
        out.image_centered(&self.animation.key, self.animation.current_image(), self.pos - offset);
    }
}
