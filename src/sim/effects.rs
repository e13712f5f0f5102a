//! Transient visual effects owned by a level: particles and sparks
//!
//! Nothing here collides or affects gameplay.

use std::f32::consts::{PI, TAU};

use glam::Vec2;
use rand::Rng;

use super::particle::{Particle, ParticleKind};
use super::spark::Spark;
use crate::assets::AssetLibrary;
use crate::renderer::DrawList;
use crate::renderer::shapes::direction;

/// Sparks and particles thrown by a death or a destroyed machine
pub const IMPACT_COUNT: usize = 30;
/// Dust particles thrown at the start and end of a dash burst
pub const DASH_DUST_COUNT: usize = 20;

#[derive(Debug, Clone, Default)]
pub struct Effects {
    pub particles: Vec<Particle>,
    pub sparks: Vec<Spark>,
}

impl Effects {
    /// Ring of slow dust around `center`
    pub fn radial_dust(
        &mut self,
        center: Vec2,
        count: usize,
        assets: &AssetLibrary,
        rng: &mut impl Rng,
    ) {
        for _ in 0..count {
            let angle = rng.random::<f32>() * TAU;
            let speed = rng.random::<f32>() * 0.5 + 0.5;
            let frame = rng.random_range(0..=7);
            self.particles.push(Particle::new(
                ParticleKind::Particle,
                center,
                direction(angle) * speed,
                frame,
                assets,
            ));
        }
    }

    /// Explosion: sparks fly out, dust flies the opposite way
    pub fn impact_burst(&mut self, center: Vec2, assets: &AssetLibrary, rng: &mut impl Rng) {
        for _ in 0..IMPACT_COUNT {
            let angle = rng.random::<f32>() * TAU;
            let speed = rng.random::<f32>() * 5.0;
            self.sparks.push(Spark::new(center, angle, 2.0 + rng.random::<f32>()));
            let frame = rng.random_range(0..=7);
            self.particles.push(Particle::new(
                ParticleKind::Particle,
                center,
                direction(angle + PI) * speed * 0.5,
                frame,
                assets,
            ));
        }
    }

    /// `count` sparks fanned +-0.5 rad around `heading`
    pub fn spray_sparks(&mut self, pos: Vec2, heading: f32, count: usize, rng: &mut impl Rng) {
        for _ in 0..count {
            let angle = rng.random::<f32>() - 0.5 + heading;
            self.sparks.push(Spark::new(pos, angle, 2.0 + rng.random::<f32>()));
        }
    }

    /// Advance, draw and cull everything in one pass per list
    pub fn update_and_render(&mut self, out: &mut DrawList, offset: Vec2) {
        self.particles.retain_mut(|particle| {
            let kill = particle.update();
            particle.render(out, offset);
            particle.leaf_drift();
            !kill
        });
        self.sparks.retain_mut(|spark| {
            let kill = spark.update();
            spark.render(out, offset);
            !kill
        });
    }
}
