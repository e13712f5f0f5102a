//! Soda machines: stationary turrets the player smashes with a dash

use std::f32::consts::PI;

use glam::Vec2;
use rand::Rng;

use super::effects::Effects;
use super::entity::{EntityKind, PhysicsEntity};
use super::player::Player;
use super::soda::Soda;
use super::spark::Spark;
use super::tilemap::Tilemap;
use crate::assets::AssetLibrary;
use crate::consts::{ENTITY_HEIGHT, ENTITY_WIDTH};
use crate::renderer::DrawList;

/// Frames between shots
pub const FIRE_INTERVAL: u32 = 90;
/// The player must be within these distances (centre to centre) to draw fire
pub const FIRE_RANGE_X: f32 = 160.0;
pub const FIRE_RANGE_Y: f32 = 16.0;
/// Sodas leave the machine this far ahead of its centre
pub const MUZZLE_OFFSET: f32 = 7.0;
const MUZZLE_SPARKS: usize = 4;

#[derive(Debug, Clone)]
pub struct Machine {
    pub body: PhysicsEntity,
    /// Frames since the last shot, saturating at the interval
    pub timer: u32,
}

impl Machine {
    pub fn new(pos: Vec2, assets: &AssetLibrary) -> Self {
        Self {
            body: PhysicsEntity::new(
                EntityKind::Machine,
                pos,
                Vec2::new(ENTITY_WIDTH, ENTITY_HEIGHT),
                assets,
            ),
            timer: 0,
        }
    }

    fn in_range(&self, player: &Player) -> bool {
        let delta = player.body.rect().center() - self.body.rect().center();
        delta.x.abs() < FIRE_RANGE_X && delta.y.abs() < FIRE_RANGE_Y
    }

    /// One frame of machine behaviour. Returns true when the player has
    /// smashed it this frame; the caller removes it.
    #[allow(clippy::too_many_arguments)]
    pub fn update(
        &mut self,
        tilemap: &Tilemap,
        movement: Vec2,
        player: Option<&Player>,
        sodas: &mut Vec<Soda>,
        fx: &mut Effects,
        assets: &AssetLibrary,
        rng: &mut impl Rng,
    ) -> bool {
        self.timer = (self.timer + 1).min(FIRE_INTERVAL);
        if let Some(player) = player {
            if self.timer >= FIRE_INTERVAL && self.in_range(player) {
                self.fire(player, sodas, fx, rng);
            }
        }

        self.body.update(tilemap, movement);

        let Some(player) = player else {
            return false;
        };
        if player.is_smashing() && self.body.rect().overlaps(&player.body.rect()) {
            let center = self.body.rect().center();
            fx.impact_burst(center, assets, rng);
            fx.sparks.push(Spark::new(center, 0.0, 5.0 + rng.random::<f32>()));
            fx.sparks.push(Spark::new(center, PI, 5.0 + rng.random::<f32>()));
            return true;
        }
        false
    }

    fn fire(
        &mut self,
        player: &Player,
        sodas: &mut Vec<Soda>,
        fx: &mut Effects,
        rng: &mut impl Rng,
    ) {
        self.timer = 0;
        let center = self.body.rect().center();
        self.body.flip = player.body.rect().center().x < center.x;
        let direction = if self.body.flip { -1.0 } else { 1.0 };
        let muzzle = center + Vec2::new(direction * MUZZLE_OFFSET, 0.0);
        sodas.push(Soda::new(muzzle, direction));
        let heading = if direction > 0.0 { 0.0 } else { PI };
        fx.spray_sparks(muzzle, heading, MUZZLE_SPARKS, rng);
        let side = if self.body.flip { "left" } else { "right" };
        log::debug!("machine at {:?} fired {side}", self.body.pos);
    }

    pub fn render(&self, out: &mut DrawList, offset: Vec2) {
        self.body.render(out, offset);
    }
}
