//! The player: jumping, wall sliding and dashing on top of the shared body

use glam::Vec2;
use rand::Rng;

use super::effects::{DASH_DUST_COUNT, Effects};
use super::entity::{Action, EntityKind, PhysicsEntity};
use super::particle::{Particle, ParticleKind};
use super::tilemap::Tilemap;
use crate::assets::AssetLibrary;
use crate::consts::{AIR_FRICTION, ENTITY_HEIGHT, ENTITY_WIDTH};
use crate::renderer::DrawList;

/// Frames in the air before the player counts as airborne (coyote window)
pub const COYOTE_FRAMES: u32 = 4;
/// Frames in the air that count as falling out of the level
pub const FALL_DEATH_FRAMES: u32 = 120;

/// Dash timer magnitude when a dash starts
pub const DASH_FRAMES: i32 = 60;
/// While |dash timer| is above this the dash burst is active
pub const DASH_BURST_END: i32 = 50;
pub const DASH_SPEED: f32 = 8.0;

pub const JUMP_SPEED: f32 = 3.0;
pub const AIR_JUMP_SPEED: f32 = 2.5;
pub const WALL_JUMP_PUSH: f32 = 3.5;
pub const WALL_JUMP_LIFT: f32 = 2.5;
pub const WALL_SLIDE_SPEED: f32 = 0.5;

#[derive(Debug, Clone)]
pub struct Player {
    pub body: PhysicsEntity,
    /// Frames since last grounded
    pub air_time: u32,
    /// Remaining extra (air) jumps
    pub jumps: u32,
    pub wall_slide: bool,
    /// Sign is the dash direction; magnitude counts down to 0 (ready)
    pub dashing: i32,
}

/// What happened to the player this frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerUpdate {
    /// Fell for too long; the orchestrator turns this into a death
    pub fell: bool,
}

impl Player {
    pub fn new(pos: Vec2, assets: &AssetLibrary) -> Self {
        Self {
            body: PhysicsEntity::new(
                EntityKind::Player,
                pos,
                Vec2::new(ENTITY_WIDTH, ENTITY_HEIGHT),
                assets,
            ),
            air_time: 0,
            jumps: 1,
            wall_slide: false,
            dashing: 0,
        }
    }

    /// In the dash burst window (fast, invisible, immune to sodas)
    pub fn in_dash_burst(&self) -> bool {
        self.dashing.abs() > DASH_BURST_END
    }

    /// Sodas pass harmlessly through the player at the height of a dash
    pub fn is_vulnerable(&self) -> bool {
        self.dashing.abs() < DASH_BURST_END
    }

    /// Strong enough to smash a machine
    pub fn is_smashing(&self) -> bool {
        self.dashing.abs() >= DASH_BURST_END
    }

    pub fn is_grounded(&self) -> bool {
        self.air_time <= COYOTE_FRAMES
    }

    /// Put the player at a spawn point (level load / respawn)
    pub fn respawn(&mut self, pos: Vec2) {
        self.body.pos = pos;
        self.body.velocity = Vec2::ZERO;
        self.air_time = 0;
        self.dashing = 0;
        self.wall_slide = false;
    }

    pub fn update(
        &mut self,
        tilemap: &Tilemap,
        movement: Vec2,
        fx: &mut Effects,
        assets: &AssetLibrary,
        rng: &mut impl Rng,
    ) -> PlayerUpdate {
        self.body.update(tilemap, movement);

        self.air_time += 1;
        let fell = self.air_time > FALL_DEATH_FRAMES && !self.in_dash_burst();

        if self.body.collisions.down {
            self.air_time = 0;
            self.jumps = 1;
        }

        self.wall_slide = false;
        if self.body.collisions.wall() && self.air_time > COYOTE_FRAMES {
            self.wall_slide = true;
            self.body.velocity.y = self.body.velocity.y.min(WALL_SLIDE_SPEED);
            self.body.flip = self.body.collisions.left;
            self.body.set_action(Action::WallSlide, assets);
        }

        if !self.wall_slide {
            if self.air_time > COYOTE_FRAMES {
                self.body.set_action(Action::Jump, assets);
            } else if movement.x != 0.0 {
                self.body.set_action(Action::Run, assets);
            } else {
                self.body.set_action(Action::Idle, assets);
            }
        }

        let center = self.body.rect().center();
        if self.dashing.abs() == DASH_BURST_END {
            fx.radial_dust(center, DASH_DUST_COUNT, assets, rng);
        }

        if self.dashing > 0 {
            self.dashing = (self.dashing - 1).max(0);
        }
        if self.dashing < 0 {
            self.dashing = (self.dashing + 1).min(0);
        }

        if self.in_dash_burst() {
            let dir = self.dashing.signum() as f32;
            self.body.velocity.x = dir * DASH_SPEED;
            if self.dashing.abs() == DASH_BURST_END + 1 {
                self.body.velocity.x *= 0.1;
            }
            let trail = Vec2::new(dir * rng.random::<f32>() * 3.0, 0.0);
            let frame = rng.random_range(0..=7);
            fx.particles
                .push(Particle::new(ParticleKind::Particle, center, trail, frame, assets));
        }

        if self.body.velocity.x > 0.0 {
            self.body.velocity.x = (self.body.velocity.x - AIR_FRICTION).max(0.0);
        } else {
            self.body.velocity.x = (self.body.velocity.x + AIR_FRICTION).min(0.0);
        }

        PlayerUpdate { fell }
    }

    /// Try to jump; returns true if any jump happened
    pub fn jump(&mut self) -> bool {
        if self.wall_slide {
            // Flip faces the wall's open side: flipped means the wall is on the left
            self.body.velocity.x = if self.body.flip {
                WALL_JUMP_PUSH
            } else {
                -WALL_JUMP_PUSH
            };
            self.body.velocity.y = -WALL_JUMP_LIFT;
            self.air_time = COYOTE_FRAMES + 1;
            self.jumps = self.jumps.saturating_sub(1);
            return true;
        }
        if self.is_grounded() {
            self.body.velocity.y = -JUMP_SPEED;
            self.air_time = COYOTE_FRAMES + 1;
            return true;
        }
        if self.jumps > 0 {
            self.jumps -= 1;
            self.body.velocity.y = -AIR_JUMP_SPEED;
            self.air_time = COYOTE_FRAMES + 1;
            return true;
        }
        false
    }

    /// Start a dash in the facing direction; only when fully recharged
    pub fn dash(&mut self, fx: &mut Effects, assets: &AssetLibrary, rng: &mut impl Rng) -> bool {
        if self.dashing != 0 {
            return false;
        }
        self.dashing = if self.body.flip { -DASH_FRAMES } else { DASH_FRAMES };
        fx.radial_dust(self.body.rect().center(), DASH_DUST_COUNT, assets, rng);
        true
    }

    pub fn render(&self, out: &mut DrawList, offset: Vec2) {
        if !self.in_dash_burst() {
            self.body.render(out, offset);
        }
    }
}
