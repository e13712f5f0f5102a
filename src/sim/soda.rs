//! Soda projectiles fired by machines

use std::f32::consts::PI;

use glam::Vec2;
use rand::Rng;

use super::effects::Effects;
use super::player::Player;
use super::tilemap::Tilemap;
use crate::renderer::DrawList;

/// Horizontal speed in pixels per frame
pub const SODA_SPEED: f32 = 1.5;
/// Frames a soda may fly before it fizzles out
pub const SODA_LIFETIME: u32 = 360;
/// Sparks thrown when a soda bursts against terrain
pub const TERRAIN_SPARKS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Soda {
    /// Center of the can
    pub pos: Vec2,
    /// +1 flies right, -1 flies left
    pub direction: f32,
    /// Frames since it was fired
    pub age: u32,
}

/// How a soda's frame ended; the outcomes are mutually exclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SodaOutcome {
    Flying,
    HitTerrain,
    Expired,
    HitPlayer,
}

impl SodaOutcome {
    /// Everything except `Flying` removes the soda
    pub fn is_spent(&self) -> bool {
        !matches!(self, SodaOutcome::Flying)
    }
}

impl Soda {
    pub fn new(pos: Vec2, direction: f32) -> Self {
        Self {
            pos,
            direction: direction.signum(),
            age: 0,
        }
    }

    pub fn advance(&mut self) {
        self.pos.x += self.direction * SODA_SPEED;
        self.age += 1;
    }

    /// Checks run in priority order: terrain, lifetime, player.
    /// A terrain hit sprays sparks back the way the soda came.
    pub fn resolve(
        &self,
        tilemap: &Tilemap,
        player: Option<&Player>,
        fx: &mut Effects,
        rng: &mut impl Rng,
    ) -> SodaOutcome {
        if tilemap.solid_check(self.pos) {
            let heading = if self.direction > 0.0 { PI } else { 0.0 };
            fx.spray_sparks(self.pos, heading, TERRAIN_SPARKS, rng);
            return SodaOutcome::HitTerrain;
        }
        if self.age > SODA_LIFETIME {
            return SodaOutcome::Expired;
        }
        match player {
            Some(player)
                if player.is_vulnerable() && player.body.rect().contains_point(self.pos) =>
            {
                SodaOutcome::HitPlayer
            }
            _ => SodaOutcome::Flying,
        }
    }

    pub fn render(&self, out: &mut DrawList, offset: Vec2) {
        out.image_centered("soda", 0, self.pos - offset);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{AssetLibrary, AssetManifest};
    use crate::sim::tilemap::{Tile, TileKind};
    use glam::IVec2;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn assets() -> AssetLibrary {
        AssetLibrary::load(&AssetManifest::with_defaults()).unwrap()
    }

    #[test]
    fn test_terrain_hit_within_one_frame() {
        let mut map = Tilemap::new(16);
        map.set(IVec2::new(2, 0), Tile { kind: TileKind::Stone, variant: 0 });
        let mut fx = Effects::default();
        let mut rng = Pcg32::seed_from_u64(3);

        // Flying right along y = 8 from x = 20; the tile starts at x = 32
        let mut soda = Soda::new(Vec2::new(20.0, 8.0), 1.0);
        let mut frames = 0;
        loop {
            soda.advance();
            frames += 1;
            let outcome = soda.resolve(&map, None, &mut fx, &mut rng);
            if soda.pos.x < 32.0 {
                assert_eq!(outcome, SodaOutcome::Flying);
                assert!(fx.sparks.is_empty());
            } else {
                assert_eq!(outcome, SodaOutcome::HitTerrain);
                break;
            }
            assert!(frames < 20);
        }
        assert_eq!(fx.sparks.len(), TERRAIN_SPARKS);
        for spark in &fx.sparks {
            // Thrown back to the left
            assert!((spark.angle - PI).abs() <= 0.5);
        }
    }

    #[test]
    fn test_lifetime_expiry() {
        let map = Tilemap::new(16);
        let mut fx = Effects::default();
        let mut rng = Pcg32::seed_from_u64(4);
        let mut soda = Soda::new(Vec2::ZERO, -1.0);
        for _ in 0..SODA_LIFETIME {
            soda.advance();
            assert_eq!(soda.resolve(&map, None, &mut fx, &mut rng), SodaOutcome::Flying);
        }
        soda.advance();
        assert_eq!(soda.resolve(&map, None, &mut fx, &mut rng), SodaOutcome::Expired);
        assert!(fx.sparks.is_empty());
    }

    #[test]
    fn test_player_hit_respects_dash() {
        let assets = assets();
        let map = Tilemap::new(16);
        let mut fx = Effects::default();
        let mut rng = Pcg32::seed_from_u64(5);
        let mut player = Player::new(Vec2::new(10.0, 0.0), &assets);
        let soda = Soda::new(Vec2::new(12.0, 5.0), 1.0);

        assert_eq!(soda.resolve(&map, Some(&player), &mut fx, &mut rng), SodaOutcome::HitPlayer);

        player.dashing = 55;
        assert_eq!(soda.resolve(&map, Some(&player), &mut fx, &mut rng), SodaOutcome::Flying);
        player.dashing = -50;
        assert_eq!(soda.resolve(&map, Some(&player), &mut fx, &mut rng), SodaOutcome::Flying);
        player.dashing = 49;
        assert_eq!(soda.resolve(&map, Some(&player), &mut fx, &mut rng), SodaOutcome::HitPlayer);
    }

    #[test]
    fn test_terrain_takes_priority_over_player() {
        let assets = assets();
        let mut map = Tilemap::new(16);
        map.set(IVec2::new(0, 0), Tile { kind: TileKind::Grass, variant: 0 });
        let mut fx = Effects::default();
        let mut rng = Pcg32::seed_from_u64(6);
        let player = Player::new(Vec2::new(2.0, 0.0), &assets);
        let soda = Soda::new(Vec2::new(4.0, 4.0), -1.0);
        assert_eq!(soda.resolve(&map, Some(&player), &mut fx, &mut rng), SodaOutcome::HitTerrain);
        assert!(SodaOutcome::HitTerrain.is_spent());
        assert!(!SodaOutcome::Flying.is_spent());
    }
}
