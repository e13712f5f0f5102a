//! Shared physics body for the player, machines and bottles
//!
//! Movement is resolved one axis at a time against the solid tiles around
//! the body: x first, then y. Each variant wraps a [`PhysicsEntity`] and runs
//! its own behaviour after the shared step.

use glam::Vec2;

use super::animation::Animation;
use super::rect::Rect;
use super::tilemap::Tilemap;
use crate::assets::AssetLibrary;
use crate::consts::{ANIM_OFFSET, GRAVITY, MAX_FALL_SPEED};
use crate::renderer::DrawList;

/// Which sides touched solid tiles during the last update
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Collisions {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl Collisions {
    pub fn wall(&self) -> bool {
        self.left || self.right
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Player,
    Machine,
    Water,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Player => "player",
            EntityKind::Machine => "machine",
            EntityKind::Water => "water",
        }
    }
}

/// Animation state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Idle,
    Run,
    Jump,
    WallSlide,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Idle => "idle",
            Action::Run => "run",
            Action::Jump => "jump",
            Action::WallSlide => "wall_slide",
        }
    }
}

#[derive(Debug, Clone)]
pub struct PhysicsEntity {
    pub kind: EntityKind,
    /// Top-left corner of the hitbox
    pub pos: Vec2,
    pub size: Vec2,
    pub velocity: Vec2,
    pub collisions: Collisions,
    pub action: Action,
    pub animation: Animation,
    pub flip: bool,
}

impl PhysicsEntity {
    /// Body playing `<kind>/idle`
    pub fn new(kind: EntityKind, pos: Vec2, size: Vec2, assets: &AssetLibrary) -> Self {
        let animation = assets.animation(&format!("{}/{}", kind.as_str(), Action::Idle.as_str()));
        Self::with_animation(kind, pos, size, animation)
    }

    pub fn with_animation(kind: EntityKind, pos: Vec2, size: Vec2, animation: Animation) -> Self {
        Self {
            kind,
            pos,
            size,
            velocity: Vec2::ZERO,
            collisions: Collisions::default(),
            action: Action::Idle,
            animation,
            flip: false,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    /// Switch animation; restarting only when the action actually changes
    pub fn set_action(&mut self, action: Action, assets: &AssetLibrary) {
        if action != self.action {
            self.action = action;
            let key = format!("{}/{}", self.kind.as_str(), action.as_str());
            self.animation = assets.animation(&key);
        }
    }

    /// One frame of movement, collision, gravity and animation
    pub fn update(&mut self, tilemap: &Tilemap, movement: Vec2) {
        self.collisions = Collisions::default();
        let frame_movement = movement + self.velocity;

        self.pos.x += frame_movement.x;
        let mut rect = self.rect();
        for tile in tilemap.physics_rects_around(self.pos) {
            if rect.overlaps(&tile) {
                if frame_movement.x > 0.0 {
                    rect.set_right(tile.left());
                    self.collisions.right = true;
                }
                if frame_movement.x < 0.0 {
                    rect.x = tile.right();
                    self.collisions.left = true;
                }
                self.pos.x = rect.x;
            }
        }

        self.pos.y += frame_movement.y;
        let mut rect = self.rect();
        for tile in tilemap.physics_rects_around(self.pos) {
            if rect.overlaps(&tile) {
                if frame_movement.y > 0.0 {
                    rect.set_bottom(tile.top());
                    self.collisions.down = true;
                }
                if frame_movement.y < 0.0 {
                    rect.y = tile.bottom();
                    self.collisions.up = true;
                }
                self.pos.y = rect.y;
            }
        }

        if movement.x > 0.0 {
            self.flip = false;
        }
        if movement.x < 0.0 {
            self.flip = true;
        }

        self.velocity.y = (self.velocity.y + GRAVITY).min(MAX_FALL_SPEED);
        if self.collisions.down || self.collisions.up {
            self.velocity.y = 0.0;
        }

        self.animation.update();
    }

    pub fn render(&self, out: &mut DrawList, offset: Vec2) {
        out.image(
            &self.animation.key,
            self.animation.current_image(),
            self.pos - offset + Vec2::from(ANIM_OFFSET),
            self.flip,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::AssetManifest;
    use crate::consts::{ENTITY_HEIGHT, ENTITY_WIDTH};
    use crate::sim::tilemap::{Tile, TileKind};
    use glam::IVec2;
    use proptest::prelude::*;

    fn assets() -> AssetLibrary {
        AssetLibrary::load(&AssetManifest::with_defaults()).unwrap()
    }

    fn body(pos: Vec2) -> PhysicsEntity {
        PhysicsEntity::new(
            EntityKind::Player,
            pos,
            Vec2::new(ENTITY_WIDTH, ENTITY_HEIGHT),
            &assets(),
        )
    }

    /// Floor along y = 4 (world y 64..80) with a wall column at x = 6
    fn arena() -> Tilemap {
        let mut map = Tilemap::new(16);
        for x in -4..12 {
            map.set(IVec2::new(x, 4), Tile { kind: TileKind::Grass, variant: 1 });
        }
        for y in 0..4 {
            map.set(IVec2::new(6, y), Tile { kind: TileKind::Stone, variant: 0 });
        }
        map
    }

    #[test]
    fn test_gravity_accumulates_to_cap() {
        let map = Tilemap::new(16);
        let mut e = body(Vec2::ZERO);
        let mut prev = e.velocity.y;
        for _ in 0..49 {
            e.update(&map, Vec2::ZERO);
            assert!((e.velocity.y - prev - 0.1).abs() < 1e-4);
            prev = e.velocity.y;
        }
        for _ in 0..20 {
            e.update(&map, Vec2::ZERO);
        }
        assert_eq!(e.velocity.y, 5.0);
        assert!(!e.collisions.down);
    }

    #[test]
    fn test_landing_zeroes_fall_speed() {
        let map = arena();
        let mut e = body(Vec2::new(20.0, 20.0));
        e.velocity.y = 4.0;
        let mut landed = false;
        for _ in 0..40 {
            e.update(&map, Vec2::ZERO);
            if e.collisions.down {
                landed = true;
                break;
            }
        }
        assert!(landed);
        assert_eq!(e.velocity.y, 0.0);
        assert_eq!(e.rect().bottom(), 64.0);
    }

    #[test]
    fn test_wall_clamps_position_not_velocity() {
        let map = arena();
        let mut e = body(Vec2::new(80.0, 49.0));
        e.velocity.x = 3.0;
        for _ in 0..5 {
            e.update(&map, Vec2::new(1.0, 0.0));
        }
        assert!(e.collisions.right);
        assert_eq!(e.rect().right(), 96.0);
        assert_eq!(e.velocity.x, 3.0);
        assert!(!e.flip);
    }

    #[test]
    fn test_ceiling_sets_up_flag() {
        let mut map = Tilemap::new(16);
        map.set(IVec2::new(0, 0), Tile { kind: TileKind::Stone, variant: 0 });
        let mut e = body(Vec2::new(2.0, 18.0));
        e.velocity.y = -3.0;
        e.update(&map, Vec2::ZERO);
        assert!(e.collisions.up);
        assert_eq!(e.pos.y, 16.0);
        assert_eq!(e.velocity.y, 0.0);
    }

    #[test]
    fn test_facing_follows_intent() {
        let map = Tilemap::new(16);
        let mut e = body(Vec2::ZERO);
        e.update(&map, Vec2::new(-1.0, 0.0));
        assert!(e.flip);
        e.update(&map, Vec2::ZERO);
        assert!(e.flip);
        e.update(&map, Vec2::new(1.0, 0.0));
        assert!(!e.flip);
    }

    proptest! {
        #[test]
        fn prop_resolution_never_leaves_overlap(
            solids in proptest::collection::hash_set((-3i32..4, -3i32..4), 0..20),
            start in (-40.0f32..56.0, -40.0f32..56.0),
            steps in proptest::collection::vec((-1i32..=1, -9.0f32..9.0, -6.0f32..6.0), 1..60),
        ) {
            let mut map = Tilemap::new(16);
            for (x, y) in &solids {
                map.set(IVec2::new(*x, *y), Tile { kind: TileKind::Stone, variant: 0 });
            }
            let mut e = body(Vec2::new(start.0, start.1));
            let overlapping = |e: &PhysicsEntity, map: &Tilemap| {
                solids.iter().any(|(x, y)| e.rect().overlaps(&map.cell_rect(IVec2::new(*x, *y))))
            };
            prop_assume!(!overlapping(&e, &map));

            for (intent, vx, vy) in steps {
                e.velocity = Vec2::new(vx, vy.min(MAX_FALL_SPEED));
                e.update(&map, Vec2::new(intent as f32, 0.0));
                prop_assert!(!overlapping(&e, &map), "overlap at {:?}", e.pos);
            }
        }
    }
}
