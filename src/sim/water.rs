//! Water bottles: collectibles worth a share of the level's liters

use glam::Vec2;

use super::animation::Animation;
use super::entity::{EntityKind, PhysicsEntity};
use super::rect::Rect;
use crate::assets::AssetLibrary;
use crate::consts::{ENTITY_HEIGHT, ENTITY_WIDTH};
use crate::renderer::DrawList;

#[derive(Debug, Clone)]
pub struct Water {
    pub body: PhysicsEntity,
    pub collected: bool,
}

impl Water {
    pub fn new(pos: Vec2, assets: &AssetLibrary) -> Self {
        let frames = assets.image_count("water").max(1);
        Self {
            body: PhysicsEntity::with_animation(
                EntityKind::Water,
                pos,
                Vec2::new(ENTITY_WIDTH, ENTITY_HEIGHT),
                Animation::new("water", frames, 1, true),
            ),
            collected: false,
        }
    }

    /// Bottles hang in place. Returns true only on the frame the player
    /// first touches the bottle.
    pub fn update(&mut self, player: Option<&Rect>) -> bool {
        if self.collected {
            return false;
        }
        self.body.animation.update();
        if player.is_some_and(|rect| rect.overlaps(&self.body.rect())) {
            self.collected = true;
            return true;
        }
        false
    }

    pub fn render(&self, out: &mut DrawList, offset: Vec2) {
        if !self.collected {
            self.body.render(out, offset);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::AssetManifest;

    #[test]
    fn test_collected_exactly_once() {
        let assets = AssetLibrary::load(&AssetManifest::with_defaults()).unwrap();
        let mut bottle = Water::new(Vec2::new(32.0, 16.0), &assets);
        let away = Rect::new(0.0, 0.0, 8.0, 15.0);
        let touching = Rect::new(36.0, 20.0, 8.0, 15.0);

        assert!(!bottle.update(Some(&away)));
        assert!(!bottle.update(None));
        assert!(bottle.update(Some(&touching)));
        assert!(!bottle.update(Some(&touching)));
        assert!(bottle.collected);

        let mut out = DrawList::default();
        bottle.render(&mut out, Vec2::ZERO);
        assert!(out.is_empty());
    }

    #[test]
    fn test_edge_contact_does_not_collect() {
        let assets = AssetLibrary::load(&AssetManifest::with_defaults()).unwrap();
        let mut bottle = Water::new(Vec2::new(32.0, 16.0), &assets);
        let flush = Rect::new(24.0, 16.0, 8.0, 15.0);
        assert!(!bottle.update(Some(&flush)));
        assert_eq!(bottle.body.pos, Vec2::new(32.0, 16.0));
    }
}
