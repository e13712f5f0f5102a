//! Tile grid: spatial storage, collision queries and entity extraction
//!
//! Grid tiles live in a sparse map keyed by cell coordinate; anything missing
//! is empty space. Off-grid decorations (trees, rocks) are kept in a separate
//! list in world coordinates. Both keep the order they were authored in so
//! spawner extraction is deterministic.

use std::collections::HashMap;

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::rect::Rect;
use crate::persistence::LoadError;
use crate::renderer::DrawList;

/// 3x3 neighbourhood, row-major
const NEIGHBOR_OFFSETS: [IVec2; 9] = [
    IVec2::new(-1, -1),
    IVec2::new(0, -1),
    IVec2::new(1, -1),
    IVec2::new(-1, 0),
    IVec2::new(0, 0),
    IVec2::new(1, 0),
    IVec2::new(-1, 1),
    IVec2::new(0, 1),
    IVec2::new(1, 1),
];

/// Tile kinds that may appear in a level file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TileKind {
    Grass,
    Stone,
    Decor,
    LargeDecor,
    Spawners,
    Water,
}

impl TileKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TileKind::Grass => "grass",
            TileKind::Stone => "stone",
            TileKind::Decor => "decor",
            TileKind::LargeDecor => "large_decor",
            TileKind::Spawners => "spawners",
            TileKind::Water => "water",
        }
    }

    /// Whether this kind participates in collision resolution
    pub fn is_physics(&self) -> bool {
        matches!(self, TileKind::Grass | TileKind::Stone)
    }

    /// Authoring markers are consumed at load time and never drawn
    pub fn is_marker(&self) -> bool {
        matches!(self, TileKind::Spawners | TileKind::Water)
    }
}

/// A single grid-aligned tile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    pub kind: TileKind,
    pub variant: u32,
}

/// A decoration placed at an arbitrary world position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OffgridTile {
    pub kind: TileKind,
    pub variant: u32,
    pub pos: Vec2,
}

/// Result of [`Tilemap::extract`]: a matched tile in world units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extracted {
    pub kind: TileKind,
    pub variant: u32,
    pub pos: Vec2,
}

#[derive(Debug, Clone, PartialEq)]
struct GridCell {
    tile: Tile,
    /// Authoring order, used for stable iteration
    order: u32,
}

/// On-disk tile record (`{"type": ..., "variant": ..., "pos": [x, y]}`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TileRecord {
    #[serde(rename = "type")]
    pub kind: TileKind,
    pub variant: u32,
    pub pos: [f32; 2],
}

/// On-disk level layout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TilemapFile {
    /// Cell key ("x;y") to tile record, in authoring order
    pub tilemap: Map<String, Value>,
    pub tile_size: i64,
    #[serde(default)]
    pub offgrid: Vec<TileRecord>,
}

/// Sparse tile grid plus off-grid decorations
#[derive(Debug, Clone, PartialEq)]
pub struct Tilemap {
    tile_size: i32,
    grid: HashMap<IVec2, GridCell>,
    offgrid: Vec<OffgridTile>,
    next_order: u32,
}

/// Parse "x;y" (or "x,y") into a cell coordinate
fn parse_cell_key(key: &str) -> Result<IVec2, LoadError> {
    let mut parts = key.split([';', ',']);
    let (Some(x), Some(y), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(LoadError::InvalidCellKey(key.to_string()));
    };
    let x = x.trim().parse::<i32>().map_err(|_| LoadError::InvalidCellKey(key.to_string()))?;
    let y = y.trim().parse::<i32>().map_err(|_| LoadError::InvalidCellKey(key.to_string()))?;
    Ok(IVec2::new(x, y))
}

impl Tilemap {
    pub fn new(tile_size: i32) -> Self {
        Self {
            tile_size,
            grid: HashMap::new(),
            offgrid: Vec::new(),
            next_order: 0,
        }
    }

    /// Parse a level from its JSON text; `origin` names the source in errors
    pub fn from_json(origin: &str, text: &str) -> Result<Self, LoadError> {
        let file: TilemapFile = serde_json::from_str(text).map_err(|source| LoadError::Parse {
            path: origin.to_string(),
            source,
        })?;
        Self::from_file(origin, file)
    }

    /// Validate and index a parsed level file
    pub fn from_file(origin: &str, file: TilemapFile) -> Result<Self, LoadError> {
        if file.tile_size <= 0 || file.tile_size > i64::from(i32::MAX) {
            return Err(LoadError::InvalidTileSize(file.tile_size));
        }
        let mut map = Self::new(file.tile_size as i32);

        for (key, value) in file.tilemap {
            let cell = parse_cell_key(&key)?;
            let record: TileRecord =
                serde_json::from_value(value).map_err(|source| LoadError::Parse {
                    path: format!("{origin} [{key}]"),
                    source,
                })?;
            if record.pos[0] != cell.x as f32 || record.pos[1] != cell.y as f32 {
                return Err(LoadError::CellMismatch {
                    key,
                    pos: record.pos,
                });
            }
            map.set(cell, Tile {
                kind: record.kind,
                variant: record.variant,
            });
        }

        map.offgrid = file
            .offgrid
            .into_iter()
            .map(|r| OffgridTile {
                kind: r.kind,
                variant: r.variant,
                pos: Vec2::new(r.pos[0], r.pos[1]),
            })
            .collect();

        Ok(map)
    }

    /// Serialize back into the on-disk layout, preserving authoring order
    pub fn to_file(&self) -> TilemapFile {
        let mut cells: Vec<(&IVec2, &GridCell)> = self.grid.iter().collect();
        cells.sort_by_key(|(_, cell)| cell.order);

        let mut tilemap = Map::new();
        for (loc, cell) in cells {
            let record = TileRecord {
                kind: cell.tile.kind,
                variant: cell.tile.variant,
                pos: [loc.x as f32, loc.y as f32],
            };
            // TileRecord only holds plain data, so this cannot fail
            if let Ok(value) = serde_json::to_value(record) {
                tilemap.insert(format!("{};{}", loc.x, loc.y), value);
            }
        }

        TilemapFile {
            tilemap,
            tile_size: i64::from(self.tile_size),
            offgrid: self
                .offgrid
                .iter()
                .map(|t| TileRecord {
                    kind: t.kind,
                    variant: t.variant,
                    pos: [t.pos.x, t.pos.y],
                })
                .collect(),
        }
    }

    pub fn tile_size(&self) -> i32 {
        self.tile_size
    }

    /// Place a tile, replacing whatever occupied the cell
    pub fn set(&mut self, cell: IVec2, tile: Tile) {
        let order = match self.grid.get(&cell) {
            Some(existing) => existing.order,
            None => {
                self.next_order += 1;
                self.next_order
            }
        };
        self.grid.insert(cell, GridCell { tile, order });
    }

    pub fn get(&self, cell: IVec2) -> Option<&Tile> {
        self.grid.get(&cell).map(|c| &c.tile)
    }

    /// Number of on-grid tiles; off-grid decor is counted by [`Self::offgrid`]
    pub fn cell_count(&self) -> usize {
        self.grid.len()
    }

    pub fn offgrid(&self) -> &[OffgridTile] {
        &self.offgrid
    }

    /// Grid cell containing a world position
    pub fn cell_at(&self, pos: Vec2) -> IVec2 {
        let ts = self.tile_size as f32;
        IVec2::new((pos.x / ts).floor() as i32, (pos.y / ts).floor() as i32)
    }

    /// World-space rect of a grid cell
    pub fn cell_rect(&self, cell: IVec2) -> Rect {
        let ts = self.tile_size as f32;
        Rect::new(cell.x as f32 * ts, cell.y as f32 * ts, ts, ts)
    }

    /// Tiles in the 3x3 neighbourhood of the cell containing `pos`
    pub fn tiles_around(&self, pos: Vec2) -> impl Iterator<Item = (IVec2, &Tile)> + '_ {
        let center = self.cell_at(pos);
        NEIGHBOR_OFFSETS.iter().filter_map(move |offset| {
            let cell = center + *offset;
            self.get(cell).map(|tile| (cell, tile))
        })
    }

    /// Bounding rects of the solid tiles around `pos`
    pub fn physics_rects_around(&self, pos: Vec2) -> impl Iterator<Item = Rect> + '_ {
        self.tiles_around(pos)
            .filter(|(_, tile)| tile.kind.is_physics())
            .map(|(cell, _)| self.cell_rect(cell))
    }

    /// Point check against solid tiles (used by projectiles)
    pub fn solid_check(&self, pos: Vec2) -> bool {
        self.get(self.cell_at(pos)).is_some_and(|tile| tile.kind.is_physics())
    }

    /// Pull every tile matching one of `ids` out of the map.
    ///
    /// Off-grid entries come first, then grid cells in authoring order. With
    /// `keep` the source is left untouched.
    pub fn extract(&mut self, ids: &[(TileKind, u32)], keep: bool) -> Vec<Extracted> {
        let wanted = |kind: TileKind, variant: u32| ids.contains(&(kind, variant));
        let mut matches = Vec::new();

        for tile in &self.offgrid {
            if wanted(tile.kind, tile.variant) {
                matches.push(Extracted {
                    kind: tile.kind,
                    variant: tile.variant,
                    pos: tile.pos,
                });
            }
        }
        if !keep {
            self.offgrid.retain(|t| !wanted(t.kind, t.variant));
        }

        let mut cells: Vec<(IVec2, u32, Tile)> = self
            .grid
            .iter()
            .filter(|(_, cell)| wanted(cell.tile.kind, cell.tile.variant))
            .map(|(loc, cell)| (*loc, cell.order, cell.tile))
            .collect();
        cells.sort_by_key(|(_, order, _)| *order);

        let ts = self.tile_size as f32;
        for (loc, _, tile) in cells {
            matches.push(Extracted {
                kind: tile.kind,
                variant: tile.variant,
                pos: loc.as_vec2() * ts,
            });
            if !keep {
                self.grid.remove(&loc);
            }
        }

        matches
    }

    /// Queue draw commands for decorations and tiles near the viewport
    pub fn render(&self, out: &mut DrawList, offset: Vec2, view_size: Vec2) {
        let ts = self.tile_size as f32;
        // One tile of padding on every side
        let min = ((offset / ts).floor() - Vec2::ONE).as_ivec2();
        let max = (((offset + view_size) / ts).floor() + Vec2::ONE).as_ivec2();

        for tile in &self.offgrid {
            let cell = self.cell_at(tile.pos);
            if cell.cmpge(min).all() && cell.cmple(max).all() {
                out.image(tile.kind.as_str(), tile.variant as usize, tile.pos - offset, false);
            }
        }

        for x in min.x..=max.x {
            for y in min.y..=max.y {
                let cell = IVec2::new(x, y);
                if let Some(tile) = self.get(cell) {
                    if tile.kind.is_marker() {
                        continue;
                    }
                    out.image(
                        tile.kind.as_str(),
                        tile.variant as usize,
                        cell.as_vec2() * ts - offset,
                        false,
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::DrawCmd;
    use proptest::prelude::*;

    const LEVEL: &str = r#"{
        "tilemap": {
            "0;0": {"type": "spawners", "variant": 0, "pos": [0, 0]},
            "1;0": {"type": "spawners", "variant": 1, "pos": [1, 0]},
            "2;0": {"type": "spawners", "variant": 1, "pos": [2, 0]},
            "0;2": {"type": "grass", "variant": 1, "pos": [0, 2]},
            "1;2": {"type": "stone", "variant": 0, "pos": [1, 2]},
            "2;2": {"type": "decor", "variant": 3, "pos": [2, 2]}
        },
        "tile_size": 16,
        "offgrid": [
            {"type": "large_decor", "variant": 2, "pos": [40.0, 12.5]},
            {"type": "decor", "variant": 0, "pos": [-30.0, 8.0]}
        ]
    }"#;

    fn level() -> Tilemap {
        Tilemap::from_json("test", LEVEL).unwrap()
    }

    #[test]
    fn test_load_indexes_grid_and_offgrid() {
        let mut map = level();
        assert_eq!(map.tile_size(), 16);
        assert_eq!(map.cell_count(), 6);
        assert_eq!(map.offgrid().len(), 2);
        assert_eq!(
            map.get(IVec2::new(1, 2)),
            Some(&Tile {
                kind: TileKind::Stone,
                variant: 0
            })
        );

        // Off-grid decor is tracked apart from the cell count
        let trees = map.extract(&[(TileKind::LargeDecor, 2)], false);
        assert_eq!(trees.len(), 1);
        assert_eq!(map.cell_count(), 6);
        assert_eq!(map.offgrid().len(), 1);
    }

    #[test]
    fn test_spawner_extraction_scenario() {
        let mut map = level();
        let spawners = map.extract(&[(TileKind::Spawners, 0), (TileKind::Spawners, 1)], false);
        let positions: Vec<(u32, Vec2)> = spawners.iter().map(|s| (s.variant, s.pos)).collect();
        assert_eq!(
            positions,
            vec![
                (0, Vec2::new(0.0, 0.0)),
                (1, Vec2::new(16.0, 0.0)),
                (1, Vec2::new(32.0, 0.0)),
            ]
        );
        assert!(map.get(IVec2::new(0, 0)).is_none());
        assert!(map.extract(&[(TileKind::Spawners, 0), (TileKind::Spawners, 1)], false).is_empty());
    }

    #[test]
    fn test_extract_keep_leaves_source() {
        let mut map = level();
        let before = map.clone();
        let trees = map.extract(&[(TileKind::LargeDecor, 2)], true);
        assert_eq!(trees.len(), 1);
        assert_eq!(trees[0].pos, Vec2::new(40.0, 12.5));
        assert_eq!(map, before);
    }

    #[test]
    fn test_solid_check_only_physics_kinds() {
        let map = level();
        assert!(map.solid_check(Vec2::new(5.0, 40.0)));
        assert!(map.solid_check(Vec2::new(31.9, 47.9)));
        assert!(!map.solid_check(Vec2::new(40.0, 40.0))); // decor
        assert!(!map.solid_check(Vec2::new(5.0, 20.0))); // empty
        assert!(!map.solid_check(Vec2::new(-1.0, 40.0)));
    }

    #[test]
    fn test_physics_rects_around() {
        let map = level();
        let rects: Vec<Rect> = map.physics_rects_around(Vec2::new(10.0, 20.0)).collect();
        assert_eq!(rects.len(), 2);
        assert!(rects.contains(&Rect::new(0.0, 32.0, 16.0, 16.0)));
        assert!(rects.contains(&Rect::new(16.0, 32.0, 16.0, 16.0)));
        // Negative coordinates floor into the neighbouring cell: (-1, 1) sees
        // the spawner at (0, 0) and the grass at (0, 2) only
        assert_eq!(map.tiles_around(Vec2::new(-0.5, 20.0)).count(), 2);
    }

    #[test]
    fn test_malformed_levels_fail_fast() {
        let missing_size = r#"{"tilemap": {}, "offgrid": []}"#;
        assert!(matches!(
            Tilemap::from_json("x", missing_size),
            Err(LoadError::Parse { .. })
        ));

        let bad_key = r#"{"tilemap": {"a;1": {"type": "grass", "variant": 0, "pos": [0, 1]}}, "tile_size": 16}"#;
        assert!(matches!(
            Tilemap::from_json("x", bad_key),
            Err(LoadError::InvalidCellKey(_))
        ));

        let unknown_kind = r#"{"tilemap": {"0;1": {"type": "lava", "variant": 0, "pos": [0, 1]}}, "tile_size": 16}"#;
        assert!(matches!(
            Tilemap::from_json("x", unknown_kind),
            Err(LoadError::Parse { .. })
        ));

        let zero = r#"{"tilemap": {}, "tile_size": 0}"#;
        assert!(matches!(
            Tilemap::from_json("x", zero),
            Err(LoadError::InvalidTileSize(0))
        ));
    }

    #[test]
    fn test_comma_keys_accepted() {
        let text = r#"{"tilemap": {"3,4": {"type": "stone", "variant": 0, "pos": [3, 4]}}, "tile_size": 16}"#;
        let map = Tilemap::from_json("x", text).unwrap();
        assert!(map.solid_check(Vec2::new(50.0, 70.0)));
    }

    #[test]
    fn test_file_round_trip() {
        let map = level();
        let text = serde_json::to_string(&map.to_file()).unwrap();
        let reloaded = Tilemap::from_json("round-trip", &text).unwrap();
        let keys = |m: &Tilemap| m.to_file().tilemap.keys().cloned().collect::<Vec<_>>();
        assert_eq!(keys(&map), keys(&reloaded));
        assert_eq!(reloaded.cell_count(), map.cell_count());
        assert_eq!(reloaded.offgrid(), map.offgrid());
        for (key, _) in map.to_file().tilemap {
            let cell = parse_cell_key(&key).unwrap();
            assert_eq!(map.get(cell), reloaded.get(cell));
        }
    }

    #[test]
    fn test_render_culls_and_skips_markers() {
        let mut map = Tilemap::new(16);
        map.set(IVec2::new(0, 0), Tile { kind: TileKind::Grass, variant: 0 });
        map.set(IVec2::new(100, 0), Tile { kind: TileKind::Grass, variant: 0 });
        map.set(IVec2::new(1, 0), Tile { kind: TileKind::Spawners, variant: 0 });
        let mut out = DrawList::default();
        map.render(&mut out, Vec2::ZERO, Vec2::new(320.0, 240.0));
        let images: Vec<_> = out
            .commands()
            .iter()
            .filter(|c| matches!(c, DrawCmd::Image { .. }))
            .collect();
        assert_eq!(images.len(), 1);
    }

    proptest! {
        #[test]
        fn prop_extract_never_repeats(
            cells in proptest::collection::hash_set((-8i32..8, -8i32..8), 0..40),
        ) {
            let mut map = Tilemap::new(16);
            for (i, (x, y)) in cells.iter().enumerate() {
                let variant = (i % 2) as u32;
                map.set(IVec2::new(*x, *y), Tile { kind: TileKind::Spawners, variant });
            }
            let first = map.extract(&[(TileKind::Spawners, 0)], false);
            let second = map.extract(&[(TileKind::Spawners, 0), (TileKind::Spawners, 1)], false);
            for a in &first {
                prop_assert!(!second.iter().any(|b| b.pos == a.pos));
            }
            prop_assert_eq!(first.len() + second.len(), cells.len());
            prop_assert_eq!(map.cell_count(), 0);
            prop_assert!(map.offgrid().is_empty());
        }
    }
}
