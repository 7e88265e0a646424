//! Animation registry: finds placed tiles and tile objects whose image is the first
//! frame of a tileset animation.
//!
//! The registry is keyed by the first frame's [`TileKey`], so detecting whether a placed
//! tile is animated is a single map lookup instead of an image comparison.

use bevy::platform::collections::HashMap;
use bevy::prelude::*;
use tiled::LayerType;

use crate::config::LevelConfig;
use crate::layers::{
    LayerFilter, collect_layers, grid_position, object_size, object_top_left,
    resolve_layer_tile, tile_image,
};
use crate::level::{AnimatedEntry, AnimatedKind, AnimationFrame, TileAtlas, TileKey};

/// An animation declared on a tileset tile.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationDef {
    /// Tile holding the animation metadata.
    pub source: TileKey,
    /// Never empty.
    pub frames: Vec<AnimationFrame>,
}

impl AnimationDef {
    fn entry(&self, position: Vec2, kind: AnimatedKind) -> AnimatedEntry {
        AnimatedEntry {
            source: self.source,
            frames: self.frames.clone(),
            position,
            kind,
            current_frame: 0,
            last_update_ms: 0,
        }
    }
}

/// Every animation in the map's tilesets, indexed by first frame.
#[derive(Debug, Clone, Default)]
pub struct AnimationRegistry {
    by_first_frame: HashMap<TileKey, Vec<AnimationDef>>,
}

impl AnimationRegistry {
    /// Collect the animations declared in `map`'s tilesets.
    ///
    /// Animations without frames are dropped.
    pub fn from_map(map: &tiled::Map) -> Self {
        let mut registry = Self::default();

        for (tileset_index, tileset) in map.tilesets().iter().enumerate() {
            for (tile_id, tile) in tileset.tiles() {
                let Some(frames) = tile.animation.as_ref() else {
                    continue;
                };
                let frames: Vec<AnimationFrame> = frames
                    .iter()
                    .map(|frame| AnimationFrame {
                        tile: TileKey::new(tileset_index, frame.tile_id),
                        duration_ms: frame.duration,
                    })
                    .collect();
                registry.register(AnimationDef {
                    source: TileKey::new(tileset_index, tile_id),
                    frames,
                });
            }
        }

        // Tileset tile iteration order is unspecified.
        for defs in registry.by_first_frame.values_mut() {
            defs.sort_by_key(|def| def.source.tile_id);
        }

        registry
    }

    /// Register an animation. Returns `false` (and registers nothing) if it has no frames.
    pub fn register(&mut self, def: AnimationDef) -> bool {
        let Some(first) = def.frames.first() else {
            return false;
        };
        self.by_first_frame.entry(first.tile).or_default().push(def);
        true
    }

    /// Animations whose first frame shows `key`.
    pub fn matching(&self, key: TileKey) -> &[AnimationDef] {
        self.by_first_frame.get(&key).map_or(&[], Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.by_first_frame.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_first_frame.is_empty()
    }

    /// Resolve the image of every frame of every registered animation.
    ///
    /// Frames whose image cannot be resolved are left out; drawing them later fails.
    pub fn build_atlas(&self, map: &tiled::Map) -> TileAtlas {
        let mut atlas = TileAtlas::default();
        let tilesets = map.tilesets();

        for frame in self
            .by_first_frame
            .values()
            .flatten()
            .flat_map(|def| def.frames.iter())
        {
            if atlas.get(frame.tile).is_some() {
                continue;
            }
            let Some(tileset) = tilesets.get(frame.tile.tileset) else {
                warn!(
                    "Animation frame references tileset index {} which doesn't exist",
                    frame.tile.tileset
                );
                continue;
            };
            match tile_image(tileset, frame.tile.tile_id) {
                Some(image) => atlas.insert(frame.tile, image),
                None => warn!(
                    "Animation frame tile {} in tileset '{}' has no image",
                    frame.tile.tile_id, tileset.name
                ),
            }
        }

        atlas
    }

    /// Animated entries for grid tiles in the configured animated layers.
    pub fn grid_entries(&self, map: &tiled::Map, config: &LevelConfig) -> Vec<AnimatedEntry> {
        let tile_size = Vec2::new(map.tile_width as f32, map.tile_height as f32) * config.zoom;
        let mut entries = Vec::new();

        for layer in collect_layers(map, LayerFilter::VisibleOnly) {
            if !config.animated_layers.contains(&layer.name) {
                continue;
            }
            let LayerType::Tiles(tile_layer) = layer.layer_type() else {
                continue;
            };
            let width = tile_layer.width().unwrap_or(0);
            let height = tile_layer.height().unwrap_or(0);

            for y in 0..height {
                for x in 0..width {
                    let Some(tile) = tile_layer.get_tile(x as i32, y as i32) else {
                        continue;
                    };
                    let key = TileKey::new(tile.tileset_index(), tile.id());
                    for def in self.matching(key) {
                        entries.push(
                            def.entry(grid_position(x, y, tile_size), AnimatedKind::GridTile),
                        );
                    }
                }
            }
        }

        entries
    }

    /// Animated entries for tile objects in every object group.
    pub fn object_entries(&self, map: &tiled::Map, config: &LevelConfig) -> Vec<AnimatedEntry> {
        let mut entries = Vec::new();

        for layer in collect_layers(map, LayerFilter::All) {
            let LayerType::Objects(object_layer) = layer.layer_type() else {
                continue;
            };
            for object in object_layer.objects() {
                let Some(resolved) = object.get_tile().as_ref().and_then(resolve_layer_tile)
                else {
                    continue;
                };
                let defs = self.matching(resolved.key);
                if defs.is_empty() {
                    continue;
                }
                let size = object_size(&object, &resolved.image);
                let position = object_top_left(&object, size, config.zoom);
                for def in defs {
                    entries.push(def.entry(position, AnimatedKind::ObjectTile { size }));
                }
            }
        }

        entries
    }
}
