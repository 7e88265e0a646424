//! Level loader: turns a `.tmx` map into placed level content.
//!
//! Only layers named in the configuration's classification table are read. Passes run
//! in a fixed order because the order tiles enter the depth-sorted group is the order
//! equal-depth tiles are drawn in:
//!
//! 1. background tile layers
//! 2. decoration object groups
//! 3. vegetation tile layers
//! 4. obstacle tile layers (hidden layers included)
//! 5. key object groups
//!
//! Points of interest, upper content and animations are collected afterwards.

use std::path::{Path, PathBuf};

use bevy::prelude::*;
use thiserror::Error;
use tiled::LayerType;

use crate::animation::AnimationRegistry;
use crate::config::{ConfigError, LayerRole, LevelConfig};
use crate::layers::{
    LayerFilter, collect_layers, grid_position, object_size, object_top_left,
    resolve_layer_tile, scaled_size,
};
use crate::level::{Background, LevelData, PointOfInterest, StaticTile, TileImage, UpperTile};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to load map: {0}")]
    Tiled(#[from] tiled::Error),

    #[error("Invalid level configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Map {0:?} is infinite; only finite maps can be loaded as a level")]
    InfiniteMap(PathBuf),

    #[error("Layer '{0}' has no tile grid")]
    MissingLayerData(String),
}

/// Load the level described by `config`, resolving its paths against `asset_root`.
///
/// Any failure aborts the load; no partial level is produced.
pub fn load_level(
    asset_root: impl AsRef<Path>,
    config: &LevelConfig,
) -> Result<LevelData, LoadError> {
    let asset_root = asset_root.as_ref();
    config.validate()?;

    let path = asset_root.join(&config.map_path);
    let mut loader = tiled::Loader::new();
    let map = loader.load_tmx_map(&path)?;

    if map.infinite() {
        return Err(LoadError::InfiniteMap(path));
    }

    let level = build_level(&map, config, asset_root.join(&config.background_path))?;

    info!(
        "Loaded level {:?}: {} visible, {} obstacles, {} upper, {} points of interest, {} animated tiles, {} animated objects",
        path,
        level.visible.len(),
        level.obstacles.len(),
        level.upper.len(),
        level.points_of_interest.len(),
        level.animated_tiles.len(),
        level.animated_objects.len(),
    );

    Ok(level)
}

/// Build level content from an already parsed map.
pub fn build_level(
    map: &tiled::Map,
    config: &LevelConfig,
    background_path: PathBuf,
) -> Result<LevelData, LoadError> {
    let zoom = config.zoom;
    let tile_size = Vec2::new(map.tile_width as f32, map.tile_height as f32) * zoom;

    let native_map_size = config.background_size.map_or_else(
        || {
            Vec2::new(
                (map.width * map.tile_width) as f32,
                (map.height * map.tile_height) as f32,
            )
        },
        Vec2::from_array,
    );
    let background = Background {
        image: TileImage {
            source: background_path,
            region: None,
            native_size: native_map_size,
        },
        size: scaled_size(native_map_size, zoom),
    };

    let visible_layers = collect_layers(map, LayerFilter::VisibleOnly);
    let all_layers = collect_layers(map, LayerFilter::All);

    let mut visible = Vec::new();
    place_grid_tiles(&visible_layers, config, LayerRole::Background, tile_size, &mut visible)?;
    place_object_tiles(&all_layers, config, LayerRole::Decoration, &mut visible);
    place_grid_tiles(&visible_layers, config, LayerRole::Vegetation, tile_size, &mut visible)?;

    let mut obstacles = Vec::new();
    place_grid_tiles(&all_layers, config, LayerRole::Obstacle, tile_size, &mut obstacles)?;

    place_object_tiles(&all_layers, config, LayerRole::KeyObjects, &mut visible);

    let points_of_interest = collect_points_of_interest(&all_layers, config);

    let mut upper_tiles = Vec::new();
    place_grid_tiles(
        &visible_layers,
        config,
        LayerRole::UpperTiles,
        tile_size,
        &mut upper_tiles,
    )?;
    let mut upper: Vec<UpperTile> = upper_tiles
        .into_iter()
        .map(|tile| UpperTile {
            position: tile.position,
            image: tile.image,
            size: tile.size,
        })
        .collect();
    collect_upper_objects(&all_layers, config, &mut upper);

    let registry = AnimationRegistry::from_map(map);
    let animated_tiles = registry.grid_entries(map, config);
    let animated_objects = registry.object_entries(map, config);
    let atlas = registry.build_atlas(map);
    debug!(
        "{} animations registered, {} frame images resolved",
        registry.len(),
        atlas.len()
    );

    Ok(LevelData {
        zoom,
        tile_size,
        background,
        visible,
        obstacles,
        upper,
        points_of_interest,
        animated_tiles,
        animated_objects,
        atlas,
    })
}

/// Place every tile of the tile layers carrying `role`, row by row.
fn place_grid_tiles(
    layers: &[tiled::Layer],
    config: &LevelConfig,
    role: LayerRole,
    tile_size: Vec2,
    out: &mut Vec<StaticTile>,
) -> Result<(), LoadError> {
    for layer in layers {
        if !config.layer_has_role(&layer.name, role) {
            continue;
        }
        let LayerType::Tiles(tile_layer) = layer.layer_type() else {
            continue;
        };
        let (Some(width), Some(height)) = (tile_layer.width(), tile_layer.height()) else {
            return Err(LoadError::MissingLayerData(layer.name.clone()));
        };

        let before = out.len();
        for y in 0..height {
            for x in 0..width {
                let Some(tile) = tile_layer.get_tile(x as i32, y as i32) else {
                    continue;
                };
                let Some(resolved) = resolve_layer_tile(&tile) else {
                    warn!(
                        "Tile at ({}, {}) in layer '{}' has no image, skipping",
                        x, y, layer.name
                    );
                    continue;
                };
                out.push(StaticTile {
                    position: grid_position(x, y, tile_size),
                    size: scaled_size(resolved.image.native_size, config.zoom),
                    image: resolved.image,
                });
            }
        }
        debug!(
            "Layer '{}' ({:?}): placed {} tiles",
            layer.name,
            role,
            out.len() - before
        );
    }
    Ok(())
}

/// Place every tile object of the object groups carrying `role`.
fn place_object_tiles(
    layers: &[tiled::Layer],
    config: &LevelConfig,
    role: LayerRole,
    out: &mut Vec<StaticTile>,
) {
    for_each_tile_object(layers, config, role, |_, position, image, size| {
        out.push(StaticTile {
            position,
            image,
            size,
        });
    });
}

fn collect_points_of_interest(layers: &[tiled::Layer], config: &LevelConfig) -> Vec<PointOfInterest> {
    let mut points = Vec::new();
    for_each_tile_object(
        layers,
        config,
        LayerRole::PointsOfInterest,
        |name, base_position, image, size| {
            if config.point_of_interest_names.contains(name) {
                points.push(PointOfInterest {
                    name: name.to_string(),
                    base_position,
                    image,
                    size,
                });
            }
        },
    );
    points
}

fn collect_upper_objects(layers: &[tiled::Layer], config: &LevelConfig, out: &mut Vec<UpperTile>) {
    for_each_tile_object(
        layers,
        config,
        LayerRole::UpperObjects,
        |name, position, image, size| {
            if config.upper_object_names.contains(name) {
                out.push(UpperTile {
                    position,
                    image,
                    size,
                });
            }
        },
    );
}

/// Visit the tile objects of object groups carrying `role` with their name, world
/// position, image and scaled size. Objects without an image are skipped.
fn for_each_tile_object(
    layers: &[tiled::Layer],
    config: &LevelConfig,
    role: LayerRole,
    mut visit: impl FnMut(&str, Vec2, TileImage, Vec2),
) {
    for layer in layers {
        if !config.layer_has_role(&layer.name, role) {
            continue;
        }
        let LayerType::Objects(object_layer) = layer.layer_type() else {
            continue;
        };
        for object in object_layer.objects() {
            let Some(resolved) = object.get_tile().as_ref().and_then(resolve_layer_tile) else {
                continue;
            };
            let size = object_size(&object, &resolved.image);
            visit(
                &object.name,
                object_top_left(&object, size, config.zoom),
                resolved.image,
                scaled_size(size, config.zoom),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::{AnimatedKind, TileKey};

    const TILESET: &str = r#"<tileset firstgid="1" name="world" tilewidth="32" tileheight="32" tilecount="16" columns="4">
  <image source="world.png" width="128" height="128"/>
  <tile id="5">
   <animation>
    <frame tileid="5" duration="100"/>
    <frame tileid="6" duration="100"/>
    <frame tileid="7" duration="100"/>
   </animation>
  </tile>
  <tile id="9">
   <animation>
   </animation>
  </tile>
 </tileset>"#;

    fn csv(cells: &[u32]) -> String {
        cells
            .chunks(4)
            .map(|row| {
                row.iter()
                    .map(u32::to_string)
                    .collect::<Vec<_>>()
                    .join(",")
            })
            .collect::<Vec<_>>()
            .join(",\n")
    }

    fn tile_layer(id: u32, name: &str, visible: bool, cells: &[u32]) -> String {
        format!(
            r#" <layer id="{id}" name="{name}" width="4" height="4" visible="{}">
  <data encoding="csv">
{}
</data>
 </layer>
"#,
            u8::from(visible),
            csv(cells)
        )
    }

    fn map_xml(layers: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<map version="1.10" tiledversion="1.10.2" orientation="orthogonal" renderorder="right-down" width="4" height="4" tilewidth="32" tileheight="32" infinite="0" nextlayerid="10" nextobjectid="10">
 {TILESET}
{layers}</map>
"#
        )
    }

    /// Write `contents` as `map.tmx` in its own temp directory and return that directory.
    fn write_tmx(test_name: &str, contents: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "bevy_tiledscene_loader_{}_{}",
            test_name,
            std::process::id()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("map.tmx"), contents).unwrap();
        dir
    }

    fn write_map(test_name: &str, layers: &str) -> PathBuf {
        write_tmx(test_name, &map_xml(layers))
    }

    fn config() -> LevelConfig {
        LevelConfig {
            map_path: PathBuf::from("map.tmx"),
            background_path: PathBuf::from("map.png"),
            ..LevelConfig::default()
        }
    }

    fn one_tile(gid: u32, index: usize) -> Vec<u32> {
        let mut cells = vec![0; 16];
        cells[index] = gid;
        cells
    }

    #[test]
    fn test_background_tile_is_placed_and_scaled() {
        let dir = write_map(
            "background",
            &tile_layer(1, "Buildings", true, &one_tile(1, 0)),
        );
        let level = load_level(&dir, &config()).unwrap();

        assert_eq!(level.visible.len(), 1);
        let tile = &level.visible[0];
        assert_eq!(tile.position, Vec2::ZERO);
        assert_eq!(tile.size, Vec2::new(64.0, 64.0));
        assert_eq!(tile.image.region, Some(URect::new(0, 0, 32, 32)));
        assert_eq!(level.map_size(), Vec2::new(256.0, 256.0));
    }

    #[test]
    fn test_unclassified_and_hidden_layers_are_skipped() {
        let layers = [
            tile_layer(1, "Water", true, &one_tile(1, 0)),
            tile_layer(2, "Buildings", false, &one_tile(1, 1)),
        ]
        .concat();
        let dir = write_map("skipped", &layers);
        let level = load_level(&dir, &config()).unwrap();

        assert!(level.visible.is_empty());
    }

    #[test]
    fn test_hidden_collision_layer_becomes_obstacles() {
        let dir = write_map(
            "obstacles",
            &tile_layer(1, "Invisible_borders", false, &one_tile(2, 6)),
        );
        let level = load_level(&dir, &config()).unwrap();

        assert!(level.visible.is_empty());
        assert_eq!(level.obstacles.len(), 1);
        // Cell 6 is column 2, row 1.
        assert_eq!(level.obstacles[0].position, Vec2::new(128.0, 64.0));
        assert_eq!(
            level.obstacles[0].rect(),
            Rect::new(128.0, 64.0, 192.0, 128.0)
        );
    }

    #[test]
    fn test_points_of_interest_follow_allow_list() {
        let layers = r#" <objectgroup id="3" name="NPC">
  <object id="1" name="Librarian" gid="1" x="100" y="132" width="32" height="32"/>
  <object id="2" name="Villager" gid="1" x="10" y="42" width="32" height="32"/>
  <object id="3" name="Genius" x="0" y="0" width="32" height="32"/>
 </objectgroup>
"#;
        let dir = write_map("poi", layers);
        let level = load_level(&dir, &config()).unwrap();

        // Tiled anchors tile objects at the bottom-left: y=132 is a top edge of 100.
        assert_eq!(level.points_of_interest.len(), 1);
        let librarian = &level.points_of_interest[0];
        assert_eq!(librarian.name, "Librarian");
        assert_eq!(librarian.base_position, Vec2::new(200.0, 200.0));
        assert_eq!(librarian.size, Vec2::new(64.0, 64.0));
        // NPC layers are not drawn by the level.
        assert!(level.visible.is_empty());
    }

    #[test]
    fn test_key_objects_are_drawn_tracked_and_raised() {
        let layers = r#" <objectgroup id="3" name="Key_objects">
  <object id="1" name="Genius" gid="2" x="0" y="32" width="32" height="32"/>
  <object id="2" name="Chest" gid="3" x="64" y="96" width="32" height="32"/>
 </objectgroup>
"#;
        let dir = write_map("key_objects", layers);
        let level = load_level(&dir, &config()).unwrap();

        assert_eq!(level.visible.len(), 2);
        assert_eq!(level.points_of_interest.len(), 1);
        assert_eq!(level.upper.len(), 1);
        assert_eq!(level.upper[0].position, Vec2::ZERO);
        assert_eq!(level.visible[1].position, Vec2::new(128.0, 128.0));
    }

    #[test]
    fn test_visible_pass_order() {
        let layers = [
            tile_layer(1, "Vegetation", true, &one_tile(3, 0)),
            tile_layer(2, "Buildings", true, &one_tile(1, 0)),
        ]
        .concat();
        let dir = write_map("order", &layers);
        let level = load_level(&dir, &config()).unwrap();

        // Background layers are placed before vegetation regardless of map order.
        assert_eq!(level.visible.len(), 2);
        assert_eq!(level.visible[0].image.region, Some(URect::new(0, 0, 32, 32)));
        assert_eq!(level.visible[1].image.region, Some(URect::new(64, 0, 96, 32)));
    }

    #[test]
    fn test_upper_layers_collect_upper_tiles() {
        let layers = [
            tile_layer(1, "Upper_parts", true, &one_tile(4, 15)),
            tile_layer(2, "Lower_upper_parts", true, &one_tile(4, 0)),
        ]
        .concat();
        let dir = write_map("upper", &layers);
        let level = load_level(&dir, &config()).unwrap();

        assert_eq!(level.upper.len(), 2);
        assert_eq!(level.upper[0].position, Vec2::new(192.0, 192.0));
        assert!(level.visible.is_empty());
    }

    #[test]
    fn test_animated_tiles_and_objects() {
        let layers = [
            tile_layer(1, "Vegetation", true, &one_tile(6, 1)),
            tile_layer(2, "Buildings", true, &one_tile(6, 2)),
            r#" <objectgroup id="4" name="Anything">
  <object id="1" name="Torch" gid="6" x="16" y="48" width="16" height="32"/>
 </objectgroup>
"#
            .to_string(),
        ]
        .concat();
        let dir = write_map("animated", &layers);
        let level = load_level(&dir, &config()).unwrap();

        // Buildings is not an animated layer; the object pass ignores layer names.
        assert_eq!(level.animated_tiles.len(), 1);
        let tile = &level.animated_tiles[0];
        assert_eq!(tile.position, Vec2::new(64.0, 0.0));
        assert_eq!(tile.kind, AnimatedKind::GridTile);
        assert_eq!(tile.source, TileKey::new(0, 5));
        assert_eq!(tile.frames.len(), 3);
        assert_eq!(tile.duration_ms(), 100);

        assert_eq!(level.animated_objects.len(), 1);
        let object = &level.animated_objects[0];
        assert_eq!(object.position, Vec2::new(32.0, 32.0));
        assert_eq!(
            object.kind,
            AnimatedKind::ObjectTile {
                size: Vec2::new(16.0, 32.0)
            }
        );

        for tile_id in [5, 6, 7] {
            assert!(level.atlas.get(TileKey::new(0, tile_id)).is_some());
        }
        // Tile 9 declares an empty animation.
        assert!(level.atlas.get(TileKey::new(0, 9)).is_none());
    }

    #[test]
    fn test_missing_map_is_fatal() {
        let dir = std::env::temp_dir().join("bevy_tiledscene_does_not_exist");
        let err = load_level(&dir, &config()).unwrap_err();
        assert!(matches!(err, LoadError::Tiled(_)));
    }

    #[test]
    fn test_invalid_zoom_is_fatal() {
        let dir = write_map("zoom", "");
        let config = LevelConfig {
            zoom: -1.0,
            ..config()
        };
        let err = load_level(&dir, &config).unwrap_err();
        assert!(matches!(err, LoadError::Config(ConfigError::InvalidZoom(_))));
    }

    #[test]
    fn test_truncated_map_is_fatal() {
        let xml = map_xml(&tile_layer(1, "Buildings", true, &one_tile(1, 0)));
        let cut = xml.find("</data>").unwrap();
        let dir = write_tmx("truncated", &xml[..cut]);

        let err = load_level(&dir, &config()).unwrap_err();
        assert!(matches!(err, LoadError::Tiled(_)));
    }

    #[test]
    fn test_infinite_map_is_rejected() {
        let xml = map_xml("").replace(r#"infinite="0""#, r#"infinite="1""#);
        let dir = write_tmx("infinite", &xml);

        let err = load_level(&dir, &config()).unwrap_err();
        assert!(matches!(err, LoadError::InfiniteMap(path) if path.ends_with("map.tmx")));
    }
}
