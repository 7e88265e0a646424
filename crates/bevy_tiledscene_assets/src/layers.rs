//! Layer traversal and tile geometry helpers shared by the loader and the animation registry.

use bevy::prelude::*;
use tiled::{LayerType, ObjectShape};

use crate::level::{TileImage, TileKey};

/// Which layers a traversal yields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerFilter {
    /// Skip hidden layers (and everything inside hidden groups).
    VisibleOnly,
    /// Yield every layer, hidden or not.
    All,
}

/// Flatten the map's layer tree into draw order, descending into group layers.
///
/// Group layers themselves are not yielded, only their content layers.
pub fn collect_layers<'map>(map: &'map tiled::Map, filter: LayerFilter) -> Vec<tiled::Layer<'map>> {
    fn collect_from_layers<'map>(
        layers: impl Iterator<Item = tiled::Layer<'map>>,
        filter: LayerFilter,
        out: &mut Vec<tiled::Layer<'map>>,
    ) {
        for layer in layers {
            if filter == LayerFilter::VisibleOnly && !layer.visible {
                continue;
            }
            if let LayerType::Group(group) = layer.layer_type() {
                collect_from_layers(group.layers(), filter, out);
            } else {
                out.push(layer);
            }
        }
    }

    let mut out = Vec::new();
    collect_from_layers(map.layers(), filter, &mut out);
    out
}

/// Resolve the image of tile `tile_id` in `tileset`.
///
/// Spritesheet tilesets yield a region of the sheet; image collection tilesets yield
/// the tile's own image. Returns `None` when the tileset has no image for the tile.
pub fn tile_image(tileset: &tiled::Tileset, tile_id: u32) -> Option<TileImage> {
    if let Some(sheet) = &tileset.image {
        if tileset.columns == 0 || tile_id >= tileset.tilecount {
            return None;
        }
        let column = tile_id % tileset.columns;
        let row = tile_id / tileset.columns;
        let x = tileset.margin + column * (tileset.tile_width + tileset.spacing);
        let y = tileset.margin + row * (tileset.tile_height + tileset.spacing);
        return Some(TileImage {
            source: sheet.source.clone(),
            region: Some(URect::new(
                x,
                y,
                x + tileset.tile_width,
                y + tileset.tile_height,
            )),
            native_size: Vec2::new(tileset.tile_width as f32, tileset.tile_height as f32),
        });
    }

    let tile = tileset.get_tile(tile_id)?;
    let image = tile.image.as_ref()?;
    Some(TileImage {
        source: image.source.clone(),
        region: None,
        native_size: Vec2::new(image.width as f32, image.height as f32),
    })
}

/// A tile reference resolved against its tileset.
pub struct ResolvedTile {
    pub key: TileKey,
    pub image: TileImage,
}

/// Resolve a placed tile (grid cell or tile object) to its key and image.
pub fn resolve_layer_tile(tile: &tiled::LayerTile) -> Option<ResolvedTile> {
    let image = tile_image(tile.get_tileset(), tile.id())?;
    Some(ResolvedTile {
        key: TileKey::new(tile.tileset_index(), tile.id()),
        image,
    })
}

/// World position of grid cell `(x, y)`.
pub fn grid_position(x: u32, y: u32, tile_size: Vec2) -> Vec2 {
    Vec2::new(x as f32 * tile_size.x, y as f32 * tile_size.y)
}

/// Unscaled size of a tile object, falling back to the tile's image size.
pub fn object_size(object: &tiled::Object, image: &TileImage) -> Vec2 {
    match object.shape {
        ObjectShape::Rect { width, height } if width > 0.0 && height > 0.0 => {
            Vec2::new(width, height)
        }
        _ => image.native_size,
    }
}

/// World position of a tile object's top-left corner.
///
/// Tiled anchors tile objects at their bottom-left corner, so the top edge is
/// `y - height`.
pub fn object_top_left(object: &tiled::Object, size: Vec2, zoom: f32) -> Vec2 {
    Vec2::new(object.x, object.y - size.y) * zoom
}

/// Scale a native size by `zoom`, rounding to whole pixels.
pub fn scaled_size(size: Vec2, zoom: f32) -> Vec2 {
    (size * zoom).round()
}
