//! Placed level content produced by the loader.
//!
//! Every position here is a world position: map pixels multiplied by the zoom factor,
//! measured from the map's top-left corner with Y pointing down. Screen positions are
//! derived from these each frame and never stored back.

use std::path::PathBuf;

use bevy::platform::collections::HashMap;
use bevy::prelude::*;

/// Identity of a tile inside the map: tileset index plus local tile ID.
///
/// Two placed tiles show the same image exactly when their keys are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileKey {
    pub tileset: usize,
    pub tile_id: u32,
}

impl TileKey {
    pub fn new(tileset: usize, tile_id: u32) -> Self {
        Self { tileset, tile_id }
    }
}

/// A reference to image data: a file, optionally restricted to a pixel region.
///
/// Tiles cut from a spritesheet tileset carry the region; tiles from an image
/// collection tileset and the background raster use the whole file.
#[derive(Debug, Clone, PartialEq)]
pub struct TileImage {
    /// Image path as resolved by the map parser.
    pub source: PathBuf,
    /// Region of the source image in pixels, `None` for the whole image.
    pub region: Option<URect>,
    /// Unscaled size of the region (or of the whole image).
    pub native_size: Vec2,
}

/// A tile or tile object placed once at load time.
#[derive(Debug, Clone, PartialEq)]
pub struct StaticTile {
    /// World position of the top-left corner.
    pub position: Vec2,
    pub image: TileImage,
    /// Scaled size in world pixels.
    pub size: Vec2,
}

impl StaticTile {
    pub fn rect(&self) -> Rect {
        Rect::from_corners(self.position, self.position + self.size)
    }
}

/// Content drawn after the player so it occludes it (roofs, canopies, table tops).
#[derive(Debug, Clone, PartialEq)]
pub struct UpperTile {
    pub position: Vec2,
    pub image: TileImage,
    pub size: Vec2,
}

/// A named object other systems track on screen (NPCs, creatures, key items).
#[derive(Debug, Clone, PartialEq)]
pub struct PointOfInterest {
    pub name: String,
    /// World position of the top-left corner.
    pub base_position: Vec2,
    pub image: TileImage,
    pub size: Vec2,
}

/// One frame of a tile animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationFrame {
    pub tile: TileKey,
    pub duration_ms: u32,
}

/// How an animated entry is scaled when drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimatedKind {
    /// Grid tile: the frame image is scaled by the zoom factor.
    GridTile,
    /// Tile object: the frame image is stretched to the object's size times zoom.
    ObjectTile {
        /// Unscaled object size from the map.
        size: Vec2,
    },
}

/// A placed tile whose image cycles through animation frames.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimatedEntry {
    /// Tile holding the animation definition.
    pub source: TileKey,
    /// Never empty.
    pub frames: Vec<AnimationFrame>,
    pub position: Vec2,
    pub kind: AnimatedKind,
    pub current_frame: usize,
    pub last_update_ms: u64,
}

impl AnimatedEntry {
    /// Cadence of the whole entry, taken from its first frame.
    pub fn duration_ms(&self) -> u64 {
        self.frames.first().map_or(0, |frame| u64::from(frame.duration_ms))
    }

    pub fn current(&self) -> Option<&AnimationFrame> {
        self.frames.get(self.current_frame)
    }
}

/// Image lookup for animation frames, filled at load time.
#[derive(Debug, Clone, Default)]
pub struct TileAtlas {
    images: HashMap<TileKey, TileImage>,
}

impl TileAtlas {
    pub fn insert(&mut self, key: TileKey, image: TileImage) {
        self.images.insert(key, image);
    }

    pub fn get(&self, key: TileKey) -> Option<&TileImage> {
        self.images.get(&key)
    }

    pub fn images(&self) -> impl Iterator<Item = &TileImage> {
        self.images.values()
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

/// Full-map raster drawn under everything else.
#[derive(Debug, Clone, PartialEq)]
pub struct Background {
    pub image: TileImage,
    /// Scaled size; this is the map size the camera clamps against.
    pub size: Vec2,
}

/// Everything loaded for one level.
#[derive(Debug, Clone)]
pub struct LevelData {
    pub zoom: f32,
    /// Scaled grid step.
    pub tile_size: Vec2,
    pub background: Background,
    /// Depth-sorted group, in insertion order.
    pub visible: Vec<StaticTile>,
    /// Movement-blocking tiles. Never drawn.
    pub obstacles: Vec<StaticTile>,
    pub upper: Vec<UpperTile>,
    pub points_of_interest: Vec<PointOfInterest>,
    pub animated_tiles: Vec<AnimatedEntry>,
    pub animated_objects: Vec<AnimatedEntry>,
    pub atlas: TileAtlas,
}

impl LevelData {
    /// Size of the map in world pixels.
    pub fn map_size(&self) -> Vec2 {
        self.background.size
    }
}
