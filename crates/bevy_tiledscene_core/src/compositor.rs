//! Depth-sorted drawing for a top-down view.
//!
//! Sprites lower on the map are in front: the group is drawn in ascending order of
//! each sprite's vertical center, so something standing below a tree is drawn after
//! (over) the tree. The sort runs every frame because actors move.

use bevy::prelude::*;
use bevy_tiledscene_assets::level::{StaticTile, TileImage};

use crate::camera::ScrollCamera;
use crate::surface::DrawSurface;

/// A sprite taking part in the depth sort.
#[derive(Debug, Clone, Copy)]
pub struct DepthSprite<'a> {
    pub image: &'a TileImage,
    /// World position of the top-left corner.
    pub top_left: Vec2,
    pub size: Vec2,
}

impl<'a> DepthSprite<'a> {
    pub fn new(image: &'a TileImage, top_left: Vec2, size: Vec2) -> Self {
        Self {
            image,
            top_left,
            size,
        }
    }

    /// Vertical center in world pixels.
    pub fn depth_key(&self) -> f32 {
        self.top_left.y + self.size.y / 2.0
    }
}

impl<'a> From<&'a StaticTile> for DepthSprite<'a> {
    fn from(tile: &'a StaticTile) -> Self {
        Self::new(&tile.image, tile.position, tile.size)
    }
}

/// Sort `sprites` back to front. Equal depths keep their relative order.
pub fn sort_by_depth(sprites: &mut [DepthSprite]) {
    sprites.sort_by(|a, b| a.depth_key().total_cmp(&b.depth_key()));
}

/// Sort `sprites` and draw each one at its clamped screen position.
pub fn draw_depth_sorted(
    camera: &ScrollCamera,
    sprites: &mut [DepthSprite],
    surface: &mut impl DrawSurface,
) {
    sort_by_depth(sprites);
    for sprite in sprites.iter() {
        surface.blit(
            sprite.image,
            camera.screen_position(sprite.top_left),
            sprite.size,
        );
    }
}
