//! Configuration for sprite presentation.

use std::path::PathBuf;

use bevy::prelude::*;

/// Configuration for `SpritePresentPlugin`.
#[derive(Resource, Clone, Debug)]
pub struct SpritePresentConfig {
    /// Directory Bevy's `AssetServer` reads from. Image paths from the map loader
    /// start with it and have it stripped before loading (default: `assets`).
    pub asset_root: PathBuf,

    /// Z of the first blit of a frame (default: 0.0)
    pub base_z: f32,

    /// Z added per blit so later blits cover earlier ones (default: 0.001)
    pub z_step: f32,

    /// Spawn a `Camera2d` at startup (default: true with "camera" feature)
    pub spawn_camera: bool,
}

impl SpritePresentConfig {
    /// Z of the blit at `index` in the draw list.
    pub fn z_for(&self, index: usize) -> f32 {
        self.base_z + index as f32 * self.z_step
    }
}

impl Default for SpritePresentConfig {
    fn default() -> Self {
        Self {
            asset_root: PathBuf::from("assets"),
            base_z: 0.0,
            z_step: 0.001,
            spawn_camera: cfg!(feature = "camera"),
        }
    }
}
