//! # `bevy_tiledscene_assets`
//!
//! Level loading for `bevy_tiledscene`. Parses a Tiled `.tmx` map with the `tiled` crate
//! and classifies its layers into placed level content:
//!
//! - depth-sorted tiles and tile objects,
//! - obstacle tiles for movement blocking,
//! - upper tiles drawn over the player,
//! - named points of interest,
//! - animated tiles and tile objects.
//!
//! This is a **Layer 1** crate: plain data with no ECS systems. Drawing and per-frame
//! state live in `bevy_tiledscene_core`.
//!
//! ```rust,no_run
//! use bevy_tiledscene_assets::prelude::*;
//!
//! let config = LevelConfig::default();
//! let level = load_level("assets", &config).expect("level loads");
//! println!("{} obstacle tiles", level.obstacles.len());
//! ```

pub mod animation;
pub mod config;
pub mod layers;
pub mod level;
pub mod loader;

pub mod prelude {
    //! Common imports for `bevy_tiledscene_assets` users.

    pub use crate::animation::{AnimationDef, AnimationRegistry};
    pub use crate::config::{ConfigError, LayerRole, LevelConfig, ViewportSize};
    pub use crate::level::{
        AnimatedEntry, AnimatedKind, AnimationFrame, Background, LevelData, PointOfInterest,
        StaticTile, TileAtlas, TileImage, TileKey, UpperTile,
    };
    pub use crate::loader::{LoadError, build_level, load_level};
}
