//! # `bevy_tiledscene_sprites`
//!
//! Presents the frames composed by `bevy_tiledscene_core` with ordinary Bevy sprites.
//!
//! This crate is a Layer 3 plugin. Every update, after `SceneSystems::Compose`, it walks
//! the `FrameDrawList` and mirrors each blit onto a pooled sprite entity: later blits
//! get a higher Z so the painter's order of the draw list is kept on screen.
//!
//! ## Features
//!
//! - **Sprite pool**: entities are reused between frames, unused ones are hidden
//! - **Image cache**: each image file is requested from the `AssetServer` once
//! - **Camera**: spawns a `Camera2d` at the origin (the "camera" feature)
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use bevy::prelude::*;
//! use bevy_tiledscene_core::TiledSceneCorePlugin;
//! use bevy_tiledscene_sprites::SpritePresentPlugin;
//!
//! fn main() {
//!     App::new()
//!         .add_plugins(DefaultPlugins)
//!         .add_plugins(TiledSceneCorePlugin::default())
//!         .add_plugins(SpritePresentPlugin::default())
//!         .run();
//! }
//! ```

pub mod config;
pub mod plugin;
pub mod present;

pub use config::SpritePresentConfig;
pub use plugin::SpritePresentPlugin;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::SpritePresentConfig;
    pub use crate::plugin::SpritePresentPlugin;
    pub use crate::present::{ImageCache, PooledSprite, SpritePool};
}
