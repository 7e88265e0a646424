//! # bevy_tiledscene
//!
//! Top-down tile world composition for Bevy: a Tiled map split into depth-sorted
//! scenery, occluding upper tiles, obstacles and points of interest, drawn through a
//! camera that follows the player and stops at the map edges.
//!
//! This is a unified meta-crate that combines all `bevy_tiledscene_*` sub-crates with
//! convenient feature flags.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use bevy::prelude::*;
//! use bevy_tiledscene::prelude::*;
//!
//! fn main() {
//!     App::new()
//!         .add_plugins(DefaultPlugins)
//!         .add_plugins(TiledScenePlugin::default())
//!         .add_systems(Startup, spawn_player)
//!         .add_systems(Update, follow_player.before(SceneSystems::Compose))
//!         .run();
//! }
//!
//! #[derive(Component)]
//! struct Player;
//!
//! fn spawn_player(mut commands: Commands) {
//!     commands.spawn((
//!         Player,
//!         SceneActor {
//!             image: TileImage {
//!                 source: "assets/player.png".into(),
//!                 region: None,
//!                 native_size: Vec2::splat(32.0),
//!             },
//!             top_left: Vec2::new(1000.0, 700.0),
//!             size: Vec2::splat(64.0),
//!         },
//!     ));
//! }
//!
//! fn follow_player(mut focus: ResMut<SceneFocus>, player: Query<&SceneActor, With<Player>>) {
//!     if let Ok(actor) = player.single() {
//!         focus.center = actor.center();
//!     }
//! }
//! ```
//!
//! ## Features
//!
//! - **default**: Includes `sprites` feature for rendering
//! - **sprites**: Presents composed frames with pooled Bevy sprites
//!
//! ## Architecture
//!
//! This crate is organized into 3 layers:
//!
//! - **Layer 1** ([`assets`]): Map loading, layer classification, animation registry
//! - **Layer 2** ([`core`]): Scrolling camera, depth-sorted compositor, frame scheduler, level tick
//! - **Layer 3** (optional): Presentation
//!   - [`sprites`]: Bevy sprite rendering of the composed frame
//!
//! ## Using Individual Crates
//!
//! ```rust,no_run
//! use bevy::prelude::*;
//! use bevy_tiledscene_core::TiledSceneCorePlugin;
//! use bevy_tiledscene_sprites::SpritePresentPlugin;
//!
//! App::new()
//!     .add_plugins(DefaultPlugins)
//!     .add_plugins(TiledSceneCorePlugin::default())
//!     .add_plugins(SpritePresentPlugin::default())
//!     .run();
//! ```

pub mod plugin;

// Re-export sub-crates for advanced usage
pub use bevy_tiledscene_assets as assets;
pub use bevy_tiledscene_core as core;

#[cfg(feature = "sprites")]
pub use bevy_tiledscene_sprites as sprites;

pub use tiled;

/// Unified prelude for bevy_tiledscene
///
/// This module re-exports the most commonly used types from all sub-crates
/// for convenient access.
pub mod prelude {
    // Core functionality (always available)
    pub use crate::assets::prelude::*;
    pub use crate::core::prelude::*;

    // Layer 3 plugins (feature-gated)
    #[cfg(feature = "sprites")]
    pub use crate::sprites::prelude::*;

    // Unified plugin
    pub use crate::plugin::TiledScenePlugin;
}
