//! Unified plugin for bevy_tiledscene.

use bevy::prelude::*;

use bevy_tiledscene_core::{TiledSceneCoreConfig, TiledSceneCorePlugin};

#[cfg(feature = "sprites")]
use bevy_tiledscene_sprites::{SpritePresentConfig, SpritePresentPlugin};

/// Unified plugin that adds all enabled bevy_tiledscene functionality.
///
/// This plugin automatically includes:
/// - Level loading and frame composition ([`TiledSceneCorePlugin`])
/// - Enabled Layer 3 integrations based on feature flags
///
/// # Features
///
/// - `sprites` (default): Adds [`SpritePresentPlugin`] to draw the composed frame
///
/// # Example
///
/// ```rust,no_run
/// use bevy::prelude::*;
/// use bevy_tiledscene::prelude::*;
///
/// App::new()
///     .add_plugins(DefaultPlugins)
///     .add_plugins(TiledScenePlugin::default())
///     .run();
/// ```
///
/// # With Custom Configuration
///
/// ```rust,no_run
/// use bevy::prelude::*;
/// use bevy_tiledscene::prelude::*;
///
/// App::new()
///     .add_plugins(DefaultPlugins)
///     .add_plugins(
///         TiledScenePlugin::default()
///             .with_core(TiledSceneCoreConfig {
///                 level: LevelConfig::from_json_file("assets/level.json")
///                     .expect("valid level config"),
///                 ..default()
///             })
///     )
///     .run();
/// ```
#[derive(Default)]
pub struct TiledScenePlugin {
    /// Core configuration
    pub core: TiledSceneCoreConfig,

    /// Sprite presentation configuration (if feature enabled)
    #[cfg(feature = "sprites")]
    pub sprites: SpritePresentConfig,
}

impl TiledScenePlugin {
    /// Create with custom core configuration
    pub fn with_core(mut self, config: TiledSceneCoreConfig) -> Self {
        self.core = config;
        self
    }

    /// Create with custom sprite presentation configuration
    #[cfg(feature = "sprites")]
    pub fn with_sprites(mut self, config: SpritePresentConfig) -> Self {
        self.sprites = config;
        self
    }
}

impl Plugin for TiledScenePlugin {
    fn build(&self, app: &mut App) {
        // Layers 1 and 2: loading and composition (always required)
        app.add_plugins(TiledSceneCorePlugin::new(self.core.clone()));

        // Layer 3: Rendering (feature-gated)
        #[cfg(feature = "sprites")]
        app.add_plugins(SpritePresentPlugin::new(SpritePresentConfig {
            asset_root: self.core.asset_root.clone(),
            ..self.sprites.clone()
        }));

        info!("TiledScenePlugin initialized");
    }
}
