//! Plugin for `bevy_tiledscene_core`.

use std::path::PathBuf;

use bevy::prelude::*;
use bevy_tiledscene_assets::config::LevelConfig;
use bevy_tiledscene_assets::loader::load_level;

use crate::components::{SceneActor, SceneFocus};
use crate::compositor::DepthSprite;
use crate::events::LevelLoaded;
use crate::level::Level;
use crate::surface::FrameDrawList;

/// Configuration for `TiledSceneCorePlugin`.
///
/// # Example
///
/// ```rust,no_run
/// use bevy::prelude::*;
/// use bevy_tiledscene_assets::config::LevelConfig;
/// use bevy_tiledscene_core::{TiledSceneCoreConfig, TiledSceneCorePlugin};
///
/// App::new()
///     .add_plugins(TiledSceneCorePlugin::new(TiledSceneCoreConfig {
///         level: LevelConfig::from_json_file("assets/level.json").expect("valid level config"),
///         ..default()
///     }));
/// ```
#[derive(Resource, Debug, Clone)]
pub struct TiledSceneCoreConfig {
    /// Directory the level's map and background paths are relative to.
    pub asset_root: PathBuf,

    /// The level to load at startup.
    pub level: LevelConfig,
}

impl Default for TiledSceneCoreConfig {
    fn default() -> Self {
        Self {
            asset_root: PathBuf::from("assets"),
            level: LevelConfig::default(),
        }
    }
}

/// Ordering of the per-frame work.
///
/// `Compose` runs the level tick and fills [`FrameDrawList`]; rendering plugins present
/// the list in `Present`.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneSystems {
    Compose,
    Present,
}

/// Plugin that loads the level at startup and composes a frame every update.
///
/// Add a rendering plugin (such as `bevy_tiledscene_sprites::SpritePresentPlugin`) to
/// put the composed frame on screen.
///
/// # Example
///
/// ```rust,no_run
/// use bevy::prelude::*;
/// use bevy_tiledscene_core::TiledSceneCorePlugin;
///
/// App::new()
///     .add_plugins(DefaultPlugins)
///     .add_plugins(TiledSceneCorePlugin::default())
///     .run();
/// ```
#[derive(Default)]
pub struct TiledSceneCorePlugin {
    config: TiledSceneCoreConfig,
}

impl TiledSceneCorePlugin {
    /// Create a new plugin with custom configuration.
    pub fn new(config: TiledSceneCoreConfig) -> Self {
        Self { config }
    }
}

impl Plugin for TiledSceneCorePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(self.config.clone());
        app.init_resource::<SceneFocus>();
        app.init_resource::<FrameDrawList>();

        app.configure_sets(Update, (SceneSystems::Compose, SceneSystems::Present).chain());

        // A level inserted before startup (tests, editors) is kept as is.
        app.add_systems(
            Startup,
            load_configured_level.run_if(not(resource_exists::<Level>)),
        );
        app.add_systems(
            Update,
            compose_frame
                .in_set(SceneSystems::Compose)
                .run_if(resource_exists::<Level>),
        );

        info!("TiledSceneCorePlugin initialized");
    }
}

/// Load the configured level. A load failure aborts startup.
pub fn load_configured_level(
    mut commands: Commands,
    config: Res<TiledSceneCoreConfig>,
) -> Result {
    let data = load_level(&config.asset_root, &config.level)?;
    let level = Level::new(data, config.level.viewport.as_vec2());

    let loaded = LevelLoaded {
        map_size: level.camera().map_size(),
        visible_tiles: level.data().visible.len(),
        obstacles: level.obstacles().len(),
    };
    commands.insert_resource(level);
    commands.trigger(loaded);
    Ok(())
}

/// Tick the level and record this frame's draw calls.
pub fn compose_frame(
    mut level: ResMut<Level>,
    focus: Res<SceneFocus>,
    actors: Query<&SceneActor>,
    time: Res<Time>,
    mut draw_list: ResMut<FrameDrawList>,
) -> Result {
    draw_list.clear();
    let now_ms = time.elapsed().as_millis() as u64;
    let sprites = actors
        .iter()
        .map(|actor| DepthSprite::new(&actor.image, actor.top_left, actor.size));
    level.tick(focus.center, sprites, now_ms, &mut *draw_list)?;
    Ok(())
}
