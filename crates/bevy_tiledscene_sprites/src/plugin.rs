//! Main plugin for `bevy_tiledscene_sprites`.

use bevy::prelude::*;
use bevy_tiledscene_core::SceneSystems;
use bevy_tiledscene_core::level::Level;

use crate::config::SpritePresentConfig;
use crate::present::{self, ImageCache, SpritePool};

/// Plugin that puts the frame composed by `bevy_tiledscene_core` on screen.
///
/// This Layer 3 plugin reads `FrameDrawList` after `SceneSystems::Compose` and mirrors
/// it onto pooled sprite entities.
///
/// # Example
///
/// ```rust,no_run
/// # use bevy::prelude::*;
/// # use bevy_tiledscene_sprites::SpritePresentPlugin;
/// App::new()
///     .add_plugins(SpritePresentPlugin::default());
/// ```
#[derive(Default)]
pub struct SpritePresentPlugin {
    /// Configuration for presentation
    pub config: SpritePresentConfig,
}

impl SpritePresentPlugin {
    /// Create plugin with custom configuration.
    pub fn new(config: SpritePresentConfig) -> Self {
        Self { config }
    }
}

impl Plugin for SpritePresentPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(self.config.clone());
        app.init_resource::<SpritePool>();
        app.init_resource::<ImageCache>();

        app.add_observer(present::warm_image_cache);

        app.add_systems(
            Update,
            present::present_frame
                .in_set(SceneSystems::Present)
                .run_if(resource_exists::<Level>),
        );

        if self.config.spawn_camera {
            app.add_systems(Startup, present::spawn_camera);
        }

        info!("SpritePresentPlugin initialized");
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use bevy_tiledscene_assets::level::{
        Background, LevelData, StaticTile, TileAtlas, TileImage,
    };
    use bevy_tiledscene_core::TiledSceneCorePlugin;

    use super::*;
    use crate::present::PooledSprite;

    fn image(name: &str) -> TileImage {
        TileImage {
            source: PathBuf::from(format!("assets/{name}")),
            region: None,
            native_size: Vec2::splat(32.0),
        }
    }

    fn level(tiles: usize) -> Level {
        let data = LevelData {
            zoom: 2.0,
            tile_size: Vec2::splat(64.0),
            background: Background {
                image: image("map.png"),
                size: Vec2::new(2000.0, 1500.0),
            },
            visible: (0..tiles)
                .map(|i| StaticTile {
                    position: Vec2::new(i as f32 * 64.0, 0.0),
                    image: image("tiles.png"),
                    size: Vec2::splat(64.0),
                })
                .collect(),
            obstacles: Vec::new(),
            upper: Vec::new(),
            points_of_interest: Vec::new(),
            animated_tiles: Vec::new(),
            animated_objects: Vec::new(),
            atlas: TileAtlas::default(),
        };
        Level::new(data, Vec2::new(800.0, 600.0))
    }

    fn app(level: Level) -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, AssetPlugin::default()));
        app.init_asset::<Image>();
        app.insert_resource(level);
        app.add_plugins(TiledSceneCorePlugin::default());
        app.add_plugins(SpritePresentPlugin::new(SpritePresentConfig {
            spawn_camera: false,
            ..default()
        }));
        app
    }

    fn pooled_count(app: &mut App) -> usize {
        app.world_mut()
            .query_filtered::<Entity, With<PooledSprite>>()
            .iter(app.world())
            .count()
    }

    #[test]
    fn test_one_sprite_per_blit() {
        let mut app = app(level(3));
        app.update();

        assert_eq!(app.world().resource::<SpritePool>().entities().len(), 4);
        assert_eq!(pooled_count(&mut app), 4);
        // Background and tile sheet.
        assert_eq!(app.world().resource::<ImageCache>().len(), 2);
    }

    #[test]
    fn test_pool_is_reused_across_frames() {
        let mut app = app(level(2));
        app.update();
        app.update();
        app.update();

        assert_eq!(pooled_count(&mut app), 3);
    }

    #[test]
    fn test_extra_sprites_are_hidden() {
        let mut app = app(level(2));
        app.update();

        app.insert_resource(level(0));
        app.update();

        let pool = app.world().resource::<SpritePool>().entities().to_vec();
        let visibility: Vec<_> = pool
            .iter()
            .map(|&entity| *app.world().get::<Visibility>(entity).unwrap())
            .collect();
        assert_eq!(
            visibility,
            [Visibility::Inherited, Visibility::Hidden, Visibility::Hidden]
        );
    }

    #[test]
    fn test_later_blits_are_in_front() {
        let mut app = app(level(1));
        app.update();

        let pool = app.world().resource::<SpritePool>().entities().to_vec();
        let background = app.world().get::<Transform>(pool[0]).unwrap();
        let tile = app.world().get::<Transform>(pool[1]).unwrap();
        assert!(tile.translation.z > background.translation.z);
    }
}
