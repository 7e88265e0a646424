//! Presents the composed frame with a pool of sprite entities.
//!
//! The draw list uses screen pixels with the origin at the top-left and Y down. A
//! `Camera2d` at the origin shows world space centered on the window with Y up, so each
//! blit is moved to its center and flipped vertically.

use std::path::{Path, PathBuf};

use bevy::platform::collections::HashMap;
use bevy::prelude::*;
use bevy_tiledscene_core::events::LevelLoaded;
use bevy_tiledscene_core::level::Level;
use bevy_tiledscene_core::surface::{DrawCommand, FrameDrawList};

use crate::config::SpritePresentConfig;

/// Marker for sprites owned by the presenter.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct PooledSprite;

/// Sprite entities reused from frame to frame, in draw-list order.
#[derive(Resource, Debug, Default)]
pub struct SpritePool {
    entities: Vec<Entity>,
}

impl SpritePool {
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }
}

/// Image handles by source path, so each file is requested from the `AssetServer` once.
#[derive(Resource, Debug, Default)]
pub struct ImageCache {
    handles: HashMap<PathBuf, Handle<Image>>,
}

impl ImageCache {
    pub fn handle(
        &mut self,
        asset_server: &AssetServer,
        asset_root: &Path,
        source: &Path,
    ) -> Handle<Image> {
        self.handles
            .entry(source.to_path_buf())
            .or_insert_with(|| asset_server.load(asset_path(asset_root, source)))
            .clone()
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

/// Turn an image path from the map loader into an `AssetServer` path.
///
/// The map loader reports paths under the asset root (e.g. `assets/tmx/tiles.png`); Bevy
/// wants them relative to it with forward slashes.
pub fn asset_path(asset_root: &Path, source: &Path) -> String {
    let relative = source.strip_prefix(asset_root).unwrap_or(source);
    relative.to_string_lossy().replace('\\', "/")
}

/// Center of a blit in Bevy world space for a camera at the origin.
pub fn screen_to_translation(position: Vec2, size: Vec2, viewport: Vec2) -> Vec2 {
    Vec2::new(
        -viewport.x / 2.0 + position.x + size.x / 2.0,
        viewport.y / 2.0 - position.y - size.y / 2.0,
    )
}

fn sprite_for(command: &DrawCommand, image: Handle<Image>) -> Sprite {
    Sprite {
        image,
        rect: command.image.region.map(|region| region.as_rect()),
        custom_size: Some(command.size),
        ..default()
    }
}

/// Mirror the draw list onto the pool: blit `i` goes to pooled sprite `i`, extra
/// sprites are hidden and the pool grows when the frame needs more.
pub fn present_frame(
    mut commands: Commands,
    draw_list: Res<FrameDrawList>,
    level: Res<Level>,
    config: Res<SpritePresentConfig>,
    asset_server: Res<AssetServer>,
    mut cache: ResMut<ImageCache>,
    mut pool: ResMut<SpritePool>,
    mut sprites: Query<(&mut Sprite, &mut Transform, &mut Visibility), With<PooledSprite>>,
) {
    let viewport = level.camera().viewport();

    for (index, command) in draw_list.commands().iter().enumerate() {
        let handle = cache.handle(&asset_server, &config.asset_root, &command.image.source);
        let sprite = sprite_for(command, handle);
        let translation = screen_to_translation(command.position, command.size, viewport)
            .extend(config.z_for(index));

        match pool.entities.get(index) {
            Some(&entity) => {
                let Ok((mut current, mut transform, mut visibility)) = sprites.get_mut(entity)
                else {
                    warn!("Pooled sprite {entity:?} is missing its components");
                    continue;
                };
                *current = sprite;
                transform.translation = translation;
                *visibility = Visibility::Inherited;
            }
            None => {
                let entity = commands
                    .spawn((
                        PooledSprite,
                        sprite,
                        Transform::from_translation(translation),
                        Visibility::Inherited,
                    ))
                    .id();
                pool.entities.push(entity);
            }
        }
    }

    for &entity in pool.entities.iter().skip(draw_list.len()) {
        if let Ok((_, _, mut visibility)) = sprites.get_mut(entity) {
            *visibility = Visibility::Hidden;
        }
    }
}

/// Request every image the level can draw as soon as it is loaded.
pub fn warm_image_cache(
    _trigger: On<LevelLoaded>,
    level: Option<Res<Level>>,
    config: Res<SpritePresentConfig>,
    asset_server: Res<AssetServer>,
    mut cache: ResMut<ImageCache>,
) {
    let Some(level) = level else {
        warn!("LevelLoaded triggered without a Level resource");
        return;
    };
    let data = level.data();

    let images = std::iter::once(&data.background.image)
        .chain(data.visible.iter().map(|tile| &tile.image))
        .chain(data.upper.iter().map(|tile| &tile.image))
        .chain(data.points_of_interest.iter().map(|poi| &poi.image))
        .chain(data.atlas.images());
    for image in images {
        cache.handle(&asset_server, &config.asset_root, &image.source);
    }

    debug!("Warmed image cache with {} files", cache.len());
}

/// Spawn the 2D camera the presenter's coordinates assume.
pub fn spawn_camera(mut commands: Commands) {
    commands.spawn((Camera2d, Name::new("TiledSceneCamera")));
}
