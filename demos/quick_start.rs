//! Quick start example demonstrating basic `bevy_tiledscene` usage.
//!
//! Loads the level described by the default `LevelConfig` (`assets/tmx/map.tmx` with
//! `assets/tmx/map.png` as background), spawns a player that walks with the arrow keys,
//! and keeps the camera on it. Obstacle tiles block the player.

use bevy::prelude::*;
use bevy_tiledscene::prelude::*;

const PLAYER_SPEED: f32 = 240.0;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins)
        // Loads the level at startup and presents every frame with sprites
        .add_plugins(TiledScenePlugin::default())
        .add_observer(spawn_player)
        .add_systems(
            Update,
            (move_player, follow_player)
                .chain()
                .before(SceneSystems::Compose),
        )
        .run();
}

#[derive(Component)]
struct Player;

/// Spawn the player in the middle of the map once the level exists.
fn spawn_player(trigger: On<LevelLoaded>, mut commands: Commands) {
    let size = Vec2::splat(64.0);
    let top_left = (trigger.event().map_size - size) / 2.0;

    commands.spawn((
        Player,
        SceneActor {
            image: TileImage {
                source: "assets/player.png".into(),
                region: None,
                native_size: Vec2::splat(32.0),
            },
            top_left,
            size,
        },
    ));

    info!("Player spawned at {top_left}; use the arrow keys to walk around.");
}

fn move_player(
    keys: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    level: Res<Level>,
    mut player: Query<&mut SceneActor, With<Player>>,
) {
    let Ok(mut actor) = player.single_mut() else {
        return;
    };

    let mut direction = Vec2::ZERO;
    if keys.pressed(KeyCode::ArrowLeft) {
        direction.x -= 1.0;
    }
    if keys.pressed(KeyCode::ArrowRight) {
        direction.x += 1.0;
    }
    // World space points down.
    if keys.pressed(KeyCode::ArrowUp) {
        direction.y -= 1.0;
    }
    if keys.pressed(KeyCode::ArrowDown) {
        direction.y += 1.0;
    }

    let step = direction.normalize_or_zero() * PLAYER_SPEED * time.delta_secs();
    let next = actor.top_left + step;
    let hitbox = Rect::from_corners(next, next + actor.size);

    let blocked = level
        .obstacle_rects()
        .any(|obstacle| !obstacle.intersect(hitbox).is_empty());
    if !blocked {
        actor.top_left = next;
    }
}

fn follow_player(mut focus: ResMut<SceneFocus>, player: Query<&SceneActor, With<Player>>) {
    if let Ok(actor) = player.single() {
        focus.center = actor.center();
    }
}
