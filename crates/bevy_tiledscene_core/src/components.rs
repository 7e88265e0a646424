//! Components and resources shared with gameplay code.
//!
//! Gameplay (player movement, creatures) is outside this crate. It feeds the level
//! through two hooks:
//!
//! - [`SceneFocus`]: the world-space center the camera follows, written every frame.
//! - [`SceneActor`]: sprites that join the depth-sorted group every frame.

use bevy::prelude::*;
use bevy_tiledscene_assets::level::TileImage;

/// World-space center of the entity the camera follows (usually the player).
///
/// World space is map pixels times zoom, origin at the map's top-left, Y down.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct SceneFocus {
    pub center: Vec2,
}

impl SceneFocus {
    pub fn new(center: Vec2) -> Self {
        Self { center }
    }
}

/// A moving sprite drawn in the depth-sorted group (player, creatures).
///
/// # Example
///
/// ```rust,no_run
/// # use bevy::prelude::*;
/// # use bevy_tiledscene_core::components::{SceneActor, SceneFocus};
/// fn follow_player(mut focus: ResMut<SceneFocus>, actors: Query<&SceneActor>) {
///     if let Some(player) = actors.iter().next() {
///         focus.center = player.center();
///     }
/// }
/// ```
#[derive(Component, Debug, Clone, PartialEq)]
pub struct SceneActor {
    pub image: TileImage,
    /// World position of the top-left corner.
    pub top_left: Vec2,
    /// Drawn size in world pixels.
    pub size: Vec2,
}

impl SceneActor {
    pub fn center(&self) -> Vec2 {
        self.top_left + self.size / 2.0
    }
}
