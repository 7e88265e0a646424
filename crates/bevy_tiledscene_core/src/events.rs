//! Events for rendering and gameplay plugins.

use bevy::prelude::*;

/// Fired once the level resource has been inserted.
///
/// Rendering plugins can use it to warm image caches; gameplay can use it to place the
/// player. Observe it with `app.add_observer(|trigger: On<LevelLoaded>| ...)`.
#[derive(Event, Debug, Clone)]
pub struct LevelLoaded {
    /// Map size in world pixels.
    pub map_size: Vec2,
    /// Number of tiles in the depth-sorted group.
    pub visible_tiles: usize,
    /// Number of obstacle tiles.
    pub obstacles: usize,
}
