//! # `bevy_tiledscene_core`
//!
//! Per-frame composition for `bevy_tiledscene`: a camera that follows the player and
//! stops at the map edges, depth-sorted drawing for a top-down view, and wall-clock
//! driven tile animations.
//!
//! **This crate does NOT put pixels on screen.** Each frame is recorded as an ordered
//! list of blits in [`FrameDrawList`](surface::FrameDrawList); a Layer 3 plugin presents it.
//!
//! ## Architecture
//!
//! - **Layer 1** (`bevy_tiledscene_assets`): map loading and layer classification
//! - **Layer 2** (this crate): camera, compositor, animation scheduling, the level tick
//! - **Layer 3** (`bevy_tiledscene_sprites`): presentation with Bevy sprites
//!
//! ## Frame order
//!
//! 1. advance animation timers
//! 2. recompute the camera offset from [`SceneFocus`](components::SceneFocus)
//! 3. draw the background raster
//! 4. draw map tiles and [`SceneActor`](components::SceneActor)s sorted by depth
//! 5. draw upper tiles, then animated tiles, then animated objects
//! 6. refresh point-of-interest screen positions
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use bevy::prelude::*;
//! use bevy_tiledscene_core::prelude::*;
//!
//! fn main() {
//!     App::new()
//!         .add_plugins(DefaultPlugins)
//!         .add_plugins(TiledSceneCorePlugin::default())
//!         .add_systems(Update, follow_player.before(SceneSystems::Compose))
//!         .run();
//! }
//!
//! #[derive(Component)]
//! struct Player;
//!
//! fn follow_player(mut focus: ResMut<SceneFocus>, player: Query<&SceneActor, With<Player>>) {
//!     if let Ok(actor) = player.single() {
//!         focus.center = actor.center();
//!     }
//! }
//! ```

pub mod camera;
pub mod components;
pub mod compositor;
pub mod events;
pub mod level;
pub mod plugin;
pub mod scheduler;
pub mod surface;

pub mod prelude {
    //! Common imports for `bevy_tiledscene_core` users.

    pub use crate::camera::{ScrollCamera, clamp_axis, compute_offset};
    pub use crate::components::{SceneActor, SceneFocus};
    pub use crate::compositor::{DepthSprite, draw_depth_sorted, sort_by_depth};
    pub use crate::events::LevelLoaded;
    pub use crate::level::Level;
    pub use crate::plugin::{SceneSystems, TiledSceneCoreConfig, TiledSceneCorePlugin};
    pub use crate::scheduler::{FrameError, advance, advance_entry, draw_animated};
    pub use crate::surface::{DrawCommand, DrawSurface, FrameDrawList};
}

// Re-export plugin types at crate root for convenience
pub use plugin::{SceneSystems, TiledSceneCoreConfig, TiledSceneCorePlugin};
