//! Level configuration: zoom, viewport, asset paths and the layer classification table.
//!
//! The defaults reproduce the layer names and entity allow-lists the game's map was
//! authored against. A level can also be described by a JSON file:
//!
//! ```json
//! {
//!     "zoom": 2.0,
//!     "viewport": { "width": 1280, "height": 720 },
//!     "map_path": "tmx/map.tmx",
//!     "background_path": "tmx/map.png",
//!     "layers": { "Buildings": ["background"], "Invisible_borders": ["obstacle"] }
//! }
//! ```

use std::path::{Path, PathBuf};

use bevy::platform::collections::{HashMap, HashSet};
use bevy::prelude::*;
use serde::Deserialize;
use thiserror::Error;

/// What a named map layer contributes to the level.
///
/// A layer may carry several roles (`Key_objects` is drawn, exported as points of
/// interest and scanned for upper objects).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerRole {
    /// Opaque tile layer drawn in the depth-sorted group.
    Background,
    /// Object group whose tile objects are drawn in the depth-sorted group.
    Decoration,
    /// Tile layer drawn in the depth-sorted group after decorations.
    Vegetation,
    /// Tile layer whose tiles block movement. Never drawn.
    Obstacle,
    /// Object group drawn in the depth-sorted group after vegetation.
    KeyObjects,
    /// Object group scanned for named points of interest.
    PointsOfInterest,
    /// Tile layer drawn over the player.
    UpperTiles,
    /// Object group scanned for objects drawn over the player.
    UpperObjects,
}

/// Errors raised while reading a level configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid level configuration: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Zoom factor must be positive, got {0}")]
    InvalidZoom(f32),
}

/// Viewport dimensions in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ViewportSize {
    pub width: u32,
    pub height: u32,
}

impl ViewportSize {
    pub fn as_vec2(self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }
}

impl Default for ViewportSize {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
        }
    }
}

/// Everything the loader and camera need to build a level.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LevelConfig {
    /// Scalar applied to every map position and image size.
    pub zoom: f32,

    /// Size of the display surface.
    pub viewport: ViewportSize,

    /// Path of the `.tmx` map, relative to the asset root.
    pub map_path: PathBuf,

    /// Path of the full-map background raster, relative to the asset root.
    pub background_path: PathBuf,

    /// Native size of the background raster. When unset, the map's pixel size is used.
    pub background_size: Option<[f32; 2]>,

    /// Layer name -> roles. Layers missing from this table are ignored.
    pub layers: HashMap<String, Vec<LayerRole>>,

    /// Object names that become upper tiles when found in an `UpperObjects` layer.
    pub upper_object_names: HashSet<String>,

    /// Object names that become points of interest when found in a `PointsOfInterest` layer.
    pub point_of_interest_names: HashSet<String>,

    /// Tile layers scanned for animated tiles.
    pub animated_layers: HashSet<String>,
}

const DEFAULT_LAYERS: &[(&str, &[LayerRole])] = &[
    ("Buildings", &[LayerRole::Background]),
    ("Library", &[LayerRole::Background]),
    ("Forrest_trees", &[LayerRole::Decoration]),
    ("Vegetation", &[LayerRole::Vegetation]),
    ("Invisible_borders", &[LayerRole::Obstacle]),
    (
        "Key_objects",
        &[
            LayerRole::KeyObjects,
            LayerRole::PointsOfInterest,
            LayerRole::UpperObjects,
        ],
    ),
    ("NPC", &[LayerRole::PointsOfInterest]),
    ("Legendary_creatures", &[LayerRole::PointsOfInterest]),
    ("Upper_parts", &[LayerRole::UpperTiles]),
    ("Lower_upper_parts", &[LayerRole::UpperTiles]),
    ("Objects_no_interactions", &[LayerRole::UpperObjects]),
];

const DEFAULT_UPPER_OBJECTS: &[&str] = &["Genius", "Table_up"];

const DEFAULT_POINTS_OF_INTEREST: &[&str] = &[
    "Librarian",
    "Calsifer",
    "King_squid",
    "King_raccoon",
    "King_skeleton",
    "King_bamboo",
    "The deadman's letter",
    "Genius",
];

const DEFAULT_ANIMATED_LAYERS: &[&str] = &["Vegetation", "Library"];

fn name_set(names: &[&str]) -> HashSet<String> {
    names.iter().map(|name| (*name).to_string()).collect()
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            zoom: 2.0,
            viewport: ViewportSize::default(),
            map_path: PathBuf::from("tmx/map.tmx"),
            background_path: PathBuf::from("tmx/map.png"),
            background_size: None,
            layers: DEFAULT_LAYERS
                .iter()
                .map(|(name, roles)| ((*name).to_string(), roles.to_vec()))
                .collect(),
            upper_object_names: name_set(DEFAULT_UPPER_OBJECTS),
            point_of_interest_names: name_set(DEFAULT_POINTS_OF_INTEREST),
            animated_layers: name_set(DEFAULT_ANIMATED_LAYERS),
        }
    }
}

impl LevelConfig {
    /// Parse a configuration from JSON. Missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a JSON configuration file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.zoom.is_finite() && self.zoom > 0.0) {
            return Err(ConfigError::InvalidZoom(self.zoom));
        }
        Ok(())
    }

    /// Whether layer `name` carries `role`.
    pub fn layer_has_role(&self, name: &str, role: LayerRole) -> bool {
        self.layers
            .get(name)
            .is_some_and(|roles| roles.contains(&role))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_matches_map_layers() {
        let config = LevelConfig::default();

        assert!(config.layer_has_role("Buildings", LayerRole::Background));
        assert!(config.layer_has_role("Key_objects", LayerRole::KeyObjects));
        assert!(config.layer_has_role("Key_objects", LayerRole::PointsOfInterest));
        assert!(config.layer_has_role("Key_objects", LayerRole::UpperObjects));
        assert!(config.layer_has_role("Invisible_borders", LayerRole::Obstacle));
        assert!(!config.layer_has_role("NPC", LayerRole::KeyObjects));
        assert!(!config.layers.contains_key("Water"));
    }

    #[test]
    fn test_allow_list_is_a_set() {
        let config = LevelConfig::default();

        assert_eq!(config.point_of_interest_names.len(), 8);
        assert!(config.point_of_interest_names.contains("The deadman's letter"));
        assert!(!config.point_of_interest_names.contains("Villager"));
    }

    #[test]
    fn test_json_overrides_keep_defaults() {
        let config = LevelConfig::from_json_str(
            r#"{
                "zoom": 3.0,
                "viewport": { "width": 640, "height": 480 },
                "layers": { "Ground": ["background", "vegetation"] }
            }"#,
        )
        .unwrap();

        assert_eq!(config.zoom, 3.0);
        assert_eq!(config.viewport.as_vec2(), Vec2::new(640.0, 480.0));
        assert!(config.layer_has_role("Ground", LayerRole::Vegetation));
        assert!(!config.layers.contains_key("Buildings"));
        assert_eq!(config.map_path, PathBuf::from("tmx/map.tmx"));
    }

    #[test]
    fn test_json_name_lists_collapse_into_sets() {
        let config = LevelConfig::from_json_str(
            r#"{ "point_of_interest_names": ["Owl", "Owl", "Fox"], "animated_layers": ["Water"] }"#,
        )
        .unwrap();

        assert_eq!(config.point_of_interest_names.len(), 2);
        assert!(config.animated_layers.contains("Water"));
        assert_eq!(config.upper_object_names.len(), 2);
    }

    #[test]
    fn test_rejects_non_positive_zoom() {
        let err = LevelConfig::from_json_str(r#"{ "zoom": 0.0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidZoom(_)));
    }

    #[test]
    fn test_rejects_unknown_role() {
        let err = LevelConfig::from_json_str(r#"{ "layers": { "A": ["roof"] } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }
}
