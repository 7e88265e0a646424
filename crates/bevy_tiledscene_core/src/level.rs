//! The loaded level and its per-frame tick.

use bevy::prelude::*;
use bevy_tiledscene_assets::level::{LevelData, PointOfInterest, StaticTile};

use crate::camera::ScrollCamera;
use crate::compositor::{DepthSprite, draw_depth_sorted};
use crate::scheduler::{FrameError, advance, draw_animated};
use crate::surface::DrawSurface;

/// A level in play: loaded content plus the state rewritten every frame (camera
/// offset, animation frames, point-of-interest screen positions).
#[derive(Resource, Debug)]
pub struct Level {
    data: LevelData,
    camera: ScrollCamera,
    poi_screen_positions: Vec<Vec2>,
}

impl Level {
    pub fn new(data: LevelData, viewport: Vec2) -> Self {
        let camera = ScrollCamera::new(data.map_size(), viewport);
        let poi_screen_positions = data
            .points_of_interest
            .iter()
            .map(|poi| camera.screen_position(poi.base_position))
            .collect();
        Self {
            data,
            camera,
            poi_screen_positions,
        }
    }

    pub fn data(&self) -> &LevelData {
        &self.data
    }

    pub fn camera(&self) -> &ScrollCamera {
        &self.camera
    }

    /// Movement-blocking tiles. Owned by the level; callers only read them.
    pub fn obstacles(&self) -> &[StaticTile] {
        &self.data.obstacles
    }

    /// World rectangles of the obstacle tiles.
    pub fn obstacle_rects(&self) -> impl Iterator<Item = Rect> + '_ {
        self.data.obstacles.iter().map(StaticTile::rect)
    }

    /// Points of interest with their screen positions as of the last tick.
    pub fn points_of_interest_on_screen(
        &self,
    ) -> impl Iterator<Item = (&PointOfInterest, Vec2)> + '_ {
        self.data
            .points_of_interest
            .iter()
            .zip(self.poi_screen_positions.iter().copied())
    }

    /// Screen position of the named point of interest as of the last tick.
    pub fn point_of_interest_on_screen(&self, name: &str) -> Option<Vec2> {
        self.points_of_interest_on_screen()
            .find(|(poi, _)| poi.name == name)
            .map(|(_, position)| position)
    }

    /// Run one frame: advance animations, follow `focus_center`, draw every layer in
    /// order and refresh point-of-interest positions.
    ///
    /// Draw order, back to front: background, depth-sorted tiles and actors, upper
    /// tiles, animated tiles, animated objects.
    pub fn tick<'s>(
        &mut self,
        focus_center: Vec2,
        actors: impl IntoIterator<Item = DepthSprite<'s>>,
        now_ms: u64,
        surface: &mut impl DrawSurface,
    ) -> Result<(), FrameError> {
        advance(&mut self.data.animated_tiles, now_ms);
        advance(&mut self.data.animated_objects, now_ms);

        self.camera.focus(focus_center);
        let camera = &self.camera;
        let data = &self.data;

        let background = &data.background;
        surface.blit(
            &background.image,
            camera.screen_position(Vec2::ZERO),
            background.size,
        );

        let mut sprites: Vec<DepthSprite> = data
            .visible
            .iter()
            .map(DepthSprite::from)
            .chain(
                actors
                    .into_iter()
                    .map(|actor| DepthSprite::new(actor.image, actor.top_left, actor.size)),
            )
            .collect();
        draw_depth_sorted(camera, &mut sprites, surface);

        for tile in &data.upper {
            surface.blit(&tile.image, camera.screen_position(tile.position), tile.size);
        }

        draw_animated(camera, &data.animated_tiles, &data.atlas, data.zoom, surface)?;
        draw_animated(camera, &data.animated_objects, &data.atlas, data.zoom, surface)?;

        self.poi_screen_positions.clear();
        self.poi_screen_positions.extend(
            data.points_of_interest
                .iter()
                .map(|poi| camera.screen_position(poi.base_position)),
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use bevy_tiledscene_assets::level::{
        AnimatedEntry, AnimatedKind, AnimationFrame, Background, TileAtlas, TileImage, TileKey,
        UpperTile,
    };

    use super::*;
    use crate::surface::FrameDrawList;

    const VIEWPORT: Vec2 = Vec2::new(800.0, 600.0);

    fn image(name: &str) -> TileImage {
        TileImage {
            source: PathBuf::from(name),
            region: None,
            native_size: Vec2::splat(32.0),
        }
    }

    fn static_tile(name: &str, position: Vec2) -> StaticTile {
        StaticTile {
            position,
            image: image(name),
            size: Vec2::splat(64.0),
        }
    }

    fn level() -> Level {
        let mut atlas = TileAtlas::default();
        atlas.insert(TileKey::new(0, 1), image("water_0"));
        atlas.insert(TileKey::new(0, 2), image("water_1"));

        let water = AnimatedEntry {
            source: TileKey::new(0, 1),
            frames: vec![
                AnimationFrame {
                    tile: TileKey::new(0, 1),
                    duration_ms: 100,
                },
                AnimationFrame {
                    tile: TileKey::new(0, 2),
                    duration_ms: 100,
                },
            ],
            position: Vec2::new(128.0, 128.0),
            kind: AnimatedKind::GridTile,
            current_frame: 0,
            last_update_ms: 0,
        };

        let data = LevelData {
            zoom: 2.0,
            tile_size: Vec2::splat(64.0),
            background: Background {
                image: image("map.png"),
                size: Vec2::new(2000.0, 1500.0),
            },
            visible: vec![
                static_tile("house", Vec2::new(0.0, 300.0)),
                static_tile("fence", Vec2::new(0.0, 100.0)),
            ],
            obstacles: vec![static_tile("wall", Vec2::new(640.0, 0.0))],
            upper: vec![UpperTile {
                position: Vec2::new(64.0, 64.0),
                image: image("roof"),
                size: Vec2::splat(64.0),
            }],
            points_of_interest: vec![PointOfInterest {
                name: "Librarian".to_string(),
                base_position: Vec2::new(1000.0, 800.0),
                image: image("librarian"),
                size: Vec2::splat(64.0),
            }],
            animated_tiles: vec![water],
            animated_objects: Vec::new(),
            atlas,
        };
        Level::new(data, VIEWPORT)
    }

    fn drawn(list: &FrameDrawList) -> Vec<String> {
        list.commands()
            .iter()
            .map(|command| command.image.source.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_tick_draws_layers_in_order() {
        let mut level = level();
        let player = image("player");
        let actors = [DepthSprite::new(
            &player,
            Vec2::new(100.0, 150.0),
            Vec2::splat(64.0),
        )];

        let mut list = FrameDrawList::default();
        level
            .tick(Vec2::new(400.0, 300.0), actors, 0, &mut list)
            .unwrap();

        // Depth keys: fence 132, player 182, house 332.
        assert_eq!(
            drawn(&list),
            ["map.png", "fence", "player", "house", "roof", "water_0"]
        );
    }

    #[test]
    fn test_tick_scrolls_every_layer_together() {
        let mut level = level();
        let mut list = FrameDrawList::default();
        level
            .tick(Vec2::new(900.0, 700.0), Vec::<DepthSprite>::new(), 0, &mut list)
            .unwrap();

        // Offset (500, 400) lies inside the scroll range on both axes.
        let positions: Vec<Vec2> = list.commands().iter().map(|c| c.position).collect();
        assert_eq!(positions[0], Vec2::new(-500.0, -400.0));
        assert_eq!(positions[1], Vec2::new(-500.0, -300.0));
        assert_eq!(positions[3], Vec2::new(-436.0, -336.0));
        assert_eq!(positions[4], Vec2::new(-372.0, -272.0));
        assert_eq!(
            level.point_of_interest_on_screen("Librarian"),
            Some(Vec2::new(500.0, 400.0))
        );
    }

    #[test]
    fn test_points_of_interest_use_the_same_clamp() {
        let mut level = level();
        let mut list = FrameDrawList::default();
        // Far corner: offset (1600, 1200) exceeds (1200, 900).
        level
            .tick(Vec2::new(2000.0, 1500.0), Vec::<DepthSprite>::new(), 0, &mut list)
            .unwrap();

        let (poi, screen) = level.points_of_interest_on_screen().next().unwrap();
        assert_eq!(poi.name, "Librarian");
        assert_eq!(screen, Vec2::new(-200.0, -100.0));
        assert_eq!(list.commands()[0].position, Vec2::new(-1200.0, -900.0));
    }

    #[test]
    fn test_tick_advances_animations_before_drawing() {
        let mut level = level();
        let mut list = FrameDrawList::default();
        level.tick(Vec2::ZERO, Vec::<DepthSprite>::new(), 150, &mut list).unwrap();

        assert_eq!(drawn(&list).last().map(String::as_str), Some("water_1"));
        assert_eq!(level.data().animated_tiles[0].last_update_ms, 150);
    }

    #[test]
    fn test_obstacles_are_exposed_not_drawn() {
        let mut level = level();
        let mut list = FrameDrawList::default();
        level.tick(Vec2::ZERO, Vec::<DepthSprite>::new(), 0, &mut list).unwrap();

        assert!(!drawn(&list).contains(&"wall".to_string()));
        assert_eq!(level.obstacles().len(), 1);
        assert_eq!(
            level.obstacle_rects().next(),
            Some(Rect::new(640.0, 0.0, 704.0, 64.0))
        );
    }
}
