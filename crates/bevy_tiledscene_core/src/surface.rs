//! Draw targets.
//!
//! The level draws through [`DrawSurface`], a blit primitive in screen pixels (top-left
//! origin, Y down). [`FrameDrawList`] records the blits of one frame in order so a
//! rendering layer can present them afterwards.

use bevy::prelude::*;
use bevy_tiledscene_assets::level::TileImage;

/// Something images can be drawn onto.
pub trait DrawSurface {
    /// Draw `image` stretched to `size` with its top-left corner at `position`.
    fn blit(&mut self, image: &TileImage, position: Vec2, size: Vec2);
}

/// One recorded blit.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCommand {
    pub image: TileImage,
    pub position: Vec2,
    pub size: Vec2,
}

/// Blits of the current frame, in draw order (first drawn is furthest back).
#[derive(Resource, Debug, Clone, Default)]
pub struct FrameDrawList {
    commands: Vec<DrawCommand>,
}

impl FrameDrawList {
    /// Start a new frame.
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl DrawSurface for FrameDrawList {
    fn blit(&mut self, image: &TileImage, position: Vec2, size: Vec2) {
        self.commands.push(DrawCommand {
            image: image.clone(),
            position,
            size,
        });
    }
}
