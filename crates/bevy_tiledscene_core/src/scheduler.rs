//! Frame scheduling for animated tiles and tile objects.
//!
//! Each entry steps at most one frame per call: when more than its duration has passed
//! since the last step it moves to the next frame and restarts its timer from `now`.
//! Animation speed therefore follows wall-clock time, and a long stall costs a single
//! step rather than a burst of catch-up frames.

use bevy::prelude::*;
use bevy_tiledscene_assets::level::{AnimatedEntry, AnimatedKind, TileAtlas, TileKey};
use thiserror::Error;

use crate::camera::ScrollCamera;
use crate::surface::DrawSurface;

#[derive(Debug, Error)]
pub enum FrameError {
    #[error("Animation of tile {source_tile:?} shows tile {frame:?}, which has no image")]
    MissingFrameImage { source_tile: TileKey, frame: TileKey },

    #[error("Animation of tile {source_tile:?} is on frame {index} of {frame_count}")]
    FrameOutOfRange {
        source_tile: TileKey,
        index: usize,
        frame_count: usize,
    },
}

/// Step one entry if its duration has elapsed. Returns whether the timer fired.
///
/// An index past the last frame wraps to 0, whether or not the timer fired.
pub fn advance_entry(entry: &mut AnimatedEntry, now_ms: u64) -> bool {
    let fired = now_ms.saturating_sub(entry.last_update_ms) > entry.duration_ms();
    if fired {
        entry.current_frame += 1;
        entry.last_update_ms = now_ms;
    }
    if entry.current_frame >= entry.frames.len() {
        entry.current_frame = 0;
    }
    fired
}

/// Step every entry against the same clock reading.
pub fn advance(entries: &mut [AnimatedEntry], now_ms: u64) {
    for entry in entries.iter_mut() {
        advance_entry(entry, now_ms);
    }
}

/// Draw the current frame of every entry.
///
/// Grid tiles are drawn at their frame image's size times `zoom`; tile objects are
/// stretched to their own size times `zoom`. Entries must have been advanced first: an
/// index with no frame is an error.
pub fn draw_animated(
    camera: &ScrollCamera,
    entries: &[AnimatedEntry],
    atlas: &TileAtlas,
    zoom: f32,
    surface: &mut impl DrawSurface,
) -> Result<(), FrameError> {
    for entry in entries {
        let frame = entry.current().ok_or(FrameError::FrameOutOfRange {
            source_tile: entry.source,
            index: entry.current_frame,
            frame_count: entry.frames.len(),
        })?;
        let image = atlas
            .get(frame.tile)
            .ok_or(FrameError::MissingFrameImage {
                source_tile: entry.source,
                frame: frame.tile,
            })?;
        let size = match entry.kind {
            AnimatedKind::GridTile => image.native_size * zoom,
            AnimatedKind::ObjectTile { size } => (size * zoom).round(),
        };
        surface.blit(image, camera.screen_position(entry.position), size);
    }
    Ok(())
}
