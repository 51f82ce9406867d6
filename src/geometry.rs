//! Sheet layout resolution - maps entity/mode/frame indices to pixel rectangles.
//!
//! A sheet is a grid of entities; each entity is itself a sub-grid of sprites.
//! Orientation decides what the sub-grid's axes mean: with `frames_run_rows`
//! false (the default) each mode occupies a column and its frames run down it,
//! with `frames_run_rows` true each mode occupies a row and its frames run
//! along it.

use serde::{Deserialize, Serialize};

use crate::error::SheetError;

/// A pixel rectangle in sheet space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpriteRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl SpriteRect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// One past the rightmost pixel column.
    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    /// One past the bottom pixel row.
    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }
}

/// Grid layout of a sprite sheet.
///
/// The source image must be exactly
/// `entities_per_row * columns_per_entity * sprite_width` pixels wide and
/// `entities_per_column * rows_per_entity * sprite_height` pixels high, where
/// the per-entity column/row counts come from [`SheetDimensions::entity_grid`].
///
/// Serde-derived so layout manifests can live in JSON next to the sheet
/// images they describe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetDimensions {
    /// Entities per sheet row. There are
    /// `entities_per_row * entities_per_column` entities in a sheet.
    pub entities_per_row: u32,
    /// Entities per sheet column.
    pub entities_per_column: u32,
    /// Modes (animation variants) per entity. A mode cell may be blank /
    /// unused; nothing checks for blank sprites.
    pub modes_per_entity: u32,
    /// Frames in each mode's animation.
    pub frames_per_animation: u32,
    /// Width of one sprite in source pixels.
    pub sprite_width: u32,
    /// Height of one sprite in source pixels.
    pub sprite_height: u32,
    /// Optional [width, height] to resize every sprite to before slicing.
    /// The whole source image is resized in one pass; the target must
    /// preserve the sprite aspect ratio.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub resize: Option<[u32; 2]>,
    /// Orientation of modes within an entity. False (default): each mode is
    /// a column and its frames run down it. True: each mode is a row and its
    /// frames run along it.
    #[serde(default)]
    pub frames_run_rows: bool,
}

impl SheetDimensions {
    /// Columns and rows one entity occupies in the sheet grid:
    /// `(frames_per_animation, modes_per_entity)` when frames run rows,
    /// `(modes_per_entity, frames_per_animation)` otherwise.
    pub fn entity_grid(&self) -> (u32, u32) {
        if self.frames_run_rows {
            (self.frames_per_animation, self.modes_per_entity)
        } else {
            (self.modes_per_entity, self.frames_per_animation)
        }
    }

    /// Total entity cells in the sheet.
    pub fn entity_count(&self) -> u32 {
        self.entities_per_row * self.entities_per_column
    }

    /// Expected pixel size of the source image.
    pub fn sheet_size(&self) -> (u32, u32) {
        let (columns, rows) = self.entity_grid();
        (
            self.entities_per_row * columns * self.sprite_width,
            self.entities_per_column * rows * self.sprite_height,
        )
    }

    /// Top-left pixel of the entity at linear `index`. Index order is
    /// row-major from the top-left, wrapping at the end of each row.
    pub fn entity_origin(&self, index: u32) -> (u32, u32) {
        let (columns, rows) = self.entity_grid();
        (
            (index % self.entities_per_row) * columns * self.sprite_width,
            (index / self.entities_per_row) * rows * self.sprite_height,
        )
    }

    /// Pixel rectangle of frame `frame` of mode `mode` within the entity at
    /// linear `index`.
    pub fn frame_rect(&self, index: u32, mode: u32, frame: u32) -> SpriteRect {
        let (x, y) = self.entity_origin(index);
        let (dx, dy) = if self.frames_run_rows {
            (frame, mode)
        } else {
            (mode, frame)
        };
        SpriteRect::new(
            x + dx * self.sprite_width,
            y + dy * self.sprite_height,
            self.sprite_width,
            self.sprite_height,
        )
    }

    /// Validate the counts, the source image size, and the resize target.
    pub fn validate(&self, image_width: u32, image_height: u32) -> Result<(), SheetError> {
        if self.entities_per_row == 0
            || self.entities_per_column == 0
            || self.modes_per_entity == 0
            || self.frames_per_animation == 0
            || self.sprite_width == 0
            || self.sprite_height == 0
        {
            return Err(SheetError::ZeroDimension);
        }
        let (expected_width, expected_height) = self.sheet_size();
        if image_width != expected_width {
            return Err(SheetError::WidthMismatch {
                expected: expected_width,
                actual: image_width,
            });
        }
        if image_height != expected_height {
            return Err(SheetError::HeightMismatch {
                expected: expected_height,
                actual: image_height,
            });
        }
        if let Some([resize_width, resize_height]) = self.resize {
            if resize_width == 0 || resize_height == 0 {
                return Err(SheetError::ZeroDimension);
            }
            // Integer cross-multiplication, no float comparison.
            if self.sprite_width * resize_height != self.sprite_height * resize_width {
                return Err(SheetError::ResizeAspectMismatch {
                    sprite_width: self.sprite_width,
                    sprite_height: self.sprite_height,
                    resize_width,
                    resize_height,
                });
            }
        }
        Ok(())
    }

    /// Dimensions after the optional whole-image resize has been applied:
    /// the sprite size becomes the resize target and the target is cleared.
    pub(crate) fn resized(&self) -> SheetDimensions {
        match self.resize {
            Some([width, height]) => SheetDimensions {
                sprite_width: width,
                sprite_height: height,
                resize: None,
                ..*self
            },
            None => *self,
        }
    }
}
