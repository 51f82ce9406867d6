//! Error types for sheet construction, lookup, and playback control.
//!
//! Construction errors (`WidthMismatch`, `HeightMismatch`, `ResizeAspectMismatch`,
//! the naming overflows) are fatal to the factory call and return no sheet.
//! Lookup and mutation errors (`*NotFound`, `InvalidCount`, `InvalidAdvanceEvery`)
//! are recoverable caller errors and leave state unchanged.
//!
//! Internal-consistency violations (a name map pointing at a missing entry)
//! are never returned as errors - they panic, since they can only mean
//! programmer error or corrupted state after a successful construction.

use thiserror::Error;

/// Errors returned by the sheet construction, lookup, and playback surfaces.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SheetError {
    /// One or more sheet dimension fields is zero.
    #[error("all sheet dimension fields must be > 0")]
    ZeroDimension,

    /// The source image width does not match the computed layout width.
    #[error("image width ({actual}) is not entities_per_row * columns_per_entity * sprite_width ({expected})")]
    WidthMismatch { expected: u32, actual: u32 },

    /// The source image height does not match the computed layout height.
    #[error("image height ({actual}) is not entities_per_column * rows_per_entity * sprite_height ({expected})")]
    HeightMismatch { expected: u32, actual: u32 },

    /// The resize target does not preserve the sprite aspect ratio.
    #[error("resize target {resize_width}x{resize_height} does not preserve the {sprite_width}x{sprite_height} sprite aspect ratio")]
    ResizeAspectMismatch {
        sprite_width: u32,
        sprite_height: u32,
        resize_width: u32,
        resize_height: u32,
    },

    /// More entity names were supplied than the sheet has entity cells.
    #[error("{supplied} entity names supplied but the sheet holds {capacity} entities")]
    EntityNamesOverflow { supplied: usize, capacity: usize },

    /// One entity's mode-name list is longer than modes_per_entity.
    #[error("entity '{entity}' has {supplied} mode names but the sheet holds {capacity} modes per entity")]
    ModeNamesOverflow {
        entity: String,
        supplied: usize,
        capacity: usize,
    },

    #[error("entity with index {0} does not exist in sheet")]
    EntityIndexNotFound(usize),

    #[error("entity with name '{0}' does not exist in sheet")]
    EntityNameNotFound(String),

    #[error("mode with index {0} does not exist in entity")]
    ModeIndexNotFound(usize),

    #[error("mode with name '{0}' does not exist in entity")]
    ModeNameNotFound(String),

    #[error("frame index {index} is out of bounds for mode with {count} frames")]
    FrameIndexNotFound { index: usize, count: usize },

    /// A shrink-only count setter was asked to grow, or to shrink to zero.
    #[error("new {what} count ({requested}) must be > 0 and <= the current {what} count ({current})")]
    InvalidCount {
        what: &'static str,
        requested: usize,
        current: usize,
    },

    #[error("advance_every must be > 0")]
    InvalidAdvanceEvery,
}
