//! Spritegrid - grid-addressed sprite sheets for 2D animation
//!
//! This library provides functionality to:
//! - Slice one decoded source image into a grid of zero-copy sprite views
//! - Organize sprites into named entities with named animation modes
//! - Drive per-instance playback (frame cursor, advance cadence, start/stop)
//! - Composite the current frame onto a canvas, with an opaque fast path
//!
//! Image decoding and file I/O are the caller's responsibility; a sheet is
//! built from an already-decoded `image::RgbaImage`.

pub mod animation;
pub mod entity;
pub mod error;
pub mod geometry;
pub mod instance;
pub mod mode;
pub mod sheet;
pub mod sprite;
