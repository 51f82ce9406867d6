//! Animation modes - named, ordered frame lists within an entity.

use crate::error::SheetError;
use crate::geometry::SpriteRect;

/// A named animation variant of an entity: an ordered list of frame
/// rectangles plus a cached opacity flag.
///
/// The `fully_opaque` flag is fixed at sheet construction by scanning every
/// frame's alpha channel. It is a blit fast-path hint: source pixels are
/// immutable for the sheet's lifetime, so it can never go stale.
#[derive(Debug, Clone, PartialEq)]
pub struct Mode {
    name: String,
    sprite_width: u32,
    sprite_height: u32,
    fully_opaque: bool,
    frames: Vec<SpriteRect>,
}

impl Mode {
    pub(crate) fn new(
        name: String,
        sprite_width: u32,
        sprite_height: u32,
        frames: Vec<SpriteRect>,
        fully_opaque: bool,
    ) -> Self {
        Self {
            name,
            sprite_width,
            sprite_height,
            fully_opaque,
            frames,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn set_name(&mut self, name: String) {
        self.name = name;
    }

    /// Pixel size of one frame.
    pub fn sprite_size(&self) -> (u32, u32) {
        (self.sprite_width, self.sprite_height)
    }

    /// True iff every pixel of every frame is fully opaque.
    pub fn fully_opaque(&self) -> bool {
        self.fully_opaque
    }

    /// Rectangle of the frame at `index`.
    ///
    /// Unlike `Instance::frame` this neither tracks nor advances a current
    /// frame - a current frame is an instance concept, not a mode concept.
    pub fn frame_rect(&self, index: usize) -> Result<SpriteRect, SheetError> {
        self.frames
            .get(index)
            .copied()
            .ok_or(SheetError::FrameIndexNotFound {
                index,
                count: self.frames.len(),
            })
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Shrink the frame list to `count`. Frame counts only ever decrease -
    /// sheets are fixed at construction and narrowed afterward, e.g. to limit
    /// an animation to a subset of its frames.
    pub fn set_frame_count(&mut self, count: usize) -> Result<(), SheetError> {
        if count == 0 || count > self.frames.len() {
            return Err(SheetError::InvalidCount {
                what: "frame",
                requested: count,
                current: self.frames.len(),
            });
        }
        self.frames.truncate(count);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mode_with_frames(count: u32) -> Mode {
        let frames = (0..count).map(|f| SpriteRect::new(0, f * 16, 16, 16)).collect();
        Mode::new("Walk".to_string(), 16, 16, frames, true)
    }

    #[test]
    fn test_frame_rect_lookup() {
        let mode = mode_with_frames(3);
        assert_eq!(mode.frame_rect(2).unwrap(), SpriteRect::new(0, 32, 16, 16));
        assert_eq!(
            mode.frame_rect(3),
            Err(SheetError::FrameIndexNotFound { index: 3, count: 3 })
        );
    }

    #[test]
    fn test_set_frame_count_shrinks_only() {
        let mut mode = mode_with_frames(3);
        mode.set_frame_count(2).unwrap();
        assert_eq!(mode.frame_count(), 2);

        // Growth and zero are rejected, state unchanged.
        assert_eq!(
            mode.set_frame_count(3),
            Err(SheetError::InvalidCount {
                what: "frame",
                requested: 3,
                current: 2
            })
        );
        assert_eq!(
            mode.set_frame_count(0),
            Err(SheetError::InvalidCount {
                what: "frame",
                requested: 0,
                current: 2
            })
        );
        assert_eq!(mode.frame_count(), 2);
    }

    #[test]
    fn test_shrink_to_current_is_allowed() {
        let mut mode = mode_with_frames(3);
        assert!(mode.set_frame_count(3).is_ok());
        assert_eq!(mode.frame_count(), 3);
    }
}
