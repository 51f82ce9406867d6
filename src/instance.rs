//! Instances - live, independently-animating handles bound to one entity.

use image::RgbaImage;

use crate::animation::Animation;
use crate::error::SheetError;
use crate::sheet::Sheet;
use crate::sprite::Sprite;

/// A live handle binding one entity, one active mode, and an exclusively
/// owned [`Animation`], plus an optional display name.
///
/// Instances hold indices into the sheet's arena and take `&Sheet` on every
/// query, so many instances can play back the same entity independently.
/// Nothing an instance does mutates the sheet.
#[derive(Debug, Clone)]
pub struct Instance {
    name: Option<String>,
    entity: usize,
    mode: usize,
    animation: Animation,
}

impl Instance {
    pub(crate) fn new(entity: usize, mode: usize, animation: Animation) -> Self {
        Self {
            name: None,
            entity,
            mode,
            animation,
        }
    }

    /// Optional display name.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    pub fn clear_name(&mut self) {
        self.name = None;
    }

    /// Index of the bound entity in the sheet.
    pub fn entity_index(&self) -> usize {
        self.entity
    }

    /// Index of the active mode within the entity.
    pub fn mode_index(&self) -> usize {
        self.mode
    }

    /// Switch the active mode by index.
    ///
    /// Switching is a pure cursor swap: it neither stops nor restarts
    /// playback, and the current frame is kept - it is simply reinterpreted
    /// against the new mode's frame list (re-normalized modulo the new
    /// frame count at the next query).
    pub fn set_mode(&mut self, sheet: &Sheet, index: usize) -> Result<(), SheetError> {
        sheet.entity(self.entity)?.mode(index)?;
        self.mode = index;
        Ok(())
    }

    /// Switch the active mode by name. Same playback semantics as
    /// [`Instance::set_mode`].
    pub fn set_mode_by_name(&mut self, sheet: &Sheet, name: &str) -> Result<(), SheetError> {
        let index = sheet.entity(self.entity)?.mode_index(name)?;
        self.mode = index;
        Ok(())
    }

    pub fn running(&self) -> bool {
        self.animation.running()
    }

    /// Begin playback, preserving the current frame.
    pub fn start(&mut self) {
        self.animation.start();
    }

    /// Begin playback without resetting anything.
    pub fn resume(&mut self) {
        self.animation.resume();
    }

    /// Begin playback from frame zero.
    pub fn restart(&mut self) {
        self.animation.restart();
    }

    /// Stop playback and rewind to frame zero.
    pub fn reset(&mut self) {
        self.animation.reset();
    }

    /// Stop playback in place.
    pub fn stop(&mut self) {
        self.animation.stop();
    }

    pub fn advance_every(&self) -> u32 {
        self.animation.advance_every()
    }

    pub fn set_advance_every(&mut self, advance_every: u32) -> Result<(), SheetError> {
        self.animation.set_advance_every(advance_every)
    }

    /// True iff the next [`Instance::frame`] call returns a different frame
    /// than the previous one (or is the first since start/restart/reset).
    pub fn next_frame_differs(&self, sheet: &Sheet) -> bool {
        let frame_count = sheet
            .entity(self.entity)
            .and_then(|entity| entity.mode(self.mode))
            .map(|mode| mode.frame_count())
            .unwrap_or(0);
        self.animation.next_frame_differs(frame_count)
    }

    /// The frame to display for this query.
    ///
    /// The current frame is normalized modulo the mode's live frame count
    /// first, so external frame-count shrinks are safe. While running, the
    /// query also advances the cadence (see [`Animation::tick`]). Fails with
    /// a not-found error if the bound entity or mode has been truncated away.
    pub fn frame<'a>(&mut self, sheet: &'a Sheet) -> Result<Sprite<'a>, SheetError> {
        let mode = sheet.entity(self.entity)?.mode(self.mode)?;
        let index = self.animation.tick(mode.frame_count());
        let rect = mode.frame_rect(index)?;
        Ok(sheet.sprite(rect))
    }

    /// Advance playback exactly as [`Instance::frame`] does, without
    /// materializing the frame.
    pub fn advance(&mut self, sheet: &Sheet) -> Result<(), SheetError> {
        let mode = sheet.entity(self.entity)?.mode(self.mode)?;
        self.animation.tick(mode.frame_count());
        Ok(())
    }

    /// The current frame as an owned copy scaled to fit within
    /// `width` x `height` (aspect preserved, nearest-neighbor). Advances
    /// like [`Instance::frame`].
    pub fn frame_scaled(
        &mut self,
        sheet: &Sheet,
        width: u32,
        height: u32,
    ) -> Result<RgbaImage, SheetError> {
        Ok(self.frame(sheet)?.scaled(width, height))
    }

    /// Composite the current frame onto `canvas` with its top-left corner at
    /// (x, y), clipped at the canvas edges.
    ///
    /// Queries the frame, so playback advances exactly as with
    /// [`Instance::frame`]; to place without advancing, stop first and start
    /// again after. Modes flagged fully opaque take the overwrite fast path;
    /// any other mode is alpha-blended so transparent sprite pixels keep the
    /// canvas underneath - using the fast path there would corrupt them.
    pub fn place_sprite(
        &mut self,
        sheet: &Sheet,
        canvas: &mut RgbaImage,
        x: u32,
        y: u32,
    ) -> Result<(), SheetError> {
        let fully_opaque = sheet.entity(self.entity)?.mode(self.mode)?.fully_opaque();
        let frame = self.frame(sheet)?;
        if fully_opaque {
            frame.blit_copy(canvas, x, y);
        } else {
            frame.blit_over(canvas, x, y);
        }
        Ok(())
    }
}
