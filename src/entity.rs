//! Entities - named collections of animation modes.

use std::collections::HashMap;

use crate::error::SheetError;
use crate::mode::Mode;

/// A named logical character/object sliced from the sheet, holding one or
/// more modes addressable by index or name.
///
/// Mode index is the mode's column (or, with frames running rows, its row)
/// position within the entity's sub-grid.
#[derive(Debug, Clone)]
pub struct Entity {
    name: String,
    sprite_width: u32,
    sprite_height: u32,
    modes: HashMap<usize, Mode>,
    mode_names: HashMap<String, usize>,
}

impl Entity {
    pub(crate) fn new(name: String, sprite_width: u32, sprite_height: u32) -> Self {
        Self {
            name,
            sprite_width,
            sprite_height,
            modes: HashMap::new(),
            mode_names: HashMap::new(),
        }
    }

    pub(crate) fn insert_mode(&mut self, index: usize, mode: Mode) {
        self.mode_names.insert(mode.name().to_string(), index);
        self.modes.insert(index, mode);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn set_name(&mut self, name: String) {
        self.name = name;
    }

    /// Pixel size of this entity's sprites.
    pub fn sprite_size(&self) -> (u32, u32) {
        (self.sprite_width, self.sprite_height)
    }

    pub fn mode(&self, index: usize) -> Result<&Mode, SheetError> {
        self.modes
            .get(&index)
            .ok_or(SheetError::ModeIndexNotFound(index))
    }

    pub fn mode_mut(&mut self, index: usize) -> Result<&mut Mode, SheetError> {
        self.modes
            .get_mut(&index)
            .ok_or(SheetError::ModeIndexNotFound(index))
    }

    /// Index of the mode named `name`.
    pub fn mode_index(&self, name: &str) -> Result<usize, SheetError> {
        self.mode_names
            .get(name)
            .copied()
            .ok_or_else(|| SheetError::ModeNameNotFound(name.to_string()))
    }

    pub fn mode_by_name(&self, name: &str) -> Result<&Mode, SheetError> {
        let index = self.mode_index(name)?;
        match self.modes.get(&index) {
            Some(mode) => Ok(mode),
            // A name mapped to a missing mode cannot happen after a
            // successful construction; the entity is corrupted.
            None => panic!(
                "mode index {index} for name '{name}' missing from entity '{}'",
                self.name
            ),
        }
    }

    /// Rename a mode, dropping the old name.
    pub fn rename_mode(&mut self, old_name: &str, new_name: &str) -> Result<(), SheetError> {
        let index = self
            .mode_names
            .remove(old_name)
            .ok_or_else(|| SheetError::ModeNameNotFound(old_name.to_string()))?;
        match self.modes.get_mut(&index) {
            Some(mode) => mode.set_name(new_name.to_string()),
            None => panic!(
                "mode index {index} for name '{old_name}' missing from entity '{}'",
                self.name
            ),
        }
        self.mode_names.insert(new_name.to_string(), index);
        Ok(())
    }

    pub fn mode_count(&self) -> usize {
        self.modes.len()
    }

    /// Shrink the mode count to `count`, discarding every mode (and its
    /// name) with index >= `count`. Mode counts only ever decrease.
    pub fn set_mode_count(&mut self, count: usize) -> Result<(), SheetError> {
        if count == 0 || count > self.modes.len() {
            return Err(SheetError::InvalidCount {
                what: "mode",
                requested: count,
                current: self.modes.len(),
            });
        }
        self.mode_names.retain(|_, index| *index < count);
        self.modes.retain(|index, _| *index < count);
        Ok(())
    }
}
