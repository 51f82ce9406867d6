//! Sheet construction and the entity arena.
//!
//! A sheet is built once from a decoded source image plus its grid
//! dimensions: validation, the optional whole-image resize, then slicing a
//! sprite rectangle for every (entity, mode, frame) triple and scanning each
//! mode's alpha channel for the opacity fast-path flag. After construction
//! the graph is immutable except for renames and shrink-only count setters,
//! all of which go through `&mut Sheet` - instances hold indices into the
//! arena and never mutate it.

use std::collections::HashMap;

use image::{imageops, imageops::FilterType, RgbaImage};
use serde::{Deserialize, Serialize};

use crate::animation::Animation;
use crate::entity::Entity;
use crate::error::SheetError;
use crate::geometry::{SheetDimensions, SpriteRect};
use crate::instance::Instance;
use crate::mode::Mode;
use crate::sprite::Sprite;

/// Caller-supplied naming for one entity and its modes.
///
/// The mode list's length decides how many of the entity's mode cells are
/// populated; it must not exceed `modes_per_entity`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityModeNames {
    pub entity: String,
    pub modes: Vec<String>,
}

/// The full set of entities sliced from one source image.
///
/// Owns the (possibly resized) image; sprites are handed out as borrowed
/// views into it, never copies. Entity index order is row-major from the
/// top-left, wrapping at the end of each row.
#[derive(Debug, Clone)]
pub struct Sheet {
    image: RgbaImage,
    dimensions: SheetDimensions,
    entities: HashMap<usize, Entity>,
    entity_names: HashMap<String, usize>,
}

impl Sheet {
    /// Build a sheet with auto-generated names: entities "Entity0" through
    /// "EntityN-1", each with modes "Mode0" through "ModeM-1". Every entity
    /// cell is populated.
    pub fn new(image: RgbaImage, dimensions: SheetDimensions) -> Result<Self, SheetError> {
        let mode_names = auto_mode_names(dimensions.modes_per_entity);
        let names: Vec<EntityModeNames> = (0..dimensions.entity_count())
            .map(|i| EntityModeNames {
                entity: format!("Entity{i}"),
                modes: mode_names.clone(),
            })
            .collect();
        Self::build(image, dimensions, &names)
    }

    /// Build a sheet with caller-named entities and auto-generated mode
    /// names. The length of `entity_names` decides how many entity cells are
    /// populated, in row-major order from the top-left.
    pub fn with_entity_names(
        image: RgbaImage,
        dimensions: SheetDimensions,
        entity_names: &[String],
    ) -> Result<Self, SheetError> {
        let mode_names = auto_mode_names(dimensions.modes_per_entity);
        Self::with_shared_mode_names(image, dimensions, entity_names, &mode_names)
    }

    /// Build a sheet with caller-named entities that all share one
    /// mode-name list.
    pub fn with_shared_mode_names(
        image: RgbaImage,
        dimensions: SheetDimensions,
        entity_names: &[String],
        mode_names: &[String],
    ) -> Result<Self, SheetError> {
        let names: Vec<EntityModeNames> = entity_names
            .iter()
            .map(|entity| EntityModeNames {
                entity: entity.clone(),
                modes: mode_names.to_vec(),
            })
            .collect();
        Self::build(image, dimensions, &names)
    }

    /// Build a sheet with per-entity naming. Each entry's mode list length
    /// decides how many modes that entity populates; a list longer than
    /// `modes_per_entity` fails with an error naming the offending entity.
    pub fn with_names(
        image: RgbaImage,
        dimensions: SheetDimensions,
        names: &[EntityModeNames],
    ) -> Result<Self, SheetError> {
        Self::build(image, dimensions, names)
    }

    fn build(
        image: RgbaImage,
        dimensions: SheetDimensions,
        names: &[EntityModeNames],
    ) -> Result<Self, SheetError> {
        dimensions.validate(image.width(), image.height())?;

        // Naming data comes from the caller: validate it up front at the
        // public boundary so the slicing loop below can trust its inputs.
        let capacity = dimensions.entity_count() as usize;
        if names.len() > capacity {
            return Err(SheetError::EntityNamesOverflow {
                supplied: names.len(),
                capacity,
            });
        }
        let mode_capacity = dimensions.modes_per_entity as usize;
        for entry in names {
            if entry.modes.len() > mode_capacity {
                return Err(SheetError::ModeNamesOverflow {
                    entity: entry.entity.clone(),
                    supplied: entry.modes.len(),
                    capacity: mode_capacity,
                });
            }
        }

        let (image, dimensions) = apply_resize(image, dimensions);
        let (sprite_width, sprite_height) = (dimensions.sprite_width, dimensions.sprite_height);

        let mut entities = HashMap::new();
        let mut entity_names = HashMap::new();
        for (i, entry) in names.iter().enumerate() {
            let mut entity = Entity::new(entry.entity.clone(), sprite_width, sprite_height);
            for (j, mode_name) in entry.modes.iter().enumerate() {
                let frames: Vec<SpriteRect> = (0..dimensions.frames_per_animation)
                    .map(|f| dimensions.frame_rect(i as u32, j as u32, f))
                    .collect();
                let fully_opaque = frames
                    .iter()
                    .all(|rect| Sprite::new(&image, *rect).is_fully_opaque());
                entity.insert_mode(
                    j,
                    Mode::new(
                        mode_name.clone(),
                        sprite_width,
                        sprite_height,
                        frames,
                        fully_opaque,
                    ),
                );
            }
            entity_names.insert(entry.entity.clone(), i);
            entities.insert(i, entity);
        }

        Ok(Self {
            image,
            dimensions,
            entities,
            entity_names,
        })
    }

    /// The sheet's dimensions after any construction-time resize.
    pub fn dimensions(&self) -> &SheetDimensions {
        &self.dimensions
    }

    /// Pixel size of one sprite (post-resize if a resize was configured).
    pub fn sprite_size(&self) -> (u32, u32) {
        (self.dimensions.sprite_width, self.dimensions.sprite_height)
    }

    /// The backing image all sprites are views into.
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// A zero-copy sprite view of `rect` within the sheet image.
    pub fn sprite(&self, rect: SpriteRect) -> Sprite<'_> {
        Sprite::new(&self.image, rect)
    }

    pub fn entity(&self, index: usize) -> Result<&Entity, SheetError> {
        self.entities
            .get(&index)
            .ok_or(SheetError::EntityIndexNotFound(index))
    }

    pub fn entity_mut(&mut self, index: usize) -> Result<&mut Entity, SheetError> {
        self.entities
            .get_mut(&index)
            .ok_or(SheetError::EntityIndexNotFound(index))
    }

    /// Index of the entity named `name`.
    pub fn entity_index(&self, name: &str) -> Result<usize, SheetError> {
        self.entity_names
            .get(name)
            .copied()
            .ok_or_else(|| SheetError::EntityNameNotFound(name.to_string()))
    }

    pub fn entity_by_name(&self, name: &str) -> Result<&Entity, SheetError> {
        let index = self.entity_index(name)?;
        match self.entities.get(&index) {
            Some(entity) => Ok(entity),
            // A name mapped to a missing entity cannot happen after a
            // successful construction; the sheet is corrupted.
            None => panic!("entity index {index} for name '{name}' missing from sheet"),
        }
    }

    pub fn entity_by_name_mut(&mut self, name: &str) -> Result<&mut Entity, SheetError> {
        let index = self.entity_index(name)?;
        match self.entities.get_mut(&index) {
            Some(entity) => Ok(entity),
            None => panic!("entity index {index} for name '{name}' missing from sheet"),
        }
    }

    /// Rename an entity, dropping the old name.
    pub fn rename_entity(&mut self, old_name: &str, new_name: &str) -> Result<(), SheetError> {
        let index = self
            .entity_names
            .remove(old_name)
            .ok_or_else(|| SheetError::EntityNameNotFound(old_name.to_string()))?;
        match self.entities.get_mut(&index) {
            Some(entity) => entity.set_name(new_name.to_string()),
            None => panic!("entity index {index} for name '{old_name}' missing from sheet"),
        }
        self.entity_names.insert(new_name.to_string(), index);
        Ok(())
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Shrink the entity count to `count`, discarding every entity (and its
    /// name) with index >= `count`. Entity counts only ever decrease -
    /// there is no growth operation, since sheets are fixed at construction
    /// and only narrowed afterward.
    pub fn set_entity_count(&mut self, count: usize) -> Result<(), SheetError> {
        if count == 0 || count > self.entities.len() {
            return Err(SheetError::InvalidCount {
                what: "entity",
                requested: count,
                current: self.entities.len(),
            });
        }
        self.entity_names.retain(|_, index| *index < count);
        self.entities.retain(|index, _| *index < count);
        Ok(())
    }

    /// Create an independently-animating instance bound to the entity at
    /// `entity_index`, starting stopped on `initial_mode` at frame zero.
    /// Many instances may bind the same entity; each owns its own playback
    /// state.
    pub fn instance(
        &self,
        entity_index: usize,
        initial_mode: usize,
        advance_every: u32,
    ) -> Result<Instance, SheetError> {
        self.entity(entity_index)?.mode(initial_mode)?;
        if advance_every == 0 {
            return Err(SheetError::InvalidAdvanceEvery);
        }
        Ok(Instance::new(
            entity_index,
            initial_mode,
            Animation::new(advance_every),
        ))
    }

    /// Like [`Sheet::instance`] but resolving the entity and initial mode by
    /// name.
    pub fn instance_by_names(
        &self,
        entity_name: &str,
        mode_name: &str,
        advance_every: u32,
    ) -> Result<Instance, SheetError> {
        let entity_index = self.entity_index(entity_name)?;
        let mode_index = self.entity_by_name(entity_name)?.mode_index(mode_name)?;
        self.instance(entity_index, mode_index, advance_every)
    }
}

fn auto_mode_names(count: u32) -> Vec<String> {
    (0..count).map(|i| format!("Mode{i}")).collect()
}

/// Resize the whole source image before slicing, if configured. The caller
/// has already validated that the target preserves the sprite aspect ratio.
fn apply_resize(image: RgbaImage, dimensions: SheetDimensions) -> (RgbaImage, SheetDimensions) {
    if dimensions.resize.is_none() {
        return (image, dimensions);
    }
    let scaled = dimensions.resized();
    let (width, height) = scaled.sheet_size();
    let image = imageops::resize(&image, width, height, FilterType::Nearest);
    (image, scaled)
}
