//! The metatile brush used by paint and fill operations

use serde::{Deserialize, Serialize};

use crate::GridError;

/// One brush cell. Disabled cells are skipped while stamping, which lets a
/// rectangular selection carry holes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionCell {
    pub metatile_id: u16,
    pub enabled: bool,
}

impl SelectionCell {
    pub fn new(metatile_id: u16) -> Self {
        Self {
            metatile_id,
            enabled: true,
        }
    }
}

/// The current multi-cell brush.
///
/// Immutable once handed to a paint action; rebuilt whenever the user picks
/// from the palette or the map. Collision/elevation pairs are optional and
/// only applied when present for every cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetatileSelection {
    width: i32,
    height: i32,
    cells: Vec<SelectionCell>,
    collisions: Option<Vec<(u16, u16)>>,
}

impl MetatileSelection {
    /// A 1x1 brush
    pub fn single(metatile_id: u16) -> Self {
        Self {
            width: 1,
            height: 1,
            cells: vec![SelectionCell::new(metatile_id)],
            collisions: None,
        }
    }

    /// Build a brush from row-major metatile ids
    pub fn from_metatiles(width: i32, height: i32, ids: Vec<u16>) -> Result<Self, GridError> {
        if width <= 0 || height <= 0 {
            return Err(GridError::InvalidDimensions { width, height });
        }
        let expected = (width as usize) * (height as usize);
        if ids.len() != expected {
            return Err(GridError::SizeMismatch {
                expected,
                actual: ids.len(),
            });
        }
        Ok(Self {
            width,
            height,
            cells: ids.into_iter().map(SelectionCell::new).collect(),
            collisions: None,
        })
    }

    /// Build a brush from explicit cells (some possibly disabled)
    pub fn from_cells(
        width: i32,
        height: i32,
        cells: Vec<SelectionCell>,
    ) -> Result<Self, GridError> {
        if width <= 0 || height <= 0 {
            return Err(GridError::InvalidDimensions { width, height });
        }
        let expected = (width as usize) * (height as usize);
        if cells.len() != expected {
            return Err(GridError::SizeMismatch {
                expected,
                actual: cells.len(),
            });
        }
        Ok(Self {
            width,
            height,
            cells,
            collisions: None,
        })
    }

    /// Attach per-cell collision/elevation pairs.
    ///
    /// Pairs are dropped unless there is exactly one per cell.
    pub fn with_collisions(mut self, collisions: Vec<(u16, u16)>) -> Self {
        if collisions.len() == self.cells.len() {
            self.collisions = Some(collisions);
        }
        self
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cell(&self, index: usize) -> Option<SelectionCell> {
        self.cells.get(index).copied()
    }

    pub fn metatile_at(&self, index: usize) -> Option<u16> {
        self.cells.get(index).map(|c| c.metatile_id)
    }

    /// Collision/elevation pair for a cell, when the brush carries them
    pub fn collision_at(&self, index: usize) -> Option<(u16, u16)> {
        self.collisions.as_ref().and_then(|c| c.get(index).copied())
    }

    pub fn has_collisions(&self) -> bool {
        self.collisions.is_some()
    }

    /// Whether `metatile_id` belongs to this brush (smart-path membership)
    pub fn contains_metatile(&self, metatile_id: u16) -> bool {
        self.cells
            .iter()
            .any(|c| c.enabled && c.metatile_id == metatile_id)
    }

    /// Smart paths need exactly a 3x3 selection
    pub fn is_smart_path(&self) -> bool {
        self.width == 3 && self.height == 3
    }

    /// Replace metatile ids the current project cannot represent.
    ///
    /// Invalid ids are substituted with 0 so a stale palette pick can never
    /// write an out-of-range id into a grid.
    pub fn sanitize(&mut self, max_metatile_id: u16) {
        for cell in &mut self.cells {
            if cell.metatile_id > max_metatile_id {
                cell.metatile_id = 0;
            }
        }
    }
}
