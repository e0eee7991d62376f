//! # rommap
//!
//! Tile-based map editing core for ROM hacking tools.
//!
//! This umbrella crate re-exports the rommap_* sub-crates:
//!
//! - [`core`] - Grids, brushes and fill algorithms (Block, Blockdata,
//!   MetatileSelection, TilemapTile)
//! - [`editor`] - Editable documents with undo/redo (LayoutDocument,
//!   RegionTilemapDocument, EditorConfig)
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use rommap::prelude::*;
//!
//! let mut layout = LayoutDocument::new("route1", 20, 20, 2, 2)?;
//! layout.fill_at(0, 0, &MetatileSelection::single(7), false);
//! layout.undo();
//! ```

/// Grids, brushes and fill algorithms.
///
/// This module provides the fundamental types:
/// - [`Block`] - One map cell (metatile id, collision, elevation)
/// - [`Blockdata`] - A resizable row-major grid of blocks
/// - [`MetatileSelection`] - The multi-cell brush paint operations stamp
/// - [`TilemapTile`] - Region-map tile encodings (plain/4bpp/8bpp)
pub mod core {
    pub use rommap_core::*;
}

pub use rommap_core::{
    fill, Block, BlockBits, Blockdata, GridError, MetatileSelection, SelectionCell, TilemapFormat,
    TilemapTile, SMART_PATH_TABLE,
};

/// Editable documents with transactional undo/redo.
///
/// This module provides:
/// - [`LayoutDocument`] - Map layout editing (paint, fills, shift, resize)
/// - [`RegionTilemapDocument`] - Region-map tilemap and section editing
/// - [`History`] - The generic per-document undo engine
/// - [`EditorConfig`] - Persisted editor settings
pub mod editor {
    pub use rommap_editor::*;
}

pub use rommap_editor::{
    Command, ConfigError, EditAction, EditorConfig, History, LayoutChange, LayoutCommand,
    LayoutDocument, LayoutState, MapSectionEntry, RegionChange, RegionCommand, RegionMapState,
    RegionTilemapDocument, SectionGrid, TileGrid, DEFAULT_MAX_MAP_CELLS, MAPSEC_NONE,
};

/// Commonly used types and traits.
///
/// Import with:
/// ```rust,ignore
/// use rommap::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        Block, BlockBits, Blockdata, EditorConfig, GridError, LayoutChange, LayoutDocument,
        MapSectionEntry, MetatileSelection, RegionTilemapDocument, SelectionCell, TileGrid,
        TilemapFormat, TilemapTile, MAPSEC_NONE,
    };
}
